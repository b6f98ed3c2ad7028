//! Per-frame sequencing: input snapshot, resize, step, swap, composite, present.

use glam::Vec4;

use crate::background::BackgroundSource;
use crate::composite::composite_into;
use crate::error::Result;
use crate::grid::{ColorGrid, GridPair, GridSize, SimGrid};
use crate::params::RippleConfig;
use crate::pointer::PointerState;
use crate::sim::step_into;

/// Receives the composited colour grid once per frame.
pub trait Presenter {
    fn present(&mut self, frame: &ColorGrid) -> Result<()>;
}

/// Requests the next tick (e.g. `requestAnimationFrame`).
pub trait Scheduler {
    fn schedule_next(&mut self);
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FramePhase {
    #[default]
    Idle,
    Stepping,
    Compositing,
    Presented,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameCounter {
    total: u64,
    since_reset: u64,
}

impl FrameCounter {
    /// Returns the simulation frame index for this frame and advances.
    pub fn next_frame(&mut self) -> u64 {
        let frame = self.since_reset;
        self.since_reset += 1;
        self.total += 1;
        frame
    }

    /// The next frame is simulated as frame 0.
    pub fn reset(&mut self) {
        self.since_reset = 0;
    }

    /// Frames rendered since start-up; never reset.
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn since_reset(&self) -> u64 {
        self.since_reset
    }
}

/// What one frame sees of the asynchronous inputs.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameSnapshot {
    pub pointer: PointerState,
    pub resize: Option<GridSize>,
}

/// Pointer and resize events buffered between frames.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameInputs {
    pointer: PointerState,
    pending_resize: Option<GridSize>,
}

impl FrameInputs {
    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        self.pointer = PointerState::Active { x, y };
    }

    pub fn on_pointer_leave(&mut self) {
        self.pointer = PointerState::Inactive;
    }

    /// Queues a reallocation; a later request replaces an unapplied one.
    pub fn on_resize(&mut self, width: u32, height: u32) {
        self.pending_resize = Some(GridSize::new(width, height));
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    /// Copies the pointer and takes any pending resize.
    pub fn snapshot(&mut self) -> FrameSnapshot {
        FrameSnapshot {
            pointer: self.pointer,
            resize: self.pending_resize.take(),
        }
    }
}

/// CPU frame driver: owns both simulation buffers, the background and the
/// output grid.
pub struct FrameDriver<B> {
    buffers: GridPair,
    background: ColorGrid,
    output: ColorGrid,
    source: B,
    frames: FrameCounter,
    phase: FramePhase,
    config: RippleConfig,
}

impl<B: BackgroundSource> FrameDriver<B> {
    pub fn new(size: GridSize, mut source: B, config: RippleConfig) -> Self {
        let background = source.render(size);
        Self {
            buffers: GridPair::new(size),
            background,
            output: ColorGrid::filled(size, Vec4::W),
            source,
            frames: FrameCounter::default(),
            phase: FramePhase::Idle,
            config,
        }
    }

    pub fn size(&self) -> GridSize {
        self.buffers.size()
    }

    pub fn phase(&self) -> FramePhase {
        self.phase
    }

    pub fn frames(&self) -> FrameCounter {
        self.frames
    }

    pub fn current(&self) -> &SimGrid {
        self.buffers.current()
    }

    pub fn background(&self) -> &ColorGrid {
        &self.background
    }

    pub fn output(&self) -> &ColorGrid {
        &self.output
    }

    /// Reallocates buffers, background and output at `size` and restarts the
    /// simulation at frame 0.
    pub fn resize(&mut self, size: GridSize) {
        log::debug!("[resize] {} -> {}", self.size(), size);
        self.buffers.resize(size);
        let background = self.source.render(size);
        self.background = if background.size() == size {
            background
        } else {
            log::warn!(
                "[resize] background source returned {}, expected {}; using blank fill",
                background.size(),
                size
            );
            ColorGrid::filled(size, Vec4::W)
        };
        self.output = ColorGrid::filled(size, Vec4::W);
        self.frames.reset();
        self.phase = FramePhase::Idle;
    }

    /// Runs one frame up to compositing, without presenting or scheduling.
    pub fn advance(&mut self, input: FrameSnapshot) -> Result<&ColorGrid> {
        if let Some(size) = input.resize {
            self.resize(size);
        }
        let frame = self.frames.next_frame();

        self.phase = FramePhase::Stepping;
        {
            let (current, next) = self.buffers.split();
            step_into(current, next, input.pointer, frame, &self.config.sim)?;
        }
        self.buffers.swap();

        self.phase = FramePhase::Compositing;
        composite_into(
            self.buffers.current(),
            &self.background,
            &mut self.output,
            &self.config.composite,
        )?;
        Ok(&self.output)
    }

    /// One full loop iteration. The next tick is requested after the frame
    /// completed, also when presenting failed.
    pub fn tick(
        &mut self,
        input: FrameSnapshot,
        presenter: &mut impl Presenter,
        scheduler: &mut impl Scheduler,
    ) -> Result<()> {
        let result = self
            .advance(input)
            .and_then(|frame| presenter.present(frame));
        if result.is_ok() {
            self.phase = FramePhase::Presented;
        }
        scheduler.schedule_next();
        result
    }
}
