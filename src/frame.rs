use instant::Instant;
use ripple_core::{FrameDriver, FrameInputs, Scheduler};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::background::CaptionBackground;
use crate::constants::STATS_INTERVAL_FRAMES;
use crate::fallback::CanvasPresenter;
use crate::render::GpuState;

pub enum Backend {
    Gpu {
        state: GpuState,
        caption: CaptionBackground,
    },
    Cpu {
        driver: FrameDriver<CaptionBackground>,
        presenter: CanvasPresenter,
    },
}

pub struct FrameContext {
    pub inputs: Rc<RefCell<FrameInputs>>,
    pub backend: Backend,
    pub stats: FrameStats,
}

impl FrameContext {
    pub fn frame(&mut self, scheduler: &mut impl Scheduler) {
        let snapshot = self.inputs.borrow_mut().snapshot();

        let presented = match &mut self.backend {
            Backend::Gpu { state, caption } => {
                if let Some(size) = snapshot.resize {
                    state.resize(size, &caption.rasterize_or_fill(size));
                }
                let presented = match state.render(snapshot.pointer) {
                    Ok(()) => true,
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        log::warn!("[gpu] surface lost; reconfiguring");
                        state.reconfigure();
                        false
                    }
                    Err(e) => {
                        log::error!("[gpu] render error: {:?}", e);
                        false
                    }
                };
                scheduler.schedule_next();
                presented
            }
            Backend::Cpu { driver, presenter } => {
                match driver.tick(snapshot, presenter, scheduler) {
                    Ok(()) => true,
                    Err(e) => {
                        log::error!("[frame] {}", e);
                        false
                    }
                }
            }
        };

        if presented {
            self.stats.record();
        }
    }
}

/// Logs the average frame time once per `STATS_INTERVAL_FRAMES` frames.
pub struct FrameStats {
    window_start: Instant,
    frames: u64,
}

impl Default for FrameStats {
    fn default() -> Self {
        Self {
            window_start: Instant::now(),
            frames: 0,
        }
    }
}

impl FrameStats {
    pub fn record(&mut self) {
        self.frames += 1;
        if self.frames % STATS_INTERVAL_FRAMES != 0 {
            return;
        }
        let now = Instant::now();
        let window = now - self.window_start;
        self.window_start = now;
        log::info!(
            "[frame] {} frames, avg {:.2} ms",
            self.frames,
            window.as_secs_f64() * 1000.0 / STATS_INTERVAL_FRAMES as f64
        );
    }
}

type TickClosure = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Requests the next loop iteration through `requestAnimationFrame`.
pub struct RafScheduler {
    tick: TickClosure,
}

impl Scheduler for RafScheduler {
    fn schedule_next(&mut self) {
        let tick = self.tick.borrow();
        if let (Some(w), Some(cb)) = (web::window(), tick.as_ref()) {
            _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: TickClosure = Rc::new(RefCell::new(None));
    let mut scheduler = RafScheduler { tick: tick.clone() };
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame(&mut scheduler);
    }) as Box<dyn FnMut()>));
    RafScheduler { tick }.schedule_next();
}
