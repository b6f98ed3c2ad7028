// Frame sequencing, buffer lifecycle and resize handling of the CPU driver.

use glam::Vec4;
use ripple_core::{
    BackgroundSource, ColorGrid, FrameDriver, FrameInputs, FramePhase, GridSize, Presenter,
    RippleConfig, RippleError, Scheduler, SolidBackground,
};

#[derive(Default)]
struct RecordingPresenter {
    frames: usize,
    last_size: Option<GridSize>,
}

impl Presenter for RecordingPresenter {
    fn present(&mut self, frame: &ColorGrid) -> ripple_core::Result<()> {
        self.frames += 1;
        self.last_size = Some(frame.size());
        Ok(())
    }
}

struct FailingPresenter;

impl Presenter for FailingPresenter {
    fn present(&mut self, _frame: &ColorGrid) -> ripple_core::Result<()> {
        Err(RippleError::Present("context lost".into()))
    }
}

#[derive(Default)]
struct CountingScheduler {
    requests: usize,
}

impl Scheduler for CountingScheduler {
    fn schedule_next(&mut self) {
        self.requests += 1;
    }
}

/// Records every size it was asked to render.
#[derive(Default)]
struct TrackingSource {
    sizes: Vec<GridSize>,
}

impl BackgroundSource for TrackingSource {
    fn render(&mut self, size: GridSize) -> ColorGrid {
        self.sizes.push(size);
        ColorGrid::filled(size, Vec4::new(0.5, 0.5, 0.5, 1.0))
    }
}

fn solid_driver(width: u32, height: u32) -> FrameDriver<SolidBackground> {
    FrameDriver::new(
        GridSize::new(width, height),
        SolidBackground::new(Vec4::ONE),
        RippleConfig::default(),
    )
}

#[test]
fn each_tick_presents_once_and_schedules_once() {
    let mut driver = solid_driver(8, 8);
    let mut inputs = FrameInputs::default();
    let mut presenter = RecordingPresenter::default();
    let mut scheduler = CountingScheduler::default();
    assert_eq!(driver.phase(), FramePhase::Idle);

    for _ in 0..3 {
        driver
            .tick(inputs.snapshot(), &mut presenter, &mut scheduler)
            .unwrap();
        assert_eq!(driver.phase(), FramePhase::Presented);
    }
    assert_eq!(presenter.frames, 3);
    assert_eq!(scheduler.requests, 3);
    assert_eq!(presenter.last_size, Some(GridSize::new(8, 8)));
    assert_eq!(driver.frames().total(), 3);
    assert_eq!(driver.frames().since_reset(), 3);
}

#[test]
fn first_frame_ignores_pointer_then_pointer_excites() {
    let mut driver = solid_driver(32, 32);
    let mut inputs = FrameInputs::default();
    inputs.on_pointer_move(15.5, 15.5);

    driver.advance(inputs.snapshot()).unwrap();
    assert!(driver.current().is_all_zero());

    driver.advance(inputs.snapshot()).unwrap();
    assert!(driver.current().get(15, 15).pressure > 0.0);
    // Far corners are still untouched one frame after the first impulse.
    assert_eq!(driver.current().get(0, 0).pressure, 0.0);
}

#[test]
fn resize_round_trip_resets_to_zero() {
    let mut driver = solid_driver(8, 8);
    let mut inputs = FrameInputs::default();
    inputs.on_pointer_move(3.5, 3.5);
    for _ in 0..4 {
        driver.advance(inputs.snapshot()).unwrap();
    }
    assert!(!driver.current().is_all_zero());

    inputs.on_resize(12, 5);
    driver.advance(inputs.snapshot()).unwrap();
    assert_eq!(driver.size(), GridSize::new(12, 5));
    assert_eq!(driver.background().size(), GridSize::new(12, 5));
    assert_eq!(driver.output().size(), GridSize::new(12, 5));
    // The frame after a resize is simulated as frame 0.
    assert!(driver.current().is_all_zero());
    assert_eq!(driver.frames().since_reset(), 1);

    driver.advance(inputs.snapshot()).unwrap();
    inputs.on_resize(8, 8);
    driver.resize(inputs.snapshot().resize.unwrap());
    assert_eq!(driver.size(), GridSize::new(8, 8));
    assert!(driver.current().is_all_zero());
    assert_eq!(driver.frames().since_reset(), 0);
    assert_eq!(driver.phase(), FramePhase::Idle);

    driver.advance(inputs.snapshot()).unwrap();
    assert!(driver.current().is_all_zero());
    assert_eq!(driver.frames().total(), 7);
}

#[test]
fn background_is_regenerated_on_resize() {
    let mut driver = FrameDriver::new(
        GridSize::new(4, 4),
        TrackingSource::default(),
        RippleConfig::default(),
    );
    let mut inputs = FrameInputs::default();
    driver.advance(inputs.snapshot()).unwrap();
    inputs.on_resize(6, 3);
    inputs.on_resize(7, 2);
    driver.advance(inputs.snapshot()).unwrap();
    driver.advance(inputs.snapshot()).unwrap();
    assert_eq!(driver.background().size(), GridSize::new(7, 2));
    assert_eq!(driver.background().get(0, 0).x, 0.5);
}

#[test]
fn failed_present_still_schedules_next_tick() {
    let mut driver = solid_driver(4, 4);
    let mut inputs = FrameInputs::default();
    let mut scheduler = CountingScheduler::default();
    let err = driver
        .tick(inputs.snapshot(), &mut FailingPresenter, &mut scheduler)
        .unwrap_err();
    assert!(matches!(err, RippleError::Present(_)));
    assert_eq!(scheduler.requests, 1);
    assert_eq!(driver.phase(), FramePhase::Compositing);
}

#[test]
fn four_by_four_end_to_end_stays_at_rest() {
    let mut driver = solid_driver(4, 4);
    let mut inputs = FrameInputs::default();
    let mut presenter = RecordingPresenter::default();
    let mut scheduler = CountingScheduler::default();

    driver
        .tick(inputs.snapshot(), &mut presenter, &mut scheduler)
        .unwrap();
    assert!(driver.current().is_all_zero());
    let rest = driver.output().clone();

    driver
        .tick(inputs.snapshot(), &mut presenter, &mut scheduler)
        .unwrap();
    assert!(driver.current().is_all_zero());
    assert_eq!(driver.output(), &rest);
}
