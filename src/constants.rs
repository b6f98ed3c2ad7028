/// Front-end constants: DOM wiring, canvas sizing and diagnostics.
///
/// Simulation and lighting defaults live in `ripple_core::constants`.
// Canvas element the surface renders into
pub const CANVAS_ID: &str = "app-canvas";

// Backing store is CSS size * min(devicePixelRatio, cap)
pub const MAX_DEVICE_PIXEL_RATIO: f64 = 2.0;

// Average frame time is logged once per this many presented frames
pub const STATS_INTERVAL_FRAMES: u64 = 600;

// Background texels are RGBA8
pub const BACKGROUND_TEXEL_BYTES: u32 = 4;
