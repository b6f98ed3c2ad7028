// Default tuning for the wave simulation and the lighting pass.

// Simulation
pub const WAVE_DELTA: f32 = 1.4; // wave speed factor
pub const PRESSURE_DAMPING: f32 = 0.998; // energy dissipation per step
pub const VELOCITY_DAMPING: f32 = 0.995;
pub const MAX_AMPLITUDE: f32 = 1.0e4; // clamp for pressure and velocity

// Pointer excitation
pub const POINTER_RADIUS: f32 = 0.02; // normalized grid units
pub const POINTER_PRESSURE_IMPULSE: f32 = 3.0;
pub const POINTER_VELOCITY_RATIO: f32 = 0.5; // velocity impulse relative to pressure impulse

// Compositing
pub const REFRACTION_STRENGTH: f32 = 0.03;
pub const NORMAL_STEEPNESS: f32 = 8.0;
pub const LIGHT_DIR: [f32; 3] = [-1.0, 2.0, -1.0]; // normalized at use
pub const VIEW_DIR: [f32; 3] = [0.0, 0.0, -1.0];
pub const DIFFUSE_SCALE: f32 = 0.8;
pub const AMBIENT: f32 = 0.4;
pub const SPECULAR_POWER: f32 = 128.0;
pub const SPECULAR_SCALE: f32 = 1.2;
pub const TINT_COLOR: [f32; 3] = [0.0, 0.3, 0.6];
pub const TINT_MIX: f32 = 0.15;

// Caption background
pub const CAPTION_LABEL: &str = "softhorizon";
pub const CAPTION_FILL: &str = "#fb7427";
pub const CAPTION_INK: &str = "#fef4b8";
pub const CAPTION_FONT_PX: f32 = 250.0; // CSS pixels, scaled by device pixel ratio
pub const CAPTION_FONT_FAMILY: &str = "\"Test Söhne\", sans-serif";
