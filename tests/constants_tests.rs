// Host-side tests for constants and their relationships with the core defaults.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;
use ripple_core::{RippleConfig, SimParams};

#[test]
#[allow(clippy::assertions_on_constants)]
fn constants_are_within_reasonable_bounds() {
    assert!(!CANVAS_ID.is_empty());
    assert!(MAX_DEVICE_PIXEL_RATIO >= 1.0);
    assert!(STATS_INTERVAL_FRAMES > 0);
    assert_eq!(BACKGROUND_TEXEL_BYTES, 4);
}

#[test]
fn default_configuration_validates() {
    let config = RippleConfig::default();
    config.validate().unwrap();
    assert_eq!(config.caption.label, ripple_core::CAPTION_LABEL);
}

#[test]
fn damping_factors_shrink_state() {
    let sim = SimParams::default();
    assert!(sim.damping > 0.0 && sim.damping < 1.0);
    assert!(sim.velocity_damping > 0.0 && sim.velocity_damping < 1.0);
    assert!(sim.pointer_radius > 0.0 && sim.pointer_radius < 0.5);
}
