//! Platform-free core of the ripple surface: wave simulation, compositing,
//! double-buffered grids and frame sequencing.
//!
//! The CPU functions here are the reference for the bundled WGSL shaders.

pub mod background;
pub mod composite;
pub mod constants;
pub mod driver;
pub mod error;
pub mod grid;
pub mod params;
pub mod pointer;
pub mod sim;
pub mod uniforms;

pub static SIMULATION_WGSL: &str = include_str!("../shaders/simulation.wgsl");
pub static COMPOSITE_WGSL: &str = include_str!("../shaders/composite.wgsl");

pub use background::*;
pub use composite::{composite, composite_into, lighting, sample_bilinear, surface_normal};
pub use constants::*;
pub use driver::*;
pub use error::{Result, RippleError};
pub use grid::*;
pub use params::*;
pub use pointer::*;
pub use sim::{pointer_impulse, step, step_into};
pub use uniforms::{CompositeUniforms, SimUniforms};
