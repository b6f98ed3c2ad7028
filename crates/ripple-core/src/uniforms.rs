//! Uniform blocks for the bundled shaders. Field order and padding match the
//! WGSL structs in `shaders/`.

use crate::grid::GridSize;
use crate::params::{CompositeParams, SimParams};
use crate::pointer::PointerState;

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SimUniforms {
    pub resolution: [f32; 2],
    pub pointer: [f32; 2],
    pub pointer_active: f32,
    pub frame: u32,
    pub delta: f32,
    pub damping: f32,
    pub velocity_damping: f32,
    pub pointer_radius: f32,
    pub pointer_pressure_impulse: f32,
    pub pointer_velocity_ratio: f32,
    pub max_amplitude: f32,
    pub _pad: [f32; 3],
}

impl SimUniforms {
    pub fn new(size: GridSize, pointer: PointerState, frame: u64, params: &SimParams) -> Self {
        let (pointer, pointer_active) = match pointer {
            PointerState::Active { x, y } => ([x, y], 1.0),
            PointerState::Inactive => ([0.0, 0.0], 0.0),
        };
        Self {
            resolution: [size.width as f32, size.height as f32],
            pointer,
            pointer_active,
            // Only the comparison with 0 matters on the GPU.
            frame: frame.min(u32::MAX as u64) as u32,
            delta: params.delta,
            damping: params.damping,
            velocity_damping: params.velocity_damping,
            pointer_radius: params.pointer_radius,
            pointer_pressure_impulse: params.pointer_pressure_impulse,
            pointer_velocity_ratio: params.pointer_velocity_ratio,
            max_amplitude: params.max_amplitude,
            _pad: [0.0; 3],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CompositeUniforms {
    pub resolution: [f32; 2],
    pub refraction: f32,
    pub normal_steepness: f32,
    pub light_dir: [f32; 4],
    pub view_dir: [f32; 4],
    pub tint: [f32; 4],
    pub diffuse_scale: f32,
    pub ambient: f32,
    pub specular_power: f32,
    pub specular_scale: f32,
}

impl CompositeUniforms {
    pub fn new(size: GridSize, params: &CompositeParams) -> Self {
        Self {
            resolution: [size.width as f32, size.height as f32],
            refraction: params.refraction,
            normal_steepness: params.normal_steepness,
            light_dir: params.light_dir.extend(0.0).to_array(),
            view_dir: params.view_dir.extend(0.0).to_array(),
            tint: params.tint.extend(params.tint_mix).to_array(),
            diffuse_scale: params.diffuse_scale,
            ambient: params.ambient,
            specular_power: params.specular_power,
            specular_scale: params.specular_scale,
        }
    }
}
