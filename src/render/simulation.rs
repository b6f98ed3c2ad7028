use ripple_core::{SimUniforms, SIMULATION_WGSL};

use super::helpers;
use super::targets::{SimTargets, STATE_FORMAT};

pub(crate) struct SimulationResources {
    pub(crate) pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bgl: wgpu::BindGroupLayout,
    /// `bind_groups[i]` reads state texture `i`.
    bind_groups: [wgpu::BindGroup; 2],
}

impl SimulationResources {
    pub(crate) fn bind_group(&self, read_index: usize) -> &wgpu::BindGroup {
        &self.bind_groups[read_index]
    }

    pub(crate) fn rebuild_bind_groups(&mut self, device: &wgpu::Device, targets: &SimTargets) {
        self.bind_groups = make_bind_groups(device, &self.bgl, &self.uniform_buffer, targets);
    }

    pub(crate) fn write_uniforms(&self, queue: &wgpu::Queue, uniforms: &SimUniforms) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniforms));
    }
}

pub(crate) fn create_simulation_resources(
    device: &wgpu::Device,
    targets: &SimTargets,
) -> SimulationResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("simulation_shader"),
        source: wgpu::ShaderSource::Wgsl(SIMULATION_WGSL.into()),
    });
    let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("simulation_bgl"),
        entries: &[
            // Read with textureLoad; 32-bit float is not filterable.
            helpers::texture_layout_entry(0, false),
            helpers::uniform_layout_entry(1),
        ],
    });
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("simulation_pl"),
        bind_group_layouts: &[&bgl],
        push_constant_ranges: &[],
    });
    let pipeline = helpers::make_fullscreen_pipeline(
        device,
        "simulation_pipeline",
        &pl,
        &shader,
        "fs_simulate",
        STATE_FORMAT,
    );
    let uniform_buffer = helpers::uniform_buffer(
        device,
        "simulation_uniforms",
        std::mem::size_of::<SimUniforms>(),
    );
    let bind_groups = make_bind_groups(device, &bgl, &uniform_buffer, targets);

    SimulationResources {
        pipeline,
        uniform_buffer,
        bgl,
        bind_groups,
    }
}

fn make_bind_groups(
    device: &wgpu::Device,
    bgl: &wgpu::BindGroupLayout,
    uniform_buffer: &wgpu::Buffer,
    targets: &SimTargets,
) -> [wgpu::BindGroup; 2] {
    [0, 1].map(|i| {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(if i == 0 { "simulation_bg_a" } else { "simulation_bg_b" }),
            layout: bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(targets.view(i)),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: uniform_buffer.as_entire_binding(),
                },
            ],
        })
    })
}
