use ripple_core::{CompositeUniforms, COMPOSITE_WGSL};

use super::helpers;
use super::targets::SimTargets;

pub(crate) struct CompositeResources {
    pub(crate) pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bgl: wgpu::BindGroupLayout,
    /// `bind_groups[i]` refracts through state texture `i`.
    bind_groups: [wgpu::BindGroup; 2],
}

impl CompositeResources {
    pub(crate) fn bind_group(&self, state_index: usize) -> &wgpu::BindGroup {
        &self.bind_groups[state_index]
    }

    pub(crate) fn rebuild_bind_groups(
        &mut self,
        device: &wgpu::Device,
        targets: &SimTargets,
        background_view: &wgpu::TextureView,
        sampler: &wgpu::Sampler,
    ) {
        self.bind_groups = make_bind_groups(
            device,
            &self.bgl,
            &self.uniform_buffer,
            targets,
            background_view,
            sampler,
        );
    }

    pub(crate) fn write_uniforms(&self, queue: &wgpu::Queue, uniforms: &CompositeUniforms) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniforms));
    }
}

pub(crate) fn create_composite_resources(
    device: &wgpu::Device,
    surface_format: wgpu::TextureFormat,
    targets: &SimTargets,
    background_view: &wgpu::TextureView,
    sampler: &wgpu::Sampler,
) -> CompositeResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("composite_shader"),
        source: wgpu::ShaderSource::Wgsl(COMPOSITE_WGSL.into()),
    });
    let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("composite_bgl"),
        entries: &[
            helpers::texture_layout_entry(0, false),
            helpers::texture_layout_entry(1, true),
            wgpu::BindGroupLayoutEntry {
                binding: 2,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
            helpers::uniform_layout_entry(3),
        ],
    });
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("composite_pl"),
        bind_group_layouts: &[&bgl],
        push_constant_ranges: &[],
    });
    let pipeline = helpers::make_fullscreen_pipeline(
        device,
        "composite_pipeline",
        &pl,
        &shader,
        "fs_composite",
        surface_format,
    );
    let uniform_buffer = helpers::uniform_buffer(
        device,
        "composite_uniforms",
        std::mem::size_of::<CompositeUniforms>(),
    );
    let bind_groups = make_bind_groups(
        device,
        &bgl,
        &uniform_buffer,
        targets,
        background_view,
        sampler,
    );

    CompositeResources {
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
    background_view: &wgpu::TextureView,
    sampler: &wgpu::Sampler,
) -> [wgpu::BindGroup; 2] {
    [0, 1].map(|i| {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(if i == 0 { "composite_bg_a" } else { "composite_bg_b" }),
            layout: bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(targets.view(i)),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(background_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: uniform_buffer.as_entire_binding(),
                },
            ],
        })
    })
}
