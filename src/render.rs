use ripple_core::{
    CompositeUniforms, FrameCounter, GridSize, PointerState, RippleConfig, SimUniforms,
};
use web_sys as web;

use crate::constants::BACKGROUND_TEXEL_BYTES;

mod composite;
mod helpers;
mod simulation;
mod targets;

use composite::{create_composite_resources, CompositeResources};
use simulation::{create_simulation_resources, SimulationResources};
use targets::SimTargets;

const BACKGROUND_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

/// GPU renderer: a simulation pass into the ping-pong state textures followed
/// by a composite pass onto the canvas surface.
pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    targets: SimTargets,
    background_view: wgpu::TextureView,
    linear_sampler: wgpu::Sampler,

    simulation: SimulationResources,
    composite: CompositeResources,

    frames: FrameCounter,
    params: RippleConfig,
}

impl GpuState {
    pub async fn new(
        canvas: &web::HtmlCanvasElement,
        params: RippleConfig,
        background_rgba: &[u8],
    ) -> anyhow::Result<Self> {
        let size = GridSize::new(canvas.width(), canvas.height());

        let instance = wgpu::Instance::default();
        // Adapter first: a failed request leaves the canvas free for a 2D context.
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;

        let caps = surface.get_capabilities(&adapter);
        // Background bytes are display-encoded already; a non-sRGB target
        // passes composited values through unchanged.
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Rgba8Unorm
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!("[gpu] surface {} format {:?}", size, format);

        let targets = SimTargets::new(&device, size);
        let (background_tex, background_view) = create_background(&device, size);
        helpers::write_full_texture(
            &queue,
            &background_tex,
            size,
            BACKGROUND_TEXEL_BYTES,
            background_rgba,
        );
        let linear_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("linear_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let simulation = create_simulation_resources(&device, &targets);
        let composite = create_composite_resources(
            &device,
            format,
            &targets,
            &background_view,
            &linear_sampler,
        );
        composite.write_uniforms(&queue, &CompositeUniforms::new(size, &params.composite));

        Ok(Self {
            surface,
            device,
            queue,
            config,
            targets,
            background_view,
            linear_sampler,
            simulation,
            composite,
            frames: FrameCounter::default(),
            params,
        })
    }

    pub fn size(&self) -> GridSize {
        self.targets.size()
    }

    /// Reallocates every size-dependent resource and restarts the simulation
    /// at frame 0 with the new background.
    pub fn resize(&mut self, size: GridSize, background_rgba: &[u8]) {
        log::debug!("[resize] {} -> {}", self.size(), size);
        self.config.width = size.width;
        self.config.height = size.height;
        self.surface.configure(&self.device, &self.config);

        self.targets.recreate(&self.device, size);
        let (background_tex, background_view) = create_background(&self.device, size);
        helpers::write_full_texture(
            &self.queue,
            &background_tex,
            size,
            BACKGROUND_TEXEL_BYTES,
            background_rgba,
        );
        self.background_view = background_view;

        self.simulation.rebuild_bind_groups(&self.device, &self.targets);
        self.composite.rebuild_bind_groups(
            &self.device,
            &self.targets,
            &self.background_view,
            &self.linear_sampler,
        );
        self.composite.write_uniforms(
            &self.queue,
            &CompositeUniforms::new(size, &self.params.composite),
        );
        self.frames.reset();
    }

    /// Re-applies the current surface configuration after the surface was
    /// lost or became outdated.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Steps the simulation once and presents the composited frame. Nothing is
    /// advanced when the surface texture cannot be acquired.
    pub fn render(&mut self, pointer: PointerState) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let index = self.frames.next_frame();
        self.simulation.write_uniforms(
            &self.queue,
            &SimUniforms::new(self.size(), pointer, index, &self.params.sim),
        );

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });

        // Pass 1: current state -> next state
        helpers::blit(
            &mut encoder,
            "simulation_pass",
            self.targets.view(self.targets.next()),
            &self.simulation.pipeline,
            self.simulation.bind_group(self.targets.current()),
        );
        self.targets.swap();

        // Pass 2: new state + background -> swapchain
        helpers::blit(
            &mut encoder,
            "composite_pass",
            &view,
            &self.composite.pipeline,
            self.composite.bind_group(self.targets.current()),
        );

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn create_background(device: &wgpu::Device, size: GridSize) -> (wgpu::Texture, wgpu::TextureView) {
    helpers::create_texture(
        device,
        "background_tex",
        size,
        BACKGROUND_FORMAT,
        wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
    )
}
