use ripple_core::GridSize;

use super::helpers;

pub const STATE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba32Float;

/// Ping-pong simulation state textures. Each frame reads `current` and
/// renders into the other one; fresh textures start zeroed.
pub struct SimTargets {
    textures: [wgpu::Texture; 2],
    views: [wgpu::TextureView; 2],
    current: usize,
}

impl SimTargets {
    pub fn new(device: &wgpu::Device, size: GridSize) -> Self {
        let usage = wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING;
        let (tex_a, view_a) = helpers::create_texture(device, "sim_state_a", size, STATE_FORMAT, usage);
        let (tex_b, view_b) = helpers::create_texture(device, "sim_state_b", size, STATE_FORMAT, usage);
        Self {
            textures: [tex_a, tex_b],
            views: [view_a, view_b],
            current: 0,
        }
    }

    pub fn recreate(&mut self, device: &wgpu::Device, size: GridSize) {
        *self = Self::new(device, size);
    }

    pub fn view(&self, index: usize) -> &wgpu::TextureView {
        &self.views[index]
    }

    #[inline]
    pub fn current(&self) -> usize {
        self.current
    }

    #[inline]
    pub fn next(&self) -> usize {
        1 - self.current
    }

    pub fn swap(&mut self) {
        self.current = self.next();
    }

    pub fn size(&self) -> GridSize {
        let t = &self.textures[0];
        GridSize::new(t.width(), t.height())
    }
}
