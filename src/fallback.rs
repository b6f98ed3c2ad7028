use ripple_core::{ColorGrid, Presenter, RippleError};
use wasm_bindgen::{Clamped, JsCast};
use web_sys as web;

/// Presents CPU-composited frames through a 2D canvas context. Used when
/// WebGPU is unavailable.
pub struct CanvasPresenter {
    ctx: web::CanvasRenderingContext2d,
    bytes: Vec<u8>,
}

impl CanvasPresenter {
    pub fn new(canvas: &web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!("{:?}", e))?
            .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        Ok(Self {
            ctx,
            bytes: Vec::new(),
        })
    }
}

impl Presenter for CanvasPresenter {
    fn present(&mut self, frame: &ColorGrid) -> ripple_core::Result<()> {
        frame.write_rgba8(&mut self.bytes);
        let image = web::ImageData::new_with_u8_clamped_array_and_sh(
            Clamped(self.bytes.as_slice()),
            frame.width(),
            frame.height(),
        )
        .map_err(|e| RippleError::Present(format!("{:?}", e)))?;
        self.ctx
            .put_image_data(&image, 0.0, 0.0)
            .map_err(|e| RippleError::Present(format!("{:?}", e)))
    }
}
