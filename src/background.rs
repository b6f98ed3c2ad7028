use glam::Vec4;
use ripple_core::{BackgroundSource, CaptionStyle, ColorGrid, GridSize};
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::dom;

/// Draws the caption into an offscreen 2D canvas at the surface resolution.
pub struct CaptionBackground {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    style: CaptionStyle,
}

impl CaptionBackground {
    pub fn new(document: &web::Document, style: CaptionStyle) -> anyhow::Result<Self> {
        let canvas = document
            .create_element("canvas")
            .map_err(|e| anyhow::anyhow!("{:?}", e))?
            .dyn_into::<web::HtmlCanvasElement>()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!("{:?}", e))?
            .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        Ok(Self { canvas, ctx, style })
    }

    /// Tightly packed RGBA8, rows top-down.
    pub fn rasterize(&self, size: GridSize) -> anyhow::Result<Vec<u8>> {
        self.canvas.set_width(size.width);
        self.canvas.set_height(size.height);
        let (w, h) = (size.width as f64, size.height as f64);

        self.ctx.set_fill_style_str(&self.style.fill);
        self.ctx.fill_rect(0.0, 0.0, w, h);
        self.ctx.set_font(&self.style.font(dom::device_pixel_ratio()));
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");
        self.ctx.set_fill_style_str(&self.style.ink);
        self.ctx
            .fill_text(&self.style.label, w * 0.5, h * 0.5)
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;

        let image = self
            .ctx
            .get_image_data(0.0, 0.0, w, h)
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        Ok(image.data().0)
    }

    /// Caption pixels, or the plain fill when the canvas cannot produce them.
    pub fn rasterize_or_fill(&self, size: GridSize) -> Vec<u8> {
        match self.rasterize(size) {
            Ok(bytes) if bytes.len() == size.cell_count() * 4 => bytes,
            Ok(bytes) => {
                log::warn!(
                    "[resize] caption raster has {} bytes, expected {}",
                    bytes.len(),
                    size.cell_count() * 4
                );
                self.fill_bytes(size)
            }
            Err(e) => {
                log::warn!("[resize] caption raster failed: {:?}", e);
                self.fill_bytes(size)
            }
        }
    }

    fn fill_bytes(&self, size: GridSize) -> Vec<u8> {
        let fill = self.style.colors().map(|(fill, _)| fill).unwrap_or(Vec4::ONE);
        let mut bytes = Vec::new();
        ColorGrid::filled(size, fill).write_rgba8(&mut bytes);
        bytes
    }
}

impl BackgroundSource for CaptionBackground {
    fn render(&mut self, size: GridSize) -> ColorGrid {
        let bytes = self.rasterize_or_fill(size);
        ColorGrid::from_rgba8(size, &bytes).unwrap_or_else(|| ColorGrid::filled(size, Vec4::W))
    }
}
