use ripple_core::GridSize;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::constants::CANVAS_ID;
use crate::input::{self, CanvasRect};

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn find_canvas(document: &web::Document) -> anyhow::Result<web::HtmlCanvasElement> {
    let canvas_el = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?;
    canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))
}

#[inline]
pub fn device_pixel_ratio() -> f64 {
    web::window()
        .map(|w| input::effective_dpr(w.device_pixel_ratio()))
        .unwrap_or(1.0)
}

pub fn canvas_rect(canvas: &web::HtmlCanvasElement) -> CanvasRect {
    let rect = canvas.get_bounding_client_rect();
    CanvasRect {
        left: rect.left() as f32,
        top: rect.top() as f32,
        css_width: rect.width() as f32,
        css_height: rect.height() as f32,
        width: canvas.width(),
        height: canvas.height(),
    }
}

/// Matches the canvas backing store to its CSS size times the capped device
/// pixel ratio and returns the resulting grid size.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) -> GridSize {
    let rect = canvas.get_bounding_client_rect();
    let (w_px, h_px) = input::backing_size(rect.width(), rect.height(), device_pixel_ratio());
    if canvas.width() != w_px || canvas.height() != h_px {
        canvas.set_width(w_px);
        canvas.set_height(h_px);
    }
    GridSize::new(w_px, h_px)
}
