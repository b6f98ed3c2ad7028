// Pure canvas geometry: backing-store sizing and pointer mapping.
// Kept free of web-sys so the host tests can include it directly.

use crate::constants::MAX_DEVICE_PIXEL_RATIO;

/// Canvas placement in CSS pixels together with its backing-store size.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CanvasRect {
    pub left: f32,
    pub top: f32,
    pub css_width: f32,
    pub css_height: f32,
    pub width: u32,
    pub height: u32,
}

/// Device pixel ratio used for the backing store; bogus values fall back to 1.
#[inline]
pub fn effective_dpr(raw: f64) -> f64 {
    if raw.is_finite() && raw > 0.0 {
        raw.min(MAX_DEVICE_PIXEL_RATIO)
    } else {
        1.0
    }
}

/// Backing-store size for a CSS box, never smaller than 1x1.
#[inline]
pub fn backing_size(css_width: f64, css_height: f64, dpr: f64) -> (u32, u32) {
    let dpr = effective_dpr(dpr);
    let w = (css_width.max(0.0) * dpr) as u32;
    let h = (css_height.max(0.0) * dpr) as u32;
    (w.max(1), h.max(1))
}

/// Maps a client-space pointer position to device pixels on the canvas
/// (origin top-left). `None` when the pointer is outside the canvas.
#[inline]
pub fn client_to_device_px(rect: &CanvasRect, client_x: f32, client_y: f32) -> Option<[f32; 2]> {
    if rect.css_width <= 0.0 || rect.css_height <= 0.0 {
        return None;
    }
    let x_css = client_x - rect.left;
    let y_css = client_y - rect.top;
    if !(0.0..=rect.css_width).contains(&x_css) || !(0.0..=rect.css_height).contains(&y_css) {
        return None;
    }
    let sx = (x_css / rect.css_width) * rect.width as f32;
    let sy = (y_css / rect.css_height) * rect.height as f32;
    Some([sx, sy])
}
