use glam::Vec4;

use crate::constants::*;
use crate::error::{Result, RippleError};
use crate::grid::{ColorGrid, GridSize};

/// Produces the static background at a given resolution. Called once at
/// start-up and again after every resize.
pub trait BackgroundSource {
    fn render(&mut self, size: GridSize) -> ColorGrid;
}

/// Uniform fill, no caption.
#[derive(Clone, Copy, Debug)]
pub struct SolidBackground {
    pub fill: Vec4,
}

impl SolidBackground {
    pub fn new(fill: Vec4) -> Self {
        Self { fill }
    }
}

impl BackgroundSource for SolidBackground {
    fn render(&mut self, size: GridSize) -> ColorGrid {
        ColorGrid::filled(size, self.fill)
    }
}

/// How the caption is drawn onto the background fill.
#[derive(Clone, Debug, PartialEq)]
pub struct CaptionStyle {
    pub label: String,
    pub fill: String,
    pub ink: String,
    /// Font size in CSS pixels before device-pixel scaling.
    pub font_px: f32,
    pub font_family: String,
}

impl Default for CaptionStyle {
    fn default() -> Self {
        Self {
            label: CAPTION_LABEL.to_string(),
            fill: CAPTION_FILL.to_string(),
            ink: CAPTION_INK.to_string(),
            font_px: CAPTION_FONT_PX,
            font_family: CAPTION_FONT_FAMILY.to_string(),
        }
    }
}

impl CaptionStyle {
    /// CSS font shorthand at the given device pixel ratio.
    pub fn font(&self, device_pixel_ratio: f64) -> String {
        let px = (self.font_px as f64 * device_pixel_ratio).round();
        format!("bold {px}px {}", self.font_family)
    }

    /// Parsed `(fill, ink)` colours.
    pub fn colors(&self) -> Result<(Vec4, Vec4)> {
        Ok((parse_hex_color(&self.fill)?, parse_hex_color(&self.ink)?))
    }
}

/// Parses `#rrggbb` into an opaque linear colour.
pub fn parse_hex_color(s: &str) -> Result<Vec4> {
    let invalid = || RippleError::InvalidColor(s.to_string());
    let hex = s.strip_prefix('#').ok_or_else(invalid)?;
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(invalid());
    }
    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16)
            .map(|v| v as f32 / 255.0)
            .map_err(|_| invalid())
    };
    Ok(Vec4::new(channel(0)?, channel(2)?, channel(4)?, 1.0))
}
