//! Abstract 2D drawing surface.
//!
//! Every pixel the renderer produces goes through [`DrawSurface`], keeping
//! the shape strategies and element drawing portable across an in-memory
//! raster buffer, an HTML canvas bridge, or a native backend. Coordinates
//! are device-space pixels.

mod raster;

pub use raster::RasterSurface;

use image::{Rgba, RgbaImage};

use crate::geometry::Rect;

/// How a run of text is painted.
#[derive(Debug, Clone, Copy)]
pub struct TextStyle {
    /// Glyph size in device pixels.
    pub px: f32,
    pub fill: Rgba<u8>,
    /// Optional one-pixel outline ring drawn behind the fill.
    pub outline: Option<Rgba<u8>>,
}

/// A 2D surface the mockup renderer draws into.
///
/// Implementations blend with source-over alpha and silently clip drawing
/// that falls outside the surface; no drawing call can fail.
pub trait DrawSurface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Replaces every pixel with `color`.
    fn clear(&mut self, color: Rgba<u8>);

    fn fill_rect(&mut self, rect: Rect, color: Rgba<u8>);

    /// Strokes a rectangle with a border of `width` pixels drawn inside it.
    fn stroke_rect(&mut self, rect: Rect, width: f32, color: Rgba<u8>);

    fn fill_round_rect(&mut self, rect: Rect, radius: f32, color: Rgba<u8>);

    fn stroke_round_rect(&mut self, rect: Rect, radius: f32, width: f32, color: Rgba<u8>);

    /// Strokes a rectangle with an on/off dash pattern of `dash` pixels.
    fn dashed_rect(&mut self, rect: Rect, width: f32, dash: f32, color: Rgba<u8>);

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgba<u8>);

    /// Advance width of `text` at `px`, in device pixels.
    fn text_width(&self, text: &str, px: f32) -> f32;

    /// Draws a single line of text centered on `(cx, cy)`.
    fn draw_text(&mut self, text: &str, cx: f32, cy: f32, style: &TextStyle);

    /// Blits `bitmap` scaled to fill `rect`, clipped to a rounded rectangle.
    fn blit_round_rect(&mut self, bitmap: &RgbaImage, rect: Rect, radius: f32);
}
