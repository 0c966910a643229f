//! In-memory raster implementation of [`DrawSurface`].

use fontdue::{Font, FontSettings};
use image::{Rgba, RgbaImage};

use super::{DrawSurface, TextStyle};
use crate::geometry::Rect;

// Advance-per-character heuristic used when no font is configured, so layout
// math stays deterministic without a glyph source.
const FALLBACK_ADVANCE: f32 = 0.6;

/// A CPU raster surface backed by an RGBA pixel buffer.
///
/// Text drawing uses an optional [`fontdue::Font`]; with no font configured,
/// glyph drawing is skipped and [`DrawSurface::text_width`] falls back to a
/// fixed per-character advance.
pub struct RasterSurface {
    pixels: RgbaImage,
    font: Option<Font>,
}

impl RasterSurface {
    /// Creates a transparent surface of the given pixel size.
    ///
    /// Zero dimensions are bumped to one pixel so the surface always exists.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::new(width.max(1), height.max(1)),
            font: None,
        }
    }

    /// Loads a TTF/OTF font for text drawing.
    pub fn set_font_bytes(&mut self, bytes: &[u8]) -> Result<(), &'static str> {
        let font = Font::from_bytes(bytes, FontSettings::default())?;
        self.font = Some(font);
        Ok(())
    }

    pub fn set_font(&mut self, font: Font) {
        self.font = Some(font);
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn into_image(self) -> RgbaImage {
        self.pixels
    }

    // ---- pixel helpers ----

    fn blend_pixel(&mut self, x: i32, y: i32, color: Rgba<u8>) {
        blend_px(&mut self.pixels, x, y, color);
    }

    /// Fills every pixel whose center satisfies `inside`, within `rect`.
    fn fill_region<F: Fn(f32, f32) -> bool>(&mut self, rect: Rect, color: Rgba<u8>, inside: F) {
        let x0 = rect.x.floor().max(0.0) as i32;
        let y0 = rect.y.floor().max(0.0) as i32;
        let x1 = (rect.right().ceil() as i32).min(self.pixels.width() as i32);
        let y1 = (rect.bottom().ceil() as i32).min(self.pixels.height() as i32);
        for y in y0..y1 {
            for x in x0..x1 {
                let (cx, cy) = (x as f32 + 0.5, y as f32 + 0.5);
                if inside(cx, cy) {
                    self.blend_pixel(x, y, color);
                }
            }
        }
    }

    fn draw_glyph_run(&mut self, text: &str, origin_x: f32, baseline_y: f32, px: f32, color: Rgba<u8>) {
        let Some(font) = &self.font else {
            return;
        };
        let mut pen_x = origin_x;
        for ch in text.chars() {
            let (metrics, coverage) = font.rasterize(ch, px);
            let gx = pen_x.round() as i32 + metrics.xmin;
            let gy = baseline_y.round() as i32 - metrics.height as i32 - metrics.ymin;
            for row in 0..metrics.height {
                for col in 0..metrics.width {
                    let cov = coverage[row * metrics.width + col];
                    if cov == 0 {
                        continue;
                    }
                    let alpha = ((color.0[3] as u16 * cov as u16) / 255) as u8;
                    blend_px(
                        &mut self.pixels,
                        gx + col as i32,
                        gy + row as i32,
                        Rgba([color.0[0], color.0[1], color.0[2], alpha]),
                    );
                }
            }
            pen_x += metrics.advance_width;
        }
    }
}

impl DrawSurface for RasterSurface {
    fn width(&self) -> u32 {
        self.pixels.width()
    }

    fn height(&self) -> u32 {
        self.pixels.height()
    }

    fn clear(&mut self, color: Rgba<u8>) {
        for pixel in self.pixels.pixels_mut() {
            *pixel = color;
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba<u8>) {
        self.fill_region(rect, color, |_, _| true);
    }

    fn stroke_rect(&mut self, rect: Rect, width: f32, color: Rgba<u8>) {
        let inner = rect.inset(width);
        self.fill_region(rect, color, |x, y| {
            !(x >= inner.x && x <= inner.right() && y >= inner.y && y <= inner.bottom())
        });
    }

    fn fill_round_rect(&mut self, rect: Rect, radius: f32, color: Rgba<u8>) {
        self.fill_region(rect, color, |x, y| round_rect_contains(rect, radius, x, y));
    }

    fn stroke_round_rect(&mut self, rect: Rect, radius: f32, width: f32, color: Rgba<u8>) {
        let inner = rect.inset(width);
        let inner_radius = (radius - width).max(0.0);
        self.fill_region(rect, color, |x, y| {
            round_rect_contains(rect, radius, x, y)
                && !round_rect_contains(inner, inner_radius, x, y)
        });
    }

    fn dashed_rect(&mut self, rect: Rect, width: f32, dash: f32, color: Rgba<u8>) {
        let dash = dash.max(1.0);
        let edges = [
            // (start, step per unit t, length)
            (rect.x, rect.y, 1.0, 0.0, rect.width),
            (rect.right(), rect.y, 0.0, 1.0, rect.height),
            (rect.right(), rect.bottom(), -1.0, 0.0, rect.width),
            (rect.x, rect.bottom(), 0.0, -1.0, rect.height),
        ];
        for (sx, sy, dx, dy, len) in edges {
            let mut t = 0.0;
            while t < len {
                if ((t / dash) as i32) % 2 == 0 {
                    let x = sx + dx * t;
                    let y = sy + dy * t;
                    self.fill_rect(
                        Rect::new(x - width / 2.0, y - width / 2.0, width.max(1.0), width.max(1.0)),
                        color,
                    );
                }
                t += 1.0;
            }
        }
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgba<u8>) {
        let bounds = Rect::new(cx - radius, cy - radius, radius * 2.0, radius * 2.0);
        self.fill_region(bounds, color, |x, y| {
            let (dx, dy) = (x - cx, y - cy);
            dx * dx + dy * dy <= radius * radius
        });
    }

    fn text_width(&self, text: &str, px: f32) -> f32 {
        match &self.font {
            Some(font) => text
                .chars()
                .map(|ch| font.metrics(ch, px).advance_width)
                .sum(),
            None => text.chars().count() as f32 * px * FALLBACK_ADVANCE,
        }
    }

    fn draw_text(&mut self, text: &str, cx: f32, cy: f32, style: &TextStyle) {
        if text.is_empty() || self.font.is_none() {
            return;
        }
        let width = self.text_width(text, style.px);
        let origin_x = cx - width / 2.0;
        let baseline_y = match self
            .font
            .as_ref()
            .and_then(|f| f.horizontal_line_metrics(style.px))
        {
            // Visual center sits halfway between ascender and descender.
            Some(line) => cy + (line.ascent + line.descent) / 2.0,
            None => cy + style.px * 0.35,
        };

        if let Some(outline) = style.outline {
            for (ox, oy) in [
                (-1.0, -1.0),
                (0.0, -1.0),
                (1.0, -1.0),
                (-1.0, 0.0),
                (1.0, 0.0),
                (-1.0, 1.0),
                (0.0, 1.0),
                (1.0, 1.0),
            ] {
                self.draw_glyph_run(text, origin_x + ox, baseline_y + oy, style.px, outline);
            }
        }
        self.draw_glyph_run(text, origin_x, baseline_y, style.px, style.fill);
    }

    fn blit_round_rect(&mut self, bitmap: &RgbaImage, rect: Rect, radius: f32) {
        if bitmap.width() == 0 || bitmap.height() == 0 || rect.width <= 0.0 || rect.height <= 0.0 {
            return;
        }
        let x0 = rect.x.floor().max(0.0) as i32;
        let y0 = rect.y.floor().max(0.0) as i32;
        let x1 = (rect.right().ceil() as i32).min(self.pixels.width() as i32);
        let y1 = (rect.bottom().ceil() as i32).min(self.pixels.height() as i32);
        for y in y0..y1 {
            for x in x0..x1 {
                let (cx, cy) = (x as f32 + 0.5, y as f32 + 0.5);
                if !round_rect_contains(rect, radius, cx, cy) {
                    continue;
                }
                // Nearest-neighbor sample from the source bitmap.
                let u = ((cx - rect.x) / rect.width * bitmap.width() as f32) as u32;
                let v = ((cy - rect.y) / rect.height * bitmap.height() as f32) as u32;
                let src = *bitmap.get_pixel(u.min(bitmap.width() - 1), v.min(bitmap.height() - 1));
                self.blend_pixel(x, y, src);
            }
        }
    }
}

/// Point-in-rounded-rectangle test against pixel centers.
fn round_rect_contains(rect: Rect, radius: f32, x: f32, y: f32) -> bool {
    if x < rect.x || x > rect.right() || y < rect.y || y > rect.bottom() {
        return false;
    }
    let radius = radius
        .max(0.0)
        .min(rect.width / 2.0)
        .min(rect.height / 2.0);
    if radius <= 0.0 {
        return true;
    }
    let corner_x = if x < rect.x + radius {
        Some(rect.x + radius)
    } else if x > rect.right() - radius {
        Some(rect.right() - radius)
    } else {
        None
    };
    let corner_y = if y < rect.y + radius {
        Some(rect.y + radius)
    } else if y > rect.bottom() - radius {
        Some(rect.bottom() - radius)
    } else {
        None
    };
    match (corner_x, corner_y) {
        (Some(cx), Some(cy)) => {
            let (dx, dy) = (x - cx, y - cy);
            dx * dx + dy * dy <= radius * radius
        }
        _ => true,
    }
}

fn blend_px(pixels: &mut RgbaImage, x: i32, y: i32, color: Rgba<u8>) {
    if x < 0 || y < 0 || x >= pixels.width() as i32 || y >= pixels.height() as i32 {
        return;
    }
    let dst = *pixels.get_pixel(x as u32, y as u32);
    pixels.put_pixel(x as u32, y as u32, alpha_blend(color, dst));
}

/// Alpha blends two RGBA pixels (source over destination).
fn alpha_blend(src: Rgba<u8>, dst: Rgba<u8>) -> Rgba<u8> {
    let sa = src[3] as f32 / 255.0;
    let da = dst[3] as f32 / 255.0;

    let out_a = sa + da * (1.0 - sa);
    if out_a == 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    let blend = |s: u8, d: u8| -> u8 {
        let sf = s as f32 / 255.0;
        let df = d as f32 / 255.0;
        let out = (sf * sa + df * da * (1.0 - sa)) / out_a;
        (out * 255.0).round() as u8
    };

    Rgba([
        blend(src[0], dst[0]),
        blend(src[1], dst[1]),
        blend(src[2], dst[2]),
        (out_a * 255.0).round() as u8,
    ])
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_and_fill_are_exact_for_opaque_colors() {
        let mut surface = RasterSurface::new(10, 10);
        surface.clear(Rgba([255, 255, 255, 255]));
        surface.fill_rect(Rect::new(2.0, 2.0, 4.0, 4.0), Rgba([211, 84, 0, 255]));

        assert_eq!(surface.image().get_pixel(3, 3).0, [211, 84, 0, 255]);
        assert_eq!(surface.image().get_pixel(0, 0).0, [255, 255, 255, 255]);
    }

    #[test]
    fn fill_clips_to_surface_bounds() {
        let mut surface = RasterSurface::new(4, 4);
        surface.fill_rect(Rect::new(-10.0, -10.0, 100.0, 100.0), Rgba([0, 0, 255, 255]));
        assert_eq!(surface.image().get_pixel(3, 3).0, [0, 0, 255, 255]);
    }

    #[test]
    fn stroke_rect_leaves_interior_untouched() {
        let mut surface = RasterSurface::new(20, 20);
        surface.clear(Rgba([255, 255, 255, 255]));
        surface.stroke_rect(Rect::new(2.0, 2.0, 16.0, 16.0), 2.0, Rgba([0, 0, 0, 255]));

        assert_eq!(surface.image().get_pixel(3, 3).0, [0, 0, 0, 255], "border");
        assert_eq!(
            surface.image().get_pixel(10, 10).0,
            [255, 255, 255, 255],
            "interior"
        );
    }

    #[test]
    fn round_rect_skips_corners() {
        let mut surface = RasterSurface::new(20, 20);
        surface.clear(Rgba([255, 255, 255, 255]));
        surface.fill_round_rect(Rect::new(0.0, 0.0, 20.0, 20.0), 8.0, Rgba([0, 0, 0, 255]));

        assert_eq!(
            surface.image().get_pixel(0, 0).0,
            [255, 255, 255, 255],
            "corner outside the radius stays untouched"
        );
        assert_eq!(surface.image().get_pixel(10, 10).0, [0, 0, 0, 255]);
    }

    #[test]
    fn circle_covers_center_not_bounding_corner() {
        let mut surface = RasterSurface::new(20, 20);
        surface.fill_circle(10.0, 10.0, 5.0, Rgba([255, 0, 0, 255]));
        assert_eq!(surface.image().get_pixel(10, 10).0, [255, 0, 0, 255]);
        assert_eq!(surface.image().get_pixel(5, 5).0[3], 0);
    }

    #[test]
    fn semi_transparent_fill_blends() {
        let mut surface = RasterSurface::new(2, 2);
        surface.clear(Rgba([255, 0, 0, 255]));
        surface.fill_rect(Rect::new(0.0, 0.0, 2.0, 2.0), Rgba([0, 0, 255, 128]));

        let pixel = surface.image().get_pixel(0, 0);
        assert!(pixel[0] > 0, "some red remains");
        assert!(pixel[2] > 0, "some blue mixed in");
    }

    #[test]
    fn text_without_font_is_a_noop_with_stable_measurement() {
        let mut surface = RasterSurface::new(50, 20);
        surface.clear(Rgba([255, 255, 255, 255]));
        let before = surface.image().clone();

        let style = TextStyle {
            px: 12.0,
            fill: Rgba([0, 0, 0, 255]),
            outline: None,
        };
        surface.draw_text("Hello", 25.0, 10.0, &style);
        assert_eq!(*surface.image(), before, "no glyph source, no pixels");

        let width = surface.text_width("Hello", 12.0);
        assert!((width - 5.0 * 12.0 * FALLBACK_ADVANCE).abs() < 1e-4);
    }

    #[test]
    fn blit_scales_source_into_rect() {
        let mut surface = RasterSurface::new(20, 20);
        let bitmap = RgbaImage::from_pixel(2, 2, Rgba([0, 255, 0, 255]));
        surface.blit_round_rect(&bitmap, Rect::new(4.0, 4.0, 12.0, 12.0), 0.0);

        assert_eq!(surface.image().get_pixel(10, 10).0, [0, 255, 0, 255]);
        assert_eq!(surface.image().get_pixel(1, 1).0[3], 0, "outside the rect");
    }

    #[test]
    fn dashed_rect_has_gaps() {
        let mut surface = RasterSurface::new(40, 40);
        surface.clear(Rgba([255, 255, 255, 255]));
        surface.dashed_rect(Rect::new(5.0, 5.0, 30.0, 30.0), 1.0, 4.0, Rgba([0, 0, 0, 255]));

        let top_edge: Vec<[u8; 4]> = (5..35).map(|x| surface.image().get_pixel(x, 5).0).collect();
        assert!(top_edge.contains(&[0, 0, 0, 255]), "some dashes drawn");
        assert!(top_edge.contains(&[255, 255, 255, 255]), "some gaps left");
    }
}
