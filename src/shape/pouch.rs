//! Rounded stand-up pouch background.

use super::{device_size, ShapePalette};
use crate::geometry::Rect;
use crate::surface::DrawSurface;

pub(super) fn draw(surface: &mut dyn DrawSurface, palette: &ShapePalette) {
    let (w, h) = device_size(surface);

    // Transparent margins; the pouch body is the rounded rectangle.
    surface.clear(image::Rgba([0, 0, 0, 0]));
    let body = Rect::new(0.0, h * 0.02, w, h * 0.98);
    let radius = w * 0.10;
    surface.fill_round_rect(body, radius, palette.background.to_rgba());

    // Heat-seal strip across the top of the body.
    surface.fill_rect(
        Rect::new(w * 0.04, h * 0.05, w * 0.92, h * 0.05),
        palette.main.to_rgba(),
    );

    // Side gussets.
    let gusset_color = palette.main.lighten(0.2).with_alpha(160);
    surface.fill_rect(Rect::new(w * 0.06, h * 0.12, 2.0, h * 0.78), gusset_color);
    surface.fill_rect(Rect::new(w * 0.94 - 2.0, h * 0.12, 2.0, h * 0.78), gusset_color);

    // Rounded base band.
    surface.fill_round_rect(
        Rect::new(0.0, h * 0.88, w, h * 0.12),
        radius,
        palette.main.adjust_brightness(-10.0).to_rgba(),
    );

    // Sparse dot texture over the middle of the body.
    let dot_color = palette.main.with_alpha(70);
    let mut y = h * 0.22;
    let mut row = 0;
    while y < h * 0.82 {
        let offset = if row % 2 == 0 { 0.0 } else { 12.0 };
        let mut x = w * 0.12 + offset;
        while x < w * 0.88 {
            surface.fill_circle(x, y, 2.0, dot_color);
            x += 24.0;
        }
        y += 20.0;
        row += 1;
    }

    surface.stroke_round_rect(body, radius, 1.5, palette.main.darken(0.15).to_rgba());
}
