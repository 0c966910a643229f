//! Labeled-panel background for coffee bags.

use super::{device_size, ShapePalette};
use crate::geometry::Rect;
use crate::surface::DrawSurface;

pub(super) fn draw(surface: &mut dyn DrawSurface, palette: &ShapePalette) {
    let (w, h) = device_size(surface);
    let main = palette.main.to_rgba();

    surface.clear(palette.background.to_rgba());

    // Fold band across the top, with a thin crease line under it.
    surface.fill_rect(Rect::new(0.0, 0.0, w, h * 0.07), main);
    surface.fill_rect(
        Rect::new(0.0, h * 0.075, w, 1.5),
        palette.main.darken(0.1).to_rgba(),
    );

    // Central label panel.
    let label = Rect::new(w * 0.15, h * 0.30, w * 0.70, h * 0.30);
    surface.fill_round_rect(
        label,
        8.0,
        palette.background.adjust_brightness(8.0).to_rgba(),
    );
    surface.stroke_round_rect(label, 8.0, 2.0, main);

    // Roast stripes under the label.
    let stripe = palette.main.with_alpha(190);
    for i in 0..3 {
        let y = h * (0.68 + 0.05 * i as f32);
        surface.fill_rect(Rect::new(w * 0.15, y, w * 0.70, 3.0), stripe);
    }

    // Two rows of bean dots above the base.
    let bean = palette.main.darken(0.1).with_alpha(220);
    for row in 0..2 {
        let y = h * (0.87 + 0.05 * row as f32);
        let mut x = w * 0.18 + if row % 2 == 0 { 0.0 } else { 9.0 };
        while x < w * 0.82 {
            surface.fill_circle(x, y, 2.5, bean);
            x += 18.0;
        }
    }
}
