//! Elegant double-frame background for tea boxes.

use super::{device_size, ShapePalette};
use crate::geometry::Rect;
use crate::surface::DrawSurface;

pub(super) fn draw(surface: &mut dyn DrawSurface, palette: &ShapePalette) {
    let (w, h) = device_size(surface);
    let full = Rect::new(0.0, 0.0, w, h);

    surface.clear(palette.background.to_rgba());

    // Double frame: a heavier outer border and a hairline inner one.
    let outer = full.inset((w.min(h) * 0.03).max(4.0));
    let inner = outer.inset((w.min(h) * 0.025).max(3.0));
    surface.stroke_rect(outer, 2.5, palette.main.to_rgba());
    surface.stroke_rect(inner, 1.0, palette.main.lighten(0.15).to_rgba());

    // Leaf clusters in each inner corner.
    let leaf = palette.main.darken(0.08).with_alpha(230);
    let pad = (w.min(h) * 0.09).max(10.0);
    for (cx, cy) in [
        (inner.x + pad, inner.y + pad),
        (inner.right() - pad, inner.y + pad),
        (inner.x + pad, inner.bottom() - pad),
        (inner.right() - pad, inner.bottom() - pad),
    ] {
        leaf_cluster(surface, cx, cy, leaf);
    }

    // Central medallion.
    let medallion = Rect::from_center(full.center(), w * 0.5, h * 0.22);
    surface.fill_round_rect(
        medallion,
        10.0,
        palette.background.adjust_brightness(6.0).to_rgba(),
    );
    surface.stroke_round_rect(medallion, 10.0, 1.5, palette.main.to_rgba());
}

/// Three overlapping dots suggesting a sprig of leaves.
fn leaf_cluster(surface: &mut dyn DrawSurface, cx: f32, cy: f32, color: image::Rgba<u8>) {
    surface.fill_circle(cx, cy, 3.0, color);
    surface.fill_circle(cx + 4.0, cy - 3.0, 2.2, color);
    surface.fill_circle(cx - 4.0, cy - 3.0, 2.2, color);
}
