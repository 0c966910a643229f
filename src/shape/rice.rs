//! Bordered-frame background for rice packages.

use super::{device_size, ShapePalette};
use crate::geometry::Rect;
use crate::surface::DrawSurface;

// Band and panel proportions of the device size.
const BAND_H: f32 = 0.08;
const BAND_W: f32 = 0.05;
const PANEL_X: f32 = 0.08;
const PANEL_Y: f32 = 0.12;
const PANEL_W: f32 = 0.84;
const PANEL_H: f32 = 0.76;
const PANEL_BRIGHTNESS: f32 = -6.0;

pub(super) fn draw(surface: &mut dyn DrawSurface, palette: &ShapePalette) {
    let (w, h) = device_size(surface);
    let main = palette.main.to_rgba();

    surface.clear(palette.background.to_rgba());

    // Horizontal bands top and bottom, vertical bands left and right.
    surface.fill_rect(Rect::new(0.0, 0.0, w, h * BAND_H), main);
    surface.fill_rect(Rect::new(0.0, h - h * BAND_H, w, h * BAND_H), main);
    surface.fill_rect(Rect::new(0.0, 0.0, w * BAND_W, h), main);
    surface.fill_rect(Rect::new(w - w * BAND_W, 0.0, w * BAND_W, h), main);

    // Central panel, slightly dimmed against the raw background.
    let panel = Rect::new(w * PANEL_X, h * PANEL_Y, w * PANEL_W, h * PANEL_H);
    surface.fill_rect(
        panel,
        palette.background.adjust_brightness(PANEL_BRIGHTNESS).to_rgba(),
    );
    surface.stroke_rect(panel, 1.5, palette.main.darken(0.1).to_rgba());

    // Dotted inner border.
    dot_border(surface, panel.inset((w * 0.035).max(6.0)), main);
}

fn dot_border(surface: &mut dyn DrawSurface, rect: Rect, color: image::Rgba<u8>) {
    let radius = 1.5;
    let spacing = 14.0;
    let mut x = rect.x;
    while x <= rect.right() {
        surface.fill_circle(x, rect.y, radius, color);
        surface.fill_circle(x, rect.bottom(), radius, color);
        x += spacing;
    }
    let mut y = rect.y + spacing;
    while y < rect.bottom() {
        surface.fill_circle(rect.x, y, radius, color);
        surface.fill_circle(rect.right(), y, radius, color);
        y += spacing;
    }
}
