//! Package shape drawing strategies.
//!
//! Each package sub-category has a fixed procedural drawing routine for its
//! background: a bordered frame for rice bags, a rounded body for pouches, a
//! labeled panel for coffee, an elegant double frame for tea. Sub-categories
//! without a routine fall back to a plain bordered rectangle. Strategies are
//! pure with respect to model state; they only write pixels.

mod coffee;
mod pouch;
mod rice;
mod tea;

use std::collections::BTreeMap;

use crate::color::Color;
use crate::geometry::Rect;
use crate::surface::DrawSurface;

/// Customization element ids the shape strategies draw with.
pub const BACKGROUND_COLOR_ID: &str = "background-color";
pub const MAIN_COLOR_ID: &str = "main-color";

// ============================================================================
// ShapePalette
// ============================================================================

/// The two customization-driven colors every strategy is parameterized by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapePalette {
    pub background: Color,
    pub main: Color,
}

impl ShapePalette {
    /// Resolves the palette from the customization state, falling back to a
    /// neutral default when a value is absent or malformed.
    pub fn from_state(state: &BTreeMap<String, String>) -> Self {
        let lookup = |id: &str, fallback: Color| {
            state
                .get(id)
                .and_then(|hex| Color::from_hex(hex))
                .unwrap_or(fallback)
        };
        Self {
            background: lookup(BACKGROUND_COLOR_ID, Color::WHITE),
            main: lookup(MAIN_COLOR_ID, Color::new(127, 140, 141)),
        }
    }
}

// ============================================================================
// ShapeStrategy
// ============================================================================

/// The closed set of background drawing strategies, keyed by sub-category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeStrategy {
    Rice,
    Pouch,
    Coffee,
    Tea,
    /// Plain bordered rectangle for unrecognized sub-categories.
    Plain,
}

impl ShapeStrategy {
    /// Resolves the drawing strategy for a template sub-category.
    pub fn for_sub_category(sub_category: &str) -> Self {
        let key = sub_category.to_lowercase();
        if key.contains("rice") {
            ShapeStrategy::Rice
        } else if key.contains("pouch") {
            ShapeStrategy::Pouch
        } else if key.contains("coffee") {
            ShapeStrategy::Coffee
        } else if key.contains("tea") {
            ShapeStrategy::Tea
        } else {
            ShapeStrategy::Plain
        }
    }

    /// Draws the package background across the whole surface.
    pub fn draw(self, surface: &mut dyn DrawSurface, palette: &ShapePalette) {
        match self {
            ShapeStrategy::Rice => rice::draw(surface, palette),
            ShapeStrategy::Pouch => pouch::draw(surface, palette),
            ShapeStrategy::Coffee => coffee::draw(surface, palette),
            ShapeStrategy::Tea => tea::draw(surface, palette),
            ShapeStrategy::Plain => draw_plain(surface, palette),
        }
    }
}

/// Default background: a filled rectangle with a darkened border.
fn draw_plain(surface: &mut dyn DrawSurface, palette: &ShapePalette) {
    let (w, h) = device_size(surface);
    surface.clear(palette.background.to_rgba());
    surface.stroke_rect(
        Rect::new(0.0, 0.0, w, h),
        (w.min(h) * 0.02).max(2.0),
        palette.background.darken(0.25).to_rgba(),
    );
}

pub(crate) fn device_size(surface: &dyn DrawSurface) -> (f32, f32) {
    (surface.width() as f32, surface.height() as f32)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RasterSurface;

    #[test]
    fn sub_category_resolution() {
        assert_eq!(
            ShapeStrategy::for_sub_category("Rice Package"),
            ShapeStrategy::Rice
        );
        assert_eq!(
            ShapeStrategy::for_sub_category("premium tea box"),
            ShapeStrategy::Tea
        );
        assert_eq!(
            ShapeStrategy::for_sub_category("Stand-up Pouch"),
            ShapeStrategy::Pouch
        );
        assert_eq!(
            ShapeStrategy::for_sub_category("Coffee Bag"),
            ShapeStrategy::Coffee
        );
        assert_eq!(
            ShapeStrategy::for_sub_category("Cereal Box"),
            ShapeStrategy::Plain
        );
    }

    #[test]
    fn palette_falls_back_on_missing_or_bad_values() {
        let mut state = BTreeMap::new();
        state.insert(MAIN_COLOR_ID.to_string(), "not-a-color".to_string());

        let palette = ShapePalette::from_state(&state);
        assert_eq!(palette.background, Color::WHITE);
        assert_eq!(palette.main, Color::new(127, 140, 141));
    }

    #[test]
    fn every_strategy_renders_without_panicking() {
        let palette = ShapePalette {
            background: Color::from_hex("#FFFFFF").unwrap(),
            main: Color::from_hex("#D35400").unwrap(),
        };
        for strategy in [
            ShapeStrategy::Rice,
            ShapeStrategy::Pouch,
            ShapeStrategy::Coffee,
            ShapeStrategy::Tea,
            ShapeStrategy::Plain,
        ] {
            let mut surface = RasterSurface::new(120, 180);
            strategy.draw(&mut surface, &palette);
        }
    }

    #[test]
    fn plain_fills_with_background() {
        let palette = ShapePalette {
            background: Color::from_hex("#2980B9").unwrap(),
            main: Color::WHITE,
        };
        let mut surface = RasterSurface::new(60, 60);
        ShapeStrategy::Plain.draw(&mut surface, &palette);
        assert_eq!(surface.image().get_pixel(30, 30).0, [41, 128, 185, 255]);
    }
}
