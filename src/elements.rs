//! Schema element rendering.
//!
//! Elements draw in schema order, so later elements overpaint earlier ones
//! and the shape background. Color elements are an intentional no-op here;
//! their values are consumed by the shape strategies.

use image::Rgba;

use crate::color::Color;
use crate::geometry::{Point, Rect};
use crate::render::RenderContext;
use crate::session::EditorSession;
use crate::shape::ShapePalette;
use crate::surface::{DrawSurface, TextStyle};
use crate::template::{CustomizationSchema, Element, ElementKind};

// Design-unit bounding boxes per element kind.
const TEXT_BOX: (f32, f32) = (120.0, 30.0);
const IMAGE_BOX: (f32, f32) = (100.0, 80.0);

// Text sizing rules.
const BASE_FONT_CAP: f32 = 14.0;
const BASE_FONT_FACTOR: f32 = 0.8;
const AVAILABLE_WIDTH_RATIO: f32 = 0.8;
const FIT_MARGIN: f32 = 0.9;

const SELECTION_COLOR: Rgba<u8> = Rgba([59, 130, 246, 255]);

/// Design-space bounding box for an element placed at `position`.
///
/// Text, logo, and other elements occupy a 120x30 box; image slots 100x80.
/// The box is centered on the position.
pub fn element_bounds(element: &Element, position: Point) -> Rect {
    let (w, h) = match element.element_type {
        ElementKind::Image => IMAGE_BOX,
        _ => TEXT_BOX,
    };
    Rect::from_center(position, w, h)
}

/// Scales `base` font size down so the measured run fits the available
/// width, with a safety margin. Sizes that already fit pass through.
pub fn fit_font_size(base: f32, available: f32, measured: f32) -> f32 {
    if measured > available && measured > 0.0 {
        base * (available / measured) * FIT_MARGIN
    } else {
        base
    }
}

/// Draws every visible schema element, then the selection highlight.
pub fn draw_elements(
    surface: &mut dyn DrawSurface,
    schema: &CustomizationSchema,
    session: &EditorSession,
    ctx: &RenderContext,
) {
    let palette = ShapePalette::from_state(session.customizations());
    for element in schema.visible_elements() {
        match element.element_type {
            ElementKind::Text => draw_text(surface, element, session, ctx, &palette),
            // Color values are consumed by the shape strategies.
            ElementKind::Color => {}
            ElementKind::Logo => draw_logo(surface, element, session, ctx, &palette),
            ElementKind::Image => draw_image(surface, element, session, ctx),
            ElementKind::Other => {}
        }
    }
    if let Some(selected) = ctx.selected.as_deref() {
        if let Some(element) = schema.element(selected) {
            if !element.is_reserved() {
                draw_highlight(surface, element, session, ctx);
            }
        }
    }
}

fn draw_text(
    surface: &mut dyn DrawSurface,
    element: &Element,
    session: &EditorSession,
    ctx: &RenderContext,
    palette: &ShapePalette,
) {
    let Some(value) = session.value(&element.element_id) else {
        return;
    };
    if value.is_empty() {
        return;
    }

    let range = element.constraints.font_size;
    let base = (range.max.min(BASE_FONT_CAP) * ctx.scale * BASE_FONT_FACTOR)
        .max(range.min)
        .min(range.max);
    let available = ctx.device_width * AVAILABLE_WIDTH_RATIO;
    let measured = surface.text_width(value, base);
    let px = fit_font_size(base, available, measured);

    let center = element.constraints.position.to_device(ctx.scale);
    let style = TextStyle {
        px,
        fill: palette.main.darken(0.25).to_rgba(),
        outline: Some(Color::WHITE.with_alpha(230)),
    };
    surface.draw_text(value, center.x, center.y, &style);
}

fn draw_logo(
    surface: &mut dyn DrawSurface,
    element: &Element,
    session: &EditorSession,
    ctx: &RenderContext,
    palette: &ShapePalette,
) {
    let bounds =
        element_bounds(element, element.constraints.position).to_device(ctx.scale);
    surface.fill_round_rect(bounds, 6.0 * ctx.scale, Color::WHITE.with_alpha(150));
    surface.stroke_round_rect(
        bounds,
        6.0 * ctx.scale,
        1.0,
        palette.main.with_alpha(180),
    );

    if let Some(value) = session.value(&element.element_id) {
        if !value.is_empty() {
            let center = bounds.center();
            let style = TextStyle {
                px: (bounds.height * 0.45).max(6.0),
                fill: palette.main.darken(0.2).to_rgba(),
                outline: None,
            };
            surface.draw_text(value, center.x, center.y, &style);
        }
    }
}

fn draw_image(
    surface: &mut dyn DrawSurface,
    element: &Element,
    session: &EditorSession,
    ctx: &RenderContext,
) {
    // No placeholder: an empty slot draws nothing at all.
    let Some(upload) = session.upload(&element.element_id) else {
        return;
    };
    let position = session.element_position(element);
    let bounds = element_bounds(element, position).to_device(ctx.scale);
    surface.blit_round_rect(&upload.bitmap, bounds, 8.0 * ctx.scale);
}

fn draw_highlight(
    surface: &mut dyn DrawSurface,
    element: &Element,
    session: &EditorSession,
    ctx: &RenderContext,
) {
    let position = session.element_position(element);
    let bounds = element_bounds(element, position).to_device(ctx.scale);
    surface.dashed_rect(bounds, 1.5, 6.0, SELECTION_COLOR);
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::ElementConstraints;

    fn element(kind: ElementKind, position: Point) -> Element {
        Element {
            element_id: "e".into(),
            label: "E".into(),
            element_type: kind,
            constraints: ElementConstraints {
                position,
                ..Default::default()
            },
            default_value: None,
        }
    }

    #[test]
    fn fit_shrinks_overflowing_text() {
        let fitted = fit_font_size(14.0, 100.0, 150.0);
        assert!(
            (fitted - 8.4).abs() < 1e-4,
            "expected 14 * (100/150) * 0.9 = 8.4, got {}",
            fitted
        );
    }

    #[test]
    fn fit_keeps_text_that_already_fits() {
        assert_eq!(fit_font_size(14.0, 100.0, 80.0), 14.0);
        assert_eq!(fit_font_size(14.0, 100.0, 100.0), 14.0);
    }

    #[test]
    fn bounds_are_centered_per_kind() {
        let position = Point::new(50.0, 40.0);

        let text = element_bounds(&element(ElementKind::Text, position), position);
        assert_eq!((text.width, text.height), (120.0, 30.0));
        assert_eq!(text.center(), position);

        let image = element_bounds(&element(ElementKind::Image, position), position);
        assert_eq!((image.width, image.height), (100.0, 80.0));

        let logo = element_bounds(&element(ElementKind::Logo, position), position);
        assert_eq!((logo.width, logo.height), (120.0, 30.0));
    }
}
