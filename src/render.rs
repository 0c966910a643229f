//! Render orchestration.
//!
//! Rendering is a full redraw on every state change, including every pointer
//! move while a drag is in progress: recompute the scale, draw the package
//! background for the template's sub-category, then draw the schema elements
//! over it. The pass is a pure function of its inputs, accumulates no state,
//! and never fails; malformed inputs degrade to visible defaults.

use crate::elements;
use crate::geometry::compute_scale;
use crate::session::EditorSession;
use crate::shape::{ShapePalette, ShapeStrategy};
use crate::surface::{DrawSurface, RasterSurface};
use crate::template::{CustomizationSchema, Template};

// ============================================================================
// RenderOptions / RenderContext
// ============================================================================

/// View constraints for scale computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    pub max_view_width: f32,
    pub max_view_height: f32,
    pub scale_cap: f32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_view_width: 800.0,
            max_view_height: 600.0,
            scale_cap: 2.0,
        }
    }
}

/// Per-pass derived values shared by the drawing code.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderContext {
    /// Uniform design-to-device scale.
    pub scale: f32,
    pub device_width: f32,
    pub device_height: f32,
    pub selected: Option<String>,
}

impl RenderContext {
    /// Derives the context for a template under the given view constraints.
    pub fn for_template(template: &Template, options: &RenderOptions) -> Self {
        let dims = template.standard_dimensions;
        let scale = compute_scale(
            dims.width,
            dims.height,
            options.max_view_width,
            options.max_view_height,
            options.scale_cap,
        );
        // With degenerate dimensions the scale fell back to 1.0; keep the
        // surface usable by falling back on the view size as well.
        let (device_width, device_height) = if dims.width > 0.0 && dims.height > 0.0 {
            (dims.width * scale, dims.height * scale)
        } else {
            (options.max_view_width, options.max_view_height)
        };
        Self {
            scale,
            device_width,
            device_height,
            selected: None,
        }
    }
}

// ============================================================================
// Free render pass
// ============================================================================

/// Renders the full mockup into any [`DrawSurface`].
pub fn render_mockup(
    surface: &mut dyn DrawSurface,
    template: &Template,
    schema: &CustomizationSchema,
    session: &EditorSession,
    ctx: &RenderContext,
) {
    let palette = ShapePalette::from_state(session.customizations());
    ShapeStrategy::for_sub_category(&template.sub_category).draw(surface, &palette);
    elements::draw_elements(surface, schema, session, ctx);
}

// ============================================================================
// MockupRenderer
// ============================================================================

/// Owns the raster surface and re-renders it on demand.
///
/// The surface size is fixed when the renderer is created from the template
/// dimensions and view constraints; every [`render`](Self::render) call is a
/// complete redraw.
pub struct MockupRenderer {
    options: RenderOptions,
    surface: RasterSurface,
}

impl MockupRenderer {
    pub fn new(template: &Template, options: RenderOptions) -> Self {
        let ctx = RenderContext::for_template(template, &options);
        Self {
            options,
            surface: RasterSurface::new(
                ctx.device_width.round() as u32,
                ctx.device_height.round() as u32,
            ),
        }
    }

    /// Loads a TTF/OTF font for text elements.
    pub fn set_font_bytes(&mut self, bytes: &[u8]) -> Result<(), &'static str> {
        self.surface.set_font_bytes(bytes)
    }

    /// Redraws the whole mockup from the current session state.
    pub fn render(
        &mut self,
        template: &Template,
        schema: &CustomizationSchema,
        session: &EditorSession,
    ) -> RenderContext {
        let mut ctx = RenderContext::for_template(template, &self.options);
        ctx.selected = session.selected().map(str::to_string);
        render_mockup(&mut self.surface, template, schema, session, &ctx);
        ctx
    }

    pub fn surface(&self) -> &RasterSurface {
        &self.surface
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }
}

// ============================================================================
// Tests
// ============================================================================
