//! HTML Canvas rendering for WASM environments.
//!
//! This module provides [`CanvasPreview`], a wrapper around the editing
//! session and raster surface that can render directly to an HTML canvas
//! element and route pointer events into the interaction machine. It's
//! designed for live preview in a web frontend.
//!
//! # Feature Flag
//!
//! This module is only available with the `canvas` feature enabled:
//!
//! ```toml
//! [dependencies]
//! packmock-renderer = { version = "0.1", features = ["canvas"] }
//! ```
//!
//! # Example (JavaScript/TypeScript)
//!
//! ```javascript
//! import init, { CanvasPreview } from 'packmock-renderer';
//!
//! await init();
//!
//! const canvas = document.getElementById('preview-canvas');
//! const preview = CanvasPreview.fromJson(templateJson, schemaJson);
//!
//! preview.setValue('main-color', '#D35400');
//! preview.renderToCanvas(canvas);
//!
//! canvas.addEventListener('pointerdown', (e) => {
//!     const pickFor = preview.pointerDown(e.offsetX, e.offsetY);
//!     if (pickFor) openFilePicker(pickFor);
//!     preview.renderToCanvas(canvas);
//! });
//! ```

use wasm_bindgen::prelude::*;
use wasm_bindgen::Clamped;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageData};

use crate::export::{self, ExportFormat};
use crate::geometry::Point;
use crate::interact::{self, PointerResponse};
use crate::render::{MockupRenderer, RenderOptions};
use crate::session::{EditorSession, UploadSource, UploadedImage};
use crate::template::{CustomizationSchema, Template};
use crate::upload;

// ============================================================================
// CanvasPreview
// ============================================================================

/// Live package-mockup preview for HTML canvas hosts.
///
/// This type is exposed to JavaScript via wasm-bindgen and owns the whole
/// editing pipeline: session state, interaction machine, and raster surface.
#[wasm_bindgen]
pub struct CanvasPreview {
    template: Template,
    schema: CustomizationSchema,
    session: EditorSession,
    renderer: MockupRenderer,
    scale: f32,
}

#[wasm_bindgen]
impl CanvasPreview {
    /// Creates a preview from template and schema JSON records.
    #[wasm_bindgen(js_name = "fromJson")]
    pub fn from_json(template_json: &str, schema_json: &str) -> Result<CanvasPreview, JsError> {
        let template = Template::from_json(template_json)
            .map_err(|e| JsError::new(&format!("Failed to parse template: {}", e)))?;
        let schema = CustomizationSchema::from_json(schema_json)
            .map_err(|e| JsError::new(&format!("Failed to parse schema: {}", e)))?;

        let session = EditorSession::from_schema(&schema);
        let options = RenderOptions::default();
        let renderer = MockupRenderer::new(&template, options);
        let scale = crate::render::RenderContext::for_template(&template, &options).scale;

        Ok(Self {
            template,
            schema,
            session,
            renderer,
            scale,
        })
    }

    /// Loads a TTF/OTF font for text elements.
    #[wasm_bindgen(js_name = "setFont")]
    pub fn set_font(&mut self, bytes: &[u8]) -> Result<(), JsError> {
        self.renderer
            .set_font_bytes(bytes)
            .map_err(|e| JsError::new(&format!("Failed to load font: {}", e)))
    }

    // ---- Editing ----

    /// Sets one element's customization value.
    #[wasm_bindgen(js_name = "setValue")]
    pub fn set_value(&mut self, element_id: &str, value: &str) -> bool {
        self.session.set_value(&self.schema, element_id, value)
    }

    /// Applies a named color scheme. Returns false for unknown names.
    #[wasm_bindgen(js_name = "applyScheme")]
    pub fn apply_scheme(&mut self, scheme_name: &str) -> bool {
        self.session.apply_scheme(&self.schema, scheme_name)
    }

    /// Decodes uploaded file bytes and attaches them to an image element.
    #[wasm_bindgen(js_name = "attachImage")]
    pub fn attach_image(
        &mut self,
        element_id: &str,
        bytes: &[u8],
        mime: &str,
        file_name: &str,
    ) -> Result<(), JsError> {
        let bitmap = upload::decode_upload(bytes, mime, file_name)
            .map_err(|e| JsError::new(&e.to_string()))?;
        self.session.attach_upload(
            element_id,
            UploadedImage::new(
                bitmap,
                UploadSource {
                    file_name: file_name.to_string(),
                    mime: mime.to_string(),
                },
            ),
        );
        Ok(())
    }

    // ---- Interaction ----

    /// Routes a pointer press (canvas pixel coordinates) into the
    /// interaction machine. Returns the element id of an empty image slot
    /// when the host should open its file picker, `null` otherwise.
    #[wasm_bindgen(js_name = "pointerDown")]
    pub fn pointer_down(&mut self, x: f32, y: f32) -> Option<String> {
        match interact::pointer_down(&mut self.session, &self.schema, Point::new(x, y), self.scale)
        {
            PointerResponse::OpenFilePicker(id) => Some(id),
            _ => None,
        }
    }

    /// Routes pointer movement. Returns true when a redraw is due.
    #[wasm_bindgen(js_name = "pointerMove")]
    pub fn pointer_move(&mut self, x: f32, y: f32) -> bool {
        interact::pointer_move(&mut self.session, Point::new(x, y), self.scale)
    }

    /// Routes pointer release, ending any drag.
    #[wasm_bindgen(js_name = "pointerUp")]
    pub fn pointer_up(&mut self) {
        interact::pointer_up(&mut self.session);
    }

    /// The currently selected element id, if any.
    #[wasm_bindgen(js_name = "selectedElement")]
    pub fn selected_element(&self) -> Option<String> {
        self.session.selected().map(str::to_string)
    }

    // ---- Rendering ----

    /// Re-renders the mockup and blits it to the canvas element.
    #[wasm_bindgen(js_name = "renderToCanvas")]
    pub fn render_to_canvas(&mut self, canvas: &HtmlCanvasElement) -> Result<(), JsError> {
        self.renderer
            .render(&self.template, &self.schema, &self.session);
        let image = self.renderer.surface().image();

        let width = image.width();
        let height = image.height();
        canvas.set_width(width);
        canvas.set_height(height);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .map_err(|_| JsError::new("Failed to get 2d context"))?
            .ok_or_else(|| JsError::new("Canvas 2d context is null"))?
            .dyn_into()
            .map_err(|_| JsError::new("Failed to cast to CanvasRenderingContext2d"))?;

        let image_data =
            ImageData::new_with_u8_clamped_array_and_sh(Clamped(image.as_raw()), width, height)
                .map_err(|_| JsError::new("Failed to create ImageData"))?;

        ctx.put_image_data(&image_data, 0.0, 0.0)
            .map_err(|_| JsError::new("Failed to put image data"))?;

        Ok(())
    }

    // ---- Export ----

    /// Encodes the current surface as a data URL ("png" or "jpeg").
    #[wasm_bindgen(js_name = "exportDataUrl")]
    pub fn export_data_url(&mut self, format: &str) -> Result<String, JsError> {
        let format = match format {
            "jpeg" | "jpg" => ExportFormat::Jpeg,
            _ => ExportFormat::Png,
        };
        self.renderer
            .render(&self.template, &self.schema, &self.session);
        export::encode_data_url(self.renderer.surface().image(), format)
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Suggested download filename for the current template.
    #[wasm_bindgen(js_name = "exportFileName")]
    pub fn export_file_name(&self, format: &str) -> String {
        let format = match format {
            "jpeg" | "jpg" => ExportFormat::Jpeg,
            _ => ExportFormat::Png,
        };
        export::export_file_name(&self.template.name, format)
    }

    /// Serializes the submission payload for the collaborator layer.
    #[wasm_bindgen(js_name = "submissionJson")]
    pub fn submission_json(&self, notes: &str) -> Result<String, JsError> {
        let payload = export::build_submission(&self.template, &self.schema, &self.session, notes)
            .map_err(|e| JsError::new(&e.to_string()))?;
        serde_json::to_string(&payload)
            .map_err(|e| JsError::new(&format!("Failed to serialize payload: {}", e)))
    }
}
