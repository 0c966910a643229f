//! packmock-renderer: package-design mockup rendering and interaction.
//!
//! This crate turns a parametric package template plus a customization
//! schema into a live 2D mockup: per-category background drawing, schema
//! element compositing (text, logos, uploaded artwork), pointer hit-testing
//! with drag repositioning, color scheme application, and raster export.
//!
//! # Example
//!
//! ```
//! use packmock_renderer::{
//!     CustomizationSchema, EditorSession, ExportFormat, MockupRenderer, RenderOptions, Template,
//! };
//!
//! let template = Template::from_json(r#"{
//!     "id": "tpl-1",
//!     "name": "Jasmine Rice Bag",
//!     "category": "Grains",
//!     "subCategory": "Rice Package",
//!     "standardDimensions": { "width": 200.0, "height": 300.0 }
//! }"#).unwrap();
//!
//! let schema = CustomizationSchema::from_json(r##"{
//!     "elements": [
//!         { "elementId": "background-color", "label": "Background",
//!           "elementType": "color", "defaultValue": "#FFFFFF" },
//!         { "elementId": "main-color", "label": "Main Color",
//!           "elementType": "color", "defaultValue": "#D35400" }
//!     ],
//!     "colorSchemes": []
//! }"##).unwrap();
//!
//! // State seeds once from the schema defaults.
//! let session = EditorSession::from_schema(&schema);
//!
//! let mut renderer = MockupRenderer::new(&template, RenderOptions::default());
//! renderer.render(&template, &schema, &session);
//!
//! let png = packmock_renderer::encode(renderer.surface().image(), ExportFormat::Png).unwrap();
//! assert!(!png.is_empty());
//! ```
//!
//! # Interaction
//!
//! Pointer events go through [`pointer_down`], [`pointer_move`], and
//! [`pointer_up`], which run the select/drag machine over an
//! [`EditorSession`] and tell the host when to open a file picker for an
//! empty image slot. Decoded uploads attach via
//! [`EditorSession::attach_upload`]; the decode boundary itself is
//! [`decode_upload`].

mod color;
mod elements;
mod geometry;
mod interact;
mod render;
mod scheme;
mod session;
mod shape;
mod surface;
mod template;

pub mod export;
pub mod upload;

#[cfg(feature = "canvas")]
mod canvas;

#[cfg(feature = "canvas")]
pub use canvas::CanvasPreview;
pub use color::Color;
pub use elements::{element_bounds, fit_font_size};
pub use export::{
    build_submission, encode, encode_data_url, export_file_name, ExportError, ExportFormat,
    SubmissionPayload, SubmittedImage,
};
pub use geometry::{compute_scale, Point, Rect};
pub use interact::{pointer_down, pointer_move, pointer_up, PointerResponse};
pub use render::{render_mockup, MockupRenderer, RenderContext, RenderOptions};
pub use scheme::apply_scheme;
pub use session::{DragSession, EditorSession, UploadSource, UploadedImage};
pub use shape::{ShapePalette, ShapeStrategy, BACKGROUND_COLOR_ID, MAIN_COLOR_ID};
pub use surface::{DrawSurface, RasterSurface, TextStyle};
pub use template::{
    ColorScheme, CustomizationSchema, Dimensions, Element, ElementConstraints, ElementKind,
    FontSizeRange, SchemeColor, Template,
};
pub use upload::{decode_upload, is_supported_upload, UploadError};
