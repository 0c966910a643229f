//! Editing session state.
//!
//! All interactive state lives in one [`EditorSession`] record: customization
//! values, uploaded artwork, the current selection, and a transient drag.
//! Mutation goes through explicit reducer-style methods so the interaction
//! machine stays independent of any UI layer, and rendering stays a pure
//! function of a session snapshot.

use std::collections::{BTreeMap, HashMap};

use image::RgbaImage;

use crate::geometry::Point;
use crate::scheme;
use crate::template::{CustomizationSchema, Element, ElementKind};

// ============================================================================
// Uploaded artwork
// ============================================================================

/// Where an uploaded bitmap came from.
#[derive(Debug, Clone, Default)]
pub struct UploadSource {
    pub file_name: String,
    pub mime: String,
}

/// A decoded artwork upload attached to an image element.
///
/// Exists only after a successful decode; elements without one render
/// nothing and cannot be dragged.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub bitmap: RgbaImage,
    /// Design-space position set by dragging; `None` means the schema
    /// constraint position applies.
    pub position_override: Option<Point>,
    pub source: UploadSource,
}

impl UploadedImage {
    pub fn new(bitmap: RgbaImage, source: UploadSource) -> Self {
        Self {
            bitmap,
            position_override: None,
            source,
        }
    }
}

/// A drag in progress: which element, and the grab offset from its position.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub element_id: String,
    pub pointer_offset: Point,
}

// ============================================================================
// EditorSession
// ============================================================================

/// The complete state of one local editing session.
#[derive(Debug, Clone, Default)]
pub struct EditorSession {
    customizations: BTreeMap<String, String>,
    uploads: HashMap<String, UploadedImage>,
    selected: Option<String>,
    drag: Option<DragSession>,
}

impl EditorSession {
    /// Seeds customization values from the schema's element defaults, then
    /// applies the scheme flagged as default, if any.
    ///
    /// Seeding happens exactly once; later edits are never silently reset.
    pub fn from_schema(schema: &CustomizationSchema) -> Self {
        let mut customizations = BTreeMap::new();
        for element in schema.visible_elements() {
            if let Some(value) = &element.default_value {
                customizations.insert(element.element_id.clone(), value.clone());
            }
        }
        let mut session = Self {
            customizations,
            ..Self::default()
        };
        if let Some(default) = schema.default_scheme() {
            let name = default.name.clone();
            session.apply_scheme(schema, &name);
        }
        log::debug!(
            "session seeded with {} customization values",
            session.customizations.len()
        );
        session
    }

    // ---- customization values ----

    pub fn customizations(&self) -> &BTreeMap<String, String> {
        &self.customizations
    }

    pub fn value(&self, element_id: &str) -> Option<&str> {
        self.customizations.get(element_id).map(String::as_str)
    }

    /// Sets one element's value. Returns false (and changes nothing) for
    /// unknown or reserved elements. Text values are truncated to the
    /// element's `max_length` constraint.
    pub fn set_value(&mut self, schema: &CustomizationSchema, element_id: &str, value: &str) -> bool {
        let Some(element) = schema.element(element_id) else {
            return false;
        };
        if element.is_reserved() {
            return false;
        }
        let value = match element.constraints.max_length {
            Some(max) => value.chars().take(max).collect(),
            None => value.to_string(),
        };
        self.customizations.insert(element_id.to_string(), value);
        true
    }

    /// Applies a named color scheme as one atomic state transition.
    ///
    /// Returns false when the scheme does not exist; no value changes.
    pub fn apply_scheme(&mut self, schema: &CustomizationSchema, scheme_name: &str) -> bool {
        match scheme::apply_scheme(
            scheme_name,
            &schema.elements,
            &schema.color_schemes,
            &self.customizations,
        ) {
            Some(next) => {
                self.customizations = next;
                true
            }
            None => false,
        }
    }

    // ---- uploaded artwork ----

    /// Attaches a decoded bitmap to an image element, replacing any prior
    /// upload (and its drag override).
    pub fn attach_upload(&mut self, element_id: &str, upload: UploadedImage) {
        self.uploads.insert(element_id.to_string(), upload);
    }

    pub fn upload(&self, element_id: &str) -> Option<&UploadedImage> {
        self.uploads.get(element_id)
    }

    pub fn uploads(&self) -> impl Iterator<Item = (&String, &UploadedImage)> {
        self.uploads.iter()
    }

    /// The element's effective design-space position: the drag override for
    /// an image element holding a bitmap, the schema constraint otherwise.
    pub fn element_position(&self, element: &Element) -> Point {
        if element.element_type == ElementKind::Image {
            if let Some(upload) = self.uploads.get(&element.element_id) {
                if let Some(position) = upload.position_override {
                    return position;
                }
            }
        }
        element.constraints.position
    }

    // ---- selection and drag ----

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn select(&mut self, element_id: Option<String>) {
        self.selected = element_id;
    }

    pub fn drag(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    pub(crate) fn begin_drag(&mut self, element_id: &str, pointer_offset: Point) {
        self.drag = Some(DragSession {
            element_id: element_id.to_string(),
            pointer_offset,
        });
    }

    /// Moves the dragged element so it stays under the pointer grab point.
    /// No bounds clamping: artwork may leave the package outline.
    pub(crate) fn drag_to(&mut self, pointer_design: Point) -> bool {
        let Some(drag) = &self.drag else {
            return false;
        };
        let position = pointer_design - drag.pointer_offset;
        if let Some(upload) = self.uploads.get_mut(&drag.element_id) {
            upload.position_override = Some(position);
            true
        } else {
            false
        }
    }

    pub(crate) fn end_drag(&mut self) {
        self.drag = None;
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::{ColorScheme, ElementConstraints, SchemeColor};

    fn schema_with_defaults() -> CustomizationSchema {
        CustomizationSchema {
            elements: vec![
                Element {
                    element_id: "brand-name".into(),
                    label: "Brand Name".into(),
                    element_type: ElementKind::Text,
                    constraints: ElementConstraints {
                        max_length: Some(5),
                        ..Default::default()
                    },
                    default_value: Some("Lotus".into()),
                },
                Element {
                    element_id: "background-color".into(),
                    label: "Background".into(),
                    element_type: ElementKind::Color,
                    constraints: ElementConstraints::default(),
                    default_value: Some("#FFFFFF".into()),
                },
                Element {
                    element_id: "mascot".into(),
                    label: "Brand Mascot".into(),
                    element_type: ElementKind::Text,
                    constraints: ElementConstraints::default(),
                    default_value: Some("hidden".into()),
                },
            ],
            color_schemes: vec![ColorScheme {
                name: "Ocean".into(),
                is_default: true,
                colors: vec![SchemeColor {
                    name: "Deep Blue".into(),
                    hex: "#1A5276".into(),
                    application: Some("Background".into()),
                }],
            }],
        }
    }

    #[test]
    fn seeding_skips_reserved_elements_and_applies_default_scheme() {
        let schema = schema_with_defaults();
        let session = EditorSession::from_schema(&schema);

        assert_eq!(session.value("brand-name"), Some("Lotus"));
        assert_eq!(session.value("mascot"), None, "reserved slots never seed");
        assert_eq!(
            session.value("background-color"),
            Some("#1A5276"),
            "default scheme overrides the seeded value"
        );
    }

    #[test]
    fn set_value_truncates_to_max_length() {
        let schema = schema_with_defaults();
        let mut session = EditorSession::from_schema(&schema);

        assert!(session.set_value(&schema, "brand-name", "Sunflower"));
        assert_eq!(session.value("brand-name"), Some("Sunfl"));
    }

    #[test]
    fn set_value_rejects_unknown_and_reserved_ids() {
        let schema = schema_with_defaults();
        let mut session = EditorSession::from_schema(&schema);

        assert!(!session.set_value(&schema, "nope", "x"));
        assert!(!session.set_value(&schema, "mascot", "x"));
        assert_eq!(session.value("mascot"), None);
    }

    #[test]
    fn unknown_scheme_changes_nothing() {
        let schema = schema_with_defaults();
        let mut session = EditorSession::from_schema(&schema);
        let before = session.customizations().clone();

        assert!(!session.apply_scheme(&schema, "Nonexistent"));
        assert_eq!(*session.customizations(), before);
    }

    #[test]
    fn image_position_prefers_drag_override() {
        let element = Element {
            element_id: "art".into(),
            label: "Artwork".into(),
            element_type: ElementKind::Image,
            constraints: ElementConstraints {
                position: Point::new(10.0, 10.0),
                ..Default::default()
            },
            default_value: None,
        };

        let mut session = EditorSession::default();
        assert_eq!(session.element_position(&element), Point::new(10.0, 10.0));

        let mut upload = UploadedImage::new(RgbaImage::new(4, 4), UploadSource::default());
        upload.position_override = Some(Point::new(30.0, 20.0));
        session.attach_upload("art", upload);
        assert_eq!(session.element_position(&element), Point::new(30.0, 20.0));
    }
}
