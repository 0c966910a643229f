//! Template and customization schema wire model.
//!
//! These types mirror the JSON records delivered by the collaborator layer
//! (template catalog, schema editor). All field names serialize camelCase.
//!
//! # Example
//!
//! ```
//! use packmock_renderer::CustomizationSchema;
//!
//! let schema = CustomizationSchema::from_json(r#"{
//!     "elements": [
//!         { "elementId": "brand-name", "label": "Brand Name", "elementType": "text" }
//!     ],
//!     "colorSchemes": []
//! }"#).unwrap();
//!
//! assert_eq!(schema.visible_elements().count(), 1);
//! ```

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

// ============================================================================
// Template
// ============================================================================

/// A package template record.
///
/// `sub_category` selects the shape drawing strategy;
/// `standard_dimensions` define the design coordinate space.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "tsify",
    derive(tsify_next::Tsify),
    tsify(into_wasm_abi, from_wasm_abi)
)]
pub struct Template {
    pub id: String,
    pub name: String,
    pub category: String,
    pub sub_category: String,
    pub standard_dimensions: Dimensions,
}

impl Template {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Width and height in design units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "tsify",
    derive(tsify_next::Tsify),
    tsify(into_wasm_abi, from_wasm_abi)
)]
pub struct Dimensions {
    pub width: f32,
    pub height: f32,
}

// ============================================================================
// CustomizationSchema
// ============================================================================

/// The set of editable elements and color schemes for one template.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "tsify",
    derive(tsify_next::Tsify),
    tsify(into_wasm_abi, from_wasm_abi)
)]
pub struct CustomizationSchema {
    #[serde(default)]
    pub elements: Vec<Element>,
    #[serde(default)]
    pub color_schemes: Vec<ColorScheme>,
}

impl CustomizationSchema {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Elements that take part in rendering and editing, in schema order.
    ///
    /// Character and mascot art slots are reserved and never rendered,
    /// hit-tested, or edited.
    pub fn visible_elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(|e| !e.is_reserved())
    }

    pub fn element(&self, element_id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.element_id == element_id)
    }

    /// The first scheme flagged as the default, if any.
    pub fn default_scheme(&self) -> Option<&ColorScheme> {
        self.color_schemes.iter().find(|s| s.is_default)
    }
}

// ============================================================================
// Element
// ============================================================================

/// The editable kind of a schema element.
///
/// Unknown kind strings deserialize as [`ElementKind::Other`] so a newer
/// schema never fails to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "tsify",
    derive(tsify_next::Tsify),
    tsify(into_wasm_abi, from_wasm_abi)
)]
pub enum ElementKind {
    Text,
    Color,
    Logo,
    Image,
    Other,
}

impl ElementKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ElementKind::Text => "text",
            ElementKind::Color => "color",
            ElementKind::Logo => "logo",
            ElementKind::Image => "image",
            ElementKind::Other => "other",
        }
    }
}

impl Serialize for ElementKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ElementKind {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.to_lowercase().as_str() {
            "text" => ElementKind::Text,
            "color" => ElementKind::Color,
            "logo" => ElementKind::Logo,
            "image" => ElementKind::Image,
            _ => ElementKind::Other,
        })
    }
}

impl Default for ElementKind {
    fn default() -> Self {
        ElementKind::Other
    }
}

/// A single customizable region of a template.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "tsify",
    derive(tsify_next::Tsify),
    tsify(into_wasm_abi, from_wasm_abi)
)]
pub struct Element {
    pub element_id: String,
    pub label: String,
    pub element_type: ElementKind,
    #[serde(default)]
    pub constraints: ElementConstraints,
    #[serde(default)]
    pub default_value: Option<String>,
}

impl Element {
    /// True for permanently reserved slots (labels naming character or
    /// mascot art), which are excluded from rendering and editing.
    pub fn is_reserved(&self) -> bool {
        let label = self.label.to_lowercase();
        label.contains("character") || label.contains("mascot")
    }
}

/// Layout and input constraints for an element.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "tsify",
    derive(tsify_next::Tsify),
    tsify(into_wasm_abi, from_wasm_abi)
)]
pub struct ElementConstraints {
    /// Center of the element's bounding box, in design units.
    #[serde(default)]
    pub position: Point,
    #[serde(default)]
    pub font_size: FontSizeRange,
    #[serde(default)]
    pub max_length: Option<usize>,
    #[serde(default)]
    pub color_options: Vec<String>,
}

/// Allowed font size range for text elements, in design units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "tsify",
    derive(tsify_next::Tsify),
    tsify(into_wasm_abi, from_wasm_abi)
)]
pub struct FontSizeRange {
    pub min: f32,
    pub max: f32,
}

impl Default for FontSizeRange {
    fn default() -> Self {
        Self { min: 8.0, max: 24.0 }
    }
}

// ============================================================================
// ColorScheme
// ============================================================================

/// A named bundle of hex colors applicable to color-type elements.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "tsify",
    derive(tsify_next::Tsify),
    tsify(into_wasm_abi, from_wasm_abi)
)]
pub struct ColorScheme {
    pub name: String,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub colors: Vec<SchemeColor>,
}

/// One color inside a scheme.
///
/// `application` is an optional tag naming the element label this color is
/// meant for; when absent, matching falls back to the color name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "tsify",
    derive(tsify_next::Tsify),
    tsify(into_wasm_abi, from_wasm_abi)
)]
pub struct SchemeColor {
    pub name: String,
    pub hex: String,
    #[serde(default)]
    pub application: Option<String>,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_schema_json() -> &'static str {
        r##"{
            "elements": [
                {
                    "elementId": "brand-name",
                    "label": "Brand Name",
                    "elementType": "text",
                    "constraints": {
                        "position": { "x": 100.0, "y": 40.0 },
                        "fontSize": { "min": 10.0, "max": 22.0 },
                        "maxLength": 24
                    },
                    "defaultValue": "Golden Harvest"
                },
                {
                    "elementId": "background-color",
                    "label": "Background",
                    "elementType": "color",
                    "defaultValue": "#FFFFFF"
                },
                {
                    "elementId": "mascot-art",
                    "label": "Brand Mascot",
                    "elementType": "image"
                }
            ],
            "colorSchemes": [
                {
                    "name": "Autumn",
                    "isDefault": true,
                    "colors": [
                        { "name": "Pumpkin", "hex": "#D35400", "application": "Background" }
                    ]
                }
            ]
        }"##
    }

    #[test]
    fn schema_deserializes_camel_case() {
        let schema = CustomizationSchema::from_json(sample_schema_json()).unwrap();
        assert_eq!(schema.elements.len(), 3);
        assert_eq!(schema.elements[0].element_type, ElementKind::Text);
        assert_eq!(schema.elements[0].constraints.position.x, 100.0);
        assert_eq!(schema.elements[0].constraints.max_length, Some(24));
        assert!(schema.color_schemes[0].is_default);
    }

    #[test]
    fn reserved_labels_are_filtered() {
        let schema = CustomizationSchema::from_json(sample_schema_json()).unwrap();
        let visible: Vec<_> = schema
            .visible_elements()
            .map(|e| e.element_id.as_str())
            .collect();
        assert_eq!(visible, vec!["brand-name", "background-color"]);
        assert!(
            !visible.contains(&"mascot-art"),
            "mascot slots must never be editable"
        );
    }

    #[test]
    fn reserved_check_is_case_insensitive() {
        let element = Element {
            element_id: "c1".into(),
            label: "Main CHARACTER artwork".into(),
            element_type: ElementKind::Image,
            constraints: ElementConstraints::default(),
            default_value: None,
        };
        assert!(element.is_reserved());
    }

    #[test]
    fn unknown_element_kind_becomes_other() {
        let element: Element = serde_json::from_str(
            r#"{ "elementId": "x", "label": "X", "elementType": "hologram" }"#,
        )
        .unwrap();
        assert_eq!(element.element_type, ElementKind::Other);
    }

    #[test]
    fn element_kind_serializes_lowercase() {
        let json = serde_json::to_string(&ElementKind::Image).unwrap();
        assert_eq!(json, "\"image\"");
    }

    #[test]
    fn missing_constraints_use_defaults() {
        let element: Element =
            serde_json::from_str(r#"{ "elementId": "t", "label": "T", "elementType": "text" }"#)
                .unwrap();
        assert_eq!(element.constraints.font_size.min, 8.0);
        assert_eq!(element.constraints.font_size.max, 24.0);
        assert_eq!(element.constraints.position, Point::default());
    }

    #[test]
    fn default_scheme_lookup() {
        let schema = CustomizationSchema::from_json(sample_schema_json()).unwrap();
        assert_eq!(schema.default_scheme().unwrap().name, "Autumn");
        assert!(CustomizationSchema::default().default_scheme().is_none());
    }
}
