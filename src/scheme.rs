//! Color scheme application.
//!
//! A scheme rewrites the values of color-type elements in one atomic step.
//! Matching is two-tier: a color whose `application` tag equals the element
//! label (case-insensitive) wins outright; otherwise the first color whose
//! name and the label overlap as substrings is used. Scheme order decides
//! ties within a tier. Elements with no match keep their prior values.

use std::collections::BTreeMap;

use crate::template::{ColorScheme, Element, ElementKind, SchemeColor};

/// Builds the customization state that results from applying `scheme_name`.
///
/// Returns `None` when no scheme carries that name (the current state stays
/// in effect). Only color-type, non-reserved elements are ever rewritten.
pub fn apply_scheme(
    scheme_name: &str,
    elements: &[Element],
    schemes: &[ColorScheme],
    current: &BTreeMap<String, String>,
) -> Option<BTreeMap<String, String>> {
    let scheme = schemes
        .iter()
        .find(|s| s.name.eq_ignore_ascii_case(scheme_name))?;

    let mut next = current.clone();
    for element in elements {
        if element.element_type != ElementKind::Color || element.is_reserved() {
            continue;
        }
        if let Some(color) = match_scheme_color(scheme, &element.label) {
            next.insert(element.element_id.clone(), color.hex.clone());
        }
    }
    Some(next)
}

/// Two-tier lookup: exact application tag first, then name/label substring.
fn match_scheme_color<'a>(scheme: &'a ColorScheme, label: &str) -> Option<&'a SchemeColor> {
    scheme
        .colors
        .iter()
        .find(|c| {
            c.application
                .as_deref()
                .is_some_and(|tag| tag.eq_ignore_ascii_case(label))
        })
        .or_else(|| {
            let label = label.to_lowercase();
            scheme.colors.iter().find(|c| {
                let name = c.name.to_lowercase();
                name.contains(&label) || label.contains(&name)
            })
        })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::ElementConstraints;

    fn color_element(id: &str, label: &str) -> Element {
        Element {
            element_id: id.into(),
            label: label.into(),
            element_type: ElementKind::Color,
            constraints: ElementConstraints::default(),
            default_value: None,
        }
    }

    fn text_element(id: &str, label: &str) -> Element {
        Element {
            element_id: id.into(),
            label: label.into(),
            element_type: ElementKind::Text,
            constraints: ElementConstraints::default(),
            default_value: None,
        }
    }

    fn forest_scheme() -> ColorScheme {
        ColorScheme {
            name: "Forest".into(),
            is_default: false,
            colors: vec![
                SchemeColor {
                    name: "Moss".into(),
                    hex: "#4A6B3A".into(),
                    application: Some("Main Color".into()),
                },
                SchemeColor {
                    name: "Background Cream".into(),
                    hex: "#F5F0E1".into(),
                    application: None,
                },
            ],
        }
    }

    #[test]
    fn exact_application_tag_beats_substring() {
        let elements = vec![color_element("main-color", "Main Color")];
        let current = BTreeMap::new();

        let next = apply_scheme("Forest", &elements, &[forest_scheme()], &current).unwrap();
        assert_eq!(next["main-color"], "#4A6B3A");
    }

    #[test]
    fn falls_back_to_substring_on_color_name() {
        let elements = vec![color_element("background-color", "Background")];
        let current = BTreeMap::new();

        let next = apply_scheme("Forest", &elements, &[forest_scheme()], &current).unwrap();
        assert_eq!(next["background-color"], "#F5F0E1");
    }

    #[test]
    fn only_color_elements_change() {
        let elements = vec![
            color_element("main-color", "Main Color"),
            text_element("brand-name", "Main Color Label"),
        ];
        let mut current = BTreeMap::new();
        current.insert("brand-name".to_string(), "Acme".to_string());
        current.insert("main-color".to_string(), "#000000".to_string());

        let next = apply_scheme("Forest", &elements, &[forest_scheme()], &current).unwrap();
        assert_eq!(next["brand-name"], "Acme", "text values are never rewritten");
        assert_eq!(next["main-color"], "#4A6B3A");
    }

    #[test]
    fn unmatched_elements_keep_prior_values() {
        let elements = vec![color_element("accent-color", "Zigzag Accent")];
        let mut current = BTreeMap::new();
        current.insert("accent-color".to_string(), "#123456".to_string());

        let next = apply_scheme("Forest", &elements, &[forest_scheme()], &current).unwrap();
        assert_eq!(next["accent-color"], "#123456");
    }

    #[test]
    fn unknown_scheme_returns_none() {
        let elements = vec![color_element("main-color", "Main Color")];
        assert!(apply_scheme("Winter", &elements, &[forest_scheme()], &BTreeMap::new()).is_none());
    }

    #[test]
    fn scheme_name_matching_ignores_case() {
        let elements = vec![color_element("main-color", "Main Color")];
        let next = apply_scheme("forest", &elements, &[forest_scheme()], &BTreeMap::new());
        assert!(next.is_some());
    }

    #[test]
    fn first_color_in_scheme_order_wins_ties() {
        let scheme = ColorScheme {
            name: "Twins".into(),
            is_default: false,
            colors: vec![
                SchemeColor {
                    name: "Accent A".into(),
                    hex: "#111111".into(),
                    application: None,
                },
                SchemeColor {
                    name: "Accent B".into(),
                    hex: "#222222".into(),
                    application: None,
                },
            ],
        };
        let elements = vec![color_element("accent-color", "Accent")];
        let next = apply_scheme("Twins", &elements, &[scheme], &BTreeMap::new()).unwrap();
        assert_eq!(next["accent-color"], "#111111");
    }
}
