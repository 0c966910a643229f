//! Pointer interaction: hit-testing and the select/drag machine.
//!
//! The machine has three states: idle (nothing selected), selected, and
//! dragging. Pointer events arrive in device coordinates and are converted
//! to design space before hit-testing. Only image elements holding an
//! uploaded bitmap are draggable; every other element has a fixed position.

use crate::elements::element_bounds;
use crate::geometry::Point;
use crate::session::EditorSession;
use crate::template::{CustomizationSchema, ElementKind};

/// Outcome of a pointer-down dispatch, for the host to act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerResponse {
    /// Nothing was hit; the selection was cleared.
    Miss,
    /// An element was selected.
    Selected(String),
    /// A bitmap-backed image element was grabbed and is now dragging.
    DragStarted(String),
    /// An empty image slot was hit; the host should open its file picker.
    /// The slot is also selected.
    OpenFilePicker(String),
}

/// Handles a pointer press at `point_device`.
///
/// Elements are scanned in schema order and the first bounding-box hit wins.
pub fn pointer_down(
    session: &mut EditorSession,
    schema: &CustomizationSchema,
    point_device: Point,
    scale: f32,
) -> PointerResponse {
    let point = point_device.to_design(scale);

    for element in schema.visible_elements() {
        let position = session.element_position(element);
        if !element_bounds(element, position).contains(point) {
            continue;
        }

        let id = element.element_id.clone();
        session.select(Some(id.clone()));

        if element.element_type == ElementKind::Image {
            if session.upload(&id).is_some() {
                session.begin_drag(&id, point - position);
                return PointerResponse::DragStarted(id);
            }
            return PointerResponse::OpenFilePicker(id);
        }
        return PointerResponse::Selected(id);
    }

    session.select(None);
    PointerResponse::Miss
}

/// Handles pointer movement. Only effective while dragging; repositions the
/// grabbed artwork so it stays under the pointer. Returns true when state
/// changed and a redraw is due.
pub fn pointer_move(
    session: &mut EditorSession,
    point_device: Point,
    scale: f32,
) -> bool {
    if session.drag().is_none() {
        return false;
    }
    session.drag_to(point_device.to_design(scale))
}

/// Handles pointer release: dragging collapses back to selected.
pub fn pointer_up(session: &mut EditorSession) {
    session.end_drag();
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{UploadSource, UploadedImage};
    use crate::template::{Element, ElementConstraints};
    use image::RgbaImage;

    fn image_element(id: &str, label: &str, x: f32, y: f32) -> Element {
        Element {
            element_id: id.into(),
            label: label.into(),
            element_type: ElementKind::Image,
            constraints: ElementConstraints {
                position: Point::new(x, y),
                ..Default::default()
            },
            default_value: None,
        }
    }

    fn text_element(id: &str, x: f32, y: f32) -> Element {
        Element {
            element_id: id.into(),
            label: id.into(),
            element_type: ElementKind::Text,
            constraints: ElementConstraints {
                position: Point::new(x, y),
                ..Default::default()
            },
            default_value: None,
        }
    }

    fn schema(elements: Vec<Element>) -> CustomizationSchema {
        CustomizationSchema {
            elements,
            color_schemes: Vec::new(),
        }
    }

    fn upload() -> UploadedImage {
        UploadedImage::new(RgbaImage::new(4, 4), UploadSource::default())
    }

    #[test]
    fn drag_repositions_by_grab_offset() {
        let schema = schema(vec![image_element("art", "Artwork", 10.0, 10.0)]);
        let mut session = EditorSession::from_schema(&schema);
        session.attach_upload("art", upload());

        let response = pointer_down(&mut session, &schema, Point::new(15.0, 15.0), 1.0);
        assert_eq!(response, PointerResponse::DragStarted("art".into()));
        assert_eq!(
            session.drag().unwrap().pointer_offset,
            Point::new(5.0, 5.0)
        );

        assert!(pointer_move(&mut session, Point::new(35.0, 25.0), 1.0));
        assert_eq!(
            session.upload("art").unwrap().position_override,
            Some(Point::new(30.0, 20.0))
        );

        pointer_up(&mut session);
        assert!(session.drag().is_none());
        assert_eq!(session.selected(), Some("art"), "drag ends in selected");
    }

    #[test]
    fn drag_is_unclamped_beyond_the_outline() {
        let schema = schema(vec![image_element("art", "Artwork", 10.0, 10.0)]);
        let mut session = EditorSession::from_schema(&schema);
        session.attach_upload("art", upload());

        pointer_down(&mut session, &schema, Point::new(10.0, 10.0), 1.0);
        pointer_move(&mut session, Point::new(-500.0, 9000.0), 1.0);
        assert_eq!(
            session.upload("art").unwrap().position_override,
            Some(Point::new(-500.0, 9000.0))
        );
    }

    #[test]
    fn empty_image_slot_requests_file_picker() {
        let schema = schema(vec![image_element("art", "Artwork", 10.0, 10.0)]);
        let mut session = EditorSession::from_schema(&schema);

        let response = pointer_down(&mut session, &schema, Point::new(10.0, 10.0), 1.0);
        assert_eq!(response, PointerResponse::OpenFilePicker("art".into()));
        assert_eq!(session.selected(), Some("art"), "slot still gets selected");
        assert!(session.drag().is_none());
    }

    #[test]
    fn text_elements_select_but_never_drag() {
        let schema = schema(vec![text_element("title", 50.0, 50.0)]);
        let mut session = EditorSession::from_schema(&schema);

        let response = pointer_down(&mut session, &schema, Point::new(50.0, 50.0), 1.0);
        assert_eq!(response, PointerResponse::Selected("title".into()));

        assert!(!pointer_move(&mut session, Point::new(90.0, 90.0), 1.0));
    }

    #[test]
    fn first_hit_in_schema_order_wins() {
        let schema = schema(vec![
            text_element("under", 50.0, 50.0),
            text_element("over", 50.0, 50.0),
        ]);
        let mut session = EditorSession::from_schema(&schema);

        let response = pointer_down(&mut session, &schema, Point::new(50.0, 50.0), 1.0);
        assert_eq!(response, PointerResponse::Selected("under".into()));
    }

    #[test]
    fn reserved_elements_never_hit() {
        let schema = schema(vec![image_element("mascot", "Brand Mascot", 50.0, 50.0)]);
        let mut session = EditorSession::from_schema(&schema);

        let response = pointer_down(&mut session, &schema, Point::new(50.0, 50.0), 1.0);
        assert_eq!(response, PointerResponse::Miss);
        assert_eq!(session.selected(), None);
    }

    #[test]
    fn miss_clears_selection() {
        let schema = schema(vec![text_element("title", 50.0, 50.0)]);
        let mut session = EditorSession::from_schema(&schema);
        pointer_down(&mut session, &schema, Point::new(50.0, 50.0), 1.0);
        assert!(session.selected().is_some());

        pointer_down(&mut session, &schema, Point::new(500.0, 500.0), 1.0);
        assert_eq!(session.selected(), None);
    }

    #[test]
    fn device_points_convert_through_scale() {
        let schema = schema(vec![text_element("title", 50.0, 50.0)]);
        let mut session = EditorSession::from_schema(&schema);

        // Device (100, 100) at scale 2 is design (50, 50).
        let response = pointer_down(&mut session, &schema, Point::new(100.0, 100.0), 2.0);
        assert_eq!(response, PointerResponse::Selected("title".into()));
    }
}
