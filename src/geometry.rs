//! Design-space and device-space geometry.
//!
//! A template's native coordinate system ("design space") is defined by its
//! standard dimensions. The rendered surface lives in pixel coordinates
//! ("device space"). A single uniform scale factor maps between the two,
//! applied identically on both axes.

use serde::{Deserialize, Serialize};

// ============================================================================
// Point
// ============================================================================

/// A 2D point, in design or device coordinates depending on context.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "tsify",
    derive(tsify_next::Tsify),
    tsify(into_wasm_abi, from_wasm_abi)
)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Maps a design-space point into device space.
    pub fn to_device(self, scale: f32) -> Self {
        Self::new(self.x * scale, self.y * scale)
    }

    /// Maps a device-space point back into design space.
    pub fn to_design(self, scale: f32) -> Self {
        Self::new(self.x / scale, self.y / scale)
    }
}

impl std::ops::Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

// ============================================================================
// Rect
// ============================================================================

/// An axis-aligned rectangle (min corner plus size).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle of the given size centered on a point.
    pub fn from_center(center: Point, width: f32, height: f32) -> Self {
        Self::new(center.x - width / 2.0, center.y - height / 2.0, width, height)
    }

    /// Returns the right edge coordinate (x + width).
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Returns the bottom edge coordinate (y + height).
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Returns the rectangle shrunk by `amount` on every side.
    pub fn inset(&self, amount: f32) -> Self {
        Self::new(
            self.x + amount,
            self.y + amount,
            (self.width - 2.0 * amount).max(0.0),
            (self.height - 2.0 * amount).max(0.0),
        )
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// Maps a design-space rectangle into device space.
    pub fn to_device(&self, scale: f32) -> Self {
        Self::new(
            self.x * scale,
            self.y * scale,
            self.width * scale,
            self.height * scale,
        )
    }
}

// ============================================================================
// Scale
// ============================================================================

/// Computes the uniform view scale that fits a design size into a view box.
///
/// The result is the smallest of the two axis ratios and `cap`, so the scaled
/// design never overflows the view on either axis and never exceeds the cap.
/// Degenerate design dimensions (zero, negative, or non-finite) fall back to
/// a scale of 1.0 so rendering can continue.
pub fn compute_scale(
    design_w: f32,
    design_h: f32,
    max_view_w: f32,
    max_view_h: f32,
    cap: f32,
) -> f32 {
    if !(design_w > 0.0) || !(design_h > 0.0) || !design_w.is_finite() || !design_h.is_finite() {
        return 1.0;
    }
    (max_view_w / design_w)
        .min(max_view_h / design_h)
        .min(cap)
}

// ============================================================================
// Tests
// ============================================================================
