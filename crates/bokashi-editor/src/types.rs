//! Shared geometry and input types for the mask editor.

use serde::{Deserialize, Serialize};

/// Canvas resolution in pixels.
///
/// Zero is a legal value at session start, before the first preview
/// frame has sized the canvas; the transform functions substitute 1 for
/// zero dimensions so no division can fail.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Dimensions {
    /// Create a new dimension pair.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// A point in canvas pixel space: `[0, width] × [0, height]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasPoint {
    /// Horizontal position (pixels from the canvas left edge).
    pub x: f64,
    /// Vertical position (pixels from the canvas top edge).
    pub y: f64,
}

impl CanvasPoint {
    /// Create a new canvas-space point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A point in normalized mask space: each axis a fraction of the canvas
/// dimension, in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormPoint {
    /// Horizontal fraction of canvas width.
    pub x: f64,
    /// Vertical fraction of canvas height.
    pub y: f64,
}

impl NormPoint {
    /// Create a new normalized point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A rectangular privacy mask in normalized coordinates.
///
/// `x`/`y` are the top-left origin as fractions of canvas width/height;
/// `w`/`h` are the extent fractions. Committed masks always satisfy
/// `0 <= x`, `0 <= y`, `x + w <= 1`, `y + h <= 1`, and both extents at
/// least [`crate::transform::MIN_NORM_EXTENT`].
///
/// Serializes as `{x, y, w, h}`, the shape the backend consumes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormRect {
    /// Left edge as a fraction of canvas width.
    pub x: f64,
    /// Top edge as a fraction of canvas height.
    pub y: f64,
    /// Width as a fraction of canvas width.
    pub w: f64,
    /// Height as a fraction of canvas height.
    pub h: f64,
}

impl NormRect {
    /// Create a new normalized rectangle.
    #[must_use]
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Whether the point lies inside the rectangle, edges inclusive.
    #[must_use]
    pub fn contains(&self, p: NormPoint) -> bool {
        p.x >= self.x && p.x <= self.x + self.w && p.y >= self.y && p.y <= self.y + self.h
    }
}

/// A rectangle in canvas pixel space, ready for stroking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PxRect {
    /// Left edge in pixels.
    pub x: f64,
    /// Top edge in pixels.
    pub y: f64,
    /// Width in pixels.
    pub w: f64,
    /// Height in pixels.
    pub h: f64,
}

/// The canvas element's on-screen bounding box in CSS pixels.
///
/// Captured from `getBoundingClientRect` at the IO boundary. The
/// displayed size can differ from the canvas's intrinsic resolution
/// under responsive layout, which is why client coordinates must be
/// rescaled before any rectangle math.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewRect {
    /// Left edge in client (viewport) coordinates.
    pub left: f64,
    /// Top edge in client (viewport) coordinates.
    pub top: f64,
    /// Displayed width in CSS pixels.
    pub width: f64,
    /// Displayed height in CSS pixels.
    pub height: f64,
}

impl ViewRect {
    /// Create a new view rectangle.
    #[must_use]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// A pointer position in client (viewport) coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClientPoint {
    /// Horizontal position relative to the viewport.
    pub x: f64,
    /// Vertical position relative to the viewport.
    pub y: f64,
}

impl ClientPoint {
    /// Create a new client-space point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A pointer event's origin, unified at the IO boundary.
///
/// Mouse/pen events carry their own client coordinates; touch events
/// contribute the *first* touch point. Downstream code never branches
/// on the source again; [`ClientInput::position`] is the only way in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClientInput {
    /// A mouse or pen pointer position.
    Mouse(ClientPoint),
    /// The first touch point of a touch event.
    Touch(ClientPoint),
}

impl ClientInput {
    /// A mouse/pen input at the given client coordinates.
    #[must_use]
    pub const fn mouse(x: f64, y: f64) -> Self {
        Self::Mouse(ClientPoint::new(x, y))
    }

    /// A touch input at the given (first touch point) client coordinates.
    #[must_use]
    pub const fn touch(x: f64, y: f64) -> Self {
        Self::Touch(ClientPoint::new(x, y))
    }

    /// The client-space position, regardless of input source.
    #[must_use]
    pub const fn position(self) -> ClientPoint {
        match self {
            Self::Mouse(p) | Self::Touch(p) => p,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn dimensions_default_is_zero() {
        let d = Dimensions::default();
        assert_eq!(d, Dimensions::new(0, 0));
    }

    #[test]
    fn rect_contains_interior_point() {
        let r = NormRect::new(0.1, 0.2, 0.3, 0.4);
        assert!(r.contains(NormPoint::new(0.25, 0.4)));
    }

    #[test]
    fn rect_contains_is_edge_inclusive() {
        let r = NormRect::new(0.1, 0.2, 0.3, 0.4);
        assert!(r.contains(NormPoint::new(0.1, 0.2)));
        assert!(r.contains(NormPoint::new(0.4, 0.6)));
    }

    #[test]
    fn rect_excludes_outside_point() {
        let r = NormRect::new(0.1, 0.2, 0.3, 0.4);
        assert!(!r.contains(NormPoint::new(0.05, 0.4)));
        assert!(!r.contains(NormPoint::new(0.25, 0.61)));
    }

    #[test]
    fn client_input_position_ignores_source() {
        let p = ClientPoint::new(12.5, 34.0);
        assert_eq!(ClientInput::Mouse(p).position(), p);
        assert_eq!(ClientInput::Touch(p).position(), p);
    }

    #[test]
    fn norm_rect_serializes_as_flat_object() {
        let r = NormRect::new(0.1, 0.2, 0.3, 0.4);
        let json = serde_json::to_string(&r).unwrap();
        assert_eq!(json, r#"{"x":0.1,"y":0.2,"w":0.3,"h":0.4}"#);
    }

    #[test]
    fn norm_rect_serde_round_trip() {
        let r = NormRect::new(0.15625, 0.2777, 0.3125, 0.4166);
        let json = serde_json::to_string(&r).unwrap();
        let back: NormRect = serde_json::from_str(&json).unwrap();
        assert_eq!(r, back);
    }
}
