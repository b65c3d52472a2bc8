//! Pure render-data builder for the repaint loop.
//!
//! The repaint loop itself lives in the IO crate; this module computes
//! *what* it should stroke each tick so the overlay contents are
//! testable without a canvas.

use crate::session::EditorSession;
use crate::transform;
use crate::types::PxRect;

/// Stroke width for every mask outline, in canvas pixels.
pub const STROKE_WIDTH: f64 = 2.0;

/// Outline color for committed masks.
pub const MASK_STROKE: &str = "lime";

/// Outline color for the in-progress rectangle.
pub const DRAFT_STROKE: &str = "yellow";

/// Dash pattern distinguishing the uncommitted rectangle.
pub const DRAFT_DASH: [f64; 2] = [6.0, 4.0];

/// Everything the repaint loop strokes on top of the preview frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// Committed masks in draw order, converted to canvas pixels.
    pub committed: Vec<PxRect>,
    /// The uncommitted rectangle, present only mid-draw.
    pub in_progress: Option<PxRect>,
}

/// Project the session's current state into pixel-space stroke data.
///
/// Deterministic: identical session state yields an identical scene.
#[must_use]
pub fn build_scene(session: &EditorSession) -> Scene {
    let canvas = session.canvas();
    Scene {
        committed: session
            .masks()
            .list()
            .iter()
            .map(|rect| transform::normalized_to_pixel(rect, canvas))
            .collect(),
        in_progress: session
            .in_progress()
            .map(|rect| transform::normalized_to_pixel(&rect, canvas)),
    }
}
