//! The pointer interaction state machine and its owning session.
//!
//! [`EditorSession`] owns every mutable piece of the editor core: the
//! committed mask list, the transient interaction state, and the canvas
//! resolution. There are no ambient globals; IO layers hold one session
//! per canvas and feed it already-converted canvas-pixel points.
//!
//! The machine runs deferred-commit and normalized-everywhere: a new
//! rectangle lives only inside the `Drawing` state until release, so
//! nothing degenerate is ever visible to the mask list or the sync
//! channel, and all geometry past the input boundary is in `[0, 1]`
//! mask space.

use crate::hit;
use crate::masks::MaskList;
use crate::transform::{self, COMMIT_MIN_PX, MIN_NORM_EXTENT};
use crate::types::{CanvasPoint, Dimensions, NormPoint, NormRect};

/// Transient pointer state. Exactly one variant is live at a time and
/// none survives pointer release.
#[derive(Debug, Clone, PartialEq)]
enum Interaction {
    /// No button/finger down.
    Idle,
    /// Dragging out a new rectangle from `anchor`. `rect` stays `None`
    /// until the first move, which is how a motionless click is told
    /// apart from a real (if tiny) drag.
    Drawing {
        anchor: NormPoint,
        rect: Option<NormRect>,
    },
    /// Moving the existing mask at `index`. `grab` is the offset from
    /// the mask origin to the pointer at grab time, so the origin does
    /// not snap to the pointer on the first move.
    Dragging { index: usize, grab: NormPoint },
}

/// One canvas's worth of mask-editing state.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorSession {
    masks: MaskList,
    interaction: Interaction,
    canvas: Dimensions,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorSession {
    /// Create an idle session with an empty mask list.
    ///
    /// The canvas starts at 0×0; [`set_canvas_size`](Self::set_canvas_size)
    /// is called once the first preview frame reports its resolution.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            masks: MaskList::new(),
            interaction: Interaction::Idle,
            canvas: Dimensions::new(0, 0),
        }
    }

    /// The committed masks.
    #[must_use]
    pub const fn masks(&self) -> &MaskList {
        &self.masks
    }

    /// The in-progress rectangle, only while a new mask is being drawn
    /// and has seen at least one move.
    #[must_use]
    pub const fn in_progress(&self) -> Option<NormRect> {
        match &self.interaction {
            Interaction::Drawing { rect, .. } => *rect,
            _ => None,
        }
    }

    /// Current canvas resolution.
    #[must_use]
    pub const fn canvas(&self) -> Dimensions {
        self.canvas
    }

    /// Record the canvas's intrinsic resolution.
    pub const fn set_canvas_size(&mut self, canvas: Dimensions) {
        self.canvas = canvas;
    }

    /// Pointer/touch pressed at `p` (canvas pixels).
    ///
    /// Grabs the first existing mask under the point for dragging;
    /// otherwise starts drawing a new rectangle anchored at the point.
    /// Neither path mutates the mask list yet, so no sync is needed.
    pub fn pointer_down(&mut self, p: CanvasPoint) {
        let p = transform::point_to_normalized(p, self.canvas);
        match hit::hit_test(p, &self.masks) {
            Some(index) => {
                if let Some(rect) = self.masks.list().get(index) {
                    let grab = NormPoint::new(p.x - rect.x, p.y - rect.y);
                    self.interaction = Interaction::Dragging { index, grab };
                }
            }
            None => {
                self.interaction = Interaction::Drawing {
                    anchor: p,
                    rect: None,
                };
            }
        }
    }

    /// Pointer/touch moved to `p` (canvas pixels).
    ///
    /// Returns `true` when a committed mask changed and a (debounced)
    /// mask sync should be scheduled, which happens on every move of an
    /// existing mask. Reshaping an uncommitted rectangle and moves in
    /// the idle state return `false`.
    #[must_use]
    pub fn pointer_move(&mut self, p: CanvasPoint) -> bool {
        let p = transform::point_to_normalized(p, self.canvas);
        match &mut self.interaction {
            Interaction::Idle => false,
            Interaction::Drawing { anchor, rect } => {
                *rect = Some(draw_rect(*anchor, p));
                false
            }
            Interaction::Dragging { index, grab } => {
                let Some(rect) = self.masks.list().get(*index).copied() else {
                    return false;
                };
                let moved = NormRect::new(
                    (p.x - grab.x).clamp(0.0, 1.0 - rect.w),
                    (p.y - grab.y).clamp(0.0, 1.0 - rect.h),
                    rect.w,
                    rect.h,
                );
                self.masks.replace_at(*index, moved);
                true
            }
        }
    }

    /// Pointer/touch released.
    ///
    /// From `Drawing`, commits the in-progress rectangle when both of
    /// its extents reach [`COMMIT_MIN_PX`] in pixel terms; smaller
    /// results (accidental clicks and taps) are discarded silently.
    /// From `Dragging` there is nothing further to write, since every move
    /// already went through the mask list. Always returns to idle.
    ///
    /// Returns `true` when a new mask was committed.
    #[must_use]
    pub fn pointer_up(&mut self) -> bool {
        let finished = std::mem::replace(&mut self.interaction, Interaction::Idle);
        match finished {
            Interaction::Drawing {
                rect: Some(rect), ..
            } if self.meets_commit_threshold(rect) => {
                self.masks.add(rect);
                true
            }
            _ => false,
        }
    }

    /// Remove every mask.
    ///
    /// Always returns `true`: the emptied list must reach the backend
    /// even when it was already empty.
    #[must_use]
    pub fn clear(&mut self) -> bool {
        self.masks.clear();
        true
    }

    /// Whether a drawn rectangle is big enough to keep, measured in
    /// pixel space before normalization rounding can hide a tiny drag.
    fn meets_commit_threshold(&self, rect: NormRect) -> bool {
        let px = transform::normalized_to_pixel(&rect, self.canvas);
        px.w >= COMMIT_MIN_PX && px.h >= COMMIT_MIN_PX
    }
}

/// The in-progress rectangle between a fixed anchor and the cursor.
///
/// Bounding box of the two points with extents floored at
/// [`MIN_NORM_EXTENT`] so the draft never becomes invisible mid-draw,
/// and the origin pulled back so the rectangle stays inside the unit
/// square (`x + w <= 1`, `y + h <= 1`).
fn draw_rect(anchor: NormPoint, cursor: NormPoint) -> NormRect {
    let w = (cursor.x - anchor.x).abs().clamp(MIN_NORM_EXTENT, 1.0);
    let h = (cursor.y - anchor.y).abs().clamp(MIN_NORM_EXTENT, 1.0);
    NormRect::new(
        anchor.x.min(cursor.x).min(1.0 - w),
        anchor.y.min(cursor.y).min(1.0 - h),
        w,
        h,
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < EPS, "expected {b}, got {a}");
    }

    /// A session on the canonical 640×360 preview canvas.
    fn session() -> EditorSession {
        let mut s = EditorSession::new();
        s.set_canvas_size(Dimensions::new(640, 360));
        s
    }

    fn session_with_mask(rect: NormRect) -> EditorSession {
        let mut s = session();
        s.masks_mut_for_tests().add(rect);
        s
    }

    impl EditorSession {
        /// Test-only access for seeding a known mask list.
        fn masks_mut_for_tests(&mut self) -> &mut MaskList {
            &mut self.masks
        }
    }

    #[test]
    fn starts_idle_and_empty() {
        let s = session();
        assert!(s.masks().is_empty());
        assert_eq!(s.in_progress(), None);
    }

    #[test]
    fn draw_scenario_640x360() {
        // Down at (100,100) px, move to (300,250) px, release: one mask
        // at roughly {0.156, 0.278, 0.3125, 0.4167}.
        let mut s = session();
        s.pointer_down(CanvasPoint::new(100.0, 100.0));
        assert!(!s.pointer_move(CanvasPoint::new(300.0, 250.0)));
        assert!(s.pointer_up());

        assert_eq!(s.masks().len(), 1);
        let r = s.masks().list()[0];
        assert_close(r.x, 100.0 / 640.0);
        assert_close(r.y, 100.0 / 360.0);
        assert_close(r.w, 200.0 / 640.0);
        assert_close(r.h, 150.0 / 360.0);
        assert_eq!(s.in_progress(), None);
    }

    #[test]
    fn draw_from_any_corner_yields_same_box() {
        // Dragging up-left from (300,250) to (100,100) commits the same
        // rectangle as the down-right drag.
        let mut s = session();
        s.pointer_down(CanvasPoint::new(300.0, 250.0));
        let _ = s.pointer_move(CanvasPoint::new(100.0, 100.0));
        assert!(s.pointer_up());
        let r = s.masks().list()[0];
        assert_close(r.x, 100.0 / 640.0);
        assert_close(r.y, 100.0 / 360.0);
        assert_close(r.w, 200.0 / 640.0);
        assert_close(r.h, 150.0 / 360.0);
    }

    #[test]
    fn in_progress_rect_appears_only_while_drawing() {
        let mut s = session();
        s.pointer_down(CanvasPoint::new(100.0, 100.0));
        assert_eq!(s.in_progress(), None, "no draft before the first move");
        let _ = s.pointer_move(CanvasPoint::new(200.0, 200.0));
        assert!(s.in_progress().is_some());
        let _ = s.pointer_up();
        assert_eq!(s.in_progress(), None, "draft must not survive release");
    }

    #[test]
    fn zero_drag_click_adds_nothing() {
        let mut s = session();
        s.pointer_down(CanvasPoint::new(100.0, 100.0));
        assert!(!s.pointer_up());
        assert!(s.masks().is_empty());
    }

    #[test]
    fn sub_threshold_drag_is_discarded() {
        // A half-pixel wiggle draws a (floored) draft but is below the
        // 2 px commit threshold on release.
        let mut s = session();
        s.pointer_down(CanvasPoint::new(100.0, 100.0));
        let _ = s.pointer_move(CanvasPoint::new(100.5, 100.5));
        let draft = s.in_progress().unwrap();
        assert!(draft.w >= MIN_NORM_EXTENT);
        assert!(draft.h >= MIN_NORM_EXTENT);
        assert!(!s.pointer_up());
        assert!(s.masks().is_empty());
    }

    #[test]
    fn committed_draw_rects_satisfy_invariants() {
        let drags = [
            ((5.0, 5.0), (630.0, 350.0)),
            ((639.0, 359.0), (600.0, 320.0)),
            ((0.0, 0.0), (3.0, 3.0)),
            ((320.0, 180.0), (321.0, 358.0)),
        ];
        for ((ax, ay), (cx, cy)) in drags {
            let mut s = session();
            s.pointer_down(CanvasPoint::new(ax, ay));
            let _ = s.pointer_move(CanvasPoint::new(cx, cy));
            if s.pointer_up() {
                let r = s.masks().list()[0];
                assert!(r.x >= 0.0 && r.y >= 0.0, "origin out of range: {r:?}");
                assert!(r.w >= MIN_NORM_EXTENT && r.h >= MIN_NORM_EXTENT);
                assert!(r.x + r.w <= 1.0 + EPS, "x+w exceeds 1: {r:?}");
                assert!(r.y + r.h <= 1.0 + EPS, "y+h exceeds 1: {r:?}");
            }
        }
    }

    #[test]
    fn drag_scenario_moves_origin_by_pointer_delta() {
        // Existing mask {0.1, 0.1, 0.2, 0.2}; grab at its center and
        // move +50 px in x: origin x grows by 50/640, y and extents
        // stay fixed.
        let mut s = session_with_mask(NormRect::new(0.1, 0.1, 0.2, 0.2));
        s.pointer_down(CanvasPoint::new(128.0, 72.0));
        assert!(s.pointer_move(CanvasPoint::new(178.0, 72.0)));
        assert!(!s.pointer_up(), "drag release commits nothing new");

        let r = s.masks().list()[0];
        assert_close(r.x, 0.1 + 50.0 / 640.0);
        assert_close(r.y, 0.1);
        assert_close(r.w, 0.2);
        assert_close(r.h, 0.2);
    }

    #[test]
    fn grab_offset_prevents_origin_snap() {
        // Grabbing away from the origin and moving one pixel moves the
        // origin by exactly one pixel, not to the pointer.
        let mut s = session_with_mask(NormRect::new(0.1, 0.1, 0.2, 0.2));
        s.pointer_down(CanvasPoint::new(150.0, 100.0));
        let _ = s.pointer_move(CanvasPoint::new(151.0, 100.0));
        let r = s.masks().list()[0];
        assert_close(r.x, 0.1 + 1.0 / 640.0);
        assert_close(r.y, 0.1);
    }

    #[test]
    fn drag_clamps_inside_unit_square() {
        let mut s = session_with_mask(NormRect::new(0.7, 0.7, 0.2, 0.2));
        s.pointer_down(CanvasPoint::new(0.75 * 640.0, 0.75 * 360.0));
        // Fling far past the bottom-right corner.
        let _ = s.pointer_move(CanvasPoint::new(5000.0, 5000.0));
        let r = s.masks().list()[0];
        assert_close(r.x, 0.8);
        assert_close(r.y, 0.8);
        assert!(r.x + r.w <= 1.0 + EPS);
        assert!(r.y + r.h <= 1.0 + EPS);

        // And far past the top-left corner.
        let _ = s.pointer_move(CanvasPoint::new(-5000.0, -5000.0));
        let r = s.masks().list()[0];
        assert_close(r.x, 0.0);
        assert_close(r.y, 0.0);
    }

    #[test]
    fn move_while_idle_is_a_no_op() {
        let mut s = session();
        assert!(!s.pointer_move(CanvasPoint::new(200.0, 200.0)));
        assert!(s.masks().is_empty());
        assert_eq!(s.in_progress(), None);
    }

    #[test]
    fn overlapping_masks_drag_the_first_match() {
        let mut s = session();
        s.masks_mut_for_tests().add(NormRect::new(0.1, 0.1, 0.3, 0.3));
        s.masks_mut_for_tests().add(NormRect::new(0.2, 0.2, 0.3, 0.3));
        // (0.25, 0.25) is inside both; the first in list order wins.
        s.pointer_down(CanvasPoint::new(0.25 * 640.0, 0.25 * 360.0));
        let _ = s.pointer_move(CanvasPoint::new(0.35 * 640.0, 0.25 * 360.0));
        let first = s.masks().list()[0];
        let second = s.masks().list()[1];
        assert_close(first.x, 0.2);
        assert_close(second.x, 0.2);
        assert_close(second.y, 0.2);
    }

    #[test]
    fn clear_empties_and_requests_sync() {
        let mut s = session_with_mask(NormRect::new(0.1, 0.1, 0.2, 0.2));
        assert!(s.clear());
        assert!(s.masks().is_empty());
        // Clearing an already-empty list still pushes the empty state.
        assert!(s.clear());
    }

    #[test]
    fn commit_requires_known_canvas_size() {
        // Before the first frame the canvas is 0×0; nothing can reach
        // the 2 px threshold, so drags are discarded rather than
        // committing junk geometry.
        let mut s = EditorSession::new();
        s.pointer_down(CanvasPoint::new(10.0, 10.0));
        let _ = s.pointer_move(CanvasPoint::new(200.0, 200.0));
        assert!(!s.pointer_up());
        assert!(s.masks().is_empty());
    }
}
