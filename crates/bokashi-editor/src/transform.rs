//! Conversions between client, canvas-pixel, and normalized mask space.
//!
//! The canvas's intrinsic resolution and its displayed CSS size can
//! differ, so every pointer coordinate is rescaled by the
//! `(intrinsic / displayed)` ratio before any hit testing or rectangle
//! math. Normalized space is resolution-independent: masks survive the
//! preview being re-encoded at a different size.

use crate::types::{CanvasPoint, ClientInput, Dimensions, NormPoint, NormRect, PxRect, ViewRect};

/// Smallest normalized extent a mask may have on either axis.
///
/// Keeps degenerate (invisible) rectangles out of the mask list and the
/// wire payload.
pub const MIN_NORM_EXTENT: f64 = 0.001;

/// Minimum pixel extent, on both axes, for a drawn rectangle to be
/// committed on release. Anything smaller is treated as an accidental
/// click and discarded.
pub const COMMIT_MIN_PX: f64 = 2.0;

/// A canvas dimension as `f64`, substituting 1 for zero so the divide
/// in normalization is always defined.
fn axis(dim: u32) -> f64 {
    if dim == 0 { 1.0 } else { f64::from(dim) }
}

/// A displayed CSS extent, substituting 1 when the element reports a
/// non-positive size (hidden or not yet laid out).
fn displayed(extent: f64) -> f64 {
    if extent > 0.0 { extent } else { 1.0 }
}

/// Convert a pixel-space rectangle to normalized mask space.
///
/// Origin components are clamped to `[0, 1]`; extents are clamped to
/// `[MIN_NORM_EXTENT, 1]`. Zero canvas dimensions are substituted with
/// 1, yielding a defined (if degenerate) result rather than a failure.
#[must_use]
pub fn pixel_to_normalized(x: f64, y: f64, w: f64, h: f64, canvas: Dimensions) -> NormRect {
    let cw = axis(canvas.width);
    let ch = axis(canvas.height);
    NormRect {
        x: (x / cw).clamp(0.0, 1.0),
        y: (y / ch).clamp(0.0, 1.0),
        w: (w / cw).clamp(MIN_NORM_EXTENT, 1.0),
        h: (h / ch).clamp(MIN_NORM_EXTENT, 1.0),
    }
}

/// Convert a normalized rectangle back to canvas pixel space.
///
/// Pure multiplication: already-normalized input is trusted, so no
/// clamping is applied.
#[must_use]
pub fn normalized_to_pixel(rect: &NormRect, canvas: Dimensions) -> PxRect {
    let cw = f64::from(canvas.width);
    let ch = f64::from(canvas.height);
    PxRect {
        x: rect.x * cw,
        y: rect.y * ch,
        w: rect.w * cw,
        h: rect.h * ch,
    }
}

/// Map a pointer event's client coordinates into canvas pixel space.
///
/// Rescales by `(intrinsic / displayed)` on each axis and clamps the
/// result into `[0, width] × [0, height]`, so a drag that leaves the
/// element still produces in-bounds coordinates.
#[must_use]
pub fn client_to_canvas(input: ClientInput, view: ViewRect, canvas: Dimensions) -> CanvasPoint {
    let p = input.position();
    let cw = f64::from(canvas.width);
    let ch = f64::from(canvas.height);
    CanvasPoint {
        x: ((p.x - view.left) * (cw / displayed(view.width))).clamp(0.0, cw),
        y: ((p.y - view.top) * (ch / displayed(view.height))).clamp(0.0, ch),
    }
}

/// Normalize a canvas-pixel point, clamping each axis into `[0, 1]`.
#[must_use]
pub fn point_to_normalized(p: CanvasPoint, canvas: Dimensions) -> NormPoint {
    NormPoint {
        x: (p.x / axis(canvas.width)).clamp(0.0, 1.0),
        y: (p.y / axis(canvas.height)).clamp(0.0, 1.0),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::ClientPoint;

    const EPS: f64 = 1e-9;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < EPS, "expected {b}, got {a}");
    }

    #[test]
    fn pixel_to_normalized_divides_by_canvas_axes() {
        let canvas = Dimensions::new(640, 360);
        let r = pixel_to_normalized(100.0, 100.0, 200.0, 150.0, canvas);
        assert_close(r.x, 0.15625);
        assert_close(r.y, 100.0 / 360.0);
        assert_close(r.w, 0.3125);
        assert_close(r.h, 150.0 / 360.0);
    }

    #[test]
    fn pixel_to_normalized_clamps_origin_into_unit_square() {
        let canvas = Dimensions::new(640, 360);
        let r = pixel_to_normalized(-50.0, 800.0, 10.0, 10.0, canvas);
        assert_close(r.x, 0.0);
        assert_close(r.y, 1.0);
    }

    #[test]
    fn pixel_to_normalized_floors_extents() {
        let canvas = Dimensions::new(640, 360);
        let r = pixel_to_normalized(0.0, 0.0, 0.0, 0.0, canvas);
        assert_close(r.w, MIN_NORM_EXTENT);
        assert_close(r.h, MIN_NORM_EXTENT);
    }

    #[test]
    fn pixel_to_normalized_survives_zero_canvas() {
        // Before the first frame arrives the canvas reports 0×0; the
        // result must be defined, not a division error.
        let r = pixel_to_normalized(3.0, 4.0, 5.0, 6.0, Dimensions::new(0, 0));
        assert_close(r.x, 1.0);
        assert_close(r.y, 1.0);
        assert_close(r.w, 1.0);
        assert_close(r.h, 1.0);
    }

    #[test]
    fn normalized_to_pixel_is_pure_multiplication() {
        let canvas = Dimensions::new(640, 360);
        let px = normalized_to_pixel(&NormRect::new(0.5, 0.25, 0.125, 0.5), canvas);
        assert_close(px.x, 320.0);
        assert_close(px.y, 90.0);
        assert_close(px.w, 80.0);
        assert_close(px.h, 180.0);
    }

    #[test]
    fn pixel_round_trip_within_tolerance() {
        let canvas = Dimensions::new(1280, 720);
        for (x, y, w, h) in [
            (0.0, 0.0, 10.0, 10.0),
            (100.5, 200.25, 300.0, 150.75),
            (1270.0, 710.0, 10.0, 10.0),
        ] {
            let px = normalized_to_pixel(&pixel_to_normalized(x, y, w, h, canvas), canvas);
            assert_close(px.x, x);
            assert_close(px.y, y);
            assert_close(px.w, w);
            assert_close(px.h, h);
        }
    }

    #[test]
    fn client_to_canvas_rescales_for_css_shrink() {
        // Intrinsic 640×360 displayed at half size: client offsets
        // double when mapped back to canvas pixels.
        let view = ViewRect::new(10.0, 20.0, 320.0, 180.0);
        let canvas = Dimensions::new(640, 360);
        let p = client_to_canvas(
            ClientInput::Mouse(ClientPoint::new(110.0, 110.0)),
            view,
            canvas,
        );
        assert_close(p.x, 200.0);
        assert_close(p.y, 180.0);
    }

    #[test]
    fn client_to_canvas_clamps_out_of_element_drags() {
        let view = ViewRect::new(0.0, 0.0, 640.0, 360.0);
        let canvas = Dimensions::new(640, 360);
        let low = client_to_canvas(
            ClientInput::Mouse(ClientPoint::new(-25.0, -25.0)),
            view,
            canvas,
        );
        assert_close(low.x, 0.0);
        assert_close(low.y, 0.0);
        let high = client_to_canvas(
            ClientInput::Mouse(ClientPoint::new(900.0, 900.0)),
            view,
            canvas,
        );
        assert_close(high.x, 640.0);
        assert_close(high.y, 360.0);
    }

    #[test]
    fn client_to_canvas_uses_first_touch_point_identically() {
        let view = ViewRect::new(0.0, 0.0, 640.0, 360.0);
        let canvas = Dimensions::new(640, 360);
        let mouse = client_to_canvas(
            ClientInput::Mouse(ClientPoint::new(100.0, 50.0)),
            view,
            canvas,
        );
        let touch = client_to_canvas(
            ClientInput::Touch(ClientPoint::new(100.0, 50.0)),
            view,
            canvas,
        );
        assert_eq!(mouse, touch);
    }

    #[test]
    fn client_to_canvas_tolerates_collapsed_view() {
        // A hidden element reports a 0×0 bounding box.
        let view = ViewRect::new(0.0, 0.0, 0.0, 0.0);
        let canvas = Dimensions::new(640, 360);
        let p = client_to_canvas(
            ClientInput::Mouse(ClientPoint::new(1.0, 1.0)),
            view,
            canvas,
        );
        assert!(p.x.is_finite());
        assert!(p.y.is_finite());
    }

    #[test]
    fn point_to_normalized_clamps_to_unit_square() {
        let canvas = Dimensions::new(640, 360);
        let p = point_to_normalized(CanvasPoint::new(320.0, 720.0), canvas);
        assert_close(p.x, 0.5);
        assert_close(p.y, 1.0);
    }
}
