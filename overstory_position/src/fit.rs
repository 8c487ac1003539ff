// Copyright 2026 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-candidate fit measurement and the push-on-screen translation.

use kurbo::{Point, Rect, Size};

/// How well an overlay rect fits within the viewport at a candidate point.
///
/// Computed fresh for every candidate on every positioning pass; never
/// persisted.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OverlayFit {
    /// The overlay rect lies entirely within the viewport.
    pub is_completely_within_viewport: bool,
    /// The overlay's full height is visible.
    pub fits_in_viewport_vertically: bool,
    /// The overlay's full width is visible.
    pub fits_in_viewport_horizontally: bool,
    /// Visible width × visible height after clamped per-edge overflow.
    pub visible_area: f64,
}

impl OverlayFit {
    /// Measure how an overlay of size `overlay`, placed with its top-left
    /// corner at `point`, fits within `viewport`.
    ///
    /// Overflow past each viewport edge reduces the visible extent on that
    /// axis; an edge the overlay does not cross contributes nothing.
    ///
    /// ```
    /// use kurbo::{Point, Rect, Size};
    /// use overstory_position::OverlayFit;
    ///
    /// let viewport = Rect::new(0.0, 0.0, 400.0, 300.0);
    /// let fit = OverlayFit::measure(Point::new(50.0, 120.0), Size::new(200.0, 30.0), viewport);
    /// assert!(fit.is_completely_within_viewport);
    ///
    /// // 50px hangs off the right edge: only 150×30 remains visible.
    /// let narrow = Rect::new(0.0, 0.0, 200.0, 300.0);
    /// let fit = OverlayFit::measure(Point::new(50.0, 120.0), Size::new(200.0, 30.0), narrow);
    /// assert!(!fit.fits_in_viewport_horizontally);
    /// assert!(fit.fits_in_viewport_vertically);
    /// assert_eq!(fit.visible_area, 150.0 * 30.0);
    /// ```
    #[must_use]
    pub fn measure(point: Point, overlay: Size, viewport: Rect) -> Self {
        let rect = Rect::from_origin_size(point, overlay);

        let left_overflow = viewport.x0 - rect.x0;
        let right_overflow = rect.x1 - viewport.x1;
        let top_overflow = viewport.y0 - rect.y0;
        let bottom_overflow = rect.y1 - viewport.y1;

        let visible_width = subtract_overflows(overlay.width, left_overflow, right_overflow);
        let visible_height = subtract_overflows(overlay.height, top_overflow, bottom_overflow);
        let visible_area = visible_width * visible_height;

        Self {
            is_completely_within_viewport: overlay.width * overlay.height <= visible_area,
            fits_in_viewport_vertically: visible_height == overlay.height,
            fits_in_viewport_horizontally: visible_width == overlay.width,
            visible_area,
        }
    }
}

/// Subtract the positive parts of two overflows from a length. Negative
/// overflow (slack inside the viewport) contributes nothing.
fn subtract_overflows(length: f64, a: f64, b: f64) -> f64 {
    length - a.max(0.0) - b.max(0.0)
}

/// Translate an overlay point by the minimum vector that brings the overlay
/// fully inside `viewport`.
///
/// Per axis: when the overlay fits within the viewport's extent, it is pushed
/// off whichever edge it overflows. When it is larger than the viewport, it
/// is anchored to the viewport's near edge (top/left) and allowed to overflow
/// past the far one.
///
/// ```
/// use kurbo::{Point, Rect, Size};
/// use overstory_position::push_on_screen;
///
/// let viewport = Rect::new(0.0, 0.0, 200.0, 300.0);
/// // Overlay as wide as the viewport, hanging 50px off the right: pinned to the left edge.
/// let pushed = push_on_screen(Point::new(50.0, 120.0), Size::new(200.0, 30.0), viewport);
/// assert_eq!(pushed, Point::new(0.0, 120.0));
/// ```
#[must_use]
pub fn push_on_screen(start: Point, overlay: Size, viewport: Rect) -> Point {
    let overflow_right = (start.x + overlay.width - viewport.x1).max(0.0);
    let overflow_bottom = (start.y + overlay.height - viewport.y1).max(0.0);
    let overflow_left = (viewport.x0 - start.x).max(0.0);
    let overflow_top = (viewport.y0 - start.y).max(0.0);

    let push_x = if overlay.width <= viewport.width() {
        if overflow_left > 0.0 {
            overflow_left
        } else {
            -overflow_right
        }
    } else if start.x < viewport.x0 {
        viewport.x0 - start.x
    } else {
        0.0
    };

    let push_y = if overlay.height <= viewport.height() {
        if overflow_top > 0.0 {
            overflow_top
        } else {
            -overflow_bottom
        }
    } else if start.y < viewport.y0 {
        viewport.y0 - start.y
    } else {
        0.0
    };

    Point::new(start.x + push_x, start.y + push_y)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Rect = Rect::new(0.0, 0.0, 400.0, 300.0);

    #[test]
    fn complete_fit_reports_full_visible_area() {
        let fit = OverlayFit::measure(Point::new(50.0, 120.0), Size::new(200.0, 30.0), VIEWPORT);
        assert!(fit.is_completely_within_viewport);
        assert!(fit.fits_in_viewport_vertically);
        assert!(fit.fits_in_viewport_horizontally);
        assert_eq!(fit.visible_area, 6000.0);
    }

    #[test]
    fn overflow_on_one_edge_reduces_the_matching_axis_only() {
        // 30px past the bottom edge.
        let fit = OverlayFit::measure(Point::new(0.0, 280.0), Size::new(100.0, 50.0), VIEWPORT);
        assert!(!fit.is_completely_within_viewport);
        assert!(!fit.fits_in_viewport_vertically);
        assert!(fit.fits_in_viewport_horizontally);
        assert_eq!(fit.visible_area, 100.0 * 20.0);
    }

    #[test]
    fn overflow_on_both_horizontal_edges_stacks() {
        // Overlay wider than the viewport, overhanging 10px left and 20px right.
        let fit = OverlayFit::measure(Point::new(-10.0, 0.0), Size::new(430.0, 10.0), VIEWPORT);
        assert_eq!(fit.visible_area, 400.0 * 10.0);
        assert!(!fit.fits_in_viewport_horizontally);
    }

    #[test]
    fn push_moves_by_minimum_vector_when_overlay_fits() {
        // Overflows right by 50 and bottom by 10; pushed back by exactly that much.
        let pushed = push_on_screen(Point::new(250.0, 280.0), Size::new(200.0, 30.0), VIEWPORT);
        assert_eq!(pushed, Point::new(200.0, 270.0));
        let fit = OverlayFit::measure(pushed, Size::new(200.0, 30.0), VIEWPORT);
        assert!(fit.is_completely_within_viewport);
    }

    #[test]
    fn push_from_the_left_and_top_edges() {
        let pushed = push_on_screen(Point::new(-30.0, -5.0), Size::new(100.0, 50.0), VIEWPORT);
        assert_eq!(pushed, Point::new(0.0, 0.0));
    }

    #[test]
    fn push_anchors_near_edge_when_overlay_exceeds_viewport() {
        // Wider than the viewport: anchored to the left edge, overflowing right.
        let pushed = push_on_screen(Point::new(-25.0, 10.0), Size::new(500.0, 20.0), VIEWPORT);
        assert_eq!(pushed, Point::new(0.0, 10.0));

        // Already past the near edge in the positive direction: left alone.
        let pushed = push_on_screen(Point::new(30.0, 10.0), Size::new(500.0, 20.0), VIEWPORT);
        assert_eq!(pushed, Point::new(30.0, 10.0));
    }

    #[test]
    fn push_is_a_no_op_for_a_contained_overlay() {
        let start = Point::new(50.0, 120.0);
        assert_eq!(push_on_screen(start, Size::new(200.0, 30.0), VIEWPORT), start);
    }
}
