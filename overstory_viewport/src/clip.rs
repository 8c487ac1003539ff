// Copyright 2026 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pure predicates for visibility relative to ancestor scroll containers.

use kurbo::Rect;

bitflags::bitflags! {
    /// Clipping state of an overlay and its origin relative to ancestor
    /// scroll containers, independent of viewport fit.
    ///
    /// Computed per reposition and carried on position-change events; never
    /// stored. Consumers typically close or hide an overlay whose origin has
    /// scrolled away.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct ScrollingVisibility: u8 {
        /// The origin extends past at least one edge of an ancestor container.
        const ORIGIN_CLIPPED = 0b0000_0001;
        /// The origin is entirely outside at least one ancestor container.
        const ORIGIN_OUT_OF_VIEW = 0b0000_0010;
        /// The overlay extends past at least one edge of an ancestor container.
        const OVERLAY_CLIPPED = 0b0000_0100;
        /// The overlay is entirely outside at least one ancestor container.
        const OVERLAY_OUT_OF_VIEW = 0b0000_1000;
    }
}

/// Whether `target` shares no overlap with at least one of the `containers`
/// on either axis (fully above, below, left, or right of it).
///
/// Rects that merely touch along an edge still overlap and are *not* outside
/// view.
///
/// ```
/// use kurbo::Rect;
/// use overstory_viewport::is_scrolled_out_of_view;
///
/// let container = Rect::new(0.0, 0.0, 100.0, 100.0);
/// assert!(is_scrolled_out_of_view(Rect::new(0.0, 120.0, 50.0, 150.0), &[container]));
/// // Sharing the bottom edge is still (barely) in view.
/// assert!(!is_scrolled_out_of_view(Rect::new(0.0, 100.0, 50.0, 150.0), &[container]));
/// ```
#[must_use]
pub fn is_scrolled_out_of_view(target: Rect, containers: &[Rect]) -> bool {
    containers.iter().any(|container| {
        target.y1 < container.y0
            || target.y0 > container.y1
            || target.x1 < container.x0
            || target.x0 > container.x1
    })
}

/// Whether `target` extends beyond any edge of at least one of the
/// `containers`, even partially.
///
/// ```
/// use kurbo::Rect;
/// use overstory_viewport::is_clipped_by_scrolling;
///
/// let container = Rect::new(0.0, 0.0, 100.0, 100.0);
/// assert!(is_clipped_by_scrolling(Rect::new(50.0, 80.0, 90.0, 110.0), &[container]));
/// assert!(!is_clipped_by_scrolling(Rect::new(10.0, 10.0, 90.0, 90.0), &[container]));
/// ```
#[must_use]
pub fn is_clipped_by_scrolling(target: Rect, containers: &[Rect]) -> bool {
    containers.iter().any(|container| {
        target.y0 < container.y0
            || target.y1 > container.y1
            || target.x0 < container.x0
            || target.x1 > container.x1
    })
}

/// Evaluate both predicates for an origin/overlay rect pair.
#[must_use]
pub fn scrolling_visibility(
    origin: Rect,
    overlay: Rect,
    containers: &[Rect],
) -> ScrollingVisibility {
    let mut visibility = ScrollingVisibility::empty();
    visibility.set(
        ScrollingVisibility::ORIGIN_CLIPPED,
        is_clipped_by_scrolling(origin, containers),
    );
    visibility.set(
        ScrollingVisibility::ORIGIN_OUT_OF_VIEW,
        is_scrolled_out_of_view(origin, containers),
    );
    visibility.set(
        ScrollingVisibility::OVERLAY_CLIPPED,
        is_clipped_by_scrolling(overlay, containers),
    );
    visibility.set(
        ScrollingVisibility::OVERLAY_OUT_OF_VIEW,
        is_scrolled_out_of_view(overlay, containers),
    );
    visibility
}
