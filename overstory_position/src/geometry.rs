// Copyright 2026 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! CSS-equivalent output geometry for the overlay pane.

use kurbo::{Point, Rect, Size};

use crate::pair::{ConnectionPair, Direction, PhysicalSide, VerticalEdge};

/// A horizontal inset relative to the viewport rect.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum HorizontalInset {
    /// Distance from the viewport's left edge to the box's left edge.
    FromLeft(f64),
    /// Distance from the viewport's right edge to the box's right edge.
    FromRight(f64),
}

/// A vertical inset relative to the viewport rect.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum VerticalInset {
    /// Distance from the viewport's top edge to the box's top edge.
    FromTop(f64),
    /// Distance from the viewport's bottom edge to the box's bottom edge.
    FromBottom(f64),
}

/// Where the overlay pane should be written, as one inset per axis.
///
/// The edge convention follows the winning pair's overlay anchor and the
/// layout direction, so that the pane stays visually attached to its anchored
/// edge if its content later resizes: a `bottom`-anchored pane gets a
/// [`VerticalInset::FromBottom`] inset, and an `end`-anchored pane gets a
/// right inset under LTR but a left inset under RTL.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PaneGeometry {
    /// The authoritative horizontal inset.
    pub horizontal: HorizontalInset,
    /// The authoritative vertical inset.
    pub vertical: VerticalInset,
}

impl PaneGeometry {
    pub(crate) fn for_overlay(
        point: Point,
        overlay: Size,
        viewport: Rect,
        pair: &ConnectionPair,
        direction: Direction,
    ) -> Self {
        let vertical = if pair.overlay_y == VerticalEdge::Bottom {
            VerticalInset::FromBottom(viewport.y1 - (point.y + overlay.height))
        } else {
            VerticalInset::FromTop(point.y - viewport.y0)
        };

        // The pane expands away from its anchored edge; under RTL the
        // anchored physical side flips along with start/end.
        let horizontal = match pair.overlay_x.physical(direction) {
            PhysicalSide::Right => {
                HorizontalInset::FromRight(viewport.x1 - (point.x + overlay.width))
            }
            PhysicalSide::Center if direction == Direction::Rtl => {
                HorizontalInset::FromRight(viewport.x1 - (point.x + overlay.width))
            }
            _ => HorizontalInset::FromLeft(point.x - viewport.x0),
        };

        Self {
            horizontal,
            vertical,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pair::{HorizontalEdge, VerticalEdge};

    const VIEWPORT: Rect = Rect::new(0.0, 0.0, 400.0, 300.0);

    #[test]
    fn top_start_pane_uses_top_and_left_insets() {
        let pair = ConnectionPair::new(
            HorizontalEdge::Start,
            VerticalEdge::Bottom,
            HorizontalEdge::Start,
            VerticalEdge::Top,
        );
        let geometry = PaneGeometry::for_overlay(
            Point::new(50.0, 120.0),
            Size::new(200.0, 30.0),
            VIEWPORT,
            &pair,
            Direction::Ltr,
        );
        assert_eq!(geometry.horizontal, HorizontalInset::FromLeft(50.0));
        assert_eq!(geometry.vertical, VerticalInset::FromTop(120.0));
    }

    #[test]
    fn bottom_end_pane_uses_bottom_and_right_insets() {
        let pair = ConnectionPair::new(
            HorizontalEdge::End,
            VerticalEdge::Top,
            HorizontalEdge::End,
            VerticalEdge::Bottom,
        );
        let geometry = PaneGeometry::for_overlay(
            Point::new(100.0, 70.0),
            Size::new(200.0, 30.0),
            VIEWPORT,
            &pair,
            Direction::Ltr,
        );
        assert_eq!(geometry.horizontal, HorizontalInset::FromRight(100.0));
        assert_eq!(geometry.vertical, VerticalInset::FromBottom(200.0));
    }

    #[test]
    fn rtl_flips_the_horizontal_edge_convention() {
        let pair = ConnectionPair::new(
            HorizontalEdge::Start,
            VerticalEdge::Bottom,
            HorizontalEdge::Start,
            VerticalEdge::Top,
        );
        // A start-anchored pane under RTL is anchored to the right edge.
        let geometry = PaneGeometry::for_overlay(
            Point::new(100.0, 70.0),
            Size::new(200.0, 30.0),
            VIEWPORT,
            &pair,
            Direction::Rtl,
        );
        assert_eq!(geometry.horizontal, HorizontalInset::FromRight(100.0));
    }
}
