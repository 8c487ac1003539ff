// Copyright 2026 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bounding-box geometry: the sizing wrapper that constrains flexible dimensions.

use kurbo::{Point, Rect, Size};

use crate::geometry::{HorizontalInset, VerticalInset};
use crate::pair::{ConnectionPair, Direction, PhysicalSide, VerticalEdge};
use crate::solver::SizeConstraints;

/// Computed geometry of the sizing wrapper.
///
/// The wrapper spans from the origin connection point to the viewport edge
/// the overlay grows toward, so a flexibly sized overlay can shrink to the
/// available space instead of overflowing. Recomputed on every pass.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoundingBoxGeometry {
    /// The wrapper's rect in document coordinates.
    pub rect: Rect,
    /// The authoritative horizontal inset, viewport-relative.
    pub horizontal: HorizontalInset,
    /// The authoritative vertical inset, viewport-relative.
    pub vertical: VerticalInset,
}

/// Compute the sizing wrapper for a candidate.
///
/// `narrowed` is the margin-narrowed viewport that bounds the wrapper;
/// `viewport` is the full viewport rect the insets are expressed against.
/// When `previous` is set, the wrapper may shrink but not grow past it.
pub(crate) fn bounding_box_for(
    origin_point: Point,
    pair: &ConnectionPair,
    narrowed: Rect,
    viewport: Rect,
    direction: Direction,
    constraints: &SizeConstraints,
    previous: Option<Size>,
) -> BoundingBoxGeometry {
    let p = origin_point;

    let mut height = match pair.overlay_y {
        VerticalEdge::Top => narrowed.y1 - p.y,
        VerticalEdge::Bottom => p.y - narrowed.y0,
        VerticalEdge::Center => 2.0 * (p.y - narrowed.y0).min(narrowed.y1 - p.y),
    }
    .max(0.0);
    if let Some(prev) = previous {
        height = height.min(prev.height);
    }
    if let Some(max_height) = constraints.max_height {
        height = height.min(max_height);
    }
    let top = match pair.overlay_y {
        VerticalEdge::Top => p.y,
        VerticalEdge::Bottom => p.y - height,
        VerticalEdge::Center => p.y - height / 2.0,
    };

    let side = pair.overlay_x.physical(direction);
    let mut width = match side {
        PhysicalSide::Left => narrowed.x1 - p.x,
        PhysicalSide::Right => p.x - narrowed.x0,
        PhysicalSide::Center => 2.0 * (p.x - narrowed.x0).min(narrowed.x1 - p.x),
    }
    .max(0.0);
    if let Some(prev) = previous {
        width = width.min(prev.width);
    }
    if let Some(max_width) = constraints.max_width {
        width = width.min(max_width);
    }
    let left = match side {
        PhysicalSide::Left => p.x,
        PhysicalSide::Right => p.x - width,
        PhysicalSide::Center => p.x - width / 2.0,
    };

    let rect = Rect::new(left, top, left + width, top + height);

    let vertical = if pair.overlay_y == VerticalEdge::Bottom {
        VerticalInset::FromBottom(viewport.y1 - rect.y1)
    } else {
        VerticalInset::FromTop(rect.y0 - viewport.y0)
    };
    let horizontal = if side == PhysicalSide::Right
        || (side == PhysicalSide::Center && direction == Direction::Rtl)
    {
        HorizontalInset::FromRight(viewport.x1 - rect.x1)
    } else {
        HorizontalInset::FromLeft(rect.x0 - viewport.x0)
    };

    BoundingBoxGeometry {
        rect,
        horizontal,
        vertical,
    }
}
