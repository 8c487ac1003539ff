// Copyright 2026 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Candidate ranking and selection: one placement per positioning pass.

use alloc::vec::Vec;
use kurbo::{Point, Rect, Size, Vec2};
use thiserror::Error;

use crate::bounding::{BoundingBoxGeometry, bounding_box_for};
use crate::fit::{OverlayFit, push_on_screen};
use crate::geometry::PaneGeometry;
use crate::pair::{ConnectionPair, Direction};

/// Immutable solver configuration.
///
/// Constructed once with the consuming `with_*` methods; a positioning pass
/// never mutates it. Live measurements arrive separately as a [`LayoutFrame`].
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct SolverConfig {
    /// Margin subtracted from every viewport edge before fit testing.
    pub viewport_margin: f64,
    /// Accept a candidate lacking full horizontal containment if the minimum
    /// configured width still fits.
    pub flexible_width: bool,
    /// Accept a candidate lacking full vertical containment if the minimum
    /// configured height still fits.
    pub flexible_height: bool,
    /// Allow the bounding box to grow past its first-computed size on
    /// subsequent passes.
    pub grow_after_open: bool,
    /// As a last resort, translate the overlay to stay fully on-screen.
    pub can_push: bool,
    /// Horizontal offset applied to pairs that carry none of their own.
    pub default_offset_x: f64,
    /// Vertical offset applied to pairs that carry none of their own.
    pub default_offset_y: f64,
}

impl SolverConfig {
    /// Shrink the effective viewport symmetrically on all sides.
    #[must_use]
    pub const fn with_viewport_margin(mut self, margin: f64) -> Self {
        self.viewport_margin = margin;
        self
    }

    /// Toggle flexible width.
    #[must_use]
    pub const fn with_flexible_width(mut self, flexible: bool) -> Self {
        self.flexible_width = flexible;
        self
    }

    /// Toggle flexible height.
    #[must_use]
    pub const fn with_flexible_height(mut self, flexible: bool) -> Self {
        self.flexible_height = flexible;
        self
    }

    /// Toggle bounding-box growth after the first pass.
    ///
    /// Off by default: the box may shrink but never grow, which prevents
    /// jitter from scroll-driven reflow.
    #[must_use]
    pub const fn with_grow_after_open(mut self, grow: bool) -> Self {
        self.grow_after_open = grow;
        self
    }

    /// Toggle pushing the overlay on-screen when no candidate fits.
    #[must_use]
    pub const fn with_push(mut self, push: bool) -> Self {
        self.can_push = push;
        self
    }

    /// Set the offsets applied to pairs without explicit ones.
    #[must_use]
    pub const fn with_default_offset(mut self, x: f64, y: f64) -> Self {
        self.default_offset_x = x;
        self.default_offset_y = y;
        self
    }
}

/// Size constraints of the owning overlay, read through the attach-time
/// capability rather than a back-pointer.
///
/// Minimums gate the flexible-fit test; maximums clamp the bounding box.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct SizeConstraints {
    /// Minimum overlay width, if constrained.
    pub min_width: Option<f64>,
    /// Minimum overlay height, if constrained.
    pub min_height: Option<f64>,
    /// Maximum overlay width, if constrained.
    pub max_width: Option<f64>,
    /// Maximum overlay height, if constrained.
    pub max_height: Option<f64>,
}

/// One measurement snapshot, taken before any write.
///
/// All rects are in document coordinates. The algorithm reads nothing else,
/// so a pass is always consistent with a single snapshot of layout.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LayoutFrame {
    /// The trigger element's rect.
    pub origin: Rect,
    /// The overlay pane's natural size.
    pub overlay: Size,
    /// The visible viewport rect (origin at the page scroll offset).
    pub viewport: Rect,
}

/// The winning candidate of a positioning pass, with its computed geometry.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Selection {
    /// The winning pair.
    pub pair: ConnectionPair,
    /// The connection point on the origin box.
    pub origin_point: Point,
    /// The overlay's final top-left point, after any push.
    pub overlay_point: Point,
    /// Fit of the winning pair at its natural (un-pushed) placement.
    pub fit: OverlayFit,
    /// Whether the overlay was pushed to stay on-screen.
    pub is_pushed: bool,
    /// Geometry of the sizing wrapper.
    pub bounding_box: BoundingBoxGeometry,
    /// CSS-equivalent insets for the pane.
    pub pane: PaneGeometry,
}

/// Positioning errors. Raised synchronously; never retried.
#[derive(Copy, Clone, Debug, PartialEq, Error)]
pub enum SolveError {
    /// The preferred-positions list was empty at solve time.
    #[error("no preferred positions have been configured")]
    NoPositions,
    /// The origin rect is the zero rect or non-finite, which is what a
    /// detached trigger element measures as.
    ///
    /// A zero-size element legitimately placed at the document origin is
    /// indistinguishable from a detached one and is rejected too.
    #[error("origin measured as a detached rect ({0:?})")]
    DetachedOrigin(Rect),
}

/// Run the full fit-selection pass over `candidates`, in list order.
///
/// `previous_bounding_box` is the wrapper size of the previous pass, used to
/// keep the box from growing unless
/// [`grow_after_open`](SolverConfig::grow_after_open) is set. Pass `None` on
/// the first pass.
///
/// See the crate docs for the selection rules. Errors are configuration
/// errors only; an overlay that cannot fit anywhere still selects the
/// largest-visible-area candidate.
pub fn select_position(
    config: &SolverConfig,
    constraints: &SizeConstraints,
    direction: Direction,
    frame: &LayoutFrame,
    candidates: &[ConnectionPair],
    previous_bounding_box: Option<Size>,
) -> Result<Selection, SolveError> {
    if candidates.is_empty() {
        return Err(SolveError::NoPositions);
    }
    validate_origin(frame.origin)?;

    let narrowed = frame.viewport.inset(-config.viewport_margin);
    let previous = effective_previous(config, previous_bounding_box);

    let mut flexible: Vec<(Candidate, BoundingBoxGeometry)> = Vec::new();
    let mut fallback: Option<Candidate> = None;

    for &pair in candidates {
        let origin_point = pair.origin_point(frame.origin, direction);
        let overlay_point =
            pair.overlay_point(origin_point, frame.overlay, direction, offset_for(config, &pair));
        let fit = OverlayFit::measure(overlay_point, frame.overlay, narrowed);
        let candidate = Candidate {
            pair,
            origin_point,
            overlay_point,
            fit,
        };

        // First-fit rule: earlier list entries are strictly preferred.
        if fit.is_completely_within_viewport {
            return Ok(build_selection(
                constraints, direction, frame, narrowed, candidate, false, previous,
            ));
        }

        if can_fit_flexibly(config, constraints, &fit, overlay_point, narrowed) {
            let bbox = bounding_box_for(
                origin_point,
                &pair,
                narrowed,
                frame.viewport,
                direction,
                constraints,
                previous,
            );
            flexible.push((candidate, bbox));
            continue;
        }

        // Largest visible area wins the fallback slot; ties keep the earlier entry.
        if fallback
            .as_ref()
            .is_none_or(|best| best.fit.visible_area < fit.visible_area)
        {
            fallback = Some(candidate);
        }
    }

    if !flexible.is_empty() {
        let mut best = &flexible[0];
        let mut best_score = score(best);
        for entry in &flexible[1..] {
            let entry_score = score(entry);
            if entry_score > best_score {
                best = entry;
                best_score = entry_score;
            }
        }
        return Ok(build_selection(
            constraints, direction, frame, narrowed, best.0, false, previous,
        ));
    }

    // Every candidate took the fallback branch at least once above.
    let fallback = fallback.ok_or(SolveError::NoPositions)?;

    if config.can_push {
        let pushed = push_on_screen(fallback.overlay_point, frame.overlay, narrowed);
        let candidate = Candidate {
            overlay_point: pushed,
            ..fallback
        };
        return Ok(build_selection(
            constraints, direction, frame, narrowed, candidate, true, previous,
        ));
    }

    Ok(build_selection(
        constraints, direction, frame, narrowed, fallback, false, previous,
    ))
}

/// Re-apply a previously selected pair against fresh measurements, without
/// re-running the ranking.
///
/// Used to track scroll and resize without flipping orientation. `was_pushed`
/// carries the push state of the pass that selected `pair`; the translation
/// is re-derived from the fresh rects when it is set (and pushing is still
/// enabled).
pub fn realign(
    config: &SolverConfig,
    constraints: &SizeConstraints,
    direction: Direction,
    frame: &LayoutFrame,
    pair: &ConnectionPair,
    was_pushed: bool,
    previous_bounding_box: Option<Size>,
) -> Result<Selection, SolveError> {
    validate_origin(frame.origin)?;

    let narrowed = frame.viewport.inset(-config.viewport_margin);
    let origin_point = pair.origin_point(frame.origin, direction);
    let overlay_point =
        pair.overlay_point(origin_point, frame.overlay, direction, offset_for(config, pair));
    let fit = OverlayFit::measure(overlay_point, frame.overlay, narrowed);

    let (overlay_point, is_pushed) = if config.can_push && was_pushed {
        (push_on_screen(overlay_point, frame.overlay, narrowed), true)
    } else {
        (overlay_point, false)
    };

    let candidate = Candidate {
        pair: *pair,
        origin_point,
        overlay_point,
        fit,
    };
    Ok(build_selection(
        constraints,
        direction,
        frame,
        narrowed,
        candidate,
        is_pushed,
        effective_previous(config, previous_bounding_box),
    ))
}

#[derive(Copy, Clone, Debug)]
struct Candidate {
    pair: ConnectionPair,
    origin_point: Point,
    overlay_point: Point,
    fit: OverlayFit,
}

fn validate_origin(origin: Rect) -> Result<(), SolveError> {
    let finite = origin.x0.is_finite()
        && origin.y0.is_finite()
        && origin.x1.is_finite()
        && origin.y1.is_finite();
    if !finite || origin == Rect::ZERO {
        return Err(SolveError::DetachedOrigin(origin));
    }
    Ok(())
}

fn effective_previous(config: &SolverConfig, previous: Option<Size>) -> Option<Size> {
    if config.grow_after_open { None } else { previous }
}

fn offset_for(config: &SolverConfig, pair: &ConnectionPair) -> Vec2 {
    Vec2::new(
        pair.offset_x.unwrap_or(config.default_offset_x),
        pair.offset_y.unwrap_or(config.default_offset_y),
    )
}

/// The flexible-fit test: an axis passes if it fits naturally, or if that
/// axis is flexible and its configured minimum fits between the overlay point
/// and the far viewport edge. An axis without a configured minimum cannot
/// pass flexibly.
fn can_fit_flexibly(
    config: &SolverConfig,
    constraints: &SizeConstraints,
    fit: &OverlayFit,
    point: Point,
    viewport: Rect,
) -> bool {
    if !config.flexible_width && !config.flexible_height {
        return false;
    }
    let available_height = viewport.y1 - point.y;
    let available_width = viewport.x1 - point.x;

    let vertical = fit.fits_in_viewport_vertically
        || (config.flexible_height
            && constraints
                .min_height
                .is_some_and(|min| min <= available_height));
    let horizontal = fit.fits_in_viewport_horizontally
        || (config.flexible_width
            && constraints
                .min_width
                .is_some_and(|min| min <= available_width));
    vertical && horizontal
}

fn score(entry: &(Candidate, BoundingBoxGeometry)) -> f64 {
    let (candidate, bbox) = entry;
    bbox.rect.width() * bbox.rect.height() * candidate.pair.effective_weight()
}

fn build_selection(
    constraints: &SizeConstraints,
    direction: Direction,
    frame: &LayoutFrame,
    narrowed: Rect,
    candidate: Candidate,
    is_pushed: bool,
    previous: Option<Size>,
) -> Selection {
    let bounding_box = bounding_box_for(
        candidate.origin_point,
        &candidate.pair,
        narrowed,
        frame.viewport,
        direction,
        constraints,
        previous,
    );
    let pane = PaneGeometry::for_overlay(
        candidate.overlay_point,
        frame.overlay,
        frame.viewport,
        &candidate.pair,
        direction,
    );
    Selection {
        pair: candidate.pair,
        origin_point: candidate.origin_point,
        overlay_point: candidate.overlay_point,
        fit: candidate.fit,
        is_pushed,
        bounding_box,
        pane,
    }
}
