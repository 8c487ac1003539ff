// Copyright 2026 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-overlay configuration.

use overstory_position::{Direction, SizeConstraints};

/// What an overlay does when an ancestor container scrolls.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum ScrollPolicy {
    /// Leave the overlay where it is.
    #[default]
    Noop,
    /// Re-align the overlay to its origin, keeping the last orientation.
    Reposition,
    /// Detach the overlay's content.
    Close,
}

/// Per-overlay configuration, owned by exactly one [`OverlayRef`](crate::OverlayRef)
/// and mutated only through its accessors.
///
/// Explicit `width`/`height` override the pane's measured natural size;
/// minimums gate the solver's flexible-fit test and maximums clamp the
/// bounding box.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct OverlayConfig {
    /// Layout direction of the owning context.
    pub direction: Direction,
    /// Fixed overlay width, overriding the measured pane width.
    pub width: Option<f64>,
    /// Fixed overlay height, overriding the measured pane height.
    pub height: Option<f64>,
    /// Minimum overlay width.
    pub min_width: Option<f64>,
    /// Minimum overlay height.
    pub min_height: Option<f64>,
    /// Maximum overlay width.
    pub max_width: Option<f64>,
    /// Maximum overlay height.
    pub max_height: Option<f64>,
    /// Whether the overlay owns a backdrop element.
    pub has_backdrop: bool,
    /// Scroll behavior.
    pub scroll_policy: ScrollPolicy,
}

impl OverlayConfig {
    /// Set the layout direction.
    #[must_use]
    pub const fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Fix the overlay's size, overriding measured values per axis.
    #[must_use]
    pub const fn with_size(mut self, width: Option<f64>, height: Option<f64>) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set minimum size constraints.
    #[must_use]
    pub const fn with_min_size(mut self, min_width: Option<f64>, min_height: Option<f64>) -> Self {
        self.min_width = min_width;
        self.min_height = min_height;
        self
    }

    /// Set maximum size constraints.
    #[must_use]
    pub const fn with_max_size(mut self, max_width: Option<f64>, max_height: Option<f64>) -> Self {
        self.max_width = max_width;
        self.max_height = max_height;
        self
    }

    /// Toggle the backdrop.
    #[must_use]
    pub const fn with_backdrop(mut self, has_backdrop: bool) -> Self {
        self.has_backdrop = has_backdrop;
        self
    }

    /// Set the scroll behavior.
    #[must_use]
    pub const fn with_scroll_policy(mut self, policy: ScrollPolicy) -> Self {
        self.scroll_policy = policy;
        self
    }

    /// The size constraints the solver reads through the attach capability.
    #[must_use]
    pub const fn size_constraints(&self) -> SizeConstraints {
        SizeConstraints {
            min_width: self.min_width,
            min_height: self.min_height,
            max_width: self.max_width,
            max_height: self.max_height,
        }
    }
}
