// Copyright 2026 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=overstory_position --heading-base-level=0

//! Overstory Position: a pure fit-selection solver for overlay positioning.
//!
//! Given a trigger element's rectangle (the *origin*), a ranked list of
//! [`ConnectionPair`] candidates, and a snapshot of the viewport, this crate
//! decides where a floating panel (dropdown, tooltip, menu) should be drawn.
//! It is the measurement-free core of the Overstory overlay stack: every input
//! arrives as plain [`kurbo`] geometry, and every output is plain geometry, so
//! the whole algorithm is testable without a host toolkit.
//!
//! ## How a position is chosen
//!
//! [`select_position`] walks the candidate list in order and applies, in
//! priority order:
//!
//! 1. **First fit**: the first candidate whose overlay rect lies completely
//!    within the (margin-narrowed) viewport wins immediately. Earlier list
//!    entries are strictly preferred; no "better centered" later candidate can
//!    displace them.
//! 2. **Flexible fit**: when flexible sizing is enabled and a candidate's
//!    configured minimum size fits between its overlay point and the viewport
//!    edges, the candidate is recorded and scanning continues. Among all such
//!    candidates the one maximizing *bounding-box area × weight* wins.
//! 3. **Push**: as a last resort (when enabled), the candidate with the
//!    largest visible area is translated by the smallest vector that brings it
//!    fully on-screen. An overlay larger than the viewport on an axis is
//!    anchored to the viewport's near edge and allowed to overflow the far one.
//! 4. Otherwise the largest-visible-area candidate is used as-is, clipped.
//!
//! [`realign`] re-applies a previously selected pair against fresh
//! measurements without re-running the ranking, so scroll- and resize-driven
//! updates cannot flip a menu's orientation.
//!
//! ## Coordinate conventions
//!
//! All rectangles live in *document* coordinates (y grows downward). The
//! produced [`PaneGeometry`] and [`BoundingBoxGeometry`] express CSS-style
//! insets relative to the viewport rect, choosing `top` vs `bottom` and
//! `left` vs `right` edges so that the overlay expands away from its anchored
//! edge. Under [`Direction::Rtl`] all `start`/`end` semantics invert; `center`
//! is direction-invariant.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Rect, Size};
//! use overstory_position::{
//!     ConnectionPair, Direction, HorizontalEdge, LayoutFrame, SizeConstraints, SolverConfig,
//!     VerticalEdge, select_position,
//! };
//!
//! // A menu that prefers to open below its trigger, start-aligned.
//! let below = ConnectionPair::new(
//!     HorizontalEdge::Start,
//!     VerticalEdge::Bottom,
//!     HorizontalEdge::Start,
//!     VerticalEdge::Top,
//! );
//!
//! let frame = LayoutFrame {
//!     origin: Rect::new(50.0, 100.0, 90.0, 120.0),
//!     overlay: Size::new(200.0, 30.0),
//!     viewport: Rect::new(0.0, 0.0, 400.0, 300.0),
//! };
//!
//! let selection = select_position(
//!     &SolverConfig::default(),
//!     &SizeConstraints::default(),
//!     Direction::Ltr,
//!     &frame,
//!     &[below],
//!     None,
//! )
//! .unwrap();
//!
//! assert_eq!(selection.overlay_point.x, 50.0);
//! assert_eq!(selection.overlay_point.y, 120.0);
//! assert!(!selection.is_pushed);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod bounding;
mod fit;
mod geometry;
mod pair;
mod solver;

pub use bounding::BoundingBoxGeometry;
pub use fit::{OverlayFit, push_on_screen};
pub use geometry::{HorizontalInset, PaneGeometry, VerticalInset};
pub use pair::{ConnectionPair, Direction, HorizontalEdge, VerticalEdge};
pub use solver::{
    LayoutFrame, Selection, SizeConstraints, SolveError, SolverConfig, realign, select_position,
};
