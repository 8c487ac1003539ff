// Copyright 2026 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=overstory_overlay --heading-base-level=0

//! Overstory Overlay: overlay lifecycle around the pure positioning solver.
//!
//! This crate is the stateful layer of the Overstory stack. It owns nothing
//! host-specific: panes are written through the [`PaneSurface`] trait, and
//! all measurements arrive as plain geometry, so the whole overlay lifecycle
//! runs under test without a DOM or widget tree.
//!
//! - [`ConnectedPositionStrategy`]: wraps
//!   [`overstory_position::select_position`] with the per-overlay state a
//!   real overlay needs — the preferred positions, the last-applied pair
//!   (so scroll tracking never flips orientation), the last bounding-box
//!   size (so flexible overlays don't jitter back open), and a
//!   position-change publisher.
//! - [`OverlayRef`]: per-overlay state holder — configuration, the pane
//!   surface, the attached strategy — with an idempotent [`OverlayRef::dispose`].
//! - [`Overlay`]: the factory that creates panes through an [`OverlayHost`]
//!   and wires pane, config, and strategy slot together.
//!
//! ## A positioning pass
//!
//! Every pass is synchronous and strictly measure-then-write: the host
//! measures the origin and pane, the strategy selects a placement and
//! returns an [`AppliedPosition`], and the overlay writes the resulting
//! geometry back through the pane surface. Between the measurement and the
//! write nothing re-enters the algorithm, so a pass is always consistent
//! with a single snapshot of layout.
//!
//! Configuration errors (double attach, an empty position list, a detached
//! origin) surface synchronously as [`OverlayError`]; there are no retries
//! and no internal recovery.

#![no_std]

extern crate alloc;

mod config;
mod error;
mod events;
mod factory;
mod host;
mod overlay_ref;
mod strategy;

pub use config::{OverlayConfig, ScrollPolicy};
pub use error::OverlayError;
pub use events::{PositionChange, SubscriptionId};
pub use factory::Overlay;
pub use host::{OverlayHost, PaneSurface};
pub use overlay_ref::OverlayRef;
pub use strategy::{AppliedPosition, ConnectedPositionStrategy, OverlayContext};
