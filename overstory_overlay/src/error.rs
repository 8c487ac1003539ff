// Copyright 2026 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlay error taxonomy.

use overstory_position::SolveError;
use thiserror::Error;

/// Errors raised by overlay configuration and positioning calls.
///
/// All of these are synchronous configuration errors: they propagate to the
/// violating caller, are never retried, and leave the overlay's state
/// untouched.
#[derive(Copy, Clone, Debug, PartialEq, Error)]
pub enum OverlayError {
    /// The strategy is already attached to an overlay.
    #[error("position strategy is already attached to an overlay")]
    StrategyAlreadyAttached,
    /// A positioning call arrived before [`attach`](crate::ConnectedPositionStrategy::attach).
    #[error("position strategy is not attached to an overlay")]
    StrategyNotAttached,
    /// The overlay has already been disposed.
    #[error("overlay has been disposed")]
    Disposed,
    /// The solver rejected its inputs.
    #[error(transparent)]
    Solve(#[from] SolveError),
}
