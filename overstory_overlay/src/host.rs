// Copyright 2026 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host integration seams: pane creation and the write adapters.

use overstory_position::{BoundingBoxGeometry, PaneGeometry};

/// The write side of a positioning pass.
///
/// Implementations are thin adapters onto whatever the host renders with
/// (CSS styles, widget properties, draw commands). All decisions are made
/// before these methods run; an implementation must only transcribe the
/// given geometry.
pub trait PaneSurface {
    /// Write the pane's insets.
    fn apply_pane_geometry(&mut self, geometry: &PaneGeometry);
    /// Write the sizing wrapper's position and size.
    fn apply_bounding_box(&mut self, geometry: &BoundingBoxGeometry);
    /// Remove previously written geometry (content detached).
    fn clear_geometry(&mut self);
    /// The pane is being torn down for good.
    fn release(&mut self);
}

/// Creates panes for the [`Overlay`](crate::Overlay) factory.
pub trait OverlayHost {
    /// The pane type this host produces.
    type Pane: PaneSurface;

    /// Create a fresh, empty pane.
    fn create_pane(&mut self) -> Self::Pane;
}
