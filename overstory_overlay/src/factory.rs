// Copyright 2026 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The overlay factory: creates panes and wires overlays together.

use alloc::rc::Rc;
use core::cell::RefCell;
use core::fmt;

use overstory_position::SolverConfig;
use overstory_viewport::ViewportRuler;

use crate::config::OverlayConfig;
use crate::host::OverlayHost;
use crate::overlay_ref::OverlayRef;

/// Creates overlays.
///
/// The factory owns the [`OverlayHost`] that produces panes and the shared
/// [`ViewportRuler`] every created overlay measures against. One factory per
/// rendering surface; any number of overlays.
pub struct Overlay<H: OverlayHost> {
    host: H,
    ruler: Rc<RefCell<ViewportRuler>>,
}

impl<H: OverlayHost> Overlay<H> {
    /// Create a factory over the given host and viewport ruler.
    pub fn new(host: H, ruler: ViewportRuler) -> Self {
        Self {
            host,
            ruler: Rc::new(RefCell::new(ruler)),
        }
    }

    /// The shared viewport ruler. The host feeds scroll and resize
    /// notifications into this handle; every overlay reads it per pass.
    #[must_use]
    pub fn ruler(&self) -> Rc<RefCell<ViewportRuler>> {
        self.ruler.clone()
    }

    /// Create a pane through the host and wrap it into an [`OverlayRef`]
    /// with the given configuration.
    pub fn create(&mut self, config: OverlayConfig) -> OverlayRef<H::Pane> {
        let pane = self.host.create_pane();
        OverlayRef::new(pane, config, self.ruler.clone())
    }

    /// Seed a solver configuration for a connected position strategy: no
    /// margin, no flexible sizing, no pushing.
    #[must_use]
    pub fn position(&self) -> SolverConfig {
        SolverConfig::default()
    }
}

impl<H: OverlayHost + fmt::Debug> fmt::Debug for Overlay<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Overlay")
            .field("host", &self.host)
            .field("ruler", &self.ruler)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use core::cell::RefCell;
    use kurbo::{Rect, Size, Vec2};
    use overstory_position::{
        BoundingBoxGeometry, ConnectionPair, HorizontalEdge, PaneGeometry, VerticalEdge,
        VerticalInset,
    };

    use crate::host::PaneSurface;
    use crate::strategy::ConnectedPositionStrategy;

    #[derive(Debug)]
    struct CountingPane {
        id: u32,
        last_pane: Rc<RefCell<Option<PaneGeometry>>>,
    }

    impl PaneSurface for CountingPane {
        fn apply_pane_geometry(&mut self, geometry: &PaneGeometry) {
            *self.last_pane.borrow_mut() = Some(*geometry);
        }
        fn apply_bounding_box(&mut self, _geometry: &BoundingBoxGeometry) {}
        fn clear_geometry(&mut self) {
            *self.last_pane.borrow_mut() = None;
        }
        fn release(&mut self) {}
    }

    #[derive(Debug, Default)]
    struct CountingHost {
        created: u32,
        last_pane: Rc<RefCell<Option<PaneGeometry>>>,
    }

    impl OverlayHost for CountingHost {
        type Pane = CountingPane;

        fn create_pane(&mut self) -> CountingPane {
            self.created += 1;
            CountingPane {
                id: self.created,
                last_pane: self.last_pane.clone(),
            }
        }
    }

    #[test]
    fn each_created_overlay_gets_its_own_pane() {
        let mut factory = Overlay::new(
            CountingHost::default(),
            ViewportRuler::new(Size::new(400.0, 300.0)),
        );
        let first = factory.create(OverlayConfig::default());
        let second = factory.create(OverlayConfig::default());
        assert!(!first.is_disposed());
        assert!(!second.is_disposed());
        assert_eq!(factory.host.created, 2);
    }

    #[test]
    fn created_overlays_share_the_factory_ruler() {
        let mut factory = Overlay::new(
            CountingHost::default(),
            ViewportRuler::new(Size::new(400.0, 300.0)),
        );
        let last_pane = factory.host.last_pane.clone();
        let mut overlay = factory.create(OverlayConfig::default());
        overlay
            .attach_strategy(
                ConnectedPositionStrategy::new(factory.position()).with_positions([
                    ConnectionPair::new(
                        HorizontalEdge::Start,
                        VerticalEdge::Bottom,
                        HorizontalEdge::Start,
                        VerticalEdge::Top,
                    ),
                ]),
            )
            .unwrap();

        factory
            .ruler()
            .borrow_mut()
            .set_scroll_position(Vec2::new(0.0, 50.0));
        overlay
            .update_position(Rect::new(50.0, 100.0, 90.0, 120.0), Size::new(200.0, 30.0))
            .unwrap();
        let written = last_pane.borrow().expect("pane geometry written");
        assert_eq!(written.vertical, VerticalInset::FromTop(70.0));
    }

    #[test]
    fn pane_ids_are_distinct() {
        let mut host = CountingHost::default();
        let a = host.create_pane();
        let b = host.create_pane();
        assert_ne!(a.id, b.id);
    }
}
