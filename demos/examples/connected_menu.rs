// Copyright 2026 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Connected positioning end to end against a synthetic host.
//!
//! This example wires the whole stack together:
//! - `overstory_viewport` for the ruler and the scrollable registry,
//! - `overstory_position` for the solver configuration and positions,
//! - `overstory_overlay` for the factory, overlay, and strategy.
//!
//! The "host" just prints every write it receives, standing in for a real
//! rendering surface.
//!
//! Run:
//! - `cargo run -p overstory_demos --example connected_menu`

use kurbo::{Rect, Size, Vec2};
use log::LevelFilter;
use simplelog::{Config, SimpleLogger};

use overstory_overlay::{
    ConnectedPositionStrategy, Overlay, OverlayConfig, OverlayHost, PaneSurface, ScrollPolicy,
};
use overstory_position::{
    BoundingBoxGeometry, ConnectionPair, HorizontalEdge, PaneGeometry, VerticalEdge,
};
use overstory_viewport::{ScrollableRegistry, ViewportRuler};

/// A pane that prints every geometry write.
#[derive(Debug)]
struct PrintingPane {
    id: u32,
}

impl PaneSurface for PrintingPane {
    fn apply_pane_geometry(&mut self, geometry: &PaneGeometry) {
        println!("pane #{}: {:?} / {:?}", self.id, geometry.horizontal, geometry.vertical);
    }

    fn apply_bounding_box(&mut self, geometry: &BoundingBoxGeometry) {
        println!("pane #{}: bounding box {:?}", self.id, geometry.rect);
    }

    fn clear_geometry(&mut self) {
        println!("pane #{}: cleared", self.id);
    }

    fn release(&mut self) {
        println!("pane #{}: released", self.id);
    }
}

#[derive(Debug, Default)]
struct PrintingHost {
    created: u32,
}

impl OverlayHost for PrintingHost {
    type Pane = PrintingPane;

    fn create_pane(&mut self) -> PrintingPane {
        self.created += 1;
        PrintingPane { id: self.created }
    }
}

fn main() {
    SimpleLogger::init(LevelFilter::Debug, Config::default()).expect("logger");

    let mut factory = Overlay::new(
        PrintingHost::default(),
        ViewportRuler::new(Size::new(1024.0, 768.0)),
    );

    // A menu anchored to a trigger near the bottom of the page: prefer
    // opening below, flip above when there is no room.
    let mut menu = factory.create(
        OverlayConfig::default()
            .with_min_size(None, Some(120.0))
            .with_scroll_policy(ScrollPolicy::Reposition),
    );
    let solver = factory
        .position()
        .with_viewport_margin(8.0)
        .with_flexible_height(true)
        .with_push(true);
    menu.attach_strategy(
        ConnectedPositionStrategy::new(solver).with_positions([
            ConnectionPair::new(
                HorizontalEdge::Start,
                VerticalEdge::Bottom,
                HorizontalEdge::Start,
                VerticalEdge::Top,
            ),
            ConnectionPair::new(
                HorizontalEdge::Start,
                VerticalEdge::Top,
                HorizontalEdge::Start,
                VerticalEdge::Bottom,
            ),
        ]),
    )
    .expect("fresh strategy attaches");

    // The page's scrollable sidebar feeds the visibility flags on events.
    let mut registry: ScrollableRegistry<&str> = ScrollableRegistry::new();
    registry.register("content", Rect::new(0.0, 0.0, 1024.0, 2000.0));
    menu.strategy_mut()
        .expect("strategy attached")
        .set_clipping_containers(registry.ancestor_rects(&["content"]));
    menu.strategy_mut()
        .expect("strategy attached")
        .on_position_change(|change| {
            println!(
                "position change: pushed={} visibility={:?}",
                change.is_pushed, change.visibility
            );
        });

    let origin = Rect::new(40.0, 700.0, 160.0, 724.0);
    let pane_size = Size::new(240.0, 320.0);

    menu.attach_content().expect("live overlay");
    menu.update_position(origin, pane_size).expect("positioning");

    // The page scrolls; the Reposition policy re-aligns the last-applied
    // position instead of re-ranking.
    factory
        .ruler()
        .borrow_mut()
        .set_scroll_position(Vec2::new(0.0, 120.0));
    menu.notify_scrolled(origin, pane_size).expect("reposition");

    menu.dispose();
}
