// Copyright 2026 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The connected position strategy: per-overlay state around the pure solver.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::fmt;

use kurbo::{Rect, Size};
use smallvec::SmallVec;

use overstory_position::{
    BoundingBoxGeometry, ConnectionPair, LayoutFrame, PaneGeometry, Selection, SolveError,
    SolverConfig, realign, select_position,
};
use overstory_viewport::scrolling_visibility;

use crate::error::OverlayError;
use crate::events::{PositionChange, Publisher, SubscriptionId};

/// Read-only capability an overlay grants its strategy at attach time.
///
/// The strategy reads the owning overlay's direction and size constraints
/// through this interface instead of holding a back-pointer, so the solver
/// sees exactly the state the overlay exposes and nothing more.
pub trait OverlayContext: fmt::Debug {
    /// The owning context's current layout direction.
    fn direction(&self) -> overstory_position::Direction;
    /// The owning overlay's current size constraints.
    fn size_constraints(&self) -> overstory_position::SizeConstraints;
}

/// The computed output of one positioning pass, ready for the write phase.
///
/// The strategy performs no writes itself; the caller (normally
/// [`OverlayRef`](crate::OverlayRef)) applies this to the pane surface.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AppliedPosition {
    /// CSS-equivalent insets for the pane.
    pub pane: PaneGeometry,
    /// Geometry of the sizing wrapper.
    pub bounding_box: BoundingBoxGeometry,
    /// The event payload emitted for this pass.
    pub change: PositionChange,
}

/// Positions an overlay relative to an origin element from a ranked list of
/// [`ConnectionPair`]s.
///
/// The strategy owns the solver configuration and the per-overlay state that
/// spans passes:
///
/// - the *last-applied pair*, so [`ConnectedPositionStrategy::reapply`] can
///   track scroll and resize without re-ranking (and without flipping a
///   menu's orientation),
/// - the *last bounding-box size*, so a flexible overlay shrinks but never
///   grows back open unless configured to,
/// - whether the last pass *pushed* the overlay on-screen,
/// - the position-change listeners.
///
/// A strategy is bound to exactly one overlay via
/// [`ConnectedPositionStrategy::attach`]; attaching twice is an error.
pub struct ConnectedPositionStrategy {
    config: SolverConfig,
    positions: SmallVec<[ConnectionPair; 4]>,
    clipping_containers: Vec<Rect>,
    context: Option<Rc<dyn OverlayContext>>,
    last_pair: Option<ConnectionPair>,
    last_bounding_box: Option<Size>,
    is_pushed: bool,
    publisher: Publisher,
}

impl ConnectedPositionStrategy {
    /// Create a strategy with the given solver configuration and no
    /// positions yet.
    #[must_use]
    pub fn new(config: SolverConfig) -> Self {
        Self {
            config,
            positions: SmallVec::new(),
            clipping_containers: Vec::new(),
            context: None,
            last_pair: None,
            last_bounding_box: None,
            is_pushed: false,
            publisher: Publisher::new(),
        }
    }

    /// Set the ranked preferred positions, consuming-builder style.
    #[must_use]
    pub fn with_positions(mut self, positions: impl IntoIterator<Item = ConnectionPair>) -> Self {
        self.set_positions(positions);
        self
    }

    /// Replace the ranked preferred positions.
    ///
    /// The list may be replaced at any time; an empty list is only rejected
    /// when a positioning call happens.
    pub fn set_positions(&mut self, positions: impl IntoIterator<Item = ConnectionPair>) {
        self.positions = positions.into_iter().collect();
        // A replaced list invalidates the remembered pair.
        self.last_pair = None;
    }

    /// The ranked preferred positions.
    #[must_use]
    pub fn positions(&self) -> &[ConnectionPair] {
        &self.positions
    }

    /// Set the rects of ancestor scrollable containers.
    ///
    /// These only feed the visibility flags on emitted events; they play no
    /// part in fit selection.
    pub fn set_clipping_containers(&mut self, containers: Vec<Rect>) {
        self.clipping_containers = containers;
    }

    /// The solver configuration.
    #[must_use]
    pub const fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// The pair applied by the most recent pass, if any.
    #[must_use]
    pub fn last_position(&self) -> Option<ConnectionPair> {
        self.last_pair
    }

    /// Bind this strategy to its owning overlay.
    ///
    /// # Errors
    ///
    /// [`OverlayError::StrategyAlreadyAttached`] if the strategy is already
    /// bound.
    pub fn attach(&mut self, context: Rc<dyn OverlayContext>) -> Result<(), OverlayError> {
        if self.context.is_some() {
            return Err(OverlayError::StrategyAlreadyAttached);
        }
        self.context = Some(context);
        Ok(())
    }

    /// Whether the strategy is bound to an overlay.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.context.is_some()
    }

    /// Run a full fit-selection pass and emit a position-change event.
    ///
    /// # Errors
    ///
    /// [`OverlayError::StrategyNotAttached`] before [`Self::attach`];
    /// [`SolveError::NoPositions`] and [`SolveError::DetachedOrigin`]
    /// propagate from the solver.
    pub fn apply(&mut self, frame: &LayoutFrame) -> Result<AppliedPosition, OverlayError> {
        let (direction, constraints) = self.context_state()?;
        let selection = select_position(
            &self.config,
            &constraints,
            direction,
            frame,
            &self.positions,
            self.last_bounding_box,
        )?;
        log::debug!(
            "overlay position applied: pair {:?}, pushed {}",
            selection.pair,
            selection.is_pushed,
        );
        Ok(self.finish_pass(frame, selection))
    }

    /// Re-align the last applied pair against fresh measurements, without
    /// re-ranking the candidate list.
    ///
    /// Falls back to the first preferred position before any
    /// [`Self::apply`]. Errors as for [`Self::apply`].
    pub fn reapply(&mut self, frame: &LayoutFrame) -> Result<AppliedPosition, OverlayError> {
        let (direction, constraints) = self.context_state()?;
        let pair = self
            .last_pair
            .or_else(|| self.positions.first().copied())
            .ok_or(OverlayError::Solve(SolveError::NoPositions))?;
        let selection = realign(
            &self.config,
            &constraints,
            direction,
            frame,
            &pair,
            self.is_pushed,
            self.last_bounding_box,
        )?;
        Ok(self.finish_pass(frame, selection))
    }

    /// Subscribe to position-change events.
    pub fn on_position_change(
        &mut self,
        listener: impl FnMut(&PositionChange) + 'static,
    ) -> SubscriptionId {
        self.publisher.subscribe(listener)
    }

    /// Remove a position-change listener. Returns `false` if the id was
    /// already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.publisher.unsubscribe(id)
    }

    /// Release the attach binding and all listeners.
    ///
    /// Safe to call any number of times; further positioning calls error
    /// with [`OverlayError::StrategyNotAttached`].
    pub fn dispose(&mut self) {
        self.context = None;
        self.last_pair = None;
        self.last_bounding_box = None;
        self.is_pushed = false;
        self.publisher.clear();
    }

    fn context_state(
        &self,
    ) -> Result<(overstory_position::Direction, overstory_position::SizeConstraints), OverlayError>
    {
        let context = self
            .context
            .as_ref()
            .ok_or(OverlayError::StrategyNotAttached)?;
        Ok((context.direction(), context.size_constraints()))
    }

    fn finish_pass(&mut self, frame: &LayoutFrame, selection: Selection) -> AppliedPosition {
        self.last_pair = Some(selection.pair);
        self.last_bounding_box = Some(selection.bounding_box.rect.size());
        self.is_pushed = selection.is_pushed;

        let overlay_rect = Rect::from_origin_size(selection.overlay_point, frame.overlay);
        let visibility =
            scrolling_visibility(frame.origin, overlay_rect, &self.clipping_containers);
        let change = PositionChange {
            pair: selection.pair,
            visibility,
            is_pushed: selection.is_pushed,
        };
        self.publisher.emit(&change);

        AppliedPosition {
            pane: selection.pane,
            bounding_box: selection.bounding_box,
            change,
        }
    }
}

impl fmt::Debug for ConnectedPositionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectedPositionStrategy")
            .field("config", &self.config)
            .field("positions", &self.positions)
            .field("attached", &self.context.is_some())
            .field("last_pair", &self.last_pair)
            .field("last_bounding_box", &self.last_bounding_box)
            .field("is_pushed", &self.is_pushed)
            .field("publisher", &self.publisher)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::{Cell, RefCell};
    use kurbo::Size;
    use overstory_position::{Direction, HorizontalEdge, SizeConstraints, VerticalEdge};
    use overstory_viewport::ScrollingVisibility;

    #[derive(Debug, Default)]
    struct FixedContext {
        direction: Direction,
        constraints: SizeConstraints,
    }

    impl OverlayContext for FixedContext {
        fn direction(&self) -> Direction {
            self.direction
        }
        fn size_constraints(&self) -> SizeConstraints {
            self.constraints
        }
    }

    fn below_start() -> ConnectionPair {
        ConnectionPair::new(
            HorizontalEdge::Start,
            VerticalEdge::Bottom,
            HorizontalEdge::Start,
            VerticalEdge::Top,
        )
    }

    fn above_start() -> ConnectionPair {
        ConnectionPair::new(
            HorizontalEdge::Start,
            VerticalEdge::Top,
            HorizontalEdge::Start,
            VerticalEdge::Bottom,
        )
    }

    fn frame(origin: Rect) -> LayoutFrame {
        LayoutFrame {
            origin,
            overlay: Size::new(200.0, 100.0),
            viewport: Rect::new(0.0, 0.0, 400.0, 300.0),
        }
    }

    fn attached_strategy() -> ConnectedPositionStrategy {
        let mut strategy = ConnectedPositionStrategy::new(SolverConfig::default())
            .with_positions([below_start(), above_start()]);
        strategy
            .attach(Rc::new(FixedContext::default()))
            .unwrap();
        strategy
    }

    #[test]
    fn attach_twice_is_an_error() {
        let mut strategy = attached_strategy();
        assert!(strategy.is_attached());
        assert_eq!(
            strategy.attach(Rc::new(FixedContext::default())),
            Err(OverlayError::StrategyAlreadyAttached),
        );
    }

    #[test]
    fn positioning_before_attach_is_an_error() {
        let mut strategy = ConnectedPositionStrategy::new(SolverConfig::default())
            .with_positions([below_start()]);
        let frame = frame(Rect::new(50.0, 100.0, 90.0, 120.0));
        assert_eq!(
            strategy.apply(&frame),
            Err(OverlayError::StrategyNotAttached)
        );
        assert_eq!(
            strategy.reapply(&frame),
            Err(OverlayError::StrategyNotAttached)
        );
    }

    #[test]
    fn empty_positions_surface_the_solver_error() {
        let mut strategy = ConnectedPositionStrategy::new(SolverConfig::default());
        strategy.attach(Rc::new(FixedContext::default())).unwrap();
        let result = strategy.apply(&frame(Rect::new(50.0, 100.0, 90.0, 120.0)));
        assert_eq!(result, Err(OverlayError::Solve(SolveError::NoPositions)));
    }

    #[test]
    fn apply_records_the_winning_pair_and_emits_it() {
        let mut strategy = attached_strategy();
        let seen: Rc<RefCell<Vec<PositionChange>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        strategy.on_position_change(move |change| sink.borrow_mut().push(*change));

        let applied = strategy
            .apply(&frame(Rect::new(50.0, 100.0, 90.0, 120.0)))
            .unwrap();
        assert_eq!(applied.change.pair, below_start());
        assert_eq!(strategy.last_position(), Some(below_start()));
        assert_eq!(seen.borrow().as_slice(), &[applied.change]);
    }

    #[test]
    fn reapply_keeps_orientation_when_the_layout_shifts() {
        let mut strategy = attached_strategy();
        // Plenty of room below: "below" wins the ranking.
        strategy
            .apply(&frame(Rect::new(50.0, 100.0, 90.0, 120.0)))
            .unwrap();

        // The origin scrolls toward the bottom edge. A fresh ranking would
        // flip to "above"; reapply must not.
        let shifted = frame(Rect::new(50.0, 250.0, 90.0, 270.0));
        let reapplied = strategy.reapply(&shifted).unwrap();
        assert_eq!(reapplied.change.pair, below_start());

        let reranked = strategy.apply(&shifted).unwrap();
        assert_eq!(reranked.change.pair, above_start());
    }

    #[test]
    fn reapply_before_any_apply_uses_the_first_preferred_position() {
        let mut strategy = attached_strategy();
        let applied = strategy
            .reapply(&frame(Rect::new(50.0, 250.0, 90.0, 270.0)))
            .unwrap();
        assert_eq!(applied.change.pair, below_start());
    }

    #[test]
    fn replacing_positions_forgets_the_last_pair() {
        let mut strategy = attached_strategy();
        strategy
            .apply(&frame(Rect::new(50.0, 100.0, 90.0, 120.0)))
            .unwrap();
        assert!(strategy.last_position().is_some());

        strategy.set_positions([above_start()]);
        assert_eq!(strategy.last_position(), None);
        let applied = strategy
            .reapply(&frame(Rect::new(50.0, 250.0, 90.0, 270.0)))
            .unwrap();
        assert_eq!(applied.change.pair, above_start());
    }

    #[test]
    fn clipping_containers_feed_the_event_visibility_flags() {
        let mut strategy = attached_strategy();
        // A container that has scrolled the origin out of view.
        strategy.set_clipping_containers(vec![Rect::new(0.0, 0.0, 400.0, 80.0)]);
        let applied = strategy
            .apply(&frame(Rect::new(50.0, 100.0, 90.0, 120.0)))
            .unwrap();
        assert!(applied
            .change
            .visibility
            .contains(ScrollingVisibility::ORIGIN_OUT_OF_VIEW));
        assert!(applied
            .change
            .visibility
            .contains(ScrollingVisibility::OVERLAY_OUT_OF_VIEW));
    }

    #[test]
    fn pushed_state_is_reported_and_reused_by_reapply() {
        let mut strategy = ConnectedPositionStrategy::new(
            SolverConfig::default().with_push(true),
        )
        .with_positions([below_start()]);
        strategy.attach(Rc::new(FixedContext::default())).unwrap();

        // Nothing fits: the single candidate is pushed back on-screen.
        let tight = frame(Rect::new(350.0, 280.0, 390.0, 300.0));
        let applied = strategy.apply(&tight).unwrap();
        assert!(applied.change.is_pushed);

        let reapplied = strategy.reapply(&tight).unwrap();
        assert!(reapplied.change.is_pushed);
        assert_eq!(reapplied.pane, applied.pane);
    }

    #[test]
    fn bounding_box_size_is_carried_across_passes() {
        let mut strategy = ConnectedPositionStrategy::new(SolverConfig::default())
            .with_positions([below_start()]);
        strategy.attach(Rc::new(FixedContext::default())).unwrap();

        let first = strategy
            .apply(&frame(Rect::new(50.0, 200.0, 90.0, 220.0)))
            .unwrap();
        let first_size = first.bounding_box.rect.size();

        // More room below on the second pass; the wrapper must not grow.
        let second = strategy
            .apply(&frame(Rect::new(50.0, 100.0, 90.0, 120.0)))
            .unwrap();
        assert_eq!(second.bounding_box.rect.size(), first_size);
    }

    #[test]
    fn rtl_context_flips_the_selected_geometry() {
        let mut strategy = ConnectedPositionStrategy::new(SolverConfig::default())
            .with_positions([below_start()]);
        strategy
            .attach(Rc::new(FixedContext {
                direction: Direction::Rtl,
                constraints: SizeConstraints::default(),
            }))
            .unwrap();
        let applied = strategy
            .apply(&frame(Rect::new(250.0, 100.0, 290.0, 120.0)))
            .unwrap();
        // Start resolves to the origin's right edge under RTL, and the pane
        // is expressed as a right-edge inset.
        assert_eq!(
            applied.pane.horizontal,
            overstory_position::HorizontalInset::FromRight(400.0 - 290.0),
        );
    }

    #[test]
    fn dispose_is_idempotent_and_silences_listeners() {
        let mut strategy = attached_strategy();
        let count = Rc::new(Cell::new(0_u32));
        let sink = count.clone();
        strategy.on_position_change(move |_| sink.set(sink.get() + 1));

        strategy.dispose();
        strategy.dispose();
        assert!(!strategy.is_attached());
        assert_eq!(
            strategy.apply(&frame(Rect::new(50.0, 100.0, 90.0, 120.0))),
            Err(OverlayError::StrategyNotAttached)
        );
        assert_eq!(count.get(), 0);

        // A disposed strategy may be attached again.
        strategy.attach(Rc::new(FixedContext::default())).unwrap();
        assert!(strategy.is_attached());
    }
}
