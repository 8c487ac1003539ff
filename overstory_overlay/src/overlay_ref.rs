// Copyright 2026 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-overlay state: configuration, pane, and the attached strategy.

use alloc::rc::Rc;
use core::cell::RefCell;
use core::fmt;

use kurbo::{Rect, Size};

use overstory_position::{Direction, LayoutFrame, SizeConstraints};
use overstory_viewport::ViewportRuler;

use crate::config::{OverlayConfig, ScrollPolicy};
use crate::error::OverlayError;
use crate::events::PositionChange;
use crate::host::PaneSurface;
use crate::strategy::{ConnectedPositionStrategy, OverlayContext};

#[derive(Debug)]
struct OverlayState {
    config: OverlayConfig,
    attached: bool,
    disposed: bool,
}

/// The capability handle a strategy reads shared overlay state through.
#[derive(Debug)]
struct StateHandle(Rc<RefCell<OverlayState>>);

impl OverlayContext for StateHandle {
    fn direction(&self) -> Direction {
        self.0.borrow().config.direction
    }

    fn size_constraints(&self) -> SizeConstraints {
        self.0.borrow().config.size_constraints()
    }
}

/// A handle to one created overlay.
///
/// Owns the pane surface and the attached position strategy (the strategy
/// never outlives its overlay), and holds the mutable [`OverlayConfig`].
/// Every positioning entry point measures first (viewport via the shared
/// [`ViewportRuler`], origin and pane via the caller) and writes last,
/// through the pane surface.
///
/// [`OverlayRef::dispose`] tears down the pane, detaches content, and
/// disposes the strategy; it is safe to call any number of times.
pub struct OverlayRef<P: PaneSurface> {
    pane: Option<P>,
    state: Rc<RefCell<OverlayState>>,
    strategy: Option<ConnectedPositionStrategy>,
    ruler: Rc<RefCell<ViewportRuler>>,
}

impl<P: PaneSurface> OverlayRef<P> {
    pub(crate) fn new(pane: P, config: OverlayConfig, ruler: Rc<RefCell<ViewportRuler>>) -> Self {
        Self {
            pane: Some(pane),
            state: Rc::new(RefCell::new(OverlayState {
                config,
                attached: false,
                disposed: false,
            })),
            strategy: None,
            ruler,
        }
    }

    /// Attach a position strategy, binding it to this overlay.
    ///
    /// A previously attached strategy is disposed and replaced. Errors if
    /// the overlay is disposed, or with
    /// [`OverlayError::StrategyAlreadyAttached`] if `strategy` is already
    /// bound elsewhere.
    pub fn attach_strategy(
        &mut self,
        mut strategy: ConnectedPositionStrategy,
    ) -> Result<(), OverlayError> {
        self.ensure_live()?;
        strategy.attach(Rc::new(StateHandle(self.state.clone())))?;
        if let Some(mut old) = self.strategy.take() {
            old.dispose();
        }
        self.strategy = Some(strategy);
        Ok(())
    }

    /// The attached strategy, if any.
    #[must_use]
    pub fn strategy(&self) -> Option<&ConnectedPositionStrategy> {
        self.strategy.as_ref()
    }

    /// Mutable access to the attached strategy (for example to replace its
    /// positions or subscribe to its events).
    pub fn strategy_mut(&mut self) -> Option<&mut ConnectedPositionStrategy> {
        self.strategy.as_mut()
    }

    /// Mark content as attached to the pane.
    ///
    /// The portal mechanics live with the host; the overlay only tracks the
    /// state. Callers normally follow up with [`OverlayRef::update_position`].
    pub fn attach_content(&mut self) -> Result<(), OverlayError> {
        self.ensure_live()?;
        self.state.borrow_mut().attached = true;
        Ok(())
    }

    /// Detach content and clear written geometry. A no-op when nothing is
    /// attached.
    pub fn detach_content(&mut self) {
        let was_attached = {
            let mut state = self.state.borrow_mut();
            let was = state.attached;
            state.attached = false;
            was
        };
        if was_attached && let Some(pane) = self.pane.as_mut() {
            pane.clear_geometry();
        }
    }

    /// Whether content is currently attached.
    #[must_use]
    pub fn has_attached(&self) -> bool {
        self.state.borrow().attached
    }

    /// Run a full positioning pass: measure, select, write.
    ///
    /// `origin` is the trigger element's current rect and `measured_pane`
    /// the pane's natural size; explicit config sizes override the latter.
    pub fn update_position(
        &mut self,
        origin: Rect,
        measured_pane: Size,
    ) -> Result<PositionChange, OverlayError> {
        self.position_pass(origin, measured_pane, false)
    }

    /// Re-align the last applied position against fresh measurements,
    /// without re-ranking the candidate list.
    pub fn reapply_position(
        &mut self,
        origin: Rect,
        measured_pane: Size,
    ) -> Result<PositionChange, OverlayError> {
        self.position_pass(origin, measured_pane, true)
    }

    /// React to an ancestor scroll notification according to the configured
    /// [`ScrollPolicy`].
    ///
    /// Returns the position change for [`ScrollPolicy::Reposition`], `None`
    /// otherwise.
    pub fn notify_scrolled(
        &mut self,
        origin: Rect,
        measured_pane: Size,
    ) -> Result<Option<PositionChange>, OverlayError> {
        self.ensure_live()?;
        // Copy the policy out so the state borrow doesn't span the pass.
        let policy = self.state.borrow().config.scroll_policy;
        match policy {
            ScrollPolicy::Noop => Ok(None),
            ScrollPolicy::Reposition => self.reapply_position(origin, measured_pane).map(Some),
            ScrollPolicy::Close => {
                self.detach_content();
                Ok(None)
            }
        }
    }

    /// Override the overlay's size per axis (`None` falls back to the
    /// measured pane size).
    pub fn set_size(&mut self, width: Option<f64>, height: Option<f64>) {
        let mut state = self.state.borrow_mut();
        state.config.width = width;
        state.config.height = height;
    }

    /// Change the layout direction. Takes effect on the next pass.
    pub fn set_direction(&mut self, direction: Direction) {
        self.state.borrow_mut().config.direction = direction;
    }

    /// Change the scroll behavior.
    pub fn set_scroll_policy(&mut self, policy: ScrollPolicy) {
        self.state.borrow_mut().config.scroll_policy = policy;
    }

    /// The current configuration.
    #[must_use]
    pub fn config(&self) -> OverlayConfig {
        self.state.borrow().config
    }

    /// Whether [`OverlayRef::dispose`] has run.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.state.borrow().disposed
    }

    /// Tear the overlay down: detach content, dispose the strategy, release
    /// the pane. Idempotent; later positioning calls error with
    /// [`OverlayError::Disposed`].
    pub fn dispose(&mut self) {
        if self.state.borrow().disposed {
            return;
        }
        self.detach_content();
        self.state.borrow_mut().disposed = true;
        if let Some(mut strategy) = self.strategy.take() {
            strategy.dispose();
        }
        if let Some(mut pane) = self.pane.take() {
            pane.release();
        }
    }

    fn position_pass(
        &mut self,
        origin: Rect,
        measured_pane: Size,
        realign: bool,
    ) -> Result<PositionChange, OverlayError> {
        self.ensure_live()?;
        let frame = LayoutFrame {
            origin,
            overlay: self.effective_pane_size(measured_pane),
            viewport: self.ruler.borrow().viewport_rect(),
        };
        let strategy = self
            .strategy
            .as_mut()
            .ok_or(OverlayError::StrategyNotAttached)?;
        let applied = if realign {
            strategy.reapply(&frame)?
        } else {
            strategy.apply(&frame)?
        };
        let Some(pane) = self.pane.as_mut() else {
            return Err(OverlayError::Disposed);
        };
        pane.apply_bounding_box(&applied.bounding_box);
        pane.apply_pane_geometry(&applied.pane);
        Ok(applied.change)
    }

    fn effective_pane_size(&self, measured: Size) -> Size {
        let config = &self.state.borrow().config;
        Size::new(
            config.width.unwrap_or(measured.width),
            config.height.unwrap_or(measured.height),
        )
    }

    fn ensure_live(&self) -> Result<(), OverlayError> {
        if self.state.borrow().disposed {
            return Err(OverlayError::Disposed);
        }
        Ok(())
    }
}

impl<P: PaneSurface> fmt::Debug for OverlayRef<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("OverlayRef")
            .field("config", &state.config)
            .field("attached", &state.attached)
            .field("disposed", &state.disposed)
            .field("has_strategy", &self.strategy.is_some())
            .finish_non_exhaustive()
    }
}
