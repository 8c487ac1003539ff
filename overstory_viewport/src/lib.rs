// Copyright 2026 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=overstory_viewport --heading-base-level=0

//! Overstory Viewport: viewport measurement and scroll-visibility primitives.
//!
//! This crate supplies the measurement side of the Overstory overlay stack:
//!
//! - [`ViewportRuler`]: the current viewport rect in document coordinates,
//!   fed by the host on scroll/resize and queried once per positioning pass.
//! - [`is_scrolled_out_of_view`] / [`is_clipped_by_scrolling`]: pure
//!   predicates testing a rect against a set of ancestor scroll containers.
//! - [`ScrollingVisibility`]: the flag set carried on position-change events,
//!   derived from the predicates via [`scrolling_visibility`].
//! - [`ScrollableRegistry`]: tracks which containers are scrollable, keyed by
//!   a caller-chosen handle, and filters them down to the ancestors of a
//!   given origin.
//!
//! Like the rest of Overstory, nothing here talks to a real DOM or widget
//! tree. The host measures; this crate stores and answers. A typical pass:
//!
//! ```rust
//! use kurbo::{Rect, Size, Vec2};
//! use overstory_viewport::{ScrollableRegistry, ViewportRuler, scrolling_visibility};
//!
//! let mut ruler = ViewportRuler::new(Size::new(1024.0, 768.0));
//! ruler.set_scroll_position(Vec2::new(0.0, 200.0));
//! assert_eq!(ruler.viewport_rect(), Rect::new(0.0, 200.0, 1024.0, 968.0));
//!
//! // The host registers scroll containers as it discovers them…
//! let mut registry: ScrollableRegistry<u32> = ScrollableRegistry::new();
//! registry.register(7, Rect::new(0.0, 250.0, 1024.0, 700.0));
//!
//! // …and, per pass, narrows them to the origin's ancestors by key path.
//! let containers = registry.ancestor_rects(&[1, 7, 42]);
//! let origin = Rect::new(100.0, 260.0, 180.0, 290.0);
//! let overlay = Rect::new(100.0, 290.0, 400.0, 500.0);
//! let visibility = scrolling_visibility(origin, overlay, &containers);
//! assert!(visibility.is_empty());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod clip;
mod registry;
mod ruler;

pub use clip::{ScrollingVisibility, is_clipped_by_scrolling, is_scrolled_out_of_view, scrolling_visibility};
pub use registry::ScrollableRegistry;
pub use ruler::ViewportRuler;
