// Copyright 2026 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport geometry, fed by the host and queried per positioning pass.

use kurbo::{Point, Rect, Size, Vec2};

/// Measures the visible viewport in document coordinates.
///
/// The host pushes the client size and page scroll offset into the ruler
/// whenever its resize/scroll notifications fire; [`ViewportRuler::viewport_rect`]
/// is then a pure, allocation-free query, cheap enough to call once per
/// positioning pass. The ruler never mutates anything itself.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ViewportRuler {
    size: Size,
    scroll: Vec2,
}

impl ViewportRuler {
    /// Create a ruler for a viewport of the given client size, scrolled to the
    /// document origin.
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self {
            size: clamp_size(size),
            scroll: Vec2::ZERO,
        }
    }

    /// Record a new client size (a resize notification).
    pub fn set_viewport_size(&mut self, size: Size) {
        self.size = clamp_size(size);
    }

    /// Record a new page scroll offset (a scroll notification).
    pub fn set_scroll_position(&mut self, scroll: Vec2) {
        self.scroll = scroll;
    }

    /// The current client size.
    #[must_use]
    pub const fn viewport_size(&self) -> Size {
        self.size
    }

    /// The current page scroll offset.
    #[must_use]
    pub const fn scroll_position(&self) -> Vec2 {
        self.scroll
    }

    /// The visible viewport rect in document coordinates: the client size
    /// placed at the scroll offset.
    #[must_use]
    pub fn viewport_rect(&self) -> Rect {
        Rect::from_origin_size(Point::new(self.scroll.x, self.scroll.y), self.size)
    }
}

fn clamp_size(size: Size) -> Size {
    Size::new(size.width.max(0.0), size.height.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_rect_tracks_scroll_and_size() {
        let mut ruler = ViewportRuler::new(Size::new(400.0, 300.0));
        assert_eq!(ruler.viewport_rect(), Rect::new(0.0, 0.0, 400.0, 300.0));

        ruler.set_scroll_position(Vec2::new(10.0, 250.0));
        assert_eq!(ruler.viewport_rect(), Rect::new(10.0, 250.0, 410.0, 550.0));

        ruler.set_viewport_size(Size::new(800.0, 600.0));
        assert_eq!(ruler.viewport_rect(), Rect::new(10.0, 250.0, 810.0, 850.0));
        assert_eq!(ruler.scroll_position(), Vec2::new(10.0, 250.0));
    }

    #[test]
    fn negative_sizes_are_clamped() {
        let ruler = ViewportRuler::new(Size::new(-5.0, 300.0));
        assert_eq!(ruler.viewport_size(), Size::new(0.0, 300.0));
    }
}
