// Copyright 2025 the Pagemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Rect, Vec2};

/// Snapshot of the whole page's scroll state.
///
/// All values are CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PageMetrics {
    /// Total scrollable width of the document.
    pub scroll_width: f64,
    /// Total scrollable height of the document.
    pub scroll_height: f64,
    /// Current horizontal page scroll offset.
    pub scroll_x: f64,
    /// Current vertical page scroll offset.
    pub scroll_y: f64,
    /// Width of the visible window, excluding scrollbars.
    pub client_width: f64,
    /// Height of the visible window, excluding scrollbars.
    pub client_height: f64,
}

impl PageMetrics {
    /// Returns the page scroll offset as a vector.
    #[must_use]
    pub fn scroll_offset(&self) -> Vec2 {
        Vec2::new(self.scroll_x, self.scroll_y)
    }
}

/// Snapshot of a single element's box and scroll state.
///
/// `bounding_client_rect` is relative to the visible window (it moves when the
/// page scrolls); every other field is independent of the page scroll offset.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ElementMetrics {
    /// Border box relative to the visible window.
    pub bounding_client_rect: Rect,
    /// Width of the left border.
    pub client_left: f64,
    /// Width of the top border.
    pub client_top: f64,
    /// Width of the padding box, excluding scrollbars.
    pub client_width: f64,
    /// Height of the padding box, excluding scrollbars.
    pub client_height: f64,
    /// Width of the border box.
    pub offset_width: f64,
    /// Height of the border box.
    pub offset_height: f64,
    /// Width of the element's scrollable content.
    pub scroll_width: f64,
    /// Height of the element's scrollable content.
    pub scroll_height: f64,
    /// Current horizontal internal scroll position.
    pub scroll_left: f64,
    /// Current vertical internal scroll position.
    pub scroll_top: f64,
}

impl ElementMetrics {
    /// Returns the border widths on the left and top edges.
    #[must_use]
    pub fn border_offset(&self) -> Vec2 {
        Vec2::new(self.client_left, self.client_top)
    }

    /// Returns the element's internal scroll position.
    #[must_use]
    pub fn scroll_offset(&self) -> Vec2 {
        Vec2::new(self.scroll_left, self.scroll_top)
    }
}
