// Copyright 2025 the Pagemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Document-space extents of pages and elements.

use kurbo::{Point, Rect, Size};

use crate::metrics::{ElementMetrics, PageMetrics};

/// Translates `rect` into the coordinate space whose origin is `origin`'s
/// top-left corner.
///
/// Only the position of `origin` is used; the size of `rect` is unchanged.
#[must_use]
pub fn rect_relative_to(rect: Rect, origin: Rect) -> Rect {
    rect - origin.origin().to_vec2()
}

/// Returns the full scrollable extent of the page, anchored at `(0, 0)`.
#[must_use]
pub fn document_extent(page: &PageMetrics) -> Rect {
    Rect::from_origin_size(
        Point::ORIGIN,
        Size::new(page.scroll_width, page.scroll_height),
    )
}

/// Returns the page's visible window, anchored at the page scroll offset.
#[must_use]
pub fn window_extent(page: &PageMetrics) -> Rect {
    Rect::from_origin_size(
        Point::new(page.scroll_x, page.scroll_y),
        Size::new(page.client_width, page.client_height),
    )
}

/// Returns the top-left of the element's border box in document space.
///
/// Every other element extent builds on this.
#[must_use]
pub fn element_offset(element: &ElementMetrics, page: &PageMetrics) -> Point {
    element.bounding_client_rect.origin() + page.scroll_offset()
}

/// Returns the element's border box in document space.
#[must_use]
pub fn element_box_extent(element: &ElementMetrics, page: &PageMetrics) -> Rect {
    Rect::from_origin_size(
        element_offset(element, page),
        Size::new(element.offset_width, element.offset_height),
    )
}

/// Returns the element's padding box in document space.
///
/// For an element that scrolls its own content, this is its "window".
#[must_use]
pub fn element_viewport_extent(element: &ElementMetrics, page: &PageMetrics) -> Rect {
    Rect::from_origin_size(
        element_offset(element, page) + element.border_offset(),
        Size::new(element.client_width, element.client_height),
    )
}

/// Returns the element's full scrollable content in document space.
///
/// For an element that scrolls its own content, this is its "document": the
/// origin moves against the internal scroll position so that
/// [`element_viewport_extent`] always lies inside it.
#[must_use]
pub fn element_content_extent(element: &ElementMetrics, page: &PageMetrics) -> Rect {
    Rect::from_origin_size(
        element_offset(element, page) + element.border_offset() - element.scroll_offset(),
        Size::new(element.scroll_width, element.scroll_height),
    )
}
