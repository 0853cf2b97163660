// Copyright 2025 the Pagemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The environment a pagemap runs in: a drawing surface, a measurable page,
//! and a source of events.
//!
//! None of these traits assume a browser. The `wasm32` adapter implements them
//! over the DOM; the reference implementations implement them in memory.

use alloc::vec::Vec;
use core::time::Duration;

use kurbo::{Point, Rect, Size};
use pagemap_geometry::{ElementMetrics, PageMetrics};
use peniko::Color;

/// Pointer cursor affordance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cursor {
    /// Platform default.
    #[default]
    Auto,
    /// Something clickable.
    Pointer,
    /// A drag is in progress.
    Crosshair,
}

/// A resizable raster target.
///
/// Drawing calls are immediate-mode: everything between [`Surface::clear`] and
/// the next clear is one frame.
pub trait Surface {
    /// Returns the surface's displayed size in CSS pixels.
    fn client_size(&self) -> Size;

    /// Measures the surface as an element of the page, so pointer positions
    /// can be made relative to it. `None` if it is not attached.
    fn metrics(&self) -> Option<ElementMetrics>;

    /// Resizes both the backing pixel buffer and the displayed box.
    fn resize(&mut self, width: u32, height: u32);

    /// Resets the current transform to identity.
    fn reset_transform(&mut self);

    /// Clears every pixel of the backing buffer.
    fn clear(&mut self);

    /// Multiplies the current transform by a uniform scale.
    fn scale(&mut self, factor: f64);

    /// Fills `rect` (in the current transform's space) with `color`,
    /// compositing over what is already there.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Sets the cursor shown while hovering the surface.
    fn set_cursor(&mut self, cursor: Cursor);
}

/// Measurement, selector queries, and scrolling for the page being mapped.
pub trait Host {
    /// Handle to an element of the page.
    type Element: Clone;

    /// Measures the page. `None` if the page cannot be measured right now.
    fn page_metrics(&self) -> Option<PageMetrics>;

    /// Measures an element. `None` if it is no longer part of the page.
    fn element_metrics(&self, element: &Self::Element) -> Option<ElementMetrics>;

    /// Returns the elements matching `selector`, in document order, among the
    /// descendants of `scope` (or the whole page).
    fn query_all(&self, selector: &str, scope: Option<&Self::Element>) -> Vec<Self::Element>;

    /// Scrolls the page so its visible window starts at `pos`.
    fn scroll_page_to(&mut self, pos: Point);

    /// Scrolls `element`'s own content so its viewport starts at `pos`.
    fn scroll_element_to(&mut self, element: &Self::Element, pos: Point);

    /// Sets the cursor for the whole page.
    fn set_page_cursor(&mut self, cursor: Cursor);
}

/// Something a pagemap can listen to.
#[derive(Debug, PartialEq, Eq)]
pub enum EventTarget<'a, E> {
    /// The pagemap's own surface.
    Surface,
    /// The window (and, for pointer events, anywhere on the page).
    Window,
    /// A tracked element.
    Element(&'a E),
}

impl<E> Clone for EventTarget<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for EventTarget<'_, E> {}

/// Kinds of events a pagemap subscribes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Content finished loading.
    Load,
    /// The target changed size.
    Resize,
    /// The target scrolled.
    Scroll,
    /// A pointer button was pressed.
    PointerDown,
    /// The pointer moved.
    PointerMove,
    /// A pointer button was released.
    PointerUp,
}

/// An event delivered to [`Pagemap::handle_event`](crate::Pagemap::handle_event).
///
/// Pointer positions are in page (document) coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    /// Content finished loading.
    Load,
    /// The tracked element or window changed size.
    Resize,
    /// The tracked element or page scrolled.
    Scroll,
    /// The refresh interval elapsed.
    Tick,
    /// A pointer was pressed on the surface.
    PointerDown(Point),
    /// The pointer moved anywhere on the page.
    PointerMove(Point),
    /// The pointer was released anywhere on the page.
    PointerUp(Point),
}

impl Event {
    /// Returns the subscription kind that delivers this event, if any.
    ///
    /// [`Event::Tick`] comes from [`EventSource::every`] instead.
    #[must_use]
    pub fn kind(&self) -> Option<EventKind> {
        match self {
            Self::Load => Some(EventKind::Load),
            Self::Resize => Some(EventKind::Resize),
            Self::Scroll => Some(EventKind::Scroll),
            Self::Tick => None,
            Self::PointerDown(_) => Some(EventKind::PointerDown),
            Self::PointerMove(_) => Some(EventKind::PointerMove),
            Self::PointerUp(_) => Some(EventKind::PointerUp),
        }
    }
}

/// Opaque handle to an active subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(pub u64);

/// Subscription plumbing.
///
/// Implementations route the subscribed events back into the pagemap that
/// asked for them, and stop doing so once the handle is released.
pub trait EventSource<E> {
    /// Starts delivering `kind` events from `target`.
    fn listen(&mut self, target: EventTarget<'_, E>, kind: EventKind) -> SubscriptionId;

    /// Starts delivering [`Event::Tick`] every `period`.
    fn every(&mut self, period: Duration) -> SubscriptionId;

    /// Stops delivering events for `id`. Releasing an unknown id is a no-op.
    fn release(&mut self, id: SubscriptionId);
}
