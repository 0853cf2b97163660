// Copyright 2025 the Pagemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use kurbo::{Point, Rect};
use log::{debug, trace};
use pagemap_geometry::{
    Fit, document_extent, element_box_extent, element_content_extent, element_viewport_extent,
    window_extent,
};

use crate::drag::{Anchor, DragState};
use crate::host::{Cursor, Event, EventKind, EventSource, EventTarget, Host, Surface};
use crate::options::{Fill, PagemapOptions};
use crate::subscriptions::Subscriptions;

/// Geometry of the most recently painted frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    fit: Fit,
    view: Rect,
}

impl Frame {
    /// Full extent of the tracked content, in document space.
    #[must_use]
    pub fn root(&self) -> Rect {
        self.fit.root()
    }

    /// Visible window into the root, in document space.
    #[must_use]
    pub fn view(&self) -> Rect {
        self.view
    }

    /// Surface pixels per document pixel.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.fit.scale()
    }

    /// The root fitted into the surface.
    #[must_use]
    pub fn fit(&self) -> Fit {
        self.fit
    }

    /// Visible window in root space.
    #[must_use]
    pub fn view_in_root(&self) -> Rect {
        self.fit.root_relative(self.view)
    }
}

/// A minimap of a page (or of one scrollable element) drawn on a [`Surface`].
///
/// Every redraw re-measures the host and repaints from scratch, so the
/// pagemap can be redrawn as often as events arrive. Dragging on the surface
/// scrolls the mapped content so the grabbed point of the view indicator
/// stays under the pointer.
pub struct Pagemap<H: Host, S: Surface> {
    surface: S,
    options: PagemapOptions<H::Element>,
    frame: Option<Frame>,
    drag: DragState,
    subscriptions: Subscriptions,
}

impl<H: Host, S: Surface> fmt::Debug for Pagemap<H, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pagemap")
            .field("tracks_element", &self.options.viewport.is_some())
            .field("frame", &self.frame)
            .field("drag", &self.drag)
            .field("subscriptions", &self.subscriptions)
            .finish_non_exhaustive()
    }
}

impl<H: Host, S: Surface> Pagemap<H, S> {
    /// Creates a pagemap drawing onto `surface`.
    ///
    /// Nothing is drawn and nothing is subscribed until [`Pagemap::attach`]
    /// (or [`Pagemap::redraw`]) is called.
    pub fn new(surface: S, options: PagemapOptions<H::Element>) -> Self {
        Self {
            surface,
            options,
            frame: None,
            drag: DragState::Idle,
            subscriptions: Subscriptions::new(),
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn options(&self) -> &PagemapOptions<H::Element> {
        &self.options
    }

    /// Returns the drawing surface.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Returns the drawing surface mutably.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Consumes the pagemap, returning its surface.
    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Geometry of the last painted frame, if any.
    #[must_use]
    pub fn frame(&self) -> Option<Frame> {
        self.frame
    }

    /// Returns `true` while the view indicator is being dragged.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Returns the grab point of the active drag.
    #[must_use]
    pub fn drag_anchor(&self) -> Option<Anchor> {
        self.drag.anchor()
    }

    /// Returns `true` between [`Pagemap::attach`] and [`Pagemap::detach`].
    #[must_use]
    pub fn is_attached(&self) -> bool {
        !self.subscriptions.is_empty()
    }

    /// Subscribes to everything that should trigger a redraw or start a drag,
    /// then draws the first frame.
    ///
    /// Load, resize and scroll come from the tracked element (or the window),
    /// pointer-down from the surface, and ticks from the refresh interval if
    /// one is configured. Attaching an attached pagemap does nothing.
    pub fn attach<E>(&mut self, host: &mut H, events: &mut E)
    where
        E: EventSource<H::Element> + ?Sized,
    {
        if self.is_attached() {
            return;
        }
        let target = match &self.options.viewport {
            Some(element) => EventTarget::Element(element),
            None => EventTarget::Window,
        };
        for kind in [EventKind::Load, EventKind::Resize, EventKind::Scroll] {
            self.subscriptions.push(events.listen(target, kind));
        }
        self.subscriptions
            .push(events.listen(EventTarget::Surface, EventKind::PointerDown));
        if let Some(period) = self.options.interval.filter(|p| !p.is_zero()) {
            self.subscriptions.push(events.every(period));
        }

        self.surface.set_cursor(Cursor::Pointer);
        self.redraw(host);
    }

    /// Releases every subscription, ending any drag in progress.
    pub fn detach<E>(&mut self, host: &mut H, events: &mut E)
    where
        E: EventSource<H::Element> + ?Sized,
    {
        if let Some((_, mut listeners)) = self.drag.end() {
            listeners.release_all(events);
            self.restore_cursors(host);
        }
        self.subscriptions.release_all(events);
    }

    /// Re-measures the host and repaints the whole surface.
    ///
    /// Returns `false` (leaving the surface untouched) when the page or the
    /// tracked element cannot be measured, or when the root has no area or
    /// would scale to less than a pixel on either axis.
    pub fn redraw(&mut self, host: &H) -> bool {
        let Some(page) = host.page_metrics() else {
            debug!("skipping redraw: page cannot be measured");
            return false;
        };

        let (root, view) = match &self.options.viewport {
            Some(element) => {
                let Some(metrics) = host.element_metrics(element) else {
                    debug!("skipping redraw: tracked element cannot be measured");
                    return false;
                };
                (
                    element_content_extent(&metrics, &page),
                    element_viewport_extent(&metrics, &page),
                )
            }
            None => (document_extent(&page), window_extent(&page)),
        };

        let Some(fit) = Fit::new(root, self.surface.client_size()) else {
            debug!("skipping redraw: root {root:?} does not fit the surface");
            return false;
        };

        let (width, height) = fit.surface_pixels();
        if width == 0 || height == 0 {
            debug!("skipping redraw: root {root:?} scales to a {width}x{height} surface");
            return false;
        }
        self.surface.resize(width, height);
        self.surface.reset_transform();
        self.surface.clear();
        self.surface.scale(fit.scale());

        paint(&mut self.surface, fit.root_relative(root), self.options.back);

        let scope = self.options.viewport.as_ref();
        for (selector, fill) in self.options.styles.iter() {
            if fill.is_none() {
                continue;
            }
            for element in host.query_all(selector, scope) {
                if let Some(metrics) = host.element_metrics(&element) {
                    let rect = element_box_extent(&metrics, &page);
                    paint(&mut self.surface, fit.root_relative(rect), fill);
                }
            }
        }

        let indicator = self.options.indicator(self.drag.is_dragging());
        paint(&mut self.surface, fit.root_relative(view), indicator);

        trace!(
            "painted {width}x{height} at scale {:.4}, view {view:?}",
            fit.scale()
        );
        self.frame = Some(Frame { fit, view });
        true
    }

    /// Routes one event: redraw triggers repaint, pointer events drive the
    /// drag gesture.
    ///
    /// Pointer-move and pointer-up outside a drag are ignored.
    pub fn handle_event<E>(&mut self, host: &mut H, events: &mut E, event: Event)
    where
        E: EventSource<H::Element> + ?Sized,
    {
        match event {
            Event::Load | Event::Resize | Event::Scroll | Event::Tick => {
                self.redraw(host);
            }
            Event::PointerDown(pointer) => self.drag_start(host, events, pointer),
            Event::PointerMove(pointer) => {
                if let Some(anchor) = self.drag.anchor() {
                    self.drag_to(host, anchor, pointer);
                }
            }
            Event::PointerUp(pointer) => self.drag_end(host, events, pointer),
        }
    }

    fn drag_start<E>(&mut self, host: &mut H, events: &mut E, pointer: Point)
    where
        E: EventSource<H::Element> + ?Sized,
    {
        if self.drag.is_dragging() {
            return;
        }
        let Some(frame) = self.frame else {
            debug!("ignoring pointer-down: nothing has been drawn yet");
            return;
        };
        let Some(pointer_root) = self.pointer_in_root(host, &frame, pointer) else {
            debug!("ignoring pointer-down: surface cannot be measured");
            return;
        };

        let anchor = Anchor::grab(frame.view_in_root(), pointer_root);
        let mut listeners = Subscriptions::new();
        listeners.push(events.listen(EventTarget::Window, EventKind::PointerMove));
        listeners.push(events.listen(EventTarget::Window, EventKind::PointerUp));
        if let Some(mut refused) = self.drag.start(anchor, listeners) {
            refused.release_all(events);
            return;
        }
        trace!("drag start, anchor ({:.3}, {:.3})", anchor.rx, anchor.ry);

        self.surface.set_cursor(Cursor::Crosshair);
        host.set_page_cursor(Cursor::Crosshair);

        self.drag_to(host, anchor, pointer);
    }

    fn drag_end<E>(&mut self, host: &mut H, events: &mut E, pointer: Point)
    where
        E: EventSource<H::Element> + ?Sized,
    {
        let Some((anchor, mut listeners)) = self.drag.end() else {
            return;
        };
        trace!("drag end");
        self.restore_cursors(host);
        listeners.release_all(events);

        self.drag_to(host, anchor, pointer);
    }

    /// Scrolls so that `anchor` of the view lands under `pointer`, then redraws.
    fn drag_to(&mut self, host: &mut H, anchor: Anchor, pointer: Point) {
        let Some(frame) = self.frame else {
            return;
        };
        let view = frame.view();
        if view.width() <= 0.0 || view.height() <= 0.0 {
            debug!("suppressing drag update: view {view:?} has no area");
            return;
        }
        let Some(pointer_root) = self.pointer_in_root(host, &frame, pointer) else {
            debug!("suppressing drag update: surface cannot be measured");
            return;
        };

        let target = anchor.scroll_target(view.size(), pointer_root);
        match &self.options.viewport {
            Some(element) => host.scroll_element_to(element, target),
            None => host.scroll_page_to(target),
        }
        self.redraw(host);
    }

    /// Maps a page-space pointer position into the root space of `frame`.
    fn pointer_in_root(&self, host: &H, frame: &Frame, pointer: Point) -> Option<Point> {
        let page = host.page_metrics()?;
        let surface = element_viewport_extent(&self.surface.metrics()?, &page);
        let on_surface = (pointer - surface.origin()).to_point();
        Some(frame.fit.surface_to_root_point(on_surface))
    }

    fn restore_cursors(&mut self, host: &mut H) {
        self.surface.set_cursor(Cursor::Pointer);
        host.set_page_cursor(Cursor::Auto);
    }
}

fn paint<S: Surface>(surface: &mut S, rect: Rect, fill: Fill) {
    if let Some(color) = fill.color() {
        surface.fill_rect(rect, color);
    }
}
