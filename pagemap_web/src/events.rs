// Copyright 2025 the Pagemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::rc::Weak;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;
use core::time::Duration;

use kurbo::Point;
use log::{debug, trace};
use pagemap::{Event, EventKind, EventSource, EventTarget, Pagemap, SubscriptionId};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{HtmlCanvasElement, HtmlElement, MouseEvent, Window};

use crate::host::DomHost;
use crate::surface::CanvasSurface;

/// Everything a DOM callback needs to drive the pagemap.
pub(crate) struct Installed {
    pub(crate) pagemap: Pagemap<DomHost, CanvasSurface>,
    pub(crate) host: DomHost,
    pub(crate) events: DomEvents,
}

impl fmt::Debug for Installed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Installed")
            .field("pagemap", &self.pagemap)
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}

/// Routes one event into the installed pagemap.
///
/// Events that arrive while the pagemap is already handling one (a scroll
/// fired synchronously by its own `scrollTo`, for instance) are dropped; the
/// redraw that follows the outer event covers them.
fn dispatch(shared: &Weak<RefCell<Installed>>, event: Event) {
    let Some(shared) = shared.upgrade() else {
        return;
    };
    let Ok(mut guard) = shared.try_borrow_mut() else {
        trace!("dropping reentrant {event:?}");
        return;
    };
    let Installed {
        pagemap,
        host,
        events,
    } = &mut *guard;
    events.retired.clear();
    pagemap.handle_event(host, events, event);
}

fn event_name(kind: EventKind) -> &'static str {
    match kind {
        EventKind::Load => "load",
        EventKind::Resize => "resize",
        EventKind::Scroll => "scroll",
        EventKind::PointerDown => "mousedown",
        EventKind::PointerMove => "mousemove",
        EventKind::PointerUp => "mouseup",
    }
}

fn to_event(kind: EventKind, raw: &web_sys::Event) -> Option<Event> {
    let pointer = || {
        raw.dyn_ref::<MouseEvent>()
            .map(|ev| Point::new(f64::from(ev.page_x()), f64::from(ev.page_y())))
    };
    Some(match kind {
        EventKind::Load => Event::Load,
        EventKind::Resize => Event::Resize,
        EventKind::Scroll => Event::Scroll,
        EventKind::PointerDown => Event::PointerDown(pointer()?),
        EventKind::PointerMove => Event::PointerMove(pointer()?),
        EventKind::PointerUp => Event::PointerUp(pointer()?),
    })
}

enum Registration {
    Listener {
        target: web_sys::EventTarget,
        name: &'static str,
        closure: Closure<dyn FnMut(web_sys::Event)>,
    },
    Interval {
        handle: i32,
        // Kept alive for as long as the timer runs.
        _closure: Closure<dyn FnMut()>,
    },
}

impl Registration {
    fn unregister(&self, window: &Window) {
        match self {
            Self::Listener {
                target,
                name,
                closure,
            } => {
                if target
                    .remove_event_listener_with_callback(name, closure.as_ref().unchecked_ref())
                    .is_err()
                {
                    debug!("could not remove {name} listener");
                }
            }
            Self::Interval { handle, .. } => window.clear_interval_with_handle(*handle),
        }
    }
}

/// An [`EventSource`] over DOM listeners and window timers.
///
/// Every callback forwards into the pagemap installed alongside this source.
/// Released callbacks are unregistered immediately but dropped only on the
/// next delivery, because the release can happen inside the callback itself.
pub struct DomEvents {
    window: Window,
    canvas: HtmlCanvasElement,
    shared: Weak<RefCell<Installed>>,
    next: u64,
    live: BTreeMap<SubscriptionId, Registration>,
    retired: Vec<Registration>,
}

impl fmt::Debug for DomEvents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DomEvents")
            .field("live", &self.live.len())
            .field("retired", &self.retired.len())
            .finish_non_exhaustive()
    }
}

impl DomEvents {
    pub(crate) fn new(
        window: Window,
        canvas: HtmlCanvasElement,
        shared: Weak<RefCell<Installed>>,
    ) -> Self {
        Self {
            window,
            canvas,
            shared,
            next: 0,
            live: BTreeMap::new(),
            retired: Vec::new(),
        }
    }

    /// Returns the number of live listeners and timers.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    fn issue(&mut self, registration: Option<Registration>) -> SubscriptionId {
        self.next += 1;
        let id = SubscriptionId(self.next);
        if let Some(registration) = registration {
            self.live.insert(id, registration);
        }
        id
    }
}

impl EventSource<HtmlElement> for DomEvents {
    fn listen(&mut self, target: EventTarget<'_, HtmlElement>, kind: EventKind) -> SubscriptionId {
        let target: web_sys::EventTarget = match target {
            EventTarget::Surface => self.canvas.clone().into(),
            EventTarget::Window => self.window.clone().into(),
            EventTarget::Element(element) => element.clone().into(),
        };
        let name = event_name(kind);
        let shared = self.shared.clone();
        let closure = Closure::wrap(Box::new(move |raw: web_sys::Event| {
            if let Some(event) = to_event(kind, &raw) {
                dispatch(&shared, event);
            }
        }) as Box<dyn FnMut(web_sys::Event)>);

        let registered =
            target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
        if registered.is_err() {
            debug!("could not add {name} listener");
            return self.issue(None);
        }
        self.issue(Some(Registration::Listener {
            target,
            name,
            closure,
        }))
    }

    fn every(&mut self, period: Duration) -> SubscriptionId {
        let shared = self.shared.clone();
        let closure = Closure::wrap(Box::new(move || dispatch(&shared, Event::Tick))
            as Box<dyn FnMut()>);
        let millis = i32::try_from(period.as_millis()).unwrap_or(i32::MAX);
        match self
            .window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                millis,
            ) {
            Ok(handle) => self.issue(Some(Registration::Interval {
                handle,
                _closure: closure,
            })),
            Err(_) => {
                debug!("could not start a {millis}ms timer");
                self.issue(None)
            }
        }
    }

    fn release(&mut self, id: SubscriptionId) {
        if let Some(registration) = self.live.remove(&id) {
            registration.unregister(&self.window);
            self.retired.push(registration);
        }
    }
}

impl Drop for DomEvents {
    fn drop(&mut self) {
        for registration in self.live.values() {
            registration.unregister(&self.window);
        }
    }
}
