// Copyright 2025 the Pagemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::time::Duration;

use pagemap::{Event, EventKind, EventSource, EventTarget, Host, Pagemap, SubscriptionId, Surface};

/// Owned form of [`EventTarget`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListenTarget<E> {
    /// The pagemap's surface.
    Surface,
    /// The window.
    Window,
    /// A tracked element.
    Element(E),
}

/// A live subscription held by [`RecordingEvents`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Subscription<E> {
    /// An event listener.
    Listener {
        /// Where the listener is attached.
        target: ListenTarget<E>,
        /// What it listens for.
        kind: EventKind,
    },
    /// A periodic timer.
    Interval(Duration),
}

/// An [`EventSource`] that tracks live subscriptions.
///
/// Nothing fires on its own; tests push events through
/// [`RecordingEvents::deliver`], which drops any event no live subscription
/// would have delivered. That makes leaked or missing listeners observable.
#[derive(Clone, Debug)]
pub struct RecordingEvents<E> {
    next: u64,
    active: BTreeMap<SubscriptionId, Subscription<E>>,
    released: Vec<SubscriptionId>,
}

impl<E> Default for RecordingEvents<E> {
    fn default() -> Self {
        Self {
            next: 0,
            active: BTreeMap::new(),
            released: Vec::new(),
        }
    }
}

impl<E: Clone + PartialEq> RecordingEvents<E> {
    /// Creates a source with no subscriptions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of live subscriptions.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Returns every live subscription, oldest first.
    pub fn active(&self) -> impl Iterator<Item = &Subscription<E>> + '_ {
        self.active.values()
    }

    /// Returns every released id, in release order.
    #[must_use]
    pub fn released(&self) -> &[SubscriptionId] {
        &self.released
    }

    /// Returns `true` if some live listener handles `kind`.
    #[must_use]
    pub fn is_listening(&self, kind: EventKind) -> bool {
        self.active
            .values()
            .any(|s| matches!(s, Subscription::Listener { kind: k, .. } if *k == kind))
    }

    /// Returns `true` if a live listener for `kind` is attached to `target`.
    #[must_use]
    pub fn is_listening_on(&self, target: &ListenTarget<E>, kind: EventKind) -> bool {
        self.active.values().any(|s| {
            matches!(s, Subscription::Listener { target: t, kind: k } if t == target && *k == kind)
        })
    }

    /// Returns the periods of the live timers.
    #[must_use]
    pub fn intervals(&self) -> Vec<Duration> {
        self.active
            .values()
            .filter_map(|s| match s {
                Subscription::Interval(period) => Some(*period),
                Subscription::Listener { .. } => None,
            })
            .collect()
    }

    /// Forwards `event` to `pagemap` if a live subscription would deliver it.
    ///
    /// Returns whether the event was delivered.
    pub fn deliver<H, S>(&mut self, pagemap: &mut Pagemap<H, S>, host: &mut H, event: Event) -> bool
    where
        H: Host<Element = E>,
        S: Surface,
    {
        let live = match event.kind() {
            Some(kind) => self.is_listening(kind),
            None => !self.intervals().is_empty(),
        };
        if live {
            pagemap.handle_event(host, self, event);
        }
        live
    }

    fn issue(&mut self, subscription: Subscription<E>) -> SubscriptionId {
        self.next += 1;
        let id = SubscriptionId(self.next);
        self.active.insert(id, subscription);
        id
    }
}

impl<E: Clone + PartialEq> EventSource<E> for RecordingEvents<E> {
    fn listen(&mut self, target: EventTarget<'_, E>, kind: EventKind) -> SubscriptionId {
        let target = match target {
            EventTarget::Surface => ListenTarget::Surface,
            EventTarget::Window => ListenTarget::Window,
            EventTarget::Element(element) => ListenTarget::Element(element.clone()),
        };
        self.issue(Subscription::Listener { target, kind })
    }

    fn every(&mut self, period: Duration) -> SubscriptionId {
        self.issue(Subscription::Interval(period))
    }

    fn release(&mut self, id: SubscriptionId) {
        if self.active.remove(&id).is_some() {
            self.released.push(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use core::time::Duration;

    use super::*;

    #[test]
    fn ids_are_unique_and_release_is_idempotent() {
        let mut events = RecordingEvents::<u32>::new();
        let a = events.listen(EventTarget::Window, EventKind::Scroll);
        let b = events.listen(EventTarget::Element(&7), EventKind::Scroll);
        let c = events.every(Duration::from_millis(500));
        assert_ne!(a, b);
        assert_eq!(events.active_count(), 3);
        assert!(events.is_listening_on(&ListenTarget::Element(7), EventKind::Scroll));
        assert_eq!(events.intervals(), [Duration::from_millis(500)]);

        events.release(c);
        events.release(c);
        assert_eq!(events.released(), &[c]);
        assert!(events.intervals().is_empty());
        assert!(events.is_listening(EventKind::Scroll));
        assert!(!events.is_listening(EventKind::PointerMove));
    }
}
