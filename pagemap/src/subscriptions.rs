// Copyright 2025 the Pagemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use crate::host::{EventSource, SubscriptionId};

/// A set of subscription handles released together.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Subscriptions {
    ids: Vec<SubscriptionId>,
}

impl Subscriptions {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a handle to the set.
    pub fn push(&mut self, id: SubscriptionId) {
        self.ids.push(id);
    }

    /// Returns `true` if no handles are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Returns the number of handles held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` if `id` is held.
    #[must_use]
    pub fn contains(&self, id: SubscriptionId) -> bool {
        self.ids.contains(&id)
    }

    /// Releases every handle, most recent first, leaving the set empty.
    pub fn release_all<E>(&mut self, events: &mut (impl EventSource<E> + ?Sized)) {
        while let Some(id) = self.ids.pop() {
            events.release(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;
    use core::time::Duration;

    use super::*;
    use crate::host::{EventKind, EventTarget};

    #[derive(Default)]
    struct Log {
        next: u64,
        released: Vec<SubscriptionId>,
    }

    impl EventSource<()> for Log {
        fn listen(&mut self, _: EventTarget<'_, ()>, _: EventKind) -> SubscriptionId {
            self.next += 1;
            SubscriptionId(self.next)
        }

        fn every(&mut self, _: Duration) -> SubscriptionId {
            self.next += 1;
            SubscriptionId(self.next)
        }

        fn release(&mut self, id: SubscriptionId) {
            self.released.push(id);
        }
    }

    #[test]
    fn release_all_empties_in_reverse_order() {
        let mut log = Log::default();
        let mut subs = Subscriptions::new();
        subs.push(log.listen(EventTarget::Window, EventKind::Scroll));
        subs.push(log.every(Duration::from_millis(100)));
        assert_eq!(subs.len(), 2);
        assert!(subs.contains(SubscriptionId(1)));

        subs.release_all(&mut log);

        assert!(subs.is_empty());
        assert_eq!(log.released, vec![SubscriptionId(2), SubscriptionId(1)]);

        // Releasing again does nothing.
        subs.release_all(&mut log);
        assert_eq!(log.released.len(), 2);
    }
}
