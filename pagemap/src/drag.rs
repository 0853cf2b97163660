// Copyright 2025 the Pagemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag state: which point of the view indicator is held under the pointer.
//!
//! ## Usage
//!
//! 1) On pointer-down, compute an [`Anchor`] with [`Anchor::grab`] from the
//!    view rectangle and the pointer, both in root space.
//! 2) Call [`DragState::start`] with the anchor and the subscriptions that keep
//!    move/up events flowing.
//! 3) On each move, turn the pointer into a scroll position with
//!    [`Anchor::scroll_target`].
//! 4) On pointer-up, call [`DragState::end`], apply the returned anchor one
//!    last time, and release the returned subscriptions.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Rect, Size};
//! use pagemap::drag::Anchor;
//!
//! // View indicator at (100, 200), 80 x 60, in root space.
//! let view = Rect::new(100.0, 200.0, 180.0, 260.0);
//!
//! // Grab it a quarter of the way across and halfway down.
//! let anchor = Anchor::grab(view, Point::new(120.0, 230.0));
//! assert_eq!((anchor.rx, anchor.ry), (0.25, 0.5));
//!
//! // Moving the pointer to (500, 500) scrolls so the same point stays under it.
//! let target = anchor.scroll_target(Size::new(80.0, 60.0), Point::new(500.0, 500.0));
//! assert_eq!(target, Point::new(480.0, 470.0));
//! ```

use kurbo::{Point, Rect, Size};

use crate::subscriptions::Subscriptions;

/// Fractional grab point inside the view rectangle.
///
/// Both fractions lie in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Anchor {
    /// Horizontal fraction of the view width.
    pub rx: f64,
    /// Vertical fraction of the view height.
    pub ry: f64,
}

impl Anchor {
    /// The middle of the view rectangle.
    pub const CENTER: Self = Self { rx: 0.5, ry: 0.5 };

    /// Computes the grab point for a pointer at `pointer` on a view at `view`.
    ///
    /// A pointer outside the view (or a view with no area) grabs the center,
    /// so the indicator jumps to sit centered under the pointer.
    #[must_use]
    pub fn grab(view: Rect, pointer: Point) -> Self {
        let rx = (pointer.x - view.x0) / view.width();
        let ry = (pointer.y - view.y0) / view.height();
        let unit = 0.0..=1.0;
        if unit.contains(&rx) && unit.contains(&ry) {
            Self { rx, ry }
        } else {
            Self::CENTER
        }
    }

    /// Returns the view origin that puts this anchor under `pointer`.
    #[must_use]
    pub fn scroll_target(&self, view_size: Size, pointer: Point) -> Point {
        Point::new(
            pointer.x - view_size.width * self.rx,
            pointer.y - view_size.height * self.ry,
        )
    }
}

/// Tracks whether a drag gesture is in progress.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum DragState {
    /// No drag in progress.
    #[default]
    Idle,
    /// A drag holds the view indicator.
    Dragging {
        /// Grab point, fixed for the whole gesture.
        anchor: Anchor,
        /// Move/up subscriptions owned by this gesture.
        listeners: Subscriptions,
    },
}

impl DragState {
    /// Enters the dragging state.
    ///
    /// If a drag is already in progress, nothing changes and `listeners` is
    /// handed back so the caller can release it.
    pub fn start(&mut self, anchor: Anchor, listeners: Subscriptions) -> Option<Subscriptions> {
        if self.is_dragging() {
            return Some(listeners);
        }
        *self = Self::Dragging { anchor, listeners };
        None
    }

    /// Returns the anchor of the active drag.
    #[must_use]
    pub fn anchor(&self) -> Option<Anchor> {
        match self {
            Self::Idle => None,
            Self::Dragging { anchor, .. } => Some(*anchor),
        }
    }

    /// Leaves the dragging state, returning the gesture's anchor and
    /// subscriptions.
    pub fn end(&mut self) -> Option<(Anchor, Subscriptions)> {
        match core::mem::take(self) {
            Self::Idle => None,
            Self::Dragging { anchor, listeners } => Some((anchor, listeners)),
        }
    }

    /// Returns `true` while a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect, Size};

    use super::*;
    use crate::host::SubscriptionId;

    const VIEW: Rect = Rect::new(100.0, 50.0, 300.0, 150.0);

    #[test]
    fn grab_at_corners_and_center() {
        assert_eq!(
            Anchor::grab(VIEW, Point::new(100.0, 50.0)),
            Anchor { rx: 0.0, ry: 0.0 }
        );
        assert_eq!(Anchor::grab(VIEW, VIEW.center()), Anchor::CENTER);
        assert_eq!(
            Anchor::grab(VIEW, Point::new(300.0, 150.0)),
            Anchor { rx: 1.0, ry: 1.0 }
        );
    }

    #[test]
    fn grab_outside_view_snaps_to_center() {
        // rx = -0.2
        assert_eq!(Anchor::grab(VIEW, Point::new(60.0, 100.0)), Anchor::CENTER);
        // ry = 1.3
        assert_eq!(Anchor::grab(VIEW, Point::new(200.0, 180.0)), Anchor::CENTER);
        // rx = 1.3, ry = -0.2
        assert_eq!(Anchor::grab(VIEW, Point::new(360.0, 30.0)), Anchor::CENTER);
    }

    #[test]
    fn grab_on_empty_view_snaps_to_center() {
        let flat = Rect::new(10.0, 10.0, 10.0, 40.0);
        assert_eq!(Anchor::grab(flat, Point::new(10.0, 20.0)), Anchor::CENTER);
    }

    #[test]
    fn scroll_target_keeps_anchor_under_pointer() {
        let anchor = Anchor::grab(VIEW, Point::new(150.0, 60.0));
        let size = VIEW.size();
        for pointer in [
            Point::new(0.0, 0.0),
            Point::new(731.5, 12.25),
            Point::new(-40.0, 999.0),
        ] {
            let target = anchor.scroll_target(size, pointer);
            assert!((target.x + size.width * anchor.rx - pointer.x).abs() < 1e-9);
            assert!((target.y + size.height * anchor.ry - pointer.y).abs() < 1e-9);
        }
    }

    #[test]
    fn scroll_target_with_zero_anchor_is_pointer() {
        let anchor = Anchor { rx: 0.0, ry: 0.0 };
        let target = anchor.scroll_target(Size::new(80.0, 60.0), Point::new(5.0, 6.0));
        assert_eq!(target, Point::new(5.0, 6.0));
    }

    #[test]
    fn new_state_is_idle() {
        let drag = DragState::default();
        assert!(!drag.is_dragging());
        assert_eq!(drag.anchor(), None);
    }

    #[test]
    fn start_then_end_hands_back_listeners() {
        let mut drag = DragState::default();
        let mut listeners = Subscriptions::new();
        listeners.push(SubscriptionId(7));

        assert_eq!(drag.start(Anchor::CENTER, listeners), None);
        assert!(drag.is_dragging());
        assert_eq!(drag.anchor(), Some(Anchor::CENTER));

        let (anchor, released) = drag.end().unwrap();
        assert_eq!(anchor, Anchor::CENTER);
        assert!(released.contains(SubscriptionId(7)));
        assert!(!drag.is_dragging());
    }

    #[test]
    fn start_while_dragging_is_refused() {
        let mut drag = DragState::default();
        drag.start(Anchor { rx: 0.1, ry: 0.2 }, Subscriptions::new());

        let mut second = Subscriptions::new();
        second.push(SubscriptionId(3));
        let refused = drag.start(Anchor::CENTER, second).unwrap();

        assert!(refused.contains(SubscriptionId(3)));
        assert_eq!(drag.anchor(), Some(Anchor { rx: 0.1, ry: 0.2 }));
    }

    #[test]
    fn end_on_idle_is_safe() {
        let mut drag = DragState::default();
        assert_eq!(drag.end(), None);
        assert!(!drag.is_dragging());
    }
}
