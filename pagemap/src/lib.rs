// Copyright 2025 the Pagemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=pagemap --heading-base-level=0

//! Pagemap: a scaled minimap of a page with a draggable view indicator.
//!
//! A [`Pagemap`] owns a drawing [`Surface`] and repaints it from scratch on
//! every redraw:
//! - the whole document (or a tracked element's scrolled content) is fitted
//!   into the surface with a uniform scale;
//! - descendants matching each [`StyleMap`] rule are painted with that rule's
//!   fill, in rule order;
//! - the visible window is painted on top as the view indicator.
//!
//! Pressing on the surface starts a drag. The point of the indicator that was
//! grabbed (or its center, if the press missed it) is kept under the pointer
//! for the rest of the gesture by scrolling the page or the tracked element.
//!
//! The pagemap never touches a browser directly. It talks to three
//! collaborators:
//! - a [`Surface`] to draw on;
//! - a [`Host`] to measure the page and its elements, query selectors and
//!   scroll;
//! - an [`EventSource`] to subscribe to the events that drive it.
//!
//! Events coming back from the source are fed to [`Pagemap::handle_event`].
//!
//! ## Wiring
//!
//! ```rust,ignore
//! let mut pagemap = Pagemap::new(surface, PagemapOptions::default());
//! pagemap.attach(&mut host, &mut events);
//!
//! // From the event loop:
//! pagemap.handle_event(&mut host, &mut events, Event::PointerDown(pos));
//!
//! // After a content change nothing reports:
//! pagemap.redraw(&host);
//!
//! // Tear down:
//! pagemap.detach(&mut host, &mut events);
//! ```
//!
//! ## Failure model
//!
//! Construction problems (no drawing context, an unparsable color) are
//! reported as [`PagemapError`]. After that nothing fails: a redraw or drag
//! step whose inputs cannot be measured, or whose rectangles have no area, is
//! skipped and logged at `debug` level through the [`log`] facade.
//!
//! This crate is `no_std` (with `alloc`).

#![no_std]

extern crate alloc;

pub mod drag;
mod error;
pub mod host;
mod options;
mod pagemap;
mod subscriptions;

pub use error::PagemapError;
pub use host::{Cursor, Event, EventKind, EventSource, EventTarget, Host, SubscriptionId, Surface};
pub use options::{Fill, PagemapOptions, StyleMap};
pub use pagemap::{Frame, Pagemap};
pub use subscriptions::Subscriptions;

pub use pagemap_geometry as geometry;
