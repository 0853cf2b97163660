// Copyright 2025 the Pagemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=pagemap_ref --heading-base-level=0

//! Pagemap reference collaborators.
//!
//! This crate provides small, in-memory implementations of the three traits a
//! [`pagemap::Pagemap`] talks to, for **tests and debugging**:
//! - [`RecordingSurface`] records every drawing call instead of rasterizing.
//! - [`DocumentHost`] is a hand-built page: a document size, a window, and a
//!   table of elements with fixed boxes, plus the scrolling rules needed to
//!   move them around.
//! - [`RecordingEvents`] hands out subscription ids, remembers which ones are
//!   live, and only delivers events that something is still listening to.
//!
//! None of these try to be a browser. Selectors are matched verbatim against
//! the strings registered with [`DocumentHost::tag`].

#![no_std]

extern crate alloc;

mod document;
mod events;
mod surface;

pub use document::{DocumentHost, ElementId, ElementSpec, ScrollRequest};
pub use events::{ListenTarget, RecordingEvents, Subscription};
pub use surface::{RecordingSurface, SurfaceOp};
