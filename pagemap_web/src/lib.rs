// Copyright 2025 the Pagemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=pagemap_web --heading-base-level=0

//! Browser adapter for Pagemap.
//!
//! On `wasm32` this crate provides the three collaborators a
//! [`pagemap::Pagemap`] needs, backed by `web_sys`:
//! - `CanvasSurface` draws through a `CanvasRenderingContext2d`.
//! - `DomHost` measures the document and its elements, runs selector queries
//!   and scrolls.
//! - `DomEvents` registers DOM listeners and timers and routes them back into
//!   the pagemap.
//!
//! `install` wires all three together around a new sticky canvas in the
//! bottom-left corner of the page:
//!
//! ```no_run
//! #[cfg(target_arch = "wasm32")]
//! fn start() -> Result<pagemap_web::Handle, pagemap::PagemapError> {
//!     pagemap_web::install(pagemap_web::bootstrap_options()?)
//! }
//! ```
//!
//! On other targets the crate is empty.

#![no_std]

extern crate alloc;

#[cfg(target_arch = "wasm32")]
mod events;
#[cfg(target_arch = "wasm32")]
mod host;
#[cfg(target_arch = "wasm32")]
mod install;
#[cfg(target_arch = "wasm32")]
mod surface;

#[cfg(target_arch = "wasm32")]
pub use events::DomEvents;
#[cfg(target_arch = "wasm32")]
pub use host::DomHost;
#[cfg(target_arch = "wasm32")]
pub use install::{Handle, bootstrap_options, install};
#[cfg(target_arch = "wasm32")]
pub use surface::CanvasSurface;

#[cfg(target_arch = "wasm32")]
fn cursor_css(cursor: pagemap::Cursor) -> &'static str {
    match cursor {
        pagemap::Cursor::Auto => "auto",
        pagemap::Cursor::Pointer => "pointer",
        pagemap::Cursor::Crosshair => "crosshair",
    }
}
