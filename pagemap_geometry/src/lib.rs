// Copyright 2025 the Pagemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=pagemap_geometry --heading-base-level=0

//! Pagemap Geometry: rectangles and scale for page minimaps.
//!
//! This crate is the pure half of a page minimap. It maps measurements of a
//! page (or of a scrollable element inside it) into rectangles in document
//! space, translates rectangles between coordinate spaces, and computes the
//! uniform scale that fits the whole document into a drawing surface.
//!
//! It does **not** measure anything itself. Callers take a snapshot of the
//! environment ([`PageMetrics`], [`ElementMetrics`]) and hand it to the
//! functions here:
//! - [`document_extent`] / [`window_extent`] for the whole page.
//! - [`element_box_extent`], [`element_viewport_extent`] and
//!   [`element_content_extent`] for a single element.
//! - [`rect_relative_to`] to move a rectangle into another rectangle's space.
//! - [`best_fit_scale`] and [`Fit`] to go from document space to surface
//!   pixels and back.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect, Size};
//! use pagemap_geometry::{Fit, PageMetrics, document_extent, rect_relative_to, window_extent};
//!
//! let page = PageMetrics {
//!     scroll_width: 2000.0,
//!     scroll_height: 1000.0,
//!     scroll_x: 400.0,
//!     scroll_y: 100.0,
//!     client_width: 800.0,
//!     client_height: 600.0,
//! };
//!
//! let root = document_extent(&page);
//! let view = window_extent(&page);
//!
//! // Fit the page into a 200x100 surface.
//! let fit = Fit::new(root, Size::new(200.0, 100.0)).unwrap();
//! assert_eq!(fit.scale(), 0.1);
//! assert_eq!(fit.surface_pixels(), (200, 100));
//!
//! // The visible window, in surface pixels.
//! let indicator = fit.root_to_surface_rect(view);
//! assert!((indicator.x0 - 40.0).abs() < 1e-9);
//!
//! // Back from a surface position to root space.
//! let pt = fit.surface_to_root_point(Point::new(20.0, 10.0));
//! assert!((pt.x - 200.0).abs() < 1e-9);
//! assert_eq!(rect_relative_to(root, root), Rect::new(0.0, 0.0, 2000.0, 1000.0));
//! ```
//!
//! ## Degenerate sizes
//!
//! A zero-width or zero-height document makes one of the scale ratios
//! infinite. [`best_fit_scale`] reports that faithfully; [`usable_scale`] and
//! [`Fit::new`] turn it into `None` so nothing is drawn with an infinite or
//! NaN transform.
//!
//! This crate is `no_std`.

#![no_std]

mod extent;
mod fit;
mod metrics;

pub use extent::{
    document_extent, element_box_extent, element_content_extent, element_offset,
    element_viewport_extent, rect_relative_to, window_extent,
};
pub use fit::{Fit, best_fit_scale, usable_scale};
pub use metrics::{ElementMetrics, PageMetrics};
