// Copyright 2025 the Pagemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Size};

use crate::extent::rect_relative_to;

/// Returns the largest uniform scale that fits `content` inside `surface`.
///
/// This is `min(surface.width / content.width, surface.height / content.height)`,
/// so the aspect ratio is preserved and the scaled content never overflows.
///
/// A zero content dimension makes its ratio `+inf`, and the result degrades to
/// the other axis (or `+inf` when both are zero). Pass the result through
/// [`usable_scale`] before drawing with it.
#[must_use]
pub fn best_fit_scale(content: Size, surface: Size) -> f64 {
    let sx = surface.width / content.width;
    let sy = surface.height / content.height;
    sx.min(sy)
}

/// Returns `Some(scale)` if it is finite and strictly positive.
#[must_use]
pub fn usable_scale(scale: f64) -> Option<f64> {
    (scale.is_finite() && scale > 0.0).then_some(scale)
}

/// A root rectangle fitted into a drawing surface.
///
/// `Fit` owns the mapping between three spaces:
/// - document space, where the root and every measured element live;
/// - root space, document space translated so the root's origin is `(0, 0)`;
/// - surface space, root space multiplied by [`Fit::scale`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fit {
    root: Rect,
    scale: f64,
}

impl Fit {
    /// Fits `root` into a surface of `surface` client size.
    ///
    /// Returns `None` when the root has no area or the resulting scale is not
    /// usable (for example a zero-sized surface).
    #[must_use]
    pub fn new(root: Rect, surface: Size) -> Option<Self> {
        if root.width() <= 0.0 || root.height() <= 0.0 {
            return None;
        }
        let scale = usable_scale(best_fit_scale(root.size(), surface))?;
        Some(Self { root, scale })
    }

    /// Returns the fitted root rectangle in document space.
    #[must_use]
    pub fn root(&self) -> Rect {
        self.root
    }

    /// Returns the uniform surface-pixels-per-document-pixel ratio.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Returns the scaled root size before rounding.
    #[must_use]
    pub fn surface_size(&self) -> Size {
        self.root.size() * self.scale
    }

    /// Returns the surface backing size in whole pixels.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "The scaled root is finite, non-negative, and no larger than the surface."
    )]
    pub fn surface_pixels(&self) -> (u32, u32) {
        let size = self.surface_size().round();
        (size.width as u32, size.height as u32)
    }

    /// Translates a document-space rectangle into root space.
    #[must_use]
    pub fn root_relative(&self, rect: Rect) -> Rect {
        rect_relative_to(rect, self.root)
    }

    /// Converts a document-space rectangle into surface space.
    #[must_use]
    pub fn root_to_surface_rect(&self, rect: Rect) -> Rect {
        self.root_relative(rect).scale_from_origin(self.scale)
    }

    /// Converts a point relative to the surface origin into root space.
    #[must_use]
    pub fn surface_to_root_point(&self, pt: Point) -> Point {
        Point::new(pt.x / self.scale, pt.y / self.scale)
    }
}
