// Copyright 2025 the Pagemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=pagemap_vello_cpu --heading-base-level=0

//! Vello CPU raster surface for Pagemap.
//!
//! [`PixmapSurface`] implements [`pagemap::Surface`] on top of the
//! sparse-strips [`vello_cpu::RenderContext`], so a pagemap can be rendered
//! to RGBA pixels without a browser or a GPU. This is useful for headless
//! previews and for checking that repeated redraws are pixel-identical.
//!
//! ```
//! use kurbo::Size;
//! use pagemap_vello_cpu::PixmapSurface;
//!
//! let mut surface = PixmapSurface::new(Size::new(64.0, 32.0));
//! let rgba = surface.render_rgba8();
//! assert_eq!(rgba.len(), 64 * 32 * 4);
//! ```

#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::fmt;

use kurbo::{Affine, Point, Rect, Size};
use log::debug;
use pagemap::{Cursor, Surface};
use pagemap_geometry::ElementMetrics;
use peniko::Color;
use vello_cpu::kurbo::{Affine as CpuAffine, Rect as CpuRect};
use vello_cpu::{Pixmap, RenderContext, RenderMode, RenderSettings};

/// A [`Surface`] that rasterizes into a `vello_cpu` render context.
///
/// The surface reports itself as sitting at a fixed position in the window
/// (see [`PixmapSurface::at`]), and its displayed size always equals its
/// backing store size.
pub struct PixmapSurface {
    ctx: RenderContext,
    width: u16,
    height: u16,
    position: Point,
    scale: f64,
    cursor: Cursor,
}

impl fmt::Debug for PixmapSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PixmapSurface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("position", &self.position)
            .field("scale", &self.scale)
            .field("cursor", &self.cursor)
            .finish_non_exhaustive()
    }
}

impl PixmapSurface {
    /// Creates a surface with a backing store of `size` pixels.
    ///
    /// Fractional sizes are rounded; sizes beyond `u16::MAX` are clamped.
    #[must_use]
    pub fn new(size: Size) -> Self {
        let size = size.round();
        let width = to_u16(size.width);
        let height = to_u16(size.height);
        Self {
            ctx: context(width, height),
            width,
            height,
            position: Point::ORIGIN,
            scale: 1.0,
            cursor: Cursor::Auto,
        }
    }

    /// Places the surface's top-left corner at `position`, relative to the
    /// visible window.
    #[must_use]
    pub fn at(mut self, position: Point) -> Self {
        self.position = position;
        self
    }

    /// Returns the backing store size in pixels.
    #[must_use]
    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Returns the current cursor.
    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Rasterizes everything drawn since the last clear.
    ///
    /// Returns unpremultiplied RGBA bytes, row by row, `width * height * 4`
    /// long.
    pub fn render_rgba8(&mut self) -> Vec<u8> {
        let mut pixmap = Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);

        let unpremul = pixmap.take_unpremultiplied();
        let mut bytes = Vec::with_capacity(unpremul.len() * 4);
        for p in unpremul {
            bytes.extend_from_slice(&[p.r, p.g, p.b, p.a]);
        }
        bytes
    }

    fn apply_transform(&mut self) {
        let xf = Affine::scale(self.scale);
        self.ctx.set_transform(CpuAffine::new(xf.as_coeffs()));
    }
}

impl Surface for PixmapSurface {
    fn client_size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }

    fn metrics(&self) -> Option<ElementMetrics> {
        let size = self.client_size();
        Some(ElementMetrics {
            bounding_client_rect: Rect::from_origin_size(self.position, size),
            client_width: size.width,
            client_height: size.height,
            offset_width: size.width,
            offset_height: size.height,
            scroll_width: size.width,
            scroll_height: size.height,
            ..ElementMetrics::default()
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        let w = u16::try_from(width).unwrap_or(u16::MAX);
        let h = u16::try_from(height).unwrap_or(u16::MAX);
        if (w, h) != (self.width, self.height) {
            debug!("reallocating pixmap surface at {w}x{h}");
            self.ctx = context(w, h);
            self.width = w;
            self.height = h;
            self.apply_transform();
        }
    }

    fn reset_transform(&mut self) {
        self.scale = 1.0;
        self.apply_transform();
    }

    fn clear(&mut self) {
        self.ctx.reset();
        self.apply_transform();
    }

    fn scale(&mut self, factor: f64) {
        self.scale *= factor;
        self.apply_transform();
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ctx.set_paint(color);
        self.ctx
            .fill_rect(&CpuRect::new(rect.x0, rect.y0, rect.x1, rect.y1));
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
    }
}

fn context(width: u16, height: u16) -> RenderContext {
    let settings = RenderSettings {
        // Always the u8 pipeline, so output does not depend on which
        // pipelines other crates in the build enabled.
        render_mode: RenderMode::OptimizeSpeed,
        ..RenderSettings::default()
    };
    RenderContext::new_with(width, height, settings)
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "Value is clamped to the u16 range first."
)]
fn to_u16(v: f64) -> u16 {
    v.clamp(0.0, f64::from(u16::MAX)) as u16
}

#[cfg(test)]
mod tests {
    use kurbo::Size;
    use pagemap::Surface;

    use super::PixmapSurface;

    #[test]
    fn resize_changes_backing_store_and_client_size() {
        let mut surface = PixmapSurface::new(Size::new(10.0, 10.0));
        surface.resize(40, 20);
        assert_eq!(surface.size(), (40, 20));
        assert_eq!(surface.client_size(), Size::new(40.0, 20.0));
        assert_eq!(surface.render_rgba8().len(), 40 * 20 * 4);
    }

    #[test]
    fn oversized_requests_are_clamped() {
        let mut surface = PixmapSurface::new(Size::new(1.0, 1.0));
        surface.resize(70_000, 1);
        assert_eq!(surface.size(), (u16::MAX, 1));
    }
}
