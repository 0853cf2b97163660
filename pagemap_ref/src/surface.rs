// Copyright 2025 the Pagemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};
use pagemap::{Cursor, Surface};
use pagemap_geometry::ElementMetrics;
use peniko::Color;

/// A drawing call recorded by [`RecordingSurface`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SurfaceOp {
    /// Backing store and display box resized.
    Resize {
        /// New width in pixels.
        width: u32,
        /// New height in pixels.
        height: u32,
    },
    /// Transform reset to identity.
    ResetTransform,
    /// All pixels cleared.
    Clear,
    /// Uniform scale applied to the transform.
    Scale(f64),
    /// Rectangle filled, in the transform's space at the time of the call.
    FillRect {
        /// The rectangle as passed in.
        rect: Rect,
        /// The fill color.
        color: Color,
    },
    /// Surface cursor changed.
    SetCursor(Cursor),
}

/// A [`Surface`] that records calls instead of drawing.
///
/// The surface pretends to sit at a fixed position in the window (as a
/// `position: sticky` canvas would), so its bounding box does not move with
/// the page scroll. Resizing also resizes its displayed box, like a canvas
/// whose CSS size is set alongside its pixel size.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    position: Point,
    client_size: Size,
    attached: bool,
    pixels: (u32, u32),
    scale: f64,
    cursor: Cursor,
    ops: Vec<SurfaceOp>,
    frame: Vec<(Rect, Color)>,
}

impl RecordingSurface {
    /// Creates a surface displayed at `client_size`, with its top-left corner
    /// at the window origin.
    #[must_use]
    pub fn new(client_size: Size) -> Self {
        Self {
            position: Point::ORIGIN,
            client_size,
            attached: true,
            pixels: (0, 0),
            scale: 1.0,
            cursor: Cursor::Auto,
            ops: Vec::new(),
            frame: Vec::new(),
        }
    }

    /// Places the surface's top-left corner at `position`, relative to the
    /// visible window.
    #[must_use]
    pub fn at(mut self, position: Point) -> Self {
        self.position = position;
        self
    }

    /// Detaches (or re-attaches) the surface from the page, making it
    /// unmeasurable.
    pub fn set_attached(&mut self, attached: bool) {
        self.attached = attached;
    }

    /// Returns the surface's top-left corner relative to the visible window.
    #[must_use]
    pub fn position(&self) -> Point {
        self.position
    }

    /// Returns the current backing store size.
    #[must_use]
    pub fn pixels(&self) -> (u32, u32) {
        self.pixels
    }

    /// Returns the current cursor.
    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Returns every recorded call.
    #[must_use]
    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    /// Removes and returns every recorded call.
    pub fn take_ops(&mut self) -> Vec<SurfaceOp> {
        core::mem::take(&mut self.ops)
    }

    /// Returns the fills since the last clear, in surface pixel space.
    #[must_use]
    pub fn fills(&self) -> &[(Rect, Color)] {
        &self.frame
    }
}

impl Surface for RecordingSurface {
    fn client_size(&self) -> Size {
        self.client_size
    }

    fn metrics(&self) -> Option<ElementMetrics> {
        if !self.attached {
            return None;
        }
        let Size { width, height } = self.client_size;
        Some(ElementMetrics {
            bounding_client_rect: Rect::from_origin_size(self.position, self.client_size),
            client_width: width,
            client_height: height,
            offset_width: width,
            offset_height: height,
            scroll_width: width,
            scroll_height: height,
            ..ElementMetrics::default()
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.pixels = (width, height);
        self.client_size = Size::new(f64::from(width), f64::from(height));
        self.ops.push(SurfaceOp::Resize { width, height });
    }

    fn reset_transform(&mut self) {
        self.scale = 1.0;
        self.ops.push(SurfaceOp::ResetTransform);
    }

    fn clear(&mut self) {
        self.frame.clear();
        self.ops.push(SurfaceOp::Clear);
    }

    fn scale(&mut self, factor: f64) {
        self.scale *= factor;
        self.ops.push(SurfaceOp::Scale(factor));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.frame.push((rect.scale_from_origin(self.scale), color));
        self.ops.push(SurfaceOp::FillRect { rect, color });
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
        self.ops.push(SurfaceOp::SetCursor(cursor));
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect, Size};
    use peniko::Color;

    use super::*;

    #[test]
    fn resize_updates_display_box() {
        let mut surface = RecordingSurface::new(Size::new(200.0, 200.0));
        surface.resize(200, 100);
        assert_eq!(surface.client_size(), Size::new(200.0, 100.0));
        assert_eq!(surface.pixels(), (200, 100));
    }

    #[test]
    fn fills_are_reported_in_pixel_space_and_reset_by_clear() {
        let mut surface = RecordingSurface::new(Size::new(100.0, 100.0));
        surface.scale(0.5);
        surface.fill_rect(Rect::new(10.0, 10.0, 30.0, 50.0), Color::BLACK);
        assert_eq!(surface.fills()[0].0, Rect::new(5.0, 5.0, 15.0, 25.0));

        surface.reset_transform();
        surface.clear();
        assert!(surface.fills().is_empty());
        assert_eq!(surface.ops().len(), 4);
    }

    #[test]
    fn detached_surface_cannot_be_measured() {
        let mut surface = RecordingSurface::new(Size::new(100.0, 50.0)).at(Point::new(20.0, 30.0));
        let metrics = surface.metrics().unwrap();
        assert_eq!(metrics.bounding_client_rect, Rect::new(20.0, 30.0, 120.0, 80.0));

        surface.set_attached(false);
        assert!(surface.metrics().is_none());
    }
}
