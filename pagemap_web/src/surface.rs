// Copyright 2025 the Pagemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::format;
use alloc::string::{String, ToString};

use kurbo::{Rect, Size};
use log::debug;
use pagemap::{Cursor, PagemapError, Surface};
use pagemap_geometry::ElementMetrics;
use peniko::Color;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::host::{measure, set_cursor};

fn color_to_css(color: Color) -> String {
    // `Rgba8` formats as a CSS `rgb(...)`/`rgba(...)` string.
    color.to_rgba8().to_string()
}

/// A [`Surface`] backed by a canvas element's 2D context.
#[derive(Clone, Debug)]
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Wraps `canvas`, failing if it cannot provide a 2D context.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, PagemapError> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or(PagemapError::MissingContext)?;
        Ok(Self { canvas, ctx })
    }

    /// Returns the canvas element.
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl Surface for CanvasSurface {
    fn client_size(&self) -> Size {
        Size::new(
            f64::from(self.canvas.client_width()),
            f64::from(self.canvas.client_height()),
        )
    }

    fn metrics(&self) -> Option<ElementMetrics> {
        measure(&self.canvas)
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        let style = self.canvas.style();
        let sized = style
            .set_property("width", &format!("{width}px"))
            .and_then(|()| style.set_property("height", &format!("{height}px")));
        if sized.is_err() {
            debug!("could not set canvas display size");
        }
    }

    fn reset_transform(&mut self) {
        if self.ctx.reset_transform().is_err() {
            debug!("could not reset canvas transform");
        }
    }

    fn clear(&mut self) {
        let w = f64::from(self.canvas.width());
        let h = f64::from(self.canvas.height());
        self.ctx.clear_rect(0.0, 0.0, w, h);
    }

    fn scale(&mut self, factor: f64) {
        if self.ctx.scale(factor, factor).is_err() {
            debug!("could not scale canvas transform");
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ctx.set_fill_style_str(&color_to_css(color));
        self.ctx
            .fill_rect(rect.x0, rect.y0, rect.width(), rect.height());
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        set_cursor(&self.canvas, cursor);
    }
}
