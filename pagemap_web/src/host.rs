// Copyright 2025 the Pagemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use kurbo::{Point, Rect};
use log::debug;
use pagemap::{Cursor, Host, PagemapError};
use pagemap_geometry::{ElementMetrics, PageMetrics};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Window};

use crate::cursor_css;

/// The live page, seen through `window` and `document`.
#[derive(Clone, Debug)]
pub struct DomHost {
    window: Window,
    document: Document,
    root: Element,
    body: HtmlElement,
}

impl DomHost {
    /// Grabs the global window, its document, the root element and `body`.
    pub fn new() -> Result<Self, PagemapError> {
        let window = web_sys::window().ok_or_else(|| missing("window"))?;
        let document = window.document().ok_or_else(|| missing("document"))?;
        let root = document
            .document_element()
            .ok_or_else(|| missing("document element"))?;
        let body = document.body().ok_or_else(|| missing("body"))?;
        Ok(Self {
            window,
            document,
            root,
            body,
        })
    }

    /// Returns the global window.
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Returns the document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Returns the document body.
    pub fn body(&self) -> &HtmlElement {
        &self.body
    }
}

fn missing(what: &str) -> PagemapError {
    PagemapError::Environment {
        reason: alloc::format!("no {what} available"),
    }
}

/// Measures a connected element; detached elements have no layout.
pub(crate) fn measure(element: &HtmlElement) -> Option<ElementMetrics> {
    if !element.is_connected() {
        return None;
    }
    let r = element.get_bounding_client_rect();
    Some(ElementMetrics {
        bounding_client_rect: Rect::from_origin_size((r.x(), r.y()), (r.width(), r.height())),
        client_left: f64::from(element.client_left()),
        client_top: f64::from(element.client_top()),
        client_width: f64::from(element.client_width()),
        client_height: f64::from(element.client_height()),
        offset_width: f64::from(element.offset_width()),
        offset_height: f64::from(element.offset_height()),
        scroll_width: f64::from(element.scroll_width()),
        scroll_height: f64::from(element.scroll_height()),
        scroll_left: f64::from(element.scroll_left()),
        scroll_top: f64::from(element.scroll_top()),
    })
}

pub(crate) fn set_cursor(element: &HtmlElement, cursor: Cursor) {
    if element
        .style()
        .set_property("cursor", cursor_css(cursor))
        .is_err()
    {
        debug!("could not set cursor");
    }
}

impl Host for DomHost {
    type Element = HtmlElement;

    fn page_metrics(&self) -> Option<PageMetrics> {
        Some(PageMetrics {
            scroll_width: f64::from(self.root.scroll_width()),
            scroll_height: f64::from(self.root.scroll_height()),
            scroll_x: self.window.scroll_x().ok()?,
            scroll_y: self.window.scroll_y().ok()?,
            client_width: f64::from(self.root.client_width()),
            client_height: f64::from(self.root.client_height()),
        })
    }

    fn element_metrics(&self, element: &HtmlElement) -> Option<ElementMetrics> {
        measure(element)
    }

    fn query_all(&self, selector: &str, scope: Option<&HtmlElement>) -> Vec<HtmlElement> {
        let found = match scope {
            Some(element) => element.query_selector_all(selector),
            None => self.document.query_selector_all(selector),
        };
        let Ok(list) = found else {
            debug!("selector {selector:?} rejected by the document");
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .collect()
    }

    fn scroll_page_to(&mut self, pos: Point) {
        self.window.scroll_to_with_x_and_y(pos.x, pos.y);
    }

    fn scroll_element_to(&mut self, element: &HtmlElement, pos: Point) {
        element.scroll_to_with_x_and_y(pos.x, pos.y);
    }

    fn set_page_cursor(&mut self, cursor: Cursor) {
        set_cursor(&self.body, cursor);
    }
}
