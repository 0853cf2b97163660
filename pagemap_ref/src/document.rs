// Copyright 2025 the Pagemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect, Size, Vec2};
use pagemap::{Cursor, Host};
use pagemap_geometry::{ElementMetrics, PageMetrics};

/// Handle to an element of a [`DocumentHost`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(pub u32);

/// Description of an element to insert into a [`DocumentHost`].
///
/// `border_box` is in document space as laid out with every scroll offset at
/// zero. By default the element has no border, its client size equals its
/// border box, and it does not scroll internally.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElementSpec {
    /// Border box in unscrolled document space.
    pub border_box: Rect,
    /// Left and top border widths.
    pub border: Vec2,
    /// Padding box size.
    pub client: Size,
    /// Scrollable content size.
    pub content: Size,
}

impl ElementSpec {
    /// A plain, non-scrolling element occupying `border_box`.
    #[must_use]
    pub fn new(border_box: Rect) -> Self {
        Self {
            border_box,
            border: Vec2::ZERO,
            client: border_box.size(),
            content: border_box.size(),
        }
    }

    /// Sets left/top border widths and shrinks the client box to fit inside
    /// equal borders on all sides.
    #[must_use]
    pub fn with_border(mut self, left: f64, top: f64) -> Self {
        self.border = Vec2::new(left, top);
        self.client = Size::new(
            self.border_box.width() - 2.0 * left,
            self.border_box.height() - 2.0 * top,
        );
        self
    }

    /// Sets the scrollable content size.
    #[must_use]
    pub fn with_content(mut self, content: Size) -> Self {
        self.content = content;
        self
    }
}

/// A scroll command issued by the pagemap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScrollRequest {
    /// The page was asked to scroll to this position.
    Page(Point),
    /// An element was asked to scroll its content to this position.
    Element(ElementId, Point),
}

impl ScrollRequest {
    /// Returns the requested position, before clamping.
    #[must_use]
    pub fn target(&self) -> Point {
        match *self {
            Self::Page(p) | Self::Element(_, p) => p,
        }
    }
}

#[derive(Clone, Debug)]
struct Node {
    spec: ElementSpec,
    parent: Option<ElementId>,
    scroll: Vec2,
    attached: bool,
}

/// An in-memory page implementing [`Host`].
///
/// Scrolling follows browser rules: requested positions are clamped to the
/// scrollable range, and a child's bounding box moves with every scrolling
/// ancestor.
#[derive(Clone, Debug)]
pub struct DocumentHost {
    document: Size,
    window: Size,
    scroll: Vec2,
    nodes: Vec<Node>,
    selectors: Vec<(String, Vec<ElementId>)>,
    requests: Vec<ScrollRequest>,
    cursor: Cursor,
    measurable: bool,
}

impl DocumentHost {
    /// Creates a page with a `document`-sized scrollable area seen through a
    /// `window`-sized viewport, scrolled to the top-left.
    #[must_use]
    pub fn new(document: Size, window: Size) -> Self {
        Self {
            document,
            window,
            scroll: Vec2::ZERO,
            nodes: Vec::new(),
            selectors: Vec::new(),
            requests: Vec::new(),
            cursor: Cursor::Auto,
            measurable: true,
        }
    }

    /// Adds a top-level element.
    pub fn insert(&mut self, spec: ElementSpec) -> ElementId {
        self.push(spec, None)
    }

    /// Adds an element inside `parent`; it scrolls with `parent`'s content.
    pub fn insert_in(&mut self, parent: ElementId, spec: ElementSpec) -> ElementId {
        self.push(spec, Some(parent))
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "Test documents hold far fewer than u32::MAX elements."
    )]
    fn push(&mut self, spec: ElementSpec, parent: Option<ElementId>) -> ElementId {
        let id = ElementId(self.nodes.len() as u32);
        self.nodes.push(Node {
            spec,
            parent,
            scroll: Vec2::ZERO,
            attached: true,
        });
        id
    }

    /// Makes `element` match `selector`.
    pub fn tag(&mut self, selector: &str, element: ElementId) {
        match self.selectors.iter_mut().find(|(s, _)| s == selector) {
            Some((_, ids)) => ids.push(element),
            None => self.selectors.push((selector.into(), alloc::vec![element])),
        }
    }

    /// Removes `element` from the page; it can no longer be measured.
    pub fn remove(&mut self, element: ElementId) {
        if let Some(node) = self.node_mut(element) {
            node.attached = false;
        }
    }

    /// Makes the whole page unmeasurable (or measurable again).
    pub fn set_measurable(&mut self, measurable: bool) {
        self.measurable = measurable;
    }

    /// Resizes the document.
    pub fn set_document_size(&mut self, document: Size) {
        self.document = document;
        self.scroll = self.clamp_page(self.scroll.to_point());
    }

    /// Returns the page scroll offset.
    #[must_use]
    pub fn page_scroll(&self) -> Point {
        self.scroll.to_point()
    }

    /// Returns `element`'s internal scroll offset.
    #[must_use]
    pub fn element_scroll(&self, element: ElementId) -> Option<Point> {
        self.node(element).map(|n| n.scroll.to_point())
    }

    /// Returns every scroll command received, oldest first.
    #[must_use]
    pub fn scroll_requests(&self) -> &[ScrollRequest] {
        &self.requests
    }

    /// Returns the page cursor.
    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    fn node(&self, id: ElementId) -> Option<&Node> {
        self.nodes.get(id.0 as usize)
    }

    fn node_mut(&mut self, id: ElementId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0 as usize)
    }

    /// Returns `true` if `id` and all of its ancestors are attached.
    fn is_attached(&self, id: ElementId) -> bool {
        let mut cur = Some(id);
        while let Some(id) = cur {
            match self.node(id) {
                Some(node) if node.attached => cur = node.parent,
                _ => return false,
            }
        }
        true
    }

    fn is_descendant(&self, id: ElementId, ancestor: ElementId) -> bool {
        let mut cur = self.node(id).and_then(|n| n.parent);
        while let Some(parent) = cur {
            if parent == ancestor {
                return true;
            }
            cur = self.node(parent).and_then(|n| n.parent);
        }
        false
    }

    /// Sum of the internal scroll offsets of every ancestor of `id`.
    fn ancestor_scroll(&self, id: ElementId) -> Vec2 {
        let mut total = Vec2::ZERO;
        let mut cur = self.node(id).and_then(|n| n.parent);
        while let Some(parent) = cur {
            let Some(node) = self.node(parent) else { break };
            total += node.scroll;
            cur = node.parent;
        }
        total
    }

    fn clamp_page(&self, pos: Point) -> Vec2 {
        Vec2::new(
            pos.x.clamp(0.0, (self.document.width - self.window.width).max(0.0)),
            pos.y.clamp(0.0, (self.document.height - self.window.height).max(0.0)),
        )
    }
}

impl Host for DocumentHost {
    type Element = ElementId;

    fn page_metrics(&self) -> Option<PageMetrics> {
        self.measurable.then_some(PageMetrics {
            scroll_width: self.document.width,
            scroll_height: self.document.height,
            scroll_x: self.scroll.x,
            scroll_y: self.scroll.y,
            client_width: self.window.width,
            client_height: self.window.height,
        })
    }

    fn element_metrics(&self, element: &ElementId) -> Option<ElementMetrics> {
        if !self.measurable || !self.is_attached(*element) {
            return None;
        }
        let node = self.node(*element)?;
        let spec = node.spec;
        let offset = self.scroll + self.ancestor_scroll(*element);
        Some(ElementMetrics {
            bounding_client_rect: spec.border_box - offset,
            client_left: spec.border.x,
            client_top: spec.border.y,
            client_width: spec.client.width,
            client_height: spec.client.height,
            offset_width: spec.border_box.width(),
            offset_height: spec.border_box.height(),
            scroll_width: spec.content.width,
            scroll_height: spec.content.height,
            scroll_left: node.scroll.x,
            scroll_top: node.scroll.y,
        })
    }

    fn query_all(&self, selector: &str, scope: Option<&ElementId>) -> Vec<ElementId> {
        let Some((_, ids)) = self.selectors.iter().find(|(s, _)| s == selector) else {
            return Vec::new();
        };
        ids.iter()
            .copied()
            .filter(|id| self.is_attached(*id))
            .filter(|id| scope.is_none_or(|scope| self.is_descendant(*id, *scope)))
            .collect()
    }

    fn scroll_page_to(&mut self, pos: Point) {
        self.requests.push(ScrollRequest::Page(pos));
        self.scroll = self.clamp_page(pos);
    }

    fn scroll_element_to(&mut self, element: &ElementId, pos: Point) {
        self.requests.push(ScrollRequest::Element(*element, pos));
        if let Some(node) = self.node_mut(*element) {
            let spec = node.spec;
            node.scroll = Vec2::new(
                pos.x
                    .clamp(0.0, (spec.content.width - spec.client.width).max(0.0)),
                pos.y
                    .clamp(0.0, (spec.content.height - spec.client.height).max(0.0)),
            );
        }
    }

    fn set_page_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
    }
}
