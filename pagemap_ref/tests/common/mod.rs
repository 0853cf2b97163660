// Copyright 2025 the Pagemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixtures shared by the end-to-end tests.

#![allow(dead_code, reason = "Each test binary uses a different subset.")]

use kurbo::{Point, Rect, Size};
use pagemap::{Fill, Pagemap, PagemapOptions, StyleMap};
use pagemap_ref::{DocumentHost, ElementId, RecordingEvents, RecordingSurface};
use peniko::Color;

/// Where the surface sits in the visible window.
pub const SURFACE_POS: Point = Point::new(20.0, 400.0);

pub const BACK: Color = Color::from_rgba8(0, 0, 0, 2);
pub const VIEW: Color = Color::from_rgba8(0, 0, 0, 5);
pub const DRAG: Color = Color::from_rgba8(0, 0, 0, 10);

pub type TestPagemap = Pagemap<DocumentHost, RecordingSurface>;

pub struct Rig {
    pub host: DocumentHost,
    pub events: RecordingEvents<ElementId>,
    pub pagemap: TestPagemap,
}

impl Rig {
    /// Builds and attaches a pagemap over `host`.
    pub fn attach(
        mut host: DocumentHost,
        surface: Size,
        options: PagemapOptions<ElementId>,
    ) -> Self {
        let mut events = RecordingEvents::new();
        let mut pagemap: TestPagemap =
            Pagemap::new(RecordingSurface::new(surface).at(SURFACE_POS), options);
        pagemap.attach(&mut host, &mut events);
        Self {
            host,
            events,
            pagemap,
        }
    }

    /// Page-space position of a point given in surface pixels.
    pub fn on_surface(&self, px: Point) -> Point {
        SURFACE_POS + self.host.page_scroll().to_vec2() + px.to_vec2()
    }

    pub fn deliver(&mut self, event: pagemap::Event) -> bool {
        self.events
            .deliver(&mut self.pagemap, &mut self.host, event)
    }

    pub fn press(&mut self, px: Point) -> bool {
        let pos = self.on_surface(px);
        self.deliver(pagemap::Event::PointerDown(pos))
    }

    pub fn move_to(&mut self, px: Point) -> bool {
        let pos = self.on_surface(px);
        self.deliver(pagemap::Event::PointerMove(pos))
    }

    pub fn release(&mut self, px: Point) -> bool {
        let pos = self.on_surface(px);
        self.deliver(pagemap::Event::PointerUp(pos))
    }
}

/// Options with known fills and no highlight rules.
pub fn plain_options() -> PagemapOptions<ElementId> {
    PagemapOptions::default()
        .with_styles(StyleMap::new())
        .with_back(Fill::solid(BACK))
        .with_view(Fill::solid(VIEW))
        .with_drag(Fill::solid(DRAG))
}

/// A 2000x1000 document seen through an 800x500 window.
pub fn wide_page() -> DocumentHost {
    DocumentHost::new(Size::new(2000.0, 1000.0), Size::new(800.0, 500.0))
}

pub fn assert_rect_near(actual: Rect, expected: Rect) {
    let close = (actual.x0 - expected.x0).abs() < 1e-9
        && (actual.y0 - expected.y0).abs() < 1e-9
        && (actual.x1 - expected.x1).abs() < 1e-9
        && (actual.y1 - expected.y1).abs() < 1e-9;
    assert!(close, "expected {expected:?}, got {actual:?}");
}
