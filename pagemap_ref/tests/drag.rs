// Copyright 2025 the Pagemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag gestures driven through the reference collaborators.
//!
//! Every test maps a 2000x1000 page onto a 250x125 surface, so one surface
//! pixel is exactly eight document pixels.

mod common;

use common::{DRAG, Rig, VIEW, plain_options, wide_page};
use kurbo::{Point, Rect, Size};
use pagemap::drag::Anchor;
use pagemap::{Cursor, EventKind, Host, Surface};
use pagemap_ref::{DocumentHost, ElementSpec, ListenTarget, ScrollRequest};

const SURFACE: Size = Size::new(250.0, 250.0);

/// Attaches with the page scrolled to `scroll`, so the indicator covers
/// surface pixels `(scroll / 8) .. (scroll / 8) + (100, 62.5)`.
fn rig_at(scroll: Point) -> Rig {
    let mut host = wide_page();
    host.scroll_page_to(scroll);
    Rig::attach(host, SURFACE, plain_options())
}

fn last_request(rig: &Rig) -> ScrollRequest {
    *rig.host.scroll_requests().last().unwrap()
}

#[test]
fn grabbing_corners_and_center_keeps_the_view_still() {
    let cases = [
        (Point::new(50.0, 25.0), Anchor { rx: 0.0, ry: 0.0 }),
        (Point::new(150.0, 87.5), Anchor { rx: 1.0, ry: 1.0 }),
        (Point::new(100.0, 56.25), Anchor::CENTER),
        (Point::new(75.0, 40.625), Anchor { rx: 0.25, ry: 0.25 }),
    ];
    for (px, expected) in cases {
        let mut rig = rig_at(Point::new(400.0, 200.0));
        assert!(rig.press(px));

        let anchor = rig.pagemap.drag_anchor().unwrap();
        assert!((anchor.rx - expected.rx).abs() < 1e-12, "{px:?}: {anchor:?}");
        assert!((anchor.ry - expected.ry).abs() < 1e-12, "{px:?}: {anchor:?}");

        // The press itself applies one update, which must not move anything.
        let target = last_request(&rig).target();
        assert!((target.x - 400.0).abs() < 1e-9 && (target.y - 200.0).abs() < 1e-9);
        assert_eq!(rig.host.page_scroll(), Point::new(400.0, 200.0));
    }
}

#[test]
fn press_outside_the_indicator_centers_it_under_the_pointer() {
    let mut rig = rig_at(Point::new(400.0, 200.0));
    assert!(rig.press(Point::new(200.0, 100.0)));
    assert_eq!(rig.pagemap.drag_anchor(), Some(Anchor::CENTER));

    // Pointer at (1600, 800) in the document; view is 800x500.
    assert_eq!(last_request(&rig), ScrollRequest::Page(Point::new(1200.0, 550.0)));
    // The host clamps to the scrollable range.
    assert_eq!(rig.host.page_scroll(), Point::new(1200.0, 500.0));
}

#[test]
fn press_left_of_the_indicator_scrolls_to_the_start() {
    let mut rig = rig_at(Point::new(400.0, 200.0));
    assert!(rig.press(Point::new(10.0, 10.0)));
    assert_eq!(rig.pagemap.drag_anchor(), Some(Anchor::CENTER));
    assert_eq!(last_request(&rig), ScrollRequest::Page(Point::new(-320.0, -170.0)));
    assert_eq!(rig.host.page_scroll(), Point::ORIGIN);
}

#[test]
fn anchor_stays_under_the_pointer_while_moving() {
    let mut rig = rig_at(Point::ORIGIN);
    assert!(rig.press(Point::new(25.0, 15.625)));
    let anchor = rig.pagemap.drag_anchor().unwrap();
    assert_eq!(anchor, Anchor { rx: 0.25, ry: 0.25 });

    for px in [
        Point::new(40.0, 20.0),
        Point::new(90.0, 60.0),
        Point::new(130.0, 90.0),
        Point::new(60.0, 30.0),
    ] {
        assert!(rig.move_to(px));
        let target = last_request(&rig).target();
        let grabbed = Point::new(target.x + 800.0 * anchor.rx, target.y + 500.0 * anchor.ry);
        let pointer = Point::new(px.x * 8.0, px.y * 8.0);
        assert!(
            (grabbed - pointer).hypot() < 1e-9,
            "grabbed {grabbed:?}, pointer {pointer:?}"
        );
    }
    assert_eq!(rig.pagemap.drag_anchor(), Some(anchor));
}

#[test]
fn drag_uses_crosshair_and_drag_fill() {
    let mut rig = rig_at(Point::ORIGIN);
    assert!(rig.press(Point::new(50.0, 31.25)));

    assert!(rig.pagemap.is_dragging());
    assert_eq!(rig.pagemap.surface().cursor(), Cursor::Crosshair);
    assert_eq!(rig.host.cursor(), Cursor::Crosshair);
    assert_eq!(rig.pagemap.surface().fills().last().unwrap().1, DRAG);
    assert!(
        rig.events
            .is_listening_on(&ListenTarget::Window, EventKind::PointerMove)
    );
    assert!(
        rig.events
            .is_listening_on(&ListenTarget::Window, EventKind::PointerUp)
    );
}

#[test]
fn release_applies_a_final_update_and_stops_listening() {
    let mut rig = rig_at(Point::ORIGIN);
    assert!(rig.press(Point::new(50.0, 31.25)));
    assert_eq!(rig.events.active_count(), 6);

    assert!(rig.release(Point::new(100.0, 31.25)));
    assert_eq!(last_request(&rig), ScrollRequest::Page(Point::new(400.0, 0.0)));
    assert_eq!(rig.host.page_scroll(), Point::new(400.0, 0.0));

    assert!(!rig.pagemap.is_dragging());
    assert_eq!(rig.events.active_count(), 4);
    assert!(!rig.events.is_listening(EventKind::PointerMove));
    assert!(!rig.events.is_listening(EventKind::PointerUp));
    assert_eq!(rig.pagemap.surface().cursor(), Cursor::Pointer);
    assert_eq!(rig.host.cursor(), Cursor::Auto);
    assert_eq!(
        rig.pagemap.surface().fills().last(),
        Some(&(Rect::new(50.0, 0.0, 150.0, 62.5), VIEW))
    );

    // Later moves are not delivered and would be ignored if they were.
    let requests = rig.host.scroll_requests().len();
    assert!(!rig.move_to(Point::new(200.0, 100.0)));
    let pos = rig.on_surface(Point::new(200.0, 100.0));
    rig.pagemap.handle_event(
        &mut rig.host,
        &mut rig.events,
        pagemap::Event::PointerMove(pos),
    );
    assert_eq!(rig.host.scroll_requests().len(), requests);
}

#[test]
fn second_press_during_a_drag_is_ignored() {
    let mut rig = rig_at(Point::ORIGIN);
    assert!(rig.press(Point::new(10.0, 10.0)));
    let anchor = rig.pagemap.drag_anchor();
    let live = rig.events.active_count();

    assert!(rig.press(Point::new(200.0, 100.0)));
    assert_eq!(rig.pagemap.drag_anchor(), anchor);
    assert_eq!(rig.events.active_count(), live);
}

#[test]
fn press_before_first_frame_is_ignored() {
    let mut host = wide_page();
    host.set_measurable(false);
    let mut rig = Rig::attach(host, SURFACE, plain_options());
    assert!(rig.pagemap.frame().is_none());

    assert!(rig.press(Point::new(10.0, 10.0)));
    assert!(!rig.pagemap.is_dragging());
    assert_eq!(rig.events.active_count(), 4);
    assert!(rig.host.scroll_requests().is_empty());
}

#[test]
fn press_on_unmeasurable_surface_is_ignored() {
    let mut rig = rig_at(Point::ORIGIN);
    rig.pagemap.surface_mut().set_attached(false);
    assert!(rig.press(Point::new(10.0, 10.0)));
    assert!(!rig.pagemap.is_dragging());
    assert_eq!(rig.host.cursor(), Cursor::Auto);
}

#[test]
fn zero_area_view_suppresses_scrolling() {
    let host = DocumentHost::new(Size::new(2000.0, 1000.0), Size::ZERO);
    let mut rig = Rig::attach(host, SURFACE, plain_options());
    assert!(rig.pagemap.frame().is_some());

    assert!(rig.press(Point::new(10.0, 10.0)));
    assert!(rig.move_to(Point::new(20.0, 20.0)));
    assert!(rig.release(Point::new(30.0, 30.0)));
    assert!(rig.host.scroll_requests().is_empty());
    assert!(!rig.pagemap.is_dragging());
}

#[test]
fn dragging_a_tracked_element_scrolls_the_element() {
    let mut host = DocumentHost::new(Size::new(1000.0, 1000.0), Size::new(1000.0, 800.0));
    let scroller = host.insert(
        ElementSpec::new(Rect::new(100.0, 100.0, 500.0, 400.0))
            .with_content(Size::new(2000.0, 1000.0)),
    );
    let options = plain_options().with_viewport(scroller);
    let mut rig = Rig::attach(host, SURFACE, options);
    assert_eq!(rig.pagemap.frame().unwrap().scale(), 0.125);

    // Indicator covers (0, 0)..(50, 37.5); grab its center.
    assert!(rig.press(Point::new(25.0, 18.75)));
    assert!(rig.move_to(Point::new(125.0, 68.75)));
    assert_eq!(
        last_request(&rig),
        ScrollRequest::Element(scroller, Point::new(800.0, 400.0))
    );
    assert_eq!(rig.host.element_scroll(scroller), Some(Point::new(800.0, 400.0)));
    assert_eq!(rig.host.page_scroll(), Point::ORIGIN);
    assert!(
        !rig.host
            .scroll_requests()
            .iter()
            .any(|r| matches!(r, ScrollRequest::Page(_)))
    );
}

#[test]
fn detach_during_a_drag_releases_everything() {
    let mut rig = rig_at(Point::ORIGIN);
    assert!(rig.press(Point::new(10.0, 10.0)));
    assert!(rig.pagemap.is_dragging());

    rig.pagemap.detach(&mut rig.host, &mut rig.events);
    assert!(!rig.pagemap.is_dragging());
    assert_eq!(rig.events.active_count(), 0);
    assert_eq!(rig.host.cursor(), Cursor::Auto);
    assert_eq!(rig.pagemap.surface().cursor(), Cursor::Pointer);
}

#[test]
fn surface_metrics_follow_the_sticky_position() {
    let rig = rig_at(Point::new(400.0, 200.0));
    let metrics = rig.pagemap.surface().metrics().unwrap();
    assert_eq!(metrics.bounding_client_rect.origin(), common::SURFACE_POS);
}
