// Copyright 2025 the Pagemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::rc::Rc;
use core::cell::RefCell;

use log::debug;
use pagemap::{Fill, Pagemap, PagemapError, PagemapOptions, StyleMap};
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, HtmlElement};

use crate::events::{DomEvents, Installed};
use crate::host::DomHost;
use crate::surface::CanvasSurface;

const CANVAS_STYLE: [(&str, &str); 6] = [
    ("position", "sticky"),
    ("width", "200px"),
    ("height", "200px"),
    ("bottom", "20px"),
    ("left", "20px"),
    ("z-index", "200"),
];

/// Options used by the stock page overlay: darker highlights than
/// [`PagemapOptions::default`], so the map reads at a glance.
pub fn bootstrap_options() -> Result<PagemapOptions<HtmlElement>, PagemapError> {
    let styles = StyleMap::parse([
        ("header,footer,section,article", "rgba(0,0,0,0.15)"),
        ("h1,a", "rgba(0,0,0,0.2)"),
        ("h2,h3,h4", "rgba(0,0,0,0.08)"),
    ])?;
    Ok(PagemapOptions::default()
        .with_styles(styles)
        .with_back(Fill::parse("rgba(0,0,0,0.05)")?)
        .with_view(Fill::parse("rgba(0,0,0,0.10)")?)
        .with_drag(Fill::parse("rgba(0,0,0,0.15)")?))
}

/// Adds a sticky 200x200 canvas to the bottom-left of the page and attaches
/// a pagemap to it.
///
/// The pagemap keeps running until [`Handle::detach`] is called or the
/// handle is dropped.
pub fn install(options: PagemapOptions<HtmlElement>) -> Result<Handle, PagemapError> {
    let host = DomHost::new()?;
    let canvas = host
        .document()
        .create_element("canvas")
        .ok()
        .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        .ok_or_else(|| PagemapError::Environment {
            reason: "could not create a canvas".into(),
        })?;
    let style = canvas.style();
    for (property, value) in CANVAS_STYLE {
        if style.set_property(property, value).is_err() {
            debug!("could not set canvas {property}");
        }
    }
    host.body()
        .append_child(&canvas)
        .map_err(|_| PagemapError::Environment {
            reason: "could not append the canvas to the body".into(),
        })?;

    let surface = CanvasSurface::new(canvas.clone())?;
    let window = host.window().clone();
    let shared = Rc::new_cyclic(|weak| {
        RefCell::new(Installed {
            pagemap: Pagemap::new(surface, options),
            host,
            events: DomEvents::new(window, canvas.clone(), weak.clone()),
        })
    });
    {
        let mut guard = shared.borrow_mut();
        let Installed {
            pagemap,
            host,
            events,
        } = &mut *guard;
        pagemap.attach(host, events);
    }
    Ok(Handle { shared, canvas })
}

/// A running pagemap installed by [`install`].
#[derive(Debug)]
pub struct Handle {
    shared: Rc<RefCell<Installed>>,
    canvas: HtmlCanvasElement,
}

impl Handle {
    /// Repaints now, for content changes no event reports.
    ///
    /// Returns `false` if the page could not be measured, or if called from
    /// inside one of the pagemap's own callbacks.
    pub fn redraw(&self) -> bool {
        match self.shared.try_borrow_mut() {
            Ok(mut guard) => {
                let Installed { pagemap, host, .. } = &mut *guard;
                pagemap.redraw(host)
            }
            Err(_) => false,
        }
    }

    /// Returns the canvas the pagemap draws on.
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Stops listening to the page and removes the canvas.
    pub fn detach(self) {
        if let Ok(mut guard) = self.shared.try_borrow_mut() {
            let Installed {
                pagemap,
                host,
                events,
            } = &mut *guard;
            pagemap.detach(host, events);
        }
        self.canvas.remove();
    }
}
