// Copyright 2025 the Pagemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration: tracked element, highlight rules, fills, and refresh interval.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::time::Duration;

use peniko::Color;
use peniko::color::{Srgb, parse_color};

use crate::error::PagemapError;

/// An optional solid fill.
///
/// An unset fill means "paint nothing": the corresponding rectangle is
/// skipped rather than drawn transparent.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Fill(Option<Color>);

impl Fill {
    /// Paints nothing.
    pub const NONE: Self = Self(None);

    /// A solid fill with the given color.
    #[must_use]
    pub const fn solid(color: Color) -> Self {
        Self(Some(color))
    }

    /// Parses a CSS color string such as `#0000000a` or `rgba(0,0,0,0.15)`.
    ///
    /// An empty (or all-whitespace) string yields [`Fill::NONE`].
    pub fn parse(value: &str) -> Result<Self, PagemapError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(Self::NONE);
        }
        parse_color(trimmed)
            .map(|color| Self::solid(color.to_alpha_color::<Srgb>()))
            .map_err(|err| PagemapError::InvalidColor {
                value: value.to_string(),
                reason: err.to_string(),
            })
    }

    /// Returns the color, if set.
    #[must_use]
    pub fn color(&self) -> Option<Color> {
        self.0
    }

    /// Returns `true` if nothing will be painted.
    #[must_use]
    pub fn is_none(&self) -> bool {
        self.0.is_none()
    }
}

impl From<Color> for Fill {
    fn from(color: Color) -> Self {
        Self::solid(color)
    }
}

/// Ordered selector → fill rules.
///
/// Rules are painted in insertion order; overlapping matches blend through the
/// surface's own alpha compositing. Inserting a selector that is already
/// present replaces its fill and keeps its position.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleMap {
    rules: Vec<(String, Fill)>,
}

impl StyleMap {
    /// Creates an empty style map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a style map from `(selector, css color)` pairs.
    pub fn parse<'a>(
        rules: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, PagemapError> {
        let mut map = Self::new();
        for (selector, color) in rules {
            map.insert(selector, Fill::parse(color)?);
        }
        Ok(map)
    }

    /// Adds or replaces the fill for `selector`.
    pub fn insert(&mut self, selector: impl Into<String>, fill: Fill) {
        let selector = selector.into();
        match self.rules.iter_mut().find(|(s, _)| *s == selector) {
            Some((_, existing)) => *existing = fill,
            None => self.rules.push((selector, fill)),
        }
    }

    /// Builder form of [`StyleMap::insert`].
    #[must_use]
    pub fn with(mut self, selector: impl Into<String>, fill: impl Into<Fill>) -> Self {
        self.insert(selector, fill.into());
        self
    }

    /// Iterates rules in paint order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Fill)> + '_ {
        self.rules.iter().map(|(s, f)| (s.as_str(), *f))
    }

    /// Returns the number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if there are no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The built-in rules: structural sections, headings and links in faint
    /// translucent black.
    #[must_use]
    pub fn structural() -> Self {
        Self::new()
            .with(
                "header,footer,section,article",
                Color::from_rgba8(0, 0, 0, 0x08),
            )
            .with("h1,a", Color::from_rgba8(0, 0, 0, 0x0a))
            .with("h2,h3,h4", Color::from_rgba8(0, 0, 0, 0x08))
    }
}

/// Pagemap configuration.
///
/// `E` is the host's element handle type. Every field has a default, so
/// `PagemapOptions::default()` maps the whole page with faint neutral fills.
#[derive(Clone, Debug)]
pub struct PagemapOptions<E> {
    /// Element whose own scrolled content is mapped. `None` maps the page.
    pub viewport: Option<E>,
    /// Descendant highlight rules.
    pub styles: StyleMap,
    /// Background fill for the whole root rectangle.
    pub back: Fill,
    /// Fill for the visible window indicator.
    pub view: Fill,
    /// Fill for the visible window indicator while it is being dragged.
    pub drag: Fill,
    /// Optional periodic redraw.
    pub interval: Option<Duration>,
}

impl<E> Default for PagemapOptions<E> {
    fn default() -> Self {
        Self {
            viewport: None,
            styles: StyleMap::structural(),
            back: Fill::solid(Color::from_rgba8(0, 0, 0, 0x02)),
            view: Fill::solid(Color::from_rgba8(0, 0, 0, 0x05)),
            drag: Fill::solid(Color::from_rgba8(0, 0, 0, 0x0a)),
            interval: None,
        }
    }
}

impl<E> PagemapOptions<E> {
    /// Tracks `element`'s scrolled content instead of the page.
    #[must_use]
    pub fn with_viewport(mut self, element: E) -> Self {
        self.viewport = Some(element);
        self
    }

    /// Replaces the highlight rules.
    #[must_use]
    pub fn with_styles(mut self, styles: StyleMap) -> Self {
        self.styles = styles;
        self
    }

    /// Sets the background fill.
    #[must_use]
    pub fn with_back(mut self, fill: impl Into<Fill>) -> Self {
        self.back = fill.into();
        self
    }

    /// Sets the indicator fill.
    #[must_use]
    pub fn with_view(mut self, fill: impl Into<Fill>) -> Self {
        self.view = fill.into();
        self
    }

    /// Sets the indicator fill used while dragging.
    #[must_use]
    pub fn with_drag(mut self, fill: impl Into<Fill>) -> Self {
        self.drag = fill.into();
        self
    }

    /// Enables a periodic redraw. A zero period disables it.
    #[must_use]
    pub fn with_interval(mut self, period: Duration) -> Self {
        self.interval = (!period.is_zero()).then_some(period);
        self
    }

    /// Returns the indicator fill for the given drag state.
    pub(crate) fn indicator(&self, dragging: bool) -> Fill {
        if dragging { self.drag } else { self.view }
    }
}
