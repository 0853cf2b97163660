// Copyright 2025 the Pagemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use core::fmt;

/// Errors surfaced while setting up a pagemap.
///
/// Nothing that happens after construction is an error: a redraw or drag step
/// that cannot be measured is skipped instead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PagemapError {
    /// The drawing surface has no usable 2D context.
    MissingContext,
    /// A configured color could not be parsed.
    InvalidColor {
        /// The string as given.
        value: String,
        /// Why the parser rejected it.
        reason: String,
    },
    /// The host environment is missing something the pagemap needs, such as a
    /// document body to attach to.
    Environment {
        /// What was missing.
        reason: String,
    },
}

impl fmt::Display for PagemapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingContext => f.write_str("drawing surface has no 2d context"),
            Self::InvalidColor { value, reason } => {
                write!(f, "invalid color {value:?}: {reason}")
            }
            Self::Environment { reason } => write!(f, "unusable environment: {reason}"),
        }
    }
}

impl core::error::Error for PagemapError {}
