// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Style vocabulary shared by the fit engine and its hosts.
//!
//! Only the properties the fit engine and overlays read or write are modeled.
//! Lengths are in logical pixels; `None` stands for "unset" on inline styles and
//! for `auto`/`none` on computed styles.

use kurbo::Insets;

/// CSS `position`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Position {
    /// Normal flow.
    #[default]
    Static,
    /// Offset from its normal-flow position.
    Relative,
    /// Positioned against the nearest positioned ancestor.
    Absolute,
    /// Positioned against the viewport (or a transformed ancestor's box).
    Fixed,
}

/// CSS `box-sizing`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum BoxSizing {
    /// Sizes apply to the content box.
    #[default]
    ContentBox,
    /// Sizes include padding and border.
    BorderBox,
}

/// CSS `direction`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Left to right.
    #[default]
    Ltr,
    /// Right to left.
    Rtl,
}

/// CSS `display`, reduced to what overlays toggle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Display {
    /// Rendered.
    #[default]
    Block,
    /// Not rendered; the box has no geometry.
    None,
}

/// Inline (element-level) style declarations.
///
/// Every field is `None` when the declaration is absent, so a snapshot of a
/// field can be restored verbatim.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InlineStyle {
    /// `position`.
    pub position: Option<Position>,
    /// `top`.
    pub top: Option<f64>,
    /// `left`.
    pub left: Option<f64>,
    /// `right`.
    pub right: Option<f64>,
    /// `bottom`.
    pub bottom: Option<f64>,
    /// `width`.
    pub width: Option<f64>,
    /// `max-width`.
    pub max_width: Option<f64>,
    /// `max-height`.
    pub max_height: Option<f64>,
    /// `box-sizing`.
    pub box_sizing: Option<BoxSizing>,
    /// `z-index`.
    pub z_index: Option<i32>,
    /// `display`.
    pub display: Option<Display>,
    /// `transition: none; transform: none` while measuring.
    pub transitions_suppressed: bool,
}

/// Resolved style of an element, after cascading stylesheet and inline values.
#[derive(Clone, Debug, PartialEq)]
pub struct ComputedStyle {
    /// `position`.
    pub position: Position,
    /// `top`; `None` is `auto`.
    pub top: Option<f64>,
    /// `right`; `None` is `auto`.
    pub right: Option<f64>,
    /// `bottom`; `None` is `auto`.
    pub bottom: Option<f64>,
    /// `left`; `None` is `auto`.
    pub left: Option<f64>,
    /// `max-width`; `None` is `none`.
    pub max_width: Option<f64>,
    /// `max-height`; `None` is `none`.
    pub max_height: Option<f64>,
    /// `min-width`.
    pub min_width: f64,
    /// `min-height`.
    pub min_height: f64,
    /// Margins (`x0` left, `y0` top, `x1` right, `y1` bottom).
    pub margin: Insets,
    /// `direction`.
    pub direction: Direction,
    /// `z-index`; `None` is `auto`.
    pub z_index: Option<i32>,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            position: Position::Static,
            top: None,
            right: None,
            bottom: None,
            left: None,
            max_width: None,
            max_height: None,
            min_width: 0.0,
            min_height: 0.0,
            margin: Insets::ZERO,
            direction: Direction::Ltr,
            z_index: None,
        }
    }
}
