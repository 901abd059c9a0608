// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Alignment preferences and fit configuration.

use core::str::FromStr;

/// Error returned when parsing an alignment keyword fails.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown {axis} alignment keyword")]
pub struct ParseAlignError {
    axis: &'static str,
}

/// Horizontal alignment of the fitted element against its position target.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HorizontalAlign {
    /// Left edges line up.
    Left,
    /// Right edges line up.
    Right,
    /// Horizontal centers line up.
    Center,
    /// No preference; the least-cropping placement wins.
    Auto,
}

impl HorizontalAlign {
    /// Swap `Left` and `Right` for right-to-left layouts.
    pub fn for_direction(self, rtl: bool) -> Self {
        match (self, rtl) {
            (Self::Left, true) => Self::Right,
            (Self::Right, true) => Self::Left,
            (other, _) => other,
        }
    }
}

impl FromStr for HorizontalAlign {
    type Err = ParseAlignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "center" => Ok(Self::Center),
            "auto" => Ok(Self::Auto),
            _ => Err(ParseAlignError { axis: "horizontal" }),
        }
    }
}

/// Vertical alignment of the fitted element against its position target.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum VerticalAlign {
    /// Top edges line up.
    Top,
    /// Bottom edges line up.
    Bottom,
    /// Vertical centers line up.
    Middle,
    /// No preference; the least-cropping placement wins.
    Auto,
}

impl FromStr for VerticalAlign {
    type Err = ParseAlignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            "middle" => Ok(Self::Middle),
            "auto" => Ok(Self::Auto),
            _ => Err(ParseAlignError { axis: "vertical" }),
        }
    }
}

/// Region a fitted element must stay within.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum FitInto<K> {
    /// The viewport, `(0, 0, innerWidth, innerHeight)`.
    #[default]
    Viewport,
    /// The bounding rect of an element.
    Element(K),
}

/// Fit configuration for one element.
///
/// All fields may change at any time; call [`Fit::refit`](crate::Fit::refit)
/// afterwards to apply them.
#[derive(Clone, Debug, PartialEq)]
pub struct FitOptions<K> {
    /// Region to constrain within.
    pub fit_into: FitInto<K>,
    /// Element whose `max-width`/`max-height` are set; `None` is the element itself.
    pub sizing_target: Option<K>,
    /// Alignment anchor; `None` is the element's composed parent.
    pub position_target: Option<K>,
    /// Horizontal preference; `None` leaves the axis unaligned.
    pub horizontal_align: Option<HorizontalAlign>,
    /// Vertical preference; `None` leaves the axis unaligned.
    pub vertical_align: Option<VerticalAlign>,
    /// Horizontal nudge, applied in the direction of alignment.
    pub horizontal_offset: f64,
    /// Vertical nudge, applied in the direction of alignment.
    pub vertical_offset: f64,
    /// Treat alignment as a preference and pick the least-cropped candidate.
    pub dynamic_align: bool,
    /// Candidate placements must not overlap the position target.
    pub no_overlap: bool,
    /// Width is at least the position target's width.
    pub fit_position_target: bool,
}

impl<K> Default for FitOptions<K> {
    fn default() -> Self {
        Self {
            fit_into: FitInto::Viewport,
            sizing_target: None,
            position_target: None,
            horizontal_align: None,
            vertical_align: None,
            horizontal_offset: 0.0,
            vertical_offset: 0.0,
            dynamic_align: false,
            no_overlap: false,
            fit_position_target: false,
        }
    }
}
