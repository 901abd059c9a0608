// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Perch Fit: viewport-aware positioning for overlay content.
//!
//! Perch Fit places a box (a dropdown, tooltip, or dialog) against an anchor
//! element and keeps it inside a region, the viewport or any container.
//!
//! - Respects CSS margins, `min-width`/`min-height`, and axes the consumer
//!   already positioned or sized through CSS.
//! - Aligns to the anchor's edges or center, with pixel offsets and
//!   right-to-left mirroring.
//! - With `dynamic_align`, treats alignment as a preference and picks the
//!   candidate placement that crops the least; with `no_overlap`, keeps the box
//!   clear of the anchor.
//!
//! ## Where this fits
//!
//! The engine does not own an element tree. Hosts implement [`FitHost`] over
//! their retained tree (bounding rects, inline and computed styles, scroll
//! offsets), and [`Fit`] mutates inline styles through it the way a browser
//! implementation would mutate `element.style`.
//!
//! ## API overview
//!
//! - [`Fit`]: per-element capability holding [`FitOptions`] and the memoized [`FitInfo`].
//! - [`Fit::fit`] runs [`Fit::position`], [`Fit::constrain`], and [`Fit::center`];
//!   positioning applies when an axis is aligned and a position target exists,
//!   otherwise the element is constrained and centered.
//! - [`Fit::reset_fit`] restores the pre-fit inline styles; [`Fit::refit`] resets
//!   and fits while keeping the sizing target's scroll offset.
//! - [`geometry`]: pure candidate generation and selection ([`PlacementRequest`]),
//!   [`offscreen_area`], and [`normalized_rect`].
//! - [`style`]: the small CSS vocabulary exchanged with hosts.
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo` and `tracing`.
//! - `libm`: `no_std` builds that rely on `libm` for floating-point math.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod fit;
pub mod geometry;
mod host;
mod options;
pub mod style;

pub use fit::{
    ElementSnapshot, Fit, FitInfo, HorizontalEdge, PositionedBy, SizedBy, SizerSnapshot,
    VerticalEdge,
};
pub use geometry::{Candidate, PlacementRequest, normalized_rect, offscreen_area};
pub use host::FitHost;
pub use options::{FitInto, FitOptions, HorizontalAlign, ParseAlignError, VerticalAlign};
