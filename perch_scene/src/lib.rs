// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Perch Scene: an in-memory element tree for running Perch without a browser.
//!
//! [`Scene`] implements [`perch_fit::FitHost`], [`perch_overlay::StackHost`],
//! and [`perch_overlay::OverlayHost`], so a [`perch_overlay::Stage`] can drive
//! overlays over it headlessly: in tests, in tools, or behind a renderer that
//! owns its own widgets.
//!
//! ## Model
//!
//! - Elements have generational [`NodeId`]s, a parent, ordered children, and
//!   stylesheet data ([`Element`]). Inline styles layer on top.
//! - Layout is small on purpose: static elements sit at an offset from their
//!   parent (minus the parent's scroll offset, and the document scroll for
//!   roots); `position: fixed` elements resolve `left`/`top`/`right`/`bottom`
//!   plus margins against the viewport, or against the nearest ancestor
//!   flagged [`ElementFlags::CONTAINING_BLOCK`]. Natural size covers in-flow
//!   children; `width`, `max-*`, and `min-*` then apply.
//! - `display: none` elements and their descendants have no box.
//! - [`Scene::hit_test`] and [`Scene::composed_path`] produce the inputs of
//!   [`perch_overlay::Stage::dispatch_click`] and friends.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect, Size};
//! use perch_fit::{FitHost, FitOptions, HorizontalAlign, VerticalAlign};
//! use perch_overlay::{OverlayConfig, OverlayEvent, Stage};
//! use perch_scene::{Element, Scene};
//!
//! let mut scene = Scene::new(Size::new(800.0, 600.0));
//! let button = scene.insert(None, Element::focusable(Rect::new(40.0, 40.0, 140.0, 70.0)));
//! let menu = scene.insert(None, Element::boxed(Rect::new(0.0, 0.0, 160.0, 200.0)));
//!
//! let mut stage = Stage::new(scene);
//! let fit = FitOptions {
//!     position_target: Some(button),
//!     horizontal_align: Some(HorizontalAlign::Left),
//!     vertical_align: Some(VerticalAlign::Top),
//!     ..FitOptions::default()
//! };
//! stage.insert(menu, OverlayConfig::default(), fit);
//! stage.connect(menu);
//! stage.open(menu);
//! stage.run_frame();
//!
//! assert!(stage.take_events().contains(&OverlayEvent::Opened { overlay: menu }));
//! assert_eq!(stage.host().bounding_rect(menu).origin(), Point::new(40.0, 40.0));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod host;
mod scene;
mod types;

pub use scene::Scene;
pub use types::{Element, ElementFlags, NodeId};
