// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Perch Overlay: stacking, backdrop, focus trapping, and the open/close
//! lifecycle of overlays (dropdowns, dialogs, tooltips).
//!
//! ## Pieces
//!
//! - [`OverlayManager`]: the ordered stack of open overlays. Allocates
//!   z-indices above a floor ([`DEFAULT_MINIMUM_Z`]), keeps `always_on_top`
//!   overlays last, tracks the shared [`Backdrop`], and decides which overlays
//!   hear an outside click.
//! - [`Overlay`]: per-element lifecycle state (`opened`, `canceled`,
//!   closing reason, animating) built on [`perch_fit::Fit`] for layout.
//! - [`FrameScheduler`]: animation-frame jobs, coalesced per overlay and job.
//! - [`ScrollLocks`]: the stack of overlays locking document scrolling.
//! - [`Stage`]: owns a host tree and all of the above; applications call its
//!   intents (`open`, `close`, `toggle`, `cancel`, `refit`), feed it captured
//!   input (`dispatch_click`, `dispatch_focus`, `dispatch_keydown`,
//!   `dispatch_scroll`), run frames, and drain [`OverlayEvent`]s.
//!
//! ## Hosts
//!
//! The element tree is abstract. [`StackHost`] is enough for the manager;
//! [`OverlayHost`] (on top of [`perch_fit::FitHost`]) covers focus,
//! `aria-hidden`, `tabindex`, resize notification, shadow roots, and
//! document scrolling.
//!
//! ## Minimal example
//!
//! ```rust
//! use perch_overlay::{OverlayManager, StackHost, Stacking};
//!
//! struct Zs([Option<i32>; 3]);
//!
//! impl StackHost<usize> for Zs {
//!     fn z_index(&self, key: usize) -> Option<i32> {
//!         self.0[key]
//!     }
//!     fn set_z_index(&mut self, key: usize, z_index: Option<i32>) {
//!         self.0[key] = z_index;
//!     }
//! }
//!
//! let mut host = Zs([None; 3]);
//! let mut manager = OverlayManager::new();
//! let dialog = Stacking { with_backdrop: true, ..Stacking::default() };
//! manager.add_overlay(&mut host, 0, Stacking::default());
//! manager.add_overlay(&mut host, 1, dialog);
//! manager.add_overlay(&mut host, 2, Stacking::default());
//!
//! assert_eq!(manager.current_overlay(), Some(2));
//! // The backdrop sits right under the dialog.
//! assert_eq!(manager.backdrop().map(|b| b.z_index()), host.0[1].map(|z| z - 1));
//! ```
//!
//! ## Lifecycle and events
//!
//! `open` flips `opened`, queues [`OverlayEvent::OpenedChanged`], and defers the
//! opening sequence to the next frame: measure with transitions suppressed,
//! fit, register with the manager, move focus in, then
//! [`OverlayEvent::Opened`]. Closing unregisters, restores focus when allowed,
//! hides the element, gives back its z-index, then
//! [`OverlayEvent::Closed`]. `cancel` first asks the cancel listeners; any of
//! them may veto it with [`CancelEvent::prevent_default`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod backdrop;
mod config;
mod event;
mod host;
mod manager;
mod overlay;
mod scheduler;
mod scroll_lock;
mod stage;

pub use backdrop::Backdrop;
pub use config::{ClosingReason, OverlayConfig, ParseScrollActionError, ScrollAction, Stacking};
pub use event::{CancelEvent, CancelTrigger, OverlayEvent};
pub use host::{OverlayHost, StackHost};
pub use manager::{DEFAULT_MINIMUM_Z, OverlayManager};
pub use overlay::{Overlay, ScrollEvent};
pub use scheduler::{FrameJob, FrameScheduler};
pub use scroll_lock::ScrollLocks;
pub use stage::{Key, Stage};
