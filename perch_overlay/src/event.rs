// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Events emitted by overlays, and the cancelable `cancel` event.

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::config::ClosingReason;

/// What asked an overlay to cancel.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CancelTrigger {
    /// [`Stage::cancel`](crate::Stage::cancel) was called directly.
    Api,
    /// A click landed outside the overlay.
    OutsideClick,
    /// Escape was pressed.
    EscapeKey,
    /// Content outside the overlay scrolled with [`ScrollAction::Cancel`](crate::ScrollAction::Cancel).
    Scroll,
}

/// Notification delivered to the application, in emission order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OverlayEvent<K> {
    /// The `opened` flag flipped.
    OpenedChanged {
        /// Overlay that changed.
        overlay: K,
        /// New value.
        opened: bool,
    },
    /// Opening finished; the overlay is visible and registered.
    Opened {
        /// Overlay that opened.
        overlay: K,
    },
    /// Closing finished; the overlay is hidden.
    Closed {
        /// Overlay that closed.
        overlay: K,
        /// Accumulated closing reason.
        reason: ClosingReason,
    },
    /// A cancel was requested; `default_prevented` tells whether it was vetoed.
    Cancel {
        /// Overlay asked to cancel.
        overlay: K,
        /// Source of the request.
        trigger: CancelTrigger,
        /// A listener called [`CancelEvent::prevent_default`].
        default_prevented: bool,
    },
}

impl<K: Copy> OverlayEvent<K> {
    /// The overlay the event is about.
    pub fn overlay(&self) -> K {
        match *self {
            Self::OpenedChanged { overlay, .. }
            | Self::Opened { overlay }
            | Self::Closed { overlay, .. }
            | Self::Cancel { overlay, .. } => overlay,
        }
    }
}

/// The cancelable `cancel` event handed to cancel listeners.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CancelEvent<K> {
    overlay: K,
    trigger: CancelTrigger,
    default_prevented: bool,
}

impl<K: Copy> CancelEvent<K> {
    pub(crate) fn new(overlay: K, trigger: CancelTrigger) -> Self {
        Self {
            overlay,
            trigger,
            default_prevented: false,
        }
    }

    /// Overlay being canceled.
    pub fn overlay(&self) -> K {
        self.overlay
    }

    /// Source of the request.
    pub fn trigger(&self) -> CancelTrigger {
        self.trigger
    }

    /// Veto the cancel; the overlay stays open.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Whether a listener vetoed the cancel.
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

type Listener<K> = Box<dyn FnMut(&mut CancelEvent<K>)>;

/// Cancel listeners keyed by overlay, run in registration order.
pub(crate) struct CancelListeners<K> {
    entries: Vec<(K, Listener<K>)>,
}

impl<K: Copy + Eq> CancelListeners<K> {
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub(crate) fn add(&mut self, overlay: K, listener: Listener<K>) {
        self.entries.push((overlay, listener));
    }

    pub(crate) fn remove_all(&mut self, overlay: K) {
        self.entries.retain(|(k, _)| *k != overlay);
    }

    pub(crate) fn notify(&mut self, event: &mut CancelEvent<K>) {
        for (k, listener) in &mut self.entries {
            if *k == event.overlay {
                listener(&mut *event);
            }
        }
    }
}
