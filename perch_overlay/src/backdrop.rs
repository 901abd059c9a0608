// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The shared backdrop drawn under the top-most overlay that asks for one.

/// State of the single backdrop element owned by the manager.
///
/// The backdrop is attached to the document only while it is needed: opening
/// attaches it, and closing detaches it once the fade-out finished (right away
/// when the backdrop is not animated, otherwise on [`Backdrop::complete`]).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Backdrop {
    opened: bool,
    attached: bool,
    animated: bool,
    z_index: i32,
}

impl Backdrop {
    pub(crate) fn new(animated: bool) -> Self {
        Self {
            opened: false,
            attached: false,
            animated,
            z_index: 0,
        }
    }

    /// Whether the backdrop is shown.
    pub fn opened(&self) -> bool {
        self.opened
    }

    /// Whether the backdrop element is in the document.
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Whether closing waits for [`Backdrop::complete`].
    pub fn is_animated(&self) -> bool {
        self.animated
    }

    /// Current z-index.
    pub fn z_index(&self) -> i32 {
        self.z_index
    }

    pub(crate) fn set_z_index(&mut self, z_index: i32) {
        self.z_index = z_index;
    }

    /// Show or hide the backdrop.
    pub fn set_opened(&mut self, opened: bool) {
        self.opened = opened;
        if opened {
            self.prepare();
        } else if !self.animated {
            self.complete();
        }
    }

    /// Attach to the document if opened. Idempotent.
    pub fn prepare(&mut self) {
        if self.opened && !self.attached {
            self.attached = true;
        }
    }

    /// Detach once closed; call when the closing transition ends.
    pub fn complete(&mut self) {
        if !self.opened && self.attached {
            self.attached = false;
        }
    }
}
