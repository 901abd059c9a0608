// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stack of overlays currently locking document scrolling.

use alloc::vec::Vec;

use crate::host::OverlayHost;

/// Overlays holding a scroll lock, oldest first.
///
/// Only the newest lock matters: scrolling is allowed inside it and blocked
/// everywhere else.
#[derive(Clone, Debug)]
pub struct ScrollLocks<K> {
    stack: Vec<K>,
}

impl<K> Default for ScrollLocks<K> {
    fn default() -> Self {
        Self { stack: Vec::new() }
    }
}

impl<K: Copy + Eq> ScrollLocks<K> {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take a lock for `overlay`. Returns `false` if it already holds one.
    pub fn push(&mut self, overlay: K) -> bool {
        if self.stack.contains(&overlay) {
            return false;
        }
        self.stack.push(overlay);
        true
    }

    /// Release the lock of `overlay`. Returns `false` if it held none.
    pub fn remove(&mut self, overlay: K) -> bool {
        let Some(i) = self.stack.iter().position(|k| *k == overlay) else {
            return false;
        };
        self.stack.remove(i);
        true
    }

    /// The overlay whose lock is in force.
    pub fn current(&self) -> Option<K> {
        self.stack.last().copied()
    }

    /// Whether scrolling `element` is blocked: a lock is in force and
    /// `element` lies outside the locking overlay.
    pub fn is_locked<H: OverlayHost<K> + ?Sized>(&self, host: &H, element: K) -> bool {
        self.current()
            .is_some_and(|locking| !host.contains(locking, element))
    }

    /// Number of locks held.
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// Whether no lock is held.
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}
