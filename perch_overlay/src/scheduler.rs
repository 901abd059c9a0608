// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Animation-frame job coalescing.
//!
//! Overlays defer work to the next animation frame under a job name. While a
//! job is pending for an overlay, asking for it again is dropped, so a burst of
//! resize notifications costs one refit.

use alloc::collections::VecDeque;
use alloc::vec::Vec;

/// Work an overlay defers to the next frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FrameJob {
    /// Run the opening or closing sequence for the current `opened` value.
    OpenedChanged,
    /// Reset and fit again.
    Refit,
}

/// Pending `(overlay, job)` pairs in request order.
#[derive(Clone, Debug)]
pub struct FrameScheduler<K> {
    pending: VecDeque<(K, FrameJob)>,
}

impl<K> Default for FrameScheduler<K> {
    fn default() -> Self {
        Self {
            pending: VecDeque::new(),
        }
    }
}

impl<K: Copy + Eq + core::fmt::Debug> FrameScheduler<K> {
    /// Create an empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `job` for `overlay`. Returns `false` if it was already pending.
    pub fn request(&mut self, overlay: K, job: FrameJob) -> bool {
        if self.is_pending(overlay, job) {
            tracing::trace!(?overlay, ?job, "frame job already pending");
            return false;
        }
        self.pending.push_back((overlay, job));
        true
    }

    /// Whether `job` is pending for `overlay`.
    pub fn is_pending(&self, overlay: K, job: FrameJob) -> bool {
        self.pending.contains(&(overlay, job))
    }

    /// Drop every pending job of `overlay`. Returns how many were dropped.
    pub fn cancel_all(&mut self, overlay: K) -> usize {
        let before = self.pending.len();
        self.pending.retain(|(k, _)| *k != overlay);
        before - self.pending.len()
    }

    /// Take the jobs due this frame. Jobs requested while running them wait
    /// for the next frame.
    pub fn take_frame(&mut self) -> Vec<(K, FrameJob)> {
        self.pending.drain(..).collect()
    }

    /// Number of pending jobs.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
