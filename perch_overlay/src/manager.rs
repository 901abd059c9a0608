// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The overlay stack: ordering, z-index allocation, backdrop tracking, and
//! outside-click routing.

use alloc::vec::Vec;

use smallvec::SmallVec;

use crate::backdrop::Backdrop;
use crate::config::Stacking;
use crate::host::StackHost;

/// Floor for overlay z-indices; above the usual default of embedded frames.
pub const DEFAULT_MINIMUM_Z: i32 = 101;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Registration<K> {
    overlay: K,
    stacking: Stacking,
}

/// Ordered stack of open overlays, bottom to top.
///
/// One manager serves every overlay of a host. It is an ordinary value: build
/// it once, hand it to the [`Stage`](crate::Stage) (or drive it directly), and
/// build a fresh one per test.
///
/// Invariants:
/// - [`OverlayManager::current_overlay`] is the last entry.
/// - An `always_on_top` entry stays last when other overlays are added.
/// - The backdrop's z-index is one below the top-most entry with a backdrop.
#[derive(Clone, Debug)]
pub struct OverlayManager<K> {
    overlays: Vec<Registration<K>>,
    minimum_z: i32,
    backdrop: Option<Backdrop>,
    animated_backdrop: bool,
}

impl<K> Default for OverlayManager<K> {
    fn default() -> Self {
        Self::with_minimum_z(DEFAULT_MINIMUM_Z)
    }
}

impl<K> OverlayManager<K> {
    /// Create a manager with [`DEFAULT_MINIMUM_Z`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a manager with a custom z-index floor.
    pub fn with_minimum_z(minimum_z: i32) -> Self {
        Self {
            overlays: Vec::new(),
            minimum_z,
            backdrop: None,
            animated_backdrop: false,
        }
    }

    /// Make the backdrop wait for [`Backdrop::complete`] after hiding.
    ///
    /// Takes effect when the backdrop is created.
    pub fn with_animated_backdrop(mut self, animated: bool) -> Self {
        self.animated_backdrop = animated;
        self
    }

    /// Current z-index floor.
    pub fn minimum_z(&self) -> i32 {
        self.minimum_z
    }

    /// Raise the z-index floor. Existing overlays keep their z-index.
    pub fn ensure_minimum_z(&mut self, minimum_z: i32) {
        self.minimum_z = self.minimum_z.max(minimum_z);
    }

    /// The shared backdrop, `None` until an overlay first asked for it.
    pub fn backdrop(&self) -> Option<&Backdrop> {
        self.backdrop.as_ref()
    }

    /// Mutable access to the shared backdrop, for completing its transition.
    pub fn backdrop_mut(&mut self) -> Option<&mut Backdrop> {
        self.backdrop.as_mut()
    }

    /// Number of registered overlays.
    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    /// Whether no overlay is registered.
    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }
}

impl<K: Copy + Eq + core::fmt::Debug> OverlayManager<K> {
    /// Registered overlays, bottom to top.
    pub fn overlays(&self) -> impl DoubleEndedIterator<Item = K> + '_ {
        self.overlays.iter().map(|r| r.overlay)
    }

    /// Whether `overlay` is registered.
    pub fn contains(&self, overlay: K) -> bool {
        self.index_of(overlay).is_some()
    }

    /// Top-most overlay.
    pub fn current_overlay(&self) -> Option<K> {
        self.overlays.last().map(|r| r.overlay)
    }

    /// Z-index of the top-most overlay, or the floor when there is none.
    pub fn current_overlay_z<H: StackHost<K> + ?Sized>(&self, host: &H) -> i32 {
        self.z_of(host, self.current_overlay())
    }

    /// Registered overlays that ask for the backdrop, bottom to top.
    pub fn backdrops(&self) -> impl Iterator<Item = K> + '_ {
        self.overlays
            .iter()
            .filter(|r| r.stacking.with_backdrop)
            .map(|r| r.overlay)
    }

    /// The z-index the backdrop should have right now.
    pub fn backdrop_z<H: StackHost<K> + ?Sized>(&self, host: &H) -> i32 {
        self.z_of(host, self.overlay_with_backdrop()) - 1
    }

    /// Register `overlay`, or bring it to the front if already registered.
    pub fn add_overlay<H: StackHost<K> + ?Sized>(
        &mut self,
        host: &mut H,
        overlay: K,
        stacking: Stacking,
    ) {
        if let Some(i) = self.index_of(overlay) {
            self.overlays[i].stacking = stacking;
            self.bring_to_front(host, i);
            self.track_backdrop(host);
            return;
        }
        let mut insertion = self.overlays.len();
        let current = self.overlays.last().copied();
        let mut minimum_z = self.z_of(host, current.map(|r| r.overlay)).max(self.minimum_z);
        let new_z = self.z_of(host, Some(overlay));

        if let Some(current) = current
            && should_be_behind(stacking, current.stacking)
        {
            // The always-on-top overlay moves up two and the new one slides in below.
            Self::apply_overlay_z(host, current.overlay, minimum_z);
            insertion -= 1;
            let previous = insertion.checked_sub(1).map(|i| self.overlays[i].overlay);
            minimum_z = self.z_of(host, previous).max(self.minimum_z);
        }
        if new_z <= minimum_z {
            Self::apply_overlay_z(host, overlay, minimum_z);
        }
        self.overlays.insert(insertion, Registration { overlay, stacking });
        tracing::debug!(?overlay, index = insertion, "overlay manager: added");
        self.track_backdrop(host);
    }

    /// Unregister `overlay`. Returns `false` if it was not registered.
    pub fn remove_overlay<H: StackHost<K> + ?Sized>(&mut self, host: &mut H, overlay: K) -> bool {
        let Some(i) = self.index_of(overlay) else {
            return false;
        };
        self.overlays.remove(i);
        tracing::debug!(?overlay, "overlay manager: removed");
        self.track_backdrop(host);
        true
    }

    /// Refresh the flags of a registered overlay and re-track the backdrop.
    ///
    /// Returns `false` if `overlay` is not registered.
    pub fn update_registration<H: StackHost<K> + ?Sized>(
        &mut self,
        host: &mut H,
        overlay: K,
        stacking: Stacking,
    ) -> bool {
        let Some(i) = self.index_of(overlay) else {
            return false;
        };
        self.overlays[i].stacking = stacking;
        self.track_backdrop(host);
        true
    }

    /// Show the backdrop one below the top-most overlay asking for it, or hide it.
    ///
    /// The backdrop is created on first need and never just to be hidden.
    pub fn track_backdrop<H: StackHost<K> + ?Sized>(&mut self, host: &mut H) {
        let top = self.overlay_with_backdrop();
        if top.is_none() && self.backdrop.is_none() {
            return;
        }
        let z = self.z_of(host, top) - 1;
        let animated = self.animated_backdrop;
        let backdrop = self.backdrop.get_or_insert_with(|| Backdrop::new(animated));
        backdrop.set_z_index(z);
        backdrop.set_opened(top.is_some());
        backdrop.prepare();
    }

    /// Overlays whose outside-click handler should run for a click, top-down.
    ///
    /// `path` is the composed path of the click target (target first).
    /// `is_outside` reports whether the click point lies outside an overlay's
    /// box. The walk stops at an overlay found in `path` or at the first
    /// overlay that does not allow click-through.
    pub fn outside_click_targets(
        &self,
        path: &[K],
        mut is_outside: impl FnMut(K) -> bool,
    ) -> SmallVec<[K; 4]> {
        let mut targets = SmallVec::new();
        for r in self.overlays.iter().rev() {
            if path.contains(&r.overlay) {
                break;
            }
            if is_outside(r.overlay) {
                targets.push(r.overlay);
            }
            if !r.stacking.allow_click_through {
                break;
            }
        }
        targets
    }

    fn index_of(&self, overlay: K) -> Option<usize> {
        self.overlays.iter().position(|r| r.overlay == overlay)
    }

    fn overlay_with_backdrop(&self) -> Option<K> {
        self.overlays
            .iter()
            .rev()
            .find(|r| r.stacking.with_backdrop)
            .map(|r| r.overlay)
    }

    fn z_of<H: StackHost<K> + ?Sized>(&self, host: &H, overlay: Option<K>) -> i32 {
        overlay
            .and_then(|o| host.z_index(o))
            .unwrap_or(self.minimum_z)
    }

    fn apply_overlay_z<H: StackHost<K> + ?Sized>(host: &mut H, overlay: K, above: i32) {
        host.set_z_index(overlay, Some(above + 2));
    }

    fn bring_to_front<H: StackHost<K> + ?Sized>(&mut self, host: &mut H, i: usize) {
        let Some(entry) = self.overlays.get(i).copied() else {
            return;
        };
        let mut last = self.overlays.len() - 1;
        let current = self.overlays[last];
        if should_be_behind(entry.stacking, current.stacking) {
            last -= 1;
        }
        if i >= last {
            return;
        }
        let minimum_z = self.current_overlay_z(host).max(self.minimum_z);
        if self.z_of(host, Some(entry.overlay)) <= minimum_z {
            Self::apply_overlay_z(host, entry.overlay, minimum_z);
        }
        self.overlays[i..=last].rotate_left(1);
        // Keep an always-on-top entry above the promoted one.
        if let Some(top) = self.overlays.get(last + 1).map(|r| r.overlay) {
            let promoted = self.z_of(host, Some(entry.overlay));
            if self.z_of(host, Some(top)) <= promoted {
                Self::apply_overlay_z(host, top, promoted);
            }
        }
        tracing::debug!(overlay = ?entry.overlay, index = last, "overlay manager: brought to front");
    }
}

fn should_be_behind(overlay: Stacking, other: Stacking) -> bool {
    !overlay.always_on_top && other.always_on_top
}
