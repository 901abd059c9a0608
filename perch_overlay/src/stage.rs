// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The driver that owns a host, its overlays, and the shared services.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashMap;
use kurbo::Point;
use perch_fit::FitOptions;

use crate::config::OverlayConfig;
use crate::event::{CancelEvent, CancelListeners, CancelTrigger, OverlayEvent};
use crate::host::OverlayHost;
use crate::manager::OverlayManager;
use crate::overlay::{Overlay, OverlayCx, ScrollEvent};
use crate::scheduler::{FrameJob, FrameScheduler};
use crate::scroll_lock::ScrollLocks;

/// Keys routed to the top-most overlay.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Escape: cancel.
    Escape,
    /// Tab: focus trap.
    Tab,
}

/// Owner of a host tree, the overlays living in it, and the services they
/// share: the [`OverlayManager`], the [`FrameScheduler`], and the
/// [`ScrollLocks`].
///
/// The stage is the single entry point for an application: it forwards intents
/// (`open`, `close`, `cancel`, ...) to overlays, routes captured input to the
/// top-most overlay, runs deferred frame jobs, and queues [`OverlayEvent`]s for
/// [`Stage::take_events`].
pub struct Stage<K, H> {
    host: H,
    manager: OverlayManager<K>,
    frames: FrameScheduler<K>,
    scroll_locks: ScrollLocks<K>,
    overlays: HashMap<K, Overlay<K>>,
    order: Vec<K>,
    events: Vec<OverlayEvent<K>>,
    cancel_listeners: CancelListeners<K>,
}

impl<K, H> core::fmt::Debug for Stage<K, H>
where
    K: core::fmt::Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Stage")
            .field("overlays", &self.order)
            .field("manager", &self.manager)
            .field("pending_frames", &self.frames)
            .finish_non_exhaustive()
    }
}

impl<K, H> Stage<K, H>
where
    K: Copy + Eq + Hash + core::fmt::Debug + 'static,
    H: OverlayHost<K>,
{
    /// Create a stage with a default [`OverlayManager`].
    pub fn new(host: H) -> Self {
        Self::with_manager(host, OverlayManager::new())
    }

    /// Create a stage around an explicitly built manager.
    pub fn with_manager(host: H, manager: OverlayManager<K>) -> Self {
        Self {
            host,
            manager,
            frames: FrameScheduler::new(),
            scroll_locks: ScrollLocks::new(),
            overlays: HashMap::new(),
            order: Vec::new(),
            events: Vec::new(),
            cancel_listeners: CancelListeners::new(),
        }
    }

    /// The host tree.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host tree.
    ///
    /// Layout-affecting edits to an open overlay's content should be followed
    /// by [`Stage::notify_resized`] or [`Stage::children_changed`].
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// The overlay manager.
    pub fn manager(&self) -> &OverlayManager<K> {
        &self.manager
    }

    /// Mutable access to the overlay manager, e.g. to complete the backdrop.
    pub fn manager_mut(&mut self) -> &mut OverlayManager<K> {
        &mut self.manager
    }

    /// Pending frame jobs.
    pub fn frames(&self) -> &FrameScheduler<K> {
        &self.frames
    }

    /// Lifecycle state of `key`.
    pub fn overlay(&self, key: K) -> Option<&Overlay<K>> {
        self.overlays.get(&key)
    }

    /// Overlays in insertion order.
    pub fn overlays(&self) -> impl Iterator<Item = &Overlay<K>> + '_ {
        self.order.iter().filter_map(|k| self.overlays.get(k))
    }

    /// Give `key` the overlay capability. The element is hidden until opened.
    ///
    /// Returns `false` if `key` already is an overlay.
    pub fn insert(&mut self, key: K, config: OverlayConfig, fit: FitOptions<K>) -> bool {
        if self.overlays.contains_key(&key) {
            return false;
        }
        let mut overlay = Overlay::new(key, config, fit);
        overlay.ensure_setup(&mut self.host);
        self.overlays.insert(key, overlay);
        self.order.push(key);
        self.with_overlay(key, |o, cx| {
            if o.config().with_backdrop {
                o.with_backdrop_changed(cx);
            }
        });
        true
    }

    /// Detach and forget `key`. Returns `false` if it was not an overlay.
    pub fn remove(&mut self, key: K) -> bool {
        if !self.overlays.contains_key(&key) {
            return false;
        }
        self.disconnect(key);
        self.frames.cancel_all(key);
        self.overlays.remove(&key);
        self.order.retain(|k| *k != key);
        self.cancel_listeners.remove_all(key);
        true
    }

    /// Replace the configuration of `key` and react to what changed.
    pub fn configure(&mut self, key: K, edit: impl FnOnce(&mut OverlayConfig)) -> bool {
        self.with_overlay(key, |o, cx| {
            let mut config = o.config().clone();
            edit(&mut config);
            o.set_config(cx, config);
        })
        .is_some()
    }

    /// Fit options of `key`; call [`Stage::refit`] to apply changes.
    pub fn fit_options_mut(&mut self, key: K) -> Option<&mut FitOptions<K>> {
        self.overlays
            .get_mut(&key)
            .map(|o| o.fit_mut().options_mut())
    }

    /// The element entered the document.
    pub fn connect(&mut self, key: K) -> bool {
        self.with_overlay(key, Overlay::connect).is_some()
    }

    /// The element left the document. An in-flight transition completes now.
    pub fn disconnect(&mut self, key: K) -> bool {
        self.with_overlay(key, Overlay::disconnect).is_some()
    }

    /// Open `key`.
    pub fn open(&mut self, key: K) -> bool {
        self.with_overlay(key, Overlay::open).is_some()
    }

    /// Close `key`.
    pub fn close(&mut self, key: K) -> bool {
        self.with_overlay(key, Overlay::close).is_some()
    }

    /// Open `key` if closed, close it if open.
    pub fn toggle(&mut self, key: K) -> bool {
        self.with_overlay(key, Overlay::toggle).is_some()
    }

    /// Ask `key` to cancel. Returns `false` if a cancel listener prevented it
    /// or `key` is not an overlay.
    pub fn cancel(&mut self, key: K) -> bool {
        self.with_overlay(key, |o, cx| o.cancel(cx, CancelTrigger::Api))
            .unwrap_or(false)
    }

    /// Reset and fit `key` now.
    pub fn refit(&mut self, key: K) -> bool {
        self.with_overlay(key, |o, cx| o.refit(cx.host)).is_some()
    }

    /// Drop the cached focus-trap boundaries of `key`.
    pub fn invalidate_tabbables(&mut self, key: K) -> bool {
        self.with_overlay(key, |o, _| o.invalidate_tabbables())
            .is_some()
    }

    /// Content of `key` changed: forget tabbables, and tell resize listeners
    /// when open.
    pub fn children_changed(&mut self, key: K) -> bool {
        self.with_overlay(key, Overlay::on_children_changed)
            .is_some()
    }

    /// Something `key` depends on resized: refit on the next frame when open.
    pub fn notify_resized(&mut self, key: K) -> bool {
        self.with_overlay(key, Overlay::on_resize).is_some()
    }

    /// The host finished the opening or closing animation of `key`.
    pub fn finish_animation(&mut self, key: K) -> bool {
        self.with_overlay(key, Overlay::finish_animation)
            .unwrap_or(false)
    }

    /// Register a listener for the cancelable `cancel` event of `key`.
    pub fn add_cancel_listener(
        &mut self,
        key: K,
        listener: impl FnMut(&mut CancelEvent<K>) + 'static,
    ) {
        self.cancel_listeners.add(key, Box::new(listener));
    }

    /// Drain the queued events.
    pub fn take_events(&mut self) -> Vec<OverlayEvent<K>> {
        core::mem::take(&mut self.events)
    }

    /// Run the jobs due this frame. Returns how many ran.
    pub fn run_frame(&mut self) -> usize {
        let jobs = self.frames.take_frame();
        let mut ran = 0;
        for (key, job) in jobs {
            tracing::debug!(overlay = ?key, ?job, "running frame job");
            let done = match job {
                FrameJob::OpenedChanged => self.with_overlay(key, Overlay::render_opened_changed),
                FrameJob::Refit => self.with_overlay(key, |o, cx| o.refit(cx.host)),
            };
            if done.is_some() {
                ran += 1;
            } else {
                tracing::warn!(overlay = ?key, ?job, "frame job for unknown overlay");
            }
        }
        ran
    }

    /// Run frames until no job is pending, at most `limit` frames.
    pub fn run_until_idle(&mut self, limit: usize) -> usize {
        let mut frames = 0;
        while !self.frames.is_empty() && frames < limit {
            self.run_frame();
            frames += 1;
        }
        frames
    }

    /// Re-apply focus to the top-most overlay.
    pub fn focus_current_overlay(&mut self) {
        if let Some(current) = self.manager.current_overlay() {
            self.with_overlay(current, Overlay::apply_focus);
        }
    }

    /// Whether scrolling `element` is currently blocked by a scroll lock.
    pub fn is_scroll_locked(&self, element: K) -> bool {
        self.scroll_locks.is_locked(&self.host, element)
    }

    /// Route a captured click at `point` whose target has the composed `path`
    /// (target first) through the overlay stack.
    pub fn dispatch_click(&mut self, point: Point, path: &[K]) {
        let host = &self.host;
        let targets = self
            .manager
            .outside_click_targets(path, |k| !host.bounding_rect(k).contains(point));
        for key in targets {
            self.with_overlay(key, Overlay::on_capture_click);
        }
    }

    /// Route a captured focus event to the top-most overlay.
    ///
    /// Returns `true` when propagation should stop.
    pub fn dispatch_focus(&mut self, path: &[K]) -> bool {
        let Some(current) = self.manager.current_overlay() else {
            return false;
        };
        self.with_overlay(current, |o, cx| o.on_capture_focus(cx, path))
            .unwrap_or(false)
    }

    /// Route a captured key press to the top-most overlay.
    ///
    /// Returns `true` when the default action should be prevented.
    pub fn dispatch_keydown(&mut self, key: Key, shift: bool) -> bool {
        let Some(current) = self.manager.current_overlay() else {
            return false;
        };
        match key {
            Key::Escape => {
                self.with_overlay(current, Overlay::on_capture_esc);
                false
            }
            Key::Tab => self
                .with_overlay(current, |o, cx| o.on_capture_tab(cx, shift))
                .unwrap_or(false),
        }
    }

    /// Deliver a scroll event to every overlay listening on its root.
    pub fn dispatch_scroll(&mut self, event: &ScrollEvent<'_, K>) {
        let listening: Vec<K> = self
            .overlays()
            .filter(|o| o.listens_on(event.root))
            .map(|o| o.key())
            .collect();
        for key in listening {
            self.with_overlay(key, |o, cx| o.on_capture_scroll(cx, event));
        }
    }

    /// Run `f` against overlay `key` and the shared services.
    ///
    /// Afterwards, hands focus to the top-most overlay if a closing overlay
    /// asked for it.
    fn with_overlay<R>(
        &mut self,
        key: K,
        f: impl FnOnce(&mut Overlay<K>, &mut OverlayCx<'_, K, H>) -> R,
    ) -> Option<R> {
        let overlay = self.overlays.get_mut(&key)?;
        let mut cx = OverlayCx {
            host: &mut self.host,
            manager: &mut self.manager,
            frames: &mut self.frames,
            scroll_locks: &mut self.scroll_locks,
            events: &mut self.events,
            cancel_listeners: &mut self.cancel_listeners,
            refocus_current: false,
        };
        let result = f(overlay, &mut cx);
        let refocus = cx.refocus_current;
        if refocus
            && let Some(current) = self.manager.current_overlay()
            && current != key
        {
            self.focus_current_overlay();
        }
        Some(result)
    }
}
