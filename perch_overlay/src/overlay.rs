// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-overlay lifecycle state.
//!
//! An [`Overlay`] is the open/close state machine of one element:
//!
//! ```text
//! Closed ──open──▶ Opening ──finish──▶ Open ──close/cancel──▶ Closing ──finish──▶ Closed
//! ```
//!
//! Flipping `opened` records the change and defers the opening or closing
//! sequence to the next frame ([`FrameJob::OpenedChanged`]). The sequence
//! finishes in the same frame unless the overlay is animated, in which case it
//! finishes when the host reports the animation done.

use alloc::vec::Vec;

use kurbo::Vec2;
use perch_fit::style::Display;
use perch_fit::{Fit, FitOptions};
use perch_focus::TabOrder;
use smallvec::SmallVec;

use crate::config::{ClosingReason, OverlayConfig, ScrollAction};
use crate::event::{CancelEvent, CancelListeners, CancelTrigger, OverlayEvent};
use crate::host::OverlayHost;
use crate::manager::OverlayManager;
use crate::scheduler::{FrameJob, FrameScheduler};
use crate::scroll_lock::ScrollLocks;

/// Scroll event seen by the capture listeners of open overlays.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ScrollEvent<'a, K> {
    /// Composed path of the scrolled element, target first.
    pub path: &'a [K],
    /// Root the event was observed on: a shadow root, or `None` for the document.
    pub root: Option<K>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Transition {
    Opening,
    Closing,
}

/// Shared state an overlay works against during one call.
pub(crate) struct OverlayCx<'a, K, H: ?Sized> {
    pub(crate) host: &'a mut H,
    pub(crate) manager: &'a mut OverlayManager<K>,
    pub(crate) frames: &'a mut FrameScheduler<K>,
    pub(crate) scroll_locks: &'a mut ScrollLocks<K>,
    pub(crate) events: &'a mut Vec<OverlayEvent<K>>,
    pub(crate) cancel_listeners: &'a mut CancelListeners<K>,
    /// Set when focus left a closing overlay without being restored; the
    /// next top-most overlay should take it.
    pub(crate) refocus_current: bool,
}

/// Lifecycle state of one overlay element.
#[derive(Clone, Debug)]
pub struct Overlay<K> {
    key: K,
    config: OverlayConfig,
    fit: Fit<K>,
    opened: bool,
    canceled: bool,
    closing_reason: ClosingReason,
    animating: bool,
    transition: Option<Transition>,
    attached: bool,
    set_up: bool,
    should_remove_tab_index: bool,
    boundaries: Option<(Option<K>, Option<K>)>,
    focused_child: Option<K>,
    restore_focus_node: Option<K>,
    saved_scroll: Vec2,
    scroll_roots: Option<SmallVec<[Option<K>; 4]>>,
}

impl<K: Copy + Eq + core::fmt::Debug> Overlay<K> {
    pub(crate) fn new(key: K, config: OverlayConfig, fit: FitOptions<K>) -> Self {
        Self {
            key,
            config,
            fit: Fit::with_options(key, fit),
            opened: false,
            canceled: false,
            closing_reason: ClosingReason::default(),
            animating: false,
            transition: None,
            attached: false,
            set_up: false,
            should_remove_tab_index: false,
            boundaries: None,
            focused_child: None,
            restore_focus_node: None,
            saved_scroll: Vec2::ZERO,
            scroll_roots: None,
        }
    }

    /// The overlay element.
    pub fn key(&self) -> K {
        self.key
    }

    /// Current configuration.
    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// The fit capability laying the overlay out.
    pub fn fit(&self) -> &Fit<K> {
        &self.fit
    }

    pub(crate) fn fit_mut(&mut self) -> &mut Fit<K> {
        &mut self.fit
    }

    /// Whether the overlay is (or is becoming) open.
    pub fn opened(&self) -> bool {
        self.opened
    }

    /// Whether the last close came from a cancel.
    pub fn canceled(&self) -> bool {
        self.canceled
    }

    /// Reason reported with the next `Closed` event.
    pub fn closing_reason(&self) -> ClosingReason {
        self.closing_reason
    }

    /// Between the start of an opening or closing sequence and its end.
    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// Whether the element is in the document.
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Descendant that last received focus inside the overlay.
    pub fn focused_child(&self) -> Option<K> {
        self.focused_child
    }

    /// Whether scroll capture listeners are installed.
    pub fn is_listening_for_scroll(&self) -> bool {
        self.scroll_roots.is_some()
    }

    /// Whether the overlay listens for scroll events observed on `root`.
    pub fn listens_on(&self, root: Option<K>) -> bool {
        self.scroll_roots
            .as_ref()
            .is_some_and(|roots| roots.contains(&root))
    }

    /// Hide the element before it ever opens. Runs once.
    pub(crate) fn ensure_setup<H: OverlayHost<K> + ?Sized>(&mut self, host: &mut H) {
        if self.set_up {
            return;
        }
        self.set_up = true;
        if let Some(style) = host.inline_style_mut(self.key) {
            style.display = Some(Display::None);
        }
    }

    // --- configuration reactions ---

    pub(crate) fn set_config<H: OverlayHost<K> + ?Sized>(
        &mut self,
        cx: &mut OverlayCx<'_, K, H>,
        config: OverlayConfig,
    ) {
        let previous = core::mem::replace(&mut self.config, config);
        if previous.with_backdrop != self.config.with_backdrop {
            self.with_backdrop_changed(cx);
        } else if previous.stacking() != self.config.stacking() && self.opened && self.attached {
            cx.manager
                .update_registration(cx.host, self.key, self.config.stacking());
        }
        if previous.scroll_action != self.config.scroll_action {
            self.update_scroll_observers(cx);
        }
    }

    pub(crate) fn with_backdrop_changed<H: OverlayHost<K> + ?Sized>(
        &mut self,
        cx: &mut OverlayCx<'_, K, H>,
    ) {
        if self.config.with_backdrop {
            if cx.host.tab_index(self.key).is_none() {
                cx.host.set_tab_index(self.key, Some(-1));
                self.should_remove_tab_index = true;
            }
        } else if self.should_remove_tab_index {
            cx.host.set_tab_index(self.key, None);
            self.should_remove_tab_index = false;
        }
        if self.opened && self.attached {
            cx.manager
                .update_registration(cx.host, self.key, self.config.stacking());
        }
    }

    // --- attachment ---

    pub(crate) fn connect<H: OverlayHost<K> + ?Sized>(&mut self, cx: &mut OverlayCx<'_, K, H>) {
        if self.attached {
            return;
        }
        self.attached = true;
        self.fit.connect(cx.host);
        if self.opened {
            self.opened_changed(cx);
        } else {
            self.update_scroll_observers(cx);
        }
    }

    pub(crate) fn disconnect<H: OverlayHost<K> + ?Sized>(
        &mut self,
        cx: &mut OverlayCx<'_, K, H>,
    ) {
        if !self.attached {
            return;
        }
        self.attached = false;
        cx.frames.cancel_all(self.key);
        cx.manager.remove_overlay(cx.host, self.key);
        if self.animating {
            // Forced completion: opened/closed must still fire.
            tracing::debug!(overlay = ?self.key, opened = self.opened, "overlay: detached while animating");
            if self.opened {
                self.finish_render_opened(cx);
            } else {
                self.apply_focus(cx);
                self.finish_render_closed(cx);
            }
        }
        self.update_scroll_observers(cx);
    }

    // --- intents ---

    pub(crate) fn open<H: OverlayHost<K> + ?Sized>(&mut self, cx: &mut OverlayCx<'_, K, H>) {
        self.set_canceled(false);
        self.set_opened(cx, true);
    }

    pub(crate) fn close<H: OverlayHost<K> + ?Sized>(&mut self, cx: &mut OverlayCx<'_, K, H>) {
        self.set_canceled(false);
        self.set_opened(cx, false);
    }

    pub(crate) fn toggle<H: OverlayHost<K> + ?Sized>(&mut self, cx: &mut OverlayCx<'_, K, H>) {
        self.set_canceled(false);
        let opened = !self.opened;
        self.set_opened(cx, opened);
    }

    /// Fire `cancel`; close unless a listener prevented it.
    pub(crate) fn cancel<H: OverlayHost<K> + ?Sized>(
        &mut self,
        cx: &mut OverlayCx<'_, K, H>,
        trigger: CancelTrigger,
    ) -> bool {
        let mut event = CancelEvent::new(self.key, trigger);
        cx.cancel_listeners.notify(&mut event);
        let default_prevented = event.is_default_prevented();
        cx.events.push(OverlayEvent::Cancel {
            overlay: self.key,
            trigger,
            default_prevented,
        });
        if default_prevented {
            tracing::debug!(overlay = ?self.key, ?trigger, "overlay: cancel prevented");
            return false;
        }
        self.set_canceled(true);
        self.set_opened(cx, false);
        true
    }

    pub(crate) fn refit<H: OverlayHost<K> + ?Sized>(&mut self, host: &mut H) {
        self.fit.refit(host);
    }

    pub(crate) fn invalidate_tabbables(&mut self) {
        self.boundaries = None;
    }

    // --- state reactions ---

    fn set_canceled(&mut self, canceled: bool) {
        self.canceled = canceled;
        self.closing_reason.canceled = canceled;
    }

    fn set_opened<H: OverlayHost<K> + ?Sized>(&mut self, cx: &mut OverlayCx<'_, K, H>, opened: bool) {
        if self.opened == opened {
            return;
        }
        self.opened = opened;
        cx.events.push(OverlayEvent::OpenedChanged {
            overlay: self.key,
            opened,
        });
        self.opened_changed(cx);
    }

    fn opened_changed<H: OverlayHost<K> + ?Sized>(&mut self, cx: &mut OverlayCx<'_, K, H>) {
        cx.host.set_aria_hidden(self.key, !self.opened);
        self.update_scroll_observers(cx);
        if !self.attached {
            return;
        }
        self.animating = true;
        cx.frames.request(self.key, FrameJob::OpenedChanged);
    }

    /// The deferred half of an `opened` change.
    pub(crate) fn render_opened_changed<H: OverlayHost<K> + ?Sized>(
        &mut self,
        cx: &mut OverlayCx<'_, K, H>,
    ) {
        // A transition still waiting on its animation completes first.
        self.finish_animation(cx);
        self.animating = true;
        if self.opened {
            tracing::debug!(overlay = ?self.key, "overlay: opening");
            self.prepare_render_opened(cx);
            cx.manager
                .add_overlay(cx.host, self.key, self.config.stacking());
            self.apply_focus(cx);
            if self.config.animated {
                self.transition = Some(Transition::Opening);
            } else {
                self.finish_render_opened(cx);
            }
        } else {
            tracing::debug!(overlay = ?self.key, "overlay: closing");
            cx.manager.remove_overlay(cx.host, self.key);
            self.apply_focus(cx);
            if self.config.animated {
                self.transition = Some(Transition::Closing);
            } else {
                self.finish_render_closed(cx);
            }
        }
    }

    /// Complete a transition waiting on its animation. Returns `false` if
    /// none was waiting.
    pub(crate) fn finish_animation<H: OverlayHost<K> + ?Sized>(
        &mut self,
        cx: &mut OverlayCx<'_, K, H>,
    ) -> bool {
        match self.transition {
            Some(Transition::Opening) => self.finish_render_opened(cx),
            Some(Transition::Closing) => self.finish_render_closed(cx),
            None => return false,
        }
        true
    }

    fn prepare_render_opened<H: OverlayHost<K> + ?Sized>(&mut self, cx: &mut OverlayCx<'_, K, H>) {
        self.restore_focus_node = cx.host.active_element();
        let key = self.key;
        // Measure with transitions off so that size animations start from the
        // laid-out size, not a stale one.
        if let Some(style) = cx.host.inline_style_mut(key) {
            style.transitions_suppressed = true;
            style.display = None;
        }
        self.fit.refit(cx.host);
        if let Some(style) = cx.host.inline_style_mut(key) {
            style.display = Some(Display::None);
        }
        reflow(cx.host, key);
        if let Some(style) = cx.host.inline_style_mut(key) {
            style.transitions_suppressed = false;
            style.display = None;
        }
        reflow(cx.host, key);
    }

    fn finish_render_opened<H: OverlayHost<K> + ?Sized>(&mut self, cx: &mut OverlayCx<'_, K, H>) {
        self.transition = None;
        cx.host.notify_resize(self.key);
        self.animating = false;
        tracing::debug!(overlay = ?self.key, "overlay: opened");
        cx.events.push(OverlayEvent::Opened { overlay: self.key });
    }

    fn finish_render_closed<H: OverlayHost<K> + ?Sized>(&mut self, cx: &mut OverlayCx<'_, K, H>) {
        self.transition = None;
        if let Some(style) = cx.host.inline_style_mut(self.key) {
            style.display = Some(Display::None);
        }
        // The z-index is only given back once the overlay is hidden.
        cx.host.set_z_index(self.key, None);
        cx.host.notify_resize(self.key);
        self.animating = false;
        tracing::debug!(overlay = ?self.key, reason = ?self.closing_reason, "overlay: closed");
        cx.events.push(OverlayEvent::Closed {
            overlay: self.key,
            reason: self.closing_reason,
        });
    }

    // --- focus ---

    fn focus_node<H: OverlayHost<K> + ?Sized>(&self, host: &H) -> K {
        self.focused_child
            .or_else(|| host.autofocus_node(self.key))
            .unwrap_or(self.key)
    }

    /// Focus the overlay when open; restore outside focus when closed.
    pub(crate) fn apply_focus<H: OverlayHost<K> + ?Sized>(&mut self, cx: &mut OverlayCx<'_, K, H>) {
        if self.opened {
            if !self.config.no_auto_focus {
                let node = self.focus_node(cx.host);
                cx.host.focus(node);
            }
            return;
        }
        let mut restored = false;
        if self.config.restore_focus_on_close
            && let Some(node) = self.restore_focus_node
        {
            // Focus moved elsewhere since opening (a click outside, another
            // widget): leave it there.
            let active = cx.host.active_element();
            if active.is_none_or(|a| cx.host.contains(self.key, a)) {
                cx.host.focus(node);
                restored = true;
            }
        }
        self.restore_focus_node = None;
        let node = self.focus_node(cx.host);
        cx.host.blur(node);
        self.focused_child = None;
        if !restored {
            cx.refocus_current = true;
        }
    }

    fn ensure_boundaries<H: OverlayHost<K> + ?Sized>(&mut self, host: &H) -> (Option<K>, Option<K>) {
        if let Some(b) = self.boundaries {
            return b;
        }
        let order = TabOrder::from_document_order(host.tab_candidates(self.key));
        let b = (order.first(), order.last());
        self.boundaries = Some(b);
        b
    }

    // --- capture handlers ---

    pub(crate) fn on_capture_click<H: OverlayHost<K> + ?Sized>(
        &mut self,
        cx: &mut OverlayCx<'_, K, H>,
    ) {
        if !self.config.no_cancel_on_outside_click {
            self.cancel(cx, CancelTrigger::OutsideClick);
        }
    }

    /// Returns `true` when propagation of the focus event stops here.
    pub(crate) fn on_capture_focus<H: OverlayHost<K> + ?Sized>(
        &mut self,
        cx: &mut OverlayCx<'_, K, H>,
        path: &[K],
    ) -> bool {
        if !self.config.with_backdrop {
            return false;
        }
        if path.contains(&self.key) {
            self.focused_child = path.first().copied();
            false
        } else {
            self.apply_focus(cx);
            true
        }
    }

    pub(crate) fn on_capture_esc<H: OverlayHost<K> + ?Sized>(
        &mut self,
        cx: &mut OverlayCx<'_, K, H>,
    ) {
        if !self.config.no_cancel_on_esc_key {
            self.cancel(cx, CancelTrigger::EscapeKey);
        }
    }

    /// Wrap Tab at the trap boundaries. Returns `true` when the default
    /// focus move is prevented.
    pub(crate) fn on_capture_tab<H: OverlayHost<K> + ?Sized>(
        &mut self,
        cx: &mut OverlayCx<'_, K, H>,
        shift: bool,
    ) -> bool {
        if !self.config.with_backdrop {
            return false;
        }
        let (first, last) = self.ensure_boundaries(cx.host);
        let (check, set) = if shift { (first, last) } else { (last, first) };
        let wrap = if check == set {
            true
        } else {
            let active = cx.host.active_element();
            active == check || active == Some(self.key)
        };
        if wrap {
            self.focused_child = set;
            self.apply_focus(cx);
        }
        wrap
    }

    pub(crate) fn on_capture_scroll<H: OverlayHost<K> + ?Sized>(
        &mut self,
        cx: &mut OverlayCx<'_, K, H>,
        event: &ScrollEvent<'_, K>,
    ) {
        if self.animating || event.path.contains(&self.key) {
            return;
        }
        match self.config.scroll_action {
            Some(ScrollAction::Lock) => cx.host.set_document_scroll(self.saved_scroll),
            Some(ScrollAction::Refit) => {
                cx.frames.request(self.key, FrameJob::Refit);
            }
            Some(ScrollAction::Cancel) => {
                self.cancel(cx, CancelTrigger::Scroll);
            }
            None => {}
        }
    }

    pub(crate) fn on_resize<H: OverlayHost<K> + ?Sized>(&mut self, cx: &mut OverlayCx<'_, K, H>) {
        if self.opened && !self.animating {
            cx.frames.request(self.key, FrameJob::Refit);
        }
    }

    pub(crate) fn on_children_changed<H: OverlayHost<K> + ?Sized>(
        &mut self,
        cx: &mut OverlayCx<'_, K, H>,
    ) {
        self.invalidate_tabbables();
        if self.opened && !self.animating {
            cx.host.notify_resize(self.key);
        }
    }

    // --- scrolling ---

    fn update_scroll_observers<H: OverlayHost<K> + ?Sized>(
        &mut self,
        cx: &mut OverlayCx<'_, K, H>,
    ) {
        let action = self.config.scroll_action;
        if !self.attached || !self.opened || action.is_none() {
            cx.scroll_locks.remove(self.key);
            self.scroll_roots = None;
            return;
        }
        if action == Some(ScrollAction::Lock) {
            self.saved_scroll = cx.host.document_scroll();
            cx.scroll_locks.push(self.key);
        } else {
            cx.scroll_locks.remove(self.key);
        }
        if self.scroll_roots.is_none() {
            let mut roots: SmallVec<[Option<K>; 4]> =
                cx.host.shadow_roots(self.key).into_iter().map(Some).collect();
            roots.push(None);
            self.scroll_roots = Some(roots);
        }
    }
}

/// Force layout on `key`, like reading and writing back a scroll offset.
fn reflow<K: Copy + Eq, H: OverlayHost<K> + ?Sized>(host: &mut H, key: K) {
    let offset = host.scroll_offset(key);
    host.set_scroll_offset(key, offset);
}
