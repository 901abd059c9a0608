// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host traits: what the overlay machinery needs from an element tree.

use alloc::vec::Vec;

use kurbo::Vec2;
use perch_fit::FitHost;
use perch_focus::TabCandidate;

/// Stacking access: read and write the z-index of an element.
///
/// This is all [`OverlayManager`](crate::OverlayManager) needs, so the manager
/// can be driven on its own with a very small host.
pub trait StackHost<K: Copy + Eq> {
    /// Resolved z-index of `key`: the inline value, else the computed one.
    ///
    /// `None` when neither is numeric (`auto`).
    fn z_index(&self, key: K) -> Option<i32>;

    /// Set (or clear, with `None`) the inline z-index of `key`.
    fn set_z_index(&mut self, key: K, z_index: Option<i32>);
}

/// Everything an overlay reaches through its host during its lifecycle.
///
/// Element handles behave as in [`FitHost`]: stale handles read as absent and
/// writes to them are ignored. "Active element" always means the deep active
/// element, following focus through shadow roots; `None` stands for the
/// document body.
pub trait OverlayHost<K: Copy + Eq>: FitHost<K> + StackHost<K> {
    /// Toggle `aria-hidden` on `key`.
    fn set_aria_hidden(&mut self, key: K, hidden: bool);

    /// The deep active element, `None` when focus rests on the body.
    fn active_element(&self) -> Option<K>;

    /// Move focus to `key`.
    fn focus(&mut self, key: K);

    /// Remove focus from `key` if it holds it; focus returns to the body.
    fn blur(&mut self, key: K);

    /// Whether `node` is `ancestor` or a composed descendant of it.
    fn contains(&self, ancestor: K, node: K) -> bool;

    /// First descendant of `root` carrying `autofocus`, in document order.
    fn autofocus_node(&self, root: K) -> Option<K>;

    /// Focus candidates of `root` and its composed descendants in document order.
    fn tab_candidates(&self, root: K) -> Vec<TabCandidate<K>>;

    /// The `tabindex` attribute of `key`.
    fn tab_index(&self, key: K) -> Option<i32>;

    /// Set or remove the `tabindex` attribute of `key`.
    fn set_tab_index(&mut self, key: K, tab_index: Option<i32>);

    /// Tell resize listeners below `key` that its layout changed.
    fn notify_resize(&mut self, key: K);

    /// Shadow roots on the composed path from `key` up to the document,
    /// nearest first.
    fn shadow_roots(&self, key: K) -> Vec<K>;

    /// Scroll offset of the document's scrolling element.
    fn document_scroll(&self) -> Vec2;

    /// Set the scroll offset of the document's scrolling element.
    fn set_document_scroll(&mut self, offset: Vec2);
}
