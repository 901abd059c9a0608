// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Perch Focus: tabbable ordering and linear focus traversal.
//!
//! This crate answers two questions an overlay asks when it traps keyboard focus:
//! - **Which descendants are reachable with Tab, and in what order?** Build a
//!   [`TabOrder`] from [`TabCandidate`]s listed in document order.
//! - **Where does Tab/Shift+Tab go next?** Ask [`TabOrder::next`] with a
//!   [`Navigation`] intent and a [`WrapMode`].
//!
//! A focus trap only needs the boundaries: when focus would leave the trapped
//! subtree, it moves to [`TabOrder::first`] or [`TabOrder::last`] and the
//! platform's own Tab handling does the rest. Linear traversal is for hosts
//! that move focus themselves, such as a headless scene that simulates Tab
//! presses, or a toolkit without native keyboard navigation.
//!
//! ## Ordering rules
//!
//! A candidate is tabbable when it is enabled, visible, and has a non-negative
//! tab index. Tabbable candidates with a positive tab index come first, sorted
//! ascending (ties keep document order), followed by every zero-index candidate
//! in document order. Negative tab indices are focusable by script but never
//! reachable with Tab.
//!
//! ## Minimal example
//!
//! ```rust
//! use perch_focus::{Navigation, TabCandidate, TabOrder, WrapMode};
//!
//! let order = TabOrder::from_document_order([
//!     TabCandidate::new(1_u32, Some(0)),
//!     TabCandidate::new(2_u32, Some(2)),
//!     TabCandidate::new(3_u32, Some(-1)),
//!     TabCandidate::new(4_u32, Some(1)),
//! ]);
//!
//! // Positive indices first, then document order; `-1` is skipped.
//! assert_eq!(order.as_slice(), &[4, 2, 1]);
//! assert_eq!(order.next(1, Navigation::Next, WrapMode::Scope), Some(4));
//! assert_eq!(order.next(1, Navigation::Next, WrapMode::Never), None);
//! ```
//!
//! The types are generic over the node identifier `K`, so callers can use any
//! small, copyable handle (for example `perch_scene::NodeId`).
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

/// Direction of linear focus navigation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Navigation {
    /// Move forward in tab order (Tab).
    Next,
    /// Move backward in tab order (Shift+Tab).
    Prev,
}

impl Navigation {
    /// Navigation intent for a Tab key press.
    pub fn from_shift(shift: bool) -> Self {
        if shift { Self::Prev } else { Self::Next }
    }
}

/// Wrap behavior when traversal reaches either end of a [`TabOrder`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum WrapMode {
    /// Reaching the end yields no next candidate.
    Never,
    /// Wrap around within the order (focus trap).
    #[default]
    Scope,
}

/// A focusable candidate, reported by the host in document order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TabCandidate<K> {
    /// Identifier of the node.
    pub id: K,
    /// Effective tab index, or `None` when the node is not focusable at all.
    pub tab_index: Option<i32>,
    /// Whether the node is enabled (for example, not `disabled`).
    pub enabled: bool,
    /// Whether the node is rendered (not `display: none` / `visibility: hidden`).
    pub visible: bool,
}

impl<K> TabCandidate<K> {
    /// An enabled, visible candidate with the given tab index.
    pub fn new(id: K, tab_index: Option<i32>) -> Self {
        Self {
            id,
            tab_index,
            enabled: true,
            visible: true,
        }
    }

    /// Returns `true` if the candidate can be reached with Tab.
    pub fn is_tabbable(&self) -> bool {
        self.enabled && self.visible && self.tab_index.is_some_and(|t| t >= 0)
    }
}

/// Tabbable nodes in the order Tab visits them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TabOrder<K> {
    nodes: Vec<K>,
}

impl<K: Copy + Eq> TabOrder<K> {
    /// Build the tab order from candidates listed in document order.
    pub fn from_document_order(candidates: impl IntoIterator<Item = TabCandidate<K>>) -> Self {
        let mut ranked: Vec<(i32, K)> = candidates
            .into_iter()
            .filter(TabCandidate::is_tabbable)
            .filter_map(|c| c.tab_index.map(|t| (t, c.id)))
            .collect();
        // Stable: equal keys keep document order.
        ranked.sort_by_key(|&(t, _)| (t == 0, t));
        Self {
            nodes: ranked.into_iter().map(|(_, id)| id).collect(),
        }
    }

    /// First node in tab order.
    pub fn first(&self) -> Option<K> {
        self.nodes.first().copied()
    }

    /// Last node in tab order.
    pub fn last(&self) -> Option<K> {
        self.nodes.last().copied()
    }

    /// Number of tabbable nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if nothing is tabbable.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The ordered nodes.
    pub fn as_slice(&self) -> &[K] {
        &self.nodes
    }

    /// Consume the order and return the ordered nodes.
    pub fn into_vec(self) -> Vec<K> {
        self.nodes
    }

    /// Compute the node that receives focus when navigating from `origin`.
    ///
    /// An origin that is not part of the order (for example the overlay container
    /// itself) enters at the first node for [`Navigation::Next`] and at the last
    /// node for [`Navigation::Prev`].
    pub fn next(&self, origin: K, direction: Navigation, wrap: WrapMode) -> Option<K> {
        let nodes = &self.nodes;
        if nodes.is_empty() {
            return None;
        }
        let origin_pos = nodes.iter().position(|&id| id == origin);
        match direction {
            Navigation::Next => match origin_pos {
                Some(pos) if pos + 1 < nodes.len() => Some(nodes[pos + 1]),
                Some(_) if wrap == WrapMode::Scope => Some(nodes[0]),
                Some(_) => None,
                None => Some(nodes[0]),
            },
            Navigation::Prev => match origin_pos {
                Some(pos) if pos > 0 => Some(nodes[pos - 1]),
                Some(_) if wrap == WrapMode::Scope => Some(nodes[nodes.len() - 1]),
                Some(_) => None,
                None => Some(nodes[nodes.len() - 1]),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn positive_indices_precede_document_order() {
        let order = TabOrder::from_document_order(vec![
            TabCandidate::new(1_u32, Some(0)),
            TabCandidate::new(2_u32, Some(3)),
            TabCandidate::new(3_u32, Some(0)),
            TabCandidate::new(4_u32, Some(1)),
            TabCandidate::new(5_u32, Some(3)),
        ]);
        assert_eq!(order.as_slice(), &[4, 2, 5, 1, 3]);
    }

    #[test]
    fn skips_negative_disabled_hidden_and_unfocusable() {
        let order = TabOrder::from_document_order(vec![
            TabCandidate::new(1_u32, None),
            TabCandidate::new(2_u32, Some(-1)),
            TabCandidate {
                enabled: false,
                ..TabCandidate::new(3_u32, Some(0))
            },
            TabCandidate {
                visible: false,
                ..TabCandidate::new(4_u32, Some(0))
            },
            TabCandidate::new(5_u32, Some(0)),
        ]);
        assert_eq!(order.as_slice(), &[5]);
        assert_eq!(order.first(), order.last());
    }

    #[test]
    fn linear_next_prev_with_wrap() {
        let order = TabOrder::from_document_order(vec![
            TabCandidate::new(1_u32, Some(0)),
            TabCandidate::new(2_u32, Some(0)),
        ]);
        assert_eq!(order.next(1, Navigation::Next, WrapMode::Scope), Some(2));
        assert_eq!(order.next(2, Navigation::Next, WrapMode::Scope), Some(1));
        assert_eq!(order.next(1, Navigation::Prev, WrapMode::Scope), Some(2));
    }

    #[test]
    fn no_wrap_stops_at_edges() {
        let order = TabOrder::from_document_order(vec![
            TabCandidate::new(1_u32, Some(0)),
            TabCandidate::new(2_u32, Some(0)),
        ]);
        assert_eq!(order.next(2, Navigation::Next, WrapMode::Never), None);
        assert_eq!(order.next(1, Navigation::Prev, WrapMode::Never), None);
    }

    #[test]
    fn unknown_origin_enters_at_the_ends() {
        let order = TabOrder::from_document_order(vec![
            TabCandidate::new(1_u32, Some(0)),
            TabCandidate::new(2_u32, Some(0)),
            TabCandidate::new(3_u32, Some(0)),
        ]);
        assert_eq!(order.next(99, Navigation::Next, WrapMode::Never), Some(1));
        assert_eq!(order.next(99, Navigation::Prev, WrapMode::Never), Some(3));
    }

    #[test]
    fn single_entry_wraps_to_itself() {
        let order = TabOrder::from_document_order(vec![TabCandidate::new(7_u32, Some(0))]);
        assert_eq!(order.next(7, Navigation::Next, WrapMode::Scope), Some(7));
        assert_eq!(order.next(7, Navigation::Prev, WrapMode::Scope), Some(7));
    }

    #[test]
    fn empty_order_has_no_next() {
        let order: TabOrder<u32> = TabOrder::from_document_order(vec![]);
        assert!(order.is_empty());
        assert_eq!(order.next(1, Navigation::Next, WrapMode::Scope), None);
        assert_eq!(Navigation::from_shift(true), Navigation::Prev);
    }
}
