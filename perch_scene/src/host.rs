// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host trait implementations for [`Scene`].

use alloc::vec::Vec;

use kurbo::{Rect, Size, Vec2};
use perch_fit::FitHost;
use perch_fit::style::{ComputedStyle, InlineStyle};
use perch_focus::TabCandidate;
use perch_overlay::{OverlayHost, StackHost};

use crate::scene::Scene;
use crate::types::{ElementFlags, NodeId};

impl FitHost<NodeId> for Scene {
    fn viewport(&self) -> Size {
        self.viewport_size()
    }

    fn bounding_rect(&self, key: NodeId) -> Rect {
        self.layout_rect(key)
    }

    fn inline_style(&self, key: NodeId) -> Option<&InlineStyle> {
        self.get(key).map(|n| &n.inline)
    }

    fn inline_style_mut(&mut self, key: NodeId) -> Option<&mut InlineStyle> {
        self.get_mut(key).map(|n| &mut n.inline)
    }

    fn computed_style(&self, key: NodeId) -> ComputedStyle {
        self.resolved_style(key)
    }

    fn scroll_offset(&self, key: NodeId) -> Vec2 {
        self.get(key).map_or(Vec2::ZERO, |n| n.scroll)
    }

    fn set_scroll_offset(&mut self, key: NodeId, offset: Vec2) {
        if let Some(n) = self.get_mut(key) {
            n.scroll = offset;
        }
    }

    fn parent(&self, key: NodeId) -> Option<NodeId> {
        self.parent_of(key)
    }
}

impl StackHost<NodeId> for Scene {
    fn z_index(&self, key: NodeId) -> Option<i32> {
        self.get(key)?;
        self.resolved_style(key).z_index
    }

    fn set_z_index(&mut self, key: NodeId, z_index: Option<i32>) {
        if let Some(n) = self.get_mut(key) {
            n.inline.z_index = z_index;
        }
    }
}

impl OverlayHost<NodeId> for Scene {
    fn set_aria_hidden(&mut self, key: NodeId, hidden: bool) {
        if let Some(n) = self.get_mut(key) {
            n.aria_hidden = hidden;
        }
    }

    fn active_element(&self) -> Option<NodeId> {
        self.active.filter(|a| self.is_alive(*a))
    }

    /// Focus succeeds on rendered, enabled elements with a `tabindex`.
    fn focus(&mut self, key: NodeId) {
        let focusable = self.get(key).is_some_and(|n| {
            n.element.tab_index.is_some() && !n.element.flags.contains(ElementFlags::DISABLED)
        });
        if focusable && self.is_rendered(key) {
            self.active = Some(key);
        }
    }

    fn blur(&mut self, key: NodeId) {
        if self.active == Some(key) {
            self.active = None;
        }
    }

    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.contains_inclusive(ancestor, node)
    }

    fn autofocus_node(&self, root: NodeId) -> Option<NodeId> {
        self.subtree(root).into_iter().skip(1).find(|&id| {
            self.element(id)
                .is_some_and(|e| e.flags.contains(ElementFlags::AUTOFOCUS))
        })
    }

    fn tab_candidates(&self, root: NodeId) -> Vec<TabCandidate<NodeId>> {
        self.subtree(root)
            .into_iter()
            .filter_map(|id| {
                let element = self.element(id)?;
                Some(TabCandidate {
                    id,
                    tab_index: element.tab_index,
                    enabled: !element.flags.contains(ElementFlags::DISABLED),
                    visible: self.is_rendered(id),
                })
            })
            .collect()
    }

    fn tab_index(&self, key: NodeId) -> Option<i32> {
        self.element(key).and_then(|e| e.tab_index)
    }

    fn set_tab_index(&mut self, key: NodeId, tab_index: Option<i32>) {
        if let Some(e) = self.element_mut(key) {
            e.tab_index = tab_index;
        }
    }

    fn notify_resize(&mut self, key: NodeId) {
        if self.is_alive(key) {
            self.resize_notifications.push(key);
        }
    }

    fn shadow_roots(&self, key: NodeId) -> Vec<NodeId> {
        self.ancestors(key)
            .filter(|&a| {
                self.element(a)
                    .is_some_and(|e| e.flags.contains(ElementFlags::SHADOW_ROOT))
            })
            .collect()
    }

    fn document_scroll(&self) -> Vec2 {
        self.document_scroll
    }

    fn set_document_scroll(&mut self, offset: Vec2) {
        self.document_scroll = offset;
    }
}
