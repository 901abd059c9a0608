// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene implementation: structure, styles, layout, and queries.

use alloc::vec::Vec;

use kurbo::{Point, Rect, Size, Vec2};
use perch_fit::style::{ComputedStyle, Direction, Display, InlineStyle, Position};

use crate::types::{Element, ElementFlags, NodeId};

#[derive(Clone, Debug)]
pub(crate) struct Node {
    generation: u32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    pub(crate) element: Element,
    pub(crate) inline: InlineStyle,
    pub(crate) scroll: Vec2,
    pub(crate) aria_hidden: bool,
}

impl Node {
    fn new(generation: u32, element: Element) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            element,
            inline: InlineStyle::default(),
            scroll: Vec2::ZERO,
            aria_hidden: false,
        }
    }
}

/// A retained element tree with just enough CSS layout for overlays.
///
/// Elements have generational [`NodeId`]s; handles of removed elements go
/// stale and every query on them reads as "no element".
#[derive(Clone, Debug)]
pub struct Scene {
    nodes: Vec<Option<Node>>,
    generations: Vec<u32>,
    free_list: Vec<usize>,
    roots: Vec<NodeId>,
    viewport: Size,
    pub(crate) document_scroll: Vec2,
    pub(crate) active: Option<NodeId>,
    pub(crate) resize_notifications: Vec<NodeId>,
}

impl Scene {
    /// Create an empty scene with a `viewport` of the given size.
    pub fn new(viewport: Size) -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            roots: Vec::new(),
            viewport,
            document_scroll: Vec2::ZERO,
            active: None,
            resize_notifications: Vec::new(),
        }
    }

    /// Resize the viewport.
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    /// Insert a new element as a child of `parent` (or as a root if `None`).
    pub fn insert(&mut self, parent: Option<NodeId>, element: Element) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, element));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, element)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        let id = NodeId::new(idx, generation);
        match parent {
            Some(p) if self.is_alive(p) => self.link_parent(id, p),
            _ => self.roots.push(id),
        }
        id
    }

    /// Remove an element and its subtree. Focus inside it returns to the body.
    pub fn remove(&mut self, id: NodeId) {
        if !self.is_alive(id) {
            return;
        }
        if self.active.is_some_and(|a| self.contains_inclusive(id, a)) {
            self.active = None;
        }
        match self.node(id).parent {
            Some(parent) => self.unlink_parent(id, parent),
            None => self.roots.retain(|r| *r != id),
        }
        let children = self.node(id).children.clone();
        for child in children {
            self.remove(child);
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    /// Move `id` under `new_parent` (or make it a root), appending it last.
    pub fn reparent(&mut self, id: NodeId, new_parent: Option<NodeId>) {
        if !self.is_alive(id) || new_parent.is_some_and(|p| self.contains_inclusive(id, p)) {
            return;
        }
        match self.node(id).parent {
            Some(parent) => self.unlink_parent(id, parent),
            None => self.roots.retain(|r| *r != id),
        }
        match new_parent {
            Some(p) if self.is_alive(p) => self.link_parent(id, p),
            _ => self.roots.push(id),
        }
    }

    /// Returns true if `id` refers to a live element.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .is_some_and(|n| n.generation == id.1)
    }

    /// Stylesheet data of a live element.
    pub fn element(&self, id: NodeId) -> Option<&Element> {
        self.get(id).map(|n| &n.element)
    }

    /// Mutable stylesheet data of a live element.
    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        self.get_mut(id).map(|n| &mut n.element)
    }

    /// Returns the parent of an element, or `None` for roots or stale ids.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Children of an element, or an empty slice if stale.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| &n.children)
    }

    /// Whether `aria-hidden` is set on `id`.
    pub fn is_aria_hidden(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(|n| n.aria_hidden)
    }

    /// Elements that received a resize notification since the last call.
    pub fn take_resize_notifications(&mut self) -> Vec<NodeId> {
        core::mem::take(&mut self.resize_notifications)
    }

    /// `id` followed by its descendants, depth first.
    pub fn subtree(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        if self.is_alive(id) {
            self.collect_subtree(id, &mut out);
        }
        out
    }

    /// Every live element in document order.
    pub fn document_order(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        for &root in &self.roots {
            self.collect_subtree(root, &mut out);
        }
        out
    }

    /// Whether `node` is `ancestor` or one of its descendants.
    pub fn contains_inclusive(&self, ancestor: NodeId, node: NodeId) -> bool {
        if !self.is_alive(ancestor) {
            return false;
        }
        let mut cur = Some(node);
        while let Some(n) = cur {
            if n == ancestor {
                return true;
            }
            cur = self.parent_of(n);
        }
        false
    }

    /// Composed path of `node`: the node, then its ancestors up to the root.
    pub fn composed_path(&self, node: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut cur = self.is_alive(node).then_some(node);
        while let Some(n) = cur {
            path.push(n);
            cur = self.parent_of(n);
        }
        path
    }

    /// Top-most rendered element under `point`.
    ///
    /// Elements stack by the z-index of their nearest ancestor-or-self with a
    /// numeric z-index (`0` when none), then by document order.
    pub fn hit_test(&self, point: Point) -> Option<NodeId> {
        let mut best: Option<(i32, usize, NodeId)> = None;
        for (order, id) in self.document_order().into_iter().enumerate() {
            if !self.is_rendered(id) || !self.layout_rect(id).contains(point) {
                continue;
            }
            let z = self.stacking_z(id);
            if best.is_none_or(|(bz, bo, _)| (z, order) > (bz, bo)) {
                best = Some((z, order, id));
            }
        }
        best.map(|(_, _, id)| id)
    }

    /// Whether `id` and all of its ancestors are displayed.
    pub fn is_rendered(&self, id: NodeId) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        let mut cur = Some(id);
        while let Some(n) = cur {
            if self.display(n) == Display::None {
                return false;
            }
            cur = self.parent_of(n);
        }
        true
    }

    // --- styles ---

    pub(crate) fn resolved_style(&self, id: NodeId) -> ComputedStyle {
        let Some(node) = self.get(id) else {
            return ComputedStyle::default();
        };
        let inline = &node.inline;
        let mut style = node.element.style.clone();
        style.position = inline.position.unwrap_or(style.position);
        style.top = inline.top.or(style.top);
        style.left = inline.left.or(style.left);
        style.right = inline.right.or(style.right);
        style.bottom = inline.bottom.or(style.bottom);
        style.max_width = inline.max_width.or(style.max_width);
        style.max_height = inline.max_height.or(style.max_height);
        style.z_index = inline.z_index.or(style.z_index);
        // `direction` inherits.
        if self.ancestors(id).any(|a| {
            self.get(a)
                .is_some_and(|n| n.element.style.direction == Direction::Rtl)
        }) {
            style.direction = Direction::Rtl;
        }
        style
    }

    fn display(&self, id: NodeId) -> Display {
        self.get(id)
            .map_or(Display::None, |n| n.inline.display.unwrap_or(n.element.display))
    }

    fn stacking_z(&self, id: NodeId) -> i32 {
        let mut cur = Some(id);
        while let Some(n) = cur {
            if let Some(z) = self.resolved_style(n).z_index {
                return z;
            }
            cur = self.parent_of(n);
        }
        0
    }

    // --- layout ---

    pub(crate) fn layout_rect(&self, id: NodeId) -> Rect {
        if !self.is_rendered(id) {
            return Rect::ZERO;
        }
        Rect::from_origin_size(self.origin_of(id), self.size_of(id))
    }

    pub(crate) fn viewport_size(&self) -> Size {
        self.viewport
    }

    fn size_of(&self, id: NodeId) -> Size {
        let Some(node) = self.get(id) else {
            return Size::ZERO;
        };
        let style = self.resolved_style(id);
        let content = self.content_size(id);
        let width = node.inline.width.unwrap_or(content.width);
        let width = width
            .min(style.max_width.unwrap_or(f64::INFINITY))
            .max(style.min_width);
        let height = content
            .height
            .min(style.max_height.unwrap_or(f64::INFINITY))
            .max(style.min_height);
        Size::new(width, height)
    }

    fn content_size(&self, id: NodeId) -> Size {
        let Some(node) = self.get(id) else {
            return Size::ZERO;
        };
        let mut size = node.element.size;
        for &child in &node.children {
            if self.display(child) == Display::None {
                continue;
            }
            let position = self.resolved_style(child).position;
            if matches!(position, Position::Fixed | Position::Absolute) {
                continue;
            }
            let Some(c) = self.get(child) else {
                continue;
            };
            let extent = self.size_of(child);
            size.width = size.width.max(c.element.offset.x + extent.width);
            size.height = size.height.max(c.element.offset.y + extent.height);
        }
        size
    }

    fn static_origin(&self, id: NodeId) -> Point {
        let Some(node) = self.get(id) else {
            return Point::ZERO;
        };
        match node.parent {
            Some(p) => {
                let scroll = self.get(p).map_or(Vec2::ZERO, |n| n.scroll);
                self.origin_of(p) + node.element.offset - scroll
            }
            None => Point::ZERO + node.element.offset - self.document_scroll,
        }
    }

    fn origin_of(&self, id: NodeId) -> Point {
        let style = self.resolved_style(id);
        let flow = self.static_origin(id);
        match style.position {
            Position::Fixed => {
                let cb = self.fixed_containing_block(id);
                let size = self.size_of(id);
                let m = style.margin;
                let x = match (style.left, style.right) {
                    (Some(left), _) => cb.x0 + left + m.x0,
                    (None, Some(right)) => cb.x1 - right - m.x1 - size.width,
                    (None, None) => flow.x,
                };
                let y = match (style.top, style.bottom) {
                    (Some(top), _) => cb.y0 + top + m.y0,
                    (None, Some(bottom)) => cb.y1 - bottom - m.y1 - size.height,
                    (None, None) => flow.y,
                };
                Point::new(x, y)
            }
            Position::Relative | Position::Absolute => {
                flow + Vec2::new(style.left.unwrap_or(0.0), style.top.unwrap_or(0.0))
            }
            Position::Static => flow,
        }
    }

    fn fixed_containing_block(&self, id: NodeId) -> Rect {
        self.ancestors(id)
            .skip(1)
            .find(|&a| {
                self.get(a)
                    .is_some_and(|n| n.element.flags.contains(ElementFlags::CONTAINING_BLOCK))
            })
            .map_or_else(
                || Rect::from_origin_size(Point::ZERO, self.viewport),
                |a| self.layout_rect(a),
            )
    }

    // --- internals ---

    /// `id` and its ancestors, nearest first.
    pub(crate) fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut cur = self.is_alive(id).then_some(id);
        core::iter::from_fn(move || {
            let n = cur?;
            cur = self.parent_of(n);
            Some(n)
        })
    }

    pub(crate) fn get(&self, id: NodeId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.1).then_some(n)
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn node(&self, id: NodeId) -> &Node {
        self.nodes[id.idx()].as_ref().expect("dangling NodeId")
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes[id.idx()].as_mut().expect("dangling NodeId")
    }

    fn collect_subtree(&self, id: NodeId, out: &mut Vec<NodeId>) {
        let Some(node) = self.get(id) else {
            return;
        };
        out.push(id);
        for &child in &node.children {
            self.collect_subtree(child, out);
        }
    }

    fn link_parent(&mut self, id: NodeId, parent: NodeId) {
        self.node_mut(parent).children.push(id);
        self.node_mut(id).parent = Some(parent);
    }

    fn unlink_parent(&mut self, id: NodeId, parent: NodeId) {
        self.node_mut(parent).children.retain(|c| *c != id);
        self.node_mut(id).parent = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use kurbo::Insets;

    fn scene() -> Scene {
        Scene::new(Size::new(800.0, 600.0))
    }

    #[test]
    fn liveness_insert_remove_reuse() {
        let mut s = scene();
        let a = s.insert(None, Element::boxed(Rect::new(0.0, 0.0, 10.0, 10.0)));
        let b = s.insert(Some(a), Element::default());
        assert!(s.is_alive(a) && s.is_alive(b));
        s.remove(a);
        assert!(!s.is_alive(a));
        assert!(!s.is_alive(b), "subtree goes with its root");
        let c = s.insert(None, Element::default());
        assert!(s.is_alive(c));
        assert!(!s.is_alive(a) && !s.is_alive(b), "stale ids stay stale after slot reuse");
        assert_eq!(s.parent_of(a), None);
        assert!(s.children_of(a).is_empty());
    }

    #[test]
    fn static_layout_follows_parents_and_scroll() {
        let mut s = scene();
        let page = s.insert(None, Element::boxed(Rect::new(10.0, 20.0, 410.0, 320.0)));
        let child = s.insert(Some(page), Element::boxed(Rect::new(5.0, 5.0, 55.0, 25.0)));
        assert_eq!(s.layout_rect(child), Rect::new(15.0, 25.0, 65.0, 45.0));

        s.get_mut(page).unwrap().scroll = Vec2::new(0.0, 5.0);
        assert_eq!(s.layout_rect(child), Rect::new(15.0, 20.0, 65.0, 40.0));

        s.document_scroll = Vec2::new(0.0, 10.0);
        assert_eq!(s.layout_rect(page).origin(), Point::new(10.0, 10.0));
    }

    #[test]
    fn natural_size_grows_with_in_flow_children() {
        let mut s = scene();
        let outer = s.insert(None, Element::default());
        let inner = s.insert(Some(outer), Element::boxed(Rect::new(0.0, 0.0, 120.0, 900.0)));
        assert_eq!(s.size_of(outer), Size::new(120.0, 900.0));

        s.get_mut(inner).unwrap().inline.max_height = Some(300.0);
        assert_eq!(s.size_of(outer), Size::new(120.0, 300.0));

        s.get_mut(inner).unwrap().inline.position = Some(Position::Fixed);
        assert_eq!(s.size_of(outer), Size::ZERO);
    }

    #[test]
    fn fixed_uses_viewport_or_containing_block() {
        let mut s = scene();
        let style = ComputedStyle {
            position: Position::Fixed,
            left: Some(30.0),
            bottom: Some(10.0),
            margin: Insets::new(2.0, 0.0, 0.0, 4.0),
            ..ComputedStyle::default()
        };
        let el = s.insert(
            None,
            Element::boxed(Rect::new(0.0, 0.0, 100.0, 50.0)).with_style(style.clone()),
        );
        assert_eq!(s.layout_rect(el), Rect::new(32.0, 536.0, 132.0, 586.0));

        let frame = s.insert(
            None,
            Element::boxed(Rect::new(100.0, 100.0, 300.0, 300.0))
                .with_flags(ElementFlags::CONTAINING_BLOCK),
        );
        let inner = s.insert(
            Some(frame),
            Element::boxed(Rect::new(0.0, 0.0, 100.0, 50.0)).with_style(style),
        );
        assert_eq!(s.layout_rect(inner), Rect::new(132.0, 236.0, 232.0, 286.0));
    }

    #[test]
    fn display_none_has_no_box() {
        let mut s = scene();
        let a = s.insert(None, Element::boxed(Rect::new(0.0, 0.0, 10.0, 10.0)));
        let b = s.insert(Some(a), Element::boxed(Rect::new(0.0, 0.0, 5.0, 5.0)));
        s.get_mut(a).unwrap().inline.display = Some(Display::None);
        assert_eq!(s.layout_rect(b), Rect::ZERO);
        assert!(!s.is_rendered(b));
    }

    #[test]
    fn hit_test_prefers_stacking_then_document_order() {
        let mut s = scene();
        let page = s.insert(None, Element::boxed(Rect::new(0.0, 0.0, 800.0, 600.0)));
        let low = s.insert(Some(page), Element::boxed(Rect::new(0.0, 0.0, 100.0, 100.0)));
        let high = s.insert(None, Element::boxed(Rect::new(50.0, 50.0, 150.0, 150.0)));
        let inside = s.insert(Some(high), Element::boxed(Rect::new(0.0, 0.0, 10.0, 10.0)));
        s.get_mut(high).unwrap().inline.z_index = Some(5);

        assert_eq!(s.hit_test(Point::new(20.0, 20.0)), Some(low));
        assert_eq!(s.hit_test(Point::new(70.0, 70.0)), Some(high));
        assert_eq!(s.hit_test(Point::new(55.0, 55.0)), Some(inside));
        assert_eq!(s.composed_path(inside), vec![inside, high]);
        assert_eq!(s.hit_test(Point::new(900.0, 900.0)), None);
    }

    #[test]
    fn direction_inherits() {
        let mut s = scene();
        let rtl = ComputedStyle {
            direction: Direction::Rtl,
            ..ComputedStyle::default()
        };
        let root = s.insert(None, Element::default().with_style(rtl));
        let leaf = s.insert(Some(root), Element::default());
        assert_eq!(s.resolved_style(leaf).direction, Direction::Rtl);
    }
}
