// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the scene: element identifiers, flags, and element data.

use kurbo::{Rect, Size, Vec2};
use perch_fit::style::{ComputedStyle, Display};

/// Identifier for an element in the scene (generational).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Element attributes the overlay machinery looks at.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ElementFlags: u8 {
        /// `disabled`: never focusable.
        const DISABLED         = 0b0000_0001;
        /// `autofocus`: preferred focus target when an ancestor overlay opens.
        const AUTOFOCUS        = 0b0000_0010;
        /// The element is a shadow root; its parent is the shadow host.
        const SHADOW_ROOT      = 0b0000_0100;
        /// The element establishes the containing block of fixed descendants
        /// (as a `transform` would).
        const CONTAINING_BLOCK = 0b0000_1000;
    }
}

/// Stylesheet-level description of an element.
///
/// Geometry is deliberately simple: an element sits at `offset` from its
/// parent's origin (scrolled by the parent's scroll offset) unless it is
/// `position: fixed` with `left`/`top`/`right`/`bottom` set. Its natural size
/// is the larger of `size` and the extent of its in-flow children.
#[derive(Clone, Debug, Default)]
pub struct Element {
    /// Static position relative to the parent's border box.
    pub offset: Vec2,
    /// Natural border-box size, before max/min constraints.
    pub size: Size,
    /// Stylesheet values; inline styles are layered on top.
    pub style: ComputedStyle,
    /// Stylesheet `display`.
    pub display: Display,
    /// The `tabindex` attribute.
    pub tab_index: Option<i32>,
    /// Attributes.
    pub flags: ElementFlags,
}

impl Element {
    /// An element occupying `rect` relative to its parent.
    pub fn boxed(rect: Rect) -> Self {
        Self {
            offset: rect.origin().to_vec2(),
            size: rect.size(),
            ..Self::default()
        }
    }

    /// A focusable element (`tabindex="0"`) occupying `rect`.
    pub fn focusable(rect: Rect) -> Self {
        Self {
            tab_index: Some(0),
            ..Self::boxed(rect)
        }
    }

    /// Replace the stylesheet values.
    pub fn with_style(mut self, style: ComputedStyle) -> Self {
        self.style = style;
        self
    }

    /// Add attributes.
    pub fn with_flags(mut self, flags: ElementFlags) -> Self {
        self.flags |= flags;
        self
    }
}
