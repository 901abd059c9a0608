// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The element-tree surface the fit engine reads and mutates.

use kurbo::{Rect, Size, Vec2};

use crate::style::{ComputedStyle, InlineStyle};

/// Access to a retained element tree with CSS-like layout.
///
/// `K` is a small copyable element handle. Methods taking a stale handle should
/// behave as if the element had no box: zero rects, default styles, and no-op
/// writes.
pub trait FitHost<K: Copy + Eq> {
    /// Size of the viewport (`innerWidth` × `innerHeight`).
    fn viewport(&self) -> Size;

    /// Border-box rect of `key` in viewport coordinates, reflecting every
    /// style mutation made so far.
    fn bounding_rect(&self, key: K) -> Rect;

    /// Inline style declarations of `key`.
    fn inline_style(&self, key: K) -> Option<&InlineStyle>;

    /// Mutable inline style declarations of `key`.
    fn inline_style_mut(&mut self, key: K) -> Option<&mut InlineStyle>;

    /// Resolved style of `key`.
    fn computed_style(&self, key: K) -> ComputedStyle;

    /// Scroll offset (`scrollLeft`, `scrollTop`) of `key`.
    fn scroll_offset(&self, key: K) -> Vec2;

    /// Set the scroll offset of `key`.
    fn set_scroll_offset(&mut self, key: K, offset: Vec2);

    /// Composed parent of `key`; the parent of a shadow root is its host.
    fn parent(&self, key: K) -> Option<K>;
}
