// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The fit engine: position, constrain, and center one element.

use kurbo::{Insets, Rect, Size, Vec2};

use crate::geometry::{PlacementRequest, normalized_rect};
use crate::host::FitHost;
use crate::options::{FitOptions, HorizontalAlign};
use crate::style::{BoxSizing, Direction, InlineStyle, Position};

/// Edge a vertically positioned element is anchored to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum VerticalEdge {
    /// `top` is set.
    Top,
    /// `bottom` is set (and `top` is `auto`).
    Bottom,
}

/// Edge a horizontally positioned element is anchored to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HorizontalEdge {
    /// `left` is set.
    Left,
    /// `right` is set (and `left` is `auto`).
    Right,
}

/// Axes the consumer already positioned through CSS.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PositionedBy {
    /// Vertical anchor, if any.
    pub vertically: Option<VerticalEdge>,
    /// Horizontal anchor, if any.
    pub horizontally: Option<HorizontalEdge>,
}

/// Size constraints the consumer already declared on the sizing target.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SizedBy {
    /// `max-width` is set.
    pub width: bool,
    /// `max-height` is set.
    pub height: bool,
    /// `min-width`, `0` when unset.
    pub min_width: f64,
    /// `min-height`, `0` when unset.
    pub min_height: f64,
}

/// Inline declarations of the fitted element that fitting overwrites.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ElementSnapshot {
    /// `top`.
    pub top: Option<f64>,
    /// `left`.
    pub left: Option<f64>,
    /// `position`.
    pub position: Option<Position>,
    /// `width`.
    pub width: Option<f64>,
}

/// Inline declarations of the sizing target that fitting overwrites.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SizerSnapshot {
    /// `max-width`.
    pub max_width: Option<f64>,
    /// `max-height`.
    pub max_height: Option<f64>,
    /// `box-sizing`.
    pub box_sizing: Option<BoxSizing>,
}

/// Layout facts captured on the first fit and reused until [`Fit::reset_fit`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FitInfo {
    /// Pre-fit inline style of the element.
    pub inline: ElementSnapshot,
    /// Pre-fit inline style of the sizing target.
    pub sizer_inline: SizerSnapshot,
    /// Axes already positioned by CSS.
    pub positioned_by: PositionedBy,
    /// Constraints already present on the sizing target.
    pub sized_by: SizedBy,
    /// Margins of the element.
    pub margin: Insets,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Axis {
    Horizontal,
    Vertical,
}

/// Fit capability for one element.
///
/// `Fit` holds the configuration and the memoized [`FitInfo`]; the element
/// tree itself is reached through a [`FitHost`] passed to every operation.
///
/// ## Example
///
/// A host over two fixed boxes, a button and its dropdown. `perch_scene`
/// provides a complete host with layout.
///
/// ```rust
/// use kurbo::{Point, Rect, Size, Vec2};
/// use perch_fit::style::{ComputedStyle, InlineStyle};
/// use perch_fit::{Fit, FitHost, HorizontalAlign, VerticalAlign};
///
/// struct Page {
///     boxes: [(Rect, InlineStyle); 2],
/// }
///
/// impl FitHost<usize> for Page {
///     fn viewport(&self) -> Size {
///         Size::new(400.0, 300.0)
///     }
///
///     fn bounding_rect(&self, key: usize) -> Rect {
///         let (rect, style) = &self.boxes[key];
///         let origin = Point::new(style.left.unwrap_or(rect.x0), style.top.unwrap_or(rect.y0));
///         let size = Size::new(
///             rect.width().min(style.max_width.unwrap_or(f64::INFINITY)),
///             rect.height().min(style.max_height.unwrap_or(f64::INFINITY)),
///         );
///         Rect::from_origin_size(origin, size)
///     }
///
///     fn inline_style(&self, key: usize) -> Option<&InlineStyle> {
///         self.boxes.get(key).map(|(_, style)| style)
///     }
///
///     fn inline_style_mut(&mut self, key: usize) -> Option<&mut InlineStyle> {
///         self.boxes.get_mut(key).map(|(_, style)| style)
///     }
///
///     fn computed_style(&self, key: usize) -> ComputedStyle {
///         let style = &self.boxes[key].1;
///         ComputedStyle {
///             position: style.position.unwrap_or_default(),
///             top: style.top,
///             left: style.left,
///             max_width: style.max_width,
///             max_height: style.max_height,
///             ..ComputedStyle::default()
///         }
///     }
///
///     fn scroll_offset(&self, _: usize) -> Vec2 {
///         Vec2::ZERO
///     }
///
///     fn set_scroll_offset(&mut self, _: usize, _: Vec2) {}
///
///     fn parent(&self, _: usize) -> Option<usize> {
///         None
///     }
/// }
///
/// let (button, dropdown) = (0, 1);
/// let mut host = Page {
///     boxes: [
///         (Rect::new(40.0, 60.0, 120.0, 80.0), InlineStyle::default()),
///         (Rect::new(0.0, 0.0, 100.0, 50.0), InlineStyle::default()),
///     ],
/// };
///
/// let mut fit = Fit::new(dropdown);
/// fit.options_mut().position_target = Some(button);
/// fit.options_mut().vertical_align = Some(VerticalAlign::Top);
/// fit.options_mut().horizontal_align = Some(HorizontalAlign::Left);
/// fit.connect(&host);
/// fit.fit(&mut host);
///
/// assert_eq!(host.bounding_rect(dropdown).origin(), Point::new(40.0, 60.0));
/// ```
#[derive(Clone, Debug)]
pub struct Fit<K> {
    element: K,
    options: FitOptions<K>,
    info: Option<FitInfo>,
    rtl: bool,
}

impl<K: Copy + Eq> Fit<K> {
    /// Attach the fit capability to `element` with default options.
    pub fn new(element: K) -> Self {
        Self::with_options(element, FitOptions::default())
    }

    /// Attach the fit capability to `element`.
    pub fn with_options(element: K, options: FitOptions<K>) -> Self {
        Self {
            element,
            options,
            info: None,
            rtl: false,
        }
    }

    /// The fitted element.
    pub fn element(&self) -> K {
        self.element
    }

    /// Current configuration.
    pub fn options(&self) -> &FitOptions<K> {
        &self.options
    }

    /// Mutable configuration; takes effect on the next fit.
    pub fn options_mut(&mut self) -> &mut FitOptions<K> {
        &mut self.options
    }

    /// Memoized layout facts, `None` before the first fit or after a reset.
    pub fn info(&self) -> Option<&FitInfo> {
        self.info.as_ref()
    }

    /// Whether the element was right-to-left when last connected.
    pub fn is_rtl(&self) -> bool {
        self.rtl
    }

    /// Detect text direction; call when the element is connected.
    pub fn connect<H: FitHost<K> + ?Sized>(&mut self, host: &H) {
        self.rtl = host.computed_style(self.element).direction == Direction::Rtl;
    }

    /// Element whose max size is constrained.
    pub fn sizing_target(&self) -> K {
        self.options.sizing_target.unwrap_or(self.element)
    }

    /// Alignment anchor: the configured target or the composed parent.
    pub fn position_target<H: FitHost<K> + ?Sized>(&self, host: &H) -> Option<K> {
        self.options
            .position_target
            .or_else(|| host.parent(self.element))
    }

    /// Horizontal alignment with `left`/`right` swapped for RTL.
    pub fn locale_horizontal_align(&self) -> Option<HorizontalAlign> {
        self.options
            .horizontal_align
            .map(|a| a.for_direction(self.rtl))
    }

    /// Positioning applies when an axis is aligned and a position target exists.
    pub fn should_position<H: FitHost<K> + ?Sized>(&self, host: &H) -> bool {
        (self.options.horizontal_align.is_some() || self.options.vertical_align.is_some())
            && self.position_target(host).is_some()
    }

    /// Position, then constrain, then center.
    pub fn fit<H: FitHost<K> + ?Sized>(&mut self, host: &mut H) {
        self.position(host);
        self.constrain(host);
        self.center(host);
    }

    /// Capture pre-fit styles and CSS constraints. No-op once captured.
    pub fn discover_info<H: FitHost<K> + ?Sized>(&mut self, host: &H) {
        if self.info.is_some() {
            return;
        }
        let sizer = self.sizing_target();
        let target = host.computed_style(self.element);
        let sizer_style = host.computed_style(sizer);
        let inline = host
            .inline_style(self.element)
            .cloned()
            .unwrap_or_default();
        let sizer_inline = host.inline_style(sizer).cloned().unwrap_or_default();

        let vertically = if target.top.is_some() {
            Some(VerticalEdge::Top)
        } else if target.bottom.is_some() {
            Some(VerticalEdge::Bottom)
        } else {
            None
        };
        let horizontally = if target.left.is_some() {
            Some(HorizontalEdge::Left)
        } else if target.right.is_some() {
            Some(HorizontalEdge::Right)
        } else {
            None
        };

        self.info = Some(FitInfo {
            inline: ElementSnapshot {
                top: inline.top,
                left: inline.left,
                position: inline.position,
                width: inline.width,
            },
            sizer_inline: SizerSnapshot {
                max_width: sizer_inline.max_width,
                max_height: sizer_inline.max_height,
                box_sizing: sizer_inline.box_sizing,
            },
            positioned_by: PositionedBy {
                vertically,
                horizontally,
            },
            sized_by: SizedBy {
                width: sizer_style.max_width.is_some(),
                height: sizer_style.max_height.is_some(),
                min_width: sizer_style.min_width,
                min_height: sizer_style.min_height,
            },
            margin: target.margin,
        });
    }

    /// Place the element against its position target.
    ///
    /// Runs only when [`Fit::should_position`] holds.
    pub fn position<H: FitHost<K> + ?Sized>(&mut self, host: &mut H) {
        if !self.should_position(host) {
            return;
        }
        let Some(position_target) = self.position_target(host) else {
            return;
        };
        self.discover_info(host);
        let Some(info) = self.info else {
            return;
        };
        let element = self.element;
        let sizer = self.sizing_target();

        edit(host, element, |s| s.position = Some(Position::Fixed));
        edit(host, sizer, |s| s.box_sizing = Some(BoxSizing::BorderBox));
        // Any offset left at `0, 0` comes from a containing block (a transformed
        // ancestor) and is removed at the end.
        edit(host, element, |s| {
            s.left = Some(0.0);
            s.top = Some(0.0);
        });

        let rect = host.bounding_rect(element);
        let position_rect = host.bounding_rect(position_target);
        let fit_rect = normalized_rect(host, self.options.fit_into);
        let margin = info.margin;
        let size = Size::new(
            rect.width() + margin.x0 + margin.x1,
            rect.height() + margin.y0 + margin.y1,
        );

        let request = PlacementRequest {
            horizontal: self.locale_horizontal_align(),
            vertical: self.options.vertical_align,
            offset: Vec2::new(self.options.horizontal_offset, self.options.vertical_offset),
            size,
            size_no_margins: rect.size(),
            target: position_rect,
            fit_rect,
            dynamic_align: self.options.dynamic_align,
            no_overlap: self.options.no_overlap,
        };
        let Some(choice) = request.best() else {
            return;
        };
        tracing::trace!(
            vertical = ?choice.vertical,
            horizontal = ?choice.horizontal,
            offscreen_area = choice.offscreen_area,
            "fit: picked placement"
        );

        let min = info.sized_by;
        let mut left = choice.origin.x + margin.x0;
        let mut top = choice.origin.y + margin.y0;
        let right = (fit_rect.x1 - margin.x1).min(left + rect.width());
        let bottom = (fit_rect.y1 - margin.y1).min(top + rect.height());
        left = (fit_rect.x0 + margin.x0).max(left.min(right - min.min_width));
        top = (fit_rect.y0 + margin.y0).max(top.min(bottom - min.min_height));

        let mut max_width = (right - left).max(min.min_width);
        let max_height = (bottom - top).max(min.min_height);
        if self.options.fit_position_target {
            max_width = max_width.max(position_rect.width());
        }
        let fit_width = self.options.fit_position_target;

        edit(host, sizer, |s| {
            s.max_width = Some(max_width);
            s.max_height = Some(max_height);
        });
        edit(host, element, |s| {
            if fit_width {
                s.width = Some(max_width);
            }
            s.left = Some(left - rect.x0);
            s.top = Some(top - rect.y0);
        });
    }

    /// Limit the sizing target so the element stays inside the fit region.
    ///
    /// Runs only when positioning does not apply.
    pub fn constrain<H: FitHost<K> + ?Sized>(&mut self, host: &mut H) {
        if self.should_position(host) {
            return;
        }
        self.discover_info(host);
        let Some(info) = self.info else {
            return;
        };
        let element = self.element;
        let by = info.positioned_by;

        if by.vertically.is_none() {
            edit(host, element, |s| {
                s.position = Some(Position::Fixed);
                s.top = Some(0.0);
            });
        }
        if by.horizontally.is_none() {
            edit(host, element, |s| {
                s.position = Some(Position::Fixed);
                s.left = Some(0.0);
            });
        }
        edit(host, self.sizing_target(), |s| {
            s.box_sizing = Some(BoxSizing::BorderBox);
        });

        let rect = host.bounding_rect(element);
        if !info.sized_by.height {
            let anchor = by.vertically.map(|edge| edge == VerticalEdge::Bottom);
            self.size_dimension(host, rect, anchor, Axis::Vertical, info.margin);
        }
        if !info.sized_by.width {
            let anchor = by.horizontally.map(|edge| edge == HorizontalEdge::Right);
            self.size_dimension(host, rect, anchor, Axis::Horizontal, info.margin);
        }
    }

    /// `anchor` is `None` on an axis the consumer left unpositioned, else
    /// whether the element is anchored at the trailing edge.
    fn size_dimension<H: FitHost<K> + ?Sized>(
        &self,
        host: &mut H,
        rect: Rect,
        anchor: Option<bool>,
        axis: Axis,
        margin: Insets,
    ) {
        let fit_rect = normalized_rect(host, self.options.fit_into);
        let sizer = self.sizing_target();
        let sizer_rect = host.bounding_rect(sizer);
        // Unpositioned axes are centered into the fit region afterwards, so
        // the whole extent less both margins is available. Trailing anchors
        // measure the free space from the leading edge of the fit region.
        let flip = anchor == Some(true);
        let (max, offset, margin, sizing_offset) = match axis {
            Axis::Vertical => (
                fit_rect.height(),
                match anchor {
                    None => margin.y0,
                    Some(true) => fit_rect.y1 - rect.y1,
                    Some(false) => rect.y0 - fit_rect.y0,
                },
                if flip { margin.y0 } else { margin.y1 },
                rect.height() - sizer_rect.height(),
            ),
            Axis::Horizontal => (
                fit_rect.width(),
                match anchor {
                    None => margin.x0,
                    Some(true) => fit_rect.x1 - rect.x1,
                    Some(false) => rect.x0 - fit_rect.x0,
                },
                if flip { margin.x0 } else { margin.x1 },
                rect.width() - sizer_rect.width(),
            ),
        };
        let limit = max - margin - offset - sizing_offset;
        edit(host, sizer, |s| match axis {
            Axis::Vertical => s.max_height = Some(limit),
            Axis::Horizontal => s.max_width = Some(limit),
        });
    }

    /// Center the element in the fit region along each unpositioned axis.
    ///
    /// Runs only when positioning does not apply.
    pub fn center<H: FitHost<K> + ?Sized>(&mut self, host: &mut H) {
        if self.should_position(host) {
            return;
        }
        self.discover_info(host);
        let Some(info) = self.info else {
            return;
        };
        let by = info.positioned_by;
        if by.vertically.is_some() && by.horizontally.is_some() {
            return;
        }
        let element = self.element;
        edit(host, element, |s| {
            s.position = Some(Position::Fixed);
            if by.vertically.is_none() {
                s.top = Some(0.0);
            }
            if by.horizontally.is_none() {
                s.left = Some(0.0);
            }
        });

        let rect = host.bounding_rect(element);
        let fit_rect = normalized_rect(host, self.options.fit_into);
        edit(host, element, |s| {
            if by.vertically.is_none() {
                s.top = Some(fit_rect.y0 - rect.y0 + (fit_rect.height() - rect.height()) / 2.0);
            }
            if by.horizontally.is_none() {
                s.left = Some(fit_rect.x0 - rect.x0 + (fit_rect.width() - rect.width()) / 2.0);
            }
        });
    }

    /// Restore the pre-fit inline styles and forget [`FitInfo`].
    ///
    /// No-op if nothing has been fitted since the last reset.
    pub fn reset_fit<H: FitHost<K> + ?Sized>(&mut self, host: &mut H) {
        let Some(info) = self.info.take() else {
            return;
        };
        edit(host, self.sizing_target(), |s| {
            s.max_width = info.sizer_inline.max_width;
            s.max_height = info.sizer_inline.max_height;
            s.box_sizing = info.sizer_inline.box_sizing;
        });
        edit(host, self.element, |s| {
            s.top = info.inline.top;
            s.left = info.inline.left;
            s.position = info.inline.position;
            s.width = info.inline.width;
        });
    }

    /// Reset and fit again, keeping the sizing target's scroll offset.
    pub fn refit<H: FitHost<K> + ?Sized>(&mut self, host: &mut H) {
        let sizer = self.sizing_target();
        let scroll = host.scroll_offset(sizer);
        self.reset_fit(host);
        self.fit(host);
        host.set_scroll_offset(sizer, scroll);
    }
}

fn edit<K: Copy + Eq, H: FitHost<K> + ?Sized>(
    host: &mut H,
    key: K,
    f: impl FnOnce(&mut InlineStyle),
) {
    if let Some(style) = host.inline_style_mut(key) {
        f(style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{FitInto, VerticalAlign};
    use crate::style::ComputedStyle;
    use alloc::vec::Vec;
    use kurbo::Point;

    /// Fixed-position-only layout: enough to exercise the engine without a scene.
    struct Boxes {
        viewport: Size,
        nodes: Vec<Node>,
    }

    struct Node {
        parent: Option<usize>,
        natural: Size,
        sheet: ComputedStyle,
        inline: InlineStyle,
        home: Point,
        scroll: Vec2,
    }

    impl Boxes {
        fn new(viewport: Size) -> Self {
            Self {
                viewport,
                nodes: Vec::new(),
            }
        }

        fn add(&mut self, parent: Option<usize>, home: Point, natural: Size) -> usize {
            self.nodes.push(Node {
                parent,
                natural,
                sheet: ComputedStyle::default(),
                inline: InlineStyle::default(),
                home,
                scroll: Vec2::ZERO,
            });
            self.nodes.len() - 1
        }
    }

    impl FitHost<usize> for Boxes {
        fn viewport(&self) -> Size {
            self.viewport
        }

        fn bounding_rect(&self, key: usize) -> Rect {
            let n = &self.nodes[key];
            let style = self.computed_style(key);
            let width = n.natural.width.min(style.max_width.unwrap_or(f64::INFINITY));
            let height = n.natural.height.min(style.max_height.unwrap_or(f64::INFINITY));
            let origin = match (style.position, style.left, style.top) {
                (Position::Fixed, Some(x), Some(y)) => {
                    Point::new(x + style.margin.x0, y + style.margin.y0)
                }
                _ => n.home,
            };
            Rect::from_origin_size(origin, Size::new(width, height))
        }

        fn inline_style(&self, key: usize) -> Option<&InlineStyle> {
            self.nodes.get(key).map(|n| &n.inline)
        }

        fn inline_style_mut(&mut self, key: usize) -> Option<&mut InlineStyle> {
            self.nodes.get_mut(key).map(|n| &mut n.inline)
        }

        fn computed_style(&self, key: usize) -> ComputedStyle {
            let n = &self.nodes[key];
            let mut style = n.sheet.clone();
            style.position = n.inline.position.unwrap_or(style.position);
            style.top = n.inline.top.or(style.top);
            style.left = n.inline.left.or(style.left);
            style.max_width = n.inline.max_width.or(style.max_width);
            style.max_height = n.inline.max_height.or(style.max_height);
            style
        }

        fn scroll_offset(&self, key: usize) -> Vec2 {
            self.nodes[key].scroll
        }

        fn set_scroll_offset(&mut self, key: usize, offset: Vec2) {
            self.nodes[key].scroll = offset;
        }

        fn parent(&self, key: usize) -> Option<usize> {
            self.nodes[key].parent
        }
    }

    #[test]
    fn info_is_captured_once_until_reset() {
        let mut host = Boxes::new(Size::new(400.0, 300.0));
        let el = host.add(None, Point::ZERO, Size::new(50.0, 50.0));
        host.nodes[el].inline.top = Some(7.0);
        let mut fit = Fit::new(el);
        assert!(fit.info().is_none());

        fit.discover_info(&host);
        let first = *fit.info().unwrap();
        assert_eq!(first.inline.top, Some(7.0));
        assert_eq!(first.positioned_by.vertically, Some(VerticalEdge::Top));

        host.nodes[el].inline.top = None;
        fit.discover_info(&host);
        assert_eq!(fit.info(), Some(&first), "memoized info must not be recomputed");

        fit.reset_fit(&mut host);
        assert!(fit.info().is_none());
        assert_eq!(host.nodes[el].inline.top, Some(7.0));
    }

    #[test]
    fn reset_without_fit_is_a_no_op() {
        let mut host = Boxes::new(Size::new(400.0, 300.0));
        let el = host.add(None, Point::ZERO, Size::new(50.0, 50.0));
        host.nodes[el].inline.max_width = Some(12.0);
        let mut fit = Fit::new(el);
        fit.reset_fit(&mut host);
        assert_eq!(host.nodes[el].inline.max_width, Some(12.0));
    }

    #[test]
    fn centers_in_viewport_without_position_target() {
        let mut host = Boxes::new(Size::new(400.0, 300.0));
        let el = host.add(None, Point::ZERO, Size::new(100.0, 50.0));
        let mut fit = Fit::new(el);
        fit.fit(&mut host);
        assert_eq!(host.bounding_rect(el), Rect::new(150.0, 125.0, 250.0, 175.0));
        assert_eq!(host.nodes[el].inline.max_height, Some(300.0));
        assert_eq!(host.nodes[el].inline.max_width, Some(400.0));
    }

    #[test]
    fn constrains_to_an_offset_container() {
        let mut host = Boxes::new(Size::new(800.0, 600.0));
        let container = host.add(None, Point::new(100.0, 100.0), Size::new(400.0, 200.0));
        let el = host.add(None, Point::ZERO, Size::new(100.0, 500.0));
        let mut fit = Fit::new(el);
        fit.options_mut().fit_into = FitInto::Element(container);
        fit.fit(&mut host);
        // The container's origin does not count as free space.
        assert_eq!(host.nodes[el].inline.max_height, Some(200.0));
        assert_eq!(host.nodes[el].inline.max_width, Some(400.0));
        assert_eq!(host.bounding_rect(el), Rect::new(250.0, 100.0, 350.0, 300.0));
    }

    #[test]
    fn aligns_to_parent_by_default() {
        let mut host = Boxes::new(Size::new(400.0, 300.0));
        let anchor = host.add(None, Point::new(40.0, 60.0), Size::new(80.0, 20.0));
        let el = host.add(Some(anchor), Point::ZERO, Size::new(100.0, 50.0));
        let mut fit = Fit::new(el);
        fit.options_mut().vertical_align = Some(VerticalAlign::Top);
        fit.options_mut().horizontal_align = Some(HorizontalAlign::Left);
        assert!(fit.should_position(&host));
        fit.fit(&mut host);
        assert_eq!(host.bounding_rect(el).origin(), Point::new(40.0, 60.0));
    }

    #[test]
    fn rtl_mirrors_horizontal_alignment() {
        let mut host = Boxes::new(Size::new(400.0, 300.0));
        let anchor = host.add(None, Point::new(100.0, 60.0), Size::new(200.0, 20.0));
        let el = host.add(Some(anchor), Point::ZERO, Size::new(50.0, 50.0));
        host.nodes[el].sheet.direction = Direction::Rtl;
        let mut fit = Fit::new(el);
        fit.connect(&host);
        fit.options_mut().vertical_align = Some(VerticalAlign::Top);
        fit.options_mut().horizontal_align = Some(HorizontalAlign::Left);
        fit.fit(&mut host);
        // Left in RTL lines up the right edges.
        assert_eq!(host.bounding_rect(el).x1, 300.0);
    }

    #[test]
    fn refit_keeps_sizer_scroll_offset() {
        let mut host = Boxes::new(Size::new(400.0, 300.0));
        let el = host.add(None, Point::ZERO, Size::new(100.0, 500.0));
        host.nodes[el].scroll = Vec2::new(0.0, 40.0);
        let mut fit = Fit::new(el);
        fit.fit(&mut host);
        host.nodes[el].scroll = Vec2::new(3.0, 90.0);
        fit.refit(&mut host);
        assert_eq!(host.scroll_offset(el), Vec2::new(3.0, 90.0));
    }
}
