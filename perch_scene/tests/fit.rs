// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fit engine behavior against a laid-out scene.

use kurbo::{Insets, Point, Rect, Size, Vec2};
use perch_fit::style::{ComputedStyle, Position};
use perch_fit::{Fit, FitHost, FitInto, FitOptions, HorizontalAlign, VerticalAlign};
use perch_scene::{Element, ElementFlags, NodeId, Scene};

fn scene() -> Scene {
    Scene::new(Size::new(800.0, 600.0))
}

fn aligned(
    element: NodeId,
    target: NodeId,
    vertical: VerticalAlign,
    horizontal: HorizontalAlign,
) -> Fit<NodeId> {
    Fit::with_options(
        element,
        FitOptions {
            position_target: Some(target),
            vertical_align: Some(vertical),
            horizontal_align: Some(horizontal),
            ..FitOptions::default()
        },
    )
}

fn overlaps(a: Rect, b: Rect) -> bool {
    a.x0 < b.x1 && b.x0 < a.x1 && a.y0 < b.y1 && b.y0 < a.y1
}

#[test]
fn top_left_alignment_is_exact_and_uncropped() {
    let mut s = scene();
    let target = s.insert(None, Element::boxed(Rect::new(100.0, 100.0, 200.0, 140.0)));
    let el = s.insert(None, Element::boxed(Rect::new(0.0, 0.0, 150.0, 120.0)));
    let mut fit = aligned(el, target, VerticalAlign::Top, HorizontalAlign::Left);
    fit.fit(&mut s);

    let rect = s.bounding_rect(el);
    let target_rect = s.bounding_rect(target);
    assert_eq!(rect.y0, target_rect.y0);
    assert_eq!(rect.x0, target_rect.x0);
    assert_eq!(rect.height(), 120.0, "no cropping with ample room");
    assert_eq!(rect.width(), 150.0);
}

#[test]
fn fitting_twice_is_idempotent() {
    let mut s = scene();
    let target = s.insert(None, Element::boxed(Rect::new(100.0, 100.0, 200.0, 140.0)));
    let el = s.insert(None, Element::boxed(Rect::new(0.0, 0.0, 150.0, 120.0)));
    let mut fit = aligned(el, target, VerticalAlign::Bottom, HorizontalAlign::Right);

    fit.fit(&mut s);
    let first = (s.inline_style(el).cloned(), s.bounding_rect(el));
    fit.fit(&mut s);
    let second = (s.inline_style(el).cloned(), s.bounding_rect(el));
    assert_eq!(first, second);

    // Constrain + center path as well.
    let lone = s.insert(None, Element::boxed(Rect::new(0.0, 0.0, 300.0, 900.0)));
    let mut centered = Fit::new(lone);
    centered.fit(&mut s);
    let first = (s.inline_style(lone).cloned(), s.bounding_rect(lone));
    centered.fit(&mut s);
    assert_eq!(first, (s.inline_style(lone).cloned(), s.bounding_rect(lone)));
}

#[test]
fn reset_fit_restores_pre_fit_inline_styles() {
    let mut s = scene();
    let target = s.insert(None, Element::boxed(Rect::new(100.0, 100.0, 200.0, 140.0)));
    let el = s.insert(None, Element::boxed(Rect::new(0.0, 0.0, 150.0, 120.0)));
    if let Some(style) = s.inline_style_mut(el) {
        style.left = Some(3.0);
        style.max_height = Some(500.0);
        style.z_index = Some(4);
    }
    let before = s.inline_style(el).cloned();

    let mut fit = aligned(el, target, VerticalAlign::Top, HorizontalAlign::Left);
    fit.options_mut().fit_position_target = true;
    fit.fit(&mut s);
    assert_ne!(s.inline_style(el).cloned(), before);
    assert!(fit.info().is_some());

    fit.reset_fit(&mut s);
    assert_eq!(s.inline_style(el).cloned(), before);
    assert!(fit.info().is_none());
}

#[test]
fn refit_keeps_sizing_target_scrolled() {
    let mut s = scene();
    let el = s.insert(None, Element::default());
    let sizer = s.insert(Some(el), Element::boxed(Rect::new(0.0, 0.0, 200.0, 1000.0)));
    s.set_scroll_offset(sizer, Vec2::new(0.0, 250.0));

    let mut fit = Fit::with_options(
        el,
        FitOptions {
            sizing_target: Some(sizer),
            ..FitOptions::default()
        },
    );
    fit.refit(&mut s);

    assert_eq!(s.scroll_offset(sizer), Vec2::new(0.0, 250.0));
    assert_eq!(s.bounding_rect(sizer).height(), 600.0);
    assert_eq!(s.bounding_rect(el), Rect::new(300.0, 0.0, 500.0, 600.0));
}

#[test]
fn dynamic_align_flips_to_the_uncropped_edge() {
    let mut s = scene();
    // Pushed 10px above the viewport.
    let target = s.insert(None, Element::boxed(Rect::new(100.0, -10.0, 200.0, 290.0)));
    let el = s.insert(None, Element::boxed(Rect::new(0.0, 0.0, 100.0, 100.0)));
    let mut fit = aligned(el, target, VerticalAlign::Top, HorizontalAlign::Left);
    fit.options_mut().dynamic_align = true;
    fit.fit(&mut s);

    let rect = s.bounding_rect(el);
    assert_eq!(rect.y1, s.bounding_rect(target).y1, "aligned to the bottom edge");
    assert_eq!(rect.height(), 100.0, "not cropped");
    assert_eq!(rect.x0, 100.0);
}

#[test]
fn without_dynamic_align_the_preference_is_kept_and_clamped() {
    let mut s = scene();
    let target = s.insert(None, Element::boxed(Rect::new(100.0, -10.0, 200.0, 290.0)));
    let el = s.insert(None, Element::boxed(Rect::new(0.0, 0.0, 100.0, 100.0)));
    let mut fit = aligned(el, target, VerticalAlign::Top, HorizontalAlign::Left);
    fit.fit(&mut s);

    let rect = s.bounding_rect(el);
    assert_eq!(rect.y0, 0.0);
    assert_eq!(rect.height(), 90.0);
}

#[test]
fn no_overlap_keeps_clear_of_the_target() {
    let corners = [
        (VerticalAlign::Top, HorizontalAlign::Left),
        (VerticalAlign::Top, HorizontalAlign::Right),
        (VerticalAlign::Bottom, HorizontalAlign::Left),
        (VerticalAlign::Bottom, HorizontalAlign::Right),
    ];
    for (vertical, horizontal) in corners {
        let mut s = scene();
        let target = s.insert(None, Element::boxed(Rect::new(350.0, 250.0, 450.0, 290.0)));
        let el = s.insert(None, Element::boxed(Rect::new(0.0, 0.0, 80.0, 60.0)));
        let mut fit = aligned(el, target, vertical, horizontal);
        fit.options_mut().no_overlap = true;
        fit.fit(&mut s);

        let rect = s.bounding_rect(el);
        assert!(
            !overlaps(rect, s.bounding_rect(target)),
            "{vertical:?}/{horizontal:?} overlaps: {rect:?}"
        );
        assert_eq!(rect.size(), Size::new(80.0, 60.0), "{vertical:?}/{horizontal:?}");
    }
}

#[test]
fn large_offsets_are_clamped_into_the_viewport() {
    let mut s = scene();
    let target = s.insert(None, Element::boxed(Rect::new(100.0, 100.0, 200.0, 140.0)));
    let el = s.insert(None, Element::boxed(Rect::new(0.0, 0.0, 100.0, 100.0)));
    let mut fit = aligned(el, target, VerticalAlign::Top, HorizontalAlign::Left);
    fit.options_mut().horizontal_offset = -150.0;
    fit.options_mut().vertical_offset = -150.0;
    fit.fit(&mut s);

    let rect = s.bounding_rect(el);
    assert_eq!(rect.origin(), Point::ZERO);
    assert_eq!(rect.size(), Size::new(50.0, 50.0), "shrunk instead of pushed out");
}

#[test]
fn fit_position_target_matches_target_width() {
    let mut s = scene();
    let target = s.insert(None, Element::boxed(Rect::new(100.0, 100.0, 300.0, 140.0)));
    let el = s.insert(None, Element::boxed(Rect::new(0.0, 0.0, 80.0, 50.0)));
    let mut fit = aligned(el, target, VerticalAlign::Top, HorizontalAlign::Left);
    fit.options_mut().fit_position_target = true;
    fit.fit(&mut s);

    assert_eq!(s.bounding_rect(el).width(), 200.0);
    fit.reset_fit(&mut s);
    assert_eq!(s.bounding_rect(el).width(), 80.0);
}

#[test]
fn containing_block_offset_is_removed() {
    let mut s = scene();
    let target = s.insert(None, Element::boxed(Rect::new(200.0, 200.0, 300.0, 240.0)));
    let frame = s.insert(
        None,
        Element::boxed(Rect::new(50.0, 50.0, 350.0, 350.0))
            .with_flags(ElementFlags::CONTAINING_BLOCK),
    );
    let el = s.insert(Some(frame), Element::boxed(Rect::new(0.0, 0.0, 100.0, 60.0)));
    let mut fit = aligned(el, target, VerticalAlign::Top, HorizontalAlign::Left);
    fit.fit(&mut s);

    assert_eq!(s.bounding_rect(el).origin(), Point::new(200.0, 200.0));
    assert_eq!(s.inline_style(el).and_then(|st| st.left), Some(150.0));
}

#[test]
fn margins_are_kept_inside_the_fit_region() {
    let mut s = scene();
    let target = s.insert(None, Element::boxed(Rect::new(0.0, 0.0, 100.0, 40.0)));
    let style = ComputedStyle {
        margin: Insets::uniform(8.0),
        ..ComputedStyle::default()
    };
    let el = s.insert(
        None,
        Element::boxed(Rect::new(0.0, 0.0, 100.0, 100.0)).with_style(style),
    );
    let mut fit = aligned(el, target, VerticalAlign::Top, HorizontalAlign::Left);
    fit.fit(&mut s);

    assert_eq!(s.bounding_rect(el).origin(), Point::new(8.0, 8.0));
}

#[test]
fn constrain_respects_a_bottom_anchor() {
    let mut s = scene();
    let style = ComputedStyle {
        position: Position::Fixed,
        bottom: Some(20.0),
        ..ComputedStyle::default()
    };
    let el = s.insert(
        None,
        Element::boxed(Rect::new(0.0, 0.0, 100.0, 1000.0)).with_style(style),
    );
    let mut fit = Fit::new(el);
    fit.fit(&mut s);

    // Shrunk from the top, still 20px off the bottom, centered horizontally.
    assert_eq!(s.bounding_rect(el), Rect::new(350.0, 0.0, 450.0, 580.0));
    assert_eq!(s.inline_style(el).and_then(|st| st.top), None);
}

fn into_container(element: NodeId, container: NodeId) -> Fit<NodeId> {
    Fit::with_options(
        element,
        FitOptions {
            fit_into: FitInto::Element(container),
            ..FitOptions::default()
        },
    )
}

fn contains(outer: Rect, inner: Rect) -> bool {
    inner.x0 >= outer.x0 && inner.y0 >= outer.y0 && inner.x1 <= outer.x1 && inner.y1 <= outer.y1
}

#[test]
fn centers_inside_an_offset_container() {
    let mut s = scene();
    let container = s.insert(None, Element::boxed(Rect::new(100.0, 100.0, 500.0, 300.0)));
    let el = s.insert(None, Element::boxed(Rect::new(0.0, 0.0, 100.0, 500.0)));
    let mut fit = into_container(el, container);
    fit.fit(&mut s);

    let rect = s.bounding_rect(el);
    let region = s.bounding_rect(container);
    assert!(contains(region, rect), "{rect:?} escapes {region:?}");
    assert_eq!(s.inline_style(el).and_then(|st| st.max_height), Some(200.0));
    assert_eq!(rect, Rect::new(250.0, 100.0, 350.0, 300.0));
    assert_eq!(rect.center(), region.center());
}

#[test]
fn container_fit_keeps_margins_inside() {
    let mut s = scene();
    let container = s.insert(None, Element::boxed(Rect::new(100.0, 100.0, 500.0, 300.0)));
    let style = ComputedStyle {
        margin: Insets::uniform(10.0),
        ..ComputedStyle::default()
    };
    let el = s.insert(
        None,
        Element::boxed(Rect::new(0.0, 0.0, 100.0, 500.0)).with_style(style),
    );
    let mut fit = into_container(el, container);
    fit.fit(&mut s);

    let rect = s.bounding_rect(el);
    assert_eq!(rect, Rect::new(250.0, 110.0, 350.0, 290.0));
    assert!(contains(s.bounding_rect(container), rect.inflate(10.0, 10.0)));
}

#[test]
fn dynamic_align_stays_inside_an_offset_container() {
    let mut s = scene();
    let container = s.insert(None, Element::boxed(Rect::new(100.0, 100.0, 500.0, 300.0)));
    // Too close to the container's bottom for a top-aligned box.
    let target = s.insert(None, Element::boxed(Rect::new(150.0, 250.0, 250.0, 290.0)));
    let el = s.insert(None, Element::boxed(Rect::new(0.0, 0.0, 100.0, 100.0)));
    let mut fit = aligned(el, target, VerticalAlign::Top, HorizontalAlign::Left);
    fit.options_mut().fit_into = FitInto::Element(container);
    fit.options_mut().dynamic_align = true;
    fit.fit(&mut s);

    let rect = s.bounding_rect(el);
    assert_eq!(rect, Rect::new(150.0, 190.0, 250.0, 290.0));
    assert!(contains(s.bounding_rect(container), rect));
}

#[test]
fn rtl_mirrors_left_alignment() {
    let mut s = scene();
    let rtl = ComputedStyle {
        direction: perch_fit::style::Direction::Rtl,
        ..ComputedStyle::default()
    };
    let page = s.insert(None, Element::default().with_style(rtl));
    let target = s.insert(Some(page), Element::boxed(Rect::new(100.0, 100.0, 300.0, 140.0)));
    let el = s.insert(Some(page), Element::boxed(Rect::new(0.0, 0.0, 50.0, 50.0)));
    let mut fit = aligned(el, target, VerticalAlign::Top, HorizontalAlign::Left);
    fit.connect(&s);
    assert!(fit.is_rtl());
    fit.fit(&mut s);

    assert_eq!(s.bounding_rect(el).x1, 300.0);
}
