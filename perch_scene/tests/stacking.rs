// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Z-ordering, backdrop tracking, and outside-click routing across overlays.

use kurbo::{Point, Rect, Size};
use perch_fit::FitOptions;
use perch_overlay::{CancelTrigger, OverlayConfig, OverlayEvent, Stage, StackHost};
use perch_scene::{Element, NodeId, Scene};

fn stage() -> (Stage<NodeId, Scene>, NodeId) {
    let mut scene = Scene::new(Size::new(800.0, 600.0));
    let page = scene.insert(None, Element::boxed(Rect::new(0.0, 0.0, 800.0, 600.0)));
    (Stage::new(scene), page)
}

fn overlay(stage: &mut Stage<NodeId, Scene>, config: OverlayConfig) -> NodeId {
    let key = stage
        .host_mut()
        .insert(None, Element::boxed(Rect::new(0.0, 0.0, 200.0, 100.0)));
    assert!(stage.insert(key, config, FitOptions::default()));
    stage.connect(key);
    key
}

fn open(stage: &mut Stage<NodeId, Scene>, key: NodeId) {
    stage.open(key);
    stage.run_frame();
}

fn z(stage: &Stage<NodeId, Scene>, key: NodeId) -> Option<i32> {
    stage.host().z_index(key)
}

#[test]
fn later_overlays_stack_above_earlier_ones() {
    let (mut stage, _) = stage();
    let a = overlay(&mut stage, OverlayConfig::default());
    let b = overlay(&mut stage, OverlayConfig::default());
    let c = overlay(&mut stage, OverlayConfig::default());
    for key in [a, b, c] {
        stage.open(key);
    }
    stage.run_frame();

    assert_eq!(stage.manager().current_overlay(), Some(c));
    assert_eq!((z(&stage, a), z(&stage, b), z(&stage, c)), (Some(103), Some(105), Some(107)));

    stage.close(b);
    stage.run_frame();
    assert_eq!(stage.manager().overlays().collect::<Vec<_>>(), vec![a, c]);
    assert_eq!(stage.manager().current_overlay(), Some(c));
    assert_eq!(z(&stage, b), None, "z-index is released once hidden");
}

#[test]
fn always_on_top_stays_current() {
    let (mut stage, _) = stage();
    let a = overlay(&mut stage, OverlayConfig::default());
    let top = overlay(
        &mut stage,
        OverlayConfig {
            always_on_top: true,
            ..OverlayConfig::default()
        },
    );
    let later = overlay(&mut stage, OverlayConfig::default());
    open(&mut stage, a);
    open(&mut stage, top);
    open(&mut stage, later);

    assert_eq!(stage.manager().current_overlay(), Some(top));
    assert_eq!(stage.manager().overlays().collect::<Vec<_>>(), vec![a, later, top]);
    assert!(z(&stage, top) > z(&stage, later));
    assert!(z(&stage, later) > z(&stage, a));
}

#[test]
fn opened_overlays_sit_above_page_content() {
    let (mut stage, page) = stage();
    let a = overlay(&mut stage, OverlayConfig::default());
    open(&mut stage, a);

    // Centered in the viewport.
    assert_eq!(stage.host().hit_test(Point::new(400.0, 300.0)), Some(a));
    assert_eq!(stage.host().hit_test(Point::new(10.0, 10.0)), Some(page));
}

#[test]
fn backdrop_follows_the_top_most_overlay_that_wants_it() {
    let (mut stage, _) = stage();
    let with_backdrop = OverlayConfig {
        with_backdrop: true,
        ..OverlayConfig::default()
    };
    let x = overlay(&mut stage, with_backdrop.clone());
    let y = overlay(&mut stage, OverlayConfig::default());
    let w = overlay(&mut stage, with_backdrop);
    assert!(stage.manager().backdrop().is_none(), "created lazily");

    open(&mut stage, x);
    open(&mut stage, y);
    let backdrop_z = |stage: &Stage<NodeId, Scene>| {
        let backdrop = stage.manager().backdrop().expect("backdrop exists");
        (backdrop.opened(), backdrop.z_index())
    };
    assert_eq!(backdrop_z(&stage), (true, 102));

    open(&mut stage, w);
    assert_eq!(z(&stage, w), Some(107));
    assert_eq!(backdrop_z(&stage), (true, 106));

    stage.close(w);
    stage.run_frame();
    assert_eq!(backdrop_z(&stage), (true, 102));

    stage.close(x);
    stage.run_frame();
    assert!(!backdrop_z(&stage).0);
    assert_eq!(
        stage.manager().backdrop_z(stage.host()),
        stage.manager().minimum_z() - 1
    );
}

#[test]
fn toggling_with_backdrop_on_an_open_overlay_moves_the_backdrop() {
    let (mut stage, _) = stage();
    let a = overlay(&mut stage, OverlayConfig::default());
    open(&mut stage, a);
    assert!(stage.manager().backdrop().is_none());

    stage.configure(a, |c| c.with_backdrop = true);
    let backdrop = stage.manager().backdrop().expect("backdrop exists");
    assert!(backdrop.opened());
    assert_eq!(backdrop.z_index(), 102);

    stage.configure(a, |c| c.with_backdrop = false);
    assert!(!stage.manager().backdrop().is_some_and(|b| b.opened()));
}

#[test]
fn outside_click_cancels_only_the_top_overlay() {
    let (mut stage, page) = stage();
    let lower = overlay(&mut stage, OverlayConfig::default());
    let upper = overlay(&mut stage, OverlayConfig::default());
    open(&mut stage, lower);
    open(&mut stage, upper);
    stage.take_events();

    let point = Point::new(10.0, 10.0);
    let target = stage.host().hit_test(point).expect("page is hit");
    assert_eq!(target, page);
    let path = stage.host().composed_path(target);
    stage.dispatch_click(point, &path);

    assert!(!stage.overlay(upper).is_some_and(|o| o.opened()));
    assert!(stage.overlay(lower).is_some_and(|o| o.opened()));
    assert_eq!(
        stage.take_events().first(),
        Some(&OverlayEvent::Cancel {
            overlay: upper,
            trigger: CancelTrigger::OutsideClick,
            default_prevented: false,
        })
    );
}

#[test]
fn click_through_reaches_overlays_below() {
    let (mut stage, _) = stage();
    let lower = overlay(&mut stage, OverlayConfig::default());
    let upper = overlay(
        &mut stage,
        OverlayConfig {
            allow_click_through: true,
            ..OverlayConfig::default()
        },
    );
    open(&mut stage, lower);
    open(&mut stage, upper);

    let point = Point::new(10.0, 10.0);
    let path = stage.host().composed_path(stage.host().hit_test(point).expect("hit"));
    stage.dispatch_click(point, &path);

    assert!(!stage.overlay(upper).is_some_and(|o| o.opened()));
    assert!(!stage.overlay(lower).is_some_and(|o| o.opened()));
}

#[test]
fn clicks_inside_the_overlay_do_not_cancel() {
    let (mut stage, _) = stage();
    let menu = overlay(&mut stage, OverlayConfig::default());
    let item = stage
        .host_mut()
        .insert(Some(menu), Element::boxed(Rect::new(10.0, 10.0, 190.0, 40.0)));
    open(&mut stage, menu);

    let point = Point::new(320.0, 270.0);
    let target = stage.host().hit_test(point).expect("item is hit");
    assert_eq!(target, item);
    let path = stage.host().composed_path(target);
    stage.dispatch_click(point, &path);

    assert!(stage.overlay(menu).is_some_and(|o| o.opened()));
}

#[test]
fn no_cancel_on_outside_click_keeps_the_overlay_open() {
    let (mut stage, page) = stage();
    let a = overlay(
        &mut stage,
        OverlayConfig {
            no_cancel_on_outside_click: true,
            ..OverlayConfig::default()
        },
    );
    open(&mut stage, a);
    stage.dispatch_click(Point::new(10.0, 10.0), &[page]);
    assert!(stage.overlay(a).is_some_and(|o| o.opened()));
}
