// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A dropdown anchored to a button, fitted against the viewport.
//!
//! This example shows how to:
//! - align an overlay to a position target with `perch_fit`,
//! - let `dynamic_align` flip the dropdown when the preferred side would crop,
//! - close it with a click outside, routed through the overlay stack.
//!
//! Run:
//! - `cargo run -p perch_demos --example dropdown`
//! - `RUST_LOG=perch_overlay=debug,perch_fit=trace cargo run -p perch_demos --example dropdown`

use kurbo::{Point, Rect, Size};
use perch_fit::{FitHost, FitOptions, HorizontalAlign, VerticalAlign};
use perch_overlay::{OverlayConfig, OverlayEvent, Stage};
use perch_scene::{Element, NodeId, Scene};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut scene = Scene::new(Size::new(640.0, 480.0));
    let page = scene.insert(None, Element::boxed(Rect::new(0.0, 0.0, 640.0, 480.0)));
    // One button near the top, one near the bottom of the page.
    let top_button = scene.insert(
        Some(page),
        Element::focusable(Rect::new(40.0, 40.0, 160.0, 72.0)),
    );
    let bottom_button = scene.insert(
        Some(page),
        Element::focusable(Rect::new(40.0, 420.0, 160.0, 452.0)),
    );
    let menu = scene.insert(None, Element::boxed(Rect::new(0.0, 0.0, 180.0, 160.0)));
    for (i, y) in [8.0, 48.0, 88.0].into_iter().enumerate() {
        let item = scene.insert(
            Some(menu),
            Element::focusable(Rect::new(8.0, y, 172.0, y + 32.0)),
        );
        tracing::info!(?item, index = i, "menu item");
    }

    let mut stage: Stage<NodeId, Scene> = Stage::new(scene);
    stage.insert(
        menu,
        OverlayConfig::default(),
        FitOptions {
            position_target: Some(top_button),
            vertical_align: Some(VerticalAlign::Top),
            horizontal_align: Some(HorizontalAlign::Left),
            vertical_offset: 32.0,
            dynamic_align: true,
            ..FitOptions::default()
        },
    );
    stage.connect(menu);

    for (label, anchor) in [("top button", top_button), ("bottom button", bottom_button)] {
        if let Some(options) = stage.fit_options_mut(menu) {
            options.position_target = Some(anchor);
        }
        stage.open(menu);
        stage.run_until_idle(4);
        let rect = stage.host().bounding_rect(menu);
        println!(
            "\n== Anchored to {label} {:?} ==",
            stage.host().bounding_rect(anchor)
        );
        println!(
            "menu at ({:.0}, {:.0}) size {:.0}x{:.0}",
            rect.x0,
            rect.y0,
            rect.width(),
            rect.height()
        );

        // Click on empty page space: the menu cancels.
        let point = Point::new(600.0, 240.0);
        if let Some(target) = stage.host().hit_test(point) {
            let path = stage.host().composed_path(target);
            stage.dispatch_click(point, &path);
        }
        stage.run_until_idle(4);
        for event in stage.take_events() {
            match event {
                OverlayEvent::Closed { reason, .. } => {
                    println!("closed (canceled: {})", reason.canceled);
                }
                other => println!("{other:?}"),
            }
        }
    }
}
