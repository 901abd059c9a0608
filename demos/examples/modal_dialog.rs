// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A modal dialog over a page: backdrop, focus trap, Escape, and focus restore.
//!
//! Run:
//! - `cargo run -p perch_demos --example modal_dialog`

use kurbo::{Rect, Size, Vec2};
use perch_fit::FitOptions;
use perch_focus::{Navigation, TabOrder, WrapMode};
use perch_overlay::{Key, OverlayConfig, OverlayHost, ScrollAction, ScrollEvent, Stage};
use perch_scene::{Element, ElementFlags, NodeId, Scene};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut scene = Scene::new(Size::new(800.0, 600.0));
    let page = scene.insert(None, Element::boxed(Rect::new(0.0, 0.0, 800.0, 2000.0)));
    let opener = scene.insert(
        Some(page),
        Element::focusable(Rect::new(20.0, 20.0, 140.0, 52.0)),
    );
    let dialog = scene.insert(None, Element::boxed(Rect::new(0.0, 0.0, 360.0, 220.0)));
    let name = scene.insert(
        Some(dialog),
        Element::focusable(Rect::new(20.0, 40.0, 340.0, 72.0)).with_flags(ElementFlags::AUTOFOCUS),
    );
    let cancel = scene.insert(
        Some(dialog),
        Element::focusable(Rect::new(160.0, 170.0, 240.0, 202.0)),
    );
    let ok = scene.insert(
        Some(dialog),
        Element::focusable(Rect::new(260.0, 170.0, 340.0, 202.0)),
    );
    let label = |id: NodeId| match id {
        id if id == opener => "opener",
        id if id == dialog => "dialog",
        id if id == name => "name field",
        id if id == cancel => "cancel button",
        id if id == ok => "ok button",
        _ => "other",
    };

    let mut stage: Stage<NodeId, Scene> = Stage::new(scene);
    stage.insert(
        dialog,
        OverlayConfig {
            with_backdrop: true,
            restore_focus_on_close: true,
            scroll_action: Some(ScrollAction::Lock),
            ..OverlayConfig::default()
        },
        FitOptions::default(),
    );
    stage.connect(dialog);

    let focused = |stage: &Stage<NodeId, Scene>| stage.host().active_element().map(label);

    stage.host_mut().focus(opener);
    stage.open(dialog);
    stage.run_until_idle(4);
    println!("opened; focus on {:?}", focused(&stage));
    if let Some(backdrop) = stage.manager().backdrop() {
        println!("backdrop z-index {}", backdrop.z_index());
    }

    // Tab around the trap: name -> cancel -> ok -> (wrap) name.
    for _ in 0..3 {
        let prevented = stage.dispatch_keydown(Key::Tab, false);
        if !prevented {
            // The host moves focus itself when the trap does not intervene.
            let order = TabOrder::from_document_order(stage.host().tab_candidates(dialog));
            let Some(next) = stage
                .host()
                .active_element()
                .and_then(|from| order.next(from, Navigation::Next, WrapMode::Never))
            else {
                break;
            };
            stage.host_mut().focus(next);
            let path = stage.host().composed_path(next);
            stage.dispatch_focus(&path);
        }
        println!("tab (wrapped: {prevented}); focus on {:?}", focused(&stage));
    }

    // Scrolling the page behind the dialog is undone.
    stage.host_mut().set_document_scroll(Vec2::new(0.0, 300.0));
    stage.dispatch_scroll(&ScrollEvent {
        path: &[page],
        root: None,
    });
    println!("page scroll after lock {:?}", stage.host().document_scroll());

    stage.dispatch_keydown(Key::Escape, false);
    stage.run_until_idle(4);
    for event in stage.take_events() {
        println!("{event:?}");
    }
    println!("closed; focus on {:?}", focused(&stage));
}
