// Host-side tests for page scroll, input gating and attachment lifetime.

mod common;

use common::{app_with, run_frames, FakeDocument, FakeRenderer, Tracked, DT, SETTLE_FRAMES};
use gallery_core::input::DeltaMode;
use gallery_core::page::PagePhase;
use gallery_core::{
    Attachment, DeviceContext, PageController, PageEvent, PageLifecycle, PageMetrics, PixelSize,
    PointerInput, RawWheel, TemplateId,
};
use glam::Vec2;
use std::cell::Cell;
use std::rc::Rc;

fn wheel(delta_y: f32) -> RawWheel {
    RawWheel {
        delta_x: 0.0,
        delta_y,
        mode: DeltaMode::Pixel,
    }
}

fn about_with_wrapper(height: f32) -> FakeDocument {
    let mut doc = FakeDocument::new("about");
    doc.metrics.insert(
        "about".to_string(),
        PageMetrics {
            wrapper_height: Some(height),
        },
    );
    doc
}

#[test]
fn wheel_scroll_converges_on_target() {
    // limit = 1900 - 900
    let mut app = app_with(about_with_wrapper(1900.0), FakeRenderer::default());
    run_frames(&mut app, SETTLE_FRAMES);
    assert_eq!(app.page().scroll().limit, 1000.0);

    app.on_wheel(wheel(1000.0));
    run_frames(&mut app, 60);
    let current = app.page().scroll().current;
    assert!(current <= 1000.0 && current > 998.0, "current {}", current);

    run_frames(&mut app, 60);
    assert_eq!(app.page().scroll().current, 1000.0);
    let frame = app.document().last_frame.expect("frame applied");
    assert_eq!(frame.translate_y, 1000.0);
    assert_eq!(frame.opacity, 1.0);
}

#[test]
fn wheel_past_the_limit_eases_to_the_limit() {
    let mut app = app_with(about_with_wrapper(1900.0), FakeRenderer::default());
    run_frames(&mut app, SETTLE_FRAMES);

    app.on_wheel(wheel(1500.0));
    run_frames(&mut app, 60);
    let scroll = app.page().scroll();
    assert_eq!(scroll.target, 1000.0);
    // 0.9^60 of the distance is still left after 60 frames.
    assert!(
        scroll.current <= 1000.0 && scroll.current > 998.0,
        "current {}",
        scroll.current
    );
}

#[test]
fn page_scroll_never_overshoots_limit() {
    let mut app = app_with(about_with_wrapper(2900.0), FakeRenderer::default());
    run_frames(&mut app, SETTLE_FRAMES);

    app.on_wheel(wheel(50_000.0));
    let mut previous = 0.0;
    for _ in 0..200 {
        app.frame(DT);
        let current = app.page().scroll().current;
        assert!(current >= previous && current <= 2000.0);
        previous = current;
    }
    assert_eq!(previous, 2000.0);
}

#[test]
fn about_tiles_follow_page_scroll() {
    let mut app = app_with(about_with_wrapper(2900.0), FakeRenderer::default());
    run_frames(&mut app, SETTLE_FRAMES);
    let start = app.canvas().scene().expect("about scene").tiles()[0]
        .mesh
        .position
        .y;

    app.on_wheel(wheel(900.0));
    run_frames(&mut app, 200);
    let end = app.canvas().scene().expect("about scene").tiles()[0]
        .mesh
        .position
        .y;
    // One window height of scroll is one viewport height in world units.
    let viewport = app.canvas().viewport();
    assert!((end - start - viewport.height).abs() < 1e-3);
}

#[test]
fn input_is_ignored_until_the_page_is_shown() {
    let mut app = app_with(about_with_wrapper(2900.0), FakeRenderer::default());
    assert_eq!(app.page().phase(), PagePhase::Showing);
    app.on_wheel(wheel(500.0));
    assert!(!app.on_key("ArrowDown"));
    assert_eq!(app.page().scroll().target, 0.0);

    run_frames(&mut app, SETTLE_FRAMES);
    assert!(app.on_key("ArrowDown"));
    assert!(!app.on_key("Enter"));
    assert_eq!(app.page().scroll().target, 100.0);
}

#[test]
fn touch_drag_scrolls_page_only_on_touch_devices() {
    let touch = DeviceContext {
        touch_primary: true,
    };
    let mut page = PageController::new(TemplateId::new("about"), touch);
    page.create(Vec::new());
    page.on_resize(
        PageMetrics {
            wrapper_height: Some(3000.0),
        },
        PixelSize::new(1600.0, 900.0),
    );
    page.show();
    for _ in 0..SETTLE_FRAMES {
        page.update(DT);
    }

    page.on_pointer(PointerInput::Down(Vec2::new(0.0, 500.0)));
    page.on_pointer(PointerInput::Move(Vec2::new(0.0, 400.0)));
    // (500 - 400) * 3
    assert_eq!(page.scroll().target, 300.0);

    let mut desktop = PageController::new(TemplateId::new("about"), DeviceContext::default());
    desktop.show();
    for _ in 0..SETTLE_FRAMES {
        desktop.update(DT);
    }
    desktop.on_pointer(PointerInput::Down(Vec2::new(0.0, 500.0)));
    desktop.on_pointer(PointerInput::Move(Vec2::new(0.0, 400.0)));
    assert_eq!(desktop.scroll().target, 0.0);
}

#[test]
fn show_and_hide_report_completion_once() {
    let mut page = PageController::new(TemplateId::new("home"), DeviceContext::default());
    page.show();
    let shown: Vec<_> = (0..SETTLE_FRAMES).filter_map(|_| page.update(DT).event).collect();
    assert_eq!(shown, vec![PageEvent::Shown]);

    page.hide();
    let hidden: Vec<_> = (0..SETTLE_FRAMES).filter_map(|_| page.update(DT).event).collect();
    assert_eq!(hidden, vec![PageEvent::Hidden]);
    assert_eq!(page.phase(), PagePhase::Hidden);
}

#[test]
fn hiding_releases_attachments() {
    let live = Rc::new(Cell::new(0));
    let mut page = PageController::new(TemplateId::new("about"), DeviceContext::default());
    page.create(
        (0..4)
            .map(|_| Box::new(Tracked::new(&live)) as Box<dyn Attachment>)
            .collect(),
    );
    assert_eq!(live.get(), 4);
    assert_eq!(page.attachment_count(), 4);

    page.show();
    page.hide();
    assert_eq!(live.get(), 0);
    assert_eq!(page.attachment_count(), 0);
}

#[test]
fn app_drops_attachments_when_navigation_starts() {
    let mut app = app_with(FakeDocument::new("home"), FakeRenderer::default());
    run_frames(&mut app, SETTLE_FRAMES);
    assert_eq!(app.document().live_attachments.get(), 3);

    app.navigate(gallery_core::NavigationRequest::link("/about"));
    assert_eq!(app.document().live_attachments.get(), 0);
}

#[test]
fn canvas_wheel_uses_normalized_pixels() {
    let mut app = app_with(FakeDocument::new("collections"), FakeRenderer::default());
    run_frames(&mut app, SETTLE_FRAMES);
    // Three lines of 40 px each move the track left by 120 px.
    app.on_wheel(RawWheel {
        delta_x: 0.0,
        delta_y: 3.0,
        mode: DeltaMode::Line,
    });
    run_frames(&mut app, 1);
    let events = &app.document().scene_events;
    assert!(events.iter().any(|e| matches!(
        e,
        gallery_core::SceneEvent::TrackMoved(x) if (*x + 12.0).abs() < 1e-3
    )));
}
