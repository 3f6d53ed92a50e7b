// Host-side tests for the home and collections scenes.

mod common;

use common::{collections_layout, home_layout, DT};
use gallery_core::constants::WRAP_JITTER_RAD;
use gallery_core::input::DragTracker;
use gallery_core::scene::{CollectionsScene, HomeScene, SceneContext};
use gallery_core::viewport::{Camera, CameraParams};
use gallery_core::{
    Direction, FrameInput, PixelSize, Scene, SceneEvent, SceneLayout, WheelDelta,
};
use glam::Vec2;

const WINDOW: PixelSize = PixelSize {
    width: 1600.0,
    height: 900.0,
};

fn context(layout: &SceneLayout) -> SceneContext<'_> {
    let mut camera = Camera::new(CameraParams::default());
    SceneContext {
        viewport: camera.resize(WINDOW),
        window: WINDOW,
        layout,
        page_scroll: 0.0,
    }
}

fn frame() -> FrameInput {
    FrameInput {
        dt: DT,
        page_scroll: 0.0,
    }
}

/// No tile may trail further than the wrap bound in the direction of travel.
fn assert_wrapped(scene: &HomeScene) {
    let bound = scene.wrap_bounds();
    let (dir_x, dir_y) = scene.directions();
    for tile in scene.tiles() {
        let pos = tile.mesh.position;
        let half = tile.mesh.half_extent();
        match dir_x {
            Direction::Negative => assert!(pos.x + half.x >= -bound.x - 1e-3),
            Direction::Positive => assert!(pos.x - half.x <= bound.x + 1e-3),
            Direction::None => {}
        }
        match dir_y {
            Direction::Positive => assert!(pos.y + half.y >= -bound.y - 1e-3),
            Direction::Negative => assert!(pos.y - half.y <= bound.y + 1e-3),
            Direction::None => {}
        }
    }
}

#[test]
fn home_tiles_never_leave_the_wrap_window() {
    let layout = home_layout();
    let mut scene = HomeScene::new(&context(&layout), 3);

    scene.on_wheel(WheelDelta::pixels(-9000.0, 14000.0));
    for _ in 0..240 {
        scene.update(&frame());
        assert_wrapped(&scene);
    }
    assert_eq!(scene.directions(), (Direction::Negative, Direction::Positive));

    scene.on_wheel(WheelDelta::pixels(20000.0, -30000.0));
    for _ in 0..240 {
        scene.update(&frame());
        assert_wrapped(&scene);
    }
    assert_eq!(scene.directions(), (Direction::Positive, Direction::Negative));
}

#[test]
fn wraps_move_by_whole_gallery_extents() {
    let layout = home_layout();
    let mut scene = HomeScene::new(&context(&layout), 11);
    scene.on_wheel(WheelDelta::pixels(0.0, 25000.0));
    for _ in 0..200 {
        scene.update(&frame());
    }

    let extent = scene.extent();
    let mut wrapped = 0;
    for tile in scene.tiles() {
        let steps = tile.extra.y / extent.y;
        assert!((steps - steps.round()).abs() < 1e-3, "extra {}", tile.extra.y);
        assert_eq!(tile.extra.x, 0.0);
        if tile.extra.y != 0.0 {
            wrapped += 1;
        }
    }
    assert!(wrapped > 0);
}

#[test]
fn wrap_jitter_is_bounded_and_seeded() {
    let layout = home_layout();
    let run = |seed: u64| {
        let mut scene = HomeScene::new(&context(&layout), seed);
        scene.on_wheel(WheelDelta::pixels(12000.0, 0.0));
        for _ in 0..200 {
            scene.update(&frame());
        }
        scene
            .tiles()
            .iter()
            .map(|t| t.mesh.rotation_z)
            .collect::<Vec<_>>()
    };

    let a = run(5);
    let b = run(5);
    assert_eq!(a, b);
    assert!(a.iter().all(|r| r.abs() <= WRAP_JITTER_RAD));
    assert!(a.iter().any(|r| *r != 0.0));
}

#[test]
fn home_drag_moves_grid_under_pointer() {
    let layout = home_layout();
    let mut scene = HomeScene::new(&context(&layout), 1);
    let mut drag = DragTracker::default();

    drag.down(Vec2::new(800.0, 450.0));
    scene.on_pointer_down(&drag);
    drag.moved(Vec2::new(700.0, 300.0));
    scene.on_pointer_move(&drag);
    for _ in 0..200 {
        scene.update(&frame());
    }
    // distance = start - end = (100, 150); targets = anchor - distance
    assert_eq!(scene.scroll(), Vec2::new(-100.0, -150.0));
    assert!(scene.speed() > 0.9);

    drag.up(Vec2::new(700.0, 300.0));
    scene.on_pointer_up(&drag);
    for _ in 0..200 {
        scene.update(&frame());
    }
    assert_eq!(scene.speed(), 0.0);
}

#[test]
fn home_resize_resets_scroll_and_wrap_offsets() {
    let layout = home_layout();
    let ctx = context(&layout);
    let mut scene = HomeScene::new(&ctx, 2);
    scene.on_wheel(WheelDelta::pixels(0.0, 20000.0));
    for _ in 0..100 {
        scene.update(&frame());
    }
    scene.on_resize(&ctx);
    assert_eq!(scene.scroll(), Vec2::ZERO);
    assert!(scene.tiles().iter().all(|t| t.extra == Vec2::ZERO));
}

#[test]
fn index_for_maps_scroll_fraction_to_entry() {
    assert_eq!(CollectionsScene::index_for(0.0, 2100.0, 6), 0);
    assert_eq!(CollectionsScene::index_for(-1050.0, 2100.0, 6), 3);
    assert_eq!(CollectionsScene::index_for(-2100.0, 2100.0, 6), 5);
    assert_eq!(CollectionsScene::index_for(-500.0, 0.0, 6), 0);
    assert_eq!(CollectionsScene::index_for(-500.0, 2100.0, 0), 0);
}

fn active_changes(events: &[SceneEvent]) -> Vec<(usize, usize)> {
    events
        .iter()
        .filter_map(|e| match *e {
            SceneEvent::ActiveIndexChanged { index, collection } => Some((index, collection)),
            _ => None,
        })
        .collect()
}

#[test]
fn active_index_fires_only_on_change() {
    let layout = collections_layout(6);
    let mut scene = CollectionsScene::new(&context(&layout));
    assert_eq!(scene.scroll().limit, 2100.0);

    let mut events = Vec::new();
    for _ in 0..30 {
        let out = scene.update(&frame());
        assert!(matches!(out[0], SceneEvent::TrackMoved(_)));
        events.extend(out);
    }
    assert_eq!(active_changes(&events), vec![(0, 0)]);

    events.clear();
    scene.on_wheel(WheelDelta::pixels(0.0, 2100.0));
    for _ in 0..200 {
        events.extend(scene.update(&frame()));
    }
    let changes = active_changes(&events);
    let indices: Vec<usize> = changes.iter().map(|c| c.0).collect();
    assert_eq!(indices, vec![1, 2, 3, 4, 5]);
    assert_eq!(changes.last(), Some(&(5, 2)));
    assert_eq!(scene.active_index(), Some(5));
    assert_eq!(scene.scroll().current, -2100.0);
}

#[test]
fn collections_track_is_clamped() {
    let layout = collections_layout(4);
    let mut scene = CollectionsScene::new(&context(&layout));
    scene.on_wheel(WheelDelta::pixels(0.0, -5000.0));
    scene.update(&frame());
    assert_eq!(scene.scroll().target, 0.0);

    scene.on_wheel(WheelDelta::pixels(0.0, 50000.0));
    scene.update(&frame());
    assert_eq!(scene.scroll().target, -1300.0);
}

#[test]
fn collections_without_media_emit_no_index() {
    let layout = SceneLayout::default();
    let mut scene = CollectionsScene::new(&context(&layout));
    let out = scene.update(&frame());
    assert_eq!(out.len(), 1);
    assert_eq!(scene.active_index(), None);
}
