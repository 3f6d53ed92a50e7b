// Host-side tests for wheel normalisation and drag tracking.

use gallery_core::constants::{LINE_HEIGHT, PAGE_HEIGHT, TOUCH_DRAG_MULTIPLIER};
use gallery_core::input::{normalize_wheel, page_drag_distance, DeltaMode, DragTracker};
use gallery_core::{DeviceContext, PointerInput, RawWheel, WheelDelta};
use glam::Vec2;

#[test]
fn dom_delta_modes_map_to_pixels() {
    assert_eq!(DeltaMode::from_dom(0), DeltaMode::Pixel);
    assert_eq!(DeltaMode::from_dom(1), DeltaMode::Line);
    assert_eq!(DeltaMode::from_dom(2), DeltaMode::Page);

    let raw = |mode| RawWheel {
        delta_x: 1.0,
        delta_y: -2.0,
        mode,
    };
    let px = normalize_wheel(raw(DeltaMode::Pixel));
    assert_eq!((px.pixel_x, px.pixel_y), (1.0, -2.0));
    let line = normalize_wheel(raw(DeltaMode::Line));
    assert_eq!(line.pixel_y, -2.0 * LINE_HEIGHT);
    let page = normalize_wheel(raw(DeltaMode::Page));
    assert_eq!(page.pixel_x, PAGE_HEIGHT);
}

#[test]
fn pixel_mode_passes_deltas_through() {
    let d = normalize_wheel(RawWheel {
        delta_x: -4.5,
        delta_y: 37.0,
        mode: DeltaMode::Pixel,
    });
    assert_eq!(d, WheelDelta::pixels(-4.5, 37.0));
}

#[test]
fn drag_distance_is_start_minus_end() {
    let mut drag = DragTracker::default();
    drag.apply(PointerInput::Down(Vec2::new(100.0, 400.0)));
    drag.apply(PointerInput::Move(Vec2::new(60.0, 250.0)));
    assert_eq!(drag.distance(), Vec2::new(40.0, 150.0));

    drag.apply(PointerInput::Up(Vec2::new(50.0, 200.0)));
    assert!(!drag.is_down);
    assert_eq!(drag.distance(), Vec2::new(50.0, 200.0));
}

#[test]
fn page_drags_only_on_touch_primary_devices() {
    let mut drag = DragTracker::default();
    drag.down(Vec2::new(0.0, 300.0));
    drag.moved(Vec2::new(0.0, 200.0));

    assert_eq!(page_drag_distance(DeviceContext::default(), &drag), None);
    let touch = DeviceContext {
        touch_primary: true,
    };
    assert_eq!(
        page_drag_distance(touch, &drag),
        Some(100.0 * TOUCH_DRAG_MULTIPLIER)
    );
}
