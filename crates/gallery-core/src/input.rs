//! Input normalisation.
//!
//! Wheel events arrive in pixel, line or page units depending on the browser
//! and device; pointer drags arrive as absolute client positions. Everything
//! leaving this module is an axis-aligned pixel delta.

use crate::constants::{LINE_HEIGHT, PAGE_HEIGHT, TOUCH_DRAG_MULTIPLIER};
use glam::Vec2;

/// Explicit device facts computed once at startup and handed to whoever
/// needs them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DeviceContext {
    pub touch_primary: bool,
}

/// `WheelEvent.deltaMode`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DeltaMode {
    #[default]
    Pixel,
    Line,
    Page,
}

impl DeltaMode {
    pub fn from_dom(mode: u32) -> Self {
        match mode {
            1 => DeltaMode::Line,
            2 => DeltaMode::Page,
            _ => DeltaMode::Pixel,
        }
    }
}

/// Raw wheel sample as reported by the platform.
#[derive(Clone, Copy, Debug, Default)]
pub struct RawWheel {
    pub delta_x: f32,
    pub delta_y: f32,
    pub mode: DeltaMode,
}

/// Wheel delta with platform scaling removed.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WheelDelta {
    pub pixel_x: f32,
    pub pixel_y: f32,
}

impl WheelDelta {
    pub fn pixels(pixel_x: f32, pixel_y: f32) -> Self {
        Self { pixel_x, pixel_y }
    }
}

pub fn normalize_wheel(raw: RawWheel) -> WheelDelta {
    let scale = match raw.mode {
        DeltaMode::Pixel => 1.0,
        DeltaMode::Line => LINE_HEIGHT,
        DeltaMode::Page => PAGE_HEIGHT,
    };
    WheelDelta::pixels(raw.delta_x * scale, raw.delta_y * scale)
}

/// Unified pointer event (mouse or touch) in client pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerInput {
    Down(Vec2),
    Move(Vec2),
    Up(Vec2),
}

/// Start/end positions of the drag in progress.
///
/// `distance()` is `start - end`, so dragging content upwards (finger moving
/// up the screen) yields a positive vertical distance, the same sign as a
/// downward wheel.
#[derive(Clone, Copy, Debug, Default)]
pub struct DragTracker {
    pub start: Vec2,
    pub end: Vec2,
    pub is_down: bool,
}

impl DragTracker {
    pub fn down(&mut self, at: Vec2) {
        self.is_down = true;
        self.start = at;
        self.end = at;
    }

    /// Returns false when no drag is in progress.
    pub fn moved(&mut self, at: Vec2) -> bool {
        if !self.is_down {
            return false;
        }
        self.end = at;
        true
    }

    pub fn up(&mut self, at: Vec2) {
        self.is_down = false;
        self.end = at;
    }

    #[inline]
    pub fn distance(&self) -> Vec2 {
        self.start - self.end
    }

    pub fn apply(&mut self, input: PointerInput) {
        match input {
            PointerInput::Down(at) => self.down(at),
            PointerInput::Move(at) => {
                self.moved(at);
            }
            PointerInput::Up(at) => self.up(at),
        }
    }
}

/// Vertical drag distance scaled for the DOM page, or `None` when drags
/// should not scroll the page on this device.
#[inline]
pub fn page_drag_distance(device: DeviceContext, drag: &DragTracker) -> Option<f32> {
    device
        .touch_primary
        .then(|| drag.distance().y * TOUCH_DRAG_MULTIPLIER)
}
