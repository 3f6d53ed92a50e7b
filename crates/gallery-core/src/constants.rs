// Shared scroll, camera and scene tuning constants.

// Damped scroll
pub const SCROLL_LERP: f32 = 0.1; // fraction of the remaining distance covered per frame
pub const SCROLL_EPSILON: f32 = 0.01; // below this the axis snaps to rest
pub const SPEED_LERP: f32 = 0.1; // drag "speed" scalar easing

// Input normalisation (wheel units -> pixels)
pub const LINE_HEIGHT: f32 = 40.0;
pub const PAGE_HEIGHT: f32 = 800.0;

// Touch drags feel slower than wheel deltas; scale them up on touch-primary devices.
pub const TOUCH_DRAG_MULTIPLIER: f32 = 3.0;

// Arrow keys nudge the page scroll target by this many pixels
pub const KEYBOARD_SCROLL_STEP: f32 = 100.0;

// Camera
pub const CAMERA_FOV_DEG: f32 = 45.0;
pub const CAMERA_Z: f32 = 5.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 100.0;

// Infinite gallery
pub const WRAP_MARGIN: f32 = 0.6; // fraction of the viewport a tile may travel before wrapping
pub const WRAP_JITTER_RAD: f32 = std::f32::consts::PI * 0.03;

// Collections title track moves by this many percent per collection
pub const TITLE_TRACK_STEP_PERCENT: f32 = 25.0;

// Show/hide fades (seconds)
pub const FADE_SECONDS: f32 = 0.5;

// Tile plane tessellation
pub const PLANE_SEGMENTS: u32 = 20;
