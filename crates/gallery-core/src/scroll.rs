//! Damped per-axis scroll state.
//!
//! A `ScrollAxis` is plain data: input handlers push `target` around without
//! clamping, and once per frame `update` clamps the target to the axis range
//! and moves `current` a fixed fraction of the way toward it.

use crate::constants::{SCROLL_EPSILON, SCROLL_LERP};

/// Travel direction of the damped value since the previous frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    None,
    Positive,
    Negative,
}

impl Direction {
    /// Compare the previous damped value with the current one.
    /// Equal values keep the previous direction.
    #[inline]
    pub fn between(previous: f32, current: f32, fallback: Direction) -> Direction {
        if previous < current {
            Direction::Positive
        } else if previous > current {
            Direction::Negative
        } else {
            fallback
        }
    }
}

/// Range the target is clamped to before interpolation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollRange {
    /// `[0, limit]`, vertical page scroll.
    Forward,
    /// `[-limit, 0]`, horizontal galleries that translate leftwards.
    Reverse,
    /// No clamping, for infinite galleries.
    Unbounded,
}

#[derive(Clone, Debug)]
pub struct ScrollAxis {
    pub current: f32,
    pub target: f32,
    pub last: f32,
    pub limit: f32,
    pub lerp: f32,
    pub direction: Direction,
    pub range: ScrollRange,
}

impl Default for ScrollAxis {
    fn default() -> Self {
        Self::new(ScrollRange::Forward)
    }
}

impl ScrollAxis {
    pub fn new(range: ScrollRange) -> Self {
        Self {
            current: 0.0,
            target: 0.0,
            last: 0.0,
            limit: 0.0,
            lerp: SCROLL_LERP,
            direction: Direction::None,
            range,
        }
    }

    /// Accumulate a delta into the target. Clamping waits for `update`.
    #[inline]
    pub fn apply_delta(&mut self, delta: f32) {
        self.target += delta;
    }

    pub fn set_limit(&mut self, limit: f32) {
        self.limit = limit.max(0.0);
    }

    /// Back to rest at the origin, keeping limit and lerp.
    pub fn reset(&mut self) {
        self.current = 0.0;
        self.target = 0.0;
        self.last = 0.0;
        self.direction = Direction::None;
    }

    /// Bounds of the clamp range, if any.
    pub fn bounds(&self) -> Option<(f32, f32)> {
        match self.range {
            ScrollRange::Forward => Some((0.0, self.limit)),
            ScrollRange::Reverse => Some((-self.limit, 0.0)),
            ScrollRange::Unbounded => None,
        }
    }

    pub fn clamp_target(&mut self) {
        if let Some((lo, hi)) = self.bounds() {
            self.target = clamp(self.target, lo, hi);
        }
    }

    /// One frame: clamp, interpolate, snap, then record direction.
    pub fn update(&mut self) {
        self.clamp_target();
        self.last = self.current;
        self.current = lerp(self.current, self.target, self.lerp);

        if (self.target - self.current).abs() < SCROLL_EPSILON {
            self.current = self.target;
        }
        if self.range == ScrollRange::Forward && self.current < SCROLL_EPSILON {
            self.current = 0.0;
        }

        self.direction = Direction::between(self.last, self.current, self.direction);
    }

    /// True once `current` has reached `target` exactly.
    pub fn is_settled(&self) -> bool {
        self.current == self.target
    }
}

#[inline]
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

#[inline]
pub fn clamp(value: f32, lo: f32, hi: f32) -> f32 {
    value.max(lo).min(hi)
}

/// A damped scalar with no range, e.g. the drag "speed" fed to tile shaders.
#[derive(Clone, Copy, Debug)]
pub struct Damped {
    pub current: f32,
    pub target: f32,
    pub lerp: f32,
}

impl Damped {
    pub fn new(lerp: f32) -> Self {
        Self {
            current: 0.0,
            target: 0.0,
            lerp,
        }
    }

    pub fn update(&mut self) -> f32 {
        self.current = lerp(self.current, self.target, self.lerp);
        if (self.target - self.current).abs() < SCROLL_EPSILON {
            self.current = self.target;
        }
        self.current
    }
}
