use crate::constants::FADE_SECONDS;

/// Linear opacity tween advanced by frame time.
#[derive(Clone, Copy, Debug)]
pub struct Fade {
    value: f32,
    from: f32,
    to: f32,
    elapsed: f32,
    running: bool,
}

impl Fade {
    pub fn hidden() -> Self {
        Self::at(0.0)
    }

    fn at(value: f32) -> Self {
        Self {
            value,
            from: value,
            to: value,
            elapsed: 0.0,
            running: false,
        }
    }

    /// Start tweening from the current value toward `to`.
    pub fn start(&mut self, to: f32) {
        self.from = self.value;
        self.to = to;
        self.elapsed = 0.0;
        self.running = true;
    }

    pub fn fade_in(&mut self) {
        self.start(1.0);
    }

    pub fn fade_out(&mut self) {
        self.start(0.0);
    }

    /// Advance by `dt` seconds. Returns true on the frame the tween finishes.
    pub fn advance(&mut self, dt: f32) -> bool {
        if !self.running {
            return false;
        }
        self.elapsed += dt.max(0.0);
        let t = (self.elapsed / FADE_SECONDS).min(1.0);
        self.value = self.from + (self.to - self.from) * t;
        if t >= 1.0 {
            self.value = self.to;
            self.running = false;
            return true;
        }
        false
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }
}
