use std::time::Instant;

/// Minimal frame clock - tracks delta time between redraws
#[derive(Debug)]
pub struct Clock {
    last_tick: Instant,
    /// Longest delta ever reported; a stalled window must not teleport the camera
    max_delta: f32,
}

impl Clock {
    pub fn new(max_delta: f32) -> Self {
        Self {
            last_tick: Instant::now(),
            max_delta,
        }
    }

    /// Seconds since the last tick, capped at `max_delta`
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let delta = now.duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;
        delta.min(self.max_delta)
    }

    /// Restart timing from now, e.g. after the render context comes back
    pub fn reset(&mut self) {
        self.last_tick = Instant::now();
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new(0.1)
    }
}
