//! Owned timers driven by frame deltas.
//! Nothing fires on its own: the owner advances each timer from `tick`, and
//! dropping or cancelling a timer is all it takes to stop it.

/// One-shot countdown, used for debouncing
#[derive(Debug, Clone, Copy)]
pub struct Countdown {
    duration: f32,
    elapsed: f32,
    active: bool,
}

impl Countdown {
    /// Create inactive countdown
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            elapsed: 0.0,
            active: false,
        }
    }

    /// Start countdown
    pub fn start(&mut self) {
        self.elapsed = 0.0;
        self.active = true;
    }

    /// Replace any pending countdown with a fresh one of a new length
    pub fn restart(&mut self, duration: f32) {
        self.duration = duration;
        self.start();
    }

    pub fn cancel(&mut self) {
        self.active = false;
        self.elapsed = 0.0;
    }

    /// Tick with delta, returns true if completed
    pub fn tick(&mut self, delta: f32) -> bool {
        if !self.active {
            return false;
        }

        self.elapsed += delta;

        if self.elapsed >= self.duration {
            self.active = false;
            true
        } else {
            false
        }
    }

    /// Get progress [0, 1]
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).min(1.0)
    }
}

/// Repeating interval timer
#[derive(Debug, Clone, Copy)]
pub struct Repeating {
    interval: f32,
    accumulator: f32,
}

impl Repeating {
    /// Upper bound on fires per tick so a long stall cannot flood the owner
    pub const MAX_FIRES_PER_TICK: u32 = 8;

    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            accumulator: 0.0,
        }
    }

    pub fn interval(&self) -> f32 {
        self.interval
    }

    /// Advance by delta, returns how many intervals elapsed
    pub fn tick(&mut self, delta: f32) -> u32 {
        self.accumulator += delta;

        let mut fires = 0;
        while self.accumulator >= self.interval && fires < Self::MAX_FIRES_PER_TICK {
            self.accumulator -= self.interval;
            fires += 1;
        }
        if fires == Self::MAX_FIRES_PER_TICK {
            self.accumulator = self.accumulator.min(self.interval);
        }
        fires
    }
}

/// Minimum interval between accepted events
#[derive(Debug, Clone, Copy)]
pub struct Throttled {
    min_interval: f32,
    time_since_last: f32,
}

impl Throttled {
    /// Create throttled timer with minimum interval
    pub fn new(min_interval: f32) -> Self {
        Self {
            min_interval,
            time_since_last: min_interval, // Allow immediate first fire
        }
    }

    pub fn advance(&mut self, delta: f32) {
        self.time_since_last += delta;
    }

    /// Accept the event if enough time has passed since the last one
    pub fn try_fire(&mut self) -> bool {
        if self.time_since_last >= self.min_interval {
            self.time_since_last = 0.0;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countdown_fires_once() {
        let mut timer = Countdown::new(1.0);

        assert!(!timer.tick(0.5)); // Inactive

        timer.start();
        assert!(!timer.tick(0.5)); // In progress
        assert_eq!(timer.progress(), 0.5);

        assert!(timer.tick(0.6)); // Complete
        assert!(!timer.tick(0.1)); // Inactive again
    }

    #[test]
    fn countdown_restart_rearms_with_new_duration() {
        let mut timer = Countdown::new(0.2);
        timer.start();
        assert!(!timer.tick(0.15));

        timer.restart(0.15);
        assert!(!timer.tick(0.1)); // Elapsed was reset
        assert!(timer.tick(0.06));
    }

    #[test]
    fn countdown_cancel_never_fires() {
        let mut timer = Countdown::new(0.2);
        timer.start();
        timer.cancel();

        assert!(!timer.tick(1.0));
        assert_eq!(timer.progress(), 0.0);
    }

    #[test]
    fn repeating_counts_whole_intervals() {
        let mut timer = Repeating::new(0.25);

        assert_eq!(timer.tick(0.1), 0);
        assert_eq!(timer.tick(0.15), 1);
        assert_eq!(timer.tick(0.5), 2);
        assert_eq!(timer.tick(0.2), 0); // Remainder carried, not reset
    }

    #[test]
    fn repeating_caps_fires_after_stall() {
        let mut timer = Repeating::new(0.1);
        assert_eq!(timer.tick(10.0), Repeating::MAX_FIRES_PER_TICK);
        // Backlog is dropped rather than replayed
        assert!(timer.tick(0.0) <= 1);
    }

    #[test]
    fn throttled_enforces_minimum() {
        let mut timer = Throttled::new(0.1);

        assert!(timer.try_fire()); // First fire immediate
        timer.advance(0.05);
        assert!(!timer.try_fire()); // Too soon
        timer.advance(0.06);
        assert!(timer.try_fire()); // Enough time
    }
}
