use super::input::Direction;
use super::timer::Repeating;

/// Turns a held direction button into a stream of steps.
///
/// The driver never moves anything itself: `start` and `tick` report how
/// many steps the owner should issue.
#[derive(Debug, Clone)]
pub struct PressDriver {
    interval: f32,
    /// Live repeat timer; `None` when no button is held
    active: Option<(Direction, Repeating)>,
}

impl PressDriver {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            active: None,
        }
    }

    /// Begin holding `direction`. Returns true when the owner should issue
    /// the immediate first step; a start while already held is a no-op.
    pub fn start(&mut self, direction: Direction) -> bool {
        if self.active.is_some() {
            return false;
        }
        self.active = Some((direction, Repeating::new(self.interval)));
        true
    }

    /// Cancel the repeat timer. Returns true if one was running.
    pub fn stop(&mut self) -> bool {
        self.active.take().is_some()
    }

    pub fn is_moving(&self) -> bool {
        self.active.is_some()
    }

    pub fn direction(&self) -> Option<Direction> {
        self.active.as_ref().map(|(direction, _)| *direction)
    }

    /// Advance the repeat timer; yields the held direction and how many
    /// repeat steps fell due this frame
    pub fn tick(&mut self, delta: f32) -> Option<(Direction, u32)> {
        let (direction, timer) = self.active.as_mut()?;
        let fires = timer.tick(delta);
        (fires > 0).then_some((*direction, fires))
    }
}
