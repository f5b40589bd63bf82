/// Frame metadata - carries frame number and timing info
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    pub number: u64,
    pub time: f32,
    pub delta: f32,
}

impl FrameInfo {
    pub fn new(number: u64, time: f32, delta: f32) -> Self {
        Self {
            number,
            time,
            delta,
        }
    }
}

/// Finite iterator of evenly spaced frames, for replay and tests
/// Use this in a loop: `for frame in FixedFrames::new(dt, n) { ... }`
#[derive(Debug, Clone)]
pub struct FixedFrames {
    delta: f32,
    count: u64,
    frame_number: u64,
}

impl FixedFrames {
    pub fn new(delta: f32, count: u64) -> Self {
        Self {
            delta,
            count,
            frame_number: 0,
        }
    }

    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }
}

impl Iterator for FixedFrames {
    type Item = FrameInfo;

    fn next(&mut self) -> Option<FrameInfo> {
        if self.frame_number >= self.count {
            return None;
        }
        // Multiply rather than accumulate so long runs do not drift
        let info = FrameInfo::new(
            self.frame_number,
            self.frame_number as f32 * self.delta,
            self.delta,
        );
        self.frame_number += 1;
        Some(info)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.count - self.frame_number).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}
