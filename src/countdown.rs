use std::time::Duration;

/// One-second ticker driven by frame time.
///
/// Armed with a display duration, it ticks once per elapsed second and
/// expires after `ceil(duration / 1s)` ticks (at least one).
#[derive(Debug, Clone, PartialEq)]
pub struct Countdown {
    remaining_secs: u64,
    elapsed: f32,
}

impl Countdown {
    pub fn arm(duration: Duration) -> Self {
        let secs = duration.as_millis().div_ceil(1000).max(1) as u64;
        Self { remaining_secs: secs, elapsed: 0.0 }
    }

    /// Feeds `dt` seconds of frame time and returns how many ticks fired.
    pub fn advance(&mut self, dt: f32) -> u32 {
        if self.is_expired() {
            return 0;
        }
        self.elapsed += dt.max(0.0);

        let mut ticks = 0;
        while self.elapsed >= 1.0 && self.remaining_secs > 0 {
            self.elapsed -= 1.0;
            self.remaining_secs -= 1;
            ticks += 1;
        }
        ticks
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_secs == 0
    }
}
