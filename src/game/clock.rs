//! Simulated time.
//!
//! The simulation never reads the wall clock: time advances by exactly one
//! frame per tick, so cooldowns and time bonuses replay identically for the
//! same seed and input. Front ends pace ticks at the frame rate, which keeps
//! simulated seconds in step with real ones.

/// Monotonic frame counter measured in simulated seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameClock {
    /// Frames elapsed since the session started.
    frames: u64,
    /// Frames per simulated second.
    rate: u32,
}

impl FrameClock {
    /// Create a clock at time zero. A rate of zero is treated as one.
    #[must_use]
    pub const fn new(rate: u32) -> Self {
        Self {
            frames: 0,
            rate: if rate == 0 { 1 } else { rate },
        }
    }

    /// Advance by one frame.
    pub fn advance(&mut self) {
        self.frames += 1;
    }

    /// Frames elapsed.
    #[must_use]
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    /// Frames per second.
    #[must_use]
    pub const fn rate(&self) -> u32 {
        self.rate
    }

    /// Elapsed simulated seconds.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn seconds(&self) -> f64 {
        self.frames as f64 / f64::from(self.rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seconds() {
        let mut clock = FrameClock::new(30);
        assert!(clock.seconds().abs() < f64::EPSILON);
        for _ in 0..45 {
            clock.advance();
        }
        assert_eq!(clock.frames(), 45);
        assert!((clock.seconds() - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_zero_rate() {
        let mut clock = FrameClock::new(0);
        assert_eq!(clock.rate(), 1);
        clock.advance();
        assert!((clock.seconds() - 1.0).abs() < f64::EPSILON);
    }
}
