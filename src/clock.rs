use std::time::Duration;

/// Ticks reported by a single [`FrameClock::advance`] call. Anything beyond
/// this is dropped so a stalled host does not fast-forward the field.
pub const MAX_TICKS_PER_FRAME: u32 = 8;

/// Turns measured frame durations into a whole number of fixed-size ticks.
///
/// The particle integration has no delta time: one tick is one unit of
/// motion. Hosts that repaint faster or slower than the intended rate feed
/// their frame times through this clock to keep the apparent speed constant.
#[derive(Clone, Copy, Debug)]
pub struct FrameClock {
    step: Duration,
    accumulated: Duration,
}

impl FrameClock {
    pub fn new(ticks_per_second: f32) -> Self {
        Self {
            step: Duration::from_secs_f32(1.0 / ticks_per_second.max(1.0)),
            accumulated: Duration::ZERO,
        }
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    /// Add `elapsed` to the backlog and return how many ticks are due.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulated += elapsed;

        let mut ticks = 0;
        while self.accumulated >= self.step {
            self.accumulated -= self.step;
            ticks += 1;
            if ticks == MAX_TICKS_PER_FRAME {
                self.accumulated = Duration::ZERO;
                break;
            }
        }
        ticks
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(60.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_partial_frames() {
        let mut clock = FrameClock::new(100.0);
        assert_eq!(clock.advance(Duration::from_millis(6)), 0);
        assert_eq!(clock.advance(Duration::from_millis(6)), 1);
        assert_eq!(clock.advance(Duration::from_millis(25)), 2);
    }

    #[test]
    fn caps_ticks_after_a_stall() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.advance(Duration::from_secs(2)), MAX_TICKS_PER_FRAME);
        assert_eq!(clock.advance(Duration::ZERO), 0);
    }
}
