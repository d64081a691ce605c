use std::time::Duration;

/// Converts elapsed real time into a whole number of simulation ticks.
///
/// Fractions of a tick carry over to the next call, so the long-run tick
/// rate matches `ticks_per_second` whatever the frame rate is.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    tick: Duration,
    accumulated: Duration,
}

impl FixedTimestep {
    /// Clock ticking `ticks_per_second` times per second (at least once).
    pub fn new(ticks_per_second: u32) -> Self {
        Self {
            tick: Duration::from_secs(1) / ticks_per_second.max(1),
            accumulated: Duration::ZERO,
        }
    }

    /// Length of one tick.
    pub fn tick_duration(&self) -> Duration {
        self.tick
    }

    /// Add `elapsed` and return how many ticks are now due.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulated += elapsed;
        let mut ticks = 0;
        while self.accumulated >= self.tick {
            self.accumulated -= self.tick;
            ticks += 1;
        }
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carries_fractions_between_frames() {
        let mut clock = FixedTimestep::new(10);
        assert_eq!(clock.advance(Duration::from_millis(50)), 0);
        assert_eq!(clock.advance(Duration::from_millis(60)), 1);
        assert_eq!(clock.advance(Duration::from_millis(290)), 3);
    }

    #[test]
    fn long_frame_yields_many_ticks() {
        let mut clock = FixedTimestep::new(60);
        assert_eq!(clock.advance(Duration::from_secs(1)), 60);
    }
}
