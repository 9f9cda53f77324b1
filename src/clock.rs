//! Twin-clock animation.
//!
//! The host loop calls [`ClockAnimator::tick`] once per timer interval. The
//! moving clock shows its own proper time; the observer clock shows the
//! same interval as dilated by the current velocity.

use std::time::Duration;

use crate::relativity::RelativityError;
use crate::relativity::special::time_dilation;

/// A full revolution of the hand takes this many seconds.
const DIAL_SECONDS: f64 = 12.0;
const DEGREES_PER_SECOND: f64 = 360.0 / DIAL_SECONDS;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClockReading {
    pub seconds: f64,
    /// Clockwise from twelve o'clock.
    pub hand_degrees: f64,
}

impl ClockReading {
    fn new(seconds: f64) -> Self {
        Self {
            seconds,
            hand_degrees: (seconds % DIAL_SECONDS) * DEGREES_PER_SECOND,
        }
    }

    /// Tip of a hand of the given length, with y pointing up.
    pub fn hand_tip(&self, length: f64) -> (f64, f64) {
        let radians = self.hand_degrees.to_radians();
        (length * radians.sin(), length * radians.cos())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClockPair {
    /// Aboard the moving object.
    pub proper: ClockReading,
    /// Seen by the stationary observer.
    pub dilated: ClockReading,
}

#[derive(Debug, Clone)]
pub struct ClockAnimator {
    proper_elapsed: f64,
    step: f64,
}

impl ClockAnimator {
    pub fn new(tick: Duration) -> Self {
        Self {
            proper_elapsed: 0.0,
            step: tick.as_secs_f64(),
        }
    }

    pub fn tick(&mut self) {
        self.proper_elapsed += self.step;
    }

    pub fn reset(&mut self) {
        self.proper_elapsed = 0.0;
    }

    pub fn proper_elapsed(&self) -> f64 {
        self.proper_elapsed
    }

    pub fn readings(&self, beta: f64) -> Result<ClockPair, RelativityError> {
        Ok(ClockPair {
            proper: ClockReading::new(self.proper_elapsed),
            dilated: ClockReading::new(time_dilation(self.proper_elapsed, beta)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_advance_proper_time() {
        let mut clock = ClockAnimator::new(Duration::from_millis(500));
        for _ in 0..4 {
            clock.tick();
        }
        assert_eq!(clock.proper_elapsed(), 2.0);

        let pair = clock.readings(0.0).unwrap();
        assert_eq!(pair.proper, pair.dilated);
        assert_eq!(pair.proper.hand_degrees, 60.0);
    }

    #[test]
    fn observer_clock_runs_fast_by_gamma() {
        let mut clock = ClockAnimator::new(Duration::from_secs(1));
        clock.tick();
        let pair = clock.readings(0.6).unwrap();
        assert!((pair.dilated.seconds - 1.25).abs() < 1e-12);
        assert!((pair.dilated.hand_degrees - 37.5).abs() < 1e-9);
    }

    #[test]
    fn hand_wraps_every_twelve_seconds() {
        let mut clock = ClockAnimator::new(Duration::from_secs(1));
        for _ in 0..15 {
            clock.tick();
        }
        let pair = clock.readings(0.0).unwrap();
        assert_eq!(pair.proper.seconds, 15.0);
        assert_eq!(pair.proper.hand_degrees, 90.0);

        let (x, y) = pair.proper.hand_tip(1.0);
        assert!((x - 1.0).abs() < 1e-12);
        assert!(y.abs() < 1e-12);
    }

    #[test]
    fn reset_and_invalid_velocity() {
        let mut clock = ClockAnimator::new(Duration::from_millis(50));
        clock.tick();
        clock.reset();
        assert_eq!(clock.proper_elapsed(), 0.0);
        assert!(clock.readings(1.0).unwrap_err().is_domain());
    }
}
