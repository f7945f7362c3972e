//! Randomized request throttling.
//!
//! Every dispatched request is preceded by a random pause drawn uniformly
//! from `[min, max]`. LinkedIn flags accounts that fire requests at machine
//! speed; spacing calls out keeps long pagination runs under the radar.

use rand::Rng;
use std::thread;
use std::time::Duration;
use tracing::trace;

/// Bounds of the random pause taken before each request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evade {
    /// Shortest pause.
    pub min: Duration,
    /// Longest pause. A zero `max` disables the delay entirely.
    pub max: Duration,
}

impl Evade {
    /// Pause between `min` and `max` before each request.
    pub fn new(min: Duration, max: Duration) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// No delay at all.
    pub fn disabled() -> Self {
        Self {
            min: Duration::ZERO,
            max: Duration::ZERO,
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.max.is_zero()
    }

    /// Pick the next pause length.
    pub fn next_delay(&self) -> Duration {
        if self.is_disabled() {
            return Duration::ZERO;
        }
        // Fields are public, so the bounds may arrive reversed.
        let (a, b) = (duration_millis(self.min), duration_millis(self.max));
        Duration::from_millis(rand::rng().random_range(a.min(b)..=a.max(b)))
    }

    /// Sleep for a random duration within the bounds.
    pub fn pause(&self) {
        let delay = self.next_delay();
        if delay.is_zero() {
            return;
        }
        trace!(delay_ms = duration_millis(delay), "evasion delay");
        thread::sleep(delay);
    }
}

impl Default for Evade {
    fn default() -> Self {
        Self {
            min: Duration::from_secs(2),
            max: Duration::from_secs(10),
        }
    }
}

fn duration_millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_stays_within_bounds() {
        let evade = Evade::new(Duration::from_millis(5), Duration::from_millis(20));
        for _ in 0..100 {
            let d = evade.next_delay();
            assert!(d >= Duration::from_millis(5) && d <= Duration::from_millis(20));
        }
    }

    #[test]
    fn swapped_bounds_are_normalized() {
        let evade = Evade::new(Duration::from_secs(3), Duration::from_secs(1));
        assert_eq!(evade.min, Duration::from_secs(1));
        assert_eq!(evade.max, Duration::from_secs(3));
    }

    #[test]
    fn reversed_literal_bounds_still_sample() {
        let evade = Evade {
            min: Duration::from_millis(20),
            max: Duration::from_millis(5),
        };
        for _ in 0..100 {
            let d = evade.next_delay();
            assert!(d >= Duration::from_millis(5) && d <= Duration::from_millis(20));
        }
    }

    #[test]
    fn disabled_never_sleeps() {
        let evade = Evade::disabled();
        assert!(evade.is_disabled());
        assert_eq!(evade.next_delay(), Duration::ZERO);
    }

    #[test]
    fn default_is_two_to_ten_seconds() {
        let evade = Evade::default();
        assert_eq!(evade.min, Duration::from_secs(2));
        assert_eq!(evade.max, Duration::from_secs(10));
    }
}
