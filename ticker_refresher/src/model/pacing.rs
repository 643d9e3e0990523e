//! Fixed-period pacing.
//!
//! The next fetch is due at `last_start + interval`. When a fetch overruns the
//! interval the next one starts immediately; missed periods are not made up.
//! An interval too large to add to an `Instant` has no wake time at all.

use std::time::{Duration, Instant};

/// Instant at which the next fetch is due, or `None` when it lies beyond what
/// `Instant` can represent.
pub fn next_wake(last_start: Instant, interval: Duration) -> Option<Instant> {
    last_start.checked_add(interval)
}

/// Time left until `next_wake(last_start, interval)`, zero when it has passed,
/// `None` when there is no representable wake time.
pub fn delay_until_next(last_start: Instant, interval: Duration, now: Instant) -> Option<Duration> {
    next_wake(last_start, interval).map(|wake| wake.saturating_duration_since(now))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sleeps_for_rest_of_interval() {
        let start = Instant::now();
        let now = start + Duration::from_secs(15);
        assert_eq!(
            delay_until_next(start, Duration::from_secs(60), now),
            Some(Duration::from_secs(45))
        );
    }

    #[test]
    fn overrun_gives_zero_delay() {
        let start = Instant::now();
        let interval = Duration::from_secs(60);
        assert_eq!(
            delay_until_next(start, interval, start + Duration::from_secs(60)),
            Some(Duration::ZERO)
        );
        assert_eq!(
            delay_until_next(start, interval, start + Duration::from_secs(90)),
            Some(Duration::ZERO)
        );
    }

    #[test]
    fn unrepresentable_interval_has_no_wake() {
        let start = Instant::now();
        assert_eq!(next_wake(start, Duration::MAX), None);
        assert_eq!(
            delay_until_next(start, Duration::from_secs(u64::MAX), start),
            None
        );
    }
}
