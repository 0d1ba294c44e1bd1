//! One-second repeating timer for the event loop.
//!
//! The ticker is armed only while the engine is running. Disarming drops the
//! deadline, so there is never more than one pending timer.

use std::time::{Duration, Instant};

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
pub struct Ticker {
    period: Duration,
    next: Option<Instant>,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self { period, next: None }
    }

    pub fn is_armed(&self) -> bool {
        self.next.is_some()
    }

    /// Arm on the first transition to running, disarm whenever not running.
    /// Re-arming while already armed keeps the existing deadline.
    pub fn set_running(&mut self, running: bool, now: Instant) {
        match (running, self.next) {
            (true, None) => self.next = Some(now + self.period),
            (true, Some(_)) => {}
            (false, _) => self.next = None,
        }
    }

    /// Time left before the next tick, `None` when disarmed.
    pub fn timeout(&self, now: Instant) -> Option<Duration> {
        self.next.map(|next| next.saturating_duration_since(now))
    }

    /// Number of ticks that came due by `now`. Reschedules the next deadline.
    pub fn fire(&mut self, now: Instant) -> u32 {
        let Some(next) = self.next else {
            return 0;
        };
        if now < next {
            return 0;
        }
        let behind = now.duration_since(next);
        let due = 1 + (behind.as_nanos() / self.period.as_nanos().max(1)) as u32;
        self.next = Some(next + self.period * due);
        due
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new(TICK_PERIOD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disarmed_ticker_never_fires() {
        let mut ticker = Ticker::default();
        let now = Instant::now();
        assert_eq!(ticker.timeout(now), None);
        assert_eq!(ticker.fire(now + Duration::from_secs(10)), 0);
    }

    #[test]
    fn fires_once_per_period() {
        let mut ticker = Ticker::default();
        let start = Instant::now();
        ticker.set_running(true, start);
        assert_eq!(ticker.fire(start + Duration::from_millis(500)), 0);
        assert_eq!(ticker.timeout(start + Duration::from_millis(500)), Some(Duration::from_millis(500)));
        assert_eq!(ticker.fire(start + Duration::from_secs(1)), 1);
        assert_eq!(ticker.fire(start + Duration::from_millis(1500)), 0);
        assert_eq!(ticker.fire(start + Duration::from_secs(2)), 1);
    }

    #[test]
    fn catches_up_after_stall() {
        let mut ticker = Ticker::default();
        let start = Instant::now();
        ticker.set_running(true, start);
        assert_eq!(ticker.fire(start + Duration::from_millis(3500)), 3);
        assert_eq!(ticker.fire(start + Duration::from_secs(4)), 1);
    }

    #[test]
    fn rearming_keeps_deadline_and_stopping_clears_it() {
        let mut ticker = Ticker::default();
        let start = Instant::now();
        ticker.set_running(true, start);
        ticker.set_running(true, start + Duration::from_millis(900));
        assert_eq!(ticker.fire(start + Duration::from_secs(1)), 1);

        ticker.set_running(false, start);
        assert!(!ticker.is_armed());
        assert_eq!(ticker.fire(start + Duration::from_secs(5)), 0);
    }
}
