//! Scroll-check throttling.
//!
//! Rapid scrolling can deliver hundreds of notifications per second; the
//! throttle bounds scroll-check execution to at most one run per window,
//! with two guarantees:
//!
//! - **Leading edge**: the first event of a burst runs immediately, so a
//!   short visit that scrolls once is never silenced.
//! - **Trailing call**: if events keep arriving inside the window, one more
//!   run is owed once the window elapses, so the final resting position is
//!   always evaluated.
//!
//! The throttle is driven by explicit timestamps rather than an internal
//! clock, which keeps it deterministic under test. Callers with real-time
//! needs poll [`Throttle::deadline`] to learn when the trailing run is due.

use std::time::{Duration, Instant};

/// Rate limiter with leading-edge execution and a trailing-call guarantee.
#[derive(Debug)]
pub struct Throttle {
    wait: Duration,
    last_run: Option<Instant>,
    pending: bool,
}

impl Throttle {
    /// Create a throttle with the given minimum spacing between runs.
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            last_run: None,
            pending: false,
        }
    }

    /// Ask whether an event arriving at `now` may run immediately.
    ///
    /// Returns `true` for the first event ever seen and for any event
    /// arriving a full window after the previous run. Otherwise the event
    /// is absorbed and a trailing run becomes owed.
    pub fn allow(&mut self, now: Instant) -> bool {
        match self.last_run {
            None => {
                self.last_run = Some(now);
                self.pending = false;
                true
            }
            Some(last) if now.saturating_duration_since(last) >= self.wait => {
                self.last_run = Some(now);
                self.pending = false;
                true
            }
            Some(_) => {
                self.pending = true;
                false
            }
        }
    }

    /// Ask whether the owed trailing run is due at `now`.
    ///
    /// Returns `true` at most once per absorbed burst, and only after a full
    /// window has elapsed since the last run.
    pub fn trailing_ready(&mut self, now: Instant) -> bool {
        if !self.pending {
            return false;
        }
        match self.last_run {
            Some(last) if now.saturating_duration_since(last) >= self.wait => {
                self.last_run = Some(now);
                self.pending = false;
                true
            }
            _ => false,
        }
    }

    /// When the owed trailing run becomes due, if one is owed.
    pub fn deadline(&self) -> Option<Instant> {
        if self.pending {
            self.last_run.map(|last| last + self.wait)
        } else {
            None
        }
    }

    /// Forget all history; the next event runs immediately.
    pub fn reset(&mut self) {
        self.last_run = None;
        self.pending = false;
    }

    /// The configured window.
    pub fn wait(&self) -> Duration {
        self.wait
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WAIT: Duration = Duration::from_millis(500);

    #[test]
    fn test_first_event_runs_immediately() {
        let mut throttle = Throttle::new(WAIT);
        assert!(throttle.allow(Instant::now()));
    }

    #[test]
    fn test_events_inside_window_are_absorbed() {
        let mut throttle = Throttle::new(WAIT);
        let start = Instant::now();

        assert!(throttle.allow(start));
        assert!(!throttle.allow(start + Duration::from_millis(10)));
        assert!(!throttle.allow(start + Duration::from_millis(100)));
        assert!(!throttle.allow(start + Duration::from_millis(499)));
    }

    #[test]
    fn test_event_after_window_runs() {
        let mut throttle = Throttle::new(WAIT);
        let start = Instant::now();

        assert!(throttle.allow(start));
        assert!(throttle.allow(start + WAIT));
    }

    #[test]
    fn test_trailing_run_owed_after_absorbed_burst() {
        let mut throttle = Throttle::new(WAIT);
        let start = Instant::now();

        assert!(throttle.allow(start));
        assert!(!throttle.allow(start + Duration::from_millis(50)));

        // Not due until the window elapses.
        assert!(!throttle.trailing_ready(start + Duration::from_millis(499)));
        assert!(throttle.trailing_ready(start + WAIT));

        // Owed at most once.
        assert!(!throttle.trailing_ready(start + WAIT + Duration::from_millis(1)));
    }

    #[test]
    fn test_no_trailing_without_absorbed_events() {
        let mut throttle = Throttle::new(WAIT);
        let start = Instant::now();

        assert!(throttle.allow(start));
        assert!(!throttle.trailing_ready(start + WAIT));
        assert_eq!(throttle.deadline(), None);
    }

    #[test]
    fn test_deadline_tracks_pending_burst() {
        let mut throttle = Throttle::new(WAIT);
        let start = Instant::now();

        assert_eq!(throttle.deadline(), None);

        throttle.allow(start);
        throttle.allow(start + Duration::from_millis(10));

        assert_eq!(throttle.deadline(), Some(start + WAIT));
    }

    #[test]
    fn test_trailing_run_restarts_window() {
        let mut throttle = Throttle::new(WAIT);
        let start = Instant::now();

        throttle.allow(start);
        throttle.allow(start + Duration::from_millis(10));
        assert!(throttle.trailing_ready(start + WAIT));

        // A new event right after the trailing run is inside the new window.
        assert!(!throttle.allow(start + WAIT + Duration::from_millis(10)));
    }

    #[test]
    fn test_reset_forgets_history() {
        let mut throttle = Throttle::new(WAIT);
        let start = Instant::now();

        throttle.allow(start);
        throttle.allow(start + Duration::from_millis(10));

        throttle.reset();
        assert_eq!(throttle.deadline(), None);
        assert!(throttle.allow(start + Duration::from_millis(20)));
    }

    #[test]
    fn test_burst_of_fifty_yields_leading_plus_trailing() {
        let mut throttle = Throttle::new(WAIT);
        let start = Instant::now();

        let mut runs = 0;
        for i in 0..50 {
            if throttle.allow(start + Duration::from_millis(i * 2)) {
                runs += 1;
            }
        }
        assert_eq!(runs, 1, "only the leading event runs inside the window");

        assert!(throttle.trailing_ready(start + WAIT + Duration::from_millis(1)));
    }
}
