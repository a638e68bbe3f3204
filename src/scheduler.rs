//! Fixed-interval tick scheduling.
//!
//! The frame callback runs at whatever rate the windowing system allows.
//! [`TickScheduler`] turns the real time between frames into a whole number
//! of fixed simulation ticks, so the simulation cadence stays ~60 Hz no
//! matter how often the UI repaints.

use std::time::{Duration, Instant};

/// Upper bound on ticks run in a single frame; older backlog is dropped.
pub const MAX_CATCH_UP_TICKS: u32 = 4;

#[derive(Debug)]
pub struct TickScheduler {
    interval: Duration,
    /// Frame time of the previous poll, `None` after a reset.
    last: Option<Instant>,
    /// Time accumulated but not yet spent on ticks.
    backlog: Duration,
}

impl TickScheduler {
    pub fn new(interval: Duration) -> Self {
        debug_assert!(!interval.is_zero(), "tick interval must be non-zero");
        Self {
            interval,
            last: None,
            backlog: Duration::ZERO,
        }
    }

    /// Number of ticks due at `now`.
    ///
    /// The first poll after construction or [`reset`](Self::reset) only
    /// anchors the clock and returns 0.
    pub fn due_ticks(&mut self, now: Instant) -> u32 {
        let Some(last) = self.last.replace(now) else {
            return 0;
        };

        self.backlog += now.saturating_duration_since(last);

        let mut ticks = 0;
        while self.backlog >= self.interval && ticks < MAX_CATCH_UP_TICKS {
            self.backlog -= self.interval;
            ticks += 1;
        }
        if self.backlog >= self.interval {
            // too far behind, skip the rest instead of spiralling
            self.backlog = Duration::ZERO;
        }
        ticks
    }

    /// How long until the next tick is due.
    pub fn until_next(&self) -> Duration {
        self.interval.saturating_sub(self.backlog)
    }

    /// Forgets the clock anchor and any backlog.
    pub fn reset(&mut self) {
        self.last = None;
        self.backlog = Duration::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn first_poll_only_anchors() {
        let mut s = TickScheduler::new(16 * MS);
        assert_eq!(s.due_ticks(Instant::now()), 0);
    }

    #[test]
    fn ticks_follow_interval() {
        let mut s = TickScheduler::new(16 * MS);
        let t0 = Instant::now();
        s.due_ticks(t0);
        assert_eq!(s.due_ticks(t0 + 10 * MS), 0);
        assert_eq!(s.due_ticks(t0 + 16 * MS), 1);
        assert_eq!(s.due_ticks(t0 + 48 * MS), 2);
        assert_eq!(s.until_next(), 16 * MS);
        assert_eq!(s.due_ticks(t0 + 60 * MS), 0);
        assert_eq!(s.until_next(), 4 * MS);
    }

    #[test]
    fn catch_up_is_capped() {
        let mut s = TickScheduler::new(16 * MS);
        let t0 = Instant::now();
        s.due_ticks(t0);
        assert_eq!(s.due_ticks(t0 + 1000 * MS), MAX_CATCH_UP_TICKS);
        // the dropped backlog does not come back later
        assert_eq!(s.due_ticks(t0 + 1001 * MS), 0);
    }

    #[test]
    fn reset_discards_backlog() {
        let mut s = TickScheduler::new(16 * MS);
        let t0 = Instant::now();
        s.due_ticks(t0);
        s.due_ticks(t0 + 10 * MS);
        s.reset();
        assert_eq!(s.due_ticks(t0 + 500 * MS), 0);
        assert_eq!(s.due_ticks(t0 + 510 * MS), 0);
        assert_eq!(s.due_ticks(t0 + 516 * MS), 1);
    }
}
