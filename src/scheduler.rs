use std::time::{Duration, Instant};

/// Single repeating tick deadline, polled by the driver loop.
///
/// The driver polls [`TickScheduler::due`] between input reads; because the
/// loop is single threaded, at most one step is ever in flight. Rearming
/// replaces the interval and the deadline together, so no tick fires on both
/// the old and the new interval for the same moment.
#[derive(Debug, Clone)]
pub struct TickScheduler {
    interval: Duration,
    next_due: Option<Instant>,
}

impl TickScheduler {
    /// Creates a stopped scheduler with the given interval.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    /// Arms the scheduler; the first tick is due one interval after `now`.
    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now + self.interval);
    }

    /// Disarms the scheduler; [`TickScheduler::due`] stays false until the
    /// next start.
    pub fn stop(&mut self) {
        self.next_due = None;
    }

    /// Returns true when a tick is due, at most once per interval.
    ///
    /// Firing re-baselines the deadline from `now` rather than from the old
    /// deadline, so a stalled loop catches up with one tick instead of a
    /// burst.
    pub fn due(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(deadline) if now >= deadline => {
                self.next_due = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }

    /// Replaces the interval, rebasing the pending deadline onto `now` when
    /// the scheduler is armed.
    pub fn rearm(&mut self, interval: Duration, now: Instant) {
        self.interval = interval;
        if self.next_due.is_some() {
            self.next_due = Some(now + interval);
        }
    }

    /// Returns the currently configured interval.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns true while the scheduler is armed.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }
}
