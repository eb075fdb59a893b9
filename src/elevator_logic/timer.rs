//! Deadline timer for the timed actions of the car (floor transit, doors held open).

use tokio::time::{Duration, Instant};

/// Roughly 30 years
const FAR_FUTURE_SECS: u64 = 86400 * 365 * 30;

/// A one-shot timer that remembers when it was started.
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    timer_active: bool,
    timeout_duration: Duration,
    start_time: Instant,
}

impl Timer {
    /// A stopped timer that will time out `timeout_duration` after each start
    pub fn new(timeout_duration: Duration) -> Timer {
        Timer {
            timer_active: false,
            timeout_duration,
            start_time: Instant::now(),
        }
    }

    /// (Re)starts the timer from now
    pub fn timer_start(&mut self) {
        self.timer_active = true;
        self.start_time = Instant::now();
    }

    /// Stops the timer, it will not report a timeout until started again
    pub fn timer_stop(&mut self) {
        self.timer_active = false;
    }

    /// The instant the current run times out
    pub fn deadline(&self) -> Instant {
        // a duration past what Instant can hold is as good as never
        self.start_time
            .checked_add(self.timeout_duration)
            .unwrap_or_else(|| self.start_time + Duration::from_secs(FAR_FUTURE_SECS))
    }

    /// True if the timer is running and its duration has passed
    pub fn timer_timeouted(&self) -> bool {
        self.timer_active && Instant::now() >= self.deadline()
    }
}
