//! Rate limiting for high-frequency input

use std::time::{Duration, Instant};

/// Leading-edge throttle: the first call passes, calls within `interval` of
/// it are dropped
#[derive(Debug, Clone)]
pub struct Throttle {
    interval: Duration,
    last: Option<Instant>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self { interval, last: None }
    }

    /// Whether a call at `now` may run
    pub fn ready(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.saturating_duration_since(last) < self.interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }
}

/// Trailing-edge debounce: fires once, `delay` after the last schedule
#[derive(Debug, Clone)]
pub struct Debounce {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debounce {
    pub fn new(delay: Duration) -> Self {
        Self { delay, deadline: None }
    }

    /// (Re)start the countdown from `now`
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Drop a pending firing
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Returns `true` exactly once when the countdown has elapsed
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn throttle_passes_leading_call() {
        let start = Instant::now();
        let mut throttle = Throttle::new(150 * MS);
        assert!(throttle.ready(start));
        assert!(!throttle.ready(start + 100 * MS));
        assert!(!throttle.ready(start + 149 * MS));
        assert!(throttle.ready(start + 150 * MS));
    }

    #[test]
    fn debounce_fires_after_quiet_period() {
        let start = Instant::now();
        let mut debounce = Debounce::new(300 * MS);
        debounce.schedule(start);
        debounce.schedule(start + 200 * MS);

        assert!(!debounce.fire_if_due(start + 300 * MS));
        assert!(debounce.fire_if_due(start + 500 * MS));
        assert!(!debounce.fire_if_due(start + 900 * MS));
    }

    #[test]
    fn cancelled_debounce_never_fires() {
        let start = Instant::now();
        let mut debounce = Debounce::new(300 * MS);
        debounce.schedule(start);
        debounce.cancel();
        assert!(!debounce.fire_if_due(start + 1000 * MS));
    }
}
