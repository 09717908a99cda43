//! One-shot countdown, polled once per tick.
//!
//! No coroutines, no scheduling machinery: a countdown is a duration plus
//! accumulated elapsed time. The owner calls `tick` every frame and reacts
//! on the single tick where it reports expiry. There is deliberately no
//! manual cancel — a countdown deactivates only by running out, matching
//! the behaviour the rest of the player logic is built around.

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Countdown {
    duration: Duration,
    elapsed: Duration,
    active: bool,
}

impl Countdown {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            elapsed: Duration::ZERO,
            active: false,
        }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    /// Arm the countdown, restarting it if it was already running.
    pub fn activate(&mut self) {
        self.elapsed = Duration::ZERO;
        self.active = true;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Advance by `delta`. Returns true exactly once per activation, on the
    /// tick the accumulated time reaches the duration; the countdown then
    /// deactivates itself.
    pub fn tick(&mut self, delta: Duration) -> bool {
        if !self.active {
            return false;
        }
        self.elapsed += delta;
        if self.elapsed >= self.duration {
            self.active = false;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inactive_until_activated() {
        let mut cd = Countdown::from_millis(100);
        assert!(!cd.is_active());
        assert!(!cd.tick(Duration::from_millis(500)));
    }

    #[test]
    fn test_fires_once_then_deactivates() {
        let mut cd = Countdown::from_millis(100);
        cd.activate();
        assert!(cd.is_active());
        assert!(!cd.tick(Duration::from_millis(60)));
        assert!(cd.tick(Duration::from_millis(60)));
        assert!(!cd.is_active());
        // Further ticks never fire again without re-activation.
        assert!(!cd.tick(Duration::from_millis(500)));
    }

    #[test]
    fn test_fires_exactly_at_duration() {
        let mut cd = Countdown::from_millis(100);
        cd.activate();
        assert!(cd.tick(Duration::from_millis(100)));
    }

    #[test]
    fn test_reactivation_restarts_from_zero() {
        let mut cd = Countdown::from_millis(100);
        cd.activate();
        assert!(!cd.tick(Duration::from_millis(90)));
        cd.activate();
        assert!(!cd.tick(Duration::from_millis(90)));
        assert!(cd.tick(Duration::from_millis(10)));
    }

    #[test]
    fn test_zero_duration_fires_on_first_tick() {
        let mut cd = Countdown::new(Duration::ZERO);
        cd.activate();
        assert!(cd.tick(Duration::ZERO));
        assert!(!cd.is_active());
    }
}
