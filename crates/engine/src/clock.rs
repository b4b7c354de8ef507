//! Pause-aware elapsed-time clock

use std::time::Duration;

use tokio::time::Instant;

/// Wall time since start minus the total time spent paused
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionClock {
    started_at: Option<Instant>,
    paused_at: Option<Instant>,
    paused_total: Duration,
}

impl SessionClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// (Re)start from zero at `now`
    pub fn start(&mut self, now: Instant) {
        self.started_at = Some(now);
        self.paused_at = None;
        self.paused_total = Duration::ZERO;
    }

    /// Freeze the clock; false if not running
    pub fn pause(&mut self, now: Instant) -> bool {
        if self.started_at.is_none() || self.paused_at.is_some() {
            return false;
        }
        self.paused_at = Some(now);
        true
    }

    /// Unfreeze the clock, adding the paused interval to the running offset
    pub fn resume(&mut self, now: Instant) -> bool {
        match self.paused_at.take() {
            Some(paused_at) => {
                self.paused_total += now.saturating_duration_since(paused_at);
                true
            }
            None => false,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    pub fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        let Some(started_at) = self.started_at else {
            return Duration::ZERO;
        };
        let end = self.paused_at.unwrap_or(now);
        end.saturating_duration_since(started_at)
            .saturating_sub(self.paused_total)
    }

    pub fn elapsed_ms(&self, now: Instant) -> u64 {
        self.elapsed(now).as_millis() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_unstarted_clock_is_zero() {
        let clock = SessionClock::new();
        assert_eq!(clock.elapsed(Instant::now()), Duration::ZERO);
    }

    #[test]
    fn test_elapsed_runs_from_start() {
        let t0 = Instant::now();
        let mut clock = SessionClock::new();
        clock.start(t0);
        assert_eq!(clock.elapsed_ms(t0 + ms(1500)), 1500);
    }

    #[test]
    fn test_pause_freezes_and_resume_compensates() {
        let t0 = Instant::now();
        let mut clock = SessionClock::new();
        clock.start(t0);

        assert!(clock.pause(t0 + ms(1000)));
        assert!(!clock.pause(t0 + ms(1100)));
        assert_eq!(clock.elapsed_ms(t0 + ms(5000)), 1000);

        assert!(clock.resume(t0 + ms(5000)));
        assert!(!clock.resume(t0 + ms(5000)));
        assert_eq!(clock.elapsed_ms(t0 + ms(5000)), 1000);
        assert_eq!(clock.elapsed_ms(t0 + ms(5250)), 1250);

        // A second pause accumulates on top of the first
        clock.pause(t0 + ms(6000));
        clock.resume(t0 + ms(7000));
        assert_eq!(clock.elapsed_ms(t0 + ms(8000)), 3000);
    }

    #[test]
    fn test_restart_clears_pauses() {
        let t0 = Instant::now();
        let mut clock = SessionClock::new();
        clock.start(t0);
        clock.pause(t0 + ms(100));

        clock.start(t0 + ms(200));
        assert!(!clock.is_paused());
        assert_eq!(clock.elapsed_ms(t0 + ms(300)), 100);
    }
}
