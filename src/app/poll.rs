// Poll loop timing
//
// A Poller decides when a periodic job (record fetch, alert evaluation) is
// due. It is owned by AppState and checked from on_tick, so there are no
// free-floating timers: stopping the poller stops the job.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Poller {
    name: &'static str,
    interval: Duration,
    last_run: Option<Instant>,
    running: bool,
    forced: bool,
}

impl Poller {
    /// Create a stopped poller
    pub fn new(name: &'static str, interval: Duration) -> Self {
        Self {
            name,
            interval,
            last_run: None,
            running: false,
            forced: false,
        }
    }

    /// Start polling; the first check after starting is due immediately
    pub fn start(&mut self) {
        if !self.running {
            tracing::debug!(poller = self.name, interval_ms = self.interval.as_millis() as u64, "Poller started");
        }
        self.running = true;
        self.last_run = None;
    }

    /// Stop polling; `due` returns false until started again
    pub fn stop(&mut self) {
        if self.running {
            tracing::debug!(poller = self.name, "Poller stopped");
        }
        self.running = false;
        self.forced = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// Request a run on the next check regardless of the interval
    pub fn force(&mut self) {
        self.forced = true;
    }

    /// Whether the job should run at `now`
    pub fn due(&self, now: Instant) -> bool {
        if !self.running {
            return false;
        }
        if self.forced {
            return true;
        }
        match self.last_run {
            None => true,
            Some(last) => now.duration_since(last) >= self.interval,
        }
    }

    /// Record that the job ran at `now`
    pub fn mark_run(&mut self, now: Instant) {
        self.last_run = Some(now);
        self.forced = false;
    }

    /// Check and mark in one step; returns true when the job should run now
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.due(now) {
            self.mark_run(now);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopped_poller_never_due() {
        let mut poller = Poller::new("test", Duration::from_millis(10));
        let now = Instant::now();
        assert!(!poller.due(now));
        poller.force();
        assert!(!poller.due(now));
    }

    #[test]
    fn test_start_is_due_immediately() {
        let mut poller = Poller::new("test", Duration::from_secs(60));
        poller.start();
        let now = Instant::now();
        assert!(poller.poll(now));
        assert!(!poller.poll(now));
    }

    #[test]
    fn test_interval_elapses() {
        let mut poller = Poller::new("test", Duration::from_millis(100));
        poller.start();
        let t0 = Instant::now();
        assert!(poller.poll(t0));
        assert!(!poller.due(t0 + Duration::from_millis(99)));
        assert!(poller.due(t0 + Duration::from_millis(100)));
    }

    #[test]
    fn test_force_overrides_interval_once() {
        let mut poller = Poller::new("test", Duration::from_secs(60));
        poller.start();
        let t0 = Instant::now();
        poller.poll(t0);

        poller.force();
        assert!(poller.poll(t0));
        assert!(!poller.poll(t0));
    }

    #[test]
    fn test_stop_then_restart() {
        let mut poller = Poller::new("test", Duration::from_secs(60));
        poller.start();
        let t0 = Instant::now();
        poller.poll(t0);

        poller.stop();
        assert!(!poller.is_running());
        assert!(!poller.due(t0 + Duration::from_secs(120)));

        poller.start();
        assert!(poller.due(t0));
    }
}
