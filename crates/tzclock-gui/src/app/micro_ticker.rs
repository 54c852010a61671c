use std::time::Duration;

const FRAME: Duration = Duration::from_millis(16);

/// Cadence of the UI poll that drains the event bus.
///
/// Polls at animation frame rate while events keep arriving, and backs off to
/// half the clock tick interval once the bus has been quiet for a few polls.
#[derive(Debug, Clone)]
pub(super) struct MicroTicker {
    active:         Duration,
    idle:           Duration,
    idle_threshold: u8,
    idle_polls:     u8,
    current:        Duration,
}

impl MicroTicker {
    pub(super) fn for_tick_interval(tick_interval: Duration) -> Self {
        let idle = (tick_interval / 2).max(FRAME);

        Self {
            active: FRAME,
            idle,
            idle_threshold: 3,
            idle_polls: 0,
            current: FRAME,
        }
    }

    pub(super) fn interval(&self) -> Duration {
        self.current
    }

    pub(super) fn record_activity(&mut self) {
        self.idle_polls = 0;
        self.current = self.active;
    }

    pub(super) fn record_idle(&mut self) {
        self.idle_polls = self.idle_polls.saturating_add(1).min(self.idle_threshold);

        if self.idle_polls >= self.idle_threshold {
            self.current = self.idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backs_off_after_quiet_polls_and_recovers_on_activity() {
        let mut ticker = MicroTicker::for_tick_interval(Duration::from_millis(200));
        assert_eq!(ticker.interval(), FRAME);

        ticker.record_idle();
        ticker.record_idle();
        assert_eq!(ticker.interval(), FRAME);

        ticker.record_idle();
        assert_eq!(ticker.interval(), Duration::from_millis(100));

        ticker.record_activity();
        assert_eq!(ticker.interval(), FRAME);
    }

    #[test]
    fn idle_cadence_is_never_faster_than_a_frame() {
        let mut ticker = MicroTicker::for_tick_interval(Duration::from_millis(10));
        for _ in 0..5 {
            ticker.record_idle();
        }
        assert_eq!(ticker.interval(), FRAME);
    }
}
