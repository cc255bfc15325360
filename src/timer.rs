use std::time::{Duration, Instant};

/// Fixed-period repeating timer.  The host polls it; the game cancels it
/// when a session ends.  Restarting always builds a new timer.
#[derive(Clone, Debug)]
pub struct FrameTimer {
    period: Duration,
    next_tick: Instant,
    cancelled: bool,
}

impl FrameTimer {
    /// A timer firing `fps` times per second, first due one period after `now`.
    pub fn start(fps: u32, now: Instant) -> Self {
        let period = Duration::from_secs(1) / fps.max(1);
        Self {
            period,
            next_tick: now + period,
            cancelled: false,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Stop the timer.  Returns `true` only for the call that actually
    /// cancelled it.
    pub fn cancel(&mut self) -> bool {
        !std::mem::replace(&mut self.cancelled, true)
    }

    /// Consume one due tick, if any.  A host that fell behind gets a single
    /// tick and the schedule restarts from `now`; missed ticks never burst.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.cancelled || now < self.next_tick {
            return false;
        }
        self.next_tick += self.period;
        if self.next_tick <= now {
            self.next_tick = now + self.period;
        }
        true
    }

    /// How long the host may wait before the next tick is due.  `None` once
    /// cancelled.
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        if self.cancelled {
            None
        } else {
            Some(self.next_tick.saturating_duration_since(now))
        }
    }
}
