use std::time::{Duration, Instant};

/// Lifetime of a toast that is never paused.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(5_000);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerState {
    Running,
    Paused,
    /// Terminal: the countdown ran out or the toast was closed.
    Dismissed,
}

/// Outcome of polling a timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerPoll {
    /// Time remains, or the timer is paused.
    Pending,
    /// The countdown reached zero on this poll. Reported once.
    Expired,
    /// The timer was already dismissed before this poll.
    Finished,
}

/// Countdown measured from fixed timestamps rather than a suspended timer:
/// `remaining = duration - (now - started_at - paused_total)`, with `now`
/// frozen at the pause start while paused.
#[derive(Clone, Debug)]
pub struct ToastTimer {
    duration: Duration,
    started_at: Instant,
    paused_total: Duration,
    paused_at: Option<Instant>,
    dismissed: bool,
}

impl ToastTimer {
    pub fn start(duration: Duration, now: Instant) -> Self {
        Self {
            duration,
            started_at: now,
            paused_total: Duration::ZERO,
            paused_at: None,
            dismissed: false,
        }
    }

    pub fn state(&self) -> TimerState {
        if self.dismissed {
            TimerState::Dismissed
        } else if self.paused_at.is_some() {
            TimerState::Paused
        } else {
            TimerState::Running
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    fn elapsed(&self, now: Instant) -> Duration {
        let until = self.paused_at.unwrap_or(now);
        until
            .saturating_duration_since(self.started_at)
            .saturating_sub(self.paused_total)
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        if self.dismissed {
            return Duration::ZERO;
        }
        self.duration.saturating_sub(self.elapsed(now))
    }

    /// Remaining fraction of the countdown, used to size the progress bar.
    pub fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 0.0;
        }
        (self.remaining(now).as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Pointer entered the toast. Returns `false` unless it was running.
    pub fn pause(&mut self, now: Instant) -> bool {
        if self.state() != TimerState::Running {
            return false;
        }
        self.paused_at = Some(now);
        true
    }

    /// Pointer left the toast. Returns `false` unless it was paused.
    pub fn resume(&mut self, now: Instant) -> bool {
        if self.dismissed {
            return false;
        }
        match self.paused_at.take() {
            Some(paused_at) => {
                self.paused_total += now.saturating_duration_since(paused_at);
                true
            }
            None => false,
        }
    }

    pub fn poll(&mut self, now: Instant) -> TimerPoll {
        match self.state() {
            TimerState::Dismissed => TimerPoll::Finished,
            TimerState::Paused => TimerPoll::Pending,
            TimerState::Running => {
                if self.remaining(now).is_zero() {
                    self.dismissed = true;
                    TimerPoll::Expired
                } else {
                    TimerPoll::Pending
                }
            }
        }
    }

    /// Explicit close. Returns `false` if already dismissed.
    pub fn dismiss(&mut self) -> bool {
        if self.dismissed {
            return false;
        }
        self.dismissed = true;
        self.paused_at = None;
        true
    }
}
