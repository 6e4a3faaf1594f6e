use std::time::{Duration, Instant};

use chrono::Utc;

use crate::domain::toast::{ToastId, ToastSeverity, ToastView};
use crate::toast::timer::{DEFAULT_TOAST_DURATION, TimerPoll, TimerState, ToastTimer};

#[derive(Clone, Debug)]
pub struct Toast {
    pub id: ToastId,
    pub message: String,
    pub severity: ToastSeverity,
    pub timer: ToastTimer,
}

/// Result of polling a single toast in the queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastPoll {
    Pending,
    /// Countdown reached zero; the toast has been removed.
    Expired,
    /// No toast with this id is queued.
    Gone,
}

/// Live toasts, oldest first.
#[derive(Debug)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
    duration: Duration,
    last_id: i64,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_DURATION)
    }
}

impl ToastQueue {
    pub fn new(duration: Duration) -> Self {
        Self {
            toasts: Vec::new(),
            duration,
            last_id: 0,
        }
    }

    /// Appends a toast keyed by the current wall-clock millisecond.
    pub fn add_toast(
        &mut self,
        message: impl Into<String>,
        severity: ToastSeverity,
        now: Instant,
    ) -> ToastId {
        self.add_toast_at(message, severity, now, Utc::now().timestamp_millis())
    }

    /// Appends a toast created at `created_ms` (epoch milliseconds).
    pub fn add_toast_at(
        &mut self,
        message: impl Into<String>,
        severity: ToastSeverity,
        now: Instant,
        created_ms: i64,
    ) -> ToastId {
        let id = ToastId::new(created_ms.max(self.last_id + 1));
        self.last_id = id.get();
        self.toasts.push(Toast {
            id,
            message: message.into(),
            severity,
            timer: ToastTimer::start(self.duration, now),
        });
        id
    }

    /// Removes a toast; removing an unknown id is a no-op returning `false`.
    pub fn remove_toast(&mut self, id: ToastId) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|toast| toast.id != id);
        self.toasts.len() != before
    }

    pub fn pause(&mut self, id: ToastId, now: Instant) -> bool {
        self.get_mut(id).is_some_and(|toast| toast.timer.pause(now))
    }

    pub fn resume(&mut self, id: ToastId, now: Instant) -> bool {
        self.get_mut(id).is_some_and(|toast| toast.timer.resume(now))
    }

    /// Advances one toast's countdown, removing it once it expires.
    pub fn poll(&mut self, id: ToastId, now: Instant) -> ToastPoll {
        let Some(index) = self.toasts.iter().position(|toast| toast.id == id) else {
            return ToastPoll::Gone;
        };
        match self.toasts[index].timer.poll(now) {
            TimerPoll::Pending => ToastPoll::Pending,
            TimerPoll::Expired => {
                self.toasts.remove(index);
                ToastPoll::Expired
            }
            TimerPoll::Finished => {
                self.toasts.remove(index);
                ToastPoll::Gone
            }
        }
    }

    /// Polls every toast and returns the ids that expired.
    pub fn sweep(&mut self, now: Instant) -> Vec<ToastId> {
        let ids: Vec<ToastId> = self.toasts.iter().map(|toast| toast.id).collect();
        ids.into_iter()
            .filter(|id| self.poll(*id, now) == ToastPoll::Expired)
            .collect()
    }

    pub fn snapshot(&self, now: Instant) -> Vec<ToastView> {
        self.toasts
            .iter()
            .map(|toast| ToastView {
                id: toast.id,
                message: toast.message.clone(),
                severity: toast.severity,
                progress: toast.timer.progress(now),
                paused: toast.timer.state() == TimerState::Paused,
            })
            .collect()
    }

    pub fn contains(&self, id: ToastId) -> bool {
        self.toasts.iter().any(|toast| toast.id == id)
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    fn get_mut(&mut self, id: ToastId) -> Option<&mut Toast> {
        self.toasts.iter_mut().find(|toast| toast.id == id)
    }
}
