//! Shared toast queue with one countdown task per toast.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::domain::toast::{ToastId, ToastSeverity, ToastView};
use crate::toast::queue::{ToastPoll, ToastQueue};

/// Polling period of a countdown, roughly one animation frame.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Invoked once when a toast's countdown runs out.
pub type ExpireCallback = Arc<dyn Fn(ToastId) + Send + Sync>;

struct Inner {
    queue: Mutex<ToastQueue>,
    tasks: Mutex<HashMap<ToastId, JoinHandle<()>>>,
    on_expire: Option<ExpireCallback>,
}

impl Inner {
    fn queue(&self) -> MutexGuard<'_, ToastQueue> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn tasks(&self) -> MutexGuard<'_, HashMap<ToastId, JoinHandle<()>>> {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Cloneable handle to the application's toasts. Must be used from within a
/// tokio runtime: every added toast spawns its countdown task.
#[derive(Clone)]
pub struct ToastCenter {
    inner: Arc<Inner>,
}

impl ToastCenter {
    pub fn new(duration: Duration) -> Self {
        Self::build(duration, None)
    }

    pub fn with_expire_callback(duration: Duration, on_expire: ExpireCallback) -> Self {
        Self::build(duration, Some(on_expire))
    }

    fn build(duration: Duration, on_expire: Option<ExpireCallback>) -> Self {
        Self {
            inner: Arc::new(Inner {
                queue: Mutex::new(ToastQueue::new(duration)),
                tasks: Mutex::new(HashMap::new()),
                on_expire,
            }),
        }
    }

    pub fn add_toast(&self, message: impl Into<String>, severity: ToastSeverity) -> ToastId {
        let id = self.inner.queue().add_toast(message, severity, now());

        // Registered under the lock so a countdown that finishes immediately
        // still finds its own entry to remove.
        let mut tasks = self.inner.tasks();
        let handle = tokio::spawn(run_countdown(Arc::clone(&self.inner), id));
        tasks.insert(id, handle);

        id
    }

    /// Explicit close. Stops the countdown task; unknown ids are a no-op.
    pub fn remove_toast(&self, id: ToastId) -> bool {
        let removed = self.inner.queue().remove_toast(id);
        if let Some(handle) = self.inner.tasks().remove(&id) {
            handle.abort();
        }
        removed
    }

    pub fn pause(&self, id: ToastId) -> bool {
        self.inner.queue().pause(id, now())
    }

    pub fn resume(&self, id: ToastId) -> bool {
        self.inner.queue().resume(id, now())
    }

    pub fn snapshot(&self) -> Vec<ToastView> {
        self.inner.queue().snapshot(now())
    }

    pub fn success(&self, message: impl Into<String>) -> ToastId {
        self.add_toast(message, ToastSeverity::Success)
    }

    pub fn error(&self, message: impl Into<String>) -> ToastId {
        self.add_toast(message, ToastSeverity::Error)
    }

    /// Number of countdown tasks still running.
    pub fn active_countdowns(&self) -> usize {
        self.inner.tasks().len()
    }
}

fn now() -> Instant {
    tokio::time::Instant::now().into_std()
}

async fn run_countdown(inner: Arc<Inner>, id: ToastId) {
    let mut ticker = tokio::time::interval(FRAME_INTERVAL);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;
        let poll = inner.queue().poll(id, now());
        match poll {
            ToastPoll::Pending => continue,
            ToastPoll::Expired => {
                log::debug!("Toast {id} expired");
                if let Some(on_expire) = &inner.on_expire {
                    on_expire(id);
                }
                break;
            }
            ToastPoll::Gone => break,
        }
    }

    inner.tasks().remove(&id);
}
