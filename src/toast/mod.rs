//! Auto-dismissing notifications with a pausable countdown.
//!
//! [`ToastTimer`] is the per-toast state machine, [`ToastQueue`] the ordered
//! collection of live toasts. With the `server` feature, [`ToastCenter`]
//! drives every toast's countdown from its own repeating tokio task.

#[cfg(feature = "server")]
pub mod center;
pub mod queue;
pub mod timer;

#[cfg(feature = "server")]
pub use center::ToastCenter;
pub use queue::{Toast, ToastPoll, ToastQueue};
pub use timer::{DEFAULT_TOAST_DURATION, TimerPoll, TimerState, ToastTimer};
