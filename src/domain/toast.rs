use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Unique key of a toast: its creation time in epoch milliseconds, bumped
/// when two toasts are created within the same millisecond.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(i64);

impl ToastId {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

impl Display for ToastId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ToastSeverity {
    Success,
    Error,
    Warning,
    #[default]
    Info,
}

impl ToastSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToastSeverity::Success => "success",
            ToastSeverity::Error => "error",
            ToastSeverity::Warning => "warning",
            ToastSeverity::Info => "info",
        }
    }
}

impl Display for ToastSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What a toast looks like to a renderer at a given instant.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ToastView {
    pub id: ToastId,
    pub message: String,
    pub severity: ToastSeverity,
    /// Remaining fraction of the countdown in `[0, 1]`.
    pub progress: f64,
    pub paused: bool,
}
