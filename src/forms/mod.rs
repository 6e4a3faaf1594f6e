//! Form definitions backing the admin and public routes.

use thiserror::Error;
use validator::ValidationErrors;

pub mod blacklist;
pub mod contact;
pub mod post;
pub mod settings;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid email address")]
    InvalidEmail,

    #[error("invalid slug")]
    InvalidSlug,

    #[error("invalid ip address")]
    InvalidIpAddress,

    #[error("invalid date: {0}")]
    InvalidDate(String),

    #[error("invalid status: {0}")]
    InvalidStatus(String),

    #[error("invalid url")]
    InvalidUrl,
}

/// Trims an optional field, mapping blank input to `None`.
pub(crate) fn optional_trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
