//! Application services orchestrating repositories, forms and the list
//! pipeline.

use thiserror::Error;

pub mod admin;
pub mod public;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not found")]
    NotFound,

    #[error("forbidden")]
    Forbidden,

    #[error("form error: {0}")]
    Form(String),

    #[error("type constraint violation: {0}")]
    TypeConstraint(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("repository error: {0}")]
    Repository(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
