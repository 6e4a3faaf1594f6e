//! DTO modules that bridge services with routes.

pub mod admin;
pub mod public;
