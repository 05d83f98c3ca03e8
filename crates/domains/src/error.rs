//! # AppError
//!
//! Centralized error handling for the naedex services and adapters.
//! Error `Display` strings double as the human-readable messages the
//! HTTP layer hands back to callers.

use thiserror::Error;

/// The primary error type for all store-backed operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (e.g., Project, Comment)
    #[error("{0} not found with id {1}")]
    NotFound(&'static str, String),

    /// Validation failure (e.g., blank submission field, empty comment)
    #[error("validation error: {0}")]
    Validation(String),

    /// Auth failure (bad credentials, missing session, not the owner)
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The remote store (or its auth endpoint) failed or misbehaved
    #[error("backend error: {0}")]
    Backend(String),

    /// Mail or toast dispatch failed. Never changes the outcome of the
    /// transition that triggered it; callers log and move on.
    #[error("notification error: {0}")]
    Notification(String),
}

impl AppError {
    /// Shorthand for the common "row with this id is gone" case.
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound(entity, id.to_string())
    }
}

/// A specialized Result type for naedex operations.
pub type Result<T> = std::result::Result<T, AppError>;
