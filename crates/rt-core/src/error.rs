//! # AppError
//!
//! Centralized error handling for the Rusty-Trips ecosystem.
//! Every operation ends in a value or exactly one of these outcomes.

use thiserror::Error;

/// The primary error type for all rt-core operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (e.g., Trip, Activity)
    #[error("{0} not found with ID {1}")]
    NotFound(String, String),

    /// Validation failure (e.g., missing title, endDate before startDate)
    #[error("validation error: {0}")]
    ValidationError(String),

    /// The principal is missing or does not own the resource
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Infrastructure failure (e.g., DB down, constraint violation)
    #[error("store failure: {0}")]
    StoreFailure(#[from] anyhow::Error),
}

impl AppError {
    pub fn trip_not_found(id: impl ToString) -> Self {
        AppError::NotFound("Trip".to_string(), id.to_string())
    }

    pub fn activity_not_found(id: impl ToString) -> Self {
        AppError::NotFound("Activity".to_string(), id.to_string())
    }
}

/// A specialized Result type for Rusty-Trips logic.
pub type Result<T> = std::result::Result<T, AppError>;
