//! Error types for the attendance engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions the engine can report. Every kind is terminal
//! for the request that produced it; nothing is retried internally.

use thiserror::Error;

use crate::models::Role;

/// The main error type for the attendance engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use attendance_engine::error::EngineError;
///
/// let error = EngineError::OutOfRange { distance_m: 250, radius_m: 100 };
/// assert_eq!(
///     error.to_string(),
///     "You are 250 meters from the office. Attendance is only allowed within a 100 meter radius.",
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// The caller's role is not allowed to perform the operation.
    #[error("Access denied. This operation requires the {required} role.")]
    ForbiddenRole {
        /// The role the operation requires.
        required: Role,
    },

    /// The input was missing or malformed.
    #[error("{message}")]
    Validation {
        /// A description of what was invalid.
        message: String,
    },

    /// The operation would violate a uniqueness or ordering invariant.
    #[error("{message}")]
    Conflict {
        /// A description of the conflicting state.
        message: String,
    },

    /// The caller's coordinates fall outside the configured office radius.
    #[error(
        "You are {distance_m} meters from the office. Attendance is only allowed within a {radius_m} meter radius."
    )]
    OutOfRange {
        /// The computed distance from the office, rounded to whole meters.
        distance_m: u64,
        /// The configured maximum radius, rounded to whole meters.
        radius_m: u64,
    },

    /// A referenced entity does not exist.
    #[error("{message}")]
    NotFound {
        /// A description of what was not found.
        message: String,
    },

    /// An unexpected failure in the backing store.
    #[error("Storage failure: {message}")]
    Storage {
        /// A description of the storage failure.
        message: String,
    },
}

impl EngineError {
    /// Creates a validation error with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates a conflict error with the given message.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Creates a not-found error with the given message.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Creates a storage error with the given message.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
