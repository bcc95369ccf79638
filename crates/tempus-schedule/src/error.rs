//! Error types for schedule operations.

use thiserror::Error;

/// A specialized Result type for schedule operations.
pub type ScheduleResult<T> = Result<T, ScheduleError>;

/// Errors that can occur during schedule construction and date-rule
/// resolution.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// Inconsistent schedule inputs: ordering violations or empty
    /// required dates.
    #[error("Invalid schedule: {message}")]
    Construction {
        /// Description of the violated constraint.
        message: String,
    },

    /// Malformed futures/IMM contract code.
    #[error("Invalid futures code '{code}'")]
    BadFuturesCode {
        /// The offending code.
        code: String,
    },

    /// Core date engine error.
    #[error("Core error: {0}")]
    Core(#[from] tempus_core::error::CoreError),
}

impl ScheduleError {
    /// Creates a construction error.
    #[must_use]
    pub fn construction(message: impl Into<String>) -> Self {
        Self::Construction {
            message: message.into(),
        }
    }

    /// Creates a bad futures code error.
    #[must_use]
    pub fn bad_futures_code(code: impl Into<String>) -> Self {
        Self::BadFuturesCode { code: code.into() }
    }
}
