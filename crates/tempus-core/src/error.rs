//! Error types for the Tempus date engine.
//!
//! Every operation validates its inputs eagerly and either returns a fully
//! valid result or fails atomically with one of the kinds below.

use thiserror::Error;

/// A specialized Result type for Tempus core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// The main error type for date, calendar and day-count operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Date components or the resulting date fall outside the supported
    /// 1900-01-01 .. 2149-12-31 range, or are structurally invalid
    /// (bad day-of-month, bad hour/minute/second).
    #[error("date out of range: {message}")]
    DateRange {
        /// Description of the offending input.
        message: String,
    },

    /// A date string could not be parsed (distinct from a parseable but
    /// out-of-range date).
    #[error("invalid date format: {message}")]
    DateFormat {
        /// Description of the parse failure.
        message: String,
    },

    /// A tenor string violates the `<digits><unit letter>` grammar.
    #[error("invalid tenor: {message}")]
    TenorFormat {
        /// Description of the parse failure.
        message: String,
    },

    /// Calendar code not present in the registry.
    #[error("unknown calendar: {code}")]
    UnknownCalendar {
        /// The unrecognized code.
        code: String,
    },

    /// Day-count convention not valid for the requested operation
    /// (e.g. `None`/`Months` where a concrete convention is required).
    #[error("invalid day count for this operation: {name}")]
    InvalidDayCount {
        /// Display name of the rejected convention.
        name: String,
    },

    /// Invalid argument outside date parsing (e.g. a negative tenor count).
    #[error("argument out of range: {message}")]
    ArgumentRange {
        /// Description of the offending argument.
        message: String,
    },
}

impl CoreError {
    /// Creates a date range error.
    #[must_use]
    pub fn date_range(message: impl Into<String>) -> Self {
        Self::DateRange {
            message: message.into(),
        }
    }

    /// Creates a date format error.
    #[must_use]
    pub fn date_format(message: impl Into<String>) -> Self {
        Self::DateFormat {
            message: message.into(),
        }
    }

    /// Creates a tenor format error.
    #[must_use]
    pub fn tenor_format(message: impl Into<String>) -> Self {
        Self::TenorFormat {
            message: message.into(),
        }
    }

    /// Creates an unknown calendar error.
    #[must_use]
    pub fn unknown_calendar(code: impl Into<String>) -> Self {
        Self::UnknownCalendar { code: code.into() }
    }

    /// Creates an invalid day count error.
    #[must_use]
    pub fn invalid_day_count(name: impl Into<String>) -> Self {
        Self::InvalidDayCount { name: name.into() }
    }

    /// Creates an argument range error.
    #[must_use]
    pub fn argument_range(message: impl Into<String>) -> Self {
        Self::ArgumentRange {
            message: message.into(),
        }
    }
}
