//! # Tempus Core
//!
//! Core date arithmetic for financial calculations.
//!
//! This crate provides the foundational building blocks of the Tempus
//! date engine:
//!
//! - **Types**: the range-checked [`types::Date`] value with its empty
//!   sentinel, [`types::Tenor`] strings and [`types::Frequency`]
//! - **Day Count Conventions**: industry-standard day counts and year
//!   fractions with exact [`rust_decimal::Decimal`] arithmetic
//! - **Business Day Calendars**: bitmap holiday calendars, roll
//!   conventions and a caching registry keyed by market code
//!
//! ## Example
//!
//! ```rust
//! use tempus_core::prelude::*;
//!
//! let cal = default_registry().get("NYB").unwrap();
//! let date = Date::from_ymd(2025, 7, 4).unwrap();
//! let rolled = cal.roll(date, RollConvention::Following).unwrap();
//! assert_eq!(rolled, Date::from_ymd(2025, 7, 7).unwrap());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::manual_div_ceil)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::manual_range_contains)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::if_not_else)]
#![allow(clippy::cast_possible_truncation)]

pub mod calendars;
pub mod daycounts;
pub mod error;
pub mod types;

#[cfg(test)]
mod validation_tests;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calendars::{default_registry, Calendar, CalendarRegistry, RollConvention};
    pub use crate::daycounts::DayCount;
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{Date, DateOrder, Frequency, Tenor, TimeUnit};
}
