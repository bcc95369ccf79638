//! # Tempus Schedule
//!
//! Accrual schedule generation and market date rules on top of
//! [`tempus_core`]:
//!
//! - **Schedules**: backward/forward coupon cycle generation with stub
//!   handling and per-period day-count queries
//! - **Futures codes**: IMM contract code resolution (`"EDZ7"`) to
//!   third-Wednesday expiries with decade disambiguation
//! - **CDS dates**: standard maturity rolls and SNAC accrual starts
//! - **FX**: T+n spot dates across two settlement calendars
//!
//! ## Example
//!
//! ```rust
//! use tempus_schedule::{Schedule, ScheduleConfig};
//! use tempus_core::prelude::*;
//!
//! let config = ScheduleConfig::new(
//!     Date::from_ymd(2020, 3, 15).unwrap(),
//!     Date::from_ymd(2025, 3, 15).unwrap(),
//!     Frequency::SemiAnnual,
//!     default_registry().get("NYB").unwrap(),
//! );
//! let schedule = Schedule::generate(&config).unwrap();
//! assert_eq!(schedule.len(), 10);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::unreadable_literal)]

pub mod cds;
pub mod cycle;
pub mod error;
pub mod fx;
pub mod imm;
pub mod schedule;

#[cfg(test)]
mod validation_tests;

pub use cycle::CycleRule;
pub use error::{ScheduleError, ScheduleResult};
pub use imm::ImmDate;
pub use schedule::{Period, Schedule, ScheduleConfig};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::cds;
    pub use crate::cycle::CycleRule;
    pub use crate::error::{ScheduleError, ScheduleResult};
    pub use crate::fx::spot_date;
    pub use crate::imm::{next_imm_date, third_wednesday, ImmDate};
    pub use crate::schedule::{Period, Schedule, ScheduleConfig};
}
