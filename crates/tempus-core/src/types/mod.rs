//! Core value types: dates, tenors and frequencies.

mod date;
mod frequency;
mod tenor;

pub use date::{days_in_month, is_leap_year, Date, DateOrder, MAX_YEAR, MIN_YEAR};
pub use frequency::Frequency;
pub use tenor::{Tenor, TimeUnit};

pub(crate) use tenor::TenorParts;
