//! Day count conventions.
//!
//! A [`DayCount`] names the rule that turns a pair of dates into a day
//! count and a year fraction. The set is closed: every convention the
//! engine will ever apply is a variant here, so a stored name either
//! resolves to a variant or fails loudly at parse time.
//!
//! # Example
//!
//! ```rust
//! use tempus_core::daycounts::DayCount;
//! use tempus_core::types::Date;
//!
//! let start = Date::from_ymd(1986, 1, 1).unwrap();
//! let end = Date::from_ymd(1986, 2, 1).unwrap();
//!
//! assert_eq!(DayCount::Actual360.day_count(start, end).unwrap(), 31);
//! assert_eq!(DayCount::Thirty360.day_count(start, end).unwrap(), 30);
//! ```

mod actact;
mod thirty360;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};
use crate::types::{Date, Frequency};

/// Day count conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DayCount {
    /// Placeholder convention; every calculation rejects it.
    #[default]
    None,

    /// Whole calendar months; year fractions are months over twelve.
    Months,

    /// Actual days over a fixed 360-day year (money markets).
    Actual360,

    /// Actual days over a fixed 365-day year.
    Actual365Fixed,

    /// Actual days over a fixed 366-day year.
    Actual366,

    /// 30/360 bond basis (ISDA): D1 of 31 clamps to 30, D2 of 31 clamps
    /// only when D1 already did. No February handling.
    Thirty360,

    /// 30E/360 eurobond basis: both ends clamp 31 to 30 unconditionally.
    ThirtyE360,

    /// 30/360 SIA variant with February end-of-month rules.
    Thirty360Isma,

    /// ACT/ACT ISDA: year-boundary split with per-year denominators.
    ActualActual,

    /// ACT/ACT ICMA: notional coupon periods laid out from the reference
    /// period end.
    ActualActualBond,

    /// ACT/ACT AFB: whole years backward from the end, 366 denominator
    /// when the stub straddles a Feb 29.
    ActualActualEuro,
}

impl DayCount {
    /// Counts days (or whole months, for [`DayCount::Months`]) between two
    /// dates, applying the convention's formula to the pair as given. The
    /// result is negative when `end` precedes `start` under the formula.
    ///
    /// # Errors
    ///
    /// [`CoreError::InvalidDayCount`] for [`DayCount::None`];
    /// [`CoreError::DateRange`] on empty or out-of-range input.
    pub fn day_count(&self, start: Date, end: Date) -> CoreResult<i64> {
        start.naive_date()?;
        end.naive_date()?;
        match self {
            DayCount::None => Err(CoreError::invalid_day_count("None")),
            DayCount::Months => Ok(whole_months(start, end)),
            DayCount::Actual360
            | DayCount::Actual365Fixed
            | DayCount::Actual366
            | DayCount::ActualActual
            | DayCount::ActualActualBond
            | DayCount::ActualActualEuro => Ok(start.days_between(&end)),
            DayCount::Thirty360 => Ok(thirty360::bond_basis(start, end)),
            DayCount::ThirtyE360 => Ok(thirty360::eurobond(start, end)),
            DayCount::Thirty360Isma => Ok(thirty360::sia(start, end)),
        }
    }

    /// Like [`DayCount::day_count`] but always applies the formula to the
    /// ordered pair and negates for reversed input.
    ///
    /// # Errors
    ///
    /// As for [`DayCount::day_count`].
    pub fn signed_day_count(&self, start: Date, end: Date) -> CoreResult<i64> {
        if start > end {
            Ok(-self.day_count(end, start)?)
        } else {
            self.day_count(start, end)
        }
    }

    /// Day count restricted to the day-based conventions.
    ///
    /// # Errors
    ///
    /// [`CoreError::InvalidDayCount`] for [`DayCount::None`] and
    /// [`DayCount::Months`], which have no day-based numerator.
    pub fn fraction_days(&self, start: Date, end: Date) -> CoreResult<i64> {
        match self {
            DayCount::None | DayCount::Months => {
                Err(CoreError::invalid_day_count(self.to_string()))
            }
            _ => self.day_count(start, end),
        }
    }

    /// Year fraction between two dates, without reference period context.
    ///
    /// For [`DayCount::ActualActualBond`] the accrual interval itself is
    /// used as the reference period, with the periods-per-year count
    /// inferred from its length.
    ///
    /// # Errors
    ///
    /// As for [`DayCount::fraction`].
    pub fn year_fraction(&self, start: Date, end: Date) -> CoreResult<Decimal> {
        self.fraction(start, end, start, end, Frequency::None)
    }

    /// Year fraction of the accrual interval `[start, end]` against the
    /// reference coupon period `[period_start, period_end]`.
    ///
    /// Only [`DayCount::ActualActualBond`] consults the reference period
    /// and frequency; the other conventions depend on the accrual interval
    /// alone. A reversed accrual interval yields the negated fraction.
    ///
    /// # Errors
    ///
    /// [`CoreError::InvalidDayCount`] for [`DayCount::None`];
    /// [`CoreError::DateRange`] on empty or out-of-range input.
    pub fn fraction(
        &self,
        start: Date,
        end: Date,
        period_start: Date,
        period_end: Date,
        freq: Frequency,
    ) -> CoreResult<Decimal> {
        if start > end {
            return Ok(-self.fraction(end, start, period_start, period_end, freq)?);
        }
        start.naive_date()?;
        end.naive_date()?;
        match self {
            DayCount::None => Err(CoreError::invalid_day_count("None")),
            DayCount::Months => Ok(Decimal::from(whole_months(start, end)) / Decimal::from(12)),
            DayCount::Actual360 | DayCount::Thirty360 | DayCount::ThirtyE360
            | DayCount::Thirty360Isma => {
                Ok(Decimal::from(self.day_count(start, end)?) / Decimal::from(360))
            }
            DayCount::Actual365Fixed => {
                Ok(Decimal::from(start.days_between(&end)) / Decimal::from(365))
            }
            DayCount::Actual366 => {
                Ok(Decimal::from(start.days_between(&end)) / Decimal::from(366))
            }
            DayCount::ActualActual => actact::isda(start, end),
            DayCount::ActualActualBond => {
                actact::icma(start, end, period_start, period_end, freq)
            }
            DayCount::ActualActualEuro => actact::afb(start, end),
        }
    }
}

/// Whole calendar months between two dates: the raw month difference,
/// reduced by one when the end day-of-month has not yet reached the start
/// day-of-month.
fn whole_months(start: Date, end: Date) -> i64 {
    let raw = (i64::from(end.year()) - i64::from(start.year())) * 12
        + i64::from(end.month())
        - i64::from(start.month());
    if end.day() < start.day() {
        raw - 1
    } else {
        raw
    }
}

impl fmt::Display for DayCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DayCount::None => "None",
            DayCount::Months => "Months",
            DayCount::Actual360 => "ACT/360",
            DayCount::Actual365Fixed => "ACT/365F",
            DayCount::Actual366 => "ACT/366",
            DayCount::Thirty360 => "30/360",
            DayCount::ThirtyE360 => "30E/360",
            DayCount::Thirty360Isma => "30/360 ISMA",
            DayCount::ActualActual => "ACT/ACT",
            DayCount::ActualActualBond => "ACT/ACT Bond",
            DayCount::ActualActualEuro => "ACT/ACT Euro",
        };
        write!(f, "{name}")
    }
}

impl FromStr for DayCount {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(DayCount::None),
            "months" => Ok(DayCount::Months),
            "act/360" | "actual/360" => Ok(DayCount::Actual360),
            "act/365f" | "act/365" | "actual/365 fixed" => Ok(DayCount::Actual365Fixed),
            "act/366" | "actual/366" => Ok(DayCount::Actual366),
            "30/360" | "bond basis" => Ok(DayCount::Thirty360),
            "30e/360" | "eurobond basis" => Ok(DayCount::ThirtyE360),
            "30/360 isma" | "30/360 sia" => Ok(DayCount::Thirty360Isma),
            "act/act" | "act/act isda" => Ok(DayCount::ActualActual),
            "act/act bond" | "act/act icma" => Ok(DayCount::ActualActualBond),
            "act/act euro" | "act/act afb" => Ok(DayCount::ActualActualEuro),
            other => Err(CoreError::invalid_day_count(other)),
        }
    }
}
