//! Coupon and cycle frequency.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};
use crate::types::Date;

/// How often a recurring cycle repeats.
///
/// The month-family variants (annual down to monthly) step in whole
/// months; the week-family variants step in whole days. `None` marks a
/// non-repeating cycle (single period from start to end).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Frequency {
    #[default]
    None,
    Annual,
    SemiAnnual,
    Quarterly,
    Monthly,
    BiWeekly,
    Weekly,
}

impl Frequency {
    /// Number of periods per year (0 for `None`).
    #[must_use]
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Frequency::None => 0,
            Frequency::Annual => 1,
            Frequency::SemiAnnual => 2,
            Frequency::Quarterly => 4,
            Frequency::Monthly => 12,
            Frequency::BiWeekly => 26,
            Frequency::Weekly => 52,
        }
    }

    /// Months per period for the month-family variants.
    #[must_use]
    pub fn months_per_period(&self) -> Option<u32> {
        match self {
            Frequency::Annual => Some(12),
            Frequency::SemiAnnual => Some(6),
            Frequency::Quarterly => Some(3),
            Frequency::Monthly => Some(1),
            _ => None,
        }
    }

    /// Days per period for the week-family variants.
    #[must_use]
    pub fn days_per_period(&self) -> Option<u32> {
        match self {
            Frequency::Weekly => Some(7),
            Frequency::BiWeekly => Some(14),
            _ => None,
        }
    }

    /// Steps a date by `n` periods (negative steps backward).
    ///
    /// # Errors
    ///
    /// [`CoreError::DateRange`] when the result escapes the supported range
    /// or the frequency is `None`.
    pub fn step(&self, date: Date, n: i32) -> CoreResult<Date> {
        if let Some(months) = self.months_per_period() {
            return date.add_months(months as i32 * n);
        }
        if let Some(days) = self.days_per_period() {
            return date.add_days(i64::from(days) * i64::from(n));
        }
        Err(CoreError::argument_range(
            "cannot step a non-repeating frequency",
        ))
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Frequency::None => "None",
            Frequency::Annual => "Annual",
            Frequency::SemiAnnual => "SemiAnnual",
            Frequency::Quarterly => "Quarterly",
            Frequency::Monthly => "Monthly",
            Frequency::BiWeekly => "BiWeekly",
            Frequency::Weekly => "Weekly",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Frequency {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" | "" => Ok(Frequency::None),
            "annual" | "yearly" | "1y" => Ok(Frequency::Annual),
            "semiannual" | "semi-annual" | "6m" => Ok(Frequency::SemiAnnual),
            "quarterly" | "3m" => Ok(Frequency::Quarterly),
            "monthly" | "1m" => Ok(Frequency::Monthly),
            "biweekly" | "bi-weekly" | "2w" => Ok(Frequency::BiWeekly),
            "weekly" | "1w" => Ok(Frequency::Weekly),
            other => Err(CoreError::argument_range(format!(
                "unknown frequency '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_periods_per_year() {
        assert_eq!(Frequency::Annual.periods_per_year(), 1);
        assert_eq!(Frequency::SemiAnnual.periods_per_year(), 2);
        assert_eq!(Frequency::Quarterly.periods_per_year(), 4);
        assert_eq!(Frequency::Monthly.periods_per_year(), 12);
        assert_eq!(Frequency::BiWeekly.periods_per_year(), 26);
        assert_eq!(Frequency::Weekly.periods_per_year(), 52);
        assert_eq!(Frequency::None.periods_per_year(), 0);
    }

    #[test]
    fn test_step_month_family() {
        let date = Date::from_ymd(2000, 1, 5).unwrap();
        assert_eq!(
            Frequency::SemiAnnual.step(date, 1).unwrap(),
            Date::from_ymd(2000, 7, 5).unwrap()
        );
        assert_eq!(
            Frequency::Quarterly.step(date, -1).unwrap(),
            Date::from_ymd(1999, 10, 5).unwrap()
        );
    }

    #[test]
    fn test_step_week_family() {
        let date = Date::from_ymd(2000, 1, 5).unwrap();
        assert_eq!(
            Frequency::Weekly.step(date, 2).unwrap(),
            date.add_days(14).unwrap()
        );
        assert_eq!(
            Frequency::BiWeekly.step(date, 1).unwrap(),
            date.add_days(14).unwrap()
        );
    }

    #[test]
    fn test_step_none_rejected() {
        let date = Date::from_ymd(2000, 1, 5).unwrap();
        assert!(Frequency::None.step(date, 1).is_err());
    }

    #[test]
    fn test_parse() {
        assert_eq!("SemiAnnual".parse::<Frequency>().unwrap(), Frequency::SemiAnnual);
        assert_eq!("quarterly".parse::<Frequency>().unwrap(), Frequency::Quarterly);
        assert!("fortnightly".parse::<Frequency>().is_err());
    }
}
