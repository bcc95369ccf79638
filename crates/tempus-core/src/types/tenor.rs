//! Tenor strings and period units.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};
use crate::types::Date;

/// Calendar period unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeUnit {
    /// No period. The unit of the empty tenor.
    #[default]
    None,
    Days,
    Weeks,
    Months,
    Years,
}

impl TimeUnit {
    fn letter(self) -> &'static str {
        match self {
            TimeUnit::None => "",
            TimeUnit::Days => "D",
            TimeUnit::Weeks => "W",
            TimeUnit::Months => "M",
            TimeUnit::Years => "Y",
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Per-unit counts accumulated from a tenor string before normalization.
///
/// Applied to a date in the fixed order Years, Months, Weeks, Days; month
/// and day arithmetic do not commute, so the application order is part of
/// the contract rather than the spelling order of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct TenorParts {
    pub years: u32,
    pub months: u32,
    pub weeks: u32,
    pub days: u32,
}

impl TenorParts {
    /// Parses a tenor string, summing repeated units (`"1y1y"` is two
    /// years). Whitespace is ignored and letters are case-insensitive.
    pub fn parse(s: &str) -> CoreResult<Self> {
        let mut parts = TenorParts::default();
        let mut count: Option<u32> = None;
        for ch in s.chars() {
            if ch.is_whitespace() {
                continue;
            }
            if let Some(digit) = ch.to_digit(10) {
                let next = count
                    .unwrap_or(0)
                    .checked_mul(10)
                    .and_then(|n| n.checked_add(digit))
                    .ok_or_else(|| CoreError::tenor_format(format!("count overflow in '{s}'")))?;
                count = Some(next);
                continue;
            }
            let n = count.take().ok_or_else(|| {
                CoreError::tenor_format(format!("unit '{ch}' without count in '{s}'"))
            })?;
            match ch.to_ascii_uppercase() {
                'D' => parts.days += n,
                'W' => parts.weeks += n,
                'M' => parts.months += n,
                'Y' => parts.years += n,
                other => {
                    return Err(CoreError::tenor_format(format!(
                        "unknown unit '{other}' in '{s}'"
                    )))
                }
            }
        }
        if count.is_some() {
            return Err(CoreError::tenor_format(format!(
                "trailing count without unit in '{s}'"
            )));
        }
        Ok(parts)
    }

    /// Adds the accumulated parts to a date, largest unit first.
    pub fn apply_to(&self, date: Date) -> CoreResult<Date> {
        let mut out = date;
        if self.years > 0 {
            out = out.add_years(self.years as i32)?;
        }
        if self.months > 0 {
            out = out.add_months(self.months as i32)?;
        }
        if self.weeks > 0 {
            out = out.add_days(i64::from(self.weeks) * 7)?;
        }
        if self.days > 0 {
            out = out.add_days(i64::from(self.days))?;
        }
        Ok(out)
    }

    fn is_zero(&self) -> bool {
        *self == TenorParts::default()
    }
}

/// A normalized market tenor such as `6M`, `2W` or `10Y`.
///
/// Parsing collapses mixed spellings into a single count and unit:
/// year/month input normalizes to months whenever a month component is
/// present (`"1Y6M"` is `18M`, plain `"1Y"` stays `1Y`), and week/day
/// input normalizes to days whenever a day component is present.
/// Month-family and day-family units cannot be mixed in one tenor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Tenor {
    count: u32,
    unit: TimeUnit,
}

impl Tenor {
    /// Builds a tenor from a count and unit without normalization.
    ///
    /// # Errors
    ///
    /// [`CoreError::ArgumentRange`] for a non-zero count with
    /// [`TimeUnit::None`], or a zero count with a concrete unit (only the
    /// empty tenor may have count zero).
    pub fn new(count: u32, unit: TimeUnit) -> CoreResult<Self> {
        if unit == TimeUnit::None && count != 0 {
            return Err(CoreError::argument_range(format!(
                "count {count} requires a unit"
            )));
        }
        if unit != TimeUnit::None && count == 0 {
            return Err(CoreError::argument_range(format!(
                "unit {unit} requires a positive count"
            )));
        }
        Ok(Tenor { count, unit })
    }

    fn raw(count: u32, unit: TimeUnit) -> Self {
        Tenor { count, unit }
    }

    /// The empty tenor (zero count, no unit).
    #[must_use]
    pub fn empty() -> Self {
        Tenor::default()
    }

    /// Parses and normalizes a tenor string.
    ///
    /// # Errors
    ///
    /// [`CoreError::TenorFormat`] for malformed strings or tenors mixing
    /// month-family and day-family units.
    pub fn parse(s: &str) -> CoreResult<Self> {
        let parts = TenorParts::parse(s)?;
        if parts.is_zero() {
            return Ok(Tenor::empty());
        }
        let month_family = parts.years > 0 || parts.months > 0;
        let day_family = parts.weeks > 0 || parts.days > 0;
        if month_family && day_family {
            return Err(CoreError::tenor_format(format!(
                "cannot mix month and day units in '{s}'"
            )));
        }
        if month_family {
            if parts.months > 0 {
                Ok(Tenor::raw(parts.years * 12 + parts.months, TimeUnit::Months))
            } else {
                Ok(Tenor::raw(parts.years, TimeUnit::Years))
            }
        } else if parts.days > 0 {
            Ok(Tenor::raw(parts.weeks * 7 + parts.days, TimeUnit::Days))
        } else {
            Ok(Tenor::raw(parts.weeks, TimeUnit::Weeks))
        }
    }

    /// Number of units.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Unit kind.
    #[must_use]
    pub fn unit(&self) -> TimeUnit {
        self.unit
    }

    /// True for the empty tenor.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.unit == TimeUnit::None && self.count == 0
    }

    /// Adds this tenor to a date.
    ///
    /// # Errors
    ///
    /// [`CoreError::DateRange`] when the result escapes the supported range.
    pub fn add_to(&self, date: Date) -> CoreResult<Date> {
        let count = i32::try_from(self.count)
            .map_err(|_| CoreError::tenor_format(format!("count {} too large", self.count)))?;
        date.add(count, self.unit)
    }
}

impl fmt::Display for Tenor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }
        write!(f, "{}{}", self.count, self.unit)
    }
}

impl FromStr for Tenor {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tenor::parse(s)
    }
}

impl Serialize for Tenor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Tenor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Tenor::parse(&s).map_err(D::Error::custom)
    }
}
