//! Date type for financial calculations.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::error::{CoreError, CoreResult};
use crate::types::tenor::TenorParts;
use crate::types::TimeUnit;

/// First year representable by [`Date`].
pub const MIN_YEAR: i32 = 1900;
/// Last year representable by [`Date`].
pub const MAX_YEAR: i32 = 2149;

/// Number of 10-minute ticks per day, used by the fractional serial form.
const TICKS_PER_DAY: f64 = 144.0;

/// Offset that anchors the legacy Excel-style serial so that
/// 1900-01-01 maps to 367. Kept for compatibility with historical data
/// produced under the 1900 leap-year quirk.
const EXCEL_OFFSET: i64 = 365;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum Repr {
    /// Distinguished sentinel, distinct from every valid date and ordered
    /// before all of them.
    Empty,
    At {
        date: NaiveDate,
        hour: u8,
        minute: u8,
        second: u8,
    },
}

/// A calendar date in the range 1900-01-01 .. 2149-12-31, optionally
/// carrying a time-of-day component.
///
/// Internally a sum type `{ Empty | Valid }`: the empty sentinel can never
/// collide with a real in-range date. Values are immutable; arithmetic
/// returns new dates and fails with [`CoreError::DateRange`] whenever the
/// result would escape the supported range.
///
/// # Example
///
/// ```rust
/// use tempus_core::types::Date;
///
/// let date = Date::from_ymd(2008, 1, 31).unwrap();
/// let next = date.add_months(1).unwrap();
/// assert_eq!(next, Date::from_ymd(2008, 2, 29).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date(Repr);

/// Field order for ambiguous numeric date strings such as `5/1/2008`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateOrder {
    /// US convention: month before day.
    MonthDayYear,
    /// European convention: day before month.
    DayMonthYear,
}

impl Date {
    /// Returns the distinguished empty date.
    #[must_use]
    pub fn empty() -> Self {
        Date(Repr::Empty)
    }

    /// Returns the earliest representable date.
    #[must_use]
    pub fn min_value() -> Self {
        Date(Repr::At {
            date: NaiveDate::from_ymd_opt(MIN_YEAR, 1, 1).expect("min date is valid"),
            hour: 0,
            minute: 0,
            second: 0,
        })
    }

    /// Returns the latest representable date.
    #[must_use]
    pub fn max_value() -> Self {
        Date(Repr::At {
            date: NaiveDate::from_ymd_opt(MAX_YEAR, 12, 31).expect("max date is valid"),
            hour: 23,
            minute: 59,
            second: 59,
        })
    }

    /// Creates a date from year, month and day.
    ///
    /// All-zero input yields the empty sentinel rather than an error.
    ///
    /// # Errors
    ///
    /// [`CoreError::DateRange`] if the components are structurally invalid
    /// or the year falls outside 1900..=2149.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> CoreResult<Self> {
        Self::from_ymd_hms(year, month, day, 0, 0, 0)
    }

    /// Creates a date with a time-of-day component.
    ///
    /// # Errors
    ///
    /// [`CoreError::DateRange`] on structurally invalid components or an
    /// out-of-range year.
    pub fn from_ymd_hms(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> CoreResult<Self> {
        if year == 0 && month == 0 && day == 0 && hour == 0 && minute == 0 && second == 0 {
            return Ok(Self::empty());
        }
        if year < MIN_YEAR || year > MAX_YEAR {
            return Err(CoreError::date_range(format!(
                "year {year} outside {MIN_YEAR}..={MAX_YEAR}"
            )));
        }
        if hour > 23 || minute > 59 || second > 59 {
            return Err(CoreError::date_range(format!(
                "invalid time {hour:02}:{minute:02}:{second:02}"
            )));
        }
        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            CoreError::date_range(format!("{year}-{month:02}-{day:02}"))
        })?;
        Ok(Date(Repr::At {
            date,
            hour: hour as u8,
            minute: minute as u8,
            second: second as u8,
        }))
    }

    /// Creates a date from a `yyyymmdd` integer. Zero yields the empty date.
    ///
    /// # Errors
    ///
    /// [`CoreError::DateRange`] on out-of-range or structurally invalid input.
    pub fn from_yyyymmdd(value: i32) -> CoreResult<Self> {
        if value == 0 {
            return Ok(Self::empty());
        }
        if value < 0 {
            return Err(CoreError::date_range(format!("negative date {value}")));
        }
        let year = value / 10_000;
        let month = (value / 100 % 100) as u32;
        let day = (value % 100) as u32;
        Self::from_ymd(year, month, day)
    }

    /// Returns the date as a `yyyymmdd` integer (0 for the empty date).
    #[must_use]
    pub fn to_yyyymmdd(&self) -> i32 {
        match self.0 {
            Repr::Empty => 0,
            Repr::At { date, .. } => {
                date.year() * 10_000 + date.month() as i32 * 100 + date.day() as i32
            }
        }
    }

    /// Creates a date from a Julian day number.
    ///
    /// # Errors
    ///
    /// [`CoreError::DateRange`] when the serial falls outside the supported
    /// range.
    pub fn from_julian(jdn: i64) -> CoreResult<Self> {
        let days_from_ce = jdn - 1_721_425;
        let days = i32::try_from(days_from_ce)
            .ok()
            .and_then(NaiveDate::from_num_days_from_ce_opt)
            .ok_or_else(|| CoreError::date_range(format!("julian day {jdn}")))?;
        check_range(days)?;
        Ok(Date(Repr::At {
            date: days,
            hour: 0,
            minute: 0,
            second: 0,
        }))
    }

    /// Returns the Julian day number (JDN of 2000-01-01 is 2451545).
    ///
    /// # Errors
    ///
    /// [`CoreError::DateRange`] on the empty date.
    pub fn to_julian(&self) -> CoreResult<i64> {
        Ok(i64::from(self.naive_date()?.num_days_from_ce()) + 1_721_425)
    }

    /// Creates a date from the legacy Excel-style serial.
    ///
    /// # Errors
    ///
    /// [`CoreError::DateRange`] when the serial falls outside the supported
    /// range.
    pub fn from_excel(serial: i64) -> CoreResult<Self> {
        let days = serial - EXCEL_OFFSET;
        let date = excel_epoch()
            .checked_add_signed(Duration::days(days))
            .ok_or_else(|| CoreError::date_range(format!("excel serial {serial}")))?;
        check_range(date)?;
        Ok(Date(Repr::At {
            date,
            hour: 0,
            minute: 0,
            second: 0,
        }))
    }

    /// Returns the legacy Excel-style serial (1900-01-01 maps to 367,
    /// preserving the historical 1900 leap-year offset).
    ///
    /// # Errors
    ///
    /// [`CoreError::DateRange`] on the empty date.
    pub fn to_excel(&self) -> CoreResult<i64> {
        Ok((self.naive_date()? - excel_epoch()).num_days() + EXCEL_OFFSET)
    }

    /// Creates a date from a fractional-day serial.
    ///
    /// The time-of-day is reconstructed quantized to 10-minute ticks;
    /// seconds are not carried by the serial form. This is the documented
    /// lossy round-trip contract of the serial representation.
    ///
    /// # Errors
    ///
    /// [`CoreError::DateRange`] when the integral part falls outside the
    /// supported range.
    pub fn from_serial_f64(serial: f64) -> CoreResult<Self> {
        if !serial.is_finite() {
            return Err(CoreError::date_range(format!("serial {serial}")));
        }
        let mut days = serial.floor() as i64;
        let mut ticks = ((serial - serial.floor()) * TICKS_PER_DAY).round() as i64;
        if ticks >= TICKS_PER_DAY as i64 {
            days += 1;
            ticks = 0;
        }
        let base = Self::from_excel(days)?;
        let date = base.naive_date()?;
        Ok(Date(Repr::At {
            date,
            hour: (ticks / 6) as u8,
            minute: ((ticks % 6) * 10) as u8,
            second: 0,
        }))
    }

    /// Returns the fractional-day serial (whole days agree with
    /// [`Date::to_excel`]).
    ///
    /// # Errors
    ///
    /// [`CoreError::DateRange`] on the empty date.
    pub fn to_serial_f64(&self) -> CoreResult<f64> {
        let whole = self.to_excel()? as f64;
        match self.0 {
            Repr::Empty => unreachable!("to_excel rejects the empty date"),
            Repr::At {
                hour,
                minute,
                second,
                ..
            } => {
                let seconds =
                    f64::from(hour) * 3600.0 + f64::from(minute) * 60.0 + f64::from(second);
                Ok(whole + seconds / 86_400.0)
            }
        }
    }

    /// Parses a date from a free-form string.
    ///
    /// Accepted forms: ISO (`2010-01-05`), `yyyymmdd` digits, `1-JAN-2010`,
    /// `01-May-2008 07:34:42` and `2010/01/05`. Ambiguous numeric forms like
    /// `5/1/2008` require [`Date::parse_ordered`].
    ///
    /// # Errors
    ///
    /// [`CoreError::DateFormat`] when no known form matches;
    /// [`CoreError::DateRange`] when the parsed date is out of range.
    pub fn parse(s: &str) -> CoreResult<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(Self::empty());
        }
        if trimmed.len() == 8 && trimmed.bytes().all(|b| b.is_ascii_digit()) {
            let value: i32 = trimmed
                .parse()
                .map_err(|_| CoreError::date_format(trimmed.to_string()))?;
            return Self::from_yyyymmdd(value);
        }
        for fmt in ["%d-%b-%Y %H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
            if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
                return Self::from_datetime(dt);
            }
        }
        for fmt in ["%Y-%m-%d", "%d-%b-%Y", "%Y/%m/%d", "%d-%b-%y"] {
            if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
                check_range(date)?;
                return Ok(Date(Repr::At {
                    date,
                    hour: 0,
                    minute: 0,
                    second: 0,
                }));
            }
        }
        Err(CoreError::date_format(format!("cannot parse '{trimmed}'")))
    }

    /// Parses an ambiguous `n/n/yyyy` string under the supplied field order.
    ///
    /// # Errors
    ///
    /// [`CoreError::DateFormat`] / [`CoreError::DateRange`] as for
    /// [`Date::parse`].
    pub fn parse_ordered(s: &str, order: DateOrder) -> CoreResult<Self> {
        let formats: &[&str] = match order {
            DateOrder::MonthDayYear => &["%m/%d/%Y", "%m/%d/%y"],
            DateOrder::DayMonthYear => &["%d/%m/%Y", "%d/%m/%y"],
        };
        for fmt in formats {
            if let Ok(date) = NaiveDate::parse_from_str(s.trim(), fmt) {
                check_range(date)?;
                return Ok(Date(Repr::At {
                    date,
                    hour: 0,
                    minute: 0,
                    second: 0,
                }));
            }
        }
        Err(CoreError::date_format(format!("cannot parse '{s}'")))
    }

    /// Parses a date with an explicit chrono format string
    /// (`%Y%m%d`, `%d/%m/%y`, `%F`, ...).
    ///
    /// # Errors
    ///
    /// [`CoreError::DateFormat`] / [`CoreError::DateRange`] as for
    /// [`Date::parse`].
    pub fn parse_format(s: &str, fmt: &str) -> CoreResult<Self> {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Self::from_datetime(dt);
        }
        let date = NaiveDate::parse_from_str(s, fmt)
            .map_err(|e| CoreError::date_format(format!("'{s}' with '{fmt}': {e}")))?;
        check_range(date)?;
        Ok(Date(Repr::At {
            date,
            hour: 0,
            minute: 0,
            second: 0,
        }))
    }

    /// Formats the date with a chrono format string. The empty date formats
    /// as an empty string.
    #[must_use]
    pub fn format(&self, fmt: &str) -> String {
        match self.0 {
            Repr::Empty => String::new(),
            Repr::At {
                date,
                hour,
                minute,
                second,
            } => {
                let time = NaiveTime::from_hms_opt(
                    u32::from(hour),
                    u32::from(minute),
                    u32::from(second),
                )
                .expect("validated time");
                NaiveDateTime::new(date, time).format(fmt).to_string()
            }
        }
    }

    fn from_datetime(dt: NaiveDateTime) -> CoreResult<Self> {
        check_range(dt.date())?;
        Ok(Date(Repr::At {
            date: dt.date(),
            hour: dt.hour() as u8,
            minute: dt.minute() as u8,
            second: dt.second() as u8,
        }))
    }

    /// True for the empty sentinel.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self.0, Repr::Empty)
    }

    /// True when the date is non-empty (and therefore in range).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        match self.0 {
            Repr::Empty => false,
            Repr::At { date, .. } => date.year() >= MIN_YEAR && date.year() <= MAX_YEAR,
        }
    }

    /// Returns the underlying calendar day.
    ///
    /// # Errors
    ///
    /// [`CoreError::DateRange`] on the empty sentinel or a date that escaped
    /// the supported range. Every engine entry point funnels through this
    /// accessor so rejection is uniform.
    pub fn naive_date(&self) -> CoreResult<NaiveDate> {
        match self.0 {
            Repr::Empty => Err(CoreError::date_range("empty date")),
            Repr::At { date, .. } => {
                check_range(date)?;
                Ok(date)
            }
        }
    }

    /// Year component (0 for the empty date).
    #[must_use]
    pub fn year(&self) -> i32 {
        match self.0 {
            Repr::Empty => 0,
            Repr::At { date, .. } => date.year(),
        }
    }

    /// Month component, 1-12 (0 for the empty date).
    #[must_use]
    pub fn month(&self) -> u32 {
        match self.0 {
            Repr::Empty => 0,
            Repr::At { date, .. } => date.month(),
        }
    }

    /// Day component, 1-31 (0 for the empty date).
    #[must_use]
    pub fn day(&self) -> u32 {
        match self.0 {
            Repr::Empty => 0,
            Repr::At { date, .. } => date.day(),
        }
    }

    /// Hour component, 0-23.
    #[must_use]
    pub fn hour(&self) -> u32 {
        match self.0 {
            Repr::Empty => 0,
            Repr::At { hour, .. } => u32::from(hour),
        }
    }

    /// Minute component, 0-59.
    #[must_use]
    pub fn minute(&self) -> u32 {
        match self.0 {
            Repr::Empty => 0,
            Repr::At { minute, .. } => u32::from(minute),
        }
    }

    /// Second component, 0-59.
    #[must_use]
    pub fn second(&self) -> u32 {
        match self.0 {
            Repr::Empty => 0,
            Repr::At { second, .. } => u32::from(second),
        }
    }

    /// Day of year, 1-366 (0 for the empty date).
    #[must_use]
    pub fn day_of_year(&self) -> u32 {
        match self.0 {
            Repr::Empty => 0,
            Repr::At { date, .. } => date.ordinal(),
        }
    }

    /// Day of week.
    ///
    /// # Errors
    ///
    /// [`CoreError::DateRange`] on the empty date.
    pub fn weekday(&self) -> CoreResult<Weekday> {
        Ok(self.naive_date()?.weekday())
    }

    /// Checks whether the date's year is a leap year.
    #[must_use]
    pub fn is_leap_year(&self) -> bool {
        match self.0 {
            Repr::Empty => false,
            Repr::At { date, .. } => date.leap_year(),
        }
    }

    /// Number of days in the date's month (0 for the empty date).
    #[must_use]
    pub fn days_in_month(&self) -> u32 {
        match self.0 {
            Repr::Empty => 0,
            Repr::At { date, .. } => days_in_month(date.year(), date.month()),
        }
    }

    /// Number of days in the date's year.
    #[must_use]
    pub fn days_in_year(&self) -> u32 {
        if self.is_leap_year() {
            366
        } else {
            365
        }
    }

    /// True when the date is the last day of its month.
    #[must_use]
    pub fn is_end_of_month(&self) -> bool {
        !self.is_empty() && self.day() == self.days_in_month()
    }

    /// Returns the last day of the date's month.
    ///
    /// # Errors
    ///
    /// [`CoreError::DateRange`] on the empty date.
    pub fn end_of_month(&self) -> CoreResult<Self> {
        let date = self.naive_date()?;
        Self::from_ymd(date.year(), date.month(), days_in_month(date.year(), date.month()))
    }

    /// Adds calendar days.
    ///
    /// # Errors
    ///
    /// [`CoreError::DateRange`] when the result escapes the supported range
    /// or the input is empty.
    pub fn add_days(&self, days: i64) -> CoreResult<Self> {
        let date = self
            .naive_date()?
            .checked_add_signed(Duration::days(days))
            .ok_or_else(|| CoreError::date_range(format!("{self} + {days}d")))?;
        check_range(date)?;
        Ok(self.with_date(date))
    }

    /// Adds months, clamping the day to the last valid day of the resulting
    /// month (Jan 31 + 1 month is Feb 28/29).
    ///
    /// # Errors
    ///
    /// [`CoreError::DateRange`] when the result escapes the supported range.
    pub fn add_months(&self, months: i32) -> CoreResult<Self> {
        let date = self.naive_date()?;
        let total = date.year() * 12 + date.month() as i32 - 1 + months;
        let new_year = total.div_euclid(12);
        let new_month = (total.rem_euclid(12) + 1) as u32;
        if new_year < MIN_YEAR || new_year > MAX_YEAR {
            return Err(CoreError::date_range(format!("{self} + {months}m")));
        }
        let new_day = date.day().min(days_in_month(new_year, new_month));
        let date = NaiveDate::from_ymd_opt(new_year, new_month, new_day)
            .ok_or_else(|| CoreError::date_range(format!("{self} + {months}m")))?;
        Ok(self.with_date(date))
    }

    /// Adds years, clamping Feb 29 to Feb 28 in non-leap results.
    ///
    /// # Errors
    ///
    /// [`CoreError::DateRange`] when the result escapes the supported range.
    pub fn add_years(&self, years: i32) -> CoreResult<Self> {
        self.add_months(years.checked_mul(12).ok_or_else(|| {
            CoreError::date_range(format!("{self} + {years}y"))
        })?)
    }

    /// Adds `n` units of the given kind. `TimeUnit::None` is a no-op.
    ///
    /// # Errors
    ///
    /// [`CoreError::DateRange`] when the result escapes the supported range.
    pub fn add(&self, n: i32, unit: TimeUnit) -> CoreResult<Self> {
        match unit {
            TimeUnit::None => Ok(*self),
            TimeUnit::Days => self.add_days(i64::from(n)),
            TimeUnit::Weeks => self.add_days(i64::from(n) * 7),
            TimeUnit::Months => self.add_months(n),
            TimeUnit::Years => self.add_years(n),
        }
    }

    /// Adds a tenor string such as `"1Y6M"` or `"2 d 2 w"`.
    ///
    /// Per-unit counts are accumulated separately and applied in the fixed
    /// order Years, Months, Weeks, Days (month and day arithmetic do not
    /// commute in general).
    ///
    /// # Errors
    ///
    /// [`CoreError::TenorFormat`] for malformed strings,
    /// [`CoreError::DateRange`] when the result escapes the supported range.
    pub fn add_tenor(&self, tenor: &str) -> CoreResult<Self> {
        TenorParts::parse(tenor)?.apply_to(*self)
    }

    /// Signed number of calendar days from `self` to `other`.
    #[must_use]
    pub fn days_between(&self, other: &Date) -> i64 {
        match (self.0, other.0) {
            (Repr::At { date: a, .. }, Repr::At { date: b, .. }) => (b - a).num_days(),
            _ => 0,
        }
    }

    fn with_date(&self, date: NaiveDate) -> Self {
        match self.0 {
            Repr::Empty => Date(Repr::At {
                date,
                hour: 0,
                minute: 0,
                second: 0,
            }),
            Repr::At {
                hour,
                minute,
                second,
                ..
            } => Date(Repr::At {
                date,
                hour,
                minute,
                second,
            }),
        }
    }

    /// Builds a date bypassing range validation. Test scaffolding only, for
    /// probing that downstream operations reject out-of-range inputs.
    #[cfg(test)]
    pub(crate) fn unchecked(year: i32, month: u32, day: u32) -> Self {
        Date(Repr::At {
            date: NaiveDate::from_ymd_opt(year, month, day).expect("structurally valid"),
            hour: 0,
            minute: 0,
            second: 0,
        })
    }
}

impl Default for Date {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Repr::Empty => Ok(()),
            Repr::At {
                date,
                hour,
                minute,
                second,
            } => {
                if hour == 0 && minute == 0 && second == 0 {
                    write!(f, "{}", date.format("%Y-%m-%d"))
                } else {
                    write!(
                        f,
                        "{} {hour:02}:{minute:02}:{second:02}",
                        date.format("%Y-%m-%d")
                    )
                }
            }
        }
    }
}

impl Serialize for Date {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Date {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Date::parse(&s).map_err(D::Error::custom)
    }
}

/// Checks whether a year is a leap year.
#[must_use]
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

/// Days in a month for a given year.
#[must_use]
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

fn excel_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1899, 12, 30).expect("epoch is valid")
}

fn check_range(date: NaiveDate) -> CoreResult<()> {
    if date.year() < MIN_YEAR || date.year() > MAX_YEAR {
        return Err(CoreError::date_range(format!(
            "{date} outside {MIN_YEAR}..={MAX_YEAR}"
        )));
    }
    Ok(())
}
