//! Business day calendars, roll conventions and the calendar registry.
//!
//! A [`Calendar`] is a cheaply-cloneable value (shared bitmap behind an
//! `Arc`) identified by its market code. Each calendar carries a weekend
//! set — Saturday and Sunday unless built with [`Calendar::with_weekend`]
//! — and a per-market holiday set; weekend days are never settlement
//! days, including under the weekend-only `None` calendar.

use chrono::{Datelike, NaiveDate, Weekday};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

mod conventions;
mod dbb;
mod holidays;
mod lnb;
mod nyb;
mod registry;
mod syb;
mod tgt;
mod tkb;

pub use conventions::RollConvention;
pub use holidays::HolidaySet;
pub use registry::{default_registry, CalendarRegistry};

use crate::error::{CoreError, CoreResult};
use crate::types::Date;

/// Weekday bitmask, bit `n` = n days from Monday.
const WEEKEND_SAT_SUN: u8 = (1 << 5) | (1 << 6);

fn weekend_mask(days: impl IntoIterator<Item = Weekday>) -> u8 {
    days.into_iter()
        .fold(0, |mask, d| mask | (1u8 << d.num_days_from_monday()))
}

struct Inner {
    code: String,
    holidays: HolidaySet,
    weekend: u8,
}

/// A market holiday calendar.
///
/// Equality, hashing and display all go by the market code; two calendars
/// with the same code are the same calendar. Composite calendars built
/// with [`Calendar::union`] carry a `+`-joined code and treat a day as a
/// holiday when any constituent does.
#[derive(Clone)]
pub struct Calendar {
    inner: Arc<Inner>,
}

impl fmt::Debug for Calendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Calendar")
            .field("code", &self.inner.code)
            .field("holidays", &self.inner.holidays.count())
            .finish()
    }
}

impl fmt::Display for Calendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner.code)
    }
}

impl PartialEq for Calendar {
    fn eq(&self, other: &Self) -> bool {
        self.inner.code == other.inner.code
    }
}

impl Eq for Calendar {}

impl Hash for Calendar {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.code.hash(state);
    }
}

impl Calendar {
    fn new(code: impl Into<String>, holidays: HolidaySet) -> Self {
        Self::with_weekend_mask(code, holidays, WEEKEND_SAT_SUN)
    }

    fn with_weekend_mask(code: impl Into<String>, holidays: HolidaySet, weekend: u8) -> Self {
        Calendar {
            inner: Arc::new(Inner {
                code: code.into(),
                holidays,
                weekend,
            }),
        }
    }

    /// A calendar with no market holidays; weekends still apply.
    #[must_use]
    pub fn weekend_only(code: impl Into<String>) -> Self {
        Self::new(code, HolidaySet::new())
    }

    /// A calendar from an explicit holiday list.
    #[must_use]
    pub fn from_holidays(code: impl Into<String>, dates: impl IntoIterator<Item = Date>) -> Self {
        let set = dates
            .into_iter()
            .filter_map(|d| d.naive_date().ok())
            .collect();
        Self::new(code, set)
    }

    /// A calendar with a custom weekend-day set (e.g. Friday/Saturday
    /// markets) and an explicit holiday list. An empty weekend set means
    /// every day of the week may settle.
    #[must_use]
    pub fn with_weekend(
        code: impl Into<String>,
        weekend: impl IntoIterator<Item = Weekday>,
        dates: impl IntoIterator<Item = Date>,
    ) -> Self {
        let set = dates
            .into_iter()
            .filter_map(|d| d.naive_date().ok())
            .collect();
        Self::with_weekend_mask(code, set, weekend_mask(weekend))
    }

    /// Builds the built-in calendar for a market code, if one exists.
    pub(crate) fn builtin(code: &str) -> Option<Self> {
        let holidays = match code {
            "NYB" => nyb::holidays(),
            "LNB" => lnb::holidays(),
            "TGT" => tgt::holidays(),
            "TKB" => tkb::holidays(),
            "SYB" => syb::holidays(),
            "DBB" => dbb::holidays(),
            "None" => HolidaySet::new(),
            _ => return None,
        };
        Some(Self::new(code, holidays))
    }

    /// The market code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.inner.code
    }

    /// Combines two calendars: a day settles only when it settles under
    /// both, so weekend sets and holiday sets both merge.
    #[must_use]
    pub fn union(&self, other: &Calendar) -> Calendar {
        let mut holidays = self.inner.holidays.clone();
        holidays.merge(&other.inner.holidays);
        Self::with_weekend_mask(
            format!("{}+{}", self.inner.code, other.inner.code),
            holidays,
            self.inner.weekend | other.inner.weekend,
        )
    }

    fn is_weekend_day(&self, date: NaiveDate) -> bool {
        self.inner.weekend & (1u8 << date.weekday().num_days_from_monday()) != 0
    }

    /// True when the date falls in this calendar's weekend set. Empty
    /// dates are never weekends.
    #[must_use]
    pub fn is_weekend(&self, date: Date) -> bool {
        match date.naive_date() {
            Ok(d) => self.is_weekend_day(d),
            Err(_) => false,
        }
    }

    /// True when the date is a marked holiday (weekends excluded).
    #[must_use]
    pub fn is_holiday(&self, date: Date) -> bool {
        match date.naive_date() {
            Ok(d) => self.inner.holidays.contains(d),
            Err(_) => false,
        }
    }

    /// True when the date is a settlement day: in range, not a weekend and
    /// not a holiday.
    #[must_use]
    pub fn is_business_day(&self, date: Date) -> bool {
        match date.naive_date() {
            Ok(d) => !self.is_weekend_day(d) && !self.inner.holidays.contains(d),
            Err(_) => false,
        }
    }

    /// Rolls a date onto a business day under a convention.
    ///
    /// # Errors
    ///
    /// [`CoreError::DateRange`] on empty or out-of-range input, or when
    /// the roll walks off the supported range.
    pub fn roll(&self, date: Date, convention: RollConvention) -> CoreResult<Date> {
        conventions::roll(date, convention, self)
    }

    /// The next business day strictly after the given date.
    ///
    /// # Errors
    ///
    /// [`CoreError::DateRange`] as for [`Calendar::roll`].
    pub fn next_business_day(&self, date: Date) -> CoreResult<Date> {
        self.roll(date.add_days(1)?, RollConvention::Following)
    }

    /// The previous business day strictly before the given date.
    ///
    /// # Errors
    ///
    /// [`CoreError::DateRange`] as for [`Calendar::roll`].
    pub fn previous_business_day(&self, date: Date) -> CoreResult<Date> {
        self.roll(date.add_days(-1)?, RollConvention::Preceding)
    }

    /// Moves a date by a signed number of business days. Zero validates
    /// the input and returns it unchanged, even on a non-business day.
    ///
    /// # Errors
    ///
    /// [`CoreError::DateRange`] as for [`Calendar::roll`].
    pub fn add_business_days(&self, date: Date, days: i32) -> CoreResult<Date> {
        let mut result = date;
        result.naive_date()?;
        let step: i64 = if days >= 0 { 1 } else { -1 };
        let mut remaining = days.unsigned_abs();
        while remaining > 0 {
            result = result.add_days(step)?;
            if self.is_business_day(result) {
                remaining -= 1;
            }
        }
        Ok(result)
    }

    /// Counts business days between two dates, exclusive of the start and
    /// inclusive of the end. Reversed arguments give the negated count.
    ///
    /// # Errors
    ///
    /// [`CoreError::DateRange`] on empty or out-of-range input.
    pub fn business_days_between(&self, start: Date, end: Date) -> CoreResult<i64> {
        start.naive_date()?;
        end.naive_date()?;
        if end < start {
            return Ok(-self.business_days_between(end, start)?);
        }
        let mut count = 0;
        let mut current = start.add_days(1)?;
        while current <= end {
            if self.is_business_day(current) {
                count += 1;
            }
            if current == end {
                break;
            }
            current = current.add_days(1)?;
        }
        Ok(count)
    }

    /// Lists the marked holidays falling within `start..=end`.
    ///
    /// # Errors
    ///
    /// [`CoreError::DateRange`] on empty or out-of-range input, or when
    /// `end` precedes `start`.
    pub fn holidays_between(&self, start: Date, end: Date) -> CoreResult<Vec<Date>> {
        let mut s = start.naive_date()?;
        let e = end.naive_date()?;
        if e < s {
            return Err(CoreError::argument_range(format!(
                "end {end} precedes start {start}"
            )));
        }
        let mut out = Vec::new();
        while s <= e {
            if self.inner.holidays.contains(s) {
                out.push(Date::from_ymd(s.year(), s.month(), s.day())?);
            }
            s = s.succ_opt().ok_or_else(|| {
                CoreError::date_range("date range overflow")
            })?;
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_weekend_only_still_excludes_weekends() {
        let cal = Calendar::weekend_only("None");
        assert!(cal.is_business_day(ymd(2025, 1, 6))); // Monday
        assert!(!cal.is_business_day(ymd(2025, 1, 4))); // Saturday
        assert!(!cal.is_business_day(ymd(2025, 1, 5))); // Sunday
    }

    #[test]
    fn test_builtin_nyb() {
        let cal = Calendar::builtin("NYB").unwrap();
        assert!(!cal.is_business_day(ymd(2025, 7, 4)));
        assert!(cal.is_holiday(ymd(2025, 7, 4)));
        assert!(cal.is_business_day(ymd(2025, 7, 7)));
        // Weekend is not a holiday, just a weekend.
        assert!(cal.is_weekend(ymd(2025, 7, 5)));
        assert!(!cal.is_holiday(ymd(2025, 7, 5)));
    }

    #[test]
    fn test_equality_by_code() {
        let a = Calendar::builtin("NYB").unwrap();
        let b = Calendar::builtin("NYB").unwrap();
        let c = Calendar::builtin("LNB").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_union() {
        let nyb = Calendar::builtin("NYB").unwrap();
        let lnb = Calendar::builtin("LNB").unwrap();
        let both = nyb.union(&lnb);
        assert_eq!(both.code(), "NYB+LNB");
        // July 4 is only a New York holiday; Easter Monday only London.
        assert!(!both.is_business_day(ymd(2025, 7, 4)));
        assert!(!both.is_business_day(ymd(2025, 4, 21)));
        assert!(lnb.is_business_day(ymd(2025, 7, 4)));
        assert!(nyb.is_business_day(ymd(2025, 4, 21)));
    }

    #[test]
    fn test_custom_weekend() {
        let cal = Calendar::with_weekend(
            "GCC",
            [Weekday::Fri, Weekday::Sat],
            [ymd(2021, 7, 20)],
        );
        // 2021-07-16 is a Friday: weekend in this market.
        assert!(cal.is_weekend(ymd(2021, 7, 16)));
        assert!(!cal.is_business_day(ymd(2021, 7, 16)));
        // Sunday is a working day.
        assert!(!cal.is_weekend(ymd(2021, 7, 18)));
        assert!(cal.is_business_day(ymd(2021, 7, 18)));
        // Listed holiday on a Tuesday.
        assert!(!cal.is_business_day(ymd(2021, 7, 20)));
        // Rolling lands on the Sunday.
        assert_eq!(
            cal.roll(ymd(2021, 7, 16), RollConvention::Following).unwrap(),
            ymd(2021, 7, 18)
        );
    }

    #[test]
    fn test_union_merges_weekend_sets() {
        let gcc =
            Calendar::with_weekend("GCC", [Weekday::Fri, Weekday::Sat], std::iter::empty::<Date>());
        let nyb = Calendar::builtin("NYB").unwrap();
        let both = gcc.union(&nyb);
        // Friday through Sunday are all non-settlement under the pair.
        assert!(!both.is_business_day(ymd(2021, 7, 16)));
        assert!(!both.is_business_day(ymd(2021, 7, 17)));
        assert!(!both.is_business_day(ymd(2021, 7, 18)));
        assert!(both.is_business_day(ymd(2021, 7, 19)));
    }

    #[test]
    fn test_add_business_days() {
        let cal = Calendar::builtin("NYB").unwrap();
        // Thursday 2025-07-03 + 1 business day skips July 4 and the weekend.
        assert_eq!(
            cal.add_business_days(ymd(2025, 7, 3), 1).unwrap(),
            ymd(2025, 7, 7)
        );
        assert_eq!(
            cal.add_business_days(ymd(2025, 7, 7), -1).unwrap(),
            ymd(2025, 7, 3)
        );
        // Zero is a validated no-op even on a holiday.
        assert_eq!(
            cal.add_business_days(ymd(2025, 7, 4), 0).unwrap(),
            ymd(2025, 7, 4)
        );
    }

    #[test]
    fn test_business_days_between() {
        let cal = Calendar::weekend_only("None");
        // Mon 2025-01-06 .. Fri 2025-01-10: start exclusive, end inclusive.
        assert_eq!(
            cal.business_days_between(ymd(2025, 1, 6), ymd(2025, 1, 10))
                .unwrap(),
            4
        );
        assert_eq!(
            cal.business_days_between(ymd(2025, 1, 10), ymd(2025, 1, 6))
                .unwrap(),
            -4
        );
        assert_eq!(
            cal.business_days_between(ymd(2025, 1, 6), ymd(2025, 1, 6))
                .unwrap(),
            0
        );
    }

    #[test]
    fn test_holidays_between() {
        let cal = Calendar::builtin("NYB").unwrap();
        let list = cal
            .holidays_between(ymd(2025, 7, 1), ymd(2025, 7, 31))
            .unwrap();
        assert_eq!(list, vec![ymd(2025, 7, 4)]);
    }

    #[test]
    fn test_empty_date_predicates() {
        let cal = Calendar::builtin("NYB").unwrap();
        assert!(!cal.is_business_day(Date::empty()));
        assert!(!cal.is_holiday(Date::empty()));
        assert!(!cal.is_weekend(Date::empty()));
        assert!(cal.business_days_between(Date::empty(), ymd(2025, 1, 6)).is_err());
    }
}
