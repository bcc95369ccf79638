//! Bitmap holiday storage and date-rule helpers.
//!
//! Each calendar stores its holidays in a fixed-size bitmap spanning the
//! full supported year range, giving O(1) holiday checks. The helpers at
//! the bottom compute rule-based dates (nth weekday, Easter, weekend
//! observation shifts) used by the built-in market calendars.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::types::{MAX_YEAR, MIN_YEAR};

const YEAR_COUNT: usize = (MAX_YEAR - MIN_YEAR + 1) as usize;
const MAX_DAYS_PER_YEAR: usize = 366;
const TOTAL_BITS: usize = YEAR_COUNT * MAX_DAYS_PER_YEAR;
const WORD_COUNT: usize = (TOTAL_BITS + 63) / 64;

/// Fixed-size holiday bitmap covering every day from 1900 to 2149.
///
/// One bit per (year, ordinal-day) slot; roughly 11KB per calendar.
#[derive(Clone)]
pub struct HolidaySet {
    bits: Box<[u64; WORD_COUNT]>,
}

impl std::fmt::Debug for HolidaySet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HolidaySet")
            .field("count", &self.count())
            .finish()
    }
}

impl Default for HolidaySet {
    fn default() -> Self {
        Self::new()
    }
}

impl HolidaySet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            bits: Box::new([0u64; WORD_COUNT]),
        }
    }

    fn bit_index(date: NaiveDate) -> Option<usize> {
        let year = date.year();
        if year < MIN_YEAR || year > MAX_YEAR {
            return None;
        }
        let year_offset = (year - MIN_YEAR) as usize;
        Some(year_offset * MAX_DAYS_PER_YEAR + (date.ordinal0() as usize))
    }

    /// Marks a date as a holiday. Out-of-range dates are ignored.
    pub fn insert(&mut self, date: NaiveDate) {
        if let Some(idx) = Self::bit_index(date) {
            self.bits[idx / 64] |= 1u64 << (idx % 64);
        }
    }

    /// O(1) holiday check.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        match Self::bit_index(date) {
            Some(idx) => self.bits[idx / 64] & (1u64 << (idx % 64)) != 0,
            None => false,
        }
    }

    /// Number of marked days.
    #[must_use]
    pub fn count(&self) -> usize {
        self.bits.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Set union, in place.
    pub fn merge(&mut self, other: &HolidaySet) {
        for (word, o) in self.bits.iter_mut().zip(other.bits.iter()) {
            *word |= o;
        }
    }
}

impl FromIterator<NaiveDate> for HolidaySet {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        let mut set = Self::new();
        for date in iter {
            set.insert(date);
        }
        set
    }
}

/// The nth occurrence (1-based) of a weekday within a month.
pub(crate) fn nth_weekday(year: i32, month: u32, weekday: Weekday, n: u32) -> NaiveDate {
    let first = NaiveDate::from_ymd_opt(year, month, 1).expect("valid month");
    let offset = (7 + weekday.num_days_from_monday() - first.weekday().num_days_from_monday()) % 7;
    first + Duration::days(i64::from(offset) + i64::from(n - 1) * 7)
}

/// The last occurrence of a weekday within a month.
pub(crate) fn last_weekday(year: i32, month: u32, weekday: Weekday) -> NaiveDate {
    let last_day = crate::types::days_in_month(year, month);
    let last = NaiveDate::from_ymd_opt(year, month, last_day).expect("valid month");
    let offset = (7 + last.weekday().num_days_from_monday() - weekday.num_days_from_monday()) % 7;
    last - Duration::days(i64::from(offset))
}

/// Easter Sunday (Gregorian), via the Meeus/Jones/Butcher algorithm.
pub(crate) fn easter_sunday(year: i32) -> NaiveDate {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = ((h + l - 7 * m + 114) % 31) + 1;
    NaiveDate::from_ymd_opt(year, month as u32, day as u32).expect("easter is always valid")
}

/// US-style observation: Saturday observed on the preceding Friday,
/// Sunday on the following Monday.
pub(crate) fn observed_nearest(date: NaiveDate) -> NaiveDate {
    match date.weekday() {
        Weekday::Sat => date - Duration::days(1),
        Weekday::Sun => date + Duration::days(1),
        _ => date,
    }
}

/// UK-style observation: weekend holidays move to the next Monday.
pub(crate) fn observed_next_monday(date: NaiveDate) -> NaiveDate {
    match date.weekday() {
        Weekday::Sat => date + Duration::days(2),
        Weekday::Sun => date + Duration::days(1),
        _ => date,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_insert_and_contains() {
        let mut set = HolidaySet::new();
        set.insert(ymd(2025, 1, 1));
        set.insert(ymd(2025, 12, 25));
        assert!(set.contains(ymd(2025, 1, 1)));
        assert!(set.contains(ymd(2025, 12, 25)));
        assert!(!set.contains(ymd(2025, 1, 2)));
        assert_eq!(set.count(), 2);
    }

    #[test]
    fn test_out_of_range_ignored() {
        let mut set = HolidaySet::new();
        set.insert(ymd(1899, 12, 31));
        assert_eq!(set.count(), 0);
        assert!(!set.contains(ymd(1899, 12, 31)));
    }

    #[test]
    fn test_merge() {
        let a: HolidaySet = [ymd(2025, 1, 1)].into_iter().collect();
        let mut b: HolidaySet = [ymd(2025, 7, 4)].into_iter().collect();
        b.merge(&a);
        assert!(b.contains(ymd(2025, 1, 1)));
        assert!(b.contains(ymd(2025, 7, 4)));
    }

    #[test]
    fn test_nth_weekday() {
        // Thanksgiving 2025: 4th Thursday in November.
        assert_eq!(nth_weekday(2025, 11, Weekday::Thu, 4), ymd(2025, 11, 27));
        // MLK Day 2025: 3rd Monday in January.
        assert_eq!(nth_weekday(2025, 1, Weekday::Mon, 3), ymd(2025, 1, 20));
    }

    #[test]
    fn test_last_weekday() {
        // Memorial Day 2025: last Monday in May.
        assert_eq!(last_weekday(2025, 5, Weekday::Mon), ymd(2025, 5, 26));
        assert_eq!(last_weekday(2024, 5, Weekday::Mon), ymd(2024, 5, 27));
    }

    #[test]
    fn test_easter() {
        assert_eq!(easter_sunday(2025), ymd(2025, 4, 20));
        assert_eq!(easter_sunday(2024), ymd(2024, 3, 31));
        assert_eq!(easter_sunday(2000), ymd(2000, 4, 23));
        assert_eq!(easter_sunday(1999), ymd(1999, 4, 4));
    }

    #[test]
    fn test_observation_shifts() {
        // 2022-12-25 is a Sunday.
        assert_eq!(observed_nearest(ymd(2022, 12, 25)), ymd(2022, 12, 26));
        assert_eq!(observed_next_monday(ymd(2022, 12, 25)), ymd(2022, 12, 26));
        // 2021-12-25 is a Saturday.
        assert_eq!(observed_nearest(ymd(2021, 12, 25)), ymd(2021, 12, 24));
        assert_eq!(observed_next_monday(ymd(2021, 12, 25)), ymd(2021, 12, 27));
    }
}
