//! Tokyo bank holidays.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use super::holidays::{nth_weekday, HolidaySet};
use crate::types::{MAX_YEAR, MIN_YEAR};

pub(super) fn holidays() -> HolidaySet {
    let mut set = HolidaySet::new();
    for year in MIN_YEAR..=MAX_YEAR {
        let ymd = |m, d| NaiveDate::from_ymd_opt(year, m, d).expect("valid fixed holiday");

        let mut national = vec![
            // New Year's Day.
            ymd(1, 1),
            // National Foundation Day.
            ymd(2, 11),
            // Vernal Equinox.
            ymd(3, vernal_equinox_day(year)),
            // Showa Day / Greenery Day (Apr 29 under both regimes).
            ymd(4, 29),
            // Constitution Day, Greenery Day, Children's Day.
            ymd(5, 3),
            ymd(5, 4),
            ymd(5, 5),
            // Autumnal Equinox.
            ymd(9, autumnal_equinox_day(year)),
            // Culture Day and Labor Thanksgiving Day.
            ymd(11, 3),
            ymd(11, 23),
        ];
        // Coming of Age Day: 2nd Monday in January since 2000, Jan 15 before.
        national.push(if year >= 2000 {
            nth_weekday(year, 1, Weekday::Mon, 2)
        } else {
            ymd(1, 15)
        });
        // Marine Day: 3rd Monday in July since 2003, Jul 20 from 1996.
        if year >= 2003 {
            national.push(nth_weekday(year, 7, Weekday::Mon, 3));
        } else if year >= 1996 {
            national.push(ymd(7, 20));
        }
        // Mountain Day since 2016.
        if year >= 2016 {
            national.push(ymd(8, 11));
        }
        // Respect for the Aged Day: 3rd Monday in September since 2003.
        national.push(if year >= 2003 {
            nth_weekday(year, 9, Weekday::Mon, 3)
        } else {
            ymd(9, 15)
        });
        // Health-Sports Day: 2nd Monday in October since 2000.
        national.push(if year >= 2000 {
            nth_weekday(year, 10, Weekday::Mon, 2)
        } else {
            ymd(10, 10)
        });
        // Emperor's Birthday: Feb 23 since 2020, Dec 23 in 1989-2018.
        if year >= 2020 {
            national.push(ymd(2, 23));
        } else if (1989..=2018).contains(&year) {
            national.push(ymd(12, 23));
        }

        for date in national {
            set.insert(date);
            // Substitute holiday: a national holiday on Sunday shifts the
            // following Monday.
            if date.weekday() == Weekday::Sun {
                set.insert(date + Duration::days(1));
            }
        }

        // Bank closures around the year end (no substitutes).
        set.insert(ymd(1, 2));
        set.insert(ymd(1, 3));
        set.insert(ymd(12, 31));
    }
    set
}

/// March equinox day-of-month. The astronomical approximation is valid
/// for 1900..=2099; later years fall back to the modal value.
fn vernal_equinox_day(year: i32) -> u32 {
    if year > 2099 {
        return 20;
    }
    equinox_day(year, 20.8431)
}

/// September equinox day-of-month, same validity window.
fn autumnal_equinox_day(year: i32) -> u32 {
    if year > 2099 {
        return 23;
    }
    equinox_day(year, 23.2488)
}

fn equinox_day(year: i32, base: f64) -> u32 {
    let n = f64::from(year - 1980);
    let day = (base + 0.242194 * n).floor() - (n / 4.0).floor();
    day as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_fixed_holidays() {
        let set = holidays();
        assert!(set.contains(ymd(2025, 1, 1)));
        assert!(set.contains(ymd(2025, 5, 5)));
        assert!(set.contains(ymd(2025, 11, 3)));
        assert!(set.contains(ymd(2025, 12, 31)));
    }

    #[test]
    fn test_happy_monday_holidays() {
        let set = holidays();
        assert!(set.contains(ymd(2025, 1, 13))); // Coming of Age Day
        assert!(set.contains(ymd(2025, 7, 21))); // Marine Day
        assert!(set.contains(ymd(2025, 10, 13))); // Sports Day
    }

    #[test]
    fn test_equinoxes() {
        let set = holidays();
        assert!(set.contains(ymd(2025, 3, 20)));
        assert!(set.contains(ymd(2025, 9, 23)));
        assert!(set.contains(ymd(2024, 3, 20)));
        assert!(set.contains(ymd(2024, 9, 22)));
    }

    #[test]
    fn test_substitute_monday() {
        let set = holidays();
        // 2025-02-23 (Emperor's Birthday) is a Sunday; Monday 24th closes.
        assert!(set.contains(ymd(2025, 2, 24)));
        // 2025-05-04 is a Sunday; substitute lands on Tuesday via the
        // chained Golden Week days, so Monday the 5th is already a holiday.
        assert!(set.contains(ymd(2025, 5, 5)));
    }
}
