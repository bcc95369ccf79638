//! New York bank holidays (Federal Reserve schedule).

use chrono::{NaiveDate, Weekday};

use super::holidays::{last_weekday, nth_weekday, observed_nearest, HolidaySet};
use crate::types::{MAX_YEAR, MIN_YEAR};

pub(super) fn holidays() -> HolidaySet {
    let mut set = HolidaySet::new();
    for year in MIN_YEAR..=MAX_YEAR {
        let ymd = |m, d| NaiveDate::from_ymd_opt(year, m, d).expect("valid fixed holiday");

        // New Year's Day, observed.
        set.insert(observed_nearest(ymd(1, 1)));
        // Martin Luther King Jr. Day: 3rd Monday in January.
        set.insert(nth_weekday(year, 1, Weekday::Mon, 3));
        // Presidents Day: 3rd Monday in February.
        set.insert(nth_weekday(year, 2, Weekday::Mon, 3));
        // Memorial Day: last Monday in May.
        set.insert(last_weekday(year, 5, Weekday::Mon));
        // Juneteenth, observed, since 2021.
        if year >= 2021 {
            set.insert(observed_nearest(ymd(6, 19)));
        }
        // Independence Day, observed.
        set.insert(observed_nearest(ymd(7, 4)));
        // Labor Day: 1st Monday in September.
        set.insert(nth_weekday(year, 9, Weekday::Mon, 1));
        // Columbus Day: 2nd Monday in October.
        set.insert(nth_weekday(year, 10, Weekday::Mon, 2));
        // Veterans Day, observed.
        set.insert(observed_nearest(ymd(11, 11)));
        // Thanksgiving: 4th Thursday in November.
        set.insert(nth_weekday(year, 11, Weekday::Thu, 4));
        // Christmas Day, observed.
        set.insert(observed_nearest(ymd(12, 25)));
    }
    set
}
