//! Sydney bank holidays.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use super::holidays::{easter_sunday, nth_weekday, observed_next_monday, HolidaySet};
use crate::types::{MAX_YEAR, MIN_YEAR};

pub(super) fn holidays() -> HolidaySet {
    let mut set = HolidaySet::new();
    for year in MIN_YEAR..=MAX_YEAR {
        let ymd = |m, d| NaiveDate::from_ymd_opt(year, m, d).expect("valid fixed holiday");
        let easter = easter_sunday(year);

        // New Year's Day, moved to Monday on a weekend.
        set.insert(observed_next_monday(ymd(1, 1)));
        // Australia Day, moved to Monday on a weekend.
        set.insert(observed_next_monday(ymd(1, 26)));
        // Good Friday and Easter Monday.
        set.insert(easter - Duration::days(2));
        set.insert(easter + Duration::days(1));
        // Anzac Day, no observation shift.
        set.insert(ymd(4, 25));
        // King's Birthday: 2nd Monday in June.
        set.insert(nth_weekday(year, 6, Weekday::Mon, 2));
        // NSW bank holiday: 1st Monday in August.
        set.insert(nth_weekday(year, 8, Weekday::Mon, 1));
        // Labour Day: 1st Monday in October.
        set.insert(nth_weekday(year, 10, Weekday::Mon, 1));
        // Christmas and Boxing Day slide past the weekend as a pair.
        set.insert(christmas_pair(ymd(12, 25)));
        set.insert(christmas_pair(ymd(12, 26)));
    }
    set
}

fn christmas_pair(date: NaiveDate) -> NaiveDate {
    match date.weekday() {
        Weekday::Sat | Weekday::Sun => date + Duration::days(2),
        _ => date,
    }
}
