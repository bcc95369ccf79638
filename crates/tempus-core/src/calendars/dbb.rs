//! Dublin bank holidays.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use super::holidays::{easter_sunday, last_weekday, nth_weekday, observed_next_monday, HolidaySet};
use crate::types::{MAX_YEAR, MIN_YEAR};

pub(super) fn holidays() -> HolidaySet {
    let mut set = HolidaySet::new();
    for year in MIN_YEAR..=MAX_YEAR {
        let ymd = |m, d| NaiveDate::from_ymd_opt(year, m, d).expect("valid fixed holiday");
        let easter = easter_sunday(year);

        // New Year's Day, moved to Monday on a weekend.
        set.insert(observed_next_monday(ymd(1, 1)));
        // St Brigid's Day since 2023: 1st Monday in February, or Feb 1
        // itself when it falls on a Friday.
        if year >= 2023 {
            let feb1 = ymd(2, 1);
            set.insert(if feb1.weekday() == Weekday::Fri {
                feb1
            } else {
                nth_weekday(year, 2, Weekday::Mon, 1)
            });
        }
        // St Patrick's Day, moved to Monday on a weekend.
        set.insert(observed_next_monday(ymd(3, 17)));
        // Good Friday and Easter Monday.
        set.insert(easter - Duration::days(2));
        set.insert(easter + Duration::days(1));
        // May, June and August bank holidays: first Mondays.
        set.insert(nth_weekday(year, 5, Weekday::Mon, 1));
        set.insert(nth_weekday(year, 6, Weekday::Mon, 1));
        set.insert(nth_weekday(year, 8, Weekday::Mon, 1));
        // October bank holiday: last Monday.
        set.insert(last_weekday(year, 10, Weekday::Mon));
        // Christmas and St Stephen's Day slide past the weekend as a pair.
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
