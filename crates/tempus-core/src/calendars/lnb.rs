//! London bank holidays.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use super::holidays::{easter_sunday, last_weekday, nth_weekday, observed_next_monday, HolidaySet};
use crate::types::{MAX_YEAR, MIN_YEAR};

pub(super) fn holidays() -> HolidaySet {
    let mut set = HolidaySet::new();
    for year in MIN_YEAR..=MAX_YEAR {
        let ymd = |m, d| NaiveDate::from_ymd_opt(year, m, d).expect("valid fixed holiday");
        let easter = easter_sunday(year);

        // New Year's Day, moved to Monday when it falls on a weekend.
        set.insert(observed_next_monday(ymd(1, 1)));
        // Good Friday and Easter Monday.
        set.insert(easter - Duration::days(2));
        set.insert(easter + Duration::days(1));
        // Early May bank holiday: 1st Monday in May.
        set.insert(nth_weekday(year, 5, Weekday::Mon, 1));
        // Spring bank holiday: last Monday in May.
        set.insert(last_weekday(year, 5, Weekday::Mon));
        // Summer bank holiday: last Monday in August.
        set.insert(last_weekday(year, 8, Weekday::Mon));
        // Christmas and Boxing Day slide past the weekend as a pair.
        set.insert(observed_weekend_pair(ymd(12, 25)));
        set.insert(observed_weekend_pair(ymd(12, 26)));
    }
    set
}

/// Christmas-pair observation: a weekend holiday moves two days forward so
/// 25/26 Dec map onto 27/28 whichever of them hits the weekend.
fn observed_weekend_pair(date: NaiveDate) -> NaiveDate {
    match date.weekday() {
        Weekday::Sat | Weekday::Sun => date + Duration::days(2),
        _ => date,
    }
}
