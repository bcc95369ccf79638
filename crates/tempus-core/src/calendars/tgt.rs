//! TARGET settlement days (eurosystem).

use chrono::{Duration, NaiveDate};

use super::holidays::{easter_sunday, HolidaySet};
use crate::types::{MAX_YEAR, MIN_YEAR};

pub(super) fn holidays() -> HolidaySet {
    let mut set = HolidaySet::new();
    for year in MIN_YEAR..=MAX_YEAR {
        let ymd = |m, d| NaiveDate::from_ymd_opt(year, m, d).expect("valid fixed holiday");
        let easter = easter_sunday(year);

        // TARGET closes on the fixed set with no weekend observation.
        set.insert(ymd(1, 1));
        set.insert(easter - Duration::days(2));
        set.insert(easter + Duration::days(1));
        set.insert(ymd(5, 1));
        set.insert(ymd(12, 25));
        set.insert(ymd(12, 26));
    }
    set
}
