//! FX spot date computation.

use tempus_core::calendars::Calendar;
use tempus_core::types::Date;

use crate::error::ScheduleResult;

/// T+n settlement date for a currency pair: the n-th date after the
/// trade date that is a business day under *both* calendars. A holiday
/// in either calendar extends the count; days good in only one calendar
/// do not count.
///
/// `n == 0` returns the trade date unchanged.
///
/// # Errors
///
/// [`crate::ScheduleError::Core`] on an invalid trade date or when the
/// walk escapes the supported range.
pub fn spot_date(
    trade_date: Date,
    n: u32,
    domestic: &Calendar,
    foreign: &Calendar,
) -> ScheduleResult<Date> {
    trade_date.naive_date()?;
    let mut date = trade_date;
    let mut remaining = n;
    while remaining > 0 {
        date = date.add_days(1)?;
        if domestic.is_business_day(date) && foreign.is_business_day(date) {
            remaining -= 1;
        }
    }
    Ok(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempus_core::calendars::default_registry;

    fn ymd(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn cal(code: &str) -> Calendar {
        default_registry().get(code).unwrap()
    }

    #[test]
    fn test_plain_t_plus_two() {
        let nyb = cal("NYB");
        let lnb = cal("LNB");
        // Mid-week, no holidays in either market.
        assert_eq!(
            spot_date(ymd(2024, 3, 5), 2, &nyb, &lnb).unwrap(),
            ymd(2024, 3, 7)
        );
    }

    #[test]
    fn test_weekend_skipped() {
        let nyb = cal("NYB");
        let lnb = cal("LNB");
        // Thursday + 2: Friday counts, the weekend does not.
        assert_eq!(
            spot_date(ymd(2024, 3, 7), 2, &nyb, &lnb).unwrap(),
            ymd(2024, 3, 11)
        );
    }

    #[test]
    fn test_holiday_in_either_calendar_extends() {
        let nyb = cal("NYB");
        let lnb = cal("LNB");
        // 2024-05-27 is both Memorial Day (NYB) and the UK spring bank
        // holiday (LNB).
        assert_eq!(
            spot_date(ymd(2024, 5, 23), 2, &nyb, &lnb).unwrap(),
            ymd(2024, 5, 28)
        );
        // 2024-07-04 closes New York only, but it still does not count.
        assert_eq!(
            spot_date(ymd(2024, 7, 3), 1, &nyb, &lnb).unwrap(),
            ymd(2024, 7, 5)
        );
        // Against a weekend-only calendar the 4th counts.
        assert_eq!(
            spot_date(ymd(2024, 7, 3), 1, &cal("None"), &lnb).unwrap(),
            ymd(2024, 7, 4)
        );
    }

    #[test]
    fn test_zero_returns_trade_date() {
        let nyb = cal("NYB");
        assert_eq!(
            spot_date(ymd(2024, 3, 9), 0, &nyb, &nyb).unwrap(),
            ymd(2024, 3, 9)
        );
    }

    #[test]
    fn test_empty_trade_date_rejected() {
        let nyb = cal("NYB");
        assert!(spot_date(Date::empty(), 2, &nyb, &nyb).is_err());
    }
}
