//! Standard CDS maturity and accrual-start rules.
//!
//! Contract maturities align on the 20th of March, June, September and
//! December. The market moved from quarterly to semi-annual rolls on
//! 2015-12-20; [`maturity`] selects the variant from a cutover date.

use tempus_core::calendars::{Calendar, RollConvention};
use tempus_core::types::{Date, Tenor};

use crate::error::ScheduleResult;

/// Default cutover from quarterly to semi-annual maturity rolls.
pub const ROLL_CUTOVER: (i32, u32, u32) = (2015, 12, 20);

const QUARTERLY_MONTHS: [u32; 4] = [3, 6, 9, 12];
const SEMI_ANNUAL_MONTHS: [u32; 2] = [6, 12];

/// Quarterly maturity roll: the tenor is applied to the as-of date and
/// the result snaps to the next quarterly 20th strictly after it.
///
/// # Errors
///
/// [`crate::ScheduleError::Core`] on an invalid as-of date or when the
/// roll escapes the supported range.
pub fn maturity_3m(as_of: Date, tenor: Tenor) -> ScheduleResult<Date> {
    let anchor = tenor.add_to(as_of)?;
    next_roll_date(anchor, &QUARTERLY_MONTHS)
}

/// Semi-annual maturity roll over the June and December 20ths.
///
/// # Errors
///
/// Same as [`maturity_3m`].
pub fn maturity_6m(as_of: Date, tenor: Tenor) -> ScheduleResult<Date> {
    let anchor = tenor.add_to(as_of)?;
    next_roll_date(anchor, &SEMI_ANNUAL_MONTHS)
}

/// Combined maturity rule: semi-annual on or after the cutover date,
/// quarterly before it. `cutover` defaults to [`ROLL_CUTOVER`].
///
/// # Errors
///
/// Same as [`maturity_3m`].
pub fn maturity(as_of: Date, tenor: Tenor, cutover: Option<Date>) -> ScheduleResult<Date> {
    let cutover = match cutover {
        Some(date) => date,
        None => Date::from_ymd(ROLL_CUTOVER.0, ROLL_CUTOVER.1, ROLL_CUTOVER.2)?,
    };
    if as_of >= cutover {
        maturity_6m(as_of, tenor)
    } else {
        maturity_3m(as_of, tenor)
    }
}

/// Accrual start of the standard quarterly trading window containing the
/// as-of date: the latest quarterly 20th whose business-day-adjusted
/// date does not lie after as-of, adjusted Following.
///
/// # Errors
///
/// [`crate::ScheduleError::Core`] on an invalid as-of date.
pub fn snac_accrual_start(as_of: Date, calendar: &Calendar) -> ScheduleResult<Date> {
    as_of.naive_date()?;
    let mut unadjusted = next_roll_date(as_of, &QUARTERLY_MONTHS)?;
    loop {
        unadjusted = unadjusted.add_months(-3)?;
        let rolled = calendar.roll(unadjusted, RollConvention::Following)?;
        if rolled <= as_of {
            return Ok(rolled);
        }
    }
}

/// Smallest roll-month 20th strictly after the given date.
fn next_roll_date(date: Date, months: &[u32]) -> ScheduleResult<Date> {
    date.naive_date()?;
    let mut year = date.year();
    loop {
        for &month in months {
            let candidate = Date::from_ymd(year, month, 20)?;
            if candidate > date {
                return Ok(candidate);
            }
        }
        year += 1;
    }
}
