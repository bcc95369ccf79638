//! 30/360 day count formulas.
//!
//! All variants share the skeleton
//! `360 * (Y2 - Y1) + 30 * (M2 - M1) + (D2 - D1)` and differ only in the
//! day-of-month adjustments applied before it.

use crate::types::Date;

/// Checks if a date is the last day of February.
#[inline]
fn is_last_day_of_february(date: Date) -> bool {
    date.month() == 2 && date.is_end_of_month()
}

#[inline]
fn skeleton(start: Date, end: Date, d1: i64, d2: i64) -> i64 {
    360 * (i64::from(end.year()) - i64::from(start.year()))
        + 30 * (i64::from(end.month()) - i64::from(start.month()))
        + (d2 - d1)
}

/// 30/360 bond basis (ISDA).
///
/// D1 of 31 becomes 30; D2 of 31 becomes 30 only when D1 is already 30 or
/// more. No February handling.
pub(super) fn bond_basis(start: Date, end: Date) -> i64 {
    let mut d1 = i64::from(start.day());
    let mut d2 = i64::from(end.day());
    if d1 == 31 {
        d1 = 30;
    }
    if d2 == 31 && d1 >= 30 {
        d2 = 30;
    }
    skeleton(start, end, d1, d2)
}

/// 30E/360 eurobond basis.
///
/// Both D1 and D2 of 31 become 30, unconditionally.
pub(super) fn eurobond(start: Date, end: Date) -> i64 {
    let d1 = i64::from(start.day()).min(30);
    let d2 = i64::from(end.day()).min(30);
    skeleton(start, end, d1, d2)
}

/// 30/360 SIA variant with February end-of-month rules.
///
/// 1. D1 at the last day of February becomes 30.
/// 2. Otherwise D1 of 31 becomes 30.
/// 3. D2 at the last day of February becomes 30 only when rule 1 fired.
/// 4. Otherwise D2 of 31 becomes 30 when D1 is now 30 or more.
pub(super) fn sia(start: Date, end: Date) -> i64 {
    let mut d1 = i64::from(start.day());
    let mut d2 = i64::from(end.day());

    let d1_was_feb_eom = is_last_day_of_february(start);
    if d1_was_feb_eom {
        d1 = 30;
    } else if d1 == 31 {
        d1 = 30;
    }

    if is_last_day_of_february(end) && d1_was_feb_eom {
        d2 = 30;
    } else if d2 == 31 && d1 >= 30 {
        d2 = 30;
    }

    skeleton(start, end, d1, d2)
}
