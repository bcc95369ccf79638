//! Actual/Actual year fraction formulas.

use rust_decimal::Decimal;

use crate::error::CoreResult;
use crate::types::{is_leap_year, Date, Frequency};

/// ACT/ACT ISDA: the period is split at year boundaries and each slice is
/// divided by the actual length of its year.
pub(super) fn isda(start: Date, end: Date) -> CoreResult<Decimal> {
    if start >= end {
        return Ok(Decimal::ZERO);
    }

    let mut total = Decimal::ZERO;
    let mut current = start;

    while current.year() < end.year() {
        let year_end = Date::from_ymd(current.year(), 12, 31)?;
        // Dec 31 belongs to the closing year.
        let days = current.days_between(&year_end) + 1;
        total += Decimal::from(days) / Decimal::from(current.days_in_year());
        current = Date::from_ymd(current.year() + 1, 1, 1)?;
    }

    if current < end {
        let days = current.days_between(&end);
        total += Decimal::from(days) / Decimal::from(current.days_in_year());
    }

    Ok(total)
}

/// ACT/ACT ICMA against a reference coupon period.
///
/// Notional periods are laid out from `period_end`, stepping backward (and
/// forward for a long final stub); each notional period contributes its
/// overlap with `[start, end]` divided by `freq * period_length`. A long
/// first coupon therefore splits exactly at the notional boundary instead
/// of being scaled by a single period length.
pub(super) fn icma(
    start: Date,
    end: Date,
    period_start: Date,
    period_end: Date,
    freq: Frequency,
) -> CoreResult<Decimal> {
    if start >= end {
        return Ok(Decimal::ZERO);
    }

    let (periods_per_year, step) = notional_step(period_start, period_end, freq)?;
    let freq_dec = Decimal::from(periods_per_year);
    let mut total = Decimal::ZERO;

    // Accrual beyond the reference end: step forward.
    let mut lo = period_end;
    while end > lo {
        let hi = step.apply(lo, 1)?;
        total += overlap_fraction(start, end, lo, hi, freq_dec);
        lo = hi;
    }

    // Accrual up to the reference end: step backward.
    let mut hi = period_end;
    while start < hi {
        let lo = step.apply(hi, -1)?;
        total += overlap_fraction(start, end, lo, hi, freq_dec);
        hi = lo;
    }

    Ok(total)
}

/// ACT/ACT Euro (AFB): whole years are counted backward from the end and
/// the remaining stub is divided by 366 whenever a Feb 29 falls inside it.
pub(super) fn afb(start: Date, end: Date) -> CoreResult<Decimal> {
    if start >= end {
        return Ok(Decimal::ZERO);
    }

    let mut years: i64 = 0;
    let mut stub_end = end;
    loop {
        let prev = stub_end.add_years(-1)?;
        if prev < start {
            break;
        }
        years += 1;
        stub_end = prev;
    }

    let days = start.days_between(&stub_end);
    let den = if leap_day_within(start, stub_end) {
        366
    } else {
        365
    };
    Ok(Decimal::from(years) + Decimal::from(days) / Decimal::from(den))
}

/// True when a Feb 29 falls in the half-open interval `(start, end]`.
fn leap_day_within(start: Date, end: Date) -> bool {
    for year in start.year()..=end.year() {
        if !is_leap_year(year) {
            continue;
        }
        if let Ok(leap_day) = Date::from_ymd(year, 2, 29) {
            if start < leap_day && leap_day <= end {
                return true;
            }
        }
    }
    false
}

fn overlap_fraction(start: Date, end: Date, lo: Date, hi: Date, freq: Decimal) -> Decimal {
    let from = if start > lo { start } else { lo };
    let to = if end < hi { end } else { hi };
    let overlap = from.days_between(&to);
    if overlap <= 0 {
        return Decimal::ZERO;
    }
    let period_len = lo.days_between(&hi);
    Decimal::from(overlap) / (freq * Decimal::from(period_len))
}

/// How notional periods are laid out: whole months for month-family
/// frequencies, a fixed day stride otherwise.
#[derive(Clone, Copy)]
enum Step {
    Months(i32),
    Days(i64),
}

impl Step {
    fn apply(self, date: Date, direction: i32) -> CoreResult<Date> {
        match self {
            Step::Months(m) => date.add_months(m * direction),
            Step::Days(d) => date.add_days(d * i64::from(direction)),
        }
    }
}

/// Resolves the notional period layout. With `Frequency::None` the
/// periods-per-year count is inferred from the reference period length.
fn notional_step(
    period_start: Date,
    period_end: Date,
    freq: Frequency,
) -> CoreResult<(u32, Step)> {
    if let Some(months) = freq.months_per_period() {
        return Ok((freq.periods_per_year(), Step::Months(months as i32)));
    }
    if let Some(days) = freq.days_per_period() {
        return Ok((freq.periods_per_year(), Step::Days(i64::from(days))));
    }
    let period_days = period_start.days_between(&period_end).max(1);
    let periods_per_year = ((365.25 / period_days as f64).round() as u32).max(1);
    if periods_per_year <= 12 && 12 % periods_per_year == 0 {
        Ok((periods_per_year, Step::Months(12 / periods_per_year as i32)))
    } else {
        Ok((periods_per_year, Step::Days(period_days)))
    }
}
