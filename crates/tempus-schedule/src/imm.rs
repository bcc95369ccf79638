//! Futures contract code resolution onto IMM dates.
//!
//! Contract codes use the standard month letters F, G, H, J, K, M, N, Q,
//! U, V, X, Z for January through December. Accepted forms are
//! `<root><letter><digits>` (`"EDZ7"`, `"EDZ17"`), the bare
//! `<letter><digits>` (`"Z7"`), and `<MMM><yy>` (`"DEC14"`). A single
//! year digit names a decade ambiguously; it resolves to the first
//! decade whose contract is still trading as of the given date, rolling
//! to the next decade the day after the last trade date but not on the
//! last trade date itself.

use tempus_core::calendars::Calendar;
use tempus_core::types::Date;

use crate::error::{ScheduleError, ScheduleResult};

const MONTH_LETTERS: [char; 12] = ['F', 'G', 'H', 'J', 'K', 'M', 'N', 'Q', 'U', 'V', 'X', 'Z'];

const MONTH_NAMES: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

/// A futures contract month resolved against an as-of date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImmDate {
    year: i32,
    month: u32,
    expiry: Date,
    last_trade: Date,
}

impl ImmDate {
    /// Resolves a contract code to its expiry (third Wednesday of the
    /// contract month) and last trade date (two weekdays earlier).
    ///
    /// # Errors
    ///
    /// [`ScheduleError::BadFuturesCode`] on a malformed code;
    /// [`ScheduleError::Core`] on an invalid as-of date or a contract
    /// month outside the supported range.
    pub fn resolve(as_of: Date, code: &str) -> ScheduleResult<Self> {
        as_of.naive_date()?;
        let (month, digits) = split_code(code)?;

        let year = match digits.len() {
            1 => {
                let digit = i32::from(digits.as_bytes()[0] - b'0');
                resolve_decade(as_of, month, digit)?
            }
            2 => {
                let yy: i32 = digits
                    .parse()
                    .map_err(|_| ScheduleError::bad_futures_code(code))?;
                2000 + yy
            }
            _ => return Err(ScheduleError::bad_futures_code(code)),
        };

        Self::for_month(year, month)
    }

    fn for_month(year: i32, month: u32) -> ScheduleResult<Self> {
        let expiry = third_wednesday(year, month)?;
        let weekends = Calendar::weekend_only("None");
        let last_trade = weekends.add_business_days(expiry, -2)?;
        Ok(ImmDate {
            year,
            month,
            expiry,
            last_trade,
        })
    }

    /// Contract year.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Contract month (1-12).
    #[must_use]
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Third Wednesday of the contract month.
    #[must_use]
    pub fn expiry(&self) -> Date {
        self.expiry
    }

    /// Last trade date, two weekdays before expiry.
    #[must_use]
    pub fn last_trade(&self) -> Date {
        self.last_trade
    }
}

/// Expiry of the contract named by a futures code, as of a date.
///
/// Convenience over [`ImmDate::resolve`].
///
/// # Errors
///
/// Same as [`ImmDate::resolve`].
pub fn next_imm_date(as_of: Date, code: &str) -> ScheduleResult<Date> {
    Ok(ImmDate::resolve(as_of, code)?.expiry())
}

/// Third Wednesday of a month, by closed form on the weekday of the 1st.
///
/// # Errors
///
/// [`ScheduleError::Core`] when (year, month) is outside the supported
/// range.
pub fn third_wednesday(year: i32, month: u32) -> ScheduleResult<Date> {
    let first = Date::from_ymd(year, month, 1)?;
    let w = first.weekday()?.num_days_from_monday();
    let day = if w <= 2 { 17 - w } else { 24 - w };
    Ok(Date::from_ymd(year, month, day)?)
}

/// Splits a code into contract month and year digits.
fn split_code(code: &str) -> ScheduleResult<(u32, String)> {
    let trimmed = code.trim().to_ascii_uppercase();
    let digit_at = trimmed
        .find(|c: char| c.is_ascii_digit())
        .ok_or_else(|| ScheduleError::bad_futures_code(code))?;
    let (alpha, digits) = trimmed.split_at(digit_at);
    if alpha.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ScheduleError::bad_futures_code(code));
    }

    if let Some(m) = MONTH_NAMES.iter().position(|&n| n == alpha) {
        return Ok((m as u32 + 1, digits.to_string()));
    }
    let letter = alpha.chars().next_back().ok_or_else(|| ScheduleError::bad_futures_code(code))?;
    let m = MONTH_LETTERS
        .iter()
        .position(|&l| l == letter)
        .ok_or_else(|| ScheduleError::bad_futures_code(code))?;
    Ok((m as u32 + 1, digits.to_string()))
}

/// Picks the first decade whose contract has not finished trading. The
/// contract stays current through its last trade date and rolls the day
/// after.
fn resolve_decade(as_of: Date, month: u32, digit: i32) -> ScheduleResult<i32> {
    let mut year = (as_of.year() / 10) * 10 + digit;
    loop {
        let candidate = ImmDate::for_month(year, month)?;
        if as_of <= candidate.last_trade {
            return Ok(year);
        }
        year += 10;
    }
}
