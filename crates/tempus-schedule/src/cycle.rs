//! Cycle rules: the anchor that fixes recurring coupon dates.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use tempus_core::error::CoreResult;
use tempus_core::types::{Date, Frequency};

/// The day anchor a schedule's regular cycle snaps to.
///
/// Stepping a boundary by one frequency period lands near the right month
/// (or week); the cycle rule then pins the exact day. Without it, month
/// stepping through a short month would permanently drag a day-31 anchor
/// down to 30.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CycleRule {
    /// Fixed day of month, clamped to the last day of short months.
    DayOfMonth(u8),
    /// Last day of each month.
    Eom,
    /// Fixed weekday; used with the week-family frequencies where 7-day
    /// steps keep the anchor aligned on their own.
    Weekday(Weekday),
}

impl CycleRule {
    /// Infers the cycle rule from an anchor date: weekday anchor for the
    /// week-family frequencies, EOM when the anchor is the last day of its
    /// month, otherwise the anchor's day of month.
    ///
    /// # Errors
    ///
    /// Propagates [`tempus_core::error::CoreError::DateRange`] on an empty
    /// anchor.
    pub fn infer(anchor: Date, frequency: Frequency) -> CoreResult<Self> {
        if frequency.days_per_period().is_some() {
            return Ok(CycleRule::Weekday(anchor.weekday()?));
        }
        if anchor.is_end_of_month() {
            return Ok(CycleRule::Eom);
        }
        Ok(CycleRule::DayOfMonth(anchor.day() as u8))
    }

    /// Snaps a stepped boundary onto the rule's day.
    ///
    /// # Errors
    ///
    /// Propagates [`tempus_core::error::CoreError::DateRange`] on empty or
    /// out-of-range input.
    pub fn apply(&self, date: Date) -> CoreResult<Date> {
        match self {
            CycleRule::DayOfMonth(day) => {
                let clamped = u32::from(*day).min(date.days_in_month());
                Date::from_ymd(date.year(), date.month(), clamped)
            }
            CycleRule::Eom => date.end_of_month(),
            // 7-day steps already preserve the weekday.
            CycleRule::Weekday(_) => {
                date.naive_date()?;
                Ok(date)
            }
        }
    }
}
