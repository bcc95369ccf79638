//! Business day roll conventions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Calendar;
use crate::error::{CoreError, CoreResult};
use crate::types::Date;

/// How a date falling on a non-business day is moved onto one.
///
/// Rolling is idempotent: rolling an already-rolled date under the same
/// convention and calendar returns it unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum RollConvention {
    /// Use the date as-is even when it is not a business day.
    Unadjusted,

    /// Move to the next business day.
    #[default]
    Following,

    /// Move to the next business day unless that crosses into the next
    /// month, in which case move to the previous business day.
    ModifiedFollowing,

    /// Move to the previous business day.
    Preceding,

    /// Move to the previous business day unless that crosses into the
    /// previous month, in which case move to the next business day.
    ModifiedPreceding,
}

impl fmt::Display for RollConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RollConvention::Unadjusted => "Unadjusted",
            RollConvention::Following => "Following",
            RollConvention::ModifiedFollowing => "ModifiedFollowing",
            RollConvention::Preceding => "Preceding",
            RollConvention::ModifiedPreceding => "ModifiedPreceding",
        };
        write!(f, "{name}")
    }
}

impl FromStr for RollConvention {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "unadjusted" | "none" | "u" => Ok(RollConvention::Unadjusted),
            "following" | "f" => Ok(RollConvention::Following),
            "modifiedfollowing" | "modified following" | "mf" => {
                Ok(RollConvention::ModifiedFollowing)
            }
            "preceding" | "p" => Ok(RollConvention::Preceding),
            "modifiedpreceding" | "modified preceding" | "mp" => {
                Ok(RollConvention::ModifiedPreceding)
            }
            other => Err(CoreError::argument_range(format!(
                "unknown roll convention '{other}'"
            ))),
        }
    }
}

/// Rolls a date onto a business day under the given convention.
pub(super) fn roll(
    date: Date,
    convention: RollConvention,
    calendar: &Calendar,
) -> CoreResult<Date> {
    // Validate the input even when no movement is needed.
    date.naive_date()?;

    if convention == RollConvention::Unadjusted || calendar.is_business_day(date) {
        return Ok(date);
    }

    match convention {
        RollConvention::Unadjusted => unreachable!("handled above"),

        RollConvention::Following => following(date, calendar),

        RollConvention::ModifiedFollowing => {
            let adjusted = following(date, calendar)?;
            if adjusted.month() != date.month() {
                preceding(date, calendar)
            } else {
                Ok(adjusted)
            }
        }

        RollConvention::Preceding => preceding(date, calendar),

        RollConvention::ModifiedPreceding => {
            let adjusted = preceding(date, calendar)?;
            if adjusted.month() != date.month() {
                following(date, calendar)
            } else {
                Ok(adjusted)
            }
        }
    }
}

fn following(mut date: Date, calendar: &Calendar) -> CoreResult<Date> {
    while !calendar.is_business_day(date) {
        date = date.add_days(1)?;
    }
    Ok(date)
}

fn preceding(mut date: Date, calendar: &Calendar) -> CoreResult<Date> {
    while !calendar.is_business_day(date) {
        date = date.add_days(-1)?;
    }
    Ok(date)
}
