//! Coupon schedule generation.
//!
//! A schedule is derived once from its configuration and is immutable
//! afterwards: a deterministic walk lays out unadjusted cycle boundaries
//! at the configured frequency, the roll engine produces the observed
//! payment dates, and the stub flags each change exactly one aspect of
//! that derivation.
//!
//! # Example
//!
//! ```rust
//! use tempus_schedule::{Schedule, ScheduleConfig};
//! use tempus_core::calendars::default_registry;
//! use tempus_core::types::{Date, Frequency};
//!
//! let config = ScheduleConfig::new(
//!     Date::from_ymd(2000, 1, 5).unwrap(),
//!     Date::from_ymd(2004, 1, 5).unwrap(),
//!     Frequency::SemiAnnual,
//!     default_registry().get("None").unwrap(),
//! );
//! let schedule = Schedule::generate(&config).unwrap();
//! assert_eq!(schedule.len(), 8);
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use tempus_core::calendars::{Calendar, RollConvention};
use tempus_core::daycounts::DayCount;
use tempus_core::types::{Date, Frequency};

use crate::cycle::CycleRule;
use crate::error::{ScheduleError, ScheduleResult};

/// Configuration for schedule generation.
#[derive(Debug, Clone)]
pub struct ScheduleConfig {
    /// Valuation date of the request.
    pub as_of: Date,
    /// First accrual start.
    pub effective: Date,
    /// First regular coupon date, when the first period is irregular.
    pub first_coupon: Option<Date>,
    /// Last regular coupon date, when the final period is irregular.
    pub last_coupon: Option<Date>,
    /// Final accrual end.
    pub maturity: Date,
    /// Coupon frequency.
    pub frequency: Frequency,
    /// Roll convention for payment (and optionally accrual) dates.
    pub roll: RollConvention,
    /// Holiday calendar for rolling.
    pub calendar: Calendar,
    /// Cycle anchor; inferred from the generation anchor when absent.
    pub cycle_rule: Option<CycleRule>,
    /// Walk forward from the effective date instead of backward from
    /// maturity, putting any stub at the end.
    pub stub_at_end: bool,
    /// Keep accrual boundaries on the unadjusted cycle dates; payment
    /// dates still roll.
    pub accrue_on_cycle: bool,
    /// Roll the final payment date; otherwise it stays on the unadjusted
    /// maturity.
    pub roll_last_payment: bool,
    /// Honor `last_coupon` as the final regular boundary.
    pub respect_last_coupon: bool,
    /// Extend the final accrual end by one day (credit default date
    /// convention).
    pub include_default_date: bool,
}

impl ScheduleConfig {
    /// Creates a configuration with the legacy defaults: backward
    /// generation, accrual on cycle dates, unadjusted final payment.
    #[must_use]
    pub fn new(effective: Date, maturity: Date, frequency: Frequency, calendar: Calendar) -> Self {
        Self {
            as_of: effective,
            effective,
            first_coupon: None,
            last_coupon: None,
            maturity,
            frequency,
            roll: RollConvention::Following,
            calendar,
            cycle_rule: None,
            stub_at_end: false,
            accrue_on_cycle: true,
            roll_last_payment: false,
            respect_last_coupon: true,
            include_default_date: false,
        }
    }

    /// Sets the valuation date.
    #[must_use]
    pub fn with_as_of(mut self, as_of: Date) -> Self {
        self.as_of = as_of;
        self
    }

    /// Sets the first regular coupon date.
    #[must_use]
    pub fn with_first_coupon(mut self, date: Date) -> Self {
        self.first_coupon = Some(date);
        self
    }

    /// Sets the last regular coupon date.
    #[must_use]
    pub fn with_last_coupon(mut self, date: Date) -> Self {
        self.last_coupon = Some(date);
        self
    }

    /// Sets the roll convention.
    #[must_use]
    pub fn with_roll(mut self, roll: RollConvention) -> Self {
        self.roll = roll;
        self
    }

    /// Sets an explicit cycle rule.
    #[must_use]
    pub fn with_cycle_rule(mut self, rule: CycleRule) -> Self {
        self.cycle_rule = Some(rule);
        self
    }

    /// Puts the irregular period at the end instead of the start.
    #[must_use]
    pub fn with_stub_at_end(mut self, stub_at_end: bool) -> Self {
        self.stub_at_end = stub_at_end;
        self
    }

    /// Controls whether accrual boundaries stay on the unadjusted cycle.
    #[must_use]
    pub fn with_accrue_on_cycle(mut self, on_cycle: bool) -> Self {
        self.accrue_on_cycle = on_cycle;
        self
    }

    /// Controls rolling of the final payment date.
    #[must_use]
    pub fn with_roll_last_payment(mut self, roll: bool) -> Self {
        self.roll_last_payment = roll;
        self
    }

    /// Controls whether `last_coupon` anchors the cycle.
    #[must_use]
    pub fn with_respect_last_coupon(mut self, respect: bool) -> Self {
        self.respect_last_coupon = respect;
        self
    }

    /// Extends the final accrual end by one day.
    #[must_use]
    pub fn with_include_default_date(mut self, include: bool) -> Self {
        self.include_default_date = include;
        self
    }
}

/// One accrual period of a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    /// Observed accrual start.
    pub accrual_start: Date,
    /// Observed accrual end.
    pub accrual_end: Date,
    /// Unadjusted cycle boundary opening the period.
    pub cycle_start: Date,
    /// Unadjusted cycle boundary closing the period.
    pub cycle_end: Date,
    /// Payment date.
    pub payment: Date,
}

/// An immutable, 0-indexed sequence of accrual periods.
#[derive(Debug, Clone)]
pub struct Schedule {
    periods: Vec<Period>,
    frequency: Frequency,
}

impl Schedule {
    /// Derives a schedule from a configuration.
    ///
    /// # Errors
    ///
    /// [`ScheduleError::Construction`] on empty required dates or ordering
    /// violations; [`ScheduleError::Core`] when cycle arithmetic escapes
    /// the supported date range.
    pub fn generate(config: &ScheduleConfig) -> ScheduleResult<Self> {
        validate(config)?;

        let boundaries = if config.frequency == Frequency::None
            || config.effective == config.maturity
        {
            vec![config.effective, config.maturity]
        } else if config.stub_at_end {
            forward_boundaries(config)?
        } else {
            backward_boundaries(config)?
        };

        let mut periods = Vec::with_capacity(boundaries.len().saturating_sub(1));
        for window in boundaries.windows(2) {
            let (cycle_start, cycle_end) = (window[0], window[1]);
            let rolled_start = config.calendar.roll(cycle_start, config.roll)?;
            let rolled_end = config.calendar.roll(cycle_end, config.roll)?;
            let (accrual_start, accrual_end) = if config.accrue_on_cycle {
                (cycle_start, cycle_end)
            } else {
                (rolled_start, rolled_end)
            };
            periods.push(Period {
                accrual_start,
                accrual_end,
                cycle_start,
                cycle_end,
                payment: rolled_end,
            });
        }

        if let Some(last) = periods.last_mut() {
            if !config.roll_last_payment {
                last.payment = last.cycle_end;
            }
            if config.include_default_date {
                last.accrual_end = last.accrual_end.add_days(1)?;
            }
        }

        log::debug!(
            "generated {} periods for {} -> {} at {}",
            periods.len(),
            config.effective,
            config.maturity,
            config.frequency
        );

        Ok(Schedule {
            periods,
            frequency: config.frequency,
        })
    }

    /// Number of periods (always at least one).
    #[must_use]
    pub fn len(&self) -> usize {
        self.periods.len()
    }

    /// A schedule always has at least one period.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// All periods in order.
    #[must_use]
    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    /// The i-th period.
    #[must_use]
    pub fn period(&self, index: usize) -> Option<&Period> {
        self.periods.get(index)
    }

    /// Observed accrual start of the i-th period.
    #[must_use]
    pub fn period_start(&self, index: usize) -> Option<Date> {
        self.period(index).map(|p| p.accrual_start)
    }

    /// Observed accrual end of the i-th period.
    #[must_use]
    pub fn period_end(&self, index: usize) -> Option<Date> {
        self.period(index).map(|p| p.accrual_end)
    }

    /// Unadjusted cycle start of the i-th period.
    #[must_use]
    pub fn cycle_start(&self, index: usize) -> Option<Date> {
        self.period(index).map(|p| p.cycle_start)
    }

    /// Unadjusted cycle end of the i-th period.
    #[must_use]
    pub fn cycle_end(&self, index: usize) -> Option<Date> {
        self.period(index).map(|p| p.cycle_end)
    }

    /// Payment date of the i-th period.
    #[must_use]
    pub fn payment_date(&self, index: usize) -> Option<Date> {
        self.period(index).map(|p| p.payment)
    }

    /// Year fraction of the i-th period under a day count convention,
    /// using the observed accrual dates or the unadjusted cycle dates.
    ///
    /// # Errors
    ///
    /// [`ScheduleError::Construction`] on an out-of-range index;
    /// [`ScheduleError::Core`] from the day-count engine.
    pub fn fraction(
        &self,
        index: usize,
        day_count: DayCount,
        use_cycle_dates: bool,
    ) -> ScheduleResult<Decimal> {
        let period = self.period(index).ok_or_else(|| {
            ScheduleError::construction(format!("period index {index} out of range"))
        })?;
        let (start, end) = if use_cycle_dates {
            (period.cycle_start, period.cycle_end)
        } else {
            (period.accrual_start, period.accrual_end)
        };
        Ok(day_count.fraction(
            start,
            end,
            period.cycle_start,
            period.cycle_end,
            self.frequency,
        )?)
    }

    /// The first accrual end strictly after the given date.
    #[must_use]
    pub fn next_coupon(&self, date: Date) -> Option<Date> {
        self.periods
            .iter()
            .map(|p| p.accrual_end)
            .find(|&end| end > date)
    }

    /// The latest period boundary on or before the given date.
    #[must_use]
    pub fn prev_coupon(&self, date: Date) -> Option<Date> {
        let first_start = self.periods.first().map(|p| p.accrual_start);
        first_start
            .into_iter()
            .chain(self.periods.iter().map(|p| p.accrual_end))
            .filter(|&b| b <= date)
            .max()
    }

    /// Number of periods whose accrual end lies strictly after the date.
    #[must_use]
    pub fn coupons_remaining(&self, date: Date) -> usize {
        self.periods.iter().filter(|p| p.accrual_end > date).count()
    }

    /// Payment dates in order.
    pub fn payment_dates(&self) -> impl Iterator<Item = Date> + '_ {
        self.periods.iter().map(|p| p.payment)
    }
}

fn validate(config: &ScheduleConfig) -> ScheduleResult<()> {
    for (name, date) in [
        ("as_of", config.as_of),
        ("effective", config.effective),
        ("maturity", config.maturity),
    ] {
        if !date.is_valid() {
            return Err(ScheduleError::construction(format!(
                "{name} date is empty or out of range"
            )));
        }
    }
    if config.effective > config.maturity {
        return Err(ScheduleError::construction(format!(
            "effective {} after maturity {}",
            config.effective, config.maturity
        )));
    }
    if let Some(first) = config.first_coupon {
        if !first.is_valid() || first < config.effective || first > config.maturity {
            return Err(ScheduleError::construction(format!(
                "first coupon {first} outside [effective, maturity]"
            )));
        }
    }
    if let Some(last) = config.last_coupon {
        let floor = config.first_coupon.unwrap_or(config.effective);
        if !last.is_valid() || last < floor || last > config.maturity {
            return Err(ScheduleError::construction(format!(
                "last coupon {last} outside [first coupon, maturity]"
            )));
        }
    }
    Ok(())
}

/// Backward walk (stub, if any, lands at the start): boundaries step back
/// from the last regular coupon, each re-anchored by the cycle rule.
fn backward_boundaries(config: &ScheduleConfig) -> ScheduleResult<Vec<Date>> {
    let anchor = if config.respect_last_coupon {
        config.last_coupon.unwrap_or(config.maturity)
    } else {
        config.maturity
    };
    let floor = config.first_coupon.unwrap_or(config.effective);
    let rule = match config.cycle_rule {
        Some(rule) => rule,
        None => CycleRule::infer(anchor, config.frequency)?,
    };

    let mut dates = vec![anchor];
    // Step from the anchor each time rather than cumulatively, so a short
    // month cannot drag the anchor day down for good.
    for i in 1.. {
        let stepped = config.frequency.step(anchor, -i)?;
        let boundary = rule.apply(stepped)?;
        if boundary <= floor {
            break;
        }
        dates.push(boundary);
    }
    if config.first_coupon.is_some() {
        dates.push(floor);
    }
    if dates.last() != Some(&config.effective) {
        dates.push(config.effective);
    }
    dates.reverse();
    if anchor < config.maturity {
        dates.push(config.maturity);
    }
    dates.dedup();
    Ok(dates)
}

/// Forward walk (stub, if any, lands at the end): boundaries step forward
/// from the first regular coupon.
fn forward_boundaries(config: &ScheduleConfig) -> ScheduleResult<Vec<Date>> {
    let anchor = config.first_coupon.unwrap_or(config.effective);
    let cap = if config.respect_last_coupon {
        config.last_coupon.unwrap_or(config.maturity)
    } else {
        config.maturity
    };
    let rule = match config.cycle_rule {
        Some(rule) => rule,
        None => CycleRule::infer(anchor, config.frequency)?,
    };

    let mut dates = vec![anchor];
    for i in 1.. {
        let stepped = config.frequency.step(anchor, i)?;
        let boundary = rule.apply(stepped)?;
        if boundary >= cap {
            break;
        }
        dates.push(boundary);
    }
    if config.last_coupon.is_some() {
        dates.push(cap);
    }
    if dates.first() != Some(&config.effective) {
        dates.insert(0, config.effective);
    }
    if dates.last() != Some(&config.maturity) {
        dates.push(config.maturity);
    }
    dates.dedup();
    Ok(dates)
}
