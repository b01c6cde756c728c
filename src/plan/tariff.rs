//! Time-of-day tariff lookup and candidate pricing.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::devices::{HOURS_PER_DAY, Hour};

use super::candidate::CandidateSchedule;

/// Watt-hours per kilowatt-hour; rates are quoted per kWh, power in W.
pub const WH_PER_KWH: f64 = 1000.0;

/// A priced hour range `[from, to)`.
///
/// When `from > to` the range wraps past midnight, so `23 -> 7` covers
/// hours 23, 0, 1, ..., 6. An interval with `from == to` covers nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RateInterval {
    /// First hour covered (inclusive).
    pub from: Hour,
    /// Hour the interval ends at (exclusive).
    pub to: Hour,
    /// Price per kWh.
    pub value: f64,
}

impl RateInterval {
    /// Creates a new rate interval.
    pub fn new(from: Hour, to: Hour, value: f64) -> Self {
        Self { from, to, value }
    }

    /// Returns `true` when `hour` falls inside the interval.
    pub fn contains(&self, hour: Hour) -> bool {
        if self.from <= self.to {
            hour >= self.from && hour < self.to
        } else {
            hour >= self.from || hour < self.to
        }
    }

    /// Returns `true` if the interval wraps past midnight.
    pub fn wraps(&self) -> bool {
        self.from > self.to
    }
}

/// Pricing failure caused by a malformed rate table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    /// No interval covers the hour.
    #[error("no rate interval covers hour {hour}")]
    Uncovered {
        /// Hour without a price.
        hour: Hour,
    },
}

/// Returns the price for `hour`; the first matching interval wins.
pub fn price_at(rates: &[RateInterval], hour: Hour) -> Option<f64> {
    rates.iter().find(|r| r.contains(hour)).map(|r| r.value)
}

/// Returns how many intervals cover each hour of the day.
///
/// A well-formed table yields `1` for every hour.
pub fn coverage(rates: &[RateInterval]) -> [usize; HOURS_PER_DAY] {
    let mut counts = [0; HOURS_PER_DAY];
    for (hour, count) in (0..).zip(counts.iter_mut()) {
        *count = rates.iter().filter(|r| r.contains(hour)).count();
    }
    counts
}

/// Energy cost of running `power` watts for one hour at `hour`.
///
/// # Errors
///
/// Returns [`PricingError::Uncovered`] if no interval prices the hour.
pub fn hourly_cost(rates: &[RateInterval], power: f64, hour: Hour) -> Result<f64, PricingError> {
    let price = price_at(rates, hour).ok_or(PricingError::Uncovered { hour })?;
    Ok(power * price / WH_PER_KWH)
}

/// Prices a candidate schedule against the rate table.
///
/// Sums `power × price(hour) / 1000` over every hour of the run.
///
/// # Errors
///
/// Returns [`PricingError::Uncovered`] for the first hour of the run that has
/// no price. Gaps are never filled with a guessed price.
pub fn evaluate_cost(
    candidate: &CandidateSchedule<'_>,
    rates: &[RateInterval],
) -> Result<f64, PricingError> {
    let power = candidate.device().power;
    candidate
        .hours()
        .iter()
        .map(|&hour| hourly_cost(rates, power, hour))
        .sum()
}
