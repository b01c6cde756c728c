//! Hourly power aggregation under a hard cap.

use crate::devices::{HOURS_PER_DAY, Hour};

use super::candidate::CandidateSchedule;

/// Milliwatts per watt; loads are tracked as whole milliwatts.
const MW_PER_W: f64 = 1000.0;

/// Converts watts to whole milliwatts, rounding to the nearest.
///
/// Integer loads make `add` followed by `remove` exact, so whether a run
/// fits depends only on what is committed, never on what was tried before.
pub fn to_milliwatts(watts: f64) -> i64 {
    (watts * MW_PER_W).round() as i64
}

/// Converts milliwatts back to watts.
pub fn to_watts(milliwatts: i64) -> f64 {
    milliwatts as f64 / MW_PER_W
}

/// Returns `true` when `load_w` is at or below `max_power` (both W), compared
/// in milliwatts the same way the optimizer compares them.
pub fn within_cap(load_w: f64, max_power: f64) -> bool {
    to_milliwatts(load_w) <= to_milliwatts(max_power)
}

/// Per-hour running total of committed device power.
///
/// Tracks the summed draw of every candidate added so far against a hard
/// cap. All operations touch only the hours of the candidate involved.
#[derive(Debug, Clone)]
pub struct PowerAggregator {
    load: [i64; HOURS_PER_DAY],
    max_power: i64,
}

impl PowerAggregator {
    /// Creates an empty aggregator with the given cap (W).
    pub fn new(max_power: f64) -> Self {
        Self {
            load: [0; HOURS_PER_DAY],
            max_power: to_milliwatts(max_power),
        }
    }

    /// Returns `true` when adding `candidate` keeps every touched hour at or
    /// below the cap.
    pub fn fits(&self, candidate: &CandidateSchedule<'_>) -> bool {
        let power = to_milliwatts(candidate.device().power);
        candidate
            .hours()
            .iter()
            .all(|&h| self.load[usize::from(h)] + power <= self.max_power)
    }

    /// Commits a candidate's power to its hours.
    pub fn add(&mut self, candidate: &CandidateSchedule<'_>) {
        let power = to_milliwatts(candidate.device().power);
        for &h in candidate.hours() {
            self.load[usize::from(h)] += power;
        }
    }

    /// Withdraws a previously added candidate.
    pub fn remove(&mut self, candidate: &CandidateSchedule<'_>) {
        let power = to_milliwatts(candidate.device().power);
        for &h in candidate.hours() {
            self.load[usize::from(h)] -= power;
        }
    }

    /// Summed power at `hour` (W).
    pub fn load_at(&self, hour: Hour) -> f64 {
        to_watts(self.load[usize::from(hour)])
    }

    /// Highest hourly load (W).
    pub fn peak(&self) -> f64 {
        to_watts(self.load.iter().copied().max().unwrap_or(0))
    }

    /// The power cap (W).
    pub fn max_power(&self) -> f64 {
        to_watts(self.max_power)
    }

    /// Returns `true` when every hour is within the cap.
    pub fn within_cap(&self) -> bool {
        self.load.iter().all(|&l| l <= self.max_power)
    }

    /// Hourly loads (W), index = hour.
    pub fn loads(&self) -> [f64; HOURS_PER_DAY] {
        self.load.map(to_watts)
    }
}
