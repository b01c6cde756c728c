//! JSON plan document: hour → running devices plus consumed energy cost.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use crate::devices::{DeviceId, Hour};
use crate::plan::{Outcome, Schedule};

/// Serializable view of an optimization outcome.
///
/// A feasible plan renders as
/// `{"schedule": {"0": [...], ...}, "consumedEnergy": {"value": .., "devices": {..}}}`,
/// an infeasible one as `{"infeasible": true, "reason": ".."}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PlanDocument {
    /// Feasible plan.
    Scheduled {
        /// Devices running in each hour, every hour present.
        schedule: BTreeMap<Hour, Vec<DeviceId>>,
        /// Cost totals.
        #[serde(rename = "consumedEnergy")]
        consumed_energy: ConsumedEnergy,
    },
    /// No plan could be produced.
    Infeasible {
        /// Always `true`.
        infeasible: bool,
        /// Human-readable reason.
        reason: String,
    },
}

/// Total and per-device cost of a plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsumedEnergy {
    /// Sum of device costs.
    pub value: f64,
    /// Cost per device.
    pub devices: BTreeMap<DeviceId, f64>,
}

impl PlanDocument {
    /// Builds the document for a feasible schedule.
    pub fn from_schedule(schedule: &Schedule) -> Self {
        let hours = (0..24).map(|hour| {
            let running: Vec<DeviceId> = schedule.running_at(hour).into_iter().cloned().collect();
            (hour, running)
        });
        Self::Scheduled {
            schedule: hours.collect(),
            consumed_energy: ConsumedEnergy {
                value: schedule.total_cost,
                devices: schedule.device_costs.clone(),
            },
        }
    }

    /// Builds the document for any outcome.
    pub fn from_outcome(outcome: &Outcome) -> Self {
        match outcome {
            Outcome::Scheduled(schedule) => Self::from_schedule(schedule),
            Outcome::Infeasible(reason) => Self::Infeasible {
                infeasible: true,
                reason: reason.to_string(),
            },
        }
    }
}

/// Writes the outcome as pretty-printed JSON to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if serialization or writing fails.
pub fn write_json(outcome: &Outcome, mut writer: impl Write) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut writer, &PlanDocument::from_outcome(outcome))?;
    writeln!(writer)?;
    writer.flush()
}

/// Exports the outcome as JSON to a file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_json(outcome: &Outcome, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    write_json(outcome, io::BufWriter::new(file))
}
