//! Core planning types: search limits, schedules, and outcomes.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::devices::{DeviceId, Hour};

/// Bounds on how long the optimizer may search.
///
/// The default is an exhaustive, sequential search.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use appliance_scheduler::plan::types::SearchLimits;
///
/// let limits = SearchLimits::default().with_deadline(Duration::from_millis(250));
/// assert_eq!(limits.workers, 1);
/// assert!(limits.node_budget.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchLimits {
    /// Wall-clock budget measured from the start of the call.
    pub deadline: Option<Duration>,
    /// Maximum number of committed search nodes, across all workers.
    pub node_budget: Option<u64>,
    /// Number of worker threads splitting the first device's candidates.
    pub workers: usize,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            deadline: None,
            node_budget: None,
            workers: 1,
        }
    }
}

impl SearchLimits {
    /// Sets the wall-clock deadline.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Sets the node budget.
    #[must_use]
    pub fn with_node_budget(mut self, budget: u64) -> Self {
        self.node_budget = Some(budget);
        self
    }

    /// Sets the worker count; zero is treated as one.
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }
}

/// Whether a returned schedule is proven cost-minimal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Optimality {
    /// The search tree was fully explored.
    Optimal,
    /// A deadline or node budget stopped the search early.
    BestEffort,
}

/// A complete, cap-respecting assignment of run hours to every device.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schedule {
    /// Chosen run hours per device.
    pub assignment: BTreeMap<DeviceId, BTreeSet<Hour>>,
    /// Energy cost of each device's run.
    pub device_costs: BTreeMap<DeviceId, f64>,
    /// Sum of all device costs.
    pub total_cost: f64,
    /// Whether the search completed.
    pub optimality: Optimality,
    /// Search nodes committed while finding this schedule.
    pub nodes_visited: u64,
}

impl Schedule {
    /// The schedule for a household with no devices.
    pub fn empty() -> Self {
        Self {
            assignment: BTreeMap::new(),
            device_costs: BTreeMap::new(),
            total_cost: 0.0,
            optimality: Optimality::Optimal,
            nodes_visited: 0,
        }
    }

    /// Returns `true` when `device` runs during `hour`.
    pub fn is_running(&self, device: &DeviceId, hour: Hour) -> bool {
        self.assignment
            .get(device)
            .is_some_and(|hours| hours.contains(&hour))
    }

    /// Devices running during `hour`, in id order.
    pub fn running_at(&self, hour: Hour) -> Vec<&DeviceId> {
        self.assignment
            .iter()
            .filter(|(_, hours)| hours.contains(&hour))
            .map(|(id, _)| id)
            .collect()
    }
}

/// Why no schedule could be produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Infeasibility {
    /// The device's duration is longer than its window.
    NoCandidates {
        /// Offending device.
        device: DeviceId,
    },
    /// The device alone draws more than the cap.
    DeviceExceedsCap {
        /// Offending device.
        device: DeviceId,
    },
    /// Every combination of runs breaks the cap at some hour.
    PowerCap,
    /// The deadline or node budget ran out before any complete assignment.
    SearchBudgetExhausted,
}

impl fmt::Display for Infeasibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCandidates { device } => {
                write!(f, "device {device} does not fit into its operating window")
            }
            Self::DeviceExceedsCap { device } => {
                write!(f, "device {device} alone exceeds the power cap")
            }
            Self::PowerCap => write!(f, "no combination of runs stays within the power cap"),
            Self::SearchBudgetExhausted => {
                write!(f, "search limit reached before a feasible schedule was found")
            }
        }
    }
}

/// Result of one optimization call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// A feasible schedule.
    Scheduled(Schedule),
    /// No feasible schedule.
    Infeasible(Infeasibility),
}

impl Outcome {
    /// Returns the schedule, if any.
    pub fn schedule(&self) -> Option<&Schedule> {
        match self {
            Self::Scheduled(schedule) => Some(schedule),
            Self::Infeasible(_) => None,
        }
    }

    /// Returns `true` for a feasible outcome.
    pub fn is_feasible(&self) -> bool {
        matches!(self, Self::Scheduled(_))
    }
}
