//! Enumeration of contiguous runs inside a device's window.

use std::collections::BTreeSet;

use crate::devices::{Device, Hour};

/// One placement of a device's required run.
///
/// Hours are kept in window order; `mask` has bit `h` set for every hour
/// `h` of the run and identifies the hour set.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateSchedule<'a> {
    device: &'a Device,
    hours: Vec<Hour>,
    mask: u32,
}

impl<'a> CandidateSchedule<'a> {
    fn new(device: &'a Device, hours: &[Hour]) -> Self {
        let mask = hours.iter().fold(0_u32, |m, &h| m | (1 << h));
        Self {
            device,
            hours: hours.to_vec(),
            mask,
        }
    }

    /// Device this run belongs to.
    pub fn device(&self) -> &'a Device {
        self.device
    }

    /// Hours of the run, in window order.
    pub fn hours(&self) -> &[Hour] {
        &self.hours
    }

    /// Bit mask of the hours in the run.
    pub fn mask(&self) -> u32 {
        self.mask
    }

    /// Returns `true` if the run includes `hour`; hours past the day never match.
    pub fn contains(&self, hour: Hour) -> bool {
        1_u32
            .checked_shl(u32::from(hour))
            .is_some_and(|bit| self.mask & bit != 0)
    }

    /// Hours of the run as an ordered set.
    pub fn hour_set(&self) -> BTreeSet<Hour> {
        self.hours.iter().copied().collect()
    }
}

/// Enumerates every contiguous run of `device.duration` hours in its window.
///
/// Returns `max(0, L - d + 1)` candidates for a window of length `L` and a
/// duration `d`. A device whose duration exceeds its window gets none.
///
/// # Examples
///
/// ```
/// use appliance_scheduler::devices::Device;
/// use appliance_scheduler::plan::candidate::generate_candidates;
///
/// let dishwasher = Device::new("dw", "Dishwasher", 950.0, 3).with_mode("night");
/// let runs = generate_candidates(&dishwasher);
/// assert_eq!(runs.len(), 8);
/// assert_eq!(runs[2].hours(), &[23, 0, 1]);
/// ```
pub fn generate_candidates(device: &Device) -> Vec<CandidateSchedule<'_>> {
    let duration = usize::from(device.duration);
    if duration == 0 {
        return Vec::new();
    }
    device
        .window()
        .windows(duration)
        .map(|run| CandidateSchedule::new(device, run))
        .collect()
}
