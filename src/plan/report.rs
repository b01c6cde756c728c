//! Post-hoc summary of a schedule: hourly load, headroom and costs.

use std::fmt;

use serde::Serialize;

use crate::devices::{Device, DeviceId, HOURS_PER_DAY, Hour};

use super::power::{self, to_milliwatts, to_watts};
use super::tariff::{RateInterval, WH_PER_KWH, price_at};
use super::types::{Optimality, Schedule};

/// One hour of a planned day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourRow {
    /// Hour of day.
    pub hour: Hour,
    /// Price per kWh, `None` if the table leaves the hour unpriced.
    pub rate: Option<f64>,
    /// Summed power of running devices (W).
    pub load_w: f64,
    /// Remaining power below the cap (W).
    pub headroom_w: f64,
    /// Devices running this hour, in id order.
    pub devices: Vec<DeviceId>,
}

/// Aggregate view of a schedule.
///
/// Computed from the schedule and the device list so hourly loads always
/// agree with the assignment.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleReport {
    /// Per-hour rows, index = hour.
    pub hours: Vec<HourRow>,
    /// Total energy cost.
    pub total_cost: f64,
    /// Total energy used (kWh).
    pub total_energy_kwh: f64,
    /// Highest hourly load (W).
    pub peak_load_w: f64,
    /// Hour at which the peak occurs (first if several).
    pub peak_hour: Hour,
    /// The cap the schedule was planned against (W).
    pub max_power: f64,
    /// Whether the search proved optimality.
    pub optimality: Optimality,
}

impl ScheduleReport {
    /// Builds the report.
    ///
    /// # Arguments
    ///
    /// * `devices` - Devices the schedule was planned for
    /// * `rates` - Rate table used for planning
    /// * `schedule` - Feasible schedule from the optimizer
    /// * `max_power` - Power cap (W)
    pub fn from_schedule(
        devices: &[Device],
        rates: &[RateInterval],
        schedule: &Schedule,
        max_power: f64,
    ) -> Self {
        let mut load_mw = [0_i64; HOURS_PER_DAY];
        let mut devices_at: [Vec<DeviceId>; HOURS_PER_DAY] = std::array::from_fn(|_| Vec::new());
        let mut total_energy_wh = 0.0;
        for device in devices {
            let Some(run) = schedule.assignment.get(&device.id) else {
                continue;
            };
            let power = to_milliwatts(device.power);
            for &hour in run {
                load_mw[usize::from(hour)] += power;
                devices_at[usize::from(hour)].push(device.id.clone());
                total_energy_wh += device.power;
            }
        }

        let cap_mw = to_milliwatts(max_power);
        let hours: Vec<HourRow> = (0..)
            .zip(load_mw)
            .zip(devices_at)
            .map(|((hour, load), mut ids)| {
                ids.sort();
                HourRow {
                    hour,
                    rate: price_at(rates, hour),
                    load_w: to_watts(load),
                    headroom_w: to_watts(cap_mw - load),
                    devices: ids,
                }
            })
            .collect();

        let mut peak_hour = 0;
        let mut peak_load_w = 0.0_f64;
        for row in &hours {
            if row.load_w > peak_load_w {
                peak_load_w = row.load_w;
                peak_hour = row.hour;
            }
        }

        Self {
            hours,
            total_cost: schedule.total_cost,
            total_energy_kwh: total_energy_wh / WH_PER_KWH,
            peak_load_w,
            peak_hour,
            max_power,
            optimality: schedule.optimality,
        }
    }

    /// Returns `true` if no hour exceeds the cap.
    pub fn within_cap(&self) -> bool {
        self.hours
            .iter()
            .all(|row| power::within_cap(row.load_w, self.max_power))
    }
}

impl fmt::Display for ScheduleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Schedule ---")?;
        for row in &self.hours {
            let ids: Vec<&str> = row.devices.iter().map(DeviceId::as_str).collect();
            let rate = row.rate.map_or_else(|| "-".to_owned(), |r| format!("{r:.2}"));
            writeln!(
                f,
                "{:02}:00 | rate={:>5} | load={:>7.1} W | headroom={:>7.1} W | {}",
                row.hour,
                rate,
                row.load_w,
                row.headroom_w,
                ids.join(", ")
            )?;
        }
        writeln!(f, "Total cost:    {:.4}", self.total_cost)?;
        writeln!(f, "Total energy:  {:.3} kWh", self.total_energy_kwh)?;
        writeln!(
            f,
            "Peak load:     {:.1} W at {:02}:00 (cap {:.1} W)",
            self.peak_load_w, self.peak_hour, self.max_power
        )?;
        let optimality = match self.optimality {
            Optimality::Optimal => "optimal",
            Optimality::BestEffort => "best effort",
        };
        write!(f, "Search:        {optimality}")
    }
}
