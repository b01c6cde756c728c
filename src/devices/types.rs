//! Common types for schedulable household devices.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::window::{Mode, resolve_window};

/// Hour of day, `0..=23`.
pub type Hour = u8;

/// Number of hourly slots in one planning cycle.
pub const HOURS_PER_DAY: usize = 24;

/// Opaque, unique device identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(pub String);

impl DeviceId {
    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DeviceId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A household device that has to run once per day.
///
/// Power draw is constant for the whole run. Durations are expected to be
/// pre-validated to `1..=24` hours by whoever loads the device.
///
/// # Examples
///
/// ```
/// use appliance_scheduler::devices::Device;
///
/// let oven = Device::new("oven", "Oven", 2000.0, 2).with_mode("day");
/// assert_eq!(oven.window().len(), 14);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Device {
    /// Unique identifier.
    pub id: DeviceId,
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
    /// Power draw while running (W).
    pub power: f64,
    /// Required contiguous run length (hours).
    pub duration: u8,
    /// Operating mode tag (`"day"`, `"night"`, `"allDay"`); absent means all day.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
}

impl Device {
    /// Creates a device that may run at any hour.
    pub fn new(id: &str, name: &str, power: f64, duration: u8) -> Self {
        Self {
            id: DeviceId::from(id),
            name: name.to_owned(),
            power,
            duration,
            mode: None,
        }
    }

    /// Sets the operating mode tag.
    #[must_use]
    pub fn with_mode(mut self, mode: &str) -> Self {
        self.mode = Some(mode.to_owned());
        self
    }

    /// Parsed operating mode, falling back to [`Mode::AllDay`].
    pub fn mode(&self) -> Mode {
        Mode::from_tag(self.mode.as_deref())
    }

    /// Ordered hours this device is allowed to run in.
    pub fn window(&self) -> &'static [Hour] {
        resolve_window(self.mode.as_deref())
    }
}
