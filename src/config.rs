//! Household configuration: loading, presets and validation.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::devices::{Device, HOURS_PER_DAY, Hour, Mode};
use crate::plan::tariff::{RateInterval, coverage};
use crate::plan::types::SearchLimits;

/// Top-level household configuration parsed from TOML or JSON.
///
/// Every section has a default matching the `demo` preset, so a file only
/// needs the parts it changes. Load with [`HouseholdConfig::from_path`] or
/// use [`HouseholdConfig::demo`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HouseholdConfig {
    /// Power cap for any single hour (W).
    #[serde(default = "default_max_power", alias = "maxPower")]
    pub max_power: f64,
    /// Devices to schedule.
    #[serde(default = "demo_devices")]
    pub devices: Vec<Device>,
    /// Tariff covering the whole day.
    #[serde(default = "demo_rates")]
    pub rates: Vec<RateInterval>,
    /// Optimizer limits.
    #[serde(default)]
    pub search: SearchConfig,
}

/// Optimizer limits as written in a household file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Wall-clock budget in milliseconds.
    pub deadline_ms: Option<u64>,
    /// Maximum number of search nodes.
    pub node_budget: Option<u64>,
    /// Worker threads (must be > 0).
    pub workers: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            deadline_ms: None,
            node_budget: None,
            workers: 1,
        }
    }
}

impl SearchConfig {
    /// Converts to optimizer limits.
    pub fn limits(&self) -> SearchLimits {
        SearchLimits {
            deadline: self.deadline_ms.map(Duration::from_millis),
            node_budget: self.node_budget,
            workers: self.workers.max(1),
        }
    }
}

fn default_max_power() -> f64 {
    2100.0
}

fn demo_devices() -> Vec<Device> {
    vec![
        Device::new("F972B82BA56A70CC579945773B6866FB", "Dishwasher", 950.0, 3).with_mode("night"),
        Device::new("C515D887EDBBE669B2FDAC62F571E9E9", "Oven", 2000.0, 2).with_mode("day"),
        Device::new("02DDD23A85DADDD71198305330CC386D", "Fridge", 50.0, 24),
        Device::new("1E6276CC231716FE8EE8BC908486D41E", "Thermostat", 50.0, 24),
        Device::new("7D9DC84AD110500D284B33C82FE6E85E", "Air conditioner", 850.0, 1),
    ]
}

fn demo_rates() -> Vec<RateInterval> {
    vec![
        RateInterval::new(7, 10, 6.46),
        RateInterval::new(10, 17, 5.38),
        RateInterval::new(17, 21, 6.46),
        RateInterval::new(21, 23, 5.38),
        RateInterval::new(23, 7, 1.79),
    ]
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"devices[2].duration"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl Default for HouseholdConfig {
    fn default() -> Self {
        Self::demo()
    }
}

impl HouseholdConfig {
    /// Returns the reference household: five appliances, a five-band tariff
    /// and a 2100 W cap.
    pub fn demo() -> Self {
        Self {
            max_power: default_max_power(),
            devices: demo_devices(),
            rates: demo_rates(),
            search: SearchConfig::default(),
        }
    }

    /// Returns the demo household on a single flat tariff.
    pub fn flat_tariff() -> Self {
        Self {
            rates: vec![RateInterval::new(0, 24, 4.0)],
            ..Self::demo()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["demo", "flat_tariff"];

    /// Loads a household from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "demo" => Ok(Self::demo()),
            "flat_tariff" => Ok(Self::flat_tariff()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a household file; `.json` files are read as JSON, anything
    /// else as TOML.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or parsed.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("household", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        debug!(path = %path.display(), is_json, "loading household");
        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    /// Parses a household from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Parses a household from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the JSON is invalid or contains unknown fields.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(|e| ConfigError::new("json", e.to_string()))
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if the configuration is valid. Unknown mode
    /// tags are not errors; they fall back to the all-day window.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if !(self.max_power.is_finite() && self.max_power > 0.0) {
            errors.push(ConfigError::new("max_power", "must be a finite number > 0"));
        }

        for (i, device) in self.devices.iter().enumerate() {
            let field = |name: &str| format!("devices[{i}].{name}");
            if device.id.as_str().is_empty() {
                errors.push(ConfigError::new(field("id"), "must not be empty"));
            }
            if self.devices[..i].iter().any(|d| d.id == device.id) {
                errors.push(ConfigError::new(
                    field("id"),
                    format!("duplicate device id \"{}\"", device.id),
                ));
            }
            if !(device.power.is_finite() && device.power > 0.0) {
                errors.push(ConfigError::new(field("power"), "must be a finite number > 0"));
            }
            if !(1..=24).contains(&device.duration) {
                errors.push(ConfigError::new(field("duration"), "must be in [1, 24]"));
            }
            if let Some(tag) = device.mode.as_deref()
                && !matches!(tag, "day" | "night" | "allDay")
            {
                warn!(device = %device.id, tag, fallback = %Mode::AllDay, "unknown mode tag");
            }
        }

        for (i, rate) in self.rates.iter().enumerate() {
            if usize::from(rate.from) >= HOURS_PER_DAY {
                errors.push(ConfigError::new(format!("rates[{i}].from"), "must be in [0, 23]"));
            }
            if usize::from(rate.to) > HOURS_PER_DAY {
                errors.push(ConfigError::new(format!("rates[{i}].to"), "must be in [0, 24]"));
            }
            if !rate.value.is_finite() {
                errors.push(ConfigError::new(format!("rates[{i}].value"), "must be finite"));
            }
        }

        let counts = coverage(&self.rates);
        let gaps = hours_where(&counts, |c| c == 0);
        if !gaps.is_empty() {
            errors.push(ConfigError::new(
                "rates",
                format!("hours {gaps:?} are not covered by any interval"),
            ));
        }
        let overlaps = hours_where(&counts, |c| c > 1);
        if !overlaps.is_empty() {
            errors.push(ConfigError::new(
                "rates",
                format!("hours {overlaps:?} are covered by more than one interval"),
            ));
        }

        if self.search.workers == 0 {
            errors.push(ConfigError::new("search.workers", "must be > 0"));
        }

        errors
    }
}

fn hours_where(counts: &[usize; HOURS_PER_DAY], predicate: impl Fn(usize) -> bool) -> Vec<Hour> {
    (0..)
        .zip(counts)
        .filter(|&(_, &count)| predicate(count))
        .map(|(hour, _)| hour)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_preset_valid() {
        let cfg = HouseholdConfig::demo();
        let errors = cfg.validate();
        assert!(errors.is_empty(), "demo should be valid: {errors:?}");
    }

    #[test]
    fn from_preset_unknown() {
        let err = HouseholdConfig::from_preset("nonexistent");
        assert!(err.is_err());
        let e = err.unwrap_err();
        assert!(e.message.contains("unknown preset"));
    }

    #[test]
    fn all_presets_are_valid() {
        for name in HouseholdConfig::PRESETS {
            let cfg = HouseholdConfig::from_preset(name);
            assert!(cfg.is_ok(), "preset \"{name}\" should load");
            let errors = cfg.as_ref().map(HouseholdConfig::validate).unwrap_or_default();
            assert!(
                errors.is_empty(),
                "preset \"{name}\" should be valid: {errors:?}"
            );
        }
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
max_power = 3000

[[devices]]
id = "kettle"
name = "Kettle"
power = 2000
duration = 1
mode = "day"

[[rates]]
from = 7
to = 23
value = 5.0

[[rates]]
from = 23
to = 7
value = 1.5

[search]
deadline_ms = 250
workers = 2
"#;
        let cfg = HouseholdConfig::from_toml_str(toml);
        assert!(cfg.is_ok(), "valid TOML should parse: {:?}", cfg.err());
        let cfg = cfg.ok();
        assert_eq!(cfg.as_ref().map(|c| c.max_power), Some(3000.0));
        assert_eq!(cfg.as_ref().map(|c| c.devices.len()), Some(1));
        assert_eq!(
            cfg.as_ref().map(|c| c.search.limits().deadline),
            Some(Some(Duration::from_millis(250)))
        );
        assert!(cfg.map(|c| c.validate().is_empty()).unwrap_or(false));
    }

    #[test]
    fn json_uses_reference_field_names() {
        let json = r#"{
            "maxPower": 2100,
            "devices": [{"id": "a", "name": "A", "power": 100, "duration": 2}],
            "rates": [{"from": 0, "to": 24, "value": 1.0}]
        }"#;
        let cfg = HouseholdConfig::from_json_str(json);
        assert!(cfg.is_ok(), "valid JSON should parse: {:?}", cfg.err());
        assert_eq!(cfg.ok().map(|c| c.devices[0].mode.is_none()), Some(true));
    }

    #[test]
    fn invalid_toml_unknown_field() {
        let toml = r#"
[search]
workers = 1
bogus_field = true
"#;
        assert!(HouseholdConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let toml = "max_power = 5000\n";
        let cfg = HouseholdConfig::from_toml_str(toml);
        assert!(cfg.is_ok());
        let cfg = cfg.ok();
        assert_eq!(cfg.as_ref().map(|c| c.max_power), Some(5000.0));
        assert_eq!(cfg.as_ref().map(|c| c.devices.len()), Some(5));
        assert_eq!(cfg.as_ref().map(|c| c.rates.len()), Some(5));
    }

    #[test]
    fn validation_catches_bad_durations() {
        let mut cfg = HouseholdConfig::demo();
        cfg.devices[0].duration = 0;
        cfg.devices[1].duration = 25;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "devices[0].duration"));
        assert!(errors.iter().any(|e| e.field == "devices[1].duration"));
    }

    #[test]
    fn validation_catches_duplicate_ids() {
        let mut cfg = HouseholdConfig::demo();
        cfg.devices[1].id = cfg.devices[0].id.clone();
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "devices[1].id"));
    }

    #[test]
    fn validation_catches_rate_gap() {
        let mut cfg = HouseholdConfig::demo();
        cfg.rates.pop();
        let errors = cfg.validate();
        let gap = errors.iter().find(|e| e.message.contains("not covered"));
        assert!(gap.is_some(), "gap should be reported: {errors:?}");
        assert!(gap.is_some_and(|e| e.message.contains("23")));
    }

    #[test]
    fn validation_catches_rate_overlap() {
        let mut cfg = HouseholdConfig::demo();
        cfg.rates.push(RateInterval::new(8, 9, 1.0));
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.message.contains("more than one")));
    }

    #[test]
    fn validation_catches_non_positive_cap() {
        let mut cfg = HouseholdConfig::demo();
        cfg.max_power = 0.0;
        assert!(cfg.validate().iter().any(|e| e.field == "max_power"));
    }

    #[test]
    fn unknown_mode_is_not_an_error() {
        let mut cfg = HouseholdConfig::demo();
        cfg.devices[0].mode = Some("weekend".to_owned());
        assert!(cfg.validate().is_empty());
    }
}
