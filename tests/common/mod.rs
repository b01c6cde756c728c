//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use appliance_scheduler::devices::Device;
use appliance_scheduler::plan::RateInterval;

/// Power cap of the reference household (W).
pub const DEMO_MAX_POWER: f64 = 2100.0;

pub const DISHWASHER: &str = "F972B82BA56A70CC579945773B6866FB";
pub const OVEN: &str = "C515D887EDBBE669B2FDAC62F571E9E9";
pub const FRIDGE: &str = "02DDD23A85DADDD71198305330CC386D";
pub const THERMOSTAT: &str = "1E6276CC231716FE8EE8BC908486D41E";
pub const AIR_CONDITIONER: &str = "7D9DC84AD110500D284B33C82FE6E85E";

/// Five-band reference tariff with a cheap night band wrapping midnight.
pub fn demo_rates() -> Vec<RateInterval> {
    vec![
        RateInterval::new(7, 10, 6.46),
        RateInterval::new(10, 17, 5.38),
        RateInterval::new(17, 21, 6.46),
        RateInterval::new(21, 23, 5.38),
        RateInterval::new(23, 7, 1.79),
    ]
}

/// Night-only dishwasher (950 W, 3 h).
pub fn dishwasher() -> Device {
    Device::new(DISHWASHER, "Dishwasher", 950.0, 3).with_mode("night")
}

/// Day-only oven (2000 W, 2 h).
pub fn oven() -> Device {
    Device::new(OVEN, "Oven", 2000.0, 2).with_mode("day")
}

/// The five reference appliances.
pub fn demo_devices() -> Vec<Device> {
    vec![
        dishwasher(),
        oven(),
        Device::new(FRIDGE, "Fridge", 50.0, 24),
        Device::new(THERMOSTAT, "Thermostat", 50.0, 24),
        Device::new(AIR_CONDITIONER, "Air conditioner", 850.0, 1),
    ]
}
