//! Household devices and their permitted operating windows.

pub mod types;
/// Mode tags and window resolution.
pub mod window;

// Re-export the main types for convenience
pub use types::{Device, DeviceId, HOURS_PER_DAY, Hour};
pub use window::{Mode, resolve_window};
