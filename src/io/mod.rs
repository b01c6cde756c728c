/// CSV export of the hourly plan.
pub mod export;
pub mod json;

pub use export::{export_csv, write_csv};
pub use json::{PlanDocument, export_json, write_json};
