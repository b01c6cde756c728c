/// Contiguous run enumeration.
pub mod candidate;
pub mod optimizer;
/// Hourly power aggregation under the cap.
pub mod power;
pub mod report;
/// Rate table lookup and candidate pricing.
pub mod tariff;
pub mod types;

pub use candidate::{CandidateSchedule, generate_candidates};
pub use optimizer::{optimize, optimize_with_limits};
pub use tariff::{PricingError, RateInterval, evaluate_cost};
pub use types::{Infeasibility, Optimality, Outcome, Schedule, SearchLimits};
