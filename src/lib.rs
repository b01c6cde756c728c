//! Cost-optimal daily scheduling of household appliances under a power cap.

#[cfg(feature = "api")]
pub mod api;
pub mod cli;
pub mod config;
pub mod devices;
/// Plan export formats.
pub mod io;
/// Candidate generation, pricing, power aggregation and the optimizer.
pub mod plan;
