//! Read-only REST API over a computed plan.
//!
//! Provides two GET endpoints:
//! - `/plan`: the plan document (schedule and consumed energy, or the
//!   infeasibility reason)
//! - `/hours`: per-hour load rows with optional range filtering

mod handlers;
mod types;

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tracing::info;

use crate::devices::Device;
use crate::plan::report::ScheduleReport;
use crate::plan::{Outcome, RateInterval};

pub use types::{ErrorResponse, HoursQuery};

/// Immutable application state shared across all request handlers.
///
/// Built once after optimization and wrapped in `Arc`; handlers only read.
pub struct AppState {
    /// Optimization outcome served by `/plan`.
    pub outcome: Outcome,
    /// Hourly report, present only for a feasible outcome.
    pub report: Option<ScheduleReport>,
}

impl AppState {
    /// Builds the state for an outcome planned over `devices` and `rates`.
    pub fn new(devices: &[Device], rates: &[RateInterval], max_power: f64, outcome: Outcome) -> Self {
        let report = outcome
            .schedule()
            .map(|schedule| ScheduleReport::from_schedule(devices, rates, schedule, max_power));
        Self { outcome, report }
    }
}

/// Builds the axum router with all API routes.
///
/// # Arguments
///
/// * `state` - Shared application state
///
/// # Returns
///
/// Configured `Router` ready to serve.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/plan", get(handlers::get_plan))
        .route("/hours", get(handlers::get_hours))
        .with_state(state)
}

/// Binds to the given address and serves the API until the process ends.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind to `addr` or the
/// server stops with an error.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API server listening");
    axum::serve(listener, app).await
}
