//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::AppState;
use super::types::{ErrorResponse, HoursQuery};
use crate::io::PlanDocument;
use crate::plan::report::HourRow;

/// Returns the plan document.
///
/// `GET /plan` → 200 + `PlanDocument` JSON (feasible or infeasible)
pub async fn get_plan(State(state): State<Arc<AppState>>) -> Json<PlanDocument> {
    Json(PlanDocument::from_outcome(&state.outcome))
}

/// Returns hourly rows, optionally filtered by hour range.
///
/// `GET /hours` → 200 + `Vec<HourRow>` JSON
/// `GET /hours?from=N&to=M` → filtered range (inclusive)
/// `GET /hours?from=10&to=5` → 400 + `ErrorResponse`
/// `GET /hours` on an infeasible plan → 409 + `ErrorResponse`
pub async fn get_hours(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HoursQuery>,
) -> impl IntoResponse {
    let (from, to) = query.bounds();

    if from > to {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("`from` ({from}) must be <= `to` ({to})"),
            }),
        ));
    }

    let Some(report) = state.report.as_ref() else {
        return Err((
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                error: "no feasible schedule".to_owned(),
            }),
        ));
    };

    let rows: Vec<HourRow> = report
        .hours
        .iter()
        .filter(|row| (from..=to).contains(&row.hour))
        .cloned()
        .collect();

    Ok(Json(rows))
}
