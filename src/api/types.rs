//! API query and error types.

use serde::{Deserialize, Serialize};

use crate::devices::Hour;

/// Optional range query parameters for the hours endpoint.
#[derive(Debug, Deserialize)]
pub struct HoursQuery {
    /// First hour (inclusive).
    pub from: Option<Hour>,
    /// Last hour (inclusive).
    pub to: Option<Hour>,
}

impl HoursQuery {
    /// Inclusive hour range, defaulting to the whole day.
    pub fn bounds(&self) -> (Hour, Hour) {
        (self.from.unwrap_or(0), self.to.unwrap_or(23))
    }
}

/// Error response body for 4xx errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
