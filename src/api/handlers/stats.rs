//! Handler for short URL statistics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::stats::StatsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Retrieves click statistics for a short code.
///
/// # Endpoint
///
/// `GET /shorturls/{code}`
///
/// Expired entries are still reported until the reaper evicts them.
///
/// # Response
///
/// ```json
/// {
///   "totalClicks": 1,
///   "originalUrlInfo": {
///     "originalUrl": "https://example.com/docs",
///     "creationDate": "2025-01-01T00:00:00.000Z",
///     "expiryDate": "2025-01-01T00:30:00.000Z"
///   },
///   "detailedClickData": [
///     { "timestamp": "2025-01-01T00:05:00.000Z", "referrer": "unknown", "origin": "10.0.0.1" }
///   ]
/// }
/// ```
///
/// # Errors
///
/// Returns 404 Not Found if the code does not exist.
pub async fn stats_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<StatsResponse>, AppError> {
    let summary = state.stats_service.summarize(&code)?;

    Ok(Json(summary.into()))
}
