//! Handler for short URL creation.

use axum::{Json, extract::State, extract::rejection::JsonRejection, http::StatusCode};
use validator::Validate;

use crate::api::dto::shorten::{CreateShortUrlRequest, CreateShortUrlResponse};
use crate::domain::audit_event::{Level, Package};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short URL.
///
/// # Endpoint
///
/// `POST /shorturls`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com/docs",
///   "validity": 30,         // optional, minutes
///   "shortcode": "docs"     // optional
/// }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "shortLink": "http://localhost:3000/docs",
///   "expiry": "2025-01-01T00:30:00.000Z"
/// }
/// ```
///
/// A requested shortcode that is already taken is replaced with a generated
/// one; the response always carries the code that was actually issued.
///
/// # Errors
///
/// Returns 400 Bad Request if the body is malformed or fails validation.
/// Rejected bodies are reported to the audit log.
/// Returns 503 Service Unavailable if no free code could be generated.
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateShortUrlRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateShortUrlResponse>), AppError> {
    let payload = payload
        .map_err(AppError::from)
        .and_then(|Json(payload)| {
            payload.validate()?;
            Ok(payload)
        })
        .inspect_err(|e| {
            tracing::warn!("Rejected create request: {}", e);
            state.audit.backend(
                Level::Error,
                Package::Handler,
                format!("Invalid URL provided: {e}"),
            );
        })?;

    let created = state.shortening_service.create(payload.into())?;

    Ok((
        StatusCode::CREATED,
        Json(CreateShortUrlResponse::new(
            state.short_link(&created.code),
            created.expires_at,
        )),
    ))
}
