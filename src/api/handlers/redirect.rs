//! Handler for short URL redirect.

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};
use std::net::SocketAddr;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_origin::{client_origin, referrer};

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Look up the entry and check its expiry
/// 2. Append a click with the `Referer` header and client address
/// 3. Return 302 Found with the target in `Location`
///
/// # Errors
///
/// Returns 404 Not Found if the code does not exist or has expired.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<impl IntoResponse, AppError> {
    let origin = client_origin(&headers, addr, state.behind_proxy);

    let target = state
        .redirection_service
        .resolve(&code, referrer(&headers), &origin)?;

    Ok((StatusCode::FOUND, [(header::LOCATION, target)]))
}
