//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /shorturls`          - Create a short URL
//! - `GET  /shorturls/{code}`   - Click statistics
//! - `GET  /health`             - Health check: store, audit queue
//! - `GET  /{code}`             - Short link redirect
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// The redirect handler extracts `ConnectInfo<SocketAddr>`, so the router
/// must be served with `into_make_service_with_connect_info`.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(routes(state))
}

/// All routes with tracing, before path normalization.
pub fn routes(state: AppState) -> Router {
    Router::new()
        .merge(api::routes::shorturl_routes())
        .route("/health", get(health_handler))
        .route("/{code}", get(redirect_handler))
        .with_state(state)
        .layer(tracing::layer())
}
