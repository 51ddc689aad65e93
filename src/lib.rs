//! # TTL Shortener
//!
//! An in-memory URL shortening service with expiring short codes and
//! per-click analytics, built with Axum.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Entries, clicks, store trait, audit events
//! - **Application Layer** ([`application`]) - Shortening, redirection and stats services
//! - **Infrastructure Layer** ([`infrastructure`]) - In-memory store and audit log delivery
//! - **API Layer** ([`api`]) - REST handlers, DTOs, and middleware
//!
//! ## Features
//!
//! - Custom or generated short codes with collision retry
//! - Per-entry validity window; expired codes stop redirecting
//! - Click history with timestamp, referrer and client origin
//! - Optional eviction of long-expired entries
//! - Fire-and-forget remote audit log with token refresh
//!
//! ## Quick Start
//!
//! ```bash
//! export BASE_URL="http://localhost:3000"
//! cargo run
//!
//! curl -X POST localhost:3000/shorturls \
//!      -H 'content-type: application/json' \
//!      -d '{"url":"https://example.com/docs","validity":30}'
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{
        CreateEntry, RedirectionService, ShorteningService, StatsService,
    };
    pub use crate::domain::entities::{ClickRecord, NewEntry, ShortEntry};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
