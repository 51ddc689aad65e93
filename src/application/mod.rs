//! Application layer services implementing the short link lifecycle.
//!
//! Services consume the [`crate::domain::repositories::EntryRepository`] trait
//! and give HTTP handlers a small synchronous API. None of them await: audit
//! events are queued, never sent inline.
//!
//! # Available Services
//!
//! - [`services::shortening_service::ShorteningService`] - Code resolution and entry creation
//! - [`services::redirection_service::RedirectionService`] - Lookup, expiry check, click recording
//! - [`services::click_recorder::ClickRecorder`] - Click history appends
//! - [`services::stats_service::StatsService`] - Read-only entry summaries

pub mod services;
