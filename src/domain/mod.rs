//! Domain layer containing business entities and contracts.
//!
//! Nothing here depends on the HTTP layer or on a concrete store.
//!
//! # Architecture
//!
//! - [`entities`] - Short entries and click records
//! - [`repositories`] - Storage trait definitions
//! - [`audit_event`] - Structured audit log events
//! - [`audit_logger`] - Non-blocking handle for emitting audit events
//! - [`entry_reaper`] - Background eviction of long-expired entries
//!
//! # Redirect Flow
//!
//! 1. HTTP handler calls [`crate::application::services::RedirectionService::resolve`]
//! 2. The entry is looked up and its expiry checked
//! 3. [`crate::application::services::ClickRecorder`] appends a click through the store
//! 4. An [`audit_event::AuditEvent`] is queued; delivery happens off the request path

pub mod audit_event;
pub mod audit_logger;
pub mod entities;
pub mod entry_reaper;
pub mod repositories;
