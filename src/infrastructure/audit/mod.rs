//! Delivery of audit events to the remote logging sidecar.
//!
//! Provides an [`AuditSink`] trait with two implementations:
//! - [`HttpAuditSink`] - Posts events to the sidecar over HTTP
//! - [`NullAuditSink`] - Discards events (audit disabled or tests)
//!
//! [`run_audit_worker`] drains the queue fed by
//! [`crate::domain::audit_logger::AuditLogger`]. Delivery failures are logged and
//! swallowed; they never reach request handling.

mod http_sink;
mod null_sink;
mod service;
mod worker;

pub use http_sink::HttpAuditSink;
pub use null_sink::NullAuditSink;
pub use service::{AuditError, AuditResult, AuditSink};
pub use worker::{deliver, run_audit_worker};
