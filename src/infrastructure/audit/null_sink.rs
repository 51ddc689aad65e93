//! No-op audit sink for disabled auditing.

use super::service::{AuditResult, AuditSink};
use crate::domain::audit_event::AuditEvent;
use async_trait::async_trait;
use tracing::{debug, trace};

/// An audit sink that drops every event.
///
/// Used when `AUDIT_LOG_ENDPOINT` is not configured.
pub struct NullAuditSink;

impl NullAuditSink {
    /// Creates a new NullAuditSink instance.
    pub fn new() -> Self {
        debug!("Using NullAuditSink (audit log disabled)");
        Self
    }
}

impl Default for NullAuditSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuditSink for NullAuditSink {
    async fn send(&self, event: &AuditEvent) -> AuditResult<()> {
        trace!("Discarding audit event: {}", event.message);
        Ok(())
    }
}
