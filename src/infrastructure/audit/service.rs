//! Audit sink trait and error types.

use async_trait::async_trait;

use crate::domain::audit_event::AuditEvent;

/// Errors that can occur while delivering an audit event.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("Audit transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Audit log rejected event with status {0}")]
    Rejected(u16),
    #[error("Audit log rejected credentials")]
    Unauthorized,
    #[error("Audit authentication failed: {0}")]
    Authentication(String),
}

impl AuditError {
    /// Returns true if retrying the same event may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Rejected(status) => *status >= 500 || *status == 429,
            Self::Unauthorized | Self::Authentication(_) => false,
        }
    }
}

/// Result type for audit operations.
pub type AuditResult<T> = Result<T, AuditError>;

/// Destination for audit events.
///
/// # Implementations
///
/// - [`crate::infrastructure::audit::HttpAuditSink`] - Remote sidecar over HTTP
/// - [`crate::infrastructure::audit::NullAuditSink`] - No-op
#[async_trait]
pub trait AuditSink: Send + Sync {
    /// Delivers one event.
    async fn send(&self, event: &AuditEvent) -> AuditResult<()>;
}
