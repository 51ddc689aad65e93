//! Background delivery of queued audit events.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, warn};

use super::service::{AuditError, AuditResult, AuditSink};
use crate::domain::audit_event::AuditEvent;

/// Delay unit for the backoff: retries wait roughly 50ms, 100ms, 200ms...
const RETRY_FACTOR_MILLIS: u64 = 25;

/// Longest wait between two attempts.
const RETRY_MAX_DELAY: Duration = Duration::from_secs(2);

/// Delivers one event, retrying transient failures up to `max_retries` times.
pub async fn deliver(sink: &dyn AuditSink, event: &AuditEvent, max_retries: usize) -> AuditResult<()> {
    let strategy = ExponentialBackoff::from_millis(2)
        .factor(RETRY_FACTOR_MILLIS)
        .max_delay(RETRY_MAX_DELAY)
        .map(jitter)
        .take(max_retries);

    RetryIf::spawn(strategy, || sink.send(event), AuditError::is_transient).await
}

/// Drains the audit queue until every sender is gone.
///
/// Failed deliveries are logged at `warn` and dropped.
pub async fn run_audit_worker(
    mut rx: mpsc::Receiver<AuditEvent>,
    sink: Arc<dyn AuditSink>,
    max_retries: usize,
) {
    while let Some(event) = rx.recv().await {
        if let Err(e) = deliver(sink.as_ref(), &event, max_retries).await {
            warn!("Logging to audit service failed: {}", e);
        }
    }

    debug!("Audit queue closed, worker exiting");
}
