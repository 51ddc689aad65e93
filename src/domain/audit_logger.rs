//! Fire-and-forget handle for emitting audit events.

use tokio::sync::mpsc;
use tracing::debug;

use crate::domain::audit_event::{AuditEvent, Level, Package};

/// Cloneable sender side of the audit queue.
///
/// Emitting never waits: a full or closed queue drops the event. Delivery is
/// done by [`crate::infrastructure::audit::run_audit_worker`] on its own task,
/// so no store lock is ever held across network I/O.
#[derive(Debug, Clone)]
pub struct AuditLogger {
    sender: Option<mpsc::Sender<AuditEvent>>,
}

impl AuditLogger {
    /// Creates a logger that feeds the given queue.
    pub fn new(sender: mpsc::Sender<AuditEvent>) -> Self {
        Self {
            sender: Some(sender),
        }
    }

    /// Creates a logger that discards every event.
    pub fn disabled() -> Self {
        Self { sender: None }
    }

    /// Creates a logger together with the receiving end of its queue.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<AuditEvent>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self::new(tx), rx)
    }

    pub fn is_enabled(&self) -> bool {
        self.sender.is_some()
    }

    /// Returns true if events can still be queued.
    pub fn is_open(&self) -> bool {
        self.sender.as_ref().is_some_and(|s| !s.is_closed())
    }

    /// Free slots left in the queue, if enabled.
    pub fn remaining_capacity(&self) -> Option<usize> {
        self.sender.as_ref().map(|s| s.capacity())
    }

    /// Queues an event without waiting.
    pub fn emit(&self, event: AuditEvent) {
        let Some(sender) = &self.sender else {
            return;
        };

        if let Err(e) = sender.try_send(event) {
            metrics::counter!("audit_events_dropped_total").increment(1);
            debug!("Audit event dropped: {}", e);
        }
    }

    /// Queues a backend event.
    pub fn backend(&self, level: Level, package: Package, message: impl Into<String>) {
        if self.sender.is_some() {
            self.emit(AuditEvent::backend(level, package, message));
        }
    }
}
