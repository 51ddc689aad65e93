//! HTTP server initialization and runtime setup.
//!
//! Handles store creation, audit and reaper task spawning, and the Axum
//! server lifecycle.

use crate::config::{AuditConfig, Config, DEFAULT_AUDIT_QUEUE_CAPACITY};
use crate::domain::audit_event::{Level, Package};
use crate::domain::audit_logger::AuditLogger;
use crate::domain::entry_reaper::run_entry_reaper;
use crate::infrastructure::audit::{AuditSink, HttpAuditSink, NullAuditSink, run_audit_worker};
use crate::infrastructure::persistence::MemoryEntryRepository;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - In-memory entry store
/// - Audit queue and its delivery worker (HTTP sink or NullAuditSink)
/// - Expired entry reaper, when retention is configured
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - The retention window does not fit a duration
/// - The audit HTTP client cannot be built
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let store = Arc::new(MemoryEntryRepository::new());

    let audit = spawn_audit(config.audit.clone())?;

    let retention = config
        .entry_retention_minutes
        .map(|minutes| {
            chrono::Duration::try_minutes(minutes)
                .with_context(|| format!("ENTRY_RETENTION_MINUTES out of range: {minutes}"))
        })
        .transpose()?;

    let reaper = retention.map(|retention| {
        tokio::spawn(run_entry_reaper(
            store.clone(),
            retention,
            std::time::Duration::from_secs(config.reaper_interval_seconds),
            audit.clone(),
        ))
    });
    if reaper.is_none() {
        tracing::info!("Entry reaper disabled; expired entries are kept");
    }

    let state = AppState::new(store, audit.clone(), &config);

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    audit.backend(
        Level::Info,
        Package::Config,
        format!("Server running on {}", config.base_url),
    );

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    if let Some(handle) = reaper {
        handle.abort();
    }
    tracing::info!("Server stopped");

    Ok(())
}

/// Creates the audit queue and spawns its delivery worker.
///
/// Without an audit section the queue still exists but drains into a
/// [`NullAuditSink`], so event emission costs the same either way.
fn spawn_audit(config: Option<AuditConfig>) -> Result<AuditLogger> {
    let (capacity, max_retries, sink): (usize, usize, Arc<dyn AuditSink>) = match config {
        Some(audit) => {
            let capacity = audit.queue_capacity;
            let max_retries = audit.max_retries;
            let sink = HttpAuditSink::new(audit).context("Failed to build audit client")?;
            (capacity, max_retries, Arc::new(sink))
        }
        None => {
            tracing::info!("Audit log disabled (NullAuditSink)");
            (DEFAULT_AUDIT_QUEUE_CAPACITY, 0, Arc::new(NullAuditSink::new()))
        }
    };

    let (audit, rx) = AuditLogger::channel(capacity);
    tokio::spawn(run_audit_worker(rx, sink, max_retries));
    tracing::info!("Audit worker started");

    Ok(audit)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
