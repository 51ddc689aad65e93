#![allow(dead_code)]

use axum::Router;
use axum::extract::connect_info::MockConnectInfo;
use axum_test::TestServer;
use chrono::{Duration, Utc};
use std::net::SocketAddr;
use std::sync::Arc;
use ttl_shortener::config::Config;
use ttl_shortener::domain::audit_event::AuditEvent;
use ttl_shortener::domain::audit_logger::AuditLogger;
use ttl_shortener::domain::entities::ShortEntry;
use ttl_shortener::domain::repositories::EntryRepository;
use ttl_shortener::infrastructure::persistence::MemoryEntryRepository;
use ttl_shortener::routes::routes;
use ttl_shortener::state::AppState;
use tokio::sync::mpsc;

pub const BASE_URL: &str = "http://sho.rt";

pub fn peer_addr() -> SocketAddr {
    SocketAddr::from(([203, 0, 113, 7], 52000))
}

pub fn test_config() -> Config {
    Config {
        base_url: BASE_URL.to_string(),
        ..Config::default()
    }
}

/// State over a fresh store, with the audit queue exposed for assertions.
pub fn create_test_state_with(
    config: &Config,
) -> (AppState, Arc<MemoryEntryRepository>, mpsc::Receiver<AuditEvent>) {
    let store = Arc::new(MemoryEntryRepository::new());
    let (audit, rx) = AuditLogger::channel(100);

    let state = AppState::new(store.clone(), audit, config);

    (state, store, rx)
}

pub fn create_test_state() -> (AppState, Arc<MemoryEntryRepository>, mpsc::Receiver<AuditEvent>) {
    create_test_state_with(&test_config())
}

/// Full router with a fixed peer address standing in for `ConnectInfo`.
pub fn test_router(state: AppState) -> Router {
    routes(state).layer(MockConnectInfo(peer_addr()))
}

pub fn test_server(state: AppState) -> TestServer {
    TestServer::new(test_router(state)).unwrap()
}

/// Inserts an entry that expired `minutes_ago` minutes ago.
pub fn insert_expired(store: &MemoryEntryRepository, code: &str, url: &str, minutes_ago: i64) {
    let created = Utc::now() - Duration::minutes(minutes_ago + 30);
    let entry = ShortEntry::new(
        code.to_string(),
        url.to_string(),
        created,
        Utc::now() - Duration::minutes(minutes_ago),
    );
    store.put(code, entry).unwrap();
}

/// Collects every audit event queued so far.
pub fn drain(rx: &mut mpsc::Receiver<AuditEvent>) -> Vec<AuditEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}
