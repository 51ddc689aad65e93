//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{RedirectionService, ShorteningService, StatsService};
use crate::config::Config;
use crate::domain::audit_logger::AuditLogger;
use crate::infrastructure::persistence::MemoryEntryRepository;
use crate::utils::code_generator::HexCodeGenerator;

pub type Shortener = ShorteningService<MemoryEntryRepository, HexCodeGenerator>;
pub type Redirector = RedirectionService<MemoryEntryRepository>;
pub type Stats = StatsService<MemoryEntryRepository>;

#[derive(Clone)]
pub struct AppState {
    pub shortening_service: Arc<Shortener>,
    pub redirection_service: Arc<Redirector>,
    pub stats_service: Arc<Stats>,
    pub audit: AuditLogger,
    /// Prefix for returned short links, without a trailing slash.
    pub base_url: String,
    pub behind_proxy: bool,
}

impl AppState {
    /// Wires every service to one shared store.
    pub fn new(store: Arc<MemoryEntryRepository>, audit: AuditLogger, config: &Config) -> Self {
        let shortening_service = Arc::new(ShorteningService::new(
            store.clone(),
            HexCodeGenerator::new(config.code_length),
            config.shortening_policy(),
            audit.clone(),
        ));
        let redirection_service = Arc::new(RedirectionService::new(store.clone(), audit.clone()));
        let stats_service = Arc::new(StatsService::new(store, audit.clone()));

        Self {
            shortening_service,
            redirection_service,
            stats_service,
            audit,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            behind_proxy: config.behind_proxy,
        }
    }

    /// Full short link for `code`.
    pub fn short_link(&self, code: &str) -> String {
        format!("{}/{}", self.base_url, code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_link_trims_trailing_slash() {
        let config = Config {
            base_url: "https://sho.rt/".to_string(),
            ..Config::default()
        };
        let state = AppState::new(
            Arc::new(MemoryEntryRepository::new()),
            AuditLogger::disabled(),
            &config,
        );

        assert_eq!(state.short_link("abc123"), "https://sho.rt/abc123");
    }
}
