//! Click statistics service.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;
use tracing::{debug, warn};

use crate::domain::audit_event::{Level, Package};
use crate::domain::audit_logger::AuditLogger;
use crate::domain::entities::{ClickRecord, ShortEntry};
use crate::domain::repositories::EntryRepository;
use crate::error::AppError;

/// Read-only summary of one entry.
#[derive(Debug, Clone, PartialEq)]
pub struct EntrySummary {
    pub code: String,
    pub total_clicks: usize,
    pub target_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub clicks: Vec<ClickRecord>,
}

impl From<ShortEntry> for EntrySummary {
    fn from(entry: ShortEntry) -> Self {
        Self {
            total_clicks: entry.total_clicks(),
            code: entry.code,
            target_url: entry.target_url,
            created_at: entry.created_at,
            expires_at: entry.expires_at,
            clicks: entry.clicks,
        }
    }
}

/// Service for retrieving click statistics.
///
/// Expired entries are still reported; expiry only blocks redirection.
pub struct StatsService<R: EntryRepository> {
    repository: Arc<R>,
    audit: AuditLogger,
}

impl<R: EntryRepository> StatsService<R> {
    /// Creates a new statistics service.
    pub fn new(repository: Arc<R>, audit: AuditLogger) -> Self {
        Self { repository, audit }
    }

    /// Summarizes the entry for `code`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no entry matches the code.
    pub fn summarize(&self, code: &str) -> Result<EntrySummary, AppError> {
        let Some(entry) = self.repository.get(code) else {
            warn!("Stats requested for unknown code {}", code);
            self.audit.backend(
                Level::Error,
                Package::Route,
                format!("Stats requested for unknown shortcode {code}"),
            );
            return Err(AppError::not_found(
                "Shortcode not found",
                json!({ "code": code }),
            ));
        };

        let summary = EntrySummary::from(entry);
        debug!("Stats for {}: {} clicks", code, summary.total_clicks);
        self.audit.backend(
            Level::Info,
            Package::Route,
            format!("Stats retrieved for {code}"),
        );

        Ok(summary)
    }

    /// Number of stored entries.
    pub fn count_entries(&self) -> usize {
        self.repository.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockEntryRepository;
    use chrono::Duration;

    fn service(repo: MockEntryRepository) -> StatsService<MockEntryRepository> {
        StatsService::new(Arc::new(repo), AuditLogger::disabled())
    }

    #[test]
    fn test_summarize_counts_clicks() {
        let mut mock_repo = MockEntryRepository::new();
        let now = Utc::now();
        let mut entry = ShortEntry::new(
            "abc123".to_string(),
            "https://example.com".to_string(),
            now,
            now + Duration::minutes(30),
        );
        entry.clicks.push(ClickRecord::now(None, "10.0.0.1"));
        entry.clicks.push(ClickRecord::now(Some("https://google.com"), "10.0.0.2"));

        mock_repo
            .expect_get()
            .withf(|code| code == "abc123")
            .times(1)
            .returning(move |_| Some(entry.clone()));

        let service = service(mock_repo);

        let summary = service.summarize("abc123").unwrap();

        assert_eq!(summary.total_clicks, 2);
        assert_eq!(summary.target_url, "https://example.com");
        assert_eq!(summary.clicks[0].origin, "10.0.0.1");
        assert_eq!(summary.clicks[1].referrer, "https://google.com");
    }

    #[test]
    fn test_summarize_includes_expired() {
        let mut mock_repo = MockEntryRepository::new();
        let now = Utc::now();
        let entry = ShortEntry::new(
            "old123".to_string(),
            "https://example.com".to_string(),
            now - Duration::hours(2),
            now - Duration::hours(1),
        );

        mock_repo
            .expect_get()
            .returning(move |_| Some(entry.clone()));

        let service = service(mock_repo);

        let summary = service.summarize("old123").unwrap();
        assert_eq!(summary.total_clicks, 0);
        assert!(summary.expires_at < now);
    }

    #[test]
    fn test_summarize_not_found() {
        let mut mock_repo = MockEntryRepository::new();
        mock_repo.expect_get().times(1).returning(|_| None);

        let service = service(mock_repo);

        let result = service.summarize("notfound");
        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[test]
    fn test_summarize_audits_lookup_outcome() {
        let mut mock_repo = MockEntryRepository::new();
        let now = Utc::now();
        let entry = ShortEntry::new(
            "seen01".to_string(),
            "https://example.com".to_string(),
            now,
            now + Duration::minutes(30),
        );
        mock_repo
            .expect_get()
            .returning(move |code| (code == "seen01").then(|| entry.clone()));

        let (audit, mut rx) = AuditLogger::channel(8);
        let service = StatsService::new(Arc::new(mock_repo), audit);

        assert!(service.summarize("nope00").is_err());
        let missed = rx.try_recv().unwrap();
        assert_eq!(missed.level, Level::Error);
        assert_eq!(missed.package, Package::Route);
        assert!(missed.message.contains("nope00"));

        service.summarize("seen01").unwrap();
        let found = rx.try_recv().unwrap();
        assert_eq!(found.level, Level::Info);
        assert!(found.message.contains("seen01"));
    }

    #[test]
    fn test_count_entries() {
        let mut mock_repo = MockEntryRepository::new();
        mock_repo.expect_len().times(1).returning(|| 42);

        let service = service(mock_repo);

        assert_eq!(service.count_entries(), 42);
    }
}
