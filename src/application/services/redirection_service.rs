//! Redirect resolution service.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::{info, warn};

use crate::application::services::click_recorder::ClickRecorder;
use crate::domain::audit_event::{Level, Package};
use crate::domain::audit_logger::AuditLogger;
use crate::domain::repositories::EntryRepository;
use crate::error::AppError;

/// Resolves codes to their targets and records each successful redirect.
pub struct RedirectionService<R: EntryRepository> {
    repository: Arc<R>,
    recorder: ClickRecorder<R>,
    audit: AuditLogger,
}

impl<R: EntryRepository> RedirectionService<R> {
    /// Creates a new redirection service.
    pub fn new(repository: Arc<R>, audit: AuditLogger) -> Self {
        Self {
            recorder: ClickRecorder::new(repository.clone()),
            repository,
            audit,
        }
    }

    /// Resolves `code` to its target URL and records the click.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code was never created.
    /// Returns [`AppError::Expired`] if the entry is past its expiry.
    pub fn resolve(
        &self,
        code: &str,
        referrer: Option<&str>,
        origin: &str,
    ) -> Result<String, AppError> {
        let Some(entry) = self.repository.get(code) else {
            metrics::counter!("redirect_failures_total", "reason" => "not_found").increment(1);
            warn!("Redirect for unknown code {}", code);
            self.audit.backend(
                Level::Error,
                Package::Route,
                format!("Shortcode {code} not found"),
            );
            return Err(AppError::not_found(
                "Shortcode not found",
                json!({ "code": code }),
            ));
        };

        if entry.is_expired_at(Utc::now()) {
            metrics::counter!("redirect_failures_total", "reason" => "expired").increment(1);
            warn!(
                "Redirect for expired code {} (expired {})",
                code,
                entry.expires_at.to_rfc3339()
            );
            self.audit.backend(
                Level::Warn,
                Package::Route,
                format!("Shortcode {code} has expired"),
            );
            return Err(AppError::expired(
                "Shortcode has expired",
                json!({ "code": code, "expired_at": entry.expires_at }),
            ));
        }

        let click = self.recorder.record(code, referrer, origin)?;

        metrics::counter!("redirects_total").increment(1);
        info!("Redirecting {} to {}", code, entry.target_url);
        self.audit.backend(
            Level::Info,
            Package::Route,
            format!(
                "Redirecting {} to {} (referrer: {})",
                code, entry.target_url, click.referrer
            ),
        );

        Ok(entry.target_url)
    }
}
