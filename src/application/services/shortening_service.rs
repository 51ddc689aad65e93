//! Short entry creation service.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::audit_event::{Level, Package};
use crate::domain::audit_logger::AuditLogger;
use crate::domain::entities::NewEntry;
use crate::domain::repositories::EntryRepository;
use crate::error::AppError;
use crate::utils::code_generator::{CodeGenerator, is_reserved};

/// Validity applied when the caller gives none (or a non-positive one).
pub const DEFAULT_VALIDITY_MINUTES: i64 = 30;

/// Upper bound on the validity window: one year.
pub const MAX_VALIDITY_MINUTES: i64 = 525_600;

/// Ceiling accepted for any configured window: one hundred years.
pub const VALIDITY_CEILING_MINUTES: i64 = 100 * MAX_VALIDITY_MINUTES;

/// Generated-code attempts before giving up with a capacity error.
pub const DEFAULT_MAX_CODE_ATTEMPTS: usize = 10;

/// Tunables for entry creation.
#[derive(Debug, Clone, Copy)]
pub struct ShorteningPolicy {
    pub default_validity_minutes: i64,
    pub max_validity_minutes: i64,
    pub max_code_attempts: usize,
}

impl Default for ShorteningPolicy {
    fn default() -> Self {
        Self {
            default_validity_minutes: DEFAULT_VALIDITY_MINUTES,
            max_validity_minutes: MAX_VALIDITY_MINUTES,
            max_code_attempts: DEFAULT_MAX_CODE_ATTEMPTS,
        }
    }
}

/// Input for [`ShorteningService::create`].
///
/// `target_url` must already be validated as an absolute URL by the caller.
#[derive(Debug, Clone)]
pub struct CreateEntry {
    pub target_url: String,
    pub validity_minutes: Option<i64>,
    pub requested_code: Option<String>,
}

impl CreateEntry {
    pub fn new(target_url: impl Into<String>) -> Self {
        Self {
            target_url: target_url.into(),
            validity_minutes: None,
            requested_code: None,
        }
    }

    pub fn with_validity(mut self, minutes: i64) -> Self {
        self.validity_minutes = Some(minutes);
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.requested_code = Some(code.into());
        self
    }
}

/// Outcome of a successful creation.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedEntry {
    pub code: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Service for creating short entries.
///
/// Honors a requested code when it is free. A taken requested code is
/// silently replaced by a generated one rather than rejected.
pub struct ShorteningService<R: EntryRepository, G: CodeGenerator> {
    repository: Arc<R>,
    generator: G,
    policy: ShorteningPolicy,
    audit: AuditLogger,
}

impl<R: EntryRepository, G: CodeGenerator> ShorteningService<R, G> {
    /// Creates a new shortening service.
    pub fn new(repository: Arc<R>, generator: G, policy: ShorteningPolicy, audit: AuditLogger) -> Self {
        Self {
            repository,
            generator,
            policy,
            audit,
        }
    }

    /// Creates a short entry.
    ///
    /// # Code Resolution
    ///
    /// - A non-empty, non-reserved, free requested code is used as is
    /// - Otherwise a code is generated; collisions trigger regeneration up to
    ///   `max_code_attempts` times
    ///
    /// # Validity
    ///
    /// Absent or non-positive validity means the default window. Values above
    /// the maximum are capped.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the expiry falls outside the
    /// representable date range.
    /// Returns [`AppError::Capacity`] if every generated code collided.
    /// Returns [`AppError::Internal`] if the code generator fails.
    pub fn create(&self, request: CreateEntry) -> Result<CreatedEntry, AppError> {
        let validity = self.validity_for(request.validity_minutes)?;
        let draft = NewEntry::new(request.target_url, validity)?;

        let requested = request.requested_code.filter(|code| !code.is_empty());

        let code = match requested {
            Some(code) if self.try_requested(&code, &draft)? => code,
            Some(code) => {
                let replacement = self.insert_generated(&draft)?;
                warn!(
                    "Requested code {} unavailable, issued {} instead",
                    code, replacement
                );
                self.audit.backend(
                    Level::Warn,
                    Package::Service,
                    format!("Requested code {code} already exists, issued {replacement} instead"),
                );
                replacement
            }
            None => self.insert_generated(&draft)?,
        };

        metrics::counter!("links_created_total").increment(1);
        info!(
            "Short entry {} created for {} (expires {})",
            code,
            draft.target_url,
            draft.expires_at.to_rfc3339()
        );
        self.audit.backend(
            Level::Info,
            Package::Service,
            format!("Short URL created for {} with code {}", draft.target_url, code),
        );

        Ok(CreatedEntry {
            code,
            created_at: draft.created_at,
            expires_at: draft.expires_at,
        })
    }

    /// Resolves the validity window for an optional minute count.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the window does not fit a [`Duration`].
    pub fn validity_for(&self, minutes: Option<i64>) -> Result<Duration, AppError> {
        let minutes = match minutes {
            Some(m) if m > 0 => m.min(self.policy.max_validity_minutes),
            _ => self.policy.default_validity_minutes,
        };
        Duration::try_minutes(minutes).ok_or_else(|| {
            AppError::bad_request(
                "Validity window out of range",
                json!({ "validity_minutes": minutes }),
            )
        })
    }

    /// Inserts the draft under the requested code if it is still free.
    ///
    /// Returns `Ok(false)` if the code is reserved, taken, or lost to a
    /// concurrent creation.
    fn try_requested(&self, code: &str, draft: &NewEntry) -> Result<bool, AppError> {
        if is_reserved(code) || self.repository.has(code) {
            debug!("Requested code {} is not available", code);
            return Ok(false);
        }

        match self
            .repository
            .set(code, draft.clone().into_entry(code.to_string()))
        {
            Ok(()) => Ok(true),
            Err(AppError::Conflict { .. }) => {
                debug!("Requested code {} taken by a concurrent request", code);
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Generates codes until one inserts cleanly.
    fn insert_generated(&self, draft: &NewEntry) -> Result<String, AppError> {
        for attempt in 1..=self.policy.max_code_attempts {
            let code = self.generator.generate()?;

            if is_reserved(&code) {
                continue;
            }

            match self
                .repository
                .put(&code, draft.clone().into_entry(code.clone()))
            {
                Ok(()) => {
                    debug!("Generated code {} on attempt {}", code, attempt);
                    self.audit.backend(
                        Level::Debug,
                        Package::Service,
                        format!("Generated short code {code}"),
                    );
                    return Ok(code);
                }
                Err(AppError::Conflict { .. }) => {
                    warn!("Generated code {} collided (attempt {})", code, attempt);
                    self.audit.backend(
                        Level::Warn,
                        Package::Service,
                        format!("Generated code {code} collided, retrying"),
                    );
                }
                Err(e) => return Err(e),
            }
        }

        self.audit.backend(
            Level::Error,
            Package::Service,
            "Failed to generate a unique short code",
        );

        Err(AppError::capacity(
            "Failed to generate unique code",
            json!({ "attempts": self.policy.max_code_attempts }),
        ))
    }
}
