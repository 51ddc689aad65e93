//! Short entry entity: a code bound to a target URL for a limited time.

use chrono::{DateTime, Duration, Utc};
use serde_json::json;

use super::click::ClickRecord;
use crate::error::AppError;

/// A stored short link with its validity window and click history.
///
/// `target_url`, `created_at` and `expires_at` never change after creation.
/// `clicks` only grows, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortEntry {
    pub code: String,
    pub target_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub clicks: Vec<ClickRecord>,
}

impl ShortEntry {
    /// Creates an entry with an empty click history.
    pub fn new(
        code: String,
        target_url: String,
        created_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            code,
            target_url,
            created_at,
            expires_at,
            clicks: Vec::new(),
        }
    }

    /// Returns true if the entry can no longer be used for redirection at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    pub fn total_clicks(&self) -> usize {
        self.clicks.len()
    }
}

/// Input data for creating a new entry.
///
/// The code is not part of the draft: the shortening service decides it and
/// stamps the draft into a [`ShortEntry`] once a free code is found.
#[derive(Debug, Clone)]
pub struct NewEntry {
    pub target_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl NewEntry {
    /// Starts a draft valid for `validity` from now.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the expiry falls outside the
    /// representable date range.
    pub fn new(target_url: String, validity: Duration) -> Result<Self, AppError> {
        let created_at = Utc::now();
        let expires_at = created_at.checked_add_signed(validity).ok_or_else(|| {
            AppError::bad_request(
                "Validity window out of range",
                json!({ "validity_minutes": validity.num_minutes() }),
            )
        })?;

        Ok(Self {
            target_url,
            created_at,
            expires_at,
        })
    }

    /// Builds the stored entry for the chosen code.
    pub fn into_entry(self, code: String) -> ShortEntry {
        ShortEntry::new(code, self.target_url, self.created_at, self.expires_at)
    }
}
