//! Click record representing a single redirect event.

use chrono::{DateTime, Utc};

/// Referrer value stored when the request carried none.
pub const UNKNOWN_REFERRER: &str = "unknown";

/// A redirect observed on a short entry.
///
/// Captures when the redirect happened, where the visitor came from, and the
/// network address the service saw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickRecord {
    pub timestamp: DateTime<Utc>,
    pub referrer: String,
    pub origin: String,
}

impl ClickRecord {
    /// Creates a click record.
    ///
    /// A missing or blank referrer is replaced with [`UNKNOWN_REFERRER`].
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let click = ClickRecord::new(Utc::now(), Some("https://google.com"), "10.0.0.1");
    /// assert_eq!(click.referrer, "https://google.com");
    /// ```
    pub fn new(timestamp: DateTime<Utc>, referrer: Option<&str>, origin: impl Into<String>) -> Self {
        let referrer = referrer
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or(UNKNOWN_REFERRER)
            .to_string();

        Self {
            timestamp,
            referrer,
            origin: origin.into(),
        }
    }

    /// Creates a click record stamped with the current time.
    pub fn now(referrer: Option<&str>, origin: impl Into<String>) -> Self {
        Self::new(Utc::now(), referrer, origin)
    }
}
