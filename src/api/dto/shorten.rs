//! DTOs for the short URL creation endpoint.

use chrono::{DateTime, SecondsFormat, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, NoneAsEmptyString, PickFirst, serde_as};
use std::sync::LazyLock;
use validator::Validate;

use crate::application::services::CreateEntry;

/// Compiled regex for requested shortcode validation.
static SHORTCODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("shortcode regex is valid"));

/// Request to shorten a single URL.
///
/// `validity` is in minutes and may be sent as a number or a numeric string.
/// An empty `shortcode` is treated as absent.
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
pub struct CreateShortUrlRequest {
    /// The URL to shorten (must be absolute).
    #[validate(url(message = "Invalid URL format"))]
    pub url: String,

    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub validity: Option<i64>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    #[validate(length(min = 1, max = 64))]
    #[validate(regex(path = "*SHORTCODE_REGEX", message = "Shortcode may only contain letters, digits, '_' and '-'"))]
    pub shortcode: Option<String>,
}

impl From<CreateShortUrlRequest> for CreateEntry {
    fn from(request: CreateShortUrlRequest) -> Self {
        Self {
            target_url: request.url,
            validity_minutes: request.validity,
            requested_code: request.shortcode,
        }
    }
}

/// Response for a created short URL.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShortUrlResponse {
    pub short_link: String,
    pub expiry: String,
}

impl CreateShortUrlResponse {
    pub fn new(short_link: String, expires_at: DateTime<Utc>) -> Self {
        Self {
            short_link,
            expiry: expires_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}
