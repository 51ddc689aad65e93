//! DTOs for short URL statistics.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::application::services::EntrySummary;
use crate::domain::entities::ClickRecord;

fn iso(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Click totals, entry metadata and the full click history for one code.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_clicks: usize,
    pub original_url_info: OriginalUrlInfo,
    pub detailed_click_data: Vec<ClickInfo>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OriginalUrlInfo {
    pub original_url: String,
    pub creation_date: String,
    pub expiry_date: String,
}

/// A single recorded redirect.
#[derive(Debug, Serialize)]
pub struct ClickInfo {
    pub timestamp: String,
    pub referrer: String,
    pub origin: String,
}

impl From<ClickRecord> for ClickInfo {
    fn from(click: ClickRecord) -> Self {
        Self {
            timestamp: iso(click.timestamp),
            referrer: click.referrer,
            origin: click.origin,
        }
    }
}

impl From<EntrySummary> for StatsResponse {
    fn from(summary: EntrySummary) -> Self {
        Self {
            total_clicks: summary.total_clicks,
            original_url_info: OriginalUrlInfo {
                original_url: summary.target_url,
                creation_date: iso(summary.created_at),
                expiry_date: iso(summary.expires_at),
            },
            detailed_click_data: summary.clicks.into_iter().map(ClickInfo::from).collect(),
        }
    }
}
