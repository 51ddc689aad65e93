//! Business logic services for the application layer.

pub mod click_recorder;
pub mod redirection_service;
pub mod shortening_service;
pub mod stats_service;

pub use click_recorder::ClickRecorder;
pub use redirection_service::RedirectionService;
pub use shortening_service::{CreateEntry, CreatedEntry, ShorteningPolicy, ShorteningService};
pub use stats_service::{EntrySummary, StatsService};
