//! Click recording for served redirects.

use std::sync::Arc;

use crate::domain::entities::ClickRecord;
use crate::domain::repositories::EntryRepository;
use crate::error::AppError;

/// Appends click records to an entry's history.
///
/// The append goes straight into the store and returns; nothing here waits on
/// the network.
pub struct ClickRecorder<R: EntryRepository> {
    repository: Arc<R>,
}

impl<R: EntryRepository> ClickRecorder<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Records a redirect on `code` stamped with the current time.
    ///
    /// A missing referrer is stored as `"unknown"`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the entry disappeared before the append.
    pub fn record(
        &self,
        code: &str,
        referrer: Option<&str>,
        origin: &str,
    ) -> Result<ClickRecord, AppError> {
        let click = ClickRecord::now(referrer, origin);
        self.repository.append_click(code, click.clone())?;
        Ok(click)
    }
}
