//! Repository trait for short entry storage.

use chrono::{DateTime, Utc};

use crate::domain::entities::{ClickRecord, ShortEntry};
use crate::error::AppError;

/// Storage contract for short entries.
///
/// The store is the only shared mutable state in the service. Implementations
/// must make insert-if-absent and click appends atomic per code while leaving
/// unrelated codes free to proceed in parallel. Operations never block on I/O.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::MemoryEntryRepository`] - sharded in-memory map
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
pub trait EntryRepository: Send + Sync {
    /// Returns true if an entry exists for `code`, expired or not.
    fn has(&self, code: &str) -> bool;

    /// Returns a snapshot of the entry for `code`.
    fn get(&self, code: &str) -> Option<ShortEntry>;

    /// Inserts `entry` under `code` if the code is free.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the code is already present. Two
    /// concurrent calls for the same code never both succeed.
    fn put(&self, code: &str, entry: ShortEntry) -> Result<(), AppError>;

    /// Creation-path insert used after a [`Self::has`] check.
    ///
    /// Same atomic semantics as [`Self::put`]: a race lost between the check
    /// and the insert is reported as [`AppError::Conflict`], never an overwrite.
    fn set(&self, code: &str, entry: ShortEntry) -> Result<(), AppError> {
        self.put(code, entry)
    }

    /// Appends a click to the entry's history.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no entry exists for `code`.
    fn append_click(&self, code: &str, click: ClickRecord) -> Result<(), AppError>;

    /// Removes every entry whose `expires_at` is strictly before `cutoff`.
    ///
    /// Returns the number of removed entries.
    fn remove_expired_before(&self, cutoff: DateTime<Utc>) -> usize;

    /// Number of stored entries, live and expired.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
