//! In-memory implementation of the entry repository.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde_json::json;

use crate::domain::entities::{ClickRecord, ShortEntry};
use crate::domain::repositories::EntryRepository;
use crate::error::AppError;

/// Entry store backed by a sharded concurrent map.
///
/// Each shard has its own lock, so operations on one code only contend with
/// codes that hash to the same shard. Insert-if-absent goes through the entry
/// API and click appends through `get_mut`, both under the shard's write lock.
#[derive(Debug, Default)]
pub struct MemoryEntryRepository {
    entries: DashMap<String, ShortEntry>,
}

impl MemoryEntryRepository {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }
}

impl EntryRepository for MemoryEntryRepository {
    fn has(&self, code: &str) -> bool {
        self.entries.contains_key(code)
    }

    fn get(&self, code: &str) -> Option<ShortEntry> {
        self.entries.get(code).map(|entry| entry.value().clone())
    }

    fn put(&self, code: &str, entry: ShortEntry) -> Result<(), AppError> {
        match self.entries.entry(code.to_string()) {
            Entry::Occupied(_) => Err(AppError::conflict(
                "Short code already exists",
                json!({ "code": code }),
            )),
            Entry::Vacant(slot) => {
                slot.insert(entry);
                Ok(())
            }
        }
    }

    fn append_click(&self, code: &str, click: ClickRecord) -> Result<(), AppError> {
        let mut entry = self.entries.get_mut(code).ok_or_else(|| {
            AppError::not_found("Shortcode not found", json!({ "code": code }))
        })?;
        entry.clicks.push(click);
        Ok(())
    }

    fn remove_expired_before(&self, cutoff: DateTime<Utc>) -> usize {
        let mut removed = 0;
        self.entries.retain(|_, entry| {
            let keep = entry.expires_at >= cutoff;
            if !keep {
                removed += 1;
            }
            keep
        });
        removed
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
