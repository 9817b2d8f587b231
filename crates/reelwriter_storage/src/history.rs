//! History store.

use crate::records::{decode, encode, load_all};
use chrono::{DateTime, TimeDelta, Utc};
use reelwriter_core::{HistoryEntry, NewHistoryEntry};
use reelwriter_error::{ReelwriterResult, ValidationError, ValidationErrorKind};
use reelwriter_interface::PersistenceBackend;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Default purge window for history entries.
pub const DEFAULT_HISTORY_RETENTION_DAYS: i64 = 7;

/// Append-only log of finished artifacts.
#[derive(Clone)]
pub struct HistoryStore {
    backend: Arc<dyn PersistenceBackend>,
}

impl HistoryStore {
    /// Wrap a backend.
    pub fn new(backend: Arc<dyn PersistenceBackend>) -> Self {
        Self { backend }
    }

    /// Stamp `entry` with a fresh id and the current time, then store it.
    #[instrument(skip(self, entry), fields(kind = %entry.kind))]
    pub async fn append(&self, entry: NewHistoryEntry) -> ReelwriterResult<HistoryEntry> {
        let entry = entry.into_entry(uuid::Uuid::new_v4().to_string(), Utc::now());
        self.backend.set(&entry.id, encode(&entry)?).await?;
        debug!(id = %entry.id, "Appended history entry");
        Ok(entry)
    }

    /// Load one entry.
    pub async fn get(&self, id: &str) -> ReelwriterResult<Option<HistoryEntry>> {
        match self.backend.get(id).await? {
            Some(value) => Ok(Some(decode(id, value)?)),
            None => Ok(None),
        }
    }

    /// All entries, newest first.
    pub async fn list(&self) -> ReelwriterResult<Vec<HistoryEntry>> {
        let mut entries: Vec<HistoryEntry> = load_all(self.backend.as_ref())
            .await?
            .into_iter()
            .map(|(_, entry)| entry)
            .collect();
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(entries)
    }

    /// Remove one entry.
    pub async fn delete(&self, id: &str) -> ReelwriterResult<()> {
        self.backend.delete(id).await
    }

    /// Remove entries older than `days`, measured from now.
    ///
    /// # Errors
    ///
    /// Rejects negative or out-of-range windows.
    pub async fn purge_older_than(&self, days: i64) -> ReelwriterResult<usize> {
        let window = TimeDelta::try_days(days)
            .filter(|window| *window >= TimeDelta::zero())
            .ok_or_else(|| {
                ValidationError::new(ValidationErrorKind::InvalidField {
                    field: "days".to_string(),
                    reason: format!("{days} is not a valid retention window"),
                })
            })?;
        self.purge_older_than_at(window, Utc::now()).await
    }

    /// Remove entries whose `created_at` is before `now - window`.
    #[instrument(skip(self))]
    pub async fn purge_older_than_at(
        &self,
        window: TimeDelta,
        now: DateTime<Utc>,
    ) -> ReelwriterResult<usize> {
        let cutoff = now - window;
        let stale: Vec<String> = load_all::<HistoryEntry>(self.backend.as_ref())
            .await?
            .into_iter()
            .filter(|(_, entry)| entry.created_at < cutoff)
            .map(|(key, _)| key)
            .collect();
        for key in &stale {
            self.backend.delete(key).await?;
        }
        if !stale.is_empty() {
            info!(count = stale.len(), "Purged old history entries");
        }
        Ok(stale.len())
    }
}
