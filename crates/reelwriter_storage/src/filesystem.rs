//! JSON-file backend.
//!
//! One file per record: `{base_path}/{encoded key}.json`, holding
//! `{"key": ..., "value": ...}`. ASCII letters, digits, `-` and `_` are
//! kept; every other byte becomes `~xx`, so distinct keys never share a file.
//! Writes go to a temp file and are renamed into place.

use async_trait::async_trait;
use reelwriter_error::{PersistenceError, PersistenceErrorKind, ReelwriterResult};
use reelwriter_interface::PersistenceBackend;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Serialize, Deserialize)]
struct StoredRecord {
    key: String,
    value: Value,
}

/// Stores records as JSON files in a directory.
#[derive(Debug, Clone)]
pub struct FileSystemBackend {
    base_path: PathBuf,
}

impl FileSystemBackend {
    /// Open a backend rooted at `base_path`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created.
    #[tracing::instrument(skip(base_path))]
    pub fn new(base_path: impl Into<PathBuf>) -> ReelwriterResult<Self> {
        let base_path = base_path.into();
        std::fs::create_dir_all(&base_path).map_err(|e| {
            PersistenceError::new(PersistenceErrorKind::DirectoryCreation(format!(
                "{}: {}",
                base_path.display(),
                e
            )))
        })?;
        tracing::info!(path = %base_path.display(), "Opened filesystem store");
        Ok(Self { base_path })
    }

    /// Directory holding the records.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", encode_key(key)))
    }

    async fn read_record(path: &Path) -> ReelwriterResult<Option<StoredRecord>> {
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(PersistenceError::new(PersistenceErrorKind::Read(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
                .into());
            }
        };
        let record = serde_json::from_slice(&bytes).map_err(|e| {
            PersistenceError::new(PersistenceErrorKind::Serialization(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;
        Ok(Some(record))
    }
}

#[async_trait]
impl PersistenceBackend for FileSystemBackend {
    async fn get(&self, key: &str) -> ReelwriterResult<Option<Value>> {
        let record = Self::read_record(&self.path_for(key)).await?;
        Ok(record
            .filter(|record| record.key == key)
            .map(|record| record.value))
    }

    #[tracing::instrument(skip(self, value))]
    async fn set(&self, key: &str, value: Value) -> ReelwriterResult<()> {
        let path = self.path_for(key);
        let record = StoredRecord {
            key: key.to_string(),
            value,
        };
        let bytes = serde_json::to_vec_pretty(&record).map_err(|e| {
            PersistenceError::new(PersistenceErrorKind::Serialization(e.to_string()))
        })?;

        let temp = path.with_extension(format!("json.{}.tmp", uuid::Uuid::new_v4()));
        let write_err = |e: std::io::Error| {
            PersistenceError::new(PersistenceErrorKind::Write(format!(
                "{}: {}",
                path.display(),
                e
            )))
        };
        tokio::fs::write(&temp, &bytes).await.map_err(write_err)?;
        if let Err(e) = tokio::fs::rename(&temp, &path).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(write_err(e).into());
        }
        debug!(path = %path.display(), "Wrote record");
        Ok(())
    }

    async fn delete(&self, key: &str) -> ReelwriterResult<()> {
        let path = self.path_for(key);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PersistenceError::new(PersistenceErrorKind::Delete(format!(
                "{}: {}",
                path.display(),
                e
            )))
            .into()),
        }
    }

    async fn iterate_all(
        &self,
        visit: &mut (dyn for<'k, 'v> FnMut(&'k str, &'v Value) + Send),
    ) -> ReelwriterResult<()> {
        let mut entries = tokio::fs::read_dir(&self.base_path).await.map_err(|e| {
            PersistenceError::new(PersistenceErrorKind::Read(format!(
                "{}: {}",
                self.base_path.display(),
                e
            )))
        })?;

        let mut paths = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(|e| {
            PersistenceError::new(PersistenceErrorKind::Read(format!(
                "{}: {}",
                self.base_path.display(),
                e
            )))
        })? {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }

        for path in paths {
            // Records may vanish or be half-written while we iterate.
            match Self::read_record(&path).await {
                Ok(Some(record)) => visit(&record.key, &record.value),
                Ok(None) => {}
                Err(e) => warn!(path = %path.display(), error = %e, "Skipping unreadable record"),
            }
        }
        Ok(())
    }
}

fn encode_key(key: &str) -> String {
    let mut stem = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
            stem.push(char::from(byte));
        } else {
            stem.push_str(&format!("~{byte:02x}"));
        }
    }
    stem
}
