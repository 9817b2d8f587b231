//! Typed access to JSON records.

use reelwriter_error::{PersistenceError, PersistenceErrorKind, ReelwriterResult};
use reelwriter_interface::PersistenceBackend;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

pub(crate) fn encode<T: Serialize>(record: &T) -> ReelwriterResult<Value> {
    serde_json::to_value(record).map_err(|e| {
        PersistenceError::new(PersistenceErrorKind::Serialization(e.to_string())).into()
    })
}

pub(crate) fn decode<T: DeserializeOwned>(key: &str, value: Value) -> ReelwriterResult<T> {
    serde_json::from_value(value).map_err(|e| {
        PersistenceError::new(PersistenceErrorKind::Serialization(format!("{key}: {e}"))).into()
    })
}

/// Every record that decodes as `T`, paired with its key.
///
/// Undecodable records are logged and skipped.
pub(crate) async fn load_all<T: DeserializeOwned + Send>(
    backend: &dyn PersistenceBackend,
) -> ReelwriterResult<Vec<(String, T)>> {
    let mut records = Vec::new();
    backend
        .iterate_all(&mut |key: &str, value: &Value| {
            match serde_json::from_value::<T>(value.clone()) {
                Ok(record) => records.push((key.to_string(), record)),
                Err(e) => warn!(key = %key, error = %e, "Skipping undecodable record"),
            }
        })
        .await?;
    Ok(records)
}
