//! In-memory backend.

use async_trait::async_trait;
use reelwriter_error::ReelwriterResult;
use reelwriter_interface::PersistenceBackend;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Records held in a shared map; clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBackend {
    records: Arc<RwLock<HashMap<String, Value>>>,
}

impl InMemoryBackend {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// True when nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl PersistenceBackend for InMemoryBackend {
    async fn get(&self, key: &str) -> ReelwriterResult<Option<Value>> {
        Ok(self.records.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> ReelwriterResult<()> {
        self.records.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> ReelwriterResult<()> {
        self.records.write().await.remove(key);
        Ok(())
    }

    async fn iterate_all(
        &self,
        visit: &mut (dyn for<'k, 'v> FnMut(&'k str, &'v Value) + Send),
    ) -> ReelwriterResult<()> {
        // Snapshot so visitors never run under the lock.
        let snapshot: Vec<(String, Value)> = self
            .records
            .read()
            .await
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        for (key, value) in &snapshot {
            visit(key, value);
        }
        Ok(())
    }
}
