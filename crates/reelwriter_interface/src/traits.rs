//! Trait definitions.

use async_trait::async_trait;
use reelwriter_core::{CompletionRequest, ContentIdea, Credentials};
use reelwriter_error::ReelwriterResult;
use serde_json::Value;

/// Uniform text completion across providers.
///
/// Implementations pick the provider from `credentials.model()`, translate
/// the request into the provider's native shape and return the text of the
/// top completion choice.
#[async_trait]
pub trait GenerationDriver: Send + Sync {
    /// Complete the conversation and return plain text.
    async fn complete(
        &self,
        credentials: &Credentials,
        request: &CompletionRequest,
    ) -> ReelwriterResult<String>;

    /// Whether the provider behind `model` can be asked for JSON output.
    fn supports_json_mode(&self, _model: &str) -> bool {
        false
    }
}

/// Asynchronous key-value store for JSON records.
///
/// Writes to the same key are last-write-wins. Iteration must tolerate
/// concurrent writes; it need not observe them.
#[async_trait]
pub trait PersistenceBackend: Send + Sync {
    /// Read a record.
    async fn get(&self, key: &str) -> ReelwriterResult<Option<Value>>;

    /// Write a record, replacing any previous value.
    async fn set(&self, key: &str, value: Value) -> ReelwriterResult<()>;

    /// Remove a record. Removing an absent key is not an error.
    async fn delete(&self, key: &str) -> ReelwriterResult<()>;

    /// Visit every record.
    async fn iterate_all(
        &self,
        visit: &mut (dyn for<'k, 'v> FnMut(&'k str, &'v Value) + Send),
    ) -> ReelwriterResult<()>;
}

/// External source of idea candidates (news sites, forums, RSS).
#[async_trait]
pub trait ContentFeed: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Fetch the current candidates.
    async fn fetch(&self) -> ReelwriterResult<Vec<ContentIdea>>;
}
