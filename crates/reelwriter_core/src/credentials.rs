//! API key and model selection.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// The API key and model a pipeline run generates with.
///
/// `Debug` never prints the key.
///
/// # Examples
///
/// ```
/// use reelwriter_core::Credentials;
///
/// let creds = Credentials::new("sk-secret", "openai/gpt-4o");
/// assert_eq!(creds.model(), "openai/gpt-4o");
/// assert!(!format!("{:?}", creds).contains("sk-secret"));
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Credentials {
    api_key: String,
    model: String,
}

impl Credentials {
    /// Pair a key with a model id.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .finish()
    }
}
