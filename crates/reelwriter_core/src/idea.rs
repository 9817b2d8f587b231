//! Content ideas that seed a pipeline run.

use serde::{Deserialize, Serialize};

/// A candidate topic, from AI research or an external feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentIdea {
    /// Stable identifier within the list it came from
    pub id: String,
    /// Headline
    pub title: String,
    /// Short description
    pub snippet: String,
    /// Where the idea came from
    pub source: String,
    /// Link back to the source, empty when there is none
    #[serde(default)]
    pub url: String,
}
