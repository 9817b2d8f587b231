//! Model catalog supplied by configuration.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// One selectable model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ModelOption {
    /// Routed model id, e.g. `openai/gpt-4o`
    id: String,
    /// Human-readable name
    label: String,
    /// Provider family (`openai`, `anthropic`, `google`, `gateway`)
    provider: String,
    /// Usable without a paid plan
    #[serde(default)]
    free: bool,
}

impl ModelOption {
    /// Create a catalog entry.
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        provider: impl Into<String>,
        free: bool,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            provider: provider.into(),
            free,
        }
    }
}

/// The canonical list of models offered to the user.
///
/// # Examples
///
/// ```
/// use reelwriter_core::{ModelCatalog, ModelOption};
///
/// let catalog = ModelCatalog::new(vec![
///     ModelOption::new("openai/gpt-4o", "GPT-4o", "openai", false),
///     ModelOption::new("mistralai/mistral-7b-instruct:free", "Mistral 7B", "gateway", true),
/// ]);
/// assert_eq!(catalog.for_provider("gateway").count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ModelCatalog {
    #[serde(default)]
    models: Vec<ModelOption>,
}

impl ModelCatalog {
    /// Wrap a list of entries.
    pub fn new(models: Vec<ModelOption>) -> Self {
        Self { models }
    }

    /// Entries belonging to a provider family.
    pub fn for_provider<'a>(&'a self, provider: &'a str) -> impl Iterator<Item = &'a ModelOption> {
        self.models
            .iter()
            .filter(move |model| model.provider.eq_ignore_ascii_case(provider))
    }

    /// Look up an entry by id.
    pub fn find(&self, id: &str) -> Option<&ModelOption> {
        self.models.iter().find(|model| model.id == id)
    }
}
