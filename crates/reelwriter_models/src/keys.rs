//! API key validation results and model listings.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome of validating an API key against the gateway.
///
/// A rejected key is a normal outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValidation {
    /// Whether the gateway accepted the key
    pub ok: bool,
    /// Human-readable explanation
    pub message: String,
    /// Model ids visible to the key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub models: Option<Vec<String>>,
}

impl KeyValidation {
    /// Accepted key.
    pub fn accepted(models: Vec<String>) -> Self {
        Self {
            ok: true,
            message: "API key is valid.".to_string(),
            models: Some(models),
        }
    }

    /// Rejected key or unreachable gateway.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            models: None,
        }
    }
}

/// Extract model ids from a listing.
///
/// Accepts `{"data": [...]}`, `{"models": [...]}` or a bare array, where
/// each element is either an id string or an object with an `id` field.
///
/// # Examples
///
/// ```
/// use reelwriter_models::model_ids;
/// use serde_json::json;
///
/// let listing = json!({"data": [{"id": "gpt-4o"}, {"id": "gpt-4o-mini"}]});
/// assert_eq!(model_ids(&listing), vec!["gpt-4o", "gpt-4o-mini"]);
/// assert_eq!(model_ids(&json!(["a", {"id": "b"}, 3])), vec!["a", "b"]);
/// ```
pub fn model_ids(listing: &Value) -> Vec<String> {
    let entries = match listing {
        Value::Array(entries) => Some(entries),
        Value::Object(map) => map
            .get("data")
            .or_else(|| map.get("models"))
            .and_then(Value::as_array),
        _ => None,
    };

    entries
        .into_iter()
        .flatten()
        .filter_map(|entry| match entry {
            Value::String(id) => Some(id.clone()),
            Value::Object(fields) => fields.get("id").and_then(Value::as_str).map(str::to_string),
            _ => None,
        })
        .collect()
}
