//! Request and response bodies for the generation operations.
//!
//! Field names serialize in camelCase. Missing fields deserialize to empty
//! strings so that `validate()` can name exactly which one is absent.

use reelwriter_core::{ContentIdea, Credentials};
use reelwriter_error::{ReelwriterResult, ValidationError};
use serde::{Deserialize, Serialize};

#[track_caller]
fn require(field: &str, value: &str) -> ReelwriterResult<()> {
    if value.trim().is_empty() {
        Err(ValidationError::missing(field))?
    }
    Ok(())
}

#[track_caller]
fn require_credentials(api_key: &str, model: &str) -> ReelwriterResult<()> {
    require("apiKey", api_key)?;
    require("model", model)
}

/// The idea fields a hook or script prompt needs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdeaInput {
    /// Headline
    pub title: String,
    /// Short description, may be empty
    pub snippet: String,
}

impl IdeaInput {
    /// Title and snippet.
    pub fn new(title: impl Into<String>, snippet: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            snippet: snippet.into(),
        }
    }
}

impl From<&ContentIdea> for IdeaInput {
    fn from(idea: &ContentIdea) -> Self {
        Self::new(idea.title.clone(), idea.snippet.clone())
    }
}

/// Ask the model for an idea list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerateIdeasRequest {
    /// Research prompt
    pub prompt: String,
    /// Provider key
    pub api_key: String,
    /// Model id
    pub model: String,
}

impl GenerateIdeasRequest {
    /// Build from a prompt and credentials.
    pub fn new(prompt: impl Into<String>, credentials: &Credentials) -> Self {
        Self {
            prompt: prompt.into(),
            api_key: credentials.api_key().clone(),
            model: credentials.model().clone(),
        }
    }

    /// Reject blank required fields.
    pub fn validate(&self) -> ReelwriterResult<()> {
        require("prompt", &self.prompt)?;
        require_credentials(&self.api_key, &self.model)
    }
}

/// Ask for hook lines for an idea.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerateHooksRequest {
    /// The chosen idea
    pub idea: IdeaInput,
    /// Provider key
    pub api_key: String,
    /// Model id
    pub model: String,
}

impl GenerateHooksRequest {
    /// Build from an idea and credentials.
    pub fn new(idea: IdeaInput, credentials: &Credentials) -> Self {
        Self {
            idea,
            api_key: credentials.api_key().clone(),
            model: credentials.model().clone(),
        }
    }

    /// Reject blank required fields.
    pub fn validate(&self) -> ReelwriterResult<()> {
        require("idea.title", &self.idea.title)?;
        require_credentials(&self.api_key, &self.model)
    }
}

/// Ask for a teleprompter script.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerateScriptRequest {
    /// The chosen idea
    pub idea: IdeaInput,
    /// The confirmed hook
    pub hook: String,
    /// Provider key
    pub api_key: String,
    /// Model id
    pub model: String,
}

impl GenerateScriptRequest {
    /// Build from an idea, a hook and credentials.
    pub fn new(idea: IdeaInput, hook: impl Into<String>, credentials: &Credentials) -> Self {
        Self {
            idea,
            hook: hook.into(),
            api_key: credentials.api_key().clone(),
            model: credentials.model().clone(),
        }
    }

    /// Reject blank required fields.
    pub fn validate(&self) -> ReelwriterResult<()> {
        require("idea.title", &self.idea.title)?;
        require("hook", &self.hook)?;
        require_credentials(&self.api_key, &self.model)
    }
}

/// Ask for captions derived from a script.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerateCaptionsRequest {
    /// Script narration
    pub script: String,
    /// Provider key
    pub api_key: String,
    /// Model id
    pub model: String,
}

impl GenerateCaptionsRequest {
    /// Build from script text and credentials.
    pub fn new(script: impl Into<String>, credentials: &Credentials) -> Self {
        Self {
            script: script.into(),
            api_key: credentials.api_key().clone(),
            model: credentials.model().clone(),
        }
    }

    /// Reject blank required fields.
    pub fn validate(&self) -> ReelwriterResult<()> {
        require("script", &self.script)?;
        require_credentials(&self.api_key, &self.model)
    }
}

/// Ask the model to sharpen a research prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImprovePromptRequest {
    /// Prompt to improve
    pub prompt: String,
    /// Provider key
    pub api_key: String,
    /// Model id
    pub model: String,
}

impl ImprovePromptRequest {
    /// Build from a prompt and credentials.
    pub fn new(prompt: impl Into<String>, credentials: &Credentials) -> Self {
        Self {
            prompt: prompt.into(),
            api_key: credentials.api_key().clone(),
            model: credentials.model().clone(),
        }
    }

    /// Reject blank required fields.
    pub fn validate(&self) -> ReelwriterResult<()> {
        require("prompt", &self.prompt)?;
        require_credentials(&self.api_key, &self.model)
    }
}

/// Check a key against the gateway.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidateKeyRequest {
    /// Provider key
    pub api_key: String,
}

impl ValidateKeyRequest {
    /// Reject a blank key.
    pub fn validate(&self) -> ReelwriterResult<()> {
        require("apiKey", &self.api_key)
    }
}

/// Generated hook lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HooksResponse {
    /// One hook per entry, in generated order
    pub hooks: Vec<String>,
}

/// Raw script text, before cleaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptResponse {
    /// Script as the model returned it
    pub script: String,
}

/// An improved research prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImprovePromptResponse {
    /// Rewritten prompt, trimmed
    pub improved_prompt: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelwriter_error::{ReelwriterErrorKind, ValidationErrorKind};

    fn missing_field(result: ReelwriterResult<()>) -> String {
        let err = result.unwrap_err();
        match err.kind() {
            ReelwriterErrorKind::Validation(v) => match v.kind() {
                ValidationErrorKind::MissingField(field) => field.clone(),
                other => panic!("unexpected validation kind: {other:?}"),
            },
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn absent_json_fields_fail_validation_by_name() {
        let request: GenerateHooksRequest =
            serde_json::from_str(r#"{"apiKey":"k","model":"m"}"#).unwrap();
        assert_eq!(missing_field(request.validate()), "idea.title");

        let request: GenerateScriptRequest = serde_json::from_str(
            r#"{"idea":{"title":"Rust"},"apiKey":"k","model":"m"}"#,
        )
        .unwrap();
        assert_eq!(missing_field(request.validate()), "hook");
    }

    #[test]
    fn blank_credentials_are_rejected() {
        let request = GenerateIdeasRequest {
            prompt: "side hustles".into(),
            api_key: "   ".into(),
            model: "m".into(),
        };
        assert_eq!(missing_field(request.validate()), "apiKey");

        let request = GenerateCaptionsRequest::new("Hi.", &Credentials::new("k", ""));
        assert_eq!(missing_field(request.validate()), "model");
    }

    #[test]
    fn improved_prompt_serializes_camel_case() {
        let body = ImprovePromptResponse {
            improved_prompt: "Better".into(),
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"improvedPrompt": "Better"})
        );
    }
}
