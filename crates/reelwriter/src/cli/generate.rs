//! One-shot generation command handlers.

use super::{Context, print_json};
use reelwriter::{
    DEFAULT_RESEARCH_PROMPT, GenerateCaptionsRequest, GenerateHooksRequest, GenerateIdeasRequest,
    GenerateScriptRequest, IdeaInput, ImprovePromptRequest, Provider, ReelwriterResult,
    ScriptResponse, TextCleaner, ValidateKeyRequest, ValidationError, ValidationErrorKind,
};
use std::path::Path;
use strum::IntoEnumIterator;
use tracing::info;

/// Check the key against the gateway.
pub async fn validate_key(ctx: &Context) -> ReelwriterResult<()> {
    let request = ValidateKeyRequest {
        api_key: ctx.api_key().unwrap_or_default().to_string(),
    };
    request.validate()?;
    let result = ctx.client()?.validate_key(&request.api_key).await;
    print_json(&result)
}

/// Print the catalog, or live model ids for one provider.
pub async fn models(ctx: &Context, provider: Option<&str>) -> ReelwriterResult<()> {
    let Some(name) = provider else {
        return print_json(ctx.config().catalog().models());
    };
    let provider = Provider::from_name(name).ok_or_else(|| {
        let known: Vec<String> = Provider::iter().map(|p| p.to_string()).collect();
        ValidationError::new(ValidationErrorKind::InvalidField {
            field: "provider".to_string(),
            reason: format!("unknown provider '{name}', expected one of {}", known.join(", ")),
        })
    })?;
    let ids = ctx
        .client()?
        .list_models(provider, ctx.api_key(), ctx.config().catalog())
        .await;
    print_json(&ids)
}

/// Rewrite a research prompt.
pub async fn improve_prompt(ctx: &Context, prompt: String) -> ReelwriterResult<()> {
    let request = ImprovePromptRequest::new(prompt, &ctx.credentials()?);
    let response = ctx.service()?.improve_prompt(&request).await?;
    print_json(&response)
}

/// Research ideas.
pub async fn ideas(ctx: &Context, prompt: Option<String>) -> ReelwriterResult<()> {
    let prompt = prompt.unwrap_or_else(|| DEFAULT_RESEARCH_PROMPT.to_string());
    let request = GenerateIdeasRequest::new(prompt, &ctx.credentials()?);
    let ideas = ctx.service()?.generate_ideas(&request).await?;
    info!(count = ideas.len(), "Generated ideas");
    print_json(&ideas)
}

/// Generate hooks.
pub async fn hooks(ctx: &Context, title: String, snippet: String) -> ReelwriterResult<()> {
    let request = GenerateHooksRequest::new(IdeaInput::new(title, snippet), &ctx.credentials()?);
    let response = ctx.service()?.generate_hooks(&request).await?;
    print_json(&response)
}

/// Generate a script, optionally cleaned for the teleprompter.
pub async fn script(
    ctx: &Context,
    title: String,
    snippet: String,
    hook: String,
    clean: bool,
) -> ReelwriterResult<()> {
    let request = GenerateScriptRequest::new(
        IdeaInput::new(title, snippet),
        hook,
        &ctx.credentials()?,
    );
    let mut response = ctx.service()?.generate_script(&request).await?;
    if clean {
        response = ScriptResponse {
            script: TextCleaner::default().clean(&response.script),
        };
    }
    print_json(&response)
}

/// Generate captions for a script read from disk.
pub async fn captions(ctx: &Context, script_file: &Path) -> ReelwriterResult<()> {
    let script = tokio::fs::read_to_string(script_file).await.map_err(|e| {
        ValidationError::new(ValidationErrorKind::InvalidField {
            field: "script-file".to_string(),
            reason: format!("cannot read {}: {e}", script_file.display()),
        })
    })?;
    let request = GenerateCaptionsRequest::new(script, &ctx.credentials()?);
    let captions = ctx.service()?.generate_captions(&request).await?;
    print_json(&captions)
}
