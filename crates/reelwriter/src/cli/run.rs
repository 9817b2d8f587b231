//! Full pipeline runs.

use super::{Context, print_json};
use reelwriter::{
    DEFAULT_RESEARCH_PROMPT, Generation, HistoryKind, HistoryStore, PipelineController,
    PipelineError, PipelineErrorKind, ReelwriterResult, Script, SessionStore, Stage,
    ValidationError, ValidationErrorKind,
};
use serde_json::json;
use tracing::{info, warn};

/// Choices made up front for a non-interactive run.
pub struct Choices {
    pub prompt: Option<String>,
    pub idea: usize,
    pub hook: usize,
    pub project: bool,
}

/// Start a new run and drive it to completion.
pub async fn run(ctx: &Context, choices: Choices) -> ReelwriterResult<()> {
    let controller = controller(ctx).await?;
    controller.accept_credentials(ctx.credentials()?).await?;
    drive(&controller, &choices).await?;
    print_outcome(&controller)
}

/// Resume a stored session and drive it to completion.
pub async fn resume(ctx: &Context, session_id: &str, choices: Choices) -> ReelwriterResult<()> {
    let controller = controller(ctx).await?;
    let stage = controller
        .resume_by_id(session_id, Some(ctx.credentials()?))
        .await?;
    info!(%stage, session_id, "Resuming session");
    drive(&controller, &choices).await?;
    print_outcome(&controller)
}

async fn controller(ctx: &Context) -> ReelwriterResult<PipelineController> {
    let sessions = ctx.sessions()?;
    let history = ctx.history()?;
    housekeeping(
        &sessions,
        &history,
        *ctx.config().storage().history_retention_days(),
    )
    .await;
    Ok(PipelineController::new(ctx.service()?, sessions, history))
}

async fn housekeeping(sessions: &SessionStore, history: &HistoryStore, retention_days: i64) {
    if let Err(e) = sessions.purge_expired().await {
        warn!(error = %e, "Failed to purge expired sessions");
    }
    if let Err(e) = history.purge_older_than(retention_days).await {
        warn!(error = %e, "Failed to purge old history");
    }
}

async fn drive(controller: &PipelineController, choices: &Choices) -> ReelwriterResult<()> {
    let kind = if choices.project {
        HistoryKind::Project
    } else {
        HistoryKind::Captions
    };
    loop {
        let state = controller.snapshot();
        match state.stage() {
            Stage::ApiKeySetup => {
                return Err(PipelineError::new(PipelineErrorKind::MissingCredentials).into());
            }
            Stage::Research => {
                let prompt = choices.prompt.as_deref().unwrap_or(DEFAULT_RESEARCH_PROMPT);
                let ideas = applied(controller.research(prompt).await?, "ideas")?;
                let idea = pick(&ideas, choices.idea, "idea")?;
                controller.confirm_idea(idea).await?;
            }
            Stage::HookSelection => {
                let hooks = if state.hooks().is_empty() {
                    applied(controller.generate_hooks().await?, "hooks")?
                } else {
                    state.hooks().clone()
                };
                let hook = pick(&hooks, choices.hook, "hook")?;
                controller.confirm_hook(hook).await?;
            }
            Stage::ScriptDrafting => {
                if state.script().as_ref().is_none_or(Script::is_blank) {
                    applied(controller.generate_script().await?, "script")?;
                }
                controller.accept_script(None).await?;
            }
            Stage::CaptionGeneration => {
                if state.captions().is_none() {
                    applied(controller.generate_captions().await?, "captions")?;
                }
                controller.finalize(kind, None).await?;
            }
            Stage::Complete => return Ok(()),
        }
    }
}

// Nothing runs concurrently here, so a superseded result means the state
// moved underneath us.
fn applied<T>(generation: Generation<T>, artifact: &str) -> ReelwriterResult<T> {
    generation.applied().ok_or_else(|| {
        PipelineError::new(PipelineErrorKind::MissingArtifact(artifact.to_string())).into()
    })
}

fn pick<T: Clone>(items: &[T], index: usize, field: &str) -> ReelwriterResult<T> {
    items.get(index).cloned().ok_or_else(|| {
        ValidationError::new(ValidationErrorKind::InvalidField {
            field: field.to_string(),
            reason: format!("index {index} is out of range, {} available", items.len()),
        })
        .into()
    })
}

fn print_outcome(controller: &PipelineController) -> ReelwriterResult<()> {
    let state = controller.snapshot();
    print_json(&json!({
        "sessionId": state.session_id(),
        "stage": state.stage(),
        "idea": state.idea(),
        "hook": state.selected_hook(),
        "script": state.script(),
        "captions": state.captions(),
    }))
}
