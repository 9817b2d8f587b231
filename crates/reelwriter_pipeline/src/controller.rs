//! The interactive pipeline state machine.
//!
//! [`PipelineController`] owns one [`PipelineState`] per run. Stage
//! actions check the current stage, call the [`GenerationService`] without
//! holding the state lock, then apply the result only if no newer request
//! for the same stage was issued meanwhile. Persistence is best effort:
//! failures are logged and the in-memory state stays authoritative.

use crate::requests::{
    GenerateCaptionsRequest, GenerateHooksRequest, GenerateIdeasRequest, GenerateScriptRequest,
    IdeaInput,
};
use crate::research::gather_ideas;
use crate::sequence::RequestSequencer;
use crate::service::GenerationService;
use chrono::Utc;
use derive_getters::Getters;
use reelwriter_core::{
    Captions, ContentIdea, Credentials, HistoryKind, NewHistoryEntry, Script, Session,
    SessionPatch, Stage,
};
use reelwriter_error::{
    PipelineError, PipelineErrorKind, ReelwriterResult, ValidationError, ValidationErrorKind,
};
use reelwriter_interface::ContentFeed;
use reelwriter_parsing::TextCleaner;
use reelwriter_storage::{HistoryStore, SessionStore};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, instrument, warn};

/// Outcome of a generation whose result may have been overtaken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generation<T> {
    /// The result was the latest for its stage and is now in the state
    Applied(T),
    /// A newer request for the same stage was issued; the result was dropped
    Superseded,
}

impl<T> Generation<T> {
    /// The applied value, if any.
    pub fn applied(self) -> Option<T> {
        match self {
            Generation::Applied(value) => Some(value),
            Generation::Superseded => None,
        }
    }

    /// True when the result was discarded.
    pub fn is_superseded(&self) -> bool {
        matches!(self, Generation::Superseded)
    }

    /// Transform the applied value.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Generation<U> {
        match self {
            Generation::Applied(value) => Generation::Applied(f(value)),
            Generation::Superseded => Generation::Superseded,
        }
    }
}

/// The artifact produced by [`PipelineController::regenerate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Regenerated {
    /// A fresh idea list
    Ideas(Vec<ContentIdea>),
    /// Fresh hook lines
    Hooks(Vec<String>),
    /// A freshly cleaned script
    Script(Script),
    /// Fresh captions
    Captions(Captions),
}

/// Everything a pipeline run holds in memory.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct PipelineState {
    stage: Stage,
    credentials: Option<Credentials>,
    session_id: Option<String>,
    research_prompt: Option<String>,
    ideas: Vec<ContentIdea>,
    idea: Option<ContentIdea>,
    hooks: Vec<String>,
    selected_hook: Option<String>,
    script: Option<Script>,
    captions: Option<Captions>,
}

impl Default for PipelineState {
    fn default() -> Self {
        Self {
            stage: Stage::ApiKeySetup,
            credentials: None,
            session_id: None,
            research_prompt: None,
            ideas: Vec::new(),
            idea: None,
            hooks: Vec::new(),
            selected_hook: None,
            script: None,
            captions: None,
        }
    }
}

impl PipelineState {
    /// Rebuild a run from a stored session.
    pub fn from_session(session: Session, credentials: Option<Credentials>) -> Self {
        let stage = Stage::resume_point(&session, credentials.is_some());
        Self {
            stage,
            credentials,
            session_id: Some(session.session_id),
            research_prompt: None,
            ideas: Vec::new(),
            idea: session.idea,
            hooks: session.hooks.unwrap_or_default(),
            selected_hook: session.selected_hook,
            script: session.script,
            captions: session.captions,
        }
    }

    #[track_caller]
    fn expect_stage(&self, stage: Stage, action: &str) -> ReelwriterResult<()> {
        if self.stage != stage {
            Err(PipelineError::new(PipelineErrorKind::InvalidTransition {
                stage: self.stage.to_string(),
                action: action.to_string(),
            }))?
        }
        Ok(())
    }

    #[track_caller]
    fn require_credentials(&self) -> ReelwriterResult<Credentials> {
        match &self.credentials {
            Some(credentials) => Ok(credentials.clone()),
            None => Err(PipelineError::new(PipelineErrorKind::MissingCredentials).into()),
        }
    }

    #[track_caller]
    fn require_idea(&self) -> ReelwriterResult<ContentIdea> {
        match &self.idea {
            Some(idea) => Ok(idea.clone()),
            None => Err(missing("idea")),
        }
    }

    #[track_caller]
    fn require_script(&self) -> ReelwriterResult<Script> {
        match &self.script {
            Some(script) if !script.is_blank() => Ok(script.clone()),
            _ => Err(missing("script")),
        }
    }

    fn edited_script(&self, text: String) -> Script {
        self.script
            .clone()
            .unwrap_or_else(|| Script::generated(String::new()))
            .edit(text)
    }

    fn history_entry(&self, kind: HistoryKind) -> NewHistoryEntry {
        let mut entry = NewHistoryEntry::new(kind);
        if let Some(idea) = &self.idea {
            entry = entry
                .with_idea_title(idea.title.clone())
                .with_idea_snippet(idea.snippet.clone())
                .with_source(idea.source.clone());
            if !idea.url.is_empty() {
                entry = entry.with_url(idea.url.clone());
            }
        }
        if let Some(hook) = &self.selected_hook {
            entry = entry.with_hook(hook.clone());
        }
        entry
    }
}

#[track_caller]
fn require_text(text: String) -> ReelwriterResult<String> {
    if text.trim().is_empty() {
        Err(ValidationError::missing("script"))?
    }
    Ok(text)
}

#[track_caller]
fn missing(artifact: &str) -> reelwriter_error::ReelwriterError {
    PipelineError::new(PipelineErrorKind::MissingArtifact(artifact.to_string())).into()
}

/// Drives one pipeline run from credentials to finished captions.
pub struct PipelineController {
    service: GenerationService,
    sessions: SessionStore,
    history: HistoryStore,
    cleaner: TextCleaner,
    sequencer: RequestSequencer,
    state: Mutex<PipelineState>,
}

impl PipelineController {
    /// A fresh run waiting for credentials.
    pub fn new(service: GenerationService, sessions: SessionStore, history: HistoryStore) -> Self {
        Self {
            service,
            sessions,
            history,
            cleaner: TextCleaner::default(),
            sequencer: RequestSequencer::default(),
            state: Mutex::new(PipelineState::default()),
        }
    }

    /// Replace the script cleaner.
    pub fn with_cleaner(mut self, cleaner: TextCleaner) -> Self {
        self.cleaner = cleaner;
        self
    }

    fn lock(&self) -> MutexGuard<'_, PipelineState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> PipelineState {
        self.lock().clone()
    }

    /// The stage currently shown.
    pub fn stage(&self) -> Stage {
        self.lock().stage
    }

    /// Accept an API key and model.
    ///
    /// Moves `ApiKeySetup` to `Research`. In later stages the credentials
    /// are swapped in place and the stage is unchanged.
    #[instrument(skip_all, fields(model = %credentials.model()))]
    pub async fn accept_credentials(&self, credentials: Credentials) -> ReelwriterResult<Stage> {
        if credentials.api_key().trim().is_empty() {
            Err(ValidationError::missing("apiKey"))?
        }
        if credentials.model().trim().is_empty() {
            Err(ValidationError::missing("model"))?
        }
        let (stage, session_id, model) = {
            let mut state = self.lock();
            let model = credentials.model().clone();
            state.credentials = Some(credentials);
            if state.stage == Stage::ApiKeySetup {
                state.stage = Stage::Research;
            }
            (state.stage, state.session_id.clone(), model)
        };
        if session_id.is_some() {
            self.persist(session_id, SessionPatch::default().with_model(model))
                .await;
        }
        Ok(stage)
    }

    /// Ask the model for ideas.
    #[instrument(skip_all)]
    pub async fn research(
        &self,
        prompt: &str,
    ) -> ReelwriterResult<Generation<Vec<ContentIdea>>> {
        let (ticket, request) = {
            let mut state = self.lock();
            state.expect_stage(Stage::Research, "research ideas")?;
            let request = GenerateIdeasRequest::new(prompt, &state.require_credentials()?);
            request.validate()?;
            state.research_prompt = Some(prompt.to_string());
            (self.sequencer.issue(Stage::Research), request)
        };

        let result = self.service.generate_ideas(&request).await;

        let mut state = self.lock();
        if !self.sequencer.is_current(&ticket) {
            debug!("Discarding superseded idea list");
            return Ok(Generation::Superseded);
        }
        let ideas = result?;
        state.ideas = ideas.clone();
        info!(count = ideas.len(), "Research complete");
        Ok(Generation::Applied(ideas))
    }

    /// Collect ideas from external feeds instead of the model.
    #[instrument(skip_all, fields(feeds = feeds.len()))]
    pub async fn research_from_feeds(
        &self,
        feeds: &[Arc<dyn ContentFeed>],
        limit: usize,
    ) -> ReelwriterResult<Generation<Vec<ContentIdea>>> {
        let ticket = {
            let state = self.lock();
            state.expect_stage(Stage::Research, "research ideas")?;
            self.sequencer.issue(Stage::Research)
        };

        let ideas = gather_ideas(feeds, limit).await;

        let mut state = self.lock();
        if !self.sequencer.is_current(&ticket) {
            debug!("Discarding superseded feed ideas");
            return Ok(Generation::Superseded);
        }
        state.ideas = ideas.clone();
        Ok(Generation::Applied(ideas))
    }

    /// Confirm the idea to build on and open a session for it.
    ///
    /// Confirming the idea already held keeps its hooks, script and
    /// captions and reuses its session. A different idea clears them and
    /// creates a new session. Returns the session id.
    #[instrument(skip_all, fields(title = %idea.title))]
    pub async fn confirm_idea(&self, idea: ContentIdea) -> ReelwriterResult<String> {
        if idea.title.trim().is_empty() {
            Err(ValidationError::missing("idea.title"))?
        }
        let session = {
            let mut state = self.lock();
            state.expect_stage(Stage::Research, "confirm an idea")?;
            let credentials = state.require_credentials()?;

            if state.idea.as_ref() == Some(&idea) {
                if let Some(session_id) = state.session_id.clone() {
                    state.stage = Stage::HookSelection;
                    debug!(%session_id, "Same idea confirmed, keeping artifacts");
                    return Ok(session_id);
                }
            }

            for stage in [
                Stage::HookSelection,
                Stage::ScriptDrafting,
                Stage::CaptionGeneration,
            ] {
                self.sequencer.issue(stage);
            }
            let mut session = Session::new(uuid::Uuid::new_v4().to_string(), Utc::now());
            session.idea = Some(idea.clone());
            session.model = credentials.model().clone();

            state.idea = Some(idea);
            state.session_id = Some(session.session_id.clone());
            state.hooks.clear();
            state.selected_hook = None;
            state.script = None;
            state.captions = None;
            state.stage = Stage::HookSelection;
            session
        };

        if let Err(e) = self.sessions.create(&session).await {
            warn!(session_id = %session.session_id, error = %e, "Failed to create session");
        }
        info!(session_id = %session.session_id, "Idea confirmed");
        Ok(session.session_id)
    }

    /// Generate hook lines for the confirmed idea.
    #[instrument(skip_all)]
    pub async fn generate_hooks(&self) -> ReelwriterResult<Generation<Vec<String>>> {
        let (ticket, request) = {
            let state = self.lock();
            state.expect_stage(Stage::HookSelection, "generate hooks")?;
            let credentials = state.require_credentials()?;
            let request =
                GenerateHooksRequest::new(IdeaInput::from(&state.require_idea()?), &credentials);
            request.validate()?;
            (self.sequencer.issue(Stage::HookSelection), request)
        };

        let result = self.service.generate_hooks(&request).await;

        let (hooks, session_id) = {
            let mut state = self.lock();
            if !self.sequencer.is_current(&ticket) {
                debug!("Discarding superseded hooks");
                return Ok(Generation::Superseded);
            }
            let hooks = result?.hooks;
            state.hooks = hooks.clone();
            (hooks, state.session_id.clone())
        };
        self.persist(session_id, SessionPatch::default().with_hooks(hooks.clone()))
            .await;
        Ok(Generation::Applied(hooks))
    }

    /// Confirm the hook the script should open with.
    ///
    /// A hook different from the one held clears the script and captions.
    #[instrument(skip_all)]
    pub async fn confirm_hook(&self, hook: impl Into<String>) -> ReelwriterResult<()> {
        let hook = hook.into();
        if hook.trim().is_empty() {
            Err(ValidationError::missing("hook"))?
        }
        let session_id = {
            let mut state = self.lock();
            state.expect_stage(Stage::HookSelection, "confirm a hook")?;
            if state.selected_hook.as_deref() != Some(hook.as_str()) {
                self.sequencer.issue(Stage::ScriptDrafting);
                self.sequencer.issue(Stage::CaptionGeneration);
                state.script = None;
                state.captions = None;
            }
            state.selected_hook = Some(hook.clone());
            state.stage = Stage::ScriptDrafting;
            state.session_id.clone()
        };
        self.persist(session_id, SessionPatch::default().with_selected_hook(hook))
            .await;
        Ok(())
    }

    /// Generate and clean a script.
    ///
    /// # Errors
    ///
    /// A response that cleans down to nothing is
    /// [`PipelineErrorKind::EmptyScript`]; the previous script is kept.
    #[instrument(skip_all)]
    pub async fn generate_script(&self) -> ReelwriterResult<Generation<Script>> {
        let (ticket, request) = {
            let state = self.lock();
            state.expect_stage(Stage::ScriptDrafting, "generate a script")?;
            let credentials = state.require_credentials()?;
            let idea = state.require_idea()?;
            let hook = state.selected_hook.clone().ok_or_else(|| missing("hook"))?;
            let request = GenerateScriptRequest::new(IdeaInput::from(&idea), hook, &credentials);
            request.validate()?;
            (self.sequencer.issue(Stage::ScriptDrafting), request)
        };

        let result = self.service.generate_script(&request).await;

        let (script, session_id) = {
            let mut state = self.lock();
            if !self.sequencer.is_current(&ticket) {
                debug!("Discarding superseded script");
                return Ok(Generation::Superseded);
            }
            let cleaned = self.cleaner.clean(&result?.script);
            if cleaned.trim().is_empty() {
                warn!("Script cleaned down to nothing");
                Err(PipelineError::new(PipelineErrorKind::EmptyScript))?
            }
            let script = Script::generated(cleaned);
            state.script = Some(script.clone());
            (script, state.session_id.clone())
        };
        self.persist(session_id, SessionPatch::default().with_script(script.clone()))
            .await;
        Ok(Generation::Applied(script))
    }

    /// Replace the script with user text.
    ///
    /// Any script generation still in flight is superseded. Blank text is
    /// rejected and leaves the current script as it was.
    #[instrument(skip_all)]
    pub async fn edit_script(&self, text: impl Into<String>) -> ReelwriterResult<Script> {
        let text = require_text(text.into())?;
        let (script, session_id) = {
            let mut state = self.lock();
            state.expect_stage(Stage::ScriptDrafting, "edit the script")?;
            let script = state.edited_script(text);
            self.sequencer.issue(Stage::ScriptDrafting);
            state.script = Some(script.clone());
            (script, state.session_id.clone())
        };
        self.persist(session_id, SessionPatch::default().with_script(script.clone()))
            .await;
        Ok(script)
    }

    /// Accept the script, optionally with a final edit, and archive it.
    ///
    /// A blank edit is rejected before anything changes.
    #[instrument(skip_all)]
    pub async fn accept_script(&self, edit: Option<String>) -> ReelwriterResult<Script> {
        let edit = edit.map(require_text).transpose()?;
        let (script, session_id, entry) = {
            let mut state = self.lock();
            state.expect_stage(Stage::ScriptDrafting, "accept the script")?;
            let script = match edit {
                Some(text) => state.edited_script(text),
                None => state.require_script()?,
            };
            if state.script.as_ref() != Some(&script) {
                self.sequencer.issue(Stage::ScriptDrafting);
                state.script = Some(script.clone());
            }
            state.stage = Stage::CaptionGeneration;
            let entry = state
                .history_entry(HistoryKind::Script)
                .with_script_text(script.text.clone());
            (script, state.session_id.clone(), entry)
        };
        self.persist(session_id, SessionPatch::default().with_script(script.clone()))
            .await;
        self.archive(entry).await;
        Ok(script)
    }

    /// Generate captions for the accepted script.
    #[instrument(skip_all)]
    pub async fn generate_captions(&self) -> ReelwriterResult<Generation<Captions>> {
        let (ticket, request) = {
            let state = self.lock();
            state.expect_stage(Stage::CaptionGeneration, "generate captions")?;
            let credentials = state.require_credentials()?;
            let script = state.require_script()?;
            let request = GenerateCaptionsRequest::new(script.text, &credentials);
            request.validate()?;
            (self.sequencer.issue(Stage::CaptionGeneration), request)
        };

        let result = self.service.generate_captions(&request).await;

        let (captions, session_id) = {
            let mut state = self.lock();
            if !self.sequencer.is_current(&ticket) {
                debug!("Discarding superseded captions");
                return Ok(Generation::Superseded);
            }
            let captions = result?;
            state.captions = Some(captions.clone());
            (captions, state.session_id.clone())
        };
        self.persist(
            session_id,
            SessionPatch::default().with_captions(captions.clone()),
        )
        .await;
        Ok(Generation::Applied(captions))
    }

    /// Finalize captions, optionally replaced by user edits, and archive
    /// them as a `captions` or `project` history entry.
    #[instrument(skip_all, fields(kind = %kind))]
    pub async fn finalize(
        &self,
        kind: HistoryKind,
        edited: Option<Captions>,
    ) -> ReelwriterResult<Captions> {
        if kind == HistoryKind::Script {
            Err(ValidationError::new(ValidationErrorKind::InvalidField {
                field: "kind".to_string(),
                reason: "finalized work is archived as captions or project".to_string(),
            }))?
        }
        let (captions, session_id, entry) = {
            let mut state = self.lock();
            state.expect_stage(Stage::CaptionGeneration, "finalize captions")?;
            if let Some(captions) = edited {
                self.sequencer.issue(Stage::CaptionGeneration);
                state.captions = Some(captions);
            }
            let captions = state.captions.clone().ok_or_else(|| missing("captions"))?;
            state.stage = Stage::Complete;
            let mut entry = state
                .history_entry(kind)
                .with_captions(captions.clone());
            if kind == HistoryKind::Project {
                if let Some(script) = &state.script {
                    entry = entry.with_script_text(script.text.clone());
                }
            }
            (captions, state.session_id.clone(), entry)
        };
        self.persist(
            session_id,
            SessionPatch::default().with_captions(captions.clone()),
        )
        .await;
        self.archive(entry).await;
        info!("Pipeline complete");
        Ok(captions)
    }

    /// Show the previous stage. Artifacts are kept.
    pub fn back(&self) -> Stage {
        let mut state = self.lock();
        if let Some(previous) = state.stage.previous() {
            state.stage = previous;
        }
        state.stage
    }

    /// Return to the next stage without regenerating anything.
    ///
    /// # Errors
    ///
    /// Fails when the artifact the next stage builds on is absent, or the
    /// run is already complete.
    pub fn forward(&self) -> ReelwriterResult<Stage> {
        let mut state = self.lock();
        let next = match state.stage {
            Stage::ApiKeySetup => {
                state.require_credentials()?;
                Stage::Research
            }
            Stage::Research => {
                state.require_idea()?;
                Stage::HookSelection
            }
            Stage::HookSelection => {
                if state.selected_hook.is_none() {
                    return Err(missing("hook"));
                }
                Stage::ScriptDrafting
            }
            Stage::ScriptDrafting => {
                state.require_script()?;
                Stage::CaptionGeneration
            }
            Stage::CaptionGeneration => {
                if state.captions.is_none() {
                    return Err(missing("captions"));
                }
                Stage::Complete
            }
            Stage::Complete => Err(PipelineError::new(PipelineErrorKind::InvalidTransition {
                stage: Stage::Complete.to_string(),
                action: "move forward".to_string(),
            }))?,
        };
        state.stage = next;
        Ok(next)
    }

    /// Re-run generation for the current stage, replacing its artifact.
    pub async fn regenerate(&self) -> ReelwriterResult<Generation<Regenerated>> {
        let stage = self.stage();
        match stage {
            Stage::Research => {
                let prompt = self
                    .lock()
                    .research_prompt
                    .clone()
                    .ok_or_else(|| missing("research prompt"))?;
                Ok(self.research(&prompt).await?.map(Regenerated::Ideas))
            }
            Stage::HookSelection => Ok(self.generate_hooks().await?.map(Regenerated::Hooks)),
            Stage::ScriptDrafting => Ok(self.generate_script().await?.map(Regenerated::Script)),
            Stage::CaptionGeneration => {
                Ok(self.generate_captions().await?.map(Regenerated::Captions))
            }
            Stage::ApiKeySetup | Stage::Complete => {
                Err(PipelineError::new(PipelineErrorKind::InvalidTransition {
                    stage: stage.to_string(),
                    action: "regenerate".to_string(),
                })
                .into())
            }
        }
    }

    /// Replace the run with a stored session, returning the resumed stage.
    ///
    /// Results of requests issued before the resume are discarded.
    pub fn resume(&self, session: Session, credentials: Option<Credentials>) -> Stage {
        self.sequencer.invalidate_all();
        let state = PipelineState::from_session(session, credentials);
        let stage = state.stage;
        *self.lock() = state;
        info!(%stage, "Resumed session");
        stage
    }

    /// Load a session by id and resume it.
    #[instrument(skip(self, credentials))]
    pub async fn resume_by_id(
        &self,
        session_id: &str,
        credentials: Option<Credentials>,
    ) -> ReelwriterResult<Stage> {
        let session = self
            .sessions
            .get(session_id)
            .await?
            .ok_or_else(|| missing(&format!("session {session_id}")))?;
        Ok(self.resume(session, credentials))
    }

    async fn persist(&self, session_id: Option<String>, patch: SessionPatch) {
        let Some(session_id) = session_id else {
            debug!("No session yet, nothing to persist");
            return;
        };
        if let Err(e) = self.sessions.merge(&session_id, patch).await {
            warn!(%session_id, error = %e, "Failed to persist session");
        }
    }

    async fn archive(&self, entry: NewHistoryEntry) {
        if let Err(e) = self.history.append(entry).await {
            warn!(error = %e, "Failed to write history entry");
        }
    }
}
