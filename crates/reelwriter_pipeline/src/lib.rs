//! Short-form video pipeline for reelwriter.
//!
//! Two layers live here:
//!
//! - [`GenerationService`] runs the stateless operations (ideas, hooks,
//!   script, captions, prompt improvement). Each validates its request
//!   before calling the [`GenerationDriver`](reelwriter_interface::GenerationDriver).
//! - [`PipelineController`] walks one run through
//!   `ApiKeySetup → Research → HookSelection → ScriptDrafting →
//!   CaptionGeneration → Complete`, persisting to a session and archiving
//!   finished work to history.
//!
//! ```no_run
//! use reelwriter_core::Credentials;
//! use reelwriter_pipeline::{GenerationService, PipelineController};
//! use reelwriter_storage::{HistoryStore, InMemoryBackend, SessionStore};
//! use std::sync::Arc;
//!
//! # async fn run(driver: Arc<dyn reelwriter_interface::GenerationDriver>) -> reelwriter_error::ReelwriterResult<()> {
//! let backend = Arc::new(InMemoryBackend::new());
//! let controller = PipelineController::new(
//!     GenerationService::new(driver),
//!     SessionStore::new(backend.clone()),
//!     HistoryStore::new(Arc::new(InMemoryBackend::new())),
//! );
//! controller
//!     .accept_credentials(Credentials::new("sk-...", "openai/gpt-4o"))
//!     .await?;
//! let ideas = controller.research("side hustles for students").await?;
//! # let _ = ideas;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod controller;
mod prompts;
mod requests;
mod research;
mod sequence;
mod service;

pub use controller::{Generation, PipelineController, PipelineState, Regenerated};
pub use prompts::{DEFAULT_RESEARCH_PROMPT, PromptTemplates};
pub use requests::{
    GenerateCaptionsRequest, GenerateHooksRequest, GenerateIdeasRequest, GenerateScriptRequest,
    HooksResponse, IdeaInput, ImprovePromptRequest, ImprovePromptResponse, ScriptResponse,
    ValidateKeyRequest,
};
pub use research::{DEFAULT_FEED_LIMIT, gather_ideas};
pub use sequence::{RequestSequencer, Ticket};
pub use service::GenerationService;
