//! Pipeline stages.

use crate::Session;
use serde::{Deserialize, Serialize};

/// Where a pipeline run currently stands.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Waiting for an API key and model
    #[display("api key setup")]
    ApiKeySetup,
    /// Finding an idea
    #[display("research")]
    Research,
    /// Choosing a hook
    #[display("hook selection")]
    HookSelection,
    /// Drafting and editing the script
    #[display("script drafting")]
    ScriptDrafting,
    /// Producing captions
    #[display("caption generation")]
    CaptionGeneration,
    /// Everything finalized
    #[display("complete")]
    Complete,
}

impl Stage {
    /// Stage shown by a back action, if any.
    pub fn previous(self) -> Option<Stage> {
        match self {
            Stage::ApiKeySetup => None,
            Stage::Research => Some(Stage::ApiKeySetup),
            Stage::HookSelection => Some(Stage::Research),
            Stage::ScriptDrafting => Some(Stage::HookSelection),
            Stage::CaptionGeneration => Some(Stage::ScriptDrafting),
            Stage::Complete => Some(Stage::CaptionGeneration),
        }
    }

    /// Furthest stage reachable from a stored session, by field presence.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::Utc;
    /// use reelwriter_core::{Session, Stage};
    ///
    /// let mut session = Session::new("s1", Utc::now());
    /// assert_eq!(Stage::resume_point(&session, true), Stage::Research);
    /// assert_eq!(Stage::resume_point(&session, false), Stage::ApiKeySetup);
    ///
    /// session.selected_hook = Some("Nobody tells you this.".into());
    /// assert_eq!(Stage::resume_point(&session, false), Stage::ScriptDrafting);
    /// ```
    pub fn resume_point(session: &Session, has_credentials: bool) -> Stage {
        if session.captions.is_some() {
            Stage::Complete
        } else if session
            .script
            .as_ref()
            .is_some_and(|script| !script.is_blank())
        {
            Stage::CaptionGeneration
        } else if session.selected_hook.is_some() {
            Stage::ScriptDrafting
        } else if session.idea.is_some() {
            Stage::HookSelection
        } else if has_credentials {
            Stage::Research
        } else {
            Stage::ApiKeySetup
        }
    }
}
