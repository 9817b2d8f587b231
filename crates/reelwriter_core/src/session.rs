//! Pipeline sessions and merge patches.

use crate::{Captions, ContentIdea, Script};
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Days a session survives after creation.
pub const SESSION_TTL_DAYS: i64 = 7;

/// One in-progress or completed pipeline run.
///
/// `expires_at` is fixed when the session is created and never moves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Unique key
    pub session_id: String,
    /// Creation instant
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    /// Creation instant plus [`SESSION_TTL_DAYS`]
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub expires_at: DateTime<Utc>,
    /// Idea chosen in research
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idea: Option<ContentIdea>,
    /// Generated hook alternatives
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hooks: Option<Vec<String>>,
    /// Hook the user confirmed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_hook: Option<String>,
    /// Current script
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<Script>,
    /// Final captions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captions: Option<Captions>,
    /// Model id used for generation
    #[serde(default)]
    pub model: String,
    /// Free-form extra data
    #[serde(default)]
    pub meta: Map<String, Value>,
}

impl Session {
    /// An empty session created at `now`.
    pub fn new(session_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            session_id: session_id.into(),
            created_at: now,
            expires_at: now + TimeDelta::days(SESSION_TTL_DAYS),
            idea: None,
            hooks: None,
            selected_hook: None,
            script: None,
            captions: None,
            model: String::new(),
            meta: Map::new(),
        }
    }

    /// Shallow-merge `patch` over this session.
    ///
    /// Fields absent from the patch keep their value; `session_id`,
    /// `created_at` and `expires_at` never change.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::Utc;
    /// use reelwriter_core::{Script, Session, SessionPatch};
    ///
    /// let mut session = Session::new("s1", Utc::now());
    /// session.selected_hook = Some("Stop scrolling.".into());
    /// session.apply(SessionPatch::default().with_script(Script::generated("Hi.")));
    ///
    /// assert_eq!(session.selected_hook.as_deref(), Some("Stop scrolling."));
    /// assert!(session.script.is_some());
    /// ```
    pub fn apply(&mut self, patch: SessionPatch) {
        let SessionPatch {
            idea,
            hooks,
            selected_hook,
            script,
            captions,
            model,
            meta,
        } = patch;
        if idea.is_some() {
            self.idea = idea;
        }
        if hooks.is_some() {
            self.hooks = hooks;
        }
        if selected_hook.is_some() {
            self.selected_hook = selected_hook;
        }
        if script.is_some() {
            self.script = script;
        }
        if captions.is_some() {
            self.captions = captions;
        }
        if let Some(model) = model {
            self.model = model;
        }
        if let Some(meta) = meta {
            self.meta.extend(meta);
        }
    }

    /// True once `expires_at` lies strictly before `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }
}

/// Partial update merged into a stored [`Session`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, derive_setters::Setters)]
#[setters(prefix = "with_", strip_option)]
pub struct SessionPatch {
    /// Chosen idea
    pub idea: Option<ContentIdea>,
    /// Hook alternatives
    pub hooks: Option<Vec<String>>,
    /// Confirmed hook
    pub selected_hook: Option<String>,
    /// Script
    pub script: Option<Script>,
    /// Captions
    pub captions: Option<Captions>,
    /// Model id
    pub model: Option<String>,
    /// Extra keys merged into `meta`
    pub meta: Option<Map<String, Value>>,
}

impl SessionPatch {
    /// True when the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
