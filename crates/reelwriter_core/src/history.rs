//! Archived artifacts, purged by age.

use crate::Captions;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a history entry archives.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum HistoryKind {
    /// An accepted script
    #[display("script")]
    Script,
    /// Finalized captions
    #[display("captions")]
    Captions,
    /// A finished project (script plus captions)
    #[display("project")]
    Project,
}

/// An immutable history record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Random identifier assigned on append
    pub id: String,
    /// Append instant
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    /// Entry type
    #[serde(rename = "type")]
    pub kind: HistoryKind,
    /// Title of the originating idea
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idea_title: Option<String>,
    /// Snippet of the originating idea
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idea_snippet: Option<String>,
    /// Idea source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Idea link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Selected hook
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hook: Option<String>,
    /// Script narration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script_text: Option<String>,
    /// Captions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captions: Option<Captions>,
}

/// Content for a history entry before it is stamped with an id and time.
///
/// # Examples
///
/// ```
/// use reelwriter_core::{HistoryKind, NewHistoryEntry};
///
/// let entry = NewHistoryEntry::new(HistoryKind::Script)
///     .with_idea_title("Rust in 60 seconds")
///     .with_script_text("Rust is fast.");
/// assert_eq!(entry.idea_title.as_deref(), Some("Rust in 60 seconds"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, derive_setters::Setters)]
#[setters(prefix = "with_", strip_option, into)]
pub struct NewHistoryEntry {
    /// Entry type
    #[setters(skip)]
    pub kind: HistoryKind,
    /// Title of the originating idea
    pub idea_title: Option<String>,
    /// Snippet of the originating idea
    pub idea_snippet: Option<String>,
    /// Idea source
    pub source: Option<String>,
    /// Idea link
    pub url: Option<String>,
    /// Selected hook
    pub hook: Option<String>,
    /// Script narration
    pub script_text: Option<String>,
    /// Captions
    pub captions: Option<Captions>,
}

impl NewHistoryEntry {
    /// Empty content of the given kind.
    pub fn new(kind: HistoryKind) -> Self {
        Self {
            kind,
            idea_title: None,
            idea_snippet: None,
            source: None,
            url: None,
            hook: None,
            script_text: None,
            captions: None,
        }
    }

    /// Stamp the entry.
    pub fn into_entry(self, id: impl Into<String>, created_at: DateTime<Utc>) -> HistoryEntry {
        HistoryEntry {
            id: id.into(),
            created_at,
            kind: self.kind,
            idea_title: self.idea_title,
            idea_snippet: self.idea_snippet,
            source: self.source,
            url: self.url,
            hook: self.hook,
            script_text: self.script_text,
            captions: self.captions,
        }
    }
}
