//! Teleprompter scripts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A cleaned script, possibly edited by hand after generation.
///
/// # Examples
///
/// ```
/// use reelwriter_core::Script;
///
/// let script = Script::generated("First line.").edit("First line, reworded.");
/// assert!(script.edited);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Script {
    /// Narration, one sentence per line
    pub text: String,
    /// True once the user changed the generated text
    pub edited: bool,
    /// When the text was last written
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub last_edited: DateTime<Utc>,
}

impl Script {
    /// Freshly generated text.
    pub fn generated(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            edited: false,
            last_edited: Utc::now(),
        }
    }

    /// Replace the text with a user edit.
    pub fn edit(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self.edited = true;
        self.last_edited = Utc::now();
        self
    }

    /// True when there is no narration to show.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}
