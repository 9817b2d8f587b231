//! Social captions and title lists.

use serde::{Deserialize, Serialize};

/// Captions for each distribution channel.
///
/// Every field is always present after parsing; missing sections carry a
/// placeholder string or an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Captions {
    /// Instagram / Facebook / Threads caption
    pub instagram: String,
    /// LinkedIn caption
    pub linkedin: String,
    /// Candidate YouTube titles, one per entry
    pub youtube_titles: Vec<String>,
}
