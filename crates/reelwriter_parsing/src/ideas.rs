//! Idea-list parsing.

use crate::extraction::{extract_array, extract_object};
use reelwriter_core::ContentIdea;
use reelwriter_error::{ParseError, ParseErrorKind, ReelwriterResult};
use serde_json::{Map, Value};
use tracing::{debug, warn};

const DEFAULT_SOURCE: &str = "AI Research";
const PREVIEW_CHARS: usize = 120;

/// Parse a model response into content ideas.
///
/// The text should be a JSON array of `{title, description|snippet}`
/// objects. When the whole text is not JSON, the first array (or object)
/// inside it is used. A top-level object contributes its first property's
/// value, which must be an array.
///
/// # Errors
///
/// Returns a [`ParseError`] when no array can be recovered.
///
/// # Examples
///
/// ```
/// use reelwriter_parsing::parse_ideas;
///
/// let text = r#"Here are some ideas: [{"title": "Borrowing explained", "description": "In 60s"}]"#;
/// let ideas = parse_ideas(text).unwrap();
/// assert_eq!(ideas[0].title, "Borrowing explained");
/// assert_eq!(ideas[0].snippet, "In 60s");
/// assert_eq!(ideas[0].source, "AI Research");
/// ```
pub fn parse_ideas(text: &str) -> ReelwriterResult<Vec<ContentIdea>> {
    let value = locate_value(text)?;
    let items = match value {
        Value::Array(items) => items,
        Value::Object(map) => first_property_array(map)?,
        _ => return Err(no_array(text).into()),
    };

    let ideas: Vec<ContentIdea> = items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| to_idea(index, item))
        .collect();
    debug!(count = ideas.len(), "Parsed ideas");
    Ok(ideas)
}

fn locate_value(text: &str) -> ReelwriterResult<Value> {
    if let Ok(value) = serde_json::from_str::<Value>(text.trim()) {
        if value.is_array() || value.is_object() {
            return Ok(value);
        }
    }

    let candidate = extract_array(text)
        .or_else(|| extract_object(text))
        .ok_or_else(|| no_array(text))?;
    serde_json::from_str(&candidate).map_err(|e| {
        warn!(error = %e, "Recovered span was not valid JSON");
        ParseError::new(ParseErrorKind::InvalidJson(e.to_string())).into()
    })
}

fn first_property_array(map: Map<String, Value>) -> ReelwriterResult<Vec<Value>> {
    match map.into_iter().next() {
        Some((_, Value::Array(items))) => Ok(items),
        Some((key, _)) => Err(ParseError::new(ParseErrorKind::NoArray(format!(
            "first property '{key}' is not an array"
        )))
        .into()),
        None => Err(ParseError::new(ParseErrorKind::NoArray("empty object".to_string())).into()),
    }
}

fn to_idea(index: usize, item: &Value) -> Option<ContentIdea> {
    let fields = item.as_object()?;
    let text = |key: &str| {
        fields
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    };

    let title = text("title")?;
    Some(ContentIdea {
        id: text("id")
            .map(str::to_string)
            .unwrap_or_else(|| format!("ai-{index}")),
        title: title.to_string(),
        snippet: text("description")
            .or_else(|| text("snippet"))
            .unwrap_or_default()
            .to_string(),
        source: text("source").unwrap_or(DEFAULT_SOURCE).to_string(),
        url: text("url").unwrap_or_default().to_string(),
    })
}

fn no_array(text: &str) -> ParseError {
    let preview: String = text.chars().take(PREVIEW_CHARS).collect();
    ParseError::new(ParseErrorKind::NoArray(preview))
}
