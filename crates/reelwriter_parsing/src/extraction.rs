//! Locating JSON inside chatty model responses.
//!
//! Models wrap JSON in markdown fences or surround it with explanation.
//! These helpers try, in order: the whole text, a fenced code block, and
//! the first balanced bracketed span.

/// Find a JSON array in `response`.
///
/// # Examples
///
/// ```
/// use reelwriter_parsing::extract_array;
///
/// let text = "Sure! Here you go:\n[{\"title\": \"A\"}]\nEnjoy.";
/// assert_eq!(extract_array(text).as_deref(), Some("[{\"title\": \"A\"}]"));
/// ```
pub fn extract_array(response: &str) -> Option<String> {
    extract(response, '[', ']')
}

/// Find a JSON object in `response`.
pub fn extract_object(response: &str) -> Option<String> {
    extract(response, '{', '}')
}

fn extract(response: &str, open: char, close: char) -> Option<String> {
    if let Some(block) = extract_from_code_block(response) {
        let block = block.trim();
        if block.starts_with(open) {
            if let Some(span) = extract_balanced(block, open, close) {
                return Some(span);
            }
        }
    }

    extract_balanced(response, open, close)
}

/// Extract content from the first markdown code block.
///
/// A missing closing fence (truncated response) yields everything after
/// the opening fence.
fn extract_from_code_block(response: &str) -> Option<String> {
    let start = response.find("```")?;
    let content_start = start + 3;
    // Skip the language tag line, if any.
    let skip_to = response[content_start..]
        .find('\n')
        .map(|n| content_start + n + 1)
        .unwrap_or(content_start);

    match response[skip_to..].find("```") {
        Some(end) => Some(response[skip_to..skip_to + end].trim().to_string()),
        None => Some(response[skip_to..].trim().to_string()),
    }
}

/// Extract content between balanced delimiters.
///
/// Finds the first occurrence of `open` and returns the span up to its
/// matching `close`, ignoring delimiters inside JSON strings.
fn extract_balanced(response: &str, open: char, close: char) -> Option<String> {
    let start = response.find(open)?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, ch) in response[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match ch {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            c if c == open && !in_string => depth += 1,
            c if c == close && !in_string => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(response[start..start + i + ch.len_utf8()].to_string());
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fenced_json_is_preferred_over_prose_brackets() {
        let text = "Ideas [draft]:\n```json\n[{\"title\": \"X\"}]\n```";
        assert_eq!(extract_array(text).as_deref(), Some("[{\"title\": \"X\"}]"));
    }

    #[test]
    fn brackets_inside_strings_do_not_close_the_span() {
        let text = "[{\"title\": \"Use [brackets] ]wisely\"}] trailing ]";
        assert_eq!(
            extract_array(text).as_deref(),
            Some("[{\"title\": \"Use [brackets] ]wisely\"}]")
        );
    }

    #[test]
    fn unbalanced_input_yields_nothing() {
        assert_eq!(extract_array("[{\"title\": \"X\""), None);
        assert_eq!(extract_object("no json here"), None);
    }

    #[test]
    fn truncated_fence_still_scanned() {
        let text = "```json\n{\"instagram\": \"hi\"}";
        assert_eq!(extract_object(text).as_deref(), Some("{\"instagram\": \"hi\"}"));
    }
}
