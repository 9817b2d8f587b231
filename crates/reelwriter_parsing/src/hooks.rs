//! Hook-list parsing.

/// Split a response into hook lines, trimmed, in generated order.
///
/// # Examples
///
/// ```
/// use reelwriter_parsing::parse_hooks;
///
/// let hooks = parse_hooks("Stop scrolling.\n\n  You're doing it wrong.  \r\n");
/// assert_eq!(hooks, vec!["Stop scrolling.", "You're doing it wrong."]);
/// ```
pub fn parse_hooks(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
