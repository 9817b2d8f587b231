//! Script normalization for teleprompter display.

use regex::{Captures, Regex};
use std::sync::LazyLock;
use tracing::debug;

static HEADING_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*\[[^\]\n]*\][ \t]*$").expect("valid regex"));

static MARKDOWN_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*#{1,6}(?:[ \t].*)?$").expect("valid regex"));

static LABEL_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?im)^[ \t]*[*_#>\-]*[ \t]*(?:hook|intro(?:duction)?|section|point|cta|outro|on[- ]?screen[ \t]*text|b[- ]?roll|music|sfx|cut[ \t]*to|camera|lower[ \t]*third|graphic|overlay)(?:[ \t]*\d+)?[*_ \t]*(?::|[\-–—](?:[ \t]|$)).*$",
    )
    .expect("valid regex")
});

static TIME_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b\d{1,2}:\d{2}[ \t]*(?:[-–—]|to)[ \t]*\d{1,2}:\d{2}\b").expect("valid regex")
});

static LEADING_TIMESTAMP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^(?:[ \t]*\d{1,2}:\d{2}[ \t]*[:\-–—][ \t]*)+").expect("valid regex")
});

static PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]*\([^()\n]{0,160}\)").expect("valid regex"));

static BRACKETED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]*\[[^\[\]\n]{0,160}\]").expect("valid regex"));

static BLANKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t\u{a0}]+").expect("valid regex"));

const SHORT_ASIDE_MAX: usize = 6;
const CLOSERS: &[char] = &['"', '\'', '”', '’', ')'];

/// Turns a generated script into plain narration, one sentence per line.
///
/// Removes section and markdown headings, label lines (`Hook:`, `B-roll:`, ...),
/// timestamps, stage-direction parentheticals and bracketed asides.
/// Cleaning is idempotent. An empty result means the script had no
/// narration at all.
///
/// # Examples
///
/// ```
/// use reelwriter_parsing::TextCleaner;
///
/// let cleaner = TextCleaner::default();
/// let raw = "[HOOK]\nHook: Stop.\nYou need this. It saves hours (seriously, show timer).";
/// assert_eq!(cleaner.clean(raw), "You need this.\nIt saves hours.");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TextCleaner {
    short_aside_max: usize,
}

impl Default for TextCleaner {
    fn default() -> Self {
        Self {
            short_aside_max: SHORT_ASIDE_MAX,
        }
    }
}

impl TextCleaner {
    /// Keep parentheticals up to `chars` long (parentheses included).
    pub fn with_short_aside_max(chars: usize) -> Self {
        Self {
            short_aside_max: chars,
        }
    }

    /// Clean until the text stops changing.
    ///
    /// Every pass after the first either returns its input unchanged or
    /// removes text, so the loop ends.
    pub fn clean(&self, text: &str) -> String {
        let mut current = self.clean_once(text);
        loop {
            let next = self.clean_once(&current);
            if next == current {
                break;
            }
            current = next;
        }
        debug!(input_len = text.len(), output_len = current.len(), "Cleaned script");
        current
    }

    fn clean_once(&self, text: &str) -> String {
        let text = text.replace("\r\n", "\n").replace('\r', "\n");
        let text = HEADING_LINE.replace_all(&text, "");
        let text = MARKDOWN_HEADING.replace_all(&text, "");
        let text = LABEL_LINE.replace_all(&text, "");
        let text = TIME_RANGE.replace_all(&text, "");
        let text = LEADING_TIMESTAMP.replace_all(&text, "");
        let text = PARENTHETICAL.replace_all(&text, |caps: &Captures| {
            let matched = &caps[0];
            let aside = matched.trim_start();
            if aside.chars().count() <= self.short_aside_max {
                matched.to_string()
            } else {
                String::new()
            }
        });
        let text = BRACKETED.replace_all(&text, "");

        let joined = text
            .lines()
            .map(|line| BLANKS.replace_all(line, " ").trim().to_string())
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        split_sentences(&joined).join("\n")
    }
}

/// Split after `.`, `!` or `?` (plus closing quotes) followed by whitespace.
fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();

    for ch in text.chars() {
        if ch.is_whitespace() && ends_sentence(&current) {
            push_trimmed(&mut sentences, &current);
            current.clear();
        } else {
            current.push(ch);
        }
    }
    push_trimmed(&mut sentences, &current);
    sentences
}

fn ends_sentence(buffer: &str) -> bool {
    matches!(
        buffer.trim_end_matches(CLOSERS).chars().last(),
        Some('.' | '!' | '?')
    )
}

fn push_trimmed(sentences: &mut Vec<String>, sentence: &str) {
    let sentence = sentence.trim();
    if !sentence.is_empty() {
        sentences.push(sentence.to_string());
    }
}
