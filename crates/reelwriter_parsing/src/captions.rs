//! Caption parsing.
//!
//! Structured JSON is tried first. Otherwise the text is split on an
//! ordered list of delimiter patterns (social caption, professional
//! caption, title list), each with a leading label to strip.

use crate::extraction::extract_object;
use derive_getters::Getters;
use regex::{Regex, RegexBuilder};
use reelwriter_core::Captions;
use reelwriter_error::{ConfigError, ParseError, ParseErrorKind, ReelwriterResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Substituted when the social caption section is missing.
pub const INSTAGRAM_PLACEHOLDER: &str = "Could not generate Instagram caption.";
/// Substituted when the professional caption section is missing.
pub const LINKEDIN_PLACEHOLDER: &str = "Could not generate LinkedIn caption.";

/// Delimiter and label patterns for one caption section.
///
/// Both are regular expressions. Labels match case-insensitively at the
/// start of the section, optionally wrapped in markdown emphasis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct CaptionSection {
    delimiter: String,
    label: String,
}

impl CaptionSection {
    /// Create a section description.
    pub fn new(delimiter: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            delimiter: delimiter.into(),
            label: label.into(),
        }
    }

    /// Keycap-digit sections matching the default caption prompt.
    pub fn defaults() -> Vec<CaptionSection> {
        vec![
            CaptionSection::new(
                r"1\x{FE0F}?\x{20E3}",
                r"(?:📲\s*)?instagram(?:\s*/\s*facebook)?(?:\s*/\s*threads)?\s*caption",
            ),
            CaptionSection::new(r"2\x{FE0F}?\x{20E3}", r"(?:💼\s*)?linkedin\s*caption"),
            CaptionSection::new(
                r"3\x{FE0F}?\x{20E3}",
                r"(?:📺\s*)?(?:\d+\s*)?youtube\s*titles",
            ),
        ]
    }
}

#[derive(Debug, Clone)]
struct CompiledSection {
    delimiter: Regex,
    label: Regex,
}

/// Turns caption responses into [`Captions`], never failing.
#[derive(Debug, Clone)]
pub struct CaptionParser {
    sections: Vec<CompiledSection>,
}

impl CaptionParser {
    /// Compile three ordered sections: social, professional, titles.
    ///
    /// # Errors
    ///
    /// Returns an error when there are not exactly three sections or a
    /// pattern does not compile.
    pub fn new(sections: &[CaptionSection]) -> ReelwriterResult<Self> {
        if sections.len() != 3 {
            Err(ConfigError::new(format!(
                "caption parser needs 3 sections, got {}",
                sections.len()
            )))?;
        }
        let sections = sections
            .iter()
            .map(|section| -> ReelwriterResult<CompiledSection> {
                Ok(CompiledSection {
                    delimiter: compile(section.delimiter(), false)?,
                    label: compile(
                        &format!(r"^[\s*#_]*(?:{})[\s*_]*[:\-–—]?[\s*_]*", section.label()),
                        true,
                    )?,
                })
            })
            .collect::<ReelwriterResult<Vec<_>>>()?;
        Ok(Self { sections })
    }

    /// Parse a caption response.
    ///
    /// # Examples
    ///
    /// ```
    /// use reelwriter_parsing::CaptionParser;
    ///
    /// let parser = CaptionParser::default();
    /// let captions = parser.parse("1️⃣ Caption A\n2️⃣ LinkedIn Caption: Caption B");
    /// assert_eq!(captions.instagram, "Caption A");
    /// assert_eq!(captions.linkedin, "Caption B");
    /// assert!(captions.youtube_titles.is_empty());
    /// ```
    pub fn parse(&self, text: &str) -> Captions {
        if let Some(captions) = parse_structured(text) {
            debug!("Parsed structured captions");
            return captions;
        }
        self.parse_delimited(text)
    }

    fn parse_delimited(&self, text: &str) -> Captions {
        let mut found: Vec<(usize, usize, usize)> = self
            .sections
            .iter()
            .enumerate()
            .filter_map(|(index, section)| {
                section
                    .delimiter
                    .find(text)
                    .map(|m| (index, m.start(), m.end()))
            })
            .collect();
        found.sort_by_key(|&(_, start, _)| start);

        let mut chunks: [Option<String>; 3] = Default::default();
        for (position, &(index, _, end)) in found.iter().enumerate() {
            let stop = found
                .get(position + 1)
                .map(|&(_, next_start, _)| next_start)
                .unwrap_or(text.len());
            // Later matches of an earlier delimiter can precede this one.
            if stop < end {
                continue;
            }
            let chunk = text[end..stop].trim();
            let chunk = self.sections[index].label.replace(chunk, "");
            let chunk = chunk.trim();
            if !chunk.is_empty() {
                chunks[index] = Some(chunk.to_string());
            }
        }
        debug!(sections = found.len(), "Parsed delimited captions");

        let [instagram, linkedin, titles] = chunks;
        Captions {
            instagram: instagram.unwrap_or_else(|| INSTAGRAM_PLACEHOLDER.to_string()),
            linkedin: linkedin.unwrap_or_else(|| LINKEDIN_PLACEHOLDER.to_string()),
            youtube_titles: titles.as_deref().map(split_lines).unwrap_or_default(),
        }
    }
}

impl Default for CaptionParser {
    fn default() -> Self {
        Self::new(&CaptionSection::defaults()).expect("default caption patterns compile")
    }
}

fn compile(pattern: &str, case_insensitive: bool) -> ReelwriterResult<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(case_insensitive)
        .build()
        .map_err(|e| {
            ParseError::new(ParseErrorKind::InvalidPattern {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            })
            .into()
        })
}

fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_structured(text: &str) -> Option<Captions> {
    let candidate = extract_object(text)?;
    let value: Value = serde_json::from_str(&candidate).ok()?;
    let fields = value.as_object()?;

    let string = |key: &str| {
        fields
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };
    let titles = fields
        .get("youtubeTitles")
        .or_else(|| fields.get("youtube_titles"));

    let instagram = string("instagram");
    let linkedin = string("linkedin");
    if instagram.is_none() && linkedin.is_none() && titles.is_none() {
        return None;
    }

    let youtube_titles = match titles {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        Some(Value::String(lines)) => split_lines(lines),
        _ => Vec::new(),
    };

    Some(Captions {
        instagram: instagram.unwrap_or_else(|| INSTAGRAM_PLACEHOLDER.to_string()),
        linkedin: linkedin.unwrap_or_else(|| LINKEDIN_PLACEHOLDER.to_string()),
        youtube_titles,
    })
}
