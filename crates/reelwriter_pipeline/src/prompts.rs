//! Prompt templates for each generation operation.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Research prompt used when the caller supplies none.
pub const DEFAULT_RESEARCH_PROMPT: &str = "You are an expert content researcher for the \"Make Money Online\" and \"Business Operations\" niches. Generate 20 viral content ideas that are trending or highly engaging right now. Each idea needs a catchy title, a snippet of at most 150 characters, the platform where it is trending and a relevant URL.";

const IDEAS: &str = "{prompt}

Format the output as a JSON array of objects with keys: id, title, snippet, source, url.";

const HOOKS: &str = "You are a viral short-form video copywriter.

Content idea: \"{title}\"
Details: {snippet}

Generate exactly 10 compelling video hooks for this idea. Each hook must stop the scroll in the first 3 seconds and be under 15 words. Do not number the hooks; list each on a new line.";

const SCRIPT: &str = "You are an expert short-form video scriptwriter for TikTok, Instagram Reels and YouTube Shorts.

Write a complete 2-minute teleprompter script.

Content idea: \"{title}\"
Details: {snippet}
Winning hook: \"{hook}\"

Start exactly with the hook. Follow with a short introduction, 3 to 5 actionable points in plain language, and a clear call to action. Write only the spoken narration.";

const CAPTIONS_DELIMITED: &str = "You are a social media strategist. Based on the script below, write platform-specific captions and titles. Follow the output format exactly.

Script:
---
{script}
---

Output format:

1️⃣ 📲 Instagram / Facebook / Threads Caption
[Hook in the first 100 characters, a value-packed middle, a call to action, then exactly 9 hashtags on one line]

2️⃣ 💼 LinkedIn Caption
[Professional tone, a strong opening insight, one call to action, at most 5 hashtags at the end]

3️⃣ 📺 10 YouTube Titles
[10 titles of at most 60 characters, each on a new line, not numbered]";

const CAPTIONS_JSON: &str = "You are a social media strategist. Based on the script below, write platform-specific captions and titles.

Script:
---
{script}
---

Respond with a JSON object with exactly these keys:
- \"instagram\": an Instagram / Facebook / Threads caption with a hook in the first 100 characters, a call to action and exactly 9 hashtags on the last line
- \"linkedin\": a professional LinkedIn caption with one call to action and at most 5 hashtags
- \"youtubeTitles\": an array of 10 YouTube titles of at most 60 characters each";

const IMPROVE: &str = "You are an expert content strategist. Improve the following research prompt to make it more effective, clear and engaging for generating viral content ideas. Keep it concise and reply with the improved prompt only.

Original prompt:
\"\"\"
{prompt}
\"\"\"

Improved prompt:";

/// Prompt text for each operation.
///
/// Templates use `{prompt}`, `{title}`, `{snippet}`, `{hook}` and
/// `{script}` placeholders. Unknown placeholders are left as written.
///
/// # Examples
///
/// ```
/// use reelwriter_pipeline::PromptTemplates;
///
/// let prompts = PromptTemplates::default().with_hooks("Hooks for {title}");
/// assert_eq!(prompts.render_hooks("Rust", ""), "Hooks for Rust");
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_setters::Setters,
)]
#[setters(prefix = "with_", into)]
#[serde(default)]
pub struct PromptTemplates {
    ideas: String,
    hooks: String,
    script: String,
    captions_delimited: String,
    captions_json: String,
    improve_prompt: String,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            ideas: IDEAS.to_string(),
            hooks: HOOKS.to_string(),
            script: SCRIPT.to_string(),
            captions_delimited: CAPTIONS_DELIMITED.to_string(),
            captions_json: CAPTIONS_JSON.to_string(),
            improve_prompt: IMPROVE.to_string(),
        }
    }
}

impl PromptTemplates {
    /// Idea research prompt.
    pub fn render_ideas(&self, prompt: &str) -> String {
        fill(&self.ideas, &[("prompt", prompt)])
    }

    /// Hook prompt.
    pub fn render_hooks(&self, title: &str, snippet: &str) -> String {
        fill(&self.hooks, &[("title", title), ("snippet", snippet)])
    }

    /// Script prompt.
    pub fn render_script(&self, title: &str, snippet: &str, hook: &str) -> String {
        fill(
            &self.script,
            &[("title", title), ("snippet", snippet), ("hook", hook)],
        )
    }

    /// Caption prompt, asking for a JSON object when `structured`.
    pub fn render_captions(&self, script: &str, structured: bool) -> String {
        let template = if structured {
            &self.captions_json
        } else {
            &self.captions_delimited
        };
        fill(template, &[("script", script)])
    }

    /// Prompt-improvement prompt.
    pub fn render_improve_prompt(&self, prompt: &str) -> String {
        fill(&self.improve_prompt, &[("prompt", prompt)])
    }
}

// Single pass, so substituted values containing braces are never expanded.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open + 1..];
        let replaced = tail.find('}').and_then(|close| {
            let name = &tail[..close];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (close, *value))
        });
        match replaced {
            Some((close, value)) => {
                out.push_str(value);
                rest = &tail[close + 1..];
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_are_not_re_expanded() {
        let out = fill("{script}!", &[("script", "say {hook}"), ("hook", "x")]);
        assert_eq!(out, "say {hook}!");
    }

    #[test]
    fn unknown_placeholders_and_json_braces_survive() {
        let out = fill("{\"a\": {title}} {nope}", &[("title", "T")]);
        assert_eq!(out, "{\"a\": T} {nope}");
    }

    #[test]
    fn delimited_caption_prompt_uses_keycap_sections() {
        let prompt = PromptTemplates::default().render_captions("Hello.", false);
        assert!(prompt.contains("1️⃣"));
        assert!(prompt.contains("3️⃣ 📺 10 YouTube Titles"));
        assert!(prompt.contains("Hello."));

        let prompt = PromptTemplates::default().render_captions("Hello.", true);
        assert!(prompt.contains("youtubeTitles"));
    }

    #[test]
    fn hook_prompt_asks_for_ten_unnumbered_lines() {
        let prompt = PromptTemplates::default().render_hooks("Side hustles", "Ideas");
        assert!(prompt.contains("exactly 10"));
        assert!(prompt.contains("\"Side hustles\""));
    }
}
