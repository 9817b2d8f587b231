//! The generation operations, validated and parsed.

use crate::prompts::PromptTemplates;
use crate::requests::{
    GenerateCaptionsRequest, GenerateHooksRequest, GenerateIdeasRequest, GenerateScriptRequest,
    HooksResponse, ImprovePromptRequest, ImprovePromptResponse, ScriptResponse,
};
use reelwriter_core::{Captions, CompletionRequest, ContentIdea, Credentials};
use reelwriter_error::ReelwriterResult;
use reelwriter_interface::GenerationDriver;
use reelwriter_parsing::{CaptionParser, parse_hooks, parse_ideas};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Runs each generation operation against a [`GenerationDriver`].
///
/// Every operation validates its request before touching the driver, so a
/// missing field never costs a network call.
#[derive(Clone)]
pub struct GenerationService {
    driver: Arc<dyn GenerationDriver>,
    prompts: PromptTemplates,
    captions: CaptionParser,
}

impl GenerationService {
    /// Default prompts and caption patterns.
    pub fn new(driver: Arc<dyn GenerationDriver>) -> Self {
        Self {
            driver,
            prompts: PromptTemplates::default(),
            captions: CaptionParser::default(),
        }
    }

    /// Replace the prompt templates.
    pub fn with_prompts(mut self, prompts: PromptTemplates) -> Self {
        self.prompts = prompts;
        self
    }

    /// Replace the caption parser.
    pub fn with_caption_parser(mut self, parser: CaptionParser) -> Self {
        self.captions = parser;
        self
    }

    /// Prompt templates in use.
    pub fn prompts(&self) -> &PromptTemplates {
        &self.prompts
    }

    /// Research ideas for a prompt.
    ///
    /// # Errors
    ///
    /// Fails when the response holds no recoverable idea array.
    #[instrument(skip_all, fields(model = %request.model))]
    pub async fn generate_ideas(
        &self,
        request: &GenerateIdeasRequest,
    ) -> ReelwriterResult<Vec<ContentIdea>> {
        request.validate()?;
        let credentials = Credentials::new(&request.api_key, &request.model);
        let text = self
            .complete(&credentials, self.prompts.render_ideas(&request.prompt), false)
            .await?;
        let ideas = parse_ideas(&text)?;
        debug!(count = ideas.len(), "Parsed ideas");
        Ok(ideas)
    }

    /// Hook lines for an idea.
    #[instrument(skip_all, fields(model = %request.model))]
    pub async fn generate_hooks(
        &self,
        request: &GenerateHooksRequest,
    ) -> ReelwriterResult<HooksResponse> {
        request.validate()?;
        let credentials = Credentials::new(&request.api_key, &request.model);
        let prompt = self
            .prompts
            .render_hooks(&request.idea.title, &request.idea.snippet);
        let text = self.complete(&credentials, prompt, false).await?;
        let hooks = parse_hooks(&text);
        debug!(count = hooks.len(), "Parsed hooks");
        Ok(HooksResponse { hooks })
    }

    /// Script text exactly as the model returned it.
    #[instrument(skip_all, fields(model = %request.model))]
    pub async fn generate_script(
        &self,
        request: &GenerateScriptRequest,
    ) -> ReelwriterResult<ScriptResponse> {
        request.validate()?;
        let credentials = Credentials::new(&request.api_key, &request.model);
        let prompt = self.prompts.render_script(
            &request.idea.title,
            &request.idea.snippet,
            &request.hook,
        );
        let script = self.complete(&credentials, prompt, false).await?;
        Ok(ScriptResponse { script })
    }

    /// Captions for a script.
    ///
    /// Providers with a JSON mode are asked for a structured object; the
    /// parser still falls back to delimiters if they ignore it.
    #[instrument(skip_all, fields(model = %request.model))]
    pub async fn generate_captions(
        &self,
        request: &GenerateCaptionsRequest,
    ) -> ReelwriterResult<Captions> {
        request.validate()?;
        let credentials = Credentials::new(&request.api_key, &request.model);
        let structured = self.driver.supports_json_mode(&request.model);
        let prompt = self.prompts.render_captions(&request.script, structured);
        let text = self.complete(&credentials, prompt, structured).await?;
        Ok(self.captions.parse(&text))
    }

    /// Rewrite a research prompt.
    #[instrument(skip_all, fields(model = %request.model))]
    pub async fn improve_prompt(
        &self,
        request: &ImprovePromptRequest,
    ) -> ReelwriterResult<ImprovePromptResponse> {
        request.validate()?;
        let credentials = Credentials::new(&request.api_key, &request.model);
        let prompt = self.prompts.render_improve_prompt(&request.prompt);
        let text = self.complete(&credentials, prompt, false).await?;
        Ok(ImprovePromptResponse {
            improved_prompt: text.trim().to_string(),
        })
    }

    async fn complete(
        &self,
        credentials: &Credentials,
        prompt: String,
        json: bool,
    ) -> ReelwriterResult<String> {
        let request = CompletionRequest::prompt(prompt);
        let request = if json { request.json() } else { request };
        self.driver.complete(credentials, &request).await
    }
}
