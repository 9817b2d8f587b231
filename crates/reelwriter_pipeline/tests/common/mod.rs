//! Shared test doubles for pipeline tests.

#![allow(dead_code)]

use async_trait::async_trait;
use reelwriter_core::{CompletionRequest, ContentIdea, Credentials, ResponseFormat};
use reelwriter_error::{
    PersistenceError, PersistenceErrorKind, ProviderError, ReelwriterResult,
};
use reelwriter_interface::{ContentFeed, GenerationDriver, PersistenceBackend};
use reelwriter_pipeline::{GenerationService, PipelineController};
use reelwriter_storage::{HistoryStore, InMemoryBackend, SessionStore};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

enum Reply {
    Text { text: String, delay: Duration },
    Fail,
}

/// Driver that plays back queued replies, each after an optional delay.
#[derive(Default)]
pub struct ScriptedDriver {
    replies: Mutex<VecDeque<Reply>>,
    prompts: Mutex<Vec<(String, ResponseFormat)>>,
    calls: AtomicUsize,
    json_mode: bool,
}

impl ScriptedDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_json_mode(mut self) -> Self {
        self.json_mode = true;
        self
    }

    pub fn reply(self, text: &str) -> Self {
        self.reply_after(text, 0)
    }

    pub fn reply_after(self, text: &str, millis: u64) -> Self {
        self.replies.lock().unwrap().push_back(Reply::Text {
            text: text.to_string(),
            delay: Duration::from_millis(millis),
        });
        self
    }

    pub fn fail(self) -> Self {
        self.replies.lock().unwrap().push_back(Reply::Fail);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<(String, ResponseFormat)> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl GenerationDriver for ScriptedDriver {
    async fn complete(
        &self,
        _credentials: &Credentials,
        request: &CompletionRequest,
    ) -> ReelwriterResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let prompt = request
            .messages
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        self.prompts.lock().unwrap().push((prompt, request.format));
        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(Reply::Text { text, delay }) => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                Ok(text)
            }
            Some(Reply::Fail) => Err(ProviderError::status("gateway", 502, "bad gateway").into()),
            None => Err(ProviderError::malformed("gateway", "no scripted reply left").into()),
        }
    }

    fn supports_json_mode(&self, _model: &str) -> bool {
        self.json_mode
    }
}

/// Backend whose every operation fails.
pub struct FailingBackend;

#[async_trait]
impl PersistenceBackend for FailingBackend {
    async fn get(&self, _key: &str) -> ReelwriterResult<Option<Value>> {
        Err(PersistenceError::new(PersistenceErrorKind::Unavailable("offline".into())).into())
    }

    async fn set(&self, _key: &str, _value: Value) -> ReelwriterResult<()> {
        Err(PersistenceError::new(PersistenceErrorKind::Write("disk full".into())).into())
    }

    async fn delete(&self, _key: &str) -> ReelwriterResult<()> {
        Err(PersistenceError::new(PersistenceErrorKind::Delete("read only".into())).into())
    }

    async fn iterate_all(
        &self,
        _visit: &mut (dyn for<'k, 'v> FnMut(&'k str, &'v Value) + Send),
    ) -> ReelwriterResult<()> {
        Err(PersistenceError::new(PersistenceErrorKind::Unavailable("offline".into())).into())
    }
}

/// Feed returning fixed ideas, or failing.
pub struct StaticFeed {
    pub name: String,
    pub ideas: Option<Vec<ContentIdea>>,
    pub delay: Duration,
}

#[async_trait]
impl ContentFeed for StaticFeed {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self) -> ReelwriterResult<Vec<ContentIdea>> {
        tokio::time::sleep(self.delay).await;
        match &self.ideas {
            Some(ideas) => Ok(ideas.clone()),
            None => Err(ProviderError::transport(&self.name, "connection reset").into()),
        }
    }
}

pub fn idea(id: &str, title: &str) -> ContentIdea {
    ContentIdea {
        id: id.into(),
        title: title.into(),
        snippet: format!("About {title}"),
        source: "Test".into(),
        url: String::new(),
    }
}

pub fn credentials() -> Credentials {
    Credentials::new("sk-test", "openai/gpt-4o-mini")
}

pub struct Harness {
    pub driver: Arc<ScriptedDriver>,
    pub sessions: SessionStore,
    pub history: HistoryStore,
    pub controller: PipelineController,
}

pub fn harness(driver: ScriptedDriver) -> Harness {
    harness_with(driver, Arc::new(InMemoryBackend::new()), Arc::new(InMemoryBackend::new()))
}

pub fn harness_with(
    driver: ScriptedDriver,
    sessions: Arc<dyn PersistenceBackend>,
    history: Arc<dyn PersistenceBackend>,
) -> Harness {
    let driver = Arc::new(driver);
    let sessions = SessionStore::new(sessions);
    let history = HistoryStore::new(history);
    let controller = PipelineController::new(
        GenerationService::new(driver.clone()),
        sessions.clone(),
        history.clone(),
    );
    Harness {
        driver,
        sessions,
        history,
        controller,
    }
}
