//! Session store.

use crate::records::{decode, encode, load_all};
use chrono::{DateTime, Utc};
use reelwriter_core::{Session, SessionPatch};
use reelwriter_error::ReelwriterResult;
use reelwriter_interface::PersistenceBackend;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Sessions keyed by `session_id`, updated by merge.
#[derive(Clone)]
pub struct SessionStore {
    backend: Arc<dyn PersistenceBackend>,
}

impl SessionStore {
    /// Wrap a backend.
    pub fn new(backend: Arc<dyn PersistenceBackend>) -> Self {
        Self { backend }
    }

    /// Write `session`, replacing any record with the same id.
    #[instrument(skip(self, session), fields(session_id = %session.session_id))]
    pub async fn create(&self, session: &Session) -> ReelwriterResult<()> {
        self.backend
            .set(&session.session_id, encode(session)?)
            .await?;
        debug!("Created session");
        Ok(())
    }

    /// Merge `patch` into the stored session and write it back.
    ///
    /// Fields missing from the patch keep their stored values, as do
    /// `created_at` and `expires_at`. A session that does not exist yet is
    /// created with fresh timestamps.
    #[instrument(skip(self, patch))]
    pub async fn merge(&self, session_id: &str, patch: SessionPatch) -> ReelwriterResult<Session> {
        let mut session = match self.get(session_id).await? {
            Some(existing) => existing,
            None => {
                debug!("No stored session, creating one");
                Session::new(session_id, Utc::now())
            }
        };
        session.apply(patch);
        self.backend.set(session_id, encode(&session)?).await?;
        Ok(session)
    }

    /// Load one session.
    pub async fn get(&self, session_id: &str) -> ReelwriterResult<Option<Session>> {
        match self.backend.get(session_id).await? {
            Some(value) => Ok(Some(decode(session_id, value)?)),
            None => Ok(None),
        }
    }

    /// All sessions, newest first.
    pub async fn list(&self) -> ReelwriterResult<Vec<Session>> {
        let mut sessions: Vec<Session> = load_all(self.backend.as_ref())
            .await?
            .into_iter()
            .map(|(_, session)| session)
            .collect();
        sessions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(sessions)
    }

    /// Remove one session.
    pub async fn delete(&self, session_id: &str) -> ReelwriterResult<()> {
        self.backend.delete(session_id).await
    }

    /// Remove sessions whose expiry has passed.
    pub async fn purge_expired(&self) -> ReelwriterResult<usize> {
        self.purge_expired_at(Utc::now()).await
    }

    /// Remove sessions whose `expires_at` lies before `now`.
    #[instrument(skip(self))]
    pub async fn purge_expired_at(&self, now: DateTime<Utc>) -> ReelwriterResult<usize> {
        let expired: Vec<String> = load_all::<Session>(self.backend.as_ref())
            .await?
            .into_iter()
            .filter(|(_, session)| session.is_expired_at(now))
            .map(|(key, _)| key)
            .collect();
        for key in &expired {
            self.backend.delete(key).await?;
        }
        if !expired.is_empty() {
            info!(count = expired.len(), "Purged expired sessions");
        }
        Ok(expired.len())
    }
}
