use chrono::{TimeDelta, Utc};
use reelwriter_core::{ContentIdea, Script, Session, SessionPatch};
use reelwriter_interface::PersistenceBackend;
use reelwriter_storage::{FileSystemBackend, InMemoryBackend, SessionStore};
use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;

fn idea() -> ContentIdea {
    ContentIdea {
        id: "hn-1".into(),
        title: "SQLite is enough".into(),
        snippet: "Why small apps don't need Postgres".into(),
        source: "Hacker News".into(),
        url: "https://news.ycombinator.com/item?id=1".into(),
    }
}

async fn assert_merge_preserves_fields(store: SessionStore) -> anyhow::Result<()> {
    let mut session = Session::new("run-1", Utc::now());
    session.apply(SessionPatch::default().with_idea(idea()));
    store.create(&session).await?;

    store
        .merge("run-1", SessionPatch::default().with_script(Script::generated("Line.")))
        .await?;

    let loaded = store.get("run-1").await?.expect("session stored");
    assert_eq!(loaded.idea, Some(idea()));
    assert_eq!(loaded.script.map(|s| s.text), Some("Line.".to_string()));
    assert_eq!(
        loaded.created_at.timestamp_millis(),
        session.created_at.timestamp_millis()
    );
    assert_eq!(
        loaded.expires_at.timestamp_millis(),
        session.expires_at.timestamp_millis()
    );
    Ok(())
}

#[tokio::test]
async fn merge_keeps_earlier_fields_in_memory() -> anyhow::Result<()> {
    assert_merge_preserves_fields(SessionStore::new(Arc::new(InMemoryBackend::new()))).await
}

#[tokio::test]
async fn merge_keeps_earlier_fields_on_disk() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let backend = FileSystemBackend::new(dir.path().join("sessions"))?;
    assert_merge_preserves_fields(SessionStore::new(Arc::new(backend))).await
}

#[tokio::test]
async fn merge_without_record_creates_one() -> anyhow::Result<()> {
    let store = SessionStore::new(Arc::new(InMemoryBackend::new()));
    let merged = store
        .merge("fresh", SessionPatch::default().with_model("openai/gpt-4o".to_string()))
        .await?;
    assert_eq!(merged.model, "openai/gpt-4o");
    assert_eq!(merged.expires_at - merged.created_at, TimeDelta::days(7));
    assert!(store.get("fresh").await?.is_some());
    Ok(())
}

#[tokio::test]
async fn purge_removes_only_expired_sessions() -> anyhow::Result<()> {
    let store = SessionStore::new(Arc::new(InMemoryBackend::new()));
    let now = Utc::now();
    let ttl = TimeDelta::days(7);
    let one_ms = TimeDelta::milliseconds(1);

    store
        .create(&Session::new("expired", now - ttl - one_ms))
        .await?;
    store
        .create(&Session::new("alive", now - ttl + one_ms))
        .await?;

    let purged = store.purge_expired_at(now).await?;

    assert_eq!(purged, 1);
    assert!(store.get("expired").await?.is_none());
    assert!(store.get("alive").await?.is_some());
    Ok(())
}

#[tokio::test]
async fn list_is_newest_first_and_skips_corrupt_records() -> anyhow::Result<()> {
    let backend = Arc::new(InMemoryBackend::new());
    let store = SessionStore::new(backend.clone());
    let now = Utc::now();

    store.create(&Session::new("old", now - TimeDelta::hours(2))).await?;
    store.create(&Session::new("new", now)).await?;
    store.create(&Session::new("mid", now - TimeDelta::hours(1))).await?;
    backend.set("garbage", json!({"not": "a session"})).await?;

    let ids: Vec<String> = store
        .list()
        .await?
        .into_iter()
        .map(|s| s.session_id)
        .collect();
    assert_eq!(ids, vec!["new", "mid", "old"]);
    Ok(())
}

#[tokio::test]
async fn delete_is_idempotent_on_disk() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let store = SessionStore::new(Arc::new(FileSystemBackend::new(dir.path())?));
    store.create(&Session::new("gone", Utc::now())).await?;

    store.delete("gone").await?;
    store.delete("gone").await?;

    assert!(store.get("gone").await?.is_none());
    Ok(())
}
