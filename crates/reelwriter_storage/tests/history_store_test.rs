use chrono::{TimeDelta, Utc};
use reelwriter_core::{Captions, HistoryKind, NewHistoryEntry};
use reelwriter_interface::PersistenceBackend;
use reelwriter_storage::{FileSystemBackend, HistoryStore, InMemoryBackend};
use std::sync::Arc;
use tempfile::TempDir;

#[tokio::test]
async fn append_assigns_fresh_ids() -> anyhow::Result<()> {
    let store = HistoryStore::new(Arc::new(InMemoryBackend::new()));
    let entry = NewHistoryEntry::new(HistoryKind::Script).with_script_text("Hello.");

    let first = store.append(entry.clone()).await?;
    let second = store.append(entry).await?;

    assert_ne!(first.id, second.id);
    assert_eq!(store.list().await?.len(), 2);
    Ok(())
}

#[tokio::test]
async fn age_purge_uses_window_at_purge_time() -> anyhow::Result<()> {
    let backend = Arc::new(InMemoryBackend::new());
    let store = HistoryStore::new(backend.clone());
    let now = Utc::now();

    for (id, age_days) in [("eight", 8), ("six", 6)] {
        let entry = NewHistoryEntry::new(HistoryKind::Captions)
            .with_captions(Captions::default())
            .into_entry(id, now - TimeDelta::days(age_days));
        backend.set(id, serde_json::to_value(&entry)?).await?;
    }

    let purged = store.purge_older_than_at(TimeDelta::days(7), now).await?;

    assert_eq!(purged, 1);
    assert!(store.get("eight").await?.is_none());
    assert!(store.get("six").await?.is_some());
    Ok(())
}

#[tokio::test]
async fn negative_window_is_rejected() {
    let store = HistoryStore::new(Arc::new(InMemoryBackend::new()));
    assert!(store.purge_older_than(-1).await.is_err());
}

#[tokio::test]
async fn entries_survive_reopening_the_directory() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let appended = {
        let store = HistoryStore::new(Arc::new(FileSystemBackend::new(dir.path())?));
        store
            .append(
                NewHistoryEntry::new(HistoryKind::Project)
                    .with_idea_title("Rust in prod")
                    .with_hook("It never crashed.")
                    .with_script_text("It never crashed.\nHere's how."),
            )
            .await?
    };

    let reopened = HistoryStore::new(Arc::new(FileSystemBackend::new(dir.path())?));
    let entries = reopened.list().await?;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].id, appended.id);
    assert_eq!(entries[0].kind, HistoryKind::Project);
    assert_eq!(entries[0].hook.as_deref(), Some("It never crashed."));
    Ok(())
}
