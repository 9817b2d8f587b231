use reelwriter_interface::PersistenceBackend;
use reelwriter_storage::FileSystemBackend;
use serde_json::{Value, json};
use tempfile::TempDir;

#[tokio::test]
async fn keys_differing_only_in_punctuation_do_not_overwrite() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let backend = FileSystemBackend::new(dir.path())?;

    backend.set("a/b", json!({"n": 1})).await?;
    backend.set("a_b", json!({"n": 2})).await?;
    backend.set("a:b", json!({"n": 3})).await?;

    assert_eq!(backend.get("a/b").await?, Some(json!({"n": 1})));
    assert_eq!(backend.get("a_b").await?, Some(json!({"n": 2})));
    assert_eq!(backend.get("a:b").await?, Some(json!({"n": 3})));

    let mut seen: Vec<(String, Value)> = Vec::new();
    backend
        .iterate_all(&mut |key: &str, value: &Value| {
            seen.push((key.to_string(), value.clone()))
        })
        .await?;
    seen.sort_by(|a, b| a.0.cmp(&b.0));
    assert_eq!(
        seen,
        vec![
            ("a/b".to_string(), json!({"n": 1})),
            ("a:b".to_string(), json!({"n": 3})),
            ("a_b".to_string(), json!({"n": 2})),
        ]
    );

    backend.delete("a/b").await?;
    assert_eq!(backend.get("a/b").await?, None);
    assert_eq!(backend.get("a_b").await?, Some(json!({"n": 2})));
    Ok(())
}

#[tokio::test]
async fn iterating_a_removed_directory_is_an_error() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let root = dir.path().join("records");
    let backend = FileSystemBackend::new(&root)?;
    std::fs::remove_dir_all(&root)?;

    let result = backend.iterate_all(&mut |_: &str, _: &Value| {}).await;
    assert!(result.is_err());
    Ok(())
}
