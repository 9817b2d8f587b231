use reelwriter::{ReelwriterConfig, ReelwriterErrorKind};
use std::io::Write;
use tempfile::NamedTempFile;

fn toml_file(contents: &str) -> anyhow::Result<NamedTempFile> {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile()?;
    file.write_all(contents.as_bytes())?;
    Ok(file)
}

#[test]
fn explicit_file_overrides_bundled_defaults() -> anyhow::Result<()> {
    let file = toml_file(
        r#"
[generation]
default_model = "openai/gpt-4o"

[storage]
history_retention_days = 30
"#,
    )?;

    let config = ReelwriterConfig::load(Some(file.path()))?;

    assert_eq!(config.generation().default_model(), "openai/gpt-4o");
    assert_eq!(*config.generation().timeout_secs(), 60);
    assert_eq!(*config.storage().history_retention_days(), 30);
    assert!(!config.catalog().models().is_empty());
    Ok(())
}

#[test]
fn missing_explicit_file_is_a_config_error() {
    let err = ReelwriterConfig::load(Some(std::path::Path::new(
        "/nonexistent/reelwriter-test.toml",
    )))
    .unwrap_err();
    assert!(matches!(err.kind(), ReelwriterErrorKind::Config(_)));
}

#[test]
fn invalid_caption_pattern_fails_at_startup() -> anyhow::Result<()> {
    let file = toml_file(
        r#"
[[captions.sections]]
delimiter = '1('
label = 'a'

[[captions.sections]]
delimiter = '2'
label = 'b'

[[captions.sections]]
delimiter = '3'
label = 'c'
"#,
    )?;

    let config = ReelwriterConfig::load(Some(file.path()))?;
    let err = config.caption_parser().unwrap_err();
    assert!(matches!(err.kind(), ReelwriterErrorKind::Parse(_)));
    Ok(())
}

#[test]
fn client_config_carries_timeout_and_endpoints() -> anyhow::Result<()> {
    let file = toml_file(
        r#"
[generation]
timeout_secs = 5

[endpoints]
gateway = "http://127.0.0.1:9/api"
"#,
    )?;

    let client = ReelwriterConfig::load(Some(file.path()))?.client_config()?;

    assert_eq!(*client.timeout_secs(), 5);
    assert_eq!(client.endpoints().gateway(), "http://127.0.0.1:9/api");
    assert_eq!(client.endpoints().openai(), "https://api.openai.com/v1");
    Ok(())
}
