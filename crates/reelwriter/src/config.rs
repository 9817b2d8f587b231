//! Layered configuration.
//!
//! Sources, later overriding earlier:
//! 1. Bundled defaults (include_str! from reelwriter.toml)
//! 2. `~/.config/reelwriter/reelwriter.toml`
//! 3. `./reelwriter.toml`
//! 4. An explicit file, usually from `--config`
//! 5. `REELWRITER__SECTION__KEY` environment variables

use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use derive_getters::Getters;
use reelwriter_core::ModelCatalog;
use reelwriter_error::{ConfigError, ReelwriterError, ReelwriterResult};
use reelwriter_models::{ClientConfig, ClientConfigBuilder, ProviderEndpoints};
use reelwriter_parsing::{CaptionParser, CaptionSection};
use reelwriter_storage::DEFAULT_HISTORY_RETENTION_DAYS;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../../../reelwriter.toml");

/// Model and timeout used for generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct GenerationSettings {
    default_model: String,
    timeout_secs: u64,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            default_model: "mistralai/mistral-7b-instruct:free".to_string(),
            timeout_secs: 60,
        }
    }
}

/// Where sessions and history are written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct StorageSettings {
    directory: String,
    history_retention_days: i64,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            directory: String::new(),
            history_retention_days: DEFAULT_HISTORY_RETENTION_DAYS,
        }
    }
}

impl StorageSettings {
    /// Resolved storage root.
    ///
    /// Empty means the platform data directory; a leading `~/` expands to
    /// the home directory.
    pub fn data_dir(&self) -> PathBuf {
        let directory = self.directory.trim();
        if directory.is_empty() {
            return dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("reelwriter");
        }
        match (directory.strip_prefix("~/"), dirs::home_dir()) {
            (Some(rest), Some(home)) => home.join(rest),
            _ => PathBuf::from(directory),
        }
    }

    /// Session records directory.
    pub fn sessions_dir(&self) -> PathBuf {
        self.data_dir().join("sessions")
    }

    /// History records directory.
    pub fn history_dir(&self) -> PathBuf {
        self.data_dir().join("history")
    }
}

/// Caption delimiter patterns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct CaptionSettings {
    sections: Vec<CaptionSection>,
}

impl Default for CaptionSettings {
    fn default() -> Self {
        Self {
            sections: CaptionSection::defaults(),
        }
    }
}

/// Log level and format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct LoggingSettings {
    level: String,
    json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Top-level reelwriter configuration.
///
/// # Example
///
/// ```no_run
/// use reelwriter::ReelwriterConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ReelwriterConfig::load(None)?;
/// println!("Default model: {}", config.generation().default_model());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct ReelwriterConfig {
    generation: GenerationSettings,
    endpoints: ProviderEndpoints,
    storage: StorageSettings,
    captions: CaptionSettings,
    logging: LoggingSettings,
    catalog: ModelCatalog,
}

impl ReelwriterConfig {
    /// Only the bundled defaults.
    pub fn bundled() -> ReelwriterResult<Self> {
        build(bundled_source())
    }

    /// All sources, with `explicit` layered over the user files.
    ///
    /// # Errors
    ///
    /// Fails when `explicit` is missing or any source does not parse.
    #[instrument(skip(explicit))]
    pub fn load(explicit: Option<&Path>) -> ReelwriterResult<Self> {
        debug!("Loading configuration");
        let mut builder = bundled_source();

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/reelwriter/reelwriter.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }
        builder = builder.add_source(File::with_name("reelwriter").required(false));

        if let Some(path) = explicit {
            debug!(path = %path.display(), "Adding explicit configuration file");
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("REELWRITER")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );
        build(builder)
    }

    /// Settings for the generation client.
    pub fn client_config(&self) -> ReelwriterResult<ClientConfig> {
        ClientConfigBuilder::default()
            .endpoints(self.endpoints.clone())
            .timeout_secs(self.generation.timeout_secs)
            .build()
            .map_err(|e| ConfigError::new(format!("Invalid client configuration: {e}")).into())
    }

    /// Caption parser compiled from the configured sections.
    pub fn caption_parser(&self) -> ReelwriterResult<CaptionParser> {
        CaptionParser::new(&self.captions.sections)
    }
}

fn bundled_source() -> ConfigBuilder<DefaultState> {
    Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
}

fn build(builder: ConfigBuilder<DefaultState>) -> ReelwriterResult<ReelwriterConfig> {
    builder
        .build()
        .map_err(|e| {
            ReelwriterError::from(ConfigError::new(format!(
                "Failed to build configuration: {e}"
            )))
        })?
        .try_deserialize()
        .map_err(|e| {
            ReelwriterError::from(ConfigError::new(format!(
                "Failed to parse configuration: {e}"
            )))
        })
}
