/// Player configuration
use crate::error::{CoreError, Result};
use crate::types::RepeatMode;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default config file looked up in the working directory
pub const CONFIG_FILE: &str = "tempo.toml";

/// Prefix for environment overrides, e.g. `TEMPO_PLAYBACK__VOLUME=0.5`
pub const ENV_PREFIX: &str = "TEMPO";

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PlayerConfig {
    #[serde(default)]
    pub playback: PlaybackSettings,

    #[serde(default)]
    pub catalog: CatalogSettings,
}

/// Initial transport settings for the playback coordinator
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PlaybackSettings {
    #[serde(default = "default_volume")]
    pub volume: f32,

    #[serde(default)]
    pub shuffle: bool,

    #[serde(default)]
    pub repeat: RepeatMode,
}

/// Where the catalog proxy lives and how much it returns per page
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CatalogSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_limit")]
    pub default_limit: usize,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            volume: default_volume(),
            shuffle: false,
            repeat: RepeatMode::Off,
        }
    }
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            default_limit: default_limit(),
        }
    }
}

impl PlayerConfig {
    /// Load configuration from `tempo.toml` (if present) and environment
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    /// Load configuration from a specific file (if present) and environment
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut settings = config::Config::builder();

        if path.exists() {
            settings = settings.add_source(config::File::from(path));
        }

        settings = settings.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = settings.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML text, without environment overrides
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = config::Config::builder()
            .add_source(config::File::from_str(text, config::FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.playback.volume) {
            return Err(CoreError::Config(format!(
                "playback.volume must be within 0.0..=1.0, got {}",
                self.playback.volume
            )));
        }

        if self.catalog.default_limit == 0 {
            return Err(CoreError::Config(
                "catalog.default_limit must be at least 1".to_string(),
            ));
        }

        if self.catalog.base_url.is_empty() {
            return Err(CoreError::Config("catalog.base_url is required".to_string()));
        }

        Ok(())
    }
}

// Default values
fn default_volume() -> f32 {
    1.0
}

fn default_base_url() -> String {
    "/api/jamendo".to_string()
}

fn default_limit() -> usize {
    20
}
