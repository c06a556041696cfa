/// CLI configuration
use crate::error::{CliError, Result};
use flow_playback::PlaybackConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "flow.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CliConfig {
    /// Where `FileStore` keeps one JSON file per key
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default)]
    pub playback: PlaybackConfig,

    /// Used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl CliConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; otherwise `flow.toml` is read when
    /// present. `FLOW_` variables override the file, with `__` between
    /// sections (`FLOW_PLAYBACK__VOLUME=0.5`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with(path, environment())
    }

    /// Like [`load`](Self::load) with a caller-supplied environment source
    pub fn load_with(path: Option<&Path>, env: config::Environment) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::Config(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
                settings = settings.add_source(config::File::from(path));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        let config: Self = settings.add_source(env).build()?.try_deserialize()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let volume = self.playback.volume;
        if !(0.0..=1.0).contains(&volume) {
            return Err(CliError::Config(format!(
                "playback.volume must be between 0.0 and 1.0, got {}",
                volume
            )));
        }

        if self.log_filter.trim().is_empty() {
            return Err(CliError::Config("log_filter must not be empty".to_string()));
        }

        Ok(())
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("FLOW")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

// Default values
fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_log_filter() -> String {
    "flow_cli=info,flow_session=info,flow_playback=warn".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            playback: PlaybackConfig::default(),
            log_filter: default_log_filter(),
        }
    }
}
