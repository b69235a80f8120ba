//! Config file under the user's XDG config directory

use std::fmt::Display;
use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use crate::application::ports::ConfigStore;
use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

const APP_DIR: &str = "speech-relay";
const CONFIG_FILE: &str = "config.toml";

/// TOML config at `$XDG_CONFIG_HOME/speech-relay/config.toml`
#[derive(Debug, Clone)]
pub struct XdgConfigStore {
    path: PathBuf,
}

impl XdgConfigStore {
    pub fn new() -> Self {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from(".config"));
        Self::with_path(base.join(APP_DIR).join(CONFIG_FILE))
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for XdgConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

fn write_error(e: impl Display) -> ConfigError {
    ConfigError::WriteError(e.to_string())
}

#[async_trait]
impl ConfigStore for XdgConfigStore {
    async fn load(&self) -> Result<AppConfig, ConfigError> {
        match fs::read_to_string(&self.path).await {
            Ok(content) => {
                toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(AppConfig::empty()),
            Err(e) => Err(ConfigError::ReadError(format!(
                "{}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(config).map_err(write_error)?;

        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).await.map_err(write_error)?;
        }

        // Staged beside the target so the rename replaces it in one step
        let staging = self.path.with_extension("toml.tmp");
        fs::write(&staging, content).await.map_err(write_error)?;
        fs::rename(&staging, &self.path).await.map_err(write_error)
    }

    fn path(&self) -> PathBuf {
        self.path.clone()
    }

    fn exists(&self) -> bool {
        self.path.is_file()
    }

    async fn init(&self) -> Result<(), ConfigError> {
        if self.exists() {
            return Err(ConfigError::AlreadyExists(self.path.display().to_string()));
        }
        self.save(&AppConfig::defaults()).await
    }
}
