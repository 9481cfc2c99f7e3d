//! Runtime settings.
//!
//! Layered with the `config` crate, later sources winning:
//! 1. Built-in defaults
//! 2. `config.toml` in the platform config dir (or the file passed with `--config`)
//! 3. `ONTHISDAY_*` environment variables, e.g. `ONTHISDAY_PAGE_SIZE=20`

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::favorites::default_favorites_path;
use crate::feed::{FeedCategory, FeedOptions};
use crate::feed::client::{DEFAULT_BASE_URL, DEFAULT_LANGUAGE, DEFAULT_TIMEOUT};
use crate::listing::DEFAULT_PAGE_SIZE;
use crate::models::RemovalPolicy;

pub const ENV_PREFIX: &str = "ONTHISDAY";
const APP_DIR_NAME: &str = "onthisday-explorer";
const CONFIG_FILENAME: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub feed_base_url: String,
    pub language: String,
    pub category: FeedCategory,
    pub timeout_secs: u64,
    pub page_size: usize,
    /// Favorites file; defaults to the platform data dir
    pub favorites_path: Option<PathBuf>,
    pub removal_policy: RemovalPolicy,
    pub cache_lookups: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            feed_base_url: DEFAULT_BASE_URL.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            category: FeedCategory::default(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            page_size: DEFAULT_PAGE_SIZE,
            favorites_path: None,
            removal_policy: RemovalPolicy::default(),
            cache_lookups: true,
        }
    }
}

impl Settings {
    /// Default config file location, e.g. `~/.config/onthisday-explorer/config.toml`
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Failed to get platform config directory")?;
        Ok(config_dir.join(APP_DIR_NAME).join(CONFIG_FILENAME))
    }

    /// Load settings. An explicit `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env_prefix(path, ENV_PREFIX)
    }

    pub(crate) fn load_with_env_prefix(path: Option<&Path>, env_prefix: &str) -> Result<Self> {
        let mut builder = Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    bail!("Config file not found: {}", path.display());
                }
                builder = builder.add_source(File::from(path).required(true));
            }
            None => {
                if let Ok(default_path) = Self::config_path() {
                    builder = builder.add_source(File::from(default_path).required(false));
                }
            }
        }

        let settings: Settings = builder
            .add_source(Environment::with_prefix(env_prefix).try_parsing(true))
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            bail!("page_size must be greater than 0");
        }
        if self.timeout_secs == 0 {
            bail!("timeout_secs must be greater than 0");
        }
        if self.language.trim().is_empty() {
            bail!("language must not be empty");
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn feed_options(&self) -> FeedOptions {
        FeedOptions {
            base_url: self.feed_base_url.clone(),
            language: self.language.clone(),
            category: self.category,
            timeout: self.timeout(),
        }
    }

    /// Configured favorites file, or the platform default
    pub fn favorites_path(&self) -> Result<PathBuf> {
        match &self.favorites_path {
            Some(path) => Ok(path.clone()),
            None => Ok(default_favorites_path()?),
        }
    }
}
