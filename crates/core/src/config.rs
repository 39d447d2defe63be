//! Layered application configuration.
//!
//! Values are resolved from built-in defaults, then the user config file at
//! `~/.config/gamedex/config.toml`, then `GAMEDEX_*` environment variables.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::search::StalePolicy;

/// Directory under the user's config dir holding `config.toml`.
pub const CONFIG_DIR: &str = "gamedex";
/// Public RAWG API root.
pub const DEFAULT_BASE_URL: &str = "https://api.rawg.io/api";
/// Fallback variable consulted when no key is configured explicitly.
pub const RAWG_API_KEY_ENV: &str = "RAWG_API_KEY";

const DEFAULT_CONFIG_TOML: &str = r#"# gamedex configuration

# RAWG API key (https://rawg.io/apidocs). May also be supplied through
# GAMEDEX_API_KEY or RAWG_API_KEY.
# api_key = ""

base_url = "https://api.rawg.io/api"
request_timeout_secs = 15

# "latest_only" ignores responses from searches that have been superseded,
# "last_write_wins" lets whichever response arrives last replace the result.
stale_policy = "latest_only"
"#;

/// Runtime configuration shared by the catalog client and the front-end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Credential sent as the `key` query parameter.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Catalog API root, without a trailing slash.
    pub base_url: String,
    /// Per-request timeout applied by the HTTP client.
    pub request_timeout_secs: u64,
    /// User agent sent with every request.
    pub user_agent: String,
    /// How overlapping searches are reconciled.
    pub stale_policy: StalePolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: 15,
            user_agent: format!("gamedex/{}", env!("CARGO_PKG_VERSION")),
            stale_policy: StalePolicy::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default file location and the environment.
    pub fn load() -> Result<Self> {
        Self::load_from(config_path())
    }

    /// Load configuration using `path` as the optional file layer.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let defaults = AppConfig::default();
        let settings = Config::builder()
            .set_default("base_url", defaults.base_url.clone())?
            .set_default("request_timeout_secs", defaults.request_timeout_secs)?
            .set_default("user_agent", defaults.user_agent.clone())?
            .set_default("stale_policy", "latest_only")?
            .add_source(
                File::from(path)
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(Environment::with_prefix("GAMEDEX"))
            .build()
            .with_context(|| format!("failed to read configuration from {}", path.display()))?;

        let mut config: AppConfig = settings
            .try_deserialize()
            .context("failed to deserialize configuration")?;
        if config.api_key.as_deref().map_or(true, |key| key.trim().is_empty()) {
            config.api_key = std::env::var(RAWG_API_KEY_ENV)
                .ok()
                .filter(|key| !key.trim().is_empty());
        }
        config.base_url = config.base_url.trim_end_matches('/').to_string();
        Ok(config)
    }

    /// Request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

/// Location of the user config file.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR)
        .join("config.toml")
}

/// Write a commented default config file if none exists yet.
pub fn ensure_default_config() -> Result<()> {
    ensure_default_config_at(config_path())
}

fn ensure_default_config_at(path: PathBuf) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(&path, DEFAULT_CONFIG_TOML)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), "Wrote default configuration");
    Ok(())
}
