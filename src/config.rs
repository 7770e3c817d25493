//! Configuration loading.
//!
//! Settings come from a TOML file and are then overridden by environment
//! variables, so deployments can keep secrets out of the file:
//!
//! | Variable | Overrides |
//! |----------|-----------|
//! | `MICROCMS_SERVICE_DOMAIN` | `cms.service_domain` |
//! | `MICROCMS_API_KEY` | `cms.api_key` |
//! | `MICROCMS_BASE_URL` | `cms.base_url` |
//! | `SHOWCASE_BIND` | `server.bind` |
//! | `SHOWCASE_SAFE_MODE` | `content.safe_mode` |
//! | `SHOWCASE_USE_MOCK_DATA` | `content.use_mock_data` |
//!
//! ```toml
//! [cms]
//! service_domain = "ideal"
//! timeout_secs = 10
//!
//! [server]
//! bind = "127.0.0.1:3000"
//!
//! [content]
//! fallback = true
//!
//! [log]
//! format = "compact"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub cms: CmsConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CmsConfig {
    #[serde(default)]
    pub service_domain: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    /// Full API root, e.g. `http://127.0.0.1:8080/api/v1`. Derived from
    /// `service_domain` when unset.
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            service_domain: None,
            api_key: None,
            base_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    10
}

impl CmsConfig {
    /// The API root all endpoint paths are appended to.
    pub fn api_root(&self) -> Option<String> {
        if let Some(base) = non_empty(&self.base_url) {
            return Some(base.trim_end_matches('/').to_string());
        }
        non_empty(&self.service_domain).map(|domain| format!("https://{}.microcms.io/api/v1", domain))
    }

    /// Whether enough is configured to talk to the real CMS.
    pub fn has_credentials(&self) -> bool {
        self.api_root().is_some() && non_empty(&self.api_key).is_some()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:3000".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ContentConfig {
    /// Serve generic placeholders instead of calling the CMS.
    #[serde(default)]
    pub safe_mode: bool,
    /// Serve the built-in mock records instead of calling the CMS.
    #[serde(default)]
    pub use_mock_data: bool,
    /// Fall back to mock records when a CMS call fails.
    #[serde(default = "default_true")]
    pub fallback: bool,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            safe_mode: false,
            use_mock_data: false,
            fallback: true,
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    /// `compact` or `json`.
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: default_log_format(),
        }
    }
}

fn default_log_format() -> String {
    "compact".to_string()
}

/// Loads the config file at `path` (defaults if it does not exist), then
/// applies environment overrides and validates.
pub fn load_config(path: &Path) -> Result<Config> {
    let mut config = if path.exists() {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content).with_context(|| "Failed to parse config file")?
    } else {
        Config::default()
    };

    apply_env_overrides(&mut config, |name| std::env::var(name).ok());
    validate(&config)?;
    Ok(config)
}

/// Applies environment overrides read through `lookup`.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = lookup("MICROCMS_SERVICE_DOMAIN") {
        config.cms.service_domain = Some(v);
    }
    if let Some(v) = lookup("MICROCMS_API_KEY") {
        config.cms.api_key = Some(v);
    }
    if let Some(v) = lookup("MICROCMS_BASE_URL") {
        config.cms.base_url = Some(v);
    }
    if let Some(v) = lookup("SHOWCASE_BIND") {
        config.server.bind = v;
    }
    if let Some(v) = lookup("SHOWCASE_SAFE_MODE") {
        config.content.safe_mode = is_truthy(&v);
    }
    if let Some(v) = lookup("SHOWCASE_USE_MOCK_DATA") {
        config.content.use_mock_data = is_truthy(&v);
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

/// Checks settings that do not depend on which content source is used.
/// Credentials are checked when the CMS client is built.
pub fn validate(config: &Config) -> Result<()> {
    if config.cms.timeout_secs == 0 {
        anyhow::bail!("cms.timeout_secs must be > 0");
    }

    if config.server.bind.trim().is_empty() {
        anyhow::bail!("server.bind must not be empty");
    }

    match config.log.format.as_str() {
        "compact" | "json" => {}
        other => anyhow::bail!("Unknown log format: '{}'. Must be compact or json.", other),
    }

    Ok(())
}
