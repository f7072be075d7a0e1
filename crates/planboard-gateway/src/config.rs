use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const ENV_BASE_URL: &str = "PLANBOARD_BASE_URL";
const ENV_TOKEN: &str = "PLANBOARD_TOKEN";
const ENV_TIMEOUT_SECS: &str = "PLANBOARD_TIMEOUT_SECS";

/// Transport settings, stored as JSON in `<config_dir>/planboard/config.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Bearer token attached to every request, if set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            token: None,
        }
    }
}

impl GatewayConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Default config file location, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("planboard").join("config.json"))
    }

    /// Load from `path`, or from the default location when `path` is `None`,
    /// then apply env overrides. Only a missing default file yields defaults;
    /// a missing explicit file or a malformed one is an error.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        Self::load_with(path, Self::default_path(), |key| std::env::var(key).ok())
    }

    fn load_with<F>(
        explicit: Option<&Path>,
        fallback: Option<PathBuf>,
        lookup: F,
    ) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match (explicit, fallback) {
            (Some(p), _) => Self::read_file(p)?,
            (None, Some(p)) if p.exists() => Self::read_file(&p)?,
            (None, _) => Self::default(),
        };
        config.apply_overrides(lookup)?;
        if config.timeout_secs == 0 {
            anyhow::bail!("timeout_secs must be at least 1");
        }
        Ok(config)
    }

    fn read_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&content).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Apply overrides from a key lookup (the process env in production).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_BASE_URL).filter(|v| !v.is_empty()) {
            self.base_url = url;
        }
        if let Some(token) = lookup(ENV_TOKEN).filter(|v| !v.is_empty()) {
            self.token = Some(token);
        }
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS).filter(|v| !v.is_empty()) {
            self.timeout_secs = secs
                .parse()
                .with_context(|| format!("{ENV_TIMEOUT_SECS} must be a whole number, got {secs:?}"))?;
        }
        Ok(())
    }
}
