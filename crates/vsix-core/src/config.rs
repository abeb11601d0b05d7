use crate::retry::RetryPolicy;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Immutable per-invocation settings for one resolve-and-download run.
///
/// In batch mode every line shares the same config; only the identifier
/// changes. Never mutated once constructed.
#[derive(Debug, Clone, Default)]
pub struct DownloadConfig {
    /// Proxy URL for both marketplace calls.
    pub proxy: Option<String>,
    /// Pinned version; when set, the marketplace query is skipped entirely.
    pub version: Option<String>,
    /// Destination directory; defaults to `extensions/` when absent.
    pub destination: Option<PathBuf>,
    /// Force re-download even when the file already exists.
    pub no_cache: bool,
    /// VS Code target platform (e.g. `linux-x64`, `darwin-arm64`).
    pub target_platform: Option<String>,
    /// Skip TLS certificate verification.
    pub ignore_ssl: bool,
}

/// Retry policy parameters (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts per HTTP call (including the first).
    pub max_attempts: u32,
    /// Base delay in seconds for exponential backoff (e.g. 0.25 = 250ms).
    pub base_delay_secs: f64,
    /// Maximum backoff delay in seconds.
    pub max_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_secs: 0.25,
            max_delay_secs: 30,
        }
    }
}

impl RetryConfig {
    pub fn to_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts.max(1),
            base_delay: Duration::from_secs_f64(self.base_delay_secs.max(0.0)),
            max_delay: Duration::from_secs(self.max_delay_secs),
        }
    }
}

/// Global configuration loaded from `~/.config/vsixget/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VsixgetConfig {
    /// Optional retry policy; if missing, calls are made exactly once
    /// (matching the tool's historical behavior).
    #[serde(default)]
    pub retry: Option<RetryConfig>,
}

impl VsixgetConfig {
    /// Retry policy to use: the configured one, or single-attempt.
    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
            .as_ref()
            .map(RetryConfig::to_policy)
            .unwrap_or_else(RetryPolicy::disabled)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("vsixget")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<VsixgetConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = VsixgetConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: VsixgetConfig = toml::from_str(&data)?;
    Ok(cfg)
}
