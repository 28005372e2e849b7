//! Shared configuration for the sysdash CLI and TUI.
//!
//! TOML file + `SYSDASH_` environment overrides, and translation to
//! `sysdash_core::MonitorConfig`. Both binaries depend on this crate; the
//! CLI layers its global flags on top.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use sysdash_core::{Endpoints, MonitorConfig, PollingConfig, TransportConfig};

/// Environment prefix; nested keys are separated by `__`
/// (`SYSDASH_ENDPOINTS__SYSTEM`).
pub const ENV_PREFIX: &str = "SYSDASH_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration shared by CLI and TUI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub defaults: Defaults,

    #[serde(default)]
    pub endpoints: EndpointsSection,

    #[serde(default)]
    pub polling: PollingSection,

    #[serde(default)]
    pub transport: TransportSection,
}

/// CLI presentation defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}

/// Backend base URLs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EndpointsSection {
    #[serde(default = "default_system_url")]
    pub system: String,

    #[serde(default = "default_network_url")]
    pub network: String,
}

impl Default for EndpointsSection {
    fn default() -> Self {
        Self {
            system: default_system_url(),
            network: default_network_url(),
        }
    }
}

fn default_system_url() -> String {
    sysdash_core::DEFAULT_SYSTEM_URL.into()
}
fn default_network_url() -> String {
    sysdash_core::DEFAULT_NETWORK_URL.into()
}

/// Poll cadence in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PollingSection {
    pub usage_interval_ms: u64,
    pub temperature_interval_ms: u64,
    /// `0` disables the temperature request deadline.
    pub temperature_timeout_ms: u64,
    pub battery_interval_ms: u64,
    pub gaming_interval_ms: u64,
    pub network_interval_ms: u64,
}

impl Default for PollingSection {
    fn default() -> Self {
        Self {
            usage_interval_ms: 2_000,
            temperature_interval_ms: 2_000,
            temperature_timeout_ms: 2_000,
            battery_interval_ms: 2_000,
            gaming_interval_ms: 5_000,
            network_interval_ms: 30_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TransportSection {
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for TransportSection {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            connect_timeout_secs: 5,
        }
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "sysdash", "sysdash").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("sysdash");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file path + environment. A missing file is not an
/// error; defaults and env still apply.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let config = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()?;
    Ok(config)
}

/// Load config, returning a default if loading fails.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Translation to core ─────────────────────────────────────────────

/// Validate `cfg` and build the runtime [`MonitorConfig`].
pub fn to_monitor_config(cfg: &Config) -> Result<MonitorConfig, ConfigError> {
    let endpoints = Endpoints::new(
        parse_url("endpoints.system", &cfg.endpoints.system)?,
        parse_url("endpoints.network", &cfg.endpoints.network)?,
    );

    let p = &cfg.polling;
    let polling = PollingConfig {
        usage_interval: interval("polling.usage_interval_ms", p.usage_interval_ms)?,
        temperature_interval: interval(
            "polling.temperature_interval_ms",
            p.temperature_interval_ms,
        )?,
        temperature_timeout: (p.temperature_timeout_ms > 0)
            .then(|| Duration::from_millis(p.temperature_timeout_ms)),
        battery_interval: interval("polling.battery_interval_ms", p.battery_interval_ms)?,
        gaming_interval: interval("polling.gaming_interval_ms", p.gaming_interval_ms)?,
        network_interval: interval("polling.network_interval_ms", p.network_interval_ms)?,
    };

    if cfg.transport.timeout_secs == 0 {
        return Err(ConfigError::Validation {
            field: "transport.timeout_secs".into(),
            reason: "must be greater than zero".into(),
        });
    }
    let transport = TransportConfig {
        timeout: Duration::from_secs(cfg.transport.timeout_secs),
        connect_timeout: Duration::from_secs(cfg.transport.connect_timeout_secs.max(1)),
    };

    Ok(MonitorConfig {
        endpoints,
        transport,
        polling,
    })
}

fn parse_url(field: &str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::Validation {
        field: field.into(),
        reason: format!("invalid URL '{raw}': {e}"),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Validation {
            field: field.into(),
            reason: format!("expected an http(s) URL, got '{raw}'"),
        });
    }
    Ok(url)
}

fn interval(field: &str, ms: u64) -> Result<Duration, ConfigError> {
    if ms == 0 {
        return Err(ConfigError::Validation {
            field: field.into(),
            reason: "must be greater than zero".into(),
        });
    }
    Ok(Duration::from_millis(ms))
}
