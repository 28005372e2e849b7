// ── Runtime monitoring configuration ──
//
// These types describe *where* the backend lives and *how often* each
// source is polled. They never touch disk: the CLI/TUI build a
// `MonitorConfig` (usually via sysdash-config) and hand it in.

use std::time::Duration;

use sysdash_api::{Endpoints, TransportConfig};

/// Poll cadence and deadlines for every data source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollingConfig {
    /// CPU / memory / disk usage group.
    pub usage_interval: Duration,
    pub temperature_interval: Duration,
    /// Per-request deadline for the temperature request. `None` disables it.
    pub temperature_timeout: Option<Duration>,
    pub battery_interval: Duration,
    pub gaming_interval: Duration,
    /// Combined network snapshot (`/all`).
    pub network_interval: Duration,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            usage_interval: Duration::from_secs(2),
            temperature_interval: Duration::from_secs(2),
            temperature_timeout: Some(Duration::from_secs(2)),
            battery_interval: Duration::from_secs(2),
            gaming_interval: Duration::from_secs(5),
            network_interval: Duration::from_secs(30),
        }
    }
}

/// Everything needed to build a backend client and start the monitors.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    pub endpoints: Endpoints,
    pub transport: TransportConfig,
    pub polling: PollingConfig,
}

impl MonitorConfig {
    /// Default transport and polling against the given endpoints.
    pub fn new(endpoints: Endpoints) -> Self {
        Self {
            endpoints,
            transport: TransportConfig::default(),
            polling: PollingConfig::default(),
        }
    }
}
