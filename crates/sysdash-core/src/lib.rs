// sysdash-core: polling lifecycle, fallback data and actions between
// sysdash-api and the consumers (CLI/TUI).

pub mod backend;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod fallback;
pub mod monitor;
pub mod network_state;
pub mod poll;
pub mod presentation;
pub mod staleness;

// ── Primary re-exports ──────────────────────────────────────────────
pub use backend::{ApiResult, Backend};
pub use config::{MonitorConfig, PollingConfig};
pub use dispatch::{ActionDispatcher, POWER_PLAN_PLACEHOLDER, SPEED_TEST_FAILED};
pub use error::CoreError;
pub use monitor::{
    BatteryMonitor, BatteryStatus, HomeMonitor, NETWORK_FETCH_ERROR, NetworkMonitor,
    NetworkRefresher, SystemUsage, bandwidth_points,
};
pub use network_state::{NetworkState, NetworkStateStore, SpeedTestPhase, SpeedTestStatus};
pub use poll::{
    FailurePolicy, MetricState, NoRefresh, Outcome, PollState, Refresh, Snapshot, Source,
};
pub use staleness::Staleness;

// Wire types consumers need alongside the monitors.
pub use sysdash_api::{
    BandwidthDataPoint, ConnectedDevice, DEFAULT_NETWORK_URL, DEFAULT_SYSTEM_URL, Endpoints,
    IoData, MonitorClient, NetworkData, NetworkOverview, PowerPlan, PowerPlanAck, SpeedTestResult,
    SpeedTestServer, TimeRange, TransportConfig,
};

/// Build the production backend client from a [`MonitorConfig`].
pub fn connect(config: &MonitorConfig) -> Result<MonitorClient, CoreError> {
    Ok(MonitorClient::new(config.endpoints.clone(), &config.transport)?)
}
