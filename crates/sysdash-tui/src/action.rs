//! All possible UI actions. Actions are the sole mechanism for state mutation.

use sysdash_core::{
    BandwidthDataPoint, BatteryStatus, MetricState, NetworkOverview, NetworkState, PowerPlan,
    SystemUsage, TimeRange,
};

use crate::screen::ScreenId;

/// Notification severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

/// A toast notification.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn success(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Success,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Error,
        }
    }

    pub fn info(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Info,
        }
    }
}

/// Every state transition in the TUI is expressed as an Action.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Navigation ────────────────────────────────────────────────
    SwitchScreen(ScreenId),
    ToggleHelp,

    // ── Data Events (from sysdash-core monitors) ──────────────────
    UsageUpdated(MetricState<SystemUsage>),
    TemperatureUpdated(MetricState<f64>),
    BatteryUpdated(MetricState<BatteryStatus>),
    GamingModeUpdated(MetricState<bool>),
    NetworkUpdated(Box<MetricState<NetworkOverview>>),
    BandwidthUpdated(MetricState<Vec<BandwidthDataPoint>>),
    NetworkStateUpdated(Box<NetworkState>),
    PowerPlanUpdated(Option<PowerPlan>),

    // ── Commands ──────────────────────────────────────────────────
    SetPowerPlan(PowerPlan),
    RunSpeedTest,
    RetryNetwork,
    SetTimeRange(TimeRange),

    // ── Notifications ─────────────────────────────────────────────
    Notify(Notification),
}
