// Battery page: battery reading and gaming-mode status.
//
// Both sources are log-only: a failed poll keeps whatever was last shown.

use std::collections::VecDeque;
use std::sync::Arc;

use serde::Serialize;
use sysdash_api::{BatteryReading, GamingModeStatus, MonitorClient};
use tokio::sync::watch;

use crate::backend::Backend;
use crate::config::PollingConfig;
use crate::error::CoreError;
use crate::poll::{FailurePolicy, MetricSource, MetricState, PollHandle, Poller};

/// Readings kept for the power consumption graph.
pub const POWER_HISTORY_LEN: usize = 30;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatteryStatus {
    pub level: f64,
    pub is_charging: bool,
    /// Minutes.
    pub time_left: f64,
    pub charging_status: Option<bool>,
    /// Watts.
    pub power_usage: Option<f64>,
    /// Watts.
    pub discharge_rate: Option<f64>,
    pub uptime: Option<String>,
    /// Oldest first, at most [`POWER_HISTORY_LEN`] entries.
    pub power_history: VecDeque<f64>,
}

impl Default for BatteryStatus {
    fn default() -> Self {
        Self {
            level: 75.0,
            is_charging: false,
            time_left: 300.0,
            charging_status: None,
            power_usage: None,
            discharge_rate: None,
            uptime: None,
            power_history: VecDeque::with_capacity(POWER_HISTORY_LEN),
        }
    }
}

impl BatteryStatus {
    fn with_reading(&self, reading: BatteryReading) -> Self {
        let mut power_history = self.power_history.clone();
        if let Some(watts) = reading.system_power_usage {
            if power_history.len() == POWER_HISTORY_LEN {
                power_history.pop_front();
            }
            power_history.push_back(watts);
        }
        Self {
            level: reading.battery_level,
            is_charging: reading.is_charging,
            time_left: reading.time_left.unwrap_or(self.time_left),
            charging_status: reading.charging_status,
            power_usage: reading.system_power_usage,
            discharge_rate: reading.battery_discharge_rate,
            uptime: reading.system_uptime,
            power_history,
        }
    }
}

// ── Sources ──────────────────────────────────────────────────────────

struct BatterySource<B> {
    backend: Arc<B>,
}

impl<B: Backend> MetricSource for BatterySource<B> {
    type Value = BatteryStatus;
    type Reading = BatteryReading;

    async fn fetch(&self) -> Result<BatteryReading, CoreError> {
        Ok(self.backend.battery().await?)
    }

    fn apply(&self, current: &BatteryStatus, reading: BatteryReading) -> Option<BatteryStatus> {
        Some(current.with_reading(reading))
    }
}

struct GamingModeSource<B> {
    backend: Arc<B>,
}

impl<B: Backend> MetricSource for GamingModeSource<B> {
    type Value = bool;
    type Reading = GamingModeStatus;

    async fn fetch(&self) -> Result<GamingModeStatus, CoreError> {
        Ok(self.backend.gaming_mode().await?)
    }

    fn apply(&self, _current: &bool, reading: GamingModeStatus) -> Option<bool> {
        Some(reading.gaming_mode)
    }
}

// ── BatteryMonitor ──────────────────────────────────────────────────

pub struct BatteryMonitor<B: Backend = MonitorClient> {
    battery: Arc<watch::Sender<MetricState<BatteryStatus>>>,
    gaming_mode: Arc<watch::Sender<MetricState<bool>>>,
    battery_poller: PollHandle<BatterySource<B>>,
    gaming_poller: PollHandle<GamingModeSource<B>>,
}

impl<B: Backend> BatteryMonitor<B> {
    pub fn mount(backend: &Arc<B>, polling: &PollingConfig) -> Self {
        let (battery, _) = watch::channel(MetricState::new(BatteryStatus::default()));
        let (gaming_mode, _) = watch::channel(MetricState::new(false));
        let battery = Arc::new(battery);
        let gaming_mode = Arc::new(gaming_mode);

        let battery_poller =
            Poller::every("battery", polling.battery_interval, FailurePolicy::LogOnly).spawn(
                BatterySource {
                    backend: Arc::clone(backend),
                },
                Arc::clone(&battery),
            );
        let gaming_poller =
            Poller::every("gaming-mode", polling.gaming_interval, FailurePolicy::LogOnly).spawn(
                GamingModeSource {
                    backend: Arc::clone(backend),
                },
                Arc::clone(&gaming_mode),
            );

        Self {
            battery,
            gaming_mode,
            battery_poller,
            gaming_poller,
        }
    }

    pub fn battery(&self) -> MetricState<BatteryStatus> {
        self.battery.borrow().clone()
    }

    pub fn gaming_mode(&self) -> bool {
        *self.gaming_mode.borrow().value()
    }

    pub fn subscribe_battery(&self) -> watch::Receiver<MetricState<BatteryStatus>> {
        self.battery.subscribe()
    }

    pub fn subscribe_gaming_mode(&self) -> watch::Receiver<MetricState<bool>> {
        self.gaming_mode.subscribe()
    }

    pub async fn unmount(self) {
        self.battery_poller.stop().await;
        self.gaming_poller.stop().await;
    }

    /// Single battery and gaming-mode read; failures leave the defaults.
    pub async fn sample(backend: &Arc<B>) -> (MetricState<BatteryStatus>, MetricState<bool>) {
        let battery = Arc::new(watch::channel(MetricState::new(BatteryStatus::default())).0);
        let gaming_mode = Arc::new(watch::channel(MetricState::new(false)).0);

        let battery_poller = Poller::on_demand("battery", FailurePolicy::LogOnly).spawn(
            BatterySource {
                backend: Arc::clone(backend),
            },
            Arc::clone(&battery),
        );
        let gaming_poller = Poller::on_demand("gaming-mode", FailurePolicy::LogOnly).spawn(
            GamingModeSource {
                backend: Arc::clone(backend),
            },
            Arc::clone(&gaming_mode),
        );

        tokio::join!(battery_poller.refresh(), gaming_poller.refresh());
        (battery.borrow().clone(), gaming_mode.borrow().clone())
    }
}
