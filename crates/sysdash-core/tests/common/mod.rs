// In-memory backend for driving monitors under a paused tokio clock.

#![allow(dead_code, clippy::unwrap_used)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use sysdash_api::{
    BandwidthDataPoint, BatteryReading, GamingModeStatus, NetworkOverview, PowerPlan,
    PowerPlanAck, SpeedTestResult, TimeRange, UsageReading,
};
use sysdash_core::{ApiResult, Backend};
use tokio::time::Instant;

// ── Scripted replies ────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub enum Reply<T> {
    Ok(T),
    Status(u16),
    Backend(&'static str),
}

impl<T> Reply<T> {
    fn into_result(self) -> ApiResult<T> {
        match self {
            Self::Ok(v) => Ok(v),
            Self::Status(status) => Err(sysdash_api::Error::Status {
                status,
                body: String::new(),
            }),
            Self::Backend(message) => Err(sysdash_api::Error::Backend {
                message: message.into(),
                status: 200,
            }),
        }
    }
}

/// Replies handed out front to back; the last one repeats forever.
/// An empty script answers 404.
pub struct Script<T>(Mutex<VecDeque<Reply<T>>>);

impl<T: Clone> Script<T> {
    pub fn set(&self, replies: Vec<Reply<T>>) {
        *self.0.lock().unwrap() = replies.into();
    }

    fn next(&self) -> ApiResult<T> {
        let mut queue = self.0.lock().unwrap();
        let reply = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        };
        reply.unwrap_or(Reply::Status(404)).into_result()
    }
}

impl<T> Default for Script<T> {
    fn default() -> Self {
        Self(Mutex::new(VecDeque::new()))
    }
}

// ── FakeBackend ─────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Call {
    pub endpoint: &'static str,
    pub detail: String,
    /// Offset from backend creation, on the tokio clock.
    pub at: Duration,
}

pub struct FakeBackend {
    pub usage: Script<UsageReading>,
    pub temperature: Script<Option<f64>>,
    pub battery: Script<BatteryReading>,
    pub gaming: Script<GamingModeStatus>,
    pub power_plan: Script<PowerPlanAck>,
    pub overview: Script<NetworkOverview>,
    pub bandwidth: Script<Vec<BandwidthDataPoint>>,
    pub speed_test: Script<SpeedTestResult>,
    pub clear_history: Script<()>,
    pub temperature_delay: Duration,
    pub power_plan_delay: Duration,
    pub speed_test_delay: Duration,
    pub(crate) calls: Mutex<Vec<Call>>,
    pub(crate) start: Instant,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self {
            usage: Script::default(),
            temperature: Script::default(),
            battery: Script::default(),
            gaming: Script::default(),
            power_plan: Script::default(),
            overview: Script::default(),
            bandwidth: Script::default(),
            speed_test: Script::default(),
            clear_history: Script::default(),
            temperature_delay: Duration::ZERO,
            power_plan_delay: Duration::ZERO,
            speed_test_delay: Duration::ZERO,
            calls: Mutex::new(Vec::new()),
            start: Instant::now(),
        }
    }
}

impl FakeBackend {
    fn record(&self, endpoint: &'static str, detail: impl Into<String>) {
        self.calls.lock().unwrap().push(Call {
            endpoint,
            detail: detail.into(),
            at: self.start.elapsed(),
        });
    }

    pub fn calls(&self, endpoint: &str) -> Vec<Call> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.endpoint == endpoint)
            .cloned()
            .collect()
    }

    pub fn count(&self, endpoint: &str) -> usize {
        self.calls(endpoint).len()
    }

    pub fn call_times(&self, endpoint: &str) -> Vec<Duration> {
        self.calls(endpoint).into_iter().map(|c| c.at).collect()
    }
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

impl Backend for FakeBackend {
    async fn usage(&self) -> ApiResult<UsageReading> {
        self.record("usage", "");
        self.usage.next()
    }

    async fn cpu_temperature(&self) -> ApiResult<Option<f64>> {
        self.record("temperature", "");
        pause(self.temperature_delay).await;
        self.temperature.next()
    }

    async fn battery(&self) -> ApiResult<BatteryReading> {
        self.record("battery", "");
        self.battery.next()
    }

    async fn gaming_mode(&self) -> ApiResult<GamingModeStatus> {
        self.record("gaming", "");
        self.gaming.next()
    }

    async fn set_power_plan(&self, plan: PowerPlan) -> ApiResult<PowerPlanAck> {
        self.record("power_plan", plan.to_string());
        pause(self.power_plan_delay).await;
        self.power_plan.next()
    }

    async fn network_overview(&self) -> ApiResult<NetworkOverview> {
        self.record("overview", "");
        self.overview.next()
    }

    async fn bandwidth_history(&self, range: TimeRange) -> ApiResult<Vec<BandwidthDataPoint>> {
        self.record("bandwidth", range.to_string());
        self.bandwidth.next()
    }

    async fn speed_test(&self) -> ApiResult<SpeedTestResult> {
        self.record("speed_test", "");
        pause(self.speed_test_delay).await;
        self.speed_test.next()
    }

    async fn clear_history(&self) -> ApiResult<()> {
        self.record("clear_history", "");
        self.clear_history.next()
    }
}

// ── Fixtures ────────────────────────────────────────────────────────

pub fn usage(cpu: f64, memory: f64, disk: f64) -> UsageReading {
    UsageReading {
        cpu_usage: cpu,
        memory_usage_percent: memory,
        disk_usage_percent: disk,
    }
}

pub fn battery(level: f64, charging: bool) -> BatteryReading {
    BatteryReading {
        battery_level: level,
        is_charging: charging,
        time_left: Some(120.0),
        charging_status: Some(charging),
        system_power_usage: Some(15.0),
        battery_discharge_rate: Some(7.5),
        system_uptime: Some("2h 5m".into()),
    }
}

pub fn overview(connection_type: &str, last_updated: &str) -> NetworkOverview {
    let mut overview = NetworkOverview::default();
    overview.network_data.connection_type = connection_type.into();
    overview.network_data.signal_strength = 90.0;
    overview.last_updated = Some(last_updated.into());
    overview
}

pub fn speed_result(download: f64) -> SpeedTestResult {
    SpeedTestResult {
        download,
        upload: 20.0,
        ping: 12.0,
        server: None,
    }
}

/// Let spawned poll tasks run without moving the paused clock.
pub async fn settle() {
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
}
