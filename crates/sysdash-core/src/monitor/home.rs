// Home page: CPU / GPU / memory / disk usage and CPU temperature.

use std::sync::Arc;

use serde::Serialize;
use sysdash_api::{MonitorClient, UsageReading};
use tokio::sync::watch;

use crate::backend::Backend;
use crate::config::PollingConfig;
use crate::error::CoreError;
use crate::fallback;
use crate::poll::{FailurePolicy, MetricSource, MetricState, PollHandle, Poller};

/// Usage percentages shown as gauges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SystemUsage {
    pub cpu: f64,
    /// The backend has no GPU endpoint; this only changes under fallback.
    pub gpu: f64,
    pub memory: f64,
    pub disk: f64,
}

impl Default for SystemUsage {
    fn default() -> Self {
        Self {
            cpu: 50.0,
            gpu: 30.0,
            memory: 65.0,
            disk: 45.0,
        }
    }
}

/// CPU temperature shown before the first reading resolves, in °C.
pub const DEFAULT_TEMPERATURE: f64 = 50.0;

// ── Sources ──────────────────────────────────────────────────────────

struct UsageSource<B> {
    backend: Arc<B>,
}

impl<B: Backend> MetricSource for UsageSource<B> {
    type Value = SystemUsage;
    type Reading = UsageReading;

    async fn fetch(&self) -> Result<UsageReading, CoreError> {
        Ok(self.backend.usage().await?)
    }

    fn apply(&self, current: &SystemUsage, reading: UsageReading) -> Option<SystemUsage> {
        Some(SystemUsage {
            cpu: reading.cpu_usage,
            gpu: current.gpu,
            memory: reading.memory_usage_percent,
            disk: reading.disk_usage_percent,
        })
    }

    fn fallback(&self, _current: &SystemUsage) -> SystemUsage {
        let mut rng = rand::thread_rng();
        SystemUsage {
            cpu: fallback::CPU_USAGE.sample(&mut rng),
            gpu: fallback::GPU_USAGE.sample(&mut rng),
            memory: fallback::MEMORY_USAGE.sample(&mut rng),
            disk: fallback::DISK_USAGE.sample(&mut rng),
        }
    }
}

struct TemperatureSource<B> {
    backend: Arc<B>,
}

impl<B: Backend> MetricSource for TemperatureSource<B> {
    type Value = f64;
    type Reading = Option<f64>;

    async fn fetch(&self) -> Result<Option<f64>, CoreError> {
        Ok(self.backend.cpu_temperature().await?)
    }

    fn apply(&self, _current: &f64, reading: Option<f64>) -> Option<f64> {
        reading
    }

    fn fallback(&self, _current: &f64) -> f64 {
        fallback::CPU_TEMPERATURE.sample(&mut rand::thread_rng())
    }
}

// ── HomeMonitor ─────────────────────────────────────────────────────

pub struct HomeMonitor<B: Backend = MonitorClient> {
    usage: Arc<watch::Sender<MetricState<SystemUsage>>>,
    temperature: Arc<watch::Sender<MetricState<f64>>>,
    usage_poller: PollHandle<UsageSource<B>>,
    temperature_poller: PollHandle<TemperatureSource<B>>,
}

impl<B: Backend> HomeMonitor<B> {
    /// Start the usage and temperature pollers with default values.
    pub fn mount(backend: &Arc<B>, polling: &PollingConfig) -> Self {
        let (usage, _) = watch::channel(MetricState::new(SystemUsage::default()));
        let (temperature, _) = watch::channel(MetricState::new(DEFAULT_TEMPERATURE));
        let usage = Arc::new(usage);
        let temperature = Arc::new(temperature);

        let usage_poller = Poller::every("usage", polling.usage_interval, FailurePolicy::Mock)
            .spawn(
                UsageSource {
                    backend: Arc::clone(backend),
                },
                Arc::clone(&usage),
            );
        let temperature_poller = Poller::every(
            "temperature",
            polling.temperature_interval,
            FailurePolicy::MockLatched,
        )
        .with_timeout(polling.temperature_timeout)
        .spawn(
            TemperatureSource {
                backend: Arc::clone(backend),
            },
            Arc::clone(&temperature),
        );

        Self {
            usage,
            temperature,
            usage_poller,
            temperature_poller,
        }
    }

    pub fn usage(&self) -> MetricState<SystemUsage> {
        self.usage.borrow().clone()
    }

    pub fn temperature(&self) -> MetricState<f64> {
        self.temperature.borrow().clone()
    }

    pub fn subscribe_usage(&self) -> watch::Receiver<MetricState<SystemUsage>> {
        self.usage.subscribe()
    }

    pub fn subscribe_temperature(&self) -> watch::Receiver<MetricState<f64>> {
        self.temperature.subscribe()
    }

    /// Stop both pollers and wait for them to exit.
    pub async fn unmount(self) {
        self.usage_poller.stop().await;
        self.temperature_poller.stop().await;
    }

    /// One attempt per source under the same failure policies, for
    /// callers without a render loop.
    pub async fn sample(
        backend: &Arc<B>,
        polling: &PollingConfig,
    ) -> (MetricState<SystemUsage>, MetricState<f64>) {
        let usage = Arc::new(watch::channel(MetricState::new(SystemUsage::default())).0);
        let temperature = Arc::new(watch::channel(MetricState::new(DEFAULT_TEMPERATURE)).0);

        let usage_poller = Poller::on_demand("usage", FailurePolicy::Mock).spawn(
            UsageSource {
                backend: Arc::clone(backend),
            },
            Arc::clone(&usage),
        );
        let temperature_poller = Poller::on_demand("temperature", FailurePolicy::MockLatched)
            .with_timeout(polling.temperature_timeout)
            .spawn(
                TemperatureSource {
                    backend: Arc::clone(backend),
                },
                Arc::clone(&temperature),
            );

        tokio::join!(usage_poller.refresh(), temperature_poller.refresh());
        (usage.borrow().clone(), temperature.borrow().clone())
    }
}
