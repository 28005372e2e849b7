// Network page: combined network snapshot plus range-specific bandwidth
// history.
//
// The combined snapshot surfaces failures as a page error (with manual
// retry); bandwidth history is fetched once per time-range change and is
// log-only. Unmounting fires a clear-history request.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use sysdash_api::{BandwidthDataPoint, MonitorClient, NetworkOverview, TimeRange};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::backend::Backend;
use crate::config::PollingConfig;
use crate::dispatch::spawn_clear_history;
use crate::error::CoreError;
use crate::poll::{
    FailurePolicy, MetricSource, MetricState, Outcome, PollHandle, Poller, Refresh, Refresher,
};

/// Page error shown when the combined snapshot cannot be fetched.
pub const NETWORK_FETCH_ERROR: &str =
    "Failed to fetch network data. Make sure the monitoring backend is running.";

// ── Sources ──────────────────────────────────────────────────────────

struct OverviewSource<B> {
    backend: Arc<B>,
}

impl<B: Backend> MetricSource for OverviewSource<B> {
    type Value = NetworkOverview;
    type Reading = NetworkOverview;

    async fn fetch(&self) -> Result<NetworkOverview, CoreError> {
        Ok(self.backend.network_overview().await?)
    }

    fn apply(&self, _current: &NetworkOverview, reading: NetworkOverview) -> Option<NetworkOverview> {
        Some(reading)
    }

    fn reported_at(&self, reading: &NetworkOverview) -> Option<DateTime<Utc>> {
        let raw = reading.last_updated.as_deref()?;
        match DateTime::parse_from_rfc3339(raw) {
            Ok(at) => Some(at.with_timezone(&Utc)),
            Err(e) => {
                debug!(raw, error = %e, "unparseable lastUpdated; using local time");
                None
            }
        }
    }

    fn failure_message(&self, _err: &CoreError) -> String {
        NETWORK_FETCH_ERROR.to_owned()
    }
}

struct BandwidthSource<B> {
    backend: Arc<B>,
    range: watch::Sender<TimeRange>,
}

impl<B: Backend> MetricSource for BandwidthSource<B> {
    type Value = Vec<BandwidthDataPoint>;
    type Reading = Vec<BandwidthDataPoint>;

    async fn fetch(&self) -> Result<Vec<BandwidthDataPoint>, CoreError> {
        let range = *self.range.borrow();
        Ok(self.backend.bandwidth_history(range).await?)
    }

    fn apply(
        &self,
        _current: &Vec<BandwidthDataPoint>,
        reading: Vec<BandwidthDataPoint>,
    ) -> Option<Vec<BandwidthDataPoint>> {
        Some(reading)
    }
}

/// Points for the bandwidth graph: the range-specific history once it has
/// loaded, otherwise the history embedded in the combined snapshot.
pub fn bandwidth_points<'a>(
    ranged: &'a MetricState<Vec<BandwidthDataPoint>>,
    overview: &'a NetworkOverview,
) -> &'a [BandwidthDataPoint] {
    if ranged.poll.last_updated.is_some() && !ranged.value().is_empty() {
        ranged.value()
    } else {
        &overview.bandwidth_history
    }
}

// ── NetworkRefresher ─────────────────────────────────────────────────

/// Out-of-band refresh of the combined snapshot, used by the speed test.
///
/// Goes inert once the monitor unmounts.
pub struct NetworkRefresher<B: Backend = MonitorClient>(Refresher<OverviewSource<B>>);

impl<B: Backend> Clone for NetworkRefresher<B> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<B: Backend> Refresh for NetworkRefresher<B> {
    async fn refresh(&self) -> Outcome {
        self.0.refresh().await
    }
}

// ── NetworkMonitor ──────────────────────────────────────────────────

pub struct NetworkMonitor<B: Backend = MonitorClient> {
    backend: Arc<B>,
    overview: Arc<watch::Sender<MetricState<NetworkOverview>>>,
    bandwidth: Arc<watch::Sender<MetricState<Vec<BandwidthDataPoint>>>>,
    overview_poller: PollHandle<OverviewSource<B>>,
    bandwidth_poller: PollHandle<BandwidthSource<B>>,
}

impl<B: Backend> NetworkMonitor<B> {
    /// Start the combined-snapshot poller and load bandwidth history for
    /// the default time range.
    pub fn mount(backend: &Arc<B>, polling: &PollingConfig) -> Self {
        let (overview, _) = watch::channel(MetricState::new(NetworkOverview::default()));
        let (bandwidth, _) = watch::channel(MetricState::new(Vec::new()));
        let overview = Arc::new(overview);
        let bandwidth = Arc::new(bandwidth);

        let overview_poller = Poller::every(
            "network",
            polling.network_interval,
            FailurePolicy::SurfaceError,
        )
        .spawn(
            OverviewSource {
                backend: Arc::clone(backend),
            },
            Arc::clone(&overview),
        );
        let (range, _) = watch::channel(TimeRange::default());
        let bandwidth_poller = Poller::on_demand("bandwidth", FailurePolicy::LogOnly).spawn(
            BandwidthSource {
                backend: Arc::clone(backend),
                range,
            },
            Arc::clone(&bandwidth),
        );

        let monitor = Self {
            backend: Arc::clone(backend),
            overview,
            bandwidth,
            overview_poller,
            bandwidth_poller,
        };
        monitor.spawn_bandwidth_fetch();
        monitor
    }

    // ── Reads ────────────────────────────────────────────────────────

    pub fn overview(&self) -> MetricState<NetworkOverview> {
        self.overview.borrow().clone()
    }

    pub fn subscribe_overview(&self) -> watch::Receiver<MetricState<NetworkOverview>> {
        self.overview.subscribe()
    }

    pub fn subscribe_bandwidth(&self) -> watch::Receiver<MetricState<Vec<BandwidthDataPoint>>> {
        self.bandwidth.subscribe()
    }

    pub fn time_range(&self) -> TimeRange {
        *self.bandwidth_poller.source().range.borrow()
    }

    /// Current points for the bandwidth graph; see [`bandwidth_points`].
    pub fn bandwidth_points(&self) -> Vec<BandwidthDataPoint> {
        let ranged = self.bandwidth.borrow();
        let overview = self.overview.borrow();
        bandwidth_points(&ranged, overview.value()).to_vec()
    }

    // ── Actions ──────────────────────────────────────────────────────

    /// Switch the bandwidth graph window. A change triggers one fetch.
    pub fn set_time_range(&self, range: TimeRange) {
        let changed = self
            .bandwidth_poller
            .source()
            .range
            .send_if_modified(|current| {
                if *current == range {
                    return false;
                }
                *current = range;
                true
            });
        if changed {
            debug!(%range, "bandwidth time range changed");
            self.spawn_bandwidth_fetch();
        }
    }

    /// Re-run the combined fetch now (the page's Retry button).
    pub async fn refresh(&self) -> Outcome {
        self.overview_poller.refresh().await
    }

    pub fn refresher(&self) -> NetworkRefresher<B> {
        NetworkRefresher(self.overview_poller.refresher())
    }

    fn spawn_bandwidth_fetch(&self) {
        let refresher = self.bandwidth_poller.refresher();
        tokio::spawn(async move {
            refresher.refresh().await;
        });
    }

    /// Stop polling, then fire the clear-history request.
    ///
    /// The returned handle resolves once that request settles; callers are
    /// free to drop it.
    pub async fn unmount(self) -> JoinHandle<()> {
        self.overview_poller.stop().await;
        self.bandwidth_poller.stop().await;
        spawn_clear_history(self.backend)
    }
}
