// Interval-driven fetch loop with per-source failure policy.
//
// One task per source. Each tick runs in its own child task, so a slow
// response never delays the next tick and responses are applied in
// completion order. Cancelling the handle stops the ticker and aborts
// any tick still in flight.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

use super::{FailurePolicy, MetricState, Snapshot};
use crate::error::CoreError;

// ── MetricSource ─────────────────────────────────────────────────────

/// A data source a [`Poller`] can drive.
pub trait MetricSource: Send + Sync + 'static {
    /// What the page displays.
    type Value: Clone + Send + Sync + 'static;
    /// What one fetch returns.
    type Reading: Send + 'static;

    fn fetch(&self) -> impl Future<Output = Result<Self::Reading, CoreError>> + Send;

    /// Fold a reading into the displayed value. `None` leaves it unchanged.
    fn apply(&self, current: &Self::Value, reading: Self::Reading) -> Option<Self::Value>;

    /// Substitute value for mock-policy sources.
    fn fallback(&self, current: &Self::Value) -> Self::Value {
        current.clone()
    }

    /// Server-reported timestamp of a reading, if it carries one.
    fn reported_at(&self, _reading: &Self::Reading) -> Option<DateTime<Utc>> {
        None
    }

    /// User-facing message for `SurfaceError` sources.
    fn failure_message(&self, err: &CoreError) -> String {
        err.to_string()
    }
}

/// Result of one poll attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A live value replaced the snapshot.
    Updated,
    /// The fetch succeeded but carried nothing to apply.
    Unchanged,
    /// Fallback values were published without fetching (latched source).
    Mocked,
    /// The fetch failed; the failure policy was applied.
    Failed,
    /// The poller was stopped before the attempt completed.
    Cancelled,
}

// ── PollCycle ────────────────────────────────────────────────────────

struct PollCycle<S: MetricSource> {
    name: &'static str,
    source: S,
    state: Arc<watch::Sender<MetricState<S::Value>>>,
    policy: FailurePolicy,
    timeout: Option<Duration>,
    latched: AtomicBool,
}

impl<S: MetricSource> PollCycle<S> {
    async fn tick(&self) -> Outcome {
        if self.policy == FailurePolicy::MockLatched && self.latched.load(Ordering::Acquire) {
            trace!(source = self.name, "latched; generating mock data");
            self.publish_fallback();
            return Outcome::Mocked;
        }

        let outcome = self.attempt().await;

        if self.policy == FailurePolicy::MockLatched {
            match outcome {
                Outcome::Failed if !self.latched.swap(true, Ordering::AcqRel) => {
                    debug!(source = self.name, "entered mock mode; re-probing once");
                    if self.attempt().await == Outcome::Updated {
                        self.latched.store(false, Ordering::Release);
                        return Outcome::Updated;
                    }
                }
                Outcome::Updated => self.latched.store(false, Ordering::Release),
                _ => {}
            }
        }
        outcome
    }

    async fn attempt(&self) -> Outcome {
        self.state.send_modify(|s| s.poll.is_loading = true);

        let result = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.source.fetch())
                .await
                .unwrap_or_else(|_| {
                    Err(CoreError::Timeout {
                        timeout_ms: u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
                    })
                }),
            None => self.source.fetch().await,
        };

        match result {
            Ok(reading) => self.apply_reading(reading),
            Err(err) => {
                self.apply_failure(&err);
                Outcome::Failed
            }
        }
    }

    fn apply_reading(&self, reading: S::Reading) -> Outcome {
        let at = self.source.reported_at(&reading).unwrap_or_else(Utc::now);
        let mut outcome = Outcome::Unchanged;
        self.state.send_modify(|s| {
            s.poll.is_loading = false;
            if let Some(value) = self.source.apply(&s.snapshot.value, reading) {
                s.snapshot = Snapshot::live(value);
                s.poll.last_updated = Some(at);
                s.poll.using_mock = false;
                s.poll.error = None;
                outcome = Outcome::Updated;
            }
        });
        if outcome == Outcome::Unchanged {
            debug!(source = self.name, "response carried no update");
        }
        outcome
    }

    fn apply_failure(&self, err: &CoreError) {
        match self.policy {
            FailurePolicy::Mock | FailurePolicy::MockLatched => {
                debug!(source = self.name, error = %err, "fetch failed; using mock data");
                self.state.send_modify(|s| {
                    s.poll.is_loading = false;
                    s.snapshot = Snapshot::mock(self.source.fallback(&s.snapshot.value));
                    s.poll.using_mock = true;
                });
            }
            FailurePolicy::SurfaceError => {
                warn!(source = self.name, error = %err, "fetch failed");
                let message = self.source.failure_message(err);
                self.state.send_modify(|s| {
                    s.poll.is_loading = false;
                    s.poll.error = Some(message);
                });
            }
            FailurePolicy::LogOnly => {
                warn!(source = self.name, error = %err, "fetch failed");
                self.state.send_modify(|s| s.poll.is_loading = false);
            }
        }
    }

    fn publish_fallback(&self) {
        self.state.send_modify(|s| {
            s.snapshot = Snapshot::mock(self.source.fallback(&s.snapshot.value));
            s.poll.using_mock = true;
        });
    }
}

// ── Poller ───────────────────────────────────────────────────────────

/// Builder for a polled source.
#[derive(Debug, Clone)]
pub struct Poller {
    name: &'static str,
    interval: Option<Duration>,
    timeout: Option<Duration>,
    policy: FailurePolicy,
}

impl Poller {
    /// Poll every `interval`, starting immediately.
    pub fn every(name: &'static str, interval: Duration, policy: FailurePolicy) -> Self {
        Self {
            name,
            interval: Some(interval),
            timeout: None,
            policy,
        }
    }

    /// A source that only fetches on demand via [`PollHandle::refresh`].
    pub fn on_demand(name: &'static str, policy: FailurePolicy) -> Self {
        Self {
            name,
            interval: None,
            timeout: None,
            policy,
        }
    }

    /// Bound every fetch; expiry counts as a failure.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Start polling `source`, publishing into `state`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<S: MetricSource>(
        self,
        source: S,
        state: Arc<watch::Sender<MetricState<S::Value>>>,
    ) -> PollHandle<S> {
        let cycle = Arc::new(PollCycle {
            name: self.name,
            source,
            state,
            policy: self.policy,
            timeout: self.timeout,
            latched: AtomicBool::new(false),
        });
        let cancel = CancellationToken::new();
        let task = self.interval.map(|period| {
            debug!(source = self.name, ?period, policy = %self.policy, "poller started");
            tokio::spawn(poll_task(Arc::clone(&cycle), period, cancel.clone()))
        });
        PollHandle {
            cycle,
            cancel,
            task,
        }
    }
}

async fn poll_task<S: MetricSource>(
    cycle: Arc<PollCycle<S>>,
    period: Duration,
    cancel: CancellationToken,
) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut in_flight = JoinSet::new();

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            Some(_) = in_flight.join_next(), if !in_flight.is_empty() => {}
            _ = interval.tick() => {
                let cycle = Arc::clone(&cycle);
                in_flight.spawn(async move { cycle.tick().await });
            }
        }
    }

    in_flight.abort_all();
    debug!(source = cycle.name, "poller stopped");
}

// ── PollHandle ───────────────────────────────────────────────────────

/// Scoped ownership of a running poller. Dropping it cancels the task.
pub struct PollHandle<S: MetricSource> {
    cycle: Arc<PollCycle<S>>,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl<S: MetricSource> PollHandle<S> {
    pub fn source(&self) -> &S {
        &self.cycle.source
    }

    /// Run one out-of-band attempt and wait for it.
    pub async fn refresh(&self) -> Outcome {
        Refresh::refresh(&self.refresher()).await
    }

    /// A cloneable trigger for out-of-band refreshes.
    pub fn refresher(&self) -> Refresher<S> {
        Refresher {
            cycle: Arc::clone(&self.cycle),
            cancel: self.cancel.clone(),
        }
    }

    /// Cancel the poller and wait for its task to exit.
    pub async fn stop(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl<S: MetricSource> Drop for PollHandle<S> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Something that can run one out-of-band refresh.
pub trait Refresh: Clone + Send + Sync + 'static {
    fn refresh(&self) -> impl Future<Output = Outcome> + Send;
}

/// Placeholder for callers with no page to refresh (the CLI).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRefresh;

impl Refresh for NoRefresh {
    async fn refresh(&self) -> Outcome {
        Outcome::Unchanged
    }
}

/// Out-of-band refresh trigger that goes inert once its poller stops.
pub struct Refresher<S: MetricSource> {
    cycle: Arc<PollCycle<S>>,
    cancel: CancellationToken,
}

impl<S: MetricSource> Clone for Refresher<S> {
    fn clone(&self) -> Self {
        Self {
            cycle: Arc::clone(&self.cycle),
            cancel: self.cancel.clone(),
        }
    }
}

impl<S: MetricSource> Refresh for Refresher<S> {
    async fn refresh(&self) -> Outcome {
        if self.cancel.is_cancelled() {
            return Outcome::Cancelled;
        }
        tokio::select! {
            biased;
            () = self.cancel.cancelled() => Outcome::Cancelled,
            outcome = self.cycle.tick() => outcome,
        }
    }
}
