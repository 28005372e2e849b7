// ── Polling lifecycle ──
//
// Snapshot and poll-state types shared by every data source, plus the
// generic `Poller` that drives a `MetricSource` on a fixed interval.

mod poller;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::staleness::Staleness;

pub use poller::{MetricSource, NoRefresh, Outcome, PollHandle, Poller, Refresh, Refresher};

/// Where the currently displayed value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Source {
    /// Initial default, before the first poll resolves.
    #[default]
    Default,
    Live,
    Mock,
}

/// The full current value-set of one metric group, replaced wholesale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot<T> {
    pub value: T,
    pub source: Source,
}

impl<T> Snapshot<T> {
    pub fn initial(value: T) -> Self {
        Self {
            value,
            source: Source::Default,
        }
    }

    pub fn live(value: T) -> Self {
        Self {
            value,
            source: Source::Live,
        }
    }

    pub fn mock(value: T) -> Self {
        Self {
            value,
            source: Source::Mock,
        }
    }
}

/// What a source does when a poll fails.
///
/// Chosen per source and never unified across pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum FailurePolicy {
    /// Substitute fallback values and flag `using_mock`.
    Mock,
    /// Like `Mock`, but after the first failure the backend is retried
    /// once; if that also fails, later ticks only produce fallback values.
    MockLatched,
    /// Keep the last values and publish a user-facing error.
    SurfaceError,
    /// Keep the last values; the failure is only logged.
    LogOnly,
}

/// Request bookkeeping for one source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PollState {
    /// Set only on genuine success.
    pub last_updated: Option<DateTime<Utc>>,
    pub is_loading: bool,
    /// Set only by `SurfaceError` sources; cleared on success.
    pub error: Option<String>,
    /// Set on any fallback; cleared on success.
    pub using_mock: bool,
}

impl PollState {
    pub fn staleness(&self) -> Staleness {
        Staleness::new(self.last_updated)
    }
}

/// Snapshot plus poll state, published on one `watch` channel per source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricState<T> {
    pub snapshot: Snapshot<T>,
    pub poll: PollState,
}

impl<T> MetricState<T> {
    pub fn new(initial: T) -> Self {
        Self {
            snapshot: Snapshot::initial(initial),
            poll: PollState::default(),
        }
    }

    pub fn value(&self) -> &T {
        &self.snapshot.value
    }
}

impl<T: Default> Default for MetricState<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
