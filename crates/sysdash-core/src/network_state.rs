// ── Shared network state ──
//
// Speed test progress and results, shared by the Battery and Network
// pages. Owned by the application root and handed to both by reference.

use std::sync::Arc;

use serde::Serialize;
use sysdash_api::SpeedTestResult;
use tokio::sync::watch;

use crate::error::CoreError;

/// Where a speed test run currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, strum::Display)]
pub enum SpeedTestPhase {
    #[default]
    Idle,
    Preparing,
    Testing,
    Refreshing,
    Complete,
    Failed,
}

/// Coarse speed test state: `Idle -> Running -> Completed | Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
pub enum SpeedTestStatus {
    Idle,
    Running,
    Completed,
    Failed,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NetworkState {
    pub speed_test_completed: bool,
    pub speed_test_data: Option<SpeedTestResult>,
    pub is_running_speed_test: bool,
    /// 0..=100
    pub scan_progress: u8,
    pub current_phase: SpeedTestPhase,
    pub error: Option<String>,
    /// A post-test refresh has landed, so I/O counters reflect the test.
    pub data_ready: bool,
}

impl NetworkState {
    pub fn status(&self) -> SpeedTestStatus {
        if self.is_running_speed_test {
            SpeedTestStatus::Running
        } else if self.current_phase == SpeedTestPhase::Failed {
            SpeedTestStatus::Failed
        } else if self.speed_test_completed {
            SpeedTestStatus::Completed
        } else {
            SpeedTestStatus::Idle
        }
    }
}

/// Single owner of [`NetworkState`]. Cheap to clone.
#[derive(Debug, Clone)]
pub struct NetworkStateStore {
    tx: Arc<watch::Sender<NetworkState>>,
}

impl Default for NetworkStateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl NetworkStateStore {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(NetworkState::default());
        Self { tx: Arc::new(tx) }
    }

    pub fn snapshot(&self) -> NetworkState {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<NetworkState> {
        self.tx.subscribe()
    }

    // ── Transitions ──────────────────────────────────────────────────

    /// Enter `Running`. Rejected while a test is already running.
    pub(crate) fn begin_speed_test(&self) -> Result<(), CoreError> {
        let mut started = false;
        self.tx.send_if_modified(|s| {
            if s.is_running_speed_test {
                return false;
            }
            s.is_running_speed_test = true;
            s.speed_test_data = None;
            s.error = None;
            s.data_ready = false;
            s.scan_progress = 0;
            s.current_phase = SpeedTestPhase::Preparing;
            started = true;
            true
        });
        if started {
            Ok(())
        } else {
            Err(CoreError::SpeedTestInProgress)
        }
    }

    pub(crate) fn set_phase(&self, phase: SpeedTestPhase, progress: u8) {
        self.tx.send_modify(|s| {
            s.current_phase = phase;
            s.scan_progress = progress.min(100);
        });
    }

    pub(crate) fn store_result(&self, result: SpeedTestResult) {
        self.tx.send_modify(|s| s.speed_test_data = Some(result));
    }

    pub(crate) fn complete(&self, data_ready: bool) {
        self.tx.send_modify(|s| {
            s.speed_test_completed = true;
            s.data_ready |= data_ready;
            s.current_phase = SpeedTestPhase::Complete;
            s.scan_progress = 100;
        });
    }

    pub(crate) fn mark_data_ready(&self) {
        self.tx.send_if_modified(|s| {
            let changed = !s.data_ready;
            s.data_ready = true;
            changed
        });
    }

    /// Record a failed run. `speed_test_completed` is left as it was.
    pub(crate) fn fail(&self, message: String) {
        self.tx.send_modify(|s| {
            s.speed_test_data = None;
            s.error = Some(message);
            s.current_phase = SpeedTestPhase::Failed;
        });
    }

    /// Leave `Running`; always called on exit.
    pub(crate) fn finish(&self) {
        self.tx.send_modify(|s| s.is_running_speed_test = false);
    }
}
