// ── Action dispatcher ──
//
// User-initiated one-shot requests: power plan changes, speed tests and
// the clear-history request fired when the Network page unmounts.

use std::sync::Arc;
use std::time::Duration;

use sysdash_api::{MonitorClient, PowerPlan, PowerPlanAck, SpeedTestResult};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::backend::Backend;
use crate::error::CoreError;
use crate::network_state::{NetworkStateStore, SpeedTestPhase};
use crate::poll::{Outcome, Refresh};

/// Power plan label before the user picks one.
pub const POWER_PLAN_PLACEHOLDER: &str = "Select Power Mode";

/// Minimum time the speed test spinner is shown before the request goes out.
pub const SPEED_TEST_MIN_DELAY: Duration = Duration::from_millis(500);

/// Extra page refreshes after a successful speed test, so I/O counters
/// catch up with the traffic the test generated.
pub const SPEED_TEST_FOLLOW_UPS: [Duration; 2] =
    [Duration::from_millis(1_000), Duration::from_millis(3_000)];

/// Speed test error shown when the backend gave no message of its own.
pub const SPEED_TEST_FAILED: &str = "Failed to run speed test.";

/// Owner of action state shared across pages. Cheap to clone.
pub struct ActionDispatcher<B: Backend = MonitorClient> {
    backend: Arc<B>,
    network: NetworkStateStore,
    power_plan: Arc<watch::Sender<Option<PowerPlan>>>,
}

impl<B: Backend> Clone for ActionDispatcher<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            network: self.network.clone(),
            power_plan: Arc::clone(&self.power_plan),
        }
    }
}

impl<B: Backend> ActionDispatcher<B> {
    pub fn new(backend: Arc<B>, network: NetworkStateStore) -> Self {
        let (power_plan, _) = watch::channel(None);
        Self {
            backend,
            network,
            power_plan: Arc::new(power_plan),
        }
    }

    pub fn network_state(&self) -> &NetworkStateStore {
        &self.network
    }

    // ── Power plan ───────────────────────────────────────────────────

    pub fn selected_power_plan(&self) -> Option<PowerPlan> {
        *self.power_plan.borrow()
    }

    /// Dropdown label: the last selection, or the placeholder.
    pub fn power_plan_label(&self) -> String {
        self.selected_power_plan()
            .map_or_else(|| POWER_PLAN_PLACEHOLDER.to_owned(), |p| p.to_string())
    }

    pub fn subscribe_power_plan(&self) -> watch::Receiver<Option<PowerPlan>> {
        self.power_plan.subscribe()
    }

    /// Select `plan` and send it to the backend.
    ///
    /// The selection updates before the request is sent and stays put
    /// whatever the outcome.
    pub async fn set_power_plan(&self, plan: PowerPlan) -> Result<PowerPlanAck, CoreError> {
        self.power_plan.send_replace(Some(plan));

        match self.backend.set_power_plan(plan).await {
            Ok(ack) => {
                info!(
                    %plan,
                    message = ack.message.as_deref().unwrap_or_default(),
                    "power plan applied"
                );
                Ok(ack)
            }
            Err(e) => {
                let err = CoreError::from(e);
                warn!(%plan, error = %err, "power plan change failed");
                Err(err)
            }
        }
    }

    /// Background variant for interactive use. The selection has already
    /// changed when this returns.
    pub fn spawn_set_power_plan(
        &self,
        plan: PowerPlan,
    ) -> JoinHandle<Result<PowerPlanAck, CoreError>> {
        self.power_plan.send_replace(Some(plan));
        let dispatcher = self.clone();
        tokio::spawn(async move { dispatcher.set_power_plan(plan).await })
    }

    // ── Speed test ───────────────────────────────────────────────────

    /// Run one speed test, publishing progress to the shared network state.
    ///
    /// On success the result is stored, `refresher` is awaited once, the
    /// test is marked completed and two follow-up refreshes are scheduled.
    /// On failure the error is recorded and `speed_test_completed` is left
    /// as it was. The running flag is always cleared on exit.
    pub async fn run_speed_test<R: Refresh>(
        &self,
        refresher: &R,
    ) -> Result<SpeedTestResult, CoreError> {
        self.network.begin_speed_test()?;
        let _running = RunningGuard(&self.network);

        tokio::time::sleep(SPEED_TEST_MIN_DELAY).await;
        self.network.set_phase(SpeedTestPhase::Testing, 30);

        match self.backend.speed_test().await {
            Ok(result) => {
                info!(
                    download = result.download,
                    upload = result.upload,
                    ping = result.ping,
                    "speed test complete"
                );
                self.network.store_result(result.clone());
                self.network.set_phase(SpeedTestPhase::Refreshing, 80);

                let refreshed = refresher.refresh().await == Outcome::Updated;
                self.network.complete(refreshed);
                self.schedule_follow_ups(refresher);
                Ok(result)
            }
            Err(e) => {
                let err = CoreError::from(e);
                let message = err
                    .backend_message()
                    .map_or_else(|| SPEED_TEST_FAILED.to_owned(), str::to_owned);
                warn!(error = %err, "speed test failed");
                self.network.fail(message);
                Err(err)
            }
        }
    }

    fn schedule_follow_ups<R: Refresh>(&self, refresher: &R) {
        for delay in SPEED_TEST_FOLLOW_UPS {
            let refresher = refresher.clone();
            let network = self.network.clone();
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                if refresher.refresh().await == Outcome::Updated {
                    network.mark_data_ready();
                }
            });
        }
    }

    // ── History ──────────────────────────────────────────────────────

    /// Fire-and-forget clear-history request.
    pub fn clear_history(&self) -> JoinHandle<()> {
        spawn_clear_history(Arc::clone(&self.backend))
    }
}

/// Clears the running flag however the speed test future ends.
struct RunningGuard<'a>(&'a NetworkStateStore);

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        self.0.finish();
    }
}

/// Failures are logged, never surfaced or retried.
pub(crate) fn spawn_clear_history<B: Backend>(backend: Arc<B>) -> JoinHandle<()> {
    tokio::spawn(async move {
        match backend.clear_history().await {
            Ok(()) => debug!("network history cleared"),
            Err(e) => warn!(error = %e, "error clearing history"),
        }
    })
}
