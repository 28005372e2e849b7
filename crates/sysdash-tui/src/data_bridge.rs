//! Data bridge: forwards monitor `watch` channels into the action loop.
//!
//! Each mounted page gets its own set of bridge tasks under one
//! cancellation token; app-level state (speed test, power plan) is
//! bridged once for the lifetime of the app.

use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use sysdash_core::{
    ActionDispatcher, BatteryMonitor, HomeMonitor, MonitorClient, NetworkMonitor,
};

use crate::action::Action;

/// Send the current value, then every change, until cancelled or either
/// side closes.
pub async fn forward<T, F>(
    mut rx: watch::Receiver<T>,
    tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
    map: F,
) where
    T: Clone + Send + Sync,
    F: Fn(T) -> Action,
{
    let initial = rx.borrow_and_update().clone();
    if tx.send(map(initial)).is_err() {
        return;
    }

    loop {
        tokio::select! {
            biased;

            () = cancel.cancelled() => break,

            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let value = rx.borrow_and_update().clone();
                if tx.send(map(value)).is_err() {
                    break;
                }
            }
        }
    }
}

fn spawn_forward<T, F>(
    rx: watch::Receiver<T>,
    tx: &mpsc::UnboundedSender<Action>,
    cancel: &CancellationToken,
    map: F,
) where
    T: Clone + Send + Sync + 'static,
    F: Fn(T) -> Action + Send + 'static,
{
    tokio::spawn(forward(rx, tx.clone(), cancel.clone(), map));
}

// ── Per-page bridges ─────────────────────────────────────────────────

pub fn bridge_home(
    monitor: &HomeMonitor<MonitorClient>,
    tx: &mpsc::UnboundedSender<Action>,
    cancel: &CancellationToken,
) {
    spawn_forward(monitor.subscribe_usage(), tx, cancel, Action::UsageUpdated);
    spawn_forward(
        monitor.subscribe_temperature(),
        tx,
        cancel,
        Action::TemperatureUpdated,
    );
    debug!("home bridge started");
}

pub fn bridge_battery(
    monitor: &BatteryMonitor<MonitorClient>,
    tx: &mpsc::UnboundedSender<Action>,
    cancel: &CancellationToken,
) {
    spawn_forward(monitor.subscribe_battery(), tx, cancel, Action::BatteryUpdated);
    spawn_forward(
        monitor.subscribe_gaming_mode(),
        tx,
        cancel,
        Action::GamingModeUpdated,
    );
    debug!("battery bridge started");
}

pub fn bridge_network(
    monitor: &NetworkMonitor<MonitorClient>,
    tx: &mpsc::UnboundedSender<Action>,
    cancel: &CancellationToken,
) {
    spawn_forward(monitor.subscribe_overview(), tx, cancel, |state| {
        Action::NetworkUpdated(Box::new(state))
    });
    spawn_forward(
        monitor.subscribe_bandwidth(),
        tx,
        cancel,
        Action::BandwidthUpdated,
    );
    debug!("network bridge started");
}

// ── App-level bridges ────────────────────────────────────────────────

pub fn bridge_shared(
    dispatcher: &ActionDispatcher<MonitorClient>,
    tx: &mpsc::UnboundedSender<Action>,
    cancel: &CancellationToken,
) {
    spawn_forward(
        dispatcher.network_state().subscribe(),
        tx,
        cancel,
        |state| Action::NetworkStateUpdated(Box::new(state)),
    );
    spawn_forward(
        dispatcher.subscribe_power_plan(),
        tx,
        cancel,
        Action::PowerPlanUpdated,
    );
}
