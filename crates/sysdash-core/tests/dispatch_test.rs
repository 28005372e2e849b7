#![allow(clippy::unwrap_used)]

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{FakeBackend, Reply, overview, settle, speed_result};
use pretty_assertions::assert_eq;
use sysdash_api::{PowerPlan, PowerPlanAck};
use sysdash_core::{
    ActionDispatcher, CoreError, NetworkMonitor, NetworkStateStore, NoRefresh,
    POWER_PLAN_PLACEHOLDER, PollingConfig, SPEED_TEST_FAILED, SpeedTestPhase, SpeedTestStatus,
};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn dispatcher(backend: &Arc<FakeBackend>) -> ActionDispatcher<FakeBackend> {
    ActionDispatcher::new(Arc::clone(backend), NetworkStateStore::new())
}

// ── Speed test ──────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn speed_test_success_refreshes_page_three_times() {
    let backend = Arc::new(FakeBackend::default());
    backend.overview.set(vec![Reply::Ok(overview("Wi-Fi", "bogus"))]);
    backend.speed_test.set(vec![Reply::Ok(speed_result(94.2))]);
    let actions = dispatcher(&backend);
    // The Battery page reads the same store.
    let battery_view = actions.network_state().subscribe();

    let network = NetworkMonitor::mount(&backend, &PollingConfig::default());
    settle().await;

    let result = actions.run_speed_test(&network.refresher()).await.unwrap();
    assert!((result.download - 94.2).abs() < f64::EPSILON);

    let state = battery_view.borrow().clone();
    assert!(state.speed_test_completed);
    assert!(!state.is_running_speed_test);
    assert!(state.data_ready);
    assert_eq!(state.current_phase, SpeedTestPhase::Complete);
    assert_eq!(state.scan_progress, 100);
    assert_eq!(state.status(), SpeedTestStatus::Completed);
    assert_eq!(state.speed_test_data, Some(speed_result(94.2)));
    assert_eq!(backend.call_times("speed_test"), vec![ms(500)]);

    tokio::time::sleep(ms(3_000)).await;
    settle().await;
    assert_eq!(
        backend.call_times("overview"),
        vec![ms(0), ms(500), ms(1_500), ms(3_500)]
    );

    drop(network.unmount().await);
}

#[tokio::test(start_paused = true)]
async fn embedded_backend_error_fails_the_run() {
    let backend = Arc::new(FakeBackend::default());
    backend.overview.set(vec![Reply::Ok(overview("Wi-Fi", "bogus"))]);
    backend
        .speed_test
        .set(vec![Reply::Backend("Speedtest servers unavailable")]);
    let actions = dispatcher(&backend);

    let network = NetworkMonitor::mount(&backend, &PollingConfig::default());
    settle().await;

    let err = actions.run_speed_test(&network.refresher()).await.unwrap_err();
    assert!(matches!(err, CoreError::Backend { .. }));

    let state = actions.network_state().snapshot();
    assert!(!state.speed_test_completed);
    assert!(!state.is_running_speed_test);
    assert!(state.speed_test_data.is_none());
    assert_eq!(state.error.as_deref(), Some("Speedtest servers unavailable"));
    assert_eq!(state.status(), SpeedTestStatus::Failed);

    // No page refreshes follow a failed run.
    tokio::time::sleep(Duration::from_secs(5)).await;
    settle().await;
    assert_eq!(backend.count("overview"), 1);

    drop(network.unmount().await);
}

#[tokio::test(start_paused = true)]
async fn transport_failure_uses_generic_message() {
    let backend = Arc::new(FakeBackend::default());
    backend.speed_test.set(vec![Reply::Status(500)]);
    let actions = dispatcher(&backend);

    assert!(actions.run_speed_test(&NoRefresh).await.is_err());
    let state = actions.network_state().snapshot();
    assert_eq!(state.error.as_deref(), Some(SPEED_TEST_FAILED));
    assert!(!state.is_running_speed_test);
}

#[tokio::test(start_paused = true)]
async fn failure_keeps_earlier_completion() {
    let backend = Arc::new(FakeBackend::default());
    backend.speed_test.set(vec![
        Reply::Ok(speed_result(50.0)),
        Reply::Backend("boom"),
    ]);
    let actions = dispatcher(&backend);

    actions.run_speed_test(&NoRefresh).await.unwrap();
    assert!(actions.network_state().snapshot().speed_test_completed);

    actions.run_speed_test(&NoRefresh).await.unwrap_err();
    let state = actions.network_state().snapshot();
    assert!(state.speed_test_completed);
    assert!(state.speed_test_data.is_none());
    assert_eq!(state.error.as_deref(), Some("boom"));
}

#[tokio::test(start_paused = true)]
async fn second_start_while_running_is_rejected() {
    let backend = Arc::new(FakeBackend {
        speed_test_delay: Duration::from_secs(10),
        ..FakeBackend::default()
    });
    backend.speed_test.set(vec![Reply::Ok(speed_result(10.0))]);
    let actions = dispatcher(&backend);

    let running = {
        let actions = actions.clone();
        tokio::spawn(async move { actions.run_speed_test(&NoRefresh).await })
    };
    settle().await;
    assert_eq!(
        actions.network_state().snapshot().status(),
        SpeedTestStatus::Running
    );

    let second = actions.run_speed_test(&NoRefresh).await;
    assert!(matches!(second, Err(CoreError::SpeedTestInProgress)));

    assert!(running.await.unwrap().is_ok());
    assert_eq!(backend.count("speed_test"), 1);
    assert!(!actions.network_state().snapshot().is_running_speed_test);
}

#[tokio::test(start_paused = true)]
async fn abandoned_run_clears_running_flag() {
    let backend = Arc::new(FakeBackend {
        speed_test_delay: Duration::from_secs(60),
        ..FakeBackend::default()
    });
    backend.speed_test.set(vec![Reply::Ok(speed_result(10.0))]);
    let actions = dispatcher(&backend);

    let running = {
        let actions = actions.clone();
        tokio::spawn(async move { actions.run_speed_test(&NoRefresh).await })
    };
    settle().await;
    assert!(actions.network_state().snapshot().is_running_speed_test);

    running.abort();
    let _ = running.await;
    assert!(!actions.network_state().snapshot().is_running_speed_test);
}

// ── Power plan ──────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn power_plan_label_changes_before_request_settles() {
    let backend = Arc::new(FakeBackend {
        power_plan_delay: Duration::from_secs(10),
        ..FakeBackend::default()
    });
    backend.power_plan.set(vec![Reply::Status(500)]);
    let actions = dispatcher(&backend);
    assert_eq!(actions.power_plan_label(), POWER_PLAN_PLACEHOLDER);

    let request = actions.spawn_set_power_plan(PowerPlan::PowerSaver);
    assert_eq!(actions.power_plan_label(), "Power Saver");

    assert!(request.await.unwrap().is_err());
    assert_eq!(actions.selected_power_plan(), Some(PowerPlan::PowerSaver));
    let sent: Vec<String> = backend
        .calls("power_plan")
        .into_iter()
        .map(|c| c.detail)
        .collect();
    assert_eq!(sent, vec!["Power Saver".to_owned()]);
}

#[tokio::test(start_paused = true)]
async fn power_plan_returns_backend_ack() {
    let backend = Arc::new(FakeBackend::default());
    backend.power_plan.set(vec![Reply::Ok(PowerPlanAck {
        message: Some("Power plan set to Balanced".into()),
    })]);
    let actions = dispatcher(&backend);

    let ack = actions.set_power_plan(PowerPlan::Balanced).await.unwrap();
    assert_eq!(ack.message.as_deref(), Some("Power plan set to Balanced"));
    assert_eq!(actions.power_plan_label(), "Balanced");
}

#[tokio::test(start_paused = true)]
async fn failed_power_plan_keeps_selection() {
    let backend = Arc::new(FakeBackend::default());
    backend.power_plan.set(vec![Reply::Backend("Access denied")]);
    let actions = dispatcher(&backend);

    let err = actions
        .set_power_plan(PowerPlan::HighPerformance)
        .await
        .unwrap_err();
    assert_eq!(err.backend_message(), Some("Access denied"));
    assert_eq!(actions.power_plan_label(), "High Performance");
}

#[tokio::test(start_paused = true)]
async fn dispatcher_clear_history_fires_request() {
    let backend = Arc::new(FakeBackend::default());
    backend.clear_history.set(vec![Reply::Ok(())]);
    let actions = dispatcher(&backend);

    actions.clear_history().await.unwrap();
    assert_eq!(backend.count("clear_history"), 1);
}
