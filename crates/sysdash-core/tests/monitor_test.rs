#![allow(clippy::unwrap_used)]

mod common;

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use common::{FakeBackend, Reply, battery, overview, settle, usage};
use pretty_assertions::assert_eq;
use sysdash_api::{BandwidthDataPoint, GamingModeStatus, TimeRange};
use sysdash_core::{
    BatteryMonitor, HomeMonitor, NETWORK_FETCH_ERROR, NetworkMonitor, Outcome, PollingConfig,
    Source,
};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

// ── Home ────────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn usage_falls_back_then_goes_live_on_next_tick() {
    let backend = Arc::new(FakeBackend::default());
    backend
        .usage
        .set(vec![Reply::Status(500), Reply::Ok(usage(42.0, 61.0, 48.0))]);

    let home = HomeMonitor::mount(&backend, &PollingConfig::default());
    settle().await;

    let mocked = home.usage();
    assert_eq!(mocked.snapshot.source, Source::Mock);
    assert!(mocked.poll.using_mock);
    assert!(mocked.poll.last_updated.is_none());
    assert!((0.0..=100.0).contains(&mocked.value().cpu));
    assert!((50.0..=80.0).contains(&mocked.value().memory));
    assert!((40.0..=60.0).contains(&mocked.value().disk));

    tokio::time::sleep(ms(1_999)).await;
    settle().await;
    assert_eq!(home.usage().snapshot.source, Source::Mock);

    tokio::time::sleep(ms(1)).await;
    settle().await;
    let live = home.usage();
    assert_eq!(live.snapshot.source, Source::Live);
    assert!((live.value().cpu - 42.0).abs() < f64::EPSILON);
    assert!((live.value().memory - 61.0).abs() < f64::EPSILON);
    // No GPU endpoint: the last GPU value carries over.
    assert!((live.value().gpu - mocked.value().gpu).abs() < f64::EPSILON);
    assert!(!live.poll.using_mock);
    assert!(live.poll.last_updated.is_some());

    home.unmount().await;
}

#[tokio::test(start_paused = true)]
async fn unmount_stops_all_home_fetches() {
    let backend = Arc::new(FakeBackend::default());
    backend.usage.set(vec![Reply::Ok(usage(10.0, 60.0, 50.0))]);
    backend.temperature.set(vec![Reply::Ok(Some(55.0))]);

    let home = HomeMonitor::mount(&backend, &PollingConfig::default());
    settle().await;
    tokio::time::sleep(ms(4_000)).await;
    settle().await;
    let usage_calls = backend.count("usage");
    let temperature_calls = backend.count("temperature");
    assert_eq!(usage_calls, 3);

    home.unmount().await;
    tokio::time::sleep(Duration::from_secs(20)).await;
    settle().await;

    assert_eq!(backend.count("usage"), usage_calls);
    assert_eq!(backend.count("temperature"), temperature_calls);
}

#[tokio::test(start_paused = true)]
async fn stalled_temperature_request_latches_into_mock_mode() {
    let backend = Arc::new(FakeBackend {
        temperature_delay: Duration::from_secs(3),
        ..FakeBackend::default()
    });
    backend.temperature.set(vec![Reply::Ok(Some(70.0))]);
    let polling = PollingConfig {
        temperature_interval: Duration::from_secs(10),
        ..PollingConfig::default()
    };

    let home = HomeMonitor::mount(&backend, &polling);
    settle().await;
    assert_eq!(home.temperature().snapshot.source, Source::Default);

    // First request times out at 2s, the retry at 4s.
    tokio::time::sleep(ms(4_001)).await;
    settle().await;
    let state = home.temperature();
    assert_eq!(state.snapshot.source, Source::Mock);
    assert!((45.0..=74.0).contains(state.value()));
    assert_eq!(backend.count("temperature"), 2);

    // Later ticks produce mock values without touching the backend.
    tokio::time::sleep(Duration::from_secs(30)).await;
    settle().await;
    assert_eq!(backend.count("temperature"), 2);
    assert!(home.temperature().poll.using_mock);

    home.unmount().await;
}

#[tokio::test(start_paused = true)]
async fn temperature_without_reading_keeps_default() {
    let backend = Arc::new(FakeBackend::default());
    backend.temperature.set(vec![Reply::Ok(None)]);

    let home = HomeMonitor::mount(&backend, &PollingConfig::default());
    settle().await;

    let state = home.temperature();
    assert_eq!(state.snapshot.source, Source::Default);
    assert!((state.value() - 50.0).abs() < f64::EPSILON);
    assert!(!state.poll.using_mock);

    home.unmount().await;
}

// ── Battery ─────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn battery_failure_keeps_last_reading_without_mock_flag() {
    let backend = Arc::new(FakeBackend::default());
    backend
        .battery
        .set(vec![Reply::Ok(battery(80.0, true)), Reply::Status(500)]);
    backend.gaming.set(vec![Reply::Ok(GamingModeStatus { gaming_mode: true })]);

    let page = BatteryMonitor::mount(&backend, &PollingConfig::default());
    settle().await;
    assert!((page.battery().value().level - 80.0).abs() < f64::EPSILON);
    assert!(page.gaming_mode());

    tokio::time::sleep(Duration::from_secs(2)).await;
    settle().await;
    let state = page.battery();
    assert_eq!(backend.count("battery"), 2);
    assert!((state.value().level - 80.0).abs() < f64::EPSILON);
    assert!(state.value().is_charging);
    assert!(!state.poll.using_mock);
    assert!(state.poll.error.is_none());
    assert_eq!(state.value().power_history.len(), 1);

    page.unmount().await;
}

#[tokio::test(start_paused = true)]
async fn gaming_mode_polls_on_its_own_cadence() {
    let backend = Arc::new(FakeBackend::default());
    backend.battery.set(vec![Reply::Ok(battery(50.0, false))]);
    backend.gaming.set(vec![Reply::Ok(GamingModeStatus { gaming_mode: false })]);

    let page = BatteryMonitor::mount(&backend, &PollingConfig::default());
    settle().await;
    tokio::time::sleep(ms(5_000)).await;
    settle().await;

    assert_eq!(backend.call_times("gaming"), vec![ms(0), ms(5_000)]);
    assert_eq!(backend.count("battery"), 3);

    page.unmount().await;
}

// ── One-shot samples ────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn home_sample_applies_mock_policy_once() {
    let backend = Arc::new(FakeBackend::default());
    backend.usage.set(vec![Reply::Ok(usage(12.0, 70.0, 44.0))]);

    let (usage, temperature) = HomeMonitor::sample(&backend, &PollingConfig::default()).await;

    assert_eq!(usage.snapshot.source, Source::Live);
    assert!((usage.value().cpu - 12.0).abs() < f64::EPSILON);
    assert_eq!(backend.count("usage"), 1);

    // Failed request plus the single retry, then mock values.
    assert_eq!(temperature.snapshot.source, Source::Mock);
    assert!(temperature.poll.using_mock);
    assert!((45.0..=74.0).contains(temperature.value()));
    assert_eq!(backend.count("temperature"), 2);
}

#[tokio::test(start_paused = true)]
async fn battery_sample_keeps_defaults_on_failure() {
    let backend = Arc::new(FakeBackend::default());
    backend.gaming.set(vec![Reply::Ok(GamingModeStatus { gaming_mode: true })]);

    let (status, gaming) = BatteryMonitor::sample(&backend).await;

    assert_eq!(status.snapshot.source, Source::Default);
    assert!(status.poll.last_updated.is_none());
    assert!(*gaming.value());
    assert_eq!(backend.count("battery"), 1);
}

// ── Network ─────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn network_failure_surfaces_error_until_retry() {
    let backend = Arc::new(FakeBackend::default());
    backend.overview.set(vec![
        Reply::Status(503),
        Reply::Ok(overview("Wi-Fi", "2026-01-02T03:04:05Z")),
    ]);

    let network = NetworkMonitor::mount(&backend, &PollingConfig::default());
    settle().await;
    let state = network.overview();
    assert_eq!(state.poll.error.as_deref(), Some(NETWORK_FETCH_ERROR));
    assert_eq!(state.value().network_data.connection_type, "Unknown");

    assert_eq!(network.refresh().await, Outcome::Updated);
    let state = network.overview();
    assert!(state.poll.error.is_none());
    assert_eq!(state.value().network_data.connection_type, "Wi-Fi");
    let reported: DateTime<Utc> = "2026-01-02T03:04:05Z".parse().unwrap();
    assert_eq!(state.poll.last_updated, Some(reported));

    drop(network.unmount().await);
}

#[tokio::test(start_paused = true)]
async fn time_range_change_fetches_once_with_new_window() {
    let backend = Arc::new(FakeBackend::default());
    backend.overview.set(vec![Reply::Ok(overview("Ethernet", "bogus"))]);
    backend.bandwidth.set(vec![Reply::Ok(vec![BandwidthDataPoint {
        timestamp: "12:00".into(),
        download: 5.0,
        upload: 1.0,
    }])]);

    let network = NetworkMonitor::mount(&backend, &PollingConfig::default());
    settle().await;
    assert_eq!(network.time_range(), TimeRange::FiveMinutes);

    network.set_time_range(TimeRange::OneHour);
    settle().await;
    network.set_time_range(TimeRange::OneHour);
    settle().await;

    let ranges: Vec<String> = backend
        .calls("bandwidth")
        .into_iter()
        .map(|c| c.detail)
        .collect();
    assert_eq!(ranges, vec!["5min".to_owned(), "1hour".to_owned()]);
    assert_eq!(network.time_range(), TimeRange::OneHour);
    assert_eq!(network.bandwidth_points().len(), 1);
    // Unparseable server timestamps fall back to local time.
    assert!(network.overview().poll.last_updated.is_some());

    drop(network.unmount().await);
}

#[tokio::test(start_paused = true)]
async fn bandwidth_falls_back_to_overview_history() {
    let backend = Arc::new(FakeBackend::default());
    let mut snapshot = overview("Wi-Fi", "2026-01-02T03:04:05Z");
    snapshot.bandwidth_history = vec![
        BandwidthDataPoint {
            timestamp: "a".into(),
            download: 1.0,
            upload: 1.0,
        },
        BandwidthDataPoint {
            timestamp: "b".into(),
            download: 2.0,
            upload: 1.0,
        },
    ];
    backend.overview.set(vec![Reply::Ok(snapshot)]);
    backend.bandwidth.set(vec![Reply::Status(500)]);

    let network = NetworkMonitor::mount(&backend, &PollingConfig::default());
    settle().await;

    assert_eq!(network.bandwidth_points().len(), 2);

    drop(network.unmount().await);
}

#[tokio::test(start_paused = true)]
async fn network_unmount_stops_polling_and_clears_history() {
    let backend = Arc::new(FakeBackend::default());
    backend.overview.set(vec![Reply::Ok(overview("Wi-Fi", "bogus"))]);
    backend.clear_history.set(vec![Reply::Ok(())]);

    let network = NetworkMonitor::mount(&backend, &PollingConfig::default());
    settle().await;
    let refresher = network.refresher();

    network.unmount().await.await.unwrap();

    assert_eq!(backend.count("clear_history"), 1);
    assert_eq!(
        sysdash_core::Refresh::refresh(&refresher).await,
        Outcome::Cancelled
    );
    tokio::time::sleep(Duration::from_secs(120)).await;
    settle().await;
    assert_eq!(backend.count("overview"), 1);
}

#[tokio::test(start_paused = true)]
async fn clear_history_failure_is_swallowed() {
    let backend = Arc::new(FakeBackend::default());
    backend.clear_history.set(vec![Reply::Status(500)]);

    let network = NetworkMonitor::mount(&backend, &PollingConfig::default());
    settle().await;

    assert!(network.unmount().await.await.is_ok());
    assert_eq!(backend.count("clear_history"), 1);
}
