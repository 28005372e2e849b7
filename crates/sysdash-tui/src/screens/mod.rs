//! Screen components, one per [`ScreenId`].

pub mod battery;
pub mod get_started;
pub mod home;
pub mod network;

use crate::component::Component;
use crate::screen::ScreenId;

/// Every screen, keyed by id. The splash is included but rendered
/// full-frame by the app.
pub fn create_screens() -> Vec<(ScreenId, Box<dyn Component>)> {
    vec![
        (
            ScreenId::GetStarted,
            Box::new(get_started::GetStartedScreen::new()),
        ),
        (ScreenId::Home, Box::new(home::HomeScreen::new())),
        (ScreenId::Battery, Box::new(battery::BatteryScreen::new())),
        (ScreenId::Network, Box::new(network::NetworkScreen::new())),
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend};

    use sysdash_core::{MetricState, NetworkOverview, NetworkState, SpeedTestPhase};

    use super::*;
    use crate::action::Action;

    fn draw(screen: &dyn Component) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal
            .draw(|frame| screen.render(frame, frame.area()))
            .unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(usize::from(buffer.area.width))
            .map(|row| row.iter().map(ratatui::buffer::Cell::symbol).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn every_screen_renders_its_defaults() {
        for (id, screen) in create_screens() {
            let text = draw(screen.as_ref());
            assert!(!text.trim().is_empty(), "{id} rendered nothing");
        }
    }

    #[test]
    fn home_shows_never_before_first_update() {
        let text = draw(&home::HomeScreen::new());
        assert!(text.contains("System Usage"));
        assert!(text.contains("updated Never"));
        assert!(text.contains("AMD Ryzen 7 5800X"));
    }

    #[test]
    fn home_flags_mock_temperature() {
        let mut screen = home::HomeScreen::new();
        let mut temperature = MetricState::new(61.0);
        temperature.snapshot.source = sysdash_core::Source::Mock;
        temperature.poll.using_mock = true;
        screen
            .update(&Action::TemperatureUpdated(temperature))
            .unwrap();

        let text = draw(&screen);
        assert!(text.contains("[MOCK]"));
        assert!(text.contains("61°C"));
        // GPU reading is derived from the CPU reading.
        assert!(text.contains("54°C"));
    }

    #[test]
    fn battery_shows_placeholder_plan_and_status_line() {
        let text = draw(&battery::BatteryScreen::new());
        assert!(text.contains("Select Power Mode"));
        assert!(text.contains("Approximately 375 minutes remaining"));
    }

    #[test]
    fn network_error_replaces_the_page() {
        let mut screen = network::NetworkScreen::new();
        let mut overview = MetricState::new(NetworkOverview::default());
        overview.poll.error = Some(sysdash_core::NETWORK_FETCH_ERROR.to_owned());
        screen
            .update(&Action::NetworkUpdated(Box::new(overview)))
            .unwrap();

        let text = draw(&screen);
        assert!(text.contains(sysdash_core::NETWORK_FETCH_ERROR));
        assert!(text.contains("Retry"));
        assert!(!text.contains("Connected Devices"));
    }

    #[test]
    fn network_shows_speed_test_error() {
        let mut screen = network::NetworkScreen::new();
        let state = NetworkState {
            error: Some("No servers available".into()),
            current_phase: SpeedTestPhase::Failed,
            ..NetworkState::default()
        };
        screen
            .update(&Action::NetworkStateUpdated(Box::new(state)))
            .unwrap();

        let text = draw(&screen);
        assert!(text.contains("No servers available"));
        assert!(text.contains("Run again"));
    }
}
