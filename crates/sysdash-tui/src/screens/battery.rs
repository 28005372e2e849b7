//! Battery screen: charge gauge, power details, power plan and the
//! speed test summary shared with the Network screen.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Margin, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Gauge, Paragraph, Sparkline};

use sysdash_core::presentation::{
    battery_headline, battery_status_line, battery_tone, charging_status_label, format_speed,
    format_watts,
};
use sysdash_core::{
    BatteryStatus, MetricState, NetworkState, POWER_PLAN_PLACEHOLDER, PowerPlan, SpeedTestStatus,
};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::{fmt, panel, sub_tabs};

const PLAN_KEYS: [(&str, PowerPlan); 3] = [
    ("h", PowerPlan::HighPerformance),
    ("b", PowerPlan::Balanced),
    ("p", PowerPlan::PowerSaver),
];

pub struct BatteryScreen {
    battery: MetricState<BatteryStatus>,
    gaming_mode: bool,
    power_plan: Option<PowerPlan>,
    network: NetworkState,
}

impl BatteryScreen {
    pub fn new() -> Self {
        Self {
            battery: MetricState::default(),
            gaming_mode: false,
            power_plan: None,
            network: NetworkState::default(),
        }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::as_conversions)]
    fn render_gauge(&self, frame: &mut Frame, area: Rect) {
        let status = self.battery.value();
        let color = theme::tone_color(battery_tone(status.level, self.gaming_mode));
        let block = panel(" Battery ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

        let bolt = if status.is_charging { "⚡ " } else { "" };
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(format!("  {bolt}"), Style::default().fg(theme::ELECTRIC_YELLOW)),
                Span::styled(
                    battery_headline(status.is_charging),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
            ])),
            rows[1],
        );

        let level = status.level.clamp(0.0, 100.0);
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(color).bg(theme::BG_HIGHLIGHT))
            .ratio(level / 100.0)
            .label(Span::styled(
                format!("{}%", level.round() as u16),
                Style::default().fg(theme::DIM_WHITE).add_modifier(Modifier::BOLD),
            ));
        frame.render_widget(gauge, rows[2].inner(Margin::new(2, 0)));

        frame.render_widget(
            Paragraph::new(Span::styled(
                format!("  {}", battery_status_line(status.level, status.is_charging)),
                theme::value(),
            )),
            rows[3],
        );
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("  Time left ", theme::label()),
                Span::styled(fmt::minutes(status.time_left), theme::value()),
            ])),
            rows[4],
        );
    }

    fn render_details(&self, frame: &mut Frame, area: Rect) {
        let status = self.battery.value();
        let block = panel(" Battery Information ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let row = |label: &'static str, value: String| {
            Line::from(vec![
                Span::styled(format!("  {label:<22}"), theme::label()),
                Span::styled(value, Style::default().fg(theme::SUCCESS_GREEN)),
            ])
        };
        let charging = status.charging_status.unwrap_or(status.is_charging);
        let gaming = if self.gaming_mode {
            Span::styled(
                "ON",
                Style::default()
                    .fg(theme::ELECTRIC_PURPLE)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled("OFF", theme::label())
        };

        let lines = vec![
            Line::from(""),
            row("Charging Status:", charging_status_label(charging).to_owned()),
            row("Power Usage (W):", format_watts(status.power_usage)),
            row("Discharge Rate (W):", format_watts(status.discharge_rate)),
            row(
                "System Uptime:",
                status.uptime.clone().unwrap_or_else(|| "—".to_owned()),
            ),
            Line::from(""),
            Line::from(vec![
                Span::styled(format!("  {:<22}", "Gaming Mode:"), theme::label()),
                gaming,
            ]),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::as_conversions)]
    fn render_power_history(&self, frame: &mut Frame, area: Rect) {
        let history = &self.battery.value().power_history;
        let latest = history.back().copied();
        let title = match latest {
            Some(w) => format!(" Power Consumption · {w:.1} W "),
            None => " Power Consumption ".to_owned(),
        };
        let block = panel(title);

        if history.is_empty() {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            frame.render_widget(
                Paragraph::new("  Waiting for readings…").style(theme::label()),
                inner,
            );
            return;
        }

        // Tenths of a watt keep one decimal of resolution in the bars.
        let data: Vec<u64> = history
            .iter()
            .map(|w| (w.max(0.0) * 10.0).round() as u64)
            .collect();
        let sparkline = Sparkline::default()
            .block(block)
            .data(&data)
            .style(Style::default().fg(theme::ELECTRIC_YELLOW));
        frame.render_widget(sparkline, area);
    }

    fn render_power_plan(&self, frame: &mut Frame, area: Rect) {
        let block = panel(" Power Plan ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let labels: Vec<String> = PLAN_KEYS.iter().map(|(_, p)| p.to_string()).collect();
        let items: Vec<(&str, &str)> = PLAN_KEYS
            .iter()
            .zip(&labels)
            .map(|((key, _), label)| (*key, label.as_str()))
            .collect();
        let active = self
            .power_plan
            .and_then(|plan| PLAN_KEYS.iter().position(|(_, p)| *p == plan));
        let current = self
            .power_plan
            .map_or_else(|| POWER_PLAN_PLACEHOLDER.to_owned(), |p| p.to_string());

        let lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("  Current  ", theme::label()),
                Span::styled(current, theme::title_style()),
            ]),
            Line::from(""),
            sub_tabs::render_sub_tabs(&items, active),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_speed_test(&self, frame: &mut Frame, area: Rect) {
        let block = panel(" Speed Test ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let state = &self.network;
        let mut lines = vec![Line::from("")];
        match state.status() {
            SpeedTestStatus::Idle => lines.push(Line::from(Span::styled(
                "  No speed test yet. Run one from the Network screen (3, then s).",
                theme::label(),
            ))),
            SpeedTestStatus::Running => lines.push(Line::from(vec![
                Span::styled("  Running… ", Style::default().fg(theme::phase_color(state.current_phase))),
                Span::styled(
                    format!("{} {}%", state.current_phase, state.scan_progress),
                    theme::value(),
                ),
            ])),
            SpeedTestStatus::Failed => lines.push(Line::from(Span::styled(
                format!("  {}", state.error.as_deref().unwrap_or_default()),
                Style::default().fg(theme::ERROR_RED),
            ))),
            SpeedTestStatus::Completed => {}
        }

        if let Some(result) = &state.speed_test_data {
            lines.push(Line::from(vec![
                Span::styled("  ↓ ", Style::default().fg(theme::DOWNLOAD)),
                Span::styled(format!("{} Mbps", format_speed(result.download)), theme::value()),
                Span::styled("   ↑ ", Style::default().fg(theme::UPLOAD)),
                Span::styled(format!("{} Mbps", format_speed(result.upload)), theme::value()),
                Span::styled("   ping ", theme::label()),
                Span::styled(format!("{} ms", format_speed(result.ping)), theme::value()),
            ]));
        }
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

impl Component for BatteryScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let KeyCode::Char(c) = key.code else {
            return Ok(None);
        };
        Ok(PLAN_KEYS
            .iter()
            .find(|(k, _)| k.starts_with(c))
            .map(|&(_, plan)| Action::SetPowerPlan(plan)))
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::BatteryUpdated(state) => self.battery = state.clone(),
            Action::GamingModeUpdated(state) => self.gaming_mode = *state.value(),
            Action::PowerPlanUpdated(plan) => self.power_plan = *plan,
            Action::NetworkStateUpdated(state) => self.network = (**state).clone(),
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let rows = Layout::vertical([Constraint::Length(10), Constraint::Min(6)]).split(area);
        let top = Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(rows[0]);
        let bottom = Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(rows[1]);
        let right = Layout::vertical([Constraint::Length(6), Constraint::Min(4)]).split(bottom[1]);

        self.render_gauge(frame, top[0]);
        self.render_details(frame, top[1]);
        self.render_power_history(frame, bottom[0]);
        self.render_power_plan(frame, right[0]);
        self.render_speed_test(frame, right[1]);
    }

    fn id(&self) -> &str {
        "battery"
    }
}
