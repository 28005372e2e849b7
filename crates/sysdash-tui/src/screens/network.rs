//! Network screen: connection, speeds, speed test, bandwidth and
//! latency graphs, I/O counters and connected devices.
//!
//! A failed combined fetch replaces the whole page with an error panel
//! and a manual retry.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Axis, Chart, Dataset, Gauge, GraphType, Paragraph, Sparkline, Wrap,
};
use throbber_widgets_tui::{Throbber, ThrobberState};

use sysdash_core::presentation::{
    DeviceKind, connection_labels, format_speed, signal_quality,
};
use sysdash_core::{
    BandwidthDataPoint, MetricState, NetworkOverview, NetworkState, SpeedTestStatus, TimeRange,
    bandwidth_points,
};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::{fmt, panel, sub_tabs};

const RANGE_KEYS: [(&str, TimeRange); 3] = [
    ("m", TimeRange::FiveMinutes),
    ("h", TimeRange::OneHour),
    ("d", TimeRange::OneDay),
];

pub struct NetworkScreen {
    focused: bool,
    overview: MetricState<NetworkOverview>,
    bandwidth: MetricState<Vec<BandwidthDataPoint>>,
    time_range: TimeRange,
    network: NetworkState,
    throbber_state: ThrobberState,
}

impl NetworkScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            overview: MetricState::default(),
            bandwidth: MetricState::default(),
            time_range: TimeRange::default(),
            network: NetworkState::default(),
            throbber_state: ThrobberState::default(),
        }
    }

    fn waiting_for_first_load(&self) -> bool {
        self.overview.poll.last_updated.is_none() && self.overview.poll.is_loading
    }

    // ── Full-page states ─────────────────────────────────────────────

    fn render_error(frame: &mut Frame, area: Rect, message: &str) {
        let block = panel(" Error ").border_style(Style::default().fg(theme::ERROR_RED));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                message.to_owned(),
                Style::default().fg(theme::DIM_WHITE),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("[ r ] ", theme::key_hint_key()),
                Span::styled("Retry", theme::title_style()),
            ]),
        ];
        let rows = Layout::vertical([Constraint::Min(0), Constraint::Length(4), Constraint::Min(0)])
            .split(inner);
        frame.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            rows[1],
        );
    }

    fn render_loading(&self, frame: &mut Frame, area: Rect) {
        let rows = Layout::vertical([Constraint::Min(0), Constraint::Length(1), Constraint::Min(0)])
            .split(area);
        let throbber = Throbber::default()
            .label("  Loading network data…")
            .style(Style::default().fg(theme::NEON_CYAN))
            .throbber_style(Style::default().fg(theme::ELECTRIC_PURPLE));
        frame.render_stateful_widget(throbber, rows[1], &mut self.throbber_state.clone());
    }

    // ── Panels ───────────────────────────────────────────────────────

    fn render_connection(&self, frame: &mut Frame, area: Rect) {
        let data = &self.overview.value().network_data;
        let (kind, caption) = connection_labels(&data.connection_type);
        let (quality, tone) = signal_quality(data.signal_strength);

        let block = panel(" Connection ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let row = |label: &'static str, value: &str| {
            Line::from(vec![
                Span::styled(format!("  {label:<9}"), theme::label()),
                Span::styled(value.to_owned(), theme::value()),
            ])
        };
        let lines = vec![
            Line::from(vec![
                Span::styled(format!("  {kind}"), theme::title_style()),
                Span::styled(format!("  {caption}"), theme::label()),
            ]),
            Line::from(vec![
                Span::styled(format!("  {:<9}", "Signal"), theme::label()),
                Span::styled(
                    format!("{quality} "),
                    Style::default()
                        .fg(theme::tone_color(tone))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("({:.0}%)", data.signal_strength), theme::label()),
            ]),
            row("IP", &data.ip_address),
            row("DNS", &data.dns_server),
            row("MAC", &data.mac_address),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_speeds(&self, frame: &mut Frame, area: Rect) {
        let data = &self.overview.value().network_data;
        let block = panel(" Speeds ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let row = |label: &'static str, value: String, color| {
            Line::from(vec![
                Span::styled(format!("  {label:<12}"), theme::label()),
                Span::styled(value, Style::default().fg(color)),
            ])
        };
        let lines = vec![
            row("Download", fmt::mbps(data.download_speed), theme::DOWNLOAD),
            row("Upload", fmt::mbps(data.upload_speed), theme::UPLOAD),
            row("Ping", format!("{} ms", format_speed(data.ping)), theme::DIM_WHITE),
            row("Jitter", format!("{} ms", format_speed(data.jitter)), theme::DIM_WHITE),
            row(
                "Packet Loss",
                format!("{}%", format_speed(data.packet_loss)),
                theme::DIM_WHITE,
            ),
            row(
                "Stability",
                format!("{}%", format_speed(data.stability)),
                theme::SUCCESS_GREEN,
            ),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_speed_test(&self, frame: &mut Frame, area: Rect) {
        let state = &self.network;
        let block = panel(" Speed Test ").border_style(if state.is_running_speed_test {
            theme::border_focused()
        } else {
            theme::border_default()
        });
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

        match state.status() {
            SpeedTestStatus::Running => {
                let throbber = Throbber::default()
                    .label(format!("  {}…", state.current_phase))
                    .style(Style::default().fg(theme::phase_color(state.current_phase)))
                    .throbber_style(Style::default().fg(theme::ELECTRIC_PURPLE));
                frame.render_stateful_widget(throbber, rows[0], &mut self.throbber_state.clone());
                let gauge = Gauge::default()
                    .gauge_style(Style::default().fg(theme::ELECTRIC_PURPLE).bg(theme::BG_HIGHLIGHT))
                    .percent(u16::from(state.scan_progress));
                frame.render_widget(gauge, rows[1]);
            }
            status => {
                let hint = if status == SpeedTestStatus::Idle {
                    "Run speed test"
                } else {
                    "Run again"
                };
                frame.render_widget(
                    Paragraph::new(Line::from(vec![
                        Span::styled("  [ s ] ", theme::key_hint_key()),
                        Span::styled(hint, theme::key_hint()),
                    ])),
                    rows[0],
                );
            }
        }

        let mut lines = Vec::new();
        if let Some(error) = &state.error {
            lines.push(Line::from(Span::styled(
                format!("  {error}"),
                Style::default().fg(theme::ERROR_RED),
            )));
        }
        if let Some(result) = &state.speed_test_data {
            lines.push(Line::from(vec![
                Span::styled("  ↓ ", Style::default().fg(theme::DOWNLOAD)),
                Span::styled(fmt::mbps(result.download), theme::value()),
                Span::styled("  ↑ ", Style::default().fg(theme::UPLOAD)),
                Span::styled(fmt::mbps(result.upload), theme::value()),
            ]));
            lines.push(Line::from(vec![
                Span::styled("  Ping ", theme::label()),
                Span::styled(format!("{} ms", format_speed(result.ping)), theme::value()),
            ]));
            if let Some(server) = &result.server {
                lines.push(Line::from(Span::styled(
                    format!("  {} · {}", server.name, server.location),
                    theme::label(),
                )));
                lines.push(Line::from(Span::styled(
                    format!("  {} · Distance: {}", server.sponsor, server.distance),
                    theme::label(),
                )));
            }
        }
        frame.render_widget(Paragraph::new(lines), rows[2]);
    }

    #[allow(clippy::cast_precision_loss, clippy::as_conversions)]
    fn render_bandwidth(&self, frame: &mut Frame, area: Rect) {
        let points = bandwidth_points(&self.bandwidth, self.overview.value());
        let active = RANGE_KEYS.iter().position(|(_, r)| *r == self.time_range);
        let items: Vec<(&str, &str)> = RANGE_KEYS
            .iter()
            .map(|(key, range)| (*key, range.label()))
            .collect();

        let block = panel(" Bandwidth ").title_bottom(sub_tabs::render_sub_tabs(&items, active));

        if points.is_empty() {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            frame.render_widget(
                Paragraph::new("  No bandwidth history yet").style(theme::label()),
                inner,
            );
            return;
        }

        let download: Vec<(f64, f64)> = points
            .iter()
            .enumerate()
            .map(|(i, p)| (i as f64, p.download))
            .collect();
        let upload: Vec<(f64, f64)> = points
            .iter()
            .enumerate()
            .map(|(i, p)| (i as f64, p.upload))
            .collect();
        let y_max = points
            .iter()
            .map(|p| p.download.max(p.upload))
            .fold(0.0f64, f64::max)
            .max(1.0)
            * 1.1;
        let x_max = (points.len().saturating_sub(1) as f64).max(1.0);

        let first = points.first().map_or("", |p| p.timestamp.as_str());
        let last = points.last().map_or("", |p| p.timestamp.as_str());

        let datasets = vec![
            Dataset::default()
                .name("Download")
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(theme::DOWNLOAD))
                .data(&download),
            Dataset::default()
                .name("Upload")
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(theme::UPLOAD))
                .data(&upload),
        ];
        let chart = Chart::new(datasets)
            .block(block)
            .x_axis(
                Axis::default()
                    .bounds([0.0, x_max])
                    .labels([Span::raw(first.to_owned()), Span::raw(last.to_owned())])
                    .style(Style::default().fg(theme::BORDER_GRAY)),
            )
            .y_axis(
                Axis::default()
                    .bounds([0.0, y_max])
                    .labels([
                        Span::raw("0"),
                        Span::raw(format!("{:.0}", y_max / 2.0)),
                        Span::raw(format!("{y_max:.0}")),
                    ])
                    .style(Style::default().fg(theme::BORDER_GRAY)),
            );
        frame.render_widget(chart, area);
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::as_conversions)]
    fn render_latency(&self, frame: &mut Frame, area: Rect) {
        let history = &self.overview.value().latency_history;
        let title = history
            .last()
            .map_or_else(|| " Latency ".to_owned(), |ms| format!(" Latency · {ms:.0} ms "));
        let block = panel(title);

        if history.is_empty() {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            frame.render_widget(Paragraph::new("  No samples").style(theme::label()), inner);
            return;
        }

        let data: Vec<u64> = history.iter().map(|ms| ms.max(0.0).round() as u64).collect();
        frame.render_widget(
            Sparkline::default()
                .block(block)
                .data(&data)
                .style(Style::default().fg(theme::LIGHT_BLUE)),
            area,
        );
    }

    fn render_io(&self, frame: &mut Frame, area: Rect) {
        let io = &self.overview.value().io_data;
        let block = panel(if self.network.data_ready {
            " Network I/O · post-test "
        } else {
            " Network I/O "
        });
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let pair = |label: &'static str, up: String, down: String| {
            Line::from(vec![
                Span::styled(format!("  {label:<10}"), theme::label()),
                Span::styled("↑ ", Style::default().fg(theme::UPLOAD)),
                Span::styled(format!("{up:<14}"), theme::value()),
                Span::styled("↓ ", Style::default().fg(theme::DOWNLOAD)),
                Span::styled(down, theme::value()),
            ])
        };
        let interfaces = if io.active_interfaces.is_empty() {
            "—".to_owned()
        } else {
            io.active_interfaces.join(", ")
        };
        let lines = vec![
            pair("Speed", fmt::mbps(io.upload_speed), fmt::mbps(io.download_speed)),
            pair(
                "Packets",
                fmt::thousands(io.upload_packets),
                fmt::thousands(io.download_packets),
            ),
            pair("Bytes", fmt::bytes(io.bytes_sent), fmt::bytes(io.bytes_received)),
            Line::from(vec![
                Span::styled(format!("  {:<10}", "Interfaces"), theme::label()),
                Span::styled(interfaces, theme::value()),
            ]),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_devices(&self, frame: &mut Frame, area: Rect) {
        let devices = &self.overview.value().connected_devices;
        let block = panel(format!(" Connected Devices ({}) ", devices.len()));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if devices.is_empty() {
            frame.render_widget(Paragraph::new("  No devices").style(theme::label()), inner);
            return;
        }

        let lines: Vec<Line> = devices
            .iter()
            .map(|d| {
                let online = d.status.eq_ignore_ascii_case("online")
                    || d.status.eq_ignore_ascii_case("connected");
                let dot = if online {
                    Span::styled("● ", Style::default().fg(theme::SUCCESS_GREEN))
                } else {
                    Span::styled("○ ", Style::default().fg(theme::BORDER_GRAY))
                };
                Line::from(vec![
                    Span::raw("  "),
                    Span::raw(DeviceKind::from_name(&d.name).glyph()),
                    Span::raw(" "),
                    dot,
                    Span::styled(format!("{:<24}", d.name), theme::value()),
                    Span::styled(format!("{:<16}", d.ip_address), theme::label()),
                    Span::styled(d.mac_address.clone(), theme::label()),
                ])
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_dashboard(&self, frame: &mut Frame, area: Rect) {
        let rows = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(8),
            Constraint::Min(8),
            Constraint::Length(7),
        ])
        .split(area);

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("  Last updated ", theme::label()),
                Span::styled(self.overview.poll.staleness().time_label(), theme::value()),
            ])),
            rows[0],
        );

        let top = Layout::horizontal([
            Constraint::Percentage(36),
            Constraint::Percentage(28),
            Constraint::Percentage(36),
        ])
        .split(rows[1]);
        self.render_connection(frame, top[0]);
        self.render_speeds(frame, top[1]);
        self.render_speed_test(frame, top[2]);

        let middle = Layout::horizontal([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(rows[2]);
        self.render_bandwidth(frame, middle[0]);
        self.render_latency(frame, middle[1]);

        let bottom = Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(rows[3]);
        self.render_io(frame, bottom[0]);
        self.render_devices(frame, bottom[1]);
    }
}

impl Component for NetworkScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let KeyCode::Char(c) = key.code else {
            return Ok(None);
        };
        if self.overview.poll.error.is_some() {
            return Ok((c == 'r').then_some(Action::RetryNetwork));
        }
        let action = match c {
            's' if !self.network.is_running_speed_test => Some(Action::RunSpeedTest),
            'r' => Some(Action::RetryNetwork),
            _ => RANGE_KEYS
                .iter()
                .find(|(k, _)| k.starts_with(c))
                .map(|&(_, range)| Action::SetTimeRange(range)),
        };
        Ok(action)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::Tick => self.throbber_state.calc_next(),
            Action::NetworkUpdated(state) => self.overview = (**state).clone(),
            Action::BandwidthUpdated(state) => self.bandwidth = state.clone(),
            Action::NetworkStateUpdated(state) => self.network = (**state).clone(),
            Action::SetTimeRange(range) => self.time_range = *range,
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        if let Some(message) = &self.overview.poll.error {
            Self::render_error(frame, area, message);
        } else if self.waiting_for_first_load() {
            self.render_loading(frame, area);
        } else {
            self.render_dashboard(frame, area);
        }
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        "network"
    }
}
