//! Home screen: usage meters, temperatures, static hardware cards.
//!
//! ┌─ System Usage ───────────────┐ ┌─ Temperature ───────┐
//! │ CPU / GPU / Memory / Disk    │ │ CPU, GPU, clocks    │
//! └──────────────────────────────┘ └─────────────────────┘
//! ┌─ System Specs ───────────────┐ ┌─ Storage & Network ─┐
//! └──────────────────────────────┘ └─────────────────────┘

use chrono::Utc;
use color_eyre::eyre::Result;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use sysdash_core::presentation::{
    GPU_CLOCK_MHZ, STORAGE_EXTRAS, STORAGE_VOLUMES, SYSTEM_SPECS, VRAM_CLOCK_MHZ,
    gpu_temperature, temperature_tone,
};
use sysdash_core::{MetricState, SystemUsage};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::{badge, meter, panel};

pub struct HomeScreen {
    usage: MetricState<SystemUsage>,
    temperature: MetricState<f64>,
}

impl HomeScreen {
    pub fn new() -> Self {
        Self {
            usage: MetricState::default(),
            temperature: MetricState::new(sysdash_core::monitor::DEFAULT_TEMPERATURE),
        }
    }

    fn render_usage(&self, frame: &mut Frame, area: Rect) {
        let mut title = vec![Span::styled(" System Usage ", theme::title_style())];
        title.push(badge::source(self.usage.snapshot.source));
        title.push(Span::raw(" "));
        title.push(badge::staleness(&self.usage.poll, Utc::now()));
        title.push(Span::raw(" "));

        let block = panel(Line::from(title));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let usage = self.usage.value();
        let width = inner.width.saturating_sub(20).max(4);
        let lines = vec![
            Line::from(""),
            meter::meter_line("CPU", usage.cpu, width, theme::usage_color(usage.cpu)),
            Line::from(""),
            meter::meter_line("GPU", usage.gpu, width, theme::usage_color(usage.gpu)),
            Line::from(""),
            meter::meter_line("Memory", usage.memory, width, theme::SUCCESS_GREEN),
            Line::from(""),
            meter::meter_line("Disk", usage.disk, width, theme::usage_color(usage.disk)),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_temperature(&self, frame: &mut Frame, area: Rect) {
        let mut title = vec![Span::styled(" Temperature ", theme::title_style())];
        if self.temperature.poll.using_mock {
            title.push(badge::source(self.temperature.snapshot.source));
            title.push(Span::raw(" "));
        }
        let block = panel(Line::from(title));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let cpu = *self.temperature.value();
        let gpu = gpu_temperature(cpu);
        let reading = |label: &'static str, celsius: f64| {
            Line::from(vec![
                Span::styled(format!("  {label:<18}"), theme::label()),
                Span::styled(
                    format!("{celsius:.0}°C"),
                    Style::default()
                        .fg(theme::tone_color(temperature_tone(celsius)))
                        .add_modifier(Modifier::BOLD),
                ),
            ])
        };
        let fixed = |label: &'static str, mhz: u32| {
            Line::from(vec![
                Span::styled(format!("  {label:<18}"), theme::label()),
                Span::styled(
                    format!("{mhz} MHz"),
                    Style::default().fg(theme::SUCCESS_GREEN),
                ),
            ])
        };

        let lines = vec![
            Line::from(""),
            reading("CPU Temperature", cpu),
            reading("GPU Temperature", gpu),
            fixed("GPU Clock", GPU_CLOCK_MHZ),
            fixed("VRAM Clock", VRAM_CLOCK_MHZ),
            Line::from(""),
            Line::from(vec![
                Span::styled("  last reading ", theme::label()),
                Span::styled(
                    self.temperature.poll.staleness().time_label(),
                    theme::value(),
                ),
            ]),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_specs(frame: &mut Frame, area: Rect) {
        let block = panel(" System Specifications ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines: Vec<Line> = std::iter::once(Line::from(""))
            .chain(SYSTEM_SPECS.iter().map(|(label, value)| {
                Line::from(vec![
                    Span::styled(format!("  {label:<12}"), theme::label()),
                    Span::styled(*value, Style::default().fg(theme::SUCCESS_GREEN)),
                ])
            }))
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_storage(frame: &mut Frame, area: Rect) {
        let block = panel(" Storage & Network ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let width = inner.width.saturating_sub(20).max(4);
        let mut lines = vec![Line::from("")];
        for volume in STORAGE_VOLUMES {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<12}", volume.label), theme::label()),
                Span::styled(
                    format!("{} / {}", volume.used, volume.total),
                    Style::default().fg(theme::SUCCESS_GREEN),
                ),
            ]));
            lines.push(meter::meter_line(
                "",
                f64::from(volume.percent),
                width,
                theme::LIGHT_BLUE,
            ));
        }
        for (label, value) in STORAGE_EXTRAS {
            lines.push(Line::from(vec![
                Span::styled(format!("  {label:<12}"), theme::label()),
                Span::styled(value, Style::default().fg(theme::SUCCESS_GREEN)),
            ]));
        }
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

impl Component for HomeScreen {
    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::UsageUpdated(state) => self.usage = state.clone(),
            Action::TemperatureUpdated(state) => self.temperature = state.clone(),
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let rows = Layout::vertical([Constraint::Length(10), Constraint::Min(8)]).split(area);
        let top = Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(rows[0]);
        let bottom = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[1]);

        self.render_usage(frame, top[0]);
        self.render_temperature(frame, top[1]);
        Self::render_specs(frame, bottom[0]);
        Self::render_storage(frame, bottom[1]);
    }

    fn id(&self) -> &str {
        "home"
    }
}
