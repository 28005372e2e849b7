//! Intro splash. Enter plays a short timeline, then hands over to Home.

use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::action::Action;
use crate::component::Component;
use crate::screen::ScreenId;
use crate::theme;

const LOGO: [&str; 5] = [
    "█▀▀ █ █ █▀▀ █▀▄ ▄▀█ █▀▀ █ █",
    "▀▀█  █  ▀▀█ █ █ █▀█ ▀▀█ █▀█",
    "▀▀▀  ▀  ▀▀▀ ▀▀  ▀ ▀ ▀▀▀ ▀ ▀",
    "",
    "S Y S T E M   M O N I T O R",
];

/// Where the intro timeline stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    /// Start prompt fading out.
    FadeOut,
    Travel,
    Arrived,
    Logo,
    Particles,
    PulseWave,
    FinalFlash,
    /// Time to leave for Home.
    Done,
}

/// Stage boundaries as offsets from the key press.
const TIMELINE: [(u64, Stage); 7] = [
    (500, Stage::Travel),
    (1_700, Stage::Arrived),
    (2_000, Stage::Logo),
    (2_500, Stage::Particles),
    (4_000, Stage::PulseWave),
    (5_500, Stage::FinalFlash),
    (6_500, Stage::Done),
];

pub fn stage_at(elapsed: Duration) -> Stage {
    let ms = elapsed.as_millis();
    TIMELINE
        .iter()
        .rev()
        .find(|(at, _)| ms >= u128::from(*at))
        .map_or(Stage::FadeOut, |&(_, stage)| stage)
}

pub struct GetStartedScreen {
    started: Option<Instant>,
    frame: u16,
}

impl GetStartedScreen {
    pub fn new() -> Self {
        Self {
            started: None,
            frame: 0,
        }
    }

    fn stage(&self) -> Option<Stage> {
        self.started.map(|t| stage_at(t.elapsed()))
    }

    fn render_prompt(frame: &mut Frame, area: Rect) {
        let rows = Layout::vertical([
            Constraint::Min(0),
            Constraint::Length(u16::try_from(LOGO.len()).unwrap_or(5)),
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

        frame.render_widget(logo(Style::default().fg(theme::BORDER_GRAY)), rows[1]);
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("[ Enter ] ", theme::key_hint_key()),
                Span::styled("Get Started", theme::title_style()),
            ]))
            .alignment(Alignment::Center),
            rows[3],
        );
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::as_conversions
    )]
    fn render_travel(&self, frame: &mut Frame, area: Rect) {
        let elapsed = self.started.map_or(0, |t| t.elapsed().as_millis());
        let progress = (elapsed.saturating_sub(500) as f64 / 1_200.0).clamp(0.0, 1.0);
        let width = area.width.saturating_sub(4);
        let pos = (progress * f64::from(width)) as u16;

        let mut trail = " ".repeat(usize::from(pos.saturating_sub(6)));
        trail.push_str("·•●");
        let y = area.y + area.height / 2;
        frame.render_widget(
            Paragraph::new(Span::styled(trail, Style::default().fg(theme::NEON_CYAN))),
            Rect::new(area.x + 2, y, width, 1),
        );
    }

    fn render_show(&self, frame: &mut Frame, area: Rect, stage: Stage) {
        let logo_style = if stage == Stage::FinalFlash {
            Style::default()
                .fg(theme::BG_DARK)
                .bg(theme::NEON_CYAN)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(theme::ELECTRIC_PURPLE)
                .add_modifier(Modifier::BOLD)
        };

        if stage >= Stage::Particles {
            frame.render_widget(Paragraph::new(particles(area, self.frame)), area);
        }

        let rows = Layout::vertical([
            Constraint::Min(0),
            Constraint::Length(u16::try_from(LOGO.len()).unwrap_or(5)),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);
        frame.render_widget(logo(logo_style), rows[1]);

        if stage >= Stage::PulseWave {
            let ring = ["◌", "○", "◯", "○"][usize::from(self.frame % 4)];
            frame.render_widget(
                Paragraph::new(Span::styled(
                    format!("{ring}  {ring}  {ring}"),
                    Style::default().fg(theme::CORAL),
                ))
                .alignment(Alignment::Center),
                rows[3],
            );
        }
    }
}

fn logo(style: Style) -> Paragraph<'static> {
    let lines: Vec<Line> = LOGO
        .iter()
        .map(|row| Line::from(Span::styled(*row, style)))
        .collect();
    Paragraph::new(lines).alignment(Alignment::Center)
}

/// Deterministic star field that drifts one column per tick.
fn particles(area: Rect, frame: u16) -> Vec<Line<'static>> {
    let width = usize::from(area.width.max(1));
    (0..area.height)
        .map(|row| {
            let mut line = vec![' '; width];
            let row = usize::from(row);
            for k in 0..3 {
                let col = (row * 37 + k * 53 + usize::from(frame)) % width;
                if let Some(cell) = line.get_mut(col) {
                    *cell = if (row + k) % 3 == 0 { '✦' } else { '·' };
                }
            }
            Line::from(Span::styled(
                line.into_iter().collect::<String>(),
                Style::default().fg(theme::BORDER_GRAY),
            ))
        })
        .collect()
}

impl Component for GetStartedScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match (self.started, key.code) {
            (None, KeyCode::Enter | KeyCode::Char(' ')) => {
                self.started = Some(Instant::now());
                Ok(None)
            }
            // Skip the rest of the intro.
            (Some(_), KeyCode::Enter | KeyCode::Esc) => {
                Ok(Some(Action::SwitchScreen(ScreenId::Home)))
            }
            _ => Ok(None),
        }
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::Tick => {
                self.frame = self.frame.wrapping_add(1);
                if self.stage() == Some(Stage::Done) {
                    self.started = None;
                    return Ok(Some(Action::SwitchScreen(ScreenId::Home)));
                }
                Ok(None)
            }
            _ => Ok(None),
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let stage = self.stage();
        let border = if stage.is_some() {
            theme::border_focused()
        } else {
            theme::border_default()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border)
            .style(Style::default().bg(theme::BG_DARK));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        match stage {
            None | Some(Stage::FadeOut) => Self::render_prompt(frame, inner),
            Some(Stage::Travel) => self.render_travel(frame, inner),
            Some(stage) => self.render_show(frame, inner, stage),
        }
    }

    fn id(&self) -> &str {
        "get-started"
    }
}
