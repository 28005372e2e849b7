//! Application core: event loop, screen mounting, action dispatch.
//!
//! Only the active screen's monitor is mounted. Switching screens
//! unmounts the old monitor (stopping its pollers) and mounts a fresh
//! one, so every visit starts from default state.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Tabs},
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use sysdash_core::{
    ActionDispatcher, BatteryMonitor, CoreError, HomeMonitor, MonitorClient, NetworkMonitor,
    NetworkStateStore, PollingConfig, PowerPlan, Refresh, TimeRange,
};

use crate::action::{Action, Notification, NotificationLevel};
use crate::component::Component;
use crate::data_bridge;
use crate::event::{Event, EventReader};
use crate::screen::ScreenId;
use crate::screens::create_screens;
use crate::theme;
use crate::tui::Tui;

/// How long a toast stays up.
const NOTIFICATION_TTL: Duration = Duration::from_secs(3);

/// How long quitting waits for the Network page's clear-history request.
const SHUTDOWN_GRACE: Duration = Duration::from_millis(500);

/// The monitor backing the active screen.
enum Mounted {
    Home(HomeMonitor<MonitorClient>),
    Battery(BatteryMonitor<MonitorClient>),
    Network(NetworkMonitor<MonitorClient>),
}

impl Mounted {
    fn mount(
        screen: ScreenId,
        client: &Arc<MonitorClient>,
        polling: &PollingConfig,
        tx: &mpsc::UnboundedSender<Action>,
        cancel: &CancellationToken,
    ) -> Option<Self> {
        match screen {
            ScreenId::GetStarted => None,
            ScreenId::Home => {
                let monitor = HomeMonitor::mount(client, polling);
                data_bridge::bridge_home(&monitor, tx, cancel);
                Some(Self::Home(monitor))
            }
            ScreenId::Battery => {
                let monitor = BatteryMonitor::mount(client, polling);
                data_bridge::bridge_battery(&monitor, tx, cancel);
                Some(Self::Battery(monitor))
            }
            ScreenId::Network => {
                let monitor = NetworkMonitor::mount(client, polling);
                data_bridge::bridge_network(&monitor, tx, cancel);
                Some(Self::Network(monitor))
            }
        }
    }

    async fn unmount(self) {
        match self {
            Self::Home(m) => m.unmount().await,
            Self::Battery(m) => m.unmount().await,
            // The clear-history request is left to finish on its own.
            Self::Network(m) => drop(m.unmount().await),
        }
    }

    /// Unmount at exit. The runtime goes away right after, so the
    /// clear-history request gets a short grace period to go out.
    async fn shutdown(self) {
        match self {
            Self::Network(m) => {
                let request = m.unmount().await;
                if tokio::time::timeout(SHUTDOWN_GRACE, request).await.is_err() {
                    debug!("clear-history still pending at exit");
                }
            }
            other => other.unmount().await,
        }
    }
}

pub struct App {
    client: Arc<MonitorClient>,
    polling: PollingConfig,
    dispatcher: ActionDispatcher<MonitorClient>,
    active_screen: ScreenId,
    screens: HashMap<ScreenId, Box<dyn Component>>,
    /// Active monitor and the token for its bridge tasks.
    mounted: Option<(Mounted, CancellationToken)>,
    /// Bridges for app-level state.
    shared_cancel: CancellationToken,
    running: bool,
    help_visible: bool,
    notification: Option<(Notification, Instant)>,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    pub fn new(client: MonitorClient, polling: PollingConfig) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let client = Arc::new(client);
        let dispatcher = ActionDispatcher::new(Arc::clone(&client), NetworkStateStore::new());

        Self {
            client,
            polling,
            dispatcher,
            active_screen: ScreenId::GetStarted,
            screens: create_screens().into_iter().collect(),
            mounted: None,
            shared_cancel: CancellationToken::new(),
            running: true,
            help_visible: false,
            notification: None,
            action_tx,
            action_rx,
        }
    }

    fn init_screens(&mut self) -> Result<()> {
        for screen in self.screens.values_mut() {
            screen.init(self.action_tx.clone())?;
        }
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(true);
        }
        data_bridge::bridge_shared(&self.dispatcher, &self.action_tx, &self.shared_cancel);
        Ok(())
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;
        let (width, height) = tui.size()?;
        debug!(width, height, "terminal ready");
        self.init_screens()?;

        let mut events = EventReader::new(
            Duration::from_millis(250), // 4 Hz tick
            Duration::from_millis(33),  // ~30 FPS render
        );

        info!(
            system = %self.client.endpoints().system(),
            network = %self.client.endpoints().network(),
            "TUI event loop started"
        );

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => self.action_tx.send(Action::Resize(w, h))?,
                Event::Tick => self.action_tx.send(Action::Tick)?,
                Event::Render => self.action_tx.send(Action::Render)?,
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        events.stop();
        self.shared_cancel.cancel();
        if let Some((monitor, cancel)) = self.mounted.take() {
            cancel.cancel();
            monitor.shutdown().await;
        }
        info!("TUI event loop ended");
        Ok(())
    }

    // ── Input ────────────────────────────────────────────────────────

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.help_visible {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Ok(Some(Action::ToggleHelp)),
                _ => Ok(None),
            };
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) | (KeyModifiers::NONE, KeyCode::Char('q')) => {
                return Ok(Some(Action::Quit));
            }
            (KeyModifiers::NONE, KeyCode::Char('?')) => return Ok(Some(Action::ToggleHelp)),
            (KeyModifiers::NONE, KeyCode::Char(c @ '1'..='3')) => {
                let n = u8::try_from(c).map_or(0, |b| b - b'0');
                if let Some(screen) = ScreenId::from_number(n) {
                    return Ok(Some(Action::SwitchScreen(screen)));
                }
            }
            (KeyModifiers::NONE, KeyCode::Tab) => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.next())));
            }
            (KeyModifiers::SHIFT, KeyCode::BackTab) => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.prev())));
            }
            _ => {}
        }

        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            return screen.handle_key_event(key);
        }
        Ok(None)
    }

    // ── Actions ──────────────────────────────────────────────────────

    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => self.running = false,
            Action::Resize(..) | Action::Render => {}
            Action::ToggleHelp => self.help_visible = !self.help_visible,

            Action::Tick => {
                if self
                    .notification
                    .as_ref()
                    .is_some_and(|(_, at)| at.elapsed() >= NOTIFICATION_TTL)
                {
                    self.notification = None;
                }
                self.update_active(action)?;
            }

            Action::SwitchScreen(target) => self.switch_screen(*target)?,

            Action::Notify(notification) => {
                self.notification = Some((notification.clone(), Instant::now()));
            }

            Action::SetPowerPlan(plan) => self.set_power_plan(*plan),
            Action::RunSpeedTest => self.run_speed_test(),
            Action::RetryNetwork => self.retry_network(),
            Action::SetTimeRange(range) => {
                self.set_time_range(*range);
                self.update_active(action)?;
            }

            // Data events reach every screen so hidden ones stay current
            // with app-level state.
            other => {
                for screen in self.screens.values_mut() {
                    if let Some(follow_up) = screen.update(other)? {
                        self.action_tx.send(follow_up)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn update_active(&mut self, action: &Action) -> Result<()> {
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            if let Some(follow_up) = screen.update(action)? {
                self.action_tx.send(follow_up)?;
            }
        }
        Ok(())
    }

    fn switch_screen(&mut self, target: ScreenId) -> Result<()> {
        if target == self.active_screen {
            return Ok(());
        }
        debug!("switching screen: {} → {}", self.active_screen, target);

        if let Some((monitor, cancel)) = self.mounted.take() {
            cancel.cancel();
            tokio::spawn(monitor.unmount());
        }
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(false);
        }

        self.active_screen = target;
        let cancel = CancellationToken::new();
        self.mounted = Mounted::mount(target, &self.client, &self.polling, &self.action_tx, &cancel)
            .map(|monitor| (monitor, cancel));

        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(true);
            debug!(screen = screen.id(), "screen focused");
        }
        if target == ScreenId::Network {
            // A fresh monitor starts on the default window.
            self.action_tx.send(Action::SetTimeRange(TimeRange::default()))?;
        }
        Ok(())
    }

    fn network_monitor(&self) -> Option<&NetworkMonitor<MonitorClient>> {
        match &self.mounted {
            Some((Mounted::Network(monitor), _)) => Some(monitor),
            _ => None,
        }
    }

    fn set_power_plan(&self, plan: PowerPlan) {
        let request = self.dispatcher.spawn_set_power_plan(plan);
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let notification = match request.await {
                Ok(Ok(ack)) => Notification::success(
                    ack.message
                        .unwrap_or_else(|| format!("Power plan set to {plan}")),
                ),
                Ok(Err(e)) => Notification::error(
                    e.backend_message()
                        .map_or_else(|| format!("Power plan change failed: {e}"), str::to_owned),
                ),
                Err(e) => {
                    warn!(error = %e, "power plan task failed");
                    return;
                }
            };
            let _ = tx.send(Action::Notify(notification));
        });
    }

    fn run_speed_test(&self) {
        let Some(monitor) = self.network_monitor() else {
            let _ = self.action_tx.send(Action::Notify(Notification::info(
                "Open the Network screen to run a speed test",
            )));
            return;
        };
        let refresher = monitor.refresher();
        let dispatcher = self.dispatcher.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let notification = match dispatcher.run_speed_test(&refresher).await {
                Ok(result) => Notification::success(format!(
                    "Speed test complete: ↓ {:.1} Mbps  ↑ {:.1} Mbps",
                    result.download, result.upload
                )),
                Err(CoreError::SpeedTestInProgress) => {
                    Notification::info("A speed test is already running")
                }
                Err(_) => Notification::error(
                    dispatcher
                        .network_state()
                        .snapshot()
                        .error
                        .unwrap_or_else(|| sysdash_core::SPEED_TEST_FAILED.to_owned()),
                ),
            };
            let _ = tx.send(Action::Notify(notification));
        });
    }

    fn retry_network(&self) {
        if let Some(monitor) = self.network_monitor() {
            let refresher = monitor.refresher();
            tokio::spawn(async move {
                let outcome = refresher.refresh().await;
                debug!(?outcome, "network retry finished");
            });
        }
    }

    fn set_time_range(&self, range: TimeRange) {
        if let Some(monitor) = self.network_monitor() {
            monitor.set_time_range(range);
        }
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        if self.active_screen == ScreenId::GetStarted {
            if let Some(screen) = self.screens.get(&self.active_screen) {
                screen.render(frame, area);
            }
            return;
        }

        let layout = Layout::vertical([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

        if let Some(screen) = self.screens.get(&self.active_screen) {
            screen.render(frame, layout[0]);
        }
        self.render_tab_bar(frame, layout[1]);
        self.render_status_bar(frame, layout[2]);

        if let Some((notification, _)) = &self.notification {
            render_notification(frame, area, notification);
        }
        if self.help_visible {
            render_help_overlay(frame, area);
        }
    }

    fn render_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = ScreenId::ALL
            .iter()
            .map(|&id| {
                let style = if id == self.active_screen {
                    theme::tab_active()
                } else {
                    theme::tab_inactive()
                };
                Line::from(Span::styled(format!(" {} {} ", id.number(), id.label()), style))
            })
            .collect();

        let tabs = Tabs::new(titles)
            .divider(Span::styled(" ", theme::key_hint()))
            .select(
                ScreenId::ALL
                    .iter()
                    .position(|&s| s == self.active_screen)
                    .unwrap_or(0),
            );
        frame.render_widget(tabs, area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let endpoints = self.client.endpoints();
        let line = Line::from(vec![
            Span::styled(" ● ", Style::default().fg(theme::SUCCESS_GREEN)),
            Span::styled(endpoints.system().as_str().to_owned(), theme::key_hint()),
            Span::styled(" │ ", theme::key_hint()),
            Span::styled(endpoints.network().as_str().to_owned(), theme::key_hint()),
            Span::styled(" │ ", theme::key_hint()),
            Span::styled("?", theme::key_hint_key()),
            Span::styled(" help  ", theme::key_hint()),
            Span::styled("q", theme::key_hint_key()),
            Span::styled(" quit", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    Rect::new(
        area.x + area.width.saturating_sub(width) / 2,
        area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    )
}

fn render_notification(frame: &mut Frame, area: Rect, notification: &Notification) {
    let color = match notification.level {
        NotificationLevel::Info => theme::LIGHT_BLUE,
        NotificationLevel::Success => theme::SUCCESS_GREEN,
        NotificationLevel::Error => theme::ERROR_RED,
    };
    let width = u16::try_from(notification.message.chars().count())
        .unwrap_or(u16::MAX)
        .saturating_add(4)
        .min(area.width.saturating_sub(2));
    let toast = Rect::new(
        area.x + area.width.saturating_sub(width + 1),
        area.y,
        width,
        3,
    )
    .intersection(area);

    frame.render_widget(Clear, toast);
    frame.render_widget(
        Paragraph::new(Span::styled(
            notification.message.clone(),
            Style::default().fg(color),
        ))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(color))
                .style(Style::default().bg(theme::BG_DARK)),
        ),
        toast,
    );
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let help_area = centered(area, 56, 20);
    frame.render_widget(Clear, help_area);

    let block = Block::default()
        .title(" Keyboard Shortcuts ")
        .title_style(theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border_focused())
        .style(Style::default().bg(theme::BG_DARK));
    let inner = block.inner(help_area);
    frame.render_widget(block, help_area);

    let section = |title: &'static str| {
        Line::from(Span::styled(format!("  {title}"), Style::default().fg(theme::NEON_CYAN)))
    };
    let key = |keys: &'static str, what: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {keys:<10}"), theme::key_hint_key()),
            Span::styled(what, theme::key_hint()),
        ])
    };

    let lines = vec![
        Line::from(""),
        section("Navigation"),
        key("1-3", "Home / Battery / Network"),
        key("Tab", "Next screen"),
        key("?", "This help"),
        key("q", "Quit"),
        Line::from(""),
        section("Battery"),
        key("h b p", "High Performance / Balanced / Power Saver"),
        Line::from(""),
        section("Network"),
        key("s", "Run speed test"),
        key("r", "Retry / refresh now"),
        key("m h d", "Bandwidth: 5 min / 1 hour / 1 day"),
        Line::from(""),
        Line::from(Span::styled("                  Esc or ? to close", theme::key_hint())),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}
