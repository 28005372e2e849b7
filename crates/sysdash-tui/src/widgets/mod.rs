//! Small rendering helpers shared by the screens.

pub mod badge;
pub mod fmt;
pub mod meter;
pub mod sub_tabs;

use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders};

use crate::theme;

/// Rounded panel with a bold cyan title.
pub fn panel<'a>(title: impl Into<Line<'a>>) -> Block<'a> {
    Block::default()
        .title(title)
        .title_style(theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border_default())
}
