//! Inline percentage bars.

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::theme;

/// Split `width` cells into `(filled, empty)` strings of `█` and `░`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::as_conversions
)]
pub fn pct_bar(pct: f64, width: u16) -> (String, String) {
    let clamped = if pct.is_finite() { pct.clamp(0.0, 100.0) } else { 0.0 };
    let filled = ((clamped / 100.0) * f64::from(width)).round() as u16;
    let empty = width.saturating_sub(filled);
    (
        "█".repeat(usize::from(filled)),
        "░".repeat(usize::from(empty)),
    )
}

/// `  CPU   ████████░░░░  42%` with the fill in `color`.
pub fn meter_line(label: &str, pct: f64, width: u16, color: Color) -> Line<'static> {
    let (filled, empty) = pct_bar(pct, width);
    Line::from(vec![
        Span::styled(format!("  {label:<8}"), theme::label()),
        Span::styled(filled, Style::default().fg(color)),
        Span::styled(empty, Style::default().fg(theme::BG_HIGHLIGHT)),
        Span::styled(format!(" {pct:>5.1}%"), theme::value()),
    ])
}
