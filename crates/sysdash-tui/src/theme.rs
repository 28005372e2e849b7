//! Neon palette and semantic styling for the dashboard.

use ratatui::style::{Color, Modifier, Style};

use sysdash_core::presentation::Tone;
use sysdash_core::{Source, SpeedTestPhase};

// ── Core Palette ──────────────────────────────────────────────────────

pub const ELECTRIC_PURPLE: Color = Color::Rgb(225, 53, 255); // #e135ff
pub const NEON_CYAN: Color = Color::Rgb(128, 255, 234); // #80ffea
pub const CORAL: Color = Color::Rgb(255, 106, 193); // #ff6ac1
pub const ELECTRIC_YELLOW: Color = Color::Rgb(241, 250, 140); // #f1fa8c
pub const SUCCESS_GREEN: Color = Color::Rgb(80, 250, 123); // #50fa7b
pub const ERROR_RED: Color = Color::Rgb(255, 99, 99); // #ff6363
pub const AMBER: Color = Color::Rgb(255, 184, 108); // #ffb86c

pub const DIM_WHITE: Color = Color::Rgb(189, 193, 207); // #bdc1cf
pub const BORDER_GRAY: Color = Color::Rgb(98, 114, 164); // #6272a4
pub const BG_HIGHLIGHT: Color = Color::Rgb(40, 42, 54); // #282a36
pub const BG_DARK: Color = Color::Rgb(30, 31, 41); // #1e1f29
pub const LIGHT_BLUE: Color = Color::Rgb(139, 233, 253); // #8be9fd

/// Download / upload series on the bandwidth chart.
pub const DOWNLOAD: Color = NEON_CYAN;
pub const UPLOAD: Color = CORAL;

// ── Semantic mappings ────────────────────────────────────────────────

pub fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Excellent | Tone::Good => SUCCESS_GREEN,
        Tone::Fair => LIGHT_BLUE,
        Tone::Warning => AMBER,
        Tone::Critical => ERROR_RED,
        Tone::Muted => BORDER_GRAY,
        Tone::Accent => ELECTRIC_PURPLE,
    }
}

/// Fill colour for a usage gauge at `pct` percent.
pub fn usage_color(pct: f64) -> Color {
    if pct >= 90.0 {
        ERROR_RED
    } else if pct >= 70.0 {
        AMBER
    } else {
        NEON_CYAN
    }
}

/// Badge text and colour for where a value came from.
pub fn source_badge(source: Source) -> (&'static str, Color) {
    match source {
        Source::Live => ("LIVE", SUCCESS_GREEN),
        Source::Mock => ("MOCK", ELECTRIC_YELLOW),
        Source::Default => ("WAITING", BORDER_GRAY),
    }
}

pub fn phase_color(phase: SpeedTestPhase) -> Color {
    match phase {
        SpeedTestPhase::Idle => BORDER_GRAY,
        SpeedTestPhase::Preparing | SpeedTestPhase::Testing | SpeedTestPhase::Refreshing => {
            ELECTRIC_PURPLE
        }
        SpeedTestPhase::Complete => SUCCESS_GREEN,
        SpeedTestPhase::Failed => ERROR_RED,
    }
}

// ── Semantic Styles ───────────────────────────────────────────────────

pub fn title_style() -> Style {
    Style::default().fg(NEON_CYAN).add_modifier(Modifier::BOLD)
}

pub fn border_focused() -> Style {
    Style::default().fg(ELECTRIC_PURPLE)
}

pub fn border_default() -> Style {
    Style::default().fg(BORDER_GRAY)
}

pub fn label() -> Style {
    Style::default().fg(BORDER_GRAY)
}

pub fn value() -> Style {
    Style::default().fg(DIM_WHITE)
}

pub fn tab_active() -> Style {
    Style::default()
        .fg(ELECTRIC_PURPLE)
        .add_modifier(Modifier::BOLD)
}

pub fn tab_inactive() -> Style {
    Style::default().fg(DIM_WHITE)
}

pub fn key_hint() -> Style {
    Style::default().fg(BORDER_GRAY)
}

pub fn key_hint_key() -> Style {
    Style::default().fg(NEON_CYAN).add_modifier(Modifier::BOLD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_pick_warning_colours() {
        assert_eq!(usage_color(12.0), NEON_CYAN);
        assert_eq!(usage_color(75.0), AMBER);
        assert_eq!(usage_color(95.0), ERROR_RED);
        assert_eq!(tone_color(Tone::Accent), ELECTRIC_PURPLE);
        assert_eq!(source_badge(Source::Mock).0, "MOCK");
    }
}
