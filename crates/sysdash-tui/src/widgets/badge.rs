//! Source and staleness badges for panel titles.

use chrono::{DateTime, Utc};
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;

use sysdash_core::{PollState, Source};

use crate::theme;

/// `[MOCK]`-style tag for where a value came from.
pub fn source(source: Source) -> Span<'static> {
    let (text, color) = theme::source_badge(source);
    Span::styled(
        format!("[{text}]"),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )
}

/// `updated 4s ago`, or `updated Never`.
pub fn staleness(poll: &PollState, now: DateTime<Utc>) -> Span<'static> {
    let label = poll.staleness().age_label(now);
    let color = if poll.last_updated.is_some() {
        theme::BORDER_GRAY
    } else {
        theme::ELECTRIC_YELLOW
    };
    Span::styled(format!("updated {label}"), Style::default().fg(color))
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn staleness_reads_never_until_first_success() {
        let now = Utc::now();
        let mut poll = PollState::default();
        assert_eq!(staleness(&poll, now).content, "updated Never");

        poll.last_updated = Some(now - TimeDelta::seconds(4));
        assert_eq!(staleness(&poll, now).content, "updated 4s ago");
    }

    #[test]
    fn source_tags() {
        assert_eq!(source(Source::Live).content, "[LIVE]");
        assert_eq!(source(Source::Mock).content, "[MOCK]");
    }
}
