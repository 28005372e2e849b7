//! Inline selector line (time ranges, power plans).

use ratatui::style::Modifier;
use ratatui::text::{Line, Span};

use crate::theme;

/// `key label` pairs; the active one is bracketed in purple.
pub fn render_sub_tabs<'a>(items: &[(&'a str, &'a str)], active: Option<usize>) -> Line<'a> {
    let mut spans = Vec::with_capacity(items.len() * 3);

    for (i, (key, label)) in items.iter().enumerate() {
        spans.push(Span::styled(if i == 0 { "  " } else { "   " }, theme::key_hint()));
        spans.push(Span::styled(format!("{key} "), theme::key_hint_key()));
        if active == Some(i) {
            spans.push(Span::styled(
                format!("[{label}]"),
                theme::tab_active().add_modifier(Modifier::UNDERLINED),
            ));
        } else {
            spans.push(Span::styled(*label, theme::tab_inactive()));
        }
    }

    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn active_item_is_bracketed() {
        let line = render_sub_tabs(&[("m", "5 Min"), ("h", "1 Hour")], Some(1));
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "  m 5 Min   h [1 Hour]");
    }
}
