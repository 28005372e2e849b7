//! Output formatting: table, JSON, YAML, plain.
//!
//! Renders data in the format selected by `--output`. Lists use `tabled`,
//! single snapshots a label/value block, structured formats use serde,
//! plain emits one value per line.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use sysdash_core::presentation::Tone;

use crate::cli::{ColorMode, OutputFormat};
use crate::error::CliError;

// ── Color ────────────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

/// Applies the dashboard palette when color is enabled.
#[derive(Debug, Clone, Copy)]
pub struct Painter {
    enabled: bool,
}

impl Painter {
    pub fn new(mode: ColorMode) -> Self {
        Self {
            enabled: should_color(mode),
        }
    }

    pub fn tone(self, text: &str, tone: Tone) -> String {
        if !self.enabled {
            return text.to_owned();
        }
        match tone {
            Tone::Excellent | Tone::Good => text.green().to_string(),
            Tone::Fair => text.yellow().to_string(),
            Tone::Warning => text.bright_yellow().to_string(),
            Tone::Critical => text.red().to_string(),
            Tone::Muted => text.dimmed().to_string(),
            Tone::Accent => text.magenta().to_string(),
        }
    }

    pub fn label(self, text: &str) -> String {
        if self.enabled {
            text.dimmed().to_string()
        } else {
            text.to_owned()
        }
    }

    pub fn heading(self, text: &str) -> String {
        if self.enabled {
            text.cyan().bold().to_string()
        } else {
            text.to_owned()
        }
    }
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list of serde-serializable + tabled items in the chosen format.
///
/// - `table`: uses the `Tabled` derive to build a pretty table
/// - `json` / `json-compact`: serializes the original data via serde
/// - `yaml`: serializes via serde_yaml
/// - `plain`: calls `id_fn` on each item to emit one value per line
pub fn render_list<T, R>(
    format: OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            Ok(render_table(&rows))
        }
        OutputFormat::Json => render_json_pretty(data),
        OutputFormat::JsonCompact => render_json_compact(data),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => Ok(data.iter().map(&id_fn).collect::<Vec<_>>().join("\n")),
    }
}

/// Render a single snapshot in the chosen format.
///
/// Table rendering uses `detail_fn`, since snapshot views don't use the
/// `Tabled` derive.
pub fn render_single<T>(
    format: OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> String,
    id_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize,
{
    match format {
        OutputFormat::Table => Ok(detail_fn(data)),
        OutputFormat::Json => render_json_pretty(data),
        OutputFormat::JsonCompact => render_json_compact(data),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => Ok(id_fn(data)),
    }
}

/// Label/value block with the labels padded to a common width.
pub fn detail(painter: Painter, title: &str, rows: &[(&str, String)]) -> String {
    let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    let mut out = painter.heading(title);
    for (label, value) in rows {
        out.push('\n');
        out.push_str(&format!("  {}  {value}", painter.label(&format!("{label:<width$}"))));
    }
    out
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Pretty-printed JSON.
pub(crate) fn render_json_pretty<T: serde::Serialize + ?Sized>(
    data: &T,
) -> Result<String, CliError> {
    serde_json::to_string_pretty(data).map_err(|e| CliError::Render(e.to_string()))
}

/// Compact single-line JSON.
pub(crate) fn render_json_compact<T: serde::Serialize + ?Sized>(
    data: &T,
) -> Result<String, CliError> {
    serde_json::to_string(data).map_err(|e| CliError::Render(e.to_string()))
}

/// YAML output.
pub(crate) fn render_yaml<T: serde::Serialize + ?Sized>(data: &T) -> Result<String, CliError> {
    serde_yaml::to_string(data).map_err(|e| CliError::Render(e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde::Serialize;

    use super::*;

    #[derive(Serialize)]
    struct Point {
        name: &'static str,
        value: u32,
    }

    #[derive(Tabled)]
    struct PointRow {
        #[tabled(rename = "Name")]
        name: String,
    }

    fn points() -> Vec<Point> {
        vec![
            Point { name: "a", value: 1 },
            Point { name: "b", value: 2 },
        ]
    }

    #[test]
    fn plain_emits_one_value_per_line() {
        let out = render_list(
            OutputFormat::Plain,
            &points(),
            |p| PointRow { name: p.name.into() },
            |p| p.name.to_owned(),
        )
        .unwrap();
        assert_eq!(out, "a\nb");
    }

    #[test]
    fn compact_json_is_single_line() {
        let out = render_list(
            OutputFormat::JsonCompact,
            &points(),
            |p| PointRow { name: p.name.into() },
            |p| p.name.to_owned(),
        )
        .unwrap();
        assert_eq!(out, r#"[{"name":"a","value":1},{"name":"b","value":2}]"#);
    }

    #[test]
    fn table_has_header_row() {
        let out = render_list(
            OutputFormat::Table,
            &points(),
            |p| PointRow { name: p.name.into() },
            |p| p.name.to_owned(),
        )
        .unwrap();
        assert!(out.contains("Name"));
        assert!(out.contains('╭'));
    }

    #[test]
    fn detail_pads_labels_without_color() {
        let painter = Painter { enabled: false };
        let out = detail(
            painter,
            "Battery",
            &[("Level", "80%".into()), ("Charging", "yes".into())],
        );
        assert_eq!(out, "Battery\n  Level     80%\n  Charging  yes");
    }
}
