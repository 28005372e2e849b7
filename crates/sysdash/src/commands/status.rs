//! `sysdash status`: one usage + temperature sample.
//!
//! Failed reads fall back to mock values the same way the dashboard does,
//! and the report marks which values are mocked.

use serde::Serialize;

use sysdash_core::presentation::{gpu_temperature, temperature_tone, Tone};
use sysdash_core::{HomeMonitor, Source, SystemUsage};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output::{self, Painter};

use super::Context;

#[derive(Debug, Serialize)]
struct StatusReport {
    usage: SystemUsage,
    usage_source: Source,
    cpu_temperature: f64,
    gpu_temperature: f64,
    temperature_source: Source,
}

fn percent(painter: Painter, value: f64) -> String {
    let tone = if value >= 90.0 {
        Tone::Critical
    } else if value >= 70.0 {
        Tone::Warning
    } else {
        Tone::Good
    };
    painter.tone(&format!("{value:.1}%"), tone)
}

fn celsius(painter: Painter, value: f64) -> String {
    painter.tone(&format!("{value:.0}°C"), temperature_tone(value))
}

fn source_suffix(source: Source) -> &'static str {
    if source == Source::Mock { " (mock)" } else { "" }
}

fn detail(painter: Painter, report: &StatusReport) -> String {
    let u = &report.usage;
    let usage_tag = source_suffix(report.usage_source);
    let temp_tag = source_suffix(report.temperature_source);
    output::detail(
        painter,
        "System Usage",
        &[
            ("CPU", format!("{}{usage_tag}", percent(painter, u.cpu))),
            ("GPU", format!("{}{usage_tag}", percent(painter, u.gpu))),
            ("Memory", format!("{}{usage_tag}", percent(painter, u.memory))),
            ("Disk", format!("{}{usage_tag}", percent(painter, u.disk))),
            (
                "CPU Temperature",
                format!("{}{temp_tag}", celsius(painter, report.cpu_temperature)),
            ),
            (
                "GPU Temperature",
                format!("{}{temp_tag}", celsius(painter, report.gpu_temperature)),
            ),
        ],
    )
}

fn plain(report: &StatusReport) -> String {
    let u = &report.usage;
    format!(
        "cpu {:.1}\ngpu {:.1}\nmemory {:.1}\ndisk {:.1}\ncpu_temperature {:.1}\ngpu_temperature {:.1}",
        u.cpu, u.gpu, u.memory, u.disk, report.cpu_temperature, report.gpu_temperature
    )
}

pub async fn handle(ctx: &Context, global: &GlobalOpts) -> Result<(), CliError> {
    let (usage, temperature) = HomeMonitor::sample(&ctx.client, &ctx.config.polling).await;
    let cpu_temperature = *temperature.value();

    let report = StatusReport {
        usage: *usage.value(),
        usage_source: usage.snapshot.source,
        cpu_temperature,
        gpu_temperature: gpu_temperature(cpu_temperature),
        temperature_source: temperature.snapshot.source,
    };

    let painter = Painter::new(global.color);
    let out = output::render_single(global.output, &report, |r| detail(painter, r), plain)?;
    output::print_output(&out, global.quiet);
    Ok(())
}
