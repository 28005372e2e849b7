//! `sysdash battery`: battery status and gaming mode.

use serde::Serialize;

use sysdash_core::presentation::{
    battery_headline, battery_status_line, battery_tone, charging_status_label, format_watts,
};
use sysdash_core::{BatteryMonitor, BatteryStatus};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output::{self, Painter};

use super::Context;

#[derive(Debug, Serialize)]
struct BatteryReport {
    #[serde(flatten)]
    status: BatteryStatus,
    gaming_mode: bool,
    /// `false` when the battery read failed and defaults are shown.
    live: bool,
}

fn detail(painter: Painter, report: &BatteryReport) -> String {
    let s = &report.status;
    let tone = battery_tone(s.level, report.gaming_mode);
    let mut rows = vec![
        ("Level", painter.tone(&format!("{:.0}%", s.level), tone)),
        ("Status", battery_status_line(s.level, s.is_charging)),
        (
            "Charging",
            charging_status_label(s.charging_status.unwrap_or(s.is_charging)).to_owned(),
        ),
        ("Power Usage", format_watts(s.power_usage)),
        ("Discharge Rate", format_watts(s.discharge_rate)),
        ("Uptime", s.uptime.clone().unwrap_or_else(|| "—".to_owned())),
        (
            "Gaming Mode",
            if report.gaming_mode { "ON" } else { "OFF" }.to_owned(),
        ),
    ];
    if !report.live {
        rows.push(("Note", painter.label("battery service unavailable; showing defaults")));
    }
    output::detail(painter, battery_headline(s.is_charging), &rows)
}

pub async fn handle(ctx: &Context, global: &GlobalOpts) -> Result<(), CliError> {
    let (battery, gaming_mode) = BatteryMonitor::sample(&ctx.client).await;

    let report = BatteryReport {
        live: battery.poll.last_updated.is_some(),
        status: battery.snapshot.value,
        gaming_mode: gaming_mode.snapshot.value,
    };

    let painter = Painter::new(global.color);
    let out = output::render_single(
        global.output,
        &report,
        |r| detail(painter, r),
        |r| format!("{:.0}", r.status.level),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
