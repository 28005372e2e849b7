//! `sysdash bandwidth --timeframe <window>`.

use tabled::Tabled;

use sysdash_core::presentation::format_speed;
use sysdash_core::{BandwidthDataPoint, TimeRange};

use crate::cli::{BandwidthArgs, GlobalOpts, TimeframeArg};
use crate::error::CliError;
use crate::output;

use super::Context;

#[derive(Tabled)]
struct BandwidthRow {
    #[tabled(rename = "Time")]
    timestamp: String,
    #[tabled(rename = "Download (Mbps)")]
    download: String,
    #[tabled(rename = "Upload (Mbps)")]
    upload: String,
}

fn row(p: &BandwidthDataPoint) -> BandwidthRow {
    BandwidthRow {
        timestamp: p.timestamp.clone(),
        download: format_speed(p.download),
        upload: format_speed(p.upload),
    }
}

fn to_range(arg: TimeframeArg) -> TimeRange {
    match arg {
        TimeframeArg::FiveMinutes => TimeRange::FiveMinutes,
        TimeframeArg::OneHour => TimeRange::OneHour,
        TimeframeArg::OneDay => TimeRange::OneDay,
    }
}

pub async fn handle(
    ctx: &Context,
    args: &BandwidthArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let range = to_range(args.timeframe);
    let points = ctx.client.get_bandwidth_history(range).await?;
    tracing::debug!(%range, count = points.len(), "bandwidth history");

    let out = output::render_list(global.output, &points, row, |p| {
        format!("{} {} {}", p.timestamp, p.download, p.upload)
    })?;
    output::print_output(&out, global.quiet);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeframe_args_match_query_values() {
        for (arg, wire) in [
            (TimeframeArg::FiveMinutes, "5min"),
            (TimeframeArg::OneHour, "1hour"),
            (TimeframeArg::OneDay, "1day"),
        ] {
            assert_eq!(to_range(arg).to_string(), wire);
        }
    }
}
