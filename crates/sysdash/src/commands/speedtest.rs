//! `sysdash speedtest`: run one speed test through the shared dispatcher,
//! with a spinner that follows the test phases.

use std::sync::Arc;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use sysdash_core::presentation::format_speed;
use sysdash_core::{ActionDispatcher, NetworkStateStore, NoRefresh, SpeedTestResult};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output::{self, Painter};

use super::Context;

const SPINNER_FRAMES: [&str; 11] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "✓"];

fn detail(painter: Painter, result: &SpeedTestResult) -> String {
    let mut rows = vec![
        ("Download", format!("{} Mbps", format_speed(result.download))),
        ("Upload", format!("{} Mbps", format_speed(result.upload))),
        ("Ping", format!("{} ms", format_speed(result.ping))),
    ];
    if let Some(server) = &result.server {
        rows.push(("Server", format!("{} ({})", server.name, server.location)));
        rows.push(("Sponsor", server.sponsor.clone()));
        rows.push(("Distance", server.distance.clone()));
    }
    output::detail(painter, "Speed Test", &rows)
}

fn spinner(quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new_spinner()
        .with_style(ProgressStyle::default_spinner().tick_strings(&SPINNER_FRAMES));
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

pub async fn handle(ctx: &Context, global: &GlobalOpts) -> Result<(), CliError> {
    let dispatcher = ActionDispatcher::new(Arc::clone(&ctx.client), NetworkStateStore::new());

    let bar = spinner(global.quiet);
    let mut progress = dispatcher.network_state().subscribe();
    let follow = {
        let bar = bar.clone();
        tokio::spawn(async move {
            while progress.changed().await.is_ok() {
                let state = progress.borrow_and_update().clone();
                bar.set_message(format!("{} {}%", state.current_phase, state.scan_progress));
            }
        })
    };

    let result = dispatcher.run_speed_test(&NoRefresh).await;
    follow.abort();
    bar.finish_and_clear();
    let result = result?;

    let painter = Painter::new(global.color);
    let out = output::render_single(
        global.output,
        &result,
        |r| detail(painter, r),
        |r| format!("{} {} {}", r.download, r.upload, r.ping),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
