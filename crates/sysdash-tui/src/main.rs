//! `sysdash-tui`: terminal dashboard for system, battery and network
//! monitoring.
//!
//! Built on [ratatui](https://ratatui.rs). After the intro animation the
//! screens are reachable with number keys (1-3): Home, Battery, Network.
//! Each screen mounts its own `sysdash-core` monitor while visible.
//!
//! Logs go to a file (default `/tmp/sysdash-tui.log`) so they never
//! corrupt the terminal.

mod action;
mod app;
mod component;
mod data_bridge;
mod event;
mod screen;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::App;

/// Terminal dashboard for system, battery and network monitoring.
#[derive(Parser, Debug)]
#[command(name = "sysdash-tui", version, about)]
struct Cli {
    /// System service base URL (e.g., http://localhost:5000)
    #[arg(long, env = "SYSDASH_SYSTEM_URL")]
    system_url: Option<String>,

    /// Network service base URL (e.g., http://localhost:5001)
    #[arg(long, env = "SYSDASH_NETWORK_URL")]
    network_url: Option<String>,

    /// Log file path (defaults to /tmp/sysdash-tui.log)
    #[arg(long, default_value = "/tmp/sysdash-tui.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// File-only tracing; stdout belongs to the terminal UI. Hold the guard
/// for the life of the process so buffered lines get flushed.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "sysdash_tui={log_level},sysdash_core={log_level},sysdash_api={log_level}"
        ))
    });

    let log_dir = cli
        .log_file
        .parent()
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("sysdash-tui.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

/// Config file + env, with CLI URLs on top.
fn resolve_config(cli: &Cli) -> sysdash_config::Config {
    let mut cfg = sysdash_config::load_config().unwrap_or_else(|e| {
        warn!(error = %e, "config unreadable, using defaults");
        sysdash_config::Config::default()
    });
    if let Some(url) = &cli.system_url {
        cfg.endpoints.system.clone_from(url);
    }
    if let Some(url) = &cli.network_url {
        cfg.endpoints.network.clone_from(url);
    }
    cfg
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Hooks go in before the terminal switches to raw mode.
    tui::install_hooks()?;

    let _log_guard = setup_tracing(&cli);

    let cfg = resolve_config(&cli);
    let monitor_config =
        sysdash_config::to_monitor_config(&cfg).wrap_err("invalid sysdash configuration")?;
    let client = sysdash_core::connect(&monitor_config).wrap_err("failed to build HTTP client")?;

    info!(
        system = %cfg.endpoints.system,
        network = %cfg.endpoints.network,
        "starting sysdash-tui"
    );

    let mut app = App::new(client, monitor_config.polling);
    app.run().await?;

    Ok(())
}
