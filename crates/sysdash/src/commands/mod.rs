//! Command dispatch: bridges CLI args -> core monitors/dispatcher -> output.

pub mod bandwidth;
pub mod battery;
pub mod config_cmd;
pub mod history;
pub mod network;
pub mod power_plan;
pub mod speedtest;
pub mod status;

use std::sync::Arc;

use sysdash_core::{MonitorClient, MonitorConfig};

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Everything a backend-bound handler needs.
pub struct Context {
    pub client: Arc<MonitorClient>,
    pub config: MonitorConfig,
}

/// Dispatch a backend-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, ctx: &Context, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Status => status::handle(ctx, global).await,
        Command::Battery => battery::handle(ctx, global).await,
        Command::Network(args) => network::handle(ctx, &args, global).await,
        Command::Speedtest => speedtest::handle(ctx, global).await,
        Command::PowerPlan(args) => power_plan::handle(ctx, &args, global).await,
        Command::Bandwidth(args) => bandwidth::handle(ctx, &args, global).await,
        Command::ClearHistory => history::handle(ctx, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}
