//! Clap derive structures for the `sysdash` CLI.
//!
//! Only depends on clap + clap_complete so `build.rs` can include it for
//! man page generation.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// sysdash -- one-shot snapshots and actions against the monitoring services
#[derive(Debug, Parser)]
#[command(
    name = "sysdash",
    version,
    about = "Query system, battery and network monitoring services",
    long_about = "Print snapshots from the sysdash system and network services,\n\
        run speed tests and switch power plans from the command line.\n\n\
        Use sysdash-tui for the live dashboard.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// System service base URL (overrides config)
    #[arg(long, env = "SYSDASH_SYSTEM_URL", global = true)]
    pub system_url: Option<String>,

    /// Network service base URL (overrides config)
    #[arg(long, env = "SYSDASH_NETWORK_URL", global = true)]
    pub network_url: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "SYSDASH_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Request timeout in seconds (overrides config)
    #[arg(long, env = "SYSDASH_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Usage percentages and CPU temperature
    #[command(alias = "st")]
    Status,

    /// Battery level, charging state and gaming mode
    #[command(alias = "bat")]
    Battery,

    /// Connection, speeds and connected devices
    #[command(alias = "net")]
    Network(NetworkArgs),

    /// Run a speed test against the network service
    Speedtest,

    /// Switch the system power plan
    PowerPlan(PowerPlanArgs),

    /// Bandwidth history for a time window
    #[command(alias = "bw")]
    Bandwidth(BandwidthArgs),

    /// Clear the network service's recorded history
    ClearHistory,

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Network ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct NetworkArgs {
    /// List connected devices instead of the connection summary
    #[arg(long, short = 'd')]
    pub devices: bool,
}

// ── Power plan ───────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct PowerPlanArgs {
    /// Plan to activate
    pub plan: PowerPlanArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PowerPlanArg {
    /// Maximum performance
    HighPerformance,
    /// Balanced performance and power use
    Balanced,
    /// Minimal power use
    PowerSaver,
}

// ── Bandwidth ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct BandwidthArgs {
    /// History window
    #[arg(long, short = 't', default_value = "5min")]
    pub timeframe: TimeframeArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TimeframeArg {
    /// Last five minutes
    #[value(name = "5min")]
    FiveMinutes,
    /// Last hour
    #[value(name = "1hour")]
    OneHour,
    /// Last day
    #[value(name = "1day")]
    OneDay,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Write a config file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Display the resolved configuration (file + env + flags)
    Show,

    /// Print the config file path
    Path,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
