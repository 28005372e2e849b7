//! Global flag overrides on top of the shared `sysdash-config` file.
//!
//! Precedence: CLI flags > `SYSDASH_*` env > config file > defaults.

use sysdash_config::Config;
use sysdash_core::MonitorConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Load the shared config and apply flag overrides.
pub fn resolve(global: &GlobalOpts) -> Result<Config, CliError> {
    let mut cfg = sysdash_config::load_config()?;
    apply_overrides(&mut cfg, global);
    Ok(cfg)
}

pub fn apply_overrides(cfg: &mut Config, global: &GlobalOpts) {
    if let Some(url) = &global.system_url {
        cfg.endpoints.system.clone_from(url);
    }
    if let Some(url) = &global.network_url {
        cfg.endpoints.network.clone_from(url);
    }
    if let Some(secs) = global.timeout {
        cfg.transport.timeout_secs = secs;
    }
}

/// Resolved and validated runtime configuration.
pub fn monitor_config(global: &GlobalOpts) -> Result<MonitorConfig, CliError> {
    let cfg = resolve(global)?;
    Ok(sysdash_config::to_monitor_config(&cfg)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::Cli;

    #[test]
    fn flags_override_file_values() {
        let cli = Cli::parse_from([
            "sysdash",
            "--system-url",
            "http://10.0.0.2:5000",
            "--timeout",
            "5",
            "status",
        ]);
        let mut cfg = Config::default();
        apply_overrides(&mut cfg, &cli.global);

        assert_eq!(cfg.endpoints.system, "http://10.0.0.2:5000");
        assert_eq!(cfg.endpoints.network, Config::default().endpoints.network);
        assert_eq!(cfg.transport.timeout_secs, 5);
    }
}
