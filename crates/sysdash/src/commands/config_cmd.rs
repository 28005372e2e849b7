//! Config subcommand handlers.

use sysdash_config::Config;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::config;
use crate::error::CliError;
use crate::output;

fn render_toml(cfg: &Config) -> Result<String, CliError> {
    toml::to_string_pretty(cfg).map_err(|e| CliError::Render(e.to_string()))
}

pub fn handle(args: &ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init { force } => {
            let path = sysdash_config::config_path();
            if path.exists() && !force {
                return Err(CliError::ConfigExists {
                    path: path.display().to_string(),
                });
            }
            let written = sysdash_config::save_config(&Config::default())?;
            if !global.quiet {
                eprintln!("Wrote default configuration to {}", written.display());
            }
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = config::resolve(global)?;
            let out = match global.output {
                OutputFormat::Json => output::render_json_pretty(&cfg)?,
                OutputFormat::JsonCompact => output::render_json_compact(&cfg)?,
                OutputFormat::Yaml => output::render_yaml(&cfg)?,
                OutputFormat::Table | OutputFormat::Plain => render_toml(&cfg)?,
            };
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(
                &sysdash_config::config_path().display().to_string(),
                global.quiet,
            );
            Ok(())
        }
    }
}
