//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use sysdash_config::ConfigError;
use sysdash_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const BACKEND: i32 = 3;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
#[allow(dead_code, unused_assignments)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not connect to {url}: {reason}")]
    #[diagnostic(
        code(sysdash::connection_failed),
        help(
            "Check that the monitoring service is running and reachable.\n\
             Override the endpoint with --system-url / --network-url,\n\
             or set it in the config file (sysdash config path)."
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out after {timeout_ms}ms")]
    #[diagnostic(
        code(sysdash::timeout),
        help("Increase the timeout with --timeout or check the service's responsiveness.")
    )]
    Timeout { timeout_ms: u64 },

    // ── Backend ──────────────────────────────────────────────────────

    #[error("{message}")]
    #[diagnostic(code(sysdash::backend))]
    Backend { message: String },

    #[error("API error: {message}")]
    #[diagnostic(code(sysdash::api_error))]
    ApiError {
        message: String,
        status: Option<u16>,
    },

    #[error("A speed test is already running")]
    #[diagnostic(
        code(sysdash::speed_test_in_progress),
        help("Wait for the running test to finish and try again.")
    )]
    SpeedTestInProgress,

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(sysdash::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Configuration file already exists at {path}")]
    #[diagnostic(
        code(sysdash::config_exists),
        help("Use --force to overwrite it, or edit the file directly.")
    )]
    ConfigExists { path: String },

    #[error("Configuration error: {message}")]
    #[diagnostic(
        code(sysdash::config),
        help("Check the config file (sysdash config show) and SYSDASH_* variables.")
    )]
    Config { message: String },

    // ── IO / Serialization ───────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render output: {0}")]
    #[diagnostic(code(sysdash::output))]
    Render(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Backend { .. } | Self::ApiError { .. } => exit_code::BACKEND,
            Self::SpeedTestInProgress | Self::ConfigExists { .. } => exit_code::CONFLICT,
            Self::Validation { .. } | Self::Config { .. } => exit_code::USAGE,
            Self::Io(_) | Self::Render(_) => exit_code::GENERAL,
        }
    }
}

// ── Conversions ──────────────────────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Unreachable { url, reason } => CliError::ConnectionFailed { url, reason },
            CoreError::Timeout { timeout_ms } => CliError::Timeout { timeout_ms },
            CoreError::Backend { message } => CliError::Backend { message },
            CoreError::Api { message, status } => CliError::ApiError { message, status },
            CoreError::SpeedTestInProgress => CliError::SpeedTestInProgress,
            CoreError::Config { message } => CliError::Config { message },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::Io(e) => CliError::Io(e),
            other => CliError::Config {
                message: other.to_string(),
            },
        }
    }
}

impl From<sysdash_api::Error> for CliError {
    fn from(err: sysdash_api::Error) -> Self {
        CoreError::from(err).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_errors_map_to_exit_codes() {
        let unreachable: CliError = CoreError::Unreachable {
            url: "http://127.0.0.1:5000/".into(),
            reason: "connection refused".into(),
        }
        .into();
        assert_eq!(unreachable.exit_code(), exit_code::CONNECTION);

        let backend: CliError = CoreError::Backend {
            message: "No servers available".into(),
        }
        .into();
        assert_eq!(backend.exit_code(), exit_code::BACKEND);
        assert_eq!(backend.to_string(), "No servers available");

        let busy: CliError = CoreError::SpeedTestInProgress.into();
        assert_eq!(busy.exit_code(), exit_code::CONFLICT);
    }

    #[test]
    fn config_validation_is_a_usage_error() {
        let err: CliError = ConfigError::Validation {
            field: "endpoints.system".into(),
            reason: "relative URL without a base".into(),
        }
        .into();
        assert_eq!(err.exit_code(), exit_code::USAGE);
    }
}
