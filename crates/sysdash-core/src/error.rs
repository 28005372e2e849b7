// ── Core error types ──
//
// Errors surfaced by sysdash-core. Pollers never propagate these; they
// feed a source's failure policy. Dispatcher actions return them to the
// caller. `From<sysdash_api::Error>` maps transport-layer failures into
// the domain variants below.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connectivity ─────────────────────────────────────────────────
    #[error("Cannot reach backend at {url}: {reason}")]
    Unreachable { url: String, reason: String },

    #[error("Request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    // ── Backend responses ────────────────────────────────────────────
    /// The backend answered with `{ "error": ... }`.
    #[error("{message}")]
    Backend { message: String },

    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if one was received).
        status: Option<u16>,
    },

    // ── Actions ──────────────────────────────────────────────────────
    #[error("A speed test is already running")]
    SpeedTestInProgress,

    // ── Configuration ────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// The backend-provided message when the server reported the error.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            Self::Backend { message } => Some(message),
            _ => None,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<sysdash_api::Error> for CoreError {
    fn from(err: sysdash_api::Error) -> Self {
        match err {
            sysdash_api::Error::Transport(ref e) if e.is_connect() => CoreError::Unreachable {
                url: e
                    .url()
                    .map_or_else(|| "<unknown>".into(), ToString::to_string),
                reason: e.to_string(),
            },
            sysdash_api::Error::Transport(ref e) if e.is_timeout() => {
                CoreError::Timeout { timeout_ms: 0 }
            }
            sysdash_api::Error::Transport(e) => CoreError::Api {
                message: e.to_string(),
                status: e.status().map(|s| s.as_u16()),
            },
            sysdash_api::Error::Timeout { timeout_ms } => CoreError::Timeout { timeout_ms },
            sysdash_api::Error::Backend { message, .. } => CoreError::Backend { message },
            sysdash_api::Error::Status { status, .. } => CoreError::Api {
                message: format!("HTTP error! Status: {status}"),
                status: Some(status),
            },
            sysdash_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("invalid URL: {e}"),
            },
            sysdash_api::Error::Deserialization { message, .. } => CoreError::Api {
                message: format!("unexpected response: {message}"),
                status: None,
            },
        }
    }
}
