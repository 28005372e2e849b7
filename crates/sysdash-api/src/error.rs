use thiserror::Error;

/// Top-level error type for the `sysdash-api` crate.
///
/// Covers every failure mode of a single backend request: transport,
/// HTTP status, application errors embedded in a 2xx body, and decoding.
/// `sysdash-core` decides per data source whether an error degrades to
/// mock data, surfaces to the user, or is only logged.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request exceeded its client-side deadline.
    #[error("Request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    // ── HTTP ────────────────────────────────────────────────────────
    /// Non-2xx response without a usable `{error}` field.
    #[error("HTTP error! Status: {status}")]
    Status { status: u16, body: String },

    // ── Backend ─────────────────────────────────────────────────────
    /// Application error reported by the backend as `{ "error": "..." }`.
    ///
    /// `status` is the HTTP status the body arrived with; 200 means the
    /// error was embedded in an otherwise successful response.
    #[error("Backend error: {message}")]
    Backend { message: String, status: u16 },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` for connection-level failures and timeouts.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Timeout { .. } => true,
            _ => false,
        }
    }

    /// Returns `true` if the backend itself reported the error.
    pub fn is_backend(&self) -> bool {
        matches!(self, Self::Backend { .. })
    }

    /// The backend-provided message, if any.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            Self::Backend { message, .. } => Some(message),
            _ => None,
        }
    }

    /// HTTP status code associated with this error, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } | Self::Backend { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
