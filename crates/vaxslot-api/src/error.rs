use thiserror::Error;

/// Top-level error type for the `vaxslot-api` crate.
///
/// Covers every failure mode across the API surfaces: token acquisition,
/// transport, the appointment endpoints, and the OTP relay mailbox.
/// The CLI maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The server rejected the bearer token (HTTP 401).
    /// Recoverable by re-running OTP acquisition.
    #[error("Bearer token expired or invalid -- re-authentication required")]
    TokenExpired,

    /// OTP generation or validation failed.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// The OTP relay never produced a code within the validity window.
    #[error("No OTP arrived on the relay within {waited_secs}s")]
    OtpTimeout { waited_secs: u64 },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── API ─────────────────────────────────────────────────────────
    /// Non-success status from an appointment or location endpoint.
    #[error("API error (HTTP {status}): {body}")]
    Api { status: u16, body: String },

    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    // ── OTP relay ───────────────────────────────────────────────────
    /// The text-blob relay misbehaved (non-200, unreadable body).
    #[error("OTP relay error: {message}")]
    Relay { message: String },
}

impl Error {
    /// Returns `true` if this error means the bearer token is no longer
    /// usable and re-authentication might resolve it.
    pub fn is_token_expired(&self) -> bool {
        matches!(self, Self::TokenExpired)
    }

    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Relay { .. } => true,
            _ => false,
        }
    }
}
