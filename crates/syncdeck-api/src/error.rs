use std::time::Duration;

use thiserror::Error;

/// Top-level error type for the `syncdeck-api` crate.
///
/// Covers every way a call against the daemon can fail: transport,
/// authentication, non-success HTTP statuses, and undecodable bodies.
/// `syncdeck-core` folds all of these into a single gateway failure.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// API key missing or rejected (HTTP 401 / 403).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request timed out.
    #[error("Request timed out after {timeout:?}")]
    Timeout { timeout: Duration },

    /// TLS handshake, certificate, or client construction error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Daemon ──────────────────────────────────────────────────────
    /// Any other non-success status returned by the daemon.
    #[error("Daemon returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this is a transient error worth retrying.
    ///
    /// The client itself never retries; callers may.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Timeout { .. } => true,
            Self::Http { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Returns `true` if the daemon answered 404.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Http { status: 404, .. } => true,
            _ => false,
        }
    }

    /// Returns `true` for failures that happen before any request is sent.
    pub fn is_setup(&self) -> bool {
        matches!(self, Self::InvalidUrl(_) | Self::Tls(_))
    }
}
