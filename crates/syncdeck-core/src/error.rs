// ── Core error types ──
//
// User-facing errors from syncdeck-core. Consumers never see HTTP status
// codes or JSON parse failures directly: the `From<syncdeck_api::Error>`
// impl folds every remote failure into `GatewayUnavailable`.

use strum::Display;
use thiserror::Error;

/// What went wrong talking to the daemon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum GatewayCause {
    /// Connection refused, DNS failure, or similar.
    Unreachable,
    /// No answer within the configured timeout.
    Timeout,
    /// The API key was missing or rejected.
    Unauthorized,
    /// The daemon answered with a failure status or an unreadable body.
    Upstream,
}

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Input errors ─────────────────────────────────────────────────
    /// Malformed or missing input. Detected locally, never retried.
    #[error("Validation failed: {message}")]
    Validation { message: String },

    // ── Document errors ──────────────────────────────────────────────
    /// A referenced device or folder is absent from the fetched document.
    #[error("{entity_type} '{identifier}' not found")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    /// Creation of an entity whose id is already taken.
    #[error("{entity_type} '{identifier}' already exists")]
    Conflict {
        entity_type: String,
        identifier: String,
    },

    // ── Remote errors ────────────────────────────────────────────────
    /// The daemon is unreachable, timed out, or answered with a failure.
    #[error("Daemon unavailable: {message}")]
    GatewayUnavailable { message: String, cause: GatewayCause },

    // ── Local setup errors ───────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub(crate) fn device_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Device".into(),
            identifier: identifier.into(),
        }
    }

    pub(crate) fn folder_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Folder".into(),
            identifier: identifier.into(),
        }
    }

    /// Returns `true` if the failure came from the daemon rather than the input.
    pub fn is_gateway(&self) -> bool {
        matches!(self, Self::GatewayUnavailable { .. })
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<syncdeck_api::Error> for CoreError {
    fn from(err: syncdeck_api::Error) -> Self {
        use syncdeck_api::Error as ApiError;

        if err.is_setup() {
            return CoreError::Config {
                message: err.to_string(),
            };
        }
        let cause = match &err {
            ApiError::Timeout { .. } => GatewayCause::Timeout,
            ApiError::Transport(_) => GatewayCause::Unreachable,
            ApiError::Authentication { .. } => GatewayCause::Unauthorized,
            _ => GatewayCause::Upstream,
        };
        CoreError::GatewayUnavailable {
            message: err.to_string(),
            cause,
        }
    }
}
