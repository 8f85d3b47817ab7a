//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use syncdeck_config::ConfigError;
use syncdeck_core::{CoreError, GatewayCause};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Daemon ───────────────────────────────────────────────────────
    #[error("Could not reach the daemon: {message}")]
    #[diagnostic(
        code(syncdeck::connection_failed),
        help(
            "Check that the daemon is running and its GUI/REST address is reachable.\n\
             Try: syncdeck system status --daemon http://127.0.0.1:8384"
        )
    )]
    ConnectionFailed { message: String },

    #[error("The daemon rejected the API key: {message}")]
    #[diagnostic(
        code(syncdeck::auth_failed),
        help(
            "Copy the API key from the daemon GUI (Actions > Settings > General).\n\
             Run: syncdeck config set-key"
        )
    )]
    AuthFailed { message: String },

    #[error("Request timed out: {message}")]
    #[diagnostic(
        code(syncdeck::timeout),
        help("Increase timeout with --timeout or check daemon responsiveness.")
    )]
    Timeout { message: String },

    #[error("Daemon error: {message}")]
    #[diagnostic(code(syncdeck::daemon_error))]
    Daemon { message: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(syncdeck::not_found),
        help("Run: syncdeck {list_command} to see what exists")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("{resource_type} '{identifier}' already exists")]
    #[diagnostic(code(syncdeck::conflict))]
    Conflict {
        resource_type: String,
        identifier: String,
    },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid {field}: {reason}")]
    #[diagnostic(code(syncdeck::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("No API key configured for profile '{profile}'")]
    #[diagnostic(
        code(syncdeck::no_credentials),
        help(
            "Configure one with: syncdeck config init\n\
             Or pass --api-key, or set SYNCDECK_API_KEY / SYNCTHING_API_KEY."
        )
    )]
    NoCredentials { profile: String },

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(syncdeck::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: syncdeck config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("Configuration file not found")]
    #[diagnostic(
        code(syncdeck::no_config),
        help(
            "Create one with: syncdeck config init\n\
             Expected at: {path}\n\
             Or pass --daemon and --api-key."
        )
    )]
    NoConfig { path: String },

    #[error("Configuration error: {0}")]
    #[diagnostic(code(syncdeck::config))]
    Config(String),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(syncdeck::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Could not render output: {0}")]
    #[diagnostic(code(syncdeck::render))]
    Render(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Conflict { .. } => exit_code::CONFLICT,
            Self::Validation { .. } | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation { message } => CliError::Validation {
                field: "input".into(),
                reason: message,
            },

            CoreError::NotFound {
                entity_type,
                identifier,
            } => CliError::NotFound {
                list_command: format!("{}s list", entity_type.to_lowercase()),
                resource_type: entity_type,
                identifier,
            },

            CoreError::Conflict {
                entity_type,
                identifier,
            } => CliError::Conflict {
                resource_type: entity_type,
                identifier,
            },

            CoreError::GatewayUnavailable { message, cause } => match cause {
                GatewayCause::Unreachable => CliError::ConnectionFailed { message },
                GatewayCause::Timeout => CliError::Timeout { message },
                GatewayCause::Unauthorized => CliError::AuthFailed { message },
                GatewayCause::Upstream => CliError::Daemon { message },
            },

            CoreError::Config { message } => CliError::Config(message),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::NoCredentials { profile } => CliError::NoCredentials { profile },
            ConfigError::Io(e) => CliError::Io(e),
            other => CliError::Config(other.to_string()),
        }
    }
}
