// ── Runtime connection configuration ──
//
// These types describe *how* to reach the daemon. They carry the API key
// and connection tuning, but never touch disk. The CLI constructs a
// `DaemonConfig` and hands it in.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use syncdeck_api::transport::{DEFAULT_TIMEOUT, TlsMode, TransportConfig};

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (the daemon GUI's self-signed certificate).
    DangerAcceptInvalid,
}

/// Configuration for talking to a single daemon.
///
/// Built by the CLI, passed to [`Console`](crate::Console). Core never
/// reads config files.
#[derive(Debug, Clone)]
pub struct DaemonConfig {
    /// Daemon GUI/REST root (e.g., `http://127.0.0.1:8384`).
    pub url: Url,
    /// REST API key sent as `X-API-Key`.
    pub api_key: SecretString,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Upper bound for every remote call.
    pub timeout: Duration,
}

impl DaemonConfig {
    /// Config with default TLS and timeout settings.
    pub fn new(url: Url, api_key: SecretString) -> Self {
        Self {
            url,
            api_key,
            tls: TlsVerification::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub(crate) fn transport(&self) -> TransportConfig {
        TransportConfig {
            tls: match &self.tls {
                TlsVerification::SystemDefaults => TlsMode::System,
                TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
                TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
            },
            timeout: self.timeout,
        }
    }
}
