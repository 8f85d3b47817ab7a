//! CLI configuration: thin wrapper around `syncdeck_config` shared types.
//!
//! Re-exports the shared types and adds resolution that respects
//! `GlobalOpts` flag overrides (--daemon, --api-key, etc.).

use std::time::Duration;

use secrecy::SecretString;

use syncdeck_core::{DaemonConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use syncdeck_config::{
    Config, Defaults, Profile, config_path, load_config_or_default, save_config,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Build a `DaemonConfig` from the config file, profile, and CLI overrides.
pub fn build_daemon_config(global: &GlobalOpts) -> Result<DaemonConfig, CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);

    if let Some(profile) = cfg.profiles.get(&profile_name) {
        return resolve_profile(profile, &profile_name, global, cfg.defaults.insecure);
    }

    // No profile: run from flags / env alone.
    let url_str = global.daemon.as_deref().ok_or_else(|| CliError::NoConfig {
        path: config_path().display().to_string(),
    })?;
    let url = syncdeck_config::parse_daemon_url(url_str)?;
    let api_key = resolve_api_key_with_flag(&Profile::default(), &profile_name, global)?;

    let tls = if global.insecure {
        TlsVerification::DangerAcceptInvalid
    } else {
        TlsVerification::SystemDefaults
    };

    Ok(DaemonConfig {
        url,
        api_key,
        tls,
        timeout: Duration::from_secs(global.timeout),
    })
}

/// Translate a `Profile` + global flags into a `DaemonConfig`.
///
/// CLI flag overrides take priority over profile values.
pub fn resolve_profile(
    profile: &Profile,
    profile_name: &str,
    global: &GlobalOpts,
    default_insecure: bool,
) -> Result<DaemonConfig, CliError> {
    // 1. Daemon URL (flag > env > profile)
    let url_str = global.daemon.as_deref().unwrap_or(&profile.daemon);
    let url = syncdeck_config::parse_daemon_url(url_str)?;

    // 2. API key (flag first, then the shared chain)
    let api_key = resolve_api_key_with_flag(profile, profile_name, global)?;

    // 3. TLS verification
    let tls = if global.insecure {
        TlsVerification::DangerAcceptInvalid
    } else {
        syncdeck_config::profile_tls(profile, default_insecure)
    };

    // 4. Timeout (profile > flag/env)
    let timeout = Duration::from_secs(profile.timeout.unwrap_or(global.timeout));

    Ok(DaemonConfig {
        url,
        api_key,
        tls,
        timeout,
    })
}

/// Resolve API key with CLI flag override, then fall through to shared resolution.
fn resolve_api_key_with_flag(
    profile: &Profile,
    profile_name: &str,
    global: &GlobalOpts,
) -> Result<SecretString, CliError> {
    if let Some(ref key) = global.api_key {
        return Ok(SecretString::from(key.clone()));
    }
    Ok(syncdeck_config::resolve_api_key(profile, profile_name)?)
}
