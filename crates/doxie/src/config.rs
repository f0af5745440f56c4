//! CLI configuration: a thin wrapper around the shared `doxie_config` types.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--address, --password, --insecure, --timeout).

use std::time::Duration;

use clap::ValueEnum;
use secrecy::SecretString;
use tracing::warn;

use doxie_api::{ClientConfig, TlsMode, TransportConfig};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use doxie_config::{
    Config, Defaults, Profile, config_path, load_config_or_default, save_config,
};

/// Everything needed to build a client, plus the profile it came from.
#[derive(Debug)]
pub struct Resolved {
    pub profile_name: String,
    pub client: ClientConfig,
    pub transport: TransportConfig,
}

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Comma-separated profile names for diagnostics.
pub fn available_profiles(config: &Config) -> String {
    let mut names: Vec<_> = config.profiles.keys().cloned().collect();
    if names.is_empty() {
        return "(none)".into();
    }
    names.sort();
    names.join(", ")
}

/// Output format: `--output` / `DOXIE_OUTPUT`, else `defaults.output`.
///
/// An unrecognised config value falls back to a table.
pub fn output_format(global: &GlobalOpts, cfg: &Config) -> OutputFormat {
    if let Some(format) = global.output {
        return format;
    }
    OutputFormat::from_str(cfg.defaults.output.trim(), true).unwrap_or_else(|_| {
        warn!(value = %cfg.defaults.output, "unknown defaults.output, using table");
        OutputFormat::Table
    })
}

/// Combine config file, profile and flags into client settings.
///
/// Flags win over the profile, which wins over `[defaults]`. Without a
/// matching profile `--address` alone is enough; the password is optional.
pub fn resolve(global: &GlobalOpts, cfg: &Config) -> Result<Resolved, CliError> {
    let profile_name = active_profile_name(global, cfg);
    let profile = cfg.profiles.get(&profile_name);

    if profile.is_none() && global.profile.is_some() {
        return Err(CliError::ProfileNotFound {
            name: profile_name,
            available: available_profiles(cfg),
        });
    }

    // 1. Address (flag > env > profile)
    let address = global
        .address
        .as_deref()
        .or(profile.map(|p| p.address.as_str()))
        .map(str::trim)
        .unwrap_or_default();
    if address.is_empty() {
        return Err(CliError::NoConfig {
            path: config_path().display().to_string(),
        });
    }

    // 2. Password (flag > env > profile chain)
    let password = match (&global.password, profile) {
        (Some(pw), _) => SecretString::from(pw.clone()),
        (None, Some(p)) => doxie_config::resolve_password(p, &profile_name),
        (None, None) => SecretString::from(String::new()),
    };

    // 3. Transport
    let mut transport = match profile {
        Some(p) => doxie_config::profile_transport(p, &cfg.defaults),
        None => TransportConfig {
            tls: if cfg.defaults.insecure {
                TlsMode::DangerAcceptInvalid
            } else {
                TlsMode::System
            },
            timeout: Duration::from_secs(cfg.defaults.timeout),
        },
    };
    if global.insecure {
        transport.tls = TlsMode::DangerAcceptInvalid;
    }
    if let Some(secs) = global.timeout {
        transport.timeout = Duration::from_secs(secs);
    }

    Ok(Resolved {
        profile_name,
        client: ClientConfig {
            address: address.to_owned(),
            password,
        },
        transport,
    })
}
