//! Shared configuration for Doxie tools.
//!
//! TOML profiles, password resolution (env + keyring + plaintext), and
//! translation to `doxie_api::ClientConfig` / `TransportConfig`. The CLI
//! layers its flag overrides on top of this crate.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use doxie_api::{ClientConfig, TlsMode, TransportConfig};

/// Keyring service name for stored passwords.
const KEYRING_SERVICE: &str = "doxie";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named scanner profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    /// Accept the scanner's self-signed certificate.
    #[serde(default = "default_insecure")]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            insecure: default_insecure(),
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_insecure() -> bool {
    true
}
fn default_timeout() -> u64 {
    30
}

/// A named scanner profile.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Profile {
    /// Scanner host name or IP (e.g., "192.168.1.20").
    pub address: String,

    /// Plaintext password. Prefer the keyring or `password_env`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Environment variable name containing the password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_env: Option<String>,

    /// Path to custom CA certificate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,

    /// Override insecure TLS setting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insecure: Option<bool>,

    /// Override timeout (seconds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "doxie", "doxie").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("doxie");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    let path = config_path();

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed("DOXIE_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist or is invalid.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

fn keyring_entry(profile_name: &str) -> Result<keyring::Entry, keyring::Error> {
    keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/password"))
}

/// Resolve a profile's password.
///
/// Order: `password_env` variable, system keyring, plaintext. A profile with
/// none of these resolves to an empty password, meaning no basic auth.
pub fn resolve_password(profile: &Profile, profile_name: &str) -> SecretString {
    // 1. Profile's password_env → env var lookup
    if let Some(ref env_name) = profile.password_env {
        if let Ok(val) = std::env::var(env_name) {
            return SecretString::from(val);
        }
    }

    // 2. System keyring
    if let Ok(entry) = keyring_entry(profile_name) {
        if let Ok(secret) = entry.get_password() {
            return SecretString::from(secret);
        }
    }

    // 3. Plaintext in config
    SecretString::from(profile.password.clone().unwrap_or_default())
}

/// Store a profile's password in the system keyring.
pub fn store_password(profile_name: &str, password: &str) -> Result<(), ConfigError> {
    keyring_entry(profile_name)?.set_password(password)?;
    Ok(())
}

// ── Translation ─────────────────────────────────────────────────────

/// Transport settings for a profile, falling back to global defaults.
pub fn profile_transport(profile: &Profile, defaults: &Defaults) -> TransportConfig {
    let tls = if profile.insecure.unwrap_or(defaults.insecure) {
        TlsMode::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsMode::CustomCa(ca_path.clone())
    } else {
        TlsMode::System
    };

    TransportConfig {
        tls,
        timeout: Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout)),
    }
}

/// Build client and transport settings from a profile alone, without CLI overrides.
pub fn profile_to_client_config(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
) -> Result<(ClientConfig, TransportConfig), ConfigError> {
    let address = profile.address.trim();
    if address.is_empty() {
        return Err(ConfigError::Validation {
            field: "address".into(),
            reason: format!("profile '{profile_name}' has no scanner address"),
        });
    }

    let client = ClientConfig {
        address: address.to_owned(),
        password: resolve_password(profile, profile_name),
    };

    Ok((client, profile_transport(profile, defaults)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const SAMPLE: &str = r#"
default_profile = "office"

[defaults]
timeout = 10

[profiles.office]
address = "192.168.1.20"
password_env = "OFFICE_DOXIE_PASSWORD"

[profiles.home]
address = "doxie.local"
insecure = false
ca_cert = "/etc/doxie/ca.pem"
timeout = 5
"#;

    #[test]
    fn parses_profiles_and_defaults() {
        let cfg: Config = toml::from_str(SAMPLE).unwrap();

        assert_eq!(cfg.default_profile.as_deref(), Some("office"));
        assert_eq!(cfg.defaults.timeout, 10);
        assert!(cfg.defaults.insecure);
        assert_eq!(cfg.defaults.output, "table");
        assert_eq!(cfg.profiles.len(), 2);
        assert_eq!(cfg.profiles["office"].address, "192.168.1.20");
        assert_eq!(
            cfg.profiles["office"].password_env.as_deref(),
            Some("OFFICE_DOXIE_PASSWORD")
        );
    }

    #[test]
    fn transport_uses_defaults_when_profile_is_silent() {
        let cfg: Config = toml::from_str(SAMPLE).unwrap();
        let transport = profile_transport(&cfg.profiles["office"], &cfg.defaults);

        assert_eq!(transport.tls, TlsMode::DangerAcceptInvalid);
        assert_eq!(transport.timeout, Duration::from_secs(10));
    }

    #[test]
    fn transport_honors_profile_overrides() {
        let cfg: Config = toml::from_str(SAMPLE).unwrap();
        let transport = profile_transport(&cfg.profiles["home"], &cfg.defaults);

        assert_eq!(
            transport.tls,
            TlsMode::CustomCa(PathBuf::from("/etc/doxie/ca.pem"))
        );
        assert_eq!(transport.timeout, Duration::from_secs(5));
    }

    #[test]
    fn strict_tls_without_ca_uses_system_store() {
        let profile = Profile {
            address: "doxie.local".into(),
            insecure: Some(false),
            ..Profile::default()
        };
        let transport = profile_transport(&profile, &Defaults::default());
        assert_eq!(transport.tls, TlsMode::System);
    }

    #[test]
    fn blank_address_is_rejected() {
        let profile = Profile {
            address: "  ".into(),
            ..Profile::default()
        };
        let err = profile_to_client_config(&profile, "empty", &Defaults::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "address"));
    }

    #[test]
    fn saved_profiles_omit_unset_fields() {
        let mut cfg = Config::default();
        cfg.profiles.insert(
            "default".into(),
            Profile {
                address: "10.0.0.7".into(),
                ..Profile::default()
            },
        );

        let text = toml::to_string_pretty(&cfg).unwrap();
        assert!(text.contains("address = \"10.0.0.7\""));
        assert!(!text.contains("password"));
    }
}
