//! CLI error types with miette diagnostics.
//!
//! Maps `doxie_api::Error` variants into user-facing errors with actionable
//! help text and process exit codes.

use miette::Diagnostic;
use thiserror::Error;

use doxie_config::ConfigError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
    pub const SERVER: i32 = 9;
    pub const IO: i32 = 10;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to scanner at {address}")]
    #[diagnostic(
        code(doxie::connection_failed),
        help(
            "Check that the scanner is powered on and on the same network.\n\
             Its address is shown on the Doxie app or the scanner's Wi-Fi page."
        )
    )]
    ConnectionFailed {
        address: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("TLS error talking to {address}: {message}")]
    #[diagnostic(
        code(doxie::tls_error),
        help(
            "The scanner uses a self-signed certificate.\n\
             Use --insecure (-k) to accept it, or configure ca_cert in your profile."
        )
    )]
    TlsError { address: String, message: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(doxie::timeout),
        help("Increase timeout with --timeout or check that the scanner is awake.")
    )]
    Timeout,

    // ── Scanner responses ────────────────────────────────────────────
    #[error("Authentication failed ({message})")]
    #[diagnostic(
        code(doxie::auth_failed),
        help(
            "The scanner has a password set. Pass --password, or store it with:\n\
             doxie config set-password --profile {profile}"
        )
    )]
    AuthFailed { profile: String, message: String },

    #[error("Scan not found ({message})")]
    #[diagnostic(
        code(doxie::not_found),
        help("Run: doxie scans list to see available scan identifiers")
    )]
    NotFound { message: String },

    #[error("Scanner rejected the request ({message})")]
    #[diagnostic(code(doxie::client_error))]
    Rejected { message: String },

    #[error("Scanner error ({message})")]
    #[diagnostic(
        code(doxie::server_error),
        help("The scanner may be busy scanning or low on storage. Try again shortly.")
    )]
    ServerError { message: String },

    #[error("Unexpected response ({message})")]
    #[diagnostic(code(doxie::unexpected_status))]
    UnexpectedStatus { message: String },

    #[error("Could not decode the scanner's response: {message}")]
    #[diagnostic(code(doxie::decode))]
    Decode { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(doxie::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(doxie::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: doxie config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No scanner address configured")]
    #[diagnostic(
        code(doxie::no_config),
        help(
            "Pass --address (or set DOXIE_ADDRESS), or create a profile with: doxie config init\n\
             Expected config at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(doxie::config))]
    Config(#[from] ConfigError),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(doxie::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO ───────────────────────────────────────────────────────────
    #[error("Could not write {path}")]
    #[diagnostic(code(doxie::write_failed))]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::TlsError { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::AuthFailed { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::ServerError { .. } => exit_code::SERVER,
            Self::Validation { .. }
            | Self::NonInteractiveRequiresYes { .. }
            | Self::NoConfig { .. }
            | Self::ProfileNotFound { .. } => exit_code::USAGE,
            Self::WriteFailed { .. } | Self::Io(_) => exit_code::IO,
            _ => exit_code::GENERAL,
        }
    }

    /// Name the active profile in authentication help text.
    pub fn with_profile(self, profile: &str) -> Self {
        match self {
            Self::AuthFailed { message, .. } => Self::AuthFailed {
                profile: profile.into(),
                message,
            },
            other => other,
        }
    }
}

// ── doxie_api::Error → CliError mapping ─────────────────────────────

impl From<doxie_api::Error> for CliError {
    fn from(err: doxie_api::Error) -> Self {
        use doxie_api::Error as Api;

        match err {
            Api::Authentication { .. } => CliError::AuthFailed {
                profile: "default".into(),
                message: err.to_string(),
            },

            Api::Client { status: 404, .. } => CliError::NotFound {
                message: err.to_string(),
            },

            Api::Client { .. } => CliError::Rejected {
                message: err.to_string(),
            },

            Api::Server { .. } => CliError::ServerError {
                message: err.to_string(),
            },

            Api::UnexpectedStatus { .. } => CliError::UnexpectedStatus {
                message: err.to_string(),
            },

            Api::Transport(e) if e.is_timeout() => CliError::Timeout,

            Api::Transport(e) => CliError::ConnectionFailed {
                address: e
                    .url()
                    .and_then(|u| u.host_str())
                    .unwrap_or("(unknown)")
                    .to_owned(),
                source: Box::new(e),
            },

            Api::InvalidUrl(e) => CliError::Validation {
                field: "address".into(),
                reason: e.to_string(),
            },

            Api::Tls(message) => CliError::TlsError {
                address: "(client setup)".into(),
                message,
            },

            Api::Deserialization { message, .. } => CliError::Decode { message },

            Api::Io { path, source } => CliError::WriteFailed {
                path: path.display().to_string(),
                source,
            },
        }
    }
}
