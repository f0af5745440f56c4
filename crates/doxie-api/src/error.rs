use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the `doxie-api` crate.
///
/// The four status variants mirror how the scanner's responses are
/// classified: `Authentication` is the 401 case of a client error, and all
/// four share the `"{status} response from {address}"` rendering. Transport,
/// decoding and file-write failures sit outside that taxonomy.
#[derive(Debug, Error)]
pub enum Error {
    // ── HTTP status ─────────────────────────────────────────────────
    /// 401 Unauthorized: wrong or missing password.
    #[error("{status} response from {address}")]
    Authentication { status: u16, address: String },

    /// Any other 4xx status.
    #[error("{status} response from {address}")]
    Client { status: u16, address: String },

    /// Any 5xx status.
    #[error("{status} response from {address}")]
    Server { status: u16, address: String },

    /// A status outside 2xx/4xx/5xx (informational or redirect).
    #[error("{status} response from {address}")]
    UnexpectedStatus { status: u16, address: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, TLS handshake, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// CA certificate or client construction error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// Writing a fetched file to disk failed.
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// The HTTP status code, for the four status-classified variants.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Authentication { status, .. }
            | Self::Client { status, .. }
            | Self::Server { status, .. }
            | Self::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` if the scanner answered with a non-success status.
    pub fn is_status_error(&self) -> bool {
        self.status().is_some()
    }

    /// Returns `true` for any 4xx, including 401.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Authentication { .. } | Self::Client { .. })
    }

    /// Returns `true` only for 401.
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// Returns `true` for any 5xx.
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::Server { .. })
    }

    /// Returns `true` if this is a 404 from the scanner.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Client { status: 404, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_errors_render_code_and_address() {
        let err = Error::Authentication {
            status: 401,
            address: "192.168.1.20".into(),
        };
        assert_eq!(err.to_string(), "401 response from 192.168.1.20");

        let err = Error::Server {
            status: 503,
            address: "doxie.local".into(),
        };
        assert_eq!(err.to_string(), "503 response from doxie.local");
    }

    #[test]
    fn authentication_is_a_client_error() {
        let auth = Error::Authentication {
            status: 401,
            address: String::new(),
        };
        let client = Error::Client {
            status: 403,
            address: String::new(),
        };

        assert!(auth.is_client_error());
        assert!(auth.is_authentication());
        assert!(client.is_client_error());
        assert!(!client.is_authentication());
        assert!(!auth.is_server_error());
    }

    #[test]
    fn io_errors_carry_no_status() {
        let err = Error::Io {
            path: PathBuf::from("/tmp/out.jpg"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert_eq!(err.status(), None);
        assert!(!err.is_status_error());
        assert!(err.to_string().starts_with("failed to write /tmp/out.jpg"));
    }
}
