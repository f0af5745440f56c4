// Doxie HTTP client
//
// Wraps `reqwest::Client` with the scanner's fixed URL template, optional
// basic auth, and response classification. Endpoint methods live in
// `device.rs` and `scans.rs` as inherent impls; this module only deals with
// transport mechanics.

use reqwest::header::{CONTENT_TYPE, HeaderValue};
use reqwest::{RequestBuilder, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::envelope::Envelope;
use crate::error::Error;
use crate::transport::TransportConfig;

/// Basic-auth username the scanner expects.
pub const USERNAME: &str = "doxie";

/// Port the scanner's API listens on.
const PORT: u16 = 8080;

/// Connection parameters for a scanner.
///
/// An empty address or password is a valid "not yet configured" state; an
/// empty password means requests go out without credentials.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub address: String,
    pub password: SecretString,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            address: String::new(),
            password: SecretString::from(String::new()),
        }
    }
}

impl ClientConfig {
    pub fn new(address: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            password: SecretString::from(password.into()),
        }
    }
}

/// HTTP client for a single Doxie scanner.
///
/// Every operation is one round trip to `https://{address}:8080{path}` and
/// resolves once the whole response has been read. Calls borrow the client
/// immutably; changing the address or password needs `&mut self`.
#[derive(Debug)]
pub struct DoxieClient {
    http: reqwest::Client,
    origin: String,
    address: String,
    password: SecretString,
}

impl DoxieClient {
    /// Create a client for the configured address, building the HTTP client
    /// from `transport`.
    pub fn new(config: ClientConfig, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            origin: origin_for(&config.address),
            address: config.address,
            password: config.password,
        })
    }

    /// Create a client with a pre-built `reqwest::Client` and an explicit
    /// origin (e.g. `http://127.0.0.1:9000`), bypassing the fixed
    /// `https://{address}:8080` template.
    ///
    /// The address reported in errors is the origin's host.
    pub fn with_client(
        http: reqwest::Client,
        origin: &str,
        password: SecretString,
    ) -> Result<Self, Error> {
        let url = Url::parse(origin)?;
        let address = url.host_str().unwrap_or_default().to_owned();
        Ok(Self {
            http,
            origin: origin.trim_end_matches('/').to_owned(),
            address,
            password,
        })
    }

    /// The scanner address used in URLs and error messages.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Scheme, host and port every path is appended to.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Whether requests carry basic-auth credentials.
    pub fn has_password(&self) -> bool {
        !self.password.expose_secret().is_empty()
    }

    /// Point the client at a different scanner.
    pub fn set_address(&mut self, address: impl Into<String>) {
        self.address = address.into();
        self.origin = origin_for(&self.address);
    }

    /// Replace the password. An empty password disables basic auth.
    pub fn set_password(&mut self, password: SecretString) {
        self.password = password;
    }

    /// The underlying HTTP client.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Append `path` to the origin and parse the result.
    ///
    /// Parsing resolves `.`/`..` segments and percent-encodes characters not
    /// allowed in a path; nothing else is escaped.
    pub(crate) fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(Url::parse(&format!("{}{path}", self.origin))?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and classify the response.
    pub(crate) async fn get(&self, path: &str) -> Result<Envelope, Error> {
        let url = self.url(path)?;
        debug!("GET {}", url);
        self.send(self.http.get(url)).await
    }

    /// Send a POST request with a JSON body and classify the response.
    pub(crate) async fn post(
        &self,
        path: &str,
        body: &(impl Serialize + Sync),
    ) -> Result<Envelope, Error> {
        let url = self.url(path)?;
        debug!("POST {}", url);
        self.send(self.http.post(url).json(body)).await
    }

    /// Send a DELETE request and classify the response.
    pub(crate) async fn delete(&self, path: &str) -> Result<Envelope, Error> {
        let url = self.url(path)?;
        debug!("DELETE {}", url);
        self.send(self.http.delete(url)).await
    }

    async fn send(&self, request: RequestBuilder) -> Result<Envelope, Error> {
        let resp = self
            .authorize(request)
            .send()
            .await
            .map_err(Error::Transport)?;

        self.classify(resp).await
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let password = self.password.expose_secret();
        if password.is_empty() {
            request
        } else {
            request.basic_auth(USERNAME, Some(password))
        }
    }

    /// Map a response onto an [`Envelope`] or a status error.
    ///
    /// 401 is checked before the generic 4xx bucket.
    async fn classify(&self, resp: reqwest::Response) -> Result<Envelope, Error> {
        let status = resp.status();
        debug!(status = status.as_u16(), "response from {}", self.address);

        if status == StatusCode::NO_CONTENT {
            return Ok(Envelope::Ack(true));
        }

        if status.is_success() {
            let json = is_json(resp.headers().get(CONTENT_TYPE));
            let body = resp.bytes().await.map_err(Error::Transport)?;
            if !json {
                return Ok(Envelope::Raw(body));
            }
            let value = serde_json::from_slice(&body).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body: String::from_utf8_lossy(&body).into_owned(),
            })?;
            return Ok(Envelope::Decoded(value));
        }

        let status = status.as_u16();
        let address = self.address.clone();
        Err(if status == StatusCode::UNAUTHORIZED.as_u16() {
            Error::Authentication { status, address }
        } else if (400..500).contains(&status) {
            Error::Client { status, address }
        } else if (500..600).contains(&status) {
            Error::Server { status, address }
        } else {
            Error::UnexpectedStatus { status, address }
        })
    }
}

fn origin_for(address: &str) -> String {
    format!("https://{address}:{PORT}")
}

/// `true` when the primary media type (before any `;` parameters) is
/// `application/json`.
fn is_json(content_type: Option<&HeaderValue>) -> bool {
    content_type
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .is_some_and(|media| media.trim().eq_ignore_ascii_case("application/json"))
}
