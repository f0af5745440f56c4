// doxie-api: Async Rust client for the Doxie scanner's HTTP/JSON API

pub mod client;
pub mod device;
pub mod envelope;
pub mod error;
pub mod models;
pub mod scans;
pub mod transport;

pub use client::{ClientConfig, DoxieClient, USERNAME};
pub use envelope::Envelope;
pub use error::Error;
pub use models::{Hello, HelloExtra, ScanEntry};
pub use transport::{TlsMode, TransportConfig};
