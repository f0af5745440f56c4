// Device-level endpoints: status and restart.

use tracing::debug;

use crate::client::DoxieClient;
use crate::envelope::Envelope;
use crate::error::Error;
use crate::models::{Hello, HelloExtra};

impl DoxieClient {
    /// Basic device status.
    ///
    /// `GET /hello.json`
    pub async fn hello(&self) -> Result<Envelope, Error> {
        debug!("fetching device status");
        self.get("/hello.json").await
    }

    /// Extended status from the scanner side (firmware, power).
    ///
    /// `GET /hello_extra.json`
    pub async fn hello_extra(&self) -> Result<Envelope, Error> {
        debug!("fetching extended device status");
        self.get("/hello_extra.json").await
    }

    /// Restart the scanner's Wi-Fi module.
    ///
    /// `GET /restart.json`
    pub async fn restart(&self) -> Result<Envelope, Error> {
        debug!("requesting restart");
        self.get("/restart.json").await
    }

    /// [`hello`](Self::hello) decoded into [`Hello`].
    pub async fn hello_info(&self) -> Result<Hello, Error> {
        self.hello().await?.decode()
    }

    /// [`hello_extra`](Self::hello_extra) decoded into [`HelloExtra`].
    pub async fn hello_extra_info(&self) -> Result<HelloExtra, Error> {
        self.hello_extra().await?.decode()
    }
}
