// System endpoints
//
// The configuration document is read and replaced wholesale; there is no
// partial-patch endpoint. Status and connections are read-only.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::client::DaemonClient;
use crate::error::Error;
use crate::models::{Connections, SystemStatus};

impl DaemonClient {
    /// Fetch the full configuration document.
    ///
    /// `GET /rest/system/config`
    ///
    /// Generic over the document type so callers can decode into an
    /// open record that preserves fields they do not model.
    pub async fn get_config<T: DeserializeOwned>(&self) -> Result<T, Error> {
        let url = self.rest_url("system/config")?;
        debug!("fetching configuration document");
        self.get_json(url).await
    }

    /// Replace the configuration document.
    ///
    /// `POST /rest/system/config` with the full document as body.
    pub async fn replace_config<T: Serialize + Sync>(&self, doc: &T) -> Result<(), Error> {
        let url = self.rest_url("system/config")?;
        debug!("replacing configuration document");
        self.post_json(url, doc).await
    }

    /// Fetch daemon status, including this node's own device id.
    ///
    /// `GET /rest/system/status`
    pub async fn get_status(&self) -> Result<SystemStatus, Error> {
        let url = self.rest_url("system/status")?;
        debug!("fetching system status");
        self.get_json(url).await
    }

    /// Fetch per-device connection state.
    ///
    /// `GET /rest/system/connections`
    pub async fn get_connections(&self) -> Result<Connections, Error> {
        let url = self.rest_url("system/connections")?;
        debug!("fetching connections");
        self.get_json(url).await
    }
}
