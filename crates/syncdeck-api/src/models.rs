// Wire types for the daemon's read-only status endpoints.
//
// Only the fields this workspace reads are typed; everything else is kept
// in a flattened map so nothing is lost when a payload is echoed back.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `GET /rest/system/status`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemStatus {
    /// Identifier of the device the daemon itself runs as.
    #[serde(rename = "myID")]
    pub my_id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `GET /rest/system/connections`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Connections {
    /// Per-device connection state, keyed by device id.
    #[serde(default)]
    pub connections: BTreeMap<String, ConnectionInfo>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One entry of the connections map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConnectionInfo {
    #[serde(default)]
    pub connected: bool,
    /// Last time the daemon saw this device.
    #[serde(default)]
    pub at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub paused: bool,
    #[serde(default)]
    pub address: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Connections {
    /// Look up a device's connection entry.
    pub fn get(&self, device_id: &str) -> Option<&ConnectionInfo> {
        self.connections.get(device_id)
    }
}
