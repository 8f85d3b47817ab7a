// ── Folder domain types ──

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{Display, EnumString};

/// Direction of synchronization for a folder.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum FolderType {
    SendOnly,
    ReceiveOnly,
    #[default]
    SendReceive,
    /// Untrusted-peer mode; never created here but must survive a round trip.
    ReceiveEncrypted,
}

/// The record placing one device into one folder's participant list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderDeviceShare {
    #[serde(rename = "deviceID")]
    pub device_id: String,
    #[serde(rename = "introducedBy", default)]
    pub introduced_by: String,
    #[serde(rename = "encryptionPassword", default)]
    pub encryption_password: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FolderDeviceShare {
    /// A plain share entry with no introducer and no encryption.
    pub fn new(device_id: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            introduced_by: String::new(),
            encryption_password: String::new(),
            extra: Map::new(),
        }
    }
}

/// A synchronized directory definition, as stored in the configuration document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Folder {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub path: String,
    #[serde(rename = "type", default)]
    pub folder_type: FolderType,
    #[serde(default)]
    pub devices: Vec<FolderDeviceShare>,
    #[serde(default)]
    pub paused: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Folder {
    /// Whether `device_id` appears in this folder's share list.
    pub fn is_shared_with(&self, device_id: &str) -> bool {
        self.devices.iter().any(|d| d.device_id == device_id)
    }

    /// Drop every share entry for `device_id`. Returns how many were removed.
    pub fn unshare(&mut self, device_id: &str) -> usize {
        let before = self.devices.len();
        self.devices.retain(|d| d.device_id != device_id);
        before - self.devices.len()
    }
}
