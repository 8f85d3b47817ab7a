// ── Typed request structs for mutation payloads ──
//
// Creation requests carry only the user-settable fields; defaults are
// applied by the mutation services. Patches carry a typed relationship
// field plus an open map of attribute overrides.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::CoreError;
use crate::model::{Compression, FolderDeviceShare, FolderType};

// ── Device ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDevice {
    #[serde(rename = "deviceID", default)]
    pub device_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub addresses: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compression: Option<Compression>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub introducer: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paused: Option<bool>,
    /// Folders to share the new device into.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared_folders: Option<Vec<String>>,
}

impl NewDevice {
    pub fn new(device_id: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            ..Self::default()
        }
    }
}

/// Partial update for a device.
///
/// `shared_folders`, when present, replaces the device's whole folder
/// membership. Every other key in `fields` overwrites the attribute of
/// the same wire name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DevicePatch {
    #[serde(
        rename = "sharedFolders",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub shared_folders: Option<Vec<String>>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl DevicePatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set one attribute by its wire name.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn shared_folders(mut self, folders: Vec<String>) -> Self {
        self.shared_folders = Some(folders);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.shared_folders.is_none() && self.fields.is_empty()
    }

    /// Move a `sharedFolders` key set through `fields` into the typed
    /// field, so membership changes always go through validation. The
    /// typed field wins when both are present.
    pub(crate) fn lift_relationships(mut self) -> Result<Self, CoreError> {
        if let Some(raw) = self.fields.remove("sharedFolders") {
            let folders: Vec<String> = serde_json::from_value(raw)
                .map_err(|e| CoreError::validation(format!("invalid sharedFolders: {e}")))?;
            if self.shared_folders.is_none() {
                self.shared_folders = Some(folders);
            }
        }
        Ok(self)
    }
}

// ── Folder ─────────────────────────────────────────────────────────

/// A device reference in a folder payload: either a bare id or a share
/// object. Normalized into a [`FolderDeviceShare`] before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DeviceRef {
    Id(String),
    Share {
        #[serde(rename = "deviceID")]
        device_id: String,
        #[serde(
            rename = "introducedBy",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        introduced_by: Option<String>,
        #[serde(
            rename = "encryptionPassword",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        encryption_password: Option<String>,
    },
}

impl DeviceRef {
    pub fn device_id(&self) -> &str {
        match self {
            Self::Id(id) | Self::Share { device_id: id, .. } => id,
        }
    }

    pub fn into_share(self) -> FolderDeviceShare {
        match self {
            Self::Id(id) => FolderDeviceShare::new(id),
            Self::Share {
                device_id,
                introduced_by,
                encryption_password,
            } => {
                let mut share = FolderDeviceShare::new(device_id);
                share.introduced_by = introduced_by.unwrap_or_default();
                share.encryption_password = encryption_password.unwrap_or_default();
                share
            }
        }
    }
}

impl From<&str> for DeviceRef {
    fn from(id: &str) -> Self {
        Self::Id(id.to_owned())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewFolder {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub path: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub folder_type: Option<FolderType>,
    /// Devices to share the folder with.
    #[serde(default, alias = "sharedDevices", skip_serializing_if = "Vec::is_empty")]
    pub devices: Vec<DeviceRef>,
    #[serde(
        rename = "rescanIntervalS",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub rescan_interval_s: Option<u32>,
}

impl NewFolder {
    pub fn new(id: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
            ..Self::default()
        }
    }
}

/// Partial update for a folder.
///
/// `devices`, when present, replaces the share list and is checked for
/// referential integrity. Every other key in `fields` overwrites the
/// attribute of the same wire name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FolderPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub devices: Option<Vec<DeviceRef>>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl FolderPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn devices(mut self, devices: Vec<DeviceRef>) -> Self {
        self.devices = Some(devices);
        self
    }

    /// Move `devices` or `sharedDevices` keys set through `fields` into
    /// the typed field, so share lists always go through validation. The
    /// typed field wins, then `devices`, then `sharedDevices`.
    pub(crate) fn lift_relationships(mut self) -> Result<Self, CoreError> {
        for key in ["devices", "sharedDevices"] {
            if let Some(raw) = self.fields.remove(key) {
                let refs: Vec<DeviceRef> = serde_json::from_value(raw)
                    .map_err(|e| CoreError::validation(format!("invalid {key}: {e}")))?;
                if self.devices.is_none() {
                    self.devices = Some(refs);
                }
            }
        }
        Ok(self)
    }
}
