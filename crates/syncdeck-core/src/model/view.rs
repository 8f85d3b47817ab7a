// ── Read projections ──
//
// View models merging configuration entries with live daemon state.
// Never written back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::Display;

use super::device::{Compression, Device};
use super::folder::{Folder, FolderDeviceShare, FolderType};

/// A device entry plus its live connection state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceView {
    #[serde(rename = "deviceID")]
    pub device_id: String,
    pub name: String,
    pub addresses: Vec<String>,
    pub compression: Compression,
    pub introducer: bool,
    pub paused: bool,
    pub connected: bool,
    pub last_seen: Option<DateTime<Utc>>,
}

impl DeviceView {
    pub(crate) fn new(device: &Device, connected: bool, last_seen: Option<DateTime<Utc>>) -> Self {
        Self {
            device_id: device.device_id.clone(),
            name: device.name.clone(),
            addresses: device.addresses.clone(),
            compression: device.compression,
            introducer: device.introducer,
            paused: device.paused,
            connected,
            last_seen,
        }
    }
}

/// Coarse folder sync state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SyncState {
    Idle,
    Syncing,
    Scanning,
    Error,
    #[default]
    Unknown,
}

impl SyncState {
    /// Collapse the daemon's fine-grained state strings.
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "idle" => Self::Idle,
            "syncing" | "sync-preparing" | "sync-waiting" | "cleaning" | "clean-waiting" => {
                Self::Syncing
            }
            "scanning" | "scan-waiting" => Self::Scanning,
            "error" => Self::Error,
            _ => Self::Unknown,
        }
    }
}

/// Per-folder status as reported by the daemon, or a placeholder when
/// the status call failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderStatus {
    pub state: SyncState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// The daemon's full status payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl FolderStatus {
    pub fn from_report(report: Value) -> Self {
        let state = report
            .get("state")
            .and_then(Value::as_str)
            .map_or(SyncState::Unknown, SyncState::from_raw);
        let error = report
            .get("error")
            .and_then(Value::as_str)
            .filter(|e| !e.is_empty())
            .map(String::from);
        Self {
            state,
            error,
            details: Some(report),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            state: SyncState::Unknown,
            error: Some(message.into()),
            details: None,
        }
    }
}

/// A folder entry plus its live sync status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderView {
    pub id: String,
    pub label: String,
    pub path: String,
    #[serde(rename = "type")]
    pub folder_type: FolderType,
    pub devices: Vec<FolderDeviceShare>,
    pub paused: bool,
    pub status: FolderStatus,
}

impl FolderView {
    pub(crate) fn new(folder: &Folder, status: FolderStatus) -> Self {
        Self {
            id: folder.id.clone(),
            label: folder.label.clone(),
            path: folder.path.clone(),
            folder_type: folder.folder_type,
            devices: folder.devices.clone(),
            paused: folder.paused,
            status,
        }
    }
}
