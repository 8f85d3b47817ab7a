// ── Device domain types ──

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{Display, EnumString};

/// Wire compression mode for a device link.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Compression {
    /// Compress metadata only (daemon default).
    #[default]
    Metadata,
    Always,
    Never,
}

/// A peer in the sync mesh, as stored in the configuration document.
///
/// Only the attributes this workspace edits are typed. Rate limits,
/// ignored folders, and every other daemon field ride along in `extra`
/// and are written back untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    #[serde(rename = "deviceID")]
    pub device_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub addresses: Vec<String>,
    #[serde(default)]
    pub compression: Compression,
    #[serde(default)]
    pub introducer: bool,
    #[serde(default)]
    pub paused: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Device {
    /// Fallback display name: the first seven characters of the id.
    pub fn short_id(device_id: &str) -> String {
        device_id.chars().take(7).collect()
    }
}
