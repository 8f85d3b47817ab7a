// ── Device mutations ──
//
// Upsert and delete for single device entries against an in-memory
// document. Every function validates fully before it mutates, so a
// failure leaves the document exactly as it was.

use serde_json::{Map, Value, json};
use tracing::debug;

use crate::error::CoreError;
use crate::model::document::shallow_merge;
use crate::model::{ConfigDocument, Device};
use crate::requests::{DevicePatch, NewDevice};
use crate::sharing::{cascade_remove_device, ensure_folders_exist, reassign_device_sharing};

/// Shortest device id accepted for a newly introduced device.
pub const MIN_DEVICE_ID_LEN: usize = 50;

/// Input checks that need no document. Run before any remote call.
pub fn validate_new_device(spec: &NewDevice) -> Result<(), CoreError> {
    if spec.device_id.is_empty() {
        return Err(CoreError::validation("Device ID is required"));
    }
    if spec.device_id.chars().count() < MIN_DEVICE_ID_LEN {
        return Err(CoreError::validation(format!(
            "Device ID must be at least {MIN_DEVICE_ID_LEN} characters long"
        )));
    }
    Ok(())
}

/// Append a new device, optionally sharing it into existing folders.
pub fn add_device(doc: &mut ConfigDocument, spec: NewDevice) -> Result<Device, CoreError> {
    validate_new_device(&spec)?;
    if doc.has_device(&spec.device_id) {
        return Err(CoreError::Conflict {
            entity_type: "Device".into(),
            identifier: spec.device_id,
        });
    }
    if let Some(ref folders) = spec.shared_folders {
        ensure_folders_exist(doc, folders)?;
    }

    let NewDevice {
        device_id,
        name,
        addresses,
        compression,
        introducer,
        paused,
        shared_folders,
    } = spec;

    let device = Device {
        name: name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| Device::short_id(&device_id)),
        addresses: addresses.unwrap_or_else(|| vec!["dynamic".into()]),
        compression: compression.unwrap_or_default(),
        introducer: introducer.unwrap_or(false),
        paused: paused.unwrap_or(false),
        extra: device_defaults(),
        device_id,
    };

    doc.devices.push(device.clone());
    if let Some(folders) = shared_folders.filter(|f| !f.is_empty()) {
        reassign_device_sharing(doc, &device.device_id, &folders);
    }

    debug!(device_id = %device.device_id, "device added to document");
    Ok(device)
}

/// Apply a partial update to an existing device.
pub fn update_device(
    doc: &mut ConfigDocument,
    device_id: &str,
    patch: DevicePatch,
) -> Result<Device, CoreError> {
    let index = doc
        .device_index(device_id)
        .ok_or_else(|| CoreError::device_not_found(device_id))?;
    let patch = patch.lift_relationships()?;

    if let Some(new_id) = patch.fields.get("deviceID") {
        if new_id.as_str() != Some(device_id) {
            return Err(CoreError::validation("deviceID cannot be changed"));
        }
    }
    let merged = shallow_merge(&doc.devices[index], &patch.fields)?;
    if let Some(ref folders) = patch.shared_folders {
        ensure_folders_exist(doc, folders)?;
    }

    if let Some(folders) = patch.shared_folders {
        reassign_device_sharing(doc, device_id, &folders);
    }
    doc.devices[index] = merged.clone();

    debug!(device_id, "device updated in document");
    Ok(merged)
}

/// Delete a device and its share entries.
///
/// The id is matched exactly, then percent-decoded, then
/// case-insensitively, so ids mangled by URL handling still resolve.
pub fn delete_device(doc: &mut ConfigDocument, device_id: &str) -> Result<Device, CoreError> {
    let resolved =
        resolve_device_id(doc, device_id).ok_or_else(|| CoreError::device_not_found(device_id))?;
    cascade_remove_device(doc, &resolved)
}

/// Find the stored id a possibly-mangled identifier refers to.
pub fn resolve_device_id(doc: &ConfigDocument, raw: &str) -> Option<String> {
    if doc.has_device(raw) {
        return Some(raw.to_owned());
    }

    if let Ok(decoded) = urlencoding::decode(raw) {
        if doc.has_device(&decoded) {
            debug!(raw, %decoded, "matched device by decoded id");
            return Some(decoded.into_owned());
        }
    }

    let lowered = raw.to_lowercase();
    doc.devices
        .iter()
        .find(|d| d.device_id.to_lowercase() == lowered)
        .map(|d| {
            debug!(raw, matched = %d.device_id, "matched device case-insensitively");
            d.device_id.clone()
        })
}

/// Daemon-required attributes every new device is created with.
fn device_defaults() -> Map<String, Value> {
    let defaults = json!({
        "certName": "",
        "skipIntroductionRemovals": false,
        "introducedBy": "",
        "allowedNetworks": [],
        "autoAcceptFolders": false,
        "maxSendKbps": 0,
        "maxRecvKbps": 0,
        "ignoredFolders": [],
        "maxRequestKiB": 0,
        "untrusted": false,
        "remoteGUIPort": 0,
        "numConnections": 0
    });
    match defaults {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}
