// ── Folder mutations ──
//
// Upsert and delete for single folder entries against an in-memory
// document. Pause and resume are not document edits; they live on
// `Console` as direct daemon calls.

use serde_json::{Map, Value, json};
use tracing::debug;

use crate::error::CoreError;
use crate::model::document::shallow_merge;
use crate::model::{ConfigDocument, Folder, FolderDeviceShare};
use crate::requests::{DeviceRef, FolderPatch, NewFolder};
use crate::sharing::ensure_devices_exist;

/// Rescan interval applied when a creation request does not set one.
pub const DEFAULT_RESCAN_INTERVAL_S: u32 = 3600;

/// Input checks that need no document. Run before any remote call.
pub fn validate_new_folder(spec: &NewFolder) -> Result<(), CoreError> {
    if spec.id.is_empty() || spec.path.is_empty() {
        return Err(CoreError::validation("Folder ID and path are required"));
    }
    Ok(())
}

/// Append a new folder shared with the referenced, already-known devices.
pub fn add_folder(doc: &mut ConfigDocument, spec: NewFolder) -> Result<Folder, CoreError> {
    validate_new_folder(&spec)?;
    if doc.has_folder(&spec.id) {
        return Err(CoreError::Conflict {
            entity_type: "Folder".into(),
            identifier: spec.id,
        });
    }

    let NewFolder {
        id,
        label,
        path,
        folder_type,
        devices,
        rescan_interval_s,
    } = spec;

    let shares = normalize_shares(devices);
    ensure_devices_exist(doc, &shares)?;

    let folder = Folder {
        label: label.filter(|l| !l.is_empty()).unwrap_or_else(|| id.clone()),
        path,
        folder_type: folder_type.unwrap_or_default(),
        devices: shares,
        paused: false,
        extra: folder_defaults(rescan_interval_s.unwrap_or(DEFAULT_RESCAN_INTERVAL_S)),
        id,
    };

    doc.folders.push(folder.clone());
    debug!(folder_id = %folder.id, shares = folder.devices.len(), "folder added to document");
    Ok(folder)
}

/// Apply a partial update to an existing folder.
pub fn update_folder(
    doc: &mut ConfigDocument,
    folder_id: &str,
    patch: FolderPatch,
) -> Result<Folder, CoreError> {
    let index = doc
        .folder_index(folder_id)
        .ok_or_else(|| CoreError::folder_not_found(folder_id))?;
    let patch = patch.lift_relationships()?;

    if let Some(new_id) = patch.fields.get("id") {
        if new_id.as_str() != Some(folder_id) {
            return Err(CoreError::validation("folder id cannot be changed"));
        }
    }
    if let Some(path) = patch.fields.get("path") {
        if path.as_str().is_none_or(str::is_empty) {
            return Err(CoreError::validation("folder path cannot be empty"));
        }
    }

    let mut merged = shallow_merge(&doc.folders[index], &patch.fields)?;
    if let Some(devices) = patch.devices {
        let shares = normalize_shares(devices);
        ensure_devices_exist(doc, &shares)?;
        merged.devices = shares;
    }

    doc.folders[index] = merged.clone();
    debug!(folder_id, "folder updated in document");
    Ok(merged)
}

/// Remove a folder. Devices are untouched; folders own their share lists.
pub fn delete_folder(doc: &mut ConfigDocument, folder_id: &str) -> Result<Folder, CoreError> {
    let index = doc
        .folder_index(folder_id)
        .ok_or_else(|| CoreError::folder_not_found(folder_id))?;
    let removed = doc.folders.remove(index);
    debug!(folder_id, "folder removed from document");
    Ok(removed)
}

/// Canonical share entries, first occurrence of each device wins.
fn normalize_shares(refs: Vec<DeviceRef>) -> Vec<FolderDeviceShare> {
    let mut shares: Vec<FolderDeviceShare> = Vec::with_capacity(refs.len());
    for share in refs.into_iter().map(DeviceRef::into_share) {
        if !shares.iter().any(|s| s.device_id == share.device_id) {
            shares.push(share);
        }
    }
    shares
}

/// Daemon-required tuning attributes every new folder is created with.
fn folder_defaults(rescan_interval_s: u32) -> Map<String, Value> {
    let defaults = json!({
        "filesystemType": "basic",
        "rescanIntervalS": rescan_interval_s,
        "fsWatcherEnabled": true,
        "fsWatcherDelayS": 10,
        "fsWatcherTimeoutS": 0,
        "ignorePerms": false,
        "autoNormalize": true,
        "minDiskFree": { "value": 1, "unit": "%" },
        "versioning": {
            "type": "",
            "params": {},
            "cleanupIntervalS": 3600,
            "fsPath": "",
            "fsType": "basic"
        },
        "copiers": 0,
        "pullerMaxPendingKiB": 0,
        "hashers": 0,
        "order": "random",
        "ignoreDelete": false,
        "scanProgressIntervalS": 0,
        "pullerPauseS": 0,
        "maxConflicts": 10,
        "disableSparseFiles": false,
        "disableTempIndexes": false,
        "weakHashThresholdPct": 25,
        "markerName": ".stfolder",
        "copyOwnershipFromParent": false,
        "modTimeWindowS": 0,
        "maxConcurrentWrites": 2,
        "disableFsync": false,
        "blockPullOrder": "standard",
        "copyRangeMethod": "standard",
        "caseSensitiveFS": false,
        "junctionsAsDirs": false,
        "syncOwnership": false,
        "sendOwnership": false,
        "syncXattrs": false,
        "sendXattrs": false,
        "xattrFilter": {
            "entries": [],
            "maxSingleEntrySize": 1024,
            "maxTotalSize": 4096
        }
    });
    match defaults {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}
