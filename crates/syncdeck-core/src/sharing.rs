// ── Device ↔ folder sharing ──
//
// A device's shared folders are derived, never stored: they are the
// folders whose share list names the device. These helpers mutate a
// fetched document in place; persisting it is the caller's job.

use tracing::debug;

use crate::error::CoreError;
use crate::model::{ConfigDocument, Device, FolderDeviceShare};

/// Make `folder_ids` the exact set of folders `device_id` is shared into.
///
/// Removes the device from every share list, then appends a plain share
/// entry to each requested folder. Unknown folder ids are skipped;
/// callers that care validate with [`ensure_folders_exist`] first.
/// Idempotent.
pub fn reassign_device_sharing(doc: &mut ConfigDocument, device_id: &str, folder_ids: &[String]) {
    for folder in &mut doc.folders {
        folder.unshare(device_id);
    }

    for folder_id in folder_ids {
        let Some(folder) = doc.folder_mut(folder_id) else {
            debug!(folder_id, "skipping unknown folder while sharing");
            continue;
        };
        if !folder.is_shared_with(device_id) {
            folder.devices.push(FolderDeviceShare::new(device_id));
        }
    }
}

/// Remove a device and every share entry that points at it.
pub fn cascade_remove_device(doc: &mut ConfigDocument, device_id: &str) -> Result<Device, CoreError> {
    let index = doc
        .device_index(device_id)
        .ok_or_else(|| CoreError::device_not_found(device_id))?;

    let removed = doc.devices.remove(index);
    let unshared: usize = doc
        .folders
        .iter_mut()
        .map(|folder| folder.unshare(device_id))
        .sum();
    debug!(device_id, unshared, "removed device and its share entries");
    Ok(removed)
}

/// Ids of the folders `device_id` is currently shared into, in document order.
pub fn shared_folders(doc: &ConfigDocument, device_id: &str) -> Vec<String> {
    doc.folders
        .iter()
        .filter(|f| f.is_shared_with(device_id))
        .map(|f| f.id.clone())
        .collect()
}

/// Fail with a validation error naming the first folder id not in `doc`.
pub fn ensure_folders_exist(doc: &ConfigDocument, folder_ids: &[String]) -> Result<(), CoreError> {
    match folder_ids.iter().find(|id| !doc.has_folder(id)) {
        Some(missing) => Err(CoreError::validation(format!(
            "Folder '{missing}' not found"
        ))),
        None => Ok(()),
    }
}

/// Fail with a validation error naming the first share whose device is not in `doc`.
pub fn ensure_devices_exist(
    doc: &ConfigDocument,
    shares: &[FolderDeviceShare],
) -> Result<(), CoreError> {
    match shares.iter().find(|s| !doc.has_device(&s.device_id)) {
        Some(missing) => Err(CoreError::validation(format!(
            "Device '{}' not found",
            missing.device_id
        ))),
        None => Ok(()),
    }
}

/// Share entries that point at devices absent from `doc`, as
/// `(folder id, device id)` pairs.
pub fn dangling_shares(doc: &ConfigDocument) -> Vec<(String, String)> {
    doc.folders
        .iter()
        .flat_map(|folder| {
            folder
                .devices
                .iter()
                .filter(|share| !doc.has_device(&share.device_id))
                .map(|share| (folder.id.clone(), share.device_id.clone()))
        })
        .collect()
}

/// Fail if `doc` has a dangling share that is not in `before`.
///
/// Shares already dangling in the fetched document are tolerated; only
/// ones a mutation introduced are rejected.
pub fn ensure_no_new_dangling(
    before: &[(String, String)],
    doc: &ConfigDocument,
) -> Result<(), CoreError> {
    match dangling_shares(doc)
        .into_iter()
        .find(|pair| !before.contains(pair))
    {
        Some((folder_id, device_id)) => Err(CoreError::validation(format!(
            "Folder '{folder_id}' would be shared with unknown device '{device_id}'"
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    /// Two devices, three folders; D1 shared into A and B, D2 into A.
    pub(crate) fn fixture() -> ConfigDocument {
        serde_json::from_value(json!({
            "version": 37,
            "devices": [
                { "deviceID": "D1", "name": "one" },
                { "deviceID": "D2", "name": "two" }
            ],
            "folders": [
                { "id": "A", "path": "/a", "devices": [
                    { "deviceID": "D1", "introducedBy": "", "encryptionPassword": "" },
                    { "deviceID": "D2", "introducedBy": "", "encryptionPassword": "" }
                ]},
                { "id": "B", "path": "/b", "devices": [
                    { "deviceID": "D1", "introducedBy": "", "encryptionPassword": "" }
                ]},
                { "id": "C", "path": "/c", "devices": [] }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn reassign_moves_device_to_exactly_requested_folders() {
        let mut doc = fixture();
        reassign_device_sharing(&mut doc, "D1", &["B".into(), "C".into()]);

        assert_eq!(shared_folders(&doc, "D1"), vec!["B", "C"]);
        assert_eq!(shared_folders(&doc, "D2"), vec!["A"]);
    }

    #[test]
    fn reassign_is_idempotent() {
        let mut doc = fixture();
        let folders = vec!["C".to_string(), "A".to_string()];
        reassign_device_sharing(&mut doc, "D1", &folders);
        let once = doc.clone();
        reassign_device_sharing(&mut doc, "D1", &folders);

        assert_eq!(doc, once);
    }

    #[test]
    fn reassign_skips_unknown_folders_and_duplicates() {
        let mut doc = fixture();
        reassign_device_sharing(&mut doc, "D2", &["C".into(), "nope".into(), "C".into()]);

        assert_eq!(shared_folders(&doc, "D2"), vec!["C"]);
        assert_eq!(doc.folder("C").unwrap().devices.len(), 1);
    }

    #[test]
    fn reassign_to_empty_set_unshares_everywhere() {
        let mut doc = fixture();
        reassign_device_sharing(&mut doc, "D1", &[]);

        assert!(shared_folders(&doc, "D1").is_empty());
        assert_eq!(shared_folders(&doc, "D2"), vec!["A"]);
    }

    #[test]
    fn cascade_remove_clears_every_reference() {
        let mut doc = fixture();
        let removed = cascade_remove_device(&mut doc, "D1").unwrap();

        assert_eq!(removed.name, "one");
        assert!(!doc.has_device("D1"));
        assert!(shared_folders(&doc, "D1").is_empty());
        assert!(dangling_shares(&doc).is_empty());
    }

    #[test]
    fn cascade_remove_unknown_device_leaves_document_untouched() {
        let mut doc = fixture();
        let before = serde_json::to_vec(&doc).unwrap();

        let err = cascade_remove_device(&mut doc, "ghost").unwrap_err();

        assert!(matches!(err, CoreError::NotFound { .. }));
        assert_eq!(serde_json::to_vec(&doc).unwrap(), before);
    }

    #[test]
    fn ensure_helpers_name_the_missing_entity() {
        let doc = fixture();
        let err = ensure_folders_exist(&doc, &["A".into(), "Z".into()]).unwrap_err();
        assert!(err.to_string().contains("Folder 'Z' not found"));

        let err = ensure_devices_exist(&doc, &[FolderDeviceShare::new("D9")]).unwrap_err();
        assert!(err.to_string().contains("Device 'D9' not found"));
    }

    #[test]
    fn dangling_shares_are_reported() {
        let mut doc = fixture();
        doc.devices.retain(|d| d.device_id != "D2");

        assert_eq!(dangling_shares(&doc), vec![("A".to_string(), "D2".to_string())]);
    }

    #[test]
    fn only_newly_dangling_shares_are_rejected() {
        let mut doc = fixture();
        doc.devices.retain(|d| d.device_id != "D2");
        let before = dangling_shares(&doc);

        ensure_no_new_dangling(&before, &doc).unwrap();

        doc.folders[2].devices.push(FolderDeviceShare::new("ghost"));
        let err = ensure_no_new_dangling(&before, &doc).unwrap_err();
        assert!(matches!(err, CoreError::Validation { .. }));
        assert!(err.to_string().contains("'C'"));
        assert!(err.to_string().contains("'ghost'"));
    }
}
