// ── Configuration document ──
//
// The daemon's whole settings object. Fetched in full, mutated in memory,
// replaced in full. Anything outside `devices` and `folders` is carried
// verbatim in `extra`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::device::Device;
use super::folder::Folder;
use crate::error::CoreError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigDocument {
    #[serde(default)]
    pub devices: Vec<Device>,
    #[serde(default)]
    pub folders: Vec<Folder>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ConfigDocument {
    pub fn device(&self, device_id: &str) -> Option<&Device> {
        self.devices.iter().find(|d| d.device_id == device_id)
    }

    pub fn has_device(&self, device_id: &str) -> bool {
        self.device(device_id).is_some()
    }

    pub fn device_index(&self, device_id: &str) -> Option<usize> {
        self.devices.iter().position(|d| d.device_id == device_id)
    }

    pub fn folder(&self, folder_id: &str) -> Option<&Folder> {
        self.folders.iter().find(|f| f.id == folder_id)
    }

    pub fn folder_mut(&mut self, folder_id: &str) -> Option<&mut Folder> {
        self.folders.iter_mut().find(|f| f.id == folder_id)
    }

    pub fn has_folder(&self, folder_id: &str) -> bool {
        self.folder(folder_id).is_some()
    }

    pub fn folder_index(&self, folder_id: &str) -> Option<usize> {
        self.folders.iter().position(|f| f.id == folder_id)
    }
}

/// Overlay `patch` onto `entity` one top-level key at a time.
///
/// Patch keys replace, absent keys are preserved. The result is decoded
/// back into `T`, so a patch value of the wrong shape is a validation
/// failure rather than a corrupted document.
pub(crate) fn shallow_merge<T>(entity: &T, patch: &Map<String, Value>) -> Result<T, CoreError>
where
    T: Serialize + DeserializeOwned,
{
    let mut value = serde_json::to_value(entity)
        .map_err(|e| CoreError::validation(format!("cannot encode entity: {e}")))?;
    let Value::Object(fields) = &mut value else {
        return Err(CoreError::validation("entity is not a JSON object"));
    };
    for (key, v) in patch {
        fields.insert(key.clone(), v.clone());
    }
    serde_json::from_value(value).map_err(|e| CoreError::validation(format!("invalid patch: {e}")))
}
