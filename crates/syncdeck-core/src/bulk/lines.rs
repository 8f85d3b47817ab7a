// ── Bulk input parsing ──
//
// Bulk requests arrive either as a JSON array of creation objects or as
// line-oriented text:
//
//   devices:  DEVICE_ID[,NAME[,FOLDER;FOLDER...]]
//   folders:  ID,PATH[,LABEL[,TYPE[,DEVICE;DEVICE...]]]
//
// Blank lines and lines starting with `#` are ignored. Any malformed
// line rejects the whole input before the daemon is contacted.

use std::str::FromStr;

use crate::error::CoreError;
use crate::model::FolderType;
use crate::requests::{DeviceRef, NewDevice, NewFolder};

/// Parse bulk device input, JSON array or line text.
pub fn parse_devices_input(input: &str) -> Result<Vec<NewDevice>, CoreError> {
    if looks_like_json(input) {
        return parse_json(input);
    }
    parse_device_lines(input)
}

/// Parse bulk folder input, JSON array or line text.
pub fn parse_folders_input(input: &str) -> Result<Vec<NewFolder>, CoreError> {
    if looks_like_json(input) {
        return parse_json(input);
    }
    parse_folder_lines(input)
}

pub fn parse_device_lines(input: &str) -> Result<Vec<NewDevice>, CoreError> {
    records(input)
        .map(|(line_no, fields)| {
            if fields.len() > 3 {
                return Err(malformed(line_no, "expected DEVICE_ID[,NAME[,FOLDERS]]"));
            }
            let device_id = required(&fields, 0, line_no, "device ID")?;
            Ok(NewDevice {
                name: optional(&fields, 1).map(String::from),
                shared_folders: optional(&fields, 2).map(split_list),
                ..NewDevice::new(device_id)
            })
        })
        .collect()
}

pub fn parse_folder_lines(input: &str) -> Result<Vec<NewFolder>, CoreError> {
    records(input)
        .map(|(line_no, fields)| {
            if fields.len() > 5 {
                return Err(malformed(
                    line_no,
                    "expected ID,PATH[,LABEL[,TYPE[,DEVICES]]]",
                ));
            }
            let id = required(&fields, 0, line_no, "folder ID")?;
            let path = required(&fields, 1, line_no, "path")?;
            let folder_type = optional(&fields, 3)
                .map(|raw| {
                    FolderType::from_str(raw)
                        .map_err(|_| malformed(line_no, &format!("unknown folder type '{raw}'")))
                })
                .transpose()?;
            Ok(NewFolder {
                label: optional(&fields, 2).map(String::from),
                folder_type,
                devices: optional(&fields, 4)
                    .map(split_list)
                    .unwrap_or_default()
                    .into_iter()
                    .map(DeviceRef::Id)
                    .collect(),
                ..NewFolder::new(id, path)
            })
        })
        .collect()
}

// ── Helpers ──────────────────────────────────────────────────────────

fn looks_like_json(input: &str) -> bool {
    input.trim_start().starts_with('[')
}

fn parse_json<T: serde::de::DeserializeOwned>(input: &str) -> Result<Vec<T>, CoreError> {
    serde_json::from_str(input)
        .map_err(|e| CoreError::validation(format!("invalid bulk JSON: {e}")))
}

/// Significant lines with their 1-based line numbers, split on commas.
fn records(input: &str) -> impl Iterator<Item = (usize, Vec<&str>)> {
    input
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(line_no, line)| (line_no, line.split(',').map(str::trim).collect()))
}

fn required<'a>(
    fields: &[&'a str],
    index: usize,
    line_no: usize,
    what: &str,
) -> Result<&'a str, CoreError> {
    optional(fields, index).ok_or_else(|| malformed(line_no, &format!("missing {what}")))
}

fn optional<'a>(fields: &[&'a str], index: usize) -> Option<&'a str> {
    fields.get(index).copied().filter(|f| !f.is_empty())
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn malformed(line_no: usize, detail: &str) -> CoreError {
    CoreError::validation(format!("line {line_no}: {detail}"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn device_lines_with_optional_columns() {
        let input = "\
# id, name, folders
AAAA

BBBB, laptop
CCCC,,docs; photos
";
        let devices = parse_device_lines(input).unwrap();

        assert_eq!(devices.len(), 3);
        assert_eq!(devices[0], NewDevice::new("AAAA"));
        assert_eq!(devices[1].name.as_deref(), Some("laptop"));
        assert_eq!(devices[2].name, None);
        assert_eq!(
            devices[2].shared_folders,
            Some(vec!["docs".to_string(), "photos".to_string()])
        );
    }

    #[test]
    fn folder_lines_with_type_and_devices() {
        let input = "docs,/srv/docs\nmusic,/srv/m,Music,SendOnly,AAAA;BBBB\n";
        let folders = parse_folder_lines(input).unwrap();

        assert_eq!(folders[0], NewFolder::new("docs", "/srv/docs"));
        assert_eq!(folders[1].label.as_deref(), Some("Music"));
        assert_eq!(folders[1].folder_type, Some(FolderType::SendOnly));
        assert_eq!(
            folders[1].devices,
            vec![DeviceRef::from("AAAA"), DeviceRef::from("BBBB")]
        );
    }

    #[test]
    fn malformed_line_names_its_line_number() {
        let err = parse_folder_lines("ok,/p\n\nbroken\n").unwrap_err();
        assert!(matches!(err, CoreError::Validation { .. }));
        assert!(err.to_string().contains("line 3: missing path"));

        let err = parse_folder_lines("x,/p,X,sideways\n").unwrap_err();
        assert!(err.to_string().contains("unknown folder type 'sideways'"));

        let err = parse_device_lines("a,b,c,d\n").unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn json_arrays_are_detected() {
        let input = r#"  [{"deviceID": "AAAA", "sharedFolders": ["docs"]}]"#;
        let devices = parse_devices_input(input).unwrap();
        assert_eq!(devices[0].shared_folders, Some(vec!["docs".to_string()]));

        let input = r#"[{"id": "f", "path": "/f", "sharedDevices": ["AAAA"]}]"#;
        let folders = parse_folders_input(input).unwrap();
        assert_eq!(folders[0].devices, vec![DeviceRef::from("AAAA")]);

        let err = parse_folders_input("[{").unwrap_err();
        assert!(err.to_string().contains("invalid bulk JSON"));
    }

    #[test]
    fn empty_input_yields_no_items() {
        assert!(parse_devices_input("\n# nothing\n").unwrap().is_empty());
    }
}
