//! Folder command handlers.

use serde_json::{Value, json};
use tabled::Tabled;

use syncdeck_core::bulk::parse_folders_input;
use syncdeck_core::{
    Console, DeviceRef, Folder, FolderPatch, FolderType, FolderView, NewFolder, SyncState,
};

use crate::cli::{FolderTypeArg, FoldersArgs, FoldersCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct FolderRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Path")]
    path: String,
    #[tabled(rename = "Type")]
    folder_type: String,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Devices")]
    devices: usize,
    #[tabled(rename = "Paused")]
    paused: String,
}

impl FolderRow {
    fn new(f: &FolderView, color: bool) -> Self {
        let good = match f.status.state {
            SyncState::Idle => Some(true),
            SyncState::Error => Some(false),
            SyncState::Syncing | SyncState::Scanning | SyncState::Unknown => None,
        };
        let mut state = f.status.state.to_string();
        if let Some(ref err) = f.status.error {
            state = format!("{state} ({err})");
        }
        Self {
            id: f.id.clone(),
            label: f.label.clone(),
            path: f.path.clone(),
            folder_type: f.folder_type.to_string(),
            state: output::paint_state(&state, good, color),
            devices: f.devices.len(),
            paused: util::yes_no(f.paused).into(),
        }
    }
}

fn detail(f: &Folder) -> String {
    let devices: Vec<&str> = f.devices.iter().map(|d| d.device_id.as_str()).collect();
    [
        format!("ID:      {}", f.id),
        format!("Label:   {}", f.label),
        format!("Path:    {}", f.path),
        format!("Type:    {}", f.folder_type),
        format!("Paused:  {}", util::yes_no(f.paused)),
        format!("Devices: {}", devices.join(", ")),
    ]
    .join("\n")
}

impl From<FolderTypeArg> for FolderType {
    fn from(arg: FolderTypeArg) -> Self {
        match arg {
            FolderTypeArg::SendReceive => Self::SendReceive,
            FolderTypeArg::SendOnly => Self::SendOnly,
            FolderTypeArg::ReceiveOnly => Self::ReceiveOnly,
            FolderTypeArg::ReceiveEncrypted => Self::ReceiveEncrypted,
        }
    }
}

fn print_pause_state(folder: &str, paused: bool, global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_single(
        global.output,
        &json!({ "id": folder, "paused": paused }),
        |_| {
            if paused {
                format!("Paused folder {folder}")
            } else {
                format!("Resumed folder {folder}")
            }
        },
        |_| folder.to_owned(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    console: &Console,
    args: FoldersArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let color = output::should_color(global.color);

    match args.command {
        FoldersCommand::List => {
            let folders = console.list_folders().await?;
            let out = output::render_list(
                global.output,
                &folders,
                |f| FolderRow::new(f, color),
                |f| f.id.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        FoldersCommand::Add {
            id,
            path,
            label,
            folder_type,
            devices,
            rescan_interval,
        } => {
            let spec = NewFolder {
                label,
                folder_type: folder_type.map(FolderType::from),
                devices: devices.into_iter().map(DeviceRef::Id).collect(),
                rescan_interval_s: rescan_interval,
                ..NewFolder::new(id, path)
            };
            let folder = console.add_folder(spec).await?;
            let out = output::render_single(global.output, &folder, detail, |f| f.id.clone())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        FoldersCommand::Update {
            folder,
            label,
            path,
            folder_type,
            paused,
            devices,
            no_devices,
            patch,
        } => {
            let devices = if no_devices { Some(Vec::new()) } else { devices };
            let mut update = FolderPatch {
                devices: devices.map(|ids| ids.into_iter().map(DeviceRef::Id).collect()),
                fields: util::patch_fields(&patch)?,
            };
            if let Some(label) = label {
                update = update.set("label", label);
            }
            if let Some(path) = path {
                update = update.set("path", path);
            }
            if let Some(folder_type) = folder_type {
                update = update.set("type", FolderType::from(folder_type).to_string());
            }
            if let Some(paused) = paused {
                update = update.set("paused", Value::Bool(paused));
            }
            if update.devices.is_none() && update.fields.is_empty() {
                return Err(CliError::Validation {
                    field: "update".into(),
                    reason: "nothing to change; pass at least one attribute".into(),
                });
            }

            let updated = console.update_folder(&folder, update).await?;
            let out = output::render_single(global.output, &updated, detail, |f| f.id.clone())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        FoldersCommand::Remove { folder } => {
            if !util::confirm(
                &format!("Remove folder {folder}? Files on disk are left in place."),
                "folders remove",
                global.yes,
            )? {
                return Ok(());
            }
            let removed = console.delete_folder(&folder).await?;
            let out = output::render_single(
                global.output,
                &removed,
                |f| format!("Removed folder {} ({})", f.label, f.id),
                |f| f.id.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        FoldersCommand::Pause { folder } => {
            console.pause_folder(&folder).await?;
            print_pause_state(&folder, true, global)
        }

        FoldersCommand::Resume { folder } => {
            console.resume_folder(&folder).await?;
            print_pause_state(&folder, false, global)
        }

        FoldersCommand::Bulk(bulk) => {
            let items = parse_folders_input(&util::read_input(&bulk.file)?)?;
            if items.is_empty() {
                return Err(CliError::Validation {
                    field: "file".into(),
                    reason: "no folders found in input".into(),
                });
            }
            let report = console.bulk_add_folders(items).await?;
            util::print_bulk_report(&report, global, color)
        }
    }
}
