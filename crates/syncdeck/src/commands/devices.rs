//! Device command handlers.

use serde_json::Value;
use tabled::Tabled;

use syncdeck_core::bulk::parse_devices_input;
use syncdeck_core::{Compression, Console, Device, DevicePatch, DeviceView, NewDevice};

use crate::cli::{CompressionArg, DevicesArgs, DevicesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Last Seen")]
    last_seen: String,
    #[tabled(rename = "Addresses")]
    addresses: String,
    #[tabled(rename = "Introducer")]
    introducer: String,
}

impl DeviceRow {
    fn new(d: &DeviceView, color: bool) -> Self {
        let state = if d.paused {
            output::paint_state("paused", None, color)
        } else if d.connected {
            output::paint_state("connected", Some(true), color)
        } else {
            output::paint_state("disconnected", Some(false), color)
        };
        Self {
            id: Device::short_id(&d.device_id),
            name: d.name.clone(),
            state,
            last_seen: d
                .last_seen
                .map_or_else(|| "-".into(), |t| t.format("%Y-%m-%d %H:%M").to_string()),
            addresses: d.addresses.join(", "),
            introducer: util::yes_no(d.introducer).into(),
        }
    }
}

fn detail(d: &Device) -> String {
    [
        format!("ID:          {}", d.device_id),
        format!("Name:        {}", d.name),
        format!("Addresses:   {}", d.addresses.join(", ")),
        format!("Compression: {}", d.compression),
        format!("Introducer:  {}", util::yes_no(d.introducer)),
        format!("Paused:      {}", util::yes_no(d.paused)),
    ]
    .join("\n")
}

impl From<CompressionArg> for Compression {
    fn from(arg: CompressionArg) -> Self {
        match arg {
            CompressionArg::Metadata => Self::Metadata,
            CompressionArg::Always => Self::Always,
            CompressionArg::Never => Self::Never,
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    console: &Console,
    args: DevicesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let color = output::should_color(global.color);

    match args.command {
        DevicesCommand::List => {
            let devices = console.list_devices().await?;
            let out = output::render_list(
                global.output,
                &devices,
                |d| DeviceRow::new(d, color),
                |d| d.device_id.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DevicesCommand::Add {
            device_id,
            name,
            addresses,
            compression,
            introducer,
            paused,
            folders,
        } => {
            let spec = NewDevice {
                name,
                addresses: (!addresses.is_empty()).then_some(addresses),
                compression: compression.map(Compression::from),
                introducer: Some(introducer),
                paused: Some(paused),
                shared_folders: (!folders.is_empty()).then_some(folders),
                ..NewDevice::new(device_id)
            };
            let device = console.add_device(spec).await?;
            let out = output::render_single(global.output, &device, detail, |d| {
                d.device_id.clone()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DevicesCommand::Update {
            device,
            name,
            addresses,
            compression,
            introducer,
            paused,
            folders,
            no_folders,
            patch,
        } => {
            let mut update = DevicePatch {
                fields: util::patch_fields(&patch)?,
                shared_folders: if no_folders { Some(Vec::new()) } else { folders },
            };
            if let Some(name) = name {
                update = update.set("name", name);
            }
            if !addresses.is_empty() {
                update = update.set("addresses", addresses);
            }
            if let Some(compression) = compression {
                update = update.set("compression", Compression::from(compression).to_string());
            }
            if let Some(introducer) = introducer {
                update = update.set("introducer", introducer);
            }
            if let Some(paused) = paused {
                update = update.set("paused", Value::Bool(paused));
            }
            if update.is_empty() {
                return Err(CliError::Validation {
                    field: "update".into(),
                    reason: "nothing to change; pass at least one attribute".into(),
                });
            }

            let updated = console.update_device(&device, update).await?;
            let out = output::render_single(global.output, &updated, detail, |d| {
                d.device_id.clone()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DevicesCommand::Remove { device } => {
            if !util::confirm(
                &format!("Remove device {device} and unshare it from every folder?"),
                "devices remove",
                global.yes,
            )? {
                return Ok(());
            }
            let removed = console.delete_device(&device).await?;
            let out = output::render_single(
                global.output,
                &removed,
                |d| format!("Removed device {} ({})", d.name, d.device_id),
                |d| d.device_id.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DevicesCommand::Bulk(bulk) => {
            let items = parse_devices_input(&util::read_input(&bulk.file)?)?;
            if items.is_empty() {
                return Err(CliError::Validation {
                    field: "file".into(),
                    reason: "no devices found in input".into(),
                });
            }
            let report = console.bulk_add_devices(items).await?;
            util::print_bulk_report(&report, global, color)
        }
    }
}
