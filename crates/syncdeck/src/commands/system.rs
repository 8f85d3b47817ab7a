//! System command handlers.

use tabled::Tabled;

use syncdeck_core::{Console, Device, SystemStatus};

use crate::cli::{GlobalOpts, OutputFormat, SystemArgs, SystemCommand};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct ConnectionRow {
    #[tabled(rename = "Device")]
    device: String,
    #[tabled(rename = "Connected")]
    connected: String,
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Since")]
    at: String,
}

/// Flattened connection entry so list renderers see one item per device.
#[derive(serde::Serialize)]
struct ConnectionEntry<'a> {
    #[serde(rename = "deviceID")]
    device_id: &'a str,
    #[serde(flatten)]
    info: &'a syncdeck_core::ConnectionInfo,
}

fn status_detail(status: &SystemStatus) -> String {
    let mut lines = vec![format!("My ID:   {}", status.my_id)];
    for key in ["version", "uptime", "startTime"] {
        if let Some(value) = status.extra.get(key) {
            let text = value.as_str().map_or_else(|| value.to_string(), String::from);
            lines.push(format!("{:<8} {text}", format!("{key}:")));
        }
    }
    lines.join("\n")
}

pub async fn handle(
    console: &Console,
    args: SystemArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let color = output::should_color(global.color);

    match args.command {
        SystemCommand::Status => {
            let status = console.system_status().await?;
            let out = output::render_single(global.output, &status, status_detail, |s| {
                s.my_id.clone()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        SystemCommand::Config => {
            let config = console.system_config().await?;
            // No tabular view of the whole document; table falls back to JSON.
            let format = match global.output {
                OutputFormat::Table => OutputFormat::Json,
                other => other,
            };
            let out = output::render_single(format, &config, |_| String::new(), |c| {
                c.get("version").map(ToString::to_string).unwrap_or_default()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        SystemCommand::Connections => {
            let connections = console.connections().await?;
            let entries: Vec<ConnectionEntry<'_>> = connections
                .connections
                .iter()
                .map(|(id, info)| ConnectionEntry {
                    device_id: id,
                    info,
                })
                .collect();
            let out = output::render_list(
                global.output,
                &entries,
                |e| ConnectionRow {
                    device: Device::short_id(e.device_id),
                    connected: if e.info.connected {
                        output::paint_state("yes", Some(true), color)
                    } else {
                        output::paint_state("no", Some(false), color)
                    },
                    address: if e.info.address.is_empty() {
                        "-".into()
                    } else {
                        e.info.address.clone()
                    },
                    at: e
                        .info
                        .at
                        .map_or_else(|| "-".into(), |t| t.format("%Y-%m-%d %H:%M").to_string()),
                },
                |e| e.device_id.to_owned(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Map, json};

    use super::*;

    #[test]
    fn status_detail_lists_known_keys() {
        let mut extra = Map::new();
        extra.insert("version".into(), json!("v1.27.0"));
        extra.insert("uptime".into(), json!(42));
        let status = SystemStatus {
            my_id: "AAAA".into(),
            extra,
        };

        let text = status_detail(&status);

        assert!(text.starts_with("My ID:   AAAA"));
        assert!(text.contains("v1.27.0"));
        assert!(text.contains("42"));
    }
}
