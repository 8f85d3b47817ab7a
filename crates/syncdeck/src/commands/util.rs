//! Shared helpers for command handlers.

use std::io::{IsTerminal, Read};
use std::path::Path;

use serde_json::{Map, Value};
use tabled::Tabled;

use syncdeck_core::BulkReport;

use crate::cli::{GlobalOpts, PatchArgs};
use crate::error::CliError;
use crate::output;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, action: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Read a whole input file; `-` reads stdin.
pub fn read_input(path: &Path) -> Result<String, CliError> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    Ok(std::fs::read_to_string(path)?)
}

/// Collect `--set` pairs and `--from-file` into one attribute map.
///
/// `--set` wins over the file for the same key.
pub fn patch_fields(args: &PatchArgs) -> Result<Map<String, Value>, CliError> {
    let mut fields = match args.from_file {
        Some(ref path) => read_json_object(path)?,
        None => Map::new(),
    };
    for pair in &args.set {
        let (key, value) = parse_set_pair(pair)?;
        fields.insert(key, value);
    }
    Ok(fields)
}

/// Split `KEY=VALUE`; VALUE is JSON if it parses as JSON, else a string.
pub fn parse_set_pair(pair: &str) -> Result<(String, Value), CliError> {
    let (key, raw) = pair.split_once('=').ok_or_else(|| CliError::Validation {
        field: "set".into(),
        reason: format!("expected KEY=VALUE, got '{pair}'"),
    })?;
    let key = key.trim();
    if key.is_empty() {
        return Err(CliError::Validation {
            field: "set".into(),
            reason: format!("missing key in '{pair}'"),
        });
    }
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_owned()));
    Ok((key.to_owned(), value))
}

fn read_json_object(path: &Path) -> Result<Map<String, Value>, CliError> {
    let contents = read_input(path)?;
    match serde_json::from_str(&contents) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(CliError::Validation {
            field: "from-file".into(),
            reason: "expected a JSON object".into(),
        }),
        Err(e) => Err(CliError::Validation {
            field: "from-file".into(),
            reason: format!("invalid JSON: {e}"),
        }),
    }
}

/// `yes`/`no` cell text.
pub fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

// ── Bulk reports ────────────────────────────────────────────────────

#[derive(Tabled)]
struct BulkRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Result")]
    result: String,
    #[tabled(rename = "Error")]
    error: String,
}

/// Render a bulk report: one row per item, then a summary line on stderr.
pub fn print_bulk_report<T: serde::Serialize>(
    report: &BulkReport<T>,
    global: &GlobalOpts,
    color: bool,
) -> Result<(), CliError> {
    let out = output::render_single(
        global.output,
        report,
        |r| {
            let rows: Vec<BulkRow> = r
                .results
                .iter()
                .map(|item| BulkRow {
                    id: item.id.clone(),
                    result: if item.success {
                        output::paint_state("added", Some(true), color)
                    } else {
                        output::paint_state("failed", Some(false), color)
                    },
                    error: item.error.clone().unwrap_or_default(),
                })
                .collect();
            tabled::Table::new(rows)
                .with(tabled::settings::Style::rounded())
                .to_string()
        },
        |r| {
            r.results
                .iter()
                .filter(|item| item.success)
                .map(|item| item.id.clone())
                .collect::<Vec<_>>()
                .join("\n")
        },
    )?;
    output::print_output(&out, global.quiet);
    if !global.quiet {
        eprintln!(
            "{} of {} added, {} failed",
            report.successful, report.total, report.failed
        );
    }
    Ok(())
}
