// ── Bulk import ──
//
// Applies a batch of creations to one fetched document. Each item runs
// through the same mutation service as a single add, against the
// document as left by the items before it. Failures are recorded per
// item and never abort the batch.

pub mod lines;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::devices::add_device;
use crate::error::CoreError;
use crate::folders::add_folder;
use crate::model::{ConfigDocument, Device, Folder};
use crate::requests::{NewDevice, NewFolder};

pub use lines::{parse_device_lines, parse_devices_input, parse_folder_lines, parse_folders_input};

/// Outcome of one bulk item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkItemResult<T> {
    pub id: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub entity: Option<T>,
}

/// Itemized result of a bulk import, in input order.
///
/// A report with failures is still a successful return: callers inspect
/// `failed` and the per-item errors to reconcile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkReport<T> {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub results: Vec<BulkItemResult<T>>,
}

impl<T> BulkReport<T> {
    fn from_results(results: Vec<BulkItemResult<T>>) -> Self {
        let successful = results.iter().filter(|r| r.success).count();
        Self {
            total: results.len(),
            successful,
            failed: results.len() - successful,
            results,
        }
    }

    /// Whether the document was changed and needs writing back.
    pub fn any_succeeded(&self) -> bool {
        self.successful > 0
    }
}

/// Add every device in order; see the module docs for failure handling.
pub fn bulk_add_devices(doc: &mut ConfigDocument, items: Vec<NewDevice>) -> BulkReport<Device> {
    let results = items
        .into_iter()
        .map(|item| {
            let id = item.device_id.clone();
            record(id, add_device(doc, item))
        })
        .collect();
    let report = BulkReport::from_results(results);
    info!(
        total = report.total,
        successful = report.successful,
        failed = report.failed,
        "bulk device import applied"
    );
    report
}

/// Add every folder in order; see the module docs for failure handling.
pub fn bulk_add_folders(doc: &mut ConfigDocument, items: Vec<NewFolder>) -> BulkReport<Folder> {
    let results = items
        .into_iter()
        .map(|item| {
            let id = item.id.clone();
            record(id, add_folder(doc, item))
        })
        .collect();
    let report = BulkReport::from_results(results);
    info!(
        total = report.total,
        successful = report.successful,
        failed = report.failed,
        "bulk folder import applied"
    );
    report
}

fn record<T>(id: String, outcome: Result<T, CoreError>) -> BulkItemResult<T> {
    match outcome {
        Ok(entity) => BulkItemResult {
            id,
            success: true,
            error: None,
            entity: Some(entity),
        },
        Err(e) => {
            warn!(id = %id, error = %e, "bulk item rejected");
            BulkItemResult {
                id,
                success: false,
                error: Some(e.to_string()),
                entity: None,
            }
        }
    }
}
