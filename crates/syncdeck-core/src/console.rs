// ── Console facade ──
//
// The entry point consumers call. Every configuration mutation is one
// read-modify-write cycle: fetch the whole document, apply the change in
// memory, replace the whole document. The daemon offers no revision
// token, so two consoles mutating concurrently can overwrite each
// other's changes; the last write wins.

use std::sync::Arc;

use futures_util::future::join_all;
use serde_json::Value;
use tracing::{debug, info, warn};

use syncdeck_api::{Connections, DaemonClient, SystemStatus};

use crate::bulk::{self, BulkReport};
use crate::config::DaemonConfig;
use crate::devices;
use crate::error::CoreError;
use crate::folders;
use crate::model::{ConfigDocument, Device, DeviceView, Folder, FolderStatus, FolderView};
use crate::projection;
use crate::requests::{DevicePatch, FolderPatch, NewDevice, NewFolder};
use crate::sharing::{dangling_shares, ensure_no_new_dangling};

/// Placeholder error for a folder whose status call failed.
const STATUS_UNAVAILABLE: &str = "Failed to get status";

/// Management handle for one daemon.
///
/// Cheaply cloneable via `Arc<ConsoleInner>`. Holds no cached state:
/// every call goes to the daemon.
#[derive(Clone)]
pub struct Console {
    inner: Arc<ConsoleInner>,
}

struct ConsoleInner {
    client: DaemonClient,
}

impl Console {
    /// Build a console with its own HTTP client.
    pub fn new(config: &DaemonConfig) -> Result<Self, CoreError> {
        let client = DaemonClient::new(config.url.clone(), &config.api_key, &config.transport())?;
        Ok(Self::from_client(client))
    }

    /// Wrap an existing client.
    pub fn from_client(client: DaemonClient) -> Self {
        Self {
            inner: Arc::new(ConsoleInner { client }),
        }
    }

    // ── Document cycle ───────────────────────────────────────────────

    async fn fetch(&self) -> Result<ConfigDocument, CoreError> {
        let doc: ConfigDocument = self.inner.client.get_config().await?;
        debug!(
            devices = doc.devices.len(),
            folders = doc.folders.len(),
            "fetched configuration document"
        );
        Ok(doc)
    }

    async fn write_back(&self, doc: &ConfigDocument) -> Result<(), CoreError> {
        for (folder_id, device_id) in dangling_shares(doc) {
            warn!(folder_id, device_id, "folder shared with unknown device");
        }
        self.inner.client.replace_config(doc).await?;
        info!(
            devices = doc.devices.len(),
            folders = doc.folders.len(),
            "configuration written back"
        );
        Ok(())
    }

    /// Fetch, apply `op`, and write back only if `op` succeeded.
    async fn mutate<T, F>(&self, op: F) -> Result<T, CoreError>
    where
        F: FnOnce(&mut ConfigDocument) -> Result<T, CoreError> + Send,
        T: Send,
    {
        let mut doc = self.fetch().await?;
        let dangling = dangling_shares(&doc);
        let out = op(&mut doc)?;
        ensure_no_new_dangling(&dangling, &doc)?;
        self.write_back(&doc).await?;
        Ok(out)
    }

    // ── System reads ─────────────────────────────────────────────────

    pub async fn system_status(&self) -> Result<SystemStatus, CoreError> {
        Ok(self.inner.client.get_status().await?)
    }

    /// The raw configuration document, unknown fields included.
    pub async fn system_config(&self) -> Result<Value, CoreError> {
        Ok(self.inner.client.get_config().await?)
    }

    pub async fn connections(&self) -> Result<Connections, CoreError> {
        Ok(self.inner.client.get_connections().await?)
    }

    // ── Projections ──────────────────────────────────────────────────

    /// Every configured device with its live connection state.
    pub async fn list_devices(&self) -> Result<Vec<DeviceView>, CoreError> {
        let (doc, connections) = tokio::try_join!(self.fetch(), self.connections())?;
        Ok(projection::device_views(&doc, &connections))
    }

    /// Every configured folder with its sync status.
    ///
    /// Status calls run in parallel. A folder whose status call fails is
    /// listed with a placeholder status instead of failing the listing.
    pub async fn list_folders(&self) -> Result<Vec<FolderView>, CoreError> {
        let doc = self.fetch().await?;
        let reports = join_all(
            doc.folders
                .iter()
                .map(|f| self.inner.client.get_folder_status(&f.id)),
        )
        .await;

        let statuses = doc
            .folders
            .iter()
            .zip(reports)
            .map(|(folder, report)| match report {
                Ok(report) => FolderStatus::from_report(report),
                Err(e) => {
                    warn!(folder_id = %folder.id, error = %e, "folder status unavailable");
                    FolderStatus::unavailable(STATUS_UNAVAILABLE)
                }
            })
            .collect();
        Ok(projection::folder_views(&doc, statuses))
    }

    // ── Device mutations ─────────────────────────────────────────────

    pub async fn add_device(&self, spec: NewDevice) -> Result<Device, CoreError> {
        devices::validate_new_device(&spec)?;
        self.mutate(|doc| devices::add_device(doc, spec)).await
    }

    pub async fn update_device(
        &self,
        device_id: &str,
        patch: DevicePatch,
    ) -> Result<Device, CoreError> {
        self.mutate(|doc| devices::update_device(doc, device_id, patch))
            .await
    }

    pub async fn delete_device(&self, device_id: &str) -> Result<Device, CoreError> {
        self.mutate(|doc| devices::delete_device(doc, device_id))
            .await
    }

    // ── Folder mutations ─────────────────────────────────────────────

    pub async fn add_folder(&self, spec: NewFolder) -> Result<Folder, CoreError> {
        folders::validate_new_folder(&spec)?;
        self.mutate(|doc| folders::add_folder(doc, spec)).await
    }

    pub async fn update_folder(
        &self,
        folder_id: &str,
        patch: FolderPatch,
    ) -> Result<Folder, CoreError> {
        self.mutate(|doc| folders::update_folder(doc, folder_id, patch))
            .await
    }

    pub async fn delete_folder(&self, folder_id: &str) -> Result<Folder, CoreError> {
        self.mutate(|doc| folders::delete_folder(doc, folder_id))
            .await
    }

    /// Pause a folder. A direct daemon call, not a document edit.
    pub async fn pause_folder(&self, folder_id: &str) -> Result<(), CoreError> {
        self.inner.client.pause_folder(folder_id).await?;
        info!(folder_id, "folder paused");
        Ok(())
    }

    /// Resume a folder. A direct daemon call, not a document edit.
    pub async fn resume_folder(&self, folder_id: &str) -> Result<(), CoreError> {
        self.inner.client.resume_folder(folder_id).await?;
        info!(folder_id, "folder resumed");
        Ok(())
    }

    // ── Bulk ─────────────────────────────────────────────────────────

    /// Add many devices with one fetch and at most one write.
    ///
    /// Nothing is written when every item fails.
    pub async fn bulk_add_devices(
        &self,
        items: Vec<NewDevice>,
    ) -> Result<BulkReport<Device>, CoreError> {
        let mut doc = self.fetch().await?;
        let dangling = dangling_shares(&doc);
        let report = bulk::bulk_add_devices(&mut doc, items);
        if report.any_succeeded() {
            ensure_no_new_dangling(&dangling, &doc)?;
            self.write_back(&doc).await?;
        }
        Ok(report)
    }

    /// Add many folders with one fetch and at most one write.
    ///
    /// Nothing is written when every item fails.
    pub async fn bulk_add_folders(
        &self,
        items: Vec<NewFolder>,
    ) -> Result<BulkReport<Folder>, CoreError> {
        let mut doc = self.fetch().await?;
        let dangling = dangling_shares(&doc);
        let report = bulk::bulk_add_folders(&mut doc, items);
        if report.any_succeeded() {
            ensure_no_new_dangling(&dangling, &doc)?;
            self.write_back(&doc).await?;
        }
        Ok(report)
    }
}
