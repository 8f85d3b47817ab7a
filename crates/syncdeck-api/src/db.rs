// Folder database endpoints
//
// Per-folder status plus the stateless pause/resume calls. None of these
// touch the configuration document.

use tracing::debug;

use crate::client::DaemonClient;
use crate::error::Error;

impl DaemonClient {
    /// Fetch the sync status of one folder.
    ///
    /// `GET /rest/db/status?folder={id}`
    ///
    /// Returns loosely-typed JSON because the field set varies between
    /// daemon versions.
    pub async fn get_folder_status(&self, folder_id: &str) -> Result<serde_json::Value, Error> {
        let url = self.folder_url("db/status", folder_id)?;
        debug!(folder_id, "fetching folder status");
        self.get_json(url).await
    }

    /// Pause a folder.
    ///
    /// `POST /rest/db/pause?folder={id}`
    pub async fn pause_folder(&self, folder_id: &str) -> Result<(), Error> {
        let url = self.folder_url("db/pause", folder_id)?;
        debug!(folder_id, "pausing folder");
        self.post_empty(url).await
    }

    /// Resume a paused folder.
    ///
    /// `POST /rest/db/resume?folder={id}`
    pub async fn resume_folder(&self, folder_id: &str) -> Result<(), Error> {
        let url = self.folder_url("db/resume", folder_id)?;
        debug!(folder_id, "resuming folder");
        self.post_empty(url).await
    }
}
