// syncdeck-core: Configuration mutation, bulk import, and read projections
// over the Syncthing daemon's configuration document.

pub mod bulk;
pub mod config;
pub mod console;
pub mod devices;
pub mod envelope;
pub mod error;
pub mod folders;
pub mod model;
pub mod projection;
pub mod requests;
pub mod sharing;

// ── Primary re-exports ──────────────────────────────────────────────
pub use bulk::{BulkItemResult, BulkReport};
pub use config::{DaemonConfig, TlsVerification};
pub use console::Console;
pub use envelope::Envelope;
pub use error::{CoreError, GatewayCause};
pub use requests::{DevicePatch, DeviceRef, FolderPatch, NewDevice, NewFolder};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    // Configuration entries
    Compression, ConfigDocument, Device, Folder, FolderDeviceShare, FolderType,
    // Projections
    DeviceView, FolderStatus, FolderView, SyncState,
};

// Daemon status types consumers render directly.
pub use syncdeck_api::{ConnectionInfo, Connections, SystemStatus};
