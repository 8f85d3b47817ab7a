// ── Domain model ──
//
// Open records over the daemon's configuration document plus the read
// projections served to consumers.

pub mod device;
pub mod document;
pub mod folder;
pub mod view;

pub use device::{Compression, Device};
pub use document::ConfigDocument;
pub use folder::{Folder, FolderDeviceShare, FolderType};
pub use view::{DeviceView, FolderStatus, FolderView, SyncState};
