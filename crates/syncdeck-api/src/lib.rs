// syncdeck-api: Async Rust client for the Syncthing daemon REST API

pub mod client;
pub mod db;
pub mod error;
pub mod models;
pub mod system;
pub mod transport;

pub use client::DaemonClient;
pub use error::Error;
pub use models::{ConnectionInfo, Connections, SystemStatus};
pub use transport::{TlsMode, TransportConfig};
