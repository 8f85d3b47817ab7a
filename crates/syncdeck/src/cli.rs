//! Clap derive structures for the `syncdeck` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.
//! Compiled by `build.rs` as well, so it may only depend on clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// syncdeck -- manage a Syncthing daemon's devices and folders
#[derive(Debug, Parser)]
#[command(
    name = "syncdeck",
    version,
    about = "Manage Syncthing devices and folders from the command line",
    long_about = "A management console for a Syncthing daemon.\n\n\
        Every change is applied by fetching the daemon's full configuration,\n\
        editing it locally, and writing it back in a single request.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
#[allow(clippy::struct_excessive_bools)]
pub struct GlobalOpts {
    /// Daemon profile to use
    #[arg(long, short = 'p', env = "SYNCDECK_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Daemon URL (overrides profile)
    #[arg(long, short = 'd', env = "SYNCDECK_DAEMON", global = true)]
    pub daemon: Option<String>,

    /// REST API key
    #[arg(long, env = "SYNCDECK_API_KEY", global = true, hide_env = true)]
    pub api_key: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "SYNCDECK_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "SYNCDECK_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "SYNCDECK_TIMEOUT", default_value = "10", global = true)]
    pub timeout: u64,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
    /// `{success, data, error}` JSON envelope
    Envelope,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage peer devices
    #[command(alias = "dev")]
    Devices(DevicesArgs),

    /// Manage synchronized folders
    #[command(alias = "f")]
    Folders(FoldersArgs),

    /// Daemon status and raw configuration
    #[command(alias = "sys")]
    System(SystemArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared argument types ────────────────────────────────────────────

/// Attribute overrides shared by the `update` commands.
#[derive(Debug, Args)]
pub struct PatchArgs {
    /// Set any attribute by its configuration name (KEY=VALUE, repeatable).
    /// VALUE is parsed as JSON when possible, otherwise taken as a string.
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<String>,

    /// Read a JSON object of attribute overrides from a file
    #[arg(long, value_name = "PATH")]
    pub from_file: Option<PathBuf>,
}

/// Input for the `bulk` commands.
#[derive(Debug, Args)]
pub struct BulkArgs {
    /// JSON array or line-oriented file; `-` reads stdin
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CompressionArg {
    Metadata,
    Always,
    Never,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FolderTypeArg {
    #[value(name = "sendreceive")]
    SendReceive,
    #[value(name = "sendonly")]
    SendOnly,
    #[value(name = "receiveonly")]
    ReceiveOnly,
    #[value(name = "receiveencrypted")]
    ReceiveEncrypted,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  DEVICES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct DevicesArgs {
    #[command(subcommand)]
    pub command: DevicesCommand,
}

#[derive(Debug, Subcommand)]
pub enum DevicesCommand {
    /// List devices with their connection state
    #[command(alias = "ls")]
    List,

    /// Add a device
    Add {
        /// Full device ID
        device_id: String,

        /// Display name (defaults to the first 7 characters of the ID)
        #[arg(long)]
        name: Option<String>,

        /// Address to dial (repeatable; defaults to "dynamic")
        #[arg(long = "address", value_name = "ADDR")]
        addresses: Vec<String>,

        /// Compression mode
        #[arg(long, value_enum)]
        compression: Option<CompressionArg>,

        /// Mark the device as an introducer
        #[arg(long)]
        introducer: bool,

        /// Add the device paused
        #[arg(long)]
        paused: bool,

        /// Folder to share with the device (repeatable)
        #[arg(long = "folder", value_name = "FOLDER_ID")]
        folders: Vec<String>,
    },

    /// Update a device's attributes or folder membership
    Update {
        /// Device ID
        device: String,

        #[arg(long)]
        name: Option<String>,

        /// Replace the address list (repeatable)
        #[arg(long = "address", value_name = "ADDR")]
        addresses: Vec<String>,

        #[arg(long, value_enum)]
        compression: Option<CompressionArg>,

        #[arg(long)]
        introducer: Option<bool>,

        #[arg(long)]
        paused: Option<bool>,

        /// Replace the set of folders shared with this device
        #[arg(long, value_delimiter = ',', value_name = "FOLDER_ID,...")]
        folders: Option<Vec<String>>,

        /// Unshare the device from every folder
        #[arg(long, conflicts_with = "folders")]
        no_folders: bool,

        #[command(flatten)]
        patch: PatchArgs,
    },

    /// Remove a device and unshare it from every folder
    #[command(alias = "rm")]
    Remove {
        /// Device ID
        device: String,
    },

    /// Add many devices with a single configuration write
    Bulk(BulkArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  FOLDERS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct FoldersArgs {
    #[command(subcommand)]
    pub command: FoldersCommand,
}

#[derive(Debug, Subcommand)]
pub enum FoldersCommand {
    /// List folders with their sync status
    #[command(alias = "ls")]
    List,

    /// Add a folder
    Add {
        /// Folder ID
        id: String,

        /// Path on the daemon's filesystem
        path: String,

        /// Display label (defaults to the ID)
        #[arg(long)]
        label: Option<String>,

        /// Folder type
        #[arg(long = "type", value_enum)]
        folder_type: Option<FolderTypeArg>,

        /// Device to share the folder with (repeatable)
        #[arg(long = "device", value_name = "DEVICE_ID")]
        devices: Vec<String>,

        /// Full rescan interval in seconds
        #[arg(long)]
        rescan_interval: Option<u32>,
    },

    /// Update a folder's attributes or share list
    Update {
        /// Folder ID
        folder: String,

        #[arg(long)]
        label: Option<String>,

        #[arg(long)]
        path: Option<String>,

        #[arg(long = "type", value_enum)]
        folder_type: Option<FolderTypeArg>,

        #[arg(long)]
        paused: Option<bool>,

        /// Replace the share list
        #[arg(long, value_delimiter = ',', value_name = "DEVICE_ID,...")]
        devices: Option<Vec<String>>,

        /// Share the folder with no devices
        #[arg(long, conflicts_with = "devices")]
        no_devices: bool,

        #[command(flatten)]
        patch: PatchArgs,
    },

    /// Remove a folder
    #[command(alias = "rm")]
    Remove {
        /// Folder ID
        folder: String,
    },

    /// Pause syncing a folder
    Pause {
        /// Folder ID
        folder: String,
    },

    /// Resume syncing a folder
    Resume {
        /// Folder ID
        folder: String,
    },

    /// Add many folders with a single configuration write
    Bulk(BulkArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SYSTEM
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct SystemArgs {
    #[command(subcommand)]
    pub command: SystemCommand,
}

#[derive(Debug, Subcommand)]
pub enum SystemCommand {
    /// Daemon status, including this node's device ID
    Status,

    /// The full configuration document
    Config,

    /// Per-device connection state
    Connections,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current configuration
    Show,

    /// Set a profile value
    Set {
        /// Profile key (daemon, api_key, api_key_env, ca_cert, insecure, timeout)
        key: String,

        /// Value to set
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store an API key in the system keyring
    SetKey {
        /// Profile name
        #[arg(long)]
        profile: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
