//! Command dispatch: bridges CLI args -> `Console` calls -> output formatting.

pub mod config_cmd;
pub mod devices;
pub mod folders;
pub mod system;
pub mod util;

use syncdeck_core::Console;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a daemon-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, console: &Console, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Devices(args) => devices::handle(console, args, global).await,
        Command::Folders(args) => folders::handle(console, args, global).await,
        Command::System(args) => system::handle(console, args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}
