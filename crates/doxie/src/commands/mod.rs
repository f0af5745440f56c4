//! Command dispatch: bridges CLI args -> client calls -> output formatting.

pub mod config_cmd;
pub mod device;
pub mod scans;
pub mod util;

use doxie_api::DoxieClient;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a scanner-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    client: &DoxieClient,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Hello => device::hello(client, global).await,
        Command::HelloExtra => device::hello_extra(client, global).await,
        Command::Restart => device::restart(client, global).await,
        Command::Scans(args) => scans::handle(client, args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
