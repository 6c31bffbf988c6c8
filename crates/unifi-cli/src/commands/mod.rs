//! Command dispatch: bridges CLI args to core calls and output formatting.

pub mod clients;
pub mod config_cmd;
pub mod sites;

use unifi_core::Controller;

use crate::cli::{Command, GlobalOpts};
use crate::config;
use crate::error::CliError;

/// Dispatch a command to its handler. Completions are handled by the caller.
pub async fn dispatch(cmd: Command, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Clients(args) => clients::handle(args, global).await,
        Command::Sites(args) => sites::handle(args, global).await,
        Command::Config(args) => config_cmd::handle(args, global),
        Command::Completions(_) => Err(CliError::Internal(
            "completions are generated before dispatch".into(),
        )),
    }
}

/// Resolve config for an invocation that talks to the controller.
pub(crate) fn connect(
    global: &GlobalOpts,
    cfg: &unifi_config::Config,
) -> Result<Controller, CliError> {
    let controller_config = config::controller_config(global, cfg)?;
    Ok(Controller::new(controller_config)?)
}
