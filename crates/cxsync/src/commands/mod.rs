//! Command handlers. Each subcommand group lives in its own module; this
//! module routes the session-bound ones.

pub mod apply;
pub mod config_cmd;
pub mod resources;
pub mod running_config;
pub mod util;

use cxsync_core::{L2Interface, L3Interface, SwitchClient};

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Route a session-bound command to its handler.
pub async fn dispatch(
    cmd: Command,
    client: &SwitchClient,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Vlan(args) => resources::vlan(args, client, global).await,
        Command::Interface(args) => resources::interface(args, client, global).await,
        Command::L2(args) => resources::port::<L2Interface>(args, client, global).await,
        Command::L3(args) => resources::port::<L3Interface>(args, client, global).await,
        Command::VlanInterface(args) => resources::vlan_interface(args, client, global).await,
        Command::RunningConfig(args) => running_config::handle(args, client, global).await,
        Command::Apply(_) | Command::Plan(_) | Command::Config(_) | Command::Completions(_) => {
            unreachable!("handled before a session is opened")
        }
    }
}
