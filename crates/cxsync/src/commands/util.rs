//! Shared helpers for command handlers.

use std::io::IsTerminal;

use serde::Serialize;
use serde_json::Value;

use cxsync_core::{Diagnostics, ResourceKind};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
///
/// Without a terminal to prompt on, `--yes` is required.
pub fn confirm(message: &str, global: &GlobalOpts, action: &str) -> Result<bool, CliError> {
    if global.yes {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// The manifest `kind` tag for a resource kind.
pub fn kind_name(kind: ResourceKind) -> &'static str {
    match kind {
        ResourceKind::Vlan => "vlan",
        ResourceKind::Interface => "interface",
        ResourceKind::L2Interface => "l2_interface",
        ResourceKind::L3Interface => "l3_interface",
        ResourceKind::VlanInterface => "vlan_interface",
        ResourceKind::FullConfig => "full_config",
    }
}

/// Serialize a record for a report; unrepresentable state becomes null.
pub fn to_value<T: Serialize>(state: &T) -> Value {
    serde_json::to_value(state).unwrap_or(Value::Null)
}

/// Print a step's diagnostics and fail the command if any is an error.
pub fn finish(context: &str, diagnostics: &Diagnostics, global: &GlobalOpts) -> Result<(), CliError> {
    let color = output::should_color(&global.color);
    output::print_diagnostics(context, diagnostics, color, global.quiet);
    if diagnostics.has_errors() {
        return Err(CliError::Reconcile {
            failed: 1,
            total: 1,
        });
    }
    Ok(())
}
