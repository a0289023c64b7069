//! `running-config diff|push`.

use std::path::Path;

use cxsync_core::engine::full_config;
use cxsync_core::{Action, FullConfig, SwitchClient};

use crate::cli::{GlobalOpts, OutputFormat, RunningConfigArgs, RunningConfigCommand};
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(
    args: RunningConfigArgs,
    client: &SwitchClient,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        RunningConfigCommand::Diff { file } => diff(client, &file, global).await,
        RunningConfigCommand::Push { file } => push(client, &file, global).await,
    }
}

/// Print the unified diff from the switch to `file`.
async fn diff(client: &SwitchClient, file: &Path, global: &GlobalOpts) -> Result<(), CliError> {
    let outcome = full_config::diff(client, file).await;
    util::finish("running-config", &outcome.diagnostics, global)?;
    // A read that only warned still means there is nothing to compare
    if outcome.action == Action::Failed {
        return Err(CliError::Reconcile {
            failed: 1,
            total: 1,
        });
    }

    let state = &outcome.tracked.state;
    match global.output {
        OutputFormat::Table | OutputFormat::Plain => {
            if state.diff.is_empty() {
                if !global.quiet {
                    eprintln!("✓ running-config matches {}", file.display());
                }
            } else {
                output::print_output(state.diff.trim_end(), global.quiet);
            }
        }
        _ => {
            let out = output::render_single(&global.output, &outcome.tracked, output::detail, |t| {
                t.id.clone().unwrap_or_default()
            });
            output::print_output(&out, global.quiet);
        }
    }
    Ok(())
}

/// Push `file` when the switch differs from it.
async fn push(client: &SwitchClient, file: &Path, global: &GlobalOpts) -> Result<(), CliError> {
    let label = format!("running-config from {}", file.display());
    if !util::confirm(
        &format!("Replace the switch {label}?"),
        global,
        "push running-config",
    )? {
        return Ok(());
    }

    let outcome = full_config::apply(client, &FullConfig::new(file)).await;
    util::finish("running-config", &outcome.diagnostics, global)?;
    if outcome.action == Action::Failed {
        return Err(CliError::Reconcile {
            failed: 1,
            total: 1,
        });
    }

    let out = output::render_single(
        &global.output,
        &outcome.tracked,
        |t| format!("id:     {}\naction: {}", t.id.as_deref().unwrap_or("-"), outcome.action),
        |t| t.id.clone().unwrap_or_default(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
