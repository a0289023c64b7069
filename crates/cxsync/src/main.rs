mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cxsync_core::session;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    init_tracing(cli.global.verbose);

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let global = cli.global;
    match cli.command {
        // Config commands don't need a switch session
        Command::Config(args) => commands::config_cmd::handle(args, &global),

        // Shell completions generation
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "cxsync", &mut std::io::stdout());
            Ok(())
        }

        // Manifests are parsed before logging in, so a bad file fails fast
        Command::Apply(args) => {
            let manifest = commands::apply::load_manifest(&args.file)?;
            let switch = config::resolve_switch_config(&global)?;
            session::oneshot(&switch, |client| async move {
                commands::apply::apply(&client, &manifest, &global).await
            })
            .await
        }
        Command::Plan(args) => {
            let manifest = commands::apply::load_manifest(&args.file)?;
            let switch = config::resolve_switch_config(&global)?;
            session::oneshot(&switch, |client| async move {
                commands::apply::plan(&client, &manifest, &global).await
            })
            .await
        }

        // Everything else runs against one logged-in session
        cmd => {
            let switch = config::resolve_switch_config(&global)?;
            tracing::debug!(command = ?cmd, host = %switch.hostname, "dispatching command");
            session::oneshot(&switch, |client| async move {
                commands::dispatch(cmd, &client, &global).await
            })
            .await
        }
    }
}
