// taskboard CLI entry point.

use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod client;
mod commands;
mod config;
mod exit_code;
mod output;
mod view;

use exit_code::ExitCode;

#[derive(Parser)]
#[command(name = "taskboard", about = "Minimal to-do list client", version)]
struct Cli {
    /// Server base URL (overrides TASKBOARD_SERVER_URL and the config file).
    #[arg(long, global = true)]
    server: Option<String>,
    #[command(subcommand)]
    command: commands::Command,
}

fn main() -> process::ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match commands::run(cli.command, cli.server.as_deref()) {
        Ok(()) => ExitCode::Success.into(),
        Err(error) => {
            tracing::debug!(error = %format!("{error:#}"), "command failed");
            ExitCode::from_error(&error).into()
        }
    }
}
