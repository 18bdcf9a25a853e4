// CLI subcommand dispatch.

use std::future::Future;

use anyhow::Context;
use clap::Subcommand;

use crate::client::TaskClient;
use crate::config;

pub mod add;
pub mod ls;
pub mod rm;
pub mod shell;

#[derive(Subcommand)]
pub enum Command {
    /// List tasks with counts
    Ls(ls::LsArgs),
    /// Create a task
    Add(add::AddArgs),
    /// Delete a task by id
    Rm(rm::RmArgs),
    /// Interactive view with local completion toggles
    Shell(shell::ShellArgs),
}

pub fn run(cmd: Command, server: Option<&str>) -> anyhow::Result<()> {
    match cmd {
        Command::Ls(args) => ls::run(args, server),
        Command::Add(args) => add::run(args, server),
        Command::Rm(args) => rm::run(args, server),
        Command::Shell(args) => shell::run(args, server),
    }
}

/// Build a client for the resolved server URL.
pub(crate) fn connect(server: Option<&str>) -> anyhow::Result<TaskClient> {
    let base = config::resolve_server_url(server)?;
    let client = TaskClient::new(&base)
        .with_context(|| format!("invalid server base URL `{base}`"))?;
    tracing::debug!(url = %client.todos_url(), "using tasks endpoint");
    Ok(client)
}

/// Drive one command's future on a fresh current-thread runtime.
pub(crate) fn block_on<F: Future>(future: F) -> anyhow::Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to build tokio runtime")?;
    Ok(runtime.block_on(future))
}
