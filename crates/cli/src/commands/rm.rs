// `taskboard rm` — delete a task.

use anyhow::Context;
use clap::Args;
use serde::Serialize;
use taskboard_common::types::TaskId;

use crate::client::TaskApi;
use crate::output::{self, OutputFormat};

#[derive(Debug, Args)]
pub struct RmArgs {
    /// Id of the task to delete.
    id: TaskId,
    /// Force JSON output.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RmResult {
    pub id: TaskId,
    pub success: bool,
}

pub fn run(args: RmArgs, server: Option<&str>) -> anyhow::Result<()> {
    let format = OutputFormat::detect(args.json);
    let result = super::connect(server)
        .and_then(|client| super::block_on(remove(&client, args.id))?);

    match result {
        Ok(removed) => {
            output::print_output(format, &removed, |r| format!("Deleted #{}", r.id))?;
            Ok(())
        }
        Err(e) => {
            output::print_anyhow_error(format, &e);
            Err(e)
        }
    }
}

async fn remove<A: TaskApi>(api: &A, id: TaskId) -> anyhow::Result<RmResult> {
    api.delete(id).await.with_context(|| format!("failed to delete task {id}"))?;
    Ok(RmResult { id, success: true })
}
