// `taskboard ls` — list tasks.

use clap::Args;
use serde::{Deserialize, Serialize};
use taskboard_common::{
    types::Task,
    view::{TaskCounts, TaskFilter, TaskMirror},
};

use crate::client::TaskApi;
use crate::output::{self, OutputFormat};

#[derive(Debug, Args)]
pub struct LsArgs {
    /// Which tasks to show: all, pending or completed.
    #[arg(long, default_value_t = TaskFilter::All)]
    filter: TaskFilter,
    /// Force JSON output.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LsResult {
    pub filter: TaskFilter,
    pub counts: TaskCounts,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

pub fn run(args: LsArgs, server: Option<&str>) -> anyhow::Result<()> {
    let format = OutputFormat::detect(args.json);
    let result = super::connect(server)
        .and_then(|client| super::block_on(fetch(&client, args.filter))?);

    match result {
        Ok(result) => {
            output::print_output(format, &result, format_human)?;
            Ok(())
        }
        Err(e) => {
            output::print_anyhow_error(format, &e);
            Err(e)
        }
    }
}

async fn fetch<A: TaskApi>(api: &A, filter: TaskFilter) -> anyhow::Result<LsResult> {
    let mut mirror = TaskMirror::new();
    mirror.replace(api.list().await?);
    Ok(LsResult {
        filter,
        counts: mirror.counts(),
        tasks: mirror.visible(filter).into_iter().cloned().collect(),
    })
}

fn format_human(result: &LsResult) -> String {
    let counts = &result.counts;
    let mut lines = vec![format!(
        "{} total · {} completed · {} pending",
        counts.total, counts.completed, counts.pending
    )];

    if result.tasks.is_empty() {
        lines.push(match result.filter {
            TaskFilter::All => "No tasks yet. Run: taskboard add <text>".to_string(),
            filter => format!("No {filter} tasks."),
        });
        return lines.join("\n");
    }

    for task in &result.tasks {
        let mark = if task.completed { "x" } else { " " };
        lines.push(format!("  [{mark}] #{} {}", task.id, task.text));
    }
    lines.join("\n")
}
