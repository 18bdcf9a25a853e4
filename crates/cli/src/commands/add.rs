// `taskboard add` — create a task.

use anyhow::Context;
use clap::Args;
use taskboard_common::types::Task;

use crate::client::TaskApi;
use crate::exit_code::UsageError;
use crate::output::{self, OutputFormat};

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Task text. Multiple words are joined with spaces.
    #[arg(required = true, num_args = 1..)]
    text: Vec<String>,
    /// Force JSON output.
    #[arg(long)]
    json: bool,
}

pub fn run(args: AddArgs, server: Option<&str>) -> anyhow::Result<()> {
    let format = OutputFormat::detect(args.json);
    let result = task_text(&args.text).and_then(|text| {
        let client = super::connect(server)?;
        super::block_on(create(&client, &text))?
    });

    match result {
        Ok(task) => {
            output::print_output(format, &task, format_human)?;
            Ok(())
        }
        Err(e) => {
            output::print_anyhow_error(format, &e);
            Err(e)
        }
    }
}

fn task_text(words: &[String]) -> anyhow::Result<String> {
    let text = words.join(" ").trim().to_string();
    if text.is_empty() {
        return Err(UsageError("task text is empty".into()).into());
    }
    Ok(text)
}

async fn create<A: TaskApi>(api: &A, text: &str) -> anyhow::Result<Task> {
    api.create(text).await.context("failed to add task")
}

fn format_human(task: &Task) -> String {
    format!("Added #{}: {}", task.id, task.text)
}
