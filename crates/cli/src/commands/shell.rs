// `taskboard shell` — interactive view over the task list.
//
// Completion toggles live only in this session's mirror and are lost on the
// next re-fetch.

use std::io::{self, BufRead, Write};

use clap::Args;
use taskboard_common::{types::TaskId, view::TaskFilter};

use crate::client::TaskApi;
use crate::output::{self, OutputFormat};
use crate::view::ViewSession;

const HELP: &str = "\
commands:
  ls                 show the list
  add <text>         create a task
  rm <id>            delete a task
  toggle <id>        mark done/undone (local only)
  filter <name>      all, pending or completed
  refresh            re-fetch from the server
  help               this message
  quit               leave the shell";

#[derive(Debug, Args)]
pub struct ShellArgs {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    List,
    Add(String),
    Remove(TaskId),
    Toggle(TaskId),
    Filter(TaskFilter),
    Refresh,
    Help,
    Quit,
}

impl ShellCommand {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "ls" | "list" => Self::List,
            "add" => Self::Add(rest.to_string()),
            "rm" | "delete" => Self::Remove(parse_id(rest)?),
            "toggle" | "done" => Self::Toggle(parse_id(rest)?),
            "filter" => Self::Filter(rest.parse().map_err(|e| format!("{e}"))?),
            "refresh" => Self::Refresh,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => return Err(format!("unknown command `{other}` (try `help`)")),
        };
        Ok(Some(command))
    }
}

fn parse_id(raw: &str) -> Result<TaskId, String> {
    if raw.is_empty() {
        return Err("expected a task id".to_string());
    }
    raw.parse().map_err(|_| format!("`{raw}` is not a task id"))
}

pub fn run(_args: ShellArgs, server: Option<&str>) -> anyhow::Result<()> {
    let result = super::connect(server).and_then(|client| {
        let session = ViewSession::new(client);
        super::block_on(drive(session, io::stdin().lock(), io::stdout()))??;
        Ok(())
    });
    if let Err(e) = &result {
        output::print_anyhow_error(OutputFormat::Human, e);
    }
    result
}

/// Run the read-eval-render loop until `quit` or end of input.
pub async fn drive<A, R, W>(mut session: ViewSession<A>, input: R, mut out: W) -> io::Result<()>
where
    A: TaskApi,
    R: BufRead,
    W: Write,
{
    writeln!(out, "{}", session.render())?;
    session.refresh().await;
    writeln!(out, "{}", session.render())?;

    let mut lines = input.lines();
    loop {
        write!(out, "> ")?;
        out.flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        let command = match ShellCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                writeln!(out, "{message}")?;
                continue;
            }
        };

        match command {
            ShellCommand::List => {}
            ShellCommand::Add(text) => {
                if text.trim().is_empty() {
                    writeln!(out, "nothing to add")?;
                    continue;
                }
                if !session.add(&text).await {
                    writeln!(out, "could not add task")?;
                }
            }
            ShellCommand::Remove(id) => {
                if !session.delete(id).await {
                    writeln!(out, "could not delete #{id}")?;
                }
            }
            ShellCommand::Toggle(id) => {
                if !session.toggle(id) {
                    writeln!(out, "no task #{id}")?;
                }
            }
            ShellCommand::Filter(filter) => session.set_filter(filter),
            ShellCommand::Refresh => {
                if !session.refresh().await {
                    writeln!(out, "refresh failed; showing last known list")?;
                }
            }
            ShellCommand::Help => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            ShellCommand::Quit => break,
        }
        writeln!(out, "{}", session.render())?;
    }
    Ok(())
}
