// Output format auto-detection for the CLI.
//
// TTY → human-readable text. Piped/redirected → structured JSON.
// `--json` flag forces JSON output regardless of terminal.

use serde::Serialize;
use std::io::{self, IsTerminal, Write};

use crate::client::ClientError;
use crate::config::ConfigError;
use crate::exit_code::UsageError;

const ANSI_RED: &str = "\x1b[31m";
const ANSI_RESET: &str = "\x1b[0m";

/// Output format for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text.
    Human,
    /// Machine-readable JSON (one object per response).
    Json,
}

impl OutputFormat {
    /// Auto-detect format: JSON if `--json` was passed or stdout is not a TTY.
    pub fn detect(json_flag: bool) -> Self {
        if json_flag {
            return Self::Json;
        }
        Self::detect_from_terminal(io::stdout().is_terminal())
    }

    /// Testable variant that takes an explicit `is_tty` flag.
    pub fn detect_from_terminal(is_tty: bool) -> Self {
        if is_tty {
            Self::Human
        } else {
            Self::Json
        }
    }
}

/// Write a value to stdout in the selected format.
pub fn print_output<T, F>(format: OutputFormat, value: &T, human_fn: F) -> io::Result<()>
where
    T: Serialize,
    F: FnOnce(&T) -> String,
{
    write_output(&mut io::stdout().lock(), format, value, human_fn)
}

/// Write a value to a provided writer.
pub fn write_output<W, T, F>(
    writer: &mut W,
    format: OutputFormat,
    value: &T,
    human_fn: F,
) -> io::Result<()>
where
    W: Write,
    T: Serialize,
    F: FnOnce(&T) -> String,
{
    match format {
        OutputFormat::Human => {
            writeln!(writer, "{}", human_fn(value))
        }
        OutputFormat::Json => {
            serde_json::to_writer(&mut *writer, value).map_err(io::Error::other)?;
            writeln!(writer)
        }
    }
}

/// Write an error to stderr in the selected format.
pub fn print_error(format: OutputFormat, code: &str, message: &str) {
    let mut err = io::stderr().lock();
    let line = render_error(format, code, message, io::stderr().is_terminal());
    let _ = writeln!(err, "{line}");
}

fn render_error(format: OutputFormat, code: &str, message: &str, is_tty: bool) -> String {
    match format {
        OutputFormat::Human if is_tty => format!("{ANSI_RED}error:{ANSI_RESET} {message}"),
        OutputFormat::Human => format!("error: {message}"),
        OutputFormat::Json => serde_json::json!({
            "error": {
                "code": code,
                "message": message,
            }
        })
        .to_string(),
    }
}

/// Print a mapped, actionable error for a command failure.
pub fn print_anyhow_error(format: OutputFormat, error: &anyhow::Error) {
    let (code, message) = actionable_error(error);
    print_error(format, code, &message);
}

fn actionable_error(error: &anyhow::Error) -> (&'static str, String) {
    for cause in error.chain() {
        if let Some(client_err) = cause.downcast_ref::<ClientError>() {
            return match client_err {
                ClientError::Unreachable { url, .. } => (
                    "SERVER_UNREACHABLE",
                    format!(
                        "Could not reach the server at {url}. Start it with: taskboard-server \
                         (or pass --server <url>)"
                    ),
                ),
                ClientError::Rejected { message, .. } => ("REQUEST_REJECTED", message.clone()),
                ClientError::NotFound { message } => (
                    "NOT_FOUND",
                    format!("{message}. Run: taskboard ls to see available tasks"),
                ),
                ClientError::Server { .. } | ClientError::Decode(_) => {
                    ("SERVER_ERROR", format!("{error:#}"))
                }
            };
        }
        if cause.downcast_ref::<UsageError>().is_some() {
            return ("USAGE", cause.to_string());
        }
        if cause.downcast_ref::<ConfigError>().is_some() {
            return ("CONFIG_ERROR", cause.to_string());
        }
    }

    ("ERROR", format!("{error:#}"))
}
