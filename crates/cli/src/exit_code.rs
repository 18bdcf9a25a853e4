// Consistent exit codes for the taskboard CLI.
//
//   0  = success
//   1  = general error
//   2  = usage/argument error
//   10 = server not reachable
//   11 = request rejected by the server
//   12 = task not found

use std::process;

use thiserror::Error;

use crate::client::ClientError;
use crate::config::ConfigError;

/// Named exit codes for the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,
    Error = 1,
    Usage = 2,
    ServerDown = 10,
    Rejected = 11,
    NotFound = 12,
}

impl ExitCode {
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Map an anyhow error to an exit code by inspecting the error chain.
    pub fn from_error(err: &anyhow::Error) -> Self {
        for cause in err.chain() {
            if let Some(client_err) = cause.downcast_ref::<ClientError>() {
                return Self::from_client_error(client_err);
            }
            if cause.downcast_ref::<UsageError>().is_some()
                || cause.downcast_ref::<ConfigError>().is_some()
            {
                return Self::Usage;
            }
        }
        Self::Error
    }

    pub fn from_client_error(err: &ClientError) -> Self {
        match err {
            ClientError::Unreachable { .. } => Self::ServerDown,
            ClientError::Rejected { .. } => Self::Rejected,
            ClientError::NotFound { .. } => Self::NotFound,
            ClientError::Server { .. } | ClientError::Decode(_) => Self::Error,
        }
    }
}

impl From<ExitCode> for process::ExitCode {
    fn from(code: ExitCode) -> Self {
        process::ExitCode::from(code.code() as u8)
    }
}

/// Bad input caught before any request is sent.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct UsageError(pub String);
