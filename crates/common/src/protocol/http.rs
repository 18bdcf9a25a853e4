// HTTP routes and JSON payloads for the tasks API.

use serde::{Deserialize, Serialize};

use crate::types::TaskId;

// ── Routes ─────────────────────────────────────────────────────────
pub const TODOS_PATH: &str = "/api/todos";
pub const HEALTHZ_PATH: &str = "/healthz";

// ── Error messages ─────────────────────────────────────────────────
pub const TEXT_REQUIRED: &str = "text is required";
pub const ID_REQUIRED: &str = "id is required and must be a number";
pub const TODO_NOT_FOUND: &str = "Todo not found";

/// Body of `POST /api/todos`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateTaskRequest {
    pub text: String,
}

/// Body of `DELETE /api/todos`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteTaskRequest {
    pub id: TaskId,
}

/// Successful `DELETE /api/todos` response.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteTaskResponse {
    pub success: bool,
}

/// Every non-2xx response body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}
