// Task endpoints.
//
// Routes:
//   GET    /api/todos  — list every task in insertion order
//   POST   /api/todos  — create a task from `{ "text": ... }`
//   DELETE /api/todos  — delete the task matching `{ "id": ... }`
//
// Bodies are decoded as raw JSON so that missing or mistyped fields map to
// the fixed client-facing messages in `protocol::http`.

use axum::{
    extract::{Json, State},
    http::StatusCode,
    routing::get,
    Router,
};
use serde_json::Value;
use taskboard_common::{
    protocol::http::{DeleteTaskResponse, ID_REQUIRED, TEXT_REQUIRED, TODOS_PATH, TODO_NOT_FOUND},
    types::{Task, TaskId},
};
use tracing::info;

use super::ApiState;
use crate::{error::ApiError, validation::JsonBody};

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route(TODOS_PATH, get(list_todos).post(create_todo).delete(delete_todo))
        .with_state(state)
}

// ── Handlers ─────────────────────────────────────────────────────────────────

async fn list_todos(State(state): State<ApiState>) -> Json<Vec<Task>> {
    Json(state.store.list())
}

async fn create_todo(
    State(state): State<ApiState>,
    JsonBody(payload): JsonBody<Value>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let text = parse_text(&payload)?;
    let task = state.store.insert(text);

    info!(task_id = %task.id, total = state.store.len(), "task created");
    Ok((StatusCode::CREATED, Json(task)))
}

async fn delete_todo(
    State(state): State<ApiState>,
    JsonBody(payload): JsonBody<Value>,
) -> Result<Json<DeleteTaskResponse>, ApiError> {
    let id = parse_id(&payload)?;

    let removed = id.is_some_and(|id| state.store.remove_by_id(id));
    if !removed {
        return Err(ApiError::not_found(TODO_NOT_FOUND));
    }

    if let Some(id) = id {
        info!(task_id = %id, total = state.store.len(), "task deleted");
    }
    Ok(Json(DeleteTaskResponse { success: true }))
}

// ── Validation ───────────────────────────────────────────────────────────────

fn parse_text(payload: &Value) -> Result<String, ApiError> {
    match payload.get("text") {
        Some(Value::String(text)) if !text.is_empty() => Ok(text.clone()),
        _ => Err(ApiError::validation(TEXT_REQUIRED)),
    }
}

/// Extract the target id of a delete.
///
/// Zero counts as missing. `Ok(None)` is a well-formed number that no stored
/// id can equal (fractional or outside the `i64` range).
fn parse_id(payload: &Value) -> Result<Option<TaskId>, ApiError> {
    let Some(Value::Number(number)) = payload.get("id") else {
        return Err(ApiError::validation(ID_REQUIRED));
    };

    if let Some(id) = number.as_i64() {
        return match id {
            0 => Err(ApiError::validation(ID_REQUIRED)),
            id => Ok(Some(TaskId(id))),
        };
    }

    match number.as_f64() {
        Some(value) if value == 0.0 => Err(ApiError::validation(ID_REQUIRED)),
        Some(value)
            if value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64 =>
        {
            Ok(Some(TaskId(value as i64)))
        }
        _ => Ok(None),
    }
}
