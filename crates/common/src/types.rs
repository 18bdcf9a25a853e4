// Core domain types shared across all taskboard crates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier of a task record. Serialized as a bare JSON number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub i64);

impl TaskId {
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TaskId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(TaskId)
    }
}

impl From<i64> for TaskId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// A single to-do item.
///
/// The server only ever creates records with `completed = false`; the flag
/// changes in a client's local mirror and is never written back.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    pub fn new(id: TaskId, text: impl Into<String>) -> Self {
        Self { id, text: text.into(), completed: false }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn task_serializes_with_flat_numeric_id() {
        let task = Task::new(TaskId(7), "buy milk");
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value, json!({ "id": 7, "text": "buy milk", "completed": false }));
    }

    #[test]
    fn task_missing_completed_defaults_to_false() {
        let task: Task = serde_json::from_value(json!({ "id": 3, "text": "x" })).unwrap();
        assert_eq!(task.id, TaskId(3));
        assert!(!task.completed);
    }

    #[test]
    fn task_id_parses_with_surrounding_whitespace() {
        assert_eq!(" 42 ".parse::<TaskId>().unwrap(), TaskId(42));
        assert!("forty-two".parse::<TaskId>().is_err());
    }
}
