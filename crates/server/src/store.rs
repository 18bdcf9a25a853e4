// Task storage.
//
// Handlers only talk to the `TaskStore` trait; the process builds one
// `MemoryTaskStore` at startup and shares it through router state.

use std::sync::{PoisonError, RwLock};

use taskboard_common::types::{Task, TaskId};

/// Texts of the tasks a fresh server starts with.
pub const STARTER_TASKS: &[&str] = &["Learn the tasks API", "Build a full-stack to-do app"];

/// The authoritative, ordered collection of task records.
///
/// Operations never fail: input validation happens in the handlers.
pub trait TaskStore: Send + Sync {
    /// All records in insertion order.
    fn list(&self) -> Vec<Task>;

    /// Append a new record with a fresh id and `completed = false`.
    fn insert(&self, text: String) -> Task;

    /// Remove the record with `id`. Returns whether anything was removed.
    fn remove_by_id(&self, id: TaskId) -> bool;

    fn len(&self) -> usize;
}

#[derive(Debug)]
struct Inner {
    tasks: Vec<Task>,
    next_id: i64,
}

/// Process-lifetime store backed by a `Vec`.
///
/// Ids come from a counter that only moves forward, so an id is never
/// handed out twice even after its record is deleted.
#[derive(Debug)]
pub struct MemoryTaskStore {
    inner: RwLock<Inner>,
}

impl Default for MemoryTaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self { inner: RwLock::new(Inner { tasks: Vec::new(), next_id: 1 }) }
    }

    /// A store pre-populated with [`STARTER_TASKS`] (ids 1 and 2).
    pub fn seeded() -> Self {
        Self::with_texts(STARTER_TASKS.iter().copied())
    }

    pub fn with_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let store = Self::new();
        for text in texts {
            store.insert(text.into());
        }
        store
    }
}

// A panic while holding the lock cannot leave `Inner` half-updated (every
// mutation is a single push/remove), so a poisoned lock is safe to reuse.
impl TaskStore for MemoryTaskStore {
    fn list(&self) -> Vec<Task> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).tasks.clone()
    }

    fn insert(&self, text: String) -> Task {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let task = Task::new(TaskId(inner.next_id), text);
        inner.next_id += 1;
        inner.tasks.push(task.clone());
        task
    }

    fn remove_by_id(&self, id: TaskId) -> bool {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        match inner.tasks.iter().position(|task| task.id == id) {
            Some(index) => {
                inner.tasks.remove(index);
                true
            }
            None => false,
        }
    }

    fn len(&self) -> usize {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).tasks.len()
    }
}
