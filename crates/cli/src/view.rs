// Interactive view state: the local mirror plus the calls that keep it in
// sync with the server.
//
// Every successful mutation is followed by a full re-fetch. Failures are
// logged and leave the mirror as it was.

use chrono::Local;
use taskboard_common::{
    types::TaskId,
    view::{TaskFilter, TaskMirror},
};
use tracing::{debug, warn};

use crate::client::TaskApi;

pub struct ViewSession<A> {
    api: A,
    mirror: TaskMirror,
    filter: TaskFilter,
}

impl<A: TaskApi> ViewSession<A> {
    pub fn new(api: A) -> Self {
        Self { api, mirror: TaskMirror::new(), filter: TaskFilter::All }
    }

    pub fn mirror(&self) -> &TaskMirror {
        &self.mirror
    }

    pub fn filter(&self) -> TaskFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: TaskFilter) {
        self.filter = filter;
    }

    /// Re-fetch the full list. Returns whether the mirror was updated.
    pub async fn refresh(&mut self) -> bool {
        match self.api.list().await {
            Ok(tasks) => {
                debug!(count = tasks.len(), "task list fetched");
                self.mirror.replace(tasks);
                true
            }
            Err(error) => {
                warn!(%error, "failed to fetch tasks");
                self.mirror.fetch_failed();
                false
            }
        }
    }

    /// Create a task from trimmed input. Blank input sends nothing.
    pub async fn add(&mut self, input: &str) -> bool {
        let text = input.trim();
        if text.is_empty() {
            return false;
        }

        match self.api.create(text).await {
            Ok(task) => {
                debug!(task_id = %task.id, "task added");
                self.refresh().await;
                true
            }
            Err(error) => {
                warn!(%error, "failed to add task");
                false
            }
        }
    }

    pub async fn delete(&mut self, id: TaskId) -> bool {
        match self.api.delete(id).await {
            Ok(()) => {
                debug!(task_id = %id, "task deleted");
                self.refresh().await;
                true
            }
            Err(error) => {
                warn!(task_id = %id, %error, "failed to delete task");
                false
            }
        }
    }

    /// Flip completion locally. The server never hears about it.
    pub fn toggle(&mut self, id: TaskId) -> bool {
        self.mirror.toggle(id)
    }

    pub fn render(&self) -> String {
        render(&self.mirror, self.filter)
    }
}

pub fn render(mirror: &TaskMirror, filter: TaskFilter) -> String {
    let counts = mirror.counts();
    let mut lines = vec![format!(
        "Tasks: {} total · {} completed · {} pending",
        counts.total, counts.completed, counts.pending
    )];

    let filters: Vec<String> = TaskFilter::ALL
        .iter()
        .map(|&f| {
            let label = format!("{} {}", f, counts.for_filter(f));
            if f == filter {
                format!("[{label}]")
            } else {
                format!(" {label} ")
            }
        })
        .collect();
    lines.push(filters.join(" "));
    lines.push(String::new());

    let visible = mirror.visible(filter);
    if mirror.is_loading() {
        lines.push("Loading...".to_string());
    } else if visible.is_empty() {
        lines.push("No tasks yet. Add your first task to get started.".to_string());
    } else {
        for task in visible {
            let mark = if task.completed { "x" } else { " " };
            lines.push(format!("  [{mark}] #{} {}", task.id, task.text));
        }
    }

    if let Some(synced_at) = mirror.last_synced_at() {
        lines.push(String::new());
        lines.push(format!("synced {}", synced_at.with_timezone(&Local).format("%H:%M:%S")));
    }

    lines.join("\n")
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    use taskboard_common::types::{Task, TaskId};

    use crate::client::{ClientError, TaskApi};

    /// In-process stand-in for the server, with a switch to simulate an
    /// unreachable host.
    #[derive(Default)]
    pub struct FakeApi {
        tasks: Mutex<Vec<Task>>,
        next_id: Mutex<i64>,
        pub offline: AtomicBool,
        pub list_calls: AtomicUsize,
        pub create_calls: AtomicUsize,
    }

    impl FakeApi {
        pub fn with_texts(texts: &[&str]) -> Self {
            let api = Self::default();
            *api.next_id.lock().unwrap() = 1;
            for text in texts {
                api.push(text);
            }
            api
        }

        fn push(&self, text: &str) -> Task {
            let mut next_id = self.next_id.lock().unwrap();
            let task = Task::new(TaskId(*next_id), text);
            *next_id += 1;
            self.tasks.lock().unwrap().push(task.clone());
            task
        }

        fn check_online(&self) -> Result<(), ClientError> {
            if self.offline.load(Ordering::SeqCst) {
                Err(ClientError::Server { status: 503, message: "offline".into() })
            } else {
                Ok(())
            }
        }
    }

    impl TaskApi for FakeApi {
        async fn list(&self) -> Result<Vec<Task>, ClientError> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            self.check_online()?;
            Ok(self.tasks.lock().unwrap().clone())
        }

        async fn create(&self, text: &str) -> Result<Task, ClientError> {
            self.create_calls.fetch_add(1, Ordering::SeqCst);
            self.check_online()?;
            Ok(self.push(text))
        }

        async fn delete(&self, id: TaskId) -> Result<(), ClientError> {
            self.check_online()?;
            let mut tasks = self.tasks.lock().unwrap();
            let before = tasks.len();
            tasks.retain(|task| task.id != id);
            if tasks.len() == before {
                return Err(ClientError::NotFound { message: "Todo not found".into() });
            }
            Ok(())
        }
    }
}
