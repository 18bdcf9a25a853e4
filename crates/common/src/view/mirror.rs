use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::filter::TaskFilter;
use crate::types::{Task, TaskId};

/// Aggregate counts shown in the header and next to each filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskCounts {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
}

impl TaskCounts {
    pub fn for_filter(&self, filter: TaskFilter) -> usize {
        match filter {
            TaskFilter::All => self.total,
            TaskFilter::Pending => self.pending,
            TaskFilter::Completed => self.completed,
        }
    }
}

/// Client-local copy of the server's task list.
///
/// `completed` flags toggled here are never sent upstream; every
/// [`TaskMirror::replace`] overwrites them with the server's copy.
#[derive(Debug, Clone)]
pub struct TaskMirror {
    tasks: Vec<Task>,
    loading: bool,
    last_synced_at: Option<DateTime<Utc>>,
}

impl Default for TaskMirror {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskMirror {
    /// An empty mirror waiting for its first fetch.
    pub fn new() -> Self {
        Self { tasks: Vec::new(), loading: true, last_synced_at: None }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_synced_at(&self) -> Option<DateTime<Utc>> {
        self.last_synced_at
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Install a freshly fetched list.
    pub fn replace(&mut self, tasks: Vec<Task>) {
        self.replace_at(tasks, Utc::now());
    }

    pub fn replace_at(&mut self, tasks: Vec<Task>, synced_at: DateTime<Utc>) {
        self.tasks = tasks;
        self.loading = false;
        self.last_synced_at = Some(synced_at);
    }

    /// A fetch failed: stop showing the loading state, keep what we had.
    pub fn fetch_failed(&mut self) {
        self.loading = false;
    }

    /// Flip the local completion flag. Returns `false` when no task matches.
    pub fn toggle(&mut self, id: TaskId) -> bool {
        match self.tasks.iter_mut().find(|task| task.id == id) {
            Some(task) => {
                task.completed = !task.completed;
                true
            }
            None => false,
        }
    }

    pub fn visible(&self, filter: TaskFilter) -> Vec<&Task> {
        self.tasks.iter().filter(|task| filter.matches(task)).collect()
    }

    pub fn counts(&self) -> TaskCounts {
        let total = self.tasks.len();
        let completed = self.tasks.iter().filter(|task| task.completed).count();
        TaskCounts { total, completed, pending: total - completed }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Task> {
        vec![
            Task::new(TaskId(1), "learn the api"),
            Task::new(TaskId(2), "build the app"),
            Task::new(TaskId(3), "ship it"),
        ]
    }

    #[test]
    fn starts_loading_until_first_fetch() {
        let mut mirror = TaskMirror::new();
        assert!(mirror.is_loading());
        assert!(mirror.last_synced_at().is_none());

        mirror.replace(sample());
        assert!(!mirror.is_loading());
        assert!(mirror.last_synced_at().is_some());
    }

    #[test]
    fn failed_fetch_clears_loading_and_keeps_tasks() {
        let mut mirror = TaskMirror::new();
        mirror.replace(sample());
        mirror.fetch_failed();
        assert!(!mirror.is_loading());
        assert_eq!(mirror.tasks().len(), 3);

        let mut empty = TaskMirror::new();
        empty.fetch_failed();
        assert!(!empty.is_loading());
        assert!(empty.tasks().is_empty());
    }

    #[test]
    fn toggle_is_local_and_reports_misses() {
        let mut mirror = TaskMirror::new();
        mirror.replace(sample());

        assert!(mirror.toggle(TaskId(2)));
        assert!(mirror.tasks()[1].completed);
        assert!(mirror.toggle(TaskId(2)));
        assert!(!mirror.tasks()[1].completed);
        assert!(!mirror.toggle(TaskId(99)));
    }

    #[test]
    fn replace_discards_local_toggles() {
        let mut mirror = TaskMirror::new();
        mirror.replace(sample());
        mirror.toggle(TaskId(1));
        assert_eq!(mirror.counts().completed, 1);

        mirror.replace(sample());
        assert_eq!(mirror.counts().completed, 0);
    }

    #[test]
    fn visible_preserves_order_per_filter() {
        let mut mirror = TaskMirror::new();
        mirror.replace(sample());
        mirror.toggle(TaskId(2));

        let ids = |filter: TaskFilter| {
            mirror.visible(filter).iter().map(|t| t.id.get()).collect::<Vec<_>>()
        };
        assert_eq!(ids(TaskFilter::All), vec![1, 2, 3]);
        assert_eq!(ids(TaskFilter::Pending), vec![1, 3]);
        assert_eq!(ids(TaskFilter::Completed), vec![2]);
    }

    #[test]
    fn counts_add_up() {
        let mut mirror = TaskMirror::new();
        mirror.replace(sample());
        mirror.toggle(TaskId(1));
        mirror.toggle(TaskId(3));

        let counts = mirror.counts();
        assert_eq!(counts, TaskCounts { total: 3, completed: 2, pending: 1 });
        assert_eq!(counts.for_filter(TaskFilter::All), 3);
        assert_eq!(counts.for_filter(TaskFilter::Pending), 1);
        assert_eq!(counts.for_filter(TaskFilter::Completed), 2);
    }
}
