// Client-side view model: a local mirror of the server's task list plus the
// pure filters and counters computed over it.

mod filter;
mod mirror;

pub use filter::{FilterParseError, TaskFilter};
pub use mirror::{TaskCounts, TaskMirror};
