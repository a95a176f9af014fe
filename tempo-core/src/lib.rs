//! tempo-core: due-date inheritance, urgency scoring, and list aggregation
//! for dependency-linked task lists.
//!
//! The engine is pure and synchronous: every entry point takes an immutable
//! task snapshot plus a caller-supplied `now` and returns freshly computed
//! scores. It never reads the system clock and keeps no state between calls.

pub mod due;
pub mod folder;
pub mod list;
pub mod task;
pub mod time;
pub mod urgency;

pub use due::{effective_due, implied_due_dates};
pub use folder::{folder_detail, folder_urgency, folder_velocity, FolderDetail};
pub use list::{aggregate, score_each, task_detail, ListMetrics, ScoredTask, TaskDetail};
pub use task::{Folder, Task};
pub use time::{days_until, parse_local_due_to_utc};
pub use urgency::{ancestor_map, chained_urgency, urgency_of, velocity_of};
