//! Task and folder records consumed by the prioritization engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A unit of work.
///
/// The engine reads tasks as an immutable snapshot; derived scores are
/// returned separately and never written back onto the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub name: String,

    /// Hours of work required.
    #[serde(default)]
    pub duration: f64,

    /// Optional hard due date (UTC).
    #[serde(default)]
    pub due: Option<DateTime<Utc>>,

    /// Ids of tasks that must finish before this one can.
    #[serde(default)]
    pub dependencies: Vec<String>,

    #[serde(default)]
    pub done: bool,

    /// Owning folder id, if any. Ignored by per-task scoring.
    #[serde(default)]
    pub parent: Option<String>,
}

impl Task {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            duration: 0.0,
            due: None,
            dependencies: Vec::new(),
            done: false,
            parent: None,
        }
    }

    pub fn with_duration(mut self, hours: f64) -> Self {
        self.duration = hours;
        self
    }

    pub fn with_due(mut self, due: DateTime<Utc>) -> Self {
        self.due = Some(due);
        self
    }

    pub fn with_dependencies(mut self, ids: &[&str]) -> Self {
        self.dependencies = ids.iter().map(|id| (*id).to_string()).collect();
        self
    }

    pub fn with_parent(mut self, folder_id: impl Into<String>) -> Self {
        self.parent = Some(folder_id.into());
        self
    }

    pub fn completed(mut self) -> Self {
        self.done = true;
        self
    }
}

/// A folder in the task tree. Pure grouping; carries no scores of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Folder {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub parent: Option<String>,

    /// Marks the single root of the folder tree.
    #[serde(default)]
    pub root: bool,
}

impl Folder {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent: None,
            root: false,
        }
    }

    pub fn with_parent(mut self, folder_id: impl Into<String>) -> Self {
        self.parent = Some(folder_id.into());
        self
    }

    pub fn as_root(mut self) -> Self {
        self.root = true;
        self
    }
}
