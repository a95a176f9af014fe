//! Folder roll-ups: a folder's score is the sum over its whole subtree.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::due::{effective_due, implied_due_dates};
use crate::task::{Folder, Task};
use crate::urgency::{urgency_of, velocity_of};

type ScoreFn = fn(&Task, DateTime<Utc>, Option<DateTime<Utc>>) -> f64;

/// Sum `score` over the folder's direct tasks, then recurse into child
/// folders. A repeated folder id (malformed parent cycle) contributes zero
/// instead of recursing forever.
fn rollup<'a>(
    folder: &'a Folder,
    folders: &'a [Folder],
    tasks: &[Task],
    now: DateTime<Utc>,
    implied: &HashMap<String, DateTime<Utc>>,
    score: ScoreFn,
    visited: &mut HashSet<&'a str>,
) -> f64 {
    if !visited.insert(folder.id.as_str()) {
        return 0.0;
    }

    let direct: f64 = tasks
        .iter()
        .filter(|task| task.parent.as_deref() == Some(folder.id.as_str()))
        .map(|task| score(task, now, effective_due(task, implied)))
        .sum();

    folders
        .iter()
        .filter(|child| child.parent.as_deref() == Some(folder.id.as_str()))
        .fold(direct, |sum, child| {
            sum + rollup(child, folders, tasks, now, implied, score, visited)
        })
}

/// Total urgency of every task filed under `folder` or any of its subfolders.
pub fn folder_urgency(
    folder: &Folder,
    folders: &[Folder],
    tasks: &[Task],
    now: DateTime<Utc>,
) -> f64 {
    let implied = implied_due_dates(tasks);
    rollup(
        folder,
        folders,
        tasks,
        now,
        &implied,
        urgency_of,
        &mut HashSet::new(),
    )
}

/// Total velocity of every task filed under `folder` or any of its subfolders.
pub fn folder_velocity(
    folder: &Folder,
    folders: &[Folder],
    tasks: &[Task],
    now: DateTime<Utc>,
) -> f64 {
    let implied = implied_due_dates(tasks);
    rollup(
        folder,
        folders,
        tasks,
        now,
        &implied,
        velocity_of,
        &mut HashSet::new(),
    )
}

/// Rolled-up scores for one folder, for a detail view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FolderDetail {
    pub urgency: f64,
    pub velocity: f64,
}

pub fn folder_detail(
    id: &str,
    folders: &[Folder],
    tasks: &[Task],
    now: DateTime<Utc>,
) -> Option<FolderDetail> {
    let folder = folders.iter().find(|f| f.id == id)?;
    Some(FolderDetail {
        urgency: folder_urgency(folder, folders, tasks, now),
        velocity: folder_velocity(folder, folders, tasks, now),
    })
}
