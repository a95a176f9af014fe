//! List-level aggregation: total urgency, velocity, bait, and the todo order.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::due::{effective_due, implied_due_dates, task_by_id};
use crate::task::Task;
use crate::urgency::{ancestor_map, chained_urgency, urgency_of, velocity_of};

/// A task with its derived scores for one invocation.
/// Ephemeral: recomputed from `(tasks, now)` on every call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredTask {
    #[serde(flatten)]
    pub task: Task,
    /// Chained urgency: the task's own plus its ancestor chain's.
    pub urgency: f64,
    /// Per-task velocity. Velocity does not chain.
    pub velocity: f64,
    pub implied_due: Option<DateTime<Utc>>,
}

/// Derived metrics for a whole task list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListMetrics {
    /// Sum of chained urgency over non-done tasks.
    pub urgency: f64,
    /// Sum of per-task velocity over non-done tasks.
    pub velocity: f64,
    /// Urgency that remains after the single most urgent item is handled.
    pub bait: f64,
    /// Actionable tasks, most urgent first.
    pub order: Vec<ScoredTask>,
}

/// Score every task in the snapshot: chained urgency, velocity, implied due.
pub fn score_each(tasks: &[Task], now: DateTime<Utc>) -> Vec<ScoredTask> {
    let implied = implied_due_dates(tasks);
    let ancestors = ancestor_map(tasks);

    tasks
        .iter()
        .map(|task| {
            let urgency = if task.done {
                0.0
            } else {
                chained_urgency(task, now, tasks, &implied, &ancestors)
            };
            let velocity = velocity_of(task, now, effective_due(task, &implied));
            ScoredTask {
                task: task.clone(),
                urgency,
                velocity,
                implied_due: implied.get(&task.id).copied(),
            }
        })
        .collect()
}

/// Aggregate a task snapshot into list metrics and the sorted todo order.
///
/// The order contains every non-done task with positive urgency or an
/// effective due date, sorted by descending chained urgency. The sort is
/// stable: ties keep their input order.
pub fn aggregate(tasks: &[Task], now: DateTime<Utc>) -> ListMetrics {
    let scored = score_each(tasks, now);

    let urgency: f64 = scored
        .iter()
        .filter(|s| !s.task.done)
        .map(|s| s.urgency)
        .sum();
    let velocity: f64 = scored
        .iter()
        .filter(|s| !s.task.done)
        .map(|s| s.velocity)
        .sum();

    let mut order: Vec<ScoredTask> = scored
        .into_iter()
        .filter(|s| {
            !s.task.done && (s.urgency > 0.0 || s.task.due.is_some() || s.implied_due.is_some())
        })
        .collect();
    order.sort_by(|a, b| b.urgency.partial_cmp(&a.urgency).unwrap_or(Ordering::Equal));

    let bait = order.iter().skip(1).map(|s| s.urgency).sum();

    ListMetrics {
        urgency,
        velocity,
        bait,
        order,
    }
}

/// Plain (non-chained) scores for one task, for a detail view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskDetail {
    pub urgency: f64,
    pub velocity: f64,
    pub implied_due: Option<DateTime<Utc>>,
}

pub fn task_detail(id: &str, tasks: &[Task], now: DateTime<Utc>) -> Option<TaskDetail> {
    let task = task_by_id(tasks, id)?;
    let implied = implied_due_dates(tasks);
    let due = effective_due(task, &implied);
    Some(TaskDetail {
        urgency: urgency_of(task, now, due),
        velocity: velocity_of(task, now, due),
        implied_due: implied.get(id).copied(),
    })
}
