//! Urgency and velocity scoring.
//!
//! Urgency is the work-rate a due date demands: hours of work divided by
//! days remaining. Velocity is how fast that rate is rising: hours divided
//! by days squared. A due date at or before `now` scores `f64::INFINITY`;
//! the sentinel propagates through sums and sorts as maximal.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};

use crate::due::{effective_due, task_by_id};
use crate::task::Task;
use crate::time::days_until;

/// Urgency of a single task against its effective due date.
/// Done tasks and tasks with no due date score zero.
pub fn urgency_of(task: &Task, now: DateTime<Utc>, due: Option<DateTime<Utc>>) -> f64 {
    if task.done {
        return 0.0;
    }
    let Some(due) = due else { return 0.0 };
    let days = days_until(due, now);
    if days > 0.0 {
        task.duration / days
    } else {
        f64::INFINITY
    }
}

/// Rate of urgency increase per day. Same zero and overdue rules as
/// [`urgency_of`].
pub fn velocity_of(task: &Task, now: DateTime<Utc>, due: Option<DateTime<Utc>>) -> f64 {
    if task.done {
        return 0.0;
    }
    let Some(due) = due else { return 0.0 };
    let days = days_until(due, now);
    if days > 0.0 {
        task.duration / days / days
    } else {
        f64::INFINITY
    }
}

/// Single-parent ancestor map: dependency id -> one task that depends on it.
/// Built in input order; a task with several dependents keeps the last-seen
/// one, so urgency chains through exactly one dependent per task.
pub fn ancestor_map(tasks: &[Task]) -> HashMap<String, String> {
    let mut ancestors = HashMap::new();
    for task in tasks {
        for dep in &task.dependencies {
            ancestors.insert(dep.clone(), task.id.clone());
        }
    }
    ancestors
}

/// A task's own urgency plus that of every task along its ancestor chain.
///
/// Each link is scored against its own effective due date. The walk stops at
/// the first repeated id or unresolved parent, so a cyclic or dangling map
/// terminates.
pub fn chained_urgency(
    task: &Task,
    now: DateTime<Utc>,
    tasks: &[Task],
    implied: &HashMap<String, DateTime<Utc>>,
    ancestors: &HashMap<String, String>,
) -> f64 {
    let mut total = urgency_of(task, now, effective_due(task, implied));

    let mut seen: HashSet<&str> = HashSet::new();
    seen.insert(task.id.as_str());

    let mut current = task;
    while let Some(parent_id) = ancestors.get(current.id.as_str()) {
        if !seen.insert(parent_id.as_str()) {
            break;
        }
        let Some(parent) = task_by_id(tasks, parent_id) else {
            break;
        };
        total += urgency_of(parent, now, effective_due(parent, implied));
        current = parent;
    }

    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::due::implied_due_dates;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 7, 12, 0, 0).unwrap()
    }

    #[test]
    fn no_due_date_scores_zero() {
        let task = Task::new("t", "free-floating").with_duration(4.0);
        assert_eq!(urgency_of(&task, now(), None), 0.0);
        assert_eq!(velocity_of(&task, now(), None), 0.0);
    }

    #[test]
    fn done_scores_zero_even_when_overdue() {
        let task = Task::new("t", "already finished")
            .with_duration(4.0)
            .with_due(now() - Duration::days(1))
            .completed();
        assert_eq!(urgency_of(&task, now(), task.due), 0.0);
        assert_eq!(velocity_of(&task, now(), task.due), 0.0);
    }

    #[test]
    fn urgency_is_duration_over_days() {
        let task = Task::new("t", "report")
            .with_duration(10.0)
            .with_due(now() + Duration::days(5));
        assert_eq!(urgency_of(&task, now(), task.due), 2.0);
        assert_eq!(velocity_of(&task, now(), task.due), 0.4);
    }

    #[test]
    fn overdue_is_infinite() {
        let task = Task::new("t", "late")
            .with_duration(8.0)
            .with_due(now() - Duration::hours(1));
        assert_eq!(urgency_of(&task, now(), task.due), f64::INFINITY);
        assert_eq!(velocity_of(&task, now(), task.due), f64::INFINITY);
    }

    #[test]
    fn due_exactly_now_is_infinite() {
        let task = Task::new("t", "due this instant")
            .with_duration(0.0)
            .with_due(now());
        assert_eq!(urgency_of(&task, now(), task.due), f64::INFINITY);
    }

    #[test]
    fn zero_duration_scores_zero_before_due() {
        let task = Task::new("t", "instant")
            .with_duration(0.0)
            .with_due(now() + Duration::days(1));
        assert_eq!(urgency_of(&task, now(), task.due), 0.0);
    }

    #[test]
    fn last_dependent_wins_in_ancestor_map() {
        let tasks = vec![
            Task::new("x", "first dependent").with_dependencies(&["shared"]),
            Task::new("y", "second dependent").with_dependencies(&["shared"]),
            Task::new("shared", "depended on twice"),
        ];
        let ancestors = ancestor_map(&tasks);
        assert_eq!(ancestors.get("shared"), Some(&"y".to_string()));
    }

    #[test]
    fn chained_urgency_sums_ancestor_chain() {
        let tasks = vec![
            Task::new("1", "deliverable")
                .with_duration(10.0)
                .with_due(now() + Duration::days(5))
                .with_dependencies(&["2"]),
            Task::new("2", "groundwork").with_duration(5.0),
        ];
        let implied = implied_due_dates(&tasks);
        let ancestors = ancestor_map(&tasks);

        // Groundwork inherits the 5-day due date: 5/5 = 1.0 of its own,
        // plus the deliverable's 10/5 = 2.0.
        let chained = chained_urgency(&tasks[1], now(), &tasks, &implied, &ancestors);
        assert_eq!(chained, 3.0);

        // The head has no ancestors; its chain is just itself.
        let head = chained_urgency(&tasks[0], now(), &tasks, &implied, &ancestors);
        assert_eq!(head, 2.0);
    }

    #[test]
    fn chained_urgency_terminates_on_cyclic_parents() {
        let tasks = vec![
            Task::new("a", "depends on b")
                .with_duration(2.0)
                .with_due(now() + Duration::days(1))
                .with_dependencies(&["b"]),
            Task::new("b", "depends on a")
                .with_duration(2.0)
                .with_dependencies(&["a"]),
        ];
        let implied = implied_due_dates(&tasks);
        let ancestors = ancestor_map(&tasks);

        // a -> b -> a would loop without the visited set. Each task is
        // counted once: a at 2/1 and b at 2/1.
        let chained = chained_urgency(&tasks[0], now(), &tasks, &implied, &ancestors);
        assert_eq!(chained, 4.0);
    }

    #[test]
    fn infinite_link_makes_the_chain_infinite() {
        let tasks = vec![
            Task::new("late", "overdue head")
                .with_duration(1.0)
                .with_due(now() - Duration::days(1))
                .with_dependencies(&["dep"]),
            Task::new("dep", "inherits overdue date").with_duration(1.0),
        ];
        let implied = implied_due_dates(&tasks);
        let ancestors = ancestor_map(&tasks);

        let chained = chained_urgency(&tasks[1], now(), &tasks, &implied, &ancestors);
        assert_eq!(chained, f64::INFINITY);
    }
}
