//! Due-date inheritance across the dependency graph.
//!
//! A task with an explicit due date heads a chain: everything it transitively
//! depends on must be finished in time for it, so each of those tasks
//! inherits the head's due date. When several heads reach the same task, the
//! earliest date wins.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};

use crate::task::Task;

pub(crate) fn task_by_id<'a>(tasks: &'a [Task], id: &str) -> Option<&'a Task> {
    tasks.iter().find(|task| task.id == id)
}

/// The support set of `head`: the task itself plus everything reachable
/// through `dependencies`, deduplicated by id. Unresolved ids are skipped;
/// a repeated id stops expansion, so cyclic edges terminate.
fn support_set<'a>(head: &'a Task, tasks: &'a [Task]) -> Vec<&'a Task> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut stack = vec![head];
    let mut members = Vec::new();

    while let Some(task) = stack.pop() {
        if !seen.insert(task.id.as_str()) {
            continue;
        }
        members.push(task);
        for dep in &task.dependencies {
            if let Some(dep_task) = task_by_id(tasks, dep) {
                stack.push(dep_task);
            }
        }
    }

    members
}

/// Map each task id to the earliest due date inherited from a dependent.
/// Tasks outside every support set are absent from the map.
pub fn implied_due_dates(tasks: &[Task]) -> HashMap<String, DateTime<Utc>> {
    let mut map: HashMap<String, DateTime<Utc>> = HashMap::new();

    for head in tasks {
        let Some(due) = head.due else { continue };
        for member in support_set(head, tasks) {
            map.entry(member.id.clone())
                .and_modify(|current| {
                    if due < *current {
                        *current = due;
                    }
                })
                .or_insert(due);
        }
    }

    map
}

/// Effective due date: the task's own due date wins over an inherited one.
pub fn effective_due(
    task: &Task,
    implied: &HashMap<String, DateTime<Utc>>,
) -> Option<DateTime<Utc>> {
    task.due.or_else(|| implied.get(&task.id).copied())
}
