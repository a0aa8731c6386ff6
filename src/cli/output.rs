use serde::Serialize;

use crate::model::{Counts, Filter, Task, pluralize};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskJson {
    pub number: u64,
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub body: String,
    pub completed: bool,
    pub created_at: String,
}

#[derive(Serialize)]
pub struct ListJson {
    pub repo: String,
    pub filter: Filter,
    pub counts: CountsJson,
    pub tasks: Vec<TaskJson>,
}

#[derive(Serialize)]
pub struct CountsJson {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
}

#[derive(Serialize)]
pub struct ClearJson {
    pub cleared: Vec<u64>,
}

pub fn task_to_json(task: &Task) -> TaskJson {
    TaskJson {
        number: task.number,
        title: task.title.clone(),
        body: task.body.clone(),
        completed: task.completed,
        created_at: task.created_at.to_rfc3339(),
    }
}

pub fn counts_to_json(counts: &Counts) -> CountsJson {
    CountsJson {
        total: counts.total,
        active: counts.active,
        completed: counts.completed,
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// Format a single task as a one-line summary
pub fn format_task_line(task: &Task) -> String {
    let check = if task.completed { 'x' } else { ' ' };
    format!("[{}] #{} {}", check, task.number, task.title)
}

/// The footer line under a listing
pub fn format_counts(counts: &Counts) -> String {
    format!(
        "{} {} left, {} completed",
        counts.active,
        pluralize(counts.active, "item"),
        counts.completed
    )
}
