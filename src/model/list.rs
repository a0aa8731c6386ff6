use crate::model::filter::Filter;
use crate::model::task::Task;

/// Footer counts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counts {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
}

/// Rollback record for one optimistic mutation. Held by the caller until
/// the matching remote call settles; applied via `rollback` on failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Toggle {
        number: u64,
        prev_completed: bool,
    },
    Edit {
        number: u64,
        prev_title: String,
        prev_body: String,
    },
}

impl Mutation {
    pub fn number(&self) -> u64 {
        match self {
            Mutation::Toggle { number, .. } => *number,
            Mutation::Edit { number, .. } => *number,
        }
    }
}

/// Completed tasks removed by `clear_completed`, with their positions in
/// the pre-clear ordering so a failed remote close can put one back.
#[derive(Debug, Clone, Default)]
pub struct ClearedBatch {
    pub removed: Vec<(usize, Task)>,
}

/// The in-memory view-model: an ordered task list derived entirely from
/// the remote issue list. Insertion order, newest first.
#[derive(Debug, Default)]
pub struct TodoList {
    tasks: Vec<Task>,
}

impl TodoList {
    pub fn new() -> Self {
        TodoList { tasks: Vec::new() }
    }

    /// Replace the whole list from a remote snapshot.
    pub fn replace_all(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    /// Prepend the canonical record returned by a successful remote create.
    pub fn insert_created(&mut self, task: Task) {
        self.tasks.insert(0, task);
    }

    pub fn get(&self, number: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.number == number)
    }

    fn get_mut(&mut self, number: u64) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.number == number)
    }

    /// Flip one task's completed flag. Returns the rollback record, or
    /// `None` for an unknown number.
    pub fn toggle(&mut self, number: u64) -> Option<Mutation> {
        let task = self.get_mut(number)?;
        let prev = task.completed;
        task.completed = !prev;
        Some(Mutation::Toggle {
            number,
            prev_completed: prev,
        })
    }

    /// Set every task's completed flag. Returns one mutation per task that
    /// actually changed, so a second identical call returns nothing.
    pub fn set_all(&mut self, completed: bool) -> Vec<Mutation> {
        let mut mutations = Vec::new();
        for task in &mut self.tasks {
            if task.completed != completed {
                mutations.push(Mutation::Toggle {
                    number: task.number,
                    prev_completed: task.completed,
                });
                task.completed = completed;
            }
        }
        mutations
    }

    /// Update a task's title/body. Both fields blank is a no-op (the prior
    /// text stays); a blank title with a non-blank body keeps the prior
    /// title. Returns `None` when nothing changed.
    pub fn edit(&mut self, number: u64, title: &str, body: &str) -> Option<Mutation> {
        let title = title.trim();
        let body = body.trim();
        if title.is_empty() && body.is_empty() {
            return None;
        }
        let task = self.get_mut(number)?;
        let new_title = if title.is_empty() { task.title.clone() } else { title.to_string() };
        let new_body = body.to_string();
        if new_title == task.title && new_body == task.body {
            return None;
        }
        let mutation = Mutation::Edit {
            number,
            prev_title: std::mem::replace(&mut task.title, new_title),
            prev_body: std::mem::replace(&mut task.body, new_body),
        };
        Some(mutation)
    }

    /// Remove exactly the completed subset, preserving the order of the
    /// remainder. The batch carries the removed tasks for rollback.
    pub fn clear_completed(&mut self) -> ClearedBatch {
        let mut removed = Vec::new();
        let mut kept = Vec::new();
        for (i, task) in self.tasks.drain(..).enumerate() {
            if task.completed {
                removed.push((i, task));
            } else {
                kept.push(task);
            }
        }
        self.tasks = kept;
        ClearedBatch { removed }
    }

    /// Put one cleared task back after its remote close failed. The index
    /// refers to the pre-clear ordering and is clamped to the current list.
    pub fn restore_cleared(&mut self, index: usize, task: Task) {
        let at = index.min(self.tasks.len());
        self.tasks.insert(at, task);
    }

    /// Undo an optimistic mutation whose remote call failed.
    pub fn rollback(&mut self, mutation: Mutation) {
        match mutation {
            Mutation::Toggle {
                number,
                prev_completed,
            } => {
                if let Some(task) = self.get_mut(number) {
                    task.completed = prev_completed;
                }
            }
            Mutation::Edit {
                number,
                prev_title,
                prev_body,
            } => {
                if let Some(task) = self.get_mut(number) {
                    task.title = prev_title;
                    task.body = prev_body;
                }
            }
        }
    }

    /// Overwrite a task with the canonical remote record after a
    /// successful update.
    pub fn merge_remote(&mut self, remote: Task) {
        if let Some(task) = self.get_mut(remote.number) {
            *task = remote;
        }
    }

    /// Visible subsequence for a filter.
    pub fn filtered(&self, filter: Filter) -> Vec<&Task> {
        self.tasks.iter().filter(|t| filter.accepts(t)).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn counts(&self) -> Counts {
        let total = self.tasks.len();
        let active = self.tasks.iter().filter(|t| t.is_active()).count();
        Counts {
            total,
            active,
            completed: total - active,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
