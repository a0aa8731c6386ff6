use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A to-do item mirroring one issue in the configured repository.
///
/// The issue list is the system of record: a task only exists once the
/// remote has assigned it a number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Issue number assigned by the remote (unique, stable)
    pub number: u64,
    /// Issue title
    pub title: String,
    /// Issue body (empty when the issue has none)
    #[serde(default)]
    pub body: String,
    /// Mirrors the issue state: closed issues load as completed
    pub completed: bool,
    /// When the issue was opened
    pub created_at: DateTime<Utc>,
}

impl Task {
    pub fn new(number: u64, title: impl Into<String>, body: impl Into<String>) -> Self {
        Task {
            number,
            title: title.into(),
            body: body.into(),
            completed: false,
            created_at: Utc::now(),
        }
    }

    /// True when the task still counts toward "items left"
    pub fn is_active(&self) -> bool {
        !self.completed
    }
}

/// `1 item`, `2 items` - the footer count word
pub fn pluralize(count: usize, word: &str) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize(1, "item"), "item");
        assert_eq!(pluralize(0, "item"), "items");
        assert_eq!(pluralize(5, "item"), "items");
    }

    #[test]
    fn test_new_task_is_active() {
        let t = Task::new(7, "Write docs", "");
        assert!(t.is_active());
        assert_eq!(t.number, 7);
    }
}
