use serde::{Deserialize, Serialize};

use crate::model::task::Task;

/// Display mode restricting which tasks are visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

/// Tab order in the footer
pub const FILTERS: [Filter; 3] = [Filter::All, Filter::Active, Filter::Completed];

impl Filter {
    /// Parse a route segment. `all`, `active` and `completed` map to their
    /// filters; anything else (including the empty segment) falls back to
    /// the default route.
    pub fn from_segment(segment: &str) -> Filter {
        match segment.trim().trim_start_matches('/') {
            "active" => Filter::Active,
            "completed" => Filter::Completed,
            _ => Filter::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Filter::All => "All",
            Filter::Active => "Active",
            Filter::Completed => "Completed",
        }
    }

    /// Whether a task is visible under this filter
    pub fn accepts(self, task: &Task) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !task.completed,
            Filter::Completed => task.completed,
        }
    }
}
