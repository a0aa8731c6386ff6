use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::Task;

/// One entry from the issues endpoint. Pull requests share this endpoint
/// on the remote and are marked by the `pull_request` key.
#[derive(Debug, Clone, Deserialize)]
pub struct Issue {
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    pub state: IssueState,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub pull_request: Option<PullRequestMarker>,
}

impl Issue {
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }

    /// Map the wire record to a task. Closed issues are completed.
    pub fn into_task(self) -> Task {
        Task {
            number: self.number,
            title: self.title,
            body: self.body.unwrap_or_default(),
            completed: self.state == IssueState::Closed,
            created_at: self.created_at,
        }
    }
}

/// Presence is the signal; the marker's own fields are irrelevant here.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestMarker {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    Open,
    Closed,
}

impl IssueState {
    pub fn from_completed(completed: bool) -> IssueState {
        if completed {
            IssueState::Closed
        } else {
            IssueState::Open
        }
    }
}

/// Body of a create call
#[derive(Debug, Clone, Serialize)]
pub struct NewIssue {
    pub title: String,
    pub body: String,
}

/// Body of an update call; absent fields are left untouched by the remote
#[derive(Debug, Clone, Default, Serialize)]
pub struct IssuePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<IssueState>,
}

impl IssuePatch {
    pub fn state(completed: bool) -> IssuePatch {
        IssuePatch {
            state: Some(IssueState::from_completed(completed)),
            ..IssuePatch::default()
        }
    }

    pub fn text(title: impl Into<String>, body: impl Into<String>) -> IssuePatch {
        IssuePatch {
            title: Some(title.into()),
            body: Some(body.into()),
            ..IssuePatch::default()
        }
    }
}
