pub mod client;
pub mod issue;
pub mod worker;

pub use client::{ApiError, IssueClient};
pub use issue::{Issue, IssuePatch, IssueState, NewIssue};
pub use worker::{SyncCommand, SyncEvent, SyncWorker};
