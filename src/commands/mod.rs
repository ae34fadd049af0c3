//! The `commit-time` and `create-issue` commands
//!
//! Each command takes an already validated request, drives a
//! [`JiraHelper`](crate::helper::JiraHelper) and writes its report to `out`.

pub mod commit_time;
pub mod create_issue;

pub use commit_time::CommitTime;
pub use create_issue::CreateIssue;

/// How a command finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Changes were made in JIRA
    Completed,
    /// Dry run: nothing was sent to JIRA
    DryRun,
    /// No usable time was given, nothing was sent to JIRA
    Skipped,
}
