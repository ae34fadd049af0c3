//! JIRA REST integration
//!
//! [`JiraApi`] is the set of remote operations jirosso needs. [`JiraClient`]
//! implements it over the REST API v2 with HTTP basic auth. [`Connector`]
//! opens a session; it is the seam the session helper is generic over.

mod client;
mod types;

pub use client::{HttpConnector, JiraClient};
pub use types::{CreatedIssue, Issue, IssueFields, NewIssue, Project};

use thiserror::Error;

use crate::config::ConnectionConfig;

/// A failed call to JIRA
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{text}")]
pub struct JiraError {
    /// HTTP status, if the server answered at all
    pub status: Option<u16>,
    /// Human readable message
    pub text: String,
    /// Raw response body, if any
    pub response: Option<String>,
}

pub type JiraResult<T> = std::result::Result<T, JiraError>;

/// Remote operations on a JIRA server
pub trait JiraApi {
    fn issue(&self, key: &str) -> JiraResult<Issue>;

    fn projects(&self) -> JiraResult<Vec<Project>>;

    fn create_issue(&self, issue: &NewIssue) -> JiraResult<CreatedIssue>;

    fn add_worklog(&self, key: &str, time_spent: &str, comment: &str) -> JiraResult<()>;

    fn add_comment(&self, key: &str, body: &str) -> JiraResult<()>;

    /// `inward` and `outward` follow JIRA's naming for the two link ends
    fn create_issue_link(&self, link_type: &str, inward: &str, outward: &str) -> JiraResult<()>;

    fn add_remote_link(&self, key: &str, target: &Issue) -> JiraResult<()>;

    fn assign_issue(&self, key: &str, username: &str) -> JiraResult<()>;

    /// Browser URL of an issue
    fn permalink(&self, key: &str) -> String;
}

/// Opens an authenticated session
pub trait Connector {
    type Session: JiraApi;

    fn connect(&self, config: &ConnectionConfig) -> crate::Result<Self::Session>;
}
