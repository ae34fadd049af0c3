//! In-memory JIRA used by unit tests

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::ConnectionConfig;
use crate::error::Error;
use crate::jira::{
    Connector, CreatedIssue, Issue, IssueFields, JiraApi, JiraError, JiraResult, NewIssue, Project,
};

pub const SERVER: &str = "https://jira.example.com";

pub fn connection() -> ConnectionConfig {
    ConnectionConfig::new()
        .with_jira_server(SERVER)
        .with_username("alice")
        .with_password("secret")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Connect,
    FetchIssue(String),
    Projects,
    CreateIssue(NewIssue),
    AddWorklog {
        key: String,
        time_spent: String,
        comment: String,
    },
    AddComment {
        key: String,
        body: String,
    },
    Link {
        link_type: String,
        inward: String,
        outward: String,
    },
    RemoteLink {
        key: String,
        target: String,
    },
    Assign {
        key: String,
        username: String,
    },
}

/// Records every call; sessions share the log with their connector
#[derive(Debug, Clone, Default)]
pub struct FakeJira {
    calls: Rc<RefCell<Vec<Call>>>,
    fail_on: Option<&'static str>,
}

impl FakeJira {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the named operation (`connect`, `add_worklog`, ...) with a 400
    pub fn failing_on(operation: &'static str) -> Self {
        Self {
            fail_on: Some(operation),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn connects(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| matches!(c, Call::Connect))
            .count()
    }

    fn record(&self, operation: &'static str, call: Call) -> JiraResult<()> {
        self.calls.borrow_mut().push(call);
        if self.fail_on == Some(operation) {
            return Err(JiraError {
                status: Some(400),
                text: format!("{} failed", operation),
                response: Some(format!(r#"{{"errorMessages":["{} failed"]}}"#, operation)),
            });
        }
        Ok(())
    }
}

impl Connector for FakeJira {
    type Session = FakeJira;

    fn connect(&self, _config: &ConnectionConfig) -> crate::Result<FakeJira> {
        self.record("connect", Call::Connect)
            .map_err(Error::connection)?;
        Ok(self.clone())
    }
}

impl JiraApi for FakeJira {
    fn issue(&self, key: &str) -> JiraResult<Issue> {
        self.record("issue", Call::FetchIssue(key.to_string()))?;
        Ok(Issue {
            id: "10000".to_string(),
            key: key.to_string(),
            self_url: format!("{}/rest/api/2/issue/{}", SERVER, key),
            fields: IssueFields {
                summary: Some(format!("Summary of {}", key)),
            },
        })
    }

    fn projects(&self) -> JiraResult<Vec<Project>> {
        self.record("projects", Call::Projects)?;
        Ok(vec![
            Project {
                key: "XYZ".to_string(),
                name: "Last letters".to_string(),
            },
            Project {
                key: "ABC".to_string(),
                name: "Alphabet".to_string(),
            },
        ])
    }

    fn create_issue(&self, issue: &NewIssue) -> JiraResult<CreatedIssue> {
        self.record("create_issue", Call::CreateIssue(issue.clone()))?;
        let key = format!("{}-42", issue.project);
        Ok(CreatedIssue {
            id: "10042".to_string(),
            self_url: format!("{}/rest/api/2/issue/10042", SERVER),
            key,
        })
    }

    fn add_worklog(&self, key: &str, time_spent: &str, comment: &str) -> JiraResult<()> {
        self.record(
            "add_worklog",
            Call::AddWorklog {
                key: key.to_string(),
                time_spent: time_spent.to_string(),
                comment: comment.to_string(),
            },
        )
    }

    fn add_comment(&self, key: &str, body: &str) -> JiraResult<()> {
        self.record(
            "add_comment",
            Call::AddComment {
                key: key.to_string(),
                body: body.to_string(),
            },
        )
    }

    fn create_issue_link(&self, link_type: &str, inward: &str, outward: &str) -> JiraResult<()> {
        self.record(
            "create_issue_link",
            Call::Link {
                link_type: link_type.to_string(),
                inward: inward.to_string(),
                outward: outward.to_string(),
            },
        )
    }

    fn add_remote_link(&self, key: &str, target: &Issue) -> JiraResult<()> {
        self.record(
            "add_remote_link",
            Call::RemoteLink {
                key: key.to_string(),
                target: target.key.clone(),
            },
        )
    }

    fn assign_issue(&self, key: &str, username: &str) -> JiraResult<()> {
        self.record(
            "assign_issue",
            Call::Assign {
                key: key.to_string(),
                username: username.to_string(),
            },
        )
    }

    fn permalink(&self, key: &str) -> String {
        format!("{}/browse/{}", SERVER, key)
    }
}
