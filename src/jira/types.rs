use serde::{Deserialize, Serialize};

/// An issue as returned by `GET /rest/api/2/issue/{key}`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Issue {
    pub id: String,
    pub key: String,
    /// REST URL of the issue
    #[serde(rename = "self")]
    pub self_url: String,
    #[serde(default)]
    pub fields: IssueFields,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct IssueFields {
    #[serde(default)]
    pub summary: Option<String>,
}

impl Issue {
    pub fn summary(&self) -> &str {
        self.fields.summary.as_deref().unwrap_or("")
    }
}

/// Response of `POST /rest/api/2/issue`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreatedIssue {
    pub id: String,
    pub key: String,
    #[serde(rename = "self")]
    pub self_url: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Project {
    pub key: String,
    #[serde(default)]
    pub name: String,
}

/// Field set for a new issue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIssue {
    pub project: String,
    pub issue_type: String,
    pub summary: String,
    pub description: String,
}

#[derive(Serialize)]
pub(crate) struct CreateIssueRequest<'a> {
    pub fields: CreateIssueFields<'a>,
}

#[derive(Serialize)]
pub(crate) struct CreateIssueFields<'a> {
    pub project: KeyRef<'a>,
    pub summary: &'a str,
    pub description: &'a str,
    #[serde(rename = "issuetype")]
    pub issue_type: NameRef<'a>,
}

#[derive(Serialize)]
pub(crate) struct KeyRef<'a> {
    pub key: &'a str,
}

#[derive(Serialize)]
pub(crate) struct NameRef<'a> {
    pub name: &'a str,
}

impl<'a> From<&'a NewIssue> for CreateIssueRequest<'a> {
    fn from(issue: &'a NewIssue) -> Self {
        CreateIssueRequest {
            fields: CreateIssueFields {
                project: KeyRef {
                    key: &issue.project,
                },
                summary: &issue.summary,
                description: &issue.description,
                issue_type: NameRef {
                    name: &issue.issue_type,
                },
            },
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WorklogRequest<'a> {
    pub time_spent: &'a str,
    pub comment: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct IssueLinkRequest<'a> {
    #[serde(rename = "type")]
    pub link_type: NameRef<'a>,
    pub inward_issue: KeyRef<'a>,
    pub outward_issue: KeyRef<'a>,
}

#[derive(Serialize)]
pub(crate) struct RemoteLinkRequest<'a> {
    pub relationship: &'a str,
    pub object: RemoteLinkObject<'a>,
}

#[derive(Serialize)]
pub(crate) struct RemoteLinkObject<'a> {
    pub url: &'a str,
    pub title: &'a str,
    pub summary: &'a str,
}

/// Error payload JIRA sends with 4xx responses
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error_messages: Vec<String>,
    #[serde(default)]
    pub errors: std::collections::BTreeMap<String, serde_json::Value>,
}

impl ErrorBody {
    /// All messages on one line, field errors as `field: message`
    pub fn joined(&self) -> String {
        let mut parts = self.error_messages.clone();
        for (field, value) in &self.errors {
            match value {
                serde_json::Value::String(msg) => parts.push(format!("{}: {}", field, msg)),
                other => parts.push(format!("{}: {}", field, other)),
            }
        }
        parts.join("; ")
    }
}
