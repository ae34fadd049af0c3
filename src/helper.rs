//! Session helper
//!
//! Owns the connection settings, the JIRA session and the active issue for a
//! single run. The session and the issue are created on first use and reused
//! afterwards. Every remote call goes through [`JiraHelper::remote`], which
//! turns a [`JiraError`] into [`Error::Remote`].

use crate::config::{ConfigKey, ConnectionConfig};
use crate::error::{Error, Result};
use crate::jira::{
    Connector, CreatedIssue, HttpConnector, Issue, JiraApi, JiraError, JiraResult, NewIssue,
};

const DEFAULT_LINK_TYPE: &str = "Relates";

pub struct JiraHelper<C: Connector = HttpConnector> {
    connector: C,
    config: ConnectionConfig,
    link_type: String,
    issue_key: Option<String>,
    session: Option<C::Session>,
    issue: Option<Issue>,
}

impl JiraHelper<HttpConnector> {
    pub fn new(config: ConnectionConfig) -> Self {
        Self::with_connector(config, HttpConnector)
    }
}

impl<C: Connector> JiraHelper<C> {
    pub fn with_connector(config: ConnectionConfig, connector: C) -> Self {
        Self {
            connector,
            config,
            link_type: DEFAULT_LINK_TYPE.to_string(),
            issue_key: None,
            session: None,
            issue: None,
        }
    }

    /// Issue link type used by [`JiraHelper::link_issues`]
    pub fn with_link_type(mut self, link_type: impl Into<String>) -> Self {
        self.link_type = link_type.into();
        self
    }

    /// Set one connection field
    ///
    /// Only affects a session that has not been opened yet.
    pub fn configure(&mut self, key: ConfigKey, value: impl Into<String>) {
        if self.session.is_some() {
            tracing::warn!(?key, "session already open, setting applies to the next run only");
        }
        self.config.set(key, value);
    }

    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// Make `key` the active issue
    ///
    /// A cached issue for a different key is dropped.
    pub fn set_issue(&mut self, key: impl Into<String>) {
        let key = key.into();
        if self.issue_key.as_deref() != Some(key.as_str()) {
            self.issue = None;
        }
        self.issue_key = Some(key);
    }

    pub fn issue_key(&self) -> Option<&str> {
        self.issue_key.as_deref()
    }

    /// The session, connecting on first access
    pub fn session(&mut self) -> Result<&C::Session> {
        let session = match self.session.take() {
            Some(session) => session,
            None => {
                self.config.ensure_complete()?;
                tracing::debug!(
                    server = self.config.jira_server.as_deref().unwrap_or(""),
                    username = self.config.username.as_deref().unwrap_or(""),
                    "connecting to JIRA"
                );
                self.connector.connect(&self.config)?
            }
        };
        Ok(self.session.insert(session))
    }

    /// The active issue, fetched on first access
    pub fn issue(&mut self) -> Result<&Issue> {
        let issue = match self.issue.take() {
            Some(issue) => issue,
            None => {
                let key = self.issue_key.clone().ok_or(Error::NoActiveIssue)?;
                self.remote("fetch issue", |jira| jira.issue(&key))?
            }
        };
        Ok(self.issue.insert(issue))
    }

    /// Browser URL of the active issue
    pub fn permalink(&mut self) -> Result<String> {
        let key = self.issue_key.clone().ok_or(Error::NoActiveIssue)?;
        Ok(self.session()?.permalink(&key))
    }

    /// Run one remote call, translating its failure
    fn remote<T, F>(&mut self, action: &'static str, call: F) -> Result<T>
    where
        F: FnOnce(&C::Session) -> JiraResult<T>,
    {
        let session = self.session()?;
        call(session).map_err(|err: JiraError| {
            tracing::warn!(action, status = ?err.status, error = %err.text, "JIRA call failed");
            Error::remote(err)
        })
    }

    fn active_key(&mut self) -> Result<String> {
        Ok(self.issue()?.key.clone())
    }

    /// Log `duration` (JIRA shorthand, e.g. `2h`) on the active issue
    pub fn record_work(&mut self, duration: &str, message: &str) -> Result<()> {
        let key = self.active_key()?;
        tracing::info!(issue = %key, duration, "adding worklog");
        self.remote("add worklog", |jira| jira.add_worklog(&key, duration, message))
    }

    pub fn post_comment(&mut self, message: &str) -> Result<()> {
        let key = self.active_key()?;
        tracing::info!(issue = %key, "adding comment");
        self.remote("add comment", |jira| jira.add_comment(&key, message))
    }

    /// Link two issues with the configured link type
    pub fn link_issues(&mut self, from_issue: &str, to_issue: &str) -> Result<()> {
        let link_type = self.link_type.clone();
        tracing::info!(from = from_issue, to = to_issue, link_type = %link_type, "linking issues");
        self.remote("link issues", |jira| {
            jira.create_issue_link(&link_type, from_issue, to_issue)
        })
    }

    /// Add a remote link from the active issue to `target`
    pub fn attach_remote_link(&mut self, target: &str) -> Result<()> {
        let key = self.active_key()?;
        let target = self.remote("fetch linked issue", |jira| jira.issue(target))?;
        tracing::info!(issue = %key, target = %target.key, "adding remote link");
        self.remote("add remote link", |jira| jira.add_remote_link(&key, &target))
    }

    pub fn file_issue(&mut self, fields: &NewIssue) -> Result<CreatedIssue> {
        tracing::info!(project = %fields.project, issue_type = %fields.issue_type, "creating issue");
        self.remote("create issue", |jira| jira.create_issue(fields))
    }

    /// Assign the active issue to the configured user
    pub fn assign_to_self(&mut self) -> Result<()> {
        let key = self.active_key()?;
        let username = self.config.username()?.to_string();
        tracing::info!(issue = %key, username = %username, "assigning issue");
        self.remote("assign issue", |jira| jira.assign_issue(&key, &username))
    }

    /// Project keys visible to the user, sorted
    pub fn projects(&mut self) -> Result<Vec<String>> {
        let mut keys: Vec<String> = self
            .remote("list projects", |jira| jira.projects())?
            .into_iter()
            .map(|project| project.key)
            .collect();
        keys.sort();
        Ok(keys)
    }
}

impl<C: Connector> std::fmt::Debug for JiraHelper<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JiraHelper")
            .field("jira_server", &self.config.jira_server)
            .field("issue", &self.issue_key)
            .finish()
    }
}
