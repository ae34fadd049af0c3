use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use super::types::{
    CreateIssueRequest, ErrorBody, IssueLinkRequest, KeyRef, NameRef, RemoteLinkObject,
    RemoteLinkRequest, WorklogRequest,
};
use super::{Connector, CreatedIssue, Issue, JiraApi, JiraError, JiraResult, NewIssue, Project};
use crate::config::ConnectionConfig;
use crate::error::Error;

const USER_AGENT: &str = concat!("jirosso/", env!("CARGO_PKG_VERSION"));
const API_PREFIX: &str = "rest/api/2/";

impl JiraError {
    fn transport(err: reqwest::Error) -> Self {
        JiraError {
            status: err.status().map(|s| s.as_u16()),
            text: err.to_string(),
            response: None,
        }
    }

    fn from_response(status: StatusCode, body: String) -> Self {
        let joined = serde_json::from_str::<ErrorBody>(&body)
            .map(|parsed| parsed.joined())
            .unwrap_or_default();
        let text = if joined.is_empty() {
            status.to_string()
        } else {
            joined
        };
        let response = if body.trim().is_empty() {
            None
        } else {
            Some(body)
        };

        JiraError {
            status: Some(status.as_u16()),
            text,
            response,
        }
    }
}

#[derive(Debug, Deserialize)]
struct Myself {
    #[serde(default)]
    name: Option<String>,
    #[serde(default, rename = "displayName")]
    display_name: Option<String>,
}

/// Blocking JIRA REST v2 client authenticated with basic auth
pub struct JiraClient {
    http: Client,
    base: Url,
    server: String,
    username: String,
    password: String,
}

impl std::fmt::Debug for JiraClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JiraClient")
            .field("server", &self.server)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl JiraClient {
    /// Build a client without talking to the server
    pub fn new(
        server: &str,
        username: &str,
        password: &str,
        timeout: Duration,
    ) -> JiraResult<Self> {
        let server = server.trim_end_matches('/').to_string();
        let base = Url::parse(&format!("{}/", server)).map_err(|err| JiraError {
            status: None,
            text: format!("Invalid JIRA server address {:?}: {}", server, err),
            response: None,
        })?;
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .map_err(JiraError::transport)?;

        Ok(Self {
            http,
            base,
            server,
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    /// Build a client and check the credentials against `/myself`
    pub fn connect(
        server: &str,
        username: &str,
        password: &str,
        timeout: Duration,
    ) -> JiraResult<Self> {
        let client = Self::new(server, username, password, timeout)?;
        let me: Myself = client.get("myself")?;
        tracing::info!(
            server = %client.server,
            user = me.name.as_deref().unwrap_or(username),
            display_name = me.display_name.as_deref().unwrap_or(""),
            "authenticated with JIRA"
        );
        Ok(client)
    }

    pub fn server(&self) -> &str {
        &self.server
    }

    fn url(&self, path: &str) -> JiraResult<Url> {
        self.base
            .join(API_PREFIX)
            .and_then(|api| api.join(path))
            .map_err(|err| JiraError {
                status: None,
                text: format!("Invalid request path {:?}: {}", path, err),
                response: None,
            })
    }

    fn request(&self, method: Method, path: &str) -> JiraResult<RequestBuilder> {
        let url = self.url(path)?;
        tracing::debug!(method = %method, url = %url, "jira request");
        Ok(self
            .http
            .request(method, url)
            .basic_auth(&self.username, Some(&self.password)))
    }

    fn send(&self, request: RequestBuilder) -> JiraResult<Response> {
        let response = request.send().map_err(JiraError::transport)?;
        let status = response.status();
        tracing::debug!(status = status.as_u16(), "jira response");

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().unwrap_or_default();
        Err(JiraError::from_response(status, body))
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> JiraResult<T> {
        let response = self.send(self.request(Method::GET, path)?)?;
        response.json().map_err(JiraError::transport)
    }

    fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> JiraResult<T> {
        let response = self.send(self.request(Method::POST, path)?.json(body))?;
        response.json().map_err(JiraError::transport)
    }

    /// Send a body and ignore whatever comes back
    fn submit<B: Serialize>(&self, method: Method, path: &str, body: &B) -> JiraResult<()> {
        self.send(self.request(method, path)?.json(body))?;
        Ok(())
    }
}

impl JiraApi for JiraClient {
    fn issue(&self, key: &str) -> JiraResult<Issue> {
        self.get(&format!("issue/{}", key))
    }

    fn projects(&self) -> JiraResult<Vec<Project>> {
        self.get("project")
    }

    fn create_issue(&self, issue: &NewIssue) -> JiraResult<CreatedIssue> {
        self.post("issue", &CreateIssueRequest::from(issue))
    }

    fn add_worklog(&self, key: &str, time_spent: &str, comment: &str) -> JiraResult<()> {
        self.submit(
            Method::POST,
            &format!("issue/{}/worklog", key),
            &WorklogRequest {
                time_spent,
                comment,
            },
        )
    }

    fn add_comment(&self, key: &str, body: &str) -> JiraResult<()> {
        self.submit(
            Method::POST,
            &format!("issue/{}/comment", key),
            &serde_json::json!({ "body": body }),
        )
    }

    fn create_issue_link(&self, link_type: &str, inward: &str, outward: &str) -> JiraResult<()> {
        self.submit(
            Method::POST,
            "issueLink",
            &IssueLinkRequest {
                link_type: NameRef { name: link_type },
                inward_issue: KeyRef { key: inward },
                outward_issue: KeyRef { key: outward },
            },
        )
    }

    fn add_remote_link(&self, key: &str, target: &Issue) -> JiraResult<()> {
        let url = self.permalink(&target.key);
        self.submit(
            Method::POST,
            &format!("issue/{}/remotelink", key),
            &RemoteLinkRequest {
                relationship: "relates to",
                object: RemoteLinkObject {
                    url: &url,
                    title: &target.key,
                    summary: target.summary(),
                },
            },
        )
    }

    fn assign_issue(&self, key: &str, username: &str) -> JiraResult<()> {
        self.submit(
            Method::PUT,
            &format!("issue/{}/assignee", key),
            &serde_json::json!({ "name": username }),
        )
    }

    fn permalink(&self, key: &str) -> String {
        format!("{}/browse/{}", self.server, key)
    }
}

/// Connects [`JiraClient`]s over HTTP
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpConnector;

impl Connector for HttpConnector {
    type Session = JiraClient;

    fn connect(&self, config: &ConnectionConfig) -> crate::Result<JiraClient> {
        JiraClient::connect(
            config.server()?,
            config.username()?,
            config.password()?,
            config.timeout(),
        )
        .map_err(Error::connection)
    }
}
