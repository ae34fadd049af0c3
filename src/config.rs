//! Configuration management for jirosso
//!
//! Two kinds of configuration live here:
//! - [`Settings`]: the optional YAML settings file (`~/.config/jirosso/config.yaml`)
//! - [`ConnectionConfig`]: server, credentials and timeout for one run

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The name of the package, used for config directory naming
const PKG_NAME: &str = "jirosso";

/// Connection timeout used when the settings file does not set one
pub const DEFAULT_TIMEOUT_SECS: f64 = 20.001;

/// Get the default settings file path
///
/// Returns `~/.config/jirosso/config.yaml`.
pub fn default_settings_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Get the configuration directory path (`~/.config/jirosso/`)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| Error::Config("HOME environment variable not set".into()))?;
    Ok(PathBuf::from(home).join(".config").join(PKG_NAME))
}

fn default_timeout() -> Duration {
    Duration::from_secs_f64(DEFAULT_TIMEOUT_SECS)
}

/// Positive seconds that fit in a [`Duration`]
fn parse_timeout(secs: f64) -> Option<Duration> {
    if secs > 0.0 {
        Duration::try_from_secs_f64(secs).ok()
    } else {
        None
    }
}

/// How `create-issue --issue-to-link` relates the new issue to the target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkMode {
    /// A regular issue link of type [`Settings::link_type`]
    #[default]
    Relates,
    /// A remote link on the new issue pointing at the target's permalink
    Remote,
}

/// Contents of the settings file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Timeout in seconds for every request to JIRA
    pub timeout: f64,
    /// Issue types accepted by `create-issue --issuetype`
    pub issue_types: Vec<String>,
    pub link_mode: LinkMode,
    /// Name of the issue link type used in [`LinkMode::Relates`]
    pub link_type: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT_SECS,
            issue_types: [
                "Bug",
                "Task",
                "Story",
                "Epic",
                "Improvement",
                "New Feature",
                "Sub-task",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            link_mode: LinkMode::Relates,
            link_type: "Relates".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    ///
    /// A missing file yields the defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "settings file not found, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    pub fn from_yaml(contents: &str) -> Result<Self> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        let settings: Settings = serde_yaml::from_str(contents)?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if parse_timeout(self.timeout).is_none() {
            return Err(Error::Config(format!(
                "timeout must be a positive number of seconds, got {}",
                self.timeout
            )));
        }
        if self.issue_types.is_empty() {
            return Err(Error::Config("issue_types must not be empty".into()));
        }
        Ok(())
    }

    /// The request timeout, or the default one if the value is out of range
    pub fn timeout(&self) -> Duration {
        parse_timeout(self.timeout).unwrap_or_else(default_timeout)
    }
}

/// Names of the connection fields that can be set one at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    JiraServer,
    Username,
    Password,
    Timeout,
}

/// Everything needed to open a session against JIRA
#[derive(Clone, Default)]
pub struct ConnectionConfig {
    pub jira_server: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub timeout: Option<Duration>,
}

impl ConnectionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_jira_server(mut self, server: impl Into<String>) -> Self {
        self.jira_server = Some(server.into());
        self
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set a single field from its textual value
    ///
    /// A timeout that does not parse as seconds is ignored with a warning.
    pub fn set(&mut self, key: ConfigKey, value: impl Into<String>) {
        let value = value.into();
        match key {
            ConfigKey::JiraServer => self.jira_server = Some(value),
            ConfigKey::Username => self.username = Some(value),
            ConfigKey::Password => self.password = Some(value),
            ConfigKey::Timeout => match value.parse::<f64>().ok().and_then(parse_timeout) {
                Some(timeout) => self.timeout = Some(timeout),
                None => tracing::warn!(value = %value, "ignoring invalid timeout"),
            },
        }
    }

    /// The server address without a trailing slash
    pub fn server(&self) -> Result<&str> {
        self.jira_server
            .as_deref()
            .map(|s| s.trim_end_matches('/'))
            .filter(|s| !s.is_empty())
            .ok_or(Error::MissingConfig("jira server"))
    }

    pub fn username(&self) -> Result<&str> {
        self.username
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or(Error::MissingConfig("username"))
    }

    pub fn password(&self) -> Result<&str> {
        self.password
            .as_deref()
            .ok_or(Error::MissingConfig("password"))
    }

    pub fn timeout(&self) -> Duration {
        self.timeout.unwrap_or_else(default_timeout)
    }

    /// Fails with the first missing field
    pub fn ensure_complete(&self) -> Result<()> {
        self.server()?;
        self.username()?;
        self.password()?;
        Ok(())
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("jira_server", &self.jira_server)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("timeout", &self.timeout)
            .finish()
    }
}
