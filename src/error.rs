use thiserror::Error;

use crate::jira::JiraError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Missing connection setting: {0}")]
    MissingConfig(&'static str),

    #[error("Unable to connect to JIRA: {message}")]
    Connection {
        message: String,
        detail: Option<String>,
    },

    #[error("{message}")]
    Remote {
        message: String,
        detail: Option<String>,
    },

    #[error("No active issue set")]
    NoActiveIssue,

    #[error("Not in a git repository")]
    NotInGitRepo,

    #[error("HEAD is not on a local branch")]
    DetachedHead,

    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Settings file error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("User cancelled operation")]
    Cancelled,

    #[error("Prompt error: {0}")]
    Prompt(String),
}

impl Error {
    /// Translate a failed JIRA call into the user-facing remote error.
    pub fn remote(err: JiraError) -> Self {
        Error::Remote {
            message: err.text,
            detail: err.response,
        }
    }

    /// Translate a failed authentication/connection attempt.
    pub fn connection(err: JiraError) -> Self {
        Error::Connection {
            message: err.text,
            detail: err.response,
        }
    }

    /// Secondary payload shown under the main message, if the server sent one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Error::Remote { detail, .. } | Error::Connection { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidInput(_) => 2,
            Error::Cancelled => 130,
            _ => 1,
        }
    }
}

impl From<inquire::error::InquireError> for Error {
    fn from(err: inquire::error::InquireError) -> Self {
        match err {
            inquire::error::InquireError::OperationCanceled => Error::Cancelled,
            inquire::error::InquireError::OperationInterrupted => Error::Cancelled,
            other => Error::Prompt(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
