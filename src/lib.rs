//! # jirosso
//!
//! Commit time, comment on and create JIRA issues from the command line.

pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod git;
pub mod helper;
pub mod jira;
pub mod logging;
pub mod ui;
pub mod validate;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use config::{ConnectionConfig, Settings};
pub use error::{Error, Result};
pub use helper::JiraHelper;
