use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::validate;

/// Jirosso is a command line tool for manipulating JIRA tasks.
///
/// Connection options can also be set with the JIRA_SERVER, JIRA_USERNAME
/// and JIRA_PASSWORD environment variables. Missing ones are prompted for.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Cli {
    /// Your JIRA server host
    #[clap(long, env = "JIRA_SERVER", global = true)]
    pub jira_server: Option<String>,

    /// Your JIRA username. Example: a.opalev
    #[clap(long, env = "JIRA_USERNAME", global = true)]
    pub username: Option<String>,

    /// Your JIRA password
    #[clap(long, env = "JIRA_PASSWORD", hide_env_values = true, global = true)]
    pub password: Option<String>,

    /// Settings file (defaults to ~/.config/jirosso/config.yaml)
    #[clap(long, env = "JIROSSO_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Log what is sent to JIRA
    #[clap(short, long, value_parser, default_value_t = false, global = true)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Commit time to a JIRA issue and comment on it
    CommitTime(CommitTimeArgs),
    /// Create an issue from the command line
    CreateIssue(CreateIssueArgs),
}

#[derive(clap::Args, Debug, Default)]
pub struct CommitTimeArgs {
    /// JIRA issue to update. Format: \w+-\d+
    #[clap(long, value_parser = validate::parse_issue_key)]
    pub issue_num: Option<String>,

    /// Time spent on the task. Format: \d+[mhdw]. Leave empty to skip the time commit
    #[clap(long, value_parser = validate::parse_time_spent)]
    pub time: Option<String>,

    /// Comment message to the issue
    #[clap(long)]
    pub message: Option<String>,

    /// Disable actual commit to JIRA
    #[clap(long, value_parser, default_value_t = false)]
    pub dry_run: bool,
}

#[derive(clap::Args, Debug, Default)]
pub struct CreateIssueArgs {
    /// JIRA project where issue will be created
    #[clap(long)]
    pub project: Option<String>,

    /// Type of the issue
    #[clap(long)]
    pub issuetype: Option<String>,

    /// Title of the issue
    #[clap(long)]
    pub summary: Option<String>,

    /// Description of the issue
    #[clap(long)]
    pub description: Option<String>,

    /// Comment message to the issue
    #[clap(long)]
    pub message: Option<String>,

    /// Issue that will be linked in the new issue
    #[clap(long, value_parser = validate::parse_optional_issue_key)]
    pub issue_to_link: Option<String>,

    /// Rename current branch to the new issue key
    #[clap(long, value_parser, default_value_t = false)]
    pub rename_branch: bool,

    /// Disable actual create of issue in JIRA
    #[clap(long, value_parser, default_value_t = false)]
    pub dry_run: bool,
}
