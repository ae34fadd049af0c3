use std::io::Write;
use std::path::PathBuf;

use colored::Colorize;

use super::Outcome;
use crate::config::LinkMode;
use crate::error::{Error, Result};
use crate::git;
use crate::helper::JiraHelper;
use crate::jira::{Connector, NewIssue};
use crate::validate;

/// A validated `create-issue` request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateIssue {
    pub issue: NewIssue,
    /// Comment posted on the new issue
    pub message: Option<String>,
    /// Existing issue the new one gets linked to
    pub issue_to_link: Option<String>,
    pub link_mode: LinkMode,
    /// Repository whose current branch is renamed to the new key
    pub rename_branch_in: Option<PathBuf>,
    pub dry_run: bool,
}

impl CreateIssue {
    /// Validate raw input
    ///
    /// `issue_type` must be one of `allowed_types` (case-insensitive) and is
    /// title-cased before it is sent. Empty `message` and `issue_to_link`
    /// mean "none".
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        project: &str,
        issue_type: &str,
        summary: &str,
        description: &str,
        message: &str,
        issue_to_link: &str,
        allowed_types: &[String],
        dry_run: bool,
    ) -> Result<Self> {
        let project = project.trim();
        if project.is_empty() {
            return Err(Error::InvalidInput("Project must not be empty".into()));
        }

        Ok(Self {
            issue: NewIssue {
                project: project.to_string(),
                issue_type: normalize_issue_type(issue_type, allowed_types)?,
                summary: summary.to_string(),
                description: description.to_string(),
            },
            message: Some(message.to_string()).filter(|m| !m.trim().is_empty()),
            issue_to_link: validate::optional_issue_key(issue_to_link)?,
            link_mode: LinkMode::default(),
            rename_branch_in: None,
            dry_run,
        })
    }

    pub fn with_link_mode(mut self, link_mode: LinkMode) -> Self {
        self.link_mode = link_mode;
        self
    }

    pub fn with_branch_rename(mut self, repo_dir: impl Into<PathBuf>) -> Self {
        self.rename_branch_in = Some(repo_dir.into());
        self
    }
}

/// Check `input` against the allowed types and title-case it
pub fn normalize_issue_type(input: &str, allowed_types: &[String]) -> Result<String> {
    let input = input.trim();
    if allowed_types
        .iter()
        .any(|allowed| allowed.eq_ignore_ascii_case(input))
    {
        Ok(title_case(input))
    } else {
        Err(Error::InvalidInput(format!(
            "Issue type {:?} is not one of: {}",
            input,
            allowed_types.join(", ")
        )))
    }
}

/// Upper-case the first letter of every word, lower-case the rest
///
/// A word starts after any non-alphabetic character, so `sub-task` becomes
/// `Sub-Task`.
pub fn title_case(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut at_word_start = true;
    for c in input.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                result.extend(c.to_uppercase());
            } else {
                result.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            result.push(c);
            at_word_start = true;
        }
    }
    result
}

/// Create an issue, assign it to the current user, then comment and link
pub fn run<C, W>(helper: &mut JiraHelper<C>, request: CreateIssue, out: &mut W) -> Result<Outcome>
where
    C: Connector,
    W: Write,
{
    if request.dry_run {
        writeln!(out, "Running in dry run mode. Issue wont be created")?;
        writeln!(
            out,
            "Would create {} in {}: {}",
            request.issue.issue_type.bright_cyan(),
            request.issue.project.bright_cyan(),
            request.issue.summary
        )?;
        return Ok(Outcome::DryRun);
    }

    let created = helper.file_issue(&request.issue)?;
    helper.set_issue(created.key.as_str());
    helper.assign_to_self()?;

    if let Some(message) = &request.message {
        helper.post_comment(message)?;
    }

    if let Some(target) = &request.issue_to_link {
        match request.link_mode {
            LinkMode::Relates => helper.link_issues(&created.key, target)?,
            LinkMode::Remote => helper.attach_remote_link(target)?,
        }
    }

    let permalink = helper.permalink()?;
    writeln!(out, "Successfully created a new issue in JIRA")?;
    writeln!(out, "Issue: {}", permalink.blue().underline())?;
    writeln!(out, "Key: {}", created.key.bright_cyan())?;

    if let Some(repo_dir) = &request.rename_branch_in {
        let old = git::rename_current_branch(repo_dir, &created.key)?;
        writeln!(
            out,
            "{} Renamed branch {} to {}",
            ">".bright_green(),
            old,
            created.key
        )?;
        writeln!(out, "{}", created.key)?;
    }

    Ok(Outcome::Completed)
}
