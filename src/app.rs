use std::io::{self, Write};
use std::path::PathBuf;

use colored::Colorize;

use crate::cli::{Cli, Command, CommitTimeArgs, CreateIssueArgs};
use crate::commands::{self, CommitTime, CreateIssue, Outcome};
use crate::config::{self, ConfigKey, ConnectionConfig, Settings};
use crate::error::{Error, Result};
use crate::helper::JiraHelper;
use crate::jira::Connector;
use crate::ui;
use crate::validate;

/// Main application entry point
pub fn run(cli: Cli) -> Result<Outcome> {
    ui::init_render_config();

    let settings = load_settings(cli.config.clone(), config::default_settings_path())?;

    let connection = ConnectionConfig::new().with_timeout(settings.timeout());
    let mut helper = JiraHelper::new(connection).with_link_type(settings.link_type.clone());
    configure_connection(&mut helper, &cli)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::CommitTime(args) => {
            let request = commit_time_request(args)?;
            commands::commit_time::run(&mut helper, request, &mut out)
        }
        Command::CreateIssue(args) => {
            let request = create_issue_request(&mut helper, args, &settings)?;
            commands::create_issue::run(&mut helper, request, &mut out)
        }
    }
}

/// Load the settings file
///
/// An explicit path wins. Without one, an unresolvable default location
/// (no `HOME`) is treated like a missing file.
fn load_settings(explicit: Option<PathBuf>, default_path: Result<PathBuf>) -> Result<Settings> {
    let path = match (explicit, default_path) {
        (Some(path), _) => path,
        (None, Ok(path)) => path,
        (None, Err(err)) => {
            tracing::debug!(error = %err, "no settings location, using defaults");
            return Ok(Settings::default());
        }
    };

    let settings = Settings::load(&path)?;
    tracing::debug!(path = %path.display(), ?settings, "loaded settings");
    Ok(settings)
}

/// Fill the connection fields from flags/environment, prompting for the rest
fn configure_connection<C: Connector>(helper: &mut JiraHelper<C>, cli: &Cli) -> Result<()> {
    let server = match &cli.jira_server {
        Some(server) => server.clone(),
        None => ui::prompt_text("Jira server:", None)?,
    };
    helper.configure(ConfigKey::JiraServer, server);

    let username = match &cli.username {
        Some(username) => username.clone(),
        None => ui::prompt_text("Username:", None)?,
    };
    helper.configure(ConfigKey::Username, username);

    let password = match &cli.password {
        Some(password) => password.clone(),
        None => ui::prompt_password("Password:")?,
    };
    helper.configure(ConfigKey::Password, password);

    Ok(())
}

fn commit_time_request(args: CommitTimeArgs) -> Result<CommitTime> {
    let issue_num = match args.issue_num {
        Some(issue_num) => issue_num,
        None => ui::prompt_text("Issue num:", Some(validate::issue_key_validator))?,
    };
    let time = match args.time {
        Some(time) => time,
        None => ui::prompt_optional_text("Time:", Some(validate::time_spent_validator))?,
    };
    let message = match args.message {
        Some(message) => message,
        None => ui::prompt_text("Message:", None)?,
    };

    CommitTime::new(&issue_num, &time, &message, args.dry_run)
}

fn create_issue_request<C: Connector>(
    helper: &mut JiraHelper<C>,
    args: CreateIssueArgs,
    settings: &Settings,
) -> Result<CreateIssue> {
    let project = match args.project {
        Some(project) => project,
        None => {
            let projects = if args.dry_run {
                Vec::new()
            } else {
                known_projects(helper)?
            };
            ui::prompt_project(projects)?
        }
    };
    let issue_type = match args.issuetype {
        Some(issue_type) => issue_type,
        None => ui::prompt_issue_type(settings.issue_types.clone())?,
    };
    let summary = match args.summary {
        Some(summary) => summary,
        None => ui::prompt_text("Summary:", None)?,
    };
    let description = match args.description {
        Some(description) => description,
        None => ui::prompt_description("Description:")?,
    };
    let message = match args.message {
        Some(message) => message,
        None => ui::prompt_optional_text("Message:", None)?,
    };
    let issue_to_link = match args.issue_to_link {
        Some(issue_to_link) => issue_to_link,
        None => ui::prompt_optional_text(
            "Issue to link:",
            Some(validate::optional_issue_key_validator),
        )?,
    };

    let mut request = CreateIssue::new(
        &project,
        &issue_type,
        &summary,
        &description,
        &message,
        &issue_to_link,
        &settings.issue_types,
        args.dry_run,
    )?
    .with_link_mode(settings.link_mode);

    if args.rename_branch {
        request = request.with_branch_rename(std::env::current_dir()?);
    }

    Ok(request)
}

/// Project keys for autocompletion
///
/// Only a failed connection is fatal; a failed listing just disables completion.
fn known_projects<C: Connector>(helper: &mut JiraHelper<C>) -> Result<Vec<String>> {
    match helper.projects() {
        Ok(projects) => Ok(projects),
        Err(err @ Error::Connection { .. }) | Err(err @ Error::MissingConfig(_)) => Err(err),
        Err(err) => {
            tracing::warn!(error = %err, "could not list projects");
            Ok(Vec::new())
        }
    }
}

/// Print an error the way the user should see it
///
/// The server's detail payload, if any, goes on its own line.
pub fn report<W: Write>(err: &Error, out: &mut W) -> io::Result<()> {
    if matches!(err, Error::Cancelled) {
        return writeln!(out, "{} {}", "x".red(), err);
    }

    writeln!(out, "{} {}", "Error:".red().bold(), err)?;
    if let Some(detail) = err.detail() {
        writeln!(out, "{} {}", "Error:".red().bold(), detail)?;
    }
    Ok(())
}
