use std::io::Write;

use colored::Colorize;

use super::Outcome;
use crate::error::Result;
use crate::helper::JiraHelper;
use crate::jira::Connector;
use crate::validate;

/// A validated `commit-time` request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitTime {
    pub issue_key: String,
    /// `None` skips the whole command
    pub time_spent: Option<String>,
    pub message: String,
    pub dry_run: bool,
}

impl CommitTime {
    pub fn new(issue_key: &str, time_spent: &str, message: &str, dry_run: bool) -> Result<Self> {
        Ok(Self {
            issue_key: validate::issue_key(issue_key)?,
            time_spent: validate::time_spent(time_spent)?,
            message: message.to_string(),
            dry_run,
        })
    }
}

/// Log time on an issue, then comment on it
///
/// The worklog and the comment are separate calls: if the comment fails the
/// worklog stays recorded.
pub fn run<C, W>(helper: &mut JiraHelper<C>, request: CommitTime, out: &mut W) -> Result<Outcome>
where
    C: Connector,
    W: Write,
{
    let Some(time_spent) = request.time_spent else {
        writeln!(out, "Skipped time commit")?;
        return Ok(Outcome::Skipped);
    };

    helper.set_issue(request.issue_key.as_str());

    if request.dry_run {
        writeln!(out, "Running in dry run mode")?;
        writeln!(
            out,
            "Would commit {} to {}",
            time_spent.red(),
            request.issue_key.bright_cyan()
        )?;
        return Ok(Outcome::DryRun);
    }

    helper.record_work(&time_spent, &request.message)?;
    helper.post_comment(&request.message)?;
    let permalink = helper.permalink()?;

    writeln!(out, "Successfully committed time to JIRA")?;
    writeln!(out, "Issue: {}", permalink.blue().underline())?;
    writeln!(out, "Time spent: {}", time_spent.red())?;

    Ok(Outcome::Completed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::testing::{connection, Call, FakeJira};

    fn run_with(fake: &FakeJira, request: CommitTime) -> (Result<Outcome>, String) {
        let mut helper = JiraHelper::with_connector(connection(), fake.clone());
        let mut out = Vec::new();
        let result = run(&mut helper, request, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_rejects_bad_issue_key() {
        let err = CommitTime::new("abc", "1h", "msg", false).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_rejects_bad_time() {
        for time in ["30", "2x"] {
            let err = CommitTime::new("ABC-1", time, "msg", false).unwrap_err();
            assert!(err.to_string().contains(r"\d+[mhdw]"));
        }
    }

    #[test]
    fn test_empty_time_skips() {
        let fake = FakeJira::new();
        let request = CommitTime::new("ABC-123", "", "msg", false).unwrap();

        let (result, out) = run_with(&fake, request);

        assert_eq!(result.unwrap(), Outcome::Skipped);
        assert!(out.contains("Skipped time commit"));
        assert!(fake.calls().is_empty());
    }

    #[test]
    fn test_dry_run_makes_no_calls() {
        let fake = FakeJira::new();
        let request = CommitTime::new("ABC-123", "30m", "msg", true).unwrap();

        let (result, out) = run_with(&fake, request);

        assert_eq!(result.unwrap(), Outcome::DryRun);
        assert!(out.contains("dry run"));
        assert!(!out.contains("Successfully"));
        assert!(fake.calls().is_empty());
    }

    #[test]
    fn test_worklog_then_comment() {
        let fake = FakeJira::new();
        let request = CommitTime::new("ABC-123", "2h", "Fixed it", false).unwrap();

        let (result, out) = run_with(&fake, request);

        assert_eq!(result.unwrap(), Outcome::Completed);
        let mutations: Vec<Call> = fake
            .calls()
            .into_iter()
            .filter(|c| matches!(c, Call::AddWorklog { .. } | Call::AddComment { .. }))
            .collect();
        assert_eq!(
            mutations,
            vec![
                Call::AddWorklog {
                    key: "ABC-123".into(),
                    time_spent: "2h".into(),
                    comment: "Fixed it".into(),
                },
                Call::AddComment {
                    key: "ABC-123".into(),
                    body: "Fixed it".into(),
                },
            ]
        );
        assert!(out.contains("Successfully committed time to JIRA"));
        assert!(out.contains("https://jira.example.com/browse/ABC-123"));
        assert!(out.contains("2h"));
        assert_eq!(fake.connects(), 1);
    }

    #[test]
    fn test_compound_time_forwarded_verbatim() {
        let fake = FakeJira::new();
        let request = CommitTime::new("ABC-123", "1h 30m", "msg", false).unwrap();

        let (result, _) = run_with(&fake, request);

        assert_eq!(result.unwrap(), Outcome::Completed);
        assert!(fake.calls().contains(&Call::AddWorklog {
            key: "ABC-123".into(),
            time_spent: "1h 30m".into(),
            comment: "msg".into(),
        }));
    }

    #[test]
    fn test_worklog_failure_stops_before_comment() {
        let fake = FakeJira::failing_on("add_worklog");
        let request = CommitTime::new("ABC-123", "2h", "msg", false).unwrap();

        let (result, out) = run_with(&fake, request);

        let err = result.unwrap_err();
        assert!(matches!(err, Error::Remote { .. }));
        assert_ne!(err.exit_code(), 0);
        assert!(!out.contains("Successfully"));
        assert!(!fake
            .calls()
            .iter()
            .any(|c| matches!(c, Call::AddComment { .. })));
    }

    #[test]
    fn test_comment_failure_keeps_worklog() {
        let fake = FakeJira::failing_on("add_comment");
        let request = CommitTime::new("ABC-123", "2h", "msg", false).unwrap();

        let (result, out) = run_with(&fake, request);

        assert!(result.is_err());
        assert!(!out.contains("Successfully"));
        assert!(fake
            .calls()
            .iter()
            .any(|c| matches!(c, Call::AddWorklog { .. })));
    }
}
