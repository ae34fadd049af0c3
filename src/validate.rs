//! Input validation for issue keys and time spent
//!
//! Both checks run before anything talks to JIRA. An empty time is not an
//! error: it means "skip the time commit".

use inquire::validator::Validation;
use inquire::CustomUserError;
use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{Error, Result};

lazy_static! {
    static ref ISSUE_KEY: Regex = Regex::new(r"^\w+-\d+$").unwrap();
    static ref TIME_SPENT: Regex = Regex::new(r"\d+[mhdw]").unwrap();
}

pub const ISSUE_KEY_FORMAT: &str = r"Issue has to be in the `\w+-\d+` format.";
pub const TIME_SPENT_FORMAT: &str = r"Time has to be in the `\d+[mhdw]` format.";

/// Check an issue key such as `ABC-123`
pub fn issue_key(value: &str) -> Result<String> {
    let value = value.trim();
    if ISSUE_KEY.is_match(value) {
        Ok(value.to_string())
    } else {
        Err(Error::InvalidInput(format!(
            "{} (got {:?})",
            ISSUE_KEY_FORMAT, value
        )))
    }
}

/// Same as [`issue_key`], but an empty value means "no issue"
pub fn optional_issue_key(value: &str) -> Result<Option<String>> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    issue_key(value).map(Some)
}

/// Check a JIRA duration such as `30m`, `2h`, `1d`, `1w` or `1h 30m`
///
/// The value only has to contain one `<digits><unit>` term; it is passed to
/// JIRA as is. Returns `None` for an empty value.
pub fn time_spent(value: &str) -> Result<Option<String>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    if TIME_SPENT.is_match(value) {
        Ok(Some(value.to_string()))
    } else {
        Err(Error::InvalidInput(format!(
            "{} (got {:?})",
            TIME_SPENT_FORMAT, value
        )))
    }
}

/// clap value parser for `--issue-num`
pub fn parse_issue_key(value: &str) -> std::result::Result<String, String> {
    issue_key(value).map_err(|_| ISSUE_KEY_FORMAT.to_string())
}

/// clap value parser for `--issue-to-link`, which may be left empty
pub fn parse_optional_issue_key(value: &str) -> std::result::Result<String, String> {
    optional_issue_key(value)
        .map(Option::unwrap_or_default)
        .map_err(|_| ISSUE_KEY_FORMAT.to_string())
}

/// clap value parser for `--time`, which may be left empty
pub fn parse_time_spent(value: &str) -> std::result::Result<String, String> {
    time_spent(value)
        .map(Option::unwrap_or_default)
        .map_err(|_| TIME_SPENT_FORMAT.to_string())
}

/// Prompt validator for a required issue key
pub fn issue_key_validator(input: &str) -> std::result::Result<Validation, CustomUserError> {
    match issue_key(input) {
        Ok(_) => Ok(Validation::Valid),
        Err(_) => Ok(Validation::Invalid(
            "This does not look like a valid issue (e.g., TRACK-123)".into(),
        )),
    }
}

/// Prompt validator for an issue key that may be left empty
pub fn optional_issue_key_validator(
    input: &str,
) -> std::result::Result<Validation, CustomUserError> {
    match optional_issue_key(input) {
        Ok(_) => Ok(Validation::Valid),
        Err(_) => Ok(Validation::Invalid(
            "This does not look like a valid issue (e.g., TRACK-123)".into(),
        )),
    }
}

/// Prompt validator for time spent that may be left empty
pub fn time_spent_validator(input: &str) -> std::result::Result<Validation, CustomUserError> {
    match time_spent(input) {
        Ok(_) => Ok(Validation::Valid),
        Err(_) => Ok(Validation::Invalid(
            "Use digits followed by m, h, d or w (e.g., 30m)".into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_key_accepts_jira_keys() {
        for key in ["ABC-123", "TRACK-1", "abc-42", "A_B-7"] {
            assert_eq!(issue_key(key).unwrap(), key);
        }
    }

    #[test]
    fn test_issue_key_rejects_other_strings() {
        for key in ["abc", "ABC-", "-123", "ABC 123", "ABC-12x", ""] {
            let err = issue_key(key).unwrap_err();
            assert!(matches!(err, Error::InvalidInput(_)));
            assert!(err.to_string().contains(r"\w+-\d+"));
        }
    }

    #[test]
    fn test_optional_issue_key() {
        assert_eq!(optional_issue_key("").unwrap(), None);
        assert_eq!(optional_issue_key("  ").unwrap(), None);
        assert_eq!(
            optional_issue_key("ABC-1").unwrap(),
            Some("ABC-1".to_string())
        );
        assert!(optional_issue_key("nope").is_err());
    }

    #[test]
    fn test_time_spent_accepts_units() {
        for time in ["30m", "2h", "1d", "1w", "120m"] {
            assert_eq!(time_spent(time).unwrap(), Some(time.to_string()));
        }
    }

    #[test]
    fn test_time_spent_accepts_compound_durations() {
        for time in ["1h 30m", "1h30m", "2d 4h"] {
            assert_eq!(time_spent(time).unwrap(), Some(time.to_string()));
        }
    }

    #[test]
    fn test_time_spent_empty_means_skip() {
        assert_eq!(time_spent("").unwrap(), None);
    }

    #[test]
    fn test_time_spent_rejects_bad_format() {
        for time in ["30", "2x", "h", "m30"] {
            let err = time_spent(time).unwrap_err();
            assert!(err.to_string().contains(r"\d+[mhdw]"));
        }
    }

    #[test]
    fn test_clap_parsers() {
        assert_eq!(parse_issue_key("ABC-123"), Ok("ABC-123".to_string()));
        assert!(parse_issue_key("abc").is_err());
        assert_eq!(parse_optional_issue_key(""), Ok(String::new()));
        assert_eq!(parse_time_spent(""), Ok(String::new()));
        assert_eq!(parse_time_spent("2h"), Ok("2h".to_string()));
        assert!(parse_time_spent("2x").is_err());
    }
}
