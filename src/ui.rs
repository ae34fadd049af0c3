use inquire::autocompletion::Replacement;
use inquire::ui::{Color, RenderConfig, Styled};
use inquire::validator::Validation;
use inquire::{
    set_global_render_config, Autocomplete, CustomUserError, Editor, Password,
    PasswordDisplayMode, Select, Text,
};

use crate::error::Error;

type StringValidator = fn(&str) -> Result<Validation, CustomUserError>;

/// Initialize the global render configuration for inquire prompts
pub fn init_render_config() {
    let mut style = RenderConfig::default_colored();
    style.prompt_prefix = Styled::new(">").with_fg(Color::LightGreen);
    set_global_render_config(style);
}

/// Prompt for a required value
pub fn prompt_text(message: &str, validator: Option<StringValidator>) -> Result<String, Error> {
    let mut prompt = Text::new(message).with_validator(non_empty);
    if let Some(validator) = validator {
        prompt = prompt.with_validator(validator);
    }
    prompt.prompt().map_err(Error::from)
}

/// Prompt for a value that may be left empty
pub fn prompt_optional_text(
    message: &str,
    validator: Option<StringValidator>,
) -> Result<String, Error> {
    let mut prompt = Text::new(message).with_default("");
    if let Some(validator) = validator {
        prompt = prompt.with_validator(validator);
    }
    prompt.prompt().map_err(Error::from)
}

pub fn prompt_password(message: &str) -> Result<String, Error> {
    Password::new(message)
        .with_display_mode(PasswordDisplayMode::Masked)
        .prompt()
        .map_err(Error::from)
}

/// Prompt for a project key with autocomplete from the server's projects
pub fn prompt_project(projects: Vec<String>) -> Result<String, Error> {
    let prompt = Text::new("Project:").with_validator(non_empty);
    if projects.is_empty() {
        return prompt.prompt().map_err(Error::from);
    }
    prompt
        .with_autocomplete(ProjectKeys(projects))
        .prompt()
        .map_err(Error::from)
}

/// Prompt for one of the configured issue types
pub fn prompt_issue_type(issue_types: Vec<String>) -> Result<String, Error> {
    Select::new("Issue type:", issue_types)
        .prompt()
        .map_err(Error::from)
}

/// Prompt for a longer text using an editor
pub fn prompt_description(prompt: &str) -> Result<String, Error> {
    Editor::new(prompt)
        .with_formatter(&|x| x.to_string())
        .prompt()
        .map_err(Error::from)
}

fn non_empty(input: &str) -> Result<Validation, CustomUserError> {
    if input.trim().is_empty() {
        Ok(Validation::Invalid("A value is required".into()))
    } else {
        Ok(Validation::Valid)
    }
}

/// Project keys offered while typing `--project`
#[derive(Debug, Default, Clone)]
pub struct ProjectKeys(Vec<String>);

impl ProjectKeys {
    fn matching<'a>(&'a self, input: &'a str) -> impl Iterator<Item = &'a String> + 'a {
        let input = input.to_uppercase();
        self.0.iter().filter(move |key| key.contains(&input))
    }
}

impl Autocomplete for ProjectKeys {
    fn get_suggestions(&mut self, input: &str) -> Result<Vec<String>, CustomUserError> {
        Ok(self.matching(input).cloned().collect())
    }

    fn get_completion(
        &mut self,
        input: &str,
        highlighted_suggestion: Option<String>,
    ) -> Result<Replacement, CustomUserError> {
        if highlighted_suggestion.is_some() {
            return Ok(highlighted_suggestion);
        }
        Ok(self.matching(input).next().cloned())
    }
}
