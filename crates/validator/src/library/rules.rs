//! Content rules applied to a loaded library entry
//!
//! Rules run in the order returned by [`default_rules`]. The first failing
//! rule ends the content check and its error becomes the diagnostic.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use crate::error::{LibraryError, Result};

static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9_]*$").expect("valid name pattern"));

static URL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\w+://)(.+@)*([\w\d\.]+)(:[\d]+){0,1}/*(.*)").expect("valid url pattern")
});

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^.+@.+[.]{1}.+$").expect("valid email pattern"));

/// A single check over the parsed library entry
pub trait ContentRule: Send + Sync {
    /// Label narrated before the rule runs
    fn rule_name(&self) -> &str;

    /// Description of what this rule validates
    fn description(&self) -> &str;

    /// `context` names the file being checked and appears in diagnostics
    fn check(&self, record: &Map<String, Value>, context: &str) -> Result<()>;
}

/// Rules in the order they must run
pub fn default_rules() -> Vec<Box<dyn ContentRule>> {
    vec![
        Box::new(NameRule),
        Box::new(GithubRule),
        Box::new(MaintainersRule),
    ]
}

pub fn is_valid_name(name: &str) -> bool {
    NAME_PATTERN.is_match(name)
}

pub fn is_valid_url(url: &str) -> bool {
    URL_PATTERN.is_match(url)
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

fn required<'a>(record: &'a Map<String, Value>, field: &str, context: &str) -> Result<&'a Value> {
    record
        .get(field)
        .ok_or_else(|| LibraryError::missing(field, context))
}

fn required_str<'a>(record: &'a Map<String, Value>, field: &str, context: &str) -> Result<&'a str> {
    required(record, field, context)?
        .as_str()
        .ok_or_else(|| LibraryError::field_type(field, context))
}

pub struct NameRule;

impl ContentRule for NameRule {
    fn rule_name(&self) -> &str {
        "Name"
    }

    fn description(&self) -> &str {
        "name is present and uses only lowercase letters, digits and underscores"
    }

    fn check(&self, record: &Map<String, Value>, context: &str) -> Result<()> {
        let name = required_str(record, "name", context)?;
        if !is_valid_name(name) {
            return Err(LibraryError::NameFormat(name.to_string()));
        }
        Ok(())
    }
}

pub struct GithubRule;

impl ContentRule for GithubRule {
    fn rule_name(&self) -> &str {
        "Github"
    }

    fn description(&self) -> &str {
        "github is present and is a repository URL"
    }

    fn check(&self, record: &Map<String, Value>, context: &str) -> Result<()> {
        let github = required(record, "github", context)?;
        let url = github
            .as_str()
            .ok_or_else(|| LibraryError::GithubType(github.to_string()))?;
        if !is_valid_url(url) {
            return Err(LibraryError::GithubUrl(url.to_string()));
        }
        Ok(())
    }
}

pub struct MaintainersRule;

impl MaintainersRule {
    fn check_maintainer(maintainer: &Value, context: &str) -> Result<()> {
        let fields = maintainer
            .as_object()
            .ok_or_else(|| LibraryError::MaintainerShape {
                maintainer: maintainer.to_string(),
                context: context.to_string(),
            })?;

        let owner = format!("{} for {}", maintainer, context);
        for field in ["email", "github", "name"] {
            required(fields, field, &owner)?;
        }

        let email = required_str(fields, "email", &owner)?;
        let handle = required_str(fields, "github", &owner)?;
        required_str(fields, "name", &owner)?;

        if !handle.starts_with('@') {
            return Err(LibraryError::MaintainerGithubPrefix {
                handle: handle.to_string(),
                context: context.to_string(),
            });
        }

        if !is_valid_email(email) {
            return Err(LibraryError::MaintainerEmailFormat(email.to_string()));
        }

        Ok(())
    }
}

impl ContentRule for MaintainersRule {
    fn rule_name(&self) -> &str {
        "Maintainers"
    }

    fn description(&self) -> &str {
        "maintainers is a non-empty list of name, email and @handle records"
    }

    fn check(&self, record: &Map<String, Value>, context: &str) -> Result<()> {
        let maintainers = required(record, "maintainers", context)?
            .as_array()
            .ok_or_else(|| LibraryError::MaintainersType(context.to_string()))?;

        if maintainers.is_empty() {
            return Err(LibraryError::EmptyMaintainers(context.to_string()));
        }

        maintainers
            .iter()
            .try_for_each(|maintainer| Self::check_maintainer(maintainer, context))
    }
}
