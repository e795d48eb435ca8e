use std::borrow::Cow;
use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::error::{ConfigError, ConfigIssue};

/// Expand `{{ env.VAR }}` placeholders in raw config text
///
/// `{{ env.VAR | default("fallback") }}` substitutes the fallback when the
/// variable is unset. Comment lines are passed through untouched so that a
/// commented-out secret never has to be present in the environment.
pub(crate) fn expand_env(input: &str) -> Result<String, ConfigError> {
    let mut lines = Vec::new();

    for line in input.split_inclusive('\n') {
        if line.trim_start().starts_with('#') {
            lines.push(Cow::Borrowed(line));
        } else {
            lines.push(expand_line(line)?);
        }
    }

    Ok(lines.concat())
}

fn placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // group 1: scoped key, group 2: optional default
    RE.get_or_init(|| {
        Regex::new(r#"\{\{\s*([a-zA-Z0-9_.]+)\s*(?:\|\s*default\("([^"]*)"\))?\s*\}\}"#).expect("must be valid regex")
    })
}

fn expand_line(line: &str) -> Result<Cow<'_, str>, ConfigError> {
    let mut failure: Option<String> = None;

    let expanded = placeholder().replace_all(line, |caps: &Captures<'_>| {
        let default = caps.get(2).map(|m| m.as_str());
        match resolve(&caps[1], default) {
            Ok(value) => value,
            Err(e) => {
                failure.get_or_insert(e);
                String::new()
            }
        }
    });

    match failure {
        Some(message) => Err(ConfigError::Expand(message)),
        None => Ok(expanded),
    }
}

fn resolve(key: &str, default: Option<&str>) -> Result<String, String> {
    let Some(var_name) = key.strip_prefix("env.").filter(|name| !name.contains('.')) else {
        return Err(format!("only variables scoped with 'env.' are supported: `{key}`"));
    };

    match (std::env::var(var_name), default) {
        (Ok(value), _) => Ok(value),
        (Err(_), Some(default)) => Ok(default.to_owned()),
        (Err(_), None) => Err(format!("environment variable not found: `{var_name}`")),
    }
}

/// Read and parse an optional environment variable
///
/// Unset or blank variables yield `None`. A value that fails to parse is
/// recorded as an issue under the variable's name.
pub(crate) fn parse_var<T>(
    name: &str,
    issues: &mut Vec<ConfigIssue>,
    parse: impl FnOnce(&str) -> Result<T, String>,
) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    let raw = raw.trim();

    if raw.is_empty() {
        return None;
    }

    match parse(raw) {
        Ok(value) => Some(value),
        Err(message) => {
            issues.push(ConfigIssue::new(name, message));
            None
        }
    }
}

/// Parse a boolean flag the way shell users write them
pub(crate) fn parse_flag(raw: &str) -> Result<bool, String> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(format!("expected a boolean, got `{other}`")),
    }
}
