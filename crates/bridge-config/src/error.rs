use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// A single configuration problem, located by its path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    /// Dotted config path or environment variable name
    pub path: String,
    /// What is wrong with the value
    pub message: String,
}

impl ConfigIssue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Errors raised while loading or validating configuration
///
/// These are fatal at startup; the process must not continue with a
/// configuration that failed to load.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An `{{ env.VAR }}` placeholder could not be expanded
    #[error("config variable expansion failed: {0}")]
    Expand(String),

    /// The file is not valid TOML for the config schema
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// One or more values failed validation
    #[error("invalid configuration: {}", join_issues(.issues))]
    Invalid { issues: Vec<ConfigIssue> },
}

impl ConfigError {
    /// Validation issues, empty for load failures
    pub fn issues(&self) -> &[ConfigIssue] {
        match self {
            Self::Invalid { issues } => issues,
            _ => &[],
        }
    }
}

fn join_issues(issues: &[ConfigIssue]) -> String {
    issues.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}
