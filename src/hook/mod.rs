//! API route validator hook.
//!
//! Scans a route file for a handful of literal substrings and reports advisory
//! findings. It has no notion of syntax: a substring inside a comment counts
//! the same as one in code. Callers must never fail because of a finding.

mod rules;

pub use rules::{default_rules, Condition, Rule};

use anyhow::{Context, Result};
use serde::Serialize;
use std::{
    fmt::Write as _,
    fs,
    path::{Path, PathBuf},
};
use tracing::debug;

/// Environment variable the hook runner uses to pass the edited file.
pub const TOOL_INPUT_ENV: &str = "TOOL_INPUT";

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Info,
}

impl Severity {
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Warning => "⚠️",
            Self::Info => "ℹ️",
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub check: &'static str,
    pub severity: Severity,
    pub message: &'static str,
}

impl Finding {
    /// Line as printed under the analysis header.
    #[must_use]
    pub fn line(&self) -> String {
        format!("{}  {}", self.severity.icon(), self.message)
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub file: String,
    pub findings: Vec<Finding>,
}

impl Report {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    /// Human-readable output, one entry per line.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();

        if self.is_clean() {
            let _ = writeln!(out, "✅ API route looks good: {}", self.file);
        } else {
            let _ = writeln!(out);
            let _ = writeln!(out, "🔍 API route analysis for {}:", self.file);
            for finding in &self.findings {
                let _ = writeln!(out, "  {}", finding.line());
            }
            let _ = writeln!(out);
        }

        out
    }
}

/// Output format of the `validate` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for Format {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("invalid format: {value}")),
        }
    }
}

/// Run `rules` against `content`, keeping rule order.
#[must_use]
pub fn analyze(content: &str, rules: &[Rule]) -> Vec<Finding> {
    rules
        .iter()
        .filter(|rule| rule.when.matches(content))
        .map(|rule| Finding {
            check: rule.id,
            severity: rule.severity,
            message: rule.message,
        })
        .collect()
}

fn display_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}

/// Read `path` and analyze it with the default rules.
///
/// Invalid UTF-8 sequences are replaced with U+FFFD, so the substring checks
/// still run on files in other encodings.
///
/// # Errors
/// Returns an error if the file cannot be read.
pub fn validate_file(path: &Path) -> Result<Report> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let content = String::from_utf8_lossy(&bytes);

    let findings = analyze(&content, &default_rules());

    debug!("{} finding(s) for {}", findings.len(), path.display());

    Ok(Report {
        file: display_name(path),
        findings,
    })
}

/// Pick the file to validate: the hook environment variable wins over the
/// positional argument, and empty values are ignored.
#[must_use]
pub fn resolve_target(env_value: Option<String>, arg: Option<String>) -> Option<PathBuf> {
    env_value
        .filter(|value| !value.is_empty())
        .or_else(|| arg.filter(|value| !value.is_empty()))
        .map(PathBuf::from)
}
