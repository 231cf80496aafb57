//! `validate` command
//!
//! Loads every given file and reports the outcome per file, in human or
//! JSON form. Fails if any file failed (or, with `--strict`, warned).

use std::path::Path;

use serde::Serialize;

use super::loader_for;
use crate::cli::args::{OutputFormat, ValidateArgs};
use crate::config::{ConfigLoader, LoadWarning};
use crate::error::{ConfigError, ThemeConfError};
use crate::observability::log_load_warnings;

/// Issue entry in the report.
#[derive(Debug, Serialize)]
struct ReportIssue {
    location: String,
    message: String,
}

impl From<&LoadWarning> for ReportIssue {
    fn from(warning: &LoadWarning) -> Self {
        Self {
            location: warning.location.clone().unwrap_or_default(),
            message: warning.message.clone(),
        }
    }
}

/// Outcome for one file.
#[derive(Debug, Serialize)]
struct FileReport {
    path: String,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_kind: Option<&'static str>,
    errors: Vec<ReportIssue>,
    warnings: Vec<ReportIssue>,
}

#[derive(Debug, Serialize)]
struct Summary {
    total: usize,
    valid: usize,
    invalid: usize,
    strict: bool,
}

#[derive(Debug, Serialize)]
struct Report {
    files: Vec<FileReport>,
    summary: Summary,
}

/// Validate configuration files.
///
/// # Errors
///
/// Returns [`ConfigError::ValidationFailed`] if any file failed, or a JSON
/// error if the report cannot be serialized.
pub fn run(args: &ValidateArgs) -> Result<(), ThemeConfError> {
    let loader = loader_for(&args.plugins);

    let files: Vec<FileReport> = args
        .files
        .iter()
        .map(|path| validate_file(&loader, path, args.strict))
        .collect();

    let invalid = files.iter().filter(|f| !f.valid).count();
    let report = Report {
        summary: Summary {
            total: files.len(),
            valid: files.len() - invalid,
            invalid,
            strict: args.strict,
        },
        files,
    };

    match args.format {
        OutputFormat::Human => print_human(&report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    if invalid > 0 {
        return Err(ConfigError::ValidationFailed { count: invalid }.into());
    }
    Ok(())
}

fn validate_file(loader: &ConfigLoader, path: &Path, strict: bool) -> FileReport {
    let shown = path.display().to_string();
    tracing::info!(file = %shown, "validating configuration");

    match loader.load(path) {
        Ok(result) => {
            log_load_warnings(&shown, &result.warnings);
            let warnings: Vec<ReportIssue> = result.warnings.iter().map(ReportIssue::from).collect();
            let valid = !(strict && !warnings.is_empty());
            if valid {
                tracing::info!(file = %shown, "configuration valid");
            }
            FileReport {
                path: shown,
                valid,
                error_kind: None,
                errors: Vec::new(),
                warnings,
            }
        }
        Err(err) => {
            tracing::debug!(file = %shown, error = %err, "configuration invalid");
            FileReport {
                path: shown,
                valid: false,
                error_kind: Some(err.kind()),
                errors: issues_of(&err),
                warnings: Vec::new(),
            }
        }
    }
}

/// Flattens a load error into report entries, one per offending field.
fn issues_of(err: &ConfigError) -> Vec<ReportIssue> {
    match err {
        ConfigError::SchemaViolation { errors, .. } => errors
            .iter()
            .map(|issue| ReportIssue {
                location: issue.path.clone(),
                message: issue.message.clone(),
            })
            .collect(),
        ConfigError::UnresolvedPlugin { index, .. } => vec![ReportIssue {
            location: format!("plugins[{index}]"),
            message: err.to_string(),
        }],
        ConfigError::MalformedDocument { line, .. } => vec![ReportIssue {
            location: line.map_or_else(String::new, |l| format!("line {l}")),
            message: err.to_string(),
        }],
        other => vec![ReportIssue {
            location: String::new(),
            message: other.to_string(),
        }],
    }
}

fn print_human(report: &Report) {
    for file in &report.files {
        let status = if file.valid { "ok" } else { "FAILED" };
        match file.error_kind {
            Some(kind) => println!("{}: {status} ({kind})", file.path),
            None => println!("{}: {status}", file.path),
        }
        for issue in &file.errors {
            println!("  error: {} at {}", issue.message, location_or_root(&issue.location));
        }
        for issue in &file.warnings {
            println!(
                "  warning: {} at {}",
                issue.message,
                location_or_root(&issue.location)
            );
        }
    }
    println!(
        "{} file(s) checked, {} valid, {} invalid",
        report.summary.total, report.summary.valid, report.summary.invalid
    );
}

fn location_or_root(location: &str) -> &str {
    if location.is_empty() { "<document>" } else { location }
}
