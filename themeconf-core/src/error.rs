//! Core error types for `themeconf`
//!
//! Configuration and validation error types shared across the workspace.

use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// Configuration Errors
// ============================================================================

/// Configuration loading and validation errors.
///
/// Every variant is fatal to the build that requested the configuration.
/// There is no partial-success mode.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The source could not be parsed as structured data (or was empty).
    #[error("malformed document {path}{}: {message}", line.map_or_else(String::new, |l| format!(" (line {l})")))]
    MalformedDocument {
        /// Path to the configuration file (`<inline>` for string sources)
        path: PathBuf,
        /// Line number where the error occurred (if available)
        line: Option<usize>,
        /// Error message from the parser
        message: String,
    },

    /// The document parsed but does not match the configuration schema.
    #[error("schema violation in {path}: {}", summarize(errors))]
    SchemaViolation {
        /// Path to the configuration file
        path: String,
        /// Every issue found, each naming the offending field
        errors: Vec<ValidationIssue>,
    },

    /// A plugin identifier has no implementation available at build time.
    #[error("unresolved plugin '{plugin}' at plugins[{index}]{}", suggestion.as_ref().map_or_else(String::new, |s| format!(" (did you mean '{s}'?)")))]
    UnresolvedPlugin {
        /// The identifier as written in the document
        plugin: String,
        /// Position in the `plugins` sequence
        index: usize,
        /// Closest known identifier, if any is close enough
        suggestion: Option<String>,
    },

    /// Configuration file not found
    #[error("file not found: {path}")]
    MissingFile {
        /// Path to the missing file
        path: PathBuf,
    },

    /// Field has an invalid value
    #[error("invalid value for '{field}': got '{value}', expected {expected}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The actual value provided
        value: String,
        /// Description of what was expected
        expected: String,
    },

    /// Configuration file exists but could not be read
    #[error("cannot read {path}: {source}")]
    Unreadable {
        /// Path to the configuration file
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// One or more configuration files failed validation.
    #[error("{count} file(s) failed validation")]
    ValidationFailed {
        /// Number of files that failed validation.
        count: usize,
    },
}

impl ConfigError {
    /// Returns a stable `snake_case` identifier for the error variant.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::MalformedDocument { .. } => "malformed_document",
            Self::SchemaViolation { .. } => "schema_violation",
            Self::UnresolvedPlugin { .. } => "unresolved_plugin",
            Self::MissingFile { .. } => "missing_file",
            Self::InvalidValue { .. } => "invalid_value",
            Self::Unreadable { .. } => "unreadable",
            Self::ValidationFailed { .. } => "validation_failed",
        }
    }

    /// Returns the issues attached to a schema violation, or an empty slice.
    #[must_use]
    pub fn issues(&self) -> &[ValidationIssue] {
        match self {
            Self::SchemaViolation { errors, .. } => errors,
            _ => &[],
        }
    }
}

fn summarize(errors: &[ValidationIssue]) -> String {
    match errors {
        [] => "no details".to_string(),
        [only] => format!("{} at {}", only.message, only.path),
        [first, rest @ ..] => format!(
            "{} at {} (and {} more)",
            first.message,
            first.path,
            rest.len()
        ),
    }
}

// ============================================================================
// Validation Types
// ============================================================================

/// A single validation issue found during configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Path to the problematic field (e.g., "themeOptions[0].mytheme.primary")
    pub path: String,
    /// Description of the validation issue
    pub message: String,
    /// Severity level of the issue
    pub severity: Severity,
}

impl ValidationIssue {
    /// Creates an error-severity issue.
    #[must_use]
    pub fn error(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            severity: Severity::Error,
        }
    }

    /// Creates a warning-severity issue.
    #[must_use]
    pub fn warning(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            severity: Severity::Warning,
        }
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {} at {}", prefix, self.message, self.path)
    }
}

/// Severity level for validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Error - validation failure that prevents configuration from being used
    Error,
    /// Warning - potential issue that does not prevent configuration loading
    Warning,
}
