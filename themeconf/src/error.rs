//! Error types for `themeconf`
//!
//! Aggregates the core configuration errors with the I/O and serialization
//! failures the CLI can hit, and maps each to a process exit code.

use thiserror::Error;

pub use themeconf_core::error::{ConfigError, Severity, ValidationIssue};

// ============================================================================
// Exit Codes
// ============================================================================

/// Exit codes for `themeconf` CLI operations.
///
/// These codes follow Unix conventions.
pub struct ExitCode;

impl ExitCode {
    /// Successful execution
    pub const SUCCESS: i32 = 0;

    /// General error
    pub const ERROR: i32 = 1;

    /// Configuration error (malformed document, schema violation, unresolved plugin)
    pub const CONFIG_ERROR: i32 = 2;

    /// I/O error (file not found, permission denied)
    pub const IO_ERROR: i32 = 3;

    /// Usage error (invalid arguments, missing required options)
    pub const USAGE_ERROR: i32 = 64;
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error type for `themeconf` operations.
#[derive(Debug, Error)]
pub enum ThemeConfError {
    /// Configuration loading or validation error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Command-line usage error
    #[error("usage error: {0}")]
    Usage(String),
}

impl ThemeConfError {
    /// Returns the appropriate exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(ConfigError::MissingFile { .. } | ConfigError::Unreadable { .. })
            | Self::Io(_) => ExitCode::IO_ERROR,
            Self::Config(_) | Self::Yaml(_) => ExitCode::CONFIG_ERROR,
            Self::Json(_) => ExitCode::ERROR,
            Self::Usage(_) => ExitCode::USAGE_ERROR,
        }
    }
}

// ============================================================================
// Result Type Alias
// ============================================================================

/// Result type alias for `themeconf` operations.
pub type Result<T> = std::result::Result<T, ThemeConfError>;

// ============================================================================
// Tests
// ============================================================================
