//! Template discovery for the utility-class scan
//!
//! Expands the `content` globs of a resolved configuration into the list of
//! template files the CSS build inspects for class-name usage.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use glob::MatchOptions;
use serde::Serialize;

use themeconf_core::config::schema::ThemeConfig;
use themeconf_core::error::ConfigError;

/// A template file matched by a `content` pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanMatch {
    /// Matched file
    pub path: PathBuf,
    /// Index of the first `content` pattern that matched it
    pub pattern: usize,
}

/// Outcome of expanding every `content` pattern.
#[derive(Debug, Default, Serialize)]
pub struct ScanResult {
    /// Matched files, in pattern order, each listed once
    pub matches: Vec<ScanMatch>,
    /// Patterns that matched no file
    pub unmatched_patterns: Vec<String>,
}

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// Expands `config.content` relative to `root`.
///
/// Absolute patterns are used as written. Directories are skipped; only
/// files are reported. Unreadable entries are logged and skipped.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidValue`] if a pattern cannot be compiled.
pub fn scan_content(config: &ThemeConfig, root: &Path) -> Result<ScanResult, ConfigError> {
    let mut result = ScanResult::default();
    let mut seen = HashSet::new();

    for (idx, pattern) in config.content.iter().enumerate() {
        let full = if Path::new(pattern).is_absolute() {
            pattern.clone()
        } else {
            let base = glob::Pattern::escape(&root.to_string_lossy());
            format!("{}/{pattern}", base.trim_end_matches('/'))
        };

        let entries =
            glob::glob_with(&full, MATCH_OPTIONS).map_err(|e| ConfigError::InvalidValue {
                field: format!("content[{idx}]"),
                value: pattern.clone(),
                expected: format!("a valid glob pattern ({e})"),
            })?;

        let mut matched_any = false;
        for entry in entries {
            match entry {
                Ok(path) if path.is_file() => {
                    matched_any = true;
                    if seen.insert(path.clone()) {
                        result.matches.push(ScanMatch { path, pattern: idx });
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(pattern = %pattern, error = %e, "skipping unreadable entry");
                }
            }
        }

        if !matched_any {
            tracing::debug!(pattern = %pattern, "content pattern matched no files");
            result.unmatched_patterns.push(pattern.clone());
        }
    }

    Ok(result)
}
