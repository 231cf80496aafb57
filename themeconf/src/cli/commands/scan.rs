//! `scan` command
//!
//! Lists the template files the `content` patterns match.

use super::{load_config, require_config};
use crate::cli::args::{OutputFormat, ScanArgs};
use crate::error::ThemeConfError;
use crate::scan::scan_content;

/// List matched template files.
///
/// # Errors
///
/// Returns an error if no configuration is given, if loading fails, or if
/// the root directory does not exist.
pub fn run(args: &ScanArgs) -> Result<(), ThemeConfError> {
    let path = require_config(args.config.as_ref())?;
    if !args.root.is_dir() {
        return Err(ThemeConfError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("scan root is not a directory: {}", args.root.display()),
        )));
    }

    let loaded = load_config(path, &args.plugins)?;
    let result = scan_content(&loaded.config, &args.root)?;
    tracing::info!(
        matched = result.matches.len(),
        unmatched_patterns = result.unmatched_patterns.len(),
        "content scan complete"
    );

    match args.format {
        OutputFormat::Human => {
            for m in &result.matches {
                println!("{}", m.path.display());
            }
            for pattern in &result.unmatched_patterns {
                tracing::warn!(pattern = %pattern, "content pattern matched no files");
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
    }
    Ok(())
}
