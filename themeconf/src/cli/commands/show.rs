//! `show` command
//!
//! Prints the resolved configuration as YAML or JSON on stdout.

use super::{load_config, require_config};
use crate::cli::args::ShowArgs;
use crate::error::ThemeConfError;
use themeconf_core::config::schema::DocumentFormat;

/// Print the resolved configuration.
///
/// # Errors
///
/// Returns an error if no configuration is given, if loading fails, or if
/// the configuration cannot be serialized.
pub fn run(args: &ShowArgs) -> Result<(), ThemeConfError> {
    let path = require_config(args.config.as_ref())?;
    let result = load_config(path, &args.plugins)?;

    let rendered = match args.format {
        DocumentFormat::Yaml => serde_yaml::to_string(&*result.config)?,
        DocumentFormat::Json => serde_json::to_string_pretty(&*result.config)?,
    };
    print!("{rendered}");
    if !rendered.ends_with('\n') {
        println!();
    }
    Ok(())
}
