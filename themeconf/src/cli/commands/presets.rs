//! `presets` command
//!
//! Lists the built-in theme presets selectable through `themeOptions`.

use serde_json::json;

use crate::cli::args::{OutputFormat, PresetsArgs};
use crate::error::ThemeConfError;
use themeconf_core::config::BUILTIN_PRESETS;

/// Print the built-in presets.
///
/// # Errors
///
/// Returns a JSON error if the listing cannot be serialized.
pub fn run(args: &PresetsArgs) -> Result<(), ThemeConfError> {
    match args.format {
        OutputFormat::Human => {
            for preset in BUILTIN_PRESETS {
                let scheme = if preset.dark { "dark" } else { "light" };
                println!("{:<12} {scheme}", preset.name);
            }
        }
        OutputFormat::Json => {
            let listing: Vec<_> = BUILTIN_PRESETS
                .iter()
                .map(|p| json!({ "name": p.name, "dark": p.dark }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&listing)?);
        }
    }
    Ok(())
}
