//! CLI command dispatch and handlers
//!
//! Routes parsed CLI arguments to the appropriate command handler.

pub mod completions;
pub mod presets;
pub mod scan;
pub mod show;
pub mod validate;
pub mod version;

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands, PluginArgs};
use crate::config::{ConfigLoader, LoadResult, LoaderOptions};
use crate::error::ThemeConfError;
use crate::observability::log_load_warnings;

/// Dispatch a parsed CLI invocation to the appropriate command handler.
///
/// # Errors
///
/// Returns an error if the dispatched command handler fails.
pub fn dispatch(cli: Cli) -> Result<(), ThemeConfError> {
    match cli.command {
        Commands::Validate(args) => validate::run(&args),
        Commands::Show(args) => show::run(&args),
        Commands::Scan(args) => scan::run(&args),
        Commands::Presets(args) => presets::run(&args),
        Commands::Completions(args) => {
            completions::run(&args);
            Ok(())
        }
        Commands::Version(args) => {
            version::run(&args);
            Ok(())
        }
    }
}

/// Builds a loader whose plugin registry includes `--plugin` extensions.
pub(crate) fn loader_for(plugins: &PluginArgs) -> ConfigLoader {
    let mut options = LoaderOptions::default();
    for id in &plugins.extra {
        options.plugins.register_list(id);
    }
    ConfigLoader::new(options)
}

/// Loads one configuration file, logging its warnings.
pub(crate) fn load_config(path: &Path, plugins: &PluginArgs) -> Result<LoadResult, ThemeConfError> {
    if !path.exists() {
        return Err(ThemeConfError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("file not found: {}", path.display()),
        )));
    }
    tracing::info!(file = %path.display(), "loading configuration");

    let result = loader_for(plugins).load(path)?;
    log_load_warnings(&path.display().to_string(), &result.warnings);
    Ok(result)
}

/// Resolves the optional config argument (positional or `THEMECONF_CONFIG`).
pub(crate) fn require_config(config: Option<&PathBuf>) -> Result<&Path, ThemeConfError> {
    config.map(PathBuf::as_path).ok_or_else(|| {
        ThemeConfError::Usage(
            "no configuration file given (pass a path or set THEMECONF_CONFIG)".to_string(),
        )
    })
}
