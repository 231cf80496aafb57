//! Logging initialization for `themeconf`.
//!
//! Provides structured logging via `tracing` with human-readable and
//! JSON output formats, configurable verbosity, and environment-based
//! override via `THEMECONF_LOG_LEVEL`. Logs always go to stderr so that
//! `show` and `scan` output on stdout stays machine-readable.

use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

use crate::cli::args::{Cli, ColorChoice};
use crate::config::LoadWarning;

/// Environment variable overriding the verbosity flags.
pub const LOG_LEVEL_ENV: &str = "THEMECONF_LOG_LEVEL";

/// Log output format.
///
/// Controls how log messages are rendered to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with optional ANSI colors.
    #[default]
    Human,
    /// Newline-delimited JSON for machine consumption.
    Json,
}

/// Logging settings derived from the global CLI flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoggingOptions {
    /// Output format.
    pub format: LogFormat,
    /// Number of `-v` flags.
    pub verbosity: u8,
    /// Color output control.
    pub color: ColorChoice,
}

impl From<&Cli> for LoggingOptions {
    fn from(cli: &Cli) -> Self {
        Self {
            format: cli.log_format,
            verbosity: cli.verbose,
            color: cli.color,
        }
    }
}

/// Maps a verbosity level to a tracing directive string.
///
/// - 0 → `"warn"`
/// - 1 → `"info"`
/// - 2 → `"debug"`
/// - 3+ → `"trace"` (saturates)
#[must_use]
pub const fn verbosity_to_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initializes the global tracing subscriber.
///
/// If `THEMECONF_LOG_LEVEL` is set it takes precedence over the verbosity
/// flags.
///
/// Uses `try_init()` so calling this more than once (e.g. in tests) is safe.
pub fn init_logging(options: LoggingOptions) {
    let filter = EnvFilter::try_from_env(LOG_LEVEL_ENV)
        .unwrap_or_else(|_| EnvFilter::new(verbosity_to_directive(options.verbosity)));

    let show_target = options.verbosity >= 2;

    match options.format {
        LogFormat::Human => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(use_ansi(options.color))
                .with_target(show_target)
                .with_writer(std::io::stderr)
                .try_init();
        }
        LogFormat::Json => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .json()
                .with_target(show_target)
                .with_writer(std::io::stderr)
                .try_init();
        }
    }
}

fn use_ansi(color: ColorChoice) -> bool {
    match color {
        ColorChoice::Auto => {
            std::io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none()
        }
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    }
}

/// Emits each load warning as a `warn` event.
pub fn log_load_warnings(file: &str, warnings: &[LoadWarning]) {
    for warning in warnings {
        tracing::warn!(
            file,
            location = warning.location.as_deref().unwrap_or("<unknown>"),
            "{}",
            warning.message
        );
    }
}
