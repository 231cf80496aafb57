//! `themeconf`: theme configuration loader for the CSS build

use clap::Parser;

use themeconf::cli::args::Cli;
use themeconf::cli::commands;
use themeconf::error::ExitCode;
use themeconf::observability::{LoggingOptions, init_logging};

fn main() {
    let cli = Cli::parse();

    if !cli.quiet {
        init_logging(LoggingOptions::from(&cli));
    }

    match commands::dispatch(cli) {
        Ok(()) => std::process::exit(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("error: {e}");
            for issue in issue_lines(&e) {
                eprintln!("  {issue}");
            }
            std::process::exit(e.exit_code());
        }
    }
}

/// Per-field detail for schema violations, so the offending field is visible
/// even with `--quiet`.
fn issue_lines(err: &themeconf::error::ThemeConfError) -> Vec<String> {
    match err {
        themeconf::error::ThemeConfError::Config(config_err) => {
            config_err.issues().iter().map(ToString::to_string).collect()
        }
        _ => Vec::new(),
    }
}
