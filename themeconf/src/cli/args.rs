//! CLI argument definitions
//!
//! All Clap derive structs for `themeconf` command-line parsing.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use crate::observability::LogFormat;
use themeconf_core::config::schema::DocumentFormat;

// ============================================================================
// Root CLI
// ============================================================================

/// Load and validate theme configuration for the CSS build.
#[derive(Parser, Debug)]
#[command(name = "themeconf", author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-error output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output control.
    #[arg(long, default_value = "auto", global = true, env = "THEMECONF_COLOR")]
    pub color: ColorChoice,

    /// Log output format.
    #[arg(long, default_value = "human", global = true)]
    pub log_format: LogFormat,
}

// ============================================================================
// Top-Level Commands
// ============================================================================

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate configuration files.
    Validate(ValidateArgs),

    /// Print the resolved configuration.
    Show(ShowArgs),

    /// List the template files matched by `content`.
    Scan(ScanArgs),

    /// List the built-in theme presets.
    Presets(PresetsArgs),

    /// Generate shell completion scripts.
    Completions(CompletionsArgs),

    /// Display version information.
    Version(VersionArgs),
}

// ============================================================================
// Shared Arguments
// ============================================================================

/// Plugin registry extensions shared by every loading command.
#[derive(Args, Debug, Clone, Default)]
pub struct PluginArgs {
    /// Additional plugin identifier available to the build (repeatable).
    #[arg(long = "plugin", value_name = "ID")]
    pub extra: Vec<String>,
}

// ============================================================================
// Commands
// ============================================================================

/// Arguments for `validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Configuration files to validate.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,

    /// Enable strict validation (warnings become errors).
    #[arg(long)]
    pub strict: bool,

    /// Plugin registry extensions.
    #[command(flatten)]
    pub plugins: PluginArgs,
}

/// Arguments for `show`.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Path to the configuration file.
    #[arg(env = "THEMECONF_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output document format.
    #[arg(short, long, default_value = "yaml")]
    pub format: DocumentFormat,

    /// Plugin registry extensions.
    #[command(flatten)]
    pub plugins: PluginArgs,
}

/// Arguments for `scan`.
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Path to the configuration file.
    #[arg(env = "THEMECONF_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory the `content` patterns are relative to.
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,

    /// Plugin registry extensions.
    #[command(flatten)]
    pub plugins: PluginArgs,
}

/// Arguments for `presets`.
#[derive(Args, Debug)]
pub struct PresetsArgs {
    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

/// Arguments for shell completion generation.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell for completion script.
    pub shell: Shell,
}

/// Arguments for version display.
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

// ============================================================================
// CLI-Local Enums
// ============================================================================

/// Color output choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal support.
    #[default]
    Auto,
    /// Always use color.
    Always,
    /// Never use color.
    Never,
}

/// Output format for structured output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output.
    #[default]
    Human,
    /// JSON output.
    Json,
}

/// Shell type for completion generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell.
    Bash,
    /// Zsh shell.
    Zsh,
    /// Fish shell.
    Fish,
    /// `PowerShell`.
    #[value(name = "powershell")]
    PowerShell,
    /// Elvish shell.
    Elvish,
}

// ============================================================================
// Tests
// ============================================================================
