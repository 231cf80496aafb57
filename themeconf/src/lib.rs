//! `themeconf` - theme configuration loader for the CSS build
//!
//! Loads the declarative theme configuration (template globs, fonts, theme
//! presets or palettes, styling flags, plugins), validates it, and hands the
//! frozen result to the build.

pub mod cli;
pub mod config;
pub mod error;
pub mod observability;
pub mod scan;
