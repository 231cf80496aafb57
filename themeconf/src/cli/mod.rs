//! Command-line interface
//!
//! Argument parsing and command handlers for the `themeconf` binary.

pub mod args;
pub mod commands;
