//! Configuration module
//!
//! Handles loading, validation and plugin resolution of theme
//! configuration documents.

pub mod loader;
pub mod plugins;
pub mod validation;

pub use loader::{ConfigLimits, ConfigLoader, LoadResult, LoadWarning, LoaderOptions};
pub use plugins::{PluginRegistry, ResolvedPlugin};
pub use themeconf_core::config::*;
pub use validation::{ValidationResult, Validator};
