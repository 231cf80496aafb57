//! Configuration schema and built-in presets
//!
//! Types shared by the loader and anything that consumes a resolved
//! theme configuration.

pub mod presets;
pub mod schema;

pub use presets::{BUILTIN_PRESETS, BuiltinPreset, find_preset, list_preset_names, suggest_preset};
pub use schema::*;
