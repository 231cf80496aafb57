//! Configuration schema types
//!
//! This module defines the theme configuration document consumed by the
//! CSS build. These types are deserialized from YAML (or JSON) documents.
//!
//! Shape checks that serde can express live here (required fields, types,
//! the `themeOptions` variant). Semantic checks (required color roles, hex
//! values, glob syntax, plugin resolution) live in the loader's validator.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;

// ============================================================================
// Color Roles
// ============================================================================

/// Color roles every inline palette must define.
pub const REQUIRED_COLOR_ROLES: &[&str] = &[
    "primary",
    "secondary",
    "accent",
    "neutral",
    "base-100",
    "info",
    "success",
    "warning",
    "error",
];

/// Color roles a palette may define in addition to the required ones.
pub const OPTIONAL_COLOR_ROLES: &[&str] = &[
    "primary-content",
    "secondary-content",
    "accent-content",
    "neutral-content",
    "base-200",
    "base-300",
    "base-content",
    "info-content",
    "success-content",
    "warning-content",
    "error-content",
    "primary-focus",
    "secondary-focus",
    "accent-focus",
    "neutral-focus",
];

/// Returns `true` if `role` is a CSS custom property (`--rounded-box` etc.).
///
/// CSS variables carry arbitrary values rather than colors.
#[must_use]
pub fn is_css_variable(role: &str) -> bool {
    role.starts_with("--")
}

/// Returns `true` if `value` is a hex color (`#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`).
#[must_use]
pub fn is_hex_color(value: &str) -> bool {
    value.strip_prefix('#').is_some_and(|digits| {
        matches!(digits.len(), 3 | 4 | 6 | 8) && digits.chars().all(|c| c.is_ascii_hexdigit())
    })
}

// ============================================================================
// Top-Level Configuration
// ============================================================================

/// Root theme configuration document.
///
/// Constructed once per build by the loader, then frozen behind an `Arc`.
/// `plugins` order is significant: later entries may override styles
/// generated by earlier ones, so the sequence is never sorted or deduplicated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ThemeConfig {
    /// Glob patterns locating templates to scan for utility-class usage (required)
    pub content: Vec<String>,

    /// Font fallback chain per semantic font role (e.g. `sans`)
    #[serde(default)]
    pub font_family: IndexMap<String, Vec<String>>,

    /// Active visual theme: named presets or inline palettes (required)
    pub theme_options: ThemeOptions,

    /// Whether an automatic dark variant is generated
    #[serde(default)]
    pub dark_theme_enabled: bool,

    /// Toggles passed through to the theming plugin
    #[serde(default)]
    pub styling_flags: StylingFlags,

    /// Plugin identifiers in override-precedence order
    #[serde(default)]
    pub plugins: Vec<String>,
}

impl ThemeConfig {
    /// Returns the names of the themes this configuration activates,
    /// in declaration order.
    #[must_use]
    pub fn theme_names(&self) -> Vec<&str> {
        self.theme_options.names()
    }

    /// Returns `true` if `plugin` appears in the plugin list.
    #[must_use]
    pub fn has_plugin(&self, plugin: &str) -> bool {
        self.plugins.iter().any(|p| p == plugin)
    }
}

// ============================================================================
// Theme Options
// ============================================================================

/// Theme selection for the theming plugin.
///
/// In the document this is either a preset name, a sequence of preset
/// names, or a sequence of single-key mappings `{ <theme>: { <role>: <color> } }`.
/// It always serializes back to the sequence form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "ThemeOptionsDocument")]
pub enum ThemeOptions {
    /// One or more built-in presets selected by name
    Preset(Vec<String>),
    /// Inline palette definitions
    Palettes(Vec<Palette>),
}

impl ThemeOptions {
    /// Returns the theme names in declaration order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        match self {
            Self::Preset(names) => names.iter().map(String::as_str).collect(),
            Self::Palettes(palettes) => palettes.iter().map(|p| p.name.as_str()).collect(),
        }
    }

    /// Returns `true` for the named-preset form.
    #[must_use]
    pub const fn is_preset(&self) -> bool {
        matches!(self, Self::Preset(_))
    }
}

/// A named inline palette mapping color roles to values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    /// Theme name the plugin registers the palette under
    pub name: String,
    /// Color role → value, in document order
    pub colors: IndexMap<String, String>,
}

impl Palette {
    /// Returns the required color roles this palette does not define.
    #[must_use]
    pub fn missing_roles(&self) -> Vec<&'static str> {
        REQUIRED_COLOR_ROLES
            .iter()
            .copied()
            .filter(|role| !self.colors.contains_key(*role))
            .collect()
    }
}

/// Serialized form of [`ThemeOptions`].
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct ThemeOptionsDocument(Vec<ThemeEntryDocument>);

/// A single serialized `themeOptions` entry.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ThemeEntryDocument {
    /// Preset name
    Preset(String),
    /// `{ <theme>: { <role>: <color> } }`
    Palette(IndexMap<String, IndexMap<String, String>>),
}

impl From<ThemeOptions> for ThemeOptionsDocument {
    fn from(options: ThemeOptions) -> Self {
        let entries = match options {
            ThemeOptions::Preset(names) => {
                names.into_iter().map(ThemeEntryDocument::Preset).collect()
            }
            ThemeOptions::Palettes(palettes) => palettes
                .into_iter()
                .map(|p| {
                    let mut entry = IndexMap::with_capacity(1);
                    entry.insert(p.name, p.colors);
                    ThemeEntryDocument::Palette(entry)
                })
                .collect(),
        };
        Self(entries)
    }
}

impl TryFrom<Value> for ThemeOptions {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(name) => Ok(Self::Preset(vec![name])),
            Value::Sequence(entries) => parse_theme_entries(entries),
            Value::Tagged(tagged) => Self::try_from(tagged.value),
            other => Err(format!(
                "expected a preset name or a sequence of presets/palettes, found {}",
                describe(&other)
            )),
        }
    }
}

fn parse_theme_entries(entries: Vec<Value>) -> Result<ThemeOptions, String> {
    if entries.is_empty() {
        return Err("themeOptions must list at least one preset or palette".to_string());
    }

    let mut presets = Vec::new();
    let mut palettes = Vec::new();

    for (idx, entry) in entries.into_iter().enumerate() {
        match entry {
            Value::String(name) => presets.push(name),
            Value::Mapping(map) => palettes.push(parse_palette(idx, map)?),
            other => {
                return Err(format!(
                    "themeOptions[{idx}]: expected a preset name or a palette mapping, found {}",
                    describe(&other)
                ));
            }
        }
    }

    match (presets.is_empty(), palettes.is_empty()) {
        (false, true) => Ok(ThemeOptions::Preset(presets)),
        (true, false) => Ok(ThemeOptions::Palettes(palettes)),
        _ => Err(
            "themeOptions cannot mix preset names and inline palettes; use one form".to_string(),
        ),
    }
}

fn parse_palette(idx: usize, map: serde_yaml::Mapping) -> Result<Palette, String> {
    if map.len() != 1 {
        return Err(format!(
            "themeOptions[{idx}]: a palette entry must have exactly one theme name, found {}",
            map.len()
        ));
    }

    let Some((key, body)) = map.into_iter().next() else {
        return Err(format!("themeOptions[{idx}]: empty palette entry"));
    };

    let Value::String(name) = key else {
        return Err(format!(
            "themeOptions[{idx}]: theme name must be a string, found {}",
            describe(&key)
        ));
    };

    let Value::Mapping(body) = body else {
        return Err(format!(
            "themeOptions[{idx}].{name}: expected a mapping of color roles, found {}",
            describe(&body)
        ));
    };

    let mut colors = IndexMap::with_capacity(body.len());
    for (role, color) in body {
        let Value::String(role) = role else {
            return Err(format!(
                "themeOptions[{idx}].{name}: color role must be a string, found {}",
                describe(&role)
            ));
        };
        let color = match color {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            other => {
                return Err(format!(
                    "themeOptions[{idx}].{name}.{role}: expected a color string, found {}",
                    describe(&other)
                ));
            }
        };
        colors.insert(role, color);
    }

    Ok(Palette { name, colors })
}

const fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

// ============================================================================
// Styling Flags
// ============================================================================

/// Fine-grained toggles passed through to the theming plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StylingFlags {
    /// Emit base styles
    pub base: bool,
    /// Emit component styles
    pub styled: bool,
    /// Emit utility classes
    pub utils: bool,
    /// Right-to-left layout
    pub rtl: bool,
    /// Class-name prefix for generated component classes
    pub prefix: String,
    /// Plugin console output during the build
    pub logs: bool,
}

impl Default for StylingFlags {
    fn default() -> Self {
        Self {
            base: true,
            styled: true,
            utils: true,
            rtl: false,
            prefix: String::new(),
            logs: true,
        }
    }
}

// ============================================================================
// Document Format
// ============================================================================

/// Serialization format for emitting a resolved configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    /// YAML document (default)
    #[default]
    Yaml,
    /// JSON document
    Json,
}

// ============================================================================
// Tests
// ============================================================================
