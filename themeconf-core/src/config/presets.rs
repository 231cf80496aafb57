//! Built-in theme presets
//!
//! Named palettes the theming plugin ships with. A configuration may select
//! them by name instead of defining colors inline.

/// A built-in theme preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinPreset {
    /// Identifier used in `themeOptions`
    pub name: &'static str,
    /// Whether the preset is a dark color scheme
    pub dark: bool,
}

const fn light(name: &'static str) -> BuiltinPreset {
    BuiltinPreset { name, dark: false }
}

const fn dark(name: &'static str) -> BuiltinPreset {
    BuiltinPreset { name, dark: true }
}

/// All built-in presets in the plugin's registration order.
pub const BUILTIN_PRESETS: &[BuiltinPreset] = &[
    light("light"),
    dark("dark"),
    light("cupcake"),
    light("bumblebee"),
    light("emerald"),
    light("corporate"),
    dark("synthwave"),
    light("retro"),
    light("cyberpunk"),
    light("valentine"),
    dark("halloween"),
    light("garden"),
    dark("forest"),
    dark("aqua"),
    light("lofi"),
    light("pastel"),
    light("fantasy"),
    light("wireframe"),
    dark("black"),
    dark("luxury"),
    dark("dracula"),
    light("cmyk"),
    light("autumn"),
    dark("business"),
    light("acid"),
    light("lemonade"),
    dark("night"),
    dark("coffee"),
    light("winter"),
];

/// Look up a preset by exact name.
#[must_use]
pub fn find_preset(name: &str) -> Option<&'static BuiltinPreset> {
    BUILTIN_PRESETS.iter().find(|p| p.name == name)
}

/// Suggest a similar preset name for typo correction.
///
/// Returns the closest match if its Damerau-Levenshtein distance is ≤ 3.
#[must_use]
pub fn suggest_preset(input: &str) -> Option<&'static str> {
    BUILTIN_PRESETS
        .iter()
        .map(|p| (p.name, strsim::damerau_levenshtein(input, p.name)))
        .filter(|(_, dist)| *dist <= 3)
        .min_by_key(|(_, dist)| *dist)
        .map(|(name, _)| name)
}

/// Returns all preset names in registry order.
#[must_use]
pub fn list_preset_names() -> Vec<&'static str> {
    BUILTIN_PRESETS.iter().map(|p| p.name).collect()
}
