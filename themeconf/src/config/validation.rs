//! Configuration validation
//!
//! Semantic validation of a deserialized `ThemeConfig`. Shape checks
//! (required fields, types, the `themeOptions` variant) already happened
//! during deserialization; this pass enforces the invariants serde cannot
//! express.
//!
//! Validation collects ALL errors (doesn't stop at first) to provide
//! comprehensive feedback to users.

use crate::config::loader::ConfigLimits;
use themeconf_core::config::schema::{
    OPTIONAL_COLOR_ROLES, Palette, REQUIRED_COLOR_ROLES, StylingFlags, ThemeConfig, ThemeOptions,
    is_css_variable, is_hex_color,
};
use themeconf_core::config::{find_preset, suggest_preset};
use themeconf_core::error::{Severity, ValidationIssue};

use indexmap::IndexMap;
use std::collections::HashSet;

/// Generic font families a fallback chain is expected to end with.
const GENERIC_FONT_FAMILIES: &[&str] = &[
    "serif",
    "sans-serif",
    "monospace",
    "cursive",
    "fantasy",
    "system-ui",
    "ui-serif",
    "ui-sans-serif",
    "ui-monospace",
    "ui-rounded",
    "emoji",
    "math",
    "fangsong",
];

// ============================================================================
// Public API
// ============================================================================

/// Result of configuration validation.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Validation errors (prevent loading).
    pub errors: Vec<ValidationIssue>,

    /// Validation warnings (informational).
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Returns `true` if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns `true` if validation passed (no errors).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Configuration validator.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<ValidationIssue>,
    warnings: Vec<ValidationIssue>,
}

impl Validator {
    /// Creates a new validator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates a configuration and returns the result.
    ///
    /// This method collects all errors and warnings rather than stopping
    /// at the first issue.
    pub fn validate(&mut self, config: &ThemeConfig, limits: &ConfigLimits) -> ValidationResult {
        self.errors.clear();
        self.warnings.clear();

        self.validate_content(&config.content);
        self.validate_font_family(&config.font_family);

        match &config.theme_options {
            ThemeOptions::Preset(names) => self.validate_presets(names),
            ThemeOptions::Palettes(palettes) => self.validate_palettes(palettes),
        }

        self.validate_styling_flags(&config.styling_flags);
        self.validate_limits(config, limits);

        ValidationResult {
            errors: std::mem::take(&mut self.errors),
            warnings: std::mem::take(&mut self.warnings),
        }
    }

    // ========================================================================
    // Content
    // ========================================================================

    fn validate_content(&mut self, content: &[String]) {
        if content.is_empty() {
            self.add_error(
                "content",
                "content must list at least one glob pattern; no classes would be retained",
            );
            return;
        }

        let mut seen = HashSet::new();
        for (idx, pattern) in content.iter().enumerate() {
            let path = format!("content[{idx}]");

            if pattern.trim().is_empty() {
                self.add_error(&path, "Glob pattern cannot be empty");
                continue;
            }

            if let Err(e) = glob::Pattern::new(pattern) {
                self.add_error(&path, &format!("Invalid glob pattern '{pattern}': {e}"));
            }

            if !seen.insert(pattern.as_str()) {
                self.add_warning(&path, &format!("Duplicate content pattern '{pattern}'"));
            }
        }
    }

    // ========================================================================
    // Fonts
    // ========================================================================

    fn validate_font_family(&mut self, fonts: &IndexMap<String, Vec<String>>) {
        for (role, chain) in fonts {
            let path = format!("fontFamily.{role}");

            if role.trim().is_empty() {
                self.add_error("fontFamily", "Font role name cannot be empty");
            }

            if chain.is_empty() {
                self.add_error(&path, "Font fallback chain cannot be empty");
                continue;
            }

            for (idx, family) in chain.iter().enumerate() {
                if family.trim().is_empty() {
                    self.add_error(&format!("{path}[{idx}]"), "Font family name cannot be empty");
                }
            }

            let has_generic = chain
                .iter()
                .any(|f| GENERIC_FONT_FAMILIES.contains(&f.trim()));
            if !has_generic {
                self.add_warning(
                    &path,
                    &format!(
                        "Font chain for '{role}' has no generic fallback family (e.g. {})",
                        GENERIC_FONT_FAMILIES[..3].join(", ")
                    ),
                );
            }
        }
    }

    // ========================================================================
    // Themes
    // ========================================================================

    fn validate_presets(&mut self, names: &[String]) {
        let mut seen = HashSet::new();
        for (idx, name) in names.iter().enumerate() {
            let path = format!("themeOptions[{idx}]");

            if find_preset(name).is_none() {
                let hint = suggest_preset(name)
                    .map_or_else(String::new, |s| format!(" Did you mean '{s}'?"));
                self.add_error(&path, &format!("Unknown theme preset '{name}'.{hint}"));
            }

            if !seen.insert(name.as_str()) {
                self.add_warning(&path, &format!("Duplicate theme preset '{name}'"));
            }
        }
    }

    fn validate_palettes(&mut self, palettes: &[Palette]) {
        let mut names = HashSet::new();
        for (idx, palette) in palettes.iter().enumerate() {
            let path = format!("themeOptions[{idx}].{}", palette.name);

            if palette.name.trim().is_empty() {
                self.add_error(
                    &format!("themeOptions[{idx}]"),
                    "Palette name cannot be empty",
                );
            }

            if !names.insert(palette.name.as_str()) {
                self.add_error(&path, &format!("Duplicate palette name '{}'", palette.name));
            }

            if find_preset(&palette.name).is_some() {
                self.add_warning(
                    &path,
                    &format!(
                        "Palette '{}' shadows the built-in preset of the same name",
                        palette.name
                    ),
                );
            }

            self.validate_palette(palette, &path);
        }
    }

    fn validate_palette(&mut self, palette: &Palette, path: &str) {
        for role in palette.missing_roles() {
            self.add_error(path, &format!("Missing required color role '{role}'"));
        }

        for (role, value) in &palette.colors {
            let role_path = format!("{path}.{role}");

            if is_css_variable(role) {
                if value.trim().is_empty() {
                    self.add_error(&role_path, "CSS variable value cannot be empty");
                }
                continue;
            }

            if !REQUIRED_COLOR_ROLES.contains(&role.as_str())
                && !OPTIONAL_COLOR_ROLES.contains(&role.as_str())
            {
                let hint = suggest_role(role)
                    .map_or_else(String::new, |s| format!(" Did you mean '{s}'?"));
                self.add_warning(
                    &role_path,
                    &format!("Unknown color role '{role}'; the plugin will ignore it.{hint}"),
                );
            }

            if !is_hex_color(value) {
                self.add_error(
                    &role_path,
                    &format!(
                        "Invalid color '{value}'. Expected a hex color such as #rgb or #rrggbb"
                    ),
                );
            }
        }
    }

    // ========================================================================
    // Styling Flags
    // ========================================================================

    fn validate_styling_flags(&mut self, flags: &StylingFlags) {
        let prefix = flags.prefix.as_str();
        let valid_chars = prefix
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        let starts_with_digit = prefix.chars().next().is_some_and(|c| c.is_ascii_digit());

        // An empty prefix passes both checks.
        if !valid_chars || starts_with_digit {
            self.add_error(
                "stylingFlags.prefix",
                &format!(
                    "Invalid class prefix '{prefix}'. Use letters, digits, '-' or '_', not starting with a digit"
                ),
            );
        }

        if !flags.styled && !flags.utils && !flags.base {
            self.add_warning(
                "stylingFlags",
                "base, styled and utils are all disabled; the theming plugin emits nothing",
            );
        }
    }

    // ========================================================================
    // Limits
    // ========================================================================

    fn validate_limits(&mut self, config: &ThemeConfig, limits: &ConfigLimits) {
        if config.content.len() > limits.max_content_patterns {
            self.add_error(
                "content",
                &format!(
                    "Too many content patterns: {} (max: {})",
                    config.content.len(),
                    limits.max_content_patterns
                ),
            );
        }

        if let ThemeOptions::Palettes(palettes) = &config.theme_options {
            if palettes.len() > limits.max_palettes {
                self.add_error(
                    "themeOptions",
                    &format!(
                        "Too many palettes: {} (max: {})",
                        palettes.len(),
                        limits.max_palettes
                    ),
                );
            }
        }

        if config.plugins.len() > limits.max_plugins {
            self.add_error(
                "plugins",
                &format!(
                    "Too many plugins: {} (max: {})",
                    config.plugins.len(),
                    limits.max_plugins
                ),
            );
        }
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn add_error(&mut self, path: &str, message: &str) {
        self.errors.push(ValidationIssue {
            path: path.to_string(),
            message: message.to_string(),
            severity: Severity::Error,
        });
    }

    fn add_warning(&mut self, path: &str, message: &str) {
        self.warnings.push(ValidationIssue {
            path: path.to_string(),
            message: message.to_string(),
            severity: Severity::Warning,
        });
    }
}

fn suggest_role(input: &str) -> Option<&'static str> {
    REQUIRED_COLOR_ROLES
        .iter()
        .chain(OPTIONAL_COLOR_ROLES)
        .map(|role| (*role, strsim::damerau_levenshtein(input, role)))
        .filter(|(_, dist)| *dist <= 2)
        .min_by_key(|(_, dist)| *dist)
        .map(|(role, _)| role)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn default_limits() -> ConfigLimits {
        ConfigLimits::default()
    }

    fn full_palette(name: &str) -> Palette {
        let values = [
            "#65c3c8", "#ef9fbc", "#eeaf3a", "#291334", "#faf7f5", "#3abff8", "#36d399",
            "#fbbd23", "#f87272",
        ];
        Palette {
            name: name.to_string(),
            colors: REQUIRED_COLOR_ROLES
                .iter()
                .zip(values)
                .map(|(r, v)| ((*r).to_string(), v.to_string()))
                .collect(),
        }
    }

    fn minimal_config() -> ThemeConfig {
        let mut font_family = IndexMap::new();
        font_family.insert(
            "sans".to_string(),
            vec!["Open Sans".to_string(), "sans-serif".to_string()],
        );
        ThemeConfig {
            content: vec!["**/templates/**/*.html".to_string()],
            font_family,
            theme_options: ThemeOptions::Preset(vec!["corporate".to_string()]),
            dark_theme_enabled: false,
            styling_flags: StylingFlags::default(),
            plugins: vec![
                "forms".to_string(),
                "typography".to_string(),
                "theming-plugin".to_string(),
            ],
        }
    }

    fn validate(config: &ThemeConfig) -> ValidationResult {
        Validator::new().validate(config, &default_limits())
    }

    #[test]
    fn test_validate_minimal_config() {
        let result = validate(&minimal_config());
        assert!(result.is_valid(), "{:?}", result.errors);
        assert!(result.warnings.is_empty(), "{:?}", result.warnings);
    }

    #[test]
    fn test_validate_full_palette() {
        let mut config = minimal_config();
        config.theme_options = ThemeOptions::Palettes(vec![full_palette("mytheme")]);
        let result = validate(&config);
        assert!(result.is_valid(), "{:?}", result.errors);
    }

    #[test]
    fn test_validate_empty_content() {
        let mut config = minimal_config();
        config.content.clear();
        let result = validate(&config);
        assert!(result.has_errors());
        assert_eq!(result.errors[0].path, "content");
    }

    #[test]
    fn test_validate_blank_and_invalid_globs() {
        let mut config = minimal_config();
        config.content = vec!["  ".to_string(), "templates/[".to_string()];
        let result = validate(&config);
        assert!(result.errors.iter().any(|e| e.path == "content[0]"));
        assert!(
            result
                .errors
                .iter()
                .any(|e| e.path == "content[1]" && e.message.contains("Invalid glob"))
        );
    }

    #[test]
    fn test_validate_duplicate_content_warning() {
        let mut config = minimal_config();
        config.content.push(config.content[0].clone());
        let result = validate(&config);
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.path == "content[1]"));
    }

    #[test]
    fn test_validate_missing_color_role() {
        let mut config = minimal_config();
        let mut palette = full_palette("mytheme");
        palette.colors.shift_remove("accent");
        config.theme_options = ThemeOptions::Palettes(vec![palette]);
        let result = validate(&config);
        assert!(result.has_errors());
        assert!(
            result
                .errors
                .iter()
                .any(|e| e.path == "themeOptions[0].mytheme"
                    && e.message.contains("'accent'"))
        );
    }

    #[test]
    fn test_validate_every_missing_role_reported() {
        let mut config = minimal_config();
        config.theme_options = ThemeOptions::Palettes(vec![Palette {
            name: "bare".to_string(),
            colors: IndexMap::new(),
        }]);
        let result = validate(&config);
        assert_eq!(result.errors.len(), REQUIRED_COLOR_ROLES.len());
    }

    #[test]
    fn test_validate_invalid_hex_color() {
        let mut config = minimal_config();
        let mut palette = full_palette("mytheme");
        palette
            .colors
            .insert("primary".to_string(), "teal".to_string());
        config.theme_options = ThemeOptions::Palettes(vec![palette]);
        let result = validate(&config);
        assert!(
            result
                .errors
                .iter()
                .any(|e| e.path == "themeOptions[0].mytheme.primary")
        );
    }

    #[test]
    fn test_validate_css_variables_accepted() {
        let mut config = minimal_config();
        let mut palette = full_palette("mytheme");
        palette
            .colors
            .insert("--rounded-box".to_string(), "1rem".to_string());
        config.theme_options = ThemeOptions::Palettes(vec![palette]);
        let result = validate(&config);
        assert!(result.is_valid(), "{:?}", result.errors);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_validate_unknown_role_warns_with_suggestion() {
        let mut config = minimal_config();
        let mut palette = full_palette("mytheme");
        palette
            .colors
            .insert("base-200x".to_string(), "#ffffff".to_string());
        config.theme_options = ThemeOptions::Palettes(vec![palette]);
        let result = validate(&config);
        assert!(result.is_valid());
        assert!(
            result
                .warnings
                .iter()
                .any(|w| w.message.contains("Did you mean 'base-200'"))
        );
    }

    #[test]
    fn test_validate_duplicate_palette_names() {
        let mut config = minimal_config();
        config.theme_options =
            ThemeOptions::Palettes(vec![full_palette("mine"), full_palette("mine")]);
        let result = validate(&config);
        assert!(
            result
                .errors
                .iter()
                .any(|e| e.message.contains("Duplicate palette name"))
        );
    }

    #[test]
    fn test_validate_palette_shadowing_preset_warns() {
        let mut config = minimal_config();
        config.theme_options = ThemeOptions::Palettes(vec![full_palette("corporate")]);
        let result = validate(&config);
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.message.contains("shadows")));
    }

    #[test]
    fn test_validate_unknown_preset() {
        let mut config = minimal_config();
        config.theme_options = ThemeOptions::Preset(vec!["coporate".to_string()]);
        let result = validate(&config);
        assert!(result.has_errors());
        assert!(result.errors[0].message.contains("Did you mean 'corporate'"));
    }

    #[test]
    fn test_validate_empty_font_chain() {
        let mut config = minimal_config();
        config.font_family.insert("mono".to_string(), vec![]);
        let result = validate(&config);
        assert!(result.errors.iter().any(|e| e.path == "fontFamily.mono"));
    }

    #[test]
    fn test_validate_font_without_generic_fallback_warns() {
        let mut config = minimal_config();
        config
            .font_family
            .insert("display".to_string(), vec!["Lobster".to_string()]);
        let result = validate(&config);
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.path == "fontFamily.display"));
    }

    #[test]
    fn test_validate_invalid_prefix() {
        for bad in ["1x-", "dui.", "a b"] {
            let mut config = minimal_config();
            config.styling_flags.prefix = bad.to_string();
            let result = validate(&config);
            assert!(
                result.errors.iter().any(|e| e.path == "stylingFlags.prefix"),
                "prefix {bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_validate_valid_prefix() {
        let mut config = minimal_config();
        config.styling_flags.prefix = "dui-".to_string();
        assert!(validate(&config).is_valid());
    }

    #[test]
    fn test_validate_too_many_plugins() {
        let mut config = minimal_config();
        let limits = ConfigLimits {
            max_plugins: 2,
            ..ConfigLimits::default()
        };
        let result = Validator::new().validate(&config, &limits);
        assert!(result.errors.iter().any(|e| e.path == "plugins"));

        config.plugins.truncate(2);
        let result = Validator::new().validate(&config, &limits);
        assert!(result.is_valid());
    }

    #[test]
    fn test_validate_too_many_content_patterns() {
        let mut config = minimal_config();
        config.content = vec![
            "a/*.html".to_string(),
            "b/*.html".to_string(),
            "c/*.html".to_string(),
        ];
        let limits = ConfigLimits {
            max_content_patterns: 2,
            ..ConfigLimits::default()
        };
        let result = Validator::new().validate(&config, &limits);
        assert!(
            result
                .errors
                .iter()
                .any(|e| e.path == "content" && e.message.contains("max: 2"))
        );

        config.content.truncate(2);
        let result = Validator::new().validate(&config, &limits);
        assert!(result.is_valid(), "{:?}", result.errors);
    }

    #[test]
    fn test_validate_too_many_palettes() {
        let mut config = minimal_config();
        config.theme_options = ThemeOptions::Palettes(vec![
            full_palette("light-one"),
            full_palette("light-two"),
            full_palette("light-three"),
        ]);
        let limits = ConfigLimits {
            max_palettes: 2,
            ..ConfigLimits::default()
        };
        let result = Validator::new().validate(&config, &limits);
        assert!(
            result
                .errors
                .iter()
                .any(|e| e.path == "themeOptions" && e.message.contains("Too many palettes"))
        );

        config.theme_options =
            ThemeOptions::Palettes(vec![full_palette("light-one"), full_palette("light-two")]);
        let result = Validator::new().validate(&config, &limits);
        assert!(result.is_valid(), "{:?}", result.errors);
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let mut config = minimal_config();
        config.content.clear();
        config.styling_flags.prefix = "9".to_string();
        config.theme_options = ThemeOptions::Preset(vec!["nope-nope-nope".to_string()]);
        let result = validate(&config);
        assert_eq!(result.errors.len(), 3, "{:?}", result.errors);
    }
}
