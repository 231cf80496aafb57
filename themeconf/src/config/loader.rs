//! Configuration loader
//!
//! This module implements the configuration loading pipeline:
//! 1. Size check and read
//! 2. YAML parsing (`MalformedDocument` on failure)
//! 3. Deserialization to typed config (`SchemaViolation` on failure)
//! 4. Validation (`SchemaViolation` on failure)
//! 5. Plugin resolution (`UnresolvedPlugin` on failure)
//! 6. Freeze with `Arc`
//!
//! The document text is parsed exactly as written, so serializing a loaded
//! configuration and loading it again yields an equal value.

use crate::config::plugins::{EXTRA_PLUGINS_ENV, PluginRegistry, ResolvedPlugin, THEMING_PLUGIN};
use crate::config::validation::Validator;
use themeconf_core::config::schema::ThemeConfig;
use themeconf_core::error::{ConfigError, ValidationIssue};

use serde_yaml::Value;
use std::path::Path;
use std::sync::Arc;

/// Label used in errors for documents loaded from a string.
pub const INLINE_SOURCE: &str = "<inline>";

// ============================================================================
// Public API
// ============================================================================

/// Options for the configuration loader.
#[derive(Debug, Clone)]
pub struct LoaderOptions {
    /// Limits for configuration size.
    pub config_limits: ConfigLimits,

    /// Plugins available to the build.
    pub plugins: PluginRegistry,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        let mut plugins = PluginRegistry::with_builtins();
        if let Ok(extra) = std::env::var(EXTRA_PLUGINS_ENV) {
            plugins.register_list(&extra);
        }
        Self {
            config_limits: ConfigLimits::default(),
            plugins,
        }
    }
}

/// Limits for configuration size to prevent resource exhaustion.
#[derive(Debug, Clone)]
pub struct ConfigLimits {
    /// Maximum configuration file size in bytes.
    pub max_config_size: usize,

    /// Maximum number of `content` glob patterns.
    pub max_content_patterns: usize,

    /// Maximum number of inline palettes.
    pub max_palettes: usize,

    /// Maximum number of plugins.
    pub max_plugins: usize,
}

impl Default for ConfigLimits {
    fn default() -> Self {
        Self {
            max_config_size: env_or("THEMECONF_MAX_CONFIG_SIZE", 1024 * 1024),
            max_content_patterns: env_or("THEMECONF_MAX_CONTENT_PATTERNS", 256),
            max_palettes: env_or("THEMECONF_MAX_PALETTES", 64),
            max_plugins: env_or("THEMECONF_MAX_PLUGINS", 64),
        }
    }
}

/// Result of loading a configuration file.
#[derive(Debug)]
pub struct LoadResult {
    /// The loaded and validated configuration.
    pub config: Arc<ThemeConfig>,

    /// Plugins in override-precedence order, resolved against the registry.
    pub plugins: Vec<ResolvedPlugin>,

    /// Warnings encountered during loading.
    pub warnings: Vec<LoadWarning>,
}

/// Warning during configuration loading.
#[derive(Debug, Clone)]
pub struct LoadWarning {
    /// Warning message.
    pub message: String,

    /// Location where the warning occurred.
    pub location: Option<String>,
}

impl From<ValidationIssue> for LoadWarning {
    fn from(issue: ValidationIssue) -> Self {
        Self {
            message: issue.message,
            location: Some(issue.path),
        }
    }
}

/// Configuration loader.
///
/// Handles the full loading pipeline from a YAML document to a frozen
/// `ThemeConfig`. A loader holds no per-document state, so one instance may
/// load any number of documents.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: LoaderOptions,
}

impl ConfigLoader {
    /// Creates a new configuration loader with the given options.
    #[must_use]
    pub const fn new(options: LoaderOptions) -> Self {
        Self { options }
    }

    /// Creates a new configuration loader with default options.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(LoaderOptions::default())
    }

    /// Loads a configuration file and returns the frozen configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file does not exist (`MissingFile`), cannot be read
    ///   (`Unreadable`), or exceeds the size limit
    /// - YAML parsing fails (`MalformedDocument`)
    /// - The document does not match the schema (`SchemaViolation`)
    /// - A plugin cannot be resolved (`UnresolvedPlugin`)
    pub fn load(&self, path: &Path) -> Result<LoadResult, ConfigError> {
        let metadata = std::fs::metadata(path).map_err(|e| file_error(path, e))?;

        let file_size =
            usize::try_from(metadata.len()).unwrap_or(self.options.config_limits.max_config_size);
        if file_size > self.options.config_limits.max_config_size {
            return Err(ConfigError::InvalidValue {
                field: "file_size".to_string(),
                value: format!("{file_size} bytes"),
                expected: format!(
                    "at most {} bytes",
                    self.options.config_limits.max_config_size
                ),
            });
        }

        let bytes = std::fs::read(path).map_err(|e| file_error(path, e))?;

        let raw_content = String::from_utf8(bytes).map_err(|e| ConfigError::MalformedDocument {
            path: path.to_path_buf(),
            line: None,
            message: format!("document is not valid UTF-8: {e}"),
        })?;

        tracing::debug!(file = %path.display(), bytes = file_size, "read configuration");
        self.load_source(&raw_content, path)
    }

    /// Loads a configuration from an in-memory document.
    ///
    /// # Errors
    ///
    /// Same as [`ConfigLoader::load`], minus file access errors.
    pub fn load_from_str(&self, source: &str) -> Result<LoadResult, ConfigError> {
        if source.len() > self.options.config_limits.max_config_size {
            return Err(ConfigError::InvalidValue {
                field: "document_size".to_string(),
                value: format!("{} bytes", source.len()),
                expected: format!(
                    "at most {} bytes",
                    self.options.config_limits.max_config_size
                ),
            });
        }
        self.load_source(source, Path::new(INLINE_SOURCE))
    }

    fn load_source(&self, raw_content: &str, path: &Path) -> Result<LoadResult, ConfigError> {
        // Handle UTF-8 BOM
        let source = raw_content.strip_prefix('\u{feff}').unwrap_or(raw_content);

        // Stage 1: YAML parsing, before any schema check
        let root: Value =
            serde_yaml::from_str(source).map_err(|e| ConfigError::MalformedDocument {
                path: path.to_path_buf(),
                line: e.location().map(|l| l.line()),
                message: e.to_string(),
            })?;

        if root.is_null() {
            return Err(ConfigError::MalformedDocument {
                path: path.to_path_buf(),
                line: None,
                message: "Configuration document is empty".to_string(),
            });
        }
        tracing::debug!(file = %path.display(), "parsed configuration document");

        // Stage 2: Deserialize to typed config. Parsed from text rather than
        // from `root` so errors carry the field path.
        let config: ThemeConfig = serde_yaml::from_str(source).map_err(|e| {
            ConfigError::SchemaViolation {
                path: path.display().to_string(),
                errors: vec![issue_from_serde(&e)],
            }
        })?;

        // Stage 3: Validation
        let mut validator = Validator::new();
        let validation_result = validator.validate(&config, &self.options.config_limits);

        if validation_result.has_errors() {
            return Err(ConfigError::SchemaViolation {
                path: path.display().to_string(),
                errors: validation_result.errors,
            });
        }
        let mut warnings: Vec<LoadWarning> = validation_result
            .warnings
            .into_iter()
            .map(LoadWarning::from)
            .collect();

        // Stage 4: Plugin resolution
        let plugins = self.options.plugins.resolve_all(&config.plugins)?;
        warnings.extend(plugin_warnings(&plugins));
        tracing::debug!(
            file = %path.display(),
            plugins = plugins.len(),
            themes = ?config.theme_names(),
            "resolved configuration"
        );

        // Stage 5: Freeze
        Ok(LoadResult {
            config: Arc::new(config),
            plugins,
            warnings,
        })
    }
}

/// Cross-field warnings about the resolved plugin list.
fn plugin_warnings(plugins: &[ResolvedPlugin]) -> Vec<LoadWarning> {
    let mut warnings: Vec<LoadWarning> = PluginRegistry::duplicates(plugins)
        .into_iter()
        .map(|dup| LoadWarning {
            message: format!(
                "Plugin '{}' is listed more than once; the later entry takes precedence",
                dup.name
            ),
            location: Some(format!("plugins[{}]", dup.position)),
        })
        .collect();

    if !plugins.iter().any(|p| p.name == THEMING_PLUGIN) {
        warnings.push(LoadWarning {
            message: format!(
                "'{THEMING_PLUGIN}' is not listed; themeOptions, darkThemeEnabled and stylingFlags have no effect"
            ),
            location: Some("plugins".to_string()),
        });
    }

    warnings
}

/// Converts a typed-deserialization error into a validation issue.
///
/// serde_yaml prefixes messages with the field path (`themeOptions: ...`)
/// when the failure is below the document root.
fn issue_from_serde(err: &serde_yaml::Error) -> ValidationIssue {
    let message = err.to_string();

    if let Some((path, rest)) = message.split_once(": ")
        && !path.is_empty()
        && !path.contains(char::is_whitespace)
    {
        return ValidationIssue::error(path, rest);
    }

    let named_field = ["missing field `", "unknown field `"]
        .iter()
        .find_map(|prefix| message.strip_prefix(prefix))
        .and_then(|rest| rest.split_once('`'))
        .map(|(field, _)| field.to_string());

    ValidationIssue::error(named_field.unwrap_or_else(|| "(document)".to_string()), message)
}

/// Classifies a failure to stat or read the configuration file.
fn file_error(path: &Path, err: std::io::Error) -> ConfigError {
    if err.kind() == std::io::ErrorKind::NotFound {
        ConfigError::MissingFile {
            path: path.to_path_buf(),
        }
    } else {
        ConfigError::Unreadable {
            path: path.to_path_buf(),
            source: err,
        }
    }
}

/// Reads a value from the environment, falling back to `default` when unset
/// or unparseable.
fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use themeconf_core::config::schema::ThemeOptions;

    const PRESET_DOC: &str = r#"
content: ["**/templates/**/*.html"]
fontFamily: { sans: ["Open Sans", "sans-serif"] }
themeOptions: ["corporate"]
darkThemeEnabled: false
stylingFlags: { base: true, styled: true, utils: true, rtl: false, prefix: "", logs: true }
plugins: ["forms", "typography", "theming-plugin"]
"#;

    fn loader() -> ConfigLoader {
        ConfigLoader::new(LoaderOptions {
            config_limits: ConfigLimits::default(),
            plugins: PluginRegistry::with_builtins(),
        })
    }

    #[test]
    fn test_load_preset_document() {
        let result = loader().load_from_str(PRESET_DOC).unwrap();
        assert_eq!(
            result.config.theme_options,
            ThemeOptions::Preset(vec!["corporate".to_string()])
        );
        assert!(result.warnings.is_empty(), "{:?}", result.warnings);
    }

    #[test]
    fn test_plugin_order_preserved() {
        let doc = PRESET_DOC.replace(
            r#"plugins: ["forms", "typography", "theming-plugin"]"#,
            r#"plugins: ["theming-plugin", "forms", "typography", "forms"]"#,
        );
        let result = loader().load_from_str(&doc).unwrap();
        assert_eq!(
            result.config.plugins,
            ["theming-plugin", "forms", "typography", "forms"]
        );
        let resolved: Vec<&str> = result.plugins.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(resolved, ["theming-plugin", "forms", "typography", "forms"]);
        assert!(
            result
                .warnings
                .iter()
                .any(|w| w.location.as_deref() == Some("plugins[3]"))
        );
    }

    #[test]
    fn test_malformed_document() {
        let err = loader().load_from_str("content: [unclosed\n").unwrap_err();
        assert!(
            matches!(err, ConfigError::MalformedDocument { .. }),
            "expected MalformedDocument, got {err:?}"
        );
    }

    #[test]
    fn test_malformed_before_schema_check() {
        // Both unparsable and schema-invalid (empty content): parse wins.
        let err = loader()
            .load_from_str("content: []\nthemeOptions: [corporate\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::MalformedDocument { .. }));
    }

    #[test]
    fn test_empty_document() {
        let err = loader().load_from_str("   \n# only a comment\n").unwrap_err();
        match err {
            ConfigError::MalformedDocument { message, .. } => {
                assert!(message.contains("empty"));
            }
            other => panic!("expected MalformedDocument, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_content_is_schema_violation() {
        let doc = PRESET_DOC.replace(r#"content: ["**/templates/**/*.html"]"#, "content: []");
        let err = loader().load_from_str(&doc).unwrap_err();
        assert!(matches!(err, ConfigError::SchemaViolation { .. }));
        assert_eq!(err.issues()[0].path, "content");
    }

    #[test]
    fn test_missing_required_field_names_field() {
        let err = loader()
            .load_from_str("content: [\"a/**\"]\nplugins: []\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::SchemaViolation { .. }));
        assert_eq!(err.issues()[0].path, "themeOptions");
    }

    #[test]
    fn test_wrong_type_is_schema_violation() {
        let err = loader()
            .load_from_str("content: \"a/**\"\nthemeOptions: [corporate]\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::SchemaViolation { .. }), "{err:?}");
    }

    #[test]
    fn test_root_sequence_is_schema_violation() {
        let err = loader().load_from_str("- a\n- b\n").unwrap_err();
        assert!(matches!(err, ConfigError::SchemaViolation { .. }), "{err:?}");
    }

    #[test]
    fn test_unresolved_plugin() {
        let doc = PRESET_DOC.replace("\"typography\"", "\"tipography\"");
        let err = loader().load_from_str(&doc).unwrap_err();
        match err {
            ConfigError::UnresolvedPlugin {
                plugin,
                index,
                suggestion,
            } => {
                assert_eq!(plugin, "tipography");
                assert_eq!(index, 1);
                assert_eq!(suggestion.as_deref(), Some("typography"));
            }
            other => panic!("expected UnresolvedPlugin, got {other:?}"),
        }
    }

    #[test]
    fn test_extra_registered_plugin_resolves() {
        let mut plugins = PluginRegistry::with_builtins();
        plugins.register_list("scrollbar");
        let loader = ConfigLoader::new(LoaderOptions {
            config_limits: ConfigLimits::default(),
            plugins,
        });
        let doc = PRESET_DOC.replace("\"forms\"", "\"scrollbar\"");
        let result = loader.load_from_str(&doc).unwrap();
        assert_eq!(result.plugins[0].name, "scrollbar");
    }

    #[test]
    fn test_missing_theming_plugin_warns() {
        let doc = PRESET_DOC.replace(", \"theming-plugin\"", "");
        let result = loader().load_from_str(&doc).unwrap();
        assert!(
            result
                .warnings
                .iter()
                .any(|w| w.message.contains("have no effect"))
        );
    }

    #[test]
    fn test_document_size_limit() {
        let loader = ConfigLoader::new(LoaderOptions {
            config_limits: ConfigLimits {
                max_config_size: 16,
                ..ConfigLimits::default()
            },
            plugins: PluginRegistry::with_builtins(),
        });
        let err = loader.load_from_str(PRESET_DOC).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_bom_is_stripped() {
        let doc = format!("\u{feff}{PRESET_DOC}");
        assert!(loader().load_from_str(&doc).is_ok());
    }

    #[test]
    fn test_missing_file() {
        let err = loader()
            .load(Path::new("/nonexistent/themeconf/theme.yaml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingFile { .. }));
    }

    #[test]
    fn test_issue_from_serde_missing_field() {
        let err = serde_yaml::from_str::<ThemeConfig>("themeOptions: [corporate]").unwrap_err();
        let issue = issue_from_serde(&err);
        assert_eq!(issue.path, "content");
    }

    #[test]
    fn test_dollar_text_is_taken_literally() {
        let doc = PRESET_DOC.replace(
            r#"content: ["**/templates/**/*.html"]"#,
            r#"content: ["templates/$${HOME}/*.html", "${PATH}/*.html"]"#,
        );
        let first = loader().load_from_str(&doc).unwrap();
        assert_eq!(
            first.config.content,
            ["templates/$${HOME}/*.html", "${PATH}/*.html"]
        );

        let yaml = serde_yaml::to_string(&*first.config).unwrap();
        let second = loader().load_from_str(&yaml).unwrap();
        assert_eq!(*first.config, *second.config);
    }

    #[test]
    fn test_comments_are_not_interpreted() {
        let doc = format!("# uses ${{THEMECONF_TEST_UNSET:?set it}}\n{PRESET_DOC}");
        let result = loader().load_from_str(&doc).unwrap();
        assert!(result.warnings.is_empty(), "{:?}", result.warnings);
    }

    #[test]
    fn test_directory_is_unreadable_not_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = loader().load(dir.path()).unwrap_err();
        assert!(
            matches!(err, ConfigError::Unreadable { .. }),
            "expected Unreadable, got {err:?}"
        );
    }

    #[test]
    fn test_config_limits_default() {
        let limits = ConfigLimits::default();
        assert!(limits.max_config_size > 0);
        assert!(limits.max_content_patterns > 0);
        assert!(limits.max_palettes > 0);
        assert!(limits.max_plugins > 0);
    }

    mod round_trip {
        use super::*;
        use proptest::prelude::*;
        use themeconf_core::config::list_preset_names;
        use themeconf_core::config::schema::{Palette, REQUIRED_COLOR_ROLES, StylingFlags};

        // Every generated string may carry `$`, `{` and `}` so that any
        // rewriting of the text between load and reload shows up.
        const TEXT: &str = "[a-z$][a-z${}/._-]{0,15}";

        fn palette() -> impl Strategy<Value = Palette> {
            (
                "[a-z]{1,8}",
                proptest::collection::vec("#[0-9a-f]{6}", REQUIRED_COLOR_ROLES.len()),
                TEXT,
            )
                .prop_map(|(name, values, variable)| {
                    let mut colors: indexmap::IndexMap<String, String> = REQUIRED_COLOR_ROLES
                        .iter()
                        .map(|r| (*r).to_string())
                        .zip(values)
                        .collect();
                    colors.insert("--rounded-box".to_string(), variable);
                    Palette { name, colors }
                })
        }

        fn theme_options() -> impl Strategy<Value = ThemeOptions> {
            prop_oneof![
                proptest::collection::vec(
                    proptest::sample::select(list_preset_names()).prop_map(str::to_string),
                    1..3,
                )
                .prop_map(ThemeOptions::Preset),
                palette().prop_map(|p| ThemeOptions::Palettes(vec![p])),
            ]
        }

        fn config() -> impl Strategy<Value = ThemeConfig> {
            let plugin = proptest::sample::select(vec![
                "forms",
                "typography",
                "theming-plugin",
                "daisyui",
                "@tailwindcss/forms",
            ])
            .prop_map(str::to_string);

            (
                proptest::collection::vec(TEXT, 1..4),
                proptest::collection::vec(
                    ("[a-z]{1,8}", proptest::collection::vec(TEXT, 1..3)),
                    0..3,
                ),
                theme_options(),
                any::<bool>(),
                (any::<bool>(), "([a-z][a-z0-9-]{0,4})?"),
                proptest::collection::vec(plugin, 0..5),
            )
                .prop_map(|(content, fonts, theme_options, dark, (rtl, prefix), plugins)| {
                    ThemeConfig {
                        content,
                        font_family: fonts.into_iter().collect(),
                        theme_options,
                        dark_theme_enabled: dark,
                        styling_flags: StylingFlags {
                            rtl,
                            prefix,
                            ..StylingFlags::default()
                        },
                        plugins,
                    }
                })
        }

        proptest! {
            #[test]
            fn load_serialize_load_is_stable(config in config()) {
                let yaml = serde_yaml::to_string(&config).unwrap();
                let first = loader().load_from_str(&yaml).unwrap();
                prop_assert_eq!(&*first.config, &config);

                let again = serde_yaml::to_string(&*first.config).unwrap();
                let second = loader().load_from_str(&again).unwrap();
                prop_assert_eq!(&*second.config, &*first.config);
            }
        }
    }
}
