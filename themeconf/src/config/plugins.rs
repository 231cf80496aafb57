//! Plugin resolution
//!
//! Maps the identifiers listed under `plugins` to the generation extensions
//! available to the build. Package-style names (`@tailwindcss/forms`) resolve
//! to the same plugin as their short form.

use std::collections::HashSet;

use themeconf_core::error::ConfigError;

/// Environment variable holding extra, comma-separated plugin identifiers.
pub const EXTRA_PLUGINS_ENV: &str = "THEMECONF_EXTRA_PLUGINS";

/// Plugins bundled with the build, with the package aliases they answer to.
const BUILTIN_PLUGINS: &[(&str, &[&str])] = &[
    ("forms", &["@tailwindcss/forms"]),
    ("typography", &["@tailwindcss/typography"]),
    ("aspect-ratio", &["@tailwindcss/aspect-ratio"]),
    ("line-clamp", &["@tailwindcss/line-clamp"]),
    ("container-queries", &["@tailwindcss/container-queries"]),
    ("theming-plugin", &["daisyui"]),
];

/// Identifier of the component theming plugin that consumes
/// `themeOptions`, `darkThemeEnabled` and `stylingFlags`.
pub const THEMING_PLUGIN: &str = "theming-plugin";

/// A plugin identifier resolved against the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPlugin {
    /// Identifier as written in the document
    pub requested: String,
    /// Canonical plugin name
    pub name: String,
    /// Position in the `plugins` sequence (override precedence)
    pub position: usize,
}

/// Registry of plugins available at build time.
#[derive(Debug, Clone, Default)]
pub struct PluginRegistry {
    /// (canonical name, aliases) in registration order
    entries: Vec<(String, Vec<String>)>,
}

impl PluginRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the bundled plugins.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for (name, aliases) in BUILTIN_PLUGINS {
            registry.register(*name, aliases.iter().copied());
        }
        registry
    }

    /// Registers a plugin under `name`, also reachable through `aliases`.
    ///
    /// Re-registering an existing name merges the aliases.
    pub fn register<I, S>(&mut self, name: impl Into<String>, aliases: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        let aliases = aliases.into_iter().map(Into::into);
        if let Some((_, existing)) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            for alias in aliases {
                if !existing.contains(&alias) {
                    existing.push(alias);
                }
            }
        } else {
            self.entries.push((name, aliases.collect()));
        }
    }

    /// Registers every comma-separated identifier in `list`.
    pub fn register_list(&mut self, list: &str) {
        for name in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            self.register(name, std::iter::empty::<String>());
        }
    }

    /// Returns the canonical plugin name for `id`, if known.
    #[must_use]
    pub fn lookup(&self, id: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, aliases)| name == id || aliases.iter().any(|a| a == id))
            .map(|(name, _)| name.as_str())
    }

    /// Suggest a similar identifier for typo correction.
    ///
    /// Returns the closest known name or alias if its Damerau-Levenshtein
    /// distance is ≤ 3.
    #[must_use]
    pub fn suggest(&self, id: &str) -> Option<String> {
        self.entries
            .iter()
            .flat_map(|(name, aliases)| std::iter::once(name).chain(aliases))
            .map(|candidate| (candidate, strsim::damerau_levenshtein(id, candidate)))
            .filter(|(_, dist)| *dist <= 3)
            .min_by_key(|(_, dist)| *dist)
            .map(|(candidate, _)| candidate.clone())
    }

    /// Resolves `plugins` in order.
    ///
    /// The returned sequence has the same length and order as the input;
    /// duplicates are kept.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnresolvedPlugin`] for the first identifier
    /// with no registered implementation.
    pub fn resolve_all(&self, plugins: &[String]) -> Result<Vec<ResolvedPlugin>, ConfigError> {
        plugins
            .iter()
            .enumerate()
            .map(|(position, requested)| {
                self.lookup(requested)
                    .map(|name| ResolvedPlugin {
                        requested: requested.clone(),
                        name: name.to_string(),
                        position,
                    })
                    .ok_or_else(|| ConfigError::UnresolvedPlugin {
                        plugin: requested.clone(),
                        index: position,
                        suggestion: self.suggest(requested),
                    })
            })
            .collect()
    }

    /// Returns the positions of plugins that resolve to an already-listed plugin.
    #[must_use]
    pub fn duplicates(resolved: &[ResolvedPlugin]) -> Vec<&ResolvedPlugin> {
        let mut seen = HashSet::new();
        resolved
            .iter()
            .filter(|p| !seen.insert(p.name.as_str()))
            .collect()
    }

    /// Returns all canonical names in registration order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(name, _)| name.as_str()).collect()
    }
}
