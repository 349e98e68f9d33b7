//! Layered configuration.
//!
//! A build's [`Config`] is resolved once from an ordered list of layers:
//!
//! 1. the built-in [`default_config`]
//! 2. each plugin's config fragment, in registration order
//! 3. the user's config (highest precedence)
//!
//! Layers are deep-merged: mappings merge key by key, while scalars and
//! arrays replace whatever the lower layers had. Entries under `variants`
//! may also be [`VariantModifier`]s that edit the inherited list.
//!
//! The resolved config is immutable and answers dotted-path lookups. Missing
//! paths never fail; they resolve to the caller's fallback.
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use windforge::Config;
//!
//! let config = Config::resolve(&[
//!     json!({"theme": {"spacing": {"1": "4px", "2": "8px"}}}),
//!     json!({"theme": {"spacing": {"2": "0.5rem"}}, "prefix": "tw-"}),
//! ])
//! .unwrap();
//!
//! assert_eq!(config.prefix(), "tw-");
//! assert_eq!(config.theme("spacing.1"), Some(json!("4px")));
//! assert_eq!(config.theme("spacing.2"), Some(json!("0.5rem")));
//! assert_eq!(config.lookup_or("borderRadius.default", json!(".25rem")), json!(".25rem"));
//! ```

mod defaults;
mod lookup;
mod merge;
mod modifier;

pub use defaults::default_config;
pub use lookup::{lookup, normalize_theme_value, path_segments};
pub use merge::merge_value;
pub use modifier::VariantModifier;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::variants::VariantList;
pub(crate) use lookup::value_to_css_string;
use lookup::{is_truthy, lookup_segments};

/// How utilities are made to win over other styles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Important {
    /// No change (the default).
    Off,
    /// Append `!important` to every utility declaration.
    Flag,
    /// Scope every utility selector under this ancestor selector.
    Scope(String),
}

impl Important {
    fn from_value(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Bool(true)) => Important::Flag,
            Some(Value::String(scope)) if !scope.trim().is_empty() => {
                Important::Scope(scope.trim().to_string())
            }
            _ => Important::Off,
        }
    }
}

/// A fully resolved, immutable configuration tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    root: Value,
}

impl Config {
    /// Deep-merges `layers` in order, later layers winning.
    ///
    /// `null` layers are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if a layer is neither a mapping nor
    /// `null`.
    pub fn resolve<'a, I>(layers: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a Value>,
    {
        let mut root = Value::Object(Default::default());
        for (index, layer) in layers.into_iter().enumerate() {
            match layer {
                Value::Null => continue,
                Value::Object(_) => root = merge::merge_layer(&root, layer),
                other => {
                    return Err(Error::InvalidConfig {
                        reason: format!(
                            "layer #{} must be a mapping, found {}",
                            index,
                            value_kind(other)
                        ),
                    })
                }
            }
        }
        Ok(Self { root })
    }

    /// Resolves the built-in defaults under `user`.
    pub fn with_defaults(user: &Value) -> Result<Self> {
        Self::resolve([&default_config(), user])
    }

    /// Returns the whole tree.
    pub fn as_value(&self) -> &Value {
        &self.root
    }

    /// Returns the value at a dotted path.
    pub fn get(&self, path: &str) -> Option<&Value> {
        lookup(&self.root, path)
    }

    /// Returns a clone of the value at `path`, or `fallback` when absent.
    pub fn lookup_or(&self, path: &str, fallback: Value) -> Value {
        self.get(path).cloned().unwrap_or(fallback)
    }

    /// Reads a design token from the `theme` subtree, normalized for use
    /// as a declaration value (see [`normalize_theme_value`]).
    pub fn theme(&self, path: &str) -> Option<Value> {
        let segments = path_segments(path);
        let theme = self.root.get("theme")?;
        let value = lookup_segments(theme, &segments)?.clone();
        Some(match segments.first() {
            Some(section) => normalize_theme_value(section, value),
            None => value,
        })
    }

    /// Like [`theme`](Self::theme), normalizing `fallback` the same way when
    /// the path is absent.
    pub fn theme_or(&self, path: &str, fallback: Value) -> Value {
        match self.theme(path) {
            Some(value) => value,
            None => match path_segments(path).first() {
                Some(section) => normalize_theme_value(section, fallback),
                None => fallback,
            },
        }
    }

    /// The class prefix (`""` when unset).
    pub fn prefix(&self) -> &str {
        self.root.get("prefix").and_then(Value::as_str).unwrap_or("")
    }

    pub fn separator(&self) -> &str {
        self.root
            .get("separator")
            .and_then(Value::as_str)
            .unwrap_or(":")
    }

    pub fn important(&self) -> Important {
        Important::from_value(self.root.get("important"))
    }

    /// The global variant list, when `variants` is a flat array.
    pub fn global_variants(&self) -> Option<VariantList> {
        match self.root.get("variants") {
            Some(list @ Value::Array(_)) => Some(VariantList::from_value(list)),
            _ => None,
        }
    }

    /// The variant list for a plugin key.
    ///
    /// A global flat list wins over per-key entries. Returns `None` when
    /// neither is configured.
    pub fn variants_for(&self, key: &str) -> Option<VariantList> {
        if let Some(global) = self.global_variants() {
            return Some(global);
        }
        let per_key = self.root.get("variants").filter(|v| v.is_object())?;
        lookup(per_key, key).map(VariantList::from_value)
    }

    /// Whether the named built-in plugin is enabled.
    ///
    /// With an allow-list array only listed plugins are enabled; with a
    /// mapping every plugin is enabled unless explicitly switched off.
    pub fn core_plugin_enabled(&self, name: &str) -> bool {
        match self.root.get("corePlugins") {
            Some(Value::Array(allowed)) => allowed.iter().any(|v| v.as_str() == Some(name)),
            Some(Value::Object(map)) => map.get(name).map_or(true, is_truthy),
            _ => true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: default_config(),
        }
    }
}

/// Parses user configuration from JSON text.
pub fn from_json_str(text: &str) -> Result<Value> {
    serde_json::from_str(text).map_err(|e| Error::ConfigParse {
        format: "json",
        message: e.to_string(),
    })
}

/// Parses user configuration from YAML text.
pub fn from_yaml_str(text: &str) -> Result<Value> {
    serde_yaml::from_str(text).map_err(|e| Error::ConfigParse {
        format: "yaml",
        message: e.to_string(),
    })
}

pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "mapping",
    }
}
