//! The capability surface handed to plugin handlers.

use serde_json::Value;

use crate::config::Config;
use crate::layer::{Layer, Output, RuleGroup};
use crate::style::{apply_important, apply_prefix, compile, escape, prefix_selector, StyleInput};
use crate::variants::{wrap, VariantList};

/// Per-call options for [`PluginApi::add_components_with`] and
/// [`PluginApi::add_utilities_with`].
///
/// A bare list of names converts into options carrying just that list, which
/// is the shorthand most plugins use:
///
/// ```rust
/// use windforge::{AddOptions, VariantList};
///
/// let options = AddOptions::from(["responsive", "hover"]);
/// assert_eq!(options.variants, Some(VariantList::from(["responsive", "hover"])));
/// assert!(options.respect_prefix);
///
/// let raw = AddOptions::new().respect_prefix(false).respect_important(false);
/// assert_eq!(raw.variants, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddOptions {
    /// Explicit variants. `None` falls back to the global variant list, if
    /// one is configured.
    pub variants: Option<VariantList>,
    /// Whether the configured class prefix is applied.
    pub respect_prefix: bool,
    /// Only consulted for utilities.
    pub respect_important: bool,
}

impl Default for AddOptions {
    fn default() -> Self {
        Self {
            variants: None,
            respect_prefix: true,
            respect_important: true,
        }
    }
}

impl AddOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn variants(mut self, variants: impl Into<VariantList>) -> Self {
        self.variants = Some(variants.into());
        self
    }

    pub fn respect_prefix(mut self, respect: bool) -> Self {
        self.respect_prefix = respect;
        self
    }

    pub fn respect_important(mut self, respect: bool) -> Self {
        self.respect_important = respect;
        self
    }
}

impl From<VariantList> for AddOptions {
    fn from(variants: VariantList) -> Self {
        Self::new().variants(variants)
    }
}

/// `None` (typically an unconfigured [`PluginApi::variants`] key) means the
/// variants were omitted.
impl From<Option<VariantList>> for AddOptions {
    fn from(variants: Option<VariantList>) -> Self {
        Self {
            variants,
            ..Self::default()
        }
    }
}

impl<S: Into<String>> From<Vec<S>> for AddOptions {
    fn from(names: Vec<S>) -> Self {
        Self::new().variants(names)
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for AddOptions {
    fn from(names: [S; N]) -> Self {
        Self::new().variants(names)
    }
}

/// Everything a plugin handler can do during one build.
///
/// The API borrows the build's resolved [`Config`] and its [`Output`]
/// buckets; every `add_*` call appends exactly one [`RuleGroup`] to the
/// matching bucket.
pub struct PluginApi<'a> {
    config: &'a Config,
    output: &'a mut Output,
}

impl<'a> PluginApi<'a> {
    pub(crate) fn new(config: &'a Config, output: &'a mut Output) -> Self {
        Self { config, output }
    }

    /// Adds base styles. Base styles are never prefixed, made important or
    /// given variants.
    pub fn add_base(&mut self, styles: impl Into<StyleInput>) {
        let nodes = compile(&styles.into(), "");
        self.output
            .bucket_mut(Layer::Base)
            .push(RuleGroup::new(nodes, VariantList::new()));
    }

    pub fn add_components(&mut self, styles: impl Into<StyleInput>) {
        self.add_layered(Layer::Components, styles.into(), AddOptions::default());
    }

    /// Adds components with explicit variants or options. Components are
    /// never affected by the `important` setting.
    pub fn add_components_with(
        &mut self,
        styles: impl Into<StyleInput>,
        options: impl Into<AddOptions>,
    ) {
        self.add_layered(Layer::Components, styles.into(), options.into());
    }

    pub fn add_utilities(&mut self, styles: impl Into<StyleInput>) {
        self.add_layered(Layer::Utilities, styles.into(), AddOptions::default());
    }

    pub fn add_utilities_with(
        &mut self,
        styles: impl Into<StyleInput>,
        options: impl Into<AddOptions>,
    ) {
        self.add_layered(Layer::Utilities, styles.into(), options.into());
    }

    fn add_layered(&mut self, layer: Layer, styles: StyleInput, options: AddOptions) {
        let mut nodes = compile(&styles, "");
        apply_prefix(&mut nodes, self.config.prefix(), options.respect_prefix);
        if layer == Layer::Utilities {
            apply_important(&mut nodes, &self.config.important(), options.respect_important);
        }
        let variants = options
            .variants
            .or_else(|| self.config.global_variants())
            .unwrap_or_default();
        self.output.bucket_mut(layer).push(wrap(nodes, variants));
    }

    /// Reads a normalized design token from the theme.
    pub fn theme(&self, path: &str) -> Option<Value> {
        self.config.theme(path)
    }

    pub fn theme_or(&self, path: &str, fallback: Value) -> Value {
        self.config.theme_or(path, fallback)
    }

    /// Reads any value from the resolved config.
    pub fn config(&self, path: &str) -> Option<Value> {
        self.config.get(path).cloned()
    }

    pub fn config_or(&self, path: &str, fallback: Value) -> Value {
        self.config.lookup_or(path, fallback)
    }

    /// The resolved variants for a plugin key.
    ///
    /// A global flat list wins over per-key entries; `None` when neither is
    /// configured. The result can be passed straight to the `add_*_with`
    /// calls.
    pub fn variants(&self, key: &str) -> Option<VariantList> {
        self.config.variants_for(key)
    }

    pub fn variants_or(&self, key: &str, fallback: impl Into<VariantList>) -> VariantList {
        self.variants(key).unwrap_or_else(|| fallback.into())
    }

    /// Whether the named built-in plugin is enabled.
    pub fn core_plugins(&self, name: &str) -> bool {
        self.config.core_plugin_enabled(name)
    }

    /// Applies the configured prefix to every class in `selector`.
    ///
    /// Pair with `respect_prefix(false)` so the rule is not prefixed twice.
    pub fn prefix(&self, selector: &str) -> String {
        prefix_selector(self.config.prefix(), selector)
    }

    /// Escapes a string for use as a class name.
    pub fn e(&self, token: &str) -> String {
        escape(token)
    }
}
