//! Helpers for packaging plugins with their own configuration.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::api::PluginApi;
use super::registration::{Handler, Plugin};

/// Pairs a handler with the config fragment it depends on.
///
/// The fragment is merged below the user's config, so plugins can ship
/// theme values and variant defaults that users still override.
pub fn create_plugin<F>(handler: F, config: Value) -> Plugin
where
    F: Fn(&mut PluginApi<'_>) + Send + Sync + 'static,
{
    Plugin::with_config(handler, config)
}

type HandlerBuilder<O> = dyn Fn(&O) -> Handler + Send + Sync;
type ConfigBuilder<O> = dyn Fn(&O) -> Value + Send + Sync;

/// A plugin parameterized by user options.
///
/// Every [`call`](Self::call) builds a fresh registration from its options;
/// nothing is shared between registrations except the builders themselves.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use windforge::{run, with_options, Handler};
///
/// #[derive(Default)]
/// struct Options {
///     class_name: Option<String>,
/// }
///
/// let plugin = with_options(|options: &Options| {
///     let class = options.class_name.clone().unwrap_or_else(|| "banana".into());
///     Handler::new(move |api| {
///         api.add_components(json!({ (format!(".{}", class)): {"position": "absolute"} }));
///     })
/// });
///
/// let apple = plugin.call(Options { class_name: Some("apple".into()) });
/// let output = run(&[plugin.registration(), apple], &json!({})).unwrap();
/// let selectors: Vec<_> = output
///     .components
///     .iter()
///     .map(|group| group.nodes[0].selector.as_str())
///     .collect();
/// assert_eq!(selectors, [".banana", ".apple"]);
/// ```
pub struct PluginWithOptions<O> {
    plugin: Arc<HandlerBuilder<O>>,
    config: Option<Arc<ConfigBuilder<O>>>,
}

impl<O> PluginWithOptions<O> {
    pub fn new<B>(plugin: B) -> Self
    where
        B: Fn(&O) -> Handler + Send + Sync + 'static,
    {
        Self {
            plugin: Arc::new(plugin),
            config: None,
        }
    }

    /// Sets the builder for the plugin's config fragment.
    pub fn config<C>(mut self, config: C) -> Self
    where
        C: Fn(&O) -> Value + Send + Sync + 'static,
    {
        self.config = Some(Arc::new(config));
        self
    }

    /// Builds a registration for `options`.
    pub fn call(&self, options: O) -> Plugin {
        let handler = (self.plugin)(&options);
        let config = self.config.as_ref().map(|build| build(&options));
        Plugin::configured(Some(handler), config)
    }
}

impl<O: Default> PluginWithOptions<O> {
    /// Builds a registration with the default options, for users who
    /// register the plugin without configuring it.
    pub fn registration(&self) -> Plugin {
        self.call(O::default())
    }
}

impl<O> Clone for PluginWithOptions<O> {
    fn clone(&self) -> Self {
        Self {
            plugin: Arc::clone(&self.plugin),
            config: self.config.clone(),
        }
    }
}

impl<O> fmt::Debug for PluginWithOptions<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginWithOptions")
            .field("has_config", &self.config.is_some())
            .finish_non_exhaustive()
    }
}

impl<O: Default> From<PluginWithOptions<O>> for Plugin {
    fn from(plugin: PluginWithOptions<O>) -> Self {
        plugin.registration()
    }
}

impl<O: Default> From<&PluginWithOptions<O>> for Plugin {
    fn from(plugin: &PluginWithOptions<O>) -> Self {
        plugin.registration()
    }
}

/// Starts a [`PluginWithOptions`] from a handler builder.
pub fn with_options<O, B>(plugin: B) -> PluginWithOptions<O>
where
    B: Fn(&O) -> Handler + Send + Sync + 'static,
{
    PluginWithOptions::new(plugin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::run;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq)]
    struct Options {
        class_name: String,
    }

    impl Default for Options {
        fn default() -> Self {
            Self {
                class_name: "banana".to_string(),
            }
        }
    }

    fn test_plugin() -> PluginWithOptions<Options> {
        with_options(|options: &Options| {
            let class = options.class_name.clone();
            Handler::new(move |api| {
                let spacing = api.theme("testPlugin").unwrap_or_default();
                let mut utilities = serde_json::Map::new();
                if let Value::Object(sizes) = spacing {
                    for (key, value) in sizes {
                        utilities.insert(
                            format!(".{}-{}", class, key),
                            json!({"testProperty": value}),
                        );
                    }
                }
                let variants = api.variants("testPlugin");
                api.add_utilities_with(utilities, variants);
            })
        })
        .config(|_| {
            json!({
                "theme": {"testPlugin": {"sm": "1rem", "md": "2rem"}},
                "variants": {"testPlugin": ["responsive", "hover"]}
            })
        })
    }

    fn selectors(plugin: Plugin) -> Vec<String> {
        let output = run(&[plugin], &json!({})).unwrap();
        output.utilities.groups()[0]
            .nodes
            .iter()
            .map(|n| n.selector.clone())
            .collect()
    }

    #[test]
    fn test_create_plugin_carries_config() {
        let plugin = create_plugin(|_| {}, json!({"prefix": "x-"}));
        assert!(plugin.handler().is_some());
        assert_eq!(plugin.config(), Some(&json!({"prefix": "x-"})));
    }

    #[test]
    fn test_call_uses_options() {
        let plugin = test_plugin();
        let banana = plugin.call(Options::default());
        let apple = plugin.call(Options {
            class_name: "apple".to_string(),
        });
        assert_eq!(selectors(banana), vec![".banana-sm", ".banana-md"]);
        assert_eq!(selectors(apple), vec![".apple-sm", ".apple-md"]);
    }

    #[test]
    fn test_registration_uses_default_options() {
        let plugin = test_plugin();
        assert_eq!(selectors(Plugin::from(&plugin)), vec![".banana-sm", ".banana-md"]);
    }

    #[test]
    fn test_config_builder_is_optional() {
        let plugin = with_options(|_: &Options| Handler::new(|_| {}));
        assert!(plugin.registration().config().is_none());
    }

    #[test]
    fn test_equal_options_give_equal_output() {
        let plugin = test_plugin();
        let first = run(&[plugin.call(Options::default())], &json!({})).unwrap();
        let second = run(&[plugin.call(Options::default())], &json!({})).unwrap();
        assert_eq!(first, second);
    }
}
