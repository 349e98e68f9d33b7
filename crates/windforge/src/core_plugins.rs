//! Built-in plugins.
//!
//! Each built-in is an ordinary [`Plugin`] keyed by the name used in the
//! `corePlugins` and `variants` config sections.

use serde_json::{json, Map, Value};

use crate::config::{value_to_css_string, Config};
use crate::plugin::{Plugin, PluginApi};

/// Every built-in plugin with its config key, in emission order.
pub fn core_plugins() -> Vec<(&'static str, Plugin)> {
    vec![
        ("justifyItems", Plugin::function(justify_items)),
        ("placeSelf", Plugin::function(place_self)),
        ("opacity", Plugin::function(opacity)),
    ]
}

/// The built-ins enabled by `config`'s `corePlugins` section.
pub fn enabled_core_plugins(config: &Config) -> Vec<Plugin> {
    core_plugins()
        .into_iter()
        .filter(|(name, _)| config.core_plugin_enabled(name))
        .map(|(_, plugin)| plugin)
        .collect()
}

fn keyword_utilities(class_prefix: &str, property: &str, keywords: &[&str]) -> Map<String, Value> {
    keywords
        .iter()
        .map(|keyword| {
            (
                format!(".{}-{}", class_prefix, keyword),
                json!({ property: keyword }),
            )
        })
        .collect()
}

fn justify_items(api: &mut PluginApi<'_>) {
    let utilities = keyword_utilities(
        "justify-items",
        "justify-items",
        &["auto", "start", "end", "center", "stretch"],
    );
    let variants = api.variants("justifyItems");
    api.add_utilities_with(utilities, variants);
}

fn place_self(api: &mut PluginApi<'_>) {
    let utilities = keyword_utilities(
        "place-self",
        "place-self",
        &["auto", "start", "end", "center", "stretch"],
    );
    let variants = api.variants("placeSelf");
    api.add_utilities_with(utilities, variants);
}

fn opacity(api: &mut PluginApi<'_>) {
    let Some(Value::Object(scale)) = api.theme("opacity") else {
        return;
    };
    let utilities: Map<String, Value> = scale
        .iter()
        .map(|(modifier, value)| {
            let class = api.e(&format!("opacity-{}", modifier));
            (
                format!(".{}", class),
                json!({ "opacity": value_to_css_string(value) }),
            )
        })
        .collect();
    let variants = api.variants("opacity");
    api.add_utilities_with(utilities, variants);
}
