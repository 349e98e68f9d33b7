//! Running plugins against a resolved config.

use serde_json::Value;

use super::api::PluginApi;
use super::registration::{resolve_all, Plugin, ResolvedPlugin};
use crate::config::{default_config, Config};
use crate::core_plugins::enabled_core_plugins;
use crate::error::Result;
use crate::layer::Output;

/// Resolves the config for a build: the defaults, then every plugin's config
/// fragment in registration order, then `user_config`.
///
/// # Errors
///
/// Fails if a registration carries a non-mapping config or `user_config` is
/// neither a mapping nor `null`.
pub fn resolve_config(plugins: &[Plugin], user_config: &Value) -> Result<Config> {
    let resolved = resolve_all(plugins)?;
    config_for(&resolved, user_config)
}

fn config_for(resolved: &[ResolvedPlugin<'_>], user_config: &Value) -> Result<Config> {
    let defaults = default_config();
    let fragments = resolved.iter().filter_map(|plugin| plugin.config);
    Config::resolve(
        std::iter::once(&defaults)
            .chain(fragments)
            .chain(std::iter::once(user_config)),
    )
}

/// Runs `plugins` in registration order and returns the three buckets.
///
/// All registrations are validated before any handler runs, so an invalid
/// registration produces no partial output.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use windforge::{run, Plugin};
///
/// let plugins = [Plugin::function(|api| {
///     api.add_utilities_with(json!({".skew-12deg": {"transform": "skewY(-12deg)"}}), ["hover"]);
/// })];
/// let output = run(&plugins, &json!({"prefix": "tw-"})).unwrap();
///
/// let group = &output.utilities.groups()[0];
/// assert_eq!(group.nodes[0].selector, ".tw-skew-12deg");
/// assert_eq!(group.variants.as_slice(), ["hover"]);
/// ```
pub fn run(plugins: &[Plugin], user_config: &Value) -> Result<Output> {
    let resolved = resolve_all(plugins)?;
    let config = config_for(&resolved, user_config)?;
    Ok(invoke(&resolved, &config))
}

/// Runs `plugins` against an already resolved config.
///
/// Config fragments carried by the registrations are ignored here; they are
/// expected to be part of `config` already (see [`resolve_config`]).
pub fn run_with_config(plugins: &[Plugin], config: &Config) -> Result<Output> {
    let resolved = resolve_all(plugins)?;
    Ok(invoke(&resolved, config))
}

/// Runs the enabled built-in plugins followed by `plugins`.
///
/// Which built-ins run is decided by `corePlugins` in the resolved config.
pub fn build(user_config: &Value, plugins: &[Plugin]) -> Result<Output> {
    let config = resolve_config(plugins, user_config)?;
    let mut all = enabled_core_plugins(&config);
    log::debug!("{} core plugin(s) enabled", all.len());
    all.extend(plugins.iter().cloned());
    run_with_config(&all, &config)
}

fn invoke(plugins: &[ResolvedPlugin<'_>], config: &Config) -> Output {
    log::debug!("running {} plugin(s)", plugins.len());
    let mut output = Output::new();
    for plugin in plugins {
        let Some(handler) = plugin.handler else {
            log::debug!("plugin #{} has no handler, config only", plugin.index);
            continue;
        };
        log::debug!("invoking plugin #{}", plugin.index);
        let mut api = PluginApi::new(config, &mut output);
        handler.call(&mut api);
    }
    log::debug!(
        "plugins produced {} base, {} component and {} utility group(s)",
        output.base.len(),
        output.components.len(),
        output.utilities.len()
    );
    output
}
