//! Plugin registrations, the capability surface, and the runner.
//!
//! A plugin is a handler closure that receives a [`PluginApi`] and calls its
//! `add_*` methods; optionally it carries a config fragment that is merged
//! into the build's config before any handler runs.

mod api;
mod factory;
mod registration;
mod runner;

pub use api::{AddOptions, PluginApi};
pub use factory::{create_plugin, with_options, PluginWithOptions};
pub use registration::{Handler, Plugin};
pub use runner::{build, resolve_config, run, run_with_config};
