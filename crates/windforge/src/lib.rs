//! # Windforge
//!
//! Plugin-driven generation of utility CSS rules.
//!
//! Plugins describe styles as nested JSON-like objects. Windforge compiles
//! them into flat rule trees, applies the configured class prefix and
//! `important` setting, and sorts the results into three layers (`base`,
//! `components`, `utilities`). Every group of rules carries the list of
//! variants (`responsive`, `hover`, ...) a later expansion stage should
//! generate for it.
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_json::json;
//! use windforge::{run, Plugin};
//!
//! let plugins = [Plugin::function(|api| {
//!     api.add_utilities_with(
//!         json!({
//!             ".object-fill": {"objectFit": "fill"},
//!             ".object-cover": {"objectFit": "cover"}
//!         }),
//!         ["responsive", "hover"],
//!     );
//!     api.add_components(json!({
//!         ".btn": {"padding": ".5rem 1rem", "&:hover": {"opacity": 0.8}}
//!     }));
//! })];
//!
//! let output = run(&plugins, &json!({"prefix": "tw-"})).unwrap();
//! let css = output.to_css();
//! assert!(css.contains("@layer utilities {"));
//! assert!(css.contains("@variants responsive, hover {"));
//! assert!(css.contains(".tw-object-fill {"));
//! assert!(css.contains(".tw-btn:hover {"));
//! ```
//!
//! ## Configuration
//!
//! A build's config is layered: built-in defaults, then each plugin's own
//! config fragment, then the user's config. See [`config`] for the merge
//! rules and the accepted keys, and [`Config`] for lookups.
//!
//! ## Modules
//!
//! - [`plugin`]: registrations, [`PluginApi`], [`run`] and [`build`]
//! - [`style`]: style-object compilation and selector rewriting
//! - [`config`]: layered configuration
//! - [`variants`]: [`VariantList`] and the variant wrapper
//! - [`layer`]: output buckets
//! - [`node`]: rule and declaration primitives
//! - [`core_plugins`]: the built-in plugins

pub mod config;
pub mod core_plugins;
pub mod error;
pub mod layer;
pub mod node;
pub mod plugin;
pub mod style;
pub mod variants;

pub use config::{Config, Important};
pub use error::{Error, Result};
pub use layer::{Layer, LayerBucket, Output, RuleGroup};
pub use node::{Declaration, RuleNode};
pub use plugin::{
    build, create_plugin, resolve_config, run, run_with_config, with_options, AddOptions,
    Handler, Plugin, PluginApi, PluginWithOptions,
};
pub use style::StyleInput;
pub use variants::VariantList;
