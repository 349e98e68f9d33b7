//! Plugin registrations.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::api::PluginApi;
use crate::config::value_kind;
use crate::error::{Error, Result};

/// Type-erased plugin body.
///
/// Handlers are shared behind an `Arc`, so cloning a registration never
/// clones the closure and registrations can be reused across builds and
/// threads.
#[derive(Clone)]
pub struct Handler(Arc<dyn Fn(&mut PluginApi<'_>) + Send + Sync>);

impl Handler {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut PluginApi<'_>) + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Runs the handler against `api`.
    pub fn call(&self, api: &mut PluginApi<'_>) {
        (self.0)(api)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Handler(..)")
    }
}

/// A plugin as supplied by the caller.
///
/// Either a bare handler, or a handler and/or a config fragment. A
/// registration with a config fragment but no handler only contributes
/// configuration.
#[derive(Debug, Clone)]
pub enum Plugin {
    Function(Handler),
    Configured {
        handler: Option<Handler>,
        config: Option<Value>,
    },
}

impl Plugin {
    /// Registers a bare handler.
    ///
    /// ```rust
    /// use serde_json::json;
    /// use windforge::Plugin;
    ///
    /// let plugin = Plugin::function(|api| {
    ///     api.add_utilities(json!({".skew-10deg": {"transform": "skewY(-10deg)"}}));
    /// });
    /// assert!(plugin.handler().is_some());
    /// assert!(plugin.config().is_none());
    /// ```
    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&mut PluginApi<'_>) + Send + Sync + 'static,
    {
        Plugin::Function(Handler::new(f))
    }

    pub fn configured(handler: Option<Handler>, config: Option<Value>) -> Self {
        Plugin::Configured { handler, config }
    }

    /// Registers a handler together with its own config fragment.
    pub fn with_config<F>(f: F, config: Value) -> Self
    where
        F: Fn(&mut PluginApi<'_>) + Send + Sync + 'static,
    {
        Self::configured(Some(Handler::new(f)), Some(config))
    }

    /// Registers a config fragment with no handler.
    pub fn config_only(config: Value) -> Self {
        Self::configured(None, Some(config))
    }

    pub fn handler(&self) -> Option<&Handler> {
        match self {
            Plugin::Function(handler) => Some(handler),
            Plugin::Configured { handler, .. } => handler.as_ref(),
        }
    }

    pub fn config(&self) -> Option<&Value> {
        match self {
            Plugin::Function(_) => None,
            Plugin::Configured { config, .. } => config.as_ref(),
        }
    }

    /// Normalizes the registration into one uniform record.
    ///
    /// `index` is the registration's position, used in error messages.
    pub(crate) fn resolve(&self, index: usize) -> Result<ResolvedPlugin<'_>> {
        let config = match self.config() {
            None | Some(Value::Null) => None,
            Some(fragment @ Value::Object(_)) => Some(fragment),
            Some(other) => {
                return Err(Error::InvalidRegistration {
                    index,
                    reason: format!("config must be a mapping, found {}", value_kind(other)),
                })
            }
        };
        Ok(ResolvedPlugin {
            index,
            handler: self.handler(),
            config,
        })
    }
}

impl From<Handler> for Plugin {
    fn from(handler: Handler) -> Self {
        Plugin::Function(handler)
    }
}

/// A validated registration borrowed from the caller's list.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ResolvedPlugin<'a> {
    pub index: usize,
    pub handler: Option<&'a Handler>,
    pub config: Option<&'a Value>,
}

/// Validates every registration up front, so a bad one fails the whole
/// build before any handler runs.
pub(crate) fn resolve_all(plugins: &[Plugin]) -> Result<Vec<ResolvedPlugin<'_>>> {
    plugins
        .iter()
        .enumerate()
        .map(|(index, plugin)| plugin.resolve(index))
        .collect()
}
