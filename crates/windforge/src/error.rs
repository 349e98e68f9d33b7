//! Engine errors.

use thiserror::Error;

/// Errors raised while resolving configuration or validating plugins.
///
/// Style compilation and selector rewriting never fail; only the inputs
/// that decide the shape of a whole build are validated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A plugin registration carries a config fragment that is not a mapping.
    #[error("plugin registration #{index} is invalid: {reason}")]
    InvalidRegistration { index: usize, reason: String },

    /// A configuration layer is not a mapping.
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// User configuration text could not be parsed.
    #[error("failed to parse {format} configuration: {message}")]
    ConfigParse {
        format: &'static str,
        message: String,
    },
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
