//! Helpers for reading typed settings from environment-style lookups.

use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be set")]
    Missing { var: &'static str },

    #[error("{var} has invalid value {value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Parse `var` from `lookup`, falling back to `default` when unset.
///
/// `lookup` is usually `|k| std::env::var(k).ok()`; tests pass a map.
pub fn parse_or<T, F>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            value: raw.clone(),
            reason: e.to_string(),
        }),
    }
}

pub fn required<F>(lookup: &F, var: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(var).ok_or(ConfigError::Missing { var })
}
