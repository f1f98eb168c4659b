//! Environment variable names used to rename the reserved record keys
//! without recompiling.
//!
//! These are helpers; [`LogAdapter`](crate::adapter::LogAdapter) itself
//! never reads the environment.

use crate::keys::{ConfigError, FieldKeys};

/// Key for the severity name, default `level`.
pub const JAYLOG_LEVEL_KEY_ENV: &str = "JAYLOG_LEVEL_KEY";

/// Key for the interpolated message, default `msg`.
pub const JAYLOG_MESSAGE_KEY_ENV: &str = "JAYLOG_MESSAGE_KEY";

/// Key for the call site, default `location`.
pub const JAYLOG_LOCATION_KEY_ENV: &str = "JAYLOG_LOCATION_KEY";

/// Key for the record timestamp, default `ts`.
pub const JAYLOG_TIMESTAMP_KEY_ENV: &str = "JAYLOG_TIMESTAMP_KEY";

/// Key for the tag list, default `tags`.
pub const JAYLOG_TAGS_KEY_ENV: &str = "JAYLOG_TAGS_KEY";

/// Caller field that lists keys to suppress, default `without`.
pub const JAYLOG_WITHOUT_KEY_ENV: &str = "JAYLOG_WITHOUT_KEY";

impl FieldKeys {
    /// Build keys from the `JAYLOG_*_KEY` variables, using the defaults for
    /// unset ones, and validate the result.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = FieldKeys::default();
        let pick = |name: &str, default: String| lookup(name).unwrap_or(default);
        let keys = FieldKeys {
            level: pick(JAYLOG_LEVEL_KEY_ENV, defaults.level),
            message: pick(JAYLOG_MESSAGE_KEY_ENV, defaults.message),
            location: pick(JAYLOG_LOCATION_KEY_ENV, defaults.location),
            timestamp: pick(JAYLOG_TIMESTAMP_KEY_ENV, defaults.timestamp),
            tags: pick(JAYLOG_TAGS_KEY_ENV, defaults.tags),
            without: pick(JAYLOG_WITHOUT_KEY_ENV, defaults.without),
        };
        keys.validate()?;
        Ok(keys)
    }
}
