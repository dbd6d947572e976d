//! Parameter sources: where configuration values come from.

use std::collections::HashMap;
use std::env;

use tracing::debug;

use crate::{ParamError, ParamResult};

/// A key/value parameter source with per-call defaults.
///
/// Typed getters fall back to the given default when the key is absent.
/// A value that is present but unparseable is an error, not a silent default.
pub trait ParamSource {
    /// Raw string value for `key`, if the source has one.
    fn get_raw(&self, key: &str) -> Option<String>;

    /// String value for `key`, or `default` when unset.
    fn get_str(&self, key: &str, default: &str) -> String {
        let value = self
            .get_raw(key)
            .unwrap_or_else(|| default.to_string());
        debug!("Resolved parameter {} to '{}' (default '{}')", key, value, default);
        value
    }

    /// Integer value for `key`, or `default` when unset.
    fn get_int(&self, key: &str, default: i64) -> ParamResult<i64> {
        let value = match self.get_raw(key) {
            Some(raw) => raw.trim().parse().map_err(|e| ParamError::Parse {
                key: key.to_string(),
                details: format!("{}", e),
            })?,
            None => default,
        };
        debug!("Resolved parameter {} to {} (default {})", key, value, default);
        Ok(value)
    }

    /// Boolean value for `key`, or `default` when unset.
    ///
    /// Accepts `true`/`false`/`1`/`0`, case-insensitive.
    fn get_bool(&self, key: &str, default: bool) -> ParamResult<bool> {
        let value = match self.get_raw(key) {
            Some(raw) => parse_bool(key, raw.trim())?,
            None => default,
        };
        debug!("Resolved parameter {} to {} (default {})", key, value, default);
        Ok(value)
    }
}

fn parse_bool(key: &str, raw: &str) -> ParamResult<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(ParamError::Parse {
            key: key.to_string(),
            details: format!("'{}' is not a boolean", other),
        }),
    }
}

/// Parameter source backed by process environment variables.
///
/// Keys are upper-cased before lookup, so the parameter `warehouse_host`
/// reads the `WAREHOUSE_HOST` environment variable.
#[derive(Clone, Debug, Default)]
pub struct EnvParams;

impl EnvParams {
    pub fn new() -> Self {
        Self
    }
}

impl ParamSource for EnvParams {
    fn get_raw(&self, key: &str) -> Option<String> {
        env::var(key.to_ascii_uppercase()).ok()
    }
}

/// In-memory parameter source for tests and embedding.
///
/// # Example
/// ```
/// use core_params::{ParamSource, StaticParams};
///
/// let params = StaticParams::new()
///     .set("warehouse_host", "db.example.org")
///     .set("warehouse_port", "27018");
///
/// assert_eq!(params.get_str("warehouse_host", "localhost"), "db.example.org");
/// assert_eq!(params.get_int("warehouse_port", 27017).unwrap(), 27018);
/// ```
#[derive(Clone, Debug, Default)]
pub struct StaticParams {
    values: HashMap<String, String>,
}

impl StaticParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter value, builder style.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl ParamSource for StaticParams {
    fn get_raw(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}
