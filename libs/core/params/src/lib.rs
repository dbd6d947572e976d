//! Parameter-store abstraction shared by the warehouse crates.
//!
//! A [`ParamSource`] hands out configuration values by key with a per-call
//! default, the way a robot middleware parameter server does. Two sources are
//! provided: [`EnvParams`] (process environment) and [`StaticParams`]
//! (in-memory map, useful for tests and embedding).

pub mod source;
pub mod tracing;

use std::env;
use thiserror::Error;

pub use source::{EnvParams, ParamSource, StaticParams};

/// Parameter lookup error type
#[derive(Error, Debug)]
pub enum ParamError {
    #[error("Failed to parse parameter '{key}': {details}")]
    Parse { key: String, details: String },
}

/// Result type alias for parameter lookups
pub type ParamResult<T> = Result<T, ParamError>;

/// Application environment (dev = local, prod = deployed)
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn from_env() -> Self {
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        if app_env.eq_ignore_ascii_case("production") {
            Environment::Production
        } else {
            Environment::Development
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_defaults_to_development() {
        temp_env::with_var_unset("APP_ENV", || {
            let env = Environment::from_env();
            assert_eq!(env, Environment::Development);
            assert!(env.is_development());
            assert!(!env.is_production());
        });
    }

    #[test]
    fn test_environment_production() {
        temp_env::with_var("APP_ENV", Some("production"), || {
            let env = Environment::from_env();
            assert_eq!(env, Environment::Production);
            assert!(env.is_production());
            assert!(!env.is_development());
        });
    }

    #[test]
    fn test_environment_production_case_insensitive() {
        temp_env::with_var("APP_ENV", Some("PRODUCTION"), || {
            let env = Environment::from_env();
            assert_eq!(env, Environment::Production);
        });
    }

    #[test]
    fn test_environment_unknown_defaults_to_development() {
        temp_env::with_var("APP_ENV", Some("staging"), || {
            let env = Environment::from_env();
            assert_eq!(env, Environment::Development);
        });
    }
}
