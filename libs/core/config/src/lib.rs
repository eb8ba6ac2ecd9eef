pub mod server;
pub mod tracing;

use std::env;
use thiserror::Error;

/// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable '{0}' is required but not set")]
    MissingEnvVar(String),

    #[error("Failed to parse environment variable '{key}': {details}")]
    ParseError { key: String, details: String },
}

/// Application environment
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

/// Static name/version pair for health endpoints and server logs
#[derive(Clone, Debug)]
pub struct AppInfo {
    pub name: &'static str,
    pub version: &'static str,
}

/// Capture the calling crate's name and version as an [`AppInfo`]
#[macro_export]
macro_rules! app_info {
    () => {
        $crate::AppInfo {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        }
    };
}

/// Trait for configuration that can be loaded from environment variables
pub trait FromEnv: Sized {
    fn from_env() -> Result<Self, ConfigError>;
}

/// Helper to load an environment variable with a default value
pub fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Helper to load a required environment variable or return an error
pub fn env_required(key: &str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
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
        });
    }

    #[test]
    fn test_environment_production_case_insensitive() {
        temp_env::with_var("APP_ENV", Some("PRODUCTION"), || {
            assert_eq!(Environment::from_env(), Environment::Production);
        });

        temp_env::with_var("APP_ENV", Some("Production"), || {
            assert_eq!(Environment::from_env(), Environment::Production);
        });
    }

    #[test]
    fn test_environment_unknown_defaults_to_development() {
        temp_env::with_var("APP_ENV", Some("staging"), || {
            assert_eq!(Environment::from_env(), Environment::Development);
        });
    }

    #[test]
    fn test_env_or_default_with_value() {
        temp_env::with_var("TEST_VAR", Some("test_value"), || {
            assert_eq!(env_or_default("TEST_VAR", "default"), "test_value");
        });
    }

    #[test]
    fn test_env_or_default_without_value() {
        temp_env::with_var_unset("MISSING_VAR", || {
            assert_eq!(env_or_default("MISSING_VAR", "fallback"), "fallback");
        });
    }

    #[test]
    fn test_env_required_missing() {
        temp_env::with_var_unset("MISSING_REQUIRED", || {
            let err = env_required("MISSING_REQUIRED").unwrap_err();
            assert!(err.to_string().contains("MISSING_REQUIRED"));
            assert!(err.to_string().contains("required"));
        });
    }

    #[test]
    fn test_app_info_macro() {
        let info = app_info!();
        assert_eq!(info.name, "core_config");
        assert!(!info.version.is_empty());
    }
}
