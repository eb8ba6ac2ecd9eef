//! JWT configuration loaded from the environment.

use core_config::{ConfigError, FromEnv, env_required};

/// Default token lifetime: one day.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 86_400;

/// JWT authentication configuration.
///
/// Loaded from environment variables:
/// - `JWT_SECRET` (required) - Must be at least 32 characters
/// - `JWT_TTL_SECS` (optional, default: 86400)
///
/// # Example
///
/// ```ignore
/// use axum_helpers::JwtConfig;
/// use core_config::FromEnv;
///
/// let config = JwtConfig::from_env()?;
///
/// // Manual construction (for testing)
/// let config = JwtConfig::new("my-super-secret-key-that-is-at-least-32-chars");
/// ```
#[derive(Clone, Debug)]
pub struct JwtConfig {
    /// JWT signing secret (minimum 32 characters)
    pub secret: String,
    /// Token lifetime in seconds
    pub ttl_secs: i64,
}

impl JwtConfig {
    /// Create a new JwtConfig with the given secret and the default TTL.
    ///
    /// # Panics
    /// Panics if the secret is less than 32 characters.
    pub fn new(secret: impl Into<String>) -> Self {
        let secret = secret.into();
        assert!(
            secret.len() >= 32,
            "JWT secret must be at least 32 characters"
        );
        Self {
            secret,
            ttl_secs: DEFAULT_TOKEN_TTL_SECS,
        }
    }

    pub fn with_ttl(mut self, ttl_secs: i64) -> Self {
        self.ttl_secs = ttl_secs;
        self
    }
}

impl FromEnv for JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let secret = env_required("JWT_SECRET")?;

        if secret.len() < 32 {
            return Err(ConfigError::ParseError {
                key: "JWT_SECRET".to_string(),
                details: format!(
                    "must be at least 32 characters for security (got {}). Generate one with: openssl rand -base64 32",
                    secret.len()
                ),
            });
        }

        let ttl_secs = std::env::var("JWT_TTL_SECS")
            .unwrap_or_else(|_| DEFAULT_TOKEN_TTL_SECS.to_string())
            .parse()
            .map_err(|e| ConfigError::ParseError {
                key: "JWT_TTL_SECS".to_string(),
                details: format!("{}", e),
            })?;

        Ok(Self { secret, ttl_secs })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_new_valid() {
        let secret = "this-is-a-valid-secret-with-32-chars!";
        let config = JwtConfig::new(secret);
        assert_eq!(config.secret, secret);
        assert_eq!(config.ttl_secs, DEFAULT_TOKEN_TTL_SECS);
    }

    #[test]
    #[should_panic(expected = "JWT secret must be at least 32 characters")]
    fn test_jwt_config_new_too_short() {
        JwtConfig::new("short");
    }

    #[test]
    fn test_jwt_config_from_env_valid() {
        temp_env::with_vars(
            [
                ("JWT_SECRET", Some("this-is-a-valid-secret-with-32-chars!")),
                ("JWT_TTL_SECS", Some("3600")),
            ],
            || {
                let config = JwtConfig::from_env().unwrap();
                assert_eq!(config.secret, "this-is-a-valid-secret-with-32-chars!");
                assert_eq!(config.ttl_secs, 3600);
            },
        );
    }

    #[test]
    fn test_jwt_config_from_env_missing() {
        temp_env::with_var_unset("JWT_SECRET", || {
            let config = JwtConfig::from_env();
            assert!(config.is_err());
            assert!(config.unwrap_err().to_string().contains("JWT_SECRET"));
        });
    }

    #[test]
    fn test_jwt_config_from_env_too_short() {
        temp_env::with_var("JWT_SECRET", Some("short"), || {
            let config = JwtConfig::from_env();
            assert!(config.is_err());
            assert!(config.unwrap_err().to_string().contains("32 characters"));
        });
    }
}
