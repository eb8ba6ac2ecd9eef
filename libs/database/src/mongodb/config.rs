use core_config::{ConfigError, FromEnv};

/// MongoDB connection settings.
///
/// Can be constructed manually or loaded from environment variables.
///
/// # Example
///
/// ```ignore
/// use database::mongodb::MongoConfig;
/// use core_config::FromEnv;
///
/// let config = MongoConfig::with_database("mongodb://localhost:27017", "ticketing");
/// let config = MongoConfig::from_env()?;
/// ```
#[derive(Clone, Debug)]
pub struct MongoConfig {
    /// MongoDB connection URL
    /// Format: mongodb://[username:password@]host[:port][/database][?options]
    pub url: String,

    /// Database name to use
    pub database: String,

    /// Optional application name for server logs
    pub app_name: Option<String>,

    /// Maximum number of connections in the pool
    pub max_pool_size: u32,

    /// Minimum number of connections in the pool
    pub min_pool_size: u32,

    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,

    /// Server selection timeout in seconds
    pub server_selection_timeout_secs: u64,
}

impl MongoConfig {
    /// Create a new MongoConfig with just a URL and the default database
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Create a MongoConfig with a specific database name
    pub fn with_database(url: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            database: database.into(),
            ..Self::default()
        }
    }

    /// Set the application name for server logs
    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn database(&self) -> &str {
        &self.database
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            url: "mongodb://localhost:27017".to_string(),
            database: "default".to_string(),
            app_name: None,
            max_pool_size: 100,
            min_pool_size: 5,
            connect_timeout_secs: 10,
            server_selection_timeout_secs: 30,
        }
    }
}

/// Load MongoConfig from environment variables
///
/// - `MONGODB_URL` or `MONGO_URL` (required)
/// - `MONGODB_DATABASE` or `MONGO_DATABASE` (required)
/// - `MONGODB_APP_NAME` (optional)
/// - `MONGODB_MAX_POOL_SIZE` (optional, default: 100)
/// - `MONGODB_MIN_POOL_SIZE` (optional, default: 5)
/// - `MONGODB_CONNECT_TIMEOUT_SECS` (optional, default: 10)
/// - `MONGODB_SERVER_SELECTION_TIMEOUT_SECS` (optional, default: 30)
impl FromEnv for MongoConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let url = std::env::var("MONGODB_URL")
            .or_else(|_| std::env::var("MONGO_URL"))
            .map_err(|_| ConfigError::MissingEnvVar("MONGODB_URL or MONGO_URL".to_string()))?;

        let database = std::env::var("MONGODB_DATABASE")
            .or_else(|_| std::env::var("MONGO_DATABASE"))
            .map_err(|_| {
                ConfigError::MissingEnvVar("MONGODB_DATABASE or MONGO_DATABASE".to_string())
            })?;

        let app_name = std::env::var("MONGODB_APP_NAME").ok();

        let parse_u32 = |key: &str, default: &str| -> Result<u32, ConfigError> {
            std::env::var(key)
                .unwrap_or_else(|_| default.to_string())
                .parse()
                .map_err(|e| ConfigError::ParseError {
                    key: key.to_string(),
                    details: format!("{}", e),
                })
        };
        let parse_u64 = |key: &str, default: &str| -> Result<u64, ConfigError> {
            std::env::var(key)
                .unwrap_or_else(|_| default.to_string())
                .parse()
                .map_err(|e| ConfigError::ParseError {
                    key: key.to_string(),
                    details: format!("{}", e),
                })
        };

        Ok(Self {
            url,
            database,
            app_name,
            max_pool_size: parse_u32("MONGODB_MAX_POOL_SIZE", "100")?,
            min_pool_size: parse_u32("MONGODB_MIN_POOL_SIZE", "5")?,
            connect_timeout_secs: parse_u64("MONGODB_CONNECT_TIMEOUT_SECS", "10")?,
            server_selection_timeout_secs: parse_u64(
                "MONGODB_SERVER_SELECTION_TIMEOUT_SECS",
                "30",
            )?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mongo_config_new() {
        let config = MongoConfig::new("mongodb://localhost:27017");
        assert_eq!(config.url, "mongodb://localhost:27017");
        assert_eq!(config.database, "default");
        assert_eq!(config.max_pool_size, 100);
    }

    #[test]
    fn test_mongo_config_with_database() {
        let config = MongoConfig::with_database("mongodb://localhost:27017", "ticketing");
        assert_eq!(config.database, "ticketing");
    }

    #[test]
    fn test_mongo_config_with_app_name() {
        let config = MongoConfig::new("mongodb://localhost:27017").with_app_name("ticketing-api");
        assert_eq!(config.app_name, Some("ticketing-api".to_string()));
    }

    #[test]
    fn test_mongo_config_from_env() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", Some("mongodb://localhost:27017")),
                ("MONGODB_DATABASE", Some("testdb")),
            ],
            || {
                let config = MongoConfig::from_env().unwrap();
                assert_eq!(config.url, "mongodb://localhost:27017");
                assert_eq!(config.database, "testdb");
            },
        );
    }

    #[test]
    fn test_mongo_config_from_env_fallback() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", None::<&str>),
                ("MONGO_URL", Some("mongodb://fallback:27017")),
                ("MONGODB_DATABASE", None::<&str>),
                ("MONGO_DATABASE", Some("fallbackdb")),
            ],
            || {
                let config = MongoConfig::from_env().unwrap();
                assert_eq!(config.url, "mongodb://fallback:27017");
                assert_eq!(config.database, "fallbackdb");
            },
        );
    }

    #[test]
    fn test_mongo_config_from_env_missing_url() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", None::<&str>),
                ("MONGO_URL", None::<&str>),
                ("MONGODB_DATABASE", Some("testdb")),
            ],
            || {
                assert!(MongoConfig::from_env().is_err());
            },
        );
    }
}
