//! Configuration management
//!
//! Loads configuration from:
//! 1. Default values
//! 2. Configuration file (config/local.toml)
//! 3. Environment variables (override)

use serde::Deserialize;
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub pagination: PaginationConfig,
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0")
    pub host: String,
    /// Port number (e.g., 8080)
    pub port: u16,
}

/// Database configuration (SQLite only)
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to SQLite database file
    pub path: PathBuf,
}

/// Authentication configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Token signing secret (32+ bytes)
    pub token_secret: String,
    /// Token lifetime in seconds (default: 86400 = 1 day)
    pub token_max_age: i64,
}

/// Page sizes per endpoint.
///
/// These are product constants, not structural requirements; each
/// endpoint applies its size consistently so offset pagination stays
/// stable across pages.
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationConfig {
    /// Home timeline page size (default: 15)
    pub home_page_size: u32,
    /// Author timeline page size (default: 5)
    pub author_page_size: u32,
    /// Search results page size (default: 10)
    pub search_page_size: u32,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    pub level: String,
    /// Log format: "pretty" or "json"
    pub format: String,
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// # Loading Order
    /// 1. Default values
    /// 2. config/default.toml (if exists)
    /// 3. config/local.toml (if exists)
    /// 4. Environment variables (CHIRP__*)
    ///
    /// # Errors
    /// Returns error if configuration is invalid
    pub fn load() -> Result<Self, crate::error::AppError> {
        use config::{Config, Environment, File};

        let config = Config::builder()
            // Start with default values
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("database.path", "data/chirp.db")?
            .set_default("auth.token_max_age", 86400)?
            .set_default("pagination.home_page_size", 15)?
            .set_default("pagination.author_page_size", 5)?
            .set_default("pagination.search_page_size", 10)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?
            // Load from config/default.toml if it exists
            .add_source(File::with_name("config/default").required(false))
            // Load from config/local.toml if it exists (overrides default)
            .add_source(File::with_name("config/local").required(false))
            // Load from environment variables (CHIRP__*)
            .add_source(
                Environment::with_prefix("CHIRP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| crate::error::AppError::Config(e.to_string()))?;

        let app_config: Self = config
            .try_deserialize()
            .map_err(|e| crate::error::AppError::Config(e.to_string()))?;
        app_config.validate()?;
        Ok(app_config)
    }

    fn validate(&self) -> Result<(), crate::error::AppError> {
        const MIN_TOKEN_SECRET_BYTES: usize = 32;

        if self.auth.token_secret.as_bytes().len() < MIN_TOKEN_SECRET_BYTES {
            return Err(crate::error::AppError::Config(format!(
                "auth.token_secret must be at least {} bytes",
                MIN_TOKEN_SECRET_BYTES
            )));
        }

        if self.auth.token_max_age <= 0 {
            return Err(crate::error::AppError::Config(
                "auth.token_max_age must be greater than 0".to_string(),
            ));
        }

        for (name, value) in [
            ("pagination.home_page_size", self.pagination.home_page_size),
            (
                "pagination.author_page_size",
                self.pagination.author_page_size,
            ),
            (
                "pagination.search_page_size",
                self.pagination.search_page_size,
            ),
        ] {
            if value == 0 {
                return Err(crate::error::AppError::Config(format!(
                    "{} must be greater than 0",
                    name
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> AppConfig {
        AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                path: PathBuf::from("/tmp/chirp-test.db"),
            },
            auth: AuthConfig {
                token_secret: "x".repeat(32),
                token_max_age: 86_400,
            },
            pagination: PaginationConfig {
                home_page_size: 15,
                author_page_size: 5,
                search_page_size: 10,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "pretty".to_string(),
            },
        }
    }

    #[test]
    fn validate_accepts_defaults() {
        let config = valid_config();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_short_token_secret() {
        let mut config = valid_config();
        config.auth.token_secret = "short-secret".to_string();

        let error = config
            .validate()
            .expect_err("token secret shorter than 32 bytes must fail");
        assert!(matches!(
            error,
            crate::error::AppError::Config(message)
                if message.contains("auth.token_secret")
        ));
    }

    #[test]
    fn validate_rejects_zero_page_size() {
        let mut config = valid_config();
        config.pagination.author_page_size = 0;

        let error = config
            .validate()
            .expect_err("zero page size must fail validation");
        assert!(matches!(
            error,
            crate::error::AppError::Config(message)
                if message.contains("pagination.author_page_size")
        ));
    }
}
