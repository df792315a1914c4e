//! # nimbus-config
//!
//! Typed application configuration loaded from environment variables, with
//! optional `.env` files.
//!
//! ```rust
//! use nimbus_config::{AppConfig, ConfigModule};
//!
//! # fn main() -> Result<(), nimbus_config::ConfigError> {
//! std::env::set_var("NIMBUS_PORT", "8080");
//!
//! let config = ConfigModule::<AppConfig>::from_env()?;
//! assert_eq!(config.get_ref().port, 8080);
//! # std::env::remove_var("NIMBUS_PORT");
//! # Ok(())
//! # }
//! ```

use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use tracing::debug;

mod app_config;
pub use app_config::AppConfig;

/// Configuration module that handles loading and validation
pub struct ConfigModule<T: Config> {
    config: Arc<T>,
}

impl<T: Config> ConfigModule<T> {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = T::load_from_env()?;
        config.validate()?;
        Ok(Self {
            config: Arc::new(config),
        })
    }

    /// Load a `.env` file into the environment, then read it.
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        dotenv::from_path(&path)?;
        debug!(path = %path.display(), "loaded env file");
        Self::from_env()
    }

    /// Load with environment-specific file
    /// e.g., .env.development, .env.production
    pub fn from_env_file(env: Environment) -> Result<Self, ConfigError> {
        Self::from_file(env.file_name())
    }

    /// Get the configuration instance
    pub fn get(&self) -> T {
        (*self.config).clone()
    }

    /// Get a reference to the configuration
    pub fn get_ref(&self) -> &T {
        &self.config
    }

    pub fn shared(&self) -> Arc<T> {
        self.config.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
    Test,
    Custom(String),
}

impl Environment {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Self::Development,
            "production" | "prod" => Self::Production,
            "test" => Self::Test,
            custom => Self::Custom(custom.to_string()),
        }
    }

    pub fn current() -> Self {
        env::var("APP_ENV")
            .map(|e| Self::parse(&e))
            .unwrap_or(Self::Development)
    }

    pub fn file_name(&self) -> String {
        match self {
            Environment::Development => ".env.development".to_string(),
            Environment::Production => ".env.production".to_string(),
            Environment::Test => ".env.test".to_string(),
            Environment::Custom(name) => format!(".env.{}", name),
        }
    }
}

/// Trait for configuration validation
pub trait Validate {
    fn validate(&self) -> Result<(), ConfigError>;
}

/// Trait for loading configuration from environment
pub trait FromEnv: Sized {
    fn load_from_env() -> Result<Self, ConfigError>;
}

/// Combined trait for configuration types
///
/// Implemented for any type that implements both `FromEnv` and `Validate`.
pub trait Config: FromEnv + Validate + Clone + Send + Sync + 'static {}

impl<T> Config for T where T: FromEnv + Validate + Clone + Send + Sync + 'static {}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Environment variable '{0}' not found")]
    MissingEnvVar(String),

    #[error("Failed to parse environment variable '{key}': {message}")]
    ParseError { key: String, message: String },

    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("Failed to load .env file: {0}")]
    DotenvError(#[from] dotenv::Error),
}

/// Read `key`, falling back to `default` when it is unset.
pub fn env_or<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse::<T>().map_err(|e| ConfigError::ParseError {
            key: key.to_string(),
            message: e.to_string(),
        }),
        Err(env::VarError::NotPresent) => Ok(default),
        Err(env::VarError::NotUnicode(_)) => Err(ConfigError::ParseError {
            key: key.to_string(),
            message: "value is not valid unicode".to_string(),
        }),
    }
}

/// Read a variable that has no default.
pub fn env_required<T>(key: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    let raw = env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))?;
    raw.trim().parse::<T>().map_err(|e| ConfigError::ParseError {
        key: key.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_parse() {
        assert_eq!(Environment::parse("PROD"), Environment::Production);
        assert_eq!(Environment::parse("dev"), Environment::Development);
        assert_eq!(Environment::parse("test"), Environment::Test);
        assert_eq!(
            Environment::parse("staging"),
            Environment::Custom("staging".to_string())
        );
    }

    #[test]
    fn test_environment_file_name() {
        assert_eq!(Environment::Production.file_name(), ".env.production");
        assert_eq!(
            Environment::Custom("staging".into()).file_name(),
            ".env.staging"
        );
    }

    #[test]
    fn test_env_or_default_when_unset() {
        let value: u16 = env_or("NIMBUS_CONFIG_TEST_SURELY_UNSET", 42).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_env_required_missing() {
        let err = env_required::<String>("NIMBUS_CONFIG_TEST_REQUIRED_UNSET").unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(key) if key == "NIMBUS_CONFIG_TEST_REQUIRED_UNSET"));
    }
}
