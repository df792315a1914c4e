use std::path::PathBuf;

use crate::{ConfigError, FromEnv, Validate, env_or};

pub const HOST_VAR: &str = "NIMBUS_HOST";
pub const PORT_VAR: &str = "NIMBUS_PORT";
pub const TEMPLATES_DIR_VAR: &str = "NIMBUS_TEMPLATES_DIR";
pub const LOG_LEVEL_VAR: &str = "NIMBUS_LOG_LEVEL";

/// Settings for a served nimbus application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Resolved against the working directory; override with `NIMBUS_TEMPLATES_DIR`.
    pub templates_dir: PathBuf,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            templates_dir: PathBuf::from("templates"),
            log_level: "info".to_string(),
        }
    }
}

impl FromEnv for AppConfig {
    fn load_from_env() -> Result<Self, ConfigError> {
        let defaults = AppConfig::default();
        Ok(Self {
            host: env_or(HOST_VAR, defaults.host)?,
            port: env_or(PORT_VAR, defaults.port)?,
            templates_dir: env_or(TEMPLATES_DIR_VAR, defaults.templates_dir)?,
            log_level: env_or(LOG_LEVEL_VAR, defaults.log_level)?,
        })
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::ValidationError("host must not be empty".to_string()));
        }
        if self.port == 0 {
            return Err(ConfigError::ValidationError("port must be between 1 and 65535".to_string()));
        }
        Ok(())
    }
}

impl AppConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
