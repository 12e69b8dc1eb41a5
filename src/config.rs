use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
        }
    }
}

fn default_database_url() -> String {
    "sqlite:habitloop.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Loads configuration from an optional TOML file layered under
    /// `HABITLOOP__`-prefixed environment variables. Everything has a
    /// default, so a missing file is fine.
    pub fn load(path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder =
            ConfigBuilder::builder().add_source(File::with_name("config/default").required(false));

        if let Some(path) = path {
            builder = builder.add_source(File::with_name(&path));
        }

        builder
            .add_source(Environment::with_prefix("HABITLOOP").separator("__"))
            .build()?
            .try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.database.url.is_empty() {
            return Err("database.url must not be empty".to_string());
        }

        if self.database.max_connections == 0 {
            return Err("database.max_connections must be at least 1".to_string());
        }

        Ok(())
    }
}
