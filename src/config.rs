//! Configuration management
//!
//! Loads listener and storage settings from built-in defaults, an optional
//! config.toml, and FILEDOCK-prefixed environment variables.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// IP address to bind the HTTP listener
    pub bind_address: String,

    /// Port for the HTTP listener
    pub port: u16,

    /// Root directory all file operations are confined to
    pub storage_root: String,
}

impl ServerConfig {
    /// Load configuration, layering config.toml and environment overrides
    /// on top of the built-in defaults.
    ///
    /// The file is optional: with nothing configured the server binds
    /// 127.0.0.1:8080 and confines itself to ./storage.
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .set_default("bind_address", "127.0.0.1")?
            .set_default("port", 8080)?
            .set_default("storage_root", "./storage")?
            .add_source(File::with_name("config").required(false))
            .add_source(Environment::with_prefix("FILEDOCK"))
            .build()?;

        let config: ServerConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::Message("port cannot be 0".into()));
        }

        if self.storage_root.is_empty() {
            return Err(ConfigError::Message("storage_root cannot be empty".into()));
        }

        Ok(())
    }

    /// Get bind address and port as a socket address string
    pub fn listen_socket(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    /// Get the storage root as a path
    pub fn storage_root_path(&self) -> PathBuf {
        PathBuf::from(&self.storage_root)
    }
}
