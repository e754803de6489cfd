//! Configuration loading and management

use crate::core::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Default listing page for invoices
pub const DEFAULT_LISTING_PATH: &str = "/dashboard/invoices";

/// What update and delete do when no row matches the id
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingRowPolicy {
    /// Treat a no-op statement as success
    #[default]
    Ignore,
    /// Report the invoice as not found; no refresh, no redirect
    Report,
}

/// Configuration for the form actions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionsConfig {
    /// Listing page refreshed and redirected to after a mutation
    pub listing_path: String,

    /// Behavior of update/delete on a missing id
    pub missing_row_policy: MissingRowPolicy,

    /// Where a successful sign-in lands
    pub after_login_path: String,
}

impl Default for ActionsConfig {
    fn default() -> Self {
        Self {
            listing_path: DEFAULT_LISTING_PATH.to_string(),
            missing_row_policy: MissingRowPolicy::Ignore,
            after_login_path: "/dashboard".to_string(),
        }
    }
}

impl ActionsConfig {
    pub fn with_listing_path(mut self, path: impl Into<String>) -> Self {
        self.listing_path = path.into();
        self
    }

    pub fn with_missing_row_policy(mut self, policy: MissingRowPolicy) -> Self {
        self.missing_row_policy = policy;
        self
    }

    /// Reject paths the router cannot mount
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("actions.listing_path", &self.listing_path),
            ("actions.after_login_path", &self.after_login_path),
        ] {
            if !value.starts_with('/') {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    value: value.clone(),
                    message: "must be an absolute path starting with '/'".to_string(),
                });
            }
        }

        if self.listing_path.len() > 1 && self.listing_path.ends_with('/') {
            return Err(ConfigError::InvalidValue {
                field: "actions.listing_path".to_string(),
                value: self.listing_path.clone(),
                message: "must not end with '/'".to_string(),
            });
        }

        Ok(())
    }
}

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
        }
    }
}

/// Database settings; without a URL the in-memory store is used
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 5,
            acquire_timeout_secs: 30,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub actions: ActionsConfig,
    pub database: DatabaseConfig,
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Self::parse(&content, Some(path))
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Self::parse(yaml, None)
    }

    fn parse(yaml: &str, file: Option<&str>) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError {
            file: file.map(str::to_string),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `DATABASE_URL` and `BIND_ADDR` from the process environment
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any variable source
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup("DATABASE_URL").filter(|v| !v.is_empty()) {
            self.database.url = Some(url);
        }
        if let Some(addr) = lookup("BIND_ADDR").filter(|v| !v.is_empty()) {
            self.server.bind_addr = addr;
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.actions.validate()?;
        if self.database.max_connections == 0 {
            return Err(ConfigError::InvalidValue {
                field: "database.max_connections".to_string(),
                value: "0".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
