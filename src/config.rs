//! Application configuration
//!
//! Read from `~/.config/autoservice/config.toml` (or the path in
//! `AUTOSERVICE_CONFIG`). Every section and key is optional; anything
//! missing falls back to the defaults below.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::infrastructure::crypto;
use crate::infrastructure::database::{
    DatabaseConfig, DefaultAccounts, SeedAccount, DEFAULT_DATABASE_URL,
};

pub const CONFIG_PATH_ENV: &str = "AUTOSERVICE_CONFIG";
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid config value: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSection,
    pub security: SecurityConfig,
    pub seed: SeedConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Seconds to wait for in-flight requests on shutdown
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            shutdown_timeout: 30,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    pub session_ttl_hours: i64,
    pub bcrypt_cost: u32,
    pub reset_token_ttl_hours: i64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            session_ttl_hours: 24,
            bcrypt_cost: bcrypt::DEFAULT_COST,
            reset_token_ttl_hours: 24,
        }
    }
}

/// Credentials of the two accounts created on an empty database.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    pub admin_username: String,
    pub admin_email: String,
    pub admin_password: String,
    pub user_username: String,
    pub user_email: String,
    pub user_password: String,
}

impl Default for SeedConfig {
    fn default() -> Self {
        let accounts = DefaultAccounts::default();
        Self {
            admin_username: accounts.admin.username,
            admin_email: accounts.admin.email,
            admin_password: accounts.admin.password,
            user_username: accounts.user.username,
            user_email: accounts.user.email,
            user_password: accounts.user.password,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive, used when `RUST_LOG` is unset
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// `$XDG_CONFIG_HOME/autoservice/config.toml`, or `./config.toml` when the
/// platform has no config directory.
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .map(|dir| dir.join("autoservice").join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("config.toml"))
}

/// Path from `AUTOSERVICE_CONFIG`, else the default.
pub fn resolve_config_path() -> PathBuf {
    std::env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path)
}

impl AppConfig {
    /// Reads the file at `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = match std::fs::read_to_string(path) {
            Ok(raw) => Self::from_toml(&raw).map_err(|source| match source {
                ConfigError::Parse { source, .. } => ConfigError::Parse {
                    path: path.to_path_buf(),
                    source,
                },
                other => other,
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        if let Ok(url) = std::env::var(DATABASE_URL_ENV) {
            if !url.trim().is_empty() {
                config.database.url = url;
            }
        }
        Ok(config)
    }

    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw).map_err(|source| ConfigError::Parse {
            path: PathBuf::new(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.security.session_ttl_hours <= 0 {
            return Err(ConfigError::Invalid(
                "security.session_ttl_hours must be positive".into(),
            ));
        }
        if self.security.reset_token_ttl_hours <= 0 {
            return Err(ConfigError::Invalid(
                "security.reset_token_ttl_hours must be positive".into(),
            ));
        }
        if !(crypto::MIN_COST..=crypto::MAX_COST).contains(&self.security.bcrypt_cost) {
            return Err(ConfigError::Invalid(format!(
                "security.bcrypt_cost must be between {} and {}",
                crypto::MIN_COST,
                crypto::MAX_COST
            )));
        }
        Ok(())
    }

    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.database.url.clone(),
            max_connections: self.database.max_connections.max(1),
        }
    }

    pub fn default_accounts(&self) -> DefaultAccounts {
        let defaults = DefaultAccounts::default();
        DefaultAccounts {
            admin: SeedAccount {
                username: self.seed.admin_username.clone(),
                email: self.seed.admin_email.clone(),
                password: self.seed.admin_password.clone(),
                full_name: defaults.admin.full_name,
            },
            user: SeedAccount {
                username: self.seed.user_username.clone(),
                email: self.seed.user_email.clone(),
                password: self.seed.user_password.clone(),
                full_name: defaults.user.full_name,
            },
        }
    }

    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(self.security.session_ttl_hours)
    }

    pub fn reset_token_ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(self.security.reset_token_ttl_hours)
    }
}
