//! Configuration module for Quillpost.

use serde::Deserialize;
use std::path::Path;

use crate::auth::WorkFactor;
use crate::{BlogError, Result};

/// Environment variable overriding `auth.jwt_secret`.
pub const ENV_JWT_SECRET: &str = "QUILLPOST_JWT_SECRET";

/// Environment variable overriding `database.path`.
pub const ENV_DB_PATH: &str = "QUILLPOST_DB_PATH";

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// CORS allowed origins. Empty means any origin without credentials.
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origins() -> Vec<String> {
    vec!["http://localhost:5173".to_string()]
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
    /// Create the demo accounts when the users table is empty.
    #[serde(default)]
    pub seed_demo_users: bool,
}

fn default_db_path() -> String {
    "data/quillpost.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            seed_demo_users: false,
        }
    }
}

/// Authentication configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Session token signing secret (must be set).
    #[serde(default)]
    pub jwt_secret: String,
    /// Argon2 memory cost in KiB.
    #[serde(default = "default_hash_memory")]
    pub hash_memory_kib: u32,
    /// Argon2 iterations.
    #[serde(default = "default_hash_iterations")]
    pub hash_iterations: u32,
    /// Argon2 lanes.
    #[serde(default = "default_hash_parallelism")]
    pub hash_parallelism: u32,
}

fn default_hash_memory() -> u32 {
    WorkFactor::DEFAULT.memory_kib
}

fn default_hash_iterations() -> u32 {
    WorkFactor::DEFAULT.iterations
}

fn default_hash_parallelism() -> u32 {
    WorkFactor::DEFAULT.parallelism
}

impl AuthConfig {
    /// Password hashing work factor described by this section.
    pub fn work_factor(&self) -> WorkFactor {
        WorkFactor {
            memory_kib: self.hash_memory_kib,
            iterations: self.hash_iterations,
            parallelism: self.hash_parallelism,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            hash_memory_kib: default_hash_memory(),
            hash_iterations: default_hash_iterations(),
            hash_parallelism: default_hash_parallelism(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log file path.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/quillpost.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Authentication configuration.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(BlogError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| BlogError::Validation(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `QUILLPOST_JWT_SECRET`: signing secret for session tokens
    /// - `QUILLPOST_DB_PATH`: SQLite database file
    ///
    /// Empty values are ignored.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(secret) = std::env::var(ENV_JWT_SECRET) {
            if !secret.is_empty() {
                self.auth.jwt_secret = secret;
            }
        }
        if let Ok(path) = std::env::var(ENV_DB_PATH) {
            if !path.is_empty() {
                self.database.path = path;
            }
        }
    }

    /// Validate the configuration.
    ///
    /// Returns an error if:
    /// - the session signing secret is not set
    /// - the password work factor is rejected by Argon2
    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_secret.is_empty() {
            return Err(BlogError::Validation(format!(
                "jwt_secret is not set. Set it in config.toml or via the {ENV_JWT_SECRET} environment variable."
            )));
        }
        self.auth
            .work_factor()
            .params()
            .map_err(|e| BlogError::Validation(format!("invalid password work factor: {e}")))?;
        Ok(())
    }
}
