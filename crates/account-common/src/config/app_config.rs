//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file if present).

use std::env;
use std::str::FromStr;

use crate::auth::CredentialPolicy;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub storage: StorageConfig,
    pub session: SessionConfig,
    pub security: SecurityConfig,
    pub cors: CorsConfig,
}

/// General application settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub name: String,
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Where user records live
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

/// Record store configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Present whenever `backend` is `Postgres`
    pub database: Option<DatabaseConfig>,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Where sessions live
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionBackend {
    Redis,
    Memory,
}

/// Session configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub backend: SessionBackend,
    /// Present whenever `backend` is `Redis`
    pub redis: Option<RedisConfig>,
    pub timeout_seconds: u64,
    /// Request header carrying the token, besides `Authorization: Bearer`
    pub token_header: String,
}

/// Redis configuration
#[derive(Debug, Clone)]
pub struct RedisConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Credential and access settings
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    pub credential_policy: CredentialPolicy,
    pub elevated_accounts: Vec<String>,
    pub seed_default_accounts: bool,
}

/// CORS configuration
#[derive(Debug, Clone, Default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

// Default value functions
fn default_app_name() -> String {
    "account-service".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_redis_max_connections() -> u32 {
    10
}

const MAX_SESSION_TIMEOUT: u64 = 315_360_000;

fn default_session_timeout() -> u64 {
    2_592_000 // 30 days
}

fn default_token_header() -> String {
    "satoken".to_string()
}

fn default_elevated_accounts() -> Vec<String> {
    vec!["admin".to_string()]
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if a backend is selected without its connection URL,
    /// or a variable holds an unparseable value
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// # Errors
    /// Same as [`AppConfig::from_env`]
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = var("DATABASE_URL");
        let storage_backend = match var("STORAGE_BACKEND") {
            Some(s) => match s.trim().to_lowercase().as_str() {
                "postgres" | "postgresql" => StorageBackend::Postgres,
                "memory" => StorageBackend::Memory,
                _ => return Err(ConfigError::InvalidValue("STORAGE_BACKEND", s)),
            },
            None if database_url.is_some() => StorageBackend::Postgres,
            None => StorageBackend::Memory,
        };
        let database = match storage_backend {
            StorageBackend::Postgres => Some(DatabaseConfig {
                url: database_url.ok_or(ConfigError::MissingVar("DATABASE_URL"))?,
                max_connections: parse_or(&var, "DATABASE_MAX_CONNECTIONS", default_max_connections)?,
                min_connections: parse_or(&var, "DATABASE_MIN_CONNECTIONS", default_min_connections)?,
            }),
            StorageBackend::Memory => None,
        };

        let redis_url = var("REDIS_URL");
        let session_backend = match var("SESSION_BACKEND") {
            Some(s) => match s.trim().to_lowercase().as_str() {
                "redis" => SessionBackend::Redis,
                "memory" => SessionBackend::Memory,
                _ => return Err(ConfigError::InvalidValue("SESSION_BACKEND", s)),
            },
            None if redis_url.is_some() => SessionBackend::Redis,
            None => SessionBackend::Memory,
        };
        let redis = match session_backend {
            SessionBackend::Redis => Some(RedisConfig {
                url: redis_url.ok_or(ConfigError::MissingVar("REDIS_URL"))?,
                max_connections: parse_or(&var, "REDIS_MAX_CONNECTIONS", default_redis_max_connections)?,
            }),
            SessionBackend::Memory => None,
        };

        Ok(Self {
            app: AppSettings {
                name: var("APP_NAME").unwrap_or_else(default_app_name),
                env: var("APP_ENV")
                    .and_then(|s| match s.to_lowercase().as_str() {
                        "production" => Some(Environment::Production),
                        "staging" => Some(Environment::Staging),
                        "development" => Some(Environment::Development),
                        _ => None,
                    })
                    .unwrap_or_default(),
            },
            api: ServerConfig {
                host: var("API_HOST").unwrap_or_else(default_host),
                port: parse_or(&var, "API_PORT", default_port)?,
            },
            storage: StorageConfig {
                backend: storage_backend,
                database,
            },
            session: SessionConfig {
                backend: session_backend,
                redis,
                timeout_seconds: session_timeout(&var)?,
                token_header: var("TOKEN_HEADER")
                    .map(|s| s.trim().to_lowercase())
                    .unwrap_or_else(default_token_header),
            },
            security: SecurityConfig {
                credential_policy: parse_or(&var, "CREDENTIAL_POLICY", CredentialPolicy::default)?,
                elevated_accounts: var("ELEVATED_ACCOUNTS")
                    .map(|s| split_list(&s))
                    .unwrap_or_else(default_elevated_accounts),
                seed_default_accounts: var("SEED_DEFAULT_ACCOUNTS")
                    .map(|s| parse_bool("SEED_DEFAULT_ACCOUNTS", &s))
                    .transpose()?
                    .unwrap_or(true),
            },
            cors: CorsConfig {
                allowed_origins: var("CORS_ALLOWED_ORIGINS")
                    .map(|s| split_list(&s))
                    .unwrap_or_default(),
            },
        })
    }

    /// Configuration with in-process backends and defaults everywhere,
    /// used by tests and local runs without infrastructure
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            app: AppSettings {
                name: default_app_name(),
                env: Environment::Development,
            },
            api: ServerConfig {
                host: default_host(),
                port: default_port(),
            },
            storage: StorageConfig {
                backend: StorageBackend::Memory,
                database: None,
            },
            session: SessionConfig {
                backend: SessionBackend::Memory,
                redis: None,
                timeout_seconds: default_session_timeout(),
                token_header: default_token_header(),
            },
            security: SecurityConfig {
                credential_policy: CredentialPolicy::default(),
                elevated_accounts: default_elevated_accounts(),
                seed_default_accounts: true,
            },
            cors: CorsConfig::default(),
        }
    }
}

fn parse_or<T, V, D>(var: &V, key: &'static str, default: D) -> Result<T, ConfigError>
where
    T: FromStr,
    V: Fn(&str) -> Option<String>,
    D: FnOnce() -> T,
{
    match var(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key, raw)),
        None => Ok(default()),
    }
}

/// Session lifetime, at least one second and at most ten years
fn session_timeout<V>(var: &V) -> Result<u64, ConfigError>
where
    V: Fn(&str) -> Option<String>,
{
    let seconds = parse_or(var, "SESSION_TIMEOUT_SECONDS", default_session_timeout)?;
    if (1..=MAX_SESSION_TIMEOUT).contains(&seconds) {
        Ok(seconds)
    } else {
        Err(ConfigError::InvalidValue(
            "SESSION_TIMEOUT_SECONDS",
            seconds.to_string(),
        ))
    }
}

fn parse_bool(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue(key, raw.to_string())),
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
