use serde::Deserialize;
use shared::jwt::{JwtConfig, JwtError};
use std::net::{AddrParseError, SocketAddr};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub redis: RedisConfig,
    pub logging: LoggingConfig,
    pub app: AppConfig,
    #[serde(default)]
    pub jwt: JwtSettings,
    #[serde(default)]
    pub otp: OtpConfig,
    #[serde(default)]
    pub security: SecurityConfig,
    #[serde(default)]
    pub admin: AdminBootstrapConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Optional prefix all API routes are nested under, e.g. `/api/v1`.
    #[serde(default)]
    pub path_prefix: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
}

impl From<&DatabaseConfig> for persistence::db::DatabaseConfig {
    fn from(config: &DatabaseConfig) -> Self {
        Self {
            url: config.url.clone(),
            max_connections: config.max_connections,
            min_connections: config.min_connections,
            connect_timeout_secs: config.connect_timeout_secs,
            idle_timeout_secs: config.idle_timeout_secs,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    #[serde(default = "default_redis_url")]
    pub url: String,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: default_redis_url(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_app_name")]
    pub name: String,

    /// HMAC secret for signing access tokens.
    #[serde(default)]
    pub secret_key: String,

    /// Swaps external dependencies for in-process ones (OTP store).
    #[serde(default)]
    pub test_mode: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    /// Access token lifetime (default: one year)
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry_secs: i64,

    /// Leeway in seconds for clock skew tolerance
    #[serde(default = "default_jwt_leeway")]
    pub leeway_secs: u64,
}

impl Default for JwtSettings {
    fn default() -> Self {
        Self {
            access_token_expiry_secs: default_access_token_expiry(),
            leeway_secs: default_jwt_leeway(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OtpConfig {
    /// Lifetime of an issued code; also the minimum gap between two codes.
    #[serde(default = "default_otp_ttl")]
    pub ttl_secs: u64,

    /// Backing store: `redis` or `memory`
    #[serde(default = "default_otp_store")]
    pub store: String,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_otp_ttl(),
            store: default_otp_store(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecurityConfig {
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminBootstrapConfig {
    /// Mobile number granted the admin role at startup. Empty disables it.
    #[serde(default)]
    pub bootstrap_mobile_number: String,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_request_timeout() -> u64 {
    30
}
fn default_max_connections() -> u32 {
    20
}
fn default_min_connections() -> u32 {
    2
}
fn default_connect_timeout() -> u64 {
    10
}
fn default_idle_timeout() -> u64 {
    600
}
fn default_redis_url() -> String {
    "redis://127.0.0.1:6379".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "json".to_string()
}
fn default_app_name() -> String {
    "room-reservation".to_string()
}
fn default_access_token_expiry() -> i64 {
    shared::jwt::DEFAULT_ACCESS_TOKEN_EXPIRY_SECS
}
fn default_jwt_leeway() -> u64 {
    shared::jwt::DEFAULT_LEEWAY_SECS
}
fn default_otp_ttl() -> u64 {
    60
}
fn default_otp_store() -> String {
    OTP_STORE_REDIS.to_string()
}

pub const OTP_STORE_REDIS: &str = "redis";
pub const OTP_STORE_MEMORY: &str = "memory";

/// Configuration validation error
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Loading order (later sources override earlier):
    /// 1. config/default.toml - base configuration with defaults
    /// 2. config/local.toml - local overrides (optional, not in git)
    /// 3. Environment variables with RR__ prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("RR").separator("__"))
            .build()?;

        let cfg: Self = config.try_deserialize()?;
        cfg.validate()
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Ok(cfg)
    }

    /// Load configuration for testing with custom overrides, without
    /// touching the file system.
    #[cfg(test)]
    pub fn load_for_test(overrides: &[(&str, &str)]) -> Result<Self, config::ConfigError> {
        let defaults = r#"
            [server]
            host = "0.0.0.0"
            port = 8080
            request_timeout_secs = 30

            [database]
            url = ""

            [logging]
            level = "info"
            format = "json"

            [app]
            secret_key = "test-secret"
        "#;

        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(defaults, config::FileFormat::Toml));

        for (key, value) in overrides {
            builder = builder.set_override(*key, *value)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.database.url.is_empty() {
            return Err(ConfigValidationError::MissingRequired(
                "RR__DATABASE__URL environment variable must be set".to_string(),
            ));
        }

        if self.app.secret_key.is_empty() {
            return Err(ConfigValidationError::MissingRequired(
                "RR__APP__SECRET_KEY environment variable must be set".to_string(),
            ));
        }

        if self.server.port == 0 {
            return Err(ConfigValidationError::InvalidValue(
                "Server port cannot be 0".to_string(),
            ));
        }

        if self.database.min_connections > self.database.max_connections {
            return Err(ConfigValidationError::InvalidValue(
                "min_connections cannot exceed max_connections".to_string(),
            ));
        }

        match self.otp.store.as_str() {
            OTP_STORE_MEMORY => {}
            OTP_STORE_REDIS => {
                if !self.app.test_mode && self.redis.url.is_empty() {
                    return Err(ConfigValidationError::MissingRequired(
                        "RR__REDIS__URL must be set when otp.store is redis".to_string(),
                    ));
                }
            }
            other => {
                return Err(ConfigValidationError::InvalidValue(format!(
                    "otp.store must be 'redis' or 'memory', got '{}'",
                    other
                )));
            }
        }

        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        format!("{}:{}", self.server.host, self.server.port).parse()
    }

    /// Whether codes are kept in process memory instead of Redis.
    pub fn uses_in_memory_otp_store(&self) -> bool {
        self.app.test_mode || self.otp.store == OTP_STORE_MEMORY
    }

    pub fn otp_ttl(&self) -> Duration {
        Duration::from_secs(self.otp.ttl_secs)
    }

    /// Builds the token signer/verifier from the app secret.
    pub fn jwt_config(&self) -> Result<JwtConfig, JwtError> {
        JwtConfig::with_leeway(
            &self.app.secret_key,
            self.jwt.access_token_expiry_secs,
            self.jwt.leeway_secs,
        )
    }

    /// Route prefix without a trailing slash; empty when unset.
    pub fn path_prefix(&self) -> String {
        let trimmed = self.server.path_prefix.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            String::new()
        } else if trimmed.starts_with('/') {
            trimmed.to_string()
        } else {
            format!("/{}", trimmed)
        }
    }
}
