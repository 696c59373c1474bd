use serde::Deserialize;
use std::net::{IpAddr, SocketAddr};

use shared::jwt::{JwtConfig, JwtError, DEFAULT_LEEWAY_SECS, DEFAULT_TOKEN_EXPIRY_SECS};

pub use persistence::db::DatabaseConfig;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub security: SecurityConfig,
    /// Session token configuration
    pub jwt: JwtAuthConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_max_body_size")]
    pub max_body_size: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// `json` or `pretty`
    #[serde(default = "default_log_format")]
    pub format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    /// Allowed CORS origins; empty allows any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Requests per minute per user on protected routes; 0 disables.
    #[serde(default = "default_rate_limit")]
    pub rate_limit_per_minute: u32,
}

#[derive(Clone, Deserialize)]
pub struct JwtAuthConfig {
    /// Shared HS256 secret. Ignored when an RSA key pair is configured.
    #[serde(default)]
    pub secret: String,

    /// RSA private key in PEM format for RS256 signing
    #[serde(default)]
    pub private_key: String,

    /// RSA public key in PEM format for RS256 verification
    #[serde(default)]
    pub public_key: String,

    /// Token lifetime in seconds (default: 604800 = 7 days)
    #[serde(default = "default_token_expiry")]
    pub token_expiry_secs: i64,

    /// Leeway in seconds for clock skew tolerance (default: 30)
    #[serde(default = "default_jwt_leeway")]
    pub leeway_secs: u64,
}

impl std::fmt::Debug for JwtAuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtAuthConfig")
            .field("secret", &"[REDACTED]")
            .field("private_key", &"[REDACTED]")
            .field("public_key", &self.public_key.len())
            .field("token_expiry_secs", &self.token_expiry_secs)
            .field("leeway_secs", &self.leeway_secs)
            .finish()
    }
}

impl JwtAuthConfig {
    fn uses_rsa(&self) -> bool {
        !self.private_key.is_empty() && !self.public_key.is_empty()
    }

    /// Builds the token signer/verifier: RS256 when both PEM keys are set,
    /// HS256 with `secret` otherwise.
    pub fn build(&self) -> Result<JwtConfig, JwtError> {
        if self.uses_rsa() {
            JwtConfig::from_rsa_pem(
                &self.private_key,
                &self.public_key,
                self.token_expiry_secs,
                self.leeway_secs,
            )
        } else {
            JwtConfig::from_secret(&self.secret, self.token_expiry_secs, self.leeway_secs)
        }
    }
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    5000
}
fn default_request_timeout() -> u64 {
    30
}
fn default_max_body_size() -> usize {
    1_048_576
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "json".to_string()
}
fn default_rate_limit() -> u32 {
    120
}
fn default_token_expiry() -> i64 {
    DEFAULT_TOKEN_EXPIRY_SECS
}
fn default_jwt_leeway() -> u64 {
    DEFAULT_LEEWAY_SECS
}

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
    /// 3. Environment variables with CB__ prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("CB")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("security.cors_origins")
                    .try_parsing(true),
            )
            .build()?;

        let cfg: Self = config.try_deserialize()?;
        cfg.validate()
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Ok(cfg)
    }

    /// Load configuration for testing with custom overrides.
    ///
    /// Defaults are embedded so tests do not depend on the working directory.
    /// Validation is skipped to allow partial configs.
    pub fn load_for_test(overrides: &[(&str, &str)]) -> Result<Self, config::ConfigError> {
        let defaults = r#"
            [server]
            host = "127.0.0.1"
            port = 5000
            request_timeout_secs = 30
            max_body_size = 1048576

            [database]
            url = ""
            max_connections = 5
            min_connections = 1
            connect_timeout_secs = 10
            idle_timeout_secs = 600

            [logging]
            level = "info"
            format = "json"

            [security]
            cors_origins = []
            rate_limit_per_minute = 0

            [jwt]
            secret = "courtbook-test-secret"
            token_expiry_secs = 604800
            leeway_secs = 30
        "#;

        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(defaults, config::FileFormat::Toml));

        for (key, value) in overrides {
            builder = builder.set_override(*key, *value)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.database.url.is_empty() {
            return Err(ConfigValidationError::MissingRequired(
                "CB__DATABASE__URL environment variable must be set".to_string(),
            ));
        }

        if self.server.port == 0 {
            return Err(ConfigValidationError::InvalidValue(
                "Server port cannot be 0".to_string(),
            ));
        }

        if self.server.host.parse::<IpAddr>().is_err() {
            return Err(ConfigValidationError::InvalidValue(format!(
                "Server host must be an IP address, got {:?}",
                self.server.host
            )));
        }

        if self.database.min_connections > self.database.max_connections {
            return Err(ConfigValidationError::InvalidValue(
                "min_connections cannot exceed max_connections".to_string(),
            ));
        }

        if !self.jwt.uses_rsa() && self.jwt.secret.is_empty() {
            return Err(ConfigValidationError::MissingRequired(
                "CB__JWT__SECRET (or an RSA key pair) must be set".to_string(),
            ));
        }

        if self.jwt.token_expiry_secs <= 0 {
            return Err(ConfigValidationError::InvalidValue(
                "jwt.token_expiry_secs must be positive".to_string(),
            ));
        }

        Ok(())
    }

    /// Address to bind. Falls back to all interfaces if the host is not an IP.
    pub fn socket_addr(&self) -> SocketAddr {
        let ip = self
            .server
            .host
            .parse::<IpAddr>()
            .unwrap_or(IpAddr::from([0, 0, 0, 0]));
        SocketAddr::new(ip, self.server.port)
    }
}
