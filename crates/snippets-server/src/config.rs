//! Server configuration from environment variables.

use std::env;

/// Secret used to verify tokens when `JWT_SECRET` is not set.
pub const DEV_JWT_SECRET: &str = "snippets-dev-secret-change-me";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(ConfigError::InvalidValue {
                name: "LOG_FORMAT".to_string(),
                reason: format!("expected text or json, got {other}"),
            }),
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Database connection URL. `None` selects the in-memory store.
    pub database_url: Option<String>,
    /// Server port to listen on.
    pub port: u16,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
    /// Log output format.
    pub log_format: LogFormat,
    /// CORS allowed origins (comma-separated or "*" for all).
    pub cors_allowed_origins: String,
    /// HS256 secret for bearer tokens.
    pub jwt_secret: String,
    /// Accept the `X-Username` header as identity.
    pub allow_dev_identity: bool,
    /// Base for absolute links, e.g. `https://api.example.com`.
    /// When unset, links are built from the request's `Host` header.
    pub public_url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            port: 8000,
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
            cors_allowed_origins: "*".to_string(),
            jwt_secret: DEV_JWT_SECRET.to_string(),
            allow_dev_identity: false,
            public_url: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// All optional:
    /// - `DATABASE_URL`: Database connection string (default: in-memory store)
    /// - `PORT`: Server port (default: 8000)
    /// - `LOG_LEVEL`: Logging level (default: "info")
    /// - `LOG_FORMAT`: "text" or "json" (default: "text")
    /// - `CORS_ALLOWED_ORIGINS`: Allowed CORS origins (default: "*")
    /// - `JWT_SECRET`: Token signing secret (default: a development secret)
    /// - `ALLOW_DEV_IDENTITY`: Trust `X-Username` (default: false)
    /// - `PUBLIC_URL`: Base URL for hyperlinks
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let database_url = non_empty_var("DATABASE_URL");

        let port = match env::var("PORT") {
            Ok(s) => s.parse().map_err(|_| ConfigError::InvalidValue {
                name: "PORT".to_string(),
                reason: format!("not a port number: {s}"),
            })?,
            Err(_) => defaults.port,
        };

        let log_level = env::var("LOG_LEVEL").unwrap_or(defaults.log_level);

        let log_format = match env::var("LOG_FORMAT") {
            Ok(s) => s.parse()?,
            Err(_) => defaults.log_format,
        };

        let cors_allowed_origins =
            env::var("CORS_ALLOWED_ORIGINS").unwrap_or(defaults.cors_allowed_origins);

        let jwt_secret = non_empty_var("JWT_SECRET").unwrap_or(defaults.jwt_secret);

        let allow_dev_identity = env::var("ALLOW_DEV_IDENTITY")
            .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let public_url =
            non_empty_var("PUBLIC_URL").map(|s| s.trim_end_matches('/').to_string());

        Ok(Self {
            database_url,
            port,
            log_level,
            log_format,
            cors_allowed_origins,
            jwt_secret,
            allow_dev_identity,
            public_url,
        })
    }

    /// Whether tokens are verified with the built-in development secret.
    pub fn uses_dev_secret(&self) -> bool {
        self.jwt_secret == DEV_JWT_SECRET
    }

    /// Get the socket address for the server.
    pub fn socket_addr(&self) -> std::net::SocketAddr {
        std::net::SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|s| !s.trim().is_empty())
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Invalid environment variable value.
    #[error("invalid value for environment variable {name}: {reason}")]
    InvalidValue { name: String, reason: String },
}
