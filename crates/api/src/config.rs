use scribe_core::eligibility::{TokenLimits, DEFAULT_MAX_TOKENS_ASSETS, DEFAULT_MAX_TOKENS_PROMPT};

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `330`). Kept above the
    /// generation run budget so a run times out on its own terms first.
    pub request_timeout_secs: u64,
    /// Seconds to wait for in-flight requests after a shutdown signal
    /// (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// JWT verification settings.
    pub jwt: JwtConfig,
    /// Token ceilings applied by the eligibility rules.
    pub token_limits: TokenLimits,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:3001`    |
    /// | `REQUEST_TIMEOUT_SECS` | `330`                      |
    /// | `SHUTDOWN_TIMEOUT_SECS`| `30`                       |
    /// | `MAX_TOKENS_ASSETS`    | `50000`                    |
    /// | `MAX_TOKENS_PROMPT`    | `10000`                    |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3001".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "330".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let max_asset_tokens: i64 = std::env::var("MAX_TOKENS_ASSETS")
            .unwrap_or_else(|_| DEFAULT_MAX_TOKENS_ASSETS.to_string())
            .parse()
            .expect("MAX_TOKENS_ASSETS must be a valid i64");

        let max_prompt_tokens: i64 = std::env::var("MAX_TOKENS_PROMPT")
            .unwrap_or_else(|_| DEFAULT_MAX_TOKENS_PROMPT.to_string())
            .parse()
            .expect("MAX_TOKENS_PROMPT must be a valid i64");

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            jwt,
            token_limits: TokenLimits {
                max_asset_tokens,
                max_prompt_tokens,
            },
        }
    }
}
