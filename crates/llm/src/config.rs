use std::time::Duration;

/// Default OpenAI-compatible API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default per-request timeout in seconds.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

/// Provider connection settings.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Bearer key sent with every request.
    pub api_key: String,
    /// API root, without a trailing slash.
    pub base_url: String,
    /// Timeout applied to each individual completion request.
    pub request_timeout: Duration,
}

impl ProviderConfig {
    /// Load provider configuration from environment variables.
    ///
    /// | Env Var                        | Required | Default                      |
    /// |--------------------------------|----------|------------------------------|
    /// | `OPENAI_API_KEY`               | **yes**  | --                           |
    /// | `OPENAI_BASE_URL`              | no       | `https://api.openai.com/v1`  |
    /// | `OPENAI_REQUEST_TIMEOUT_SECS`  | no       | `120`                        |
    ///
    /// # Panics
    ///
    /// Panics if `OPENAI_API_KEY` is not set or is empty.
    pub fn from_env() -> Self {
        let api_key =
            std::env::var("OPENAI_API_KEY").expect("OPENAI_API_KEY must be set in the environment");
        assert!(!api_key.is_empty(), "OPENAI_API_KEY must not be empty");

        let base_url = std::env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.into())
            .trim_end_matches('/')
            .to_string();

        let request_timeout_secs: u64 = std::env::var("OPENAI_REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_REQUEST_TIMEOUT_SECS.to_string())
            .parse()
            .expect("OPENAI_REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            api_key,
            base_url,
            request_timeout: Duration::from_secs(request_timeout_secs),
        }
    }
}
