/// Errors from the Scribe API client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("Scribe API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The server-side eligibility check refused the run.
    #[error("{message}")]
    NotEligible { message: String },

    /// The progress poller task panicked or was aborted.
    #[error("Progress poller failed: {0}")]
    Poller(#[from] tokio::task::JoinError),
}

impl ClientError {
    /// The server's `error` message when the body is a standard API error
    /// payload, otherwise the raw body.
    pub fn api_message(&self) -> Option<String> {
        match self {
            Self::Api { body, .. } => Some(
                serde_json::from_str::<serde_json::Value>(body)
                    .ok()
                    .and_then(|v| v["error"].as_str().map(str::to_string))
                    .unwrap_or_else(|| body.clone()),
            ),
            _ => None,
        }
    }
}
