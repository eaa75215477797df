//! Provider failures and their classification.
//!
//! Every provider failure is reduced to one of two kinds at this boundary:
//! [`ProviderError::Retryable`] (try the next model) or
//! [`ProviderError::Fatal`] (abort the run). Nothing downstream inspects
//! status codes or error strings.

use serde::Deserialize;

/// HTTP statuses that indicate a transient or capacity problem.
const RETRYABLE_STATUSES: &[u16] = &[429, 502, 503, 504, 529];

/// Error codes / types reported in the body that mark a retryable failure.
const RETRYABLE_CODES: &[&str] = &["rate_limit_exceeded", "server_error", "overloaded"];

/// Error codes that are never retryable, even when paired with a
/// retryable status (a 429 for an exhausted quota will not clear by
/// switching model).
const FATAL_CODES: &[&str] = &["insufficient_quota", "invalid_api_key"];

/// Longest slice of a raw response body kept in an error message.
const MAX_BODY_EXCERPT: usize = 300;

/// A failed generation attempt against one model.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// Rate limiting, overload or a transient upstream failure.
    #[error("Model {model} temporarily unavailable: {message}")]
    Retryable { model: String, message: String },

    /// Anything else: bad request, auth, quota, malformed response.
    #[error("Model {model} failed: {message}")]
    Fatal { model: String, message: String },
}

impl ProviderError {
    pub fn retryable(model: &str, message: impl Into<String>) -> Self {
        Self::Retryable {
            model: model.to_string(),
            message: message.into(),
        }
    }

    pub fn fatal(model: &str, message: impl Into<String>) -> Self {
        Self::Fatal {
            model: model.to_string(),
            message: message.into(),
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Retryable { .. })
    }

    /// The model the failed attempt was made against.
    pub fn model(&self) -> &str {
        match self {
            Self::Retryable { model, .. } | Self::Fatal { model, .. } => model,
        }
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// OpenAI-style error envelope: `{"error": {"message", "type", "code"}}`.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

/// Classify a non-success HTTP response from the provider.
pub fn classify_response(model: &str, status: u16, body: &str) -> ProviderError {
    let parsed = serde_json::from_str::<ErrorEnvelope>(body).ok().map(|e| e.error);

    let labels: Vec<&str> = parsed
        .iter()
        .flat_map(|e| [e.code.as_deref(), e.kind.as_deref()])
        .flatten()
        .collect();

    let message = match parsed.as_ref().and_then(|e| e.message.as_deref()) {
        Some(m) => format!("HTTP {status}: {m}"),
        None => format!("HTTP {status}: {}", excerpt(body)),
    };

    if labels.iter().any(|l| FATAL_CODES.contains(l)) {
        return ProviderError::fatal(model, message);
    }
    if RETRYABLE_STATUSES.contains(&status) || labels.iter().any(|l| RETRYABLE_CODES.contains(l)) {
        return ProviderError::retryable(model, message);
    }
    ProviderError::fatal(model, message)
}

/// Classify a request that never produced an HTTP response.
pub fn classify_transport(model: &str, error: &reqwest::Error) -> ProviderError {
    if error.is_timeout() {
        ProviderError::retryable(model, format!("Request timeout: {error}"))
    } else if error.is_connect() {
        ProviderError::retryable(model, format!("Connection error: {error}"))
    } else {
        ProviderError::fatal(model, format!("HTTP error: {error}"))
    }
}

fn excerpt(body: &str) -> &str {
    if body.len() <= MAX_BODY_EXCERPT {
        return body;
    }
    let mut end = MAX_BODY_EXCERPT;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn envelope(code: &str, kind: &str) -> String {
        serde_json::json!({
            "error": { "message": "upstream said no", "type": kind, "code": code }
        })
        .to_string()
    }

    #[test]
    fn retryable_statuses() {
        for status in [429, 502, 503, 504, 529] {
            let err = classify_response("gpt-4o-mini", status, "");
            assert!(err.is_retryable(), "status {status} should be retryable");
        }
    }

    #[test]
    fn client_errors_are_fatal() {
        for status in [400, 401, 403, 404, 422] {
            let err = classify_response("gpt-4o-mini", status, "bad");
            assert_matches!(err, ProviderError::Fatal { .. });
        }
    }

    #[test]
    fn plain_500_is_fatal_without_retryable_code() {
        let err = classify_response("gpt-4o", 500, "{}");
        assert!(!err.is_retryable());
    }

    #[test]
    fn retryable_code_in_body_overrides_status() {
        let err = classify_response("gpt-4o", 500, &envelope("server_error", "server_error"));
        assert!(err.is_retryable());

        let err = classify_response("gpt-4o", 400, &envelope("", "overloaded"));
        assert!(err.is_retryable());
    }

    #[test]
    fn quota_exhaustion_is_fatal_despite_429() {
        let err = classify_response(
            "gpt-4o-mini",
            429,
            &envelope("insufficient_quota", "insufficient_quota"),
        );
        assert_matches!(err, ProviderError::Fatal { ref model, .. } if model == "gpt-4o-mini");
    }

    #[test]
    fn message_prefers_envelope_text() {
        let err = classify_response("gpt-4.1", 503, &envelope("", "server_error"));
        assert_eq!(
            err,
            ProviderError::retryable("gpt-4.1", "HTTP 503: upstream said no")
        );
        assert_eq!(err.model(), "gpt-4.1");
    }

    #[test]
    fn long_bodies_are_truncated() {
        let body = "x".repeat(1_000);
        let err = classify_response("m", 400, &body);
        match err {
            ProviderError::Fatal { message, .. } => {
                assert!(message.len() < 400);
            }
            other => panic!("expected fatal, got {other:?}"),
        }
    }

    #[test]
    fn excerpt_respects_char_boundaries() {
        let body = "é".repeat(MAX_BODY_EXCERPT);
        let cut = excerpt(&body);
        assert!(cut.len() <= MAX_BODY_EXCERPT);
        assert!(cut.chars().all(|c| c == 'é'));
    }
}
