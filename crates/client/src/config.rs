use std::time::Duration;

use crate::poller::DEFAULT_POLL_INTERVAL;

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the Scribe API, without the `/api/v1` suffix.
    pub api_url: String,
    /// Bearer token sent with every request.
    pub api_token: String,
    /// Delay between progress fetches while a run is in flight.
    pub poll_interval: Duration,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var            | Required | Default                 |
    /// |--------------------|----------|-------------------------|
    /// | `SCRIBE_API_URL`   | no       | `http://localhost:3000` |
    /// | `SCRIBE_API_TOKEN` | **yes**  | --                      |
    /// | `POLL_INTERVAL_MS` | no       | `1000`                  |
    ///
    /// # Panics
    ///
    /// Panics if `SCRIBE_API_TOKEN` is missing or `POLL_INTERVAL_MS` is not
    /// a positive u64.
    pub fn from_env() -> Self {
        let api_url = std::env::var("SCRIBE_API_URL")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .trim_end_matches('/')
            .to_string();

        let api_token =
            std::env::var("SCRIBE_API_TOKEN").expect("SCRIBE_API_TOKEN must be set in the environment");

        let poll_interval = parse_poll_interval(std::env::var("POLL_INTERVAL_MS").ok().as_deref());

        Self {
            api_url,
            api_token,
            poll_interval,
        }
    }
}

fn parse_poll_interval(raw: Option<&str>) -> Duration {
    let Some(raw) = raw else {
        return DEFAULT_POLL_INTERVAL;
    };
    let millis = raw
        .parse::<u64>()
        .expect("POLL_INTERVAL_MS must be a valid u64");
    assert!(millis > 0, "POLL_INTERVAL_MS must be greater than zero");
    Duration::from_millis(millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_interval_uses_default() {
        assert_eq!(parse_poll_interval(None), DEFAULT_POLL_INTERVAL);
    }

    #[test]
    fn interval_is_read_as_milliseconds() {
        assert_eq!(parse_poll_interval(Some("250")), Duration::from_millis(250));
    }

    #[test]
    #[should_panic(expected = "POLL_INTERVAL_MS must be greater than zero")]
    fn zero_interval_is_rejected() {
        parse_poll_interval(Some("0"));
    }

    #[test]
    #[should_panic(expected = "POLL_INTERVAL_MS must be a valid u64")]
    fn non_numeric_interval_is_rejected() {
        parse_poll_interval(Some("fast"));
    }
}
