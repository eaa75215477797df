use std::time::Duration;

/// Models tried in order when none are configured.
pub const DEFAULT_MODELS: &[&str] = &["gpt-4o-mini", "gpt-4o", "gpt-4.1"];

/// Default wall-clock budget for one generation run, in seconds.
pub const DEFAULT_MAX_DURATION_SECS: u64 = 300;

/// Settings for generation runs.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    /// Fallback order; the first entry is the preferred model.
    pub models: Vec<String>,
    /// Upper bound on a whole run, provider calls and write included.
    pub max_duration: Duration,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            models: DEFAULT_MODELS.iter().map(|m| m.to_string()).collect(),
            max_duration: Duration::from_secs(DEFAULT_MAX_DURATION_SECS),
        }
    }
}

impl GenerationConfig {
    /// Load generation settings from environment variables.
    ///
    /// | Env Var                         | Default                        |
    /// |---------------------------------|--------------------------------|
    /// | `GENERATION_MODELS`             | `gpt-4o-mini,gpt-4o,gpt-4.1`   |
    /// | `GENERATION_MAX_DURATION_SECS`  | `300`                          |
    ///
    /// # Panics
    ///
    /// Panics if `GENERATION_MODELS` lists no models or the duration does
    /// not parse.
    pub fn from_env() -> Self {
        let models: Vec<String> = match std::env::var("GENERATION_MODELS") {
            Ok(raw) => parse_models(&raw),
            Err(_) => DEFAULT_MODELS.iter().map(|m| m.to_string()).collect(),
        };
        assert!(!models.is_empty(), "GENERATION_MODELS must list at least one model");

        let max_duration_secs: u64 = std::env::var("GENERATION_MAX_DURATION_SECS")
            .unwrap_or_else(|_| DEFAULT_MAX_DURATION_SECS.to_string())
            .parse()
            .expect("GENERATION_MAX_DURATION_SECS must be a valid u64");

        Self {
            models,
            max_duration: Duration::from_secs(max_duration_secs),
        }
    }
}

fn parse_models(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
