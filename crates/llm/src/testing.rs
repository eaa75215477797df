//! Scripted [`TextGenerator`] for tests.
//!
//! Replies with `"{model}: {user instruction}"` unless a rule matching the
//! request says otherwise. Rules are checked in insertion order; the first
//! matching failure rule wins. Every call is recorded.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::generator::{GenerationRequest, TextGenerator};

/// Kind of failure a rule injects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    Retryable,
    Fatal,
}

#[derive(Debug, Clone)]
struct Rule {
    model: Option<String>,
    /// Substring of the user instruction the rule applies to.
    needle: Option<String>,
    failure: Failure,
}

impl Rule {
    fn matches(&self, request: &GenerationRequest) -> bool {
        self.model.as_deref().is_none_or(|m| m == request.model)
            && self
                .needle
                .as_deref()
                .is_none_or(|n| request.user.contains(n))
    }
}

/// A [`TextGenerator`] driven by pre-declared rules.
#[derive(Debug, Default)]
pub struct ScriptedGenerator {
    rules: Vec<Rule>,
    delays: Vec<(String, Duration)>,
    default_delay: Option<Duration>,
    calls: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every request against `model`.
    pub fn fail_model(mut self, model: &str, failure: Failure) -> Self {
        self.rules.push(Rule {
            model: Some(model.to_string()),
            needle: None,
            failure,
        });
        self
    }

    /// Fail requests whose user instruction contains `needle`, optionally
    /// only against one model.
    pub fn fail_prompt(mut self, needle: &str, model: Option<&str>, failure: Failure) -> Self {
        self.rules.push(Rule {
            model: model.map(str::to_string),
            needle: Some(needle.to_string()),
            failure,
        });
        self
    }

    /// Sleep before answering requests whose user instruction contains `needle`.
    pub fn delay_prompt(mut self, needle: &str, delay: Duration) -> Self {
        self.delays.push((needle.to_string(), delay));
        self
    }

    /// Sleep before answering every request without a specific delay.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.default_delay = Some(delay);
        self
    }

    /// Every request received so far, in arrival order.
    pub fn calls(&self) -> Vec<GenerationRequest> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Models tried for requests whose user instruction contains `needle`.
    pub fn models_tried(&self, needle: &str) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c.user.contains(needle))
            .map(|c| c.model)
            .collect()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or_default()
    }

    fn delay_for(&self, request: &GenerationRequest) -> Option<Duration> {
        self.delays
            .iter()
            .find(|(needle, _)| request.user.contains(needle.as_str()))
            .map(|(_, d)| *d)
            .or(self.default_delay)
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, ProviderError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(request.clone());
        }

        if let Some(delay) = self.delay_for(request) {
            tokio::time::sleep(delay).await;
        }

        match self.rules.iter().find(|r| r.matches(request)) {
            Some(rule) => {
                let message = format!("scripted {:?} failure", rule.failure);
                Err(match rule.failure {
                    Failure::Retryable => ProviderError::retryable(&request.model, message),
                    Failure::Fatal => ProviderError::fatal(&request.model, message),
                })
            }
            None => Ok(format!("{}: {}", request.model, request.user)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(model: &str, user: &str) -> GenerationRequest {
        GenerationRequest {
            model: model.to_string(),
            system: String::new(),
            user: user.to_string(),
        }
    }

    #[tokio::test]
    async fn answers_with_model_and_user_text() {
        let generator = ScriptedGenerator::new();
        let text = generator.generate(&request("gpt-4o", "hi")).await.unwrap();
        assert_eq!(text, "gpt-4o: hi");
        assert_eq!(generator.call_count(), 1);
    }

    #[tokio::test]
    async fn rules_scope_by_model_and_prompt() {
        let generator = ScriptedGenerator::new()
            .fail_model("a", Failure::Retryable)
            .fail_prompt("boom", Some("b"), Failure::Fatal);

        assert!(generator
            .generate(&request("a", "x"))
            .await
            .unwrap_err()
            .is_retryable());
        assert!(!generator
            .generate(&request("b", "boom"))
            .await
            .unwrap_err()
            .is_retryable());
        assert!(generator.generate(&request("b", "fine")).await.is_ok());
        assert!(generator.generate(&request("c", "boom")).await.is_ok());
        assert_eq!(generator.models_tried("boom"), vec!["b", "c"]);
    }
}
