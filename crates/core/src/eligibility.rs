//! Generation eligibility rules.
//!
//! Decides whether a project may start a generation run from its assets
//! and prompts. Pure evaluation over pre-loaded data: the caller fetches
//! the rows and passes them in, mirroring how readiness is computed
//! elsewhere in the workspace.

use serde::{Deserialize, Serialize};

use crate::tokens::TokenCounter;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Default ceiling for the summed token count of a project's assets.
pub const DEFAULT_MAX_TOKENS_ASSETS: i64 = 50_000;

/// Default ceiling for the summed token count of a project's prompts.
pub const DEFAULT_MAX_TOKENS_PROMPT: i64 = 10_000;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Token ceilings applied by [`evaluate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenLimits {
    pub max_asset_tokens: i64,
    pub max_prompt_tokens: i64,
}

impl Default for TokenLimits {
    fn default() -> Self {
        Self {
            max_asset_tokens: DEFAULT_MAX_TOKENS_ASSETS,
            max_prompt_tokens: DEFAULT_MAX_TOKENS_PROMPT,
        }
    }
}

/// The slice of an asset the rules look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetSummary {
    /// Whether the asset carries any non-whitespace extracted text.
    pub has_content: bool,
    /// Stored token count of the extracted text.
    pub token_count: i64,
}

impl AssetSummary {
    /// A leading byte-order mark counts as blank, same as whitespace.
    pub fn new(content: Option<&str>, token_count: i32) -> Self {
        Self {
            has_content: content.is_some_and(|c| !c.trim_matches(is_blank).is_empty()),
            token_count: i64::from(token_count),
        }
    }
}

fn is_blank(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

/// A single blocking condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockReason {
    MissingPrompts,
    MissingContent,
    AssetTokensExceeded,
    PromptTokensExceeded,
}

/// Outcome of [`evaluate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Eligibility {
    Eligible,
    Blocked {
        reasons: Vec<BlockReason>,
        message: String,
    },
}

impl Eligibility {
    pub fn is_eligible(&self) -> bool {
        matches!(self, Self::Eligible)
    }

    /// Human-readable blocking reason, `None` when eligible.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Eligible => None,
            Self::Blocked { message, .. } => Some(message),
        }
    }
}

/// Outcome plus the figures it was computed from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EligibilityReport {
    #[serde(flatten)]
    pub outcome: Eligibility,
    pub asset_tokens: i64,
    pub prompt_tokens: i64,
    pub prompt_count: usize,
    pub limits: TokenLimits,
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// Evaluate whether generation may start.
///
/// Presence conditions (content, prompts) are checked first and reported
/// on their own; budget conditions are only reported once both are
/// present. Prompt tokens are recounted from the prompt text rather than
/// trusting stored counts; asset tokens use the stored counts.
pub fn evaluate(
    assets: &[AssetSummary],
    prompts: &[&str],
    limits: &TokenLimits,
    counter: &TokenCounter,
) -> EligibilityReport {
    let has_content = assets.iter().any(|a| a.has_content);
    let has_prompts = !prompts.is_empty();

    let asset_tokens: i64 = assets.iter().map(|a| a.token_count).sum();
    let prompt_tokens: i64 = prompts
        .iter()
        .map(|p| counter.count_tokens(p) as i64)
        .sum();

    let outcome = if !has_content || !has_prompts {
        let mut reasons = Vec::new();
        let mut missing = Vec::new();
        if !has_prompts {
            reasons.push(BlockReason::MissingPrompts);
            missing.push("prompts");
        }
        if !has_content {
            reasons.push(BlockReason::MissingContent);
            missing.push("valid assets");
        }
        Eligibility::Blocked {
            reasons,
            message: format!(
                "Please add {} before generating content.",
                missing.join(" and ")
            ),
        }
    } else {
        let mut reasons = Vec::new();
        let mut exceeded = Vec::new();
        if asset_tokens > limits.max_asset_tokens {
            reasons.push(BlockReason::AssetTokensExceeded);
            exceeded.push("assets");
        }
        if prompt_tokens > limits.max_prompt_tokens {
            reasons.push(BlockReason::PromptTokensExceeded);
            exceeded.push("prompts");
        }
        if reasons.is_empty() {
            Eligibility::Eligible
        } else {
            Eligibility::Blocked {
                reasons,
                message: format!(
                    "Your {} exceed the maximum token limit. Please remove some {} before generating content.",
                    exceeded.join(" and "),
                    exceeded.join(" or "),
                ),
            }
        }
    };

    EligibilityReport {
        outcome,
        asset_tokens,
        prompt_tokens,
        prompt_count: prompts.len(),
        limits: *limits,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn counter() -> std::sync::Arc<TokenCounter> {
        TokenCounter::shared()
    }

    fn asset(content: &str, tokens: i32) -> AssetSummary {
        AssetSummary::new(Some(content), tokens)
    }

    #[test]
    fn eligible_when_content_and_prompts_within_budget() {
        let report = evaluate(
            &[asset("Transcript of the talk", 10)],
            &["Write a tweet"],
            &TokenLimits::default(),
            &counter(),
        );
        assert!(report.outcome.is_eligible());
        assert_eq!(report.outcome.message(), None);
        assert_eq!(report.prompt_count, 1);
        assert_eq!(report.asset_tokens, 10);
    }

    #[test]
    fn missing_prompts_only() {
        let report = evaluate(
            &[asset("Some content", 3)],
            &[],
            &TokenLimits::default(),
            &counter(),
        );
        assert_eq!(
            report.outcome,
            Eligibility::Blocked {
                reasons: vec![BlockReason::MissingPrompts],
                message: "Please add prompts before generating content.".to_string(),
            }
        );
    }

    #[test]
    fn missing_content_only() {
        let report = evaluate(
            &[asset("   \n", 0), AssetSummary::new(None, 0)],
            &["Write a blog post"],
            &TokenLimits::default(),
            &counter(),
        );
        assert_eq!(
            report.outcome.message(),
            Some("Please add valid assets before generating content.")
        );
    }

    #[test]
    fn byte_order_mark_alone_is_not_content() {
        assert!(!AssetSummary::new(Some("\u{feff}"), 1).has_content);
        assert!(!AssetSummary::new(Some("\u{feff} \n\t"), 1).has_content);
        assert!(AssetSummary::new(Some("\u{feff}Keynote"), 3).has_content);

        let report = evaluate(
            &[asset("\u{feff}\n", 1)],
            &["Write a blog post"],
            &TokenLimits::default(),
            &counter(),
        );
        assert_eq!(
            report.outcome.message(),
            Some("Please add valid assets before generating content.")
        );
    }

    #[test]
    fn missing_both_lists_both() {
        let report = evaluate(&[], &[], &TokenLimits::default(), &counter());
        match report.outcome {
            Eligibility::Blocked { reasons, message } => {
                assert_eq!(
                    reasons,
                    vec![BlockReason::MissingPrompts, BlockReason::MissingContent]
                );
                assert_eq!(
                    message,
                    "Please add prompts and valid assets before generating content."
                );
            }
            Eligibility::Eligible => panic!("expected blocked"),
        }
    }

    #[test]
    fn prompt_budget_exceeded_is_not_reported_as_missing() {
        let limits = TokenLimits {
            max_asset_tokens: 1_000,
            max_prompt_tokens: 5,
        };
        let long_prompt = "Write a detailed summary of every section of the document.";
        let report = evaluate(&[asset("content", 2)], &[long_prompt], &limits, &counter());
        match report.outcome {
            Eligibility::Blocked { reasons, message } => {
                assert_eq!(reasons, vec![BlockReason::PromptTokensExceeded]);
                assert!(message.contains("prompts"));
                assert!(message.contains("exceed the maximum token limit"));
                assert!(!message.contains("Please add"));
            }
            Eligibility::Eligible => panic!("expected blocked"),
        }
    }

    #[test]
    fn presence_takes_precedence_over_budget() {
        let limits = TokenLimits {
            max_asset_tokens: 1,
            max_prompt_tokens: 1,
        };
        let report = evaluate(&[asset("", 500)], &["a long prompt text"], &limits, &counter());
        assert_eq!(
            report.outcome,
            Eligibility::Blocked {
                reasons: vec![BlockReason::MissingContent],
                message: "Please add valid assets before generating content.".to_string(),
            }
        );
    }

    #[test]
    fn both_budgets_exceeded() {
        let limits = TokenLimits {
            max_asset_tokens: 10,
            max_prompt_tokens: 1,
        };
        let report = evaluate(
            &[asset("a", 6), asset("b", 6)],
            &["first prompt", "second prompt"],
            &limits,
            &counter(),
        );
        assert_eq!(report.asset_tokens, 12);
        assert_eq!(
            report.outcome.message(),
            Some(
                "Your assets and prompts exceed the maximum token limit. \
                 Please remove some assets or prompts before generating content."
            )
        );
    }

    #[test]
    fn budget_is_inclusive_of_the_limit() {
        let limits = TokenLimits {
            max_asset_tokens: 10,
            max_prompt_tokens: 10_000,
        };
        let report = evaluate(&[asset("x", 10)], &["p"], &limits, &counter());
        assert!(report.outcome.is_eligible());
    }

    #[test]
    fn prompt_tokens_are_recounted_live() {
        let c = counter();
        let report = evaluate(
            &[asset("content", 1)],
            &["one two three", "four five"],
            &TokenLimits::default(),
            &c,
        );
        let expected = (c.count_tokens("one two three") + c.count_tokens("four five")) as i64;
        assert_eq!(report.prompt_tokens, expected);
    }

    #[test]
    fn report_serializes_with_status_tag() {
        let report = evaluate(&[], &["p"], &TokenLimits::default(), &counter());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "blocked");
        assert_eq!(json["reasons"][0], "missing_content");
        assert_eq!(json["limits"]["max_prompt_tokens"], DEFAULT_MAX_TOKENS_PROMPT);
    }
}
