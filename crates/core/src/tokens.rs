//! Token accounting against the `o200k_base` encoding.
//!
//! The encoding is the one used by the `gpt-4o-mini` model family. It is
//! loaded once into an immutable [`TokenCounter`] and shared by reference;
//! every budget check in the system goes through the same instance.

use std::sync::{Arc, LazyLock};

use tiktoken_rs::CoreBPE;

use crate::error::CoreError;

/// Name of the tokenizer encoding, reported alongside budget figures.
pub const ENCODING_NAME: &str = "o200k_base";

/// Counts below this threshold are rendered verbatim by [`format_tokens`].
const THOUSAND: usize = 1_000;

/// Process-wide counter, built on first use and never mutated afterwards.
static SHARED: LazyLock<Arc<TokenCounter>> = LazyLock::new(|| {
    Arc::new(TokenCounter::new().expect("embedded o200k_base encoding loads"))
});

/// Immutable tokenizer handle.
///
/// Construction parses the BPE ranks, so build one per process (see
/// [`TokenCounter::shared`]) and pass it around rather than creating one
/// per call.
pub struct TokenCounter {
    bpe: CoreBPE,
}

impl TokenCounter {
    /// Load the `o200k_base` encoding.
    pub fn new() -> Result<Self, CoreError> {
        let bpe = tiktoken_rs::o200k_base()
            .map_err(|e| CoreError::Internal(format!("Failed to load tokenizer: {e}")))?;
        Ok(Self { bpe })
    }

    /// The process-wide instance.
    pub fn shared() -> Arc<TokenCounter> {
        Arc::clone(&SHARED)
    }

    /// Number of tokens in `text`. Empty text yields 0.
    ///
    /// Special-token markup is counted as ordinary text.
    pub fn count_tokens(&self, text: &str) -> usize {
        if text.is_empty() {
            return 0;
        }
        self.bpe.encode_ordinary(text).len()
    }

    /// Token count clamped into the `INTEGER` column type used for storage.
    pub fn count_for_storage(&self, text: &str) -> i32 {
        i32::try_from(self.count_tokens(text)).unwrap_or(i32::MAX)
    }
}

impl std::fmt::Debug for TokenCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCounter")
            .field("encoding", &ENCODING_NAME)
            .finish()
    }
}

/// Render a token count for display.
///
/// Below 1000 the integer is printed as-is; otherwise the count is shown
/// in thousands rounded to one decimal place (`12345` -> `"12.3k"`,
/// `1000` -> `"1k"`).
pub fn format_tokens(count: usize) -> String {
    if count < THOUSAND {
        return count.to_string();
    }
    let thousands = count as f64 / THOUSAND as f64;
    let rounded = (thousands * 10.0).round() / 10.0;
    format!("{rounded}k")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
