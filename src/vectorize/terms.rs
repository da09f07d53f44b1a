//! Term extraction for vectorizers.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SaffronError};

/// Words are runs of two or more word characters.
pub const WORD_PATTERN: &str = r"\b\w\w+\b";

/// Splits text into word n-grams.
///
/// Text is lowercased, words are extracted with [`WORD_PATTERN`], and every
/// n-gram with `min_n <= n <= max_n` is emitted, shorter n-grams first, with
/// words joined by a single space.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "TermAnalyzerSettings", into = "TermAnalyzerSettings")]
pub struct TermAnalyzer {
    pattern: Regex,
    ngram_range: (usize, usize),
}

/// Serialized form of a [`TermAnalyzer`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TermAnalyzerSettings {
    pub ngram_range: (usize, usize),
}

impl TermAnalyzer {
    /// Create a term analyzer for the inclusive n-gram range.
    pub fn new(ngram_range: (usize, usize)) -> Result<Self> {
        let (min_n, max_n) = ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(SaffronError::invalid_argument(format!(
                "invalid ngram_range ({min_n}, {max_n})"
            )));
        }
        let pattern = Regex::new(WORD_PATTERN)
            .map_err(|e| SaffronError::analysis(format!("Invalid word pattern: {e}")))?;
        Ok(Self {
            pattern,
            ngram_range,
        })
    }

    /// Unigram analyzer.
    pub fn unigrams() -> Result<Self> {
        Self::new((1, 1))
    }

    pub fn ngram_range(&self) -> (usize, usize) {
        self.ngram_range
    }

    /// Extract the terms of `text`.
    pub fn analyze(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        let words: Vec<&str> = self
            .pattern
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .collect();

        let (min_n, max_n) = self.ngram_range;
        let mut terms = Vec::new();
        for n in min_n..=max_n.min(words.len()) {
            for window in words.windows(n) {
                terms.push(window.join(" "));
            }
        }
        terms
    }
}

impl TryFrom<TermAnalyzerSettings> for TermAnalyzer {
    type Error = SaffronError;

    fn try_from(settings: TermAnalyzerSettings) -> Result<Self> {
        TermAnalyzer::new(settings.ngram_range)
    }
}

impl From<TermAnalyzer> for TermAnalyzerSettings {
    fn from(analyzer: TermAnalyzer) -> Self {
        TermAnalyzerSettings {
            ngram_range: analyzer.ngram_range,
        }
    }
}
