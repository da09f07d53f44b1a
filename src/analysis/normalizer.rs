//! Canonical text normalization.
//!
//! [`TextNormalizer`] turns raw catalog or query text into a lowercase,
//! single-space separated token string. It is the one entry point every other
//! component uses, so documents, queries and purchase histories are always
//! cleaned the same way.

use std::sync::Arc;

use log::warn;

use crate::analysis::analyzer::{Analyzer, VietnameseAnalyzer};
use crate::config::AnalysisConfig;
use crate::error::Result;

/// Upper bound on re-analysis passes; each pass that changes the text
/// strictly shortens it or merges tokens, so this is never reached in practice.
const MAX_PASSES: usize = 8;

/// Cleans and tokenizes raw text into canonical normalized text.
#[derive(Clone)]
pub struct TextNormalizer {
    analyzer: Arc<dyn Analyzer>,
}

impl std::fmt::Debug for TextNormalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextNormalizer")
            .field("analyzer", &self.analyzer.name())
            .finish()
    }
}

impl TextNormalizer {
    /// Create a normalizer around any analyzer.
    pub fn new(analyzer: Arc<dyn Analyzer>) -> Self {
        Self { analyzer }
    }

    /// Normalizer with the default Vietnamese pipeline and no external resources.
    pub fn vietnamese() -> Result<Self> {
        Ok(Self::new(Arc::new(VietnameseAnalyzer::new()?)))
    }

    /// Normalizer built from the analysis section of the configuration.
    pub fn from_config(config: &AnalysisConfig) -> Result<Self> {
        Ok(Self::new(Arc::new(VietnameseAnalyzer::from_config(config)?)))
    }

    /// Normalize `text`.
    ///
    /// Empty input yields empty output. The result is idempotent: the
    /// pipeline is re-applied until its output stops changing, so removals
    /// that expose new stop words or compounds are settled here.
    pub fn normalize(&self, text: &str) -> String {
        let mut current = match self.analyze_once(text) {
            Ok(normalized) => normalized,
            Err(e) => {
                warn!("normalization failed: {e}");
                return String::new();
            }
        };

        for _ in 0..MAX_PASSES {
            match self.analyze_once(&current) {
                Ok(next) if next == current => break,
                Ok(next) => current = next,
                Err(e) => {
                    warn!("normalization failed: {e}");
                    break;
                }
            }
        }

        current
    }

    /// Normalize and split into tokens.
    pub fn tokens(&self, text: &str) -> Vec<String> {
        self.normalize(text)
            .split(' ')
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }

    fn analyze_once(&self, text: &str) -> Result<String> {
        if text.is_empty() {
            return Ok(String::new());
        }
        let tokens: Vec<String> = self.analyzer.analyze(text)?.map(|t| t.text).collect();
        Ok(tokens.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token_filter::StopFilter;
    use crate::analysis::tokenizer::DictionaryTokenizer;

    #[test]
    fn test_empty_input() {
        let normalizer = TextNormalizer::vietnamese().unwrap();
        assert_eq!(normalizer.normalize(""), "");
        assert_eq!(normalizer.normalize("  !!! 123 "), "");
        assert!(normalizer.tokens("").is_empty());
    }

    #[test]
    fn test_normalize_joins_with_single_spaces() {
        let normalizer = TextNormalizer::vietnamese().unwrap();
        assert_eq!(normalizer.normalize("Gà   RÁN\n\tgiòn!"), "gà rán giòn");
    }

    #[test]
    fn test_idempotent_on_samples() {
        let normalizer = TextNormalizer::vietnamese().unwrap();
        for sample in [
            "Món Phở Bò tái lăn này RẤT NGON!!! Giá chỉ 50.000đ.",
            "<div>Pizza hải sản</div> www.pizza.vn",
            "Cà phê sữa đá - 25k",
            "",
        ] {
            let once = normalizer.normalize(sample);
            assert_eq!(normalizer.normalize(&once), once, "input: {sample}");
        }
    }

    #[test]
    fn test_idempotent_when_removal_exposes_compound() {
        let analyzer = VietnameseAnalyzer::with_resources(
            Arc::new(DictionaryTokenizer::from_words(["cà phê"])),
            StopFilter::from_words(vec!["và"]),
        )
        .unwrap();
        let normalizer = TextNormalizer::new(Arc::new(analyzer));

        let once = normalizer.normalize("cà và phê");
        assert_eq!(once, "cà_phê");
        assert_eq!(normalizer.normalize(&once), once);
    }
}
