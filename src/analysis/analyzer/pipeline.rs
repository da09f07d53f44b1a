//! Analyzer assembled from char filters, one tokenizer and token filters.
//!
//! Char filters rewrite the raw string before segmentation, in insertion
//! order; token filters then see the token stream in insertion order.
//!
//! ```
//! use saffron::analysis::analyzer::{Analyzer, PipelineAnalyzer};
//! use saffron::analysis::char_filter::LowercaseCharFilter;
//! use saffron::analysis::token_filter::StopFilter;
//! use saffron::analysis::tokenizer::WhitespaceTokenizer;
//! use std::sync::Arc;
//!
//! let analyzer = PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()))
//!     .add_char_filter(Arc::new(LowercaseCharFilter::new()))
//!     .add_filter(Arc::new(StopFilter::from_words(vec!["và"])));
//!
//! let words: Vec<_> = analyzer.analyze("Gà VÀ Vịt").unwrap().map(|t| t.text).collect();
//! assert_eq!(words, vec!["gà", "vịt"]);
//! ```

use std::sync::Arc;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::char_filter::CharFilter;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::analysis::tokenizer::Tokenizer;
use crate::error::Result;

/// Ordered char filters, a tokenizer and ordered token filters.
#[derive(Clone)]
pub struct PipelineAnalyzer {
    tokenizer: Arc<dyn Tokenizer>,
    char_filters: Vec<Arc<dyn CharFilter>>,
    filters: Vec<Arc<dyn Filter>>,
}

impl std::fmt::Debug for PipelineAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineAnalyzer")
            .field(
                "char_filters",
                &self.char_filters.iter().map(|c| c.name()).collect::<Vec<_>>(),
            )
            .field("tokenizer", &self.tokenizer.name())
            .field(
                "filters",
                &self.filters.iter().map(|f| f.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl PipelineAnalyzer {
    /// Pipeline with no filters around `tokenizer`.
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        PipelineAnalyzer {
            tokenizer,
            char_filters: Vec::new(),
            filters: Vec::new(),
        }
    }

    pub fn add_char_filter(mut self, char_filter: Arc<dyn CharFilter>) -> Self {
        self.char_filters.push(char_filter);
        self
    }

    pub fn add_filter(mut self, filter: Arc<dyn Filter>) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn tokenizer(&self) -> &Arc<dyn Tokenizer> {
        &self.tokenizer
    }

    pub fn char_filters(&self) -> &[Arc<dyn CharFilter>] {
        &self.char_filters
    }

    pub fn filters(&self) -> &[Arc<dyn Filter>] {
        &self.filters
    }
}

impl Analyzer for PipelineAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        let cleaned = self
            .char_filters
            .iter()
            .fold(text.to_string(), |acc, char_filter| char_filter.filter(&acc));

        self.filters
            .iter()
            .try_fold(self.tokenizer.tokenize(&cleaned)?, |stream, filter| {
                filter.filter(stream)
            })
    }

    fn name(&self) -> &'static str {
        "pipeline"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::char_filter::PatternReplaceCharFilter;
    use crate::analysis::token_filter::MinLengthFilter;
    use crate::analysis::tokenizer::WhitespaceTokenizer;

    #[test]
    fn test_char_filters_run_before_tokenizer() {
        let analyzer = PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()))
            .add_char_filter(Arc::new(PatternReplaceCharFilter::new("-", " ").unwrap()));

        let tokens: Vec<_> = analyzer.analyze("gà-rán").unwrap().map(|t| t.text).collect();
        assert_eq!(tokens, vec!["gà", "rán"]);
    }

    #[test]
    fn test_filters_run_in_order() {
        let analyzer = PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()))
            .add_filter(Arc::new(MinLengthFilter::default()));

        let tokens: Vec<_> = analyzer.analyze("a bò c").unwrap().map(|t| t.text).collect();
        assert_eq!(tokens, vec!["bò"]);
        assert_eq!(analyzer.filters().len(), 1);
        assert_eq!(analyzer.tokenizer().name(), "whitespace");
    }
}
