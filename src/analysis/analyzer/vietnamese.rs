//! Analyzer preset for the Vietnamese food catalog.

use std::sync::Arc;

use crate::analysis::analyzer::{Analyzer, PipelineAnalyzer};
use crate::analysis::char_filter::{
    LowercaseCharFilter, PatternReplaceCharFilter, UnicodeNormalizeCharFilter,
};
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::{MinLengthFilter, StopFilter};
use crate::analysis::tokenizer::{DictionaryTokenizer, Tokenizer, WhitespaceTokenizer};
use crate::config::AnalysisConfig;
use crate::error::Result;

/// Canonical cleaning pipeline for catalog text and queries.
///
/// Steps: NFC composition, lowercase, strip URLs, strip tags, strip
/// punctuation and digits, segment into words (whitespace runs collapse
/// here), drop stop words, drop tokens of one character.
#[derive(Clone, Debug)]
pub struct VietnameseAnalyzer {
    inner: PipelineAnalyzer,
}

impl VietnameseAnalyzer {
    /// Analyzer with no stop words and no word segmentation.
    pub fn new() -> Result<Self> {
        Self::with_resources(Arc::new(WhitespaceTokenizer::new()), StopFilter::new())
    }

    /// Analyzer with an injected segmenter and stopword set.
    pub fn with_resources(segmenter: Arc<dyn Tokenizer>, stop_filter: StopFilter) -> Result<Self> {
        let inner = PipelineAnalyzer::new(segmenter)
            .add_char_filter(Arc::new(UnicodeNormalizeCharFilter::default()))
            .add_char_filter(Arc::new(LowercaseCharFilter::new()))
            .add_char_filter(Arc::new(PatternReplaceCharFilter::urls()?))
            .add_char_filter(Arc::new(PatternReplaceCharFilter::html_tags()?))
            .add_char_filter(Arc::new(PatternReplaceCharFilter::punctuation_and_digits()?))
            .add_filter(Arc::new(stop_filter))
            .add_filter(Arc::new(MinLengthFilter::default()));
        Ok(Self { inner })
    }

    /// Build the analyzer from configured resource files.
    ///
    /// Missing resources degrade gracefully: no stopword file means an empty
    /// stopword set, no dictionary means whitespace segmentation.
    pub fn from_config(config: &AnalysisConfig) -> Result<Self> {
        let stop_filter = match &config.stopwords_path {
            Some(path) => StopFilter::from_file(path),
            None => StopFilter::new(),
        };
        let segmenter: Arc<dyn Tokenizer> = match &config.dictionary_path {
            Some(path) => Arc::new(DictionaryTokenizer::from_optional_file(Some(path.as_path()))),
            None => Arc::new(WhitespaceTokenizer::new()),
        };
        Self::with_resources(segmenter, stop_filter)
    }

    /// The underlying pipeline.
    pub fn pipeline(&self) -> &PipelineAnalyzer {
        &self.inner
    }
}

impl Analyzer for VietnameseAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.inner.analyze(text)
    }

    fn name(&self) -> &'static str {
        "vietnamese"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(analyzer: &VietnameseAnalyzer, text: &str) -> Vec<String> {
        analyzer.analyze(text).unwrap().map(|t| t.text).collect()
    }

    #[test]
    fn test_full_cleaning() {
        let analyzer = VietnameseAnalyzer::new().unwrap();
        let tokens = analyze(
            &analyzer,
            "   Món Phở Bò tái lăn này RẤT NGON!!! Giá chỉ 50.000đ. Xem thêm tại http://example.com",
        );
        assert_eq!(
            tokens,
            vec![
                "món", "phở", "bò", "tái", "lăn", "này", "rất", "ngon", "giá", "chỉ", "xem",
                "thêm", "tại"
            ]
        );
    }

    #[test]
    fn test_with_segmentation_and_stop_words() {
        let analyzer = VietnameseAnalyzer::with_resources(
            Arc::new(DictionaryTokenizer::from_words(["phở bò", "tái lăn"])),
            StopFilter::from_words(vec!["này", "rất"]),
        )
        .unwrap();
        assert_eq!(
            analyze(&analyzer, "Phở Bò tái lăn này rất ngon"),
            vec!["phở_bò", "tái_lăn", "ngon"]
        );
    }

    #[test]
    fn test_strips_markup() {
        let analyzer = VietnameseAnalyzer::new().unwrap();
        assert_eq!(
            analyze(&analyzer, "<p>Cà phê <b>sữa</b></p>"),
            vec!["cà", "phê", "sữa"]
        );
    }

    #[test]
    fn test_default_config_builds() {
        let analyzer = VietnameseAnalyzer::from_config(&AnalysisConfig::default()).unwrap();
        assert_eq!(analyzer.pipeline().char_filters().len(), 5);
        assert_eq!(analyzer.name(), "vietnamese");
    }
}
