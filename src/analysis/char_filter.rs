//! Char filter implementations for text normalization.
//!
//! Char filters pre-process the raw string before it reaches the tokenizer.
//! The Vietnamese pipeline chains them in a fixed order: Unicode composition,
//! lowercasing, URL removal, markup removal and punctuation/digit removal.
//!
//! # Available Filters
//!
//! - [`unicode_normalize::UnicodeNormalizeCharFilter`] - Unicode normalization (NFC, NFD, ...)
//! - [`lowercase::LowercaseCharFilter`] - Unicode-aware lowercasing
//! - [`pattern_replace::PatternReplaceCharFilter`] - Regex-based replacement
//!
//! # Examples
//!
//! ```
//! use saffron::analysis::char_filter::CharFilter;
//! use saffron::analysis::char_filter::pattern_replace::PatternReplaceCharFilter;
//!
//! let filter = PatternReplaceCharFilter::urls().unwrap();
//! assert_eq!(filter.filter("xem http://example.com ngay"), "xem  ngay");
//! ```

/// Trait for character filters that transform text before tokenization.
pub trait CharFilter: Send + Sync {
    /// Apply this filter to the input text and return the filtered text.
    fn filter(&self, input: &str) -> String;

    /// Get the name of this char filter.
    fn name(&self) -> &'static str;
}

pub mod lowercase;
pub mod pattern_replace;
pub mod unicode_normalize;

pub use lowercase::LowercaseCharFilter;
pub use pattern_replace::PatternReplaceCharFilter;
pub use unicode_normalize::{NormalizationForm, UnicodeNormalizeCharFilter};
