//! Text analysis module for Saffron.
//!
//! This module provides text normalization: char filters, word segmentation,
//! token filters, and the [`TextNormalizer`](normalizer::TextNormalizer) that
//! ties them together into the canonical token string used for indexing,
//! querying and classification.

pub mod analyzer;
pub mod char_filter;
pub mod normalizer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

pub use analyzer::{Analyzer, PipelineAnalyzer, VietnameseAnalyzer};
pub use normalizer::TextNormalizer;
pub use token::{Token, TokenStream};
