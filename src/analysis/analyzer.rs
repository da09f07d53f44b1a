//! Analyzers combine char filters, a tokenizer and token filters.
//!
//! ```text
//! Raw Text → Char Filters → Tokenizer → Filter 1 → ... → Filter N → Tokens
//! ```
//!
//! # Available Implementations
//!
//! - [`PipelineAnalyzer`] - Custom char filter + tokenizer + filter chains
//! - [`VietnameseAnalyzer`] - The catalog normalization pipeline

mod pipeline;
mod vietnamese;

pub use pipeline::PipelineAnalyzer;
pub use vietnamese::VietnameseAnalyzer;

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for analyzers that convert text into processed tokens.
///
/// The trait requires `Send + Sync` so one analyzer instance can be shared
/// by every component of an engine.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text and return a stream of tokens.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer (for debugging and configuration).
    fn name(&self) -> &'static str;
}
