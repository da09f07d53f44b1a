//! Tokenizer implementations for text analysis.
//!
//! Tokenizers split the char-filtered text into tokens. Word segmentation for
//! Vietnamese is plugged in here: a segmenting tokenizer merges syllable runs
//! that form a single word (`phở bò` becomes `phở_bò`), while the plain
//! whitespace tokenizer keeps every syllable separate.
//!
//! # Available Tokenizers
//!
//! - [`whitespace::WhitespaceTokenizer`] - Splits on whitespace, collapsing runs
//! - [`dictionary::DictionaryTokenizer`] - Greedy longest-match compound segmentation
//!
//! # Examples
//!
//! ```
//! use saffron::analysis::tokenizer::Tokenizer;
//! use saffron::analysis::tokenizer::whitespace::WhitespaceTokenizer;
//!
//! let tokenizer = WhitespaceTokenizer::new();
//! let tokens: Vec<_> = tokenizer.tokenize("phở   bò").unwrap().collect();
//! assert_eq!(tokens.len(), 2);
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for tokenizers that convert text into tokens.
///
/// The trait requires `Send + Sync` so an analyzer can be shared by the
/// search and recommendation components.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod dictionary;
pub mod whitespace;

pub use dictionary::{COMPOUND_JOINER, DictionaryTokenizer};
pub use whitespace::WhitespaceTokenizer;
