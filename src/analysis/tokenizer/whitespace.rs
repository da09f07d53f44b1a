//! Syllable tokenizer for text without word segmentation.

use super::Tokenizer;

use crate::analysis::token::{Token, TokenStream};
use crate::error::Result;

/// Emits one token per whitespace-separated syllable.
///
/// Runs of spaces, tabs and newlines count as a single separator, which is
/// what collapses redundant whitespace in normalized text.
#[derive(Clone, Debug, Default)]
pub struct WhitespaceTokenizer;

impl WhitespaceTokenizer {
    pub fn new() -> Self {
        WhitespaceTokenizer
    }
}

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let syllables: Vec<Token> = text
            .split_whitespace()
            .zip(0..)
            .map(|(syllable, position)| Token::new(syllable, position))
            .collect();
        Ok(Box::new(syllables.into_iter()))
    }

    fn name(&self) -> &'static str {
        "whitespace"
    }
}
