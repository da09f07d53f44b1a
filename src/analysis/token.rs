//! Token types for text analysis.
//!
//! A [`Token`] is the unit that flows from a tokenizer through the token
//! filters of an analyzer. The normalizer joins the surviving token texts with
//! single spaces to form the canonical normalized text.
//!
//! # Examples
//!
//! ```
//! use saffron::analysis::token::Token;
//!
//! let token = Token::new("phở_bò", 0);
//! assert_eq!(token.text, "phở_bò");
//! assert_eq!(token.char_len(), 6);
//! ```

use serde::{Deserialize, Serialize};

/// A single unit of text after tokenization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The text content of the token.
    pub text: String,

    /// The position of the token in the token stream (0-based).
    pub position: usize,

    /// Number of source syllables merged into this token (1 for plain words).
    pub syllables: usize,
}

impl Token {
    /// Create a new token with the given text and position.
    pub fn new<S: Into<String>>(text: S, position: usize) -> Self {
        Token {
            text: text.into(),
            position,
            syllables: 1,
        }
    }

    /// Create a token that was assembled from several syllables.
    pub fn compound<S: Into<String>>(text: S, position: usize, syllables: usize) -> Self {
        Token {
            text: text.into(),
            position,
            syllables,
        }
    }

    /// Length of the token text in Unicode scalar values.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Check if the token is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Whether the token was produced by merging several syllables.
    pub fn is_compound(&self) -> bool {
        self.syllables > 1
    }
}

/// A stream of tokens produced by a tokenizer or filter.
pub type TokenStream = Box<dyn Iterator<Item = Token> + Send>;

/// Collect a token stream into a vector of texts.
pub fn collect_texts(tokens: TokenStream) -> Vec<String> {
    tokens.map(|token| token.text).collect()
}
