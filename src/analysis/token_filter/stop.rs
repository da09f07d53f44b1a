//! Stop filter implementation.
//!
//! The stopword set is a resource loaded once at startup. A missing or
//! unreadable stopword file is not an error: the filter degrades to an empty
//! set and every token passes through.
//!
//! # Examples
//!
//! ```
//! use saffron::analysis::token_filter::Filter;
//! use saffron::analysis::token_filter::stop::StopFilter;
//! use saffron::analysis::token::Token;
//!
//! let filter = StopFilter::from_words(vec!["là", "của"]);
//! let tokens = vec![Token::new("đây", 0), Token::new("là", 1), Token::new("phở", 2)];
//!
//! let result: Vec<_> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();
//! assert_eq!(result.len(), 2);
//! assert_eq!(result[1].text, "phở");
//! ```

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use log::{debug, warn};
use unicode_normalization::UnicodeNormalization;

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::analysis::tokenizer::COMPOUND_JOINER;
use crate::error::Result;

/// A filter that removes stop words from the token stream.
#[derive(Clone, Debug, Default)]
pub struct StopFilter {
    /// The set of stop words to remove
    stop_words: Arc<HashSet<String>>,
}

impl StopFilter {
    /// Create a stop filter with no stop words.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new stop filter with custom stop words.
    pub fn with_stop_words(stop_words: HashSet<String>) -> Self {
        StopFilter {
            stop_words: Arc::new(stop_words),
        }
    }

    /// Create a new stop filter from a list of stop words.
    ///
    /// Entries are NFC-composed and lowercased to match analyzed tokens.
    /// Multi-syllable entries are registered both as written and in their
    /// segmented spelling (`bởi vì` also matches `bởi_vì`).
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut stop_words = HashSet::new();
        for word in words {
            let word: String = word.into();
            let word: String = word.trim().nfc().collect::<String>().to_lowercase();
            if word.is_empty() {
                continue;
            }
            if word.contains(' ') {
                let joined: Vec<&str> = word.split_whitespace().collect();
                stop_words.insert(joined.join(&COMPOUND_JOINER.to_string()));
            }
            stop_words.insert(word);
        }
        Self::with_stop_words(stop_words)
    }

    /// Load stop words from a file with one word per line.
    ///
    /// Returns an empty filter (and logs a warning) when the file is missing.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let filter = Self::from_words(content.lines());
                debug!("loaded {} stop words from {}", filter.len(), path.display());
                filter
            }
            Err(e) => {
                warn!(
                    "stopword list {} not readable ({e}); using empty stopword set",
                    path.display()
                );
                Self::new()
            }
        }
    }

    /// Check if a word is a stop word.
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Get the number of stop words.
    pub fn len(&self) -> usize {
        self.stop_words.len()
    }

    /// Check if the stop word set is empty.
    pub fn is_empty(&self) -> bool {
        self.stop_words.is_empty()
    }
}

impl Filter for StopFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        if self.stop_words.is_empty() {
            return Ok(tokens);
        }
        let stop_words = Arc::clone(&self.stop_words);
        Ok(Box::new(
            tokens.filter(move |token| !stop_words.contains(&token.text)),
        ))
    }

    fn name(&self) -> &'static str {
        "stop"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;
    use std::io::Write;

    fn run(filter: &StopFilter, words: &[&str]) -> Vec<String> {
        let tokens: Vec<Token> = words
            .iter()
            .enumerate()
            .map(|(i, w)| Token::new(*w, i))
            .collect();
        filter
            .filter(Box::new(tokens.into_iter()))
            .unwrap()
            .map(|t| t.text)
            .collect()
    }

    #[test]
    fn test_stop_filter() {
        let filter = StopFilter::from_words(vec!["và", "là"]);
        assert_eq!(run(&filter, &["gà", "và", "vịt", "là"]), vec!["gà", "vịt"]);
    }

    #[test]
    fn test_multi_syllable_stop_words() {
        let filter = StopFilter::from_words(vec!["bởi vì"]);
        assert!(filter.is_stop_word("bởi vì"));
        assert!(filter.is_stop_word("bởi_vì"));
    }

    #[test]
    fn test_entries_are_composed_and_lowercased() {
        let filter = StopFilter::from_words(vec!["Va\u{300}"]);
        assert!(filter.is_stop_word("và"));
    }

    #[test]
    fn test_empty_filter_passes_everything() {
        let filter = StopFilter::new();
        assert!(filter.is_empty());
        assert_eq!(run(&filter, &["a", "b"]), vec!["a", "b"]);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "thì").unwrap();
        writeln!(file, "  mà  ").unwrap();
        writeln!(file).unwrap();

        let filter = StopFilter::from_file(file.path());
        assert_eq!(filter.len(), 2);
        assert!(filter.is_stop_word("mà"));
    }

    #[test]
    fn test_missing_file_is_empty() {
        let filter = StopFilter::from_file("/nonexistent/vietnamese_stopwords.txt");
        assert!(filter.is_empty());
    }
}
