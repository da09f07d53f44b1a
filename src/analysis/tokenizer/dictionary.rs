//! Dictionary-driven word segmentation.
//!
//! Vietnamese writes every syllable as its own whitespace-separated unit, so a
//! word like `cà phê` spans two "words" for a whitespace tokenizer. This
//! tokenizer merges runs of syllables found in a compound-word dictionary into
//! one token, joining the syllables with [`COMPOUND_JOINER`]. Matching is
//! greedy and prefers the longest dictionary entry starting at each syllable.

use ahash::AHashSet;
use std::path::Path;

use log::{debug, warn};
use unicode_normalization::UnicodeNormalization;

use super::Tokenizer;

use crate::analysis::token::{Token, TokenStream};
use crate::error::{Result, SaffronError};

/// Character used to glue the syllables of a segmented compound.
pub const COMPOUND_JOINER: char = '_';

/// A tokenizer that segments whitespace-separated syllables into dictionary words.
#[derive(Clone, Debug, Default)]
pub struct DictionaryTokenizer {
    /// Compound entries, syllables separated by a single space.
    entries: AHashSet<String>,
    /// Longest entry length in syllables.
    max_syllables: usize,
}

impl DictionaryTokenizer {
    /// Create an empty tokenizer (behaves like a whitespace tokenizer).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tokenizer from a list of compound words.
    ///
    /// Entries may separate syllables with spaces or underscores. Single
    /// syllable entries are ignored since they never merge anything.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tokenizer = Self::new();
        for word in words {
            tokenizer.add_word(word.as_ref());
        }
        tokenizer
    }

    /// Load compound words from a text file, one entry per line.
    ///
    /// Blank lines and lines starting with `#` are skipped.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            SaffronError::analysis(format!(
                "Failed to read segmentation dictionary '{}': {e}",
                path.display()
            ))
        })?;

        let tokenizer = Self::from_words(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        );
        debug!(
            "loaded {} compound words from {}",
            tokenizer.len(),
            path.display()
        );
        Ok(tokenizer)
    }

    /// Load a dictionary if a path is given, falling back to no segmentation.
    pub fn from_optional_file(path: Option<&Path>) -> Self {
        match path {
            Some(path) => Self::from_file(path).unwrap_or_else(|e| {
                warn!("{e}; word segmentation disabled");
                Self::new()
            }),
            None => Self::new(),
        }
    }

    /// Add a single compound word.
    pub fn add_word(&mut self, word: &str) {
        let canonical: String = word.nfc().collect::<String>().to_lowercase();
        let syllables: Vec<&str> = canonical
            .split(|c: char| c.is_whitespace() || c == COMPOUND_JOINER)
            .filter(|s| !s.is_empty())
            .collect();
        if syllables.len() < 2 {
            return;
        }
        self.max_syllables = self.max_syllables.max(syllables.len());
        self.entries.insert(syllables.join(" "));
    }

    /// Number of compound entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the dictionary has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn longest_match(&self, syllables: &[&str], start: usize) -> usize {
        let available = syllables.len() - start;
        let upper = self.max_syllables.min(available);
        for len in (2..=upper).rev() {
            let candidate = syllables[start..start + len].join(" ");
            if self.entries.contains(&candidate) {
                return len;
            }
        }
        1
    }
}

impl Tokenizer for DictionaryTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let syllables: Vec<&str> = text.split_whitespace().collect();
        let mut tokens = Vec::with_capacity(syllables.len());
        let mut start = 0;

        while start < syllables.len() {
            let len = self.longest_match(&syllables, start);
            let position = tokens.len();
            if len == 1 {
                tokens.push(Token::new(syllables[start], position));
            } else {
                let joiner = COMPOUND_JOINER.to_string();
                let text = syllables[start..start + len].join(&joiner);
                tokens.push(Token::compound(text, position, len));
            }
            start += len;
        }

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "dictionary"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn texts(tokenizer: &DictionaryTokenizer, input: &str) -> Vec<String> {
        tokenizer.tokenize(input).unwrap().map(|t| t.text).collect()
    }

    #[test]
    fn test_merges_known_compounds() {
        let tokenizer = DictionaryTokenizer::from_words(["cà phê", "sinh_viên"]);
        assert_eq!(
            texts(&tokenizer, "tôi là sinh viên uống cà phê"),
            vec!["tôi", "là", "sinh_viên", "uống", "cà_phê"]
        );
    }

    #[test]
    fn test_prefers_longest_match() {
        let tokenizer = DictionaryTokenizer::from_words(["rượu vang", "rượu vang đỏ"]);
        let tokens: Vec<Token> = tokenizer.tokenize("rượu vang đỏ ngon").unwrap().collect();
        assert_eq!(tokens[0].text, "rượu_vang_đỏ");
        assert_eq!(tokens[0].syllables, 3);
        assert_eq!(tokens[1].text, "ngon");
        assert_eq!(tokens[1].position, 1);
    }

    #[test]
    fn test_empty_dictionary_splits_on_whitespace() {
        let tokenizer = DictionaryTokenizer::new();
        assert!(tokenizer.is_empty());
        assert_eq!(texts(&tokenizer, "phở  bò"), vec!["phở", "bò"]);
    }

    #[test]
    fn test_segmented_output_is_stable() {
        let tokenizer = DictionaryTokenizer::from_words(["phở bò"]);
        let once = texts(&tokenizer, "phở bò tái").join(" ");
        let twice = texts(&tokenizer, &once).join(" ");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_from_file_skips_comments() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# food words").unwrap();
        writeln!(file, "bánh mì").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "Khoai Tây Chiên").unwrap();

        let tokenizer = DictionaryTokenizer::from_file(file.path()).unwrap();
        assert_eq!(tokenizer.len(), 2);
        assert_eq!(texts(&tokenizer, "khoai tây chiên"), vec!["khoai_tây_chiên"]);
    }

    #[test]
    fn test_missing_file_disables_segmentation() {
        let tokenizer =
            DictionaryTokenizer::from_optional_file(Some(Path::new("/nonexistent/dict.txt")));
        assert!(tokenizer.is_empty());
    }
}
