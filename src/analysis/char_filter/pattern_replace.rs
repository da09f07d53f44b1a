use regex::Regex;

use crate::error::Result;

use super::CharFilter;

/// Links starting with a scheme or `www`.
const URL_PATTERN: &str = r"http\S+|www\S+|https\S+";

/// Anything that looks like a markup tag, matched lazily.
const TAG_PATTERN: &str = r"<.*?>";

/// ASCII punctuation (except the `_` compound joiner) and ASCII digits.
const PUNCTUATION_DIGIT_PATTERN: &str = r"[!-/:-@\[-\^`{-~0-9]";

/// A char filter that replaces every match of a regex pattern.
#[derive(Debug, Clone)]
pub struct PatternReplaceCharFilter {
    pattern: Regex,
    replacement: String,
    name: &'static str,
}

impl PatternReplaceCharFilter {
    /// Create a new pattern replace char filter.
    pub fn new(pattern: &str, replacement: &str) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            replacement: replacement.to_string(),
            name: "pattern_replace",
        })
    }

    /// Filter that deletes URLs.
    pub fn urls() -> Result<Self> {
        Ok(Self::new(URL_PATTERN, "")?.with_name("strip_urls"))
    }

    /// Filter that deletes HTML-like tags.
    pub fn html_tags() -> Result<Self> {
        Ok(Self::new(TAG_PATTERN, "")?.with_name("strip_html_tags"))
    }

    /// Filter that deletes punctuation and digits.
    ///
    /// The underscore survives because segmented compounds are spelled with it.
    pub fn punctuation_and_digits() -> Result<Self> {
        Ok(Self::new(PUNCTUATION_DIGIT_PATTERN, "")?.with_name("strip_punctuation_digits"))
    }

    fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }
}

impl CharFilter for PatternReplaceCharFilter {
    fn filter(&self, input: &str) -> String {
        self.pattern
            .replace_all(input, self.replacement.as_str())
            .into_owned()
    }

    fn name(&self) -> &'static str {
        self.name
    }
}
