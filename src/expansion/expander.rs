//! Query expanders.

use unicode_normalization::UnicodeNormalization;

use super::lexicon::BilingualLexicon;

/// Rewrites query text to widen recall.
pub trait QueryExpander: Send + Sync {
    /// Expand the given query text.
    fn expand(&self, text: &str) -> String;

    /// Get the name of this expander.
    fn name(&self) -> &str;
}

/// Lexicon driven cross-lingual expander.
///
/// Rules are applied longest phrase first. Each matching phrase has every
/// occurrence replaced by its expansion padded with spaces, and later rules
/// run over the already rewritten text. A short phrase can therefore match
/// inside an expansion introduced by a longer one. Matching is plain
/// substring search, not word based. The output is not deduplicated.
#[derive(Debug, Clone)]
pub struct BilingualExpander {
    lexicon: BilingualLexicon,
}

impl Default for BilingualExpander {
    fn default() -> Self {
        Self::new(BilingualLexicon::builtin())
    }
}

impl BilingualExpander {
    /// Create an expander over the given lexicon.
    pub fn new(lexicon: BilingualLexicon) -> Self {
        Self { lexicon }
    }

    pub fn lexicon(&self) -> &BilingualLexicon {
        &self.lexicon
    }
}

impl QueryExpander for BilingualExpander {
    fn expand(&self, text: &str) -> String {
        let mut expanded: String = text.nfc().collect::<String>().to_lowercase();

        for entry in self.lexicon.by_priority() {
            if expanded.contains(entry.phrase.as_str()) {
                let replacement = format!(" {} ", entry.expansion);
                expanded = expanded.replace(entry.phrase.as_str(), &replacement);
            }
        }

        expanded
    }

    fn name(&self) -> &str {
        "bilingual"
    }
}
