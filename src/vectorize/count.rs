//! Raw term count features.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use super::sparse::SparseVector;
use super::terms::TermAnalyzer;
use super::vocabulary::Vocabulary;
use crate::error::{Result, SaffronError};

/// Converts text into term count vectors over a fitted vocabulary.
///
/// Fitting keeps terms that occur in at least `min_df` documents. When more
/// than `max_features` terms remain, the most frequent ones across the whole
/// corpus are kept, ties broken in term order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountVectorizer {
    analyzer: TermAnalyzer,
    max_features: Option<usize>,
    min_df: usize,
    vocabulary: Vocabulary,
}

impl CountVectorizer {
    /// Create an unfitted vectorizer.
    pub fn new(analyzer: TermAnalyzer, max_features: Option<usize>, min_df: usize) -> Self {
        Self {
            analyzer,
            max_features,
            min_df: min_df.max(1),
            vocabulary: Vocabulary::default(),
        }
    }

    /// Learn the vocabulary of `documents` and return their count vectors.
    ///
    /// Fails when no term survives, leaving the vectorizer unchanged.
    pub fn fit_transform<S: AsRef<str>>(&mut self, documents: &[S]) -> Result<Vec<SparseVector>> {
        let counted: Vec<AHashMap<String, usize>> = documents
            .iter()
            .map(|doc| self.count_terms(doc.as_ref()))
            .collect();

        let mut document_frequency: AHashMap<&str, usize> = AHashMap::new();
        let mut corpus_frequency: AHashMap<&str, usize> = AHashMap::new();
        for counts in &counted {
            for (term, count) in counts {
                *document_frequency.entry(term.as_str()).or_insert(0) += 1;
                *corpus_frequency.entry(term.as_str()).or_insert(0) += count;
            }
        }

        let mut candidates: Vec<&str> = document_frequency
            .iter()
            .filter(|(_, df)| **df >= self.min_df)
            .map(|(term, _)| *term)
            .collect();
        candidates.sort_unstable();

        if let Some(limit) = self.max_features {
            if candidates.len() > limit {
                candidates.sort_by(|a, b| corpus_frequency[b].cmp(&corpus_frequency[a]));
                candidates.truncate(limit);
            }
        }

        if candidates.is_empty() {
            return Err(SaffronError::invalid_argument(
                "empty vocabulary; documents contain no usable terms",
            ));
        }

        let vocabulary = Vocabulary::from_terms(candidates.into_iter().map(str::to_string));
        let rows = counted
            .iter()
            .map(|counts| Self::to_vector(&vocabulary, counts))
            .collect();
        self.vocabulary = vocabulary;
        Ok(rows)
    }

    /// Count vector of `text` over the fitted vocabulary. Unknown terms are ignored.
    pub fn transform(&self, text: &str) -> SparseVector {
        let counts = self.count_terms(text);
        Self::to_vector(&self.vocabulary, &counts)
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn analyzer(&self) -> &TermAnalyzer {
        &self.analyzer
    }

    pub fn is_fitted(&self) -> bool {
        !self.vocabulary.is_empty()
    }

    fn count_terms(&self, text: &str) -> AHashMap<String, usize> {
        let mut counts = AHashMap::new();
        for term in self.analyzer.analyze(text) {
            *counts.entry(term).or_insert(0) += 1;
        }
        counts
    }

    fn to_vector(vocabulary: &Vocabulary, counts: &AHashMap<String, usize>) -> SparseVector {
        SparseVector::from_pairs(
            counts
                .iter()
                .filter_map(|(term, count)| vocabulary.get(term).map(|col| (col, *count as f64))),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unigram_vectorizer(max_features: Option<usize>) -> CountVectorizer {
        CountVectorizer::new(TermAnalyzer::unigrams().unwrap(), max_features, 1)
    }

    #[test]
    fn test_fit_transform_counts() {
        let mut vectorizer = unigram_vectorizer(None);
        let rows = vectorizer
            .fit_transform(&["gà rán gà", "pizza"])
            .unwrap();

        let vocabulary = vectorizer.vocabulary();
        assert_eq!(vocabulary.terms(), &["gà", "pizza", "rán"]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get(vocabulary.get("gà").unwrap()), 2.0);
        assert_eq!(rows[0].get(vocabulary.get("rán").unwrap()), 1.0);
        assert_eq!(rows[1].nnz(), 1);
    }

    #[test]
    fn test_max_features_keeps_most_frequent() {
        let mut vectorizer = unigram_vectorizer(Some(2));
        vectorizer
            .fit_transform(&["bò bò bò", "gà gà", "vịt", "cá cá"])
            .unwrap();
        // "cá" and "gà" tie at two occurrences; term order keeps "cá".
        assert_eq!(vectorizer.vocabulary().terms(), &["bò", "cá"]);
    }

    #[test]
    fn test_min_df() {
        let mut vectorizer = CountVectorizer::new(TermAnalyzer::unigrams().unwrap(), None, 2);
        vectorizer
            .fit_transform(&["gà rán", "gà luộc", "bò"])
            .unwrap();
        assert_eq!(vectorizer.vocabulary().terms(), &["gà"]);
    }

    #[test]
    fn test_transform_ignores_unknown_terms() {
        let mut vectorizer = unigram_vectorizer(None);
        vectorizer.fit_transform(&["gà rán"]).unwrap();
        let vector = vectorizer.transform("gà rán giòn giòn");
        assert_eq!(vector.nnz(), 2);
        assert!(vectorizer.transform("phở").is_empty());
    }

    #[test]
    fn test_empty_vocabulary_is_an_error() {
        let mut vectorizer = unigram_vectorizer(None);
        assert!(vectorizer.fit_transform(&["", "a b"]).is_err());
        assert!(!vectorizer.is_fitted());
    }
}
