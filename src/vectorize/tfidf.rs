//! TF-IDF vectorizer for text feature extraction.

use serde::{Deserialize, Serialize};

use super::count::CountVectorizer;
use super::sparse::SparseVector;
use super::terms::TermAnalyzer;
use super::vocabulary::Vocabulary;
use crate::error::Result;

/// TF-IDF vectorizer with smoothed inverse document frequency.
///
/// A term weight is its raw count times `ln((1 + n) / (1 + df)) + 1`, and
/// every row is scaled to unit Euclidean length.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    counts: CountVectorizer,
    /// Inverse document frequency for each column.
    idf: Vec<f64>,
    /// Total number of documents seen during fitting.
    n_documents: usize,
}

impl TfidfVectorizer {
    /// Create an unfitted vectorizer.
    pub fn new(analyzer: TermAnalyzer, max_features: Option<usize>, min_df: usize) -> Self {
        Self {
            counts: CountVectorizer::new(analyzer, max_features, min_df),
            idf: Vec::new(),
            n_documents: 0,
        }
    }

    /// Fit on `documents` and return their weighted rows in document order.
    pub fn fit_transform<S: AsRef<str>>(&mut self, documents: &[S]) -> Result<Vec<SparseVector>> {
        let mut rows = self.counts.fit_transform(documents)?;

        let mut document_frequency = vec![0usize; self.counts.vocabulary().len()];
        for row in &rows {
            for column in row.indices() {
                document_frequency[*column as usize] += 1;
            }
        }

        let n = documents.len() as f64;
        // IDF = ln((N + 1) / (df + 1)) + 1
        self.idf = document_frequency
            .iter()
            .map(|df| ((n + 1.0) / (*df as f64 + 1.0)).ln() + 1.0)
            .collect();
        self.n_documents = documents.len();

        for row in &mut rows {
            self.weight(row);
        }
        Ok(rows)
    }

    /// Project text into the fitted term space.
    pub fn transform(&self, text: &str) -> SparseVector {
        let mut vector = self.counts.transform(text);
        self.weight(&mut vector);
        vector
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        self.counts.vocabulary()
    }

    /// Get the size of the vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.counts.vocabulary().len()
    }

    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    pub fn n_documents(&self) -> usize {
        self.n_documents
    }

    fn weight(&self, vector: &mut SparseVector) {
        vector.scale_columns(&self.idf);
        vector.l2_normalize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fitted(documents: &[&str]) -> (TfidfVectorizer, Vec<SparseVector>) {
        let mut vectorizer = TfidfVectorizer::new(TermAnalyzer::new((1, 2)).unwrap(), Some(5000), 1);
        let rows = vectorizer.fit_transform(documents).unwrap();
        (vectorizer, rows)
    }

    #[test]
    fn test_rows_align_and_are_unit_length() {
        let (vectorizer, rows) = fitted(&["phở bò", "pizza hải sản", "bò nướng"]);
        assert_eq!(rows.len(), 3);
        assert_eq!(vectorizer.n_documents(), 3);
        for row in &rows {
            assert!((row.norm() - 1.0).abs() < 1e-9);
        }
        assert!(vectorizer.vocabulary().get("pizza hải").is_some());
    }

    #[test]
    fn test_smoothed_idf() {
        let (vectorizer, _) = fitted(&["phở bò", "bò nướng"]);
        let bo = vectorizer.vocabulary().get("bò").unwrap() as usize;
        let pho = vectorizer.vocabulary().get("phở").unwrap() as usize;
        assert!((vectorizer.idf()[bo] - 1.0).abs() < 1e-12);
        assert!((vectorizer.idf()[pho] - ((3.0f64 / 2.0).ln() + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_transform_matches_relevant_row() {
        let (vectorizer, rows) = fitted(&["phở bò", "pizza hải sản"]);
        let query = vectorizer.transform("bò beef steak");
        assert!(query.cosine(&rows[0]) > 0.01);
        assert_eq!(query.cosine(&rows[1]), 0.0);
    }

    #[test]
    fn test_transform_unknown_text_is_zero() {
        let (vectorizer, _) = fitted(&["phở bò"]);
        assert!(vectorizer.transform("sushi").is_empty());
    }
}
