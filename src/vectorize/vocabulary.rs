//! Term to column mapping.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// A fitted vocabulary. Columns are assigned in lexicographic term order.
///
/// Only the ordered term list is serialized; the lookup table is rebuilt on
/// load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Vocabulary {
    terms: Vec<String>,
    index: AHashMap<String, u32>,
}

impl Vocabulary {
    /// Build a vocabulary from terms; they are sorted and deduplicated.
    pub fn from_terms<I>(terms: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut terms: Vec<String> = terms.into_iter().collect();
        terms.sort();
        terms.dedup();
        Self::from(terms)
    }

    /// Column of `term`, if it is in the vocabulary.
    pub fn get(&self, term: &str) -> Option<u32> {
        self.index.get(term).copied()
    }

    /// Term at `column`.
    pub fn term(&self, column: u32) -> Option<&str> {
        self.terms.get(column as usize).map(String::as_str)
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl From<Vec<String>> for Vocabulary {
    fn from(terms: Vec<String>) -> Self {
        let index = terms
            .iter()
            .enumerate()
            .map(|(column, term)| (term.clone(), column as u32))
            .collect();
        Vocabulary { terms, index }
    }
}

impl From<Vocabulary> for Vec<String> {
    fn from(vocabulary: Vocabulary) -> Self {
        vocabulary.terms
    }
}

impl PartialEq for Vocabulary {
    fn eq(&self, other: &Self) -> bool {
        self.terms == other.terms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_follow_term_order() {
        let vocabulary = Vocabulary::from_terms(vec![
            "phở".to_string(),
            "bò".to_string(),
            "phở bò".to_string(),
            "bò".to_string(),
        ]);
        assert_eq!(vocabulary.len(), 3);
        assert_eq!(vocabulary.get("bò"), Some(0));
        assert_eq!(vocabulary.get("phở"), Some(1));
        assert_eq!(vocabulary.get("phở bò"), Some(2));
        assert_eq!(vocabulary.term(1), Some("phở"));
        assert_eq!(vocabulary.get("gà"), None);
    }

    #[test]
    fn test_serde_rebuilds_index() {
        let vocabulary = Vocabulary::from_terms(vec!["gà".to_string(), "rán".to_string()]);
        let bytes = bincode::serialize(&vocabulary).unwrap();
        let restored: Vocabulary = bincode::deserialize(&bytes).unwrap();
        assert_eq!(restored, vocabulary);
        assert_eq!(restored.get("rán"), Some(1));
    }
}
