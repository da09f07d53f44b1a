//! Vector space index over the product catalog.
//!
//! Training turns every product into a TF-IDF row. The fitted vectorizer, the
//! row matrix and the document table are bundled in one [`SearchArtifact`] so
//! row `i` of the matrix always describes `documents[i]`.

use std::sync::Arc;

use ahash::AHashSet;
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::TextNormalizer;
use crate::artifact::{ArtifactSlot, Outcome};
use crate::config::SearchConfig;
use crate::error::{Result, SaffronError};
use crate::vectorize::{SparseVector, TermAnalyzer, TfidfVectorizer};

/// A catalog product as supplied for training.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
}

impl Document {
    pub fn new(id: i64) -> Self {
        Document {
            id,
            ..Default::default()
        }
    }

    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_details<S: Into<String>>(mut self, details: S) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Name, description and details joined by spaces; missing fields are empty.
    pub fn searchable_text(&self) -> String {
        format!(
            "{} {} {}",
            self.name.as_deref().unwrap_or(""),
            self.description.as_deref().unwrap_or(""),
            self.details.as_deref().unwrap_or("")
        )
    }
}

/// Document table entry kept with a trained index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: i64,
    pub normalized_text: String,
}

/// A trained search index: vectorizer, row-aligned matrix and document table.
#[derive(Debug, Clone)]
pub struct SearchArtifact {
    generation: Uuid,
    trained_at: DateTime<Utc>,
    vectorizer: TfidfVectorizer,
    matrix: Vec<SparseVector>,
    documents: Vec<DocumentRecord>,
}

impl SearchArtifact {
    /// Bundle freshly fitted parts under a new generation.
    pub fn new(
        vectorizer: TfidfVectorizer,
        matrix: Vec<SparseVector>,
        documents: Vec<DocumentRecord>,
    ) -> Result<Self> {
        Self::from_parts(vectorizer, matrix, documents, Uuid::new_v4(), Utc::now())
    }

    /// Reassemble an artifact. The matrix must have one row per document.
    pub fn from_parts(
        vectorizer: TfidfVectorizer,
        matrix: Vec<SparseVector>,
        documents: Vec<DocumentRecord>,
        generation: Uuid,
        trained_at: DateTime<Utc>,
    ) -> Result<Self> {
        if matrix.len() != documents.len() {
            return Err(SaffronError::invalid_argument(format!(
                "matrix has {} rows but document table has {} entries",
                matrix.len(),
                documents.len()
            )));
        }
        Ok(SearchArtifact {
            generation,
            trained_at,
            vectorizer,
            matrix,
            documents,
        })
    }

    pub fn generation(&self) -> Uuid {
        self.generation
    }

    pub fn trained_at(&self) -> DateTime<Utc> {
        self.trained_at
    }

    pub fn vectorizer(&self) -> &TfidfVectorizer {
        &self.vectorizer
    }

    pub fn matrix(&self) -> &[SparseVector] {
        &self.matrix
    }

    pub fn documents(&self) -> &[DocumentRecord] {
        &self.documents
    }

    /// Number of indexed documents (and matrix rows).
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Row of the first document with `id`.
    pub fn position_of(&self, id: i64) -> Option<usize> {
        self.documents.iter().position(|doc| doc.id == id)
    }

    /// Project text into the fitted term space.
    pub fn transform(&self, text: &str) -> SparseVector {
        self.vectorizer.transform(text)
    }
}

/// Builds and holds the TF-IDF representation of the catalog.
#[derive(Debug)]
pub struct VectorSpaceIndex {
    config: SearchConfig,
    normalizer: Arc<TextNormalizer>,
    slot: ArtifactSlot<SearchArtifact>,
}

impl VectorSpaceIndex {
    /// Create an untrained index.
    pub fn new(config: SearchConfig, normalizer: Arc<TextNormalizer>) -> Self {
        Self {
            config,
            normalizer,
            slot: ArtifactSlot::new(),
        }
    }

    /// Fit a new artifact on `documents` without publishing it.
    pub fn build(&self, documents: &[Document]) -> Result<SearchArtifact> {
        if documents.is_empty() {
            return Err(SaffronError::invalid_argument("no products to train"));
        }

        let mut seen = AHashSet::with_capacity(documents.len());
        let duplicates = documents.iter().filter(|doc| !seen.insert(doc.id)).count();
        if duplicates > 0 {
            warn!("{duplicates} duplicate product ids; lookups use the first occurrence");
        }

        info!("Preprocessing {} products", documents.len());
        let records: Vec<DocumentRecord> = documents
            .iter()
            .map(|doc| DocumentRecord {
                id: doc.id,
                normalized_text: self.normalizer.normalize(&doc.searchable_text()),
            })
            .collect();

        let mut vectorizer = TfidfVectorizer::new(
            TermAnalyzer::new(self.config.ngram_range)?,
            Some(self.config.max_features),
            self.config.min_df,
        );
        let texts: Vec<&str> = records.iter().map(|r| r.normalized_text.as_str()).collect();
        let matrix = vectorizer.fit_transform(&texts)?;
        info!(
            "TF-IDF matrix shape: ({}, {})",
            matrix.len(),
            vectorizer.vocabulary_size()
        );

        SearchArtifact::new(vectorizer, matrix, records)
    }

    /// Fit on `documents` and replace the current artifact.
    pub fn train(&self, documents: &[Document]) -> Result<Arc<SearchArtifact>> {
        let artifact = self.build(documents)?;
        Ok(self.install(artifact))
    }

    /// Publish an already built or restored artifact.
    pub fn install(&self, artifact: SearchArtifact) -> Arc<SearchArtifact> {
        debug!(
            "installing search artifact {} with {} documents",
            artifact.generation(),
            artifact.len()
        );
        self.slot.publish(artifact)
    }

    /// The current artifact.
    pub fn artifact(&self) -> Option<Arc<SearchArtifact>> {
        self.slot.current()
    }

    pub fn is_trained(&self) -> bool {
        self.slot.is_loaded()
    }

    /// Project text into the current term space.
    pub fn transform(&self, text: &str) -> Outcome<SparseVector> {
        match self.slot.current() {
            Some(artifact) => Outcome::Ready(artifact.transform(text)),
            None => Outcome::Untrained,
        }
    }

    pub fn normalizer(&self) -> &Arc<TextNormalizer> {
        &self.normalizer
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> VectorSpaceIndex {
        VectorSpaceIndex::new(
            SearchConfig::default(),
            Arc::new(TextNormalizer::vietnamese().unwrap()),
        )
    }

    fn catalog() -> Vec<Document> {
        vec![
            Document::new(1).with_name("Phở bò"),
            Document::new(2)
                .with_name("Pizza hải sản")
                .with_description("Tôm, mực và phô mai"),
            Document::new(3).with_details("Bò nướng sả"),
        ]
    }

    #[test]
    fn test_searchable_text() {
        let doc = Document::new(9).with_name("Gà").with_details("giòn");
        assert_eq!(doc.searchable_text(), "Gà  giòn");
    }

    #[test]
    fn test_train_aligns_rows_with_documents() {
        let index = index();
        let artifact = index.train(&catalog()).unwrap();
        assert_eq!(artifact.matrix().len(), artifact.documents().len());
        assert_eq!(artifact.len(), 3);
        assert_eq!(artifact.documents()[0].normalized_text, "phở bò");
        assert_eq!(artifact.position_of(3), Some(2));
        assert!(index.is_trained());
    }

    #[test]
    fn test_train_on_empty_input_keeps_previous_artifact() {
        let index = index();
        let first = index.train(&catalog()).unwrap();
        assert!(index.train(&[]).is_err());
        assert_eq!(index.artifact().unwrap().generation(), first.generation());
    }

    #[test]
    fn test_transform_untrained() {
        assert!(index().transform("bò").is_untrained());
    }

    #[test]
    fn test_transform_uses_existing_vocabulary() {
        let index = index();
        index.train(&catalog()).unwrap();
        let vector = index.transform("bò sushi").ready().unwrap();
        assert_eq!(vector.nnz(), 1);
    }

    #[test]
    fn test_from_parts_rejects_misaligned_rows() {
        let index = index();
        let artifact = index.build(&catalog()).unwrap();
        let result = SearchArtifact::from_parts(
            artifact.vectorizer().clone(),
            artifact.matrix()[..2].to_vec(),
            artifact.documents().to_vec(),
            artifact.generation(),
            artifact.trained_at(),
        );
        assert!(result.is_err());
    }
}
