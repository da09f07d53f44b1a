//! The search and recommendation engine.
//!
//! [`Engine`] is the explicit service instance: construct it (optionally
//! restoring persisted artifacts), train it, and serve reads from whatever
//! artifacts are current. Each side keeps its artifact behind an atomic swap,
//! so a retrain never exposes half-built state to concurrent readers.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{info, warn};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::analysis::TextNormalizer;
use crate::artifact::Outcome;
use crate::classify::{CategoryClassifier, TrainingSample, parse_training_samples};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::expansion::{BilingualExpander, BilingualLexicon};
use crate::index::{Document, VectorSpaceIndex};
use crate::persistence::ArtifactStore;
use crate::search::{SearchHit, SimilarityRanker};

/// Whether a training call produced a new artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TrainStatus {
    /// A new artifact was built and published.
    Trained { rows: usize, vocabulary: usize },
    /// Training was a no-op; the previous artifact (if any) is still current.
    Skipped { reason: String },
}

/// What happened when saving a freshly trained artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PersistStatus {
    Saved,
    /// The engine has no data directory.
    Disabled,
    /// The artifact is live in memory but could not be written.
    Failed { reason: String },
    /// Nothing was trained, so nothing was saved.
    NotAttempted,
}

/// Result of `train_search` or `train_recommend`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainReport {
    pub training: TrainStatus,
    pub persistence: PersistStatus,
}

impl TrainReport {
    fn skipped(reason: String) -> Self {
        TrainReport {
            training: TrainStatus::Skipped { reason },
            persistence: PersistStatus::NotAttempted,
        }
    }

    pub fn is_trained(&self) -> bool {
        matches!(self.training, TrainStatus::Trained { .. })
    }
}

/// Summary of a loaded search artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchStatus {
    pub documents: usize,
    pub vocabulary: usize,
    pub generation: Uuid,
    pub trained_at: DateTime<Utc>,
}

/// Summary of a loaded classifier artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierStatus {
    pub classes: Vec<i64>,
    pub vocabulary: usize,
    pub generation: Uuid,
    pub trained_at: DateTime<Utc>,
}

/// Health view of an engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineStatus {
    pub search: Option<SearchStatus>,
    pub recommend: Option<ClassifierStatus>,
    pub persistence: bool,
}

/// Where trained artifacts are saved.
#[derive(Debug)]
enum Persistence {
    Disabled,
    Unavailable(String),
    Enabled(ArtifactStore),
}

/// Bilingual product search plus category recommendation.
#[derive(Debug)]
pub struct Engine {
    config: EngineConfig,
    index: Arc<VectorSpaceIndex>,
    ranker: SimilarityRanker,
    classifier: CategoryClassifier,
    persistence: Persistence,
    // Held across publish and save so the saved generation is the live one.
    search_writer: Mutex<()>,
    recommend_writer: Mutex<()>,
}

impl Engine {
    /// Build an engine from configuration and restore any persisted artifacts.
    ///
    /// Problems with resources or saved artifacts are logged and leave the
    /// affected side untrained; only an invalid configuration is an error.
    pub fn new(config: EngineConfig) -> Result<Self> {
        let persistence = match &config.data_dir {
            None => Persistence::Disabled,
            Some(dir) => match ArtifactStore::open(dir) {
                Ok(store) => Persistence::Enabled(store),
                Err(e) => {
                    warn!("artifact storage unavailable: {e}");
                    Persistence::Unavailable(e.to_string())
                }
            },
        };
        let engine = Self::build(config, persistence)?;
        engine.reload();
        Ok(engine)
    }

    /// Build an engine over an explicit artifact store and restore from it.
    pub fn with_store(config: EngineConfig, store: ArtifactStore) -> Result<Self> {
        let engine = Self::build(config, Persistence::Enabled(store))?;
        engine.reload();
        Ok(engine)
    }

    /// An engine with default settings and no persistence.
    pub fn in_memory() -> Result<Self> {
        Self::build(EngineConfig::default(), Persistence::Disabled)
    }

    fn build(config: EngineConfig, persistence: Persistence) -> Result<Self> {
        config.validate()?;

        let normalizer = Arc::new(TextNormalizer::from_config(&config.analysis)?);
        let lexicon = BilingualLexicon::from_optional_file(config.analysis.lexicon_path.as_deref());
        let index = Arc::new(VectorSpaceIndex::new(
            config.search.clone(),
            Arc::clone(&normalizer),
        ));
        let ranker = SimilarityRanker::new(Arc::clone(&index), Arc::new(BilingualExpander::new(lexicon)));
        let classifier = CategoryClassifier::new(config.recommend.clone(), normalizer);

        Ok(Engine {
            config,
            index,
            ranker,
            classifier,
            persistence,
            search_writer: Mutex::new(()),
            recommend_writer: Mutex::new(()),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Restore both artifacts from storage. Missing or unreadable artifacts
    /// leave the current state of that side unchanged.
    pub fn reload(&self) {
        let Persistence::Enabled(store) = &self.persistence else {
            return;
        };

        let search_writer = self.search_writer.lock();
        match store.load_search() {
            Ok(Some(artifact)) => {
                self.index.install(artifact);
            }
            Ok(None) => info!("No TF-IDF model found; search needs training"),
            Err(e) => warn!("Error loading TF-IDF model: {e}"),
        }
        drop(search_writer);

        let _recommend_writer = self.recommend_writer.lock();
        match store.load_classifier() {
            Ok(Some(artifact)) => {
                self.classifier.install(artifact);
            }
            Ok(None) => info!("No Naive Bayes model found; recommendations need training"),
            Err(e) => warn!("Error loading Naive Bayes model: {e}"),
        }
    }

    /// Rebuild the search index from the full catalog.
    pub fn train_search(&self, documents: &[Document]) -> TrainReport {
        let artifact = match self.index.build(documents) {
            Ok(artifact) => artifact,
            Err(e) => {
                warn!("search training skipped: {e}");
                return TrainReport::skipped(e.to_string());
            }
        };

        let training = TrainStatus::Trained {
            rows: artifact.len(),
            vocabulary: artifact.vectorizer().vocabulary_size(),
        };
        let _writer = self.search_writer.lock();
        let artifact = self.index.install(artifact);
        let persistence = self.persist(|store| store.save_search(&artifact));
        TrainReport {
            training,
            persistence,
        }
    }

    /// Retrain the category classifier.
    pub fn train_recommend(&self, samples: &[TrainingSample]) -> TrainReport {
        let artifact = match self.classifier.build(samples) {
            Ok(artifact) => artifact,
            Err(e) => {
                warn!("recommendation training skipped: {e}");
                return TrainReport::skipped(e.to_string());
            }
        };

        let training = TrainStatus::Trained {
            rows: samples.len(),
            vocabulary: artifact.vectorizer().vocabulary().len(),
        };
        let _writer = self.recommend_writer.lock();
        let artifact = self.classifier.install(artifact);
        let persistence = self.persist(|store| store.save_classifier(&artifact));
        TrainReport {
            training,
            persistence,
        }
    }

    /// Retrain the classifier from raw JSON samples.
    ///
    /// Malformed input is reported as skipped and leaves the current model in place.
    pub fn train_recommend_json(&self, value: &Value) -> TrainReport {
        match parse_training_samples(value) {
            Ok(samples) => self.train_recommend(&samples),
            Err(e) => {
                warn!("Invalid training data format: {e}");
                TrainReport::skipped(e.to_string())
            }
        }
    }

    /// Product ids matching `text`, best first.
    pub fn search(&self, text: &str, limit: Option<usize>) -> Outcome<Vec<i64>> {
        self.search_hits(text, limit)
            .map(|hits| hits.into_iter().map(|h| h.id).collect())
    }

    /// Like [`search`](Self::search) but with similarity scores.
    pub fn search_hits(&self, text: &str, limit: Option<usize>) -> Outcome<Vec<SearchHit>> {
        let limit = limit.unwrap_or(self.config.search.default_limit);
        self.ranker.search(text, limit)
    }

    /// Products similar to `product_id`, never including it.
    ///
    /// Fails with `NotFound` when the id is not in the trained catalog.
    pub fn related(&self, product_id: i64, limit: Option<usize>) -> Result<Outcome<Vec<i64>>> {
        Ok(self
            .related_hits(product_id, limit)?
            .map(|hits| hits.into_iter().map(|h| h.id).collect()))
    }

    /// Like [`related`](Self::related) but with similarity scores.
    pub fn related_hits(
        &self,
        product_id: i64,
        limit: Option<usize>,
    ) -> Result<Outcome<Vec<SearchHit>>> {
        let limit = limit.unwrap_or(self.config.search.related_limit);
        self.ranker.find_similar(product_id, limit)
    }

    /// Category ids a user with this purchase history likely favors.
    pub fn recommend(&self, purchase_history: &str, limit: Option<usize>) -> Outcome<Vec<i64>> {
        let limit = limit.unwrap_or(self.config.recommend.default_limit);
        self.classifier.predict_top_categories(purchase_history, limit)
    }

    pub fn status(&self) -> EngineStatus {
        let search = self.index.artifact().map(|artifact| SearchStatus {
            documents: artifact.len(),
            vocabulary: artifact.vectorizer().vocabulary_size(),
            generation: artifact.generation(),
            trained_at: artifact.trained_at(),
        });
        let recommend = self.classifier.artifact().map(|artifact| ClassifierStatus {
            classes: artifact.classes().to_vec(),
            vocabulary: artifact.vectorizer().vocabulary().len(),
            generation: artifact.generation(),
            trained_at: artifact.trained_at(),
        });
        EngineStatus {
            search,
            recommend,
            persistence: matches!(self.persistence, Persistence::Enabled(_)),
        }
    }

    fn persist<F>(&self, save: F) -> PersistStatus
    where
        F: FnOnce(&ArtifactStore) -> Result<()>,
    {
        match &self.persistence {
            Persistence::Disabled => PersistStatus::Disabled,
            Persistence::Unavailable(reason) => PersistStatus::Failed {
                reason: reason.clone(),
            },
            Persistence::Enabled(store) => match save(store) {
                Ok(()) => PersistStatus::Saved,
                Err(e) => {
                    warn!("trained artifact kept in memory but not saved: {e}");
                    PersistStatus::Failed {
                        reason: e.to_string(),
                    }
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, Storage};
    use serde_json::json;

    fn catalog() -> Vec<Document> {
        vec![
            Document::new(1).with_name("Phở bò"),
            Document::new(2).with_name("Pizza hải sản"),
        ]
    }

    #[test]
    fn test_train_report_in_memory() {
        let engine = Engine::in_memory().unwrap();
        let report = engine.train_search(&catalog());
        assert_eq!(report.persistence, PersistStatus::Disabled);
        assert!(matches!(
            report.training,
            TrainStatus::Trained { rows: 2, .. }
        ));
    }

    #[test]
    fn test_empty_training_is_skipped() {
        let engine = Engine::in_memory().unwrap();
        let report = engine.train_search(&[]);
        assert!(!report.is_trained());
        assert_eq!(report.persistence, PersistStatus::NotAttempted);
        assert!(engine.search("bò", None).is_untrained());
    }

    #[test]
    fn test_malformed_samples_keep_previous_model() {
        let engine = Engine::in_memory().unwrap();
        engine.train_recommend(&[TrainingSample::new("gà rán", 1)]);

        let report = engine.train_recommend_json(&json!([{"text_features": "pizza"}]));
        assert!(!report.is_trained());
        assert_eq!(engine.status().recommend.unwrap().classes, vec![1]);
    }

    #[test]
    fn test_saved_artifacts_restore_on_construction() {
        let storage = MemoryStorage::new();
        let engine = Engine::with_store(
            EngineConfig::default(),
            ArtifactStore::new(Arc::new(storage.clone())),
        )
        .unwrap();
        assert_eq!(engine.train_search(&catalog()).persistence, PersistStatus::Saved);
        let report = engine.train_recommend_json(&json!({
            "training_samples": [
                {"text_features": "gà rán", "category_id": 1},
                {"text_features": "pizza", "category_id": 2}
            ]
        }));
        assert_eq!(report.persistence, PersistStatus::Saved);
        assert_eq!(storage.list_files().unwrap().len(), 4);

        let restored = Engine::with_store(
            EngineConfig::default(),
            ArtifactStore::new(Arc::new(storage.clone())),
        )
        .unwrap();
        assert_eq!(restored.search("bò", Some(5)), Outcome::Ready(vec![1]));
        assert_eq!(
            restored.recommend("gà rán giòn", Some(3)).ready().unwrap()[0],
            1
        );
        assert_eq!(restored.status(), engine.status());
    }

    #[test]
    fn test_default_limits() {
        let engine = Engine::in_memory().unwrap();
        let documents: Vec<Document> = (1..=20)
            .map(|id| Document::new(id).with_name(format!("Bò nướng kiểu {id}")))
            .collect();
        engine.train_search(&documents);

        assert_eq!(engine.search("bò nướng", None).ready().unwrap().len(), 10);
        assert_eq!(engine.related(1, None).unwrap().ready().unwrap().len(), 5);
    }

    #[test]
    fn test_unavailable_storage_reports_failure() {
        let dir = tempfile::TempDir::new().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"x").unwrap();

        let engine = Engine::new(EngineConfig::default().with_data_dir(&blocker)).unwrap();
        let report = engine.train_search(&catalog());
        assert!(report.is_trained());
        assert!(matches!(report.persistence, PersistStatus::Failed { .. }));
        assert_eq!(engine.search("bò", Some(5)), Outcome::Ready(vec![1]));
    }
}
