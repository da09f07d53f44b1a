//! Category prediction from purchase history text.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::naive_bayes::MultinomialNb;
use super::sample::TrainingSample;
use crate::analysis::TextNormalizer;
use crate::artifact::{ArtifactSlot, Outcome};
use crate::config::RecommendConfig;
use crate::error::{Result, SaffronError};
use crate::vectorize::{CountVectorizer, TermAnalyzer};

/// A category with its predicted probability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category_id: i64,
    pub probability: f64,
}

/// A trained classifier: count features plus the Naive Bayes model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierArtifact {
    generation: Uuid,
    trained_at: DateTime<Utc>,
    vectorizer: CountVectorizer,
    model: MultinomialNb,
}

impl ClassifierArtifact {
    pub fn generation(&self) -> Uuid {
        self.generation
    }

    pub fn trained_at(&self) -> DateTime<Utc> {
        self.trained_at
    }

    pub fn vectorizer(&self) -> &CountVectorizer {
        &self.vectorizer
    }

    pub fn model(&self) -> &MultinomialNb {
        &self.model
    }

    /// Category ids the model can predict.
    pub fn classes(&self) -> &[i64] {
        self.model.classes()
    }

    /// Every class with its probability for already normalized text, most
    /// probable first. Equal probabilities keep ascending category order.
    pub fn rank(&self, normalized_text: &str) -> Vec<CategoryScore> {
        let features = self.vectorizer.transform(normalized_text);
        let probabilities = self.model.predict_proba(&features);
        let mut scores: Vec<CategoryScore> = self
            .model
            .classes()
            .iter()
            .zip(probabilities)
            .map(|(category_id, probability)| CategoryScore {
                category_id: *category_id,
                probability,
            })
            .collect();
        scores.sort_by(|a, b| b.probability.total_cmp(&a.probability));
        scores
    }
}

/// Maps purchase history text to likely product categories.
#[derive(Debug)]
pub struct CategoryClassifier {
    config: RecommendConfig,
    normalizer: Arc<TextNormalizer>,
    slot: ArtifactSlot<ClassifierArtifact>,
}

impl CategoryClassifier {
    /// Create an untrained classifier.
    pub fn new(config: RecommendConfig, normalizer: Arc<TextNormalizer>) -> Self {
        Self {
            config,
            normalizer,
            slot: ArtifactSlot::new(),
        }
    }

    /// Fit a new artifact on `samples` without publishing it.
    pub fn build(&self, samples: &[TrainingSample]) -> Result<ClassifierArtifact> {
        if samples.is_empty() {
            return Err(SaffronError::malformed("no training samples"));
        }

        info!("Preprocessing {} training samples", samples.len());
        let texts: Vec<String> = samples
            .iter()
            .map(|s| self.normalizer.normalize(&s.text_features))
            .collect();
        let labels: Vec<i64> = samples.iter().map(|s| s.category_id).collect();

        let mut vectorizer = CountVectorizer::new(
            TermAnalyzer::unigrams()?,
            Some(self.config.max_features),
            1,
        );
        let features = vectorizer.fit_transform(&texts)?;
        let model = MultinomialNb::fit(
            &features,
            &labels,
            vectorizer.vocabulary().len(),
            self.config.alpha,
        )?;
        info!(
            "Trained Naive Bayes model: {} classes, {} features",
            model.classes().len(),
            model.n_features()
        );

        Ok(ClassifierArtifact {
            generation: Uuid::new_v4(),
            trained_at: Utc::now(),
            vectorizer,
            model,
        })
    }

    /// Fit on `samples` and replace the current artifact.
    pub fn train(&self, samples: &[TrainingSample]) -> Result<Arc<ClassifierArtifact>> {
        let artifact = self.build(samples)?;
        Ok(self.install(artifact))
    }

    /// Publish an already built or restored artifact.
    pub fn install(&self, artifact: ClassifierArtifact) -> Arc<ClassifierArtifact> {
        debug!("installing classifier artifact {}", artifact.generation());
        self.slot.publish(artifact)
    }

    pub fn artifact(&self) -> Option<Arc<ClassifierArtifact>> {
        self.slot.current()
    }

    pub fn is_trained(&self) -> bool {
        self.slot.is_loaded()
    }

    /// Categories scoring above the probability floor, best first, at most `top_n`.
    pub fn rank_categories(&self, text: &str, top_n: usize) -> Outcome<Vec<CategoryScore>> {
        let Some(artifact) = self.slot.current() else {
            debug!("classifier not trained");
            return Outcome::Untrained;
        };

        let normalized = self.normalizer.normalize(text);
        if normalized.is_empty() {
            return Outcome::Ready(Vec::new());
        }

        let ranked = artifact
            .rank(&normalized)
            .into_iter()
            .filter(|score| score.probability > self.config.min_probability)
            .take(top_n)
            .collect();
        Outcome::Ready(ranked)
    }

    /// Category ids likely to interest a user with this purchase history.
    pub fn predict_top_categories(&self, text: &str, top_n: usize) -> Outcome<Vec<i64>> {
        self.rank_categories(text, top_n)
            .map(|scores| scores.into_iter().map(|s| s.category_id).collect())
    }
}
