//! Cosine similarity ranking over a trained [`SearchArtifact`].
//!
//! [`SearchArtifact`]: crate::index::SearchArtifact

use std::cmp::Ordering;
use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::artifact::Outcome;
use crate::error::{Result, SaffronError};
use crate::expansion::QueryExpander;
use crate::index::{SearchArtifact, VectorSpaceIndex};
use crate::vectorize::SparseVector;

/// A ranked document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: i64,
    pub score: f64,
}

/// Indices of the `top_n` highest scores, best first.
///
/// Equal scores keep row order, so the earlier row ranks higher.
pub fn rank_top(scores: &[f64], top_n: usize) -> Vec<usize> {
    rank_top_where(scores, top_n, |_| true)
}

fn rank_top_where<F>(scores: &[f64], top_n: usize, keep: F) -> Vec<usize>
where
    F: Fn(usize) -> bool,
{
    if top_n == 0 {
        return Vec::new();
    }
    let mut order: Vec<usize> = (0..scores.len()).filter(|i| keep(*i)).collect();
    order.sort_by(|a, b| {
        scores[*b]
            .partial_cmp(&scores[*a])
            .unwrap_or(Ordering::Equal)
    });
    order.truncate(top_n);
    order
}

/// Scores queries and products against the catalog.
pub struct SimilarityRanker {
    index: Arc<VectorSpaceIndex>,
    expander: Arc<dyn QueryExpander>,
    min_score: f64,
}

impl std::fmt::Debug for SimilarityRanker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimilarityRanker")
            .field("expander", &self.expander.name())
            .field("min_score", &self.min_score)
            .finish()
    }
}

impl SimilarityRanker {
    pub fn new(index: Arc<VectorSpaceIndex>, expander: Arc<dyn QueryExpander>) -> Self {
        let min_score = index.config().min_score;
        Self {
            index,
            expander,
            min_score,
        }
    }

    pub fn index(&self) -> &Arc<VectorSpaceIndex> {
        &self.index
    }

    /// Normalized query followed by its expansion, whitespace collapsed.
    ///
    /// Both forms are kept, so terms present in each count twice.
    pub fn enhance_query(&self, query: &str) -> String {
        let normalized = self.index.normalizer().normalize(query);
        let expanded = self.expander.expand(query);
        format!("{normalized} {expanded}")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Rank products against a free text query.
    pub fn search(&self, query: &str, top_n: usize) -> Outcome<Vec<SearchHit>> {
        let Some(artifact) = self.index.artifact() else {
            debug!("search index not trained");
            return Outcome::Untrained;
        };

        let enhanced = self.enhance_query(query);
        debug!("Original query: {query}");
        debug!("Enhanced query: {enhanced}");
        if enhanced.is_empty() {
            return Outcome::Ready(Vec::new());
        }

        let query_vector = artifact.transform(&enhanced);
        let scores = similarities(&query_vector, &artifact);
        let ranked = rank_top(&scores, top_n);
        Outcome::Ready(self.collect_hits(&artifact, &scores, ranked))
    }

    /// Products most similar to the product `id`, never including `id` itself.
    ///
    /// Fails with [`SaffronError::NotFound`] when `id` is not in the trained
    /// catalog.
    pub fn find_similar(&self, id: i64, top_n: usize) -> Result<Outcome<Vec<SearchHit>>> {
        let Some(artifact) = self.index.artifact() else {
            debug!("search index not trained");
            return Ok(Outcome::Untrained);
        };

        let target = artifact.position_of(id).ok_or_else(|| {
            SaffronError::not_found(format!(
                "Product with ID {id} not found in the trained data"
            ))
        })?;

        let scores = similarities(&artifact.matrix()[target], &artifact);
        let documents = artifact.documents();
        let ranked = rank_top_where(&scores, top_n, |row| documents[row].id != id);
        Ok(Outcome::Ready(self.collect_hits(&artifact, &scores, ranked)))
    }

    fn collect_hits(
        &self,
        artifact: &SearchArtifact,
        scores: &[f64],
        ranked: Vec<usize>,
    ) -> Vec<SearchHit> {
        ranked
            .into_iter()
            .filter(|row| scores[*row] > self.min_score)
            .map(|row| {
                let hit = SearchHit {
                    id: artifact.documents()[row].id,
                    score: scores[row],
                };
                debug!("Match: ID {}, Score: {:.4}", hit.id, hit.score);
                hit
            })
            .collect()
    }
}

/// Cosine similarity of `vector` against every row, clamped to `[0, 1]`.
fn similarities(vector: &SparseVector, artifact: &SearchArtifact) -> Vec<f64> {
    artifact
        .matrix()
        .iter()
        .map(|row| vector.cosine(row).clamp(0.0, 1.0))
        .collect()
}
