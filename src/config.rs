//! Engine configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SaffronError};

/// Top-level configuration for an [`Engine`](crate::engine::Engine).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Directory holding persisted artifacts.
    /// If None, trained artifacts live in memory only.
    pub data_dir: Option<PathBuf>,

    /// Text analysis resources.
    pub analysis: AnalysisConfig,

    /// Search side parameters.
    pub search: SearchConfig,

    /// Recommendation side parameters.
    pub recommend: RecommendConfig,
}

impl EngineConfig {
    /// Load a configuration from a JSON file. Missing keys take their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            SaffronError::config(format!("Failed to read config '{}': {e}", path.display()))
        })?;
        let config: EngineConfig = serde_json::from_str(&content).map_err(|e| {
            SaffronError::config(format!("Failed to parse config '{}': {e}", path.display()))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Set the data directory.
    pub fn with_data_dir<P: Into<PathBuf>>(mut self, data_dir: P) -> Self {
        self.data_dir = Some(data_dir.into());
        self
    }

    /// Check parameter ranges.
    pub fn validate(&self) -> Result<()> {
        let (min_n, max_n) = self.search.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(SaffronError::config(format!(
                "invalid ngram_range ({min_n}, {max_n})"
            )));
        }
        if self.search.max_features == 0 || self.recommend.max_features == 0 {
            return Err(SaffronError::config("max_features must be positive"));
        }
        if self.search.min_df == 0 {
            return Err(SaffronError::config("min_df must be at least 1"));
        }
        if !(self.recommend.alpha > 0.0) {
            return Err(SaffronError::config("alpha must be positive"));
        }
        Ok(())
    }
}

/// Resource files used by the text normalizer and query expander.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Stopword list, one word per line. Missing file means no stop words.
    pub stopwords_path: Option<PathBuf>,

    /// Compound word dictionary for word segmentation.
    /// If None, text is split on whitespace only.
    pub dictionary_path: Option<PathBuf>,

    /// JSON lexicon replacing the built-in bilingual lexicon.
    pub lexicon_path: Option<PathBuf>,
}

/// Parameters of the TF-IDF search index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Vocabulary size cap.
    pub max_features: usize,

    /// Inclusive n-gram range over word tokens.
    pub ngram_range: (usize, usize),

    /// Minimum number of documents a term must occur in.
    pub min_df: usize,

    /// Results must score strictly above this similarity.
    pub min_score: f64,

    /// Result count for `search` when none is given.
    pub default_limit: usize,

    /// Result count for `related` when none is given.
    pub related_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_features: 5000,
            ngram_range: (1, 2),
            min_df: 1,
            min_score: 0.01,
            default_limit: 10,
            related_limit: 5,
        }
    }
}

/// Parameters of the category classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendConfig {
    /// Vocabulary size cap of the count features.
    pub max_features: usize,

    /// Additive (Laplace) smoothing.
    pub alpha: f64,

    /// Categories must score strictly above this probability.
    pub min_probability: f64,

    /// Result count for `recommend` when none is given.
    pub default_limit: usize,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            max_features: 2000,
            alpha: 1.0,
            min_probability: 0.05,
            default_limit: 5,
        }
    }
}
