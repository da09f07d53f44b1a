//! # Saffron
//!
//! Bilingual (Vietnamese/English) lexical search and category recommendation
//! for a food product catalog.
//!
//! ## Features
//!
//! - Vietnamese text normalization with compound-word joining
//! - Vietnamese to English query expansion from a phrase lexicon
//! - TF-IDF search and related products by cosine similarity
//! - Multinomial Naive Bayes category recommendation
//! - Versioned, checksummed artifact persistence with atomic swaps

pub mod analysis;
pub mod artifact;
pub mod classify;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod expansion;
pub mod index;
pub mod persistence;
pub mod search;
pub mod storage;
pub mod vectorize;

pub mod prelude {
    pub use crate::artifact::Outcome;
    pub use crate::classify::TrainingSample;
    pub use crate::config::EngineConfig;
    pub use crate::engine::{Engine, PersistStatus, TrainReport, TrainStatus};
    pub use crate::error::{Result, SaffronError};
    pub use crate::index::Document;
    pub use crate::search::SearchHit;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
