//! Category recommendation.
//!
//! A [`CategoryClassifier`] turns a user's aggregated purchase history into
//! the product categories they most likely favor, using term counts and a
//! multinomial Naive Bayes model.

pub mod classifier;
pub mod naive_bayes;
pub mod sample;

pub use classifier::{CategoryClassifier, CategoryScore, ClassifierArtifact};
pub use naive_bayes::MultinomialNb;
pub use sample::{TrainingSample, parse_training_samples};
