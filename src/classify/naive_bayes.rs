//! Multinomial Naive Bayes over term count features.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SaffronError};
use crate::vectorize::SparseVector;

/// Multinomial Naive Bayes classifier.
///
/// Class priors are the empirical class frequencies. Term likelihoods use
/// additive smoothing: `P(t|c) = (N_ct + alpha) / (N_c + alpha * n_features)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultinomialNb {
    alpha: f64,
    n_features: usize,
    /// Class labels, ascending.
    classes: Vec<i64>,
    /// `ln P(c)` per class.
    class_log_prior: Vec<f64>,
    /// `ln P(t|c)`: one row per class, one column per feature.
    feature_log_prob: Vec<Vec<f64>>,
}

impl MultinomialNb {
    /// Fit on count rows `x` with labels `y`.
    pub fn fit(x: &[SparseVector], y: &[i64], n_features: usize, alpha: f64) -> Result<Self> {
        if x.is_empty() {
            return Err(SaffronError::invalid_argument("Cannot fit with zero samples"));
        }
        if x.len() != y.len() {
            return Err(SaffronError::invalid_argument(
                "Number of samples in X and y must match",
            ));
        }
        if !(alpha > 0.0) {
            return Err(SaffronError::invalid_argument("alpha must be positive"));
        }

        let mut classes = y.to_vec();
        classes.sort_unstable();
        classes.dedup();

        let mut class_count = vec![0usize; classes.len()];
        let mut feature_count = vec![vec![0.0f64; n_features]; classes.len()];
        for (row, label) in x.iter().zip(y) {
            // `classes` holds every label, so the search always succeeds.
            let Ok(c) = classes.binary_search(label) else {
                continue;
            };
            class_count[c] += 1;
            for (column, value) in row.iter() {
                if let Some(slot) = feature_count[c].get_mut(column as usize) {
                    *slot += value;
                }
            }
        }

        let n_samples = x.len() as f64;
        let class_log_prior = class_count
            .iter()
            .map(|count| (*count as f64 / n_samples).ln())
            .collect();

        let feature_log_prob = feature_count
            .iter()
            .map(|counts| {
                let total: f64 = counts.iter().sum::<f64>() + alpha * n_features as f64;
                let log_total = total.ln();
                counts.iter().map(|n| (n + alpha).ln() - log_total).collect()
            })
            .collect();

        Ok(MultinomialNb {
            alpha,
            n_features,
            classes,
            class_log_prior,
            feature_log_prob,
        })
    }

    /// Class labels in the column order of [`predict_proba`](Self::predict_proba).
    pub fn classes(&self) -> &[i64] {
        &self.classes
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Unnormalized joint log likelihood `ln P(c) + sum_t x_t ln P(t|c)`.
    pub fn joint_log_likelihood(&self, x: &SparseVector) -> Vec<f64> {
        self.class_log_prior
            .iter()
            .zip(&self.feature_log_prob)
            .map(|(prior, log_probs)| {
                prior
                    + x.iter()
                        .filter_map(|(column, value)| {
                            log_probs.get(column as usize).map(|lp| value * lp)
                        })
                        .sum::<f64>()
            })
            .collect()
    }

    /// Posterior class probabilities, summing to one.
    pub fn predict_proba(&self, x: &SparseVector) -> Vec<f64> {
        let jll = self.joint_log_likelihood(x);
        let log_norm = log_sum_exp(&jll);
        jll.iter().map(|v| (v - log_norm).exp()).collect()
    }

    /// Most probable class.
    pub fn predict(&self, x: &SparseVector) -> Option<i64> {
        let jll = self.joint_log_likelihood(x);
        jll.iter()
            .enumerate()
            .fold(None, |best: Option<(usize, f64)>, (i, v)| match best {
                Some((_, b)) if b >= *v => best,
                _ => Some((i, *v)),
            })
            .map(|(i, _)| self.classes[i])
    }
}

fn log_sum_exp(values: &[f64]) -> f64 {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() {
        return max;
    }
    max + values.iter().map(|v| (v - max).exp()).sum::<f64>().ln()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(pairs: &[(u32, f64)]) -> SparseVector {
        SparseVector::from_pairs(pairs.iter().copied())
    }

    // Features: 0 = "gà", 1 = "pizza", 2 = "rán"
    fn fitted() -> MultinomialNb {
        let x = vec![counts(&[(0, 1.0), (2, 1.0)]), counts(&[(1, 1.0)])];
        MultinomialNb::fit(&x, &[1, 2], 3, 1.0).unwrap()
    }

    #[test]
    fn test_probabilities() {
        let model = fitted();
        assert_eq!(model.classes(), &[1, 2]);

        let proba = model.predict_proba(&counts(&[(0, 1.0), (2, 1.0)]));
        // 0.5 * 0.4 * 0.4 = 0.08 against 0.5 * 0.25 * 0.25 = 0.03125
        assert!((proba[0] - 0.08 / 0.11125).abs() < 1e-9);
        assert!((proba.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert_eq!(model.predict(&counts(&[(1, 2.0)])), Some(2));
    }

    #[test]
    fn test_empty_features_fall_back_to_priors() {
        let x = vec![counts(&[(0, 1.0)]), counts(&[(0, 1.0)]), counts(&[(1, 1.0)])];
        let model = MultinomialNb::fit(&x, &[7, 7, 3], 2, 1.0).unwrap();
        assert_eq!(model.classes(), &[3, 7]);
        let proba = model.predict_proba(&SparseVector::new());
        assert!((proba[0] - 1.0 / 3.0).abs() < 1e-9);
        assert!((proba[1] - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_class() {
        let model = MultinomialNb::fit(&[counts(&[(0, 1.0)])], &[4], 1, 1.0).unwrap();
        assert_eq!(model.predict_proba(&counts(&[(0, 3.0)])), vec![1.0]);
    }

    #[test]
    fn test_fit_errors() {
        assert!(MultinomialNb::fit(&[], &[], 3, 1.0).is_err());
        assert!(MultinomialNb::fit(&[SparseVector::new()], &[1, 2], 3, 1.0).is_err());
        assert!(MultinomialNb::fit(&[SparseVector::new()], &[1], 3, 0.0).is_err());
    }
}
