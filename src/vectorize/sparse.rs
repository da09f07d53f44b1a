//! Sparse weight vectors.

use serde::{Deserialize, Serialize};

/// A sparse vector with strictly increasing column indices.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SparseVector {
    indices: Vec<u32>,
    values: Vec<f64>,
}

impl SparseVector {
    /// Create an empty vector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a vector from `(column, value)` pairs in any order.
    ///
    /// Repeated columns are summed and zero entries dropped.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (u32, f64)>,
    {
        let mut pairs: Vec<(u32, f64)> = pairs.into_iter().collect();
        pairs.sort_by_key(|(index, _)| *index);

        let mut indices: Vec<u32> = Vec::with_capacity(pairs.len());
        let mut values: Vec<f64> = Vec::with_capacity(pairs.len());
        for (index, value) in pairs {
            match indices.last() {
                Some(&last) if last == index => {
                    if let Some(v) = values.last_mut() {
                        *v += value;
                    }
                }
                _ => {
                    indices.push(index);
                    values.push(value);
                }
            }
        }

        let mut vector = SparseVector { indices, values };
        vector.retain_nonzero();
        vector
    }

    /// Number of stored entries.
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Iterate over `(column, value)` entries in column order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }

    /// Value at `column`, zero when absent.
    pub fn get(&self, column: u32) -> f64 {
        match self.indices.binary_search(&column) {
            Ok(pos) => self.values[pos],
            Err(_) => 0.0,
        }
    }

    /// Multiply every entry by the weight of its column.
    pub fn scale_columns(&mut self, weights: &[f64]) {
        for (index, value) in self.indices.iter().zip(self.values.iter_mut()) {
            *value *= weights.get(*index as usize).copied().unwrap_or(0.0);
        }
        self.retain_nonzero();
    }

    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.indices.len() && j < other.indices.len() {
            match self.indices[i].cmp(&other.indices[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += self.values[i] * other.values[j];
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    /// Euclidean norm.
    pub fn norm(&self) -> f64 {
        self.values.iter().map(|v| v * v).sum::<f64>().sqrt()
    }

    /// Scale to unit Euclidean length. Zero vectors are left unchanged.
    pub fn l2_normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for value in &mut self.values {
                *value /= norm;
            }
        }
    }

    /// Cosine similarity; zero when either vector is zero.
    pub fn cosine(&self, other: &SparseVector) -> f64 {
        let denominator = self.norm() * other.norm();
        if denominator == 0.0 {
            return 0.0;
        }
        self.dot(other) / denominator
    }

    fn retain_nonzero(&mut self) {
        if self.values.iter().all(|v| *v != 0.0) {
            return;
        }
        let (indices, values): (Vec<u32>, Vec<f64>) =
            self.iter().filter(|(_, value)| *value != 0.0).unzip();
        self.indices = indices;
        self.values = values;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pairs_sorts_and_merges() {
        let vector = SparseVector::from_pairs(vec![(3, 1.0), (1, 2.0), (3, 1.5), (2, 0.0)]);
        assert_eq!(vector.indices(), &[1, 3]);
        assert_eq!(vector.values(), &[2.0, 2.5]);
        assert_eq!(vector.get(3), 2.5);
        assert_eq!(vector.get(2), 0.0);
    }

    #[test]
    fn test_dot_and_cosine() {
        let a = SparseVector::from_pairs(vec![(0, 1.0), (2, 1.0)]);
        let b = SparseVector::from_pairs(vec![(2, 1.0), (5, 1.0)]);
        assert_eq!(a.dot(&b), 1.0);
        assert!((a.cosine(&b) - 0.5).abs() < 1e-12);
        assert!((a.cosine(&a) - 1.0).abs() < 1e-12);
        assert_eq!(a.cosine(&SparseVector::new()), 0.0);
    }

    #[test]
    fn test_l2_normalize() {
        let mut vector = SparseVector::from_pairs(vec![(0, 3.0), (1, 4.0)]);
        vector.l2_normalize();
        assert!((vector.norm() - 1.0).abs() < 1e-12);
        assert!((vector.get(0) - 0.6).abs() < 1e-12);

        let mut zero = SparseVector::new();
        zero.l2_normalize();
        assert!(zero.is_empty());
    }

    #[test]
    fn test_scale_columns() {
        let mut vector = SparseVector::from_pairs(vec![(0, 2.0), (1, 1.0)]);
        vector.scale_columns(&[0.5, 0.0]);
        assert_eq!(vector.indices(), &[0]);
        assert_eq!(vector.values(), &[1.0]);
    }
}
