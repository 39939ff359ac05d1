use serde::{Deserialize, Serialize};

/// A fixed-size text vector produced by a semantic encoder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Embedding(pub Vec<f32>);

impl Embedding {
    /// Wrap raw components.
    pub fn new(values: Vec<f32>) -> Self {
        Self(values)
    }

    /// Number of dimensions.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the vector has no dimensions.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Raw components.
    pub fn values(&self) -> &[f32] {
        &self.0
    }

    /// Cosine similarity in `[-1, 1]`.
    ///
    /// Vectors of different length or with zero norm score `0.0`.
    pub fn cosine(&self, other: &Embedding) -> f32 {
        if self.0.len() != other.0.len() || self.0.is_empty() {
            return 0.0;
        }

        let mut dot = 0.0f32;
        let mut norm_a = 0.0f32;
        let mut norm_b = 0.0f32;
        for (a, b) in self.0.iter().zip(&other.0) {
            dot += a * b;
            norm_a += a * a;
            norm_b += b * b;
        }

        let denom = (norm_a * norm_b).sqrt();
        if denom > 1e-10 {
            (dot / denom).clamp(-1.0, 1.0)
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_vectors_score_one() {
        let a = Embedding::new(vec![0.0, 3.0, 4.0]);
        assert!((a.cosine(&a) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn orthogonal_vectors_score_zero() {
        let a = Embedding::new(vec![1.0, 0.0]);
        let b = Embedding::new(vec![0.0, 1.0]);
        assert_eq!(a.cosine(&b), 0.0);
    }

    #[test]
    fn mismatched_dimensions_score_zero() {
        let a = Embedding::new(vec![1.0, 0.0]);
        let b = Embedding::new(vec![1.0, 0.0, 0.0]);
        assert_eq!(a.cosine(&b), 0.0);
    }

    #[test]
    fn zero_vector_scores_zero() {
        let a = Embedding::new(vec![0.0, 0.0]);
        let b = Embedding::new(vec![1.0, 0.0]);
        assert_eq!(a.cosine(&b), 0.0);
    }
}
