use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

use crate::models::{FeatureVector, TechniqueCode};

/// Errors raised while loading or invoking a classifier
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("Failed to read model artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse model artifact: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Model has no training samples")]
    EmptyModel,

    #[error("Invalid neighbor count k={k} for {samples} samples")]
    InvalidK { k: usize, samples: usize },

    #[error("Feature vector has {actual} columns, model expects {expected}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// Classifier producing a technique code from a feature vector
///
/// Implementations do not validate code ranges; callers decode input first.
pub trait TechniqueClassifier: Send + Sync {
    fn predict(&self, features: &FeatureVector) -> Result<TechniqueCode, ClassifierError>;
}

/// Labeled training sample stored in the model artifact
#[derive(Debug, Clone, Deserialize)]
pub struct TrainingSample {
    pub features: Vec<u32>,
    pub label: u32,
}

#[derive(Debug, Deserialize)]
struct ModelArtifact {
    k: usize,
    samples: Vec<TrainingSample>,
}

/// k-nearest-neighbor classifier over categorical codes
///
/// Euclidean distance, uniform majority vote. Vote ties resolve to the
/// smallest label; distance ties keep training order.
#[derive(Debug, Clone)]
pub struct KnnClassifier {
    k: usize,
    dimensions: usize,
    samples: Vec<TrainingSample>,
}

impl KnnClassifier {
    pub fn new(k: usize, samples: Vec<TrainingSample>) -> Result<Self, ClassifierError> {
        let first = samples.first().ok_or(ClassifierError::EmptyModel)?;
        let dimensions = first.features.len();

        if k == 0 || k > samples.len() {
            return Err(ClassifierError::InvalidK { k, samples: samples.len() });
        }

        if let Some(bad) = samples.iter().find(|s| s.features.len() != dimensions) {
            return Err(ClassifierError::DimensionMismatch {
                expected: dimensions,
                actual: bad.features.len(),
            });
        }

        Ok(Self { k, dimensions, samples })
    }

    /// Load a JSON model artifact from disk
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ClassifierError> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::from_slice(&bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, ClassifierError> {
        let artifact: ModelArtifact = serde_json::from_slice(bytes)?;
        Self::new(artifact.k, artifact.samples)
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }
}

#[inline]
fn squared_distance(a: &[u32], b: &[u32]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(&x, &y)| {
            let d = x as f64 - y as f64;
            d * d
        })
        .sum()
}

impl TechniqueClassifier for KnnClassifier {
    fn predict(&self, features: &FeatureVector) -> Result<TechniqueCode, ClassifierError> {
        if features.len() != self.dimensions {
            return Err(ClassifierError::DimensionMismatch {
                expected: self.dimensions,
                actual: features.len(),
            });
        }

        let mut neighbors: Vec<(f64, u32)> = self
            .samples
            .iter()
            .map(|s| (squared_distance(&s.features, features.as_slice()), s.label))
            .collect();

        // Stable sort keeps training order among equidistant samples
        neighbors.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

        let mut votes: BTreeMap<u32, usize> = BTreeMap::new();
        for &(_, label) in neighbors.iter().take(self.k) {
            *votes.entry(label).or_insert(0) += 1;
        }

        // BTreeMap iterates labels ascending; keep the first maximum
        let mut best: Option<(u32, usize)> = None;
        for (label, count) in votes {
            if best.map_or(true, |(_, c)| count > c) {
                best = Some((label, count));
            }
        }

        best.map(|(label, _)| TechniqueCode(label))
            .ok_or(ClassifierError::EmptyModel)
    }
}
