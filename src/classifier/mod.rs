//! Lyrics classification.
//!
//! The model itself is an opaque hosted capability; this module wraps the
//! call, shares one client per process and interprets its output against a
//! confidence threshold.

/// Hosted inference client
pub mod inference;
/// Threshold interpretation of predictions
pub mod verdict;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::Result;

pub use inference::{shared_classifier, InferenceClassifier};
pub use verdict::Verdict;

/// Top label returned by the model with its confidence.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Prediction {
    /// Label name as the model reports it (`Bob` or `Not_bob`).
    pub label: String,
    /// Confidence in `[0, 1]`.
    pub score: f64,
}

/// Anything that can score a lyrics snippet.
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Classify `text`, returning the highest-scoring label.
    async fn classify(&self, text: &str) -> Result<Prediction>;

    /// Get the name of this classifier (for debugging/logging).
    fn name(&self) -> &str;
}
