//! Threshold interpretation of predictions.

use crate::classifier::Prediction;
use crate::constants::dataset::TARGET_LABEL;

/// What the demo tells the user about a prediction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Verdict {
    /// Target label with a score above the threshold.
    Target {
        /// Model confidence.
        score: f64,
    },
    /// Target label, but not confident enough.
    BelowThreshold {
        /// Model confidence.
        score: f64,
        /// Threshold the score failed to exceed.
        threshold: f64,
    },
    /// Any other label.
    Other {
        /// Model confidence.
        score: f64,
    },
}

impl Verdict {
    /// Interpret `prediction` against `threshold`.
    ///
    /// The target label only wins when its score is strictly greater than
    /// the threshold.
    pub fn from_prediction(prediction: &Prediction, threshold: f64) -> Self {
        let score = prediction.score;
        if prediction.label != TARGET_LABEL {
            Self::Other { score }
        } else if score > threshold {
            Self::Target { score }
        } else {
            Self::BelowThreshold { score, threshold }
        }
    }

    /// Whether the verdict attributes the lyrics to the target artist.
    pub const fn is_target(&self) -> bool {
        matches!(self, Self::Target { .. })
    }

    /// One-line summary shown above the verdict.
    pub fn headline(&self) -> String {
        match self {
            Self::Target { score } => format!("Bob - Score : {}", round2(*score)),
            Self::BelowThreshold { score, threshold } => {
                format!("Not Bob - Bob's score < {} ({})", round2(*threshold), round2(*score))
            }
            Self::Other { score } => format!("Not Bob - Score : {}", round2(*score)),
        }
    }
}

/// Round to two decimals for display, dropping trailing zeros.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
