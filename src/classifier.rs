//! Spam classifiers and the ensemble that combines them.
//!
//! Two independently trained classifiers contribute to every decision: a
//! Naive-Bayes-style bag-of-words model over normalized text
//! ([`bag_of_words`]) and a linear model over engineered features
//! ([`feature_weight`]). The [`ensemble`] module trains both from one
//! labeled corpus and blends their confidences with fixed weights.
//!
//! Training produces immutable model values; retraining builds a fresh
//! snapshot rather than mutating the old one, so a trained model can keep
//! serving read-only predictions while its replacement is being built.

pub mod bag_of_words;
pub mod ensemble;
pub mod feature_weight;

// Re-export commonly used types
pub use bag_of_words::*;
pub use ensemble::*;
pub use feature_weight::*;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::features::FeatureVector;

/// Binary classification label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    /// Unsolicited or malicious email.
    Spam,
    /// Legitimate email.
    Ham,
}

impl Label {
    /// Whether this label is [`Label::Spam`].
    pub fn is_spam(self) -> bool {
        matches!(self, Label::Spam)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Spam => write!(f, "spam"),
            Label::Ham => write!(f, "ham"),
        }
    }
}

/// A single classifier's output.
///
/// `confidence` lies in `[0, 1]`. For the bag-of-words classifier it is the
/// estimated probability of the *predicted* class; for the feature-weight
/// classifier it is the estimated probability of spam regardless of the
/// predicted label. Callers must interpret it alongside `label` and must not
/// assume it means "P(spam)".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Predicted class.
    pub label: Label,
    /// Model confidence in `[0, 1]`; see the type-level note on semantics.
    pub confidence: f64,
}

/// Per-classifier detail attached to an [`EnsembleResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierBreakdown {
    /// Bag-of-words prediction (confidence of the predicted class).
    pub bag_of_words: Prediction,
    /// Feature-weight prediction (confidence is probability of spam).
    pub feature_weight: Prediction,
    /// The feature vector the feature-weight classifier scored.
    pub features: FeatureVector,
}

/// Final ensemble decision for one message.
///
/// Derived per call, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnsembleResult {
    /// Combined label.
    pub label: Label,
    /// Fixed-weight blend of the two classifiers' spam confidences;
    /// greater than 0.5 exactly when `label` is spam.
    pub confidence: f64,
    /// Per-classifier detail.
    pub breakdown: ClassifierBreakdown,
}

/// Confusion-matrix metrics from an evaluation pass.
///
/// `precision`, `recall` and `f1` are defined as 0 when their denominator
/// is 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Fraction of examples classified correctly.
    pub accuracy: f64,
    /// `tp / (tp + fp)`, 0 when no positives were predicted.
    pub precision: f64,
    /// `tp / (tp + fn)`, 0 when no positives were labeled.
    pub recall: f64,
    /// Harmonic mean of precision and recall, 0 when both are 0.
    pub f1: f64,
    /// Spam examples predicted spam.
    pub true_positives: u64,
    /// Ham examples predicted ham.
    pub true_negatives: u64,
    /// Ham examples predicted spam.
    pub false_positives: u64,
    /// Spam examples predicted ham.
    pub false_negatives: u64,
}
