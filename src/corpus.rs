//! Labeled corpus acquisition for classifier training.
//!
//! The classifier core is agnostic to where training data comes from: it
//! only consumes the [`CorpusProvider`] trait. The bundled
//! [`synthetic::SyntheticCorpusGenerator`] produces template-derived
//! examples for demos and tests; a production deployment would supply a
//! provider backed by a real labeled dataset instead.

pub mod synthetic;

// Re-export commonly used types
pub use synthetic::*;

use serde::{Deserialize, Serialize};

use crate::classifier::Label;
use crate::error::Result;

/// One labeled training or evaluation example.
///
/// Immutable once created; consumed only during training and evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledExample {
    /// Raw, unnormalized message body.
    pub raw_text: String,
    /// Raw subject line; empty when the source has none.
    pub subject: String,
    /// Ground-truth class.
    pub label: Label,
}

impl LabeledExample {
    /// Create an example with an empty subject line.
    pub fn new<S: Into<String>>(raw_text: S, label: Label) -> Self {
        LabeledExample {
            raw_text: raw_text.into(),
            subject: String::new(),
            label,
        }
    }

    /// Create an example with a subject line.
    pub fn with_subject<S: Into<String>, T: Into<String>>(
        raw_text: S,
        subject: T,
        label: Label,
    ) -> Self {
        LabeledExample {
            raw_text: raw_text.into(),
            subject: subject.into(),
            label,
        }
    }
}

/// Source of labeled examples for training and evaluation.
pub trait CorpusProvider {
    /// Produce a labeled corpus.
    ///
    /// Providers backed by randomness may return a different corpus on each
    /// call; deterministic providers return the same sequence every time.
    fn corpus(&self) -> Result<Vec<LabeledExample>>;
}

/// A provider that hands out a fixed, prebuilt corpus.
///
/// This is the substitution point for real labeled datasets: load the
/// examples however you like, then wrap them in a `StaticCorpusProvider`.
#[derive(Debug, Clone, Default)]
pub struct StaticCorpusProvider {
    examples: Vec<LabeledExample>,
}

impl StaticCorpusProvider {
    /// Create a provider over a prebuilt example list.
    pub fn new(examples: Vec<LabeledExample>) -> Self {
        StaticCorpusProvider { examples }
    }

    /// Number of examples this provider will return.
    pub fn len(&self) -> usize {
        self.examples.len()
    }

    /// Whether this provider has no examples.
    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }
}

impl CorpusProvider for StaticCorpusProvider {
    fn corpus(&self) -> Result<Vec<LabeledExample>> {
        Ok(self.examples.clone())
    }
}
