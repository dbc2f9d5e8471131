//! # Spamsift
//!
//! An ensemble email spam classifier for Rust.
//!
//! ## Features
//!
//! - Pure Rust implementation
//! - Lossy text normalization pipeline for email bodies and subjects
//! - Hand-engineered, fixed-schema feature extraction
//! - Naive-Bayes-style bag-of-words classifier with Laplace smoothing
//! - Linear feature-weight classifier
//! - Fixed-weight ensemble combination with per-classifier breakdown
//! - Pluggable corpus providers (synthetic generator included)

pub mod analysis;
pub mod classifier;
pub mod cli;
pub mod corpus;
pub mod error;
pub mod features;

pub mod prelude {
    //! Convenience re-exports of the public classification surface.

    pub use crate::analysis::normalizer::TextNormalizer;
    pub use crate::classifier::ensemble::{EnsembleClassifier, EnsembleModel};
    pub use crate::classifier::{EnsembleResult, EvaluationReport, Label, Prediction};
    pub use crate::corpus::synthetic::SyntheticCorpusGenerator;
    pub use crate::corpus::{CorpusProvider, LabeledExample, StaticCorpusProvider};
    pub use crate::error::{Result, SpamsiftError};
    pub use crate::features::{FeatureExtractor, FeatureVector};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
