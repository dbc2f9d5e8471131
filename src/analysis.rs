//! Text analysis module for Spamsift.
//!
//! This module provides the lossy normalization pipeline that turns raw
//! email text into the canonical lower-case token stream consumed by the
//! classifiers.

pub mod normalizer;

// Re-export commonly used types
pub use normalizer::*;
