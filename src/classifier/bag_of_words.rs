//! Naive-Bayes-style bag-of-words classifier.
//!
//! Training builds an immutable [`VocabularyModel`]: class priors plus
//! Laplace-smoothed per-token conditional probabilities over the union
//! vocabulary of both classes. Prediction accumulates log probabilities
//! (avoiding underflow from multiplying many small numbers) and reports the
//! posterior of the winning class.
//!
//! Tokens outside the trained vocabulary contribute nothing at inference
//! time. They are skipped rather than given a smoothing floor; this is a
//! deliberate asymmetry, not an oversight.

use ahash::{AHashMap, AHashSet};
use serde::Serialize;

use crate::classifier::{Label, Prediction};
use crate::error::{Result, SpamsiftError};

/// Smoothed conditional probabilities for one vocabulary token.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TokenProbability {
    /// `P(token | spam)` after Laplace smoothing.
    pub spam: f64,
    /// `P(token | ham)` after Laplace smoothing.
    pub ham: f64,
}

/// Immutable trained state of the bag-of-words classifier.
///
/// Built once per training call and read-only afterward; retraining
/// produces a fresh model rather than merging into an existing one.
/// Serializable for inspection; no load path exists because model
/// persistence is out of scope.
#[derive(Debug, Clone, Serialize)]
pub struct VocabularyModel {
    spam_prior: f64,
    ham_prior: f64,
    token_probs: AHashMap<String, TokenProbability>,
}

impl VocabularyModel {
    /// Train a model from normalized texts and their labels.
    ///
    /// Texts must already be normalized; training tokenizes by whitespace
    /// only. Fails with [`SpamsiftError::EmptyCorpus`] when there are no
    /// examples or no examples of one class, since priors and conditional
    /// probabilities would be undefined.
    pub fn train(cleaned_texts: &[String], labels: &[Label]) -> Result<VocabularyModel> {
        if cleaned_texts.len() != labels.len() {
            return Err(SpamsiftError::invalid_argument(format!(
                "{} texts but {} labels",
                cleaned_texts.len(),
                labels.len()
            )));
        }
        if cleaned_texts.is_empty() {
            return Err(SpamsiftError::empty_corpus("no training examples"));
        }

        let total = cleaned_texts.len();
        let spam_total = labels.iter().filter(|l| l.is_spam()).count();
        let ham_total = total - spam_total;
        if spam_total == 0 || ham_total == 0 {
            return Err(SpamsiftError::empty_corpus(format!(
                "both classes required: {spam_total} spam, {ham_total} ham"
            )));
        }

        let mut spam_counts: AHashMap<&str, u64> = AHashMap::new();
        let mut ham_counts: AHashMap<&str, u64> = AHashMap::new();
        let mut vocabulary: AHashSet<&str> = AHashSet::new();

        for (text, label) in cleaned_texts.iter().zip(labels) {
            let counts = if label.is_spam() {
                &mut spam_counts
            } else {
                &mut ham_counts
            };
            for token in text.split_whitespace() {
                *counts.entry(token).or_insert(0) += 1;
                vocabulary.insert(token);
            }
        }

        let vocab_size = vocabulary.len() as f64;
        let spam_tokens: u64 = spam_counts.values().sum();
        let ham_tokens: u64 = ham_counts.values().sum();

        // Laplace smoothing keeps every vocabulary token's probability
        // nonzero under both classes, even if it was seen in only one.
        let mut token_probs = AHashMap::with_capacity(vocabulary.len());
        for token in vocabulary {
            let spam_count = spam_counts.get(token).copied().unwrap_or(0) as f64;
            let ham_count = ham_counts.get(token).copied().unwrap_or(0) as f64;
            token_probs.insert(
                token.to_string(),
                TokenProbability {
                    spam: (spam_count + 1.0) / (spam_tokens as f64 + vocab_size),
                    ham: (ham_count + 1.0) / (ham_tokens as f64 + vocab_size),
                },
            );
        }

        Ok(VocabularyModel {
            spam_prior: spam_total as f64 / total as f64,
            ham_prior: ham_total as f64 / total as f64,
            token_probs,
        })
    }

    /// Classify a normalized text.
    ///
    /// The returned confidence is the posterior probability of the
    /// *predicted* class: `1 / (1 + exp(losing_score - winning_score))`
    /// over the log-space class scores.
    pub fn predict(&self, cleaned_text: &str) -> Prediction {
        let mut log_spam = self.spam_prior.ln();
        let mut log_ham = self.ham_prior.ln();

        for token in cleaned_text.split_whitespace() {
            if let Some(probs) = self.token_probs.get(token) {
                log_spam += probs.spam.ln();
                log_ham += probs.ham.ln();
            }
        }

        if log_spam > log_ham {
            Prediction {
                label: Label::Spam,
                confidence: 1.0 / (1.0 + (log_ham - log_spam).exp()),
            }
        } else {
            Prediction {
                label: Label::Ham,
                confidence: 1.0 / (1.0 + (log_spam - log_ham).exp()),
            }
        }
    }

    /// Trained class prior `P(spam)`.
    pub fn spam_prior(&self) -> f64 {
        self.spam_prior
    }

    /// Trained class prior `P(ham)`.
    pub fn ham_prior(&self) -> f64 {
        self.ham_prior
    }

    /// Number of distinct tokens seen during training.
    pub fn vocabulary_size(&self) -> usize {
        self.token_probs.len()
    }

    /// Smoothed probabilities for a vocabulary token, if present.
    pub fn token_probability(&self, token: &str) -> Option<&TokenProbability> {
        self.token_probs.get(token)
    }

    /// Iterate over the trained vocabulary.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.token_probs.keys().map(String::as_str)
    }
}
