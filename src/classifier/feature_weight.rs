//! Linear classifier over the engineered feature schema.
//!
//! Training computes, for every feature, the mean value among spam examples
//! and among ham examples, and turns their separation into a signed weight:
//! `|spam_mean - ham_mean| / (spam_mean + ham_mean + 1e-10)`, positive when
//! the feature runs higher in spam. This is a discriminative-power
//! heuristic, not a fitted coefficient.
//!
//! Prediction is a weighted sum squashed through a sigmoid against a fixed
//! 0.5 threshold. The returned confidence is the raw sigmoid output, i.e.
//! the estimated probability of spam regardless of which label won: a
//! confidence near 0 is a strong ham signal, not a weak prediction.

use ahash::AHashMap;
use serde::Serialize;

use crate::classifier::{Label, Prediction};
use crate::error::{Result, SpamsiftError};
use crate::features::FeatureVector;

/// Division guard for features whose means are both zero.
const WEIGHT_EPSILON: f64 = 1e-10;

/// Fixed decision threshold on the sigmoid output.
const SPAM_THRESHOLD: f64 = 0.5;

/// Immutable trained state of the feature-weight classifier.
///
/// Serializable for inspection; no load path exists because model
/// persistence is out of scope.
#[derive(Debug, Clone, Serialize)]
pub struct WeightModel {
    weights: AHashMap<&'static str, f64>,
    threshold: f64,
}

impl WeightModel {
    /// Train a model from feature vectors and their labels.
    ///
    /// Fails with [`SpamsiftError::EmptyCorpus`] when there are no examples
    /// or no examples of one class; a feature absent from one class would
    /// have an undefined mean.
    pub fn train(vectors: &[FeatureVector], labels: &[Label]) -> Result<WeightModel> {
        if vectors.len() != labels.len() {
            return Err(SpamsiftError::invalid_argument(format!(
                "{} feature vectors but {} labels",
                vectors.len(),
                labels.len()
            )));
        }
        if vectors.is_empty() {
            return Err(SpamsiftError::empty_corpus("no training examples"));
        }

        let spam_total = labels.iter().filter(|l| l.is_spam()).count();
        let ham_total = vectors.len() - spam_total;
        if spam_total == 0 || ham_total == 0 {
            return Err(SpamsiftError::empty_corpus(format!(
                "both classes required: {spam_total} spam, {ham_total} ham"
            )));
        }

        let mut weights = AHashMap::with_capacity(FeatureVector::NAMES.len());
        for name in FeatureVector::NAMES {
            let mut spam_sum = 0.0;
            let mut ham_sum = 0.0;
            for (vector, label) in vectors.iter().zip(labels) {
                let value = vector.get(name).unwrap_or(0.0);
                if label.is_spam() {
                    spam_sum += value;
                } else {
                    ham_sum += value;
                }
            }

            let spam_mean = spam_sum / spam_total as f64;
            let ham_mean = ham_sum / ham_total as f64;

            let magnitude = (spam_mean - ham_mean).abs() / (spam_mean + ham_mean + WEIGHT_EPSILON);
            let weight = if spam_mean > ham_mean {
                magnitude
            } else {
                -magnitude
            };
            weights.insert(name, weight);
        }

        Ok(WeightModel {
            weights,
            threshold: SPAM_THRESHOLD,
        })
    }

    /// Score a feature vector.
    ///
    /// The confidence is the sigmoid of the weighted feature sum, read as
    /// the probability of spam; the label is spam when it exceeds the
    /// trained threshold.
    pub fn predict(&self, features: &FeatureVector) -> Prediction {
        let mut score = 0.0;
        for (name, value) in features.iter() {
            if let Some(weight) = self.weights.get(name) {
                score += weight * value;
            }
        }

        let probability = 1.0 / (1.0 + (-score).exp());
        let label = if probability > self.threshold {
            Label::Spam
        } else {
            Label::Ham
        };

        Prediction {
            label,
            confidence: probability,
        }
    }

    /// Trained weight for a feature, if present.
    pub fn weight(&self, name: &str) -> Option<f64> {
        self.weights.get(name).copied()
    }

    /// The fixed decision threshold.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Number of weighted features.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Whether the model has no weighted features.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FeatureExtractor;

    fn train_from_texts(spam: &[&str], ham: &[&str]) -> WeightModel {
        let extractor = FeatureExtractor::new();
        let mut vectors = Vec::new();
        let mut labels = Vec::new();
        for text in spam {
            vectors.push(extractor.extract(text, ""));
            labels.push(Label::Spam);
        }
        for text in ham {
            vectors.push(extractor.extract(text, ""));
            labels.push(Label::Ham);
        }
        WeightModel::train(&vectors, &labels).unwrap()
    }

    #[test]
    fn test_weight_sign_tracks_class_means() {
        let model = train_from_texts(
            &["FREE CASH NOW!!! WIN BIG $$$", "URGENT!!! Claim your prize!"],
            &["hello friend, how are you", "see you at the meeting"],
        );

        // Spam examples carry more exclamation marks and spam keywords.
        assert!(model.weight("exclamation_count").unwrap() > 0.0);
        assert!(model.weight("spam_words_count").unwrap() > 0.0);
        assert_eq!(model.len(), FeatureVector::NAMES.len());
    }

    #[test]
    fn test_zero_mean_feature_gets_zero_weight() {
        // Neither class contains '?' so question_count means are both zero;
        // the epsilon keeps the division defined and the weight at zero.
        let model = train_from_texts(&["free cash now"], &["hello friend"]);
        assert_eq!(model.weight("question_count").unwrap(), 0.0);
    }

    #[test]
    fn test_exact_weight_value() {
        let model = train_from_texts(&["win! win!"], &["hello"]);

        // exclamation_count: spam mean 2, ham mean 0.
        let expected = (2.0 - 0.0_f64).abs() / (2.0 + 0.0 + 1e-10);
        let weight = model.weight("exclamation_count").unwrap();
        assert!((weight - expected).abs() < 1e-12);
    }

    #[test]
    fn test_predict_confidence_is_spam_probability() {
        let model = train_from_texts(
            &["FREE CASH NOW!!! WIN BIG $$$", "URGENT!!! Claim your prize!"],
            &["hello friend, how are you", "see you at the meeting"],
        );
        let extractor = FeatureExtractor::new();

        let spammy = model.predict(&extractor.extract("WIN FREE CASH!!!", ""));
        assert!((0.0..=1.0).contains(&spammy.confidence));

        // Label and threshold agree by construction.
        if spammy.confidence > model.threshold() {
            assert_eq!(spammy.label, Label::Spam);
        } else {
            assert_eq!(spammy.label, Label::Ham);
        }
    }

    #[test]
    fn test_model_serializes_for_inspection() {
        let model = train_from_texts(&["free cash now"], &["hello friend"]);
        let json = serde_json::to_value(&model).unwrap();

        assert_eq!(json["threshold"], 0.5);
        let weights = json["weights"].as_object().unwrap();
        assert_eq!(weights.len(), FeatureVector::NAMES.len());
        assert!(weights["spam_words_count"].as_f64().unwrap() > 0.0);
    }

    #[test]
    fn test_empty_corpus_rejected() {
        let err = WeightModel::train(&[], &[]).unwrap_err();
        assert!(matches!(err, SpamsiftError::EmptyCorpus(_)));

        let extractor = FeatureExtractor::new();
        let vectors = vec![extractor.extract("hi", "")];
        let err = WeightModel::train(&vectors, &[Label::Ham]).unwrap_err();
        assert!(matches!(err, SpamsiftError::EmptyCorpus(_)));
    }
}
