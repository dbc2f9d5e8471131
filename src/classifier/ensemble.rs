//! Fixed-weight ensemble over the bag-of-words and feature-weight
//! classifiers.
//!
//! [`EnsembleModel`] is one immutable trained snapshot: normalizer,
//! extractor and both trained sub-models. [`EnsembleClassifier`] is the
//! stateful facade that trains snapshots from a [`CorpusProvider`] and
//! rejects inference with [`SpamsiftError::NotTrained`] until one exists.
//! Retraining replaces the snapshot wholesale; a snapshot already handed
//! out via [`EnsembleClassifier::model`] keeps serving read-only
//! predictions untouched.
//!
//! The two sub-classifiers report confidence on different scales:
//! bag-of-words reports the probability of its *predicted* class, while
//! feature-weight reports the probability of spam regardless of label. The
//! blend therefore projects the bag-of-words confidence onto the spam axis
//! first (a ham prediction with confidence `c` contributes `1 - c`), so the
//! combined value compared against the 0.5 threshold measures one event.
//! The per-classifier breakdown keeps each classifier's native semantics.

use crate::analysis::normalizer::TextNormalizer;
use crate::classifier::bag_of_words::VocabularyModel;
use crate::classifier::feature_weight::WeightModel;
use crate::classifier::{ClassifierBreakdown, EnsembleResult, EvaluationReport, Label};
use crate::corpus::{CorpusProvider, LabeledExample};
use crate::error::{Result, SpamsiftError};
use crate::features::FeatureExtractor;

/// Blend weight for the bag-of-words confidence. Fixed by design, not
/// learned; the lexical model is favored.
const BAG_OF_WORDS_WEIGHT: f64 = 0.6;

/// Blend weight for the feature-weight confidence.
const FEATURE_WEIGHT: f64 = 0.4;

/// The blended confidence must exceed this to label a message spam.
const ENSEMBLE_THRESHOLD: f64 = 0.5;

/// One immutable trained ensemble snapshot.
#[derive(Debug, Clone)]
pub struct EnsembleModel {
    normalizer: TextNormalizer,
    extractor: FeatureExtractor,
    vocabulary: VocabularyModel,
    weights: WeightModel,
}

impl EnsembleModel {
    /// Train both sub-models from a labeled corpus.
    ///
    /// Texts are normalized once and feature vectors extracted once; the
    /// bag-of-words model trains on the normalized texts, the feature-weight
    /// model on the vectors. Fails with [`SpamsiftError::EmptyCorpus`] when
    /// the corpus is empty or single-class.
    pub fn train(examples: &[LabeledExample]) -> Result<EnsembleModel> {
        let normalizer = TextNormalizer::new();
        let extractor = FeatureExtractor::new();

        let labels: Vec<Label> = examples.iter().map(|e| e.label).collect();
        let cleaned: Vec<String> = examples
            .iter()
            .map(|e| normalizer.normalize(&e.raw_text))
            .collect();
        let vectors: Vec<_> = examples
            .iter()
            .map(|e| extractor.extract(&e.raw_text, &e.subject))
            .collect();

        let vocabulary = VocabularyModel::train(&cleaned, &labels)?;
        let weights = WeightModel::train(&vectors, &labels)?;

        Ok(EnsembleModel {
            normalizer,
            extractor,
            vocabulary,
            weights,
        })
    }

    /// Classify one message.
    ///
    /// Deterministic: the same input against the same snapshot always
    /// produces the same result.
    pub fn predict(&self, raw_text: &str, subject: &str) -> EnsembleResult {
        let cleaned = self.normalizer.normalize(raw_text);
        let features = self.extractor.extract(raw_text, subject);

        let bag_of_words = self.vocabulary.predict(&cleaned);
        let feature_weight = self.weights.predict(&features);

        // Bag-of-words confidence is of the predicted class; fold it onto
        // the spam axis before blending with the feature classifier's
        // spam probability.
        let bow_spam_confidence = match bag_of_words.label {
            Label::Spam => bag_of_words.confidence,
            Label::Ham => 1.0 - bag_of_words.confidence,
        };
        let confidence = BAG_OF_WORDS_WEIGHT * bow_spam_confidence
            + FEATURE_WEIGHT * feature_weight.confidence;
        let label = if confidence > ENSEMBLE_THRESHOLD {
            Label::Spam
        } else {
            Label::Ham
        };

        EnsembleResult {
            label,
            confidence,
            breakdown: ClassifierBreakdown {
                bag_of_words,
                feature_weight,
                features,
            },
        }
    }

    /// Run every example through [`predict`](Self::predict) and report
    /// confusion-matrix metrics.
    ///
    /// Precision, recall and F1 are defined as 0 when their denominator
    /// is 0.
    pub fn evaluate(&self, examples: &[LabeledExample]) -> Result<EvaluationReport> {
        if examples.is_empty() {
            return Err(SpamsiftError::empty_corpus("no evaluation examples"));
        }

        let mut tp = 0u64;
        let mut tn = 0u64;
        let mut fp = 0u64;
        let mut fn_ = 0u64;

        for example in examples {
            let predicted = self.predict(&example.raw_text, &example.subject).label;
            match (predicted, example.label) {
                (Label::Spam, Label::Spam) => tp += 1,
                (Label::Ham, Label::Ham) => tn += 1,
                (Label::Spam, Label::Ham) => fp += 1,
                (Label::Ham, Label::Spam) => fn_ += 1,
            }
        }

        let accuracy = (tp + tn) as f64 / examples.len() as f64;
        let precision = ratio_or_zero(tp, tp + fp);
        let recall = ratio_or_zero(tp, tp + fn_);
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };

        Ok(EvaluationReport {
            accuracy,
            precision,
            recall,
            f1,
            true_positives: tp,
            true_negatives: tn,
            false_positives: fp,
            false_negatives: fn_,
        })
    }

    /// The trained bag-of-words model.
    pub fn vocabulary(&self) -> &VocabularyModel {
        &self.vocabulary
    }

    /// The trained feature-weight model.
    pub fn weights(&self) -> &WeightModel {
        &self.weights
    }
}

fn ratio_or_zero(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Stateful classifier facade: train from a corpus provider, then predict
/// and evaluate against the current snapshot.
#[derive(Debug, Clone, Default)]
pub struct EnsembleClassifier {
    model: Option<EnsembleModel>,
}

impl EnsembleClassifier {
    /// Create an untrained classifier.
    pub fn new() -> Self {
        EnsembleClassifier { model: None }
    }

    /// Train a fresh snapshot from the provider's corpus and return the
    /// training-set accuracy.
    ///
    /// Accuracy is measured by re-running prediction over the training
    /// examples themselves; there is no held-out split, so it overstates
    /// real-world quality. The previous snapshot, if any, is replaced
    /// wholesale only after training succeeds.
    pub fn train(&mut self, provider: &dyn CorpusProvider) -> Result<f64> {
        let examples = provider.corpus()?;
        let model = EnsembleModel::train(&examples)?;

        let correct = examples
            .iter()
            .filter(|e| model.predict(&e.raw_text, &e.subject).label == e.label)
            .count();
        let accuracy = correct as f64 / examples.len() as f64;

        self.model = Some(model);
        Ok(accuracy)
    }

    /// Classify one message against the current snapshot.
    pub fn predict(&self, raw_text: &str, subject: &str) -> Result<EnsembleResult> {
        Ok(self.trained_model()?.predict(raw_text, subject))
    }

    /// Evaluate the current snapshot over the provider's corpus.
    pub fn evaluate(&self, provider: &dyn CorpusProvider) -> Result<EvaluationReport> {
        let model = self.trained_model()?;
        let examples = provider.corpus()?;
        model.evaluate(&examples)
    }

    /// Whether a training pass has completed.
    pub fn is_trained(&self) -> bool {
        self.model.is_some()
    }

    /// The current trained snapshot, for read-only use while a new training
    /// run builds its replacement.
    pub fn model(&self) -> Option<&EnsembleModel> {
        self.model.as_ref()
    }

    fn trained_model(&self) -> Result<&EnsembleModel> {
        self.model.as_ref().ok_or_else(|| {
            SpamsiftError::not_trained("call train() before predict() or evaluate()")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::StaticCorpusProvider;

    fn small_corpus() -> Vec<LabeledExample> {
        vec![
            LabeledExample::new("free money now", Label::Spam),
            LabeledExample::new("free money now", Label::Spam),
            LabeledExample::new("hello friend", Label::Ham),
            LabeledExample::new("hello friend", Label::Ham),
        ]
    }

    #[test]
    fn test_untrained_predict_fails() {
        let classifier = EnsembleClassifier::new();
        assert!(!classifier.is_trained());
        assert!(classifier.model().is_none());

        let err = classifier.predict("free money", "").unwrap_err();
        assert!(matches!(err, SpamsiftError::NotTrained(_)));

        let provider = StaticCorpusProvider::new(small_corpus());
        let err = classifier.evaluate(&provider).unwrap_err();
        assert!(matches!(err, SpamsiftError::NotTrained(_)));
    }

    #[test]
    fn test_train_then_predict_scenario() {
        let mut classifier = EnsembleClassifier::new();
        let provider = StaticCorpusProvider::new(small_corpus());

        let accuracy = classifier.train(&provider).unwrap();
        assert!((0.0..=1.0).contains(&accuracy));
        assert!(classifier.is_trained());

        let spam = classifier.predict("free money now", "").unwrap();
        assert_eq!(spam.label, Label::Spam);
        assert!(spam.confidence > 0.5);

        let ham = classifier.predict("hello friend", "").unwrap();
        assert_eq!(ham.label, Label::Ham);
    }

    #[test]
    fn test_blend_is_fixed_weighted_average() {
        let mut classifier = EnsembleClassifier::new();
        classifier
            .train(&StaticCorpusProvider::new(small_corpus()))
            .unwrap();

        let result = classifier.predict("free money now", "").unwrap();
        let bow_spam = match result.breakdown.bag_of_words.label {
            Label::Spam => result.breakdown.bag_of_words.confidence,
            Label::Ham => 1.0 - result.breakdown.bag_of_words.confidence,
        };
        let expected = 0.6 * bow_spam + 0.4 * result.breakdown.feature_weight.confidence;
        assert!((result.confidence - expected).abs() < 1e-12);
    }

    #[test]
    fn test_inference_is_deterministic() {
        let mut classifier = EnsembleClassifier::new();
        classifier
            .train(&StaticCorpusProvider::new(small_corpus()))
            .unwrap();

        let first = classifier.predict("free money for my friend", "hello").unwrap();
        for _ in 0..5 {
            let again = classifier
                .predict("free money for my friend", "hello")
                .unwrap();
            assert_eq!(first.label, again.label);
            assert_eq!(first.confidence, again.confidence);
        }
    }

    #[test]
    fn test_empty_corpus_fails_training() {
        let mut classifier = EnsembleClassifier::new();
        let err = classifier
            .train(&StaticCorpusProvider::default())
            .unwrap_err();
        assert!(matches!(err, SpamsiftError::EmptyCorpus(_)));
        assert!(!classifier.is_trained());

        // Single-class corpora are just as undefined.
        let spam_only = StaticCorpusProvider::new(vec![
            LabeledExample::new("free money", Label::Spam),
            LabeledExample::new("win cash", Label::Spam),
        ]);
        let err = classifier.train(&spam_only).unwrap_err();
        assert!(matches!(err, SpamsiftError::EmptyCorpus(_)));
    }

    #[test]
    fn test_failed_retraining_keeps_previous_snapshot() {
        let mut classifier = EnsembleClassifier::new();
        classifier
            .train(&StaticCorpusProvider::new(small_corpus()))
            .unwrap();

        let err = classifier
            .train(&StaticCorpusProvider::default())
            .unwrap_err();
        assert!(matches!(err, SpamsiftError::EmptyCorpus(_)));

        // The old snapshot still serves predictions.
        assert!(classifier.is_trained());
        assert!(classifier.predict("free money now", "").is_ok());
    }

    #[test]
    fn test_all_ham_predictions_on_all_spam_labels() {
        // Train so that ham-looking text is confidently ham, then evaluate
        // on that same text labeled spam: no true or predicted positives.
        let mut classifier = EnsembleClassifier::new();
        classifier
            .train(&StaticCorpusProvider::new(small_corpus()))
            .unwrap();

        let mislabeled = StaticCorpusProvider::new(vec![
            LabeledExample::new("hello friend", Label::Spam),
            LabeledExample::new("hello friend", Label::Spam),
        ]);
        let report = classifier.evaluate(&mislabeled).unwrap();

        assert_eq!(report.true_positives, 0);
        assert_eq!(report.false_negatives, 2);
        assert_eq!(report.precision, 0.0);
        assert_eq!(report.recall, 0.0);
        assert_eq!(report.f1, 0.0);
        assert_eq!(report.accuracy, 0.0);
    }

    #[test]
    fn test_evaluation_on_training_corpus() {
        let mut classifier = EnsembleClassifier::new();
        let provider = StaticCorpusProvider::new(small_corpus());
        classifier.train(&provider).unwrap();

        let report = classifier.evaluate(&provider).unwrap();
        let total = report.true_positives
            + report.true_negatives
            + report.false_positives
            + report.false_negatives;
        assert_eq!(total, 4);
        assert!((0.0..=1.0).contains(&report.accuracy));
        assert!((0.0..=1.0).contains(&report.precision));
        assert!((0.0..=1.0).contains(&report.recall));
    }
}
