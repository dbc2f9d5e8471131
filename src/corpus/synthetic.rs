//! Template-based synthetic corpus generation.
//!
//! Generates labeled examples by picking from a fixed set of spam and ham
//! template sentences and applying random surface mutations (whole-message
//! upper-casing, punctuation repetition, prefix insertion). Deterministic
//! for a given seed; each call to [`CorpusProvider::corpus`] draws a fresh
//! corpus from the configured source of randomness.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::classifier::Label;
use crate::corpus::{CorpusProvider, LabeledExample};
use crate::error::Result;

const SPAM_TEMPLATES: [&str; 10] = [
    "Congratulations! You've won $1000000! Click here to claim your prize now! Limited time offer!",
    "URGENT: Your account will be suspended! Verify your information immediately by clicking this link!",
    "Amazing weight loss secret revealed! Lose 30 pounds in 30 days guaranteed! Order now!",
    "Free trial offer! Get rich quick with this incredible investment opportunity! Act fast!",
    "You've been selected for an exclusive deal! 90% discount on luxury watches! Buy now!",
    "Miracle cure discovered! Doctors hate this one simple trick! Click to learn more!",
    "Cash advance approved! Get $5000 in your account today! No credit check required!",
    "Hot singles in your area want to meet you! Join now for free access!",
    "Work from home and earn $500 per day! No experience required! Start immediately!",
    "Your computer is infected! Download our antivirus software now to protect your data!",
];

const HAM_TEMPLATES: [&str; 10] = [
    "Hi John, I hope you're doing well. I wanted to follow up on our meeting yesterday about the project timeline.",
    "Thank you for your purchase. Your order has been shipped and will arrive within 3-5 business days.",
    "Reminder: Your appointment with Dr. Smith is scheduled for tomorrow at 2:00 PM. Please arrive 15 minutes early.",
    "The quarterly report is ready for review. Please let me know if you have any questions or need clarification.",
    "Happy birthday! I hope you have a wonderful day celebrating with family and friends.",
    "The conference call has been rescheduled to Friday at 10:00 AM. I'll send the updated meeting invite shortly.",
    "I've attached the documents you requested. Please review them and let me know if you need any changes.",
    "Welcome to our newsletter! You'll receive weekly updates about industry trends and company news.",
    "Your flight reservation has been confirmed. Please check in online 24 hours before departure.",
    "The team meeting notes from today are attached. Action items are highlighted for your reference.",
];

/// Configuration for [`SyntheticCorpusGenerator`].
#[derive(Debug, Clone)]
pub struct SyntheticCorpusConfig {
    /// Number of spam examples to generate.
    pub spam_count: usize,
    /// Number of ham examples to generate.
    pub ham_count: usize,
    /// Fixed seed for reproducible corpora; `None` draws OS entropy per call.
    pub seed: Option<u64>,
}

impl Default for SyntheticCorpusConfig {
    fn default() -> Self {
        SyntheticCorpusConfig {
            spam_count: 500,
            ham_count: 500,
            seed: None,
        }
    }
}

/// Generates labeled examples from spam/ham sentence templates with random
/// surface mutations.
#[derive(Debug, Clone, Default)]
pub struct SyntheticCorpusGenerator {
    config: SyntheticCorpusConfig,
}

impl SyntheticCorpusGenerator {
    /// Create a generator with the default configuration (500 spam, 500 ham,
    /// unseeded).
    pub fn new() -> Self {
        SyntheticCorpusGenerator::default()
    }

    /// Create a generator with the given configuration.
    pub fn with_config(config: SyntheticCorpusConfig) -> Self {
        SyntheticCorpusGenerator { config }
    }

    /// Create a seeded generator with custom class counts.
    pub fn seeded(spam_count: usize, ham_count: usize, seed: u64) -> Self {
        SyntheticCorpusGenerator {
            config: SyntheticCorpusConfig {
                spam_count,
                ham_count,
                seed: Some(seed),
            },
        }
    }

    /// The generator configuration.
    pub fn config(&self) -> &SyntheticCorpusConfig {
        &self.config
    }

    fn spam_example(rng: &mut StdRng) -> LabeledExample {
        let template = SPAM_TEMPLATES[rng.random_range(0..SPAM_TEMPLATES.len())];

        // Each candidate mutation fires with its own probability; one
        // candidate is then chosen uniformly, so most messages keep the
        // template's original surface form.
        let variations = [
            if rng.random::<f64>() < 0.3 {
                template.to_uppercase()
            } else {
                template.to_string()
            },
            if rng.random::<f64>() < 0.4 {
                format!("{template}!!!")
            } else {
                template.to_string()
            },
            if rng.random::<f64>() < 0.3 {
                template.replace('!', "!!!")
            } else {
                template.to_string()
            },
            if rng.random::<f64>() < 0.2 {
                format!("URGENT: {template}")
            } else {
                template.to_string()
            },
        ];
        let raw_text = variations[rng.random_range(0..variations.len())].clone();

        LabeledExample::new(raw_text, Label::Spam)
    }

    fn ham_example(rng: &mut StdRng) -> LabeledExample {
        let template = HAM_TEMPLATES[rng.random_range(0..HAM_TEMPLATES.len())];

        let variations = [
            format!("Dear Sir/Madam, {template}"),
            format!("Hello, {template} Best regards, John"),
            format!("Hi there, {template} Thanks!"),
            template.to_string(),
        ];
        let raw_text = variations[rng.random_range(0..variations.len())].clone();

        LabeledExample::new(raw_text, Label::Ham)
    }
}

impl CorpusProvider for SyntheticCorpusGenerator {
    fn corpus(&self) -> Result<Vec<LabeledExample>> {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let mut examples = Vec::with_capacity(self.config.spam_count + self.config.ham_count);
        for _ in 0..self.config.spam_count {
            examples.push(Self::spam_example(&mut rng));
        }
        for _ in 0..self.config.ham_count {
            examples.push(Self::ham_example(&mut rng));
        }

        Ok(examples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_counts() {
        let generator = SyntheticCorpusGenerator::seeded(30, 20, 7);
        let corpus = generator.corpus().unwrap();

        assert_eq!(corpus.len(), 50);
        let spam = corpus.iter().filter(|e| e.label == Label::Spam).count();
        let ham = corpus.iter().filter(|e| e.label == Label::Ham).count();
        assert_eq!(spam, 30);
        assert_eq!(ham, 20);
    }

    #[test]
    fn test_seeded_generation_is_deterministic() {
        let a = SyntheticCorpusGenerator::seeded(50, 50, 42)
            .corpus()
            .unwrap();
        let b = SyntheticCorpusGenerator::seeded(50, 50, 42)
            .corpus()
            .unwrap();
        assert_eq!(a, b);

        let c = SyntheticCorpusGenerator::seeded(50, 50, 43)
            .corpus()
            .unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_examples_derive_from_templates() {
        let corpus = SyntheticCorpusGenerator::seeded(100, 100, 1)
            .corpus()
            .unwrap();

        for example in &corpus {
            assert!(!example.raw_text.is_empty());
            assert!(example.subject.is_empty());
            match example.label {
                Label::Spam => {
                    // Case and '!' repetition are the mutated dimensions.
                    let canon = |s: &str| s.to_lowercase().replace('!', "");
                    let lowered = canon(&example.raw_text);
                    assert!(
                        SPAM_TEMPLATES.iter().any(|t| lowered.contains(&canon(t))),
                        "unrecognized spam mutation: {}",
                        example.raw_text
                    );
                }
                Label::Ham => {
                    assert!(
                        HAM_TEMPLATES
                            .iter()
                            .any(|t| example.raw_text.contains(&t[..20])),
                        "unrecognized ham mutation: {}",
                        example.raw_text
                    );
                }
            }
        }
    }
}
