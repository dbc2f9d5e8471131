//! Hand-engineered feature extraction for email classification.
//!
//! [`FeatureExtractor`] computes a fixed-schema [`FeatureVector`] from the
//! raw message text (surface statistics such as capitalization and
//! punctuation), the raw subject line, and the normalized text (lexical
//! statistics). The schema is closed: the same named values are produced for
//! every input, so training and inference always agree on the feature space.
//! Adding or removing a feature requires retraining both downstream
//! classifiers.
//!
//! Every value is finite; ratio denominators are floored at 1 so empty
//! inputs extract to all-zero vectors instead of dividing by zero.

use ahash::AHashSet;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::analysis::normalizer::TextNormalizer;

lazy_static! {
    /// Runs of sentence terminators count as one sentence boundary.
    static ref SENTENCE_PATTERN: Regex = Regex::new(r"[.!?]+").unwrap();

    /// Hand-picked terms that show up disproportionately in spam.
    static ref SPAM_KEYWORDS: AHashSet<&'static str> = [
        "free", "win", "winner", "cash", "prize", "money", "offer", "deal",
        "sale", "discount", "cheap", "buy", "order", "click", "here", "now",
        "urgent", "limited", "time", "act", "fast", "guarantee", "risk",
        "trial", "bonus", "gift", "congratulations", "selected", "exclusive",
        "special", "amazing", "incredible", "unbelievable", "miracle",
        "secret", "hidden", "revealed",
    ]
    .into_iter()
    .collect();
}

const URGENT_WORDS: [&str; 4] = ["urgent", "immediate", "asap", "hurry"];
const MONEY_WORDS: [&str; 5] = ["money", "cash", "dollar", "payment", "credit"];
const ACTION_WORDS: [&str; 5] = ["click", "buy", "order", "subscribe", "download"];

/// Fixed-schema numeric feature vector for one email.
///
/// Boolean signals are encoded as 0/1 so the whole vector is uniformly
/// numeric for the downstream linear classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Character count of the raw text.
    pub text_length: f64,
    /// Word count of the normalized text.
    pub word_count: f64,
    /// Character count of the normalized text.
    pub char_count: f64,
    /// Count of sentence-terminator runs (`.`, `!`, `?`) in the raw text.
    pub sentence_count: f64,
    /// Mean word length of the normalized text.
    pub avg_word_length: f64,
    /// Character count of the raw subject.
    pub subject_length: f64,
    /// Word count of the normalized subject.
    pub subject_word_count: f64,
    /// Fraction of upper-case characters in the raw subject.
    pub subject_caps_ratio: f64,
    /// `!` count in the raw subject.
    pub subject_exclamation: f64,
    /// `?` count in the raw subject.
    pub subject_question: f64,
    /// Spam keywords present in the normalized text's token set.
    pub spam_words_count: f64,
    /// Same intersection, normalized by token-set size.
    pub spam_words_ratio: f64,
    /// Spam keywords present in the normalized subject's token set.
    pub subject_spam_words: f64,
    /// Fraction of upper-case characters in the raw text.
    pub caps_ratio: f64,
    /// `!` count in the raw text.
    pub exclamation_count: f64,
    /// `?` count in the raw text.
    pub question_count: f64,
    /// `$` count in the raw text.
    pub dollar_count: f64,
    /// `%` count in the raw text.
    pub percent_count: f64,
    /// 1.0 if any urgency word occurs as a substring of the normalized text.
    pub has_urgent_words: f64,
    /// 1.0 if any money word occurs as a substring of the normalized text.
    pub has_money_words: f64,
    /// 1.0 if any call-to-action word occurs as a substring of the normalized text.
    pub has_action_words: f64,
    /// Count of runs where one character repeats 3+ times in the raw text.
    pub repetitive_chars: f64,
}

impl FeatureVector {
    /// The closed feature schema, in declaration order.
    pub const NAMES: [&'static str; 22] = [
        "text_length",
        "word_count",
        "char_count",
        "sentence_count",
        "avg_word_length",
        "subject_length",
        "subject_word_count",
        "subject_caps_ratio",
        "subject_exclamation",
        "subject_question",
        "spam_words_count",
        "spam_words_ratio",
        "subject_spam_words",
        "caps_ratio",
        "exclamation_count",
        "question_count",
        "dollar_count",
        "percent_count",
        "has_urgent_words",
        "has_money_words",
        "has_action_words",
        "repetitive_chars",
    ];

    /// Look up a feature value by schema name.
    pub fn get(&self, name: &str) -> Option<f64> {
        match name {
            "text_length" => Some(self.text_length),
            "word_count" => Some(self.word_count),
            "char_count" => Some(self.char_count),
            "sentence_count" => Some(self.sentence_count),
            "avg_word_length" => Some(self.avg_word_length),
            "subject_length" => Some(self.subject_length),
            "subject_word_count" => Some(self.subject_word_count),
            "subject_caps_ratio" => Some(self.subject_caps_ratio),
            "subject_exclamation" => Some(self.subject_exclamation),
            "subject_question" => Some(self.subject_question),
            "spam_words_count" => Some(self.spam_words_count),
            "spam_words_ratio" => Some(self.spam_words_ratio),
            "subject_spam_words" => Some(self.subject_spam_words),
            "caps_ratio" => Some(self.caps_ratio),
            "exclamation_count" => Some(self.exclamation_count),
            "question_count" => Some(self.question_count),
            "dollar_count" => Some(self.dollar_count),
            "percent_count" => Some(self.percent_count),
            "has_urgent_words" => Some(self.has_urgent_words),
            "has_money_words" => Some(self.has_money_words),
            "has_action_words" => Some(self.has_action_words),
            "repetitive_chars" => Some(self.repetitive_chars),
            _ => None,
        }
    }

    /// Iterate over `(name, value)` pairs in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        Self::NAMES
            .iter()
            .map(|name| (*name, self.get(name).unwrap()))
    }
}

/// Computes [`FeatureVector`]s from raw email text and subject lines.
#[derive(Debug, Clone, Default)]
pub struct FeatureExtractor {
    normalizer: TextNormalizer,
}

impl FeatureExtractor {
    /// Create a new feature extractor.
    pub fn new() -> Self {
        FeatureExtractor {
            normalizer: TextNormalizer::new(),
        }
    }

    /// Extract the full feature vector for a message.
    ///
    /// Surface statistics are computed on the raw text and raw subject;
    /// lexical statistics on their normalized forms.
    pub fn extract(&self, raw_text: &str, subject: &str) -> FeatureVector {
        let cleaned_text = self.normalizer.normalize(raw_text);
        let cleaned_subject = self.normalizer.normalize(subject);

        let words: Vec<&str> = cleaned_text.split_whitespace().collect();
        let word_count = words.len();
        let total_word_chars: usize = words.iter().map(|w| w.chars().count()).sum();

        let subject_word_count = cleaned_subject.split_whitespace().count();
        let text_words: AHashSet<&str> = words.iter().copied().collect();
        let subject_words: AHashSet<&str> = cleaned_subject.split_whitespace().collect();

        let spam_words_count = text_words
            .iter()
            .filter(|w| SPAM_KEYWORDS.contains(*w))
            .count();
        let subject_spam_words = subject_words
            .iter()
            .filter(|w| SPAM_KEYWORDS.contains(*w))
            .count();

        let raw_chars = raw_text.chars().count();
        let subject_chars = subject.chars().count();

        FeatureVector {
            text_length: raw_chars as f64,
            word_count: word_count as f64,
            char_count: cleaned_text.chars().count() as f64,
            sentence_count: SENTENCE_PATTERN.find_iter(raw_text).count() as f64,
            avg_word_length: total_word_chars as f64 / word_count.max(1) as f64,
            subject_length: subject_chars as f64,
            subject_word_count: subject_word_count as f64,
            subject_caps_ratio: count_uppercase(subject) as f64 / subject_chars.max(1) as f64,
            subject_exclamation: count_char(subject, '!') as f64,
            subject_question: count_char(subject, '?') as f64,
            spam_words_count: spam_words_count as f64,
            spam_words_ratio: spam_words_count as f64 / text_words.len().max(1) as f64,
            subject_spam_words: subject_spam_words as f64,
            caps_ratio: count_uppercase(raw_text) as f64 / raw_chars.max(1) as f64,
            exclamation_count: count_char(raw_text, '!') as f64,
            question_count: count_char(raw_text, '?') as f64,
            dollar_count: count_char(raw_text, '$') as f64,
            percent_count: count_char(raw_text, '%') as f64,
            has_urgent_words: contains_any(&cleaned_text, &URGENT_WORDS) as u8 as f64,
            has_money_words: contains_any(&cleaned_text, &MONEY_WORDS) as u8 as f64,
            has_action_words: contains_any(&cleaned_text, &ACTION_WORDS) as u8 as f64,
            repetitive_chars: count_repetitive_runs(raw_text) as f64,
        }
    }

    /// Number of terms in the fixed spam-keyword vocabulary.
    pub fn spam_keyword_count(&self) -> usize {
        SPAM_KEYWORDS.len()
    }
}

fn count_uppercase(text: &str) -> usize {
    text.chars().filter(|c| c.is_uppercase()).count()
}

fn count_char(text: &str, target: char) -> usize {
    text.chars().filter(|c| *c == target).count()
}

fn contains_any(cleaned_text: &str, words: &[&str]) -> bool {
    words.iter().any(|w| cleaned_text.contains(w))
}

/// Count maximal runs of a single character repeated 3 or more times.
///
/// The regex crate has no backreferences, so this is an explicit run-length
/// scan rather than a `(.)\1{2,}` pattern; the counts agree.
fn count_repetitive_runs(text: &str) -> usize {
    let mut runs = 0;
    let mut current: Option<char> = None;
    let mut run_len = 0;

    for c in text.chars() {
        if Some(c) == current {
            run_len += 1;
            if run_len == 3 {
                runs += 1;
            }
        } else {
            current = Some(c);
            run_len = 1;
        }
    }

    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_is_all_zero() {
        let extractor = FeatureExtractor::new();
        let features = extractor.extract("", "");

        assert_eq!(features.word_count, 0.0);
        assert_eq!(features.caps_ratio, 0.0);
        assert_eq!(features.avg_word_length, 0.0);
        assert_eq!(features.subject_caps_ratio, 0.0);
        assert_eq!(features.spam_words_ratio, 0.0);
        for (name, value) in features.iter() {
            assert!(value.is_finite(), "{name} must be finite");
            assert_eq!(value, 0.0, "{name} must be zero for empty input");
        }
    }

    #[test]
    fn test_ratio_bounds() {
        let extractor = FeatureExtractor::new();
        let inputs = [
            ("", ""),
            ("FREE CASH NOW!!!", "WIN BIG $$$"),
            ("hello there, how are you?", "checking in"),
            ("ALLCAPS", "?"),
        ];

        for (text, subject) in inputs {
            let features = extractor.extract(text, subject);
            for (name, value) in [
                ("caps_ratio", features.caps_ratio),
                ("subject_caps_ratio", features.subject_caps_ratio),
                ("spam_words_ratio", features.spam_words_ratio),
            ] {
                assert!(
                    (0.0..=1.0).contains(&value),
                    "{name} out of range for {text:?}: {value}"
                );
            }
        }
    }

    #[test]
    fn test_length_and_shape_features() {
        let extractor = FeatureExtractor::new();
        let features = extractor.extract("Hello world. How are you? Fine!", "");

        assert_eq!(features.text_length, 31.0);
        assert_eq!(features.sentence_count, 3.0);
        assert_eq!(features.word_count, 6.0);
        // "hello world how are you fine" -> 23 word chars over 6 words
        assert!((features.avg_word_length - 23.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_subject_features() {
        let extractor = FeatureExtractor::new();
        let features = extractor.extract("body", "WIN Now!!");

        assert_eq!(features.subject_length, 9.0);
        assert_eq!(features.subject_word_count, 2.0);
        assert_eq!(features.subject_exclamation, 2.0);
        assert_eq!(features.subject_question, 0.0);
        // 4 upper-case characters out of 9
        assert!((features.subject_caps_ratio - 4.0 / 9.0).abs() < 1e-12);
        assert_eq!(features.subject_spam_words, 2.0);
    }

    #[test]
    fn test_spam_keyword_intersection() {
        let extractor = FeatureExtractor::new();
        let features = extractor.extract("Get free cash now, totally free!", "");

        // token set: {get, free, cash, now, totally} -> free, cash, now
        assert_eq!(features.spam_words_count, 3.0);
        assert!((features.spam_words_ratio - 3.0 / 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_surface_counts() {
        let extractor = FeatureExtractor::new();
        let features = extractor.extract("Earn $500!! Save 20% today?", "");

        assert_eq!(features.exclamation_count, 2.0);
        assert_eq!(features.question_count, 1.0);
        assert_eq!(features.dollar_count, 1.0);
        assert_eq!(features.percent_count, 1.0);
    }

    #[test]
    fn test_composite_flags() {
        let extractor = FeatureExtractor::new();

        let features = extractor.extract("URGENT: click to claim your cash", "");
        assert_eq!(features.has_urgent_words, 1.0);
        assert_eq!(features.has_money_words, 1.0);
        assert_eq!(features.has_action_words, 1.0);

        let features = extractor.extract("see you at the meeting tomorrow", "");
        assert_eq!(features.has_urgent_words, 0.0);
        assert_eq!(features.has_money_words, 0.0);
        assert_eq!(features.has_action_words, 0.0);
    }

    #[test]
    fn test_repetitive_runs() {
        assert_eq!(count_repetitive_runs("soooo good"), 1);
        assert_eq!(count_repetitive_runs("WOW!!! YES!!!"), 2);
        assert_eq!(count_repetitive_runs("aa bb cc"), 0);
        assert_eq!(count_repetitive_runs("aaaaaa"), 1);
        assert_eq!(count_repetitive_runs(""), 0);
    }

    #[test]
    fn test_schema_is_closed_and_complete() {
        let extractor = FeatureExtractor::new();
        let features = extractor.extract("some text", "a subject");

        assert_eq!(FeatureVector::NAMES.len(), 22);
        for name in FeatureVector::NAMES {
            assert!(features.get(name).is_some(), "{name} missing from schema");
        }
        assert!(features.get("no_such_feature").is_none());
        assert_eq!(features.iter().count(), FeatureVector::NAMES.len());
    }
}
