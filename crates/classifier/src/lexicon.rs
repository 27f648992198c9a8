//! The fixed cue-word lexicon and its precomputed likelihood table.
//!
//! An [`EmotionLexicon`] is an immutable configuration object built once at
//! startup and passed by reference into the classifier. It is never mutated
//! at runtime and there is no ambient global copy.

use crate::emotion::Emotion;
use std::collections::HashSet;

// NRC-style cue-word sets, one per category. Review vocabulary, not
// conversational vocabulary; the state parser carries its own keyword sets.

const JOY_WORDS: &[&str] = &[
    "excellent", "wonderful", "masterpiece", "amazing", "love", "great",
    "fantastic", "brilliant", "perfect", "beautiful", "delightful",
    "gorgeous", "impressive", "funny", "hilarious", "entertaining",
    "enjoyable", "pleasant", "happy", "cheerful", "triumph", "victory",
    "success",
];

const SADNESS_WORDS: &[&str] = &[
    "sad", "depressing", "tragic", "sorrowful", "melancholy", "heartbreak",
    "tears", "suffer", "pain", "loss", "grief", "disappointing",
    "disappointed", "boring", "dull", "tedious", "awful", "terrible",
    "worst", "hate", "hated", "dislike",
];

const FEAR_WORDS: &[&str] = &[
    "scary", "terrifying", "horror", "frightening", "horrific", "dreadful",
    "ominous", "suspense", "tense", "unsettling", "disturbing", "creepy",
    "eerie", "sinister", "evil", "menace",
];

const ANGER_WORDS: &[&str] = &[
    "angry", "rage", "furious", "outraged", "infuriating", "annoying",
    "irritating", "frustrating", "despicable", "insulting", "offensive",
    "ridiculous", "disgusting", "vile", "repugnant", "abhorrent",
];

const DISGUST_WORDS: &[&str] = &[
    "disgusting", "repulsive", "vile", "filthy", "gross", "revolting",
    "nauseating", "abominable", "loathsome", "repugnant", "despicable",
    "detestable",
];

const SURPRISE_WORDS: &[&str] = &[
    "surprising", "unexpected", "astonishing", "astounding", "shocking",
    "amazing", "incredible", "remarkable", "startling", "stunning",
    "bewildering", "confounding",
];

const TRUST_WORDS: &[&str] = &[
    "reliable", "trustworthy", "credible", "dependable", "solid", "strong",
    "confident", "assured", "capable", "competent", "skilled",
    "professional", "authentic", "genuine", "honest",
];

/// Immutable classifier configuration: per-category cue-word sets, the
/// global vocabulary (union of all sets), and precomputed Laplace-smoothed
/// log-likelihoods.
///
/// A token in the vocabulary can only be present in a category's set once,
/// so the smoothed likelihood takes exactly two values per category:
/// `(1 + 1) / (set_len + vocab_len)` for members and
/// `(0 + 1) / (set_len + vocab_len)` for the rest. Both are stored in log
/// space.
#[derive(Debug, Clone)]
pub struct EmotionLexicon {
    words: [HashSet<&'static str>; Emotion::COUNT],
    vocabulary: HashSet<&'static str>,
    log_member: [f64; Emotion::COUNT],
    log_other: [f64; Emotion::COUNT],
    log_prior: f64,
}

impl EmotionLexicon {
    /// Build the lexicon from the built-in NRC-style word sets.
    pub fn new() -> Self {
        Self::from_word_lists([
            JOY_WORDS,
            SADNESS_WORDS,
            FEAR_WORDS,
            ANGER_WORDS,
            DISGUST_WORDS,
            SURPRISE_WORDS,
            TRUST_WORDS,
        ])
    }

    /// Build a lexicon from caller-supplied word lists, one per category in
    /// enumeration order. Used by tests with small controlled sets.
    pub fn from_word_lists(lists: [&[&'static str]; Emotion::COUNT]) -> Self {
        let words: [HashSet<&'static str>; Emotion::COUNT] =
            lists.map(|list| list.iter().copied().collect());

        let vocabulary: HashSet<&'static str> =
            words.iter().flat_map(|set| set.iter().copied()).collect();
        let vocab_len = vocabulary.len();

        let mut log_member = [0.0; Emotion::COUNT];
        let mut log_other = [0.0; Emotion::COUNT];
        for emotion in Emotion::ALL {
            let denominator = (words[emotion.index()].len() + vocab_len) as f64;
            log_member[emotion.index()] = (2.0 / denominator).ln();
            log_other[emotion.index()] = (1.0 / denominator).ln();
        }

        Self {
            words,
            vocabulary,
            log_member,
            log_other,
            log_prior: (1.0 / Emotion::COUNT as f64).ln(),
        }
    }

    /// Log of the uniform category prior.
    pub fn log_prior(&self) -> f64 {
        self.log_prior
    }

    /// Whether the token appears in any category's cue set.
    pub fn in_vocabulary(&self, token: &str) -> bool {
        self.vocabulary.contains(token)
    }

    /// Whether the token belongs to this category's cue set.
    pub fn is_cue(&self, emotion: Emotion, token: &str) -> bool {
        self.words[emotion.index()].contains(token)
    }

    /// Smoothed log-likelihood of a vocabulary token under a category.
    ///
    /// The token must already be known to be in the vocabulary; callers
    /// skip out-of-vocabulary tokens before reaching here.
    pub fn log_likelihood(&self, emotion: Emotion, token: &str) -> f64 {
        if self.is_cue(emotion, token) {
            self.log_member[emotion.index()]
        } else {
            self.log_other[emotion.index()]
        }
    }

    /// Size of the global vocabulary.
    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }
}

impl Default for EmotionLexicon {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_is_union_of_sets() {
        let lexicon = EmotionLexicon::new();
        assert!(lexicon.in_vocabulary("masterpiece"));
        assert!(lexicon.in_vocabulary("creepy"));
        assert!(!lexicon.in_vocabulary("zamboni"));
    }

    #[test]
    fn test_shared_cue_words_count_for_both_categories() {
        // "disgusting" sits in both the anger and disgust sets.
        let lexicon = EmotionLexicon::new();
        assert!(lexicon.is_cue(Emotion::Anger, "disgusting"));
        assert!(lexicon.is_cue(Emotion::Disgust, "disgusting"));
        assert!(!lexicon.is_cue(Emotion::Joy, "disgusting"));
    }

    #[test]
    fn test_member_likelihood_exceeds_other() {
        let lexicon = EmotionLexicon::new();
        let member = lexicon.log_likelihood(Emotion::Joy, "wonderful");
        let other = lexicon.log_likelihood(Emotion::Fear, "wonderful");
        assert!(member > other);
        // Exactly ln(2) apart for a shared denominator only when set sizes
        // match, so compare against the closed form instead.
        let expected =
            (2.0 / (23.0 + lexicon.vocabulary_len() as f64)).ln();
        assert!((member - expected).abs() < 1e-12);
    }
}
