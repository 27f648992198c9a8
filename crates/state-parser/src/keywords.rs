//! Conversational keyword tables and query-intent markers.
//!
//! These sets are independent of the classifier's review lexicon: they map
//! how people talk about their own mood, not how reviews describe films.
//! Built once into an immutable [`ParserLexicon`] and shared by reference.

use classifier::Emotion;
use std::collections::HashMap;

const JOY_KEYWORDS: &[&str] = &[
    "happy", "joy", "joyful", "cheerful", "glad", "delighted", "pleased",
    "excited", "thrilled", "wonderful", "amazing", "awesome", "fantastic",
    "great", "uplifted", "grateful", "content", "satisfied", "fun",
];

const SADNESS_KEYWORDS: &[&str] = &[
    "sad", "sadness", "depressed", "depression", "miserable", "unhappy",
    "lonely", "alone", "gloomy", "melancholy", "down", "blue", "grief",
    "heartbreak", "disappointed", "upset", "crying", "tears", "tragic",
];

const FEAR_KEYWORDS: &[&str] = &[
    "scared", "fear", "afraid", "frightened", "terrified", "anxious",
    "nervous", "worried", "panic", "dread", "horror", "creepy", "eerie",
    "tension", "suspense", "scary", "dangerous", "threat",
];

const ANGER_KEYWORDS: &[&str] = &[
    "angry", "anger", "furious", "mad", "rage", "hostile", "irritated",
    "annoyed", "aggravated", "outraged", "violent", "intense", "heated",
    "conflict", "aggressive", "bitter", "resentful",
];

const DISGUST_KEYWORDS: &[&str] = &[
    "disgusted", "disgust", "gross", "revolting", "repulsive", "vile",
    "nasty", "yucky", "sick", "nausea", "repugnant", "abhorrent", "filthy",
];

const SURPRISE_KEYWORDS: &[&str] = &[
    "surprised", "surprise", "shocked", "astonished", "amazed", "stunned",
    "unexpected", "twist", "revelation", "shocking", "jaw-dropping",
    "unpredictable", "plot twist", "incredible",
];

const TRUST_KEYWORDS: &[&str] = &[
    "trust", "faith", "confident", "assured", "reliable", "faithful",
    "loyal", "inspire", "positive", "hopeful", "belief", "strength",
    "courage", "determined", "brave",
];

/// Phrases signalling the user is describing how they feel right now.
const CURRENT_STATE_MARKERS: &[&str] = &[
    "i feel", "i'm feeling", "i am feeling", "feeling", "i'm", "i am",
    "currently", "right now", "at the moment", "how i feel",
];

/// Phrases signalling the user is asking for a target mood.
const DESIRED_STATE_MARKERS: &[&str] = &[
    "i want to feel", "want to feel", "like to feel", "make me feel",
    "should feel", "want", "like", "need", "looking for",
    "in the mood for", "want something", "recommend",
];

/// Phrases signalling the user has no emotional preference. Checked first:
/// an explicit "surprise me" overrides any emotion words in the same text.
const NEUTRAL_MARKERS: &[&str] = &[
    "surprise me", "random", "surprise", "anything", "doesn't matter",
    "i don't care", "whatever", "pick", "choose", "suggest",
];

/// Immutable parser configuration: the keyword→category table and the three
/// intent-marker lists.
#[derive(Debug, Clone)]
pub struct ParserLexicon {
    keyword_map: HashMap<&'static str, Emotion>,
    current_markers: &'static [&'static str],
    desired_markers: &'static [&'static str],
    neutral_markers: &'static [&'static str],
}

impl ParserLexicon {
    pub fn new() -> Self {
        let lists: [(&[&str], Emotion); Emotion::COUNT] = [
            (JOY_KEYWORDS, Emotion::Joy),
            (SADNESS_KEYWORDS, Emotion::Sadness),
            (FEAR_KEYWORDS, Emotion::Fear),
            (ANGER_KEYWORDS, Emotion::Anger),
            (DISGUST_KEYWORDS, Emotion::Disgust),
            (SURPRISE_KEYWORDS, Emotion::Surprise),
            (TRUST_KEYWORDS, Emotion::Trust),
        ];

        let mut keyword_map = HashMap::new();
        for (keywords, emotion) in lists {
            for &keyword in keywords {
                keyword_map.insert(keyword, emotion);
            }
        }

        Self {
            keyword_map,
            current_markers: CURRENT_STATE_MARKERS,
            desired_markers: DESIRED_STATE_MARKERS,
            neutral_markers: NEUTRAL_MARKERS,
        }
    }

    /// Category for a single lowercased token, if it is a known keyword.
    pub fn emotion_for(&self, token: &str) -> Option<Emotion> {
        self.keyword_map.get(token).copied()
    }

    /// Whether any keyword occurs as a substring of the (lowercased) text.
    pub fn mentions_any_keyword(&self, text: &str) -> bool {
        self.keyword_map.keys().any(|keyword| text.contains(keyword))
    }

    pub fn current_markers(&self) -> &[&'static str] {
        self.current_markers
    }

    pub fn desired_markers(&self) -> &[&'static str] {
        self.desired_markers
    }

    pub fn neutral_markers(&self) -> &[&'static str] {
        self.neutral_markers
    }
}

impl Default for ParserLexicon {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_map_to_expected_categories() {
        let lexicon = ParserLexicon::new();
        assert_eq!(lexicon.emotion_for("lonely"), Some(Emotion::Sadness));
        assert_eq!(lexicon.emotion_for("anxious"), Some(Emotion::Fear));
        assert_eq!(lexicon.emotion_for("hopeful"), Some(Emotion::Trust));
        assert_eq!(lexicon.emotion_for("table"), None);
    }

    #[test]
    fn test_substring_mention_check() {
        let lexicon = ParserLexicon::new();
        assert!(lexicon.mentions_any_keyword("so very gloomy today"));
        assert!(!lexicon.mentions_any_keyword("completely ordinary sentence"));
    }
}
