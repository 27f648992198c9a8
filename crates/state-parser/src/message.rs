//! Canned acknowledgment text for a parsed emotion state.
//!
//! Presentational only; lives here because it shares the intensity-word
//! bucketing used across the conversational surface.

use crate::parser::{ParsedState, QueryType};

/// Bucket an intensity into an adverb: strongly / somewhat / slightly.
pub fn intensity_word(intensity: f64) -> &'static str {
    if intensity > 0.7 {
        "strongly"
    } else if intensity > 0.4 {
        "somewhat"
    } else {
        "slightly"
    }
}

/// One-line acknowledgment of what the parser understood.
pub fn acknowledgment(state: &ParsedState) -> String {
    if state.query_type == QueryType::Neutral {
        return "I'll recommend some highly-rated movies for you!".to_string();
    }

    let Some(emotion) = state.emotion else {
        return "I didn't catch an emotion. Tell me how you're feeling or what \
                you'd like to watch."
            .to_string();
    };

    match state.query_type {
        QueryType::CurrentState => format!(
            "I understand you're {} feeling {}. Let me find movies that match \
             that emotion...",
            intensity_word(state.intensity),
            emotion
        ),
        QueryType::DesiredState => {
            format!("You want to feel {emotion}! Let me find movies that evoke that...")
        }
        QueryType::Neutral => unreachable!("handled above"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::EmotionStateParser;

    fn parse(text: &str) -> ParsedState {
        EmotionStateParser::default().parse(text)
    }

    #[test]
    fn test_intensity_buckets() {
        assert_eq!(intensity_word(0.9), "strongly");
        assert_eq!(intensity_word(0.7), "somewhat");
        assert_eq!(intensity_word(0.5), "somewhat");
        assert_eq!(intensity_word(0.4), "slightly");
        assert_eq!(intensity_word(0.0), "slightly");
    }

    #[test]
    fn test_neutral_acknowledgment() {
        let message = acknowledgment(&parse("surprise me"));
        assert!(message.contains("highly-rated"));
    }

    #[test]
    fn test_current_state_acknowledgment_names_emotion() {
        let message = acknowledgment(&parse("I feel sad and lonely and gloomy"));
        assert!(message.contains("sadness"));
        assert!(message.contains("strongly"));
    }

    #[test]
    fn test_no_signal_acknowledgment_asks_again() {
        let message = acknowledgment(&parse("I am at the cinema"));
        assert!(message.contains("didn't catch"));
    }
}
