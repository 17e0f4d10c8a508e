//! Character transcript rules shared by every front end

use crate::models::{CharacterPersona, CharacterTranscript, CharacterTurn, Speaker};

/// In-character line shown when the model could not answer
pub const CHARACTER_FALLBACK: &str = "*Maaf, aku sedang tidak bisa merespons. Coba lagi nanti.*";

/// Assistant line shown when a general chat request fails
pub const CHAT_FALLBACK: &str = "Sorry, I could not get a response right now. Please try again.";

/// Transcript to show when a character chat opens.
///
/// A saved transcript wins when it exists and is non-empty; otherwise the
/// chat starts from the greeting, or empty when there is none.
pub fn opening_turns(
    persona: &CharacterPersona,
    saved: &CharacterTranscript,
    timestamp: &str,
) -> Vec<CharacterTurn> {
    if saved.exists && !saved.messages.is_empty() {
        return saved.messages.clone();
    }
    greeting_turns(persona, timestamp)
}

/// Greeting-only transcript used on open and after a reset
pub fn greeting_turns(persona: &CharacterPersona, timestamp: &str) -> Vec<CharacterTurn> {
    if persona.greeting.is_empty() {
        Vec::new()
    } else {
        vec![CharacterTurn::character(persona.greeting.clone(), timestamp)]
    }
}

pub fn user_turns(turns: &[CharacterTurn]) -> usize {
    turns.iter().filter(|t| t.speaker == Speaker::User).count()
}

/// Transcripts are only worth saving once the user has said something
pub fn should_save(turns: &[CharacterTurn]) -> bool {
    user_turns(turns) > 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn persona(greeting: &str) -> CharacterPersona {
        serde_json::from_value(serde_json::json!({
            "character_id": "abc",
            "name": "Luna",
            "greeting": greeting,
        }))
        .unwrap()
    }

    #[test]
    fn test_greeting_seeds_missing_transcript() {
        let saved = CharacterTranscript {
            exists: false,
            ..Default::default()
        };
        let turns = opening_turns(&persona("Hi there"), &saved, "10:00");
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].speaker, Speaker::Character);
        assert_eq!(turns[0].content, "Hi there");
    }

    #[test]
    fn test_saved_transcript_wins() {
        let saved = CharacterTranscript {
            exists: true,
            messages: vec![CharacterTurn::user("hello", "09:00")],
            ..Default::default()
        };
        let turns = opening_turns(&persona("Hi there"), &saved, "10:00");
        assert_eq!(turns, saved.messages);
    }

    #[test]
    fn test_existing_but_empty_transcript_uses_greeting() {
        let saved = CharacterTranscript {
            exists: true,
            ..Default::default()
        };
        assert_eq!(opening_turns(&persona("Yo"), &saved, "").len(), 1);
        assert!(opening_turns(&persona(""), &saved, "").is_empty());
    }

    #[test]
    fn test_should_save_needs_user_turn() {
        let greeting = greeting_turns(&persona("Hi"), "");
        assert!(!should_save(&greeting));

        let mut turns = greeting;
        turns.push(CharacterTurn::user("hey", ""));
        assert!(should_save(&turns));
        assert_eq!(user_turns(&turns), 1);
    }
}
