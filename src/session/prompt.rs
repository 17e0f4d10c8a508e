//! Character prompt construction
//!
//! The backend only understands a single prompt string, so the persona,
//! recent history and the new line are flattened into one text ending with
//! the character's speaking cue.

use crate::models::{CharacterPersona, CharacterTurn, Speaker};

/// Transcript turns carried into each prompt
pub const HISTORY_TURNS: usize = 6;

/// Persona preamble: who the character is and how it treats the user
pub fn persona_preamble(persona: &CharacterPersona) -> String {
    format!(
        "Kamu adalah {name}. {definition}\n\n\
         Panggil user dengan sebutan \"{nickname}\". \
         Hubunganmu dengan user adalah \"{relationship}\". \
         Peranmu adalah \"{role}\".",
        name = persona.name,
        definition = persona.definition,
        nickname = persona.user_nickname(),
        relationship = persona.user_relationship,
        role = persona.character_role,
    )
}

/// One transcript line as the model sees it
pub fn history_line(persona: &CharacterPersona, turn: &CharacterTurn) -> String {
    match turn.speaker {
        Speaker::User => format!("User: {}", turn.content),
        Speaker::Character => format!("{}: {}", persona.name, turn.content),
    }
}

/// Full prompt for a new user message.
///
/// `history` is the transcript before the new message; only the last
/// `turns` entries are included.
pub fn build_prompt(
    persona: &CharacterPersona,
    history: &[CharacterTurn],
    message: &str,
    turns: usize,
) -> String {
    let start = history.len().saturating_sub(turns);
    let recent: Vec<String> = history[start..]
        .iter()
        .map(|t| history_line(persona, t))
        .collect();

    let mut prompt = persona_preamble(persona);
    prompt.push_str("\n\n");
    if !recent.is_empty() {
        prompt.push_str(&recent.join("\n"));
        prompt.push('\n');
    }
    prompt.push_str(&format!("User: {}\n\n{}:", message, persona.name));
    prompt
}
