//! Character personas and their chat transcripts

use serde::{Deserialize, Serialize};

/// Visibility assigned by the backend when the client leaves it out
pub const DEFAULT_VISIBILITY: &str = "private";

/// Category assigned by the backend when the client leaves it out
pub const DEFAULT_CATEGORY: &str = "general";

/// A roleplay character configuration stored by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterPersona {
    pub character_id: String,
    pub name: String,
    #[serde(default)]
    pub user_relationship: String,
    #[serde(default)]
    pub character_role: String,
    #[serde(default)]
    pub user_persona_nickname: Option<String>,
    #[serde(default)]
    pub greeting: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub voice_id: Option<String>,
    #[serde(default = "default_visibility")]
    pub visibility: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default, deserialize_with = "tag_list")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub definition: String,
    #[serde(rename = "isActive", default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

fn default_visibility() -> String {
    DEFAULT_VISIBILITY.to_string()
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

/// Tags arrive either as a JSON array or as a JSON-encoded string of one
fn tag_list<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Tags {
        List(Vec<String>),
        Encoded(String),
    }

    Ok(match Option::<Tags>::deserialize(deserializer)? {
        Some(Tags::List(tags)) => tags,
        Some(Tags::Encoded(raw)) => serde_json::from_str(&raw).unwrap_or_default(),
        None => Vec::new(),
    })
}

impl CharacterPersona {
    /// How the character addresses the user
    pub fn user_nickname(&self) -> &str {
        match self.user_persona_nickname.as_deref() {
            Some(nick) if !nick.trim().is_empty() => nick,
            _ => "User",
        }
    }

    /// Name without the " - subtitle" suffix some personas carry
    pub fn short_name(&self) -> &str {
        self.name.split(" - ").next().unwrap_or(&self.name)
    }

    /// Whether the sidebar should highlight this persona
    pub fn active(&self) -> bool {
        self.is_active.unwrap_or(false)
    }
}

/// Body for `POST /character`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CharacterInput {
    pub name: String,
    pub user_relationship: String,
    pub character_role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_persona_nickname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub greeting: Option<String>,
    pub short_description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub tags: Vec<String>,
}

/// Partial update for `PUT /character/:id`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CharacterPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_relationship: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub character_role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_persona_nickname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub greeting: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
}

impl From<&CharacterPersona> for CharacterPatch {
    /// Full overwrite of every editable field
    fn from(p: &CharacterPersona) -> Self {
        Self {
            name: Some(p.name.clone()),
            user_relationship: Some(p.user_relationship.clone()),
            character_role: Some(p.character_role.clone()),
            user_persona_nickname: p.user_persona_nickname.clone(),
            greeting: Some(p.greeting.clone()),
            short_description: Some(p.short_description.clone()),
            voice_id: p.voice_id.clone(),
            visibility: Some(p.visibility.clone()),
            category: Some(p.category.clone()),
            tags: Some(p.tags.clone()),
            definition: Some(p.definition.clone()),
        }
    }
}

/// Speaker of a character chat turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Character,
}

/// One turn of a character chat transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterTurn {
    #[serde(rename = "type")]
    pub speaker: Speaker,
    pub content: String,
    #[serde(default)]
    pub timestamp: String,
}

impl CharacterTurn {
    pub fn user(content: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            content: content.into(),
            timestamp: timestamp.into(),
        }
    }

    pub fn character(content: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Character,
            content: content.into(),
            timestamp: timestamp.into(),
        }
    }
}

/// Saved transcript for one persona, `GET /character/:id/conversation`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CharacterTranscript {
    #[serde(default)]
    pub character_id: String,
    #[serde(default)]
    pub messages: Vec<CharacterTurn>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub exists: bool,
}

/// Body for `POST /character/:id/conversation`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveTranscript {
    pub messages: Vec<CharacterTurn>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persona_defaults() {
        let json = r#"{"character_id": "abc", "name": "Luna"}"#;
        let persona: CharacterPersona = serde_json::from_str(json).unwrap();
        assert_eq!(persona.visibility, "private");
        assert_eq!(persona.category, "general");
        assert!(persona.tags.is_empty());
        assert_eq!(persona.user_nickname(), "User");
        assert!(!persona.active());
    }

    #[test]
    fn test_tags_encoded_as_string() {
        let json = r#"{"character_id": "abc", "name": "Luna", "tags": "[\"Fantasy\", \"Mystery\"]"}"#;
        let persona: CharacterPersona = serde_json::from_str(json).unwrap();
        assert_eq!(persona.tags, vec!["Fantasy", "Mystery"]);
    }

    #[test]
    fn test_short_name() {
        let json = r#"{"character_id": "abc", "name": "Luna - The Moon Witch"}"#;
        let persona: CharacterPersona = serde_json::from_str(json).unwrap();
        assert_eq!(persona.short_name(), "Luna");
    }

    #[test]
    fn test_input_skips_unset_optionals() {
        let input = CharacterInput {
            name: "Luna".into(),
            short_description: "A witch".into(),
            ..Default::default()
        };
        let value = serde_json::to_value(&input).unwrap();
        assert!(value.get("greeting").is_none());
        assert!(value.get("category").is_none());
        assert_eq!(value["tags"], serde_json::json!([]));
    }

    #[test]
    fn test_turn_wire_format() {
        let turn = CharacterTurn::user("hi", "10:00");
        let value = serde_json::to_value(&turn).unwrap();
        assert_eq!(value["type"], "user");
    }
}
