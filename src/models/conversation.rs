//! General chat conversations
//!
//! Conversations are stored by the backend with their messages inline.
//! The client never normalizes them; it only fills defaults for optional
//! fields and derives display values (titles, reactions).

use serde::{Deserialize, Serialize};

use super::chat::ToolAction;

/// Maximum length of a title snippet derived from message content
pub const TITLE_SNIPPET_LEN: usize = 48;

/// A backend-stored conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "smartTags", default)]
    pub smart_tags: Vec<String>,
    #[serde(default, with = "int_bool")]
    pub is_active: bool,
    #[serde(default)]
    pub last_updated: String,
    #[serde(default)]
    pub messages: Vec<ConversationMessage>,
}

/// Body for `POST /conversations`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewConversation {
    pub title: String,
    #[serde(rename = "smartTags")]
    pub smart_tags: Vec<String>,
    #[serde(with = "int_bool")]
    pub is_active: bool,
    pub last_updated: String,
    pub messages: Vec<ConversationMessage>,
}

/// Partial update for `PUT /conversations/:id`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "smartTags", skip_serializing_if = "Option::is_none")]
    pub smart_tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

impl ConversationPatch {
    pub fn rename(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }
}

/// Direction of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    /// Written by the user
    Sent,
    /// Produced by the assistant
    Received,
}

/// Like/dislike counters on a message
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reactions {
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub dislikes: u32,
}

/// Reaction a user can toggle on a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    Like,
    Dislike,
}

impl Reactions {
    /// Toggle a reaction. Likes and dislikes are mutually exclusive and each
    /// is either 0 or 1.
    pub fn toggle(&mut self, reaction: Reaction) {
        match reaction {
            Reaction::Like => {
                self.likes = if self.likes > 0 { 0 } else { 1 };
                self.dislikes = 0;
            }
            Reaction::Dislike => {
                self.dislikes = if self.dislikes > 0 { 0 } else { 1 };
                self.likes = 0;
            }
        }
    }
}

/// A single chat turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub content: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub reactions: Reactions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_action: Option<ToolAction>,
}

impl ConversationMessage {
    pub fn sent(id: i64, content: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            id,
            kind: MessageKind::Sent,
            content: content.into(),
            timestamp: timestamp.into(),
            reactions: Reactions::default(),
            tool_action: None,
        }
    }

    pub fn received(id: i64, content: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            id,
            kind: MessageKind::Received,
            content: content.into(),
            timestamp: timestamp.into(),
            reactions: Reactions::default(),
            tool_action: None,
        }
    }

    pub fn with_tool_action(mut self, action: Option<ToolAction>) -> Self {
        self.tool_action = action;
        self
    }
}

impl Conversation {
    /// Whether the stored title is a placeholder that should be replaced
    /// by a snippet of the conversation itself.
    pub fn has_generic_title(&self) -> bool {
        let lower = self.title.to_lowercase();
        self.title.trim().is_empty() || lower.contains("new chat") || lower.contains("untitled")
    }

    /// Title shown in lists.
    ///
    /// Generic titles are replaced by a snippet of the first user message,
    /// or the first message of any kind when the user never wrote one.
    pub fn display_title(&self) -> String {
        if !self.has_generic_title() {
            return self.title.clone();
        }

        let first = self
            .messages
            .iter()
            .find(|m| m.kind == MessageKind::Sent)
            .or_else(|| self.messages.first());

        match first {
            Some(msg) if !msg.content.is_empty() => {
                let snippet = title_snippet(&msg.content);
                if snippet.is_empty() {
                    "New Chat".to_string()
                } else {
                    snippet
                }
            }
            _ => self.title.clone(),
        }
    }

    /// Toggle a reaction on one of the messages; returns false when the id is unknown
    pub fn react(&mut self, message_id: i64, reaction: Reaction) -> bool {
        match self.messages.iter_mut().find(|m| m.id == message_id) {
            Some(msg) => {
                msg.reactions.toggle(reaction);
                true
            }
            None => false,
        }
    }
}

/// Collapse whitespace and cut a message down to a title-sized snippet.
///
/// Snippets reaching [`TITLE_SNIPPET_LEN`] characters are cut to 45 and
/// end with `...`.
pub fn title_snippet(content: &str) -> String {
    let collapsed = content.split_whitespace().collect::<Vec<_>>().join(" ");
    let snippet: String = collapsed.chars().take(TITLE_SNIPPET_LEN).collect();

    if snippet.chars().count() >= TITLE_SNIPPET_LEN {
        let cut: String = snippet.chars().take(TITLE_SNIPPET_LEN - 3).collect();
        format!("{}...", cut.trim())
    } else {
        snippet
    }
}

/// The backend stores booleans as 0/1 integers
pub(crate) mod int_bool {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(i64::from(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Flag {
            Int(i64),
            Bool(bool),
        }

        Ok(match Option::<Flag>::deserialize(deserializer)? {
            Some(Flag::Int(n)) => n != 0,
            Some(Flag::Bool(b)) => b,
            None => false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conversation(title: &str, messages: Vec<ConversationMessage>) -> Conversation {
        Conversation {
            id: 1,
            title: title.to_string(),
            smart_tags: vec![],
            is_active: false,
            last_updated: "2024-05-01".to_string(),
            messages,
        }
    }

    #[test]
    fn test_decode_backend_conversation() {
        let json = r#"{
            "id": 7,
            "title": "Trip planning",
            "smartTags": ["travel"],
            "is_active": 1,
            "last_updated": "2024-05-01",
            "messages": [
                {"id": 1, "type": "sent", "content": "hi", "timestamp": "10:00",
                 "reactions": {"likes": 0, "dislikes": 0}}
            ]
        }"#;

        let conv: Conversation = serde_json::from_str(json).unwrap();
        assert_eq!(conv.id, 7);
        assert!(conv.is_active);
        assert_eq!(conv.smart_tags, vec!["travel"]);
        assert_eq!(conv.messages[0].kind, MessageKind::Sent);
    }

    #[test]
    fn test_is_active_serializes_as_int() {
        let conv = conversation("x", vec![]);
        let value = serde_json::to_value(&conv).unwrap();
        assert_eq!(value["is_active"], 0);
        assert!(value.get("smartTags").is_some());
    }

    #[test]
    fn test_display_title_keeps_real_title() {
        let conv = conversation("Rust questions", vec![ConversationMessage::sent(1, "hello", "")]);
        assert_eq!(conv.display_title(), "Rust questions");
    }

    #[test]
    fn test_display_title_uses_first_sent_message() {
        let conv = conversation(
            "New Chat",
            vec![
                ConversationMessage::received(1, "Welcome!", ""),
                ConversationMessage::sent(2, "  how   do I\nbake bread ", ""),
            ],
        );
        assert_eq!(conv.display_title(), "how do I bake bread");
    }

    #[test]
    fn test_display_title_truncates_long_snippets() {
        let long = "a".repeat(60);
        let conv = conversation("untitled", vec![ConversationMessage::sent(1, long, "")]);
        let title = conv.display_title();
        assert!(title.ends_with("..."));
        assert_eq!(title.chars().count(), 48);
    }

    #[test]
    fn test_reaction_toggle_is_exclusive() {
        let mut reactions = Reactions::default();
        reactions.toggle(Reaction::Like);
        assert_eq!(reactions, Reactions { likes: 1, dislikes: 0 });
        reactions.toggle(Reaction::Dislike);
        assert_eq!(reactions, Reactions { likes: 0, dislikes: 1 });
        reactions.toggle(Reaction::Dislike);
        assert_eq!(reactions, Reactions::default());
    }
}
