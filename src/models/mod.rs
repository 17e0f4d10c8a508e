//! Backend Data Model
//!
//! Plain records exchanged verbatim with the studio backend. The client
//! performs no normalization or invariant enforcement beyond defaults for
//! optional fields.

pub mod character;
pub mod chat;
pub mod conversation;
pub mod memory;
pub mod novel;

pub use character::{
    CharacterInput, CharacterPatch, CharacterPersona, CharacterTranscript, CharacterTurn,
    SaveTranscript, Speaker,
};
pub use chat::{ChatReply, ChatRequest, KnownTool, Tool, ToolAction, DEFAULT_MODEL};
pub use conversation::{
    title_snippet, Conversation, ConversationMessage, ConversationPatch, MessageKind,
    NewConversation, Reaction, Reactions,
};
pub use memory::{MemoryItem, MemoryPatch, NewMemoryItem};
pub use novel::{NovelDraft, NovelFolders, NovelLength, NovelRequest, SaveNovel, SavedNovel};

use serde::{Deserialize, Serialize};

/// `{ "id": ... }` returned by create endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Created {
    pub id: i64,
}

/// `{ "success": ... }` returned by mutation endpoints
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub success: bool,
}

/// Wall-clock label stored on new messages, e.g. `14:05`
pub fn clock_label(now: chrono::DateTime<chrono::Local>) -> String {
    now.format("%H:%M").to_string()
}

/// Calendar date stored in `last_updated`, e.g. `2024-05-01`
pub fn date_label(now: chrono::DateTime<chrono::Local>) -> String {
    now.format("%Y-%m-%d").to_string()
}
