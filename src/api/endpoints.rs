//! Backend paths and the fixed failure message of every call site.
//!
//! Shared by the native client and the browser client so both report the
//! same text for the same failure.

use urlencoding::encode;

// ============ Failure messages ============

pub const CHAT_FAILED: &str = "Chat request failed";

pub const FETCH_CONVERSATIONS: &str = "Failed to fetch conversations";
pub const FETCH_CONVERSATION: &str = "Failed to fetch conversation";
pub const CREATE_CONVERSATION: &str = "Failed to create conversation";
pub const UPDATE_CONVERSATION: &str = "Failed to update conversation";
pub const DELETE_CONVERSATION: &str = "Failed to delete conversation";
pub const ADD_MESSAGE: &str = "Failed to add message";

pub const FETCH_MEMORY_ITEMS: &str = "Failed to fetch memory items";
pub const FETCH_MEMORY_ITEM: &str = "Failed to fetch memory item";
pub const CREATE_MEMORY_ITEM: &str = "Failed to create memory item";
pub const UPDATE_MEMORY_ITEM: &str = "Failed to update memory item";
pub const DELETE_MEMORY_ITEM: &str = "Failed to delete memory item";

pub const FETCH_CHARACTERS: &str = "Failed to fetch character personas";
pub const FETCH_CHARACTER: &str = "Failed to fetch character persona";
pub const CREATE_CHARACTER: &str = "Failed to create character persona";
pub const UPDATE_CHARACTER: &str = "Failed to update character persona";
pub const ACTIVATE_CHARACTER: &str = "Failed to activate character persona";
pub const DELETE_CHARACTER: &str = "Failed to delete character persona";

pub const FETCH_CHARACTER_CONVERSATION: &str = "Failed to fetch character conversation";
pub const SAVE_CHARACTER_CONVERSATION: &str = "Failed to save character conversation";
pub const DELETE_CHARACTER_CONVERSATION: &str = "Failed to delete character conversation";

pub const GENERATE_NOVEL: &str = "Failed to generate novel";
pub const SAVE_NOVEL: &str = "Failed to save novel";
pub const LIST_NOVEL_FOLDERS: &str = "Failed to list folders";

// ============ Paths ============

/// `/chat`, with `?conv_id=` when the reply belongs to a conversation
pub fn chat(conv_id: Option<i64>) -> String {
    match conv_id {
        Some(id) => format!("/chat?conv_id={}", id),
        None => "/chat".to_string(),
    }
}

pub const CONVERSATIONS: &str = "/conversations";

pub fn conversation(id: i64) -> String {
    format!("/conversations/{}", id)
}

pub fn conversation_message(id: i64) -> String {
    format!("/conversations/{}/message", id)
}

pub const MEMORY: &str = "/memory";

pub fn memory_item(id: i64) -> String {
    format!("/memory/{}", id)
}

pub const CHARACTER_PERSONAS: &str = "/character_personas";
pub const CHARACTER: &str = "/character";

pub fn character(id: &str) -> String {
    format!("/character/{}", encode(id))
}

pub fn character_activate(id: &str) -> String {
    format!("/character/{}/activate", encode(id))
}

pub fn character_conversation(id: &str) -> String {
    format!("/character/{}/conversation", encode(id))
}

pub const NOVEL_GENERATE: &str = "/tools/novel/generate";
pub const NOVEL_SAVE: &str = "/tools/novel/save";
pub const NOVEL_FOLDERS: &str = "/tools/novel/folders";

/// Join a base origin and a path without doubling slashes
pub fn url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}
