//! Backend seams used by the chat controllers.
//!
//! The controllers only need a handful of calls, so they depend on these
//! traits rather than on [`ApiClient`](super::ApiClient) directly. Tests
//! drive them with in-memory doubles.

use async_trait::async_trait;

use super::error::Result;
use crate::models::{
    Ack, CharacterPersona, CharacterTranscript, CharacterTurn, ChatReply, ChatRequest,
    Conversation, ConversationMessage, Created, NewConversation,
};

/// `POST /chat`
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    async fn send_chat(&self, request: &ChatRequest, conv_id: Option<i64>) -> Result<ChatReply>;
}

/// Calls made by the general chat page
#[async_trait]
pub trait ConversationBackend: ChatCompletion {
    async fn get_conversation(&self, id: i64) -> Result<Conversation>;

    async fn create_conversation(&self, conversation: &NewConversation) -> Result<Created>;

    async fn append_message(&self, id: i64, message: &ConversationMessage) -> Result<Ack>;
}

/// Calls made by the character chat page
#[async_trait]
pub trait CharacterBackend: ChatCompletion {
    async fn get_character(&self, id: &str) -> Result<CharacterPersona>;

    async fn get_character_conversation(&self, id: &str) -> Result<CharacterTranscript>;

    async fn save_character_conversation(&self, id: &str, turns: &[CharacterTurn]) -> Result<Ack>;

    async fn delete_character_conversation(&self, id: &str) -> Result<Ack>;
}
