//! Studio Backend REST Client
//!
//! Thin typed wrappers over the backend's JSON endpoints. Requests carry no
//! timeout and are never retried; a failure is reported once with the fixed
//! message of its call site.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use super::backend::{CharacterBackend, ChatCompletion, ConversationBackend};
use super::endpoints as ep;
use super::error::{ApiError, Result};
use crate::models::{
    Ack, CharacterInput, CharacterPatch, CharacterPersona, CharacterTranscript, CharacterTurn,
    ChatReply, ChatRequest, Conversation, ConversationMessage, ConversationPatch, Created,
    MemoryItem, MemoryPatch, NewConversation, NewMemoryItem, NovelDraft, NovelFolders,
    NovelRequest, SaveNovel, SaveTranscript, SavedNovel,
};

/// Backend REST client
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for `http://<host>:<port>`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        ep::url(&self.base_url, path)
    }

    /// Send a request and decode its JSON body, tagging any failure with `context`
    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        context: &'static str,
    ) -> Result<T> {
        let response = request.send().await.map_err(|e| {
            tracing::warn!(error = %e, "{}", context);
            ApiError::Transport { context, source: e }
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "{}", context);
            return Err(ApiError::Status {
                context,
                status: status.as_u16(),
            });
        }

        response.json::<T>().await.map_err(|e| {
            tracing::warn!(error = %e, "{}: unexpected response body", context);
            ApiError::Decode { context, source: e }
        })
    }

    // ============ Chat ============

    pub async fn send_chat(&self, request: &ChatRequest, conv_id: Option<i64>) -> Result<ChatReply> {
        tracing::debug!(model = %request.model, conv_id = ?conv_id, "Sending chat prompt");
        let req = self.client.post(self.url(&ep::chat(conv_id))).json(request);
        self.execute(req, ep::CHAT_FAILED).await
    }

    // ============ Memory ============

    pub async fn list_memory_items(&self) -> Result<Vec<MemoryItem>> {
        let req = self.client.get(self.url(ep::MEMORY));
        self.execute(req, ep::FETCH_MEMORY_ITEMS).await
    }

    pub async fn get_memory_item(&self, id: i64) -> Result<MemoryItem> {
        let req = self.client.get(self.url(&ep::memory_item(id)));
        self.execute(req, ep::FETCH_MEMORY_ITEM).await
    }

    pub async fn create_memory_item(&self, item: &NewMemoryItem) -> Result<Created> {
        tracing::debug!(name = %item.name, "Creating memory item");
        let req = self.client.post(self.url(ep::MEMORY)).json(item);
        self.execute(req, ep::CREATE_MEMORY_ITEM).await
    }

    pub async fn update_memory_item(&self, id: i64, patch: &MemoryPatch) -> Result<Ack> {
        let req = self.client.put(self.url(&ep::memory_item(id))).json(patch);
        self.execute(req, ep::UPDATE_MEMORY_ITEM).await
    }

    pub async fn delete_memory_item(&self, id: i64) -> Result<Ack> {
        let req = self.client.delete(self.url(&ep::memory_item(id)));
        self.execute(req, ep::DELETE_MEMORY_ITEM).await
    }

    // ============ Conversations ============

    pub async fn list_conversations(&self) -> Result<Vec<Conversation>> {
        let req = self.client.get(self.url(ep::CONVERSATIONS));
        self.execute(req, ep::FETCH_CONVERSATIONS).await
    }

    pub async fn get_conversation(&self, id: i64) -> Result<Conversation> {
        let req = self.client.get(self.url(&ep::conversation(id)));
        self.execute(req, ep::FETCH_CONVERSATION).await
    }

    pub async fn create_conversation(&self, conversation: &NewConversation) -> Result<Created> {
        tracing::debug!(title = %conversation.title, "Creating conversation");
        let req = self.client.post(self.url(ep::CONVERSATIONS)).json(conversation);
        self.execute(req, ep::CREATE_CONVERSATION).await
    }

    pub async fn update_conversation(&self, id: i64, patch: &ConversationPatch) -> Result<Ack> {
        let req = self.client.put(self.url(&ep::conversation(id))).json(patch);
        self.execute(req, ep::UPDATE_CONVERSATION).await
    }

    pub async fn append_message(&self, id: i64, message: &ConversationMessage) -> Result<Ack> {
        let req = self
            .client
            .post(self.url(&ep::conversation_message(id)))
            .json(message);
        self.execute(req, ep::ADD_MESSAGE).await
    }

    pub async fn delete_conversation(&self, id: i64) -> Result<Ack> {
        let req = self.client.delete(self.url(&ep::conversation(id)));
        self.execute(req, ep::DELETE_CONVERSATION).await
    }

    // ============ Characters ============

    pub async fn list_characters(&self) -> Result<Vec<CharacterPersona>> {
        let req = self.client.get(self.url(ep::CHARACTER_PERSONAS));
        self.execute(req, ep::FETCH_CHARACTERS).await
    }

    pub async fn get_character(&self, id: &str) -> Result<CharacterPersona> {
        let req = self.client.get(self.url(&ep::character(id)));
        self.execute(req, ep::FETCH_CHARACTER).await
    }

    pub async fn create_character(&self, input: &CharacterInput) -> Result<CharacterPersona> {
        tracing::debug!(name = %input.name, "Creating character persona");
        let req = self.client.post(self.url(ep::CHARACTER)).json(input);
        self.execute(req, ep::CREATE_CHARACTER).await
    }

    pub async fn update_character(&self, id: &str, patch: &CharacterPatch) -> Result<Ack> {
        let req = self.client.put(self.url(&ep::character(id))).json(patch);
        self.execute(req, ep::UPDATE_CHARACTER).await
    }

    pub async fn activate_character(&self, id: &str) -> Result<Ack> {
        let req = self.client.put(self.url(&ep::character_activate(id)));
        self.execute(req, ep::ACTIVATE_CHARACTER).await
    }

    pub async fn delete_character(&self, id: &str) -> Result<Ack> {
        let req = self.client.delete(self.url(&ep::character(id)));
        self.execute(req, ep::DELETE_CHARACTER).await
    }

    // ============ Character transcripts ============

    pub async fn get_character_conversation(&self, id: &str) -> Result<CharacterTranscript> {
        let req = self.client.get(self.url(&ep::character_conversation(id)));
        self.execute(req, ep::FETCH_CHARACTER_CONVERSATION).await
    }

    pub async fn save_character_conversation(
        &self,
        id: &str,
        turns: &[CharacterTurn],
    ) -> Result<Ack> {
        tracing::debug!(character_id = %id, turns = turns.len(), "Saving character transcript");
        let body = SaveTranscript {
            messages: turns.to_vec(),
        };
        let req = self
            .client
            .post(self.url(&ep::character_conversation(id)))
            .json(&body);
        self.execute(req, ep::SAVE_CHARACTER_CONVERSATION).await
    }

    pub async fn delete_character_conversation(&self, id: &str) -> Result<Ack> {
        let req = self.client.delete(self.url(&ep::character_conversation(id)));
        self.execute(req, ep::DELETE_CHARACTER_CONVERSATION).await
    }

    // ============ Novel tool ============

    pub async fn generate_novel(&self, request: &NovelRequest) -> Result<NovelDraft> {
        tracing::debug!(length = request.length.as_str(), "Generating novel");
        let req = self.client.post(self.url(ep::NOVEL_GENERATE)).json(request);
        self.execute(req, ep::GENERATE_NOVEL).await
    }

    pub async fn save_novel(&self, novel: &SaveNovel) -> Result<SavedNovel> {
        let req = self.client.post(self.url(ep::NOVEL_SAVE)).json(novel);
        self.execute(req, ep::SAVE_NOVEL).await
    }

    pub async fn list_novel_folders(&self) -> Result<NovelFolders> {
        let req = self.client.get(self.url(ep::NOVEL_FOLDERS));
        self.execute(req, ep::LIST_NOVEL_FOLDERS).await
    }
}

#[async_trait]
impl ChatCompletion for ApiClient {
    async fn send_chat(&self, request: &ChatRequest, conv_id: Option<i64>) -> Result<ChatReply> {
        ApiClient::send_chat(self, request, conv_id).await
    }
}

#[async_trait]
impl ConversationBackend for ApiClient {
    async fn get_conversation(&self, id: i64) -> Result<Conversation> {
        ApiClient::get_conversation(self, id).await
    }

    async fn create_conversation(&self, conversation: &NewConversation) -> Result<Created> {
        ApiClient::create_conversation(self, conversation).await
    }

    async fn append_message(&self, id: i64, message: &ConversationMessage) -> Result<Ack> {
        ApiClient::append_message(self, id, message).await
    }
}

#[async_trait]
impl CharacterBackend for ApiClient {
    async fn get_character(&self, id: &str) -> Result<CharacterPersona> {
        ApiClient::get_character(self, id).await
    }

    async fn get_character_conversation(&self, id: &str) -> Result<CharacterTranscript> {
        ApiClient::get_character_conversation(self, id).await
    }

    async fn save_character_conversation(&self, id: &str, turns: &[CharacterTurn]) -> Result<Ack> {
        ApiClient::save_character_conversation(self, id, turns).await
    }

    async fn delete_character_conversation(&self, id: &str) -> Result<Ack> {
        ApiClient::delete_character_conversation(self, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_building() {
        let client = ApiClient::new("http://127.0.0.1:8000/");
        assert_eq!(client.url(ep::MEMORY), "http://127.0.0.1:8000/memory");
        assert_eq!(
            client.url(&ep::chat(Some(3))),
            "http://127.0.0.1:8000/chat?conv_id=3"
        );
    }

    #[tokio::test]
    async fn test_unreachable_backend_reports_call_site() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let client = ApiClient::new(format!("http://127.0.0.1:{}", port));
        let err = client.list_conversations().await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch conversations");
        assert!(matches!(err, ApiError::Transport { .. }));
    }
}
