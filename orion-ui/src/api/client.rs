//! HTTP API Client
//!
//! Functions for communicating with the studio backend. Every failure,
//! whether network, status or decoding, comes back as the fixed message of
//! the call site; the cause goes to the browser console.

use gloo_net::http::Request;
use orion::api::endpoints::{self, url};
use orion::models::{
    Ack, CharacterInput, CharacterPatch, CharacterPersona, CharacterTranscript, CharacterTurn,
    ChatReply, ChatRequest, Conversation, ConversationMessage, ConversationPatch, Created,
    MemoryItem, MemoryPatch, NewConversation, NewMemoryItem, NovelDraft, NovelFolders,
    NovelRequest, SaveNovel, SaveTranscript, SavedNovel,
};
use orion::store::KeyValueStore;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::state::BrowserStore;

/// Default backend origin
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";

/// Local storage key holding a custom backend origin
pub const BACKEND_URL_KEY: &str = "orion_backend_url";

/// Get the backend origin from local storage or use the default
pub fn get_backend_url() -> String {
    let url = BrowserStore
        .get(BACKEND_URL_KEY)
        .filter(|u| !u.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());
    url.trim_end_matches('/').to_string()
}

/// Set the backend origin in local storage
pub fn set_backend_url(url: &str) {
    if let Err(e) = BrowserStore.set(BACKEND_URL_KEY, url.trim()) {
        web_sys::console::error_1(&format!("Failed to save backend URL: {}", e).into());
    }
}

fn endpoint(path: &str) -> String {
    url(&get_backend_url(), path)
}

fn fail(context: &'static str, cause: impl std::fmt::Display) -> String {
    web_sys::console::error_1(&format!("{}: {}", context, cause).into());
    context.to_string()
}

async fn fetch<T: DeserializeOwned>(
    request: Result<Request, gloo_net::Error>,
    context: &'static str,
) -> Result<T, String> {
    let response = request
        .map_err(|e| fail(context, e))?
        .send()
        .await
        .map_err(|e| fail(context, e))?;

    if !response.ok() {
        return Err(fail(context, format!("HTTP {}", response.status())));
    }

    response.json::<T>().await.map_err(|e| fail(context, e))
}

async fn get<T: DeserializeOwned>(path: &str, context: &'static str) -> Result<T, String> {
    fetch(Request::get(&endpoint(path)).build(), context).await
}

async fn post<B: Serialize, T: DeserializeOwned>(
    path: &str,
    body: &B,
    context: &'static str,
) -> Result<T, String> {
    fetch(Request::post(&endpoint(path)).json(body), context).await
}

async fn put<B: Serialize, T: DeserializeOwned>(
    path: &str,
    body: &B,
    context: &'static str,
) -> Result<T, String> {
    fetch(Request::put(&endpoint(path)).json(body), context).await
}

async fn delete<T: DeserializeOwned>(path: &str, context: &'static str) -> Result<T, String> {
    fetch(Request::delete(&endpoint(path)).build(), context).await
}

// ============ Chat ============

pub async fn send_chat(prompt: &str, model: &str, conv_id: Option<i64>) -> Result<ChatReply, String> {
    post(&endpoints::chat(conv_id), &ChatRequest::new(prompt, model), endpoints::CHAT_FAILED).await
}

// ============ Conversations ============

pub async fn fetch_conversations() -> Result<Vec<Conversation>, String> {
    get(endpoints::CONVERSATIONS, endpoints::FETCH_CONVERSATIONS).await
}

pub async fn fetch_conversation(id: i64) -> Result<Conversation, String> {
    get(&endpoints::conversation(id), endpoints::FETCH_CONVERSATION).await
}

pub async fn create_conversation(conversation: &NewConversation) -> Result<Created, String> {
    post(endpoints::CONVERSATIONS, conversation, endpoints::CREATE_CONVERSATION).await
}

pub async fn update_conversation(id: i64, patch: &ConversationPatch) -> Result<Ack, String> {
    put(&endpoints::conversation(id), patch, endpoints::UPDATE_CONVERSATION).await
}

pub async fn add_message(id: i64, message: &ConversationMessage) -> Result<Ack, String> {
    post(&endpoints::conversation_message(id), message, endpoints::ADD_MESSAGE).await
}

pub async fn delete_conversation(id: i64) -> Result<Ack, String> {
    delete(&endpoints::conversation(id), endpoints::DELETE_CONVERSATION).await
}

// ============ Memory ============

pub async fn fetch_memory_items() -> Result<Vec<MemoryItem>, String> {
    get(endpoints::MEMORY, endpoints::FETCH_MEMORY_ITEMS).await
}

pub async fn fetch_memory_item(id: i64) -> Result<MemoryItem, String> {
    get(&endpoints::memory_item(id), endpoints::FETCH_MEMORY_ITEM).await
}

pub async fn create_memory_item(item: &NewMemoryItem) -> Result<Created, String> {
    post(endpoints::MEMORY, item, endpoints::CREATE_MEMORY_ITEM).await
}

pub async fn update_memory_item(id: i64, patch: &MemoryPatch) -> Result<Ack, String> {
    put(&endpoints::memory_item(id), patch, endpoints::UPDATE_MEMORY_ITEM).await
}

pub async fn delete_memory_item(id: i64) -> Result<Ack, String> {
    delete(&endpoints::memory_item(id), endpoints::DELETE_MEMORY_ITEM).await
}

// ============ Characters ============

pub async fn fetch_characters() -> Result<Vec<CharacterPersona>, String> {
    get(endpoints::CHARACTER_PERSONAS, endpoints::FETCH_CHARACTERS).await
}

pub async fn fetch_character(id: &str) -> Result<CharacterPersona, String> {
    get(&endpoints::character(id), endpoints::FETCH_CHARACTER).await
}

pub async fn create_character(input: &CharacterInput) -> Result<CharacterPersona, String> {
    post(endpoints::CHARACTER, input, endpoints::CREATE_CHARACTER).await
}

pub async fn update_character(id: &str, patch: &CharacterPatch) -> Result<Ack, String> {
    put(&endpoints::character(id), patch, endpoints::UPDATE_CHARACTER).await
}

pub async fn activate_character(id: &str) -> Result<Ack, String> {
    let request = Request::put(&endpoint(&endpoints::character_activate(id))).build();
    fetch(request, endpoints::ACTIVATE_CHARACTER).await
}

pub async fn delete_character(id: &str) -> Result<Ack, String> {
    delete(&endpoints::character(id), endpoints::DELETE_CHARACTER).await
}

// ============ Character transcripts ============

pub async fn fetch_character_conversation(id: &str) -> Result<CharacterTranscript, String> {
    get(&endpoints::character_conversation(id), endpoints::FETCH_CHARACTER_CONVERSATION).await
}

pub async fn save_character_conversation(id: &str, turns: &[CharacterTurn]) -> Result<Ack, String> {
    let body = SaveTranscript {
        messages: turns.to_vec(),
    };
    post(&endpoints::character_conversation(id), &body, endpoints::SAVE_CHARACTER_CONVERSATION).await
}

pub async fn delete_character_conversation(id: &str) -> Result<Ack, String> {
    delete(&endpoints::character_conversation(id), endpoints::DELETE_CHARACTER_CONVERSATION).await
}

// ============ Novel tool ============

pub async fn generate_novel(request: &NovelRequest) -> Result<NovelDraft, String> {
    post(endpoints::NOVEL_GENERATE, request, endpoints::GENERATE_NOVEL).await
}

pub async fn save_novel(request: &SaveNovel) -> Result<SavedNovel, String> {
    post(endpoints::NOVEL_SAVE, request, endpoints::SAVE_NOVEL).await
}

pub async fn fetch_novel_folders() -> Result<NovelFolders, String> {
    get(endpoints::NOVEL_FOLDERS, endpoints::LIST_NOVEL_FOLDERS).await
}
