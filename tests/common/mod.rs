//! In-process studio backend for integration tests.
//!
//! Serves the same JSON routes as the real backend from memory and records
//! every request so tests can assert on exact bodies.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};

/// One request as the backend saw it
#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub method: &'static str,
    pub path: String,
    pub body: Value,
}

#[derive(Debug, Default)]
pub struct MockState {
    pub requests: Vec<Recorded>,
    pub memory: Vec<Value>,
    pub conversations: Vec<Value>,
    pub characters: Vec<Value>,
    pub transcripts: HashMap<String, Vec<Value>>,
    pub chat_reply: String,
    pub next_id: i64,
}

pub type Shared = Arc<Mutex<MockState>>;

/// A running mock backend
pub struct MockBackend {
    pub base_url: String,
    pub state: Shared,
}

impl MockBackend {
    pub fn requests(&self) -> Vec<Recorded> {
        self.state.lock().unwrap().requests.clone()
    }

    /// Requests matching a method and path
    pub fn calls(&self, method: &str, path: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }

    pub fn add_character(&self, persona: Value) {
        self.state.lock().unwrap().characters.push(persona);
    }

    pub fn add_conversation(&self, conversation: Value) {
        self.state.lock().unwrap().conversations.push(conversation);
    }
}

fn record(state: &Shared, method: &'static str, path: String, body: Value) {
    state.lock().unwrap().requests.push(Recorded { method, path, body });
}

fn next_id(state: &mut MockState) -> i64 {
    state.next_id += 1;
    state.next_id
}

fn find_index(items: &[Value], key: &str, id: &str) -> Option<usize> {
    items.iter().position(|v| match &v[key] {
        Value::String(s) => s == id,
        other => other.to_string() == id,
    })
}

/// Start a backend answering every chat prompt with `chat_reply`
pub async fn spawn(chat_reply: &str) -> MockBackend {
    let state: Shared = Arc::new(Mutex::new(MockState {
        chat_reply: chat_reply.to_string(),
        next_id: 100,
        ..Default::default()
    }));

    let app = Router::new()
        .route("/chat", post(chat))
        .route("/memory", get(list_memory).post(create_memory))
        .route(
            "/memory/:id",
            get(get_memory).put(update_memory).delete(delete_memory),
        )
        .route("/conversations", get(list_conversations).post(create_conversation))
        .route(
            "/conversations/:id",
            get(get_conversation)
                .put(update_conversation)
                .delete(delete_conversation),
        )
        .route("/conversations/:id/message", post(append_message))
        .route("/character_personas", get(list_characters))
        .route("/character", post(create_character))
        .route(
            "/character/:id",
            get(get_character).put(update_character).delete(delete_character),
        )
        .route("/character/:id/activate", put(activate_character))
        .route(
            "/character/:id/conversation",
            get(get_transcript).post(save_transcript).delete(delete_transcript),
        )
        .route("/tools/novel/generate", post(generate_novel))
        .route("/tools/novel/save", post(save_novel))
        .route("/tools/novel/folders", get(novel_folders))
        .with_state(Arc::clone(&state));

    MockBackend {
        base_url: serve(app).await,
        state,
    }
}

/// Start a backend that answers every request with 500
pub async fn spawn_failing() -> String {
    let app = Router::new().fallback(|| async { StatusCode::INTERNAL_SERVER_ERROR });
    serve(app).await
}

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

// ============ Chat ============

async fn chat(
    State(state): State<Shared>,
    Query(params): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> Json<Value> {
    let path = match params.get("conv_id") {
        Some(id) => format!("/chat?conv_id={}", id),
        None => "/chat".to_string(),
    };
    record(&state, "POST", path, body);
    let reply = state.lock().unwrap().chat_reply.clone();
    Json(json!({ "response": reply }))
}

// ============ Memory ============

async fn list_memory(State(state): State<Shared>) -> Json<Value> {
    record(&state, "GET", "/memory".into(), Value::Null);
    Json(Value::Array(state.lock().unwrap().memory.clone()))
}

async fn create_memory(State(state): State<Shared>, Json(body): Json<Value>) -> Json<Value> {
    record(&state, "POST", "/memory".into(), body.clone());
    let mut s = state.lock().unwrap();
    let id = next_id(&mut s);
    let mut item = body;
    item["id"] = json!(id);
    s.memory.push(item);
    Json(json!({ "id": id }))
}

async fn get_memory(
    State(state): State<Shared>,
    Path(id): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    record(&state, "GET", format!("/memory/{}", id), Value::Null);
    let s = state.lock().unwrap();
    find_index(&s.memory, "id", &id)
        .map(|i| Json(s.memory[i].clone()))
        .ok_or(StatusCode::NOT_FOUND)
}

async fn update_memory(
    State(state): State<Shared>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    record(&state, "PUT", format!("/memory/{}", id), body.clone());
    let mut s = state.lock().unwrap();
    let i = find_index(&s.memory, "id", &id).ok_or(StatusCode::NOT_FOUND)?;
    if let (Some(item), Some(patch)) = (s.memory[i].as_object_mut(), body.as_object()) {
        for (k, v) in patch {
            item.insert(k.clone(), v.clone());
        }
    }
    Ok(Json(json!({ "success": true })))
}

async fn delete_memory(State(state): State<Shared>, Path(id): Path<String>) -> Json<Value> {
    record(&state, "DELETE", format!("/memory/{}", id), Value::Null);
    let mut s = state.lock().unwrap();
    let found = find_index(&s.memory, "id", &id).map(|i| s.memory.remove(i));
    Json(json!({ "success": found.is_some() }))
}

// ============ Conversations ============

async fn list_conversations(State(state): State<Shared>) -> Json<Value> {
    record(&state, "GET", "/conversations".into(), Value::Null);
    Json(Value::Array(state.lock().unwrap().conversations.clone()))
}

async fn create_conversation(State(state): State<Shared>, Json(body): Json<Value>) -> Json<Value> {
    record(&state, "POST", "/conversations".into(), body.clone());
    let mut s = state.lock().unwrap();
    let id = next_id(&mut s);
    let mut conv = body;
    conv["id"] = json!(id);
    s.conversations.push(conv);
    Json(json!({ "id": id }))
}

async fn get_conversation(
    State(state): State<Shared>,
    Path(id): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    record(&state, "GET", format!("/conversations/{}", id), Value::Null);
    let s = state.lock().unwrap();
    find_index(&s.conversations, "id", &id)
        .map(|i| Json(s.conversations[i].clone()))
        .ok_or(StatusCode::NOT_FOUND)
}

async fn update_conversation(
    State(state): State<Shared>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    record(&state, "PUT", format!("/conversations/{}", id), body.clone());
    let mut s = state.lock().unwrap();
    let i = find_index(&s.conversations, "id", &id).ok_or(StatusCode::NOT_FOUND)?;
    if let (Some(conv), Some(patch)) = (s.conversations[i].as_object_mut(), body.as_object()) {
        for (k, v) in patch {
            conv.insert(k.clone(), v.clone());
        }
    }
    Ok(Json(json!({ "success": true })))
}

async fn append_message(
    State(state): State<Shared>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    record(&state, "POST", format!("/conversations/{}/message", id), body.clone());
    let mut s = state.lock().unwrap();
    let i = find_index(&s.conversations, "id", &id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(messages) = s.conversations[i]["messages"].as_array_mut() {
        messages.push(body);
    }
    Ok(Json(json!({ "success": true })))
}

async fn delete_conversation(State(state): State<Shared>, Path(id): Path<String>) -> Json<Value> {
    record(&state, "DELETE", format!("/conversations/{}", id), Value::Null);
    let mut s = state.lock().unwrap();
    let found = find_index(&s.conversations, "id", &id).map(|i| s.conversations.remove(i));
    Json(json!({ "success": found.is_some() }))
}

// ============ Characters ============

async fn list_characters(State(state): State<Shared>) -> Json<Value> {
    record(&state, "GET", "/character_personas".into(), Value::Null);
    Json(Value::Array(state.lock().unwrap().characters.clone()))
}

async fn create_character(State(state): State<Shared>, Json(body): Json<Value>) -> Json<Value> {
    record(&state, "POST", "/character".into(), body.clone());
    let mut s = state.lock().unwrap();
    let id = next_id(&mut s);
    let mut persona = body;
    persona["character_id"] = json!(format!("char-{}", id));
    s.characters.push(persona.clone());
    Json(persona)
}

async fn get_character(
    State(state): State<Shared>,
    Path(id): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    record(&state, "GET", format!("/character/{}", id), Value::Null);
    let s = state.lock().unwrap();
    find_index(&s.characters, "character_id", &id)
        .map(|i| Json(s.characters[i].clone()))
        .ok_or(StatusCode::NOT_FOUND)
}

async fn update_character(
    State(state): State<Shared>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Json<Value> {
    record(&state, "PUT", format!("/character/{}", id), body);
    Json(json!({ "success": true }))
}

async fn activate_character(State(state): State<Shared>, Path(id): Path<String>) -> Json<Value> {
    record(&state, "PUT", format!("/character/{}/activate", id), Value::Null);
    let mut s = state.lock().unwrap();
    for persona in s.characters.iter_mut() {
        let active = persona["character_id"] == id.as_str();
        persona["isActive"] = json!(active);
    }
    Json(json!({ "success": true }))
}

async fn delete_character(State(state): State<Shared>, Path(id): Path<String>) -> Json<Value> {
    record(&state, "DELETE", format!("/character/{}", id), Value::Null);
    let mut s = state.lock().unwrap();
    let found = find_index(&s.characters, "character_id", &id).map(|i| s.characters.remove(i));
    Json(json!({ "success": found.is_some() }))
}

// ============ Character transcripts ============

async fn get_transcript(State(state): State<Shared>, Path(id): Path<String>) -> Json<Value> {
    record(&state, "GET", format!("/character/{}/conversation", id), Value::Null);
    let s = state.lock().unwrap();
    match s.transcripts.get(&id) {
        Some(messages) => Json(json!({
            "character_id": id,
            "messages": messages,
            "exists": true,
        })),
        None => Json(json!({ "character_id": id, "messages": [], "exists": false })),
    }
}

async fn save_transcript(
    State(state): State<Shared>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Json<Value> {
    record(&state, "POST", format!("/character/{}/conversation", id), body.clone());
    let messages = body["messages"].as_array().cloned().unwrap_or_default();
    state.lock().unwrap().transcripts.insert(id, messages);
    Json(json!({ "success": true }))
}

async fn delete_transcript(State(state): State<Shared>, Path(id): Path<String>) -> Json<Value> {
    record(&state, "DELETE", format!("/character/{}/conversation", id), Value::Null);
    let removed = state.lock().unwrap().transcripts.remove(&id);
    Json(json!({ "success": removed.is_some() }))
}

// ============ Novel tool ============

async fn generate_novel(State(state): State<Shared>, Json(body): Json<Value>) -> Json<Value> {
    record(&state, "POST", "/tools/novel/generate".into(), body.clone());
    let title = body["title"].as_str().unwrap_or("untitled").to_string();
    Json(json!({ "novel": format!("# {}\n\nOnce upon a time.", title) }))
}

async fn save_novel(State(state): State<Shared>, Json(body): Json<Value>) -> Json<Value> {
    record(&state, "POST", "/tools/novel/save".into(), body.clone());
    let folder = body["folder"].as_str().unwrap_or("default");
    let filename = body["filename"].as_str().unwrap_or("untitled");
    Json(json!({ "success": true, "path": format!("{}/{}.md", folder, filename) }))
}

async fn novel_folders(State(state): State<Shared>) -> Json<Value> {
    record(&state, "GET", "/tools/novel/folders".into(), Value::Null);
    Json(json!({ "folders": ["default", "drafts"] }))
}
