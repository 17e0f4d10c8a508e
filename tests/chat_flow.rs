//! Chat controllers driving the real client against the mock backend

mod common;

use std::sync::Arc;
use std::time::Duration;

use orion::api::ApiClient;
use orion::models::{MessageKind, Speaker};
use orion::nav::{Navigator, Route, SidebarState};
use orion::session::{CharacterChatSession, CharacterTiming, ChatSession, SendOutcome};
use serde_json::json;

fn quick_timing() -> CharacterTiming {
    CharacterTiming {
        save_debounce: Duration::from_millis(150),
        min_typing: Duration::ZERO,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_first_message_creates_conversation_and_rewrites_route() {
    let backend = common::spawn("hello").await;
    let client = Arc::new(ApiClient::new(&backend.base_url));
    let nav = Navigator::default();
    let mut chat = ChatSession::new(client, nav.clone(), "orion-12b-it:latest");

    assert_eq!(chat.send("hi").await, SendOutcome::Replied);

    let creates = backend.calls("POST", "/conversations");
    assert_eq!(creates.len(), 1);
    let messages = creates[0].body["messages"].as_array().unwrap();
    assert_eq!(messages[0]["content"], "hi");
    assert_eq!(messages[0]["type"], "sent");
    assert_eq!(messages[1]["content"], "hello");
    assert_eq!(messages[1]["type"], "received");

    let id = chat.conversation_id().unwrap();
    assert_eq!(nav.current(), Route::Chat(Some(id)));
    assert_eq!(nav.current().path(), format!("/chat/{}", id));

    // the chat request went out before the conversation existed
    assert_eq!(backend.calls("POST", "/chat").len(), 1);
    assert_eq!(
        backend.calls("POST", "/chat")[0].body,
        json!({"prompt": "hi", "model": "orion-12b-it:latest"})
    );
}

#[tokio::test]
async fn test_follow_up_appends_to_existing_conversation() {
    let backend = common::spawn("sure").await;
    backend.add_conversation(json!({
        "id": 5,
        "title": "Plans",
        "smartTags": [],
        "is_active": 1,
        "last_updated": "2024-05-01",
        "messages": []
    }));
    let client = Arc::new(ApiClient::new(&backend.base_url));
    let mut chat = ChatSession::new(client, Navigator::new(Route::Chat(Some(5))), "m");
    chat.sync_with_route().await;

    chat.send("one more thing").await;

    assert_eq!(backend.calls("POST", "/chat?conv_id=5").len(), 1);
    let appended = backend.calls("POST", "/conversations/5/message");
    assert_eq!(appended.len(), 2);
    assert!(backend.calls("POST", "/conversations").is_empty());

    let kinds: Vec<MessageKind> = chat.messages().iter().map(|m| m.kind).collect();
    assert_eq!(kinds, vec![MessageKind::Sent, MessageKind::Received]);
}

#[tokio::test]
async fn test_sidebar_follows_new_conversation() {
    let backend = common::spawn("hello").await;
    let client = Arc::new(ApiClient::new(&backend.base_url));
    let nav = Navigator::default();
    let mut chat = ChatSession::new(Arc::clone(&client), nav.clone(), "m");
    chat.send("hi").await;

    let mut sidebar = SidebarState::default();
    sidebar.set_conversations(client.list_conversations().await.unwrap());
    sidebar.apply_path(&nav.current().path());

    assert_eq!(sidebar.active_conversation(), chat.conversation_id());
    assert_eq!(sidebar.recent()[0].title, "hi");
}

#[tokio::test]
async fn test_character_chat_saves_after_quiet_period() {
    let backend = common::spawn("Halo juga!").await;
    backend.add_character(json!({
        "character_id": "luna",
        "name": "Luna",
        "greeting": "Hi there",
        "user_relationship": "Friend",
        "character_role": "Guide"
    }));
    let client = Arc::new(ApiClient::new(&backend.base_url));

    let mut session = CharacterChatSession::open(client, "luna", "m", quick_timing())
        .await
        .unwrap();
    assert_eq!(session.turns().len(), 1);
    assert_eq!(session.turns()[0].speaker, Speaker::Character);
    assert_eq!(session.turns()[0].content, "Hi there");

    session.send("halo").await;
    assert!(backend.calls("POST", "/character/luna/conversation").is_empty());

    tokio::time::sleep(Duration::from_millis(500)).await;
    let saves = backend.calls("POST", "/character/luna/conversation");
    assert_eq!(saves.len(), 1);
    assert_eq!(saves[0].body["messages"].as_array().unwrap().len(), 3);

    let prompt = backend.calls("POST", "/chat")[0].body["prompt"].clone();
    let prompt = prompt.as_str().unwrap();
    assert!(prompt.starts_with("Kamu adalah Luna."));
    assert!(prompt.contains("Luna: Hi there\nUser: halo\n\nLuna:"));
}

#[tokio::test]
async fn test_character_chat_reopens_saved_transcript() {
    let backend = common::spawn("Tentu.").await;
    backend.add_character(json!({"character_id": "luna", "name": "Luna", "greeting": "Hi there"}));
    let client = Arc::new(ApiClient::new(&backend.base_url));

    let mut first = CharacterChatSession::open(Arc::clone(&client), "luna", "m", quick_timing())
        .await
        .unwrap();
    first.send("ingat aku?").await;
    first.flush().await.unwrap();
    drop(first);

    let second = CharacterChatSession::open(Arc::clone(&client), "luna", "m", quick_timing())
        .await
        .unwrap();
    assert_eq!(second.turns().len(), 3);
    assert_eq!(second.user_turn_count(), 1);

    let mut third = second;
    third.reset().await.unwrap();
    assert_eq!(third.turns().len(), 1);
    let reopened = client.get_character_conversation("luna").await.unwrap();
    assert!(!reopened.exists);
}

#[tokio::test]
async fn test_unknown_character_fails_to_open() {
    let backend = common::spawn("").await;
    let client = Arc::new(ApiClient::new(&backend.base_url));

    let result = CharacterChatSession::open(client, "ghost", "m", quick_timing()).await;
    match result {
        Err(err) => assert_eq!(err.to_string(), "Failed to fetch character persona"),
        Ok(_) => panic!("expected the open to fail"),
    }
}
