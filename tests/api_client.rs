//! Backend client against the in-process mock backend

mod common;

use orion::api::{ApiClient, ApiError};
use orion::models::{
    CharacterTurn, ConversationPatch, MemoryPatch, NewConversation, NewMemoryItem, NovelLength,
};
use orion::tools::NovelForm;
use serde_json::json;

fn pdf_item() -> NewMemoryItem {
    NewMemoryItem {
        name: "Doc".into(),
        kind: "PDF".into(),
        size: "1MB".into(),
        source: "Upload".into(),
        status: "Pending".into(),
    }
}

#[tokio::test]
async fn test_create_memory_item_posts_exact_body() {
    let backend = common::spawn("").await;
    let client = ApiClient::new(&backend.base_url);

    let created = client.create_memory_item(&pdf_item()).await.unwrap();

    let posts = backend.calls("POST", "/memory");
    assert_eq!(posts.len(), 1);
    assert_eq!(
        posts[0].body,
        json!({"name": "Doc", "type": "PDF", "size": "1MB", "source": "Upload", "status": "Pending"})
    );

    let items = client.list_memory_items().await.unwrap();
    assert_eq!(items, vec![pdf_item().into_item(created.id)]);
}

#[tokio::test]
async fn test_memory_status_update_and_delete() {
    let backend = common::spawn("").await;
    let client = ApiClient::new(&backend.base_url);
    let created = client.create_memory_item(&pdf_item()).await.unwrap();

    let ack = client
        .update_memory_item(created.id, &MemoryPatch::status("Indexed"))
        .await
        .unwrap();
    assert!(ack.success);
    assert_eq!(
        backend.calls("PUT", &format!("/memory/{}", created.id))[0].body,
        json!({"status": "Indexed"})
    );
    assert_eq!(client.get_memory_item(created.id).await.unwrap().status, "Indexed");

    client.delete_memory_item(created.id).await.unwrap();
    assert!(client.list_memory_items().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_item_reports_call_site_message() {
    let backend = common::spawn("").await;
    let client = ApiClient::new(&backend.base_url);

    let err = client.get_memory_item(999).await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to fetch memory item");
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_failing_backend_messages() {
    let client = ApiClient::new(common::spawn_failing().await);

    let cases = [
        (client.list_conversations().await.map(|_| ()), "Failed to fetch conversations"),
        (client.list_characters().await.map(|_| ()), "Failed to fetch character personas"),
        (client.list_memory_items().await.map(|_| ()), "Failed to fetch memory items"),
        (client.delete_character_conversation("abc").await.map(|_| ()), "Failed to delete character conversation"),
        (client.list_novel_folders().await.map(|_| ()), "Failed to list folders"),
    ];

    for (result, message) in cases {
        let err = result.unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 500, .. }));
        assert_eq!(err.to_string(), message);
    }
}

#[tokio::test]
async fn test_conversation_lifecycle() {
    let backend = common::spawn("").await;
    let client = ApiClient::new(&backend.base_url);

    let created = client
        .create_conversation(&NewConversation {
            title: "New Chat".into(),
            smart_tags: vec![],
            is_active: true,
            last_updated: "2024-05-01".into(),
            messages: vec![],
        })
        .await
        .unwrap();
    assert_eq!(backend.calls("POST", "/conversations")[0].body["is_active"], 1);

    client
        .update_conversation(created.id, &ConversationPatch::rename("Trip"))
        .await
        .unwrap();
    let conv = client.get_conversation(created.id).await.unwrap();
    assert_eq!(conv.title, "Trip");

    client.delete_conversation(created.id).await.unwrap();
    assert!(client.list_conversations().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_character_routes() {
    let backend = common::spawn("").await;
    backend.add_character(json!({"character_id": "luna", "name": "Luna", "tags": "[\"moon\"]"}));
    let client = ApiClient::new(&backend.base_url);

    let luna = client.get_character("luna").await.unwrap();
    assert_eq!(luna.tags, vec!["moon"]);

    client.activate_character("luna").await.unwrap();
    assert_eq!(backend.calls("PUT", "/character/luna/activate").len(), 1);
    let all = client.list_characters().await.unwrap();
    assert!(all[0].active());

    let turns = vec![CharacterTurn::user("halo", "10:00")];
    client.save_character_conversation("luna", &turns).await.unwrap();
    assert_eq!(
        backend.calls("POST", "/character/luna/conversation")[0].body,
        json!({"messages": [{"type": "user", "content": "halo", "timestamp": "10:00"}]})
    );

    let transcript = client.get_character_conversation("luna").await.unwrap();
    assert!(transcript.exists);
    assert_eq!(transcript.messages, turns);
}

#[tokio::test]
async fn test_novel_generate_and_save() {
    let backend = common::spawn("").await;
    let client = ApiClient::new(&backend.base_url);

    let form = NovelForm {
        title: "Moonfall".into(),
        length: NovelLength::Short,
        ..Default::default()
    };
    let draft = client.generate_novel(&form.request()).await.unwrap();
    assert!(draft.novel.starts_with("# Moonfall"));

    let body = backend.calls("POST", "/tools/novel/generate")[0].body.clone();
    assert_eq!(body["length"], "short");
    assert_eq!(body["outlineOnly"], false);

    let saved = client
        .save_novel(&form.save_request(&draft.novel).unwrap())
        .await
        .unwrap();
    assert_eq!(saved.path.as_deref(), Some("default/Moonfall.md"));

    let folders = client.list_novel_folders().await.unwrap();
    assert_eq!(folders.folders, vec!["default", "drafts"]);
}
