//! Sidebar Model
//!
//! Recent conversations and characters with the "active" highlight derived
//! from the current location.

use regex::Regex;
use std::sync::OnceLock;

use super::route::Route;
use crate::models::{CharacterPersona, Conversation};

/// Conversations shown before "View All"
pub const RECENT_LIMIT: usize = 3;

/// What the current location points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveChat {
    Conversation(i64),
    Character(String),
    /// `/chat` with no id
    NewChat,
    Nothing,
}

fn character_chat_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^/characterchat/([a-zA-Z0-9-]+)$").expect("valid regex"))
}

fn chat_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^/chat/(\d+)$").expect("valid regex"))
}

impl ActiveChat {
    /// Derive from a raw pathname
    pub fn from_path(path: &str) -> Self {
        if let Some(caps) = character_chat_pattern().captures(path) {
            return ActiveChat::Character(caps[1].to_string());
        }
        if let Some(caps) = chat_pattern().captures(path) {
            if let Ok(id) = caps[1].parse() {
                return ActiveChat::Conversation(id);
            }
        }
        if path == "/chat" {
            return ActiveChat::NewChat;
        }
        ActiveChat::Nothing
    }

    pub fn from_route(route: &Route) -> Self {
        Self::from_path(&route.path())
    }
}

/// Lists and UI state owned by the sidebar
#[derive(Debug, Clone, Default)]
pub struct SidebarState {
    pub conversations: Vec<Conversation>,
    pub characters: Vec<CharacterPersona>,
    pub search: String,
    pub active: Option<ActiveChat>,
}

impl SidebarState {
    /// Replace the conversation list; titles become display titles and the
    /// current highlight is re-applied.
    pub fn set_conversations(&mut self, conversations: Vec<Conversation>) {
        self.conversations = conversations
            .into_iter()
            .map(|mut c| {
                c.title = c.display_title();
                c
            })
            .collect();
        self.reapply();
    }

    pub fn set_characters(&mut self, characters: Vec<CharacterPersona>) {
        self.characters = characters;
        self.reapply();
    }

    fn reapply(&mut self) {
        if let Some(active) = self.active.clone() {
            self.apply(active);
        }
    }

    /// Update the active flags for a new location
    pub fn apply_path(&mut self, path: &str) {
        self.apply(ActiveChat::from_path(path));
    }

    pub fn apply(&mut self, active: ActiveChat) {
        let (conv_id, char_id) = match &active {
            ActiveChat::Conversation(id) => (Some(*id), None),
            ActiveChat::Character(id) => (None, Some(id.as_str())),
            ActiveChat::NewChat | ActiveChat::Nothing => (None, None),
        };

        for conv in &mut self.conversations {
            conv.is_active = Some(conv.id) == conv_id;
        }
        for ch in &mut self.characters {
            ch.is_active = Some(Some(ch.character_id.as_str()) == char_id);
        }
        self.active = Some(active);
    }

    /// The first few conversations, filtered by the search box
    pub fn recent(&self) -> Vec<&Conversation> {
        let query = self.search.to_lowercase();
        self.conversations
            .iter()
            .take(RECENT_LIMIT)
            .filter(|c| c.title.to_lowercase().contains(&query))
            .collect()
    }

    pub fn has_more(&self) -> bool {
        self.conversations.len() > RECENT_LIMIT
    }

    pub fn is_new_chat_active(&self) -> bool {
        self.active == Some(ActiveChat::NewChat)
    }

    pub fn active_conversation(&self) -> Option<i64> {
        self.conversations.iter().find(|c| c.is_active).map(|c| c.id)
    }

    pub fn active_character(&self) -> Option<&str> {
        self.characters
            .iter()
            .find(|c| c.active())
            .map(|c| c.character_id.as_str())
    }
}

/// Where to go after deleting a conversation: away from it if it is open
pub fn redirect_after_delete(current: &Route, deleted_id: i64) -> Option<Route> {
    match current {
        Route::Chat(Some(id)) if *id == deleted_id => Some(Route::Chat(None)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conv(id: i64, title: &str) -> Conversation {
        Conversation {
            id,
            title: title.to_string(),
            smart_tags: vec![],
            is_active: false,
            last_updated: String::new(),
            messages: vec![],
        }
    }

    fn persona(id: &str) -> CharacterPersona {
        serde_json::from_value(serde_json::json!({"character_id": id, "name": id})).unwrap()
    }

    fn sidebar() -> SidebarState {
        let mut state = SidebarState::default();
        state.set_conversations(vec![conv(41, "a"), conv(42, "b"), conv(43, "c")]);
        state.set_characters(vec![persona("abc"), persona("xyz")]);
        state
    }

    #[test]
    fn test_chat_path_activates_one_conversation() {
        let mut state = sidebar();
        state.apply_path("/chat/42");

        let active: Vec<i64> = state
            .conversations
            .iter()
            .filter(|c| c.is_active)
            .map(|c| c.id)
            .collect();
        assert_eq!(active, vec![42]);
        assert!(state.characters.iter().all(|c| !c.active()));
    }

    #[test]
    fn test_character_path_activates_one_character() {
        let mut state = sidebar();
        state.apply_path("/chat/42");
        state.apply_path("/characterchat/abc");

        assert_eq!(state.active_character(), Some("abc"));
        assert_eq!(state.characters.iter().filter(|c| c.active()).count(), 1);
        assert!(state.conversations.iter().all(|c| !c.is_active));
    }

    #[test]
    fn test_other_paths_clear_everything() {
        let mut state = sidebar();
        state.apply_path("/chat/41");
        state.apply_path("/settings");
        assert_eq!(state.active_conversation(), None);
        assert_eq!(state.active_character(), None);

        state.apply_path("/chat");
        assert!(state.is_new_chat_active());
        assert_eq!(state.active_conversation(), None);
    }

    #[test]
    fn test_refetch_keeps_highlight() {
        let mut state = sidebar();
        state.apply_path("/chat/43");
        state.set_conversations(vec![conv(43, "c"), conv(44, "d")]);
        assert_eq!(state.active_conversation(), Some(43));
    }

    #[test]
    fn test_recent_is_limited_and_searchable() {
        let mut state = SidebarState::default();
        state.set_conversations(vec![
            conv(1, "Rust"),
            conv(2, "Cooking"),
            conv(3, "Rusty bikes"),
            conv(4, "Rust again"),
        ]);
        assert!(state.has_more());
        assert_eq!(state.recent().len(), 3);

        state.search = "RUST".into();
        let ids: Vec<i64> = state.recent().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_redirect_after_deleting_open_conversation() {
        assert_eq!(
            redirect_after_delete(&Route::Chat(Some(7)), 7),
            Some(Route::Chat(None))
        );
        assert_eq!(redirect_after_delete(&Route::Chat(Some(7)), 8), None);
        assert_eq!(redirect_after_delete(&Route::Settings, 7), None);
    }
}
