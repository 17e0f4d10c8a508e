//! Client Route Table
//!
//! Maps URL paths to pages, including the legacy paths that redirect.

use std::fmt;

/// Utility tool pages under `/tool/*`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolPage {
    MediaPlayer,
    TodoList,
    MoodBoard,
    UnitConverter,
    ColorPicker,
    QrGenerator,
    NovelGenerator,
}

impl ToolPage {
    pub const ALL: [ToolPage; 7] = [
        Self::MediaPlayer,
        Self::TodoList,
        Self::MoodBoard,
        Self::UnitConverter,
        Self::ColorPicker,
        Self::QrGenerator,
        Self::NovelGenerator,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Self::MediaPlayer => "media-player",
            Self::TodoList => "todo-list",
            Self::MoodBoard => "mood-board",
            Self::UnitConverter => "unit-converter",
            Self::ColorPicker => "color-picker",
            Self::QrGenerator => "qr-generator",
            Self::NovelGenerator => "novel-generator",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.slug() == slug)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::MediaPlayer => "Media Player",
            Self::TodoList => "Todo List",
            Self::MoodBoard => "Mood Board",
            Self::UnitConverter => "Unit Converter",
            Self::ColorPicker => "Color Picker",
            Self::QrGenerator => "QR Generator",
            Self::NovelGenerator => "Novel Generator",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::MediaPlayer => "Play audio and video files quickly.",
            Self::TodoList => "Manage tasks and track progress.",
            Self::MoodBoard => "Quick scratchpad for ideas and visuals.",
            Self::UnitConverter => "Convert units like length, mass, and temperature.",
            Self::ColorPicker => "Pick colors and generate palettes (HEX/RGB).",
            Self::QrGenerator => "Generate QR codes from URLs or text.",
            Self::NovelGenerator => "Draft stories with the language model.",
        }
    }
}

/// A resolved client route
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/chat` (blank) or `/chat/:id`
    Chat(Option<i64>),
    Conversations,
    Characters,
    NewCharacter,
    CharacterDetail(String),
    EditCharacter(String),
    CharacterChat(String),
    /// `/tool` dashboard
    Tools,
    Tool(ToolPage),
    Memory,
    Settings,
    NotFound(String),
}

/// Outcome of resolving a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Render this route at the requested path
    Render(Route),
    /// Replace the location with this route (legacy paths, `/`)
    Redirect(Route),
}

impl Resolution {
    pub fn route(&self) -> &Route {
        match self {
            Self::Render(r) | Self::Redirect(r) => r,
        }
    }

    pub fn into_route(self) -> Route {
        match self {
            Self::Render(r) | Self::Redirect(r) => r,
        }
    }
}

impl Route {
    /// Resolve a pathname. Query strings and fragments must already be stripped.
    pub fn resolve(path: &str) -> Resolution {
        let trimmed = path.trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Resolution::Redirect(Route::Chat(None)),
            ["chat"] => Resolution::Render(Route::Chat(None)),
            ["chat", id] => match id.parse::<i64>() {
                Ok(id) => Resolution::Render(Route::Chat(Some(id))),
                Err(_) => Resolution::Render(Route::NotFound(path.to_string())),
            },
            ["conversations"] => Resolution::Render(Route::Conversations),
            ["characters"] => Resolution::Render(Route::Characters),
            ["character", "new"] => Resolution::Render(Route::NewCharacter),
            ["character", id, "detail"] => Resolution::Render(Route::CharacterDetail(id.to_string())),
            ["character", id, "edit"] => Resolution::Render(Route::EditCharacter(id.to_string())),
            ["characterchat", id] => Resolution::Render(Route::CharacterChat(id.to_string())),
            ["char", id] => Resolution::Redirect(Route::CharacterChat(id.to_string())),
            ["tools", ..] => Resolution::Redirect(Route::Tools),
            ["tool"] => Resolution::Render(Route::Tools),
            ["tool", slug] => match ToolPage::from_slug(slug) {
                Some(tool) => Resolution::Render(Route::Tool(tool)),
                None => Resolution::Render(Route::NotFound(path.to_string())),
            },
            ["memory"] => Resolution::Render(Route::Memory),
            ["settings"] => Resolution::Render(Route::Settings),
            _ => Resolution::Render(Route::NotFound(path.to_string())),
        }
    }

    /// Parse a path, following redirects
    pub fn parse(path: &str) -> Route {
        Self::resolve(path).into_route()
    }

    /// Canonical path of the route
    pub fn path(&self) -> String {
        match self {
            Route::Chat(None) => "/chat".to_string(),
            Route::Chat(Some(id)) => format!("/chat/{}", id),
            Route::Conversations => "/conversations".to_string(),
            Route::Characters => "/characters".to_string(),
            Route::NewCharacter => "/character/new".to_string(),
            Route::CharacterDetail(id) => format!("/character/{}/detail", id),
            Route::EditCharacter(id) => format!("/character/{}/edit", id),
            Route::CharacterChat(id) => format!("/characterchat/{}", id),
            Route::Tools => "/tool".to_string(),
            Route::Tool(tool) => format!("/tool/{}", tool.slug()),
            Route::Memory => "/memory".to_string(),
            Route::Settings => "/settings".to_string(),
            Route::NotFound(path) => path.clone(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Link that opens a conversation from anywhere, e.g. for sharing
pub fn share_url(origin: &str, conversation_id: i64) -> String {
    format!("{}{}", origin.trim_end_matches('/'), Route::Chat(Some(conversation_id)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_redirects_to_chat() {
        assert_eq!(Route::resolve("/"), Resolution::Redirect(Route::Chat(None)));
    }

    #[test]
    fn test_chat_routes() {
        assert_eq!(Route::parse("/chat"), Route::Chat(None));
        assert_eq!(Route::parse("/chat/42"), Route::Chat(Some(42)));
        assert!(matches!(Route::parse("/chat/abc"), Route::NotFound(_)));
    }

    #[test]
    fn test_character_routes() {
        assert_eq!(Route::parse("/character/new"), Route::NewCharacter);
        assert_eq!(
            Route::parse("/character/luna-1/detail"),
            Route::CharacterDetail("luna-1".into())
        );
        assert_eq!(
            Route::parse("/character/luna-1/edit"),
            Route::EditCharacter("luna-1".into())
        );
        assert_eq!(
            Route::parse("/characterchat/luna-1"),
            Route::CharacterChat("luna-1".into())
        );
    }

    #[test]
    fn test_legacy_redirects() {
        assert_eq!(
            Route::resolve("/char/abc"),
            Resolution::Redirect(Route::CharacterChat("abc".into()))
        );
        assert_eq!(Route::resolve("/tools"), Resolution::Redirect(Route::Tools));
        assert_eq!(
            Route::resolve("/tools/todo-list"),
            Resolution::Redirect(Route::Tools)
        );
    }

    #[test]
    fn test_tool_routes() {
        assert_eq!(Route::parse("/tool"), Route::Tools);
        assert_eq!(
            Route::parse("/tool/qr-generator"),
            Route::Tool(ToolPage::QrGenerator)
        );
        assert!(matches!(Route::parse("/tool/teleporter"), Route::NotFound(_)));
    }

    #[test]
    fn test_unknown_path_is_not_found() {
        assert_eq!(
            Route::parse("/nowhere/at/all"),
            Route::NotFound("/nowhere/at/all".into())
        );
    }

    #[test]
    fn test_path_round_trip_for_every_tool() {
        for tool in ToolPage::ALL {
            let route = Route::Tool(tool);
            assert_eq!(Route::parse(&route.path()), route);
        }
    }

    #[test]
    fn test_share_url() {
        assert_eq!(
            share_url("http://localhost:5173/", 9),
            "http://localhost:5173/chat/9"
        );
    }
}
