//! Novel generator payloads

use serde::{Deserialize, Serialize};

/// Target length of a generated novel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NovelLength {
    Short,
    #[default]
    Medium,
    Long,
    Epic,
}

impl NovelLength {
    pub const ALL: [NovelLength; 4] = [Self::Short, Self::Medium, Self::Long, Self::Epic];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Short => "Short (~1k words)",
            Self::Medium => "Medium (~5k words)",
            Self::Long => "Long (~15k words)",
            Self::Epic => "Epic (~50k+ words)",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
            Self::Epic => "epic",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.as_str() == s)
    }
}

/// Body for `POST /tools/novel/generate`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NovelRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    pub length: NovelLength,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(rename = "outlineOnly")]
    pub outline_only: bool,
}

/// Response of `POST /tools/novel/generate`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NovelDraft {
    #[serde(default)]
    pub novel: String,
}

/// Body for `POST /tools/novel/save`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveNovel {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    pub content: String,
}

/// Response of `POST /tools/novel/save`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SavedNovel {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub path: Option<String>,
}

/// Response of `GET /tools/novel/folders`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NovelFolders {
    #[serde(default)]
    pub folders: Vec<String>,
}
