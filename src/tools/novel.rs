//! Novel Generator form
//!
//! Collects the generator settings and turns them into the generate and
//! save request bodies.

use crate::models::{NovelLength, NovelRequest, SaveNovel};

pub const NOVEL_MODELS: [&str; 3] = [
    "orion-12b-it:latest",
    "orion-7b:latest",
    "gpt-4o-mini:latest",
];

pub const DEFAULT_LANGUAGE: &str = "id";
pub const DEFAULT_FOLDER: &str = "default";
pub const DEFAULT_TAG: &str = "Fantasy";

/// Narrative point of view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Pov {
    #[default]
    Third,
    ThirdOmniscient,
    First,
    Second,
}

impl Pov {
    pub const ALL: [Pov; 4] = [Self::Third, Self::ThirdOmniscient, Self::First, Self::Second];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Third => "third",
            Self::ThirdOmniscient => "third-omniscient",
            Self::First => "first",
            Self::Second => "second",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == s)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NovelForm {
    pub title: String,
    pub tags: Vec<String>,
    pub length: NovelLength,
    pub model: String,
    pub language: String,
    pub outline_only: bool,
    pub pov: Pov,
    /// Free-form concept; folded into the title when present
    pub concept: String,
    pub folder: String,
    pub filename: String,
}

impl Default for NovelForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            tags: vec![DEFAULT_TAG.to_string()],
            length: NovelLength::default(),
            model: NOVEL_MODELS[0].to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            outline_only: false,
            pov: Pov::default(),
            concept: String::new(),
            folder: DEFAULT_FOLDER.to_string(),
            filename: String::new(),
        }
    }
}

impl NovelForm {
    /// Add a genre tag; commas are stripped, blanks and duplicates ignored
    pub fn add_tag(&mut self, raw: &str) -> bool {
        let clean = raw.replace(',', "");
        crate::listing::characters::add_tag(&mut self.tags, &clean)
    }

    pub fn remove_tag(&mut self, tag: &str) {
        self.tags.retain(|t| t != tag);
    }

    /// Title sent to the generator, with concept and POV appended
    pub fn prompt_title(&self) -> String {
        if self.concept.is_empty() {
            self.title.clone()
        } else {
            format!(
                "{}\n\nConcept:\n{}\nPOV:{}",
                self.title,
                self.concept,
                self.pov.as_str()
            )
        }
    }

    pub fn request(&self) -> NovelRequest {
        NovelRequest {
            title: Some(self.prompt_title()),
            genre: Some(self.tags.join(", ")),
            length: self.length,
            language: Some(self.language.clone()),
            model: Some(self.model.clone()),
            outline_only: self.outline_only,
        }
    }

    /// File name used on save: explicit name, then title, then "untitled"
    pub fn save_name(&self) -> String {
        [&self.filename, &self.title]
            .into_iter()
            .find(|s| !s.is_empty())
            .cloned()
            .unwrap_or_else(|| "untitled".to_string())
    }

    /// Save body for generated text; `None` when there is nothing to save
    pub fn save_request(&self, content: &str) -> Option<SaveNovel> {
        if content.is_empty() {
            return None;
        }
        let name = self.save_name();
        let title = if self.title.is_empty() {
            name.clone()
        } else {
            self.title.clone()
        };
        Some(SaveNovel {
            title,
            folder: Some(self.folder.clone()),
            filename: Some(name),
            content: content.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let form = NovelForm::default();
        let req = form.request();
        assert_eq!(req.genre.as_deref(), Some("Fantasy"));
        assert_eq!(req.length, NovelLength::Medium);
        assert_eq!(req.language.as_deref(), Some("id"));
        assert_eq!(req.model.as_deref(), Some("orion-12b-it:latest"));
    }

    #[test]
    fn test_concept_folded_into_title() {
        let form = NovelForm {
            title: "The Last Coder".into(),
            concept: "A world without compilers".into(),
            pov: Pov::First,
            ..Default::default()
        };
        assert_eq!(
            form.prompt_title(),
            "The Last Coder\n\nConcept:\nA world without compilers\nPOV:first"
        );
    }

    #[test]
    fn test_tags_joined_and_deduped() {
        let mut form = NovelForm::default();
        assert!(form.add_tag("Mystery,"));
        assert!(!form.add_tag("Fantasy"));
        assert_eq!(form.request().genre.as_deref(), Some("Fantasy, Mystery"));
    }

    #[test]
    fn test_save_name_fallbacks() {
        let mut form = NovelForm::default();
        assert_eq!(form.save_name(), "untitled");
        assert!(form.save_request("").is_none());

        form.title = "Moonfall".into();
        let save = form.save_request("Once upon a time").unwrap();
        assert_eq!(save.filename.as_deref(), Some("Moonfall"));
        assert_eq!(save.folder.as_deref(), Some("default"));

        form.filename = "draft-1".into();
        assert_eq!(form.save_name(), "draft-1");
    }
}
