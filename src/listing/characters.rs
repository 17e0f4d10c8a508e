//! Character list filtering and the create/edit form rules

use crate::models::{CharacterInput, CharacterPersona};

pub const SUGGESTED_TAGS: [&str; 8] = [
    "Fantasy", "Sci-Fi", "Romance", "Adventure", "Mystery", "Comedy", "Drama", "Action",
];

pub const SUGGESTED_RELATIONSHIPS: [&str; 8] = [
    "Best Friend",
    "Mentor",
    "Rival",
    "Partner",
    "Guide",
    "Companion",
    "Teacher",
    "Guardian",
];

pub const SUGGESTED_ROLES: [&str; 7] = [
    "Helper",
    "Storyteller",
    "Advisor",
    "Entertainer",
    "Coach",
    "Confidant",
    "Explorer",
];

/// Search over name, short description and tags, then keep only `category`
/// when one is given
pub fn filter<'a>(
    characters: &'a [CharacterPersona],
    query: &str,
    category: Option<&str>,
) -> Vec<&'a CharacterPersona> {
    let query = query.trim().to_lowercase();

    characters
        .iter()
        .filter(|c| {
            query.is_empty()
                || c.name.to_lowercase().contains(&query)
                || c.short_description.to_lowercase().contains(&query)
                || c.tags.iter().any(|t| t.to_lowercase().contains(&query))
        })
        .filter(|c| category.map_or(true, |wanted| c.category == wanted))
        .collect()
}

/// Distinct categories in first-seen order
pub fn categories(characters: &[CharacterPersona]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for c in characters {
        if !c.category.is_empty() && !seen.contains(&c.category) {
            seen.push(c.category.clone());
        }
    }
    seen
}

/// Split a comma-separated tag field; entries are trimmed, empties dropped
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Add a tag to an edit list unless it is blank or already present
pub fn add_tag(tags: &mut Vec<String>, tag: &str) -> bool {
    let tag = tag.trim();
    if tag.is_empty() || tags.iter().any(|t| t == tag) {
        return false;
    }
    tags.push(tag.to_string());
    true
}

pub fn remove_tag(tags: &mut Vec<String>, tag: &str) {
    tags.retain(|t| t != tag);
}

/// A create-form field that failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Name is required")]
    MissingName,
    #[error("Short description is required")]
    MissingDescription,
}

/// Raw create-character form fields as typed by the user
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CharacterForm {
    pub name: String,
    pub short_description: String,
    pub user_relationship: String,
    pub character_role: String,
    pub user_persona_nickname: String,
    pub greeting: String,
    pub category: String,
    pub visibility: String,
    /// Comma-separated
    pub tags: String,
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl CharacterForm {
    /// Validate and build the create body
    pub fn validate(&self) -> Result<CharacterInput, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::MissingName);
        }
        let description = self.short_description.trim();
        if description.is_empty() {
            return Err(FormError::MissingDescription);
        }

        Ok(CharacterInput {
            name: name.to_string(),
            short_description: description.to_string(),
            user_relationship: self.user_relationship.trim().to_string(),
            character_role: self.character_role.trim().to_string(),
            user_persona_nickname: non_empty(&self.user_persona_nickname),
            greeting: non_empty(&self.greeting),
            voice_id: None,
            visibility: non_empty(&self.visibility),
            category: non_empty(&self.category),
            tags: parse_tags(&self.tags),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn persona(id: &str, name: &str, category: &str, tags: &[&str]) -> CharacterPersona {
        serde_json::from_value(serde_json::json!({
            "character_id": id,
            "name": name,
            "short_description": format!("{} description", name),
            "category": category,
            "tags": tags,
        }))
        .unwrap()
    }

    #[test]
    fn test_filter_by_query_and_category() {
        let list = vec![
            persona("a", "Luna", "fantasy", &["Magic"]),
            persona("b", "Rex", "scifi", &["Robots"]),
            persona("c", "Mira", "fantasy", &["robots"]),
        ];

        let ids: Vec<&str> = filter(&list, "robot", None)
            .iter()
            .map(|c| c.character_id.as_str())
            .collect();
        assert_eq!(ids, vec!["b", "c"]);

        let ids: Vec<&str> = filter(&list, "robot", Some("fantasy"))
            .iter()
            .map(|c| c.character_id.as_str())
            .collect();
        assert_eq!(ids, vec!["c"]);
    }

    #[test]
    fn test_category_named_all_is_a_real_filter() {
        let list = vec![
            persona("a", "Luna", "all", &[]),
            persona("b", "Rex", "scifi", &[]),
        ];

        let ids: Vec<&str> = filter(&list, "", Some("all"))
            .iter()
            .map(|c| c.character_id.as_str())
            .collect();
        assert_eq!(ids, vec!["a"]);
        assert_eq!(filter(&list, "", None).len(), 2);
    }

    #[test]
    fn test_categories_first_seen() {
        let list = vec![
            persona("a", "Luna", "fantasy", &[]),
            persona("b", "Rex", "scifi", &[]),
            persona("c", "Mira", "fantasy", &[]),
        ];
        assert_eq!(categories(&list), vec!["fantasy", "scifi"]);
    }

    #[test]
    fn test_parse_tags() {
        assert_eq!(parse_tags(" Fantasy, ,Mystery ,"), vec!["Fantasy", "Mystery"]);
        assert!(parse_tags("").is_empty());
    }

    #[test]
    fn test_add_tag_dedupes() {
        let mut tags = vec!["Drama".to_string()];
        assert!(add_tag(&mut tags, " Comedy "));
        assert!(!add_tag(&mut tags, "Drama"));
        assert!(!add_tag(&mut tags, "  "));
        remove_tag(&mut tags, "Drama");
        assert_eq!(tags, vec!["Comedy"]);
    }

    #[test]
    fn test_form_requires_name_and_description() {
        let mut form = CharacterForm::default();
        assert_eq!(form.validate(), Err(FormError::MissingName));

        form.name = "Luna".into();
        assert_eq!(form.validate(), Err(FormError::MissingDescription));

        form.short_description = "Moon witch".into();
        form.tags = "Fantasy, Mystery".into();
        let input = form.validate().unwrap();
        assert_eq!(input.tags, vec!["Fantasy", "Mystery"]);
        assert_eq!(input.greeting, None);
    }
}
