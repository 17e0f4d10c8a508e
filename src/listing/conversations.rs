//! Conversation list: search and date grouping

use crate::models::Conversation;

/// Group label for conversations without a `last_updated` date
pub const UNKNOWN_DATE: &str = "Unknown";

/// Conversations whose title or smart tags contain the query (case-insensitive)
pub fn search<'a>(conversations: &'a [Conversation], query: &str) -> Vec<&'a Conversation> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return conversations.iter().collect();
    }

    conversations
        .iter()
        .filter(|c| {
            c.display_title().to_lowercase().contains(&query)
                || c.smart_tags.iter().any(|t| t.to_lowercase().contains(&query))
        })
        .collect()
}

/// A run of conversations sharing one `last_updated` value
#[derive(Debug, Clone, PartialEq)]
pub struct DateGroup<'a> {
    pub date: String,
    pub conversations: Vec<&'a Conversation>,
}

/// Group by `last_updated`, groups ordered by first appearance
pub fn group_by_date<'a>(conversations: &[&'a Conversation]) -> Vec<DateGroup<'a>> {
    let mut groups: Vec<DateGroup<'a>> = Vec::new();

    for conv in conversations {
        let date = if conv.last_updated.trim().is_empty() {
            UNKNOWN_DATE
        } else {
            conv.last_updated.as_str()
        };

        match groups.iter_mut().find(|g| g.date == date) {
            Some(group) => group.conversations.push(conv),
            None => groups.push(DateGroup {
                date: date.to_string(),
                conversations: vec![conv],
            }),
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conv(id: i64, title: &str, tags: &[&str], date: &str) -> Conversation {
        Conversation {
            id,
            title: title.to_string(),
            smart_tags: tags.iter().map(|t| t.to_string()).collect(),
            is_active: false,
            last_updated: date.to_string(),
            messages: vec![],
        }
    }

    #[test]
    fn test_search_matches_title_and_tags() {
        let list = vec![
            conv(1, "Weekend trip", &["travel"], "2024-05-01"),
            conv(2, "Sourdough", &["baking", "Travel-food"], "2024-05-02"),
            conv(3, "Taxes", &[], "2024-05-02"),
        ];

        let ids: Vec<i64> = search(&list, "TRAVEL").iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(search(&list, "  ").len(), 3);
    }

    #[test]
    fn test_group_by_date_keeps_first_seen_order() {
        let list = vec![
            conv(1, "a", &[], "2024-05-02"),
            conv(2, "b", &[], "2024-05-01"),
            conv(3, "c", &[], "2024-05-02"),
            conv(4, "d", &[], ""),
        ];
        let refs: Vec<&Conversation> = list.iter().collect();
        let groups = group_by_date(&refs);

        let dates: Vec<&str> = groups.iter().map(|g| g.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-05-02", "2024-05-01", UNKNOWN_DATE]);
        let first: Vec<i64> = groups[0].conversations.iter().map(|c| c.id).collect();
        assert_eq!(first, vec![1, 3]);
    }
}
