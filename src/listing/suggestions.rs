//! Prompt suggestions for the empty chat screen

pub const CHAT_SUGGESTIONS: [&str; 5] = [
    "Summarize my last message",
    "Find potential memory leaks",
    "Explain the code snippet",
    "Generate a checklist",
    "Optimize this function for performance",
];

/// Suggestions containing the current input, case-insensitive
pub fn matching(input: &str) -> Vec<&'static str> {
    let needle = input.trim().to_lowercase();
    CHAT_SUGGESTIONS
        .iter()
        .copied()
        .filter(|s| s.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_shows_all() {
        assert_eq!(matching("").len(), CHAT_SUGGESTIONS.len());
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        assert_eq!(matching("CODE"), vec!["Explain the code snippet"]);
        assert!(matching("zzz").is_empty());
    }
}
