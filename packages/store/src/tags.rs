//! Comma-separated tag strings.

use std::collections::HashSet;

/// Split on commas, trim, drop empty tokens and repeats.
///
/// Order of first occurrence is kept: `"Tech, Tech , ai"` → `["Tech", "ai"]`.
pub fn parse_tags(raw: &str) -> Vec<String> {
    unique_tags([raw])
}

/// Distinct tags across many tag strings, for the tag-chip list.
pub fn unique_tags<'a>(raws: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut tags = Vec::new();
    for raw in raws {
        for token in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            if seen.insert(token) {
                tags.push(token.to_string());
            }
        }
    }
    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tags_dedups_in_order() {
        assert_eq!(parse_tags("Tech, Tech , ai"), vec!["Tech", "ai"]);
    }

    #[test]
    fn test_parse_tags_drops_empty_tokens() {
        assert_eq!(parse_tags(" , games,,strategy , "), vec!["games", "strategy"]);
        assert!(parse_tags("").is_empty());
        assert!(parse_tags(" , ,").is_empty());
    }

    #[test]
    fn test_parse_tags_is_case_sensitive() {
        assert_eq!(parse_tags("AI, ai"), vec!["AI", "ai"]);
    }

    #[test]
    fn test_unique_tags_across_clubs() {
        let tags = unique_tags(["games, strategy", "music", "strategy, music, art"]);
        assert_eq!(tags, vec!["games", "strategy", "music", "art"]);
    }
}
