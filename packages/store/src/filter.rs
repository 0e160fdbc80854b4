//! Client-side filtering of a loaded club list, and the server-side sort keys.

use crate::models::Club;

/// Ordering requested from the backend for the directory.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Newest,
    Name,
}

impl SortKey {
    pub fn column(&self) -> &'static str {
        match self {
            SortKey::Newest => "created_at",
            SortKey::Name => "club_name",
        }
    }

    /// Both keys sort descending: newest first, names Z to A.
    pub fn ascending(&self) -> bool {
        false
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Newest => "Newest",
            SortKey::Name => "Name",
        }
    }

    pub fn all() -> [SortKey; 2] {
        [SortKey::Newest, SortKey::Name]
    }
}

/// Search text plus tag and categorical filters. Empty fields match everything.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClubFilter {
    /// Case-insensitive substring of the club name.
    pub search: String,
    /// Case-insensitive exact tag token.
    pub tag: String,
    /// Exact meeting format.
    pub format: String,
    /// Exact host.
    pub host: String,
}

impl ClubFilter {
    pub fn is_empty(&self) -> bool {
        self.search.is_empty()
            && self.tag.trim().is_empty()
            && self.format.is_empty()
            && self.host.is_empty()
    }

    pub fn matches(&self, club: &Club) -> bool {
        if !club
            .name
            .to_lowercase()
            .contains(&self.search.to_lowercase())
        {
            return false;
        }

        let tag = self.tag.trim().to_lowercase();
        if !tag.is_empty() && !club.tag_list().iter().any(|t| t.to_lowercase() == tag) {
            return false;
        }

        exact(&self.format, club.format.as_deref()) && exact(&self.host, club.host.as_deref())
    }
}

fn exact(wanted: &str, actual: Option<&str>) -> bool {
    wanted.is_empty() || actual == Some(wanted)
}

/// Clubs that pass `filter`, in their original order.
pub fn filter_clubs(clubs: &[Club], filter: &ClubFilter) -> Vec<Club> {
    clubs.iter().filter(|c| filter.matches(c)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn club(id: i64, name: &str, tags: &str) -> Club {
        Club {
            id,
            name: name.to_string(),
            description: String::new(),
            image_url: String::new(),
            tags: tags.to_string(),
            created_at: Utc::now(),
            format: None,
            host: None,
        }
    }

    fn search(text: &str) -> ClubFilter {
        ClubFilter {
            search: text.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let clubs = vec![club(1, "Tech Club", "tech"), club(2, "Chess Club", "games")];

        let hits = filter_clubs(&clubs, &search("tech"));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 1);

        assert_eq!(filter_clubs(&clubs, &search("CLUB")).len(), 2);
        assert!(filter_clubs(&clubs, &search("xyz")).is_empty());
    }

    #[test]
    fn test_empty_filter_passes_everything() {
        let clubs = vec![club(1, "A", ""), club(2, "B", "x")];
        let filter = ClubFilter::default();
        assert!(filter.is_empty());
        assert_eq!(filter_clubs(&clubs, &filter), clubs);
    }

    #[test]
    fn test_tag_filter_is_exact_token_match() {
        let clubs = vec![
            club(1, "Robotics", "Engineering, AI"),
            club(2, "Painting", "art"),
            club(3, "Startups", "business, entrepreneurship"),
        ];
        let by_tag = |tag: &str| {
            filter_clubs(
                &clubs,
                &ClubFilter {
                    tag: tag.to_string(),
                    ..Default::default()
                },
            )
            .iter()
            .map(|c| c.id)
            .collect::<Vec<_>>()
        };

        assert_eq!(by_tag("ai"), vec![1]);
        assert_eq!(by_tag(" ART "), vec![2]);
        // no partial-tag matching
        assert!(by_tag("entrepreneur").is_empty());
        assert!(by_tag("eng").is_empty());
    }

    #[test]
    fn test_tag_and_search_combine() {
        let clubs = vec![club(1, "Tech Club", "ai"), club(2, "AI Society", "ai")];
        let filter = ClubFilter {
            search: "society".into(),
            tag: "AI".into(),
            ..Default::default()
        };
        let hits = filter_clubs(&clubs, &filter);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 2);
    }

    #[test]
    fn test_categorical_filters_are_exact() {
        let mut virtual_club = club(1, "Remote Reading", "books");
        virtual_club.format = Some("Virtual".into());
        virtual_club.host = Some("Library".into());
        let mut in_person = club(2, "Hiking", "outdoors");
        in_person.format = Some("In person".into());
        let unknown = club(3, "Mystery", "");
        let clubs = vec![virtual_club, in_person, unknown];

        let format = |f: &str| ClubFilter {
            format: f.to_string(),
            ..Default::default()
        };
        assert_eq!(filter_clubs(&clubs, &format("Virtual")).len(), 1);
        assert!(filter_clubs(&clubs, &format("virtual")).is_empty());

        let host = ClubFilter {
            host: "Library".into(),
            ..Default::default()
        };
        assert_eq!(filter_clubs(&clubs, &host)[0].id, 1);
    }

    #[test]
    fn test_sort_key_columns() {
        assert_eq!(SortKey::default(), SortKey::Newest);
        assert_eq!(SortKey::Newest.column(), "created_at");
        assert!(!SortKey::Newest.ascending());
        assert_eq!(SortKey::Name.column(), "club_name");
        assert!(!SortKey::Name.ascending());
    }
}
