//! # Domain models for clubs, profiles and sessions
//!
//! Typed records narrowed from the raw JSON rows the backend returns. Every
//! `Deserialize` impl here is the validation point for one table: a row that
//! does not fit becomes [`crate::Error::Decode`] instead of leaking into the UI.
//!
//! ## Types
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`Club`] | A row of the `clublists` table. Column names (`club_name`, `club_image`) are mapped onto Rust field names. Tags stay a raw comma-separated string; use [`Club::tag_list`] for tokens. |
//! | [`ClubForm`] | The user-editable text fields of a club, used for both create and update. |
//! | [`ImageFile`] | A picked image file (name + bytes) on its way to blob storage. |
//! | [`Profile`] | A row of the `profiles` table. `id` equals the auth user id. |
//! | [`ProfileUpdate`] | A partial update of a profile; `None` fields are left untouched. |
//! | [`AuthUser`] / [`Session`] | The signed-in identity as returned by the auth endpoints. |

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::tags::parse_tags;

/// A club listed in the directory.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Club {
    pub id: i64,
    #[serde(rename = "club_name")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Public URL of the club image, empty when none was stored.
    #[serde(rename = "club_image", default, deserialize_with = "null_as_default")]
    pub image_url: String,
    /// Comma-separated free text: "games, strategy"
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: String,
    pub created_at: DateTime<Utc>,
    /// Meeting format, e.g. "In person" or "Virtual"
    #[serde(default)]
    pub format: Option<String>,
    /// Hosting department or organisation
    #[serde(default)]
    pub host: Option<String>,
}

impl Club {
    /// Trimmed, non-empty, deduplicated tag tokens.
    pub fn tag_list(&self) -> Vec<String> {
        parse_tags(&self.tags)
    }
}

/// Text fields of a club as entered in the create/edit forms.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ClubForm {
    #[serde(rename = "club_name")]
    pub name: String,
    pub description: String,
    pub tags: String,
}

impl ClubForm {
    pub fn new(name: &str, description: &str, tags: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            tags: tags.to_string(),
        }
    }

    /// Prefill an edit form from an existing club.
    pub fn from_club(club: &Club) -> Self {
        Self::new(&club.name, &club.description, &club.tags)
    }
}

/// An image picked by the user, not yet uploaded.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageFile {
    pub name: String,
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

impl ImageFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
            content_type: None,
        }
    }

    /// Text after the last dot; the whole name when there is no dot.
    pub fn extension(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or_default()
    }
}

/// A user profile.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl Profile {
    /// Get display name, falling back to email, then to a placeholder.
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .or(self.email.as_deref())
            .unwrap_or("Unnamed member")
    }
}

/// Fields to change on a profile.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// Metadata attached to the auth user at sign-up.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserMetadata {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

/// The authenticated identity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_metadata: UserMetadata,
}

impl AuthUser {
    pub fn display_name(&self) -> &str {
        self.user_metadata
            .name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or(&self.id)
    }
}

/// A signed-in session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Unix seconds
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: AuthUser,
}

impl Session {
    pub fn user_id(&self) -> &str {
        &self.user.id
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now.timestamp())
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_club_from_backend_row() {
        let club: Club = serde_json::from_value(json!({
            "id": 7,
            "club_name": "Chess Club",
            "description": null,
            "club_image": "https://cdn/img.png",
            "tags": "games, strategy",
            "created_at": "2024-05-01T12:34:56.789012+00:00"
        }))
        .unwrap();

        assert_eq!(club.id, 7);
        assert_eq!(club.name, "Chess Club");
        assert_eq!(club.description, "");
        assert_eq!(club.image_url, "https://cdn/img.png");
        assert_eq!(club.tag_list(), vec!["games", "strategy"]);
        assert!(club.format.is_none());
    }

    #[test]
    fn test_club_row_missing_name_is_rejected() {
        let result: Result<Club, _> = serde_json::from_value(json!({
            "id": 1,
            "created_at": "2024-05-01T00:00:00Z"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_club_form_serializes_column_names() {
        let form = ClubForm::new("Chess Club", "weekly matches", "games");
        let value = serde_json::to_value(&form).unwrap();
        assert_eq!(value["club_name"], "Chess Club");
        assert_eq!(value["description"], "weekly matches");
    }

    #[test]
    fn test_profile_display_name_fallbacks() {
        let mut profile = Profile {
            id: "u1".into(),
            email: Some("ana@ucdavis.edu".into()),
            full_name: Some("Ana".into()),
            bio: None,
            avatar_url: None,
        };
        assert_eq!(profile.display_name(), "Ana");

        profile.full_name = Some("  ".into());
        assert_eq!(profile.display_name(), "ana@ucdavis.edu");

        profile.email = None;
        assert_eq!(profile.display_name(), "Unnamed member");
    }

    #[test]
    fn test_profile_update_skips_unset_fields() {
        let update = ProfileUpdate {
            bio: Some("hi".into()),
            ..Default::default()
        };
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value, json!({ "bio": "hi" }));
    }

    #[test]
    fn test_image_extension() {
        assert_eq!(ImageFile::new("photo.final.PNG", vec![]).extension(), "PNG");
        assert_eq!(ImageFile::new("noext", vec![]).extension(), "noext");
    }

    #[test]
    fn test_session_expiry() {
        let session = Session {
            access_token: "t".into(),
            refresh_token: None,
            expires_at: Some(100),
            user: AuthUser {
                id: "u1".into(),
                email: None,
                user_metadata: UserMetadata::default(),
            },
        };
        let at = |secs| DateTime::<Utc>::from_timestamp(secs, 0).unwrap();
        assert!(!session.is_expired(at(99)));
        assert!(session.is_expired(at(100)));
    }
}
