//! # Directory: typed queries for every screen
//!
//! [`Directory`] wraps a [`Backend`] and issues the concrete table, auth and
//! storage calls the screens need. Raw rows are narrowed into the records of
//! [`crate::models`] here, so nothing above this layer sees JSON.
//!
//! ## Tables
//!
//! | Const | Table | Shape |
//! |-------|-------|-------|
//! | [`CLUBS`] | `clublists` | one row per club |
//! | [`JOINS`] | `club_joins` | `(user_id, club_id)` membership edge |
//! | [`FOLLOWS`] | `club_follows` | `(user_id, club_id)` follow edge |
//! | [`FRIENDS`] | `friends` | directed `(user_id, friend_id)` edge |
//! | [`PROFILES`] | `profiles` | one row per auth user, same `id` |
//!
//! ## Operations
//!
//! | Group | Methods |
//! |-------|---------|
//! | Auth | [`sign_up`](Directory::sign_up), [`sign_in`](Directory::sign_in), [`sign_out`](Directory::sign_out), [`session`](Directory::session), [`restore_session`](Directory::restore_session) |
//! | Clubs | [`list_clubs`](Directory::list_clubs), [`club`](Directory::club), [`create_club`](Directory::create_club), [`update_club`](Directory::update_club), [`delete_club`](Directory::delete_club) |
//! | Edges | [`set_joined`](Directory::set_joined), [`set_following`](Directory::set_following), [`relations`](Directory::relations), [`joined_clubs`](Directory::joined_clubs) |
//! | Friends | [`friends`](Directory::friends), [`search_profiles`](Directory::search_profiles), [`add_friend`](Directory::add_friend), [`remove_friend`](Directory::remove_friend) |
//! | Profile | [`profile`](Directory::profile), [`load_or_create_profile`](Directory::load_or_create_profile), [`update_profile`](Directory::update_profile), [`upload_avatar`](Directory::upload_avatar) |
//!
//! Form input is validated before any call is made. [`relations`](Directory::relations)
//! loads the viewer state of a whole page of clubs with at most four selects,
//! however many clubs are shown.

use std::collections::HashMap;

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use thiserror::Error as ThisError;

use crate::backend::{to_row, Backend, UploadOptions};
use crate::config::ClubHubConfig;
use crate::error::{Error, Result};
use crate::filter::SortKey;
use crate::models::{AuthUser, Club, ClubForm, ImageFile, Profile, ProfileUpdate, Session};
use crate::query::{Filter, Query, Row};
use crate::state::ClubRelations;
use crate::validate::{validate_club_update, validate_login, validate_new_club, Registration, ValidationError};

pub const CLUBS: &str = "clublists";
pub const JOINS: &str = "club_joins";
pub const FOLLOWS: &str = "club_follows";
pub const FRIENDS: &str = "friends";
pub const PROFILES: &str = "profiles";

/// Why a club create or update did not go through. `Display` is the
/// user-facing message; the backend cause is kept as the source.
#[derive(Clone, Debug, PartialEq, ThisError)]
pub enum ClubSaveError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("Image upload failed.")]
    Upload(#[source] Error),
    #[error("Could not create club.")]
    Insert(#[source] Error),
    #[error("Could not update the club.")]
    Update(#[source] Error),
}

/// Why a sign-up or sign-in did not go through. Backend auth messages are
/// shown as-is.
#[derive(Clone, Debug, PartialEq, ThisError)]
pub enum AuthError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Backend(#[from] Error),
}

/// Typed data access over a [`Backend`].
#[derive(Clone, Debug)]
pub struct Directory<B> {
    backend: B,
    config: ClubHubConfig,
}

impl<B: Backend> Directory<B> {
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, ClubHubConfig::default())
    }

    pub fn with_config(backend: B, config: ClubHubConfig) -> Self {
        Self { backend, config }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> &ClubHubConfig {
        &self.config
    }

    // -- auth --------------------------------------------------------------

    pub async fn session(&self) -> Option<Session> {
        self.backend.session().await
    }

    pub fn restore_session(&self, session: Session) {
        self.backend.restore_session(session);
    }

    /// Create an account carrying `name` and `username` as user metadata.
    /// Does not sign in.
    pub async fn sign_up(&self, form: &Registration) -> Result<AuthUser, AuthError> {
        form.validate()?;
        let metadata = to_row(&json!({
            "name": form.name.trim(),
            "username": form.username.trim(),
        }))?;
        Ok(self
            .backend
            .sign_up(form.email.trim(), &form.password, metadata)
            .await?)
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        validate_login(email, password)?;
        Ok(self
            .backend
            .sign_in_with_password(email.trim(), password)
            .await?)
    }

    pub async fn sign_out(&self) -> Result<()> {
        self.backend.sign_out().await
    }

    // -- clubs -------------------------------------------------------------

    /// Every club, ordered by the backend.
    pub async fn list_clubs(&self, sort: SortKey) -> Result<Vec<Club>> {
        let query = Query::from(CLUBS).order(sort.column(), sort.ascending());
        decode_all(self.backend.select(&query).await?)
    }

    /// One club, `None` when no row has this id.
    pub async fn club(&self, id: i64) -> Result<Option<Club>> {
        let query = Query::from(CLUBS).eq("id", id).single();
        self.backend
            .select(&query)
            .await?
            .into_iter()
            .next()
            .map(decode)
            .transpose()
    }

    /// Validate, upload the image, then insert the club with its public URL.
    pub async fn create_club(
        &self,
        form: &ClubForm,
        image: Option<&ImageFile>,
    ) -> Result<Club, ClubSaveError> {
        validate_new_club(form, image)?;
        let image = image.ok_or(ValidationError::IncompleteClub)?;

        let storage = &self.config.storage;
        let path = format!(
            "public/{}.{}",
            Utc::now().timestamp_millis(),
            image.extension()
        );
        let options = UploadOptions {
            upsert: false,
            cache_control_secs: Some(storage.cache_control_secs),
            content_type: image.content_type.clone(),
        };
        self.backend
            .upload(&storage.club_images_bucket, &path, image.bytes.clone(), &options)
            .await
            .map_err(ClubSaveError::Upload)?;
        let image_url = self.backend.public_url(&storage.club_images_bucket, &path);

        let mut row = to_row(form).map_err(ClubSaveError::Insert)?;
        row.insert("club_image".to_string(), Value::from(image_url));
        let inserted = self
            .backend
            .insert(CLUBS, vec![row])
            .await
            .map_err(ClubSaveError::Insert)?;
        first(inserted, "inserted club")
            .and_then(decode)
            .map_err(ClubSaveError::Insert)
    }

    /// Overwrite the text fields and image URL of club `id`.
    pub async fn update_club(
        &self,
        id: i64,
        form: &ClubForm,
        image_url: &str,
    ) -> Result<(), ClubSaveError> {
        validate_club_update(form, image_url)?;
        let mut patch = to_row(form).map_err(ClubSaveError::Update)?;
        patch.insert("club_image".to_string(), Value::from(image_url.trim()));
        self.backend
            .update(CLUBS, &[Filter::eq("id", id)], patch)
            .await
            .map_err(ClubSaveError::Update)?;
        Ok(())
    }

    pub async fn delete_club(&self, id: i64) -> Result<()> {
        self.backend.delete(CLUBS, &[Filter::eq("id", id)]).await
    }

    // -- membership and follow edges -----------------------------------------

    pub async fn set_joined(&self, user_id: &str, club_id: i64, joined: bool) -> Result<()> {
        self.set_edge(JOINS, user_id, club_id, joined).await
    }

    pub async fn set_following(&self, user_id: &str, club_id: i64, following: bool) -> Result<()> {
        self.set_edge(FOLLOWS, user_id, club_id, following).await
    }

    async fn set_edge(&self, table: &str, user_id: &str, club_id: i64, present: bool) -> Result<()> {
        if present {
            let row = to_row(&json!({ "user_id": user_id, "club_id": club_id }))?;
            self.backend.insert(table, vec![row]).await?;
        } else {
            let filters = [Filter::eq("user_id", user_id), Filter::eq("club_id", club_id)];
            self.backend.delete(table, &filters).await?;
        }
        Ok(())
    }

    /// Joined/following flags and friends-joined counts for `club_ids`.
    ///
    /// No request is made for an empty set, and the friends-joined query is
    /// skipped when the user has no friends.
    pub async fn relations(&self, user_id: &str, club_ids: &[i64]) -> Result<ClubRelations> {
        if club_ids.is_empty() {
            return Ok(ClubRelations::default());
        }

        let edges = |table: &str| {
            Query::from(table)
                .select("club_id")
                .eq("user_id", user_id)
                .in_list("club_id", club_ids.iter().copied())
        };
        let joined = int_column(&self.backend.select(&edges(JOINS)).await?, "club_id")?;
        let following = int_column(&self.backend.select(&edges(FOLLOWS)).await?, "club_id")?;

        let friend_ids = self.friend_ids(user_id).await?;
        let mut friends_joined = HashMap::new();
        if !friend_ids.is_empty() {
            let query = Query::from(JOINS)
                .select("user_id,club_id")
                .in_list("user_id", friend_ids)
                .in_list("club_id", club_ids.iter().copied());
            for club_id in int_column(&self.backend.select(&query).await?, "club_id")? {
                *friends_joined.entry(club_id).or_insert(0) += 1;
            }
        }

        Ok(ClubRelations::new(joined, following, friends_joined))
    }

    /// Clubs the user has joined, newest first.
    pub async fn joined_clubs(&self, user_id: &str) -> Result<Vec<Club>> {
        let query = Query::from(JOINS).select("club_id").eq("user_id", user_id);
        let ids = int_column(&self.backend.select(&query).await?, "club_id")?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = Query::from(CLUBS)
            .in_list("id", ids)
            .order(SortKey::Newest.column(), false);
        decode_all(self.backend.select(&query).await?)
    }

    // -- friends -------------------------------------------------------------

    async fn friend_ids(&self, user_id: &str) -> Result<Vec<String>> {
        let query = Query::from(FRIENDS).select("friend_id").eq("user_id", user_id);
        str_column(&self.backend.select(&query).await?, "friend_id")
    }

    /// Profiles of the user's friends, in the order they were added.
    pub async fn friends(&self, user_id: &str) -> Result<Vec<Profile>> {
        let ids = self.friend_ids(user_id).await?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = Query::from(PROFILES).in_list("id", ids.iter().cloned());
        let mut profiles: Vec<Profile> = decode_all(self.backend.select(&query).await?)?;
        profiles.sort_by_key(|p| ids.iter().position(|id| *id == p.id));
        Ok(profiles)
    }

    /// Other users whose email or name contains `term`.
    ///
    /// Terms shorter than the configured minimum return nothing without a
    /// request. `exclude` (usually the current friends) is filtered out of
    /// the page the backend returns.
    pub async fn search_profiles(
        &self,
        user_id: &str,
        term: &str,
        exclude: &[String],
    ) -> Result<Vec<Profile>> {
        let term = term.trim();
        let friends = &self.config.friends;
        if term.chars().count() < friends.min_search_len {
            return Ok(Vec::new());
        }
        let query = Query::from(PROFILES)
            .any_ilike(&["email", "full_name"], term)
            .neq("id", user_id)
            .limit(friends.search_limit);
        let profiles: Vec<Profile> = decode_all(self.backend.select(&query).await?)?;
        Ok(profiles
            .into_iter()
            .filter(|p| !exclude.contains(&p.id))
            .collect())
    }

    /// Add a directed friend edge. Befriending yourself is a no-op.
    pub async fn add_friend(&self, user_id: &str, friend_id: &str) -> Result<()> {
        if user_id == friend_id {
            return Ok(());
        }
        let row = to_row(&json!({ "user_id": user_id, "friend_id": friend_id }))?;
        self.backend.insert(FRIENDS, vec![row]).await?;
        Ok(())
    }

    pub async fn remove_friend(&self, user_id: &str, friend_id: &str) -> Result<()> {
        let filters = [
            Filter::eq("user_id", user_id),
            Filter::eq("friend_id", friend_id),
        ];
        self.backend.delete(FRIENDS, &filters).await
    }

    // -- profile -------------------------------------------------------------

    pub async fn profile(&self, user_id: &str) -> Result<Option<Profile>> {
        let query = Query::from(PROFILES).eq("id", user_id).single();
        self.backend
            .select(&query)
            .await?
            .into_iter()
            .next()
            .map(decode)
            .transpose()
    }

    /// The signed-in user's profile, inserting a default row when none exists.
    pub async fn load_or_create_profile(&self, session: &Session) -> Result<Profile> {
        if let Some(profile) = self.profile(session.user_id()).await? {
            return Ok(profile);
        }
        let mut row = Row::new();
        row.insert("id".to_string(), Value::from(session.user_id()));
        if let Some(email) = &session.user.email {
            row.insert("email".to_string(), Value::from(email.as_str()));
        }
        if let Some(name) = &session.user.user_metadata.name {
            row.insert("full_name".to_string(), Value::from(name.as_str()));
        }
        let inserted = self.backend.insert(PROFILES, vec![row]).await?;
        first(inserted, "inserted profile").and_then(decode)
    }

    pub async fn update_profile(&self, user_id: &str, update: &ProfileUpdate) -> Result<Profile> {
        let patch = to_row(update)?;
        let updated = self
            .backend
            .update(PROFILES, &[Filter::eq("id", user_id)], patch)
            .await?;
        first(updated, "updated profile").and_then(decode)
    }

    /// Store the avatar at `{user}.{ext}`, replacing any previous one, and
    /// point the profile at its public URL.
    pub async fn upload_avatar(&self, user_id: &str, image: &ImageFile) -> Result<String> {
        let bucket = &self.config.storage.avatars_bucket;
        let path = format!("{user_id}.{}", image.extension());
        let options = UploadOptions {
            upsert: true,
            cache_control_secs: None,
            content_type: image.content_type.clone(),
        };
        self.backend
            .upload(bucket, &path, image.bytes.clone(), &options)
            .await?;
        let url = self.backend.public_url(bucket, &path);
        let update = ProfileUpdate {
            avatar_url: Some(url.clone()),
            ..Default::default()
        };
        self.update_profile(user_id, &update).await?;
        Ok(url)
    }
}

fn decode<T: DeserializeOwned>(row: Row) -> Result<T> {
    Ok(serde_json::from_value(Value::Object(row))?)
}

fn decode_all<T: DeserializeOwned>(rows: Vec<Row>) -> Result<Vec<T>> {
    rows.into_iter().map(decode).collect()
}

fn first(rows: Vec<Row>, what: &str) -> Result<Row> {
    rows.into_iter()
        .next()
        .ok_or_else(|| Error::Decode(format!("no {what} returned")))
}

fn int_column(rows: &[Row], column: &str) -> Result<Vec<i64>> {
    rows.iter()
        .map(|row| {
            row.get(column)
                .and_then(Value::as_i64)
                .ok_or_else(|| Error::Decode(format!("missing integer column {column}")))
        })
        .collect()
}

fn str_column(rows: &[Row], column: &str) -> Result<Vec<String>> {
    rows.iter()
        .map(|row| {
            row.get(column)
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| Error::Decode(format!("missing text column {column}")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryBackend;

    fn row(value: Value) -> Row {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    fn setup() -> (MemoryBackend, Directory<MemoryBackend>) {
        let backend = MemoryBackend::new();
        (backend.clone(), Directory::new(backend))
    }

    fn seed_club(backend: &MemoryBackend, id: i64, name: &str, created_at: &str) {
        backend.seed(
            CLUBS,
            row(json!({
                "id": id,
                "club_name": name,
                "description": "",
                "club_image": "",
                "tags": "",
                "created_at": created_at,
            })),
        );
    }

    fn seed_profile(backend: &MemoryBackend, id: &str, email: &str, name: &str) {
        backend.seed(
            PROFILES,
            row(json!({ "id": id, "email": email, "full_name": name })),
        );
    }

    fn image() -> ImageFile {
        ImageFile::new("board.png", vec![1, 2, 3])
    }

    #[tokio::test]
    async fn test_create_club_uploads_then_inserts() {
        let (backend, dir) = setup();
        let form = ClubForm::new("Chess Club", "weekly matches", "games, strategy");

        let club = dir.create_club(&form, Some(&image())).await.unwrap();

        assert_eq!(club.name, "Chess Club");
        assert_eq!(club.tag_list(), vec!["games", "strategy"]);
        assert!(club.image_url.starts_with("memory://club-images/public/"));
        assert!(club.image_url.ends_with(".png"));
        let path = club
            .image_url
            .trim_start_matches("memory://club-images/")
            .to_string();
        assert_eq!(backend.object("club-images", &path), Some(vec![1, 2, 3]));
        assert_eq!(backend.rows(CLUBS).len(), 1);
    }

    #[tokio::test]
    async fn test_incomplete_club_makes_no_network_call() {
        let (backend, dir) = setup();
        let forms = [
            (ClubForm::new("", "weekly matches", "games, strategy"), Some(image())),
            (ClubForm::new("Chess Club", "", "games, strategy"), Some(image())),
            (ClubForm::new("Chess Club", "weekly matches", ""), Some(image())),
            (ClubForm::new("Chess Club", "weekly matches", "games, strategy"), None),
        ];
        for (form, image) in &forms {
            let err = dir.create_club(form, image.as_ref()).await.unwrap_err();
            assert_eq!(err.to_string(), "Please fill in all fields and select an image.");
        }
        assert_eq!(backend.calls(), 0);
        assert!(backend.rows(CLUBS).is_empty());
    }

    #[tokio::test]
    async fn test_create_club_reports_upload_failure() {
        let (backend, dir) = setup();
        backend.set_offline(true);
        let form = ClubForm::new("Chess Club", "weekly matches", "games");
        let err = dir.create_club(&form, Some(&image())).await.unwrap_err();
        assert!(matches!(err, ClubSaveError::Upload(Error::Network(_))));
        assert_eq!(err.to_string(), "Image upload failed.");
        // nothing inserted after the failed upload
        assert_eq!(backend.calls(), 1);
    }

    #[tokio::test]
    async fn test_list_clubs_sorting() {
        let (backend, dir) = setup();
        seed_club(&backend, 1, "Chess", "2024-01-01T00:00:00Z");
        seed_club(&backend, 2, "Archery", "2024-03-01T00:00:00Z");
        seed_club(&backend, 3, "Baking", "2024-02-01T00:00:00Z");

        let newest: Vec<i64> = dir
            .list_clubs(SortKey::Newest)
            .await
            .unwrap()
            .iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(newest, vec![2, 3, 1]);

        let by_name: Vec<String> = dir
            .list_clubs(SortKey::Name)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(by_name, vec!["Chess", "Baking", "Archery"]);
    }

    #[tokio::test]
    async fn test_club_not_found_is_none() {
        let (backend, dir) = setup();
        seed_club(&backend, 1, "Chess", "2024-01-01T00:00:00Z");
        assert_eq!(dir.club(1).await.unwrap().map(|c| c.name), Some("Chess".into()));
        assert_eq!(dir.club(99).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_and_delete_club() {
        let (backend, dir) = setup();
        seed_club(&backend, 1, "Chess", "2024-01-01T00:00:00Z");

        let form = ClubForm::new("Chess Society", "now twice a week", "games");
        dir.update_club(1, &form, "https://cdn/chess.png").await.unwrap();
        let club = dir.club(1).await.unwrap().unwrap();
        assert_eq!(club.name, "Chess Society");
        assert_eq!(club.image_url, "https://cdn/chess.png");

        let calls = backend.calls();
        let err = dir.update_club(1, &form, " ").await.unwrap_err();
        assert_eq!(err.to_string(), "Please fill in all fields.");
        assert_eq!(backend.calls(), calls);

        dir.delete_club(1).await.unwrap();
        assert_eq!(dir.club(1).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_failure_message() {
        let (backend, dir) = setup();
        backend.set_offline(true);
        let form = ClubForm::new("Chess", "d", "t");
        let err = dir.update_club(1, &form, "u").await.unwrap_err();
        assert_eq!(err.to_string(), "Could not update the club.");
    }

    #[tokio::test]
    async fn test_relations_batches_queries() {
        let (backend, dir) = setup();
        for id in 1..=3 {
            seed_club(&backend, id, "c", "2024-01-01T00:00:00Z");
        }
        dir.set_joined("me", 1, true).await.unwrap();
        dir.set_following("me", 2, true).await.unwrap();
        dir.add_friend("me", "ana").await.unwrap();
        dir.add_friend("me", "bo").await.unwrap();
        dir.set_joined("ana", 1, true).await.unwrap();
        dir.set_joined("bo", 1, true).await.unwrap();
        dir.set_joined("bo", 3, true).await.unwrap();
        dir.set_joined("stranger", 3, true).await.unwrap();

        let before = backend.calls();
        let relations = dir.relations("me", &[1, 2, 3]).await.unwrap();
        assert_eq!(backend.calls() - before, 4);

        assert!(relations.is_joined(1));
        assert!(!relations.is_joined(2));
        assert!(relations.is_following(2));
        assert_eq!(relations.friends_joined(1), 2);
        assert_eq!(relations.friends_joined(2), 0);
        assert_eq!(relations.friends_joined(3), 1);
    }

    #[tokio::test]
    async fn test_relations_of_empty_set_makes_no_call() {
        let (backend, dir) = setup();
        let relations = dir.relations("me", &[]).await.unwrap();
        assert_eq!(relations, ClubRelations::default());
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn test_refetch_sees_writes_from_another_device() {
        let (backend, here) = setup();
        let elsewhere = Directory::new(backend.clone());
        seed_club(&backend, 1, "Chess", "2024-01-01T00:00:00Z");
        seed_profile(&backend, "me", "me@ucdavis.edu", "Me");
        seed_profile(&backend, "ana", "ana@ucdavis.edu", "Ana Lopez");

        let relations = here.relations("me", &[1]).await.unwrap();
        assert!(!relations.is_joined(1));
        assert!(here.friends("me").await.unwrap().is_empty());

        elsewhere.set_joined("me", 1, true).await.unwrap();
        elsewhere.add_friend("me", "ana").await.unwrap();

        let relations = here.relations("me", &[1]).await.unwrap();
        assert!(relations.is_joined(1));
        let friends = here.friends("me").await.unwrap();
        assert_eq!(friends.len(), 1);
        assert_eq!(friends[0].id, "ana");
    }

    #[tokio::test]
    async fn test_join_then_leave() {
        let (backend, dir) = setup();
        seed_club(&backend, 7, "Chess", "2024-01-01T00:00:00Z");
        dir.set_joined("me", 7, true).await.unwrap();
        assert!(dir.relations("me", &[7]).await.unwrap().is_joined(7));
        dir.set_joined("me", 7, false).await.unwrap();
        assert!(!dir.relations("me", &[7]).await.unwrap().is_joined(7));
        assert!(backend.rows(JOINS).is_empty());
    }

    #[tokio::test]
    async fn test_joined_clubs_newest_first() {
        let (backend, dir) = setup();
        seed_club(&backend, 1, "Old", "2023-01-01T00:00:00Z");
        seed_club(&backend, 2, "New", "2024-06-01T00:00:00Z");
        seed_club(&backend, 3, "Other", "2024-07-01T00:00:00Z");
        dir.set_joined("me", 1, true).await.unwrap();
        dir.set_joined("me", 2, true).await.unwrap();

        let names: Vec<String> = dir
            .joined_clubs("me")
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["New", "Old"]);
        assert!(dir.joined_clubs("nobody").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_friends_add_search_remove() {
        let (backend, dir) = setup();
        seed_profile(&backend, "me", "me@ucdavis.edu", "Me");
        seed_profile(&backend, "ana", "ana@ucdavis.edu", "Ana Lopez");
        seed_profile(&backend, "bo", "bo@ucdavis.edu", "Bo Chen");

        let before = backend.calls();
        assert!(dir.search_profiles("me", "a", &[]).await.unwrap().is_empty());
        assert_eq!(backend.calls(), before);

        let hits = dir.search_profiles("me", "UCDAVIS", &[]).await.unwrap();
        let ids: Vec<&str> = hits.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["ana", "bo"]);

        dir.add_friend("me", "bo").await.unwrap();
        dir.add_friend("me", "ana").await.unwrap();
        let friends = dir.friends("me").await.unwrap();
        let ids: Vec<String> = friends.iter().map(|p| p.id.clone()).collect();
        assert_eq!(ids, vec!["bo", "ana"]);

        let hits = dir.search_profiles("me", "lopez", &ids).await.unwrap();
        assert!(hits.is_empty());

        dir.remove_friend("me", "bo").await.unwrap();
        let friends = dir.friends("me").await.unwrap();
        assert_eq!(friends.len(), 1);
        assert_eq!(friends[0].id, "ana");
        // the edge is directed
        assert!(dir.friends("ana").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sign_up_then_sign_in() {
        let (_, dir) = setup();
        let form = Registration {
            name: "Ana".into(),
            username: "ana".into(),
            email: "Ana@UCDavis.edu".into(),
            password: "secret1".into(),
        };
        let user = dir.sign_up(&form).await.unwrap();
        assert_eq!(user.user_metadata.username.as_deref(), Some("ana"));
        assert!(dir.session().await.is_none());

        let err = dir.sign_in("ana@ucdavis.edu", "wrong").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid login credentials");

        let session = dir.sign_in("ana@ucdavis.edu", "secret1").await.unwrap();
        assert_eq!(session.user_id(), user.id);
        assert!(dir.session().await.is_some());

        dir.sign_out().await.unwrap();
        assert!(dir.session().await.is_none());
    }

    #[tokio::test]
    async fn test_invalid_registration_makes_no_call() {
        let (backend, dir) = setup();
        let form = Registration {
            name: "Ana".into(),
            email: "ana@ucdavis.edu".into(),
            password: "123".into(),
            ..Default::default()
        };
        let err = dir.sign_up(&form).await.unwrap_err();
        assert_eq!(err, AuthError::Invalid(ValidationError::PasswordTooShort));
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn test_profile_is_created_when_missing() {
        let (backend, dir) = setup();
        let form = Registration {
            name: "Ana".into(),
            username: "ana".into(),
            email: "ana@ucdavis.edu".into(),
            password: "secret1".into(),
        };
        dir.sign_up(&form).await.unwrap();
        let session = dir.sign_in("ana@ucdavis.edu", "secret1").await.unwrap();

        let profile = dir.load_or_create_profile(&session).await.unwrap();
        assert_eq!(profile.id, session.user_id());
        assert_eq!(profile.display_name(), "Ana");
        assert_eq!(backend.rows(PROFILES).len(), 1);

        // second load finds the row instead of inserting again
        dir.load_or_create_profile(&session).await.unwrap();
        assert_eq!(backend.rows(PROFILES).len(), 1);

        let update = ProfileUpdate {
            bio: Some("Chess and tea".into()),
            ..Default::default()
        };
        let profile = dir.update_profile(session.user_id(), &update).await.unwrap();
        assert_eq!(profile.bio.as_deref(), Some("Chess and tea"));
        assert_eq!(profile.display_name(), "Ana");
    }

    #[tokio::test]
    async fn test_avatar_upload_overwrites() {
        let (backend, dir) = setup();
        seed_profile(&backend, "me", "me@ucdavis.edu", "Me");

        let url = dir.upload_avatar("me", &image()).await.unwrap();
        assert_eq!(url, "memory://avatars/me.png");
        let again = ImageFile::new("new.png", vec![9]);
        dir.upload_avatar("me", &again).await.unwrap();

        assert_eq!(backend.object("avatars", "me.png"), Some(vec![9]));
        let profile = dir.profile("me").await.unwrap().unwrap();
        assert_eq!(profile.avatar_url.as_deref(), Some("memory://avatars/me.png"));
    }

    #[tokio::test]
    async fn test_offline_surfaces_network_error() {
        let (backend, dir) = setup();
        backend.set_offline(true);
        assert!(matches!(
            dir.list_clubs(SortKey::Newest).await,
            Err(Error::Network(_))
        ));
    }
}
