//! # Backend: the remote data client seam
//!
//! Every read, write, auth call and upload the application makes goes through
//! the [`Backend`] trait. The hosted implementation lives in the `api` crate
//! (`RestBackend`); [`crate::MemoryBackend`] keeps the same contract in-process
//! for tests and local development.
//!
//! ## Contract
//!
//! | Group | Methods | Notes |
//! |-------|---------|-------|
//! | Table read | [`select`](Backend::select) | In single-row mode zero rows is `Ok(vec![])`; more than one is [`Error::MultipleRows`]. |
//! | Table write | [`insert`](Backend::insert), [`update`](Backend::update), [`delete`](Backend::delete) | `insert`/`update` return the affected rows. |
//! | Auth | [`sign_up`](Backend::sign_up), [`sign_in_with_password`](Backend::sign_in_with_password), [`session`](Backend::session), [`restore_session`](Backend::restore_session), [`sign_out`](Backend::sign_out) | The backend owns the current session; callers never cache it. |
//! | Storage | [`upload`](Backend::upload), [`public_url`](Backend::public_url) | Uploading to an existing path without `upsert` fails. |
//!
//! No method retries, times out or deduplicates. Failures surface once as
//! [`Error`] and the caller decides what the user sees.

use crate::error::{Error, Result};
use crate::models::{AuthUser, Session};
use crate::query::{Filter, Query, Row};

/// Options for a blob upload.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UploadOptions {
    /// Overwrite an existing object at the same path.
    pub upsert: bool,
    /// `Cache-Control: max-age` in seconds.
    pub cache_control_secs: Option<u32>,
    pub content_type: Option<String>,
}

/// Async client for a hosted table/auth/storage service.
pub trait Backend {
    fn select(&self, query: &Query) -> impl std::future::Future<Output = Result<Vec<Row>>>;

    fn insert(
        &self,
        table: &str,
        rows: Vec<Row>,
    ) -> impl std::future::Future<Output = Result<Vec<Row>>>;

    fn update(
        &self,
        table: &str,
        filters: &[Filter],
        patch: Row,
    ) -> impl std::future::Future<Output = Result<Vec<Row>>>;

    fn delete(
        &self,
        table: &str,
        filters: &[Filter],
    ) -> impl std::future::Future<Output = Result<()>>;

    /// Create an account. `metadata` is stored on the auth user.
    fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: Row,
    ) -> impl std::future::Future<Output = Result<AuthUser>>;

    fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> impl std::future::Future<Output = Result<Session>>;

    /// The current session, if any.
    fn session(&self) -> impl std::future::Future<Output = Option<Session>>;

    /// Adopt a session persisted by a previous run.
    fn restore_session(&self, session: Session);

    fn sign_out(&self) -> impl std::future::Future<Output = Result<()>>;

    fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        options: &UploadOptions,
    ) -> impl std::future::Future<Output = Result<()>>;

    fn public_url(&self, bucket: &str, path: &str) -> String;
}

/// Turn any serializable record into a [`Row`].
pub fn to_row<T: serde::Serialize>(value: &T) -> Result<Row> {
    match serde_json::to_value(value)? {
        serde_json::Value::Object(row) => Ok(row),
        other => Err(Error::Decode(format!("expected an object, got {other}"))),
    }
}
