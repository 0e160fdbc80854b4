//! [`RestBackend`]: the [`Backend`] over a Supabase-compatible HTTP API.

use std::sync::{Arc, PoisonError, RwLock};

use chrono::Utc;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde_json::{json, Value};
use store::backend::UploadOptions;
use store::{AuthUser, Backend, Error, Filter, Query, Result, Row, Session};

use crate::auth::{SignUpResponse, TokenResponse};
use crate::config::BackendConfig;
use crate::postgrest::{self, ErrorBody};

/// Which service answered; decides how an error body is surfaced.
#[derive(Clone, Copy, Debug)]
enum Service {
    Rest,
    Auth,
    Storage,
}

/// HTTP client for the hosted backend. Cheap to clone; clones share the
/// session.
#[derive(Clone, Debug)]
pub struct RestBackend {
    http: Client,
    config: Arc<BackendConfig>,
    session: Arc<RwLock<Option<Session>>>,
}

impl RestBackend {
    pub fn new(config: BackendConfig) -> Self {
        Self {
            http: Client::new(),
            config: Arc::new(config),
            session: Arc::new(RwLock::new(None)),
        }
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    fn current_session(&self) -> Option<Session> {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_session(&self, session: Option<Session>) {
        *self.session.write().unwrap_or_else(PoisonError::into_inner) = session;
    }

    /// Request carrying the API key and `token` as bearer.
    fn request(&self, method: Method, url: &str, token: &str) -> RequestBuilder {
        tracing::debug!("{method} {url}");
        self.http
            .request(method, url)
            .header("apikey", &self.config.anon_key)
            .bearer_auth(token)
    }

    /// Request without a user token, for the auth endpoints that take none.
    fn anonymous(&self, method: Method, url: &str) -> RequestBuilder {
        self.request(method, url, &self.config.anon_key)
    }

    /// The user's access token, refreshed first when expired, or the anon key
    /// when signed out.
    async fn bearer(&self) -> String {
        Backend::session(self)
            .await
            .map(|s| s.access_token)
            .unwrap_or_else(|| self.config.anon_key.clone())
    }

    /// Request on behalf of the signed-in user.
    async fn authorized(&self, method: Method, url: &str) -> RequestBuilder {
        let token = self.bearer().await;
        self.request(method, url, &token)
    }

    async fn send(&self, request: RequestBuilder) -> Result<(StatusCode, String)> {
        let response = request
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;
        Ok((status, body))
    }

    /// Send and fail on any non-success status.
    async fn send_ok(&self, request: RequestBuilder, service: Service) -> Result<String> {
        let (status, body) = self.send(request).await?;
        if status.is_success() {
            return Ok(body);
        }
        tracing::debug!("{service:?} request failed with {status}: {body}");
        Err(match service {
            Service::Rest => postgrest::status_error(status.as_u16(), &body),
            Service::Auth => Error::Auth(
                ErrorBody::parse(&body)
                    .message()
                    .unwrap_or_else(|| format!("Authentication failed ({status})")),
            ),
            Service::Storage => Error::Storage(
                ErrorBody::parse(&body)
                    .message()
                    .unwrap_or_else(|| format!("HTTP {status}")),
            ),
        })
    }

    async fn token(&self, grant_type: &str, body: Value) -> Result<Session> {
        let url = self.config.auth_url(&format!("token?grant_type={grant_type}"));
        let request = self.anonymous(Method::POST, &url).json(&body);
        let body = self.send_ok(request, Service::Auth).await?;
        let token: TokenResponse = serde_json::from_str(&body)?;
        let session = token.into_session(Utc::now());
        self.set_session(Some(session.clone()));
        Ok(session)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<Session> {
        self.token("refresh_token", json!({ "refresh_token": refresh_token }))
            .await
    }
}

fn rows(body: &str) -> Result<Vec<Row>> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(body)?)
}

impl Backend for RestBackend {
    async fn select(&self, query: &Query) -> Result<Vec<Row>> {
        let mut request = self
            .authorized(Method::GET, &self.config.rest_url(&query.table))
            .await
            .query(&postgrest::query_params(query));
        if !query.single {
            let body = self.send_ok(request, Service::Rest).await?;
            return rows(&body);
        }

        request = request.header("Accept", postgrest::SINGLE_OBJECT);
        let (status, body) = self.send(request).await?;
        if status == StatusCode::NOT_ACCEPTABLE {
            return postgrest::single_row_miss(&body);
        }
        if !status.is_success() {
            return Err(postgrest::status_error(status.as_u16(), &body));
        }
        let row: Row = serde_json::from_str(&body)?;
        Ok(vec![row])
    }

    async fn insert(&self, table: &str, rows_in: Vec<Row>) -> Result<Vec<Row>> {
        let request = self
            .authorized(Method::POST, &self.config.rest_url(table))
            .await
            .header("Prefer", "return=representation")
            .json(&rows_in);
        let body = self.send_ok(request, Service::Rest).await?;
        rows(&body)
    }

    async fn update(&self, table: &str, filters: &[Filter], patch: Row) -> Result<Vec<Row>> {
        let request = self
            .authorized(Method::PATCH, &self.config.rest_url(table))
            .await
            .query(&postgrest::filter_params(filters))
            .header("Prefer", "return=representation")
            .json(&patch);
        let body = self.send_ok(request, Service::Rest).await?;
        rows(&body)
    }

    async fn delete(&self, table: &str, filters: &[Filter]) -> Result<()> {
        let request = self
            .authorized(Method::DELETE, &self.config.rest_url(table))
            .await
            .query(&postgrest::filter_params(filters));
        self.send_ok(request, Service::Rest).await?;
        Ok(())
    }

    async fn sign_up(&self, email: &str, password: &str, metadata: Row) -> Result<AuthUser> {
        let body = json!({ "email": email, "password": password, "data": metadata });
        let request = self
            .anonymous(Method::POST, &self.config.auth_url("signup"))
            .json(&body);
        let body = self.send_ok(request, Service::Auth).await?;
        let response: SignUpResponse = serde_json::from_str(&body)?;
        let user = response.into_user();
        tracing::info!("registered user {}", user.id);
        Ok(user)
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session> {
        let session = self
            .token("password", json!({ "email": email, "password": password }))
            .await?;
        tracing::info!("signed in as {}", session.user_id());
        Ok(session)
    }

    /// The stored session, refreshed first when it has expired. A session
    /// that cannot be refreshed is dropped.
    async fn session(&self) -> Option<Session> {
        let current = self.current_session()?;
        if !current.is_expired(Utc::now()) {
            return Some(current);
        }
        let Some(refresh_token) = current.refresh_token.as_deref() else {
            self.set_session(None);
            return None;
        };
        match self.refresh(refresh_token).await {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::warn!("Session refresh failed: {e}");
                self.set_session(None);
                None
            }
        }
    }

    fn restore_session(&self, session: Session) {
        self.set_session(Some(session));
    }

    /// Revoke the token server-side and forget it locally. The local session
    /// is cleared even when the revoke call fails.
    async fn sign_out(&self) -> Result<()> {
        let Some(current) = self.current_session() else {
            return Ok(());
        };
        let request = self.request(
            Method::POST,
            &self.config.auth_url("logout"),
            &current.access_token,
        );
        let result = self.send_ok(request, Service::Auth).await;
        self.set_session(None);
        tracing::info!("signed out");
        result.map(|_| ())
    }

    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        options: &UploadOptions,
    ) -> Result<()> {
        let content_type = options
            .content_type
            .clone()
            .unwrap_or_else(|| "application/octet-stream".to_string());
        let mut request = self
            .authorized(Method::POST, &self.config.object_url(bucket, path))
            .await
            .header("x-upsert", options.upsert.to_string())
            .header("Content-Type", content_type)
            .body(bytes);
        if let Some(secs) = options.cache_control_secs {
            request = request.header("cache-control", format!("max-age={secs}"));
        }
        self.send_ok(request, Service::Storage).await?;
        Ok(())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        self.config.public_object_url(bucket, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::models::UserMetadata;

    fn backend() -> RestBackend {
        RestBackend::new(BackendConfig::new("https://clubs.example.co", "anon"))
    }

    fn session(expires_at: Option<i64>) -> Session {
        Session {
            access_token: "jwt".into(),
            refresh_token: None,
            expires_at,
            user: AuthUser {
                id: "u1".into(),
                email: Some("ana@ucdavis.edu".into()),
                user_metadata: UserMetadata::default(),
            },
        }
    }

    #[test]
    fn test_public_url() {
        assert_eq!(
            backend().public_url("avatars", "u1.png"),
            "https://clubs.example.co/storage/v1/object/public/avatars/u1.png"
        );
    }

    #[test]
    fn test_rows_accepts_empty_body() {
        assert!(rows("").unwrap().is_empty());
        assert_eq!(rows(r#"[{"id":1}]"#).unwrap().len(), 1);
        assert!(matches!(rows("{"), Err(Error::Decode(_))));
    }

    #[tokio::test]
    async fn test_restored_session_is_shared_between_clones() {
        let backend = backend();
        let clone = backend.clone();
        assert!(clone.session().await.is_none());

        let far_future = Utc::now().timestamp() + 3600;
        backend.restore_session(session(Some(far_future)));
        assert_eq!(clone.session().await.map(|s| s.access_token), Some("jwt".into()));
    }

    #[tokio::test]
    async fn test_expired_session_without_refresh_token_is_dropped() {
        let backend = backend();
        backend.restore_session(session(Some(0)));
        assert!(backend.session().await.is_none());
        assert!(backend.current_session().is_none());
    }

    #[tokio::test]
    async fn test_bearer_uses_live_access_token() {
        let backend = backend();
        assert_eq!(backend.bearer().await, "anon");

        let far_future = Utc::now().timestamp() + 3600;
        backend.restore_session(session(Some(far_future)));
        assert_eq!(backend.bearer().await, "jwt");
    }

    #[tokio::test]
    async fn test_bearer_never_sends_an_expired_token() {
        let backend = backend();
        backend.restore_session(session(Some(0)));
        // no refresh token, so the session is dropped and the anon key is used
        assert_eq!(backend.bearer().await, "anon");
        assert!(backend.current_session().is_none());
    }

    #[tokio::test]
    async fn test_sign_out_without_session_makes_no_request() {
        assert_eq!(backend().sign_out().await, Ok(()));
    }
}
