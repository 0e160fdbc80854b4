//! GoTrue response bodies and their conversion into store sessions.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use store::{AuthUser, Session};

/// Body of `POST /auth/v1/token`.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: AuthUser,
}

impl TokenResponse {
    pub fn into_session(self, now: DateTime<Utc>) -> Session {
        let expires_at = self
            .expires_at
            .or_else(|| self.expires_in.map(|secs| now.timestamp() + secs));
        Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at,
            user: self.user,
        }
    }
}

/// Body of `POST /auth/v1/signup`: a bare user when email confirmation is
/// on, a full token response when it is off.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SignUpResponse {
    Session(TokenResponse),
    User(AuthUser),
}

impl SignUpResponse {
    pub fn into_user(self) -> AuthUser {
        match self {
            SignUpResponse::Session(token) => token.user,
            SignUpResponse::User(user) => user,
        }
    }
}
