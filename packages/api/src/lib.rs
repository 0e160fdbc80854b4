//! # API crate: the hosted backend client for ClubHub
//!
//! Implements [`store::Backend`] over a Supabase-compatible HTTP API so the
//! web frontend can talk to the hosted tables, auth and storage directly.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | [`BackendConfig`]: project URL and anon key from `CLUBHUB_BACKEND_URL` / `CLUBHUB_ANON_KEY` |
//! | [`postgrest`] | Query and filter rendering into PostgREST parameters, error-body parsing |
//! | [`auth`] | GoTrue token and sign-up response bodies |
//! | `rest` | [`RestBackend`], the `reqwest` client that ties them together |
//!
//! ## Endpoints
//!
//! - `GET|POST|PATCH|DELETE /rest/v1/{table}`: table reads and writes
//! - `POST /auth/v1/signup`, `POST /auth/v1/token`, `POST /auth/v1/logout`
//! - `POST /storage/v1/object/{bucket}/{path}`: uploads;
//!   `/storage/v1/object/public/{bucket}/{path}` is the public URL

pub mod auth;
pub mod config;
pub mod postgrest;
mod rest;

pub use config::BackendConfig;
pub use rest::RestBackend;
