use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use serde_json::Value;

use crate::backend::{Backend, UploadOptions};
use crate::error::{Error, Result};
use crate::models::{AuthUser, Session, UserMetadata};
use crate::query::{Filter, Query, Row};

#[derive(Debug)]
struct MemoryUser {
    id: String,
    email: String,
    password: String,
    metadata: UserMetadata,
}

#[derive(Debug, Default)]
struct MemoryState {
    tables: HashMap<String, Vec<Row>>,
    next_id: i64,
    users: Vec<MemoryUser>,
    session: Option<Session>,
    objects: HashMap<(String, String), Vec<u8>>,
    offline: bool,
    calls: usize,
}

/// In-memory Backend for testing and local development.
///
/// Rows inserted without an `id` get a sequential integer id, and rows
/// without `created_at` are stamped with the current time, as the hosted
/// tables do through column defaults.
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with [`Error::Network`].
    pub fn set_offline(&self, offline: bool) {
        self.lock().offline = offline;
    }

    /// Number of backend calls made so far, failed ones included.
    pub fn calls(&self) -> usize {
        self.lock().calls
    }

    /// Insert a row directly, bypassing call accounting.
    pub fn seed(&self, table: &str, row: Row) -> Row {
        let mut state = self.lock();
        let row = stamp(&mut state, row);
        state
            .tables
            .entry(table.to_string())
            .or_default()
            .push(row.clone());
        row
    }

    /// Snapshot of a table's rows.
    pub fn rows(&self, table: &str) -> Vec<Row> {
        self.lock().tables.get(table).cloned().unwrap_or_default()
    }

    /// Bytes stored at a bucket path.
    pub fn object(&self, bucket: &str, path: &str) -> Option<Vec<u8>> {
        self.lock()
            .objects
            .get(&(bucket.to_string(), path.to_string()))
            .cloned()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Lock for a backend call: counts it and fails when offline.
    fn call(&self) -> Result<MutexGuard<'_, MemoryState>> {
        let mut state = self.lock();
        state.calls += 1;
        if state.offline {
            return Err(Error::Network("backend unreachable".to_string()));
        }
        Ok(state)
    }
}

impl Backend for MemoryBackend {
    async fn select(&self, query: &Query) -> Result<Vec<Row>> {
        let state = self.call()?;
        let mut rows: Vec<Row> = state
            .tables
            .get(&query.table)
            .map(|rows| {
                rows.iter()
                    .filter(|row| query.filters.iter().all(|f| matches(f, row)))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        drop(state);

        if let Some(order) = &query.order {
            rows.sort_by(|a, b| {
                let ord = compare(a.get(&order.column), b.get(&order.column));
                if order.ascending {
                    ord
                } else {
                    ord.reverse()
                }
            });
        }
        if let Some(limit) = query.limit {
            rows.truncate(limit);
        }
        if query.single && rows.len() > 1 {
            return Err(Error::MultipleRows(rows.len()));
        }

        Ok(match query.column_list() {
            Some(columns) => rows
                .into_iter()
                .map(|row| {
                    row.into_iter()
                        .filter(|(k, _)| columns.contains(&k.as_str()))
                        .collect()
                })
                .collect(),
            None => rows,
        })
    }

    async fn insert(&self, table: &str, rows: Vec<Row>) -> Result<Vec<Row>> {
        let mut state = self.call()?;
        let stamped: Vec<Row> = rows.into_iter().map(|row| stamp(&mut state, row)).collect();
        state
            .tables
            .entry(table.to_string())
            .or_default()
            .extend(stamped.iter().cloned());
        Ok(stamped)
    }

    async fn update(&self, table: &str, filters: &[Filter], patch: Row) -> Result<Vec<Row>> {
        let mut state = self.call()?;
        let mut updated = Vec::new();
        if let Some(rows) = state.tables.get_mut(table) {
            for row in rows
                .iter_mut()
                .filter(|row| filters.iter().all(|f| matches(f, row)))
            {
                for (k, v) in &patch {
                    row.insert(k.clone(), v.clone());
                }
                updated.push(row.clone());
            }
        }
        Ok(updated)
    }

    async fn delete(&self, table: &str, filters: &[Filter]) -> Result<()> {
        let mut state = self.call()?;
        if let Some(rows) = state.tables.get_mut(table) {
            rows.retain(|row| !filters.iter().all(|f| matches(f, row)));
        }
        Ok(())
    }

    async fn sign_up(&self, email: &str, password: &str, metadata: Row) -> Result<AuthUser> {
        let mut state = self.call()?;
        let email = email.trim().to_lowercase();
        if state.users.iter().any(|u| u.email == email) {
            return Err(Error::Auth("User already registered".to_string()));
        }
        let metadata: UserMetadata = serde_json::from_value(Value::Object(metadata))?;
        let id = format!("user-{}", state.users.len() + 1);
        state.users.push(MemoryUser {
            id: id.clone(),
            email: email.clone(),
            password: password.to_string(),
            metadata: metadata.clone(),
        });
        Ok(AuthUser {
            id,
            email: Some(email),
            user_metadata: metadata,
        })
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session> {
        let mut state = self.call()?;
        let email = email.trim().to_lowercase();
        let Some(user) = state
            .users
            .iter()
            .find(|u| u.email == email && u.password == password)
        else {
            return Err(Error::Auth("Invalid login credentials".to_string()));
        };
        let session = Session {
            access_token: format!("memory-token-{}", user.id),
            refresh_token: None,
            expires_at: None,
            user: AuthUser {
                id: user.id.clone(),
                email: Some(user.email.clone()),
                user_metadata: user.metadata.clone(),
            },
        };
        state.session = Some(session.clone());
        Ok(session)
    }

    async fn session(&self) -> Option<Session> {
        self.lock().session.clone()
    }

    fn restore_session(&self, session: Session) {
        self.lock().session = Some(session);
    }

    async fn sign_out(&self) -> Result<()> {
        self.call()?.session = None;
        Ok(())
    }

    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        options: &UploadOptions,
    ) -> Result<()> {
        let mut state = self.call()?;
        let key = (bucket.to_string(), path.to_string());
        if !options.upsert && state.objects.contains_key(&key) {
            return Err(Error::Storage("The resource already exists".to_string()));
        }
        state.objects.insert(key, bytes);
        Ok(())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("memory://{bucket}/{path}")
    }
}

fn stamp(state: &mut MemoryState, mut row: Row) -> Row {
    if !row.contains_key("id") {
        state.next_id += 1;
        row.insert("id".to_string(), Value::from(state.next_id));
    }
    if !row.contains_key("created_at") {
        row.insert(
            "created_at".to_string(),
            Value::from(Utc::now().to_rfc3339()),
        );
    }
    row
}

fn matches(filter: &Filter, row: &Row) -> bool {
    match filter {
        Filter::Eq(column, value) => row.get(column).is_some_and(|v| same(v, value)),
        Filter::Neq(column, value) => !row.get(column).is_some_and(|v| same(v, value)),
        Filter::In(column, values) => row
            .get(column)
            .is_some_and(|v| values.iter().any(|candidate| same(v, candidate))),
        Filter::AnyILike(columns, needle) => {
            let needle = needle.to_lowercase();
            columns.iter().any(|column| {
                row.get(column)
                    .and_then(Value::as_str)
                    .is_some_and(|s| s.to_lowercase().contains(&needle))
            })
        }
    }
}

fn same(a: &Value, b: &Value) -> bool {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => a == b,
    }
}

fn compare(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Null) | None, Some(Value::Null) | None) => Ordering::Equal,
        (Some(Value::Null) | None, _) => Ordering::Less,
        (_, Some(Value::Null) | None) => Ordering::Greater,
        (Some(x), Some(y)) => x.to_string().cmp(&y.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> Row {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_id_and_timestamp() {
        let backend = MemoryBackend::new();
        let inserted = backend
            .insert("clublists", vec![row(json!({ "club_name": "Chess" }))])
            .await
            .unwrap();

        assert_eq!(inserted.len(), 1);
        assert_eq!(inserted[0]["id"], json!(1));
        assert!(inserted[0].contains_key("created_at"));
        assert_eq!(backend.rows("clublists").len(), 1);
    }

    #[tokio::test]
    async fn test_select_filters_orders_and_projects() {
        let backend = MemoryBackend::new();
        for (user, club) in [("u1", 3), ("u1", 1), ("u2", 2), ("u1", 2)] {
            backend.seed("club_joins", row(json!({ "user_id": user, "club_id": club })));
        }

        let rows = backend
            .select(
                &Query::from("club_joins")
                    .select("club_id")
                    .eq("user_id", "u1")
                    .in_list("club_id", [1, 2])
                    .order("club_id", true),
            )
            .await
            .unwrap();

        assert_eq!(
            rows,
            vec![row(json!({ "club_id": 1 })), row(json!({ "club_id": 2 }))]
        );
    }

    #[tokio::test]
    async fn test_any_ilike_and_neq() {
        let backend = MemoryBackend::new();
        backend.seed("profiles", row(json!({ "id": "a", "email": "ana@x.edu", "full_name": "Ana" })));
        backend.seed("profiles", row(json!({ "id": "b", "email": "bo@x.edu", "full_name": "Bo Anand" })));
        backend.seed("profiles", row(json!({ "id": "c", "email": "cy@x.edu", "full_name": null })));

        let rows = backend
            .select(
                &Query::from("profiles")
                    .any_ilike(&["email", "full_name"], "AN")
                    .neq("id", "a"),
            )
            .await
            .unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["id"], json!("b"));
    }

    #[tokio::test]
    async fn test_single_row_mode() {
        let backend = MemoryBackend::new();
        backend.seed("clublists", row(json!({ "id": 1, "club_name": "A" })));
        backend.seed("clublists", row(json!({ "id": 2, "club_name": "A" })));

        let none = backend
            .select(&Query::from("clublists").eq("id", 9).single())
            .await
            .unwrap();
        assert!(none.is_empty());

        let many = backend
            .select(&Query::from("clublists").eq("club_name", "A").single())
            .await;
        assert_eq!(many, Err(Error::MultipleRows(2)));
    }

    #[tokio::test]
    async fn test_update_and_delete_by_predicate() {
        let backend = MemoryBackend::new();
        backend.seed("profiles", row(json!({ "id": "u1", "bio": "" })));
        backend.seed("profiles", row(json!({ "id": "u2", "bio": "" })));

        let updated = backend
            .update("profiles", &[Filter::eq("id", "u1")], row(json!({ "bio": "hello" })))
            .await
            .unwrap();
        assert_eq!(updated.len(), 1);
        assert_eq!(backend.rows("profiles")[0]["bio"], json!("hello"));
        assert_eq!(backend.rows("profiles")[1]["bio"], json!(""));

        backend
            .delete("profiles", &[Filter::eq("id", "u2")])
            .await
            .unwrap();
        assert_eq!(backend.rows("profiles").len(), 1);
    }

    #[tokio::test]
    async fn test_auth_round() {
        let backend = MemoryBackend::new();
        let user = backend
            .sign_up("Ana@UCDavis.edu", "secret1", row(json!({ "name": "Ana" })))
            .await
            .unwrap();
        assert_eq!(user.email.as_deref(), Some("ana@ucdavis.edu"));
        assert!(backend.session().await.is_none());

        let duplicate = backend.sign_up("ana@ucdavis.edu", "x", Row::new()).await;
        assert!(matches!(duplicate, Err(Error::Auth(_))));

        let wrong = backend.sign_in_with_password("ana@ucdavis.edu", "nope").await;
        assert_eq!(wrong, Err(Error::Auth("Invalid login credentials".into())));

        let session = backend
            .sign_in_with_password("ana@ucdavis.edu", "secret1")
            .await
            .unwrap();
        assert_eq!(session.user.id, user.id);
        assert_eq!(session.user.user_metadata.name.as_deref(), Some("Ana"));
        assert_eq!(backend.session().await, Some(session));

        backend.sign_out().await.unwrap();
        assert!(backend.session().await.is_none());
    }

    #[tokio::test]
    async fn test_upload_respects_upsert() {
        let backend = MemoryBackend::new();
        let keep = UploadOptions::default();
        let overwrite = UploadOptions {
            upsert: true,
            ..Default::default()
        };

        backend.upload("avatars", "u1.png", vec![1], &keep).await.unwrap();
        let again = backend.upload("avatars", "u1.png", vec![2], &keep).await;
        assert!(matches!(again, Err(Error::Storage(_))));
        assert_eq!(backend.object("avatars", "u1.png"), Some(vec![1]));

        backend
            .upload("avatars", "u1.png", vec![3], &overwrite)
            .await
            .unwrap();
        assert_eq!(backend.object("avatars", "u1.png"), Some(vec![3]));
        assert_eq!(backend.public_url("avatars", "u1.png"), "memory://avatars/u1.png");
    }

    #[tokio::test]
    async fn test_offline_fails_and_counts_calls() {
        let backend = MemoryBackend::new();
        backend.set_offline(true);

        let result = backend.select(&Query::from("clublists")).await;
        assert!(matches!(result, Err(Error::Network(_))));
        assert_eq!(backend.calls(), 1);

        backend.set_offline(false);
        assert!(backend.select(&Query::from("clublists")).await.unwrap().is_empty());
        assert_eq!(backend.calls(), 2);
    }
}
