//! Rendering of [`Query`]s and [`Filter`]s into PostgREST query parameters,
//! and reading its error bodies.
//!
//! | Filter | Parameter |
//! |--------|-----------|
//! | `Eq(col, v)` | `col=eq.v` |
//! | `Neq(col, v)` | `col=neq.v` |
//! | `In(col, [a, b])` | `col=in.(a,b)` |
//! | `AnyILike([c1, c2], t)` | `or=(c1.ilike.*t*,c2.ilike.*t*)` |

use serde::Deserialize;
use serde_json::Value;
use store::{Error, Filter, Query, Row};

/// `Accept` value that asks for a single JSON object instead of an array.
pub const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// Parameters for a select.
pub fn query_params(query: &Query) -> Vec<(String, String)> {
    let mut params = vec![("select".to_string(), query.columns.clone())];
    params.extend(filter_params(&query.filters));
    if let Some(order) = &query.order {
        let direction = if order.ascending { "asc" } else { "desc" };
        params.push(("order".to_string(), format!("{}.{direction}", order.column)));
    }
    if let Some(limit) = query.limit {
        params.push(("limit".to_string(), limit.to_string()));
    }
    params
}

/// Parameters for the row predicate of a select, update or delete.
pub fn filter_params(filters: &[Filter]) -> Vec<(String, String)> {
    filters
        .iter()
        .map(|filter| match filter {
            Filter::Eq(column, value) => (column.clone(), format!("eq.{}", scalar(value))),
            Filter::Neq(column, value) => (column.clone(), format!("neq.{}", scalar(value))),
            Filter::In(column, values) => {
                let items: Vec<String> = values.iter().map(|v| list_item(&scalar(v))).collect();
                (column.clone(), format!("in.({})", items.join(",")))
            }
            Filter::AnyILike(columns, needle) => {
                let pattern = list_item(&format!("*{needle}*"));
                let alternatives: Vec<String> = columns
                    .iter()
                    .map(|column| format!("{column}.ilike.{pattern}"))
                    .collect();
                ("or".to_string(), format!("({})", alternatives.join(",")))
            }
        })
        .collect()
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Quote a value placed inside `in.(…)` or `or=(…)` when it contains a
/// character PostgREST reserves there.
fn list_item(raw: &str) -> String {
    if raw.contains([',', '(', ')', '"', ':', '\\']) {
        let escaped = raw.replace('\\', "\\\\").replace('"', "\\\"");
        format!("\"{escaped}\"")
    } else {
        raw.to_string()
    }
}

/// Error body shared by PostgREST, GoTrue and Storage, each filling a
/// different subset of fields.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub code: Option<Value>,
    #[serde(default)]
    pub error_code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
}

impl ErrorBody {
    pub fn parse(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }

    pub fn code(&self) -> Option<String> {
        self.error_code
            .clone()
            .or_else(|| self.code.as_ref().map(scalar))
    }

    /// Most specific human-readable message present.
    pub fn message(&self) -> Option<String> {
        self.error_description
            .clone()
            .or_else(|| self.msg.clone())
            .or_else(|| self.message.clone())
            .or_else(|| self.error.clone())
    }
}

/// Table error for a non-success status.
pub fn status_error(status: u16, body: &str) -> Error {
    let parsed = ErrorBody::parse(body);
    Error::Status {
        status,
        code: parsed.code(),
        message: parsed
            .message()
            .unwrap_or_else(|| format!("HTTP {status}")),
    }
}

/// Interpret a 406 to a single-object request. PostgREST reports both "no
/// rows" and "many rows" this way; the row count is in `details`.
pub fn single_row_miss(body: &str) -> Result<Vec<Row>, Error> {
    let parsed = ErrorBody::parse(body);
    let count = parsed.details.as_deref().and_then(|details| {
        details
            .split(|c: char| !c.is_ascii_digit())
            .find(|part| !part.is_empty())
            .and_then(|digits| digits.parse::<usize>().ok())
    });
    match count {
        Some(n) if n > 1 => Err(Error::MultipleRows(n)),
        _ => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(params: &[(String, String)]) -> Vec<(&str, &str)> {
        params.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
    }

    #[test]
    fn test_directory_query() {
        let query = Query::from("clublists").order("created_at", false);
        assert_eq!(
            pairs(&query_params(&query)),
            vec![("select", "*"), ("order", "created_at.desc")]
        );
    }

    #[test]
    fn test_relations_query() {
        let query = Query::from("club_joins")
            .select("club_id")
            .eq("user_id", "u-1")
            .in_list("club_id", [3, 5, 8]);
        assert_eq!(
            pairs(&query_params(&query)),
            vec![
                ("select", "club_id"),
                ("user_id", "eq.u-1"),
                ("club_id", "in.(3,5,8)"),
            ]
        );
    }

    #[test]
    fn test_profile_search_query() {
        let query = Query::from("profiles")
            .any_ilike(&["email", "full_name"], "ana")
            .neq("id", "me")
            .limit(10);
        assert_eq!(
            pairs(&query_params(&query)),
            vec![
                ("select", "*"),
                ("or", "(email.ilike.*ana*,full_name.ilike.*ana*)"),
                ("id", "neq.me"),
                ("limit", "10"),
            ]
        );
    }

    #[test]
    fn test_reserved_characters_are_quoted() {
        let params = filter_params(&[
            Filter::any_ilike(&["full_name"], "Lopez, Ana"),
            Filter::in_list("id", ["a,b", "c"]),
        ]);
        assert_eq!(params[0].1, r#"(full_name.ilike."*Lopez, Ana*")"#);
        assert_eq!(params[1].1, r#"in.("a,b",c)"#);
    }

    #[test]
    fn test_status_error_reads_postgrest_body() {
        let body = r#"{"code":"23505","details":null,"hint":null,"message":"duplicate key value"}"#;
        assert_eq!(
            status_error(409, body),
            Error::Status {
                status: 409,
                code: Some("23505".into()),
                message: "duplicate key value".into(),
            }
        );
        assert_eq!(
            status_error(502, "<html>bad gateway</html>"),
            Error::Status {
                status: 502,
                code: None,
                message: "HTTP 502".into(),
            }
        );
    }

    #[test]
    fn test_error_body_prefers_description() {
        let body = ErrorBody::parse(
            r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#,
        );
        assert_eq!(body.message().as_deref(), Some("Invalid login credentials"));
        let body = ErrorBody::parse(r#"{"code":400,"error_code":"weak_password","msg":"Password should be at least 6 characters."}"#);
        assert_eq!(body.code().as_deref(), Some("weak_password"));
        assert_eq!(body.message().as_deref(), Some("Password should be at least 6 characters."));
    }

    #[test]
    fn test_single_row_miss() {
        let none = r#"{"code":"PGRST116","details":"The result contains 0 rows","message":"JSON object requested, multiple (or no) rows returned"}"#;
        assert_eq!(single_row_miss(none), Ok(Vec::new()));
        let many = r#"{"code":"PGRST116","details":"The result contains 3 rows","message":"JSON object requested, multiple (or no) rows returned"}"#;
        assert_eq!(single_row_miss(many), Err(Error::MultipleRows(3)));
        assert_eq!(single_row_miss(""), Ok(Vec::new()));
    }
}
