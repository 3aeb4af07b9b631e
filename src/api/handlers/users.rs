//! Read-only user endpoints backed by a fixed mock directory.

use axum::{
    extract::{rejection::PathRejection, Path},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use utoipa::ToSchema;

use crate::api::error::ApiError;

const DIRECTORY: [(i64, &str, &str); 2] = [
    (1, "John Doe", "john@example.com"),
    (2, "Jane Smith", "jane@example.com"),
];

#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: i64,
    pub name: String,
    pub email: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserDetail {
    /// Requested id, `null` when the path segment does not start with a number.
    pub id: Option<i64>,
    pub name: String,
    pub email: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct UserList {
    pub users: Vec<UserRecord>,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct UserEnvelope {
    pub user: UserDetail,
}

fn directory() -> Vec<UserRecord> {
    DIRECTORY
        .iter()
        .map(|&(id, name, email)| UserRecord {
            id,
            name: name.to_string(),
            email: email.to_string(),
        })
        .collect()
}

/// Parse the leading integer of `input` the lenient way browsers do.
///
/// Leading whitespace is skipped, one sign is allowed, and a `0x`/`0X` prefix
/// switches to hexadecimal. Parsing stops at the first non-digit. Returns
/// `None` when no digit was read or the value does not fit in an `i64`.
#[must_use]
pub fn parse_leading_int(input: &str) -> Option<i64> {
    let rest = input.trim_start();
    let (negative, rest) = match rest.as_bytes().first() {
        Some(b'-') => (true, &rest[1..]),
        Some(b'+') => (false, &rest[1..]),
        _ => (false, rest),
    };

    let (radix, digits) = match rest.get(..2) {
        Some("0x" | "0X") => (16, &rest[2..]),
        _ => (10, rest),
    };

    let mut value: i64 = 0;
    let mut read_any = false;

    for digit in digits.chars().map_while(|c| c.to_digit(radix)) {
        value = value
            .checked_mul(i64::from(radix))?
            .checked_add(i64::from(digit))?;
        read_any = true;
    }

    if !read_any {
        return None;
    }

    Some(if negative { -value } else { value })
}

#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "List mock users", body = UserList),
        (status = 500, description = "Unexpected failure", body = crate::api::error::ErrorBody),
    ),
    tag = "users"
)]
#[instrument]
pub async fn list_users() -> Result<(StatusCode, Json<UserList>), ApiError> {
    Ok((StatusCode::OK, Json(UserList { users: directory() })))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(
        ("id" = String, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "Mock user detail", body = UserEnvelope),
        (status = 400, description = "Path segment could not be decoded", body = crate::api::error::ErrorBody),
        (status = 500, description = "Unexpected failure", body = crate::api::error::ErrorBody),
    ),
    tag = "users"
)]
#[instrument(skip_all)]
pub async fn get_user(
    path: Result<Path<String>, PathRejection>,
) -> Result<(StatusCode, Json<UserEnvelope>), ApiError> {
    let Path(id) = path.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    let parsed = parse_leading_int(&id);

    debug!("user lookup {:?} -> {:?}", id, parsed);

    // The mock directory always answers with its first entry.
    let (_, name, email) = DIRECTORY[0];

    Ok((
        StatusCode::OK,
        Json(UserEnvelope {
            user: UserDetail {
                id: parsed,
                name: name.to_string(),
                email: email.to_string(),
            },
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::Request,
        routing::get,
        Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new()
            .route("/api/users", get(list_users))
            .route("/api/users/:id", get(get_user))
    }

    async fn get_json(uri: &str) -> anyhow::Result<(StatusCode, Value)> {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty())?)
            .await?;
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await?;
        Ok((status, serde_json::from_slice(&body)?))
    }

    #[test]
    fn parses_leading_integers() {
        assert_eq!(parse_leading_int("42"), Some(42));
        assert_eq!(parse_leading_int("  7"), Some(7));
        assert_eq!(parse_leading_int("12abc"), Some(12));
        assert_eq!(parse_leading_int("-3"), Some(-3));
        assert_eq!(parse_leading_int("+5"), Some(5));
        assert_eq!(parse_leading_int("0x1A"), Some(26));
        assert_eq!(parse_leading_int("007"), Some(7));
    }

    #[test]
    fn rejects_non_numeric_input() {
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("-"), None);
        assert_eq!(parse_leading_int("0x"), None);
        assert_eq!(parse_leading_int("99999999999999999999"), None);
    }

    #[tokio::test]
    async fn list_returns_mock_users() -> anyhow::Result<()> {
        let (status, body) = get_json("/api/users").await?;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"users": [
                {"id": 1, "name": "John Doe", "email": "john@example.com"},
                {"id": 2, "name": "Jane Smith", "email": "jane@example.com"}
            ]})
        );
        Ok(())
    }

    #[tokio::test]
    async fn get_echoes_requested_id() -> anyhow::Result<()> {
        let (status, body) = get_json("/api/users/2").await?;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"user": {"id": 2, "name": "John Doe", "email": "john@example.com"}})
        );
        Ok(())
    }

    #[tokio::test]
    async fn get_with_non_numeric_id_has_null_id() -> anyhow::Result<()> {
        let (status, body) = get_json("/api/users/abc").await?;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.pointer("/user/id"), Some(&Value::Null));
        Ok(())
    }

    #[tokio::test]
    async fn undecodable_id_is_a_json_bad_request() -> anyhow::Result<()> {
        let (status, body) = get_json("/api/users/%FF").await?;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body
            .get("error")
            .and_then(Value::as_str)
            .is_some_and(|message| message.contains("UTF-8")));
        Ok(())
    }
}
