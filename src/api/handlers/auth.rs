//! Demo authentication endpoints.
//!
//! Flow Overview:
//! 1) Decode the body (JSON or form).
//! 2) Reject the request with `400` when a required field is missing.
//! 3) Answer with a mock token or a mock created account.
//!
//! No credentials are checked and nothing is stored.

use super::present;
use crate::api::{error::ApiError, extract::Payload};
use axum::{http::StatusCode, Json};
use secrecy::{ExposeSecret, SecretString};
use serde::{de::IgnoredAny, Deserialize, Deserializer, Serialize};
use tracing::{debug, instrument};
use utoipa::ToSchema;

pub const MOCK_TOKEN: &str = "mock-jwt-token";
pub const MOCK_USER_ID: i64 = 1;
pub const LOGIN_FIELDS_REQUIRED: &str = "Email and password required";
pub const REGISTER_FIELDS_REQUIRED: &str = "Email, password, and name required";
pub const USER_CREATED: &str = "User created successfully";

#[derive(ToSchema, Deserialize, Debug, Default)]
pub struct LoginRequest {
    #[serde(default, deserialize_with = "text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "secret_text")]
    #[schema(value_type = Option<String>)]
    pub password: Option<SecretString>,
}

#[derive(ToSchema, Deserialize, Debug, Default)]
pub struct RegisterRequest {
    #[serde(default, deserialize_with = "text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "secret_text")]
    #[schema(value_type = Option<String>)]
    pub password: Option<SecretString>,
    #[serde(default, deserialize_with = "text")]
    pub name: Option<String>,
}

/// Keep string values only; numbers, objects and the like count as missing.
fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Field {
        Text(String),
        Other(IgnoredAny),
    }

    Ok(match Option::<Field>::deserialize(deserializer)? {
        Some(Field::Text(value)) => Some(value),
        Some(Field::Other(_)) | None => None,
    })
}

fn secret_text<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    text(deserializer).map(|value| value.map(SecretString::from))
}

/// Account echoed back by the auth endpoints.
#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub id: i64,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct LoginResponse {
    pub token: String,
    pub user: Account,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct RegisterResponse {
    pub message: String,
    pub user: Account,
}

fn secret_present(secret: Option<&SecretString>) -> bool {
    present(secret.map(|secret| secret.expose_secret())).is_some()
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body(content = LoginRequest, content_type = "application/json"),
    responses(
        (status = 200, description = "Mock login succeeded", body = LoginResponse),
        (status = 400, description = "Email or password missing", body = crate::api::error::ErrorBody),
        (status = 500, description = "Unexpected failure", body = crate::api::error::ErrorBody),
    ),
    tag = "auth"
)]
#[instrument(skip_all)]
pub async fn login(
    Payload(payload): Payload<LoginRequest>,
) -> Result<(StatusCode, Json<LoginResponse>), ApiError> {
    let (Some(email), true) = (
        present(payload.email.as_deref()),
        secret_present(payload.password.as_ref()),
    ) else {
        return Err(ApiError::BadRequest(LOGIN_FIELDS_REQUIRED.to_string()));
    };

    debug!("login for {}", email);

    Ok((
        StatusCode::OK,
        Json(LoginResponse {
            token: MOCK_TOKEN.to_string(),
            user: Account {
                email: email.to_string(),
                name: None,
                id: MOCK_USER_ID,
            },
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body(content = RegisterRequest, content_type = "application/json"),
    responses(
        (status = 201, description = "Mock account created", body = RegisterResponse),
        (status = 400, description = "Email, password or name missing", body = crate::api::error::ErrorBody),
        (status = 500, description = "Unexpected failure", body = crate::api::error::ErrorBody),
    ),
    tag = "auth"
)]
#[instrument(skip_all)]
pub async fn register(
    Payload(payload): Payload<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let (Some(email), true, Some(name)) = (
        present(payload.email.as_deref()),
        secret_present(payload.password.as_ref()),
        present(payload.name.as_deref()),
    ) else {
        return Err(ApiError::BadRequest(REGISTER_FIELDS_REQUIRED.to_string()));
    };

    debug!("register for {}", email);

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: USER_CREATED.to_string(),
            user: Account {
                email: email.to_string(),
                name: Some(name.to_string()),
                id: MOCK_USER_ID,
            },
        }),
    ))
}
