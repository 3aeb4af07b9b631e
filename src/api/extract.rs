//! Body extractor that accepts JSON or url-encoded forms.
//!
//! Bodies with no recognised content type, empty JSON bodies and JSON values
//! that are not objects decode to `T::default()` so handlers answer with their
//! own presence-check errors.

use super::error::ApiError;
use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    Form,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyKind {
    Json,
    Form,
    Other,
}

fn body_kind(content_type: Option<&str>) -> BodyKind {
    let Some(content_type) = content_type else {
        return BodyKind::Other;
    };

    let mime = content_type
        .split(';')
        .next()
        .map(str::trim)
        .unwrap_or_default()
        .to_ascii_lowercase();

    if mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
    {
        BodyKind::Json
    } else if mime == "application/x-www-form-urlencoded" {
        BodyKind::Form
    } else {
        BodyKind::Other
    }
}

#[derive(Debug, Clone, Default)]
pub struct Payload<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned + Default + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let kind = body_kind(
            req.headers()
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok()),
        );

        match kind {
            BodyKind::Json => {
                let bytes = Bytes::from_request(req, state)
                    .await
                    .map_err(|rejection| ApiError::Rejected {
                        status: rejection.status(),
                        message: rejection.body_text(),
                    })?;

                if bytes.iter().all(u8::is_ascii_whitespace) {
                    return Ok(Self(T::default()));
                }

                let value: Value = serde_json::from_slice(&bytes)
                    .map_err(|err| ApiError::BadRequest(err.to_string()))?;

                // Arrays and scalars carry no field names.
                if !value.is_object() {
                    debug!("JSON body is not an object, using an empty payload");
                    return Ok(Self(T::default()));
                }

                serde_json::from_value(value)
                    .map(Self)
                    .map_err(|err| ApiError::BadRequest(err.to_string()))
            }
            BodyKind::Form => Form::<T>::from_request(req, state)
                .await
                .map(|Form(value)| Self(value))
                .map_err(|rejection| ApiError::Rejected {
                    status: rejection.status(),
                    message: rejection.body_text(),
                }),
            BodyKind::Other => {
                debug!("Unsupported or missing content type, using an empty payload");
                Ok(Self(T::default()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::error::ErrorBody;
    use axum::{
        body::{to_bytes, Body},
        extract::DefaultBodyLimit,
        http::StatusCode,
        routing::post,
        Json, Router,
    };
    use serde::{Deserialize, Serialize};
    use tower::ServiceExt;

    #[derive(Deserialize, Serialize, Debug, Default, PartialEq, Eq)]
    struct Credentials {
        #[serde(default)]
        email: Option<String>,
    }

    async fn echo(Payload(body): Payload<Credentials>) -> Json<Credentials> {
        Json(body)
    }

    fn app() -> Router {
        Router::new()
            .route("/echo", post(echo))
            .layer(DefaultBodyLimit::max(64))
    }

    async fn send(content_type: &str, body: impl Into<Body>) -> anyhow::Result<(StatusCode, Vec<u8>)> {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/echo")
                    .header(CONTENT_TYPE, content_type)
                    .body(body.into())?,
            )
            .await?;
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await?;
        Ok((status, body.to_vec()))
    }

    #[tokio::test]
    async fn json_object_is_decoded() -> anyhow::Result<()> {
        let (status, body) = send("application/json", r#"{"email":"a@b.c"}"#).await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            serde_json::from_slice::<Credentials>(&body)?,
            Credentials {
                email: Some("a@b.c".to_string())
            }
        );
        Ok(())
    }

    #[tokio::test]
    async fn json_array_is_an_empty_payload() -> anyhow::Result<()> {
        for raw in [r#"["a@b.c"]"#, "\"a@b.c\"", "42", "null"] {
            let (status, body) = send("application/json", raw).await?;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(serde_json::from_slice::<Credentials>(&body)?, Credentials::default());
        }
        Ok(())
    }

    #[tokio::test]
    async fn oversized_body_keeps_payload_too_large() -> anyhow::Result<()> {
        let raw = format!(r#"{{"email":"{}"}}"#, "a".repeat(128));
        let (status, body) = send("application/json", raw).await?;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        let payload: ErrorBody = serde_json::from_slice(&body)?;
        assert!(!payload.error.is_empty());
        Ok(())
    }

    #[test]
    fn detects_json() {
        assert_eq!(body_kind(Some("application/json")), BodyKind::Json);
        assert_eq!(
            body_kind(Some("application/json; charset=utf-8")),
            BodyKind::Json
        );
        assert_eq!(body_kind(Some("application/merge-patch+json")), BodyKind::Json);
        assert_eq!(body_kind(Some("Application/JSON")), BodyKind::Json);
    }

    #[test]
    fn detects_form() {
        assert_eq!(
            body_kind(Some("application/x-www-form-urlencoded")),
            BodyKind::Form
        );
    }

    #[test]
    fn everything_else_is_other() {
        assert_eq!(body_kind(None), BodyKind::Other);
        assert_eq!(body_kind(Some("text/plain")), BodyKind::Other);
        assert_eq!(body_kind(Some("")), BodyKind::Other);
    }
}
