use crate::api::{
    error::{ApiError, INTERNAL_SERVER_ERROR},
    handlers::root,
};
use anyhow::{anyhow, Context, Result};
use axum::{
    body::Body,
    extract::{MatchedPath, Request as AxumRequest},
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderName, HeaderValue, Method, Request,
    },
    response::{IntoResponse, Response},
    routing::get,
    Json, Router, ServiceExt,
};
use std::{any::Any, future::Future};
use tokio::net::TcpListener;
use tower::{Layer, ServiceBuilder};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, CorsLayer},
    normalize_path::{NormalizePath, NormalizePathLayer},
    request_id::PropagateRequestIdLayer,
    set_header::SetRequestHeaderLayer,
    trace::TraceLayer,
};
use tracing::{error, info, info_span, Span};
use ulid::Ulid;
use url::Url;
use utoipa_axum::router::OpenApiRouter;

pub mod error;
pub mod extract;
pub mod handlers;
// OpenAPI router wiring and route registration live in openapi.rs.
mod openapi;

pub use openapi::openapi;

pub const DEFAULT_PORT: u16 = 3000;
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";
const REQUEST_ID_HEADER: &str = "x-request-id";

/// The served application: the router behind trailing-slash normalization.
pub type App = NormalizePath<Router>;

/// Build the API router with all documented routes registered.
#[must_use]
pub fn router() -> OpenApiRouter {
    openapi::api_router()
}

/// Runtime settings for the API server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    port: u16,
    cors_origin: Option<String>,
}

impl ServerConfig {
    #[must_use]
    pub const fn new(port: u16) -> Self {
        Self {
            port,
            cors_origin: None,
        }
    }

    #[must_use]
    pub fn with_cors_origin(mut self, origin: Option<String>) -> Self {
        self.cors_origin = origin;
        self
    }

    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    #[must_use]
    pub fn cors_origin(&self) -> Option<&str> {
        self.cors_origin.as_deref()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PORT)
    }
}

/// Assemble the full application: documented routes, the landing page,
/// the `OpenAPI` document and the middleware stack.
///
/// Trailing slashes are trimmed before routing, so `/api/users/` reaches the
/// same handler as `/api/users`.
///
/// # Errors
/// Returns an error if the configured CORS origin is not a valid URL.
pub fn app(config: &ServerConfig) -> Result<App> {
    // Routes added outside the OpenAPI router (`/` and the document itself) are not documented.
    let (router, openapi) = router().split_for_parts();

    let app = router
        .route("/", get(root::root))
        .route(
            OPENAPI_PATH,
            get(move || {
                let document = openapi.clone();
                async move { Json(document) }
            }),
        )
        .fallback(error::not_found)
        .method_not_allowed_fallback(error::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static(REQUEST_ID_HEADER),
                    |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    REQUEST_ID_HEADER,
                )))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(make_span)
                        .on_request(|request: &Request<Body>, _span: &Span| {
                            info!("{} {}", request.method(), request.uri().path());
                        }),
                )
                .layer(CatchPanicLayer::custom(handle_panic)),
        );

    let app = match config.cors_origin() {
        Some(origin) => {
            let cors = CorsLayer::new()
                .allow_headers([CONTENT_TYPE, AUTHORIZATION])
                .allow_methods([Method::GET, Method::POST])
                .allow_origin(AllowOrigin::exact(cors_origin(origin)?));
            app.layer(cors)
        }
        None => app,
    };

    Ok(NormalizePathLayer::trim_trailing_slash().layer(app))
}

/// Start the server on `[::]:<port>` and run until a shutdown signal arrives.
/// # Errors
/// Return error if failed to start the server
pub async fn new(config: ServerConfig) -> Result<()> {
    let app = app(&config)?;

    let listener = TcpListener::bind(format!("::0:{}", config.port()))
        .await
        .with_context(|| format!("Failed to bind port {}", config.port()))?;

    info!("Server running on port {}", config.port());

    serve(listener, app, shutdown_signal()).await
}

/// Serve `app` on an already bound listener until `shutdown` resolves.
/// # Errors
/// Returns an error if the underlying server fails.
pub async fn serve<F>(listener: TcpListener, app: App, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        info!("Listening on {}", addr);
    }

    axum::serve(listener, ServiceExt::<AxumRequest>::into_make_service(app))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Gracefully shutdown");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C"),
        () = terminate => info!("Received SIGTERM"),
    }
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        http.method = %request.method(),
        http.route = matched_path,
        request_id
    )
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");

    error!("Handler panicked: {}", detail);

    ApiError::Internal(INTERNAL_SERVER_ERROR.to_string()).into_response()
}

fn cors_origin(origin: &str) -> Result<HeaderValue> {
    let parsed = Url::parse(origin).with_context(|| format!("Invalid CORS origin: {origin}"))?;
    let host = parsed
        .host_str()
        .ok_or_else(|| anyhow!("CORS origin must include a valid host: {origin}"))?;
    let port = parsed
        .port()
        .map_or_else(String::new, |port| format!(":{port}"));
    let origin = format!("{}://{}{}", parsed.scheme(), host, port);
    HeaderValue::from_str(&origin).context("Failed to build CORS origin header")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::error::ErrorBody;
    use axum::{body::to_bytes, http::StatusCode};
    use tower::ServiceExt;

    #[test]
    fn cors_origin_strips_path() -> Result<()> {
        let origin = cors_origin("http://localhost:3001/app/")?;
        assert_eq!(origin, "http://localhost:3001");
        Ok(())
    }

    #[test]
    fn cors_origin_rejects_garbage() {
        assert!(cors_origin("not a url").is_err());
    }

    #[test]
    fn server_config_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.port(), DEFAULT_PORT);
        assert_eq!(config.cors_origin(), None);
    }

    #[tokio::test]
    async fn unknown_route_is_json_not_found() -> Result<()> {
        let app = app(&ServerConfig::default())?;
        let response = app
            .oneshot(Request::builder().uri("/nope").body(Body::empty())?)
            .await?;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = to_bytes(response.into_body(), usize::MAX).await?;
        let payload: ErrorBody = serde_json::from_slice(&body)?;
        assert_eq!(payload.error, error::NOT_FOUND);
        Ok(())
    }

    #[tokio::test]
    async fn trailing_slash_reaches_the_route() -> Result<()> {
        for uri in ["/api/users/", "/health/", "/api/users/7/"] {
            let app = app(&ServerConfig::default())?;
            let response = app
                .oneshot(Request::builder().uri(uri).body(Body::empty())?)
                .await?;
            assert_eq!(response.status(), StatusCode::OK, "{uri}");
        }
        Ok(())
    }

    #[tokio::test]
    async fn wrong_method_is_json_not_found() -> Result<()> {
        let app = app(&ServerConfig::default())?;
        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/health")
                    .body(Body::empty())?,
            )
            .await?;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = to_bytes(response.into_body(), usize::MAX).await?;
        let payload: ErrorBody = serde_json::from_slice(&body)?;
        assert_eq!(payload.error, error::NOT_FOUND);
        Ok(())
    }

    #[tokio::test]
    async fn request_id_is_generated_and_propagated() -> Result<()> {
        let app = app(&ServerConfig::default())?;
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty())?)
            .await?;

        assert_eq!(response.status(), StatusCode::OK);
        let request_id = response
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(ToString::to_string);
        assert!(request_id.is_some_and(|id| Ulid::from_string(&id).is_ok()));
        Ok(())
    }

    #[tokio::test]
    async fn caller_request_id_is_kept() -> Result<()> {
        let app = app(&ServerConfig::default())?;
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/users")
                    .header(REQUEST_ID_HEADER, "abc-123")
                    .body(Body::empty())?,
            )
            .await?;

        assert_eq!(
            response
                .headers()
                .get(REQUEST_ID_HEADER)
                .and_then(|value| value.to_str().ok()),
            Some("abc-123")
        );
        Ok(())
    }

    #[tokio::test]
    async fn landing_page_is_html() -> Result<()> {
        let app = app(&ServerConfig::default())?;
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty())?)
            .await?;

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(ToString::to_string);
        assert!(content_type.is_some_and(|value| value.starts_with("text/html")));
        Ok(())
    }

    #[tokio::test]
    async fn openapi_document_is_served() -> Result<()> {
        let app = app(&ServerConfig::default())?;
        let response = app
            .oneshot(Request::builder().uri(OPENAPI_PATH).body(Body::empty())?)
            .await?;

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await?;
        let document: serde_json::Value = serde_json::from_slice(&body)?;
        assert!(document.pointer("/paths/~1api~1auth~1login").is_some());
        Ok(())
    }

    #[tokio::test]
    async fn panics_become_internal_server_errors() -> Result<()> {
        async fn explode() -> &'static str {
            panic!("handler exploded")
        }

        let app = Router::new()
            .route("/explode", get(explode))
            .layer(CatchPanicLayer::custom(handle_panic));
        let response = app
            .oneshot(Request::builder().uri("/explode").body(Body::empty())?)
            .await?;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(response.into_body(), usize::MAX).await?;
        let payload: ErrorBody = serde_json::from_slice(&body)?;
        assert_eq!(payload.error, INTERNAL_SERVER_ERROR);
        Ok(())
    }
}
