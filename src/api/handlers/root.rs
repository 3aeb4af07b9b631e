use crate::banner;
use axum::response::{Html, IntoResponse};

// axum handler for the landing page
pub async fn root() -> impl IntoResponse {
    Html(banner::landing_html())
}
