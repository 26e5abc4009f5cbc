//! Request handlers.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::Html;
use khulasa_core::{KhulasaError, SummaryRequest, SummaryResult};

use crate::AppState;
use crate::error::ApiError;

const INDEX_HTML: &str = include_str!("../static/index.html");

/// `GET /`: the summarizer form page.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// `GET /health`
pub async fn health() -> &'static str {
    "OK"
}

/// `POST /api/scrape`: summarize (and optionally scrape) one article.
pub async fn scrape(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SummaryRequest>, JsonRejection>,
) -> Result<Json<SummaryResult>, ApiError> {
    let Json(request) = payload.map_err(|e| KhulasaError::InvalidRequest(e.body_text()))?;

    let result = state.summarizer.summarize(&request).await?;

    Ok(Json(result))
}
