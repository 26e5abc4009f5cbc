//! HTTP front end for the Khulasa summarizer.
//!
//! Routes:
//! - `GET /` form page
//! - `POST /api/scrape` JSON summary endpoint
//! - `GET /health`

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::Method;
use axum::routing::{get, post};
use khulasa_core::{Dictionary, Result, Summarizer};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub use config::ServerConfig;
pub use error::{ApiError, ErrorResponse};

/// Shared, read-only state for all requests.
#[derive(Debug, Clone)]
pub struct AppState {
    pub summarizer: Summarizer,
}

impl AppState {
    /// Builds the summarizer, loading the extension dictionary if configured.
    pub fn from_config(config: &ServerConfig) -> Result<Self> {
        let dictionary = match &config.dictionary_path {
            Some(path) => Dictionary::extended_from_file(path)?,
            None => Dictionary::builtin().clone(),
        };
        let summarizer = Summarizer::with_dictionary(config.summarizer.clone(), dictionary)?;
        tracing::info!(entries = summarizer.dictionary().len(), "dictionary ready");
        Ok(Self { summarizer })
    }

    /// Upper bound for a whole request: both outbound calls plus slack.
    pub fn request_timeout(&self) -> Duration {
        let config = self.summarizer.config();
        Duration::from_secs(config.fetch.timeout + config.upstream.fetch.timeout + 5)
    }
}

/// Builds the application router.
pub fn app(state: AppState) -> Router {
    let timeout = state.request_timeout();

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/", get(routes::index))
        .route("/health", get(routes::health))
        .route("/api/scrape", post(routes::scrape))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(timeout))
                .layer(CompressionLayer::new())
                .layer(cors),
        )
        .with_state(Arc::new(state))
}
