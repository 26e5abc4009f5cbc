//! HTTP mapping of pipeline errors.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use khulasa_core::{ErrorKind, KhulasaError};
use serde::{Deserialize, Serialize};

/// JSON error body: `{ "error": "..." }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Error returned from handlers.
#[derive(Debug)]
pub struct ApiError(pub KhulasaError);

impl From<KhulasaError> for ApiError {
    fn from(err: KhulasaError) -> Self {
        Self(err)
    }
}

/// Status code for an error, keyed on its [`ErrorKind`].
///
/// Summarizer failures keep the summarizer's status when it is an error
/// status; article page failures are always 502.
pub fn status_for(err: &KhulasaError) -> StatusCode {
    match err.kind() {
        ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
        ErrorKind::UpstreamUnavailable => match err {
            KhulasaError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::BAD_GATEWAY,
        },
        ErrorKind::UpstreamError => match err {
            KhulasaError::Upstream { status, .. } => StatusCode::from_u16(*status)
                .ok()
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::BAD_GATEWAY),
            _ => StatusCode::BAD_GATEWAY,
        },
        ErrorKind::InternalFailure => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);

        match self.0.kind() {
            ErrorKind::InternalFailure => tracing::error!(error = %self.0, "request failed"),
            ErrorKind::UpstreamError | ErrorKind::UpstreamUnavailable => {
                tracing::warn!(error = %self.0, status = status.as_u16(), "upstream failure")
            }
            ErrorKind::InvalidInput => tracing::debug!(error = %self.0, "rejected request"),
        }

        (status, Json(ErrorResponse { error: self.0.user_message() })).into_response()
    }
}
