use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Central error type for the price endpoints
///
/// Handlers map every upstream problem into one of these; nothing else
/// escapes past the HTTP response.
#[derive(Debug, Error)]
pub enum AppError {
    /// Upstream answered but had no usable price. Clients should retry later.
    #[error("{error}: {message}")]
    ServiceUnavailable { error: String, message: String },

    /// Anything unexpected. `source` is logged, never serialized.
    #[error("{error}")]
    Failed {
        error: String,
        #[source]
        source: anyhow::Error,
    },

    /// No usable data on an endpoint that reports every failure as 500.
    #[error("{error}: {reason}")]
    NoData { error: String, reason: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::ServiceUnavailable { error, message } => (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "error": error, "message": message })),
            )
                .into_response(),
            AppError::Failed { error, source } => {
                tracing::error!(error = ?source, "{}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": error })),
                )
                    .into_response()
            }
            AppError::NoData { error, reason } => {
                tracing::warn!(%error, %reason, "upstream data unavailable");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": error })),
                )
                    .into_response()
            }
        }
    }
}
