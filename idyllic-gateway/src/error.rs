//! Error types for the gateway crate.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use idyllic_core::CoreError;
use serde_json::json;

/// Errors that can occur during gateway request handling.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum GatewayError {
    /// An error propagated from the store or validation layer.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The request body could not be parsed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The `{id}` path segment is not an integer, so no user can match it.
    #[error("user with id {0} not found")]
    InvalidUserId(String),

    /// No route matches the request path.
    #[error("route not found: {0}")]
    RouteNotFound(String),

    /// The route exists but does not accept this method.
    #[error("method {method} not allowed on {path}")]
    MethodNotAllowed { method: String, path: String },

    /// The request body exceeds the configured size limit.
    #[error("request body too large")]
    PayloadTooLarge,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            GatewayError::Core(CoreError::Validation(fields)) => (
                StatusCode::BAD_REQUEST,
                json!({"error": "validation failed", "fields": fields}),
            ),
            GatewayError::Core(CoreError::UserNotFound(_))
            | GatewayError::InvalidUserId(_)
            | GatewayError::RouteNotFound(_) => {
                (StatusCode::NOT_FOUND, json!({"error": self.to_string()}))
            }
            GatewayError::InvalidRequest(_) => {
                (StatusCode::BAD_REQUEST, json!({"error": self.to_string()}))
            }
            GatewayError::MethodNotAllowed { .. } => (
                StatusCode::METHOD_NOT_ALLOWED,
                json!({"error": self.to_string()}),
            ),
            GatewayError::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                json!({"error": self.to_string()}),
            ),
            GatewayError::Core(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({"error": self.to_string()}),
            ),
        };
        (status, Json(body)).into_response()
    }
}
